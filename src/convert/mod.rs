//! Document converter module.
//!
//! A converter takes a file (or bytes), decodes it into an outline and
//! renders both artifacts. The registry dispatches on file extensions.
//!
//! # Example
//!
//! ```no_run
//! use xmindmd::convert::{ConverterRegistry, ConvertOptions};
//! use std::path::Path;
//!
//! fn main() -> xmindmd::Result<()> {
//!     let registry = ConverterRegistry::with_defaults();
//!
//!     let result = registry.convert(Path::new("talk.xmind"), &ConvertOptions::default())?;
//!     println!("{}", result.document);
//!     Ok(())
//! }
//! ```

mod xmind;

pub use xmind::XmindConverter;

use crate::error::{Error, Result};
use crate::model::Metadata;
use crate::parser::ParseOptions;
use crate::render::{ConversionStats, RenderOptions, RenderResult, SlideCommands};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Infix inserted before the extension of the deck file name.
pub const DECK_INFIX: &str = "_revealjs";

/// Options for document conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Decoding options
    pub parse: ParseOptions,

    /// Rendering options
    pub render: RenderOptions,

    /// Sheet to convert (0-indexed)
    pub sheet: usize,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set decoding options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse = options;
        self
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render = options;
        self
    }

    /// Select the sheet to convert.
    pub fn with_sheet(mut self, sheet: usize) -> Self {
        self.sheet = sheet;
        self
    }
}

/// Result of document conversion.
#[derive(Debug, Clone)]
pub struct ConvertResult {
    /// Linear document
    pub document: String,

    /// Slide deck (empty when the outline has no slide)
    pub deck: String,

    /// File extension of both artifacts (with leading dot)
    pub extension: &'static str,

    /// Source document metadata
    pub metadata: Metadata,

    /// Slide commands found in the outline
    pub commands: SlideCommands,

    /// Conversion statistics
    pub stats: ConversionStats,
}

impl ConvertResult {
    /// Build a conversion result from a render result.
    pub fn new(rendered: RenderResult, extension: &'static str, metadata: Metadata) -> Self {
        Self {
            document: rendered.document,
            deck: rendered.deck,
            extension,
            metadata,
            commands: rendered.commands,
            stats: rendered.stats,
        }
    }

    /// Whether a slide deck was produced.
    pub fn has_deck(&self) -> bool {
        !self.deck.is_empty()
    }

    /// Suggested path of the linear document.
    ///
    /// An explicit output path is used as is; otherwise the input's extension
    /// is replaced by the dialect extension.
    pub fn document_path(&self, input: &Path, output: Option<&Path>) -> PathBuf {
        match output {
            Some(path) => path.to_path_buf(),
            None => input.with_extension(self.extension.trim_start_matches('.')),
        }
    }

    /// Suggested path of the slide deck: the document path with `_revealjs`
    /// inserted before its extension.
    pub fn deck_path(&self, input: &Path, output: Option<&Path>) -> PathBuf {
        deck_path_for(&self.document_path(input, output))
    }
}

/// Insert [`DECK_INFIX`] before the extension of `document`.
pub fn deck_path_for(document: &Path) -> PathBuf {
    let stem = document
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match document.extension() {
        Some(ext) => format!("{}{}.{}", stem, DECK_INFIX, ext.to_string_lossy()),
        None => format!("{}{}", stem, DECK_INFIX),
    };
    document.with_file_name(name)
}

/// Trait for document converters.
///
/// Implement this trait to add support for a new outline format.
pub trait DocumentConverter: Send + Sync {
    /// Get the supported file extensions for this converter.
    ///
    /// Extensions should be lowercase without the leading dot (e.g., `["xmind"]`).
    fn supported_extensions(&self) -> &[&str];

    /// Get the name of this converter.
    fn name(&self) -> &str;

    /// Convert a file at the given path.
    fn convert(&self, path: &Path, options: &ConvertOptions) -> Result<ConvertResult>;

    /// Convert from bytes.
    fn convert_bytes(&self, bytes: &[u8], options: &ConvertOptions) -> Result<ConvertResult>;

    /// Check if this converter supports the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Registry for document converters.
///
/// The registry maps file extensions to converters and provides
/// convenient methods for converting documents.
pub struct ConverterRegistry {
    converters: HashMap<String, Arc<dyn DocumentConverter>>,
    by_name: HashMap<String, Arc<dyn DocumentConverter>>,
}

impl ConverterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            converters: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with default converters (XMind).
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(XmindConverter::new()));
        registry
    }

    /// Register a converter for all its supported extensions.
    pub fn register(&mut self, converter: Arc<dyn DocumentConverter>) {
        for ext in converter.supported_extensions() {
            self.converters
                .insert(ext.to_lowercase(), converter.clone());
        }
        self.by_name
            .insert(converter.name().to_lowercase(), converter);
    }

    /// Get a converter by file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn DocumentConverter>> {
        self.converters.get(&ext.to_lowercase()).cloned()
    }

    /// Get a converter by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn DocumentConverter>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.converters.contains_key(&ext.to_lowercase())
    }

    /// Get all supported extensions.
    pub fn supported_extensions(&self) -> Vec<&str> {
        self.converters.keys().map(|s| s.as_str()).collect()
    }

    /// Convert a file using the appropriate converter.
    pub fn convert(&self, path: &Path, options: &ConvertOptions) -> Result<ConvertResult> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::Other("File has no extension".into()))?;

        let converter = self
            .get_by_extension(ext)
            .ok_or_else(|| Error::Other(format!("No converter for extension: {}", ext)))?;

        converter.convert(path, options)
    }

    /// Convert bytes using the specified extension to determine the converter.
    pub fn convert_bytes(
        &self,
        bytes: &[u8],
        ext: &str,
        options: &ConvertOptions,
    ) -> Result<ConvertResult> {
        let converter = self
            .get_by_extension(ext)
            .ok_or_else(|| Error::Other(format!("No converter for extension: {}", ext)))?;

        converter.convert_bytes(bytes, options)
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
