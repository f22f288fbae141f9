//! # xmindmd
//!
//! XMind mind-map conversion library for Rust.
//!
//! This library turns an XMind outline into two textual artifacts: a linear
//! DokuWiki or Markdown document (headings and indented lists) and a
//! reveal.js slide deck for the DokuWiki revealjs plugin, with a
//! presentation map and a resolved bibliography.
//!
//! ## Quick Start
//!
//! ```no_run
//! use xmindmd::{parse_file, render};
//!
//! fn main() -> xmindmd::Result<()> {
//!     // Decode an XMind file
//!     let workbook = parse_file("talk.xmind")?;
//!
//!     // Render the first sheet
//!     let options = render::RenderOptions::default();
//!     let result = render::render(workbook.root()?, &options);
//!     println!("{}", result.document);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Two dialects**: DokuWiki and Markdown
//! - **Slide decks**: slide groups, commands, notes, backgrounds, presentation map
//! - **Bibliography**: PubMed citations, reference pages and manual references
//! - **Scoped directives**: `options` nodes, `~~level N~~` header overrides, `~~skip~~`

pub mod convert;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

#[cfg(feature = "ffi")]
pub mod ffi;

// Re-export commonly used types
pub use convert::{
    ConvertOptions, ConvertResult, ConverterRegistry, DocumentConverter, XmindConverter,
};
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_xmind, ContainerFormat};
pub use error::{Error, Result};
pub use model::{Marker, Metadata, NodeStyle, OutlineNode, Sheet, Workbook};
pub use parser::{ErrorMode, ParseOptions, XmindParser};
pub use render::{
    ConversionStats, JsonFormat, Labels, RenderOptions, RenderResult, SlideCommands, SlideTheme,
    Style,
};

use std::io::Read;
use std::path::Path;

/// Parse an XMind file and return the decoded workbook.
///
/// # Arguments
///
/// * `path` - Path to the `.xmind` file (or a bare `content.json`)
///
/// # Example
///
/// ```no_run
/// use xmindmd::parse_file;
///
/// let workbook = parse_file("talk.xmind").unwrap();
/// println!("Sheets: {}", workbook.sheet_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Workbook> {
    let parser = XmindParser::open(path)?;
    parser.parse()
}

/// Parse an XMind file with custom options.
///
/// # Example
///
/// ```no_run
/// use xmindmd::{parse_file_with_options, ParseOptions};
///
/// let options = ParseOptions::new().lenient();
/// let workbook = parse_file_with_options("talk.xmind", options).unwrap();
/// ```
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Workbook> {
    let parser = XmindParser::open_with_options(path, options)?;
    parser.parse()
}

/// Parse an XMind document from bytes.
pub fn parse_bytes(data: &[u8]) -> Result<Workbook> {
    let parser = XmindParser::from_bytes(data)?;
    parser.parse()
}

/// Parse an XMind document from bytes with custom options.
pub fn parse_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Workbook> {
    let parser = XmindParser::from_bytes_with_options(data, options)?;
    parser.parse()
}

/// Parse an XMind document from a reader.
pub fn parse_reader<R: Read>(reader: R) -> Result<Workbook> {
    let parser = XmindParser::from_reader(reader)?;
    parser.parse()
}

/// Parse an XMind document from a reader with custom options.
pub fn parse_reader_with_options<R: Read>(reader: R, options: ParseOptions) -> Result<Workbook> {
    let parser = XmindParser::from_reader_with_options(reader, options)?;
    parser.parse()
}

/// Convert an XMind file with default options.
///
/// # Example
///
/// ```no_run
/// use xmindmd::convert_file;
///
/// let result = convert_file("talk.xmind").unwrap();
/// std::fs::write("talk.md", &result.document).unwrap();
/// if result.has_deck() {
///     std::fs::write("talk_revealjs.md", &result.deck).unwrap();
/// }
/// ```
pub fn convert_file<P: AsRef<Path>>(path: P) -> Result<ConvertResult> {
    convert_file_with_options(path, &ConvertOptions::default())
}

/// Convert an XMind file with custom options.
pub fn convert_file_with_options<P: AsRef<Path>>(
    path: P,
    options: &ConvertOptions,
) -> Result<ConvertResult> {
    XmindConverter::new().convert(path.as_ref(), options)
}

/// Convert an XMind file to the linear Markdown document.
///
/// # Example
///
/// ```no_run
/// use xmindmd::to_markdown;
///
/// let markdown = to_markdown("talk.xmind").unwrap();
/// std::fs::write("talk.md", markdown).unwrap();
/// ```
pub fn to_markdown<P: AsRef<Path>>(path: P) -> Result<String> {
    Ok(convert_file(path)?.document)
}

/// Convert an XMind file to the linear document with custom options.
pub fn to_document_with_options<P: AsRef<Path>>(
    path: P,
    options: &RenderOptions,
) -> Result<String> {
    let workbook = parse_file(path)?;
    Ok(render::render(workbook.root()?, options).document)
}

/// Convert an XMind file to the slide deck (empty if the outline has no slide).
pub fn to_slides<P: AsRef<Path>>(path: P, options: &RenderOptions) -> Result<String> {
    let workbook = parse_file(path)?;
    Ok(render::render(workbook.root()?, options).deck)
}

/// Dump the decoded outline of an XMind file as JSON.
///
/// # Example
///
/// ```no_run
/// use xmindmd::{to_json, JsonFormat};
///
/// let json = to_json("talk.xmind", JsonFormat::Pretty).unwrap();
/// std::fs::write("talk.json", json).unwrap();
/// ```
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let workbook = parse_file(path)?;
    render::to_json(&workbook, format)
}

/// Builder for decoding and converting XMind documents.
///
/// # Example
///
/// ```no_run
/// use xmindmd::{Style, XmindMd};
///
/// let result = XmindMd::new()
///     .with_style(Style::DokuWiki)
///     .with_header_depth(3)
///     .lenient()
///     .parse("talk.xmind")?
///     .render()?;
/// println!("{}", result.document);
/// # Ok::<(), xmindmd::Error>(())
/// ```
pub struct XmindMd {
    parse_options: ParseOptions,
    render_options: RenderOptions,
    sheet: usize,
}

impl XmindMd {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            render_options: RenderOptions::default(),
            sheet: 0,
        }
    }

    /// Enable lenient decoding mode.
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self
    }

    /// Set the output dialect.
    pub fn with_style(mut self, style: Style) -> Self {
        self.render_options = self.render_options.with_style(style);
        self
    }

    /// Set the number of heading levels.
    pub fn with_header_depth(mut self, depth: usize) -> Self {
        self.render_options = self.render_options.with_header_depth(depth);
        self
    }

    /// Enable or disable the slide deck.
    pub fn with_slides(mut self, enabled: bool) -> Self {
        self.render_options = self.render_options.with_slides(enabled);
        self
    }

    /// Set output labels.
    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.render_options = self.render_options.with_labels(labels);
        self
    }

    /// Select the sheet to render.
    pub fn with_sheet(mut self, sheet: usize) -> Self {
        self.sheet = sheet;
        self
    }

    /// Decode an XMind file.
    pub fn parse<P: AsRef<Path>>(self, path: P) -> Result<XmindMdResult> {
        let parser = XmindParser::open_with_options(path, self.parse_options)?;
        let workbook = parser.parse()?;
        Ok(XmindMdResult {
            workbook,
            render_options: self.render_options,
            sheet: self.sheet,
        })
    }

    /// Decode an XMind document from bytes.
    pub fn parse_bytes(self, data: &[u8]) -> Result<XmindMdResult> {
        let parser = XmindParser::from_bytes_with_options(data, self.parse_options)?;
        let workbook = parser.parse()?;
        Ok(XmindMdResult {
            workbook,
            render_options: self.render_options,
            sheet: self.sheet,
        })
    }
}

impl Default for XmindMd {
    fn default() -> Self {
        Self::new()
    }
}

/// A decoded workbook with the options to render it.
pub struct XmindMdResult {
    /// The decoded workbook
    pub workbook: Workbook,
    render_options: RenderOptions,
    sheet: usize,
}

impl XmindMdResult {
    /// Render the selected sheet into both artifacts.
    pub fn render(&self) -> Result<RenderResult> {
        let sheet = self.workbook.sheet(self.sheet)?;
        Ok(render::render(&sheet.root, &self.render_options))
    }

    /// Render the linear document only.
    pub fn to_document(&self) -> Result<String> {
        Ok(self.render()?.document)
    }

    /// Render the slide deck only.
    pub fn to_slides(&self) -> Result<String> {
        Ok(self.render()?.deck)
    }

    /// Dump the workbook as JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.workbook, format)
    }

    /// Get the workbook.
    pub fn workbook(&self) -> &Workbook {
        &self.workbook
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &[u8] = br#"[{"title": "Sheet", "rootTopic": {"title": "Intro",
        "children": {"attached": [{"title": "Point A"}]}}}]"#;

    #[test]
    fn test_builder() {
        let builder = XmindMd::new()
            .lenient()
            .with_style(Style::DokuWiki)
            .with_header_depth(1)
            .with_slides(false);

        assert!(matches!(
            builder.parse_options.error_mode,
            parser::ErrorMode::Lenient
        ));
        assert_eq!(builder.render_options.style, Style::DokuWiki);
        assert_eq!(builder.render_options.max_header_depth, 1);
        assert!(!builder.render_options.slides);
    }

    #[test]
    fn test_builder_default() {
        let builder = XmindMd::default();
        assert_eq!(builder.render_options.max_header_depth, 2);
        assert_eq!(builder.sheet, 0);
    }

    #[test]
    fn test_builder_parse_bytes_and_render() {
        let result = XmindMd::new()
            .with_header_depth(1)
            .parse_bytes(SAMPLE)
            .unwrap();
        let document = result.to_document().unwrap();
        assert_eq!(document, "# Intro\n\n  * Point A\n");
        assert_eq!(result.to_slides().unwrap(), "");
        assert!(result.to_json(JsonFormat::Compact).unwrap().contains("Point A"));
    }

    #[test]
    fn test_builder_sheet_out_of_range() {
        let result = XmindMd::new().with_sheet(3).parse_bytes(SAMPLE).unwrap();
        assert!(matches!(result.render(), Err(Error::SheetOutOfRange(3, 1))));
    }

    #[test]
    fn test_parse_bytes_empty_data() {
        let data: [u8; 0] = [];
        assert!(matches!(parse_bytes(&data), Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_parse_bytes_unknown_magic() {
        let data = [0xFF, 0xFE, 0x00, 0x01, 0x02, 0x03];
        assert!(parse_bytes(&data).is_err());
    }

    #[test]
    fn test_parse_reader() {
        let workbook = parse_reader(std::io::Cursor::new(SAMPLE)).unwrap();
        assert_eq!(workbook.sheet(0).unwrap().title, "Sheet");
    }

    #[test]
    fn test_parse_bytes_truncated_archive() {
        let result = parse_bytes(b"PK\x03\x04\x14\x00");
        assert!(result.is_err());
    }
}
