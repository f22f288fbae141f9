//! Parsing options and configuration.

/// Name of the JSON content entry inside an XMind archive.
pub const CONTENT_ENTRY: &str = "content.json";

/// Name of the optional metadata entry inside an XMind archive.
pub const METADATA_ENTRY: &str = "metadata.json";

/// Options for decoding XMind documents.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Maximum outline nesting accepted (0 = unlimited)
    pub max_depth: usize,

    /// Whether to decode detached (floating) topics as trailing children
    pub include_detached: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (skip invalid content).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set the maximum accepted outline depth.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Enable or disable decoding of detached topics.
    pub fn with_detached(mut self, include: bool) -> Self {
        self.include_detached = include;
        self
    }

    /// Whether lenient mode is active.
    pub fn is_lenient(&self) -> bool {
        self.error_mode == ErrorMode::Lenient
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            max_depth: 256,
            include_detached: false,
        }
    }
}

/// Error handling mode during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any error
    #[default]
    Strict,
    /// Skip invalid content and continue
    Lenient,
}
