//! Error types for xmindmd library.

use std::io;
use thiserror::Error;

/// Result type alias for xmindmd operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reading and converting XMind documents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is neither an XMind archive nor a content.json document.
    #[error("Unknown file format: not an XMind document")]
    UnknownFormat,

    /// The ZIP container could not be read.
    #[error("Archive error: {0}")]
    Archive(String),

    /// The container does not hold the expected content entry.
    #[error("Missing content entry: {0}")]
    MissingContent(String),

    /// XMind 8 (XML) documents are not supported.
    #[error("Legacy XMind 8 document (content.xml) is not supported")]
    LegacyFormat,

    /// The content entry is not valid XMind JSON.
    #[error("JSON decoding error: {0}")]
    Json(String),

    /// The document holds no sheet.
    #[error("Document contains no sheet")]
    EmptyWorkbook,

    /// Sheet index is out of range.
    #[error("Sheet {0} is out of range (document has {1} sheets)")]
    SheetOutOfRange(usize, usize),

    /// The outline is nested deeper than the configured limit.
    #[error("Outline is nested deeper than {0} levels")]
    TooDeep(usize),

    /// Error during rendering (document, slides, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            zip::result::ZipError::FileNotFound => Error::MissingContent(err.to_string()),
            _ => Error::Archive(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            Error::Io(err.into())
        } else {
            Error::Json(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::LegacyFormat;
        assert_eq!(
            err.to_string(),
            "Legacy XMind 8 document (content.xml) is not supported"
        );

        let err = Error::SheetOutOfRange(3, 1);
        assert_eq!(
            err.to_string(),
            "Sheet 3 is out of range (document has 1 sheets)"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("[1,").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_zip_not_found_conversion() {
        let err: Error = zip::result::ZipError::FileNotFound.into();
        assert!(matches!(err, Error::MissingContent(_)));
    }
}
