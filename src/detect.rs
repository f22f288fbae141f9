//! XMind container detection.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Physical layout of an XMind document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerFormat {
    /// ZIP archive (`.xmind`) holding `content.json`
    Archive,
    /// Bare `content.json` document
    Json,
}

impl std::fmt::Display for ContainerFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContainerFormat::Archive => write!(f, "XMind archive"),
            ContainerFormat::Json => write!(f, "XMind JSON"),
        }
    }
}

/// ZIP local file header magic: PK\x03\x04
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Detect the container format from a file path.
///
/// # Example
/// ```no_run
/// use xmindmd::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("map.xmind").unwrap();
/// println!("Container: {}", format);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<ContainerFormat> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut header = Vec::with_capacity(64);
    reader.by_ref().take(64).read_to_end(&mut header)?;
    detect_format_from_bytes(&header)
}

/// Detect the container format from the first bytes of a document.
///
/// # Returns
/// * `Ok(ContainerFormat::Archive)` for ZIP data
/// * `Ok(ContainerFormat::Json)` for data starting with a JSON array or object
/// * `Err(Error::UnknownFormat)` otherwise
pub fn detect_format_from_bytes(data: &[u8]) -> Result<ContainerFormat> {
    if data.starts_with(ZIP_MAGIC) {
        return Ok(ContainerFormat::Archive);
    }

    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    match data.iter().find(|b| !b.is_ascii_whitespace()) {
        Some(b'[') | Some(b'{') => Ok(ContainerFormat::Json),
        _ => Err(Error::UnknownFormat),
    }
}

/// Check if a file looks like an XMind document.
pub fn is_xmind<P: AsRef<Path>>(path: P) -> bool {
    detect_format_from_path(path).is_ok()
}

/// Check if bytes look like an XMind document.
pub fn is_xmind_bytes(data: &[u8]) -> bool {
    detect_format_from_bytes(data).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_archive() {
        let data = b"PK\x03\x04\x14\x00\x00\x00";
        assert_eq!(
            detect_format_from_bytes(data).unwrap(),
            ContainerFormat::Archive
        );
    }

    #[test]
    fn test_detect_json() {
        assert_eq!(
            detect_format_from_bytes(b"  [{\"rootTopic\":{}}]").unwrap(),
            ContainerFormat::Json
        );
        assert_eq!(
            detect_format_from_bytes(b"\xEF\xBB\xBF{\"title\":\"x\"}").unwrap(),
            ContainerFormat::Json
        );
    }

    #[test]
    fn test_detect_invalid_format() {
        let result = detect_format_from_bytes(b"<?xml version=\"1.0\"?>");
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_detect_empty() {
        assert!(matches!(
            detect_format_from_bytes(b""),
            Err(Error::UnknownFormat)
        ));
    }

    #[test]
    fn test_is_xmind_bytes() {
        assert!(is_xmind_bytes(b"PK\x03\x04"));
        assert!(!is_xmind_bytes(b"%PDF-1.7"));
    }
}
