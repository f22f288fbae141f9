//! XMind document converter implementation.

use crate::error::Result;
use crate::model::Workbook;
use crate::parser::XmindParser;
use crate::render::render;
use std::path::Path;

use super::{ConvertOptions, ConvertResult, DocumentConverter};

/// XMind document converter.
///
/// Converts `.xmind` archives (or a bare `content.json`) into the linear
/// document and the slide deck.
#[derive(Debug, Clone, Default)]
pub struct XmindConverter {
    _private: (),
}

impl XmindConverter {
    /// Create a new XMind converter.
    pub fn new() -> Self {
        Self { _private: () }
    }

    fn convert_workbook(
        &self,
        workbook: Workbook,
        options: &ConvertOptions,
    ) -> Result<ConvertResult> {
        let sheet = workbook.sheet(options.sheet)?;
        log::debug!(
            "Converting sheet {} '{}' ({} nodes)",
            options.sheet,
            sheet.title,
            sheet.root.node_count()
        );

        let rendered = render(&sheet.root, &options.render);
        Ok(ConvertResult::new(
            rendered,
            options.render.style.extension(),
            workbook.metadata.clone(),
        ))
    }
}

impl DocumentConverter for XmindConverter {
    fn supported_extensions(&self) -> &[&str] {
        &["xmind", "json"]
    }

    fn name(&self) -> &str {
        "xmind"
    }

    fn convert(&self, path: &Path, options: &ConvertOptions) -> Result<ConvertResult> {
        let parser = XmindParser::open_with_options(path, options.parse.clone())?;
        let workbook = parser.parse()?;
        self.convert_workbook(workbook, options)
    }

    fn convert_bytes(&self, bytes: &[u8], options: &ConvertOptions) -> Result<ConvertResult> {
        let parser = XmindParser::from_bytes_with_options(bytes, options.parse.clone())?;
        let workbook = parser.parse()?;
        self.convert_workbook(workbook, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_xmind_converter_extensions() {
        let converter = XmindConverter::new();
        assert_eq!(converter.supported_extensions(), &["xmind", "json"]);
        assert!(converter.supports_extension("XMind"));
        assert!(!converter.supports_extension("mm"));
    }

    #[test]
    fn test_convert_json_bytes() {
        let json = br#"[{"rootTopic": {"title": "Intro", "children": {"attached": [{"title": "Point"}]}}}]"#;
        let result = XmindConverter::new()
            .convert_bytes(json, &ConvertOptions::default())
            .unwrap();
        assert_eq!(result.extension, ".md");
        assert!(result.document.contains("# Intro"));
        assert!(result.document.contains("## Point"));
        assert!(!result.has_deck());
    }

    #[test]
    fn test_sheet_out_of_range() {
        let json = br#"[{"rootTopic": {"title": "Only"}}]"#;
        let options = ConvertOptions::new().with_sheet(1);
        let result = XmindConverter::new().convert_bytes(json, &options);
        assert!(matches!(result, Err(Error::SheetOutOfRange(1, 1))));
    }
}
