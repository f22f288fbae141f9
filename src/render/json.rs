//! JSON dump of decoded outlines.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::Workbook;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a workbook to JSON.
pub fn to_json(workbook: &Workbook, format: JsonFormat) -> Result<String> {
    to_json_value(workbook, format)
}

/// Serialize any model value (a sheet, a subtree, statistics) to JSON.
pub fn to_json_value<T: Serialize>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OutlineNode;

    #[test]
    fn test_to_json_pretty() {
        let workbook = Workbook::from_root(
            OutlineNode::new("Intro").child(OutlineNode::new("Point").bold()),
        );

        let json = to_json(&workbook, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"title\""));
        assert!(json.contains("Intro"));
        assert!(json.contains("fo:font-weight"));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let workbook = Workbook::from_root(OutlineNode::new("Intro"));
        let json = to_json(&workbook, JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
    }

    #[test]
    fn test_json_round_trip_of_subtree() {
        let node = OutlineNode::new("a").child(OutlineNode::new("b").with_marker("tag-red"));
        let json = to_json_value(&node, JsonFormat::Compact).unwrap();
        let back: OutlineNode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, node);
    }
}
