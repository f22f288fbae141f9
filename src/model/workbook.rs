//! Workbook-level types.

use super::OutlineNode;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A decoded XMind document: one or more sheets, each holding an outline tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Workbook {
    /// Document metadata (creator application)
    pub metadata: Metadata,

    /// Sheets in document order
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    /// Create a new empty workbook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a workbook with a single sheet around the given root.
    pub fn from_root(root: OutlineNode) -> Self {
        let mut workbook = Self::new();
        workbook.add_sheet(Sheet::new(root.title.clone(), root));
        workbook
    }

    /// Add a sheet.
    pub fn add_sheet(&mut self, sheet: Sheet) {
        self.sheets.push(sheet);
    }

    /// Get the number of sheets.
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Get a sheet by index (0-indexed).
    pub fn sheet(&self, index: usize) -> Result<&Sheet> {
        if self.sheets.is_empty() {
            return Err(Error::EmptyWorkbook);
        }
        self.sheets
            .get(index)
            .ok_or(Error::SheetOutOfRange(index, self.sheets.len()))
    }

    /// Get the first sheet's root topic.
    pub fn root(&self) -> Result<&OutlineNode> {
        self.sheet(0).map(|s| &s.root)
    }

    /// Check if the workbook has any sheet.
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Total number of topics over all sheets.
    pub fn node_count(&self) -> usize {
        self.sheets.iter().map(|s| s.root.node_count()).sum()
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Creator application name
    pub creator: Option<String>,

    /// Creator application version
    pub creator_version: Option<String>,
}

/// One sheet (canvas) of the document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sheet {
    /// Sheet title
    pub title: String,

    /// Root topic
    pub root: OutlineNode,
}

impl Sheet {
    /// Create a new sheet.
    pub fn new(title: impl Into<String>, root: OutlineNode) -> Self {
        Self {
            title: title.into(),
            root,
        }
    }
}
