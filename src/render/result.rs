//! Rendering result with statistics.

use super::commands::SlideCommands;
use serde::{Deserialize, Serialize};

/// The two artifacts of one conversion run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderResult {
    /// Linear document (headings and lists)
    pub document: String,

    /// Slide deck; empty when the outline holds no slide
    pub deck: String,

    /// Slide commands collected during traversal
    pub commands: SlideCommands,

    /// Conversion statistics
    pub stats: ConversionStats,
}

impl RenderResult {
    /// Whether a slide deck was produced.
    pub fn has_deck(&self) -> bool {
        !self.deck.is_empty()
    }
}

/// Statistics collected during one conversion run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Nodes classified by the traversal
    pub node_count: usize,

    /// Headings emitted in the linear document
    pub heading_count: usize,

    /// List items (and no-list paragraphs) emitted in the linear document
    pub list_item_count: usize,

    /// Table and raw markup blocks
    pub literal_block_count: usize,

    /// Nodes not rendered (suppressed, filtered, empty, too deep)
    pub skipped_count: usize,

    /// Slide groups compiled into slides
    pub slide_count: usize,

    /// Slide groups dropped because they had no content
    pub dropped_slide_count: usize,

    /// Presentation map slides
    pub map_slide_count: usize,

    /// Paginated reference slides
    pub reference_slide_count: usize,

    /// Distinct citation tokens in the deck
    pub citation_count: usize,

    /// Distinct PMIDs in the bibliography
    pub pmid_count: usize,

    /// Manual references
    pub manual_reference_count: usize,

    /// Reference pages
    pub reference_page_count: usize,
}

impl ConversionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a bibliography was generated.
    pub fn has_bibliography(&self) -> bool {
        self.pmid_count + self.manual_reference_count + self.reference_page_count > 0
    }
}
