//! Document model types for XMind content representation.
//!
//! This module defines the in-memory outline that bridges container decoding
//! and rendering. It is pure data: renderers only read it.

mod node;
mod workbook;

pub use node::{Descendants, Marker, NodeStyle, OutlineNode, FONT_STYLE, FONT_WEIGHT};
pub use workbook::{Metadata, Sheet, Workbook};
