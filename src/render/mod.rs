//! Rendering module: outline to linear document and slide deck.
//!
//! One depth-first traversal ([`render`]) classifies every node and feeds
//! the linear document writer and the slide compiler. References are
//! resolved after the traversal and the deck is wrapped last.

mod assemble;
pub mod classify;
pub mod commands;
pub mod directives;
pub mod document;
mod engine;
mod json;
mod options;
pub mod references;
mod result;
pub mod slides;
mod style;

pub use assemble::assemble_deck;
pub use classify::{Classifier, NodeKind, SlideNodeKind};
pub use commands::{SlideCommand, SlideCommands};
pub use directives::{DirectiveOption, DirectiveSet, DirectiveStack};
pub use document::{DocumentWriter, HeadingContext};
pub use engine::render;
pub use json::{to_json, to_json_value, JsonFormat};
pub use options::{Labels, RenderOptions, SlideTheme, DEFAULT_HIGHLIGHT_MARKER};
pub use references::{Bibliography, ReferenceRegistry, ReferenceResolver};
pub use result::{ConversionStats, RenderResult};
pub use slides::{SlideCompiler, SlideHeading, SlideOption};
pub use style::Style;
