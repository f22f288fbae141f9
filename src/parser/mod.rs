//! XMind parsing module.

mod options;
mod xmind_parser;

pub use options::{ErrorMode, ParseOptions, CONTENT_ENTRY, METADATA_ENTRY};
pub use xmind_parser::XmindParser;
