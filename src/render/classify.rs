//! Node classification.
//!
//! A node's kind is decided from its title (and markers for the slide root
//! highlight) alone. Kinds are checked in a fixed precedence order and the
//! first match wins.

use std::borrow::Cow;

use regex::Regex;

use super::commands::SlideCommand;
use crate::model::OutlineNode;

const SKIP_TOKEN: &str = "~~skip~~";
const PAGE_PREFIX: &str = "{{page>";
const REFS_PREFIX: &str = "{{refs>";

const SLIDE_ROOT_WORDS: &[&str] = &["rj", "rjs", "reveal", "revealjs"];
const OPTIONS_WORDS: &[&str] = &["options", "option", "opt"];
const BACKGROUND_WORDS: &[&str] = &["background", "bg"];
const NOTES_WORDS: &[&str] = &["notes", "note"];

const RAW_MARKUP_PREFIXES: &[&str] = &[
    "<wrap", "<html", "<code", "<file", "<note", "<div", "<img", "<table", "<!--",
];

/// Kind of a node outside slide groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// `~~skip~~`: the node and its subtree produce nothing
    Suppressed,
    /// `{{page>...}}`: copied verbatim to both outputs
    PageInclusion,
    /// `{{refs>...}}`: recorded as a bibliography page
    ReferencePage,
    /// `{{pmid>doc_format:NAME}}`: sets the bibliography format
    FormatOverride(String),
    /// `[(name>free text)]`: recorded as a manual reference
    ManualCitation,
    /// Reserved word opening a slide group
    SlideGroupRoot,
    /// Table rows, emitted as a literal block
    TableBlock,
    /// Passthrough markup, emitted as a literal block
    RawMarkup,
    /// Children name options pushed onto the directive stack
    OptionsDirective,
    /// Heading or list item
    Regular,
}

/// Kind of a node inside a slide group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlideNodeKind {
    Suppressed,
    PageInclusion,
    ReferencePage,
    FormatOverride(String),
    ManualCitation,
    /// A slide group root inside another one (unsupported, skipped)
    NestedRoot,
    TableBlock,
    RawMarkup,
    /// Named slide command (title, authors, footer, ...)
    Command(SlideCommand),
    /// First child replaces the slide background
    Background,
    /// Children become speaker notes
    Notes,
    /// Children name per-slide options
    SlideOptions,
    /// Empty title: forced line break
    LineBreak,
    /// Single-level list item
    Content,
}

/// Precompiled title patterns.
#[derive(Debug, Clone)]
pub struct Classifier {
    format_override: Regex,
    manual_citation: Regex,
    level_override: Regex,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier {
    /// Compile the title patterns.
    pub fn new() -> Self {
        Self {
            format_override: Regex::new(r"(?i)^\{\{pmid>doc_format:([^}]+)\}\}$").unwrap(),
            manual_citation: Regex::new(r"(?s)^\[\([^>]+>.*\)\]$").unwrap(),
            level_override: Regex::new(r"(?i)~~level\s*(\d+)~~").unwrap(),
        }
    }

    /// Classify a node outside slide groups.
    pub fn classify(&self, node: &OutlineNode) -> NodeKind {
        let title = node.title.as_str();
        let lower = title.trim().to_ascii_lowercase();

        if lower.contains(SKIP_TOKEN) {
            return NodeKind::Suppressed;
        }
        if lower.starts_with(PAGE_PREFIX) {
            return NodeKind::PageInclusion;
        }
        if lower.starts_with(REFS_PREFIX) {
            return NodeKind::ReferencePage;
        }
        if let Some(format) = self.format_override(title) {
            return NodeKind::FormatOverride(format);
        }
        if self.is_manual_citation(title) {
            return NodeKind::ManualCitation;
        }
        if SLIDE_ROOT_WORDS.contains(&lower.as_str()) {
            return NodeKind::SlideGroupRoot;
        }
        if is_table(title) {
            return NodeKind::TableBlock;
        }
        if is_raw_markup(&lower) {
            return NodeKind::RawMarkup;
        }
        if OPTIONS_WORDS.contains(&lower.as_str()) {
            return NodeKind::OptionsDirective;
        }
        NodeKind::Regular
    }

    /// Classify a node inside a slide group.
    pub fn classify_in_slide(&self, node: &OutlineNode) -> SlideNodeKind {
        let lower = node.title.trim().to_ascii_lowercase();

        match self.classify(node) {
            NodeKind::Suppressed => SlideNodeKind::Suppressed,
            NodeKind::PageInclusion => SlideNodeKind::PageInclusion,
            NodeKind::ReferencePage => SlideNodeKind::ReferencePage,
            NodeKind::FormatOverride(format) => SlideNodeKind::FormatOverride(format),
            NodeKind::ManualCitation => SlideNodeKind::ManualCitation,
            NodeKind::SlideGroupRoot => SlideNodeKind::NestedRoot,
            NodeKind::TableBlock => SlideNodeKind::TableBlock,
            NodeKind::RawMarkup => SlideNodeKind::RawMarkup,
            NodeKind::OptionsDirective => SlideNodeKind::SlideOptions,
            NodeKind::Regular => {
                if let Some(command) = SlideCommand::parse(&lower) {
                    SlideNodeKind::Command(command)
                } else if BACKGROUND_WORDS.contains(&lower.as_str()) {
                    SlideNodeKind::Background
                } else if NOTES_WORDS.contains(&lower.as_str()) {
                    SlideNodeKind::Notes
                } else if node.title.trim().is_empty() {
                    SlideNodeKind::LineBreak
                } else {
                    SlideNodeKind::Content
                }
            }
        }
    }

    /// Bibliography format named by a `{{pmid>doc_format:NAME}}` title.
    pub fn format_override(&self, title: &str) -> Option<String> {
        self.format_override
            .captures(title.trim())
            .map(|caps| caps[1].trim().to_string())
    }

    /// Whether the whole title is a manual citation `[(name>free text)]`.
    pub fn is_manual_citation(&self, title: &str) -> bool {
        self.manual_citation.is_match(title.trim())
    }

    /// Extract an inline `~~level N~~` override.
    ///
    /// Returns the requested depth and the title without the token. Titles
    /// without a well-formed token are returned unchanged.
    pub fn strip_level_override<'a>(&self, title: &'a str) -> (Option<usize>, Cow<'a, str>) {
        let Some(caps) = self.level_override.captures(title) else {
            return (None, Cow::Borrowed(title));
        };
        let Ok(depth) = caps[1].parse::<usize>() else {
            return (None, Cow::Borrowed(title));
        };
        let stripped = self.level_override.replace(title, "");
        (Some(depth), Cow::Owned(stripped.trim().to_string()))
    }
}

fn is_table(title: &str) -> bool {
    let trimmed = title.trim();
    trimmed.starts_with('^') || trimmed.starts_with('|')
}

fn is_raw_markup(lower: &str) -> bool {
    RAW_MARKUP_PREFIXES.iter().any(|p| lower.starts_with(p))
}

/// Title of the node followed by all descendant titles, one per line.
pub fn literal_block(node: &OutlineNode) -> String {
    let mut block = String::new();
    for n in node.descendants() {
        block.push_str(&n.title);
        block.push('\n');
    }
    block
}
