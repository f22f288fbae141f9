//! Slide deck compiler (DokuWiki reveal.js plugin syntax).
//!
//! Each slide group is compiled into a [`SlideDraft`]: structured lines,
//! notes and flags. The draft is serialized once, when the group is
//! exhausted, so whole-slide transforms never rewrite emitted text.
//! Presentation map slides are kept as placeholders until [`SlideCompiler::finalize`].

use regex::{Captures, Regex};

use super::classify::{literal_block, Classifier, SlideNodeKind};
use super::commands::SlideCommands;
use super::document::HeadingContext;
use super::references::ReferenceRegistry;
use super::style::wrap_highlight;
use super::{Labels, RenderOptions, SlideTheme, Style};
use crate::model::OutlineNode;

/// Background token replaced by a `background` directive.
pub const BACKGROUND_PLACEHOLDER: &str = ":1px.png";

const FIXED_ANIMATION: &str = "bg-none";
const FIXED_TRANSITION: &str = "none";

/// Per-slide option named by a child of an `option` node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideOption {
    NoFooter,
    NoTitle,
    NoList,
    StartMapHere,
}

impl SlideOption {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "no-footer" => Some(SlideOption::NoFooter),
            "no-title" => Some(SlideOption::NoTitle),
            "no-list" | "no-ul" | "no-li" => Some(SlideOption::NoList),
            "start_map_here" | "start-map-here" => Some(SlideOption::StartMapHere),
            _ => None,
        }
    }
}

/// Heading of a slide, derived from the linear heading context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlideHeading {
    /// Presentation map key (level-2 heading, level-1 when there is none)
    pub key: String,
    /// Displayed heading (`key`, plus ` - level-3` below level 2)
    pub text: String,
}

impl SlideHeading {
    /// Build the heading of a slide group found at `depth`.
    pub fn from_context(headings: &HeadingContext, depth: usize) -> Self {
        let key = headings
            .get(2)
            .or_else(|| headings.get(1))
            .unwrap_or_default()
            .to_string();

        let text = match headings.get(3) {
            Some(sub) if depth > 2 && !key.is_empty() => format!("{key} - {sub}"),
            _ => key.clone(),
        };

        Self { key, text }
    }
}

/// The `---- ... ---->` line opening a slide.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct SlideOpen {
    style: String,
    background: Option<String>,
    animation: String,
    transition: String,
    no_footer: bool,
}

impl SlideOpen {
    fn from_commands(commands: &SlideCommands) -> Self {
        Self {
            style: commands.style.clone().unwrap_or_default(),
            background: None,
            animation: commands.background_animation.clone().unwrap_or_default(),
            transition: commands.transition.clone().unwrap_or_default(),
            no_footer: false,
        }
    }

    fn fixed(theme: &SlideTheme) -> Self {
        Self {
            style: theme.base_style.clone(),
            background: None,
            animation: FIXED_ANIMATION.to_string(),
            transition: FIXED_TRANSITION.to_string(),
            no_footer: false,
        }
    }

    fn render(&self) -> String {
        let background = self.background.as_deref().unwrap_or(BACKGROUND_PLACEHOLDER);
        let mut parts: Vec<&str> = [
            self.style.as_str(),
            background,
            self.animation.as_str(),
            self.transition.as_str(),
        ]
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect();
        if self.no_footer {
            parts.push("no-footer");
        }
        format!("---- {} ---->\n", parts.join(" "))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum SlideLine {
    Item(String),
    Break,
    Literal(String),
}

/// A slide being built.
#[derive(Debug, Clone)]
struct SlideDraft {
    open: SlideOpen,
    heading: Option<String>,
    key: String,
    lines: Vec<SlideLine>,
    notes: Vec<String>,
    highlight_all: bool,
    no_list: bool,
    touched: bool,
}

/// One block of the deck body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeckBlock {
    /// Placeholder for a presentation map slide, current entry = key
    MapTag(String),
    /// A serialized slide
    Slide(String),
    /// Text between slides (page inclusions)
    Inline(String),
}

/// Ordered distinct map entries.
#[derive(Debug, Clone, Default)]
pub struct PresentationMap {
    entries: Vec<String>,
}

impl PresentationMap {
    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|e| e == key)
    }

    /// Add an entry; returns false if it was already present.
    pub fn insert(&mut self, key: &str) -> bool {
        if self.contains(key) {
            return false;
        }
        self.entries.push(key.to_string());
        true
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

/// Counters of the slide compiler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlideStats {
    pub slides: usize,
    pub dropped: usize,
    pub map_slides: usize,
    pub reference_slides: usize,
}

/// Compiles slide groups into the deck body.
#[derive(Debug, Clone)]
pub struct SlideCompiler {
    style: Style,
    theme: SlideTheme,
    labels: Labels,
    highlight_marker: String,
    max_depth: usize,
    partial_highlight: Regex,
    commands: SlideCommands,
    blocks: Vec<DeckBlock>,
    map: PresentationMap,
    stats: SlideStats,
}

impl SlideCompiler {
    pub fn new(options: &RenderOptions) -> Self {
        Self {
            style: options.style,
            theme: options.theme.clone(),
            labels: options.labels.clone(),
            highlight_marker: options.highlight_marker.clone(),
            max_depth: options.max_depth,
            partial_highlight: Regex::new(r"(?s)([^|]*)\|\|([^|]*)\|\|(.*)").unwrap(),
            commands: SlideCommands::default(),
            blocks: Vec::new(),
            map: PresentationMap::default(),
            stats: SlideStats::default(),
        }
    }

    pub fn commands(&self) -> &SlideCommands {
        &self.commands
    }

    pub fn map(&self) -> &PresentationMap {
        &self.map
    }

    pub fn stats(&self) -> SlideStats {
        self.stats
    }

    /// Whether at least one content slide was produced.
    pub fn has_slides(&self) -> bool {
        self.stats.slides > 0
    }

    /// Append text outside any slide.
    pub fn push_inline(&mut self, text: &str) {
        self.blocks.push(DeckBlock::Inline(format!("{text}\n")));
    }

    /// Compile one slide group. `root` is the slide group root node itself.
    pub fn compile_group(
        &mut self,
        root: &OutlineNode,
        heading: SlideHeading,
        classifier: &Classifier,
        refs: &mut ReferenceRegistry,
    ) {
        let mut draft = SlideDraft {
            open: SlideOpen::from_commands(&self.commands),
            heading: Some(heading.text).filter(|t| !t.is_empty()),
            key: heading.key,
            lines: Vec::new(),
            notes: Vec::new(),
            highlight_all: root.has_marker(&self.highlight_marker),
            no_list: false,
            touched: false,
        };

        for child in &root.children {
            self.visit(child, 1, &mut draft, classifier, refs);
        }

        self.flush(draft);
    }

    fn visit(
        &mut self,
        node: &OutlineNode,
        level: usize,
        draft: &mut SlideDraft,
        classifier: &Classifier,
        refs: &mut ReferenceRegistry,
    ) {
        if self.max_depth > 0 && level >= self.max_depth {
            log::warn!("Slide content deeper than {} levels, skipping", self.max_depth);
            return;
        }

        match classifier.classify_in_slide(node) {
            SlideNodeKind::Suppressed => {}
            SlideNodeKind::PageInclusion => {
                draft.lines.push(SlideLine::Literal(node.title.clone()));
                draft.touched = true;
            }
            SlideNodeKind::ReferencePage => refs.add_page(&node.title),
            SlideNodeKind::FormatOverride(format) => refs.set_format(format),
            SlideNodeKind::ManualCitation => refs.add_manual(&node.title),
            SlideNodeKind::NestedRoot => {
                log::warn!("Nested slide group '{}' is not supported, skipping", node.title);
            }
            SlideNodeKind::TableBlock | SlideNodeKind::RawMarkup => {
                draft.lines.push(SlideLine::Literal(literal_block(node)));
                draft.touched = true;
            }
            SlideNodeKind::Command(command) => match node.first_child_title() {
                Some(value) => self.commands.set(command, value),
                None => log::warn!("Command '{}' has no value, ignoring", command.name()),
            },
            SlideNodeKind::Background => match node.first_child_title() {
                Some(background) => {
                    draft.open.background = Some(background.to_string());
                    draft.touched = true;
                }
                None => log::warn!("Background directive has no value, ignoring"),
            },
            SlideNodeKind::Notes => {
                if !node.has_children() {
                    log::warn!("Notes directive has no children, ignoring");
                    return;
                }
                draft
                    .notes
                    .extend(node.children.iter().map(|n| n.title.clone()));
                draft.touched = true;
            }
            SlideNodeKind::SlideOptions => {
                if !node.has_children() {
                    log::warn!("Option directive has no children, ignoring");
                    return;
                }
                for child in &node.children {
                    match SlideOption::parse(&child.title) {
                        Some(option) => self.apply_option(option, draft),
                        None => log::warn!("Unknown slide option '{}'", child.title),
                    }
                }
                draft.touched = true;
            }
            SlideNodeKind::LineBreak => {
                draft.lines.push(SlideLine::Break);
                draft.touched = true;
                self.visit_children(node, level, draft, classifier, refs);
            }
            SlideNodeKind::Content => {
                let text = self.format_item(node, classifier);
                draft.lines.push(SlideLine::Item(text));
                draft.touched = true;
                self.visit_children(node, level, draft, classifier, refs);
            }
        }
    }

    fn visit_children(
        &mut self,
        node: &OutlineNode,
        level: usize,
        draft: &mut SlideDraft,
        classifier: &Classifier,
        refs: &mut ReferenceRegistry,
    ) {
        for child in &node.children {
            self.visit(child, level + 1, draft, classifier, refs);
        }
    }

    fn apply_option(&mut self, option: SlideOption, draft: &mut SlideDraft) {
        match option {
            SlideOption::NoFooter => draft.open.no_footer = true,
            SlideOption::NoTitle => draft.heading = None,
            SlideOption::NoList => draft.no_list = true,
            SlideOption::StartMapHere => {
                log::debug!("Restarting presentation map at '{}'", draft.key);
                self.map.clear();
                self.blocks.retain(|b| !matches!(b, DeckBlock::MapTag(_)));
            }
        }
    }

    /// Text of a content item: partial highlight, marker highlight, then emphasis.
    fn format_item(&self, node: &OutlineNode, classifier: &Classifier) -> String {
        let (_, title) = classifier.strip_level_override(&node.title);
        let mut text = self.style.with_line_breaks(&title);

        if self.partial_highlight.is_match(&text) {
            let class = &self.theme.highlight_class;
            text = self
                .partial_highlight
                .replace(&text, |caps: &Captures| {
                    let highlighted = wrap_highlight(&caps[2], class);
                    format!("{} {} {}", caps[1].trim_end(), highlighted, caps[3].trim_start())
                        .trim()
                        .to_string()
                })
                .into_owned();
        }
        if node.has_marker(&self.highlight_marker) {
            text = wrap_highlight(&text, &self.theme.highlight_class);
        }
        if node.is_bold() {
            text = self.style.bold(&text);
        } else if node.is_italic() {
            text = self.style.italic(&text);
        }
        text
    }

    fn flush(&mut self, draft: SlideDraft) {
        if !draft.touched {
            log::debug!("Dropping empty slide group under '{}'", draft.key);
            self.stats.dropped += 1;
            return;
        }

        if !draft.key.is_empty() && self.map.insert(&draft.key) {
            self.blocks.push(DeckBlock::MapTag(draft.key.clone()));
        }
        let text = self.render_draft(&draft);
        self.blocks.push(DeckBlock::Slide(text));
        self.stats.slides += 1;
    }

    fn render_draft(&self, draft: &SlideDraft) -> String {
        let mut out = draft.open.render();
        out.push('\n');
        if let Some(ref heading) = draft.heading {
            out.push_str(&self.style.heading(2, heading));
            out.push_str("\n\n");
        }

        let plain = draft.no_list || draft.highlight_all;
        if draft.highlight_all {
            out.push_str(&format!("<WRAP {}>\n", self.theme.highlight_class));
        }
        for line in &draft.lines {
            match line {
                SlideLine::Item(text) if plain => out.push_str(&self.style.hard_break(text)),
                SlideLine::Item(text) => {
                    out.push_str("  * ");
                    out.push_str(text);
                    out.push('\n');
                }
                SlideLine::Break => out.push_str(self.style.break_line()),
                SlideLine::Literal(text) => {
                    out.push_str(text);
                    if !text.ends_with('\n') {
                        out.push('\n');
                    }
                }
            }
        }
        if draft.highlight_all {
            out.push_str("</WRAP>\n");
        }

        if !draft.notes.is_empty() {
            out.push_str("\n<notes>\n");
            for note in &draft.notes {
                out.push_str("  * ");
                out.push_str(note);
                out.push('\n');
            }
            out.push_str("</notes>\n");
        }

        out.push_str("<----\n");
        out
    }

    /// Text of every slide and inline block, placeholders excluded.
    pub fn body_text(&self) -> String {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                DeckBlock::Slide(text) | DeckBlock::Inline(text) => Some(text.as_str()),
                DeckBlock::MapTag(_) => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Append the bibliography slide and `ceil(citations / per_slide)` reference pages.
    ///
    /// Returns the number of paginated reference slides.
    pub fn append_reference_slides(
        &mut self,
        bibliography: &str,
        citations: usize,
        per_slide: usize,
    ) -> usize {
        let per_slide = per_slide.max(1);
        let pages = citations.div_ceil(per_slide);

        let key = self.labels.bibliography.clone();
        if self.map.insert(&key) {
            self.blocks.push(DeckBlock::MapTag(key.clone()));
        }

        let mut slide = SlideOpen::fixed(&self.theme).render();
        slide.push('\n');
        slide.push_str(&self.style.heading(2, &key));
        slide.push_str("\n\n");
        slide.push_str(&format!(
            "  * {} : {}\n  * {} : {}\n\n",
            self.labels.reference_count, citations, self.labels.slide_count, pages
        ));
        slide.push_str(bibliography);
        if !bibliography.ends_with('\n') {
            slide.push('\n');
        }
        slide.push_str("<----\n");
        self.blocks.push(DeckBlock::Slide(slide));

        for i in 1..=pages {
            let mut page = SlideOpen::fixed(&self.theme).render();
            page.push('\n');
            page.push_str(&self.style.heading(
                3,
                &format!("{} {} / {}", self.labels.reference_page, i, pages),
            ));
            page.push_str("\n\n");
            page.push_str(&format!(
                "<WRAP {}>~~REFNOTES {}~~</WRAP>\n<----\n",
                self.theme.references_class, per_slide
            ));
            self.blocks.push(DeckBlock::Slide(page));
        }

        self.stats.reference_slides += pages;
        pages
    }

    /// Serialize the deck body, expanding map placeholders.
    pub fn finalize(&mut self) -> String {
        let mut parts = Vec::with_capacity(self.blocks.len());
        for block in &self.blocks {
            match block {
                DeckBlock::MapTag(key) => {
                    parts.push(self.render_map(key));
                    self.stats.map_slides += 1;
                }
                DeckBlock::Slide(text) | DeckBlock::Inline(text) => parts.push(text.clone()),
            }
        }
        parts.join("\n")
    }

    fn render_map(&self, current: &str) -> String {
        let mut open = SlideOpen::fixed(&self.theme);
        open.background = self.theme.map_background.clone();

        let mut out = open.render();
        out.push('\n');
        out.push_str(&self.style.heading(2, &self.labels.presentation_map));
        out.push_str("\n\n");
        out.push_str(&format!("<WRAP {}>\n", self.theme.map_class));
        for entry in self.map.entries() {
            if entry == current {
                out.push_str(&format!("  * {}\n", self.style.bold(entry)));
            } else {
                out.push_str(&format!("  * {entry}\n"));
            }
        }
        out.push_str("</WRAP>\n<----\n");
        out
    }
}
