//! Single depth-first traversal driving both renderers.

use super::assemble::assemble_deck;
use super::classify::{literal_block, Classifier, NodeKind};
use super::directives::{DirectiveOption, DirectiveStack};
use super::document::{list_indent, DocumentWriter};
use super::references::{ReferenceRegistry, ReferenceResolver};
use super::slides::{SlideCompiler, SlideHeading};
use super::{ConversionStats, RenderOptions, RenderResult};
use crate::model::OutlineNode;

/// Render an outline into the linear document and the slide deck.
pub fn render(root: &OutlineNode, options: &RenderOptions) -> RenderResult {
    let mut engine = Engine::new(options);
    engine.visit(root, 0);
    engine.finish()
}

/// Traversal state of one conversion run.
struct Engine<'a> {
    options: &'a RenderOptions,
    classifier: Classifier,
    document: DocumentWriter,
    directives: DirectiveStack,
    slides: Option<SlideCompiler>,
    refs: ReferenceRegistry,
    header_depth: usize,
    header_limit: usize,
    stats: ConversionStats,
    depth_warned: bool,
}

impl<'a> Engine<'a> {
    fn new(options: &'a RenderOptions) -> Self {
        let header_depth = options
            .max_header_depth
            .min(options.style.max_heading_level());
        Self {
            options,
            classifier: Classifier::new(),
            document: DocumentWriter::new(options.style),
            directives: DirectiveStack::new(),
            slides: options.slides.then(|| SlideCompiler::new(options)),
            refs: ReferenceRegistry::new(options.reference_format.clone()),
            header_depth,
            header_limit: header_depth,
            stats: ConversionStats::new(),
            depth_warned: false,
        }
    }

    fn visit(&mut self, node: &OutlineNode, depth: usize) {
        if self.options.max_depth > 0 && depth >= self.options.max_depth {
            if !self.depth_warned {
                log::warn!(
                    "Outline deeper than {} levels, skipping deeper nodes",
                    self.options.max_depth
                );
                self.depth_warned = true;
            }
            self.stats.skipped_count += 1;
            return;
        }
        self.stats.node_count += 1;

        let kind = self.classifier.classify(node);
        log::trace!("depth {} {:?}: {:?}", depth, kind, node.title);

        match kind {
            NodeKind::Suppressed => self.stats.skipped_count += 1,
            NodeKind::PageInclusion => {
                self.document.page_inclusion(&node.title);
                if let Some(slides) = self.slides.as_mut() {
                    slides.push_inline(&node.title);
                }
            }
            NodeKind::ReferencePage => self.refs.add_page(&node.title),
            NodeKind::FormatOverride(format) => self.refs.set_format(format),
            NodeKind::ManualCitation => self.refs.add_manual(&node.title),
            NodeKind::SlideGroupRoot => {
                if let Some(slides) = self.slides.as_mut() {
                    let heading = SlideHeading::from_context(self.document.headings(), depth);
                    slides.compile_group(node, heading, &self.classifier, &mut self.refs);
                }
            }
            NodeKind::TableBlock | NodeKind::RawMarkup => {
                self.document.literal(&literal_block(node));
                self.stats.literal_block_count += 1;
            }
            NodeKind::OptionsDirective => self.push_options(node),
            NodeKind::Regular => self.visit_regular(node, depth),
        }
    }

    fn push_options(&mut self, node: &OutlineNode) {
        if !node.has_children() {
            log::warn!("Options directive '{}' has no children, ignoring", node.title);
            return;
        }
        for child in &node.children {
            match DirectiveOption::parse(&child.title) {
                Some(option) => {
                    if !self.directives.insert(option) {
                        log::warn!("Options directive at the root has no scope, ignoring");
                    }
                }
                None => log::warn!("Unknown option '{}'", child.title),
            }
        }
    }

    fn visit_regular(&mut self, node: &OutlineNode, depth: usize) {
        let saved_depth = self.header_depth;
        let (level_override, title) = self.classifier.strip_level_override(&node.title);
        if let Some(requested) = level_override {
            self.header_depth = requested.min(self.header_limit);
        }

        if !title.trim().is_empty() && depth < self.header_depth {
            self.document.heading(depth + 1, &title);
            self.stats.heading_count += 1;
        } else {
            if depth < self.header_limit {
                // headings of a previous sibling subtree must not name later slides
                self.document.close_headings_below(depth);
            }
            if title.trim().is_empty() {
                self.stats.skipped_count += 1;
            } else {
                self.emit_entry(node, &title, depth);
            }
        }

        self.directives.enter();
        for child in &node.children {
            self.visit(child, depth + 1);
        }
        self.directives.exit();

        self.header_depth = saved_depth;
    }

    fn emit_entry(&mut self, node: &OutlineNode, title: &str, depth: usize) {
        let active = self.directives.active();
        if (active.only_bold && !node.is_bold()) || (active.only_tagged && !node.is_tagged()) {
            self.stats.skipped_count += 1;
            return;
        }

        let style = self.options.style;
        let mut text = title.to_string();
        if node.has_marker(&self.options.highlight_marker) {
            text = style.highlight(&text, &self.options.theme.highlight_class);
        }
        if node.is_bold() {
            text = style.bold(&text);
        } else if node.is_italic() {
            text = style.italic(&text);
        }

        if active.no_list {
            self.document.paragraph(&text);
        } else {
            self.document
                .list_item(list_indent(depth, self.header_depth), &text);
        }
        self.stats.list_item_count += 1;
    }

    fn finish(mut self) -> RenderResult {
        let resolver = ReferenceResolver::new();
        let deck_text = self
            .slides
            .as_ref()
            .map(|s| s.body_text())
            .unwrap_or_default();

        let bibliography =
            resolver.bibliography(&self.refs, &[self.document.as_str(), deck_text.as_str()]);

        if let Some(ref bib) = bibliography {
            self.document
                .references(&self.options.labels.references, &bib.text);
            self.stats.pmid_count = bib.pmids.len();
            self.stats.manual_reference_count = bib.manual;
            self.stats.reference_page_count = bib.pages;
            log::info!(
                "Bibliography: {} PMIDs, {} manual references, {} pages",
                bib.pmids.len(),
                bib.manual,
                bib.pages
            );
        }

        let mut result = RenderResult::default();
        if let Some(mut slides) = self.slides.take() {
            if slides.has_slides() {
                let citations = resolver.count_citations(&deck_text);
                self.stats.citation_count = citations;
                if let Some(bib) = bibliography.as_ref().filter(|_| citations > 0) {
                    slides.append_reference_slides(
                        &bib.text,
                        citations,
                        self.options.references_per_slide,
                    );
                }

                let body = slides.finalize();
                result.deck = assemble_deck(
                    &body,
                    slides.commands(),
                    self.options.style,
                    &self.options.theme,
                );
            }

            let slide_stats = slides.stats();
            self.stats.slide_count = slide_stats.slides;
            self.stats.dropped_slide_count = slide_stats.dropped;
            self.stats.map_slide_count = slide_stats.map_slides;
            self.stats.reference_slide_count = slide_stats.reference_slides;
            result.commands = slides.commands().clone();
        }

        log::info!(
            "Rendered {} nodes: {} headings, {} list items, {} slides",
            self.stats.node_count,
            self.stats.heading_count,
            self.stats.list_item_count,
            self.stats.slide_count
        );

        result.document = self.document.finish();
        result.stats = self.stats;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Style;

    fn md(depth: usize) -> RenderOptions {
        RenderOptions::new().with_header_depth(depth)
    }

    #[test]
    fn test_headings_and_lists() {
        let root = OutlineNode::new("Intro").child(
            OutlineNode::new("Part")
                .child(OutlineNode::new("Point").child(OutlineNode::new("Sub"))),
        );
        let result = render(&root, &md(2));

        assert_eq!(result.document, "# Intro\n\n## Part\n\n  * Point\n    * Sub\n");
        assert!(!result.has_deck());
        assert_eq!(result.stats.heading_count, 2);
        assert_eq!(result.stats.list_item_count, 2);
    }

    #[test]
    fn test_zero_header_depth() {
        let root = OutlineNode::new("Intro").child(OutlineNode::new("Point"));
        let result = render(&root, &md(0));
        assert_eq!(result.document, "  * Intro\n    * Point\n");
    }

    #[test]
    fn test_level_override_is_scoped() {
        let root = OutlineNode::new("Intro")
            .child(OutlineNode::new("Flat ~~level 1~~").child(OutlineNode::new("inside")))
            .child(OutlineNode::new("Normal"));
        let result = render(&root, &md(2));

        assert!(result.document.contains("  * Flat\n    * inside\n"));
        assert!(result.document.contains("## Normal"));
        assert!(!result.document.contains("~~level"));
    }

    #[test]
    fn test_level_override_clamped_to_configured_depth() {
        let root = OutlineNode::new("Intro ~~level 5~~")
            .child(OutlineNode::new("A").child(OutlineNode::new("B")));
        let result = render(&root, &md(2));
        assert!(result.document.contains("## A"));
        assert!(!result.document.contains("### B"));
        assert!(result.document.contains("  * B"));
    }

    #[test]
    fn test_nested_level_overrides_restore_outer() {
        let root = OutlineNode::new("Intro")
            .child(
                OutlineNode::new("Outer ~~level 2~~")
                    .child(OutlineNode::new("Inner ~~level 1~~").child(OutlineNode::new("deep")))
                    .child(OutlineNode::new("Sibling")),
            )
            .child(OutlineNode::new("Normal").child(OutlineNode::new("Sub")));
        let result = render(&root, &md(3));
        let document = &result.document;

        assert!(document.contains("## Outer\n"));
        assert!(document.contains("    * Inner\n      * deep\n"));
        assert!(document.contains("  * Sibling\n"));
        assert!(!document.contains("### Sibling"));
        assert!(document.contains("## Normal"));
        assert!(document.contains("### Sub"));
    }

    #[test]
    fn test_flattened_node_drops_sibling_headings() {
        let root = OutlineNode::new("Intro")
            .child(OutlineNode::new("Part A").child(OutlineNode::new("a1")))
            .child(
                OutlineNode::new("Flat ~~level 1~~")
                    .child(OutlineNode::new("rjs").child(OutlineNode::new("inside flat"))),
            );
        let result = render(&root, &md(2));

        assert!(result.document.contains("## Part A"));
        assert!(result.deck.contains("## Intro\n\n  * inside flat\n"));
        assert!(!result.deck.contains("## Part A"));
    }

    #[test]
    fn test_options_scoped_to_parent() {
        let root = OutlineNode::new("Intro")
            .child(
                OutlineNode::new("Filtered")
                    .child(OutlineNode::new("options").child(OutlineNode::new("only-bold")))
                    .child(OutlineNode::new("plain"))
                    .child(OutlineNode::new("strong").bold()),
            )
            .child(OutlineNode::new("Sibling").child(OutlineNode::new("visible")));
        let result = render(&root, &md(2));

        assert!(!result.document.contains("plain"));
        assert!(result.document.contains("  * **strong**"));
        assert!(result.document.contains("  * visible"));
    }

    #[test]
    fn test_only_tagged_recurses() {
        let root = OutlineNode::new("Intro").child(
            OutlineNode::new("Part")
                .child(OutlineNode::new("opt").child(OutlineNode::new("only-tagged")))
                .child(
                    OutlineNode::new("untagged")
                        .child(OutlineNode::new("tagged").with_marker("priority-1")),
                ),
        );
        let result = render(&root, &md(2));
        assert!(!result.document.contains("untagged"));
        assert!(result.document.contains("    * tagged"));
    }

    #[test]
    fn test_no_list_paragraphs() {
        let root = OutlineNode::new("Intro")
            .child(OutlineNode::new("option").child(OutlineNode::new("no-list")))
            .child(OutlineNode::new("Part").child(OutlineNode::new("line")));
        let result = render(&root, &RenderOptions::new().with_style(Style::DokuWiki));
        assert!(result.document.contains("line \\\\\n"));
        assert!(!result.document.contains("* line"));
    }

    #[test]
    fn test_suppressed_and_literal_blocks() {
        let root = OutlineNode::new("Intro")
            .child(OutlineNode::new("secret ~~skip~~").child(OutlineNode::new("hidden")))
            .child(OutlineNode::new("^ h ^").child(OutlineNode::new("| c |")));
        let result = render(&root, &md(2));
        assert!(!result.document.contains("hidden"));
        assert!(result.document.contains("^ h ^\n| c |\n"));
        assert_eq!(result.stats.literal_block_count, 1);
    }

    #[test]
    fn test_slide_group_excluded_from_document() {
        let root = OutlineNode::new("Intro").child(
            OutlineNode::new("RJS")
                .child(OutlineNode::new("titre").child(OutlineNode::new("Talk")))
                .child(OutlineNode::new("Key idea")),
        );
        let result = render(&root, &md(2));

        assert!(!result.document.contains("Talk"));
        assert!(!result.document.contains("Key idea"));
        assert!(result.deck.contains("# Talk"));
        assert!(result.deck.contains("## Intro\n\n  * Key idea\n"));
        assert_eq!(result.commands.title.as_deref(), Some("Talk"));
    }

    #[test]
    fn test_slides_disabled() {
        let root =
            OutlineNode::new("Intro").child(OutlineNode::new("rj").child(OutlineNode::new("x")));
        let result = render(&root, &md(2).with_slides(false));
        assert!(!result.has_deck());
        assert!(!result.document.contains("x"));
    }

    #[test]
    fn test_max_depth_guard() {
        let root = OutlineNode::new("a").child(OutlineNode::new("b").child(OutlineNode::new("c")));
        let result = render(&root, &md(2).with_max_depth(2));
        assert!(result.document.contains("## b"));
        assert!(!result.document.contains("c"));
        assert_eq!(result.stats.skipped_count, 1);
    }
}
