//! Linear document (headings and indented lists).

use super::Style;

const INDENT_UNIT: &str = "  ";
const BULLET: &str = "* ";

/// Last heading text seen at each level.
///
/// Recording a heading clears every deeper level.
#[derive(Debug, Clone, Default)]
pub struct HeadingContext {
    texts: Vec<String>,
}

impl HeadingContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the heading text of `level` (1-based) and clear deeper levels.
    pub fn record(&mut self, level: usize, text: impl Into<String>) {
        if level == 0 {
            return;
        }
        self.texts.truncate(level - 1);
        self.texts.resize(level - 1, String::new());
        self.texts.push(text.into());
    }

    /// Last heading text of `level`, if one is set.
    pub fn get(&self, level: usize) -> Option<&str> {
        level
            .checked_sub(1)
            .and_then(|i| self.texts.get(i))
            .map(|s| s.as_str())
            .filter(|s| !s.is_empty())
    }

    /// Keep levels up to `level`, clear deeper ones.
    pub fn truncate(&mut self, level: usize) {
        self.texts.truncate(level);
    }
}

/// Number of indent units of a list item at `depth` below `header_depth` headings.
pub fn list_indent(depth: usize, header_depth: usize) -> usize {
    (depth + 1).saturating_sub(header_depth).max(1)
}

/// Writer of the linear document.
#[derive(Debug, Clone)]
pub struct DocumentWriter {
    style: Style,
    output: String,
    headings: HeadingContext,
}

impl DocumentWriter {
    pub fn new(style: Style) -> Self {
        Self {
            style,
            output: String::new(),
            headings: HeadingContext::new(),
        }
    }

    pub fn headings(&self) -> &HeadingContext {
        &self.headings
    }

    /// Emit a heading block and record it into the heading context.
    ///
    /// Embedded newlines become ` / `.
    pub fn heading(&mut self, level: usize, title: &str) {
        let text = title.replace("\r\n", "\n").replace('\n', " / ");
        self.blank_line();
        self.output.push_str(&self.style.heading(level, &text));
        self.output.push_str("\n\n");
        self.headings.record(level, text);
    }

    /// Clear recorded headings deeper than `level`.
    pub fn close_headings_below(&mut self, level: usize) {
        self.headings.truncate(level);
    }

    /// Emit an indented bullet. `text` is already emphasized.
    pub fn list_item(&mut self, indent: usize, text: &str) {
        self.output.push_str(&INDENT_UNIT.repeat(indent.max(1)));
        self.output.push_str(BULLET);
        self.output.push_str(&self.style.with_line_breaks(text));
        self.output.push('\n');
    }

    /// Emit an entry without bullet, ended by a forced line break.
    pub fn paragraph(&mut self, text: &str) {
        let text = self.style.with_line_breaks(text);
        self.output.push_str(&self.style.hard_break(&text));
    }

    /// Emit a literal block (table rows, raw markup).
    pub fn literal(&mut self, block: &str) {
        self.blank_line();
        self.output.push_str(block);
        if !block.ends_with('\n') {
            self.output.push('\n');
        }
        self.output.push('\n');
    }

    /// Emit a page inclusion line verbatim.
    pub fn page_inclusion(&mut self, title: &str) {
        self.output.push_str(title);
        self.output.push('\n');
    }

    /// Append the bibliography section.
    pub fn references(&mut self, heading: &str, bibliography: &str) {
        self.blank_line();
        self.output.push_str(&self.style.heading(2, heading));
        self.output.push_str("\n\n");
        self.output.push_str(bibliography);
        if !bibliography.ends_with('\n') {
            self.output.push('\n');
        }
        self.output.push_str("\n~~REFNOTES~~\n");
    }

    /// Text written so far.
    pub fn as_str(&self) -> &str {
        &self.output
    }

    pub fn finish(self) -> String {
        self.output
    }

    fn blank_line(&mut self) {
        if self.output.is_empty() || self.output.ends_with("\n\n") {
            return;
        }
        if self.output.ends_with('\n') {
            self.output.push('\n');
        } else {
            self.output.push_str("\n\n");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_context_resets_deeper_levels() {
        let mut ctx = HeadingContext::new();
        ctx.record(1, "Intro");
        ctx.record(2, "Part A");
        ctx.record(3, "Detail");
        assert_eq!(ctx.get(3), Some("Detail"));

        ctx.record(2, "Part B");
        assert_eq!(ctx.get(1), Some("Intro"));
        assert_eq!(ctx.get(2), Some("Part B"));
        assert_eq!(ctx.get(3), None);

        ctx.record(1, "Next");
        assert_eq!(ctx.get(2), None);
    }

    #[test]
    fn test_heading_context_truncate() {
        let mut ctx = HeadingContext::new();
        ctx.record(1, "Intro");
        ctx.record(2, "Part A");
        ctx.truncate(1);
        assert_eq!(ctx.get(1), Some("Intro"));
        assert_eq!(ctx.get(2), None);

        ctx.truncate(4);
        assert_eq!(ctx.get(1), Some("Intro"));
    }

    #[test]
    fn test_heading_context_skipped_levels() {
        let mut ctx = HeadingContext::new();
        ctx.record(3, "Deep");
        assert_eq!(ctx.get(1), None);
        assert_eq!(ctx.get(3), Some("Deep"));
        assert_eq!(ctx.get(0), None);
    }

    #[test]
    fn test_list_indent() {
        assert_eq!(list_indent(2, 2), 1);
        assert_eq!(list_indent(3, 2), 2);
        assert_eq!(list_indent(0, 0), 1);
        assert_eq!(list_indent(1, 0), 2);
        assert_eq!(list_indent(0, 5), 1);
    }

    #[test]
    fn test_writer_blocks() {
        let mut writer = DocumentWriter::new(Style::Markdown);
        writer.heading(1, "Intro\nand more");
        writer.list_item(1, "Point");
        writer.heading(2, "Next");
        writer.list_item(2, "a\nb");

        assert_eq!(
            writer.as_str(),
            "# Intro / and more\n\n  * Point\n\n## Next\n\n    * a\\\nb\n"
        );
        assert_eq!(writer.headings().get(1), Some("Intro / and more"));
    }

    #[test]
    fn test_dokuwiki_paragraph_and_literal() {
        let mut writer = DocumentWriter::new(Style::DokuWiki);
        writer.paragraph("plain");
        writer.literal("^ a ^ b ^\n| 1 | 2 |\n");
        assert_eq!(writer.finish(), "plain \\\\\n\n^ a ^ b ^\n| 1 | 2 |\n\n");
    }
}
