//! Output dialects.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Target markup dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    /// DokuWiki syntax (`====== Title ======`)
    DokuWiki,
    /// Markdown syntax (`# Title`)
    #[default]
    Markdown,
}

impl Style {
    /// Short name of the dialect.
    pub fn name(&self) -> &'static str {
        match self {
            Style::DokuWiki => "dokuwiki",
            Style::Markdown => "markdown",
        }
    }

    /// File extension (with leading dot) of documents in this dialect.
    pub fn extension(&self) -> &'static str {
        match self {
            Style::DokuWiki => ".txt",
            Style::Markdown => ".md",
        }
    }

    /// Deepest heading level the dialect can express.
    pub fn max_heading_level(&self) -> usize {
        match self {
            Style::DokuWiki => 5,
            Style::Markdown => 6,
        }
    }

    /// Render a heading line (without trailing newline).
    ///
    /// The level is clamped to `1..=max_heading_level()`.
    pub fn heading(&self, level: usize, text: &str) -> String {
        let level = level.clamp(1, self.max_heading_level());
        match self {
            Style::DokuWiki => {
                let marks = "=".repeat(7 - level);
                format!("{marks} {text} {marks}")
            }
            Style::Markdown => format!("{} {}", "#".repeat(level), text),
        }
    }

    /// Inline forced line break token.
    pub fn line_break(&self) -> &'static str {
        match self {
            Style::DokuWiki => " \\\\ ",
            Style::Markdown => "\\\n",
        }
    }

    /// A line made only of a forced break, newline included.
    pub fn break_line(&self) -> &'static str {
        match self {
            Style::DokuWiki => "\\\\\n",
            Style::Markdown => "\\\n",
        }
    }

    /// Replace embedded newlines with the inline line break token.
    pub fn with_line_breaks(&self, text: &str) -> String {
        text.replace("\r\n", "\n").replace('\n', self.line_break())
    }

    /// Terminate `text` with a forced line break, newline included.
    pub fn hard_break(&self, text: &str) -> String {
        match self {
            Style::DokuWiki => format!("{text} \\\\\n"),
            Style::Markdown => format!("{text}\\\n"),
        }
    }

    /// Wrap text in bold delimiters.
    pub fn bold(&self, text: &str) -> String {
        format!("**{text}**")
    }

    /// Wrap text in italic delimiters.
    pub fn italic(&self, text: &str) -> String {
        match self {
            Style::DokuWiki => format!("//{text}//"),
            Style::Markdown => format!("*{text}*"),
        }
    }

    /// Highlight text (bold inside a highlight span).
    ///
    /// DokuWiki uses the wrap plugin with the given class, Markdown uses `<mark>`.
    pub fn highlight(&self, text: &str, class: &str) -> String {
        match self {
            Style::DokuWiki => wrap_highlight(text, class),
            Style::Markdown => format!("<mark>**{text}**</mark>"),
        }
    }
}

/// Highlight span of the DokuWiki wrap plugin, used by slide decks in every dialect.
pub(crate) fn wrap_highlight(text: &str, class: &str) -> String {
    format!("<wrap {class}>**{text}**</wrap>")
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Style {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "doku" | "dokuwiki" | "txt" => Ok(Style::DokuWiki),
            "md" | "markdown" => Ok(Style::Markdown),
            other => Err(Error::Other(format!("Unknown style: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dokuwiki_headings() {
        let style = Style::DokuWiki;
        assert_eq!(style.heading(1, "Intro"), "====== Intro ======");
        assert_eq!(style.heading(2, "Part"), "===== Part =====");
        assert_eq!(style.heading(5, "Deep"), "== Deep ==");
        assert_eq!(style.heading(9, "Clamped"), "== Clamped ==");
    }

    #[test]
    fn test_markdown_headings() {
        let style = Style::Markdown;
        assert_eq!(style.heading(1, "Intro"), "# Intro");
        assert_eq!(style.heading(3, "Sub"), "### Sub");
        assert_eq!(style.heading(0, "Zero"), "# Zero");
    }

    #[test]
    fn test_line_breaks() {
        assert_eq!(Style::DokuWiki.with_line_breaks("a\nb"), "a \\\\ b");
        assert_eq!(Style::Markdown.with_line_breaks("a\r\nb"), "a\\\nb");
        assert_eq!(Style::DokuWiki.hard_break("x"), "x \\\\\n");
    }

    #[test]
    fn test_emphasis() {
        assert_eq!(Style::DokuWiki.italic("t"), "//t//");
        assert_eq!(Style::Markdown.italic("t"), "*t*");
        assert_eq!(Style::Markdown.bold("t"), "**t**");
        assert_eq!(
            Style::DokuWiki.highlight("t", "dugp_red"),
            "<wrap dugp_red>**t**</wrap>"
        );
        assert_eq!(Style::Markdown.highlight("t", "dugp_red"), "<mark>**t**</mark>");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("doku".parse::<Style>().unwrap(), Style::DokuWiki);
        assert_eq!("Markdown".parse::<Style>().unwrap(), Style::Markdown);
        assert!("html".parse::<Style>().is_err());
        assert_eq!(Style::default().extension(), ".md");
    }
}
