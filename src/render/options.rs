//! Rendering options and configuration.

use super::Style;

/// Marker id that highlights a node (or a whole slide when set on a slide group root).
pub const DEFAULT_HIGHLIGHT_MARKER: &str = "tag-red";

/// Options for rendering an outline.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Target dialect
    pub style: Style,

    /// Number of outline levels rendered as headings (0 = lists only)
    pub max_header_depth: usize,

    /// Build the slide deck from slide groups
    pub slides: bool,

    /// Human-readable strings inserted into the outputs
    pub labels: Labels,

    /// Wrap class names used by the slide deck
    pub theme: SlideTheme,

    /// Marker id recognized as highlight
    pub highlight_marker: String,

    /// Default bibliography rendering format
    pub reference_format: String,

    /// References shown per paginated reference slide
    pub references_per_slide: usize,

    /// Traversal guard: subtrees deeper than this are not rendered (0 = unlimited)
    pub max_depth: usize,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output dialect.
    ///
    /// The header depth is re-clamped to the dialect's heading range.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self.max_header_depth = self.max_header_depth.min(style.max_heading_level());
        self
    }

    /// Set the number of heading levels (clamped to the dialect's range).
    pub fn with_header_depth(mut self, depth: usize) -> Self {
        self.max_header_depth = depth.min(self.style.max_heading_level());
        self
    }

    /// Enable or disable the slide deck.
    pub fn with_slides(mut self, enabled: bool) -> Self {
        self.slides = enabled;
        self
    }

    /// Set output labels.
    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    /// Set the slide theme.
    pub fn with_theme(mut self, theme: SlideTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the highlight marker id.
    pub fn with_highlight_marker(mut self, marker: impl Into<String>) -> Self {
        self.highlight_marker = marker.into();
        self
    }

    /// Set the default bibliography format.
    pub fn with_reference_format(mut self, format: impl Into<String>) -> Self {
        self.reference_format = format.into();
        self
    }

    /// Set the number of references per reference slide (at least 1).
    pub fn with_references_per_slide(mut self, count: usize) -> Self {
        self.references_per_slide = count.max(1);
        self
    }

    /// Set the traversal depth guard.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            style: Style::Markdown,
            max_header_depth: 2,
            slides: true,
            labels: Labels::default(),
            theme: SlideTheme::default(),
            highlight_marker: DEFAULT_HIGHLIGHT_MARKER.to_string(),
            reference_format: "long".to_string(),
            references_per_slide: 4,
            max_depth: 256,
        }
    }
}

/// Human-readable strings emitted by the renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    /// Heading of the bibliography section of the linear document
    pub references: String,

    /// Title of the presentation map slide
    pub presentation_map: String,

    /// Title of the bibliography slide (also its map entry)
    pub bibliography: String,

    /// "Number of references" line of the bibliography slide
    pub reference_count: String,

    /// "Number of slides" line of the bibliography slide
    pub slide_count: String,

    /// Title prefix of paginated reference slides ("References 1 / 3")
    pub reference_page: String,
}

impl Labels {
    /// English labels.
    pub fn english() -> Self {
        Self {
            references: "References".to_string(),
            presentation_map: "Presentation outline".to_string(),
            bibliography: "Bibliography".to_string(),
            reference_count: "Number of references".to_string(),
            slide_count: "Number of slides".to_string(),
            reference_page: "References".to_string(),
        }
    }

    /// French labels.
    pub fn french() -> Self {
        Self {
            references: "Références".to_string(),
            presentation_map: "Plan de la présentation".to_string(),
            bibliography: "Références bibliographiques".to_string(),
            reference_count: "Nombre de références".to_string(),
            slide_count: "Nombre de slides".to_string(),
            reference_page: "Références".to_string(),
        }
    }

    /// Labels for a language code (`en`, `fr`); unknown codes fall back to English.
    pub fn for_language(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "fr" | "fra" | "french" => Self::french(),
            _ => Self::english(),
        }
    }
}

impl Default for Labels {
    fn default() -> Self {
        Self::english()
    }
}

/// Class names and fixed slide parameters of the reveal.js deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideTheme {
    /// Slide style of generated slides (title, map, references)
    pub base_style: String,

    /// Background of the presentation map slide (`None` = placeholder)
    pub map_background: Option<String>,

    /// Highlight span class
    pub highlight_class: String,

    /// Wrapper of the presentation map list
    pub map_class: String,

    /// Footer wrapper
    pub footer_class: String,

    /// Authors wrapper on the title slide
    pub authors_class: String,

    /// Affiliation wrapper on the title slide
    pub affiliation_class: String,

    /// Date wrapper on the title slide
    pub date_class: String,

    /// Citation wrapper on the title slide
    pub citation_class: String,

    /// Banner wrapper on the title slide
    pub banner_class: String,

    /// Wrapper of paginated reference slides
    pub references_class: String,
}

impl Default for SlideTheme {
    fn default() -> Self {
        Self {
            base_style: "default".to_string(),
            map_background: None,
            highlight_class: "dugp_red".to_string(),
            map_class: "dugp_plan".to_string(),
            footer_class: "footer".to_string(),
            authors_class: "name_red".to_string(),
            affiliation_class: "name_place".to_string(),
            date_class: "date".to_string(),
            citation_class: "citation".to_string(),
            banner_class: "first_footer".to_string(),
            references_class: "references".to_string(),
        }
    }
}

impl SlideTheme {
    /// Set the style of generated slides.
    pub fn with_base_style(mut self, style: impl Into<String>) -> Self {
        self.base_style = style.into();
        self
    }

    /// Set the presentation map background.
    pub fn with_map_background(mut self, background: impl Into<String>) -> Self {
        self.map_background = Some(background.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .with_style(Style::DokuWiki)
            .with_header_depth(3)
            .with_slides(false)
            .with_references_per_slide(0);

        assert_eq!(options.style, Style::DokuWiki);
        assert_eq!(options.max_header_depth, 3);
        assert!(!options.slides);
        assert_eq!(options.references_per_slide, 1);
    }

    #[test]
    fn test_header_depth_clamped_to_dialect() {
        let options = RenderOptions::new()
            .with_style(Style::DokuWiki)
            .with_header_depth(9);
        assert_eq!(options.max_header_depth, 5);

        let options = RenderOptions::new()
            .with_header_depth(6)
            .with_style(Style::DokuWiki);
        assert_eq!(options.max_header_depth, 5);
    }

    #[test]
    fn test_defaults() {
        let options = RenderOptions::default();
        assert_eq!(options.style, Style::Markdown);
        assert_eq!(options.max_header_depth, 2);
        assert_eq!(options.highlight_marker, "tag-red");
        assert_eq!(options.reference_format, "long");
        assert_eq!(options.references_per_slide, 4);
    }

    #[test]
    fn test_labels_for_language() {
        assert_eq!(Labels::for_language("fr"), Labels::french());
        assert_eq!(Labels::for_language("de"), Labels::english());
        assert_eq!(Labels::french().presentation_map, "Plan de la présentation");
    }
}
