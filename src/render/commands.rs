//! Named slide commands.

use serde::{Deserialize, Serialize};

/// A command node recognized inside slide groups.
///
/// The command's value is the title of the node's first child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlideCommand {
    Title,
    ShortTitle,
    LongTitle,
    Authors,
    Affiliation,
    Date,
    Citation,
    Footer,
    Style,
    Banner,
    ExtraStyle,
    BackgroundAnimation,
    Transition,
}

impl SlideCommand {
    /// All commands.
    pub const ALL: [SlideCommand; 13] = [
        SlideCommand::Title,
        SlideCommand::ShortTitle,
        SlideCommand::LongTitle,
        SlideCommand::Authors,
        SlideCommand::Affiliation,
        SlideCommand::Date,
        SlideCommand::Citation,
        SlideCommand::Footer,
        SlideCommand::Style,
        SlideCommand::Banner,
        SlideCommand::ExtraStyle,
        SlideCommand::BackgroundAnimation,
        SlideCommand::Transition,
    ];

    /// Parse a node title (case-insensitive, English names and French aliases).
    pub fn parse(title: &str) -> Option<Self> {
        let command = match title.trim().to_ascii_lowercase().as_str() {
            "title" | "titre" => SlideCommand::Title,
            "short-title" | "titrecourt" => SlideCommand::ShortTitle,
            "long-title" | "titrelong" => SlideCommand::LongTitle,
            "authors" | "auteurs" => SlideCommand::Authors,
            "affiliation" => SlideCommand::Affiliation,
            "date" => SlideCommand::Date,
            "citation" => SlideCommand::Citation,
            "footer" => SlideCommand::Footer,
            "style" => SlideCommand::Style,
            "banner" | "bandeau" => SlideCommand::Banner,
            "extra-style" | "extrastyle" => SlideCommand::ExtraStyle,
            "background-animation" | "bg-anim" => SlideCommand::BackgroundAnimation,
            "transition" | "slide-transition" => SlideCommand::Transition,
            _ => return None,
        };
        Some(command)
    }

    /// Canonical name.
    pub fn name(&self) -> &'static str {
        match self {
            SlideCommand::Title => "title",
            SlideCommand::ShortTitle => "short-title",
            SlideCommand::LongTitle => "long-title",
            SlideCommand::Authors => "authors",
            SlideCommand::Affiliation => "affiliation",
            SlideCommand::Date => "date",
            SlideCommand::Citation => "citation",
            SlideCommand::Footer => "footer",
            SlideCommand::Style => "style",
            SlideCommand::Banner => "banner",
            SlideCommand::ExtraStyle => "extra-style",
            SlideCommand::BackgroundAnimation => "background-animation",
            SlideCommand::Transition => "transition",
        }
    }
}

/// Values collected from command nodes. Unset commands stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideCommands {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authors: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affiliation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub citation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_animation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition: Option<String>,
}

impl SlideCommands {
    fn slot(&mut self, command: SlideCommand) -> &mut Option<String> {
        match command {
            SlideCommand::Title => &mut self.title,
            SlideCommand::ShortTitle => &mut self.short_title,
            SlideCommand::LongTitle => &mut self.long_title,
            SlideCommand::Authors => &mut self.authors,
            SlideCommand::Affiliation => &mut self.affiliation,
            SlideCommand::Date => &mut self.date,
            SlideCommand::Citation => &mut self.citation,
            SlideCommand::Footer => &mut self.footer,
            SlideCommand::Style => &mut self.style,
            SlideCommand::Banner => &mut self.banner,
            SlideCommand::ExtraStyle => &mut self.extra_style,
            SlideCommand::BackgroundAnimation => &mut self.background_animation,
            SlideCommand::Transition => &mut self.transition,
        }
    }

    /// Store a command value, replacing any earlier one.
    pub fn set(&mut self, command: SlideCommand, value: impl Into<String>) {
        *self.slot(command) = Some(value.into());
    }

    /// Get a command value.
    pub fn get(&self, command: SlideCommand) -> Option<&str> {
        let value = match command {
            SlideCommand::Title => &self.title,
            SlideCommand::ShortTitle => &self.short_title,
            SlideCommand::LongTitle => &self.long_title,
            SlideCommand::Authors => &self.authors,
            SlideCommand::Affiliation => &self.affiliation,
            SlideCommand::Date => &self.date,
            SlideCommand::Citation => &self.citation,
            SlideCommand::Footer => &self.footer,
            SlideCommand::Style => &self.style,
            SlideCommand::Banner => &self.banner,
            SlideCommand::ExtraStyle => &self.extra_style,
            SlideCommand::BackgroundAnimation => &self.background_animation,
            SlideCommand::Transition => &self.transition,
        };
        value.as_deref()
    }

    /// Number of commands set.
    pub fn len(&self) -> usize {
        SlideCommand::ALL
            .iter()
            .filter(|c| self.get(**c).is_some())
            .count()
    }

    /// Whether no command was set.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Title shown on the title slide: `title`, then `long-title`, then `short-title`.
    pub fn display_title(&self) -> Option<&str> {
        self.title
            .as_deref()
            .or(self.long_title.as_deref())
            .or(self.short_title.as_deref())
    }

    /// Footer text: `footer`, then `short-title`.
    pub fn display_footer(&self) -> Option<&str> {
        self.footer.as_deref().or(self.short_title.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!(SlideCommand::parse("TITRE"), Some(SlideCommand::Title));
        assert_eq!(SlideCommand::parse("auteurs"), Some(SlideCommand::Authors));
        assert_eq!(
            SlideCommand::parse("slide-transition"),
            Some(SlideCommand::Transition)
        );
        assert_eq!(
            SlideCommand::parse("bg-anim"),
            Some(SlideCommand::BackgroundAnimation)
        );
        assert_eq!(SlideCommand::parse("subtitle"), None);
    }

    #[test]
    fn test_names_round_trip() {
        for command in SlideCommand::ALL {
            assert_eq!(SlideCommand::parse(command.name()), Some(command));
        }
    }

    #[test]
    fn test_set_overwrites() {
        let mut commands = SlideCommands::default();
        assert!(commands.is_empty());

        commands.set(SlideCommand::Date, "2021");
        commands.set(SlideCommand::Date, "2022");
        assert_eq!(commands.get(SlideCommand::Date), Some("2022"));
        assert_eq!(commands.len(), 1);
    }

    #[test]
    fn test_display_fallbacks() {
        let mut commands = SlideCommands::default();
        commands.set(SlideCommand::ShortTitle, "Short");
        assert_eq!(commands.display_title(), Some("Short"));
        assert_eq!(commands.display_footer(), Some("Short"));

        commands.set(SlideCommand::Title, "Full");
        commands.set(SlideCommand::Footer, "Foot");
        assert_eq!(commands.display_title(), Some("Full"));
        assert_eq!(commands.display_footer(), Some("Foot"));
    }
}
