//! Deck prologue and epilogue.

use super::commands::SlideCommands;
use super::slides::BACKGROUND_PLACEHOLDER;
use super::{SlideTheme, Style};

const DECK_HEADER: &str = "~~REVEAL~~\n~~NOCACHE~~\n\n";

/// Wrap the deck body with the reveal.js header, footer line, title slide
/// and extra style block. Unset commands are left out.
pub fn assemble_deck(
    body: &str,
    commands: &SlideCommands,
    style: Style,
    theme: &SlideTheme,
) -> String {
    let mut out = String::from(DECK_HEADER);

    if let Some(footer) = commands.display_footer() {
        out.push_str(&format!("<wrap {}>{}</wrap>\n\n", theme.footer_class, footer));
    }

    if let Some(title_slide) = title_slide(commands, style, theme) {
        out.push_str(&title_slide);
        out.push('\n');
    }

    out.push_str(body);
    if !body.is_empty() && !body.ends_with('\n') {
        out.push('\n');
    }

    if let Some(ref extra) = commands.extra_style {
        out.push('\n');
        out.push_str(extra);
        out.push_str("\n\n");
    }

    out
}

fn title_slide(commands: &SlideCommands, style: Style, theme: &SlideTheme) -> Option<String> {
    let wrapped = [
        (commands.authors.as_deref(), theme.authors_class.as_str()),
        (commands.affiliation.as_deref(), theme.affiliation_class.as_str()),
        (commands.date.as_deref(), theme.date_class.as_str()),
        (commands.citation.as_deref(), theme.citation_class.as_str()),
    ];

    let title = commands.display_title();
    if title.is_none() && commands.banner.is_none() && wrapped.iter().all(|(v, _)| v.is_none()) {
        return None;
    }

    let slide_style = commands.style.as_deref().unwrap_or(&theme.base_style);
    let mut out = format!(
        "---- {} {} bg-none none no-footer ---->\n\n",
        slide_style, BACKGROUND_PLACEHOLDER
    );

    if let Some(title) = title {
        out.push_str(&style.heading(1, &title.replace('\n', " ")));
        out.push_str("\n\n");
    }
    for (value, class) in wrapped {
        if let Some(value) = value {
            out.push_str(&format!("<WRAP {}>{}</WRAP>\n\n", class, style.with_line_breaks(value)));
        }
    }
    if let Some(ref banner) = commands.banner {
        out.push_str(&format!(
            "<WRAP {}>{{{{ {}?nolink }}}}</WRAP>\n\n",
            theme.banner_class, banner
        ));
    }

    out.push_str("<----\n");
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::commands::SlideCommand;

    #[test]
    fn test_empty_commands() {
        let deck = assemble_deck(
            "BODY\n",
            &SlideCommands::default(),
            Style::Markdown,
            &SlideTheme::default(),
        );
        assert_eq!(deck, "~~REVEAL~~\n~~NOCACHE~~\n\nBODY\n");
    }

    #[test]
    fn test_full_prologue() {
        let mut commands = SlideCommands::default();
        commands.set(SlideCommand::Title, "Talk");
        commands.set(SlideCommand::Authors, "A. One\nB. Two");
        commands.set(SlideCommand::Date, "2022");
        commands.set(SlideCommand::Footer, "My talk");
        commands.set(SlideCommand::Banner, "media:banner.png");
        commands.set(SlideCommand::ExtraStyle, "<style>x</style>");

        let deck = assemble_deck("BODY\n", &commands, Style::DokuWiki, &SlideTheme::default());
        assert!(deck.starts_with("~~REVEAL~~\n~~NOCACHE~~\n\n<wrap footer>My talk</wrap>\n\n"));
        assert!(deck.contains("---- default :1px.png bg-none none no-footer ---->"));
        assert!(deck.contains("====== Talk ======\n\n"));
        assert!(deck.contains("<WRAP name_red>A. One \\\\ B. Two</WRAP>"));
        assert!(deck.contains("<WRAP date>2022</WRAP>"));
        assert!(!deck.contains("name_place"));
        assert!(deck.contains("<WRAP first_footer>{{ media:banner.png?nolink }}</WRAP>"));
        assert!(deck.ends_with("BODY\n\n<style>x</style>\n\n"));
    }
}
