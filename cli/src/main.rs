//! xmindmd CLI - XMind to DokuWiki/Markdown and reveal.js converter

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use xmindmd::convert::DocumentConverter;
use xmindmd::render::{Classifier, NodeKind, ReferenceResolver};
use xmindmd::{
    parse_file_with_options, ConvertOptions, ConvertResult, JsonFormat, Labels, ParseOptions,
    RenderOptions, Style, XmindConverter,
};

#[derive(Parser)]
#[command(name = "xmindmd")]
#[command(author = "xmindmd contributors")]
#[command(version)]
#[command(about = "Convert XMind mind maps to DokuWiki/Markdown and reveal.js slides")]
#[command(long_about = None)]
struct Cli {
    /// Input XMind file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file of the linear document
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(flatten)]
    render: RenderArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Rendering flags shared by the converting commands.
#[derive(Args, Clone)]
struct RenderArgs {
    /// Emit DokuWiki markup
    #[arg(short = 'd', long, conflicts_with = "markdown")]
    dokuwiki: bool,

    /// Emit Markdown (default)
    #[arg(short = 'm', long)]
    markdown: bool,

    /// Output dialect when neither flag is given
    #[arg(long, value_enum, env = "XMINDMD_STYLE", hide = true)]
    style: Option<StyleArg>,

    /// Number of heading levels (0 disables headings)
    #[arg(short = 'l', long, env = "XMINDMD_LEVELS", default_value = "2")]
    levels: usize,

    /// Sheet to convert (0-indexed)
    #[arg(long, default_value = "0")]
    sheet: usize,

    /// Language of generated labels
    #[arg(long, value_enum, default_value = "en")]
    lang: Lang,

    /// Do not build the slide deck
    #[arg(long)]
    no_slides: bool,

    /// Skip malformed sheets and truncate over-deep outlines
    #[arg(long)]
    lenient: bool,
}

impl RenderArgs {
    fn style(&self) -> Style {
        if self.dokuwiki {
            Style::DokuWiki
        } else if self.markdown {
            Style::Markdown
        } else {
            self.style.map(Style::from).unwrap_or_default()
        }
    }

    fn parse_options(&self) -> ParseOptions {
        if self.lenient {
            ParseOptions::new().lenient()
        } else {
            ParseOptions::new()
        }
    }

    fn render_options(&self) -> RenderOptions {
        RenderOptions::new()
            .with_style(self.style())
            .with_header_depth(self.levels)
            .with_labels(Labels::for_language(self.lang.code()))
            .with_slides(!self.no_slides)
    }

    fn convert_options(&self) -> ConvertOptions {
        ConvertOptions::new()
            .with_parse_options(self.parse_options())
            .with_render_options(self.render_options())
            .with_sheet(self.sheet)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Convert to the linear document and the slide deck
    Convert {
        /// Input XMind file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file of the linear document
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Convert to the linear document only
    #[command(alias = "md")]
    Markdown {
        /// Input XMind file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Convert to the reveal.js slide deck only
    Slides {
        /// Input XMind file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Dump the decoded outline as JSON
    Json {
        /// Input XMind file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show document information
    Info {
        /// Input XMind file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum StyleArg {
    /// DokuWiki markup
    Dokuwiki,
    /// Markdown
    Markdown,
}

impl From<StyleArg> for Style {
    fn from(arg: StyleArg) -> Self {
        match arg {
            StyleArg::Dokuwiki => Style::DokuWiki,
            StyleArg::Markdown => Style::Markdown,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Lang {
    /// English labels
    En,
    /// French labels
    Fr,
}

impl Lang {
    fn code(self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Fr => "fr",
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert {
            input,
            output,
            render,
        }) => cmd_convert(&input, output.as_deref(), &render),
        Some(Commands::Markdown {
            input,
            output,
            render,
        }) => cmd_markdown(&input, output.as_deref(), &render),
        Some(Commands::Slides {
            input,
            output,
            render,
        }) => cmd_slides(&input, output.as_deref(), &render),
        Some(Commands::Json {
            input,
            output,
            compact,
        }) => cmd_json(&input, output.as_deref(), compact),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            if let Some(input) = cli.input {
                cmd_convert(&input, cli.output.as_deref(), &cli.render)
            } else {
                println!("{}", "Usage: xmindmd <FILE> [OUTPUT]".yellow());
                println!("       xmindmd --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn convert(input: &Path, render: &RenderArgs) -> xmindmd::Result<ConvertResult> {
    log::debug!(
        "Converting {} as {} with {} heading levels",
        input.display(),
        render.style(),
        render.levels
    );
    XmindConverter::new().convert(input, &render.convert_options())
}

fn write_or_print(output: Option<&Path>, text: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, text)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", text);
    }
    Ok(())
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    render: &RenderArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let pb = ProgressBar::new(3);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Converting outline...");
    let result = convert(input, render)?;
    pb.inc(1);

    pb.set_message("Writing document...");
    let document_path = result.document_path(input, output);
    if let Some(parent) = document_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(&document_path, &result.document)?;
    pb.inc(1);

    let deck_path = result.deck_path(input, output);
    if result.has_deck() {
        pb.set_message("Writing slides...");
        fs::write(&deck_path, &result.deck)?;
    }
    pb.inc(1);

    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    if result.has_deck() {
        println!("  {} {}", "├─".dimmed(), document_path.display());
        println!("  {} {}", "└─".dimmed(), deck_path.display());
    } else {
        println!("  {} {}", "└─".dimmed(), document_path.display());
    }

    let stats = &result.stats;
    println!(
        "{} {} headings, {} entries, {} slides, {} references",
        "Converted".cyan(),
        stats.heading_count,
        stats.list_item_count,
        stats.slide_count,
        stats.pmid_count + stats.manual_reference_count
    );

    Ok(())
}

fn cmd_markdown(
    input: &Path,
    output: Option<&Path>,
    render: &RenderArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = convert(input, render)?;
    write_or_print(output, &result.document)
}

fn cmd_slides(
    input: &Path,
    output: Option<&Path>,
    render: &RenderArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = convert(input, render)?;
    if !result.has_deck() {
        println!("{}", "Outline has no slide group, no deck produced".yellow());
        return Ok(());
    }
    write_or_print(output, &result.deck)
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let workbook = xmindmd::parse_file(input)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = xmindmd::render::to_json(&workbook, format)?;
    write_or_print(output, &json)
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let format = xmindmd::detect_format_from_path(input)?;
    let workbook = parse_file_with_options(input, ParseOptions::new().lenient())?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Format".bold(), format);
    if let Some(ref creator) = workbook.metadata.creator {
        match workbook.metadata.creator_version {
            Some(ref version) => println!("{}: {} {}", "Creator".bold(), creator, version),
            None => println!("{}: {}", "Creator".bold(), creator),
        }
    }
    println!("{}: {}", "Sheets".bold(), workbook.sheet_count());

    let classifier = Classifier::new();
    let resolver = ReferenceResolver::new();

    for (index, sheet) in workbook.sheets.iter().enumerate() {
        println!();
        println!(
            "{} {}: {}",
            "Sheet".cyan().bold(),
            index,
            sheet.title.cyan().bold()
        );
        println!("{}", "─".repeat(40).dimmed());

        let slide_groups = sheet
            .root
            .descendants()
            .filter(|n| classifier.classify(n) == NodeKind::SlideGroupRoot)
            .count();
        let titles: Vec<&str> = sheet.root.descendants().map(|n| n.title.as_str()).collect();
        let pmids = resolver.collect_pmids(&titles);
        let citations = resolver.count_citations(&titles.join("\n"));

        println!("{}: {}", "Root".bold(), sheet.root.title);
        println!("{}: {}", "Nodes".bold(), sheet.root.node_count());
        println!("{}: {}", "Depth".bold(), sheet.root.depth());
        println!("{}: {}", "Slide groups".bold(), slide_groups);
        println!("{}: {}", "Citations".bold(), citations);
        println!("{}: {}", "Distinct PMIDs".bold(), pmids.len());
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "xmindmd".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("XMind to DokuWiki/Markdown and reveal.js converter");
    println!();
    println!("Repository: {}", "https://github.com/xmindmd/xmindmd".dimmed());
    println!("License: BSD-3-Clause");
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAP: &str = r#"[{"title": "Sheet", "rootTopic": {"title": "Cardiology",
        "children": {"attached": [
            {"title": "Intro"},
            {"title": "rjs", "children": {"attached": [{"title": "Key idea"}]}}
        ]}}}]"#;

    fn convert_args(args: &[&str]) -> RenderArgs {
        let argv = ["xmindmd", "convert", "map.xmind"].iter().chain(args).copied();
        match Cli::try_parse_from(argv).unwrap().command {
            Some(Commands::Convert { render, .. }) => render,
            _ => panic!("expected the convert command"),
        }
    }

    #[test]
    fn test_render_args() {
        let render = convert_args(&["-d", "-l", "3", "--no-slides"]);
        assert_eq!(render.style(), Style::DokuWiki);
        assert_eq!(render.render_options().max_header_depth, 3);
        assert!(!render.render_options().slides);

        let render = convert_args(&["--markdown"]);
        assert_eq!(render.style(), Style::Markdown);
    }

    #[test]
    fn test_convert_writes_both_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("cardio.json");
        fs::write(&input, MAP).unwrap();

        cmd_convert(&input, None, &convert_args(&["-l", "1"])).unwrap();

        let document = fs::read_to_string(dir.path().join("cardio.md")).unwrap();
        assert!(document.starts_with("# Cardiology\n"));
        assert!(!document.contains("Key idea"));
        let deck = fs::read_to_string(dir.path().join("cardio_revealjs.md")).unwrap();
        assert!(deck.contains("  * Key idea\n"));
    }

    #[test]
    fn test_convert_explicit_output_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("cardio.json");
        fs::write(&input, MAP).unwrap();
        let output = dir.path().join("wiki").join("page.txt");

        cmd_convert(&input, Some(output.as_path()), &convert_args(&["-d"])).unwrap();

        assert!(output.exists());
        assert!(dir.path().join("wiki").join("page_revealjs.txt").exists());
        assert!(!dir.path().join("cardio.txt").exists());
    }
}
