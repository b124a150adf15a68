mod debug_report;

use anyhow::{Context, bail};
use clap::Parser;
use hilite::{HighlightSettings, Highlighter, MessageFlags};
use std::io::{self, BufRead, IsTerminal};
use std::path::PathBuf;

/// Check chat lines against a highlight settings file.
///
/// Messages are taken from the trailing arguments, or one per line from
/// stdin when none are given.
#[derive(Debug, Parser)]
#[command(name = "hilite", version, about)]
struct Cli {
    /// Highlight settings JSON file.
    #[arg(short, long)]
    settings: PathBuf,

    /// Treat messages as channel-points redeemed highlights.
    #[arg(long)]
    redeemed: bool,

    /// Treat messages as subscription events.
    #[arg(long)]
    sub: bool,

    /// Force ANSI color output.
    #[arg(long, conflicts_with = "no_color")]
    color: bool,

    /// Disable ANSI color output.
    #[arg(long)]
    no_color: bool,

    /// Message text. Joined with spaces.
    #[arg(trailing_var_arg = true)]
    message: Vec<String>,
}

fn main() {
    env_logger::Builder::from_default_env().format_timestamp(None).init();

    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let settings = HighlightSettings::load(&cli.settings)
        .with_context(|| format!("loading highlight settings from {}", cli.settings.display()))?;
    let highlighter = Highlighter::from_settings(&settings);

    let mut flags = MessageFlags::empty();
    flags.set(MessageFlags::REDEEMED_HIGHLIGHT, cli.redeemed);
    flags.set(MessageFlags::SUBSCRIPTION, cli.sub);

    let color = if cli.color {
        true
    } else if cli.no_color {
        false
    } else {
        io::stdout().is_terminal()
    };

    let default_sound = highlighter.options().default_sound_url.clone();

    if !cli.message.is_empty() {
        let text = cli.message.join(" ");
        let report = highlighter.check_verbose(&text, flags);
        debug_report::print_report(&report, &default_sound, color);
        return Ok(());
    }

    if io::stdin().is_terminal() {
        bail!("no message given (pass it as arguments or pipe lines on stdin)");
    }

    for line in io::stdin().lock().lines() {
        let line = line.context("reading stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        let report = highlighter.check_verbose(&line, flags);
        debug_report::print_report(&report, &default_sound, color);
    }

    Ok(())
}
