use hilite::HighlightReport;

mod ansi {
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    const RESET: &str = "\x1b[0m";

    /// Wraps text in escape codes, or passes it through when output is not a
    /// terminal or `--no-color` is set.
    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, code: &str) -> String {
            match self.enabled {
                true => format!("{code}{}{RESET}", s.as_ref()),
                false => s.as_ref().to_string(),
            }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            self.paint(s, BOLD)
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            self.paint(s, DIM)
        }
    }
}

pub fn print_report(report: &HighlightReport, default_sound: &str, color: bool) {
    let palette = ansi::Palette::new(color);
    let flags = if report.flags.is_empty() { String::new() } else { format!("  {:?}", report.flags) };
    println!(
        "\n{}{}",
        palette.bold(palette.paint(format!("✉  Message: \"{}\"", report.text), ansi::CYAN)),
        palette.dim(flags)
    );

    println!("\n{}", palette.paint("━━━ Matches ━━━", ansi::GRAY));
    if report.matches.is_empty() {
        println!("{}", palette.dim("  No phrase matched"));
    } else {
        for (idx, m) in report.matches.iter().enumerate() {
            println!(
                "  {} {} {} {}",
                palette.paint(format!("[{}]", idx), ansi::GRAY),
                palette.bold(palette.paint(&m.pattern, ansi::GREEN)),
                palette.dim("│"),
                palette.paint(format!("span {}..{}", m.span.start, m.span.end), ansi::YELLOW),
            );
            println!("      {} {}", palette.dim("id:"), palette.paint(&m.id, ansi::BLUE));
        }
    }

    if !report.invalid.is_empty() {
        println!("\n{}", palette.paint("━━━ Invalid phrases ━━━", ansi::GRAY));
        for (id, reason) in &report.invalid {
            println!("  {} {}", palette.paint(id, ansi::BLUE), palette.paint(reason, ansi::RED));
        }
    }

    println!("\n{}", palette.paint("━━━ Outcome ━━━", ansi::GRAY));
    print_outcome(report, default_sound, &palette);

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    let m = &report.metrics;
    println!(
        "  Total: {}  │  Matching: {}  │  Resolve: {}",
        palette.paint(format!("{:?}", m.total), ansi::GREEN),
        palette.paint(format!("{:?}", m.matching), ansi::CYAN),
        palette.dim(format!("{:?}", m.resolve)),
    );
    println!(
        "  {}",
        palette.dim(format!(
            "phrases run: {}  matched: {}  disabled: {}  invalid: {}",
            m.rules_considered, m.matched, m.skipped_disabled, m.skipped_invalid
        ))
    );
    println!();
}

fn print_outcome(report: &HighlightReport, default_sound: &str, palette: &ansi::Palette) {
    let out = &report.outcome;
    if out.is_none() {
        println!("{}", palette.dim("  No highlight"));
        return;
    }

    let yes_no = |b: bool| if b { palette.paint("yes", ansi::GREEN) } else { palette.dim("no") };
    let color = out.color.map(|c| c.to_string()).unwrap_or_else(|| "-".to_string());

    println!("  {} {:?}", palette.dim("category:"), out.category);
    println!("  {} {}", palette.dim("color:   "), palette.paint(color, ansi::YELLOW));
    println!("  {} {}", palette.dim("mentions:"), yes_no(out.show_in_mentions));
    println!("  {} {}", palette.dim("alert:   "), yes_no(out.alert));
    if out.play_sound {
        println!("  {} {}", palette.dim("sound:   "), palette.paint(out.sound.url(default_sound), ansi::CYAN));
    } else {
        println!("  {} {}", palette.dim("sound:   "), yes_no(false));
    }
    if out.matched.is_empty() {
        println!("  {}", palette.dim("(category highlight, no phrase matched)"));
    }
}
