use ircdefs::Generation;
use ircdefs::metrics::{KindMetrics, Outcome};

use std::fmt::Display;

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const RED: &str = "\x1b[31m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

/// Wraps text in an escape code when color is on.
#[derive(Clone, Copy)]
struct Palette(bool);

impl Palette {
    fn paint(self, code: &str, text: impl Display) -> String {
        if self.0 { format!("{code}{text}{}", ansi::RESET) } else { text.to_string() }
    }
}

pub fn print_run(generation: &Generation, color: bool) {
    let p = Palette(color);
    let metrics = &generation.metrics;

    println!("\n{}", p.paint(ansi::BOLD, p.paint(ansi::CYAN, "⚙  Generation")));

    println!("\n{}", p.paint(ansi::GRAY, "━━━ Kinds ━━━"));
    for (name, kind) in &metrics.kinds {
        println!("  {} {}", p.paint(ansi::BLUE, format!("{name:<12}")), fmt_kind(kind, p));
    }

    if !generation.failed.is_empty() {
        println!("\n{}", p.paint(ansi::GRAY, "━━━ Dropped ━━━"));
        for (name, err) in &generation.failed {
            println!("  {} {}", p.paint(ansi::RED, name), p.paint(ansi::DIM, err.to_string()));
        }
    }

    if !generation.diagnostics.is_empty() {
        println!("\n{}", p.paint(ansi::GRAY, "━━━ Diagnostics ━━━"));
        for (name, diagnostic) in generation.diagnostics.iter().take(20) {
            println!("  {} {}", p.paint(ansi::YELLOW, name), diagnostic);
        }
        if generation.diagnostics.len() > 20 {
            println!("  {}", p.paint(ansi::DIM, format!("... +{} more", generation.diagnostics.len() - 20)));
        }
    }

    println!("\n{}", p.paint(ansi::GRAY, "━━━ Totals ━━━"));
    println!(
        "  Generated: {}  │  Skipped: {}  │  Failed: {}  │  Symbols: {}  │  Time: {}",
        p.paint(ansi::GREEN, metrics.count(Outcome::Generated).to_string()),
        p.paint(ansi::DIM, metrics.count(Outcome::Skipped).to_string()),
        p.paint(ansi::RED, metrics.count(Outcome::Failed).to_string()),
        p.paint(ansi::BOLD, metrics.symbols().to_string()),
        p.paint(ansi::DIM, format!("{:?}", metrics.total)),
    );
    println!();
}

fn fmt_kind(kind: &KindMetrics, p: Palette) -> String {
    let status = match kind.outcome {
        Outcome::Generated => p.paint(ansi::GREEN, format!("✓ {} symbols", kind.symbols)),
        Outcome::Skipped => p.paint(ansi::DIM, "- nothing to emit"),
        Outcome::Failed => p.paint(ansi::RED, "✗ failed"),
    };

    format!(
        "{}  {} {}  {} {}  {} {}  {}",
        status,
        p.paint(ansi::DIM, "records:"),
        kind.records,
        p.paint(ansi::DIM, "suffixed:"),
        p.paint(ansi::YELLOW, kind.disambiguated.to_string()),
        p.paint(ansi::DIM, "dropped:"),
        p.paint(ansi::YELLOW, kind.dropped.to_string()),
        p.paint(ansi::DIM, format!("{:?}", kind.duration)),
    )
}
