//! Status reporting on stderr.
//!
//! Results go to stdout; everything about the run itself (progress, timings,
//! warnings) goes through a [`Reporter`] so `--quiet` and `-v` apply in one
//! place.

use owo_colors::OwoColorize;
use std::io::IsTerminal;
use std::path::Path;
use std::time::Duration;

/// Verbosity-gated stderr writer.
#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    quiet: bool,
    verbose: u8,
    color: bool,
}

impl Reporter {
    pub fn new(quiet: bool, verbose: u8) -> Self {
        Self {
            quiet,
            verbose,
            color: std::io::stderr().is_terminal(),
        }
    }

    /// Reporter that prints nothing.
    pub fn silent() -> Self {
        Self {
            quiet: true,
            verbose: 0,
            color: false,
        }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn verbosity(&self) -> u8 {
        if self.quiet { 0 } else { self.verbose }
    }

    /// Normal progress line.
    pub fn status(&self, message: &str) {
        if self.quiet {
            return;
        }
        eprintln!("{}", message);
    }

    /// Shown with `-v`.
    pub fn detail(&self, message: &str) {
        if self.verbosity() < 1 {
            return;
        }
        if self.color {
            eprintln!("{}", message.dimmed());
        } else {
            eprintln!("{}", message);
        }
    }

    /// Shown with `-vv`.
    pub fn debug(&self, message: &str) {
        if self.verbosity() < 2 {
            return;
        }
        if self.color {
            eprintln!("{} {}", "[debug]".dimmed(), message.dimmed());
        } else {
            eprintln!("[debug] {}", message);
        }
    }

    pub fn warn(&self, message: &str) {
        if self.quiet {
            return;
        }
        let line = format!("Warning: {}", message);
        if self.color {
            eprintln!("{}", line.yellow());
        } else {
            eprintln!("{}", line);
        }
    }

    /// Announce a written output file.
    pub fn written(&self, what: &str, path: &Path) {
        if self.quiet {
            return;
        }
        if self.color {
            eprintln!("{} {} → {}", "✓".green(), what, path.display());
        } else {
            eprintln!("✓ {} → {}", what, path.display());
        }
    }

    /// `-v` line with the elapsed time of a stage.
    pub fn timing(&self, stage: &str, elapsed: Duration) {
        self.detail(&format!("{} took {}", stage, format_elapsed(elapsed)));
    }
}

fn format_elapsed(d: Duration) -> String {
    if d.as_secs() >= 1 {
        format!("{:.2}s", d.as_secs_f64())
    } else {
        format!("{}ms", d.as_millis())
    }
}
