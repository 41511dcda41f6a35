//! User-facing output for the CLI.
//!
//! Status lines go to stderr, colored when stderr is a terminal; translations and dumps go to
//! stdout uncolored so they can be piped. Errors are rendered by miette.

use std::io::Write;

use miette::Report;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::diagnostics::TranslateError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Failed,
}

impl Status {
    fn label(&self) -> &'static str {
        match self {
            Status::Ok => "ok",
            Status::Failed => "failed",
        }
    }

    fn color(&self) -> Color {
        match self {
            Status::Ok => Color::Green,
            Status::Failed => Color::Red,
        }
    }
}

/// Prints `<status> <message>` to stderr.
pub fn print_status(status: Status, message: &str) {
    let mut stderr = StandardStream::stderr(ColorChoice::Auto);
    let _ = stderr.set_color(ColorSpec::new().set_fg(Some(status.color())).set_bold(true));
    let _ = write!(stderr, "{:>7}", status.label());
    let _ = stderr.reset();
    let _ = writeln!(stderr, " {}", message);
}

/// Prints an error with full miette diagnostics.
pub fn print_error(error: TranslateError) {
    let report = Report::new(error);
    eprintln!("{report:?}");
}

/// Prints the closing `N ok, M failed` line.
pub fn print_summary(succeeded: usize, failed: usize) {
    let mut stderr = StandardStream::stderr(ColorChoice::Auto);
    let color = if failed > 0 { Color::Red } else { Color::Green };
    let _ = stderr.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
    let _ = writeln!(stderr, "{} ok, {} failed", succeeded, failed);
    let _ = stderr.reset();
}

/// Writes a section header and body to stdout, as `show` does once per output file.
pub fn print_file(name: &str, contents: &str, with_header: bool) {
    if with_header {
        println!("// ---- {} ----", name);
    }
    print!("{}", contents);
}
