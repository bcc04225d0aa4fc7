//! Handles all user-facing output for the CLI.
//!
//! Values are printed either as text (their `Display` form) or as JSON.
//! Function listings are colorized when the terminal supports it.

use std::io::{IsTerminal, Write};

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::function::Callable;
use crate::value::Value;

/// Renders a value as text or JSON.
pub fn render_value(value: &Value, json: bool) -> String {
    if json {
        value.to_json().to_string()
    } else {
        value.to_string()
    }
}

/// Prints a value to stdout.
pub fn print_value(value: &Value, json: bool) {
    println!("{}", render_value(value, json));
}

/// Prints `signature  doc` lines for each callable.
pub fn print_listing<'a, I>(callables: I)
where
    I: IntoIterator<Item = &'a dyn Callable>,
{
    let mut stdout = StandardStream::stdout(color_choice());
    for callable in callables {
        print_entry(&mut stdout, callable);
    }
}

/// Prints one callable's signature, then its doc on the next line.
pub fn print_signature(callable: &dyn Callable) {
    let mut stdout = StandardStream::stdout(color_choice());
    print_entry(&mut stdout, callable);
}

// ============================================================================
// PRIVATE HELPERS
// ============================================================================

fn color_choice() -> ColorChoice {
    if std::io::stdout().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

fn print_entry(stdout: &mut StandardStream, callable: &dyn Callable) {
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true));
    let _ = write!(stdout, "{}", callable.name());
    let _ = stdout.reset();
    let _ = writeln!(stdout, "{}", callable.params().render());
    if let Some(doc) = callable.doc() {
        let _ = stdout.set_color(ColorSpec::new().set_dimmed(true));
        let _ = writeln!(stdout, "    {}", doc);
        let _ = stdout.reset();
    }
}
