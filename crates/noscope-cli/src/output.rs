//! Colored terminal output
//!
//! Uses `termcolor`; honors `NO_COLOR` and the `--color` flag.

use std::io::Write;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// `--color` values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Resolve `ColorChoice` from the CLI flag and environment.
///
/// Priority: `NO_COLOR` env > `--color` flag > auto-detect TTY.
pub fn resolve_color_choice(mode: ColorMode) -> ColorChoice {
    if std::env::var_os("NO_COLOR").is_some() {
        return ColorChoice::Never;
    }
    match mode {
        ColorMode::Always => ColorChoice::Always,
        ColorMode::Never => ColorChoice::Never,
        ColorMode::Auto => ColorChoice::Auto,
    }
}

/// Styled writer for status lines on stderr
pub struct StyledOutput {
    stream: StandardStream,
}

impl StyledOutput {
    pub fn new(choice: ColorChoice) -> Self {
        Self {
            stream: StandardStream::stderr(choice),
        }
    }

    fn write_styled(&mut self, text: &str, color: Option<Color>, bold: bool) {
        let mut spec = ColorSpec::new();
        spec.set_fg(color).set_bold(bold);
        let _ = self.stream.set_color(&spec);
        let _ = write!(self.stream, "{}", text);
        let _ = self.stream.reset();
    }

    /// Green bold text.
    pub fn success(&mut self, text: &str) {
        self.write_styled(text, Some(Color::Green), true);
    }

    /// Red bold text.
    pub fn error(&mut self, text: &str) {
        self.write_styled(text, Some(Color::Red), true);
    }

    /// Yellow bold text.
    pub fn warning(&mut self, text: &str) {
        self.write_styled(text, Some(Color::Yellow), true);
    }

    pub fn plain(&mut self, text: &str) {
        let _ = write!(self.stream, "{}", text);
    }

    pub fn newline(&mut self) {
        let _ = writeln!(self.stream);
    }

    /// The underlying stream, for codespan rendering
    pub fn stream(&mut self) -> &mut StandardStream {
        &mut self.stream
    }
}

fn plural(n: usize, word: &str) -> String {
    format!("{} {}{}", n, word, if n == 1 { "" } else { "s" })
}

/// "Checked N scopes: X errors, Y warnings."
pub fn print_summary(out: &mut StyledOutput, scopes: usize, errors: usize, warnings: usize) {
    if errors == 0 && warnings == 0 {
        out.plain(&format!("Checked {}: ", plural(scopes, "scope")));
        out.success("no issues found.");
        out.newline();
        return;
    }

    out.plain(&format!("Checked {}: ", plural(scopes, "scope")));
    if errors > 0 {
        out.error(&plural(errors, "error"));
    }
    if errors > 0 && warnings > 0 {
        out.plain(", ");
    }
    if warnings > 0 {
        out.warning(&plural(warnings, "warning"));
    }
    out.plain(".");
    out.newline();
}
