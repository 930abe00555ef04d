//! Terminal rendering of errors.
//!
//! ```text
//! error[E0002]: invalid binary symbol `2` at offset 3
//!   --> loads.tbl:4
//!   |
//! 4 | b1021 => 0x1
//!   |    ^
//! ```

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const BOLD: &str = "\x1b[1m";
    pub const SECONDARY: &str = "\x1b[1;34m"; // Bold blue
    pub const RESET: &str = "\x1b[0m";
}

/// Color output mode, selected with `--color`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Colors when stderr is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownColorMode(pub String);

impl fmt::Display for UnknownColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown color mode `{}` (expected auto, always or never)",
            self.0
        )
    }
}

impl FromStr for ColorMode {
    type Err = UnknownColorMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(ColorMode::Auto),
            "always" => Ok(ColorMode::Always),
            "never" => Ok(ColorMode::Never),
            other => Err(UnknownColorMode(other.to_owned())),
        }
    }
}

/// Source excerpt to show under a diagnostic, with a caret.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snippet {
    /// Where the text came from, e.g. `loads.tbl:4` or `<pattern>`.
    pub origin: String,
    /// Line number to print in the gutter, if the text is from a file.
    pub line: Option<usize>,
    pub text: String,
    /// Byte column of the caret within `text`.
    pub column: usize,
}

/// A rendered error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub code: Option<&'static str>,
    pub message: String,
    pub snippet: Option<Snippet>,
}

/// Writes diagnostics with optional ANSI colors.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
}

impl<W: Write> TerminalEmitter<W> {
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
        }
    }

    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    pub fn emit(&mut self, diagnostic: &Diagnostic) {
        // Header: error[CODE]: message
        match diagnostic.code {
            Some(code) => self.write_colored(&format!("error[{code}]"), colors::ERROR),
            None => self.write_colored("error", colors::ERROR),
        }
        self.write_colored(&format!(": {}", diagnostic.message), colors::BOLD);
        let _ = writeln!(self.writer);

        let Some(snippet) = &diagnostic.snippet else {
            return;
        };
        let gutter = snippet.line.map(|l| l.to_string()).unwrap_or_default();
        let pad = " ".repeat(gutter.len());

        let _ = write!(self.writer, "{pad} ");
        self.write_colored("-->", colors::SECONDARY);
        let _ = writeln!(self.writer, " {}", snippet.origin);
        self.write_colored(&format!("{pad} |"), colors::SECONDARY);
        let _ = writeln!(self.writer);
        self.write_colored(&format!("{gutter} |"), colors::SECONDARY);
        let _ = writeln!(self.writer, " {}", snippet.text);
        self.write_colored(&format!("{pad} |"), colors::SECONDARY);
        let before_caret = snippet.text.get(..snippet.column).unwrap_or(&snippet.text);
        let caret_pad = " ".repeat(before_caret.chars().count());
        let _ = write!(self.writer, " {caret_pad}");
        self.write_colored("^", colors::ERROR);
        let _ = writeln!(self.writer);
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl TerminalEmitter<io::Stderr> {
    /// Emitter for stderr; `Auto` checks whether stderr is a terminal.
    pub fn stderr(mode: ColorMode) -> Self {
        let is_tty = io::IsTerminal::is_terminal(&io::stderr());
        TerminalEmitter::with_color_mode(io::stderr(), mode, is_tty)
    }
}
