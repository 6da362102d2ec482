//! Terminal styling for help output.
//!
//! Decoration only: bold titles, dimmed footers, colored badges. Styling is
//! applied when the output stream is an interactive terminal and suppressed
//! when redirected; it never affects parsing or validation outcomes.

pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const CYAN: &str = "\x1b[36m";
pub const RESET: &str = "\x1b[0m";

/// When to emit ANSI escape codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Style only when stdout is an interactive terminal.
    #[default]
    Auto,
    Always,
    Never,
}

/// Determines if styling should be used for the given mode.
pub fn is_enabled(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => console::Term::stdout().is_term(),
    }
}

/// Colorizer passed to the help renderer.
#[derive(Clone, Copy)]
pub struct Painter {
    enabled: bool,
}

impl Painter {
    pub fn new(mode: ColorMode) -> Self {
        Self {
            enabled: is_enabled(mode),
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Title lines - BOLD
    pub fn header(&self, s: &str) -> String {
        self.wrap(s, BOLD)
    }

    /// Footer hints - DIM
    pub fn dim(&self, s: &str) -> String {
        self.wrap(s, DIM)
    }

    /// Arity/required badges - CYAN
    pub fn badge(&self, s: &str) -> String {
        self.wrap(s, CYAN)
    }

    pub fn wrap(&self, s: &str, code: &str) -> String {
        if self.enabled {
            format!("{code}{s}{RESET}")
        } else {
            s.to_string()
        }
    }
}
