//! CLI enum types for encoder options.

use clap::ValueEnum;

use ansi_art::codec::LineEnding;

/// Row separator for `convert`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LineEndingArg {
    /// DOS `\r\n`
    #[default]
    Crlf,
    /// Unix `\n`, display only: rows after the first do not decode back in place
    Lf,
}

impl From<LineEndingArg> for LineEnding {
    fn from(l: LineEndingArg) -> Self {
        match l {
            LineEndingArg::Crlf => LineEnding::CrLf,
            LineEndingArg::Lf => LineEnding::Lf,
        }
    }
}

/// Colour depth to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Keep 24-bit colour sequences
    Truecolor,
    /// Reduce to the 16 VGA colours
    Ansi16,
}

impl ColorMode {
    pub fn is_true_color(self) -> bool {
        self == ColorMode::Truecolor
    }
}
