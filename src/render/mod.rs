//! Format adapters: turn a decoded [`Grid`] into something to look at.
//!
//! - [`text`] - plain glyphs
//! - [`html`] - `<pre>` block with inline styles
//! - [`terminal`] - ANSI for a modern UTF-8 terminal
//! - [`json`] - run-length structured rows

pub mod html;
pub mod json;
pub mod terminal;
pub mod text;

pub use html::HtmlRenderer;
pub use json::JsonRenderer;
pub use terminal::TerminalRenderer;
pub use text::TextRenderer;

use crate::grid::{Attributes, Cell, Grid};

/// Something that turns a grid into a displayable string.
pub trait Renderer {
    fn render(&self, grid: &Grid) -> String;
}

/// Consecutive cells of a row sharing the same attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub attrs: Attributes,
}

/// Split a row into attribute runs. NUL glyphs become spaces.
pub fn runs(row: &[Cell]) -> Vec<Run> {
    let mut out: Vec<Run> = Vec::new();
    for cell in row {
        let glyph = display_glyph(cell.glyph);
        match out.last_mut() {
            Some(run) if run.attrs == cell.attrs => run.text.push(glyph),
            _ => out.push(Run {
                text: glyph.to_string(),
                attrs: cell.attrs,
            }),
        }
    }
    out
}

/// Glyph as it appears on screen.
pub(crate) fn display_glyph(glyph: char) -> char {
    if glyph == '\0' {
        ' '
    } else {
        glyph
    }
}
