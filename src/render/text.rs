//! Plain-text rendering (glyphs only).

use super::{display_glyph, Renderer};
use crate::grid::Grid;

#[derive(Debug, Clone, Default)]
pub struct TextRenderer {
    /// Keep trailing spaces and trailing empty rows.
    pub preserve_whitespace: bool,
}

impl TextRenderer {
    pub fn new(preserve_whitespace: bool) -> Self {
        Self {
            preserve_whitespace,
        }
    }
}

impl Renderer for TextRenderer {
    fn render(&self, grid: &Grid) -> String {
        let mut lines: Vec<String> = grid
            .rows()
            .map(|row| {
                let line: String = row.iter().map(|c| display_glyph(c.glyph)).collect();
                if self.preserve_whitespace {
                    line
                } else {
                    line.trim_end().to_string()
                }
            })
            .collect();

        if !self.preserve_whitespace {
            while lines.last().is_some_and(|l| l.is_empty()) {
                lines.pop();
            }
        }
        lines.join("\n")
    }
}
