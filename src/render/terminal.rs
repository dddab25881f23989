//! ANSI rendering for a modern UTF-8 terminal.

use super::Renderer;
use crate::codec::{encode_to_string, EncodeOptions, LineEnding};
use crate::grid::Grid;

/// Re-encodes a grid as UTF-8 with `\n` row separators.
#[derive(Debug, Clone)]
pub struct TerminalRenderer {
    options: EncodeOptions,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(EncodeOptions::default())
    }
}

impl TerminalRenderer {
    /// The line ending is always forced to `\n`.
    pub fn new(options: EncodeOptions) -> Self {
        Self {
            options: EncodeOptions {
                line_ending: LineEnding::Lf,
                ..options
            },
        }
    }

    pub fn options(&self) -> &EncodeOptions {
        &self.options
    }
}

impl Renderer for TerminalRenderer {
    fn render(&self, grid: &Grid) -> String {
        encode_to_string(grid, &self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode;

    #[test]
    fn test_renders_unicode_with_lf() {
        let grid = decode(&[0xDB, 0xDB, b'\r', b'\n', 0xB0], 4);
        let out = TerminalRenderer::default().render(&grid);
        assert_eq!(out, "██\n░\x1b[0m");
    }

    #[test]
    fn test_line_ending_forced() {
        let renderer = TerminalRenderer::new(EncodeOptions {
            line_ending: LineEnding::CrLf,
            ..EncodeOptions::default()
        });
        assert_eq!(renderer.options().line_ending, LineEnding::Lf);
    }

    #[test]
    fn test_quantizes_without_true_color() {
        let renderer = TerminalRenderer::new(EncodeOptions {
            true_color: false,
            ..EncodeOptions::default()
        });
        let grid = decode(b"\x1b[38;2;255;80;80mX", 4);
        assert_eq!(renderer.render(&grid), "\x1b[91mX\x1b[0m");
    }
}
