//! Programmatic creation of ANSI art.
//!
//! [`ArtBuilder`] keeps a cursor and a pen over a [`Grid`] and exposes
//! chainable drawing calls:
//!
//! ```
//! use ansi_art::create::create;
//! use ansi_art::grid::Color;
//!
//! let grid = create(20)
//!     .fg(Color::Standard(6))
//!     .text("Hello, ")
//!     .fg(Color::Standard(3))
//!     .bold(true)
//!     .text("World!")
//!     .build();
//! assert_eq!(grid.get(7, 0).map(|c| c.glyph), Some('W'));
//! ```

use crate::codec::apply_sgr;
use crate::document::Document;
use crate::grid::{Attributes, Cell, Color, Grid, Rgb, DEFAULT_WIDTH};
use crate::sauce::{DataType, SauceRecord, FILE_TYPE_ANSI};

/// Border glyph set for [`ArtBuilder::draw_box`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoxStyle {
    #[default]
    Single,
    Double,
}

impl BoxStyle {
    /// Corners (top-left, top-right, bottom-left, bottom-right), then the
    /// horizontal and vertical edges.
    fn glyphs(self) -> ([char; 4], char, char) {
        match self {
            BoxStyle::Single => (['┌', '┐', '└', '┘'], '─', '│'),
            BoxStyle::Double => (['╔', '╗', '╚', '╝'], '═', '║'),
        }
    }
}

/// Chainable builder writing glyphs onto a fixed-width grid.
#[derive(Debug, Clone)]
pub struct ArtBuilder {
    grid: Grid,
    column: usize,
    row: usize,
    attrs: Attributes,
}

impl Default for ArtBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH)
    }
}

/// Start a builder on a blank grid of `width` columns.
pub fn create(width: usize) -> ArtBuilder {
    ArtBuilder::new(width)
}

impl ArtBuilder {
    pub fn new(width: usize) -> Self {
        Self {
            grid: Grid::new(width),
            column: 0,
            row: 0,
            attrs: Attributes::default(),
        }
    }

    /// Current cursor as `(column, row)`.
    pub fn cursor(&self) -> (usize, usize) {
        (self.column, self.row)
    }

    pub fn fg(mut self, color: Color) -> Self {
        self.attrs.set_fg(color);
        self
    }

    pub fn bg(mut self, color: Color) -> Self {
        self.attrs.set_bg(color);
        self
    }

    pub fn fg_rgb(mut self, rgb: Rgb) -> Self {
        self.attrs.set_fg_rgb(rgb);
        self
    }

    pub fn bg_rgb(mut self, rgb: Rgb) -> Self {
        self.attrs.set_bg_rgb(rgb);
        self
    }

    pub fn bold(mut self, on: bool) -> Self {
        self.attrs.bold = on;
        self
    }

    pub fn blink(mut self, on: bool) -> Self {
        self.attrs.blink = on;
        self
    }

    /// Apply raw SGR codes to the pen, as `ESC [ … m` would.
    pub fn sgr(mut self, params: &[u16]) -> Self {
        apply_sgr(&mut self.attrs, params);
        self
    }

    pub fn reset(mut self) -> Self {
        self.attrs = Attributes::default();
        self
    }

    /// Move to an absolute position. The column is clamped to the last one.
    pub fn move_to(mut self, column: usize, row: usize) -> Self {
        self.column = column.min(self.grid.width() - 1);
        self.row = row;
        self
    }

    pub fn newline(mut self) -> Self {
        self.column = 0;
        self.row += 1;
        self
    }

    /// Write text with the current pen. `\n` starts a new line; a glyph that
    /// would land past the right edge wraps to the next row first.
    pub fn text(mut self, text: &str) -> Self {
        for glyph in text.chars() {
            if glyph == '\n' {
                self = self.newline();
                continue;
            }
            if self.column >= self.grid.width() {
                self = self.newline();
            }
            self.grid.set(self.column, self.row, Cell::new(glyph, self.attrs));
            self.column += 1;
        }
        self
    }

    /// Write `glyph` `count` times.
    pub fn fill(self, glyph: char, count: usize) -> Self {
        self.text(&glyph.to_string().repeat(count))
    }

    /// Write `text` centred within `width` columns (the grid width when
    /// `None`) on the current row.
    pub fn center(mut self, text: &str, width: Option<usize>) -> Self {
        let width = width.unwrap_or(self.grid.width());
        self.column = width.saturating_sub(text.chars().count()) / 2;
        self.text(text)
    }

    /// Outline a `width` x `height` box whose top-left corner is at
    /// (`column`, `row`). Boxes smaller than 2x2 draw nothing.
    pub fn draw_box(self, column: usize, row: usize, width: usize, height: usize, style: BoxStyle) -> Self {
        if width < 2 || height < 2 {
            return self;
        }
        let ([tl, tr, bl, br], h, v) = style.glyphs();
        let edge = h.to_string().repeat(width - 2);
        let bottom = row + height - 1;

        let mut builder = self.move_to(column, row).text(&format!("{tl}{edge}{tr}"));
        for y in row + 1..bottom {
            builder = builder
                .move_to(column, y)
                .text(&v.to_string())
                .move_to(column + width - 1, y)
                .text(&v.to_string());
        }
        builder.move_to(column, bottom).text(&format!("{bl}{edge}{br}"))
    }

    /// Finish and take the grid.
    pub fn build(self) -> Grid {
        self.grid
    }

    /// Finish and wrap the grid in a [`Document`] carrying a Character/ANSI
    /// record with the given credits and the grid's size.
    pub fn into_document(self, title: &str, author: &str, group: &str) -> Document {
        let clamp = |n: usize| u16::try_from(n).unwrap_or(u16::MAX);
        let record = SauceRecord {
            title: title.to_string(),
            author: author.to_string(),
            group: group.to_string(),
            data_type: DataType::Character,
            file_type: FILE_TYPE_ANSI,
            tinfo1: clamp(self.grid.width()),
            tinfo2: clamp(self.grid.height()),
            ..SauceRecord::default()
        };
        Document {
            width: self.grid.width(),
            grid: self.grid,
            sauce: Some(record),
            source_path: None,
        }
    }
}
