//! Byte-level ANSI decoder.
//!
//! A small closed state machine that interprets the BBS dialect of ANSI
//! control sequences directly against a [`Grid`]. Escape sequences are
//! recognised at the byte level, before any code-page translation; only
//! displayable bytes go through CP437.
//!
//! The decoder never fails. Sequences it does not model are consumed and
//! dropped, and a 0x1A (SUB) byte halts it so trailing metadata is never
//! painted.

use super::cp437;
use super::sgr::apply_sgr;
use crate::grid::{Attributes, Cell, Grid, DEFAULT_WIDTH};

const ESC: u8 = 0x1B;
const SUB: u8 = 0x1A;
const CR: u8 = 0x0D;
const LF: u8 = 0x0A;
const TAB: u8 = 0x09;

/// Upper bound on retained CSI parameters; extra ones are dropped.
const MAX_PARAMS: usize = 32;

/// Default number of rows a decoder will address. Cursor moves and line
/// feeds past it stay on the last row, so a few bytes of cursor-down cannot
/// allocate an unbounded grid.
pub const MAX_ROWS: usize = 10_000;

/// Decoder states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderState {
    /// Bytes are glyphs or C0 controls.
    Ground,
    /// An ESC was just consumed.
    EscapeSeen,
    /// `ESC O` was consumed; the next byte names an application cursor key.
    CursorKey,
    /// Inside `ESC [`, accumulating parameters.
    CsiParams,
    /// The metadata marker was reached; further input is ignored.
    Halted,
}

/// Cursor position plus the pen used for newly placed glyphs.
///
/// `column` may equal the grid width: that means a wrap is pending and is
/// carried out before the next glyph is placed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CursorState {
    pub column: usize,
    pub row: usize,
    pub attrs: Attributes,
    pub saved: Option<(usize, usize)>,
}

/// Streaming decoder producing a [`Grid`].
///
/// `feed` may be called any number of times; the grid is handed over by
/// [`Decoder::finish`].
#[derive(Debug, Clone)]
pub struct Decoder {
    state: DecoderState,
    grid: Grid,
    cursor: CursorState,
    params: Vec<u16>,
    current: Option<u16>,
    private: bool,
    offset: usize,
    halt_offset: Option<usize>,
    discarded: usize,
    max_rows: usize,
    truncated: bool,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH)
    }
}

impl Decoder {
    /// Create a decoder painting onto a fresh grid of `width` columns.
    pub fn new(width: usize) -> Self {
        Self::with_max_rows(width, MAX_ROWS)
    }

    /// Like [`Decoder::new`] with a custom row cap (at least 1).
    pub fn with_max_rows(width: usize, max_rows: usize) -> Self {
        Self {
            state: DecoderState::Ground,
            grid: Grid::new(width),
            cursor: CursorState::default(),
            params: Vec::new(),
            current: None,
            private: false,
            offset: 0,
            halt_offset: None,
            discarded: 0,
            max_rows: max_rows.max(1),
            truncated: false,
        }
    }

    pub fn state(&self) -> DecoderState {
        self.state
    }

    pub fn cursor(&self) -> &CursorState {
        &self.cursor
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn is_halted(&self) -> bool {
        self.state == DecoderState::Halted
    }

    /// Absolute offset of the 0x1A byte that halted decoding, if any.
    pub fn halt_offset(&self) -> Option<usize> {
        self.halt_offset
    }

    /// Number of sequences recognised but dropped so far.
    pub fn discarded(&self) -> usize {
        self.discarded
    }

    /// True once the input tried to address a row past the cap.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Feed a chunk of bytes. Returns the number of bytes consumed, which is
    /// less than `bytes.len()` only when the marker was reached.
    pub fn feed(&mut self, bytes: &[u8]) -> usize {
        let mut consumed = 0;
        for &b in bytes {
            if self.is_halted() {
                break;
            }
            self.advance(b);
            consumed += 1;
        }
        consumed
    }

    /// Advance the state machine by one byte.
    pub fn advance(&mut self, b: u8) {
        match self.state {
            DecoderState::Ground => self.advance_ground(b),
            DecoderState::EscapeSeen => self.advance_escape(b),
            DecoderState::CursorKey => self.advance_cursor_key(b),
            DecoderState::CsiParams => self.advance_csi(b),
            DecoderState::Halted => return,
        }
        self.offset += 1;
    }

    /// Finish decoding and take the grid.
    pub fn finish(self) -> Grid {
        log::debug!(
            "decoded {} bytes into {}x{} grid ({} sequences discarded, halted at {:?})",
            self.offset,
            self.grid.width(),
            self.grid.height(),
            self.discarded,
            self.halt_offset
        );
        self.grid
    }

    fn advance_ground(&mut self, b: u8) {
        match b {
            ESC => self.state = DecoderState::EscapeSeen,
            SUB => self.halt(),
            CR => self.cursor.column = 0,
            LF => self.line_feed(),
            TAB => self.tab(),
            _ => self.put_glyph(cp437::to_glyph(b)),
        }
    }

    fn advance_escape(&mut self, b: u8) {
        match b {
            b'[' => {
                self.params.clear();
                self.current = None;
                self.private = false;
                self.state = DecoderState::CsiParams;
            }
            b'O' => self.state = DecoderState::CursorKey,
            SUB => self.halt(),
            _ => {
                self.discarded += 1;
                self.state = DecoderState::Ground;
            }
        }
    }

    fn advance_cursor_key(&mut self, b: u8) {
        self.state = DecoderState::Ground;
        match b {
            b'A' => self.cursor_up(1),
            b'B' => self.cursor_down(1),
            b'C' => self.cursor_forward(1),
            b'D' => self.cursor_back(1),
            b'H' => self.cursor_position(1, 1),
            SUB => self.halt(),
            _ => self.discarded += 1,
        }
    }

    fn advance_csi(&mut self, b: u8) {
        match b {
            b'0'..=b'9' => {
                let digit = (b - b'0') as u16;
                let value = self.current.unwrap_or(0);
                self.current = Some(value.saturating_mul(10).saturating_add(digit));
            }
            b';' => {
                self.push_param();
            }
            b'?' => self.private = true,
            0x40..=0x7E => {
                self.push_param_if_pending();
                self.state = DecoderState::Ground;
                self.dispatch(b);
            }
            // Other parameter/intermediate bytes carry nothing we model.
            0x20..=0x3F => {}
            SUB => self.halt(),
            ESC => {
                self.discarded += 1;
                self.state = DecoderState::EscapeSeen;
            }
            // A glyph or control byte cannot belong to the sequence: drop the
            // sequence and read the byte afresh.
            _ => {
                self.discarded += 1;
                self.state = DecoderState::Ground;
                self.advance_ground(b);
            }
        }
    }

    fn push_param(&mut self) {
        let value = self.current.take().unwrap_or(0);
        if self.params.len() < MAX_PARAMS {
            self.params.push(value);
        }
    }

    fn push_param_if_pending(&mut self) {
        // `ESC[m` has no parameters, `ESC[1;m` has two.
        if self.current.is_some() || !self.params.is_empty() {
            self.push_param();
        }
    }

    fn param(&self, index: usize) -> Option<u16> {
        self.params.get(index).copied()
    }

    /// First parameter as a count: missing or zero means 1.
    fn count(&self) -> usize {
        self.param(0).filter(|&n| n > 0).unwrap_or(1) as usize
    }

    fn dispatch(&mut self, final_byte: u8) {
        match final_byte {
            b'm' if !self.private => apply_sgr(&mut self.cursor.attrs, &self.params),
            b'H' | b'f' => {
                let row = self.param(0).unwrap_or(1) as usize;
                let column = self.param(1).unwrap_or(1) as usize;
                self.cursor_position(row, column);
            }
            b'A' => self.cursor_up(self.count()),
            b'B' => self.cursor_down(self.count()),
            b'C' => self.cursor_forward(self.count()),
            b'D' => self.cursor_back(self.count()),
            b'J' => self.erase_display(self.param(0).unwrap_or(0)),
            b'K' => self.erase_line(self.param(0).unwrap_or(0)),
            b's' => self.cursor.saved = Some((self.cursor.column, self.cursor.row)),
            b'u' => {
                if let Some((column, row)) = self.cursor.saved {
                    self.cursor.column = column;
                    self.cursor.row = row;
                }
            }
            // Window manipulation and mode set/reset corrupt modern
            // terminals and carry nothing the grid needs.
            b't' | b'h' | b'l' => {
                log::trace!("discarding CSI {}", final_byte as char);
                self.discarded += 1;
            }
            _ => {
                log::trace!("unsupported CSI final {:?}", final_byte as char);
                self.discarded += 1;
            }
        }
    }

    fn halt(&mut self) {
        self.state = DecoderState::Halted;
        self.halt_offset = Some(self.offset);
        log::debug!("metadata marker at offset {}", self.offset);
    }

    /// Clamp a target row to the cap, warning the first time it bites.
    fn clamp_row(&mut self, row: usize) -> usize {
        if row < self.max_rows {
            return row;
        }
        if !self.truncated {
            log::warn!("input addresses row {} past the {} row cap; clamping", row + 1, self.max_rows);
            self.truncated = true;
        }
        self.max_rows - 1
    }

    fn line_feed(&mut self) {
        self.cursor.row = self.clamp_row(self.cursor.row.saturating_add(1));
        self.grid.ensure_row(self.cursor.row);
    }

    fn tab(&mut self) {
        let next = (self.cursor.column / 8 + 1) * 8;
        if next >= self.grid.width() {
            self.cursor.column = 0;
            self.line_feed();
        } else {
            self.cursor.column = next;
        }
    }

    fn put_glyph(&mut self, glyph: char) {
        if self.cursor.column >= self.grid.width() {
            self.cursor.column = 0;
            self.cursor.row = self.clamp_row(self.cursor.row.saturating_add(1));
        }
        let cell = Cell::new(glyph, self.cursor.attrs);
        self.grid.set(self.cursor.column, self.cursor.row, cell);
        self.cursor.column += 1;
    }

    /// CUP with 1-based coordinates; 0 is treated as 1.
    fn cursor_position(&mut self, row: usize, column: usize) {
        self.cursor.row = self.clamp_row(row.saturating_sub(1));
        self.cursor.column = column.saturating_sub(1).min(self.grid.width() - 1);
        self.grid.ensure_row(self.cursor.row);
    }

    fn cursor_up(&mut self, n: usize) {
        self.cursor.row = self.cursor.row.saturating_sub(n);
    }

    fn cursor_down(&mut self, n: usize) {
        self.cursor.row = self.clamp_row(self.cursor.row.saturating_add(n));
        self.grid.ensure_row(self.cursor.row);
    }

    fn cursor_forward(&mut self, n: usize) {
        let width = self.grid.width();
        if self.cursor.column >= width {
            self.cursor.column = 0;
            self.line_feed();
        }
        self.cursor.column = self.cursor.column.saturating_add(n).min(width);
    }

    fn cursor_back(&mut self, n: usize) {
        let column = self.cursor.column.min(self.grid.width());
        self.cursor.column = column.saturating_sub(n);
    }

    fn erase_display(&mut self, mode: u16) {
        let (column, row) = (self.cursor.column, self.cursor.row);
        let width = self.grid.width();
        match mode {
            0 => {
                self.grid.clear_row_range(row, column, width);
                for y in row + 1..self.grid.height() {
                    self.grid.clear_row_range(y, 0, width);
                }
            }
            1 => {
                for y in 0..row {
                    self.grid.clear_row_range(y, 0, width);
                }
                self.grid.clear_row_range(row, 0, column + 1);
            }
            2 => {
                self.grid.clear();
                self.cursor.column = 0;
                self.cursor.row = 0;
            }
            _ => self.discarded += 1,
        }
    }

    fn erase_line(&mut self, mode: u16) {
        let (column, row) = (self.cursor.column, self.cursor.row);
        let width = self.grid.width();
        match mode {
            0 => self.grid.clear_row_range(row, column, width),
            1 => self.grid.clear_row_range(row, 0, column + 1),
            2 => self.grid.clear_row_range(row, 0, width),
            _ => self.discarded += 1,
        }
    }
}

/// Decode a complete buffer onto a grid of `width` columns, capped at
/// [`MAX_ROWS`] rows.
pub fn decode(bytes: &[u8], width: usize) -> Grid {
    let mut decoder = Decoder::new(width);
    decoder.feed(bytes);
    decoder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Color;

    fn row_text(grid: &Grid, row: usize) -> String {
        grid.row(row)
            .map(|cells| cells.iter().map(|c| c.glyph).collect::<String>())
            .unwrap_or_default()
            .trim_end()
            .to_string()
    }

    #[test]
    fn test_plain_text() {
        let grid = decode(b"hello", 80);
        assert_eq!(row_text(&grid, 0), "hello");
        assert_eq!(grid.height(), 1);
    }

    #[test]
    fn test_crlf() {
        let grid = decode(b"ab\r\ncd", 80);
        assert_eq!(row_text(&grid, 0), "ab");
        assert_eq!(row_text(&grid, 1), "cd");
    }

    #[test]
    fn test_bare_lf_keeps_column() {
        let mut decoder = Decoder::new(80);
        decoder.feed(b"ab\ncd");
        assert_eq!(decoder.cursor().column, 4);
        let grid = decoder.finish();
        assert_eq!(row_text(&grid, 1), "  cd");
    }

    #[test]
    fn test_tab_stops() {
        let mut decoder = Decoder::new(80);
        decoder.feed(b"abc\t");
        assert_eq!(decoder.cursor().column, 8);
        decoder.feed(b"\t");
        assert_eq!(decoder.cursor().column, 16);
    }

    #[test]
    fn test_tab_wraps_at_width() {
        let mut decoder = Decoder::new(80);
        decoder.feed(b"\x1b[1;76H");
        assert_eq!(decoder.cursor().column, 75);
        decoder.feed(b"\t");
        assert_eq!((decoder.cursor().column, decoder.cursor().row), (0, 1));
        assert_eq!(decoder.grid().height(), 2);
    }

    #[test]
    fn test_wrap_is_deferred_until_next_glyph() {
        let mut decoder = Decoder::new(4);
        decoder.feed(b"abcd");
        assert_eq!(decoder.cursor().column, 4);
        assert_eq!(decoder.grid().height(), 1);
        decoder.feed(b"e");
        let grid = decoder.finish();
        assert_eq!(row_text(&grid, 0), "abcd");
        assert_eq!(grid.get(0, 1).map(|c| c.glyph), Some('e'));
    }

    #[test]
    fn test_full_row_then_crlf_does_not_skip_a_line() {
        let grid = decode(b"abcd\r\nef", 4);
        assert_eq!(grid.height(), 2);
        assert_eq!(row_text(&grid, 1), "ef");
    }

    #[test]
    fn test_sgr_applies_to_glyphs() {
        let grid = decode(b"\x1b[1;31;44mX", 80);
        let cell = grid.get(0, 0).unwrap();
        assert_eq!(cell.glyph, 'X');
        assert!(cell.attrs.bold);
        assert_eq!(cell.attrs.fg, Color::Standard(1));
        assert_eq!(cell.attrs.bg, Color::Standard(4));
    }

    #[test]
    fn test_cursor_position() {
        let mut decoder = Decoder::new(80);
        decoder.feed(b"\x1b[5;10H");
        assert_eq!((decoder.cursor().column, decoder.cursor().row), (9, 4));
        assert_eq!(decoder.grid().height(), 5);
        decoder.feed(b"\x1b[H");
        assert_eq!((decoder.cursor().column, decoder.cursor().row), (0, 0));
        decoder.feed(b"\x1b[0;200f");
        assert_eq!((decoder.cursor().column, decoder.cursor().row), (79, 0));
    }

    #[test]
    fn test_cursor_moves_are_clamped() {
        let mut decoder = Decoder::new(10);
        decoder.feed(b"\x1b[5A\x1b[5D");
        assert_eq!((decoder.cursor().column, decoder.cursor().row), (0, 0));
        decoder.feed(b"\x1b[50C");
        assert_eq!(decoder.cursor().column, 10);
        decoder.feed(b"\x1b[3B");
        assert_eq!(decoder.cursor().row, 3);
        assert_eq!(decoder.grid().height(), 4);
    }

    #[test]
    fn test_forward_from_pending_wrap_moves_to_next_row() {
        let mut decoder = Decoder::new(4);
        decoder.feed(b"abcd\x1b[2C");
        assert_eq!((decoder.cursor().column, decoder.cursor().row), (2, 1));
    }

    #[test]
    fn test_save_restore() {
        let mut decoder = Decoder::new(80);
        decoder.feed(b"abc\x1b[s\x1b[10;20H\x1b[u");
        assert_eq!((decoder.cursor().column, decoder.cursor().row), (3, 0));
    }

    #[test]
    fn test_restore_without_save_is_noop() {
        let mut decoder = Decoder::new(80);
        decoder.feed(b"abc\x1b[u");
        assert_eq!(decoder.cursor().column, 3);
    }

    #[test]
    fn test_erase_line_modes() {
        let grid = decode(b"abcdef\x1b[3D\x1b[K", 80);
        assert_eq!(row_text(&grid, 0), "abc");
        let grid = decode(b"abcdef\x1b[3D\x1b[1K", 80);
        assert_eq!(row_text(&grid, 0), "    ef");
        let grid = decode(b"abcdef\x1b[2K", 80);
        assert_eq!(row_text(&grid, 0), "");
    }

    #[test]
    fn test_erase_display_all_keeps_height_and_homes() {
        let mut decoder = Decoder::new(80);
        decoder.feed(b"a\r\nb\r\nc\x1b[2J");
        assert_eq!((decoder.cursor().column, decoder.cursor().row), (0, 0));
        let grid = decoder.finish();
        assert_eq!(grid.height(), 3);
        assert!(grid.is_blank());
    }

    #[test]
    fn test_erase_display_below_and_above() {
        let grid = decode(b"aaa\r\nbbb\r\nccc\x1b[2;2H\x1b[J", 80);
        assert_eq!(row_text(&grid, 0), "aaa");
        assert_eq!(row_text(&grid, 1), "b");
        assert_eq!(row_text(&grid, 2), "");

        let grid = decode(b"aaa\r\nbbb\r\nccc\x1b[2;2H\x1b[1J", 80);
        assert_eq!(row_text(&grid, 0), "");
        assert_eq!(row_text(&grid, 1), "  b");
        assert_eq!(row_text(&grid, 2), "ccc");
    }

    #[test]
    fn test_window_and_mode_sequences_are_discarded() {
        let mut decoder = Decoder::new(80);
        decoder.feed(b"\x1b[8;24;80t\x1b[?7h\x1b[?33lY");
        assert_eq!(decoder.discarded(), 3);
        assert_eq!(decoder.cursor().attrs, Attributes::default());
        let grid = decoder.finish();
        assert_eq!(grid.get(0, 0).map(|c| c.glyph), Some('Y'));
        assert_eq!(grid.get(1, 0).map(|c| c.glyph), Some(' '));
    }

    #[test]
    fn test_sub_halts() {
        let mut decoder = Decoder::new(80);
        let consumed = decoder.feed(b"AB\x1aCD");
        assert_eq!(consumed, 3);
        assert!(decoder.is_halted());
        assert_eq!(decoder.halt_offset(), Some(2));
        decoder.feed(b"EF");
        assert_eq!(row_text(decoder.grid(), 0), "AB");
    }

    #[test]
    fn test_halt_offset_spans_feeds() {
        let mut decoder = Decoder::new(80);
        decoder.feed(b"abc");
        decoder.feed(b"d\x1a");
        assert_eq!(decoder.halt_offset(), Some(4));
    }

    #[test]
    fn test_unknown_escape_is_dropped() {
        let grid = decode(b"\x1b(Bok", 80);
        assert_eq!(row_text(&grid, 0), "Bok");
        let grid = decode(b"\x1bcok", 80);
        assert_eq!(row_text(&grid, 0), "ok");
    }

    #[test]
    fn test_application_cursor_keys() {
        let mut decoder = Decoder::new(80);
        decoder.feed(b"\x1b[3;3H\x1bOA\x1bOD");
        assert_eq!((decoder.cursor().column, decoder.cursor().row), (1, 1));
        decoder.feed(b"\x1bOH");
        assert_eq!((decoder.cursor().column, decoder.cursor().row), (0, 0));
    }

    #[test]
    fn test_glyph_byte_cancels_sequence() {
        let grid = decode(b"\x1b[1\xdbX", 80);
        assert_eq!(row_text(&grid, 0), "█X");
    }

    #[test]
    fn test_low_control_bytes_are_glyphs() {
        let grid = decode(&[0x01, 0x03, 0x10], 80);
        assert_eq!(row_text(&grid, 0), "☺♥►");
    }

    #[test]
    fn test_state_after_partial_sequence() {
        let mut decoder = Decoder::new(80);
        decoder.feed(b"\x1b[3");
        assert_eq!(decoder.state(), DecoderState::CsiParams);
        decoder.feed(b"1mX");
        assert_eq!(decoder.state(), DecoderState::Ground);
        assert_eq!(decoder.grid().get(0, 0).unwrap().attrs.fg, Color::Standard(1));
    }
}
