//! Grid → ANSI re-serialization.
//!
//! Cells are walked in row-major order and an SGR sequence is written only
//! when the attributes of the next cell differ from what was last emitted.
//! The output is accepted by [`super::decoder::Decoder`], which makes
//! encode → decode → encode stable on anything the encoder produced.

use std::convert::Infallible;

use super::cp437;
use crate::grid::{Attributes, Color, Grid};

/// Full attribute reset.
pub const RESET: &str = "\x1b[0m";

/// Errors that can occur while encoding a grid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    #[error("glyph {glyph:?} at row {row}, column {column} has no safe CP437 byte")]
    UnmappableGlyph {
        glyph: char,
        row: usize,
        column: usize,
    },
}

/// Row separator written between rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// `\r\n`, the DOS convention the decoder needs to return to column 0.
    #[default]
    CrLf,
    /// `\n`, for display on a cooked terminal. Output is display-only: the
    /// decoder keeps the column on a bare LF, so rows after the first come
    /// back shifted.
    Lf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::CrLf => "\r\n",
            LineEnding::Lf => "\n",
        }
    }
}

/// Encoder settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Write the default background (black) as `49` instead of `40`, so
    /// terminals with a dark-grey rendering of "black" show their own
    /// background instead.
    pub black_background_as_default: bool,
    /// Keep 24-bit colour; when false RGB is reduced to the 16 VGA colours.
    pub true_color: bool,
    pub line_ending: LineEnding,
    /// Substitute for glyphs that have no byte in the target encoding.
    /// `None` makes such glyphs an error.
    pub replacement: Option<char>,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            black_background_as_default: true,
            true_color: true,
            line_ending: LineEnding::CrLf,
            replacement: None,
        }
    }
}

/// Destination for encoder output.
///
/// Control sequences are always ASCII; glyphs may need translating. A sink
/// that accepts every glyph uses [`Infallible`] as its error.
pub trait GlyphSink {
    type Error;

    fn control(&mut self, seq: &str);

    /// Write the glyph of the cell at (`column`, `row`).
    fn glyph(&mut self, glyph: char, row: usize, column: usize) -> Result<(), Self::Error>;
}

/// Bytes the decoder treats as controls in ground state. A glyph that maps
/// to one of them cannot be written without changing the meaning.
const GROUND_CONTROLS: [u8; 5] = [0x09, 0x0A, 0x0D, 0x1A, 0x1B];

/// CP437 byte output.
#[derive(Debug, Default)]
pub struct Cp437Sink {
    bytes: Vec<u8>,
    replacement: Option<u8>,
}

impl Cp437Sink {
    pub fn new(replacement: Option<char>) -> Self {
        let replacement = replacement.map(|c| match cp437::to_byte(c) {
            Ok(b) if !GROUND_CONTROLS.contains(&b) => b,
            _ => b'?',
        });
        Self {
            bytes: Vec::new(),
            replacement,
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl GlyphSink for Cp437Sink {
    type Error = EncodeError;

    fn control(&mut self, seq: &str) {
        self.bytes.extend_from_slice(seq.as_bytes());
    }

    fn glyph(&mut self, glyph: char, row: usize, column: usize) -> Result<(), EncodeError> {
        let byte = cp437::to_byte(glyph)
            .ok()
            .filter(|b| !GROUND_CONTROLS.contains(b));
        match (byte, self.replacement) {
            (Some(b), _) | (None, Some(b)) => {
                self.bytes.push(b);
                Ok(())
            }
            (None, None) => Err(EncodeError::UnmappableGlyph { glyph, row, column }),
        }
    }
}

/// UTF-8 output for display on a modern terminal. Never fails.
#[derive(Debug, Default)]
pub struct Utf8Sink {
    text: String,
}

impl Utf8Sink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl GlyphSink for Utf8Sink {
    type Error = Infallible;

    fn control(&mut self, seq: &str) {
        self.text.push_str(seq);
    }

    fn glyph(&mut self, glyph: char, _row: usize, _column: usize) -> Result<(), Infallible> {
        // Terminals do not advance the cursor for NUL.
        self.text.push(if glyph == '\0' { ' ' } else { glyph });
        Ok(())
    }
}

/// Walks a grid and writes the minimal attribute transitions to a sink.
#[derive(Debug)]
pub struct Encoder<'a> {
    options: &'a EncodeOptions,
}

impl<'a> Encoder<'a> {
    pub fn new(options: &'a EncodeOptions) -> Self {
        Self { options }
    }

    /// Encode `grid` into `sink`.
    ///
    /// # Errors
    /// Stops at the first glyph the sink rejects and returns its error.
    pub fn encode<S: GlyphSink>(&self, grid: &Grid, sink: &mut S) -> Result<(), S::Error> {
        let mut last = Attributes::default();

        for (y, row) in grid.rows().enumerate() {
            if y > 0 {
                // A later erase-to-end-of-line must not inherit this row's
                // background.
                if !last.is_default() {
                    sink.control(RESET);
                    last = Attributes::default();
                }
                sink.control(self.options.line_ending.as_str());
            }

            let end = row.iter().rposition(|c| !c.is_blank()).map_or(0, |i| i + 1);
            for (x, cell) in row[..end].iter().enumerate() {
                let attrs = if self.options.true_color {
                    cell.attrs
                } else {
                    cell.attrs.to_ansi16()
                };
                if attrs != last {
                    let sgr = self.transition(&last, &attrs);
                    sink.control(&sgr);
                    last = attrs;
                }
                sink.glyph(cell.glyph, y, x)?;
            }
        }

        sink.control(RESET);
        Ok(())
    }

    /// SGR sequence changing `from` into `to`, naming only what differs.
    pub fn transition(&self, from: &Attributes, to: &Attributes) -> String {
        let mut parts: Vec<String> = Vec::new();

        if from.bold != to.bold {
            parts.push(if to.bold { "1" } else { "22" }.to_string());
        }
        if from.blink != to.blink {
            parts.push(if to.blink { "5" } else { "25" }.to_string());
        }
        if (from.fg, from.fg_rgb) != (to.fg, to.fg_rgb) {
            parts.push(match to.fg_rgb {
                Some(rgb) => format!("38;2;{};{};{}", rgb.r, rgb.g, rgb.b),
                None => to.fg.fg_code(),
            });
        }
        if (from.bg, from.bg_rgb) != (to.bg, to.bg_rgb) {
            parts.push(match to.bg_rgb {
                Some(rgb) => format!("48;2;{};{};{}", rgb.r, rgb.g, rgb.b),
                None if to.bg == Color::DEFAULT_BG && self.options.black_background_as_default => {
                    "49".to_string()
                }
                None => to.bg.bg_code(),
            });
        }

        format!("\x1b[{}m", parts.join(";"))
    }
}

/// Encode a grid to CP437 bytes.
///
/// # Errors
/// Fails on the first glyph without a safe byte unless
/// [`EncodeOptions::replacement`] is set.
pub fn encode(grid: &Grid, options: &EncodeOptions) -> Result<Vec<u8>, EncodeError> {
    let mut sink = Cp437Sink::new(options.replacement);
    Encoder::new(options).encode(grid, &mut sink)?;
    Ok(sink.into_bytes())
}

/// Encode a grid to a UTF-8 string for terminal display.
pub fn encode_to_string(grid: &Grid, options: &EncodeOptions) -> String {
    let mut sink = Utf8Sink::new();
    match Encoder::new(options).encode(grid, &mut sink) {
        Ok(()) => sink.into_string(),
        Err(never) => match never {},
    }
}
