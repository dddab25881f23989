//! Byte-level codec for BBS ANSI art.
//!
//! - [`cp437`] - code page translation between bytes and glyphs
//! - [`decoder`] - escape-sequence state machine building a [`crate::grid::Grid`]
//! - [`encoder`] - minimal re-serialization of a grid
//! - [`sgr`] - colour/attribute parameter handling shared by the above

pub mod cp437;
pub mod decoder;
pub mod encoder;
pub mod sgr;

pub use cp437::{to_byte, to_glyph, UnmappableGlyph};
pub use decoder::{decode, CursorState, Decoder, DecoderState, MAX_ROWS};
pub use encoder::{
    encode, encode_to_string, Cp437Sink, EncodeError, EncodeOptions, Encoder, GlyphSink,
    LineEnding, Utf8Sink, RESET,
};
pub use sgr::apply_sgr;
