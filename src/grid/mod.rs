//! In-memory model of a decoded artwork: cells, attributes and colours.

mod cell;
mod color;
#[allow(clippy::module_inception)]
mod grid;

pub use cell::{Attributes, Cell, Paint};
pub use color::{nearest_ansi16, palette_rgb, Color, Rgb, VGA_PALETTE};
pub use grid::{Grid, DEFAULT_WIDTH};
