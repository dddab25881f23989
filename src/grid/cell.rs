//! Cell and attribute types.

use super::color::{nearest_ansi16, Color, Rgb};

/// Rendering attributes shared by the decoder's pen and every cell.
///
/// An RGB value, when present, takes precedence over the indexed colour on
/// the same channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Attributes {
    pub fg: Color,
    pub bg: Color,
    pub fg_rgb: Option<Rgb>,
    pub bg_rgb: Option<Rgb>,
    pub bold: bool,
    pub blink: bool,
}

impl Default for Attributes {
    fn default() -> Self {
        Self {
            fg: Color::DEFAULT_FG,
            bg: Color::DEFAULT_BG,
            fg_rgb: None,
            bg_rgb: None,
            bold: false,
            blink: false,
        }
    }
}

/// Colour that actually gets rendered on a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    Palette(Color),
    Rgb(Rgb),
}

impl Paint {
    pub fn to_rgb(self) -> Rgb {
        match self {
            Paint::Palette(color) => color.to_rgb(),
            Paint::Rgb(rgb) => rgb,
        }
    }
}

impl Attributes {
    /// Select an indexed foreground, dropping any RGB override.
    pub fn set_fg(&mut self, color: Color) {
        self.fg = color;
        self.fg_rgb = None;
    }

    /// Select an indexed background, dropping any RGB override.
    pub fn set_bg(&mut self, color: Color) {
        self.bg = color;
        self.bg_rgb = None;
    }

    /// Select a true-colour foreground; the indexed slot returns to default.
    pub fn set_fg_rgb(&mut self, rgb: Rgb) {
        self.fg = Color::DEFAULT_FG;
        self.fg_rgb = Some(rgb);
    }

    /// Select a true-colour background; the indexed slot returns to default.
    pub fn set_bg_rgb(&mut self, rgb: Rgb) {
        self.bg = Color::DEFAULT_BG;
        self.bg_rgb = Some(rgb);
    }

    pub fn effective_fg(&self) -> Paint {
        match self.fg_rgb {
            Some(rgb) => Paint::Rgb(rgb),
            None => Paint::Palette(self.fg),
        }
    }

    pub fn effective_bg(&self) -> Paint {
        match self.bg_rgb {
            Some(rgb) => Paint::Rgb(rgb),
            None => Paint::Palette(self.bg),
        }
    }

    pub fn is_default(&self) -> bool {
        *self == Attributes::default()
    }

    /// Whether the background renders as the default (terminal) background.
    pub fn has_default_bg(&self) -> bool {
        self.bg_rgb.is_none() && self.bg == Color::DEFAULT_BG
    }

    /// Copy with RGB channels quantized to the nearest 16-colour entry.
    pub fn to_ansi16(self) -> Attributes {
        let mut out = self;
        if let Some(rgb) = self.fg_rgb {
            out.set_fg(nearest_ansi16(rgb));
        }
        if let Some(rgb) = self.bg_rgb {
            out.set_bg(nearest_ansi16(rgb));
        }
        out
    }
}

/// One screen position: a glyph plus its attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub glyph: char,
    pub attrs: Attributes,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            glyph: ' ',
            attrs: Attributes::default(),
        }
    }
}

impl Cell {
    pub fn new(glyph: char, attrs: Attributes) -> Self {
        Self { glyph, attrs }
    }

    /// A space on the default background; invisible whatever its foreground.
    pub fn is_blank(&self) -> bool {
        self.glyph == ' ' && self.attrs.has_default_bg()
    }
}
