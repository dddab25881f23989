//! Colour types and palettes for ANSI art cells.

use serde::Serialize;

/// RGB colour value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS hex notation, e.g. `#aa5500`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    fn distance_squared(self, other: Rgb) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }
}

/// An indexed colour as selected by an SGR parameter.
///
/// The variant remembers *how* the colour was selected so the encoder can
/// reproduce the narrowest code: `Standard` came from 30–37/40–47, `Bright`
/// from 90–97/100–107 and `Indexed` from the `38;5;N`/`48;5;N` forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// Standard palette entry, 0..=7.
    Standard(u8),
    /// Explicit bright palette entry, 0..=7.
    Bright(u8),
    /// 256-colour palette index.
    Indexed(u8),
}

impl Color {
    /// Default foreground (SGR 37).
    pub const DEFAULT_FG: Color = Color::Standard(7);
    /// Default background (SGR 40).
    pub const DEFAULT_BG: Color = Color::Standard(0);

    /// Position in the 256-colour palette.
    pub fn palette_index(self) -> u8 {
        match self {
            Color::Standard(n) => n & 7,
            Color::Bright(n) => (n & 7) + 8,
            Color::Indexed(n) => n,
        }
    }

    /// SGR parameter(s) selecting this colour as foreground.
    pub fn fg_code(self) -> String {
        match self {
            Color::Standard(n) => (30 + (n & 7) as u16).to_string(),
            Color::Bright(n) => (90 + (n & 7) as u16).to_string(),
            Color::Indexed(n) => format!("38;5;{}", n),
        }
    }

    /// SGR parameter(s) selecting this colour as background.
    pub fn bg_code(self) -> String {
        match self {
            Color::Standard(n) => (40 + (n & 7) as u16).to_string(),
            Color::Bright(n) => (100 + (n & 7) as u16).to_string(),
            Color::Indexed(n) => format!("48;5;{}", n),
        }
    }

    /// Human-readable name for the 16 base colours, `None` for 256-colour
    /// indices.
    pub fn name(self) -> Option<&'static str> {
        const NAMES: [&str; 8] = [
            "black", "red", "green", "yellow", "blue", "magenta", "cyan", "white",
        ];
        const BRIGHT_NAMES: [&str; 8] = [
            "bright_black",
            "bright_red",
            "bright_green",
            "bright_yellow",
            "bright_blue",
            "bright_magenta",
            "bright_cyan",
            "bright_white",
        ];
        match self {
            Color::Standard(n) => Some(NAMES[(n & 7) as usize]),
            Color::Bright(n) => Some(BRIGHT_NAMES[(n & 7) as usize]),
            Color::Indexed(_) => None,
        }
    }

    /// Resolve to RGB using the VGA palette for the first 16 entries and the
    /// xterm cube / grey ramp for the rest.
    pub fn to_rgb(self) -> Rgb {
        palette_rgb(self.palette_index())
    }
}

/// The 16-colour VGA text-mode palette used by BBS art.
pub const VGA_PALETTE: [Rgb; 16] = [
    Rgb::new(0x00, 0x00, 0x00), // Black
    Rgb::new(0xaa, 0x00, 0x00), // Red
    Rgb::new(0x00, 0xaa, 0x00), // Green
    Rgb::new(0xaa, 0x55, 0x00), // Brown
    Rgb::new(0x00, 0x00, 0xaa), // Blue
    Rgb::new(0xaa, 0x00, 0xaa), // Magenta
    Rgb::new(0x00, 0xaa, 0xaa), // Cyan
    Rgb::new(0xaa, 0xaa, 0xaa), // Light grey
    Rgb::new(0x55, 0x55, 0x55), // Dark grey
    Rgb::new(0xff, 0x55, 0x55), // Bright red
    Rgb::new(0x55, 0xff, 0x55), // Bright green
    Rgb::new(0xff, 0xff, 0x55), // Yellow
    Rgb::new(0x55, 0x55, 0xff), // Bright blue
    Rgb::new(0xff, 0x55, 0xff), // Bright magenta
    Rgb::new(0x55, 0xff, 0xff), // Bright cyan
    Rgb::new(0xff, 0xff, 0xff), // White
];

/// Resolve a 256-colour palette index to RGB.
pub fn palette_rgb(index: u8) -> Rgb {
    let idx = index as usize;
    if idx < 16 {
        VGA_PALETTE[idx]
    } else if idx < 232 {
        // 216-colour cube (indices 16..232).
        let n = idx - 16;
        let level = |v: usize| if v == 0 { 0u8 } else { (55 + 40 * v) as u8 };
        Rgb::new(level((n / 36) % 6), level((n / 6) % 6), level(n % 6))
    } else {
        // Grayscale ramp (indices 232..256).
        let v = (8 + 10 * (idx - 232)) as u8;
        Rgb::new(v, v, v)
    }
}

/// Nearest of the 16 VGA colours, expressed as the SGR-style [`Color`].
pub fn nearest_ansi16(rgb: Rgb) -> Color {
    let best = VGA_PALETTE
        .iter()
        .enumerate()
        .min_by_key(|(_, candidate)| rgb.distance_squared(**candidate))
        .map(|(i, _)| i as u8)
        .unwrap_or(0);
    if best < 8 {
        Color::Standard(best)
    } else {
        Color::Bright(best - 8)
    }
}
