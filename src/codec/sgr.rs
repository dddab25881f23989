//! SGR (Select Graphic Rendition) parameter interpretation.

use crate::grid::{Attributes, Color, Rgb};

/// Apply an `m` parameter list to the pen, left to right.
///
/// An empty list means reset. Unknown codes are skipped one at a time so a
/// single vendor code never spoils the rest of the list. The extended
/// colour forms `38;5;N` / `38;2;R;G;B` (and their `48` twins) consume their
/// arguments as one unit; a truncated form consumes what is left and changes
/// nothing.
pub fn apply_sgr(attrs: &mut Attributes, params: &[u16]) {
    if params.is_empty() {
        *attrs = Attributes::default();
        return;
    }

    let mut i = 0;
    while i < params.len() {
        let p = params[i];
        match p {
            0 => *attrs = Attributes::default(),
            1 => attrs.bold = true,
            22 => attrs.bold = false,
            5 => attrs.blink = true,
            25 => attrs.blink = false,
            30..=37 => attrs.set_fg(Color::Standard((p - 30) as u8)),
            39 => attrs.set_fg(Color::DEFAULT_FG),
            40..=47 => attrs.set_bg(Color::Standard((p - 40) as u8)),
            49 => attrs.set_bg(Color::DEFAULT_BG),
            90..=97 => attrs.set_fg(Color::Bright((p - 90) as u8)),
            100..=107 => attrs.set_bg(Color::Bright((p - 100) as u8)),
            38 | 48 => {
                let (extended, used) = parse_extended(&params[i + 1..]);
                match (p, extended) {
                    (38, Some(Extended::Indexed(n))) => attrs.set_fg(Color::Indexed(n)),
                    (38, Some(Extended::Rgb(rgb))) => attrs.set_fg_rgb(rgb),
                    (48, Some(Extended::Indexed(n))) => attrs.set_bg(Color::Indexed(n)),
                    (48, Some(Extended::Rgb(rgb))) => attrs.set_bg_rgb(rgb),
                    _ => {}
                }
                i += used;
            }
            _ => log::trace!("ignoring SGR code {}", p),
        }
        i += 1;
    }
}

enum Extended {
    Indexed(u8),
    Rgb(Rgb),
}

/// Parse the arguments following a `38`/`48`. Returns the colour (if valid)
/// and how many parameters were consumed.
fn parse_extended(rest: &[u16]) -> (Option<Extended>, usize) {
    match rest.first() {
        Some(5) => {
            if rest.len() < 2 {
                return (None, rest.len());
            }
            let color = u8::try_from(rest[1]).ok().map(Extended::Indexed);
            (color, 2)
        }
        Some(2) => {
            if rest.len() < 4 {
                return (None, rest.len());
            }
            let channel = |v: u16| u8::try_from(v).ok();
            let color = match (channel(rest[1]), channel(rest[2]), channel(rest[3])) {
                (Some(r), Some(g), Some(b)) => Some(Extended::Rgb(Rgb::new(r, g, b))),
                _ => None,
            };
            (color, 4)
        }
        // Unknown colour space: leave the following parameter to the loop.
        _ => (None, 0),
    }
}
