//! HTML rendering with inline styles.

use super::{runs, Renderer};
use crate::grid::{Attributes, Color, Grid, Paint, VGA_PALETTE};

/// Renders a grid as a `<pre>` block, one `<span>` per attribute run.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    pub css_class: String,
    pub font_family: String,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self {
            css_class: "ansi-art".to_string(),
            font_family: "monospace".to_string(),
        }
    }
}

impl HtmlRenderer {
    pub fn new(css_class: impl Into<String>, font_family: impl Into<String>) -> Self {
        Self {
            css_class: css_class.into(),
            font_family: font_family.into(),
        }
    }

    fn span(&self, text: &str, attrs: &Attributes) -> String {
        let mut style = vec![format!("color: {}", foreground_css(attrs))];
        if !attrs.has_default_bg() {
            style.push(format!("background-color: {}", attrs.effective_bg().to_rgb().to_hex()));
        }
        if attrs.bold {
            style.push("font-weight: bold".to_string());
        }
        if attrs.blink {
            style.push("text-decoration: blink".to_string());
        }
        format!("<span style=\"{}\">{}</span>", style.join("; "), escape(text))
    }
}

impl Renderer for HtmlRenderer {
    fn render(&self, grid: &Grid) -> String {
        let body: Vec<String> = grid
            .rows()
            .map(|row| {
                let end = row.iter().rposition(|c| !c.is_blank()).map_or(0, |i| i + 1);
                runs(&row[..end])
                    .iter()
                    .map(|run| self.span(&run.text, &run.attrs))
                    .collect::<String>()
            })
            .collect();

        format!(
            "<pre class=\"{}\" style=\"font-family: {}; background-color: #000000; color: #aaaaaa;\">\n{}\n</pre>",
            escape(&self.css_class),
            escape(&self.font_family),
            body.join("\n")
        )
    }
}

/// Foreground colour; bold selects the bright variant of a standard colour.
fn foreground_css(attrs: &Attributes) -> String {
    match attrs.effective_fg() {
        Paint::Palette(Color::Standard(n)) if attrs.bold => VGA_PALETTE[(n & 7) as usize + 8].to_hex(),
        paint => paint.to_rgb().to_hex(),
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode;

    #[test]
    fn test_escapes_markup() {
        let grid = decode(b"<a & \"b\">", 20);
        let html = HtmlRenderer::default().render(&grid);
        assert!(html.contains("&lt;a &amp; &quot;b&quot;&gt;"));
    }

    #[test]
    fn test_one_span_per_run() {
        let grid = decode(b"\x1b[31mAB\x1b[32mCD", 10);
        let html = HtmlRenderer::default().render(&grid);
        assert_eq!(html.matches("<span").count(), 2);
        assert!(html.contains("<span style=\"color: #aa0000\">AB</span>"));
        assert!(html.contains("<span style=\"color: #00aa00\">CD</span>"));
    }

    #[test]
    fn test_bold_brightens_standard_foreground() {
        let grid = decode(b"\x1b[1;31mX", 10);
        let html = HtmlRenderer::default().render(&grid);
        assert!(html.contains("color: #ff5555; font-weight: bold"));
    }

    #[test]
    fn test_background_rgb_and_blink() {
        let grid = decode(b"\x1b[5;48;2;16;32;48mX", 10);
        let html = HtmlRenderer::default().render(&grid);
        assert!(html.contains("background-color: #102030"));
        assert!(html.contains("text-decoration: blink"));
    }

    #[test]
    fn test_256_colour_uses_cube() {
        let grid = decode(b"\x1b[38;5;196mX", 10);
        let html = HtmlRenderer::default().render(&grid);
        assert!(html.contains("color: #ff0000"));
    }

    #[test]
    fn test_wrapper_uses_class() {
        let html = HtmlRenderer::new("art", "Courier").render(&decode(b"x", 4));
        assert!(html.starts_with("<pre class=\"art\" style=\"font-family: Courier;"));
        assert!(html.ends_with("</pre>"));
    }
}
