//! Structured JSON rendering.
//!
//! Rows are run-length encoded so the output stays readable:
//!
//! ```json
//! {"width": 80, "height": 1, "rows": [
//!   {"y": 0, "runs": [{"text": "██", "fg": "red", "bg": "black", "bold": true}]}
//! ]}
//! ```

use serde::Serialize;

use super::{runs, Renderer};
use crate::grid::{Attributes, Color, Grid};

/// A palette colour: a name for the 16 base colours, an index otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum JsonColor {
    Name(&'static str),
    Index(u8),
}

impl From<Color> for JsonColor {
    fn from(color: Color) -> Self {
        match color.name() {
            Some(name) => JsonColor::Name(name),
            None => JsonColor::Index(color.palette_index()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonRun {
    pub text: String,
    pub fg: JsonColor,
    pub bg: JsonColor,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub bold: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub blink: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fg_rgb: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bg_rgb: Option<String>,
}

impl JsonRun {
    fn new(text: String, attrs: &Attributes) -> Self {
        Self {
            text,
            fg: attrs.fg.into(),
            bg: attrs.bg.into(),
            bold: attrs.bold,
            blink: attrs.blink,
            fg_rgb: attrs.fg_rgb.map(|c| c.to_hex()),
            bg_rgb: attrs.bg_rgb.map(|c| c.to_hex()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonRow {
    pub y: usize,
    pub runs: Vec<JsonRun>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonGrid {
    pub width: usize,
    pub height: usize,
    pub rows: Vec<JsonRow>,
}

/// Renders a grid as JSON.
#[derive(Debug, Clone)]
pub struct JsonRenderer {
    /// Indent the output.
    pub pretty: bool,
}

impl Default for JsonRenderer {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl JsonRenderer {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Build the serializable structure without rendering it.
    pub fn to_document(&self, grid: &Grid) -> JsonGrid {
        let rows = grid
            .rows()
            .enumerate()
            .map(|(y, row)| JsonRow {
                y,
                runs: runs(row)
                    .into_iter()
                    .map(|run| JsonRun::new(run.text, &run.attrs))
                    .collect(),
            })
            .collect();
        JsonGrid {
            width: grid.width(),
            height: grid.height(),
            rows,
        }
    }
}

impl Renderer for JsonRenderer {
    fn render(&self, grid: &Grid) -> String {
        let document = self.to_document(grid);
        let result = if self.pretty {
            serde_json::to_string_pretty(&document)
        } else {
            serde_json::to_string(&document)
        };
        // Plain structs with string keys always serialize.
        result.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode;
    use serde_json::json;

    #[test]
    fn test_runs_structure() {
        let grid = decode(b"\x1b[1;31mAB\x1b[0mC", 4);
        let value: serde_json::Value =
            serde_json::from_str(&JsonRenderer::new(false).render(&grid)).unwrap();
        assert_eq!(
            value,
            json!({
                "width": 4,
                "height": 1,
                "rows": [{"y": 0, "runs": [
                    {"text": "AB", "fg": "red", "bg": "black", "bold": true},
                    {"text": "C ", "fg": "white", "bg": "black"}
                ]}]
            })
        );
    }

    #[test]
    fn test_indexed_and_rgb_colours() {
        let grid = decode(b"\x1b[38;5;200;48;2;1;2;3mX", 1);
        let document = JsonRenderer::default().to_document(&grid);
        let run = &document.rows[0].runs[0];
        assert_eq!(run.fg, JsonColor::Index(200));
        assert_eq!(run.bg, JsonColor::Name("black"));
        assert_eq!(run.bg_rgb.as_deref(), Some("#010203"));
        assert_eq!(run.fg_rgb, None);
    }
}
