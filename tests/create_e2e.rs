//! Builder output through the encoder, the decoder and the file system.

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use ansi_art::codec::{decode, encode, EncodeOptions};
use ansi_art::create::{create, BoxStyle};
use ansi_art::document::Document;
use ansi_art::grid::{Color, Grid, Rgb};
use ansi_art::render::{Renderer, TextRenderer};

/// A framed title card using bold, background, true colour and CP437 shades.
fn title_card() -> Grid {
    create(24)
        .draw_box(0, 0, 24, 4, BoxStyle::Double)
        .move_to(2, 1)
        .fg(Color::Standard(3))
        .bold(true)
        .text("ANSI ART")
        .reset()
        .move_to(2, 2)
        .bg(Color::Standard(4))
        .fill('▒', 6)
        .fg_rgb(Rgb::new(10, 200, 30))
        .text("rgb")
        .build()
}

// ==================== Round Trip Tests ====================

#[test]
fn test_builder_grid_survives_encode_decode() {
    let grid = title_card();
    let bytes = encode(&grid, &EncodeOptions::default()).unwrap();
    assert_eq!(decode(&bytes, 24), grid);
}

#[test]
fn test_builder_text_render() {
    let text = TextRenderer::default().render(&title_card());
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], format!("╔{}╗", "═".repeat(22)));
    assert_eq!(lines[1], "║ ANSI ART             ║");
    assert_eq!(lines[2], "║ ▒▒▒▒▒▒rgb            ║");
    assert_eq!(lines[3], format!("╚{}╝", "═".repeat(22)));
}

// ==================== Document Tests ====================

#[test]
fn test_builder_document_saves_and_reloads() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("card.ans");
    let doc = create(24)
        .draw_box(0, 0, 24, 4, BoxStyle::Double)
        .move_to(2, 1)
        .text("ANSI ART")
        .into_document("Title Card", "builder", "");
    doc.save(&path, &EncodeOptions::default(), true).unwrap();

    let reloaded = Document::load(&path).unwrap();
    assert_eq!(reloaded.width, 24);
    assert_eq!(reloaded.title(), "Title Card");
    assert_eq!(reloaded.author(), "builder");
    assert_eq!(reloaded.grid, doc.grid);
}
