//! ansi-art library crate.
//!
//! Decodes BBS-era ANSI art (CP437 bytes plus escape sequences) into a cell
//! grid, reads and writes SAUCE metadata, re-encodes grids with minimal
//! attribute changes, and renders them as text, HTML, JSON or terminal
//! output. New pieces can be drawn with the [`create`] builder.
//!
//! ```
//! use ansi_art::document::Document;
//! use ansi_art::render::{Renderer, TextRenderer};
//!
//! let doc = Document::from_bytes(b"\x1b[1;31mHello\x1b[0m");
//! assert_eq!(TextRenderer::default().render(&doc.grid), "Hello");
//! ```

pub mod codec;
pub mod config;
pub mod create;
pub mod document;
pub mod grid;
pub mod render;
pub mod repair;
pub mod sauce;
