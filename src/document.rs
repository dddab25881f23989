//! A complete artwork: decoded grid plus its metadata record.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::codec::{decode, encode, EncodeError, EncodeOptions};
use crate::grid::{Grid, DEFAULT_WIDTH};
use crate::sauce::{self, DataType, SauceRecord, FILE_TYPE_ANSI};

/// Title field capacity in a SAUCE record.
const TITLE_LEN: usize = 35;

/// Errors raised while loading or saving a document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Decoded artwork with its optional SAUCE record.
#[derive(Debug, Clone)]
pub struct Document {
    pub grid: Grid,
    pub sauce: Option<SauceRecord>,
    /// Width used for decoding.
    pub width: usize,
    pub source_path: Option<PathBuf>,
}

impl Document {
    /// Decode raw file bytes. The width comes from the record when it
    /// declares one, else 80 columns.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::decode_with(bytes, None, DEFAULT_WIDTH)
    }

    /// Decode raw file bytes at an explicit width, ignoring the record's.
    pub fn from_bytes_with_width(bytes: &[u8], width: usize) -> Self {
        Self::decode_with(bytes, Some(width), DEFAULT_WIDTH)
    }

    /// Width precedence: `width`, then the record's declared width, then
    /// `fallback_width`.
    fn decode_with(bytes: &[u8], width: Option<usize>, fallback_width: usize) -> Self {
        let boundary = sauce::locate(bytes);
        let width = width
            .or_else(|| boundary.record.as_ref().and_then(SauceRecord::width))
            .unwrap_or(fallback_width)
            .max(1);
        let grid = decode(boundary.artwork, width);
        log::debug!(
            "decoded {} bytes into {}x{} (sauce: {})",
            boundary.artwork.len(),
            grid.width(),
            grid.height(),
            boundary.record.is_some()
        );
        Self {
            grid,
            sauce: boundary.record,
            width,
            source_path: None,
        }
    }

    /// Load a file from disk.
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        Self::load_with_width(path, None)
    }

    /// Load a file, optionally overriding the decode width.
    pub fn load_with_width(path: &Path, width: Option<usize>) -> Result<Self, DocumentError> {
        Self::load_with(path, width, DEFAULT_WIDTH)
    }

    /// Load a file with an optional forced width and the width to use when
    /// neither that nor the record gives one.
    pub fn load_with(path: &Path, width: Option<usize>, fallback_width: usize) -> Result<Self, DocumentError> {
        let bytes = fs::read(path).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut doc = Self::decode_with(&bytes, width, fallback_width);
        doc.source_path = Some(path.to_path_buf());
        Ok(doc)
    }

    /// Encode back to CP437 bytes, optionally followed by a metadata record.
    ///
    /// When no record is attached one is synthesized from the title and
    /// grid size. The record's file size always reflects the new artwork.
    pub fn to_bytes(&self, options: &EncodeOptions, include_sauce: bool) -> Result<Vec<u8>, DocumentError> {
        let mut data = encode(&self.grid, options)?;
        if include_sauce {
            let mut record = self.sauce.clone().unwrap_or_else(|| self.synthesize_record());
            record.file_size = u32::try_from(data.len()).unwrap_or(u32::MAX);
            record.append_to(&mut data);
        }
        Ok(data)
    }

    /// Encode and write to `path`.
    pub fn save(&self, path: &Path, options: &EncodeOptions, include_sauce: bool) -> Result<(), DocumentError> {
        let data = if self.sauce.is_none() && include_sauce {
            // A new record takes its title from the destination.
            let mut named = self.clone();
            named.source_path = Some(path.to_path_buf());
            named.to_bytes(options, include_sauce)?
        } else {
            self.to_bytes(options, include_sauce)?
        };
        fs::write(path, &data).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("wrote {} bytes to {}", data.len(), path.display());
        Ok(())
    }

    fn synthesize_record(&self) -> SauceRecord {
        let clamp = |n: usize| u16::try_from(n).unwrap_or(u16::MAX);
        SauceRecord {
            title: self.title().chars().take(TITLE_LEN).collect(),
            data_type: DataType::Character,
            file_type: FILE_TYPE_ANSI,
            tinfo1: clamp(self.grid.width()),
            tinfo2: clamp(self.grid.height()),
            ..SauceRecord::default()
        }
    }

    /// Title from the record, else the file stem, else "Untitled".
    pub fn title(&self) -> String {
        if let Some(title) = self.sauce.as_ref().map(|s| s.title.as_str()).filter(|t| !t.is_empty()) {
            return title.to_string();
        }
        self.source_path
            .as_deref()
            .and_then(Path::file_stem)
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Untitled".to_string())
    }

    pub fn author(&self) -> &str {
        self.sauce.as_ref().map_or("", |s| s.author.as_str())
    }

    pub fn group(&self) -> &str {
        self.sauce.as_ref().map_or("", |s| s.group.as_str())
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }
}
