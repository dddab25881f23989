//! Byte-level cleanup of sequences that misbehave on modern terminals.
//!
//! Window manipulation (`CSI … t`), private mode set/reset (`CSI ? … h/l`)
//! and scroll regions (`CSI … r`) are dropped. Every other byte, including
//! colour sequences and the metadata trailer, is kept untouched.

use std::fs;
use std::path::{Path, PathBuf};

use crate::document::DocumentError;
use crate::sauce::MARKER;

const ESC: u8 = 0x1B;

/// What a cleaning pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CleanReport {
    pub original_size: usize,
    pub cleaned_size: usize,
    pub sequences_removed: usize,
}

impl CleanReport {
    pub fn was_modified(&self) -> bool {
        self.sequences_removed > 0
    }
}

/// Remove problematic sequences from raw artwork bytes.
///
/// Scanning stops at the first 0x1A so a metadata record is copied verbatim.
pub fn clean_bytes(data: &[u8]) -> (Vec<u8>, CleanReport) {
    let art_end = data.iter().position(|&b| b == MARKER).unwrap_or(data.len());
    let mut out = Vec::with_capacity(data.len());
    let mut removed = 0;
    let mut i = 0;

    while i < art_end {
        if data[i] == ESC && data.get(i + 1) == Some(&b'[') {
            if let Some((end, drop)) = scan_csi(&data[..art_end], i + 2) {
                if drop {
                    removed += 1;
                } else {
                    out.extend_from_slice(&data[i..end]);
                }
                i = end;
                continue;
            }
        }
        out.push(data[i]);
        i += 1;
    }
    out.extend_from_slice(&data[art_end..]);

    if removed > 0 {
        log::debug!("removed {} sequences", removed);
    }
    let report = CleanReport {
        original_size: data.len(),
        cleaned_size: out.len(),
        sequences_removed: removed,
    };
    (out, report)
}

/// Find the end of a CSI sequence whose parameters start at `start`.
/// Returns the offset past the final byte and whether to drop it.
fn scan_csi(data: &[u8], start: usize) -> Option<(usize, bool)> {
    let mut j = start;
    let private = data.get(j) == Some(&b'?');
    if private {
        j += 1;
    }
    while j < data.len() && (data[j].is_ascii_digit() || data[j] == b';') {
        j += 1;
    }
    let final_byte = *data.get(j)?;
    let drop = match final_byte {
        b't' | b'r' => true,
        b'h' | b'l' => private,
        _ => false,
    };
    Some((j + 1, drop))
}

/// Clean a file. Without an explicit output, writes `<stem>_clean.<ext>`
/// next to the input.
pub fn clean_file(input: &Path, output: Option<&Path>) -> Result<(PathBuf, CleanReport), DocumentError> {
    let output = match output {
        Some(path) => path.to_path_buf(),
        None => default_clean_path(input),
    };
    let data = fs::read(input).map_err(|source| DocumentError::Io {
        path: input.to_path_buf(),
        source,
    })?;
    let (cleaned, report) = clean_bytes(&data);
    fs::write(&output, cleaned).map_err(|source| DocumentError::Io {
        path: output.clone(),
        source,
    })?;
    log::info!(
        "cleaned {} -> {} ({} sequences removed)",
        input.display(),
        output.display(),
        report.sequences_removed
    );
    Ok((output, report))
}

fn default_clean_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match input.extension() {
        Some(ext) => format!("{}_clean.{}", stem, ext.to_string_lossy()),
        None => format!("{}_clean", stem),
    };
    input.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_window_and_mode_sequences() {
        let input = b"\x1b[?7h\x1b[8;25;80tA\x1b[1;24r\x1b[31mB\x1b[?25l";
        let (out, report) = clean_bytes(input);
        assert_eq!(out, b"A\x1b[31mB");
        assert_eq!(report.sequences_removed, 4);
        assert_eq!(report.original_size, input.len());
        assert_eq!(report.cleaned_size, out.len());
        assert!(report.was_modified());
    }

    #[test]
    fn test_keeps_public_mode_sequences() {
        let (out, report) = clean_bytes(b"\x1b[4hX");
        assert_eq!(out, b"\x1b[4hX");
        assert!(!report.was_modified());
    }

    #[test]
    fn test_trailer_untouched() {
        let mut input = b"A\x1b[8;1;1t".to_vec();
        input.push(MARKER);
        input.extend_from_slice(b"SAUCE\x1b[1t");
        let (out, _) = clean_bytes(&input);
        let mut expected = b"A".to_vec();
        expected.push(MARKER);
        expected.extend_from_slice(b"SAUCE\x1b[1t");
        assert_eq!(out, expected);
    }

    #[test]
    fn test_unterminated_csi_kept() {
        let (out, report) = clean_bytes(b"X\x1b[12");
        assert_eq!(out, b"X\x1b[12");
        assert_eq!(report.sequences_removed, 0);
    }

    #[test]
    fn test_default_clean_path() {
        assert_eq!(
            default_clean_path(Path::new("/tmp/art/logo.ans")),
            PathBuf::from("/tmp/art/logo_clean.ans")
        );
    }
}
