//! Metadata boundary detection and SAUCE parsing.

use chrono::NaiveDate;

use super::record::{DataType, SauceRecord};
use crate::codec::cp437;

/// End-of-file marker separating artwork from metadata.
pub const MARKER: u8 = 0x1A;
pub const SAUCE_ID: &[u8; 5] = b"SAUCE";
pub const COMNT_ID: &[u8; 5] = b"COMNT";
pub const RECORD_SIZE: usize = 128;
pub const COMMENT_LINE_SIZE: usize = 64;

/// Artwork bytes and the metadata found after them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Boundary<'a> {
    /// Bytes before the first marker (or the whole input).
    pub artwork: &'a [u8],
    /// Offset of the first 0x1A byte.
    pub marker_offset: Option<usize>,
    pub record: Option<SauceRecord>,
}

/// Split `data` at the first 0x1A byte and parse what follows.
///
/// Never fails: a missing marker, an unknown signature or a truncated record
/// all yield `record: None`.
pub fn locate(data: &[u8]) -> Boundary<'_> {
    match data.iter().position(|&b| b == MARKER) {
        Some(offset) => {
            let record = parse_trailer(&data[offset + 1..]);
            if record.is_none() {
                log::debug!("marker at {} without a SAUCE record", offset);
            }
            Boundary {
                artwork: &data[..offset],
                marker_offset: Some(offset),
                record,
            }
        }
        None => Boundary {
            artwork: data,
            marker_offset: None,
            record: None,
        },
    }
}

/// Parse the bytes that follow the marker.
///
/// They must begin with `SAUCE` or with a `COMNT` block; the record itself is
/// the final 128 bytes.
pub fn parse_trailer(trailer: &[u8]) -> Option<SauceRecord> {
    if !(trailer.starts_with(SAUCE_ID) || trailer.starts_with(COMNT_ID)) {
        return None;
    }
    if trailer.len() < RECORD_SIZE {
        return None;
    }

    let record_start = trailer.len() - RECORD_SIZE;
    let record_start = if trailer[record_start..].starts_with(SAUCE_ID) {
        record_start
    } else if trailer.starts_with(SAUCE_ID) {
        0
    } else {
        return None;
    };

    let mut record = parse_record(&trailer[record_start..record_start + RECORD_SIZE])?;
    record.comments = parse_comments(&trailer[..record_start], record_comment_count(trailer, record_start));
    Some(record)
}

fn record_comment_count(trailer: &[u8], record_start: usize) -> usize {
    trailer[record_start + 104] as usize
}

/// Read `count` comment lines from a `COMNT` block that ends where `before`
/// ends. Missing or misplaced blocks give no comments.
fn parse_comments(before: &[u8], count: usize) -> Vec<String> {
    if count == 0 {
        return Vec::new();
    }
    let block_size = COMNT_ID.len() + count * COMMENT_LINE_SIZE;
    if before.len() < block_size {
        log::warn!("SAUCE declares {} comment lines but the block is missing", count);
        return Vec::new();
    }
    let block = &before[before.len() - block_size..];
    if !block.starts_with(COMNT_ID) {
        log::warn!("SAUCE comment block signature not found");
        return Vec::new();
    }
    block[COMNT_ID.len()..]
        .chunks(COMMENT_LINE_SIZE)
        .map(text_field)
        .collect()
}

/// Parse one 128-byte record.
pub fn parse_record(data: &[u8]) -> Option<SauceRecord> {
    if data.len() < RECORD_SIZE || !data.starts_with(SAUCE_ID) {
        return None;
    }
    let u16_at = |i: usize| u16::from_le_bytes([data[i], data[i + 1]]);

    let date = std::str::from_utf8(&data[82..90])
        .ok()
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y%m%d").ok());

    Some(SauceRecord {
        version: cp437::decode_str(&data[5..7]),
        title: text_field(&data[7..42]),
        author: text_field(&data[42..62]),
        group: text_field(&data[62..82]),
        date,
        file_size: u32::from_le_bytes([data[90], data[91], data[92], data[93]]),
        data_type: DataType::from_byte(data[94]),
        file_type: data[95],
        tinfo1: u16_at(96),
        tinfo2: u16_at(98),
        tinfo3: u16_at(100),
        tinfo4: u16_at(102),
        flags: data[105],
        font: text_field(&data[106..128]),
        comments: Vec::new(),
    })
}

/// Decode a fixed-width CP437 field, dropping NUL/space padding.
fn text_field(raw: &[u8]) -> String {
    let end = raw
        .iter()
        .rposition(|&b| b != 0 && b != b' ')
        .map_or(0, |i| i + 1);
    cp437::decode_str(&raw[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_bytes(title: &str, comments: u8) -> Vec<u8> {
        let mut data = Vec::with_capacity(RECORD_SIZE);
        data.extend_from_slice(b"SAUCE00");
        let mut field = title.as_bytes().to_vec();
        field.resize(35, b' ');
        data.extend_from_slice(&field);
        data.extend_from_slice(&[b' '; 40]);
        data.extend_from_slice(b"19960412");
        data.extend_from_slice(&1234u32.to_le_bytes());
        data.push(1);
        data.push(1);
        data.extend_from_slice(&80u16.to_le_bytes());
        data.extend_from_slice(&25u16.to_le_bytes());
        data.extend_from_slice(&[0; 4]);
        data.push(comments);
        data.push(1);
        let mut font = b"IBM VGA".to_vec();
        font.resize(22, 0);
        data.extend_from_slice(&font);
        data
    }

    #[test]
    fn test_parse_record_fields() {
        let record = parse_record(&record_bytes("Night Drive", 0)).unwrap();
        assert_eq!(record.version, "00");
        assert_eq!(record.title, "Night Drive");
        assert_eq!(record.author, "");
        assert_eq!(record.date, NaiveDate::from_ymd_opt(1996, 4, 12));
        assert_eq!(record.file_size, 1234);
        assert_eq!(record.data_type, DataType::Character);
        assert_eq!(record.tinfo1, 80);
        assert_eq!(record.tinfo2, 25);
        assert!(record.ice_colors());
        assert_eq!(record.font, "IBM VGA");
    }

    #[test]
    fn test_locate_without_marker() {
        let boundary = locate(b"plain art");
        assert_eq!(boundary.artwork, b"plain art");
        assert_eq!(boundary.marker_offset, None);
        assert!(boundary.record.is_none());
    }

    #[test]
    fn test_locate_with_record() {
        let mut data = b"AB".to_vec();
        data.push(MARKER);
        data.extend(record_bytes("T", 0));
        let boundary = locate(&data);
        assert_eq!(boundary.artwork, b"AB");
        assert_eq!(boundary.marker_offset, Some(2));
        assert_eq!(boundary.record.map(|r| r.title), Some("T".to_string()));
    }

    #[test]
    fn test_locate_with_bad_signature() {
        let mut data = b"AB".to_vec();
        data.push(MARKER);
        data.extend_from_slice(b"SAUCY");
        let boundary = locate(&data);
        assert_eq!(boundary.artwork, b"AB");
        assert!(boundary.record.is_none());
    }

    #[test]
    fn test_truncated_record_is_absent() {
        let mut data = b"AB".to_vec();
        data.push(MARKER);
        data.extend_from_slice(&record_bytes("T", 0)[..60]);
        assert!(locate(&data).record.is_none());
    }

    #[test]
    fn test_comments_are_read() {
        let mut data = b"X".to_vec();
        data.push(MARKER);
        data.extend_from_slice(COMNT_ID);
        for line in ["greets to all", "call my board"] {
            let mut raw = line.as_bytes().to_vec();
            raw.resize(COMMENT_LINE_SIZE, b' ');
            data.extend(raw);
        }
        data.extend(record_bytes("T", 2));
        let record = locate(&data).record.unwrap();
        assert_eq!(record.comments, vec!["greets to all", "call my board"]);
    }

    #[test]
    fn test_missing_comment_block_yields_no_comments() {
        let mut data = b"X".to_vec();
        data.push(MARKER);
        data.extend(record_bytes("T", 3));
        let record = locate(&data).record.unwrap();
        assert!(record.comments.is_empty());
    }
}
