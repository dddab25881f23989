//! SAUCE serialization.

use chrono::Local;

use super::reader::{COMMENT_LINE_SIZE, COMNT_ID, MARKER, RECORD_SIZE, SAUCE_ID};
use super::record::SauceRecord;
use crate::codec::cp437;

/// The comment count is a single byte.
const MAX_COMMENTS: usize = 255;

impl SauceRecord {
    /// Serialize the 128-byte record. A missing date is written as today.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(RECORD_SIZE);
        out.extend_from_slice(SAUCE_ID);
        push_field(&mut out, &self.version, 2, b'0');
        push_field(&mut out, &self.title, 35, b' ');
        push_field(&mut out, &self.author, 20, b' ');
        push_field(&mut out, &self.group, 20, b' ');
        let date = self.date.unwrap_or_else(|| Local::now().date_naive());
        push_field(&mut out, &date.format("%Y%m%d").to_string(), 8, b' ');
        out.extend_from_slice(&self.file_size.to_le_bytes());
        out.push(self.data_type.to_byte());
        out.push(self.file_type);
        for info in [self.tinfo1, self.tinfo2, self.tinfo3, self.tinfo4] {
            out.extend_from_slice(&info.to_le_bytes());
        }
        out.push(self.comments.len().min(MAX_COMMENTS) as u8);
        out.push(self.flags);
        push_field(&mut out, &self.font, 22, 0);
        out
    }

    /// Serialize the optional `COMNT` block that precedes the record.
    pub fn comment_block(&self) -> Vec<u8> {
        if self.comments.is_empty() {
            return Vec::new();
        }
        let lines = &self.comments[..self.comments.len().min(MAX_COMMENTS)];
        let mut out = Vec::with_capacity(COMNT_ID.len() + lines.len() * COMMENT_LINE_SIZE);
        out.extend_from_slice(COMNT_ID);
        for line in lines {
            push_field(&mut out, line, COMMENT_LINE_SIZE, b' ');
        }
        out
    }

    /// Append the marker, comment block and record to `artwork`.
    pub fn append_to(&self, artwork: &mut Vec<u8>) {
        artwork.push(MARKER);
        artwork.extend(self.comment_block());
        artwork.extend(self.to_bytes());
    }
}

/// Write `value` as CP437, truncated or padded to exactly `width` bytes.
fn push_field(out: &mut Vec<u8>, value: &str, width: usize, pad: u8) {
    let mut raw = cp437::encode_str_lossy(value);
    raw.resize(width, pad);
    out.extend(raw);
}
