//! SAUCE boundary and record tests over whole files.

use ansi_art::sauce::{locate, DataType, MetadataValue, SauceRecord, MARKER, RECORD_SIZE};
use chrono::NaiveDate;

fn sample_record() -> SauceRecord {
    SauceRecord {
        title: "Acid Trip".to_string(),
        author: "Somebody".to_string(),
        group: "ACiD Productions".to_string(),
        date: NaiveDate::from_ymd_opt(1994, 11, 3),
        tinfo1: 80,
        tinfo2: 25,
        font: "IBM VGA".to_string(),
        comments: vec!["Released at the party".to_string()],
        ..SauceRecord::default()
    }
}

// ==================== Boundary Tests ====================

#[test]
fn test_no_marker_means_whole_stream_is_art() {
    let boundary = locate(b"\x1b[31mart");
    assert_eq!(boundary.artwork, b"\x1b[31mart");
    assert!(boundary.record.is_none());
}

#[test]
fn test_marker_without_record_is_still_a_boundary() {
    let boundary = locate(b"AB\x1a");
    assert_eq!(boundary.artwork, b"AB");
    assert_eq!(boundary.marker_offset, Some(2));
    assert!(boundary.record.is_none());
}

#[test]
fn test_non_matching_signature() {
    let boundary = locate(b"AB\x1aHELLO and some more padding");
    assert_eq!(boundary.artwork, b"AB");
    assert!(boundary.record.is_none());
}

#[test]
fn test_first_marker_wins() {
    let mut data = b"A\x1aB".to_vec();
    sample_record().append_to(&mut data);
    let boundary = locate(&data);
    assert_eq!(boundary.artwork, b"A");
    // The bytes after the first marker do not start with a signature.
    assert!(boundary.record.is_none());
}

#[test]
fn test_garbage_record_never_panics() {
    let mut data = b"X".to_vec();
    data.push(MARKER);
    data.extend_from_slice(b"SAUCE");
    data.extend(std::iter::repeat(0xFF).take(RECORD_SIZE));
    let boundary = locate(&data);
    assert_eq!(boundary.artwork, b"X");
    let record = boundary.record.unwrap();
    assert_eq!(record.date, None);
    assert_eq!(record.data_type, DataType::Unknown(0xFF));
}

// ==================== Round Trip Tests ====================

#[test]
fn test_written_record_is_read_back() {
    let record = sample_record();
    let mut data = b"art".to_vec();
    record.append_to(&mut data);
    let boundary = locate(&data);
    assert_eq!(boundary.artwork, b"art");
    assert_eq!(boundary.record, Some(record));
}

#[test]
fn test_fields_view() {
    let fields = sample_record().fields();
    assert_eq!(
        fields.get("group"),
        Some(&MetadataValue::Text("ACiD Productions".to_string()))
    );
    assert_eq!(fields.get("date"), Some(&MetadataValue::Text("1994-11-03".to_string())));
    assert_eq!(fields.get("width"), Some(&MetadataValue::Number(80)));
    assert_eq!(
        fields.get("comment.0"),
        Some(&MetadataValue::Text("Released at the party".to_string()))
    );
}

#[test]
fn test_fields_serialize_flat() {
    let json = serde_json::to_value(sample_record().fields()).unwrap();
    assert_eq!(json["title"], "Acid Trip");
    assert_eq!(json["height"], 25);
}

#[test]
fn test_display_lists_populated_fields() {
    let text = sample_record().to_string();
    assert!(text.starts_with("Title: Acid Trip\nAuthor: Somebody"));
    assert!(text.contains("Date: 1994-11-03"));
    assert!(text.ends_with("Comment: Released at the party"));
}
