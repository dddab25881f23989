//! SAUCE record data structure.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

/// SAUCE data types (byte 94 of the record).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataType {
    None,
    #[default]
    Character,
    Bitmap,
    Vector,
    Audio,
    BinaryText,
    XBin,
    Archive,
    Executable,
    /// Unknown value, preserved as read.
    Unknown(u8),
}

impl DataType {
    pub fn from_byte(value: u8) -> Self {
        match value {
            0 => DataType::None,
            1 => DataType::Character,
            2 => DataType::Bitmap,
            3 => DataType::Vector,
            4 => DataType::Audio,
            5 => DataType::BinaryText,
            6 => DataType::XBin,
            7 => DataType::Archive,
            8 => DataType::Executable,
            other => DataType::Unknown(other),
        }
    }

    pub fn to_byte(self) -> u8 {
        match self {
            DataType::None => 0,
            DataType::Character => 1,
            DataType::Bitmap => 2,
            DataType::Vector => 3,
            DataType::Audio => 4,
            DataType::BinaryText => 5,
            DataType::XBin => 6,
            DataType::Archive => 7,
            DataType::Executable => 8,
            DataType::Unknown(other) => other,
        }
    }
}

/// File type value for ANSI art under the Character data type.
pub const FILE_TYPE_ANSI: u8 = 1;

/// Value in the flat metadata view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Text(String),
    Number(u32),
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::Text(s) => f.write_str(s),
            MetadataValue::Number(n) => write!(f, "{}", n),
        }
    }
}

/// SAUCE (Standard Architecture for Universal Comment Extensions) record.
///
/// Trailing metadata used by the BBS art scene. Text fields are stored
/// decoded from CP437 with their padding removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SauceRecord {
    pub version: String,
    pub title: String,
    pub author: String,
    pub group: String,
    pub date: Option<NaiveDate>,
    /// Original file size as recorded, excluding the metadata.
    pub file_size: u32,
    pub data_type: DataType,
    pub file_type: u8,
    /// Width in columns for character data.
    pub tinfo1: u16,
    /// Height in rows for character data.
    pub tinfo2: u16,
    pub tinfo3: u16,
    pub tinfo4: u16,
    pub flags: u8,
    /// Font name for character data (`TInfoS`).
    pub font: String,
    pub comments: Vec<String>,
}

impl Default for SauceRecord {
    fn default() -> Self {
        Self {
            version: "00".to_string(),
            title: String::new(),
            author: String::new(),
            group: String::new(),
            date: None,
            file_size: 0,
            data_type: DataType::Character,
            file_type: FILE_TYPE_ANSI,
            tinfo1: 0,
            tinfo2: 0,
            tinfo3: 0,
            tinfo4: 0,
            flags: 0,
            font: String::new(),
            comments: Vec::new(),
        }
    }
}

impl SauceRecord {
    /// Declared width, when this describes character art.
    pub fn width(&self) -> Option<usize> {
        (self.data_type == DataType::Character && self.tinfo1 > 0).then_some(self.tinfo1 as usize)
    }

    /// Declared height, when this describes character art.
    pub fn height(&self) -> Option<usize> {
        (self.data_type == DataType::Character && self.tinfo2 > 0).then_some(self.tinfo2 as usize)
    }

    /// iCE colours: blink bit selects bright backgrounds instead.
    pub fn ice_colors(&self) -> bool {
        self.flags & 0b0000_0001 != 0
    }

    /// Flat key/value view of every populated field.
    pub fn fields(&self) -> BTreeMap<String, MetadataValue> {
        let mut map = BTreeMap::new();
        let mut text = |key: &str, value: &str| {
            if !value.is_empty() {
                map.insert(key.to_string(), MetadataValue::Text(value.to_string()));
            }
        };
        text("title", &self.title);
        text("author", &self.author);
        text("group", &self.group);
        text("font", &self.font);
        if let Some(date) = self.date {
            map.insert(
                "date".to_string(),
                MetadataValue::Text(date.format("%Y-%m-%d").to_string()),
            );
        }
        map.insert("file_size".to_string(), MetadataValue::Number(self.file_size));
        map.insert(
            "data_type".to_string(),
            MetadataValue::Number(self.data_type.to_byte() as u32),
        );
        map.insert("file_type".to_string(), MetadataValue::Number(self.file_type as u32));
        map.insert("width".to_string(), MetadataValue::Number(self.tinfo1 as u32));
        map.insert("height".to_string(), MetadataValue::Number(self.tinfo2 as u32));
        map.insert("flags".to_string(), MetadataValue::Number(self.flags as u32));
        for (i, line) in self.comments.iter().enumerate() {
            map.insert(format!("comment.{}", i), MetadataValue::Text(line.clone()));
        }
        map
    }
}

impl fmt::Display for SauceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines = Vec::new();
        if !self.title.is_empty() {
            lines.push(format!("Title: {}", self.title));
        }
        if !self.author.is_empty() {
            lines.push(format!("Author: {}", self.author));
        }
        if !self.group.is_empty() {
            lines.push(format!("Group: {}", self.group));
        }
        if let Some(date) = self.date {
            lines.push(format!("Date: {}", date.format("%Y-%m-%d")));
        }
        if self.tinfo1 > 0 {
            lines.push(format!("Width: {}", self.tinfo1));
        }
        if self.tinfo2 > 0 {
            lines.push(format!("Height: {}", self.tinfo2));
        }
        if !self.font.is_empty() {
            lines.push(format!("Font: {}", self.font));
        }
        for comment in &self.comments {
            lines.push(format!("Comment: {}", comment));
        }
        if lines.is_empty() {
            f.write_str("(No SAUCE metadata)")
        } else {
            f.write_str(&lines.join("\n"))
        }
    }
}
