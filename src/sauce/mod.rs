//! SAUCE metadata: the boundary between artwork and trailing record.

mod reader;
mod record;
mod writer;

pub use reader::{
    locate, parse_record, parse_trailer, Boundary, COMMENT_LINE_SIZE, COMNT_ID, MARKER,
    RECORD_SIZE, SAUCE_ID,
};
pub use record::{DataType, MetadataValue, SauceRecord, FILE_TYPE_ANSI};
