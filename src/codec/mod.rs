//! Delimited Record Codec
//!
//! Line-oriented encode/decode between field values and delimited text lines, with an
//! optional header row. No quoting or escaping: one record per line, fields must not
//! contain the delimiter.

pub mod reader;
pub mod writer;

pub use reader::{ReaderConfig, RecordReader, Row};
pub use writer::RecordWriter;
