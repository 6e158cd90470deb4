//! Delimited record writer.
//!
//! Fields are joined with the delimiter as-is. Values containing the delimiter are not
//! escaped and will corrupt their row; this keeps the on-disk format compatible with
//! existing manifests.

use crate::error::CodecError;
use std::io::{BufWriter, Write};
use tracing::warn;

/// Writes a header line and one line per record
#[derive(Debug, Clone)]
pub struct RecordWriter {
    delimiter: char,
    headers: Vec<String>,
    emit_header: bool,
}

impl RecordWriter {
    pub fn new<I, S>(delimiter: char, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            delimiter,
            headers: headers.into_iter().map(Into::into).collect(),
            emit_header: true,
        }
    }

    /// Whether to write the header line (default true; never written for an empty header list)
    pub fn with_header(mut self, emit_header: bool) -> Self {
        self.emit_header = emit_header;
        self
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Write `records` to `sink`, extracting each column with `field`.
    ///
    /// `field` returns `None` for a column it does not know, which fails the write.
    /// The sink is flushed and dropped before returning. Returns the number of rows written.
    pub fn write<W, T, I, F>(&self, sink: W, records: I, field: F) -> Result<usize, CodecError>
    where
        W: Write,
        I: IntoIterator<Item = T>,
        F: Fn(&T, &str) -> Option<String>,
    {
        let mut out = BufWriter::new(sink);
        let delimiter = self.delimiter.to_string();

        if self.emit_header && !self.headers.is_empty() {
            writeln!(out, "{}", self.headers.join(&delimiter))?;
        }

        let mut rows = 0usize;
        for record in records {
            let mut values = Vec::with_capacity(self.headers.len());
            for header in &self.headers {
                let value =
                    field(&record, header.as_str()).ok_or_else(|| CodecError::UnknownField(header.clone()))?;
                if value.contains(self.delimiter) {
                    warn!(
                        field = %header,
                        value = %value,
                        "Field value contains the delimiter; row will not read back intact"
                    );
                }
                values.push(value);
            }
            writeln!(out, "{}", values.join(&delimiter))?;
            rows += 1;
        }

        out.flush()?;
        Ok(rows)
    }
}
