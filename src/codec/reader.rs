//! Line-oriented delimited record reader.

use crate::error::CodecError;
use std::io::{BufRead, Lines};
use std::sync::Arc;

/// Reader configuration
#[derive(Debug, Clone, Copy)]
pub struct ReaderConfig {
    pub delimiter: char,
    /// Whether the first line names the columns
    pub has_header: bool,
}

/// One decoded record
///
/// Lookups past the end of a short line return `None`.
#[derive(Debug, Clone)]
pub struct Row {
    values: Vec<String>,
    headers: Arc<[String]>,
}

impl Row {
    /// Value under the named header column
    pub fn column(&self, name: &str) -> Option<&str> {
        let index = self.headers.iter().position(|header| header == name)?;
        self.index(index)
    }

    /// Value at a positional index
    pub fn index(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }
}

/// Lazy sequence of rows over a character stream
///
/// Blank lines are skipped. The underlying reader is dropped with the iterator.
pub struct RecordReader<R> {
    lines: Lines<R>,
    config: ReaderConfig,
    headers: Option<Arc<[String]>>,
}

impl<R: BufRead> RecordReader<R> {
    pub fn new(reader: R, config: ReaderConfig) -> Self {
        let headers = if config.has_header {
            None
        } else {
            Some(Arc::from(Vec::new()))
        };
        Self {
            lines: reader.lines(),
            config,
            headers,
        }
    }

    /// Header names, once the header line has been consumed
    pub fn headers(&self) -> Option<&[String]> {
        self.headers.as_deref()
    }

    fn split(&self, line: &str) -> Vec<String> {
        line.split(self.config.delimiter).map(str::to_string).collect()
    }

    fn next_line(&mut self) -> Option<Result<String, CodecError>> {
        loop {
            match self.lines.next()? {
                Ok(line) if line.is_empty() => continue,
                Ok(line) => return Some(Ok(line)),
                Err(e) => return Some(Err(CodecError::IoError(e))),
            }
        }
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = Result<Row, CodecError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.headers.is_none() {
            let line = match self.next_line()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e)),
            };
            self.headers = Some(Arc::from(self.split(&line)));
        }

        let line = match self.next_line()? {
            Ok(line) => line,
            Err(e) => return Some(Err(e)),
        };
        let values = self.split(&line);
        let headers = self.headers.clone().unwrap_or_else(|| Arc::from(Vec::new()));
        Some(Ok(Row { values, headers }))
    }
}
