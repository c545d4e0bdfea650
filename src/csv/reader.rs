use super::row::{Row, RowBuilder};
use crate::errors::{CsvError, Result};
use std::io::BufRead;

/// Read one line into `line`, without its `\n` or `\r\n` terminator.
///
/// Returns `Ok(false)` at end of input.
pub(crate) fn read_trimmed_line<R: BufRead>(reader: &mut R, line: &mut String) -> Result<bool> {
    line.clear();
    if reader.read_line(line)? == 0 {
        return Ok(false);
    }
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(true)
}

/// Read rows one line at a time from a line-oriented source.
///
/// The reader borrows nothing from the stream's lifecycle: whoever opened the
/// stream gets it back through [`RowReader::into_inner`].
pub struct RowReader<R> {
    reader: R,
    builder: RowBuilder,
    line_buffer: String,
    line_count: u64,
}

impl<R: BufRead> RowReader<R> {
    /// Create a reader producing comma-delimited rows.
    pub fn new(reader: R) -> Self {
        Self::with_builder(reader, RowBuilder::new())
    }

    /// Create a reader whose rows are configured by `builder`.
    pub fn with_builder(reader: R, builder: RowBuilder) -> Self {
        RowReader {
            reader,
            builder,
            line_buffer: String::with_capacity(1024),
            line_count: 0,
        }
    }

    /// Parse the next line into `row`, keeping `row`'s own configuration.
    ///
    /// Returns `Ok(false)` at end of input and leaves `row` untouched.
    pub fn read_row(&mut self, row: &mut Row) -> Result<bool> {
        if !read_trimmed_line(&mut self.reader, &mut self.line_buffer)? {
            tracing::debug!("End of input after {} lines", self.line_count);
            return Ok(false);
        }
        self.line_count += 1;
        tracing::trace!("Read line {}: {:?}", self.line_count, self.line_buffer);
        row.parse_line(&self.line_buffer);
        Ok(true)
    }

    /// Like [`RowReader::read_row`], but end of input is an error.
    pub fn next_row(&mut self, row: &mut Row) -> Result<()> {
        if self.read_row(row)? {
            Ok(())
        } else {
            Err(CsvError::EndOfInput)
        }
    }

    /// Number of lines read so far.
    pub fn line_count(&self) -> u64 {
        self.line_count
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    fn read_new_row(&mut self) -> Result<Option<Row>> {
        let mut row = self.builder.build()?;
        Ok(self.read_row(&mut row)?.then_some(row))
    }
}

/// Yields the remaining rows, each built from the reader's [`RowBuilder`].
impl<R: BufRead> Iterator for RowReader<R> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_new_row().transpose()
    }
}
