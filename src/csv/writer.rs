use super::row::Row;
use crate::errors::Result;
use std::io::Write;

/// Write rows to a text sink, one line per row.
///
/// Fields are written exactly as [`Row::to_text`] renders them; nothing is
/// re-quoted.
pub struct RowWriter<W: Write> {
    writer: W,
    terminator: String,
    row_count: u64,
}

impl<W: Write> RowWriter<W> {
    /// Create a writer ending each row with `\n`.
    pub fn new(writer: W) -> Self {
        RowWriter {
            writer,
            terminator: "\n".to_string(),
            row_count: 0,
        }
    }

    /// Set the line terminator written after each row (builder pattern)
    pub fn terminator(mut self, terminator: &str) -> Self {
        self.terminator = terminator.to_string();
        self
    }

    /// Write a row followed by the terminator.
    pub fn write_row(&mut self, row: &Row) -> Result<()> {
        self.write_text(row)?;
        self.writer.write_all(self.terminator.as_bytes())?;
        Ok(())
    }

    /// Write a row without any terminator.
    pub fn write_text(&mut self, row: &Row) -> Result<()> {
        self.writer.write_all(row.to_text().as_bytes())?;
        self.row_count += 1;
        tracing::trace!("Wrote row {} with {} fields", self.row_count, row.size());
        Ok(())
    }

    /// Number of rows written so far.
    pub fn row_count(&self) -> u64 {
        self.row_count
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        tracing::debug!("Flushed {} rows", self.row_count);
        Ok(())
    }

    /// Flush and hand back the underlying sink.
    pub fn into_inner(mut self) -> Result<W> {
        self.flush()?;
        Ok(self.writer)
    }
}
