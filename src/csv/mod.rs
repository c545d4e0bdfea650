//! Parse delimited rows one line at a time
///
/// Quote handling is deliberately simple: a pair of `"` characters protects the
/// delimiters between them, and the quotes themselves are dropped. There are no
/// escaped quotes and no quoted fields spanning several lines.
mod quote;
mod reader;
mod row;
mod writer;

pub use reader::RowReader;
pub use row::{sort_rows, Row, RowBuilder};
pub use writer::RowWriter;
