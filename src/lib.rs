//! Parse delimited text one line at a time.
//!
//! A [`Row`] holds the fields of the most recently parsed line. Lines come
//! from any [`std::io::BufRead`] through a [`RowReader`] and go back out to
//! any [`std::io::Write`] through a [`RowWriter`].
//!
//! ```
//! use std::io::Cursor;
//! use delimrow::{Row, RowReader};
//!
//! let mut reader = RowReader::new(Cursor::new("row,of,data,\"1,125.00\"\n"));
//! let mut row = Row::new();
//! while reader.read_row(&mut row)? {
//!     assert_eq!(row.field(3)?, "1125.00");
//! }
//! # Ok::<(), delimrow::CsvError>(())
//! ```
mod csv;
mod errors;
pub mod strings;

pub use csv::{sort_rows, Row, RowBuilder, RowReader, RowWriter};
pub use errors::{CsvError, Result};
