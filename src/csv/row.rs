use super::quote::{self, QUOTE};
use super::reader::read_trimmed_line;
use crate::errors::{CsvError, Result};
use itertools::Itertools;
use std::cmp::Ordering;
use std::fmt;
use std::io::BufRead;

/// Configure how a [`Row`] parses its lines.
///
/// Quoting defaults to on for the comma delimiter and off for every other
/// delimiter, unless set explicitly.
#[derive(Debug, Clone, Default)]
pub struct RowBuilder {
    delimiter: Option<char>,
    quoting: Option<bool>,
}

impl RowBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the field delimiter. Defaults to `,`.
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Force quote handling on or off regardless of the delimiter.
    pub fn quoting(mut self, quoting: bool) -> Self {
        self.quoting = Some(quoting);
        self
    }

    /// Build an empty row.
    ///
    /// Fails when quoting is requested with the quote character itself as
    /// delimiter, since every delimiter would then toggle the quote state.
    pub fn build(&self) -> Result<Row> {
        let delimiter = self.delimiter.unwrap_or(Row::DEFAULT_DELIMITER);
        let quoting = self.quoting.unwrap_or(delimiter == Row::DEFAULT_DELIMITER);
        if quoting && delimiter == QUOTE {
            return Err(CsvError::InvalidArgument(
                "Quoting cannot be enabled when the delimiter is the quote character",
            ));
        }
        Ok(Row {
            fields: Vec::new(),
            delimiter,
            quoting,
        })
    }
}

/// One parsed line of delimited text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    fields: Vec<String>,
    delimiter: char,
    quoting: bool,
}

impl Default for Row {
    fn default() -> Self {
        Self::new()
    }
}

impl Row {
    pub const DEFAULT_DELIMITER: char = ',';

    /// Create an empty comma-delimited row with quote handling.
    pub fn new() -> Self {
        Self::with_delimiter(Self::DEFAULT_DELIMITER)
    }

    /// Create an empty row. Quote handling is only enabled for `,`.
    pub fn with_delimiter(delimiter: char) -> Self {
        Row {
            fields: Vec::new(),
            delimiter,
            quoting: delimiter == Self::DEFAULT_DELIMITER,
        }
    }

    /// Create a row that already holds the given fields.
    pub fn from_fields<I, S>(delimiter: char, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row = Self::with_delimiter(delimiter);
        row.fields = fields.into_iter().map(Into::into).collect();
        row
    }

    /// Replace every field with the contents of `line`.
    ///
    /// A line with N delimiters (outside quotes) always yields N+1 fields, so
    /// the empty line yields a single empty field.
    pub fn parse_line(&mut self, line: &str) {
        self.fields = if self.quoting {
            let stripped = quote::strip_quoted_delimiters(line, self.delimiter);
            quote::split_fields(&stripped, self.delimiter)
        } else {
            quote::split_fields(line, self.delimiter)
        };
    }

    /// Read the next line from `reader` and parse it.
    ///
    /// Returns `Ok(false)` at end of input, leaving the fields untouched.
    pub fn read_line<R: BufRead>(&mut self, reader: &mut R) -> Result<bool> {
        let mut line = String::new();
        if !read_trimmed_line(reader, &mut line)? {
            return Ok(false);
        }
        self.parse_line(&line);
        Ok(true)
    }

    /// Strip leading and trailing spaces from every field.
    ///
    /// Only U+0020 is removed; tabs and other whitespace are kept.
    pub fn trim(&mut self) {
        for field in self.fields.iter_mut() {
            let trimmed = field.trim_matches(' ');
            if trimmed.len() != field.len() {
                *field = trimmed.to_string();
            }
        }
    }

    /// Replace every occurrence of `before` with `after` in every field.
    ///
    /// Occurrences are replaced left to right and replacement text is never
    /// searched again.
    pub fn replace_all(&mut self, before: &str, after: &str) -> Result<()> {
        if before.is_empty() {
            return Err(CsvError::InvalidArgument("Search string must not be empty"));
        }
        for field in self.fields.iter_mut() {
            if field.contains(before) {
                *field = field.replace(before, after);
            }
        }
        Ok(())
    }

    /// Drop empty fields from the end of the row.
    pub fn remove_trailing_delimiter(&mut self) {
        while self.fields.last().is_some_and(String::is_empty) {
            self.fields.pop();
        }
    }

    pub fn change_cell(&mut self, index: usize, value: impl Into<String>) -> Result<()> {
        let len = self.fields.len();
        let field = self
            .fields
            .get_mut(index)
            .ok_or(CsvError::IndexOutOfRange { index, len })?;
        *field = value.into();
        Ok(())
    }

    pub fn field(&self, index: usize) -> Result<&str> {
        self.get(index).ok_or(CsvError::IndexOutOfRange {
            index,
            len: self.fields.len(),
        })
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    pub fn size(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Whether quotes are stripped while parsing.
    pub fn quoting(&self) -> bool {
        self.quoting
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    pub fn into_fields(self) -> Vec<String> {
        self.fields
    }

    /// Join the fields with the delimiter.
    ///
    /// Fields are written as-is: quotes removed while parsing are not put
    /// back, so a field holding the delimiter does not survive a round trip.
    pub fn to_text(&self) -> String {
        self.fields.iter().join(&self.delimiter.to_string())
    }

    fn first_field(&self) -> &str {
        self.get(0).unwrap_or("")
    }

    /// Legacy "less than" predicate: true when `b` sorts before `a` on the
    /// first field.
    ///
    /// Used as the ordering of an ascending sort this puts rows in
    /// *descending* order of their first field.
    pub fn sort_function(a: &Row, b: &Row) -> bool {
        b.first_field() < a.first_field()
    }

    /// [`Row::sort_function`] as an [`Ordering`], for `sort_by`.
    pub fn cmp_first_field_desc(a: &Row, b: &Row) -> Ordering {
        b.first_field().cmp(a.first_field())
    }

    /// Ascending order of the first field.
    pub fn cmp_first_field(a: &Row, b: &Row) -> Ordering {
        a.first_field().cmp(b.first_field())
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

/// Sort rows in descending order of their first field, the order the legacy
/// comparator produces.
pub fn sort_rows(rows: &mut [Row]) {
    rows.sort_by(Row::cmp_first_field_desc);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parsed(line: &str) -> Vec<String> {
        let mut row = Row::new();
        row.parse_line(line);
        row.into_fields()
    }

    #[test]
    fn test_parse_simple() {
        let mut row = Row::new();
        row.parse_line("a,b,c");
        assert_eq!(row.fields(), ["a", "b", "c"]);
        assert_eq!(row.size(), 3);
        assert_eq!(row.delimiter(), ',');
        assert!(row.quoting());
    }

    #[test]
    fn test_parse_empty_fields() {
        assert_eq!(parsed("a,,c"), vec!["a", "", "c"]);
        assert_eq!(parsed("a,b,"), vec!["a", "b", ""]);
        assert_eq!(parsed(",,"), vec!["", "", ""]);
        assert_eq!(parsed(""), vec![""]);
    }

    #[test]
    fn test_parse_quoted_comma() {
        assert_eq!(
            parsed(r#"row,of,data,"1,125.00""#),
            vec!["row", "of", "data", "1125.00"]
        );
    }

    #[test]
    fn test_parse_unterminated_quote() {
        assert_eq!(parsed(r#"a,"b,c,d"#), vec!["a", "bcd"]);
    }

    #[test]
    fn test_parse_replaces_previous_fields() {
        let mut row = Row::new();
        row.parse_line("a,b,c,d");
        row.parse_line("x");
        assert_eq!(row.fields(), ["x"]);
    }

    #[test]
    fn test_other_delimiter_skips_quoting() {
        let mut row = Row::with_delimiter(';');
        assert!(!row.quoting());
        row.parse_line(r#"a;"b;c""#);
        assert_eq!(row.fields(), ["a", "\"b", "c\""]);
    }

    #[test]
    fn test_builder_explicit_quoting() {
        let mut row = RowBuilder::new().delimiter(';').quoting(true).build().unwrap();
        row.parse_line(r#"a;"b;c""#);
        assert_eq!(row.fields(), ["a", "bc"]);

        let mut row = RowBuilder::new().quoting(false).build().unwrap();
        assert_eq!(row.delimiter(), ',');
        row.parse_line(r#""1,125.00""#);
        assert_eq!(row.fields(), ["\"1", "125.00\""]);
    }

    #[test]
    fn test_builder_rejects_quote_delimiter() {
        assert!(matches!(
            RowBuilder::new().delimiter('"').quoting(true).build(),
            Err(CsvError::InvalidArgument(_))
        ));
        // Quoting is off by default for any non-comma delimiter
        let mut row = RowBuilder::new().delimiter('"').build().unwrap();
        row.parse_line(r#"a"b"#);
        assert_eq!(row.fields(), ["a", "b"]);
    }

    #[test]
    fn test_trim() {
        let mut row = Row::from_fields(',', ["  hi  ", "   ", "x", "\tkeep\t", " a b "]);
        row.trim();
        assert_eq!(row.fields(), ["hi", "", "x", "\tkeep\t", "a b"]);
    }

    #[test]
    fn test_replace_all() {
        let mut row = Row::from_fields(',', ["1,125", "1,000,000", "none"]);
        row.replace_all(",", ".").unwrap();
        assert_eq!(row.fields(), ["1.125", "1.000.000", "none"]);
    }

    #[test]
    fn test_replace_all_does_not_rescan() {
        let mut row = Row::from_fields(',', ["aa", "bab"]);
        row.replace_all("a", "aa").unwrap();
        assert_eq!(row.fields(), ["aaaa", "baab"]);
    }

    #[test]
    fn test_replace_all_empty_search() {
        let mut row = Row::from_fields(',', ["abc"]);
        assert_eq!(
            row.replace_all("", "x"),
            Err(CsvError::InvalidArgument("Search string must not be empty"))
        );
        assert_eq!(row.fields(), ["abc"]);
    }

    #[test]
    fn test_remove_trailing_delimiter() {
        let mut row = Row::from_fields(',', ["a", "", "", ""]);
        row.remove_trailing_delimiter();
        assert_eq!(row.fields(), ["a"]);

        let mut row = Row::from_fields(',', ["", "", ""]);
        row.remove_trailing_delimiter();
        assert!(row.is_empty());

        let mut row = Row::from_fields(',', ["a", "", "b"]);
        row.remove_trailing_delimiter();
        assert_eq!(row.fields(), ["a", "", "b"]);

        let mut row = Row::new();
        row.remove_trailing_delimiter();
        assert_eq!(row.size(), 0);
    }

    #[test]
    fn test_change_cell() {
        let mut row = Row::from_fields(',', ["a", "b"]);
        row.change_cell(1, "z").unwrap();
        assert_eq!(row.fields(), ["a", "z"]);
        assert_eq!(
            row.change_cell(2, "x"),
            Err(CsvError::IndexOutOfRange { index: 2, len: 2 })
        );
        assert_eq!(row.fields(), ["a", "z"]);
    }

    #[test]
    fn test_field_out_of_range() {
        for size in 0..5 {
            let mut row = Row::from_fields(',', vec!["x"; size]);
            assert_eq!(
                row.field(size),
                Err(CsvError::IndexOutOfRange {
                    index: size,
                    len: size
                })
            );
            assert_eq!(
                row.change_cell(size, "y"),
                Err(CsvError::IndexOutOfRange {
                    index: size,
                    len: size
                })
            );
            assert_eq!(row.get(size), None);
        }
    }

    #[test]
    fn test_to_text() {
        let mut row = Row::new();
        row.parse_line(r#"row,of,data,"1,125.00""#);
        assert_eq!(row.to_text(), "row,of,data,1125.00");
        assert_eq!(row.to_string(), row.to_text());
        assert_eq!(format!("[{row}]"), "[row,of,data,1125.00]");

        let row = Row::from_fields('|', ["a", "b,c", ""]);
        assert_eq!(row.to_text(), "a|b,c|");
        assert_eq!(Row::new().to_text(), "");
    }

    #[test]
    fn test_sort_function_is_descending() {
        let b = Row::from_fields(',', ["b"]);
        let a = Row::from_fields(',', ["a"]);
        // "b" sorts ahead of "a": the predicate is true only for (b, a)
        assert!(!Row::sort_function(&a, &b));
        assert!(Row::sort_function(&b, &a));

        let mut rows = vec![a.clone(), b.clone()];
        sort_rows(&mut rows);
        assert_eq!(rows, vec![b.clone(), a.clone()]);

        rows.sort_by(Row::cmp_first_field);
        assert_eq!(rows, vec![a, b]);
    }

    #[test]
    fn test_sort_empty_row_first_field() {
        let empty = Row::new();
        let a = Row::from_fields(',', ["a"]);
        assert_eq!(Row::cmp_first_field(&empty, &a), Ordering::Less);
        assert_eq!(Row::cmp_first_field_desc(&empty, &a), Ordering::Greater);
    }

    #[test]
    fn test_read_line() {
        let mut input = Cursor::new("a,b\r\n\"1,2\",3\n");
        let mut row = Row::new();
        assert!(row.read_line(&mut input).unwrap());
        assert_eq!(row.fields(), ["a", "b"]);
        assert!(row.read_line(&mut input).unwrap());
        assert_eq!(row.fields(), ["12", "3"]);
        assert!(!row.read_line(&mut input).unwrap());
        assert_eq!(row.fields(), ["12", "3"]);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn delimiter() -> impl Strategy<Value = char> {
            prop_oneof![Just(','), Just(';'), Just('\t'), Just('|')]
        }

        proptest! {
            /// Splitting a quote-free line and joining it back is lossless
            #[test]
            fn parse_then_to_text_round_trips(
                delimiter in delimiter(),
                fields in prop::collection::vec("[a-z0-9 .]{0,8}", 1..10)
            ) {
                let line = fields.join(delimiter.to_string().as_str());
                let mut row = Row::with_delimiter(delimiter);
                row.parse_line(&line);
                prop_assert_eq!(row.size(), fields.len());
                prop_assert_eq!(row.fields(), &fields[..]);
                prop_assert_eq!(row.to_text(), line);
            }
        }
    }
}
