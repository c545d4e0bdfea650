/// The only recognized quote character.
pub const QUOTE: char = '"';

/// Remove quote characters from a line, along with any delimiter that sits
/// between a pair of quotes.
///
/// This is a single pass over the line, not a quote-pair matcher: an opening
/// quote without a closing one swallows every delimiter up to the end of the
/// line.
pub fn strip_quoted_delimiters(line: &str, delimiter: char) -> String {
    let mut stripped = String::with_capacity(line.len());
    let mut within_quotes = false;

    for ch in line.chars() {
        if ch == QUOTE {
            within_quotes = !within_quotes;
        } else if ch != delimiter || !within_quotes {
            // Delimiters between quotes are dropped
            stripped.push(ch);
        }
    }

    if within_quotes {
        tracing::debug!("Unterminated quote in line: {line:?}");
    }
    stripped
}

/// Split a line on every delimiter, keeping empty fields.
pub fn split_fields(line: &str, delimiter: char) -> Vec<String> {
    line.split(delimiter).map(str::to_string).collect()
}
