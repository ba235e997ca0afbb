//! Single-line field tokenizer.

const DELIMITER: char = ',';
const QUOTE: char = '"';

/// Split one line into its field values.
///
/// Delimiters inside a quoted section belong to the field. A doubled quote
/// inside a quoted section yields one literal quote; any other quote toggles
/// the quoted state. The accumulator is always flushed at end of line, so a
/// trailing delimiter produces a trailing empty field and an unterminated
/// quote simply runs to the end of the line.
pub fn parse_line(line: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            QUOTE if in_quotes && chars.peek() == Some(&QUOTE) => {
                current.push(QUOTE);
                chars.next();
            }
            QUOTE => in_quotes = !in_quotes,
            DELIMITER if !in_quotes => values.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }

    values.push(current);
    values
}
