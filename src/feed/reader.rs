//! Payload-level record reader.

use super::tokenizer::parse_line;

/// Split a raw payload into tokenized records.
///
/// Accepts `\n` and `\r\n` line endings. The first line is the header and is
/// always skipped; lines that are blank after trimming are skipped too.
pub fn read_records(text: &str) -> Vec<Vec<String>> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(parse_line)
        .collect()
}
