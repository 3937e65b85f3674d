//! Normalisation of raw form text into stored lists.

/// Splits a multi-line text block into trimmed, non-empty lines.
///
/// Any of `\n`, `\r\n` or a lone `\r` ends a line; relative order is preserved.
pub fn split_lines(raw: &str) -> Vec<String> {
    raw.split(['\n', '\r'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Splits comma-separated text into trimmed, non-empty items.
///
/// Line breaks are not separators: `"Python\nSQL"` stays a single item.
pub fn split_comma_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
