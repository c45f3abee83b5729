//! Small string utilities shared by the block engine and the inline parser.

/// The byte index of the first non-whitespace character, or the string's
/// length when the line is blank.
pub fn first_nonspace(line: &str) -> usize {
    line.bytes()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(line.len())
}

/// The line with trailing whitespace (including the newline) removed.
pub fn trim_end<'a>(line: &'a str) -> &'a str {
    line.trim_end_matches(|c: char| c.is_ascii_whitespace())
}

/// Case-fold a reference name for table lookup.  Reference names match
/// ASCII case-insensitively.
pub fn fold_reference(name: &str) -> String {
    name.to_ascii_lowercase()
}

/// Remove an ATX heading's trailing `#` run, when whitespace separates it
/// from the heading text.  `#` runs glued to the text stay.
pub fn trim_atx_trailer<'a>(text: &'a str) -> &'a str {
    let trimmed = trim_end(text);
    let without_hashes = trimmed.trim_end_matches('#');
    if without_hashes.len() == trimmed.len() {
        return trimmed;
    }
    match without_hashes.bytes().last() {
        None => without_hashes,
        Some(b) if b.is_ascii_whitespace() => trim_end(without_hashes),
        Some(_) => trimmed,
    }
}
