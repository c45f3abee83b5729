//! Byte-level line classification helpers.
//!
//! Each scanner looks at one already tab-expanded line (or the tail of one,
//! starting at its first non-space column) and answers a single structural
//! question.  None of them allocate except for capturing a fence info word.

/// The result of matching a code fence opener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeFence {
    /// The fence character, `` ` `` or `~`.
    pub ch: u8,

    /// The length of the fence run.
    pub len: usize,

    /// The word following the fence, usually a language name.
    pub info: Option<String>,
}

fn is_space_or_tab(ch: u8) -> bool {
    matches!(ch, b' ' | b'\t')
}

fn is_line_end(ch: u8) -> bool {
    matches!(ch, b'\n' | b'\r')
}

/// Whether the line holds nothing but whitespace.
pub fn is_blank(line: &str) -> bool {
    line.bytes().all(|b| b.is_ascii_whitespace())
}

/// Match a run of at least `min_run` copies of `ch`, where the rest of the
/// line is only whitespace and, when `inner_spaces` is set, the run itself
/// may be broken by spaces and tabs (`- - -` style breaks).
fn char_line(line: &str, ch: u8, min_run: usize, inner_spaces: bool) -> bool {
    let bytes = line.as_bytes();
    let mut i = 0;
    let mut run = 0;

    while i < bytes.len() && (bytes[i] == ch || (inner_spaces && is_space_or_tab(bytes[i]))) {
        if bytes[i] == ch {
            run += 1;
        }
        i += 1;
    }
    if run < min_run {
        return false;
    }

    while i < bytes.len() && is_space_or_tab(bytes[i]) {
        i += 1;
    }
    i == bytes.len() || is_line_end(bytes[i])
}

/// Whether the line is a thematic break: a run of three or more `-`, `_` or
/// `*`, optionally space-separated.
pub fn thematic_break(line: &str) -> bool {
    char_line(line, b'-', 3, true) || char_line(line, b'_', 3, true) || char_line(line, b'*', 3, true)
}

/// Whether the line is a setext underline.  Returns the heading level it
/// promotes the open paragraph to.
pub fn setext_underline(line: &str) -> Option<u8> {
    if char_line(line, b'=', 1, false) {
        Some(1)
    } else if char_line(line, b'-', 1, false) {
        Some(2)
    } else {
        None
    }
}

/// Match an opening code fence at the start of `line`.  The fence character
/// may be followed by a single info word, but not by another fence
/// character.
pub fn open_code_fence(line: &str) -> Option<CodeFence> {
    let bytes = line.as_bytes();
    let ch = *bytes.first()?;
    if ch != b'`' && ch != b'~' {
        return None;
    }

    let mut i = 0;
    while i < bytes.len() && bytes[i] == ch {
        i += 1;
    }
    let len = i;
    if len < 3 {
        return None;
    }

    // A fence character later on the line means an inline code span, not a
    // fence.
    if bytes[i..].iter().any(|&b| b == ch) {
        return None;
    }

    while i < bytes.len() && is_space_or_tab(bytes[i]) {
        i += 1;
    }
    let start = i;
    while i < bytes.len() && !bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    let info = if i > start {
        Some(line[start..i].to_string())
    } else {
        None
    };

    Some(CodeFence { ch, len, info })
}

/// Match a closing code fence at the start of `line`: a run of `ch` at least
/// `len` long with nothing but whitespace after it.
pub fn close_code_fence(line: &str, ch: u8, len: usize) -> bool {
    let bytes = line.as_bytes();
    let mut i = 0;
    while i < bytes.len() && bytes[i] == ch {
        i += 1;
    }
    if i < len {
        return false;
    }
    while i < bytes.len() && is_space_or_tab(bytes[i]) {
        i += 1;
    }
    i == bytes.len() || is_line_end(bytes[i])
}

/// Whether `line` starts with an unordered list marker: `-`, `+` or `*`
/// followed by whitespace.
pub fn unordered_list_marker(line: &str) -> bool {
    let bytes = line.as_bytes();
    matches!(bytes.first(), Some(b'-') | Some(b'+') | Some(b'*'))
        && bytes.get(1).map_or(false, |b| b.is_ascii_whitespace())
}

/// Match an ordered list marker at the start of `line`: one or more digits,
/// a `.` or `)` delimiter, then whitespace.  Returns the marker length up to
/// and including the delimiter.
pub fn ordered_list_marker(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    let mut i = 0;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i == 0 {
        return None;
    }
    if !matches!(bytes.get(i), Some(b'.') | Some(b')')) {
        return None;
    }
    if !bytes.get(i + 1).map_or(false, |b| b.is_ascii_whitespace()) {
        return None;
    }
    Some(i + 1)
}

/// Match an ATX heading marker at the start of `line`.  Returns the level;
/// seven or more `#`s are not a heading.
pub fn atx_heading_start(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    let mut i = 0;
    while i < bytes.len() && bytes[i] == b'#' {
        i += 1;
    }
    if i == 0 || i > 6 {
        return None;
    }
    if !bytes.get(i).map_or(true, |b| b.is_ascii_whitespace()) {
        return None;
    }
    Some(i)
}

/// Whether `line` is a table delimiter row: a non-blank line of spaces,
/// colons, dashes and pipes, with an optional leading `>` marker.
pub fn table_delimiter_row(line: &str) -> bool {
    let bytes = line.as_bytes();
    let mut i = 0;
    if bytes.first() == Some(&b'>') {
        i += 1;
    }
    let mut seen = false;
    while i < bytes.len() {
        match bytes[i] {
            b':' | b'-' | b'|' => seen = true,
            b' ' | b'\t' | b'\r' | b'\n' => {}
            _ => return false,
        }
        i += 1;
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thematic_breaks() {
        assert!(thematic_break("---\n"));
        assert!(thematic_break("- - -\n"));
        assert!(thematic_break("*****\n"));
        assert!(thematic_break("* * *\n"));
        assert!(thematic_break("___   \n"));
        assert!(!thematic_break("--\n"));
        assert!(!thematic_break("--- x\n"));
        assert!(!thematic_break("* * x\n"));
    }

    #[test]
    fn setext_underlines() {
        assert_eq!(setext_underline("===\n"), Some(1));
        assert_eq!(setext_underline("-\n"), Some(2));
        assert_eq!(setext_underline("=-=\n"), None);
        assert_eq!(setext_underline("== x\n"), None);
    }

    #[test]
    fn code_fences() {
        let fence = open_code_fence("```rust\n").unwrap();
        assert_eq!(fence.ch, b'`');
        assert_eq!(fence.len, 3);
        assert_eq!(fence.info.as_deref(), Some("rust"));

        assert_eq!(open_code_fence("~~~~\n").unwrap().len, 4);
        assert!(open_code_fence("``\n").is_none());
        assert!(open_code_fence("``` a ` b\n").is_none());

        assert!(close_code_fence("```\n", b'`', 3));
        assert!(close_code_fence("`````  \n", b'`', 3));
        assert!(!close_code_fence("```\n", b'`', 4));
        assert!(!close_code_fence("``` x\n", b'`', 3));
    }

    #[test]
    fn list_markers() {
        assert!(unordered_list_marker("- a\n"));
        assert!(unordered_list_marker("-\n"));
        assert!(!unordered_list_marker("-a\n"));
        assert_eq!(ordered_list_marker("12. x\n"), Some(3));
        assert_eq!(ordered_list_marker("3) x\n"), Some(2));
        assert_eq!(ordered_list_marker("3x. x\n"), None);
        assert_eq!(ordered_list_marker("12.x\n"), None);
    }

    #[test]
    fn atx_headings() {
        assert_eq!(atx_heading_start("## x\n"), Some(2));
        assert_eq!(atx_heading_start("######\n"), Some(6));
        assert_eq!(atx_heading_start("####### x\n"), None);
        assert_eq!(atx_heading_start("#x\n"), None);
    }

    #[test]
    fn table_delimiters() {
        assert!(table_delimiter_row("|---|:-:|\n"));
        assert!(table_delimiter_row("> |-|-|\n"));
        assert!(table_delimiter_row(" --- | --- \n"));
        assert!(!table_delimiter_row("   \n"));
        assert!(!table_delimiter_row("|---|x|\n"));
    }
}
