use super::*;

use pretty_assertions::assert_eq;

#[test]
fn single_paragraph() {
    assert_eq!(
        tree("Hello, world.\n"),
        concat!(
            "document\n",
            "  paragraph\n",
            "    text \"Hello,\"\n",
            "    text \"world.\" (ws)\n",
        ),
    );
}

#[test]
fn continuation_lines_merge() {
    assert_eq!(
        tree("a\nb\n"),
        concat!(
            "document\n",
            "  paragraph\n",
            "    text \"a\"\n",
            "    text \"b\" (ws)\n",
        ),
    );
}

#[test]
fn blank_line_separates_paragraphs() {
    assert_eq!(
        outline("a\n\nb\n"),
        concat!("document\n", "  paragraph\n", "  paragraph\n"),
    );
}

#[test]
fn hard_break() {
    assert_eq!(
        tree("a  \nb\n"),
        concat!(
            "document\n",
            "  paragraph\n",
            "    text \"a\"\n",
            "    line_break\n",
            "    text \"b\" (ws)\n",
        ),
    );
}

#[test]
fn single_trailing_space_is_not_a_break() {
    assert_eq!(
        tree("a \nb\n"),
        concat!(
            "document\n",
            "  paragraph\n",
            "    text \"a\"\n",
            "    text \"b\" (ws)\n",
        ),
    );
}

#[test]
fn collect_text_restores_spacing() {
    assert_eq!(block_text("Hello,  *big*   world.\n", 0), "Hello, big world.");
}

#[test]
fn backslash_escapes() {
    assert_eq!(
        tree("a \\*b\\* c\n"),
        concat!(
            "document\n",
            "  paragraph\n",
            "    text \"a\"\n",
            "    text \"*b*\" (ws)\n",
            "    text \"c\" (ws)\n",
        ),
    );
}

#[test]
fn indented_line_joins_open_paragraph() {
    assert_eq!(
        tree("a\n  b\n"),
        concat!(
            "document\n",
            "  paragraph\n",
            "    text \"a\"\n",
            "    text \"b\" (ws)\n",
        ),
    );
}

#[test]
fn thematic_breaks() {
    assert_eq!(
        outline("a\n\n---\n\n- - -\n\n***\n\n___\n"),
        concat!(
            "document\n",
            "  paragraph\n",
            "  thematic_break\n",
            "  thematic_break\n",
            "  thematic_break\n",
            "  thematic_break\n",
        ),
    );
}

#[test]
fn crlf_input() {
    assert_eq!(tree("a\r\nb\r\n"), tree("a\nb\n"));
}

#[test]
fn missing_final_newline() {
    assert_eq!(tree("hello"), tree("hello\n"));
}
