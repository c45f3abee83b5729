use super::*;

use pretty_assertions::assert_eq;

use crate::nodes::metadata_value;

#[test]
fn metadata_block() {
    assert_eq!(
        tree("---\ntitle: Hi\nauthor: Me\n---\n# H\n"),
        concat!(
            "document\n",
            "  metadata\n",
            "    metadata_text \"title: Hi\"\n",
            "    metadata_text \"author: Me\"\n",
            "  heading 1\n",
            "    text \"H\"\n",
        ),
    );
}

#[test]
fn keyword_lookup() {
    let arena = Arena::new();
    let root = parse_document(
        &arena,
        "---\ntitle: My Document\ncopyright:2026 by Me\n---\nbody\n",
        &Options::default(),
    );
    assert_eq!(metadata_value(root, "title").as_deref(), Some("My Document"));
    assert_eq!(
        metadata_value(root, "copyright").as_deref(),
        Some("2026 by Me"),
    );
    assert_eq!(metadata_value(root, "Title"), None);
    assert_eq!(metadata_value(root, "missing"), None);
}

#[test]
fn lookup_without_metadata() {
    let arena = Arena::new();
    let root = parse_document(&arena, "just text\n", &Options::default());
    assert_eq!(metadata_value(root, "title"), None);
}

#[test]
fn dots_terminator() {
    assert_eq!(
        tree("---\na: b\n...\nx\n"),
        concat!(
            "document\n",
            "  metadata\n",
            "    metadata_text \"a: b\"\n",
            "  paragraph\n",
            "    text \"x\"\n",
        ),
    );
}

#[test]
fn indented_lines_are_trimmed() {
    assert_eq!(
        tree("---\n  a: b  \n---\n"),
        concat!(
            "document\n",
            "  metadata\n",
            "    metadata_text \"a: b\"\n",
        ),
    );
}

#[test]
fn only_recognized_as_first_content() {
    assert_eq!(
        outline("x\n\n---\n"),
        concat!("document\n", "  paragraph\n", "  thematic_break\n"),
    );
}

#[test]
fn disabled_metadata_parses_as_markdown() {
    assert_eq!(
        tree_opts("---\nt: v\n---\n", &Options::none()),
        concat!(
            "document\n",
            "  thematic_break\n",
            "  heading 2\n",
            "    text \"t:\"\n",
            "    text \"v\" (ws)\n",
        ),
    );
}
