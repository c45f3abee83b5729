use super::*;

use pretty_assertions::assert_eq;

#[test]
fn unordered_list() {
    assert_eq!(
        tree("- a\n- b\n"),
        concat!(
            "document\n",
            "  list unordered\n",
            "    item\n",
            "      paragraph\n",
            "        text \"a\"\n",
            "    item\n",
            "      paragraph\n",
            "        text \"b\"\n",
        ),
    );
}

#[test]
fn bullet_characters_share_a_list() {
    assert_eq!(tree("- a\n+ b\n* c\n"), tree("- a\n- b\n- c\n"));
}

#[test]
fn ordered_list() {
    assert_eq!(
        outline("1. a\n2. b\n"),
        concat!(
            "document\n",
            "  list ordered\n",
            "    item\n",
            "      paragraph\n",
            "    item\n",
            "      paragraph\n",
        ),
    );
}

#[test]
fn paren_markers_are_ordered() {
    assert_eq!(
        outline("a\n1) b\n"),
        concat!(
            "document\n",
            "  paragraph\n",
            "  list ordered\n",
            "    item\n",
            "      paragraph\n",
        ),
    );
}

#[test]
fn nested_list() {
    assert_eq!(
        outline("- a\n  - b\n"),
        concat!(
            "document\n",
            "  list unordered\n",
            "    item\n",
            "      paragraph\n",
            "      list unordered\n",
            "        item\n",
            "          paragraph\n",
        ),
    );
}

#[test]
fn any_extra_indent_nests() {
    assert_eq!(outline("- a\n - b\n"), outline("- a\n  - b\n"));
}

#[test]
fn dedent_returns_to_outer_list() {
    assert_eq!(
        outline("- a\n  - b\n- c\n"),
        concat!(
            "document\n",
            "  list unordered\n",
            "    item\n",
            "      paragraph\n",
            "      list unordered\n",
            "        item\n",
            "          paragraph\n",
            "    item\n",
            "      paragraph\n",
        ),
    );
}

#[test]
fn marker_kind_switch_starts_sibling_list() {
    assert_eq!(
        outline("1. a\n - b\n"),
        concat!(
            "document\n",
            "  list ordered\n",
            "    item\n",
            "      paragraph\n",
            "  list unordered\n",
            "    item\n",
            "      paragraph\n",
        ),
    );
}

#[test]
fn item_text_continues_on_the_next_line() {
    assert_eq!(
        tree("- a\n  b\n"),
        concat!(
            "document\n",
            "  list unordered\n",
            "    item\n",
            "      paragraph\n",
            "        text \"a\"\n",
            "        text \"b\" (ws)\n",
        ),
    );
}

#[test]
fn bullet_of_break_characters_is_a_break_in_the_item() {
    assert_eq!(
        outline("- ***\n"),
        concat!(
            "document\n",
            "  list unordered\n",
            "    item\n",
            "      thematic_break\n",
        ),
    );
}

#[test]
fn spaced_dashes_are_a_document_break() {
    assert_eq!(outline("- - -\n"), concat!("document\n", "  thematic_break\n"));
}

#[test]
fn empty_item() {
    assert_eq!(
        outline("+ a\n+\n"),
        concat!(
            "document\n",
            "  list unordered\n",
            "    item\n",
            "      paragraph\n",
            "    item\n",
        ),
    );
}

#[test]
fn checkboxes() {
    assert_eq!(
        tree("- [ ] a\n- [x] b\n"),
        concat!(
            "document\n",
            "  list unordered\n",
            "    item\n",
            "      paragraph\n",
            "        checkbox unchecked\n",
            "        text \"a\" (ws)\n",
            "    item\n",
            "      paragraph\n",
            "        checkbox 'x'\n",
            "        text \"b\" (ws)\n",
        ),
    );
}

#[test]
fn bracketed_x_outside_a_list_is_a_reference() {
    assert_eq!(
        tree("[x] a\n"),
        concat!(
            "document\n",
            "  paragraph\n",
            "    link \"x\"\n",
            "    text \"a\" (ws)\n",
        ),
    );
}

#[test]
fn lazy_item_continuation() {
    assert_eq!(tree("- a\nb\n"), tree("- a\n  b\n"));
}

#[test]
fn flush_left_text_after_a_blank_closes_the_list() {
    assert_eq!(
        outline("- a\n\nb\n"),
        concat!(
            "document\n",
            "  list unordered\n",
            "    item\n",
            "      paragraph\n",
            "  paragraph\n",
        ),
    );
}
