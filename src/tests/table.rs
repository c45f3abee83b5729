use super::*;

use pretty_assertions::assert_eq;

#[test]
fn basic_table() {
    assert_eq!(
        tree("| a | b |\n|---|:-:|\n| c | d |\n"),
        concat!(
            "document\n",
            "  table\n",
            "    table_header\n",
            "      table_row\n",
            "        table_cell left\n",
            "          text \"a\"\n",
            "        table_cell left\n",
            "          text \"b\"\n",
            "    table_body\n",
            "      table_row\n",
            "        table_cell left\n",
            "          text \"c\"\n",
            "        table_cell center\n",
            "          text \"d\"\n",
        ),
    );
}

#[test]
fn column_alignments() {
    assert_eq!(
        outline("| a | b | c |\n|:--|:-:|--:|\n| d | e | f |\n"),
        concat!(
            "document\n",
            "  table\n",
            "    table_header\n",
            "      table_row\n",
            "        table_cell left\n",
            "        table_cell left\n",
            "        table_cell left\n",
            "    table_body\n",
            "      table_row\n",
            "        table_cell left\n",
            "        table_cell center\n",
            "        table_cell right\n",
        ),
    );
}

#[test]
fn table_directly_after_a_paragraph() {
    assert_eq!(
        outline("123\n456\n| a | b |\n|---|---|\n| d | e |\n"),
        concat!(
            "document\n",
            "  paragraph\n",
            "  table\n",
            "    table_header\n",
            "      table_row\n",
            "        table_cell left\n",
            "        table_cell left\n",
            "    table_body\n",
            "      table_row\n",
            "        table_cell left\n",
            "        table_cell left\n",
        ),
    );
}

#[test]
fn short_rows_are_padded() {
    assert_eq!(
        tree("| a | b |\n|---|---|\n| c |\n| d | e | f |\n"),
        concat!(
            "document\n",
            "  table\n",
            "    table_header\n",
            "      table_row\n",
            "        table_cell left\n",
            "          text \"a\"\n",
            "        table_cell left\n",
            "          text \"b\"\n",
            "    table_body\n",
            "      table_row\n",
            "        table_cell left\n",
            "          text \"c\"\n",
            "        table_cell left\n",
            "      table_row\n",
            "        table_cell left\n",
            "          text \"d\"\n",
            "        table_cell left\n",
            "          text \"e\"\n",
            "        table_cell left\n",
            "          text \"f\"\n",
        ),
    );
}

#[test]
fn blank_line_closes_the_table() {
    assert_eq!(
        outline("| a |\n|---|\n| b |\n\n| c |\n"),
        concat!(
            "document\n",
            "  table\n",
            "    table_header\n",
            "      table_row\n",
            "        table_cell left\n",
            "    table_body\n",
            "      table_row\n",
            "        table_cell left\n",
            "  paragraph\n",
        ),
    );
}

#[test]
fn pipe_line_without_delimiter_is_a_paragraph() {
    assert_eq!(
        outline("| not | a | table |\n"),
        concat!("document\n", "  paragraph\n"),
    );
}

#[test]
fn header_without_body() {
    assert_eq!(
        outline("| a |\n|---|\n"),
        concat!(
            "document\n",
            "  table\n",
            "    table_header\n",
            "      table_row\n",
            "        table_cell left\n",
        ),
    );
}

#[test]
fn table_inside_a_quote() {
    assert_eq!(
        tree("> | a |\n> |---|\n> | b |\n"),
        concat!(
            "document\n",
            "  block_quote\n",
            "    table\n",
            "      table_header\n",
            "        table_row\n",
            "          table_cell left\n",
            "            text \"a\"\n",
            "      table_body\n",
            "        table_row\n",
            "          table_cell left\n",
            "            text \"b\"\n",
        ),
    );
}

#[test]
fn table_inside_a_list_item() {
    assert_eq!(
        outline("- | a |\n  |---|\n  | b |\n"),
        concat!(
            "document\n",
            "  list unordered\n",
            "    item\n",
            "      table\n",
            "        table_header\n",
            "          table_row\n",
            "            table_cell left\n",
            "        table_body\n",
            "          table_row\n",
            "            table_cell left\n",
        ),
    );
}

#[test]
fn cell_text_is_inline_parsed() {
    assert_eq!(
        tree("| *a* |\n|---|\n| `b` |\n"),
        concat!(
            "document\n",
            "  table\n",
            "    table_header\n",
            "      table_row\n",
            "        table_cell left\n",
            "          emph \"a\"\n",
            "    table_body\n",
            "      table_row\n",
            "        table_cell left\n",
            "          code \"b\"\n",
        ),
    );
}

#[test]
fn tables_disabled() {
    assert_eq!(
        tree_opts("| a |\n|---|\n| b |\n", &Options::none()),
        concat!(
            "document\n",
            "  paragraph\n",
            "    text \"|\"\n",
            "    text \"a\" (ws)\n",
            "    text \"|\" (ws)\n",
            "    text \"|---|\" (ws)\n",
            "    text \"|\" (ws)\n",
            "    text \"b\" (ws)\n",
            "    text \"|\" (ws)\n",
        ),
    );
}
