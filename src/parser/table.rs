//! Table row assembly.
//!
//! The block engine hands every pipe-bearing line of an open (or opening)
//! table here.  The first row becomes the header, the second must be the
//! delimiter row fixing column alignments, and the rest are body rows.
//! Ragged rows are tolerated: the column count grows to the widest row seen
//! and short body rows are padded with empty cells.

use crate::nodes::{NodeTableCell, NodeValue, TableAlignment};
use crate::parser::{inlines, Parser};
use crate::strings;

#[derive(Default)]
pub(crate) struct TableState {
    /// Per-column alignments from the delimiter row.
    alignments: Vec<TableAlignment>,

    /// Rows processed so far; -1 before the header row is done.
    rows: isize,

    /// The widest row seen, for padding.
    columns: usize,
}

pub(crate) fn process_row<'a, 'o>(parser: &mut Parser<'a, 'o>, line: &str) {
    if !parser.top_is_table() {
        let table = parser.add_child(parser.top_container(), NodeValue::Table);
        if !parser.open_table(table) {
            return;
        }
        let header = parser.add_child(table, NodeValue::TableHeader);
        parser.block = Some(header);
        parser.table = TableState {
            alignments: Vec::new(),
            rows: -1,
            columns: 0,
        };
    } else if parser.table.rows == 1 {
        let table = parser.top_container();
        let body = parser.add_child(table, NodeValue::TableBody);
        parser.block = Some(body);
    } else if parser.table.rows == 0 {
        // The delimiter row produces no cells.
        parser.block = None;
    }

    let mut content = strings::trim_end(line);
    if let Some(rest) = content.strip_prefix('|') {
        content = rest;
    }
    if let Some(rest) = content.strip_suffix('|') {
        content = rest;
    }

    let header = match parser.block {
        Some(section) => matches!(section.data.borrow().value, NodeValue::TableHeader),
        None => false,
    };
    let row_node = match parser.block {
        Some(section) => Some(parser.add_child(section, NodeValue::TableRow)),
        None => None,
    };

    let mut columns = 0;
    if !content.is_empty() {
        for (col, cell) in content.split('|').enumerate() {
            columns = col + 1;
            match row_node {
                Some(row) => {
                    let alignment = if header {
                        TableAlignment::Left
                    } else {
                        parser
                            .table
                            .alignments
                            .get(col)
                            .copied()
                            .unwrap_or_default()
                    };
                    let cell_node = parser.add_child(
                        row,
                        NodeValue::TableCell(NodeTableCell { alignment, header }),
                    );
                    inlines::parse(parser.arena, &mut parser.refmap, cell_node, cell.trim());
                }
                None => {
                    let cell = cell.trim();
                    let left = cell.starts_with(':');
                    let right = cell.ends_with(':');
                    let alignment = if left && right {
                        TableAlignment::Center
                    } else if right {
                        TableAlignment::Right
                    } else {
                        TableAlignment::Left
                    };
                    while parser.table.alignments.len() <= col {
                        parser.table.alignments.push(TableAlignment::Left);
                    }
                    parser.table.alignments[col] = alignment;
                }
            }
        }
    }

    if columns > parser.table.columns {
        parser.table.columns = columns;
    } else if let Some(row) = row_node {
        if !header {
            for col in columns..parser.table.columns {
                let alignment = parser
                    .table
                    .alignments
                    .get(col)
                    .copied()
                    .unwrap_or_default();
                parser.add_child(
                    row,
                    NodeValue::TableCell(NodeTableCell {
                        alignment,
                        header: false,
                    }),
                );
            }
        }
    }

    parser.table.rows += 1;
}
