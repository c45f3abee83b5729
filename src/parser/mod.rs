//! The block structure engine.
//!
//! Lines are classified one at a time against a stack of open container
//! frames.  A frame remembers the container node, the indent column its
//! content starts at, and the fence that opened it when it is a fenced code
//! block.  Classification follows a fixed precedence: quote marker, code
//! fence, code content, metadata, setext promotion, thematic break, list
//! markers, ATX heading, table row, indented code, then the default
//! paragraph rules.  Once a line's destination block is known, lazy
//! continuation lines are merged in and the combined text goes to the
//! inline tokenizer as one logical line.

pub mod inlines;
mod line_reader;
pub mod options;
mod table;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use smallvec::SmallVec;

use crate::nodes::{AstNode, ListType, NodeCode, NodeCodeBlock, NodeValue};
use crate::parser::inlines::{make_node, RefMap};
use crate::parser::line_reader::{LineReader, MAX_LINE};
use crate::parser::table::TableState;
use crate::scanners;
use crate::strings;
use crate::Arena;

pub use crate::parser::options::{ExtensionOptions, Options};

/// The most container frames that may be open at once, the document frame
/// included.  Deeper structure stops opening new containers rather than
/// failing.
pub const MAX_STACK_DEPTH: usize = 32;

/// Parse an in-memory document and return the root of its tree.
///
/// ```
/// use minimark::nodes::collect_text;
/// use minimark::{parse_document, Arena, Options};
///
/// let arena = Arena::new();
/// let root = parse_document(&arena, "Hello, **world**.\n", &Options::default());
/// let paragraph = root.first_child().unwrap();
/// assert_eq!(collect_text(paragraph), "Hello, world.");
/// ```
pub fn parse_document<'a>(
    arena: &'a Arena<'a>,
    input: &str,
    options: &Options,
) -> &'a AstNode<'a> {
    match load(arena, input.as_bytes(), options) {
        Ok(root) => root,
        // Reading from an in-memory slice cannot fail.
        Err(_) => unreachable!(),
    }
}

/// Parse a document from a buffered reader.
pub fn load<'a, R: BufRead>(
    arena: &'a Arena<'a>,
    reader: R,
    options: &Options,
) -> io::Result<&'a AstNode<'a>> {
    let root = make_node(arena, NodeValue::Document, false);
    let mut parser = Parser::new(arena, root, options);
    let mut reader = LineReader::new(reader);
    while let Some(line) = reader.next_line()? {
        parser.process_line(&mut reader, line)?;
    }
    Ok(root)
}

/// Open `path` and parse its contents.
pub fn load_path<'a, P: AsRef<Path>>(
    arena: &'a Arena<'a>,
    path: P,
    options: &Options,
) -> io::Result<&'a AstNode<'a>> {
    let file = File::open(path)?;
    load(arena, BufReader::new(file), options)
}

#[derive(Clone, Copy)]
struct Fence {
    ch: u8,
    len: usize,
}

struct Frame<'a> {
    container: &'a AstNode<'a>,
    indent: usize,
    fence: Option<Fence>,
}

pub struct Parser<'a, 'o> {
    pub(crate) arena: &'a Arena<'a>,
    options: &'o Options,
    root: &'a AstNode<'a>,
    stack: SmallVec<[Frame<'a>; 8]>,

    /// The open leaf block receiving inline content, when there is one.
    pub(crate) block: Option<&'a AstNode<'a>>,

    /// Blank lines seen inside a code block, buffered until more content
    /// proves they are interior.  Trailing blanks are dropped with the
    /// block.
    blank_code: usize,

    pub(crate) refmap: RefMap<'a>,
    pub(crate) table: TableState,
}

impl<'a, 'o> Parser<'a, 'o> {
    fn new(arena: &'a Arena<'a>, root: &'a AstNode<'a>, options: &'o Options) -> Self {
        let mut stack = SmallVec::new();
        stack.push(Frame {
            container: root,
            indent: 0,
            fence: None,
        });
        Parser {
            arena,
            options,
            root,
            stack,
            block: None,
            blank_code: 0,
            refmap: RefMap::new(),
            table: TableState::default(),
        }
    }

    fn process_line<R: BufRead>(
        &mut self,
        reader: &mut LineReader<R>,
        mut line: String,
    ) -> io::Result<()> {
        let mut pos = strings::first_nonspace(&line);
        let mut line_start = 0;

        // Block quote marker.  Quotes never nest; the marker either
        // continues the open quote or opens a fresh one at document level.
        if line.as_bytes().get(pos) == Some(&b'>') && pos < 4 {
            if !self.quote_open() {
                self.block = None;
                self.reset_stack(1);
                let quote = self.add_child(self.root, NodeValue::BlockQuote);
                self.push_frame(quote, 2, None);
            }
            pos += 1;
            if matches!(line.as_bytes().get(pos), Some(b' ') | Some(b'\t')) {
                pos += 1;
            }
            line_start = pos;
            pos = line_start + strings::first_nonspace(&line[line_start..]);
        } else if self.quote_open() && !self.top_is_code() {
            // A markerless line only stays in the quote as a lazy
            // continuation of running content.  Blank lines, thematic
            // breaks and list markers end the quote instead.
            let rest = &line[pos..];
            if scanners::is_blank(rest)
                || scanners::thematic_break(rest)
                || scanners::unordered_list_marker(rest)
                || scanners::ordered_list_marker(rest).is_some()
            {
                self.block = None;
                self.reset_stack(1);
            }
        }

        // Code fences open and close on their own lines.
        if (pos as isize) - (self.top().indent as isize) < 4 {
            if let Some(fence) = self.top().fence {
                if scanners::close_code_fence(&line[pos..], fence.ch, fence.len) {
                    self.stack.pop();
                    self.blank_code = 0;
                    return Ok(());
                }
            } else if !self.top_is_code() {
                if let Some(open) = scanners::open_code_fence(&line[pos..]) {
                    if self.stack.len() < MAX_STACK_DEPTH {
                        self.block = None;
                        let parent = self.top().container;
                        let node = self.add_child(
                            parent,
                            NodeValue::CodeBlock(NodeCodeBlock {
                                fenced: true,
                                fence_char: open.ch,
                                fence_length: open.len,
                                info: open.info,
                            }),
                        );
                        self.push_frame(node, pos, Some(Fence {
                            ch: open.ch,
                            len: open.len,
                        }));
                        self.blank_code = 0;
                    }
                    return Ok(());
                }
            }
        }

        // Code block content.
        if self.top_is_code() {
            let indent = self.top().indent;
            if pos >= indent {
                let rest = line[indent..].to_string();
                if rest.is_empty() || rest.starts_with('\n') {
                    self.blank_code += 1;
                } else {
                    self.flush_blank_code();
                    self.add_code_line(&rest);
                }
                return Ok(());
            } else if self.top().fence.is_some() {
                if scanners::is_blank(&line[pos..]) {
                    self.blank_code += 1;
                } else {
                    self.flush_blank_code();
                    let rest = line[pos..].to_string();
                    self.add_code_line(&rest);
                }
                return Ok(());
            }
            // An indented block's under-indented line falls through and
            // closes the block below.
        }

        // Metadata, only as the document's very first content.
        if self.options.extension.metadata
            && self.root.first_child().is_none()
            && strings::trim_end(&line) == "---"
        {
            let metadata = self.add_child(self.root, NodeValue::Metadata);
            while let Some(next) = reader.next_line()? {
                let trimmed = strings::trim_end(&next);
                if trimmed == "---" || trimmed == "..." {
                    break;
                }
                let text = strings::trim_end(&next[strings::first_nonspace(&next)..]);
                self.add_child(metadata, NodeValue::MetadataText(text.to_string()));
            }
            self.block = None;
            return Ok(());
        }

        // Setext underline promotes the open paragraph.
        if let Some(level) = scanners::setext_underline(&line[pos..]) {
            if pos - line_start < 4 && pos - line_start >= self.top().indent {
                if let Some(block) = self.block {
                    if matches!(block.data.borrow().value, NodeValue::Paragraph) {
                        block.data.borrow_mut().value = NodeValue::Heading(level);
                        self.block = None;
                        return Ok(());
                    }
                }
            }
        }

        // Thematic break.
        if pos - line_start < 4 && scanners::thematic_break(&line[pos..]) {
            if line.as_bytes().first() == Some(&b'>') && self.stack.len() > 1 {
                self.reset_stack(2);
            } else {
                self.reset_stack(1);
            }
            let parent = self.top().container;
            self.add_child(parent, NodeValue::ThematicBreak);
            self.block = None;
            return Ok(());
        }

        // List markers.
        if scanners::unordered_list_marker(&line[pos..]) {
            let after = pos + 2;
            line_start = after;
            let newindent = after;
            pos = after + strings::first_nonspace(&line[after..]);
            self.open_list_item(ListType::Unordered, newindent);
            self.block = None;
            // A bullet whose content is itself break characters is a
            // thematic break inside the item.
            if scanners::thematic_break(&line[pos..]) {
                let parent = self.top().container;
                self.add_child(parent, NodeValue::ThematicBreak);
                return Ok(());
            }
        } else if let Some(marker) = scanners::ordered_list_marker(&line[pos..]) {
            let after = pos + marker + 1;
            line_start = after;
            let newindent = after;
            pos = after + strings::first_nonspace(&line[after..]);
            self.open_list_item(ListType::Ordered, newindent);
            self.block = None;
        } else if line.as_bytes().get(pos) == Some(&b'#') && pos - line_start < 4 {
            let newindent = pos;
            if let Some(level) = scanners::atx_heading_start(&line[pos..]) {
                let mut text_start = pos + level;
                text_start += strings::first_nonspace(&line[text_start..]);
                let text = strings::trim_atx_trailer(&line[text_start..]).to_string();
                let parent = self.top().container;
                let heading = self.add_child(parent, NodeValue::Heading(level as u8));
                while self.stack.len() > 1 && self.top().indent >= newindent {
                    self.stack.pop();
                }
                self.block = Some(heading);
                inlines::parse(self.arena, &mut self.refmap, heading, &text);
                return Ok(());
            }
            // Seven or more hashes, or no following whitespace: an
            // ordinary paragraph.
            while self.stack.len() > 1 && self.top().indent >= newindent {
                self.stack.pop();
            }
            self.block = None;
        } else if let Some(block) = self.block {
            // A plain line after a finished heading starts a new
            // paragraph.
            if matches!(block.data.borrow().value, NodeValue::Heading(_)) {
                self.block = None;
            }
        }

        // Flush-left content closes open list levels, but only once table
        // rows have had their chance below.
        let flush_left = self.block.is_none() && pos == 0;

        // Blank line.
        if scanners::is_blank(&line[pos..]) {
            if self.top_is_code() {
                self.blank_code += 1;
            }
            if self.top_is_table() {
                self.close_table();
            }
            self.block = None;
            return Ok(());
        }

        // Table rows.
        if self.options.extension.tables && line[pos..].contains('|') {
            let starts_table = self.top_is_table()
                || match reader.peek()? {
                    Some(next) => scanners::table_delimiter_row(next),
                    None => false,
                };
            if starts_table {
                let row = line[pos..].to_string();
                table::process_row(self, &row);
                return Ok(());
            }
        }
        if self.top_is_table() {
            self.close_table();
            self.block = None;
        }

        if flush_left {
            self.reset_stack(1);
        }

        // Indented code.
        if self.block.is_none()
            && !self.top_is_code()
            && pos - line_start >= self.top().indent + 4
        {
            if self.stack.len() < MAX_STACK_DEPTH {
                let indent = self.top().indent + 4;
                let parent = self.top().container;
                let node = self.add_child(
                    parent,
                    NodeValue::CodeBlock(NodeCodeBlock {
                        fenced: false,
                        ..Default::default()
                    }),
                );
                self.push_frame(node, indent, None);
                self.blank_code = 0;
                let rest = line[indent..].to_string();
                self.add_code_line(&rest);
            }
            return Ok(());
        }

        // Open or continue the paragraph.
        let block = match self.block {
            Some(block) if matches!(block.data.borrow().value, NodeValue::Paragraph) => block,
            _ => {
                if self.top_is_code() {
                    self.stack.pop();
                    self.blank_code = 0;
                }
                let parent = self.top().container;
                let node = self.add_child(parent, NodeValue::Paragraph);
                self.block = Some(node);
                node
            }
        };

        // Absorb lazy continuation lines into one logical line.
        loop {
            let next_len = match reader.peek()? {
                Some(next) if has_continuation(&line, next, self.top().indent) => next.len(),
                _ => break,
            };
            if line.len() + next_len > MAX_LINE {
                break;
            }
            let mut next = match reader.next_line()? {
                Some(next) => next,
                None => break,
            };
            if self.quote_open() {
                strip_quote_marker(&mut next);
            }
            line.push_str(&next);
        }

        inlines::parse(self.arena, &mut self.refmap, block, &line[pos..]);
        Ok(())
    }

    /// Pop frames while the top's content column is deeper than `indent`,
    /// then reuse or open list containers so the next item lands at the
    /// right level.
    fn open_list_item(&mut self, list_type: ListType, indent: usize) {
        while self.stack.len() > 1 && self.top().indent > indent {
            self.stack.pop();
        }
        if self.stack.len() > 1
            && self.top().indent == indent
            && matches!(self.top().container.data.borrow().value, NodeValue::Item)
        {
            self.stack.pop();
        }
        if self.stack.len() > 1 && self.top().indent == indent {
            if let NodeValue::List(open_type) = self.top().container.data.borrow().value {
                if open_type != list_type {
                    // Switching marker kinds at the same level starts a
                    // sibling list.
                    self.stack.pop();
                }
            }
        }

        let reuse = match self.top().container.data.borrow().value {
            NodeValue::List(open_type) => open_type == list_type,
            _ => false,
        };
        if !reuse && self.stack.len() < MAX_STACK_DEPTH {
            let parent = self.top().container;
            let list = self.add_child(parent, NodeValue::List(list_type));
            self.push_frame(list, indent, None);
        }
        if self.stack.len() < MAX_STACK_DEPTH {
            let parent = self.top().container;
            let item = self.add_child(parent, NodeValue::Item);
            self.push_frame(item, indent, None);
        }
    }

    fn top(&self) -> &Frame<'a> {
        // The stack always holds the document frame.
        self.stack.last().unwrap_or_else(|| unreachable!())
    }

    fn push_frame(&mut self, container: &'a AstNode<'a>, indent: usize, fence: Option<Fence>) {
        self.stack.push(Frame {
            container,
            indent,
            fence,
        });
    }

    fn reset_stack(&mut self, depth: usize) {
        if self.stack.len() > depth {
            self.stack.truncate(depth);
        }
    }

    fn quote_open(&self) -> bool {
        self.stack.len() > 1
            && matches!(
                self.stack[1].container.data.borrow().value,
                NodeValue::BlockQuote
            )
    }

    fn top_is_code(&self) -> bool {
        matches!(
            self.top().container.data.borrow().value,
            NodeValue::CodeBlock(_)
        )
    }

    pub(crate) fn top_is_table(&self) -> bool {
        matches!(self.top().container.data.borrow().value, NodeValue::Table)
    }

    fn close_table(&mut self) {
        if self.top_is_table() {
            self.stack.pop();
        }
        self.table = TableState::default();
    }

    pub(crate) fn top_container(&self) -> &'a AstNode<'a> {
        self.top().container
    }

    pub(crate) fn top_indent(&self) -> usize {
        self.top().indent
    }

    pub(crate) fn open_table(&mut self, table: &'a AstNode<'a>) -> bool {
        if self.stack.len() >= MAX_STACK_DEPTH {
            return false;
        }
        let indent = self.top().indent;
        self.push_frame(table, indent, None);
        true
    }

    pub(crate) fn add_child(
        &mut self,
        parent: &'a AstNode<'a>,
        value: NodeValue,
    ) -> &'a AstNode<'a> {
        let node = make_node(self.arena, value, false);
        parent.append(node);
        node
    }

    fn flush_blank_code(&mut self) {
        let parent = self.top().container;
        while self.blank_code > 0 {
            self.add_child(
                parent,
                NodeValue::Code(NodeCode {
                    literal: "\n".to_string(),
                    url: None,
                }),
            );
            self.blank_code -= 1;
        }
    }

    fn add_code_line(&mut self, text: &str) {
        let parent = self.top().container;
        self.add_child(
            parent,
            NodeValue::Code(NodeCode {
                literal: text.to_string(),
                url: None,
            }),
        );
    }
}

/// Whether `next` lazily continues the logical line in `line`.
///
/// A continuation must not look like the start of anything new: it is
/// non-blank, carries no fresh quote marker, is not a list marker, fence,
/// break, underline or heading, and its content starts within the open
/// frame's indent.
fn has_continuation(line: &str, next: &str, indent: usize) -> bool {
    let lb = line.as_bytes();
    let nb = next.as_bytes();
    let mut li = 0;
    let mut ni = 0;

    while li < lb.len() && lb[li].is_ascii_whitespace() {
        li += 1;
    }
    while ni < nb.len() && nb[ni].is_ascii_whitespace() {
        ni += 1;
    }
    if li < lb.len() && ni < nb.len() && lb[li] == b'>' && nb[ni] == b'>' {
        li += 1;
        ni += 1;
        while ni < nb.len() && nb[ni].is_ascii_whitespace() {
            ni += 1;
        }
    } else if ni < nb.len() && nb[ni] == b'>' {
        return false;
    }

    if ni >= nb.len() {
        return false;
    }

    let rest = &next[ni..];
    // Pipe-bearing lines go back through classification so a table can
    // open mid-paragraph; when they are not table rows they rejoin the
    // still-open paragraph anyway.
    if rest.contains('|') {
        return false;
    }
    if scanners::unordered_list_marker(rest)
        || scanners::ordered_list_marker(rest).is_some()
        || scanners::open_code_fence(rest).is_some()
        || scanners::thematic_break(rest)
        || scanners::setext_underline(rest).is_some()
        || scanners::atx_heading_start(rest).is_some()
    {
        return false;
    }

    ni <= indent
}

/// Remove a leading `>` marker (and one following space) from a merged
/// continuation line.
fn strip_quote_marker(line: &mut String) {
    let start = strings::first_nonspace(line);
    if line.as_bytes().get(start) == Some(&b'>') {
        let mut after = start + 1;
        if matches!(line.as_bytes().get(after), Some(b' ') | Some(b'\t')) {
            after += 1;
        }
        line.replace_range(..after, "");
    }
}
