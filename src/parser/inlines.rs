//! The inline span tokenizer.
//!
//! Finished logical lines arrive here after the block engine has merged
//! continuations.  The tokenizer walks the line once, left to right, and
//! emits text-bearing leaves under the open block.  Styled spans never nest:
//! emphasis, strong, strikethrough and code are leaf runs, and whitespace
//! inside a span simply flushes one leaf and starts the next with its
//! whitespace flag set.

use rustc_hash::FxHashMap;

use crate::arena_tree::Node;
use crate::nodes::{Ast, AstNode, NodeCode, NodeLink, NodeValue};
use crate::strings;
use crate::Arena;
use std::cell::RefCell;

/// The reference-definition table for one document.
///
/// Definitions and uses may arrive in either order.  A use seen before its
/// definition parks the node in a pending list; the definition patches every
/// parked node the moment its URL arrives.  The first definition of a name
/// wins.  Names fold ASCII case.
pub struct RefMap<'a> {
    map: FxHashMap<String, Reference<'a>>,
}

struct Reference<'a> {
    url: Option<String>,
    pending: Vec<&'a AstNode<'a>>,
}

impl<'a> RefMap<'a> {
    pub fn new() -> Self {
        RefMap {
            map: FxHashMap::default(),
        }
    }

    /// Record a definition (`url` present) or a use (`node` present) of a
    /// named reference.
    pub fn add(&mut self, name: &str, url: Option<&str>, node: Option<&'a AstNode<'a>>) {
        let entry = self
            .map
            .entry(strings::fold_reference(name))
            .or_insert_with(|| Reference {
                url: None,
                pending: Vec::new(),
            });

        if entry.url.is_none() {
            if let Some(url) = url {
                entry.url = Some(url.to_string());
                for pending in entry.pending.drain(..) {
                    set_url(pending, url);
                }
            }
        }

        if let Some(node) = node {
            match entry.url {
                Some(ref url) => set_url(node, url),
                None => entry.pending.push(node),
            }
        }
    }
}

fn set_url<'a>(node: &'a AstNode<'a>, url: &str) {
    match node.data.borrow_mut().value {
        NodeValue::Link(ref mut nl) | NodeValue::Image(ref mut nl) => {
            nl.url = Some(url.to_string())
        }
        NodeValue::Code(ref mut nc) => nc.url = Some(url.to_string()),
        _ => {}
    }
}

/// Tokenize one logical line into leaves under `parent`.
pub fn parse<'a>(
    arena: &'a Arena<'a>,
    refmap: &mut RefMap<'a>,
    parent: &'a AstNode<'a>,
    line: &str,
) {
    Tokenizer {
        arena,
        refmap,
        parent,
        line,
        bytes: line.as_bytes(),
        pos: 0,
        span: Span::Normal,
        open_delim: (0, 0),
        buf: None,
        whitespace: parent.last_child().is_some(),
    }
    .run();
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Span {
    Normal,
    Emph,
    Strong,
    Struck,
    Code,
}

struct Tokenizer<'a, 'r> {
    arena: &'a Arena<'a>,
    refmap: &'r mut RefMap<'a>,
    parent: &'a AstNode<'a>,
    line: &'r str,
    bytes: &'r [u8],
    pos: usize,
    span: Span,

    /// The delimiter that opened the current styled span, as a character
    /// and run length.  For code spans the length doubles as the minimum
    /// closing run.
    open_delim: (u8, usize),

    /// The text accumulated for the next leaf, if any.
    buf: Option<String>,

    /// Whether whitespace preceded the next leaf to be emitted.
    whitespace: bool,
}

impl<'a, 'r> Tokenizer<'a, 'r> {
    fn run(&mut self) {
        while self.pos < self.bytes.len() {
            let ch = self.bytes[self.pos];

            if ch.is_ascii_whitespace() && self.span != Span::Code {
                self.flush();
                self.whitespace = true;
                // Two spaces immediately before a line end force a break.
                if ch == b' '
                    && self.bytes.get(self.pos + 1) == Some(&b' ')
                    && self.bytes.get(self.pos + 2) == Some(&b'\n')
                {
                    let node = make_node(self.arena, NodeValue::LineBreak, false);
                    self.parent.append(node);
                }
                self.pos += 1;
                continue;
            }

            match ch {
                b'!' if self.span != Span::Code && self.bytes.get(self.pos + 1) == Some(&b'[') => {
                    self.link(true)
                }
                b'[' if self.span != Span::Code => self.link(false),
                b'<' if self.span != Span::Code => self.autolink(),
                b'*' | b'_' if self.span != Span::Code && self.emphasis_allowed() => {
                    self.emphasis(ch)
                }
                b'~' if self.span != Span::Code && self.bytes.get(self.pos + 1) == Some(&b'~') => {
                    self.strikethrough()
                }
                b'`' => self.backtick(),
                b'\\' if self.pos + 1 < self.bytes.len() && self.bytes[self.pos + 1] != b'\n' => {
                    self.pos += 1;
                    self.push_current_char();
                }
                _ => self.push_current_char(),
            }
        }
        self.flush();
    }

    /// Emphasis delimiters are inert inside a word: they only count at a
    /// span start, after punctuation, or while a styled span is open.
    fn emphasis_allowed(&self) -> bool {
        self.buf.is_none()
            || self.span != Span::Normal
            || (self.pos > 0 && self.bytes[self.pos - 1].is_ascii_punctuation())
    }

    fn emphasis(&mut self, ch: u8) {
        if self.span == Span::Normal {
            let len = self.run_len().min(2);
            let delim = &self.line[self.pos..self.pos + len];
            // Without a later matching run this can never close; stay
            // literal.
            if !self.line[self.pos + len..].contains(delim) {
                self.push(ch as char);
                self.pos += 1;
                return;
            }
            if self
                .bytes
                .get(self.pos + len)
                .map_or(true, |b| b.is_ascii_whitespace())
            {
                self.push(ch as char);
                self.pos += 1;
                return;
            }
            self.flush();
            self.span = if len == 2 { Span::Strong } else { Span::Emph };
            self.open_delim = (ch, len);
            self.buf = Some(String::new());
            self.pos += len;
        } else {
            self.close_or_literal(ch);
        }
    }

    fn strikethrough(&mut self) {
        if self.span == Span::Normal {
            if !self.line[self.pos + 2..].contains("~~")
                || self
                    .bytes
                    .get(self.pos + 2)
                    .map_or(true, |b| b.is_ascii_whitespace())
            {
                self.push('~');
                self.pos += 1;
                return;
            }
            self.flush();
            self.span = Span::Struck;
            self.open_delim = (b'~', 2);
            self.buf = Some(String::new());
            self.pos += 2;
        } else {
            self.close_or_literal(b'~');
        }
    }

    /// Inside a styled span, a delimiter run either closes the span or is
    /// literal content.  Closing requires the exact opening run, not
    /// directly after whitespace.
    fn close_or_literal(&mut self, ch: u8) {
        let (open_ch, open_len) = self.open_delim;
        let run = self.run_len();
        let after_whitespace =
            self.pos == 0 || self.bytes[self.pos - 1].is_ascii_whitespace();

        if ch == open_ch && run == open_len && !after_whitespace {
            self.flush();
            self.span = Span::Normal;
            self.open_delim = (0, 0);
            self.pos += run;
        } else {
            self.push(ch as char);
            self.pos += 1;
        }
    }

    fn backtick(&mut self) {
        let run = self.run_len();
        if self.span == Span::Code {
            let (_, open_len) = self.open_delim;
            if run >= open_len {
                let text = self.buf.take().unwrap_or_default();
                let text = strings::trim_end(&text).to_string();
                if text.is_empty() && self.whitespace {
                    // An all-whitespace span keeps a single space but
                    // counts as its own separator.
                    self.whitespace = false;
                    self.add(NodeValue::Code(NodeCode {
                        literal: " ".to_string(),
                        url: None,
                    }));
                } else {
                    self.add(NodeValue::Code(NodeCode {
                        literal: text,
                        url: None,
                    }));
                }
                self.span = Span::Normal;
                self.open_delim = (0, 0);
                self.pos += run;
            } else {
                for _ in 0..run {
                    self.push('`');
                }
                self.pos += run;
            }
        } else {
            let len = run.min(3);
            let delim = &self.line[self.pos..self.pos + len];
            if !self.line[self.pos + len..].contains(delim) {
                self.push('`');
                self.pos += 1;
                return;
            }
            self.flush();
            self.span = Span::Code;
            self.open_delim = (b'`', len);
            self.buf = Some(String::new());
            self.pos += len;
            if matches!(self.bytes.get(self.pos), Some(b' ') | Some(b'\t')) {
                self.whitespace = true;
                while matches!(self.bytes.get(self.pos), Some(b' ') | Some(b'\t')) {
                    self.pos += 1;
                }
            }
        }
    }

    fn autolink(&mut self) {
        match self.line[self.pos + 1..].find('>') {
            None => {
                self.push('<');
                self.pos += 1;
            }
            Some(rel) => {
                self.flush();
                let url = self.line[self.pos + 1..self.pos + 1 + rel].to_string();
                self.add(NodeValue::Link(NodeLink {
                    text: url.clone(),
                    url: Some(url),
                    title: None,
                }));
                self.pos += rel + 2;
            }
        }
    }

    fn link(&mut self, image: bool) {
        let bracket = if image { self.pos + 1 } else { self.pos };

        if !image {
            if let Some(mark) = self.checkbox() {
                self.add(NodeValue::Checkbox(mark));
                self.pos += 3;
                return;
            }
        }

        let (label, mut i) = match scan_label(self.line, bracket) {
            Some(scanned) => scanned,
            None => {
                // No closing bracket anywhere; the marker is literal.
                if image {
                    self.push('!');
                }
                self.push('[');
                self.pos = bracket + 1;
                return;
            }
        };

        self.flush();

        let mut url: Option<String> = None;
        let mut title: Option<String> = None;
        let mut refname: Option<String> = None;
        let len = self.bytes.len();

        match self.bytes.get(i) {
            Some(b'(') => {
                i += 1;
                let start = i;
                while i < len && !self.bytes[i].is_ascii_whitespace() && self.bytes[i] != b')' {
                    i += 1;
                }
                url = Some(self.line[start..i].to_string());
                while matches!(self.bytes.get(i), Some(b' ') | Some(b'\t')) {
                    i += 1;
                }
                if self.bytes.get(i) == Some(&b'"') {
                    let start = i + 1;
                    let mut close = start;
                    while close < len && self.bytes[close] != b'"' {
                        close += 1;
                    }
                    if close < len {
                        title = Some(self.line[start..close].to_string());
                        i = close + 1;
                    }
                }
                while i < len && self.bytes[i] != b')' {
                    i += 1;
                }
                if i < len {
                    i += 1;
                }
            }
            Some(b'[') => {
                i += 1;
                let start = i;
                while i < len && self.bytes[i] != b']' {
                    i += 1;
                }
                let name = self.line[start..i].trim();
                refname = Some(if name.is_empty() {
                    label.clone()
                } else {
                    name.to_string()
                });
                if i < len {
                    i += 1;
                }
            }
            Some(b':') => {
                // A reference definition; nothing is rendered and the rest
                // of the line belongs to it.
                i += 1;
                while matches!(self.bytes.get(i), Some(b' ') | Some(b'\t')) {
                    i += 1;
                }
                let start = i;
                while i < len && !self.bytes[i].is_ascii_whitespace() {
                    i += 1;
                }
                self.refmap.add(&label, Some(&self.line[start..i]), None);
                self.pos = len;
                return;
            }
            _ => refname = Some(label.clone()),
        }

        let node = if label.len() >= 2 && label.starts_with('`') && label.ends_with('`') {
            let literal = label[1..label.len() - 1].to_string();
            self.add(NodeValue::Code(NodeCode {
                literal,
                url: url.clone(),
            }))
        } else if image {
            self.add(NodeValue::Image(NodeLink {
                text: label.clone(),
                url: url.clone(),
                title,
            }))
        } else {
            self.add(NodeValue::Link(NodeLink {
                text: label.clone(),
                url: url.clone(),
                title,
            }))
        };

        if url.is_none() {
            if let Some(name) = refname {
                self.refmap.add(&name, None, Some(node));
            }
        }

        self.pos = i;
    }

    /// A `[ ]`, `[x]` or `[X]` opening a list item's text is a task
    /// checkbox, not a link.
    fn checkbox(&mut self) -> Option<Option<char>> {
        if self.buf.is_some() || self.parent.first_child().is_some() {
            return None;
        }
        if !matches!(self.parent.data.borrow().value, NodeValue::Paragraph) {
            return None;
        }
        let item = self.parent.parent()?;
        if !matches!(item.data.borrow().value, NodeValue::Item) {
            return None;
        }
        let mark = *self.bytes.get(self.pos + 1)?;
        if self.bytes.get(self.pos + 2) != Some(&b']') {
            return None;
        }
        if !self
            .bytes
            .get(self.pos + 3)
            .map_or(true, |b| b.is_ascii_whitespace())
        {
            return None;
        }
        match mark {
            b' ' => Some(None),
            b'x' | b'X' => Some(Some(mark as char)),
            _ => None,
        }
    }

    fn run_len(&self) -> usize {
        let ch = self.bytes[self.pos];
        self.bytes[self.pos..].iter().take_while(|&&b| b == ch).count()
    }

    fn push(&mut self, ch: char) {
        self.buf.get_or_insert_with(String::new).push(ch);
    }

    fn push_current_char(&mut self) {
        if let Some(ch) = self.line[self.pos..].chars().next() {
            self.push(ch);
            self.pos += ch.len_utf8();
        } else {
            self.pos += 1;
        }
    }

    fn flush(&mut self) {
        if let Some(text) = self.buf.take() {
            let value = match self.span {
                Span::Normal => NodeValue::Text(text),
                Span::Emph => NodeValue::Emph(text),
                Span::Strong => NodeValue::Strong(text),
                Span::Struck => NodeValue::Strikethrough(text),
                Span::Code => NodeValue::Code(NodeCode {
                    literal: text,
                    url: None,
                }),
            };
            self.add(value);
        }
    }

    fn add(&mut self, value: NodeValue) -> &'a AstNode<'a> {
        let node = make_node(self.arena, value, self.whitespace);
        self.parent.append(node);
        self.whitespace = false;
        node
    }
}

/// Scan a bracketed label starting at the `[` at `open`.  Brackets nest and
/// quoted stretches hide brackets; an unbalanced label fails the scan.
fn scan_label(line: &str, open: usize) -> Option<(String, usize)> {
    let bytes = line.as_bytes();
    let mut i = open + 1;
    let mut depth = 1usize;

    while i < bytes.len() {
        match bytes[i] {
            b'"' => {
                i += 1;
                while i < bytes.len() && bytes[i] != b'"' {
                    i += 1;
                }
                if i == bytes.len() {
                    return None;
                }
            }
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return Some((line[open + 1..i].to_string(), i + 1));
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

pub(crate) fn make_node<'a>(arena: &'a Arena<'a>, value: NodeValue, whitespace: bool) -> &'a AstNode<'a> {
    arena.alloc(Node::new(RefCell::new(Ast::new(value, whitespace))))
}
