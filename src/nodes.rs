//! The document tree.

use crate::arena_tree::Node;
use std::cell::RefCell;

/// The core node enum.  Every node in a parsed document carries one of these
/// values, wrapped in [`Ast`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeValue {
    /// The root of every document.  Contains **blocks**.
    Document,

    /// **Block**.  The document's leading metadata ("front matter") block.
    /// Contains [`MetadataText`](NodeValue::MetadataText) leaves, one per
    /// line.
    ///
    /// ``` md
    /// ---
    /// title: My Document
    /// ---
    /// ```
    Metadata,

    /// **Block**.  A block quote.  Contains other **blocks**.
    ///
    /// ``` md
    /// > A block quote.
    /// ```
    BlockQuote,

    /// **Block**.  A list.  Contains [`Item`](NodeValue::Item)s.
    ///
    /// ``` md
    /// - An unordered list
    /// - Another item
    ///
    /// 1. An ordered list
    /// 2. Another item
    /// ```
    List(ListType),

    /// **Block**.  A list item.  Contains other **blocks**.
    Item,

    /// **Block**.  A table.  Contains a [`TableHeader`](NodeValue::TableHeader)
    /// followed by a [`TableBody`](NodeValue::TableBody).
    ///
    /// ``` md
    /// | a | b |
    /// |---|---|
    /// | c | d |
    /// ```
    Table,

    /// **Block**.  A table's header section.  Contains one
    /// [`TableRow`](NodeValue::TableRow).
    TableHeader,

    /// **Block**.  A table's body section.  Contains
    /// [`TableRow`](NodeValue::TableRow)s.
    TableBody,

    /// **Block**.  A table row.  Contains
    /// [`TableCell`](NodeValue::TableCell)s.
    TableRow,

    /// **Block**.  A table cell.  Contains **inlines**.
    TableCell(NodeTableCell),

    /// **Block**.  A heading, with level 1 through 6.  Contains **inlines**.
    ///
    /// ``` md
    /// # Heading
    ///
    /// Heading
    /// =======
    /// ```
    Heading(u8),

    /// **Block**.  A paragraph.  Contains **inlines**.
    Paragraph,

    /// **Block**.  A code block, fenced or indented.  Contains
    /// [`Code`](NodeValue::Code) leaves, one per source line, each with its
    /// trailing newline.
    CodeBlock(NodeCodeBlock),

    /// **Block**.  A thematic break.  Has no children.
    ///
    /// ``` md
    /// ---
    /// ```
    ThematicBreak,

    /// **Inline**.  A plain text run.
    Text(String),

    /// **Inline**.  An emphasized text run.
    ///
    /// ``` md
    /// *emphasis*
    /// ```
    Emph(String),

    /// **Inline**.  A strongly emphasized text run.
    ///
    /// ``` md
    /// **strong**
    /// ```
    Strong(String),

    /// **Inline**.  A struck-through text run.
    ///
    /// ``` md
    /// ~~deleted~~
    /// ```
    Strikethrough(String),

    /// **Inline**.  A link's visible text, carrying the destination once it
    /// is known.
    Link(NodeLink),

    /// **Inline**.  An image's alternative text, carrying the source URL.
    ///
    /// ``` md
    /// ![alt](/image.png)
    /// ```
    Image(NodeLink),

    /// **Inline**.  A code span, or one line of a code block.  A code span
    /// whose label forms a link carries the destination URL.
    Code(NodeCode),

    /// **Inline**.  A hard line break.
    LineBreak,

    /// **Inline**.  A soft line break.  Defined for traversal completeness;
    /// the parser merges continuation lines instead of emitting these.
    SoftBreak,

    /// **Inline**.  One line of the document's metadata block.
    MetadataText(String),

    /// **Inline**.  A task list checkbox at the start of a list item.
    /// `Some` holds the mark character when checked.
    ///
    /// ``` md
    /// - [x] Done
    /// - [ ] Not done
    /// ```
    Checkbox(Option<char>),
}

/// The kind of list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListType {
    /// An unordered list, bulleted with `-`, `+` or `*`.
    Unordered,

    /// An ordered list, numbered `1.` or `1)`.
    Ordered,
}

/// Alignment of a single table column, taken from the delimiter row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableAlignment {
    /// Left-aligned; also the default when the delimiter row says nothing.
    Left,

    /// Center-aligned (`:---:`).
    Center,

    /// Right-aligned (`---:`).
    Right,
}

impl Default for TableAlignment {
    fn default() -> Self {
        TableAlignment::Left
    }
}

/// The details of a table cell.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NodeTableCell {
    /// Column alignment inherited from the delimiter row.
    pub alignment: TableAlignment,

    /// Whether the cell belongs to the header row.
    pub header: bool,
}

/// The details of a link or image.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NodeLink {
    /// The visible text (alternative text for images).
    pub text: String,

    /// The destination.  `None` until a matching reference definition is
    /// seen, and stays `None` if the reference never resolves.
    pub url: Option<String>,

    /// The quoted title, if the destination carried one.
    pub title: Option<String>,
}

/// The details of an inline code span or a code block line.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NodeCode {
    /// The literal contents.  For a code block line this includes the
    /// trailing newline.
    pub literal: String,

    /// The destination, for a code span whose label forms a link.
    pub url: Option<String>,
}

/// The details of a code block.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NodeCodeBlock {
    /// Whether the block was fence-delimited rather than indented.
    pub fenced: bool,

    /// For fenced blocks, the fence character (`` ` `` or `~`).
    pub fence_char: u8,

    /// For fenced blocks, the length of the opening fence.
    pub fence_length: usize,

    /// The word following the opening fence, usually a language name.
    pub info: Option<String>,
}

impl NodeValue {
    /// Whether the node is a block: a container or structural node rather
    /// than a text-bearing leaf.
    pub fn block(&self) -> bool {
        matches!(
            *self,
            NodeValue::Document
                | NodeValue::Metadata
                | NodeValue::BlockQuote
                | NodeValue::List(..)
                | NodeValue::Item
                | NodeValue::Table
                | NodeValue::TableHeader
                | NodeValue::TableBody
                | NodeValue::TableRow
                | NodeValue::TableCell(..)
                | NodeValue::Heading(..)
                | NodeValue::Paragraph
                | NodeValue::CodeBlock(..)
                | NodeValue::ThematicBreak
        )
    }

    /// The node's text, if it is a text-bearing leaf.  Links yield their
    /// visible text and images their alternative text.
    pub fn text(&self) -> Option<&str> {
        match *self {
            NodeValue::Text(ref t)
            | NodeValue::Emph(ref t)
            | NodeValue::Strong(ref t)
            | NodeValue::Strikethrough(ref t)
            | NodeValue::MetadataText(ref t) => Some(t),
            NodeValue::Link(ref nl) | NodeValue::Image(ref nl) => Some(&nl.text),
            NodeValue::Code(ref nc) => Some(&nc.literal),
            _ => None,
        }
    }

    /// The node's URL: a link or image destination, or the destination of a
    /// code span whose label forms a link.
    pub fn url(&self) -> Option<&str> {
        match *self {
            NodeValue::Link(ref nl) | NodeValue::Image(ref nl) => nl.url.as_deref(),
            NodeValue::Code(ref nc) => nc.url.as_deref(),
            _ => None,
        }
    }

    /// The node's extra attribute: a link or image title, or a code block's
    /// info word.
    pub fn extra(&self) -> Option<&str> {
        match *self {
            NodeValue::Link(ref nl) | NodeValue::Image(ref nl) => nl.title.as_deref(),
            NodeValue::CodeBlock(ref ncb) => ncb.info.as_deref(),
            _ => None,
        }
    }
}

/// A single node's data: its value plus the whitespace flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ast {
    /// The node value.
    pub value: NodeValue,

    /// Whether whitespace preceded this node in the source.  Rendering
    /// concatenated leaves faithfully requires exactly one space wherever
    /// this is set.
    pub whitespace: bool,
}

impl Ast {
    /// Create a new `Ast` for a node value.
    pub fn new(value: NodeValue, whitespace: bool) -> Self {
        Ast { value, whitespace }
    }
}

/// The type of a node within a document.
///
/// It is bound by the lifetime `'a`, which corresponds to the [`Arena`](crate::Arena)
/// nodes are allocated in.  Child `Ast`s are wrapped in `RefCell` for
/// mutability; the trees are not `Sync`, and sharing a document between
/// threads requires handing the whole arena over.
pub type AstNode<'a> = Node<'a, RefCell<Ast>>;

/// Concatenate the text of every leaf under `node`, in tree order, inserting
/// one space wherever a leaf's whitespace flag is set.
pub fn collect_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut out = String::new();
    for descendant in node.descendants().skip(1) {
        let data = descendant.data.borrow();
        if let Some(text) = data.value.text() {
            if data.whitespace && !out.is_empty() {
                out.push(' ');
            }
            out.push_str(text);
        }
    }
    out
}

/// Look up `keyword` in the document's leading metadata block.
///
/// Matches a `keyword:` line prefix, case-sensitively, and returns the value
/// with the whitespace after the colon stripped.  Returns `None` when the
/// document has no metadata block or the keyword is absent.
pub fn metadata_value<'a>(root: &'a AstNode<'a>, keyword: &str) -> Option<String> {
    let metadata = root.first_child()?;
    if !matches!(metadata.data.borrow().value, NodeValue::Metadata) {
        return None;
    }

    for child in metadata.children() {
        let data = child.data.borrow();
        if let NodeValue::MetadataText(ref line) = data.value {
            if let Some(rest) = line.strip_prefix(keyword) {
                if let Some(value) = rest.strip_prefix(':') {
                    return Some(value.trim_start().to_string());
                }
            }
        }
    }
    None
}
