//! A miniature Markdown parser producing a traversable document tree.
//!
//! The dialect is CommonMark-influenced but deliberately small: nested
//! quotes, lists, fenced and indented code, pipe tables, a leading metadata
//! block, and an inline layer where styled runs (emphasis, strong,
//! strikethrough, code, links, images) are flat text leaves rather than
//! nested containers.  Rendering is left to callers, which walk the tree
//! and dispatch on [`nodes::NodeValue`].
//!
//! ```
//! use minimark::nodes::{collect_text, NodeValue};
//! use minimark::{parse_document, Arena, Options};
//!
//! let arena = Arena::new();
//! let root = parse_document(&arena, "# Hello\n\nSome *text*.\n", &Options::default());
//!
//! let heading = root.first_child().unwrap();
//! assert!(matches!(heading.data.borrow().value, NodeValue::Heading(1)));
//! assert_eq!(collect_text(heading), "Hello");
//! ```
//!
//! All nodes live in a [`typed_arena::Arena`]; dropping the arena frees the
//! whole document at once.

pub mod arena_tree;
pub mod nodes;

mod parser;
mod scanners;
mod strings;


pub use crate::arena_tree::Node;
pub use crate::nodes::AstNode;
pub use crate::parser::{load, load_path, parse_document, ExtensionOptions, Options};

/// The arena the nodes of a document are allocated in.
pub type Arena<'a> = typed_arena::Arena<AstNode<'a>>;
