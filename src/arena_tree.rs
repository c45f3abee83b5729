//! A DOM-like tree of nodes allocated from an arena.
//!
//! Based on <https://github.com/SimonSapin/rust-forest/blob/master/arena-tree/lib.rs>
//! (MIT license), cut down to the operations the parser needs: append-at-tail
//! construction and read-only traversal.  All links are non-owning references
//! into the arena, so dropping the arena is the single bulk teardown and no
//! node can be freed twice.

use std::cell::Cell;
use std::fmt;

/// A node inside a DOM-like tree.
pub struct Node<'a, T: 'a> {
    parent: Cell<Option<&'a Node<'a, T>>>,
    previous_sibling: Cell<Option<&'a Node<'a, T>>>,
    next_sibling: Cell<Option<&'a Node<'a, T>>>,
    first_child: Cell<Option<&'a Node<'a, T>>>,
    last_child: Cell<Option<&'a Node<'a, T>>>,

    /// The data held by the node.
    pub data: T,
}

impl<'a, T> Node<'a, T> {
    /// Create a new node from its associated data.
    ///
    /// The node starts unlinked; allocate it in the arena and `append` it to
    /// a parent to place it in a tree.
    pub fn new(data: T) -> Node<'a, T> {
        Node {
            parent: Cell::new(None),
            first_child: Cell::new(None),
            last_child: Cell::new(None),
            previous_sibling: Cell::new(None),
            next_sibling: Cell::new(None),
            data,
        }
    }

    /// Return a reference to the parent node, unless this node is the root of the tree.
    pub fn parent(&self) -> Option<&'a Node<'a, T>> {
        self.parent.get()
    }

    /// Return a reference to the first child of this node, unless it has no child.
    pub fn first_child(&self) -> Option<&'a Node<'a, T>> {
        self.first_child.get()
    }

    /// Return a reference to the last child of this node, unless it has no child.
    pub fn last_child(&self) -> Option<&'a Node<'a, T>> {
        self.last_child.get()
    }

    /// Return a reference to the previous sibling of this node, unless it is a first child.
    pub fn previous_sibling(&self) -> Option<&'a Node<'a, T>> {
        self.previous_sibling.get()
    }

    /// Return a reference to the next sibling of this node, unless it is a last child.
    pub fn next_sibling(&self) -> Option<&'a Node<'a, T>> {
        self.next_sibling.get()
    }

    /// Return whether two references point to the same node.
    pub fn same_node(&self, other: &Node<'a, T>) -> bool {
        std::ptr::eq(self, other)
    }

    /// Return an iterator of references to this node's children.
    pub fn children(&'a self) -> Children<'a, T> {
        Children(self.first_child.get())
    }

    /// Return an iterator of references to this node and its ancestors.
    ///
    /// Call `.next().unwrap()` once on the iterator to skip the node itself.
    pub fn ancestors(&'a self) -> Ancestors<'a, T> {
        Ancestors(Some(self))
    }

    /// Return an iterator of references to this node and its descendants, in
    /// tree order.  Parents appear before their children.
    ///
    /// Call `.next().unwrap()` once on the iterator to skip the node itself.
    pub fn descendants(&'a self) -> Descendants<'a, T> {
        Descendants(self.traverse())
    }

    /// Return an iterator over the start and end edges of this node and its
    /// descendants, in tree order.  The walk is iterative, so deeply nested
    /// documents do not overflow the call stack.
    pub fn traverse(&'a self) -> Traverse<'a, T> {
        Traverse {
            root: self,
            next: Some(NodeEdge::Start(self)),
        }
    }

    /// Detach a node from its parent and siblings.  Children are not affected.
    pub fn detach(&self) {
        let parent = self.parent.take();
        let previous_sibling = self.previous_sibling.take();
        let next_sibling = self.next_sibling.take();

        if let Some(next_sibling) = next_sibling {
            next_sibling.previous_sibling.set(previous_sibling);
        } else if let Some(parent) = parent {
            parent.last_child.set(previous_sibling);
        }

        if let Some(previous_sibling) = previous_sibling {
            previous_sibling.next_sibling.set(next_sibling);
        } else if let Some(parent) = parent {
            parent.first_child.set(next_sibling);
        }
    }

    /// Append a new child to this node, after existing children.
    pub fn append(&'a self, new_child: &'a Node<'a, T>) {
        new_child.detach();
        new_child.parent.set(Some(self));
        if let Some(last_child) = self.last_child.take() {
            new_child.previous_sibling.set(Some(last_child));
            debug_assert!(last_child.next_sibling.get().is_none());
            last_child.next_sibling.set(Some(new_child));
        } else {
            debug_assert!(self.first_child.get().is_none());
            self.first_child.set(Some(new_child));
        }
        self.last_child.set(Some(new_child));
    }
}

impl<'a, T: fmt::Debug> fmt::Debug for Node<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Only the data; following the sibling links would print cycles.
        f.debug_struct("Node").field("data", &self.data).finish()
    }
}

/// An iterator of references to the children of a given node.
pub struct Children<'a, T: 'a>(Option<&'a Node<'a, T>>);

impl<'a, T> Iterator for Children<'a, T> {
    type Item = &'a Node<'a, T>;

    fn next(&mut self) -> Option<&'a Node<'a, T>> {
        let node = self.0.take()?;
        self.0 = node.next_sibling.get();
        Some(node)
    }
}

/// An iterator of references to a given node and its ancestors.
pub struct Ancestors<'a, T: 'a>(Option<&'a Node<'a, T>>);

impl<'a, T> Iterator for Ancestors<'a, T> {
    type Item = &'a Node<'a, T>;

    fn next(&mut self) -> Option<&'a Node<'a, T>> {
        let node = self.0.take()?;
        self.0 = node.parent.get();
        Some(node)
    }
}

/// Indicates whether a traversal edge enters or leaves a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeEdge<T> {
    /// Yielded by `Traverse::next` before the node's descendants.
    Start(T),

    /// Yielded by `Traverse::next` after the node's descendants.
    End(T),
}

/// An iterator over the start and end edges of a given node and its
/// descendants, in tree order.
pub struct Traverse<'a, T: 'a> {
    root: &'a Node<'a, T>,
    next: Option<NodeEdge<&'a Node<'a, T>>>,
}

impl<'a, T> Iterator for Traverse<'a, T> {
    type Item = NodeEdge<&'a Node<'a, T>>;

    fn next(&mut self) -> Option<NodeEdge<&'a Node<'a, T>>> {
        let item = self.next.take()?;
        self.next = match item {
            NodeEdge::Start(node) => match node.first_child.get() {
                Some(child) => Some(NodeEdge::Start(child)),
                None => Some(NodeEdge::End(node)),
            },
            NodeEdge::End(node) => {
                if node.same_node(self.root) {
                    None
                } else {
                    match node.next_sibling.get() {
                        Some(sibling) => Some(NodeEdge::Start(sibling)),
                        None => node.parent.get().map(NodeEdge::End),
                    }
                }
            }
        };
        Some(item)
    }
}

/// An iterator of references to a given node and its descendants, in tree order.
pub struct Descendants<'a, T: 'a>(Traverse<'a, T>);

impl<'a, T> Iterator for Descendants<'a, T> {
    type Item = &'a Node<'a, T>;

    fn next(&mut self) -> Option<&'a Node<'a, T>> {
        loop {
            match self.0.next() {
                Some(NodeEdge::Start(node)) => return Some(node),
                Some(NodeEdge::End(_)) => {}
                None => return None,
            }
        }
    }
}
