//! Borrowing iteration over a list.

use std::iter::FusedIterator;

use strand_arena::{Node, NodeHandle, NodeSlab};
use strand_core::Value;

/// Walks a node chain from a starting handle, yielding each handle and
/// node. Stops at the end of the chain or at a handle that does not
/// resolve.
#[derive(Clone)]
pub(crate) struct Links<'a> {
    slab: &'a NodeSlab,
    next: Option<NodeHandle>,
}

impl<'a> Links<'a> {
    pub(crate) fn new(slab: &'a NodeSlab, head: Option<NodeHandle>) -> Self {
        Self { slab, next: head }
    }
}

impl<'a> Iterator for Links<'a> {
    type Item = (NodeHandle, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.next?;
        let node = self.slab.get(handle)?;
        self.next = node.next;
        Some((handle, node))
    }
}

/// Iterator over the values of a [`List`](crate::List), head to tail.
///
/// Returned by [`List::iter`](crate::List::iter). Holding it borrows the
/// list, so the list cannot change underneath it.
#[derive(Clone)]
pub struct Iter<'a> {
    links: Links<'a>,
    remaining: usize,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(slab: &'a NodeSlab, head: Option<NodeHandle>) -> Self {
        Self {
            links: Links::new(slab, head),
            remaining: slab.len(),
        }
    }
}

impl Iterator for Iter<'_> {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        let (_, node) = self.links.next()?;
        self.remaining = self.remaining.saturating_sub(1);
        Some(node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}
