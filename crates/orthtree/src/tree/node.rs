//! Orthtree node implementation.

use std::fmt;

use nalgebra::{Point, RealField};

/// A single cell of the subdivision.
///
/// Every node stores its center, its accumulated value and its depth
/// (0 for the root). It owns exactly `2^D` child slots; a slot is filled the
/// first time an inserted position falls into that child's sub-region.
///
/// The node's extent is not stored. Use
/// [`Orthtree::find_boundary`](super::Orthtree::find_boundary) to recover it.
///
/// Subtrees are walked and dropped with explicit stacks, so path length is
/// bounded by memory rather than by the call stack.
pub struct Node<T: RealField + Copy, V, const D: usize> {
    center: Point<T, D>,
    data: V,
    depth: usize,
    children: Box<[Option<Box<Node<T, V, D>>>]>,
}

impl<T: RealField + Copy, V, const D: usize> Node<T, V, D> {
    /// Number of child slots per node (`2^D`).
    pub const CHILD_COUNT: usize = 1 << D;

    /// Creates a childless node.
    pub(crate) fn new(center: Point<T, D>, data: V, depth: usize) -> Self {
        Self {
            center,
            data,
            depth,
            children: (0..Self::CHILD_COUNT).map(|_| None).collect(),
        }
    }

    /// Returns the center of the node's region.
    #[inline]
    pub fn center(&self) -> Point<T, D> {
        self.center
    }

    /// Returns the accumulated value.
    #[inline]
    pub fn data(&self) -> &V {
        &self.data
    }

    #[inline]
    pub(crate) fn data_mut(&mut self) -> &mut V {
        &mut self.data
    }

    /// Returns the depth of this node (0 for the root).
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the child at `index`, if it exists.
    ///
    /// Returns `None` for empty slots and for indices `>= 2^D`.
    #[inline]
    pub fn child(&self, index: usize) -> Option<&Node<T, V, D>> {
        self.children.get(index)?.as_deref()
    }

    #[inline]
    pub(crate) fn child_slot_mut(&mut self, index: usize) -> &mut Option<Box<Node<T, V, D>>> {
        &mut self.children[index]
    }

    /// Returns the present children in index order, paired with their index.
    pub fn children(&self) -> impl Iterator<Item = (usize, &Node<T, V, D>)> {
        self.children
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_deref().map(|child| (index, child)))
    }

    /// Checks if this node has any children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.iter().all(Option::is_none)
    }

    /// Returns the number of nodes in this subtree, including this one.
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    /// Returns the height of this subtree (1 for a leaf node).
    pub fn height(&self) -> usize {
        // children always sit exactly one level below their parent
        self.iter().map(Node::depth).max().unwrap_or(self.depth) - self.depth + 1
    }

    /// Returns a pre-order iterator over this subtree, starting with `self`.
    pub fn iter(&self) -> Iter<'_, T, V, D> {
        Iter { stack: vec![self] }
    }
}

impl<T: RealField + Copy, V, const D: usize> Drop for Node<T, V, D> {
    fn drop(&mut self) {
        let mut pending: Vec<Box<Node<T, V, D>>> =
            self.children.iter_mut().filter_map(Option::take).collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.children.iter_mut().filter_map(Option::take));
        }
    }
}

impl<T: RealField + Copy, V: fmt::Debug, const D: usize> fmt::Debug for Node<T, V, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let children: Vec<usize> = self.children().map(|(index, _)| index).collect();
        f.debug_struct("Node")
            .field("center", &self.center)
            .field("data", &self.data)
            .field("depth", &self.depth)
            .field("children", &children)
            .finish()
    }
}

/// Pre-order iterator over a node and its descendants.
///
/// Present children are yielded in index order.
pub struct Iter<'a, T: RealField + Copy, V, const D: usize> {
    stack: Vec<&'a Node<T, V, D>>,
}

impl<'a, T: RealField + Copy, V, const D: usize> Iterator for Iter<'a, T, V, D> {
    type Item = &'a Node<T, V, D>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // reversed so that the lowest index is popped first
        let start = self.stack.len();
        self.stack.extend(node.children().map(|(_, child)| child));
        self.stack[start..].reverse();
        Some(node)
    }
}

/// Computes the child index of `pos` relative to a node centered at `center`.
///
/// Bit `i` is set iff `pos[i] > center[i]`. A coordinate equal to the center
/// falls into the lower half.
#[inline]
pub fn child_index<T: RealField + Copy, const D: usize>(
    center: &Point<T, D>,
    pos: &Point<T, D>,
) -> usize {
    (0..D)
        .filter(|&axis| pos[axis] > center[axis])
        .fold(0, |index, axis| index | (1 << axis))
}
