//! Visitor pattern for orthtree traversal.
//!
//! Visitors allow custom processing of nodes during a pre-order walk
//! without coupling traversal logic to specific use cases such as
//! rendering or reporting.

use nalgebra::{Point, RealField};

use crate::Region;

use super::node::Node;

/// Visitor for processing nodes during orthtree traversal.
///
/// Nodes are visited in pre-order: a node first, then each present child
/// in index order `0..2^D`.
pub trait NodeVisitor<T: RealField + Copy, V, const D: usize> {
    /// Called once for every node in the tree.
    ///
    /// `region` is the node's reconstructed boundary.
    fn visit(&mut self, node: &Node<T, V, D>, region: &Region<T, D>);
}

/// A snapshot of one visited node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRecord<T: RealField + Copy, V, const D: usize> {
    pub center: Point<T, D>,
    pub data: V,
    pub depth: usize,
    pub region: Region<T, D>,
}

/// A simple visitor that records every visited node.
#[derive(Debug)]
pub struct CollectingVisitor<T: RealField + Copy, V, const D: usize> {
    records: Vec<NodeRecord<T, V, D>>,
}

impl<T: RealField + Copy, V, const D: usize> Default for CollectingVisitor<T, V, D> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<T: RealField + Copy, V, const D: usize> CollectingVisitor<T, V, D> {
    /// Creates a new empty collecting visitor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the collected records.
    pub fn into_records(self) -> Vec<NodeRecord<T, V, D>> {
        self.records
    }

    /// Returns a reference to the collected records.
    pub fn records(&self) -> &[NodeRecord<T, V, D>] {
        &self.records
    }
}

impl<T: RealField + Copy, V: Clone, const D: usize> NodeVisitor<T, V, D>
    for CollectingVisitor<T, V, D>
{
    fn visit(&mut self, node: &Node<T, V, D>, region: &Region<T, D>) {
        self.records.push(NodeRecord {
            center: node.center(),
            data: node.data().clone(),
            depth: node.depth(),
            region: *region,
        });
    }
}

/// A visitor that calls a closure for each node.
pub struct FnVisitor<F> {
    func: F,
}

impl<F> FnVisitor<F> {
    /// Creates a new visitor from a closure.
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<T, V, const D: usize, F> NodeVisitor<T, V, D> for FnVisitor<F>
where
    T: RealField + Copy,
    F: FnMut(&Node<T, V, D>, &Region<T, D>),
{
    fn visit(&mut self, node: &Node<T, V, D>, region: &Region<T, D>) {
        (self.func)(node, region);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Point2, Vector2};

    fn leaf(data: u32, depth: usize) -> Node<f64, u32, 2> {
        Node::new(Point2::new(25.0, 25.0), data, depth)
    }

    #[test]
    fn collecting_visitor_empty() {
        let visitor: CollectingVisitor<f64, u32, 2> = CollectingVisitor::new();
        assert!(visitor.records().is_empty());
    }

    #[test]
    fn collecting_visitor_collects() {
        let mut visitor = CollectingVisitor::new();
        let region = Region::around(Point2::new(25.0, 25.0), Vector2::new(25.0, 25.0));

        visitor.visit(&leaf(4, 1), &region);
        visitor.visit(&leaf(2, 2), &region);

        let records = visitor.into_records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].data, 4);
        assert_eq!(records[1].depth, 2);
        assert_eq!(records[0].region, region);
    }

    #[test]
    fn fn_visitor_calls_closure() {
        let mut total = 0;
        {
            let mut visitor = FnVisitor::new(|node: &Node<f64, u32, 2>, _: &Region<f64, 2>| {
                total += *node.data();
            });
            let region = Region::around(Point2::new(25.0, 25.0), Vector2::new(25.0, 25.0));
            visitor.visit(&leaf(3, 1), &region);
            visitor.visit(&leaf(5, 1), &region);
        }
        assert_eq!(total, 8);
    }
}
