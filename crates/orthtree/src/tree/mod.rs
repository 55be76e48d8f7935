//! Quadtree / octree implementation, generic over the number of dimensions.
//!
//! An orthtree splits a bounded region into `2^D` equal children per node:
//! four for a quadtree, eight for an octree. This module provides:
//!
//! - Point insertion with per-node value aggregation along the insertion path
//! - Lookup by exact depth, falling back to the deepest existing ancestor
//! - Reconstruction of any node's region from its center and depth
//! - Pre-order traversal with pluggable visitors
//!
//! # Example
//!
//! ```
//! use orthtree::{Octree, CollectingVisitor};
//! use nalgebra::Point3;
//!
//! let mut tree: Octree<f32, u32> =
//!     Octree::new(Point3::new(0.0, 0.0, 0.0), Point3::new(16.0, 16.0, 16.0), 3).unwrap();
//! tree.insert(Point3::new(1.0, 2.0, 3.0), 1).unwrap();
//!
//! let mut visitor = CollectingVisitor::new();
//! tree.traverse(&mut visitor);
//! assert_eq!(visitor.records().len(), 3);
//! ```
//!
//! # Architecture
//!
//! - [`Orthtree`]: The main container holding the boundary and the root node
//! - [`Node`]: A cell storing its center, depth, value and child slots
//! - [`Aggregator`]: Strategy trait for merging values along insertion paths
//! - [`NodeVisitor`]: Visitor trait for custom traversal behavior

mod aggregator;
mod node;
#[allow(clippy::module_inception)]
mod tree;
mod visitor;

// Re-export main types
pub use aggregator::{Aggregator, FnAggregator, Max, Min, Replace, Sum};
pub use node::{child_index, Iter, Node};
pub use tree::{Octree, Orthtree, Quadtree};
pub use visitor::{CollectingVisitor, FnVisitor, NodeRecord, NodeVisitor};
