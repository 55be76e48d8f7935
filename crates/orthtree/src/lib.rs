//! Quadtree / octree (orthtree) spatial partitioning with value aggregation.

mod error;
mod region;
pub mod tree;

pub use error::{Result, TreeError};
pub use region::Region;
pub use tree::{
    child_index, Aggregator, CollectingVisitor, FnAggregator, FnVisitor, Iter, Max, Min, Node,
    NodeRecord, NodeVisitor, Octree, Orthtree, Quadtree, Replace, Sum,
};
