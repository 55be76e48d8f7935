//! Orthtree container, insertion and lookup.

use nalgebra::{Point, RealField, SVector};

use crate::region::halve;
use crate::{Region, Result, TreeError};

use super::aggregator::{Aggregator, Sum};
use super::node::{child_index, Iter, Node};
use super::visitor::NodeVisitor;

/// A `2^D`-ary spatial partitioning tree over a fixed boundary.
///
/// Each node splits its region in half along every axis. Inserting a
/// position walks from the root toward `max_depth`, creating the missing
/// nodes on the way and merging the inserted value into every node that
/// already existed (see [`Aggregator`]). The root's value is never touched
/// by insertions.
///
/// Node regions are not stored. A node at depth `k` covers
/// `center ± boundary.size / 2^(k+1)`, recovered by
/// [`find_boundary`](Self::find_boundary).
///
/// # Example
///
/// ```
/// use orthtree::Quadtree;
/// use nalgebra::Point2;
///
/// let mut tree: Quadtree<f64, f64> =
///     Quadtree::new(Point2::new(0.0, 0.0), Point2::new(100.0, 100.0), 4).unwrap();
/// for _ in 0..3 {
///     tree.insert(Point2::new(25.0, 25.0), 1.0).unwrap();
/// }
///
/// assert_eq!(*tree.find_at_depth(&Point2::new(25.0, 25.0), 1).data(), 3.0);
/// ```
///
/// # Concurrency
///
/// [`insert`](Self::insert) needs `&mut self` because it both creates nodes
/// and rewrites values in place. Share a tree across threads behind an
/// `RwLock`, with readers calling `find` / `traverse` under the read guard.
#[derive(Debug)]
pub struct Orthtree<T: RealField + Copy, V, const D: usize, A = Sum> {
    boundary: Region<T, D>,
    max_depth: usize,
    root: Node<T, V, D>,
    aggregator: A,
}

/// A two-dimensional orthtree.
pub type Quadtree<T, V, A = Sum> = Orthtree<T, V, 2, A>;

/// A three-dimensional orthtree.
pub type Octree<T, V, A = Sum> = Orthtree<T, V, 3, A>;

impl<T: RealField + Copy, V: Default, const D: usize> Orthtree<T, V, D, Sum> {
    /// Creates a tree that sums values along insertion paths.
    ///
    /// See [`with_aggregator`](Self::with_aggregator) for the failure cases.
    pub fn new(min: Point<T, D>, max: Point<T, D>, max_depth: usize) -> Result<Self> {
        Self::with_aggregator(min, max, max_depth, Sum)
    }
}

impl<T: RealField + Copy, V: Default, const D: usize, A> Orthtree<T, V, D, A> {
    /// Creates a tree over the region `[min, max]` with a custom aggregator.
    ///
    /// The root sits at depth 0 in the center of the region and holds
    /// `V::default()`. Insertions stop one level above `max_depth`, so the
    /// deepest node the tree can hold is at depth `max_depth - 1`.
    ///
    /// # Errors
    ///
    /// - [`TreeError::ZeroDepth`] if `max_depth` is 0
    /// - [`TreeError::InvertedBounds`] if `min[i] > max[i]` on some axis
    /// - [`TreeError::NonFiniteBounds`] if a bound is NaN or infinite
    pub fn with_aggregator(
        min: Point<T, D>,
        max: Point<T, D>,
        max_depth: usize,
        aggregator: A,
    ) -> Result<Self> {
        if max_depth == 0 {
            return Err(TreeError::ZeroDepth);
        }
        let boundary = Region::new(min, max)?;
        let root = Node::new(boundary.center(), V::default(), 0);

        Ok(Self {
            boundary,
            max_depth,
            root,
            aggregator,
        })
    }
}

impl<T, V, const D: usize, A> Orthtree<T, V, D, A>
where
    T: RealField + Copy,
    V: Clone,
    A: Aggregator<V>,
{
    /// Inserts `value` at `pos`.
    ///
    /// Every node on the path below the root either gets created holding
    /// `value`, or has `value` merged into its current value with the
    /// tree's aggregator.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::OutOfBounds`] if `pos` lies outside the tree
    /// boundary. The tree is left untouched in that case.
    pub fn insert(&mut self, pos: Point<T, D>, value: V) -> Result<()> {
        if !self.boundary.contains(&pos) {
            tracing::warn!(?pos, "rejecting insert outside tree boundary");
            return Err(TreeError::OutOfBounds);
        }

        let size = self.boundary.size();
        let aggregator = &self.aggregator;
        let mut node = &mut self.root;

        while node.depth() + 1 < self.max_depth {
            let center = node.center();
            let depth = node.depth();
            let index = child_index(&center, &pos);

            let slot = node.child_slot_mut(index);
            let created = slot.is_none();
            let child: &mut Node<T, V, D> = slot.get_or_insert_with(|| {
                let new_center = child_center(&center, depth, &pos, &size);
                tracing::trace!(depth = depth + 1, index, center = ?new_center, "creating node");
                Box::new(Node::new(new_center, value.clone(), depth + 1))
            });
            if !created {
                let combined = aggregator.combine(child.data(), &value);
                *child.data_mut() = combined;
            }

            node = child;
        }
        Ok(())
    }
}

impl<T: RealField + Copy, V, const D: usize, A> Orthtree<T, V, D, A> {
    /// Returns the region covered by the whole tree.
    #[inline]
    pub fn boundary(&self) -> &Region<T, D> {
        &self.boundary
    }

    /// Returns the configured maximum depth.
    #[inline]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Returns the root node.
    #[inline]
    pub fn root(&self) -> &Node<T, V, D> {
        &self.root
    }

    /// Returns the aggregation strategy.
    #[inline]
    pub fn aggregator(&self) -> &A {
        &self.aggregator
    }

    /// Returns the total number of nodes, including the root.
    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    /// Returns the height of the tree (1 when only the root exists).
    pub fn height(&self) -> usize {
        self.root.height()
    }

    /// Finds the deepest node on the path to `pos`, up to `max_depth`.
    ///
    /// Equivalent to `find_at_depth(pos, self.max_depth())`.
    pub fn find(&self, pos: &Point<T, D>) -> &Node<T, V, D> {
        self.find_at_depth(pos, self.max_depth)
    }

    /// Descends toward `pos` and returns the node at exactly `depth`, or the
    /// deepest existing node on the path if the path ends earlier.
    ///
    /// Unlike [`insert`](Self::insert), this does not check `pos` against
    /// the boundary. A position outside the tree simply follows the child
    /// indices it maps to from the root; callers that care must check
    /// [`boundary`](Self::boundary) themselves. The result is never empty:
    /// at worst it is the root.
    pub fn find_at_depth(&self, pos: &Point<T, D>, depth: usize) -> &Node<T, V, D> {
        let mut node = &self.root;
        loop {
            if node.depth() == depth {
                return node;
            }
            match node.child(child_index(&node.center(), pos)) {
                Some(child) => node = child,
                None => return node,
            }
        }
    }

    /// Reconstructs the region owned by `node`.
    ///
    /// The half-extent of a node at depth `k` is `boundary.size / 2^(k+1)`,
    /// so the region is `[center - half, center + half]`.
    pub fn find_boundary(&self, node: &Node<T, V, D>) -> Region<T, D> {
        Region::around(node.center(), halve(self.boundary.size(), node.depth() + 1))
    }

    /// Visits every node in pre-order (node first, then present children in
    /// index order), passing each node's reconstructed region along.
    pub fn traverse<Vis: NodeVisitor<T, V, D>>(&self, visitor: &mut Vis) {
        for node in self.iter() {
            visitor.visit(node, &self.find_boundary(node));
        }
    }

    /// Returns an iterator over all nodes in the same order as
    /// [`traverse`](Self::traverse).
    pub fn iter(&self) -> Iter<'_, T, V, D> {
        self.root.iter()
    }
}

impl<'a, T: RealField + Copy, V, const D: usize, A> IntoIterator for &'a Orthtree<T, V, D, A> {
    type Item = &'a Node<T, V, D>;
    type IntoIter = Iter<'a, T, V, D>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Computes the center of the child of a depth-`depth` node that `pos`
/// falls into.
fn child_center<T: RealField + Copy, const D: usize>(
    parent_center: &Point<T, D>,
    depth: usize,
    pos: &Point<T, D>,
    size: &SVector<T, D>,
) -> Point<T, D> {
    let half = halve(*size, depth + 2);
    let mut center = *parent_center;
    for axis in 0..D {
        center[axis] = if pos[axis] > parent_center[axis] {
            center[axis] + half[axis]
        } else {
            center[axis] - half[axis]
        };
    }
    center
}
