//! Axis-aligned region representation for orthtrees.

use nalgebra::{Point, RealField, SVector};

use crate::{Result, TreeError};

/// An axis-aligned box in `D` dimensions, defined by its minimum and
/// maximum corners.
///
/// Regions are immutable once built. Sub-regions of tree nodes are never
/// stored; they are derived on demand from a node's center and depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region<T: RealField + Copy, const D: usize> {
    min: Point<T, D>,
    max: Point<T, D>,
}

impl<T: RealField + Copy, const D: usize> Region<T, D> {
    /// Creates a region from two corners.
    ///
    /// Fails with [`TreeError::NonFiniteBounds`] if any coordinate is NaN or
    /// infinite, and with [`TreeError::InvertedBounds`] if `min[i] > max[i]`
    /// on any axis. Degenerate (zero-width) axes are allowed.
    pub fn new(min: Point<T, D>, max: Point<T, D>) -> Result<Self> {
        for axis in 0..D {
            if !min[axis].is_finite() || !max[axis].is_finite() {
                return Err(TreeError::NonFiniteBounds { axis });
            }
            if min[axis] > max[axis] {
                return Err(TreeError::InvertedBounds { axis });
            }
        }
        Ok(Self { min, max })
    }

    /// Builds the region `[center - half_extent, center + half_extent]`.
    ///
    /// `half_extent` must be non-negative on every axis.
    pub(crate) fn around(center: Point<T, D>, half_extent: SVector<T, D>) -> Self {
        Self {
            min: center - half_extent,
            max: center + half_extent,
        }
    }

    /// Returns the minimum corner.
    #[inline]
    pub fn min(&self) -> Point<T, D> {
        self.min
    }

    /// Returns the maximum corner.
    #[inline]
    pub fn max(&self) -> Point<T, D> {
        self.max
    }

    /// Returns the extent of the region on every axis (`max - min`).
    #[inline]
    pub fn size(&self) -> SVector<T, D> {
        self.max - self.min
    }

    /// Returns the center point (`(max + min) / 2`).
    #[inline]
    pub fn center(&self) -> Point<T, D> {
        Point::from((self.max.coords + self.min.coords) / two::<T>())
    }

    /// Returns `true` if every coordinate of `pos` lies within
    /// `[min[i], max[i]]` (inclusive on both ends).
    pub fn contains(&self, pos: &Point<T, D>) -> bool {
        (0..D).all(|i| pos[i] >= self.min[i] && pos[i] <= self.max[i])
    }

    /// Returns `true` if `other` lies entirely inside this region.
    pub fn contains_region(&self, other: &Region<T, D>) -> bool {
        self.contains(&other.min) && self.contains(&other.max)
    }

    /// Returns the sub-region of the child with the given index.
    ///
    /// Bit `i` of `index` selects the upper half on axis `i`, matching the
    /// tree's child indexing. Only the low `D` bits are used.
    pub fn octant(&self, index: usize) -> Region<T, D> {
        let center = self.center();
        let mut min = self.min;
        let mut max = self.max;
        for axis in 0..D {
            if index & (1 << axis) != 0 {
                min[axis] = center[axis];
            } else {
                max[axis] = center[axis];
            }
        }
        Region { min, max }
    }
}

/// Divides `v` by `2^exponent`.
pub(crate) fn halve<T: RealField + Copy, const D: usize>(
    v: SVector<T, D>,
    exponent: usize,
) -> SVector<T, D> {
    v / two::<T>().powi(exponent as i32)
}

#[inline]
fn two<T: RealField + Copy>() -> T {
    T::one() + T::one()
}
