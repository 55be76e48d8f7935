//! Aggregation strategies for values inserted into the tree.
//!
//! Each insertion walks from the root toward the deepest allowed level.
//! Whenever it passes through a node that already exists, the node's value
//! is replaced with `combine(old, new)`. The strategy decides what that
//! combination means (sum, extremum, overwrite, ...).

use std::ops::Add;

/// Strategy for merging a newly inserted value into an existing node value.
pub trait Aggregator<V> {
    /// Returns the value the node holds after `new` has been merged into `old`.
    fn combine(&self, old: &V, new: &V) -> V;
}

/// Adds the new value to the old one. This is the default strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sum;

impl<V> Aggregator<V> for Sum
where
    V: Add<Output = V> + Clone,
{
    fn combine(&self, old: &V, new: &V) -> V {
        old.clone() + new.clone()
    }
}

/// Keeps the larger of the two values.
#[derive(Debug, Clone, Copy, Default)]
pub struct Max;

impl<V: PartialOrd + Clone> Aggregator<V> for Max {
    fn combine(&self, old: &V, new: &V) -> V {
        if new > old { new.clone() } else { old.clone() }
    }
}

/// Keeps the smaller of the two values.
#[derive(Debug, Clone, Copy, Default)]
pub struct Min;

impl<V: PartialOrd + Clone> Aggregator<V> for Min {
    fn combine(&self, old: &V, new: &V) -> V {
        if new < old { new.clone() } else { old.clone() }
    }
}

/// Overwrites the old value with the new one.
#[derive(Debug, Clone, Copy, Default)]
pub struct Replace;

impl<V: Clone> Aggregator<V> for Replace {
    fn combine(&self, _old: &V, new: &V) -> V {
        new.clone()
    }
}

/// An aggregator backed by a closure.
pub struct FnAggregator<F> {
    func: F,
}

impl<F> FnAggregator<F> {
    /// Creates a new aggregator from a closure `(old, new) -> combined`.
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<V, F> Aggregator<V> for FnAggregator<F>
where
    F: Fn(&V, &V) -> V,
{
    fn combine(&self, old: &V, new: &V) -> V {
        (self.func)(old, new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sum_adds() {
        assert_eq!(Sum.combine(&2.5, &1.5), 4.0);
        assert_eq!(Sum.combine(&3u32, &4u32), 7);
    }

    #[test]
    fn max_and_min_keep_extremes() {
        assert_eq!(Max.combine(&2, &5), 5);
        assert_eq!(Max.combine(&5, &2), 5);
        assert_eq!(Min.combine(&2, &5), 2);
        assert_eq!(Min.combine(&5, &2), 2);
    }

    #[test]
    fn replace_takes_newest() {
        assert_eq!(Replace.combine(&"old", &"new"), "new");
    }

    #[test]
    fn fn_aggregator_calls_closure() {
        let concat = FnAggregator::new(|old: &String, new: &String| format!("{old}{new}"));
        assert_eq!(concat.combine(&"ab".to_string(), &"c".to_string()), "abc");
    }
}
