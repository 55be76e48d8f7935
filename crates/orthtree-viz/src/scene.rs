//! Scene files: a boundary plus weighted obstacle points.
//!
//! The format is line based, one record per line, whitespace separated:
//!
//! ```text
//! boundary <x0> <y0> <x1> <y1>
//! obstacle <x> <y> <weight>
//! ```
//!
//! Blank lines and lines starting with any other keyword are ignored.

use std::fs;
use std::path::Path;
use std::str::{FromStr, SplitWhitespace};

use nalgebra::Point2;
use orthtree::{Quadtree, Region, TreeError};
use thiserror::Error;

/// Errors that can occur while loading a scene.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("failed to read scene file: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: expected {expected} numeric fields after `{keyword}`")]
    MissingField {
        line: usize,
        keyword: &'static str,
        expected: usize,
    },

    #[error("line {line}: invalid number `{value}`")]
    Parse { line: usize, value: String },

    #[error("scene has no boundary line")]
    MissingBoundary,

    #[error("invalid scene geometry: {0}")]
    Tree(#[from] TreeError),
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// A weighted point read from an `obstacle` line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub position: Point2<f64>,
    pub weight: f64,
}

/// How obstacle values are fed into the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeightMode {
    /// Every obstacle contributes `1`, so nodes hold obstacle counts.
    #[default]
    Count,
    /// Every obstacle contributes its weight.
    Weight,
}

/// A parsed scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub boundary: Region<f64, 2>,
    pub obstacles: Vec<Obstacle>,
}

impl Scene {
    /// Reads and parses a scene file.
    pub fn load(path: impl AsRef<Path>) -> SceneResult<Self> {
        let text = fs::read_to_string(path)?;
        text.parse()
    }

    /// Builds a quadtree over the scene boundary and inserts every obstacle.
    ///
    /// Obstacles outside the boundary are skipped.
    pub fn build_tree(&self, max_depth: usize, mode: WeightMode) -> SceneResult<Quadtree<f64, f64>> {
        let mut tree = Quadtree::new(self.boundary.min(), self.boundary.max(), max_depth)?;

        let mut skipped = 0;
        for obstacle in &self.obstacles {
            let value = match mode {
                WeightMode::Count => 1.0,
                WeightMode::Weight => obstacle.weight,
            };
            if let Err(TreeError::OutOfBounds) = tree.insert(obstacle.position, value) {
                skipped += 1;
            }
        }

        tracing::info!(
            inserted = self.obstacles.len() - skipped,
            skipped,
            nodes = tree.node_count(),
            "built quadtree from scene"
        );
        Ok(tree)
    }
}

impl FromStr for Scene {
    type Err = SceneError;

    fn from_str(text: &str) -> SceneResult<Self> {
        let mut boundary = None;
        let mut obstacles = Vec::new();

        for (index, line) in text.lines().enumerate() {
            let line_no = index + 1;
            let mut fields = line.split_whitespace();

            match fields.next() {
                Some("boundary") => {
                    let [x0, y0, x1, y1] = parse_fields::<4>(&mut fields, line_no, "boundary")?;
                    boundary = Some(Region::new(Point2::new(x0, y0), Point2::new(x1, y1))?);
                }
                Some("obstacle") => {
                    let [x, y, weight] = parse_fields::<3>(&mut fields, line_no, "obstacle")?;
                    obstacles.push(Obstacle {
                        position: Point2::new(x, y),
                        weight,
                    });
                }
                Some(other) => {
                    tracing::debug!(line = line_no, keyword = other, "skipping unknown record");
                }
                None => {}
            }
        }

        Ok(Scene {
            boundary: boundary.ok_or(SceneError::MissingBoundary)?,
            obstacles,
        })
    }
}

/// Parses exactly `N` leading numeric fields. Extra trailing fields are ignored.
fn parse_fields<const N: usize>(
    fields: &mut SplitWhitespace<'_>,
    line: usize,
    keyword: &'static str,
) -> SceneResult<[f64; N]> {
    let mut values = [0.0; N];
    for value in values.iter_mut() {
        let field = fields.next().ok_or(SceneError::MissingField {
            line,
            keyword,
            expected: N,
        })?;
        *value = field.parse().map_err(|_| SceneError::Parse {
            line,
            value: field.to_string(),
        })?;
    }
    Ok(values)
}
