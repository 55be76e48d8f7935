//! Shared visualization utilities for quadtree scenes.

use macroquad::prelude::*;
use nalgebra::Point2;
use orthtree::{Node, NodeVisitor, Quadtree, Region};

pub mod scene;
pub use scene::{Obstacle, Scene, SceneError, SceneResult, WeightMode};

/// Outline colors, cycled by node depth.
const DEPTH_COLORS: [Color; 6] = [WHITE, SKYBLUE, LIME, GOLD, ORANGE, PINK];

/// Returns the outline color for nodes at `depth`.
pub fn depth_color(depth: usize) -> Color {
    DEPTH_COLORS[depth % DEPTH_COLORS.len()]
}

/// Maps world coordinates of a region onto a screen rectangle.
///
/// The world is scaled uniformly to fit inside the screen minus a margin,
/// and the y axis is flipped so that larger world y values are drawn higher.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    world_min: Point2<f64>,
    world_height: f64,
    scale: f32,
    origin: Vec2,
}

impl Viewport {
    /// Fits `world` into a `width` x `height` screen with `margin` pixels on
    /// every side.
    pub fn fit(world: &Region<f64, 2>, width: f32, height: f32, margin: f32) -> Self {
        let size = world.size();
        let avail_w = (width - 2.0 * margin).max(1.0);
        let avail_h = (height - 2.0 * margin).max(1.0);

        // degenerate axes fall back to a unit extent
        let sx = if size.x > 0.0 { avail_w / size.x as f32 } else { 1.0 };
        let sy = if size.y > 0.0 { avail_h / size.y as f32 } else { 1.0 };
        let scale = sx.min(sy);

        let used = vec2(size.x as f32 * scale, size.y as f32 * scale);
        let origin = vec2((width - used.x) / 2.0, (height - used.y) / 2.0);

        Self {
            world_min: world.min(),
            world_height: size.y,
            scale,
            origin,
        }
    }

    /// Converts a world point to screen coordinates.
    pub fn to_screen(&self, p: Point2<f64>) -> Vec2 {
        let x = (p.x - self.world_min.x) as f32 * self.scale;
        let y = (self.world_height - (p.y - self.world_min.y)) as f32 * self.scale;
        self.origin + vec2(x, y)
    }

    /// Returns the screen-space rectangle `(x, y, w, h)` of a world region.
    pub fn rect(&self, region: &Region<f64, 2>) -> Rect {
        let top_left = self.to_screen(Point2::new(region.min().x, region.max().y));
        let bottom_right = self.to_screen(Point2::new(region.max().x, region.min().y));
        Rect::new(
            top_left.x,
            top_left.y,
            bottom_right.x - top_left.x,
            bottom_right.y - top_left.y,
        )
    }
}

/// Visitor that draws every node's region outline and its value label.
pub struct RenderVisitor<'a> {
    viewport: &'a Viewport,
    font_size: f32,
}

impl<'a> RenderVisitor<'a> {
    pub fn new(viewport: &'a Viewport) -> Self {
        Self {
            viewport,
            font_size: 16.0,
        }
    }
}

impl NodeVisitor<f64, f64, 2> for RenderVisitor<'_> {
    fn visit(&mut self, node: &Node<f64, f64, 2>, region: &Region<f64, 2>) {
        let rect = self.viewport.rect(region);
        let color = depth_color(node.depth());
        let thickness = (3.0 - node.depth() as f32 * 0.5).max(1.0);
        draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, thickness, color);

        // the root label would cover the whole scene center
        if node.depth() > 0 {
            let center = self.viewport.to_screen(node.center());
            let label = format!("{:.0}", node.data());
            let dims = measure_text(&label, None, self.font_size as u16, 1.0);
            draw_text(
                &label,
                center.x - dims.width / 2.0,
                center.y + dims.height / 2.0,
                self.font_size,
                color,
            );
        }
    }
}

/// Draws the whole tree.
pub fn draw_tree(tree: &Quadtree<f64, f64>, viewport: &Viewport) {
    tree.traverse(&mut RenderVisitor::new(viewport));
}

/// Draws obstacle positions as small dots.
pub fn draw_obstacles(obstacles: &[Obstacle], viewport: &Viewport) {
    for obstacle in obstacles {
        let p = viewport.to_screen(obstacle.position);
        draw_circle(p.x, p.y, 3.0, RED);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> Region<f64, 2> {
        Region::new(Point2::new(0.0, 0.0), Point2::new(100.0, 100.0)).unwrap()
    }

    #[test]
    fn fit_flips_y_axis() {
        let viewport = Viewport::fit(&world(), 220.0, 220.0, 10.0);

        assert_eq!(viewport.to_screen(Point2::new(0.0, 0.0)), vec2(10.0, 210.0));
        assert_eq!(viewport.to_screen(Point2::new(100.0, 100.0)), vec2(210.0, 10.0));
        assert_eq!(viewport.to_screen(Point2::new(50.0, 50.0)), vec2(110.0, 110.0));
    }

    #[test]
    fn fit_keeps_aspect_ratio() {
        // wide screen: height is the limiting axis, content centered horizontally
        let viewport = Viewport::fit(&world(), 400.0, 200.0, 0.0);

        assert_eq!(viewport.to_screen(Point2::new(0.0, 100.0)), vec2(100.0, 0.0));
        assert_eq!(viewport.to_screen(Point2::new(100.0, 0.0)), vec2(300.0, 200.0));
    }

    #[test]
    fn rect_covers_region() {
        let viewport = Viewport::fit(&world(), 100.0, 100.0, 0.0);
        let quadrant = world().octant(1);

        let rect = viewport.rect(&quadrant);
        assert_eq!(rect, Rect::new(50.0, 50.0, 50.0, 50.0));
    }

    #[test]
    fn depth_colors_cycle() {
        assert_eq!(depth_color(0), depth_color(DEPTH_COLORS.len()));
        assert_ne!(depth_color(0), depth_color(1));
    }
}
