use std::env;

use macroquad::prelude::*;
use nalgebra::Point2;
use orthtree::FnVisitor;
use orthtree_viz::{Scene, Viewport, WeightMode, draw_obstacles, draw_tree};
use tracing_subscriber::EnvFilter;

const DEFAULT_SCENE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/quadtree.txt");
const DEFAULT_MAX_DEPTH: usize = 4;

/// Reads the max depth from `ORTHTREE_MAX_DEPTH`, falling back to the default.
fn max_depth_from_env() -> usize {
    match env::var("ORTHTREE_MAX_DEPTH") {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(value = %raw, "ignoring invalid ORTHTREE_MAX_DEPTH");
            DEFAULT_MAX_DEPTH
        }),
        Err(_) => DEFAULT_MAX_DEPTH,
    }
}

#[macroquad::main("Quadtree Visualization")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let path = env::args().nth(1).unwrap_or_else(|| DEFAULT_SCENE.to_string());
    let max_depth = max_depth_from_env();

    println!("Loading scene from {}...", path);
    let scene = match Scene::load(&path) {
        Ok(scene) => scene,
        Err(err) => {
            eprintln!("Failed to load scene: {}", err);
            return;
        }
    };
    println!("Loaded {} obstacles", scene.obstacles.len());

    let tree = match scene.build_tree(max_depth, WeightMode::Count) {
        Ok(tree) => tree,
        Err(err) => {
            eprintln!("Failed to build quadtree: {}", err);
            return;
        }
    };
    println!(
        "Quadtree built: {} nodes, height {}, max depth {}",
        tree.node_count(),
        tree.height(),
        tree.max_depth()
    );

    let query = Point2::new(25.0, 25.0);
    for node in [tree.find(&query), tree.find_at_depth(&query, 1)] {
        println!(
            "find node: ({}, {}) data: {} depth: {}",
            node.center().x,
            node.center().y,
            node.data(),
            node.depth()
        );
    }

    tree.traverse(&mut FnVisitor::new(
        |node: &orthtree::Node<f64, f64, 2>, region: &orthtree::Region<f64, 2>| {
            println!(
                "node: ({}, {}) data: {} depth: {} region: [{}, {}] - [{}, {}]",
                node.center().x,
                node.center().y,
                node.data(),
                node.depth(),
                region.min().x,
                region.min().y,
                region.max().x,
                region.max().y
            );
        },
    ));

    loop {
        clear_background(Color::from_rgba(20, 20, 30, 255));

        let viewport = Viewport::fit(&scene.boundary, screen_width(), screen_height(), 40.0);
        draw_tree(&tree, &viewport);
        draw_obstacles(&scene.obstacles, &viewport);

        draw_text(
            &format!("Quadtree: {} nodes | max depth {}", tree.node_count(), tree.max_depth()),
            10.0,
            25.0,
            20.0,
            WHITE,
        );
        draw_text(&format!("FPS: {}", get_fps()), 10.0, 45.0, 16.0, DARKGRAY);

        next_frame().await
    }
}
