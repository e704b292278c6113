//! Sample random scenes and print fan statistics for quick sanity on counts.
//!
//! Usage:
//!   cargo run -p lightcast --example scene_stats -- sparse
//!   cargo run -p lightcast --example scene_stats -- dense
//!
//! Prints a few samples with triangle/diagnostic counts and visible area.

use lightcast::prelude::*;

fn main() {
    let mode = std::env::args().nth(1).unwrap_or_else(|| "sparse".to_string());
    let cfg = match mode.as_str() {
        "sparse" => SceneCfg {
            obstacles: 2,
            ..SceneCfg::default()
        },
        "dense" => SceneCfg {
            obstacles: 8,
            ..SceneCfg::default()
        },
        _ => {
            eprintln!("usage: scene_stats [sparse|dense]");
            return;
        }
    };
    for index in 0..5 {
        let loops = draw_scene(cfg, ReplayToken { seed: 2025, index });
        let occ = OccluderSet::from_loops(&loops, CastCfg::default()).expect("valid scene");
        let vis = compute_visibility(Vec2::zeros(), &occ, CastCfg::default());
        println!(
            "{mode} sample {index}: V={}, triangles={}, diagnostics={}, area={:.2}",
            occ.vertices().len(),
            vis.triangles.len(),
            vis.diagnostics.len(),
            vis.area()
        );
    }
}
