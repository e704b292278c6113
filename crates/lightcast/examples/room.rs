//! Print the triangle fan for a small room with one pillar.
//!
//! Usage:
//!   cargo run -p lightcast --example room

use lightcast::prelude::*;
use nalgebra::vector;

fn main() {
    let room = vec![
        vector![0.0, 0.0],
        vector![20.0, 0.0],
        vector![20.0, 20.0],
        vector![0.0, 20.0],
    ];
    let pillar = vec![
        vector![12.0, 9.0],
        vector![14.0, 9.0],
        vector![14.0, 11.0],
        vector![12.0, 11.0],
    ];
    let occ = OccluderSet::from_loops(&[room, pillar], CastCfg::default()).expect("valid scene");
    let light = vector![5.0, 10.0];
    let vis = compute_visibility(light, &occ, CastCfg::default());

    println!("light at ({}, {})", light.x, light.y);
    println!(
        "{} triangles, visible area {:.3}",
        vis.triangles.len(),
        vis.area()
    );
    for (i, t) in vis.triangles.iter().enumerate() {
        println!(
            "  {i:2}: ({:7.3}, {:7.3}) -> ({:7.3}, {:7.3})",
            t.a.x, t.a.y, t.b.x, t.b.y
        );
    }
    for d in &vis.diagnostics {
        eprintln!("diagnostic: {d}");
    }
}
