//! Scene and fan file IO: JSON loops in, triangle fans and SVG out.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use lightcast::geom::CastCfg;
use lightcast::occluder::OccluderSet;
use lightcast::visibility::Visibility;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// On-disk scene: a light position plus closed occluder loops
/// (implicitly closed, no duplicate final vertex).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SceneFile {
    pub light: [f64; 2],
    pub loops: Vec<Vec<[f64; 2]>>,
}

impl SceneFile {
    pub fn from_loops(light: Vector2<f64>, loops: &[Vec<Vector2<f64>>]) -> Self {
        Self {
            light: [light.x, light.y],
            loops: loops
                .iter()
                .map(|lp| lp.iter().map(|p| [p.x, p.y]).collect())
                .collect(),
        }
    }

    /// Validate and build the computation inputs.
    pub fn build(&self, cfg: CastCfg) -> Result<(Vector2<f64>, OccluderSet)> {
        let loops: Vec<Vec<Vector2<f64>>> = self
            .loops
            .iter()
            .map(|lp| lp.iter().map(|p| Vector2::new(p[0], p[1])).collect())
            .collect();
        let occ = OccluderSet::from_loops(&loops, cfg).context("invalid occluder loops")?;
        Ok((Vector2::new(self.light[0], self.light[1]), occ))
    }
}

/// Fan output: one row per triangle, apex first.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FanFile {
    pub light: [f64; 2],
    pub triangles: Vec<[[f64; 2]; 3]>,
    pub area: f64,
    pub diagnostics: Vec<String>,
}

impl FanFile {
    pub fn from_visibility(vis: &Visibility) -> Self {
        Self {
            light: [vis.origin.x, vis.origin.y],
            triangles: vis
                .triangles
                .iter()
                .map(|t| {
                    [
                        [t.apex.x, t.apex.y],
                        [t.a.x, t.a.y],
                        [t.b.x, t.b.y],
                    ]
                })
                .collect(),
            area: vis.area(),
            diagnostics: vis.diagnostics.iter().map(|d| d.to_string()).collect(),
        }
    }
}

pub fn load(path: &Path) -> Result<SceneFile> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

pub fn save(file: &SceneFile, path: &Path) -> Result<()> {
    write_bytes(path, &serde_json::to_vec_pretty(file)?)
}

pub fn save_fan(fan: &FanFile, path: &Path) -> Result<()> {
    write_bytes(path, &serde_json::to_vec_pretty(fan)?)
}

fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))
}

/// Render occluders and the computed fan as a standalone SVG, y-flipped so
/// the scene reads the same way as in world coordinates.
pub fn write_svg(path: &Path, scene: &SceneFile, vis: &Visibility) -> Result<()> {
    let mut min = [f64::INFINITY; 2];
    let mut max = [f64::NEG_INFINITY; 2];
    for lp in &scene.loops {
        for p in lp {
            for k in 0..2 {
                min[k] = min[k].min(p[k]);
                max[k] = max[k].max(p[k]);
            }
        }
    }
    if !min[0].is_finite() {
        min = [0.0, 0.0];
        max = [1.0, 1.0];
    }
    let pad = 0.05 * ((max[0] - min[0]) + (max[1] - min[1])).max(1.0);
    let (x0, y0) = (min[0] - pad, min[1] - pad);
    let (w, h) = (max[0] - min[0] + 2.0 * pad, max[1] - min[1] + 2.0 * pad);
    let flip = |p: [f64; 2]| (p[0], y0 + h - (p[1] - y0));

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"{x0} {y0} {w} {h}\">\n"
    ));
    for t in &vis.triangles {
        let pts: Vec<String> = [[t.apex.x, t.apex.y], [t.a.x, t.a.y], [t.b.x, t.b.y]]
            .iter()
            .map(|&p| {
                let (x, y) = flip(p);
                format!("{x:.4},{y:.4}")
            })
            .collect();
        svg.push_str(&format!(
            "  <polygon points=\"{}\" fill=\"gold\" fill-opacity=\"0.5\" stroke=\"none\"/>\n",
            pts.join(" ")
        ));
    }
    for lp in &scene.loops {
        let pts: Vec<String> = lp
            .iter()
            .map(|&p| {
                let (x, y) = flip(p);
                format!("{x:.4},{y:.4}")
            })
            .collect();
        svg.push_str(&format!(
            "  <polygon points=\"{}\" fill=\"none\" stroke=\"black\" stroke-width=\"{:.4}\"/>\n",
            pts.join(" "),
            w / 400.0
        ));
    }
    let (lx, ly) = flip(scene.light);
    svg.push_str(&format!(
        "  <circle cx=\"{lx:.4}\" cy=\"{ly:.4}\" r=\"{:.4}\" fill=\"red\"/>\n",
        w / 120.0
    ));
    svg.push_str("</svg>\n");
    write_bytes(path, svg.as_bytes())
}
