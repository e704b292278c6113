//! Random occluder scenes (radial jitter + replay tokens).
//!
//! Purpose
//! - Provide a small, deterministic sampler for benchmark and test scenes:
//!   one enclosing room loop plus scattered obstacle loops, with a keep-out
//!   disc around the origin so a light placed there always sees something.
//!
//! Model
//! - Each loop starts from `n` equally spaced angles on [0, 2π), adds
//!   bounded angular and radial jitter, and connects the sorted samples into
//!   a star-shaped (hence simple) polygon, counter-clockwise.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Vertex count distribution.
#[derive(Clone, Copy, Debug)]
pub enum VertexCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}

impl VertexCount {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            VertexCount::Fixed(n) => n.max(3),
            VertexCount::Uniform { min, max } => {
                let lo = min.max(3);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }
}

/// Scene sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct SceneCfg {
    pub room_vertices: VertexCount,
    pub obstacle_vertices: VertexCount,
    /// Number of obstacle loops inside the room.
    pub obstacles: usize,
    /// Room radius before jitter.
    pub room_radius: f64,
    /// Obstacle radius before jitter.
    pub obstacle_radius: f64,
    /// Angular jitter as a fraction of the base spacing Δ=2π/n. Clamped to [0, 0.49].
    pub angle_jitter_frac: f64,
    /// Radial jitter (relative amplitude). Radii = `r * (1 + u)`, with `u∈[-radial_jitter, radial_jitter]`.
    pub radial_jitter: f64,
    /// Keep-out radius around the origin no obstacle may reach into.
    pub clear_radius: f64,
}

impl Default for SceneCfg {
    fn default() -> Self {
        Self {
            room_vertices: VertexCount::Fixed(12),
            obstacle_vertices: VertexCount::Uniform { min: 3, max: 8 },
            obstacles: 3,
            room_radius: 20.0,
            obstacle_radius: 2.0,
            angle_jitter_frac: 0.3,
            radial_jitter: 0.25,
            clear_radius: 1.0,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw a scene as vertex loops: the room first, obstacles after.
///
/// Obstacle centers land in the annulus between the keep-out disc and the
/// room's inner radius, so every loop stays inside the room and the origin
/// stays uncovered.
pub fn draw_scene(cfg: SceneCfg, tok: ReplayToken) -> Vec<Vec<Vector2<f64>>> {
    let mut rng = tok.to_std_rng();
    let mut loops = Vec::with_capacity(1 + cfg.obstacles);
    loops.push(draw_loop_radial(
        &mut rng,
        cfg.room_vertices,
        cfg.room_radius,
        cfg.angle_jitter_frac,
        cfg.radial_jitter,
        Vector2::zeros(),
    ));
    let reach = cfg.obstacle_radius * (1.0 + cfg.radial_jitter);
    let lo = cfg.clear_radius + reach;
    let hi = (cfg.room_radius * (1.0 - cfg.radial_jitter) - reach).max(lo);
    for _ in 0..cfg.obstacles {
        let th = rng.gen::<f64>() * std::f64::consts::TAU;
        let r = rng.gen_range(lo..=hi);
        let center = Vector2::new(th.cos() * r, th.sin() * r);
        loops.push(draw_loop_radial(
            &mut rng,
            cfg.obstacle_vertices,
            cfg.obstacle_radius,
            cfg.angle_jitter_frac,
            cfg.radial_jitter,
            center,
        ));
    }
    loops
}

/// One star-shaped loop around `center`, counter-clockwise.
fn draw_loop_radial<R: Rng>(
    rng: &mut R,
    count: VertexCount,
    base_radius: f64,
    angle_jitter_frac: f64,
    radial_jitter: f64,
    center: Vector2<f64>,
) -> Vec<Vector2<f64>> {
    let n = count.sample(rng);
    let aj = angle_jitter_frac.clamp(0.0, 0.49);
    let rj = radial_jitter.max(0.0);
    let r0 = base_radius.max(1e-9);
    let delta = std::f64::consts::TAU / (n as f64);
    let mut angles: Vec<f64> = (0..n)
        .map(|k| {
            let jitter = (rng.gen::<f64>() * 2.0 - 1.0) * aj * delta;
            (k as f64) * delta + jitter
        })
        .collect();
    angles.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    angles
        .into_iter()
        .map(|th| {
            let u = (rng.gen::<f64>() * 2.0 - 1.0) * rj;
            let r = (1.0 + u).max(1e-6) * r0;
            center + Vector2::new(th.cos() * r, th.sin() * r)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::CastCfg;
    use crate::occluder::OccluderSet;

    #[test]
    fn reproducible_draw() {
        let cfg = SceneCfg::default();
        let tok = ReplayToken { seed: 42, index: 7 };
        let a = draw_scene(cfg, tok);
        let b = draw_scene(cfg, tok);
        assert_eq!(a.len(), b.len());
        for (la, lb) in a.iter().zip(b.iter()) {
            assert_eq!(la, lb);
        }
    }

    #[test]
    fn distinct_indices_differ() {
        let cfg = SceneCfg::default();
        let a = draw_scene(cfg, ReplayToken { seed: 42, index: 0 });
        let b = draw_scene(cfg, ReplayToken { seed: 42, index: 1 });
        assert_ne!(a, b);
    }

    #[test]
    fn scenes_pass_validation() {
        for index in 0..16 {
            let loops = draw_scene(SceneCfg::default(), ReplayToken { seed: 9, index });
            OccluderSet::from_loops(&loops, CastCfg::default()).expect("valid scene");
        }
    }

    #[test]
    fn origin_stays_clear() {
        let cfg = SceneCfg::default();
        for index in 0..8 {
            let loops = draw_scene(cfg, ReplayToken { seed: 5, index });
            for obstacle in &loops[1..] {
                for p in obstacle {
                    assert!(p.norm() >= cfg.clear_radius - 1e-9);
                }
            }
        }
    }
}
