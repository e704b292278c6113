use std::path::Path;

use anyhow::Result;
use clap::{Parser, Subcommand};
use lightcast::geom::CastCfg;
use lightcast::occluder::rand::{draw_scene, ReplayToken, SceneCfg};
use lightcast::visibility::compute_visibility;
use nalgebra::Vector2;
use tracing_subscriber::fmt::SubscriberBuilder;

mod scene;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Visibility polygon runner")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Generate a random scene file
    Gen {
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long, default_value_t = 3)]
        obstacles: usize,
        #[arg(long)]
        out: String,
    },
    /// Compute the triangle fan for a scene and write it out
    Cast {
        #[arg(long)]
        scene: String,
        #[arg(long)]
        out: String,
        /// Also write an SVG rendering next to the output
        #[arg(long)]
        svg: bool,
    },
    /// Print the visible area for a scene as JSON
    Area {
        #[arg(long)]
        scene: String,
    },
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Gen {
            seed,
            obstacles,
            out,
        } => gen(seed, obstacles, out),
        Action::Cast { scene, out, svg } => cast(scene, out, svg),
        Action::Area { scene } => area(scene),
    }
}

fn gen(seed: u64, obstacles: usize, out: String) -> Result<()> {
    tracing::info!(seed, obstacles, out, "gen");
    let cfg = SceneCfg {
        obstacles,
        ..SceneCfg::default()
    };
    let loops = draw_scene(cfg, ReplayToken { seed, index: 0 });
    let file = scene::SceneFile::from_loops(Vector2::zeros(), &loops);
    scene::save(&file, Path::new(&out))?;
    write_provenance(
        Path::new(&out),
        serde_json::json!({ "seed": seed, "obstacles": obstacles }),
    )?;
    Ok(())
}

fn cast(scene_path: String, out: String, svg: bool) -> Result<()> {
    tracing::info!(scene = scene_path, out, svg, "cast");
    let file = scene::load(Path::new(&scene_path))?;
    let (light, occ) = file.build(CastCfg::default())?;
    let vis = compute_visibility(light, &occ, CastCfg::default());
    for d in &vis.diagnostics {
        tracing::warn!(%d, "degraded");
    }
    tracing::info!(
        triangles = vis.triangles.len(),
        area = vis.area(),
        "computed"
    );

    let out_path = Path::new(&out);
    scene::save_fan(&scene::FanFile::from_visibility(&vis), out_path)?;
    if svg {
        let svg_path = out_path.with_extension("svg");
        scene::write_svg(&svg_path, &file, &vis)?;
        tracing::info!(svg = %svg_path.display(), "rendered");
    }
    write_provenance(out_path, serde_json::json!({ "scene": scene_path }))?;
    Ok(())
}

fn area(scene_path: String) -> Result<()> {
    let file = scene::load(Path::new(&scene_path))?;
    let (light, occ) = file.build(CastCfg::default())?;
    let vis = compute_visibility(light, &occ, CastCfg::default());
    let obj = serde_json::json!({
        "area": vis.area(),
        "triangles": vis.triangles.len(),
        "diagnostics": vis.diagnostics.iter().map(|d| d.to_string()).collect::<Vec<_>>(),
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

/// Write `<artifact>.provenance.json` recording code revision, parameters,
/// and outputs next to the artifact.
fn write_provenance(artifact: &Path, params: serde_json::Value) -> Result<()> {
    let rev = option_env!("GIT_COMMIT").unwrap_or("unknown");
    let doc = serde_json::json!({
        "code_rev": rev,
        "version": lightcast::VERSION,
        "params": params,
        "outputs": [artifact.to_string_lossy()],
    });
    let mut name = artifact
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| std::ffi::OsString::from("artifact"));
    name.push(".provenance.json");
    std::fs::write(artifact.with_file_name(name), serde_json::to_vec_pretty(&doc)?)?;
    Ok(())
}
