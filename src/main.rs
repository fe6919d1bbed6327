/*
 * Magnetism Simulation
 *
 * Draws the field lines of a few bar magnets (dipoles) on a 2D canvas:
 * 1. Field lines are traced from every pole through the superposed field
 * 2. Free dipoles (ferrites) turn to follow the local field
 * 3. An optional animation hands the strength from one dipole to the next
 *
 * The scene comes from a YAML file passed with --scene, or a built-in
 * triangle of three dipoles when none is given.
 */

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use magnetism::app::{self, model, update};
use magnetism::SceneConfig;

#[derive(Parser, Debug)]
#[command(about = "2D magnetic dipole field-line simulation")]
struct Args {
    /// Scene file in YAML, e.g. scenarios/two_dipoles.yaml
    #[arg(short, long)]
    scene: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.scene {
        Some(path) => SceneConfig::load(path).map_err(|err| {
            log::error!("could not load {:?}: {}", path, err);
            err
        })?,
        None => {
            log::info!("no scene given, using the built-in triangle");
            SceneConfig::default()
        }
    };

    // Fail before opening a window if the scene is unusable
    config.build()?;
    app::set_scene_config(config);

    nannou::app(model).update(update).run();

    Ok(())
}
