use std::io::BufWriter;

use anyhow::{Context, Result};
use clap::Parser;
use glint_renderer::scene::load_scene_desc;
use glint_renderer::{render, save_image, write_ppm, SceneDesc};
use rand::rngs::StdRng;
use rand::SeedableRng;

mod cli;

use cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    log::info!("Starting Glint");

    let mut desc = match &args.scene {
        Some(path) => load_scene_desc(path)
            .with_context(|| format!("Failed to load scene {}", path.display()))?,
        None => {
            log::info!("No scene file given, rendering the demo scene");
            SceneDesc::demo()
        }
    };
    args.apply_overrides(&mut desc);

    let scene = desc.build().context("Invalid scene")?;

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("Seed: {}", seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let image = render(&scene.camera, &scene.world, &scene.render, &mut rng);

    if args.writes_to_stdout() {
        let stdout = std::io::stdout();
        write_ppm(&image, BufWriter::new(stdout.lock())).context("Failed to write image to stdout")?;
    } else {
        save_image(&image, &args.output)
            .with_context(|| format!("Failed to save {}", args.output.display()))?;
    }

    Ok(())
}
