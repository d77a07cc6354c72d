mod cli;
mod scenes;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use cli::Args;
use ember_renderer::{render_with_progress, save_image, write_ppm, Camera, CameraConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Read a camera configuration from a JSON file.
fn load_camera_config(path: &Path) -> Result<CameraConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read camera config {}", path.display()))?;
    let config = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse camera config {}", path.display()))?;
    Ok(config)
}

fn validate(config: &CameraConfig) -> Result<()> {
    ensure!(config.gamma > 0.0, "gamma must be positive (got {})", config.gamma);
    ensure!(
        config.aspect_ratio > 0.0,
        "aspect ratio must be positive (got {})",
        config.aspect_ratio
    );
    ensure!(
        config.look_from != config.look_at,
        "look_from and look_at must differ"
    );

    let camera = Camera::new(config.clone());
    ensure!(
        camera.pixel_count().is_some(),
        "image of {}x{} pixels is too large to render",
        camera.image_width(),
        camera.image_height()
    );
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    log::info!("Starting Ember ({:?} scene)", args.scene);

    let (world, mut config) = scenes::build(args.scene);
    if let Some(path) = &args.camera {
        config = load_camera_config(path)?;
        log::info!("Loaded camera from {}", path.display());
    }
    args.apply_overrides(&mut config);
    validate(&config)?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let show_progress = !args.quiet;
    let gamma = config.gamma;
    let mut camera = Camera::new(config);

    let image = render_with_progress(&mut camera, &world, &mut rng, |remaining| {
        if show_progress {
            eprint!("\rScanlines remaining: {} ", remaining);
            let _ = io::stderr().flush();
        }
    })?;
    if show_progress {
        eprintln!("\rDone.                 ");
    }

    if args.to_stdout() {
        let stdout = io::stdout();
        let mut writer = BufWriter::new(stdout.lock());
        write_ppm(&image, gamma, &mut writer).context("Failed to write image to stdout")?;
    } else {
        save_image(&image, gamma, &args.output)
            .with_context(|| format!("Failed to save {}", args.output.display()))?;
    }

    Ok(())
}
