//! Qmapgen - Entry Point
//!
//! Loads `qmapgen.ron` from the working directory when present, generates
//! one level and writes it as a `.map` file.

use std::path::Path;

use anyhow::{Context, Result};

use qmapgen::data::CONFIG_FILE;
use qmapgen::{export_level, GeneratorConfig, Session};

fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    )
    .target(env_logger::Target::Stderr)
    .init();

    log::info!("Starting qmapgen v{}", env!("CARGO_PKG_VERSION"));

    let config = GeneratorConfig::load_or_default(Path::new(CONFIG_FILE))
        .with_context(|| format!("Failed to load {}", CONFIG_FILE))?;
    let world = config.world.clone();
    let output = config.output.clone();

    let session = Session::new(config).context("Invalid generator configuration")?;
    log::info!("Generating with seed {}", session.seed());
    let level = session.generate();

    export_level(&level, &world, &output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    log::info!("Done: {}", level.stats);
    println!("Wrote {} (seed {})", output.display(), level.seed);
    Ok(())
}
