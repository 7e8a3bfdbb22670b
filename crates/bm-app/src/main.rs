use std::io::Write;

use anyhow::Result;
use bm_core::config::Generator;
use bm_core::region::RegionMap;
use bm_quant::ImageQuantizer;
use clap::Parser;

pub mod cli;
pub mod pipeline;
pub mod preview;
pub mod regions;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Configuration : défauts, fichier TOML, puis options CLI
    let generator = resolve_generator(&cli)?;
    log::debug!("Configuration effective : {generator:?}");

    // 4. Décoder la source
    let frame = bm_source::decode(&cli.input)?;
    log::info!(
        "Source {} : {}×{}",
        cli.input.display(),
        frame.width,
        frame.height
    );

    let quantizer = ImageQuantizer::with_speed(cli.speed);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    // 5. Carte de zones, ou image entière
    if let Some(map_path) = cli.map.as_deref() {
        let map = RegionMap::load(map_path, &generator)?;
        return regions::run_regions(&frame, &map, &quantizer, &mut out, cli.preview.as_deref());
    }

    let built = pipeline::build(&frame, &generator, &quantizer)?;
    writeln!(out, "{}", built.text)?;
    if let Some(path) = cli.preview.as_deref() {
        preview::save(&built.indexed, path)?;
    }
    Ok(())
}

fn resolve_generator(cli: &cli::Cli) -> Result<Generator> {
    let mut generator = match cli.config.as_deref() {
        Some(path) => bm_core::config::load_config(path)?,
        None => Generator::default(),
    };
    cli.to_override().apply_to(&mut generator);
    generator.validate()?;
    Ok(generator)
}
