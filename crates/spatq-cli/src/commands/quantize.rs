use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use spatq_core::anneal::Annealer;
use spatq_core::config::QuantizeConfig;
use spatq_core::palette::random_palette;

use crate::{filters, raw, summary};

#[derive(Args)]
pub struct QuantizeArgs {
    /// Input raw RGB file (headerless 8-bit interleaved)
    pub input: PathBuf,

    /// Image width in pixels
    pub width: usize,

    /// Image height in pixels
    pub height: usize,

    /// Palette size (2-256)
    pub colors: usize,

    /// Output raw RGB file
    pub output: PathBuf,

    /// Reconstruction filter size (1, 3, or 5)
    pub filter_size: Option<usize>,

    /// RNG seed for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Starting annealing temperature
    #[arg(long)]
    pub initial_temp: Option<f64>,

    /// Temperature at which annealing stops
    #[arg(long)]
    pub final_temp: Option<f64>,

    /// Read defaults from a TOML config file (flags still win)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: &QuantizeArgs) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(size) = args.filter_size {
        config.filter_size = size;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(t) = args.initial_temp {
        config.schedule.initial_temperature = t;
    }
    if let Some(t) = args.final_temp {
        config.schedule.final_temperature = t;
    }
    config.validate()?;

    let image = raw::load_rgb(&args.input, args.width, args.height)?;
    let filter = filters::reconstruction_filter(config.filter_size)?;

    // A random run still reports its seed so it can be replayed.
    let seed = config.seed.unwrap_or_else(rand::random);
    summary::print_run_summary(args, &config, seed);

    let mut rng = StdRng::seed_from_u64(seed);
    let palette = random_palette(args.colors, &mut rng);

    let mut annealer = Annealer::new(&image, &filter, palette, config.schedule, rng)?;
    let pb = ProgressBar::new(annealer.estimated_steps() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("Annealing [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    while annealer.step()? {
        pb.inc(1);
    }
    pb.finish();

    let result = annealer.finish();
    raw::save_rgb(&args.output, &result.indices, &result.palette)?;
    println!(
        "Saved {} palette entries to {}",
        result.palette.len(),
        args.output.display()
    );
    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> Result<QuantizeConfig> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            toml::from_str(&text).with_context(|| format!("Invalid config in {}", path.display()))
        }
        None => Ok(QuantizeConfig::default()),
    }
}
