use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glam::DVec3;
use pulsar_core::{CelestialSphere, MagnitudeGradient, SphereConfig};
use pulsar_data::{load_tags_json, PulsarCatalog};
use pulsar_sim::{PopulationConfig, PopulationEngine, ViewerState};
use rand::SeedableRng;
use rand_chacha::ChaChaRng;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pulsar")]
#[command(about = "Pulsar catalog to spatial population")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a catalog and report what was read
    Inspect {
        #[arg(short, long)]
        catalog: PathBuf,
        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// Build the population and write a JSON snapshot
    Build {
        #[arg(short, long)]
        catalog: PathBuf,
        /// Population config (JSON)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Override the config seed
        #[arg(long)]
        seed: Option<u64>,
        /// Override the number of random tags
        #[arg(long)]
        tags: Option<usize>,
        /// Extra static tags (JSON list of {name, position})
        #[arg(long)]
        static_tags: Option<PathBuf>,
        /// Output file, stdout if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Gaze at one pulsar from Earth for a number of ticks
    Simulate {
        #[arg(short, long)]
        catalog: PathBuf,
        #[arg(long)]
        config: Option<PathBuf>,
        /// Pulsar name
        #[arg(short, long)]
        target: String,
        #[arg(long, default_value = "100")]
        ticks: u64,
    },

    /// Emit the celestial reference grid as JSON
    Sphere {
        #[arg(long, default_value = "1024")]
        radius: f64,
        #[arg(long, default_value = "64")]
        divisions: u32,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect { catalog, seed } => {
            let mut rng = ChaChaRng::seed_from_u64(seed);
            let catalog = PulsarCatalog::load_from_path(&catalog, &mut rng)
                .with_context(|| format!("failed to read catalog {:?}", catalog))?;

            println!("Pulsars:     {}", catalog.len());
            println!("  placed:    {}", catalog.placed().count());
            println!("  unplaced:  {}", catalog.unplaced_count());
            println!("  rejected:  {}", catalog.rejected().len());
            for err in catalog.rejected() {
                println!("    {}", err);
            }

            let gradient = MagnitudeGradient::from_magnitudes(catalog.iter().map(|r| r.bsurf));
            match gradient.range() {
                Some(range) => println!(
                    "B surface range: 10^{:.2} .. 10^{:.2} G",
                    range.min, range.max
                ),
                None => println!("B surface range: unknown"),
            }
        }

        Commands::Build { catalog, config, seed, tags, static_tags, output } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(seed) = seed {
                config.seed = seed;
            }
            if let Some(tags) = tags {
                config.tag_count = tags;
            }
            if let Some(path) = static_tags {
                let extra = load_tags_json(&path)
                    .with_context(|| format!("failed to load tags {:?}", path))?;
                config.static_tags.extend(extra);
            }

            let engine = PopulationEngine::load(&catalog, config)
                .with_context(|| format!("failed to build population from {:?}", catalog))?;
            let json = serde_json::to_string_pretty(&engine.snapshot())?;
            write_output(output.as_deref(), &json)?;
        }

        Commands::Simulate { catalog, config, target, ticks } => {
            let config = load_config(config.as_deref())?;
            let mut engine = PopulationEngine::load(&catalog, config)
                .with_context(|| format!("failed to build population from {:?}", catalog))?;

            let id = engine
                .find(&target)
                .map(|b| b.id())
                .with_context(|| format!("no placed pulsar named '{}'", target))?;

            let mut viewer = ViewerState::default();
            for _ in 0..ticks {
                // Follow the primary as it orbits
                if let Some(body) = engine.body(id) {
                    let p = body.primary_world_position();
                    viewer = ViewerState::looking_at(DVec3::ZERO, DVec3::new(p.x, p.y, p.z));
                }
                engine.tick(&viewer);
            }

            let body = engine.body(id).context("target body vanished")?;
            if let Some(description) = engine.describe(id, &viewer) {
                println!("{}", description);
            }
            println!();
            println!("Ticks:          {}", engine.tick_count());
            println!("Active:         {}", body.is_active());
            println!("Binary phase:   {:.4} rad", body.binary_phase());
            println!("Spin phase:     {:.6} rad", body.spin_phase());
            println!("Scale factor:   {:.3}", body.scale_correction());
            println!("LOD:            {:?}", body.lod());
        }

        Commands::Sphere { radius, divisions, output } => {
            let sphere = CelestialSphere::new(SphereConfig {
                radius,
                divisions,
                ..SphereConfig::default()
            });
            let json = serde_json::to_string_pretty(&sphere.lines())?;
            write_output(output.as_deref(), &json)?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<PopulationConfig> {
    match path {
        Some(path) => PopulationConfig::load_json(path)
            .with_context(|| format!("failed to load config {:?}", path)),
        None => Ok(PopulationConfig::default()),
    }
}

fn write_output(path: Option<&Path>, contents: &str) -> Result<()> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, contents).with_context(|| format!("failed to write {:?}", path))?;
            tracing::info!("Wrote {:?}", path);
        }
        None => println!("{}", contents),
    }
    Ok(())
}
