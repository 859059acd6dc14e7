use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use glam::Vec2;
use spire_input::InputEvent;
use spire_kernel::{ControlId, Simulation, SimulationConfig};
use spire_render::{BufferUploadRenderer, DebugTextRenderer, Renderer};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "spire-cli", about = "Headless driver for the tower simulation")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON simulation config; defaults are used for missing fields
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and the effective configuration
    Info,
    /// Print the effective configuration as JSON
    DumpConfig,
    /// Run the simulation for a number of ticks and report timings
    Run {
        /// Number of ticks to simulate
        #[arg(short, long, default_value = "60")]
        ticks: u64,
        /// Override the number of seed points
        #[arg(short, long)]
        points: Option<usize>,
        /// Override the geometry worker thread count
        #[arg(long)]
        threads: Option<usize>,
        /// Override the scatter seed
        #[arg(short, long)]
        seed: Option<u64>,
        /// Horizontal one-finger pan applied before the run, in pixels
        #[arg(long)]
        spin: Option<f32>,
    },
    /// Step the simulation and print a text rendering of the last frame
    Frame {
        /// Number of ticks to simulate before rendering
        #[arg(short, long, default_value = "1")]
        ticks: u64,
        /// How many vertices to list
        #[arg(short, long, default_value = "4")]
        listed: usize,
    },
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<SimulationConfig> {
    match path {
        Some(path) => SimulationConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(SimulationConfig::default()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let mut config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Info => {
            println!("spire-cli v{}", env!("CARGO_PKG_VERSION"));
            config.validate()?;
            println!(
                "scene: {} towers, {} sides x {} levels, seed {}",
                config.point_count, config.side_count, config.level_count, config.seed
            );
            let control = config.geometry_control();
            println!(
                "per tower: {} vertices, {} indices",
                control.vertices_per_tower(),
                control.indices_per_tower()
            );
            println!(
                "capacity: {} vertices, {} indices",
                config.engine.vertex_capacity, config.engine.index_capacity
            );
            let sim = Simulation::new(config)?;
            println!("workers: {}", sim.worker_count());
            for id in ControlId::ALL {
                let widget = sim.control_widget(id);
                let (lo, hi) = widget.range();
                let value = widget.value(sim.params());
                println!(
                    "control {}: [{lo}, {hi}], now ({:.3}, {:.3})",
                    widget.name(),
                    value.x,
                    value.y
                );
            }
        }
        Commands::DumpConfig => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Commands::Run {
            ticks,
            points,
            threads,
            seed,
            spin,
        } => {
            if let Some(points) = points {
                config.point_count = points;
            }
            if threads.is_some() {
                config.engine.worker_threads = threads;
            }
            if let Some(seed) = seed {
                config.seed = seed;
            }

            let mut sim = Simulation::new(config)?;
            if let Some(spin) = spin {
                sim.handle_input(&InputEvent::Pan {
                    translation: Vec2::new(spin, 0.0),
                    touches: 1,
                });
            }

            let mut upload = BufferUploadRenderer::new();
            let mut total = Duration::ZERO;
            let mut worst = Duration::ZERO;
            let mut dropped = 0;
            for _ in 0..ticks {
                let stats = sim.step()?;
                total += stats.elapsed;
                worst = worst.max(stats.elapsed);
                dropped += stats.towers_dropped;
                upload.render(&sim.frame())?;
            }

            let last = sim.last_stats();
            tracing::info!(
                ticks = sim.tick(),
                vertices = last.vertex_count,
                dropped,
                "run complete"
            );
            println!(
                "ran {} ticks on {} workers: {} vertices, {} triangles per frame",
                sim.tick(),
                sim.worker_count(),
                last.vertex_count,
                last.triangle_count()
            );
            if ticks > 0 {
                println!(
                    "geometry: {:?}/tick average, {worst:?} worst",
                    total.div_f64(ticks as f64)
                );
            }
            println!(
                "uploaded {} frames ({} vertex bytes, {} index bytes)",
                upload.frames_drawn(),
                upload.vertex_bytes().len(),
                upload.index_bytes().len()
            );
            if dropped > 0 {
                println!("dropped {dropped} towers for lack of buffer space");
            }
        }
        Commands::Frame { ticks, listed } => {
            let mut sim = Simulation::new(config)?;
            for _ in 0..ticks {
                sim.step()?;
            }
            let mut renderer = DebugTextRenderer {
                listed_vertices: listed,
            };
            print!("{}", renderer.render(&sim.frame()));
        }
    }

    Ok(())
}
