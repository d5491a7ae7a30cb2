//! mesh-prep command line interface.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::LevelFilter;

use mesh_prep::backend::MeshBackend;
use mesh_prep::classify::ControlIndex;
use mesh_prep::config::{Config, Control};
use mesh_prep::geometry::Geometry;
use mesh_prep::mesh_error::MeshPrepError;

/// Prepare snappyHexMesh surface inputs from a case configuration.
#[derive(Parser)]
#[command(name = "mesh-prep")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Classify CFD surface geometry and export mesher inputs", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error); defaults to RUST_LOG or info
    #[arg(short, long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean the case, classify the geometry and export surfaces and features
    Setup {
        /// Path to the YAML case configuration
        config: PathBuf,
    },
    /// Classify the geometry and print the result without writing files
    Check {
        /// Path to the YAML case configuration
        config: PathBuf,
    },
}

fn init_logging(level: Option<&str>) {
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    );
    if let Some(level) = level.and_then(|l| l.parse::<LevelFilter>().ok()) {
        builder.filter_level(level);
    }
    builder.format_target(false).init();
}

fn setup(path: PathBuf) -> anyhow::Result<()> {
    let config = Config::from_yaml(&path)
        .with_context(|| format!("loading configuration {}", path.display()))?;
    let mut backend = MeshBackend::without_writer(config);
    let report = backend.setup().context("preparing case")?;
    for file in report.geometry_files.iter().chain(&report.feature_files) {
        println!("{}", file.display());
    }
    Ok(())
}

fn check(path: PathBuf) -> anyhow::Result<()> {
    let config = Config::from_yaml(&path)
        .with_context(|| format!("loading configuration {}", path.display()))?;
    let mut backend = MeshBackend::without_writer(config);
    backend.import_geometry()?;
    backend.assign_geometry()?;
    backend.assign_features()?;

    let geometry = backend.geometry().ok_or(MeshPrepError::GeometryNotImported)?;
    let index = ControlIndex::from_config(backend.config())?;
    for patch in geometry.patches() {
        let name = patch.name();
        let control = index.resolve_control(name);
        match &control {
            Control::Volume(volume) => {
                println!("{name:<32} {:<8} level {}", control.kind(), volume.level);
            }
            Control::Surface(surface) => {
                let region = backend.classification().region_of(name).unwrap_or("-");
                println!(
                    "{name:<32} {:<8} region {region}  target {} feature {}",
                    control.kind(),
                    surface.target_level(),
                    surface.feature_level()
                );
            }
        }
    }

    for (level, edges) in backend.features() {
        println!("feature level {level}: {} edges", edges.len());
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    match cli.command {
        Commands::Setup { config } => setup(config),
        Commands::Check { config } => check(config),
    }
}
