use anyhow::Context;
use clap::{Parser, Subcommand};
use glam::Vec2;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use wavegrid_common::{ParamId, ParamPreset, WaveParams};
use wavegrid_kernel::{displacement, layer_coordinates, max_displacement, value_noise};
use wavegrid_render::{FrameState, Renderer, TextRenderer, TextView};

#[derive(Parser)]
#[command(name = "wavegrid-cli", about = "CLI tool for the wave grid")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Print the parameter table
    Params {
        /// Parameter preset (.yaml, .yml or .json)
        #[arg(long)]
        params: Option<PathBuf>,
        /// Print the sanitized parameter set as JSON
        #[arg(long)]
        json: bool,
    },
    /// Evaluate the displacement at one point
    Sample {
        #[arg(long, allow_hyphen_values = true)]
        x: f32,
        #[arg(long, allow_hyphen_values = true)]
        y: f32,
        /// Animation time in seconds
        #[arg(long, default_value = "0.0")]
        time: f32,
        #[arg(long)]
        params: Option<PathBuf>,
    },
    /// Print an ASCII heightfield of the surface
    Preview {
        /// Characters per side
        #[arg(long, default_value = "32")]
        resolution: u32,
        /// Animation time in seconds
        #[arg(long, default_value = "0.0")]
        time: f32,
        #[arg(long)]
        params: Option<PathBuf>,
        /// World-space edge length covered by the preview
        #[arg(long, default_value = "10.0")]
        extent: f32,
    },
}

fn load_params(path: Option<&Path>) -> anyhow::Result<WaveParams> {
    match path {
        Some(path) => ParamPreset::load(path)
            .with_context(|| format!("failed to load preset {}", path.display())),
        None => Ok(WaveParams::default()),
    }
}

fn params_table(params: &WaveParams) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<10} {:>6} {:>6} {:>6} {:>8}",
        "param", "min", "max", "step", "value"
    );
    for id in ParamId::ALL {
        let range = id.range();
        let _ = writeln!(
            out,
            "{:<10} {:>6.2} {:>6.2} {:>6.2} {:>8.3}",
            id.label(),
            range.min,
            range.max,
            range.step,
            params.get(id)
        );
    }
    out
}

fn sample_report(p: Vec2, time: f32, params: &WaveParams) -> String {
    let (layer1, layer2) = layer_coordinates(p, time, params);
    let mut out = String::new();
    let _ = writeln!(out, "point:   ({:.4}, {:.4})  t={time:.3}s", p.x, p.y);
    let _ = writeln!(
        out,
        "layer 1: ({:.4}, {:.4})  noise={:.6}",
        layer1.x,
        layer1.y,
        value_noise(layer1)
    );
    let _ = writeln!(
        out,
        "layer 2: ({:.4}, {:.4})  noise={:.6}",
        layer2.x,
        layer2.y,
        value_noise(layer2)
    );
    let _ = writeln!(
        out,
        "z:       {:.6}  (bound {:.3})",
        displacement(p, time, params),
        max_displacement(params)
    );
    out
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info => {
            println!("wavegrid-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", wavegrid_common::crate_info());
            println!("mesh: {}", wavegrid_mesh::crate_info());
            println!("render: {}", wavegrid_render::crate_info());
            println!("input: {}", wavegrid_input::crate_info());
            println!("tools: {}", wavegrid_tools::crate_info());
        }
        Commands::Params { params, json } => {
            let params = load_params(params.as_deref())?;
            if json {
                println!("{}", ParamPreset::to_json(&params)?);
            } else {
                print!("{}", params_table(&params));
            }
        }
        Commands::Sample { x, y, time, params } => {
            let params = load_params(params.as_deref())?;
            print!("{}", sample_report(Vec2::new(x, y), time, &params));
        }
        Commands::Preview {
            resolution,
            time,
            params,
            extent,
        } => {
            let params = load_params(params.as_deref())?;
            let renderer = TextRenderer::new(TextView { resolution, extent })
                .context("invalid preview size")?;
            tracing::debug!(resolution, extent, time, "rendering preview");
            print!("{}", renderer.render(&FrameState::at(time, params)));
        }
    }

    Ok(())
}
