//! `catloop`: run a Catloop Sky session without a camera or display.
//!
//! By default replays a scripted session frame by frame and prints the
//! missions it completed as JSON. `--live` instead runs the real-time frame
//! loop on its own thread for a number of seconds.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use catloop_app::clock::SystemClock;
use catloop_app::frame_loop::spawn_frame_loop;
use catloop_app::render::LogRenderer;
use catloop_app::script::ReplayScript;
use catloop_app::state::SensorSlots;
use catloop_core::catalog::Catalog;
use catloop_core::commands::SessionCommand;
use catloop_core::config::SessionConfig;
use catloop_core::mission;
use catloop_sky::SkyEngine;

#[derive(Parser, Debug)]
#[command(name = "catloop", version, about = "Headless Catloop Sky session runner")]
struct Args {
    /// Session config (JSON). Missing keys keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Star catalog (JSON). Defaults to the built-in catalog.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Replay script (JSON). Defaults to the built-in Jupiter demo.
    #[arg(long, conflicts_with = "live")]
    script: Option<PathBuf>,

    /// Run the real-time loop for this many seconds instead of a replay.
    #[arg(long, value_name = "SECONDS")]
    live: Option<f64>,

    /// Built-in mission to activate in live mode.
    #[arg(long, requires = "live")]
    mission: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SessionConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SessionConfig::default(),
    };

    let catalog = match &args.catalog {
        Some(path) => {
            let (catalog, report) = Catalog::load(path)
                .with_context(|| format!("loading catalog {}", path.display()))?;
            if !report.is_clean() {
                warn!(
                    skipped = report.issues.len(),
                    "catalog contained invalid entries"
                );
            }
            catalog
        }
        None => Catalog::builtin(),
    };
    info!(objects = catalog.len(), "catalog ready");

    let engine = SkyEngine::new(catalog, config);

    let completions = match args.live {
        Some(seconds) => {
            let run_for = live_duration(seconds)?;
            let handle =
                spawn_frame_loop(engine, SystemClock, LogRenderer::new(), SensorSlots::default())?;
            if let Some(id) = &args.mission {
                let mission = mission::find_builtin(id)
                    .with_context(|| format!("unknown mission {id}"))?;
                handle.send(SessionCommand::SetActiveMission { mission })?;
            }
            std::thread::sleep(run_for);
            let (_, renderer) = handle.stop()?;
            renderer.completions().to_vec()
        }
        None => {
            let script = match &args.script {
                Some(path) => ReplayScript::load(path)?,
                None => ReplayScript::demo(),
            };
            let (_, renderer) = script.replay(engine, LogRenderer::new())?;
            renderer.completions().to_vec()
        }
    };

    println!("{}", serde_json::to_string_pretty(&completions)?);
    Ok(())
}

/// Parse the `--live` length; negative, non-finite or overlong values are rejected.
fn live_duration(seconds: f64) -> anyhow::Result<Duration> {
    Duration::try_from_secs_f64(seconds)
        .with_context(|| format!("--live needs a usable number of seconds, got {seconds}"))
}
