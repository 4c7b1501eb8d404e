//! Lighting demo
//!
//! Shades a small scene with directional, spot and orbiting point lights.
//! Use `--config <path>` to seed the scene from a TOML file.

use app::{cli::CommonArgs, run_app};
use clap::Parser;
use lighting_demo::{DemoConfig, LightingDemo};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Interactive Phong lighting demo
#[derive(Parser)]
#[command(name = "lighting-demo")]
#[command(about = "Real-time lighting demo with editable light and material parameters")]
struct Args {
    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    if let Some(frames) = args.common.debug {
        info!("Debug mode: running {frames} frames");
    }

    let config = DemoConfig::load(args.common.config_path());
    let app_config = args.common.apply_to(config.app_config());

    run_app(LightingDemo::new(&config), app_config)
        .inspect_err(|e| error!("Lighting demo failed: {e}"))
        .map_err(|e| anyhow::anyhow!("failed to run lighting demo: {e}"))
}
