//! Shared command line options
//!
//! Apps embed [`CommonArgs`] in their own clap parser with
//! `#[command(flatten)]` and hand the result to
//! [`CommonArgs::apply_to`] before calling `run_app`.

use clap::Args;
use std::path::{Path, PathBuf};

#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Run N frames, save a screenshot of the last one, then exit
    #[arg(long, value_name = "FRAMES")]
    pub debug: Option<u64>,

    /// Where `--debug` writes its screenshot
    #[arg(long, value_name = "PATH", requires = "debug")]
    pub screenshot: Option<PathBuf>,

    /// Load configuration from a TOML file
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl CommonArgs {
    #[cfg(feature = "runtime")]
    pub fn apply_to(&self, config: crate::AppConfig) -> crate::AppConfig {
        let Some(frames) = self.debug else {
            return config;
        };
        let mut config = config.with_debug_mode(frames);
        if let (Some(debug_mode), Some(path)) = (config.debug_mode.as_mut(), &self.screenshot) {
            debug_mode.output_path = path.clone();
        }
        config
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config.as_deref()
    }

    pub fn is_debug(&self) -> bool {
        self.debug.is_some()
    }
}
