//! Command-line arguments of the viewer.

use std::path::PathBuf;

use clap::Parser;

use crate::config::AppConfig;
use crate::constants::CONFIG_ENV_VAR;

#[derive(Parser, Debug, Default)]
#[command(author, version, about = "Show names from a JSON file as curved labels over an image")]
pub struct Cli {
    /// Names file to load at startup
    pub names: Option<PathBuf>,

    /// Background image drawn beneath the labels
    #[arg(long, short)]
    pub background: Option<PathBuf>,

    /// Label font file (TTF/OTF)
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Configuration file
    #[arg(long, env = CONFIG_ENV_VAR)]
    pub config: Option<PathBuf>,

    /// Write the effective configuration to the config path and exit
    #[arg(long)]
    pub write_config: bool,
}

impl Cli {
    /// Let command-line paths override the configured ones.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(background) = &self.background {
            config.background_path = Some(background.clone());
        }
        if let Some(font) = &self.font {
            config.font_path = Some(font.clone());
        }
    }
}
