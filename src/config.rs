//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.draftscope.toml` files. Every field has a default, so an empty file
//! (or no file at all) reproduces the stock Duke Draft analysis.

use crate::cli::OutputFormat;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".draftscope.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// League identity and budget rules.
    #[serde(default)]
    pub league: LeagueConfig,

    /// Input and output locations.
    #[serde(default)]
    pub paths: PathsConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// League identity and budget rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueConfig {
    /// Auction room identifier.
    #[serde(default = "default_room_id")]
    pub room_id: String,

    /// Display name of the league.
    #[serde(default = "default_league_name")]
    pub league_name: String,

    /// Format description, e.g. "15-team dynasty".
    #[serde(default = "default_league_type")]
    pub league_type: String,

    /// Projection system the league values against.
    #[serde(default = "default_projection_system")]
    pub projection_system: String,

    /// Team whose roster is compared against the league.
    #[serde(default = "default_target_team")]
    pub target_team: String,

    /// Auction budget each team starts with.
    #[serde(default = "default_budget")]
    pub budget_per_team: u32,
}

impl Default for LeagueConfig {
    fn default() -> Self {
        Self {
            room_id: default_room_id(),
            league_name: default_league_name(),
            league_type: default_league_type(),
            projection_system: default_projection_system(),
            target_team: default_target_team(),
            budget_per_team: default_budget(),
        }
    }
}

fn default_room_id() -> String {
    "1362".to_string()
}

fn default_league_name() -> String {
    "Duke Draft".to_string()
}

fn default_league_type() -> String {
    "15-team dynasty".to_string()
}

fn default_projection_system() -> String {
    "Steamer".to_string()
}

fn default_target_team() -> String {
    "Duke".to_string()
}

fn default_budget() -> u32 {
    260
}

/// Input and output file locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Auction room snapshot.
    #[serde(default = "default_auction_path")]
    pub auction: PathBuf,

    /// Historical inflation reference.
    #[serde(default = "default_historical_path")]
    pub historical: PathBuf,

    /// Report destination.
    #[serde(default = "default_output_path")]
    pub output: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            auction: default_auction_path(),
            historical: default_historical_path(),
            output: default_output_path(),
        }
    }
}

fn default_auction_path() -> PathBuf {
    PathBuf::from("cache/auctions/room-1362.json")
}

fn default_historical_path() -> PathBuf {
    PathBuf::from("server/analysis/auction-inflation-analysis.json")
}

fn default_output_path() -> PathBuf {
    PathBuf::from("server/analysis/duke_draft_1362_analysis.json")
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Output format of the saved report.
    #[serde(default)]
    pub format: OutputFormat,

    /// Number of insights echoed in the console summary.
    #[serde(default = "default_console_insights")]
    pub console_insights: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            console_insights: default_console_insights(),
        }
    }
}

fn default_console_insights() -> usize {
    5
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE_NAME);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, but only
    /// when they were given explicitly.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref auction) = args.auction {
            self.paths.auction = auction.clone();
        }
        if let Some(ref historical) = args.historical {
            self.paths.historical = historical.clone();
        }
        if let Some(format) = args.format {
            self.report.format = format;
        }

        // Only the built-in output path follows the format; a configured
        // path is used as written.
        match args.output {
            Some(ref output) => self.paths.output = output.clone(),
            None if self.report.format == OutputFormat::Markdown
                && self.paths.output == default_output_path() =>
            {
                self.paths.output.set_extension("md");
            }
            None => {}
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
