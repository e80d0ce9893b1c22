//! gridcal configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::{CalResult, CalendarError};
use crate::month_grid::WeekStart;

const DEFAULT_CELL_LINES: u32 = 3;
const DEFAULT_CELL_WIDTH: u32 = 14;

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("gridcal"))
        .unwrap_or_else(|| PathBuf::from("~/.gridcal"))
}

fn default_cell_lines() -> u32 {
    DEFAULT_CELL_LINES
}

fn default_cell_width() -> u32 {
    DEFAULT_CELL_WIDTH
}

/// Configuration at ~/.config/gridcal/config.toml, overridable with
/// `GRIDCAL_*` environment variables.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct GridcalConfig {
    /// Where the event store keeps its data.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default)]
    pub week_start: WeekStart,

    /// Event lines per grid cell, below the day number.
    #[serde(default = "default_cell_lines")]
    pub cell_lines: u32,

    /// Columns per grid cell.
    #[serde(default = "default_cell_width")]
    pub cell_width: u32,
}

impl Default for GridcalConfig {
    fn default() -> Self {
        GridcalConfig {
            data_dir: default_data_dir(),
            week_start: WeekStart::default(),
            cell_lines: DEFAULT_CELL_LINES,
            cell_width: DEFAULT_CELL_WIDTH,
        }
    }
}

impl GridcalConfig {
    pub fn config_path() -> CalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CalendarError::Config("Could not determine config directory".into()))?
            .join("gridcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, writing a commented-out config file
    /// there first if none exists.
    pub fn load() -> CalResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> CalResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("GRIDCAL").try_parsing(true))
            .build()
            .map_err(|e| CalendarError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CalendarError::Config(e.to_string()))
    }

    /// `data_dir` with a leading `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CalResult<()> {
        let contents = format!(
            "\
# gridcal configuration

# Where events are stored:
# data_dir = \"{}\"

# First day of the week in the month grid (\"sunday\" or \"monday\"):
# week_start = \"sunday\"

# Event lines shown per day before collapsing into \"+N more\":
# cell_lines = {}

# Width of each day column:
# cell_width = {}
",
            default_data_dir().display(),
            DEFAULT_CELL_LINES,
            DEFAULT_CELL_WIDTH,
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CalendarError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CalendarError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
