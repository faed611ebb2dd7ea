//! Configuration file management for mealwheel.
//!
//! Provides a TOML-based config file at `~/.config/mealwheel/config.toml` and a
//! resolution chain: CLI flag > env var > config file > default.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use mealwheel_core::KeywordSet;
use mealwheel_data::{SourceConfig, WorkbookLayout};

use crate::render::Household;

/// Environment variable overriding the workbook layout.
pub const LAYOUT_ENV: &str = "MEALWHEEL_LAYOUT";

/// Environment variable fixing the generator seed.
pub const SEED_ENV: &str = "MEALWHEEL_SEED";

// -----------------------------------------------------------------------
// Errors
// -----------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is not a valid layout: {value:?} (expected per-meal or single-sheet)")]
    InvalidLayout { var: &'static str, value: String },

    #[error("{var} is not a valid seed: {value:?} (expected an unsigned integer)")]
    InvalidSeed { var: &'static str, value: String },
}

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub source: SourceSection,
    #[serde(default)]
    pub generator: GeneratorSection,
    #[serde(default)]
    pub keywords: KeywordSet,
    #[serde(default)]
    pub household: HouseholdSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SourceSection {
    pub workbook: PathBuf,
    #[serde(default)]
    pub layout: WorkbookLayout,
}

impl Default for SourceSection {
    fn default() -> Self {
        Self {
            workbook: PathBuf::from(SourceConfig::DEFAULT_PATH),
            layout: WorkbookLayout::default(),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GeneratorSection {
    /// Fixed seed for reproducible weeks; omit for a fresh week every run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct HouseholdSection {
    pub toddler_name: String,
    pub infant_name: String,
}

impl Default for HouseholdSection {
    fn default() -> Self {
        let household = Household::default();
        Self {
            toddler_name: household.toddler_name,
            infant_name: household.infant_name,
        }
    }
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the mealwheel config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/mealwheel` or
/// `~/.config/mealwheel`, on every platform.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("mealwheel");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("mealwheel")
}

/// Return the path to the mealwheel config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse the config file at `path`.
pub fn load_config_from(path: &Path) -> Result<ConfigFile> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents)
        .with_context(|| format!("failed to parse config file at {}", path.display()))?;
    Ok(config)
}

/// Load the config file if one exists. A malformed file is an error.
pub fn load_config() -> Result<Option<ConfigFile>> {
    let path = config_path();
    if !path.exists() {
        return Ok(None);
    }
    load_config_from(&path).map(Some)
}

/// Serialize and write the config file to `path`, creating parent dirs as
/// needed. Sets file permissions to 0600 on Unix.
pub fn save_config_to(config: &ConfigFile, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create config directory {}", dir.display()))?;
    }

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(path, perms)
            .with_context(|| format!("failed to set permissions on {}", path.display()))?;
    }

    Ok(())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Values given on the command line; `None` means "not given".
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub workbook: Option<PathBuf>,
    pub layout: Option<WorkbookLayout>,
    pub seed: Option<u64>,
}

/// Fully resolved configuration, ready for use.
#[derive(Debug)]
pub struct MealwheelConfig {
    pub source: SourceConfig,
    pub seed: Option<u64>,
    pub keywords: KeywordSet,
    pub household: Household,
}

impl MealwheelConfig {
    /// Resolve configuration from the default config file location.
    pub fn resolve(cli: &CliOverrides) -> Result<Self> {
        let file = load_config()?;
        Ok(Self::resolve_with(cli, file)?)
    }

    /// Resolve using the chain: CLI flag > env var > config file > default.
    ///
    /// - Workbook: `--workbook` > `MEALWHEEL_WORKBOOK` > `source.workbook` > `family_menu.xlsx`
    /// - Layout: `--layout` > `MEALWHEEL_LAYOUT` > `source.layout` > `per-meal`
    /// - Seed: `--seed` > `MEALWHEEL_SEED` > `generator.seed` > none
    pub fn resolve_with(
        cli: &CliOverrides,
        file: Option<ConfigFile>,
    ) -> Result<Self, ConfigError> {
        let file = file.unwrap_or_default();

        let workbook = if let Some(path) = &cli.workbook {
            path.clone()
        } else if let Ok(path) = std::env::var(SourceConfig::PATH_ENV) {
            PathBuf::from(path)
        } else {
            file.source.workbook
        };

        let layout = match cli.layout {
            Some(layout) => layout,
            None => match std::env::var(LAYOUT_ENV) {
                Ok(value) => value.parse().map_err(|_| ConfigError::InvalidLayout {
                    var: LAYOUT_ENV,
                    value,
                })?,
                Err(_) => file.source.layout,
            },
        };

        let seed = match cli.seed {
            Some(seed) => Some(seed),
            None => match std::env::var(SEED_ENV) {
                Ok(value) => Some(value.trim().parse().map_err(|_| ConfigError::InvalidSeed {
                    var: SEED_ENV,
                    value,
                })?),
                Err(_) => file.generator.seed,
            },
        };

        Ok(Self {
            source: SourceConfig::new(workbook).with_layout(layout),
            seed,
            keywords: file.keywords,
            household: Household::new(file.household.toddler_name, file.household.infant_name),
        })
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
