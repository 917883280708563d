use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{ConfigError, Result};

pub const DEFAULT_DAYS: usize = 7;
pub const SNACKS_PER_DAY: usize = 2;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct NutriplanConfig {
    #[serde(default)]
    pub catalog: CatalogSection,
    #[serde(default)]
    pub planner: PlannerSection,
    #[serde(default)]
    pub export: ExportSection,
}

impl NutriplanConfig {
    /// Checks the values serde cannot express as types.
    pub fn validate(&self) -> Result<()> {
        if self.planner.days == 0 {
            return Err(ConfigError::Invalid {
                field: "planner.days",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.planner.snacks_per_day != SNACKS_PER_DAY {
            return Err(ConfigError::Invalid {
                field: "planner.snacks_per_day",
                reason: format!("only {SNACKS_PER_DAY} snacks per day are supported"),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSection {
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,
    #[serde(default)]
    pub extra: Vec<PathBuf>,
}

impl Default for CatalogSection {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
            extra: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlannerSection {
    #[serde(default = "default_days")]
    pub days: usize,
    #[serde(default = "default_snacks_per_day")]
    pub snacks_per_day: usize,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for PlannerSection {
    fn default() -> Self {
        Self {
            days: DEFAULT_DAYS,
            snacks_per_day: SNACKS_PER_DAY,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportSection {
    #[serde(default = "default_export_dir")]
    pub directory: PathBuf,
}

impl Default for ExportSection {
    fn default() -> Self {
        Self {
            directory: default_export_dir(),
        }
    }
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("data/sample_foods.json")
}

fn default_days() -> usize {
    DEFAULT_DAYS
}

fn default_snacks_per_day() -> usize {
    SNACKS_PER_DAY
}

fn default_export_dir() -> PathBuf {
    PathBuf::from("exports")
}

pub fn load_nutriplan_config<P: AsRef<Path>>(path: P) -> Result<NutriplanConfig> {
    let config: NutriplanConfig = load_toml(path)?;
    config.validate()?;
    Ok(config)
}

/// Loads the settings file, falling back to defaults when it does not exist.
pub fn load_nutriplan_config_or_default<P: AsRef<Path>>(path: P) -> Result<NutriplanConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::debug!(target: "config", path = %path.display(), "settings file absent, using defaults");
        return Ok(NutriplanConfig::default());
    }
    load_nutriplan_config(path)
}

fn load_toml<T, P>(path: P) -> Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        source,
        path: path.to_path_buf(),
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        source,
        path: path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_fixture_config() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../configs/nutriplan.toml");
        let config = load_nutriplan_config(path).expect("config should parse");
        assert_eq!(config.planner.days, 7);
        assert_eq!(config.planner.snacks_per_day, 2);
        assert_eq!(config.catalog.path, PathBuf::from("data/sample_foods.json"));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_nutriplan_config_or_default(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.planner.days, DEFAULT_DAYS);
        assert!(config.planner.seed.is_none());
        assert_eq!(config.export.directory, PathBuf::from("exports"));
    }

    #[test]
    fn rejects_unsupported_snack_count() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nutriplan.toml");
        std::fs::write(&path, "[planner]\nsnacks_per_day = 3\n").unwrap();
        let err = load_nutriplan_config(&path).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "planner.snacks_per_day",
                ..
            }
        ));
    }

    #[test]
    fn parse_error_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[planner\ndays = ").unwrap();
        let err = load_nutriplan_config(&path).unwrap_err();
        assert!(err.to_string().contains("broken.toml"));
    }
}
