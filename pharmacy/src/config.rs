//! Application configuration.
//!
//! This module loads the pharmacy CLI configuration from environment
//! variables.
//!
//! # Environment Variables
//!
//! - `PHARMACY_TREE_MODE`: `avl` or `bst`, case-insensitive (default: `avl`)
//! - `PHARMACY_RESULTS_PATH`: File the experiment summary is written to
//!   (default: `avl_results.txt` or `bst_results.txt`, by tree mode)
//! - `PHARMACY_SEED`: Seed for the experiment's random generator (default:
//!   fresh entropy on every run)
//!
//! # Invariants
//!
//! - `results_path` is always set, falling back to a per-mode file name
//! - `seed` is `None` only when the variable is absent

use std::path::PathBuf;

use crate::tree::Mode;

const TREE_MODE_VAR: &str = "PHARMACY_TREE_MODE";
const RESULTS_PATH_VAR: &str = "PHARMACY_RESULTS_PATH";
const SEED_VAR: &str = "PHARMACY_SEED";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Which tree backs the inventory.
    pub mode: Mode,
    /// Where the experiment summary is written.
    pub results_path: PathBuf,
    /// Seed for reproducible experiments.
    pub seed: Option<u64>,
}

/// Error returned when loading configuration fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable has an invalid value.
    InvalidValue { name: String, message: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { name, message } => {
                write!(f, "invalid value for {name}: {message}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl AppConfig {
    /// Default results file in AVL mode.
    pub const DEFAULT_AVL_RESULTS_PATH: &'static str = "avl_results.txt";
    /// Default results file in BST mode.
    pub const DEFAULT_BST_RESULTS_PATH: &'static str = "bst_results.txt";

    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `PHARMACY_TREE_MODE` is set but is neither `avl` nor `bst`
    /// - `PHARMACY_SEED` is set but is not a valid `u64`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_values(
            std::env::var(TREE_MODE_VAR).ok(),
            std::env::var(RESULTS_PATH_VAR).ok(),
            std::env::var(SEED_VAR).ok(),
        )
    }

    /// Build a configuration from raw variable values; `None` means unset.
    pub fn from_values(
        mode: Option<String>,
        results_path: Option<String>,
        seed: Option<String>,
    ) -> Result<Self, ConfigError> {
        let mode = Self::parse_mode(mode)?;
        let results_path = Self::results_path_or_default(results_path, mode);
        let seed = Self::parse_seed(seed)?;

        Ok(Self {
            mode,
            results_path,
            seed,
        })
    }

    /// Parse the tree mode.
    ///
    /// Returns the default if not set.
    fn parse_mode(value: Option<String>) -> Result<Mode, ConfigError> {
        let Some(value) = value else {
            return Ok(Mode::default());
        };

        match value.trim().to_ascii_lowercase().as_str() {
            "avl" => Ok(Mode::Avl),
            "bst" => Ok(Mode::Bst),
            _ => Err(ConfigError::InvalidValue {
                name: TREE_MODE_VAR.to_string(),
                message: format!("'{value}' is not a tree mode (expected 'avl' or 'bst')"),
            }),
        }
    }

    fn results_path_or_default(value: Option<String>, mode: Mode) -> PathBuf {
        match value {
            Some(path) if !path.is_empty() => PathBuf::from(path),
            _ => PathBuf::from(match mode {
                Mode::Avl => Self::DEFAULT_AVL_RESULTS_PATH,
                Mode::Bst => Self::DEFAULT_BST_RESULTS_PATH,
            }),
        }
    }

    /// Parse the experiment seed.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is set but not a valid `u64`.
    fn parse_seed(value: Option<String>) -> Result<Option<u64>, ConfigError> {
        value
            .map(|value| {
                value.trim().parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                    name: SEED_VAR.to_string(),
                    message: format!("'{value}' is not a valid seed (must be 0-{})", u64::MAX),
                })
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = AppConfig::from_values(None, None, None).expect("defaults");
        assert_eq!(config.mode, Mode::Avl);
        assert_eq!(config.results_path, PathBuf::from("avl_results.txt"));
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_bst_mode_picks_bst_results_file() {
        let config =
            AppConfig::from_values(Some(" BST ".to_string()), None, None).expect("bst mode");
        assert_eq!(config.mode, Mode::Bst);
        assert_eq!(config.results_path, PathBuf::from("bst_results.txt"));
    }

    #[test]
    fn test_explicit_values() {
        let config = AppConfig::from_values(
            Some("avl".to_string()),
            Some("/tmp/out.txt".to_string()),
            Some("42".to_string()),
        )
        .expect("explicit values");
        assert_eq!(config.results_path, PathBuf::from("/tmp/out.txt"));
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_invalid_mode() {
        let err = AppConfig::from_values(Some("redblack".to_string()), None, None)
            .expect_err("invalid mode");
        assert_eq!(
            err.to_string(),
            "invalid value for PHARMACY_TREE_MODE: 'redblack' is not a tree mode (expected 'avl' or 'bst')"
        );
    }

    #[test]
    fn test_invalid_seed() {
        let err = AppConfig::from_values(None, None, Some("-1".to_string()))
            .expect_err("invalid seed");
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref name, .. } if name == "PHARMACY_SEED"
        ));
    }

    #[test]
    fn test_empty_results_path_falls_back_to_default() {
        let config = AppConfig::from_values(None, Some(String::new()), None).expect("config");
        assert_eq!(config.results_path, PathBuf::from("avl_results.txt"));
    }
}
