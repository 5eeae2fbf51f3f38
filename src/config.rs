//! Run configuration.
//!
//! Every field has a default, so an empty (or absent) TOML file is a valid
//! configuration. CLI flags override values read from the file.
//!
//! ```toml
//! dataset_dir = "data/dataset"
//! output = "data/dataset/final_decision.csv"
//! skip_ratio = 0.0625
//! seed = 7
//!
//! [tables]
//! meetings = "meets.csv"
//! venues = "locations.csv"
//! availability = "availability.csv"
//! location_options = "locationOptions.csv"
//! availability_locations = "isAvailableAt.csv"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// File names of the input tables, relative to the dataset directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableFiles {
    pub meetings: String,
    pub venues: String,
    pub availability: String,
    pub location_options: String,
    pub availability_locations: String,
}

impl Default for TableFiles {
    fn default() -> Self {
        Self {
            meetings: "meet.csv".into(),
            venues: "location.csv".into(),
            availability: "availability.csv".into(),
            location_options: "location_option.csv".into(),
            availability_locations: "availability_location.csv".into(),
        }
    }
}

impl TableFiles {
    /// The camelCase file layout used by the older generator scripts.
    pub fn legacy() -> Self {
        Self {
            meetings: "meets.csv".into(),
            venues: "locations.csv".into(),
            availability: "availability.csv".into(),
            location_options: "locationOptions.csv".into(),
            availability_locations: "isAvailableAt.csv".into(),
        }
    }
}

/// Settings for one resolution run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Directory holding the input tables.
    pub dataset_dir: PathBuf,
    /// Where to write final decisions.
    pub output: PathBuf,
    /// Decisions from an earlier run to honor as fixed commitments.
    pub prior: Option<PathBuf>,
    /// Fraction of meetings to leave undecided on purpose (0.0..=1.0).
    pub skip_ratio: f64,
    /// Seed for the sampling RNG.
    pub seed: u64,
    /// Input table file names.
    pub tables: TableFiles,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            dataset_dir: PathBuf::from("."),
            output: PathBuf::from("final_decision.csv"),
            prior: None,
            skip_ratio: 0.0,
            seed: 0,
            tables: TableFiles::default(),
        }
    }
}

impl RunConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_toml_str(&text)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.skip_ratio) {
            return Err(Error::InvalidConfig(format!(
                "skip_ratio must be within 0.0..=1.0, got {}",
                self.skip_ratio
            )));
        }
        Ok(())
    }

    /// Full path of an input table.
    pub fn table_path(&self, file_name: &str) -> PathBuf {
        self.dataset_dir.join(file_name)
    }
}
