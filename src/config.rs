//! Run configuration
//!
//! Every path and identifier the pipeline needs lives in one explicit
//! [`Config`] passed into the commands; there is no process-wide state.
//! Values come from defaults, an optional JSON config file, then CLI flags,
//! in that order.

use crate::error::{BidError, BidResult};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// File extension of the bid-result source sheets
pub const SOURCE_EXTENSION: &str = "xlsb";

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Folder scanned for .xlsb bid-result files
    pub folder: PathBuf,
    /// Service-account credential file (absence is fatal at publish time)
    pub credentials: PathBuf,
    /// Target spreadsheet document id
    pub sheet_id: String,
    /// Target worksheet name, cleared and rewritten each run
    pub worksheet: String,
    /// Auxiliary .xlsx workbook with company fills (absence degrades to no colors)
    pub color_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            folder: PathBuf::from("."),
            credentials: PathBuf::from("credentials.json"),
            sheet_id: String::new(),
            worksheet: "입찰결과정리".to_string(),
            color_file: PathBuf::from("업체분류.xlsx"),
        }
    }
}

impl Config {
    /// Load from a JSON file, or defaults when no file is given
    pub fn load(path: Option<&Path>) -> BidResult<Config> {
        match path {
            Some(p) => {
                let content = std::fs::read_to_string(p).map_err(|e| {
                    BidError::Config(format!("Failed to read config '{}': {}", p.display(), e))
                })?;
                serde_json::from_str(&content).map_err(|e| {
                    BidError::Config(format!("Failed to parse config '{}': {}", p.display(), e))
                })
            }
            None => Ok(Config::default()),
        }
    }
}
