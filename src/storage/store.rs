//! Whole-document JSON record store.
//!
//! Every persisted record (stats, progress, analytics, saved questions) is a
//! small JSON document under the data directory, written with a full
//! read-modify-write cycle. A missing or corrupt file loads as the record's
//! default — first runs and damaged files behave identically.

use anyhow::{Context, Result};
use serde::{Serialize, de::DeserializeOwned};
use std::path::{Path, PathBuf};

use crate::config::Config;

pub fn record_path(filename: &str) -> Result<PathBuf> {
    Ok(Config::data_dir()?.join(filename))
}

/// Load a record from the data directory, defaulting when absent or corrupt.
pub fn load_or_default<T>(filename: &str) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    Ok(load_from_path(&record_path(filename)?))
}

pub fn load_from_path<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
        Err(_) => T::default(),
    }
}

/// Overwrite a record in the data directory.
pub fn save<T: Serialize>(filename: &str, record: &T) -> Result<()> {
    save_to_path(&record_path(filename)?, record)
}

pub fn save_to_path<T: Serialize>(path: &Path, record: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create data directory {:?}", parent))?;
    }

    let content = serde_json::to_string_pretty(record).context("Failed to serialize record")?;

    std::fs::write(path, content).with_context(|| format!("Failed to write record {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::path::PathBuf;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Sample {
        count: u32,
        name: String,
    }

    fn tmp(name: &str) -> PathBuf {
        PathBuf::from(format!("/tmp/leetdojo_store_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn missing_file_loads_default() {
        let loaded: Sample = load_from_path(&tmp("missing"));
        assert_eq!(loaded, Sample::default());
    }

    #[test]
    fn corrupt_file_loads_default() {
        let path = tmp("corrupt");
        std::fs::write(&path, "{not json").unwrap();
        let loaded: Sample = load_from_path(&path);
        assert_eq!(loaded, Sample::default());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn save_then_load_round_trips() {
        let path = tmp("roundtrip");
        let record = Sample {
            count: 7,
            name: "dojo".to_string(),
        };
        save_to_path(&path, &record).unwrap();
        let loaded: Sample = load_from_path(&path);
        assert_eq!(loaded, record);
        let _ = std::fs::remove_file(&path);
    }
}
