// std
use std::path::Path;
use std::time::Duration;
// crates
use nomos_log::LoggerSettings;
use serde::{Deserialize, Serialize};
use thiserror::Error;
// internal
use crate::availability::sampler::SamplingSettings;
use crate::getter::store::CacheSettings;
use crate::storage::adapters::fs::FsStoreSettings;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ShareServiceSettings {
    #[serde(default)]
    pub logger: LoggerSettings,
    pub store: FsStoreSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub sampling: SamplingSettings,
    /// Upper bound applied to every request on top of the caller's deadline.
    #[serde(default, with = "humantime_serde")]
    pub request_timeout: Option<Duration>,
}

impl ShareServiceSettings {
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let file = std::fs::File::open(path)?;
        Ok(serde_yaml::from_reader(file)?)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, SettingsError> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}
