//! Pipeline configuration loaded from TOML.
//!
//! Closed option values, ARNs and schedule expressions are checked while
//! parsing, so a bad value fails at load time with the offending key.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::domain::{Arn, S3StorageClass, ScheduleExpression, Tag, TaskOptions};

/// The bundled example: the source/destination buckets, role, agent and
/// options of the reference pipeline.
pub const EXAMPLE_TOML: &str = include_str!("../config/pipeline.example.toml");

pub const DEFAULT_STACK_NAME: &str = "DataSyncStack";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid pipeline config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    #[serde(default)]
    pub stack: StackSettings,
    pub source: LocationConfig,
    pub destination: LocationConfig,
    pub task: TaskConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StackSettings {
    #[serde(default = "default_stack_name")]
    pub name: String,
    pub description: Option<String>,
    /// Attach `Export.Name` to outputs.
    #[serde(default = "default_true")]
    pub export_outputs: bool,
}

impl Default for StackSettings {
    fn default() -> Self {
        Self {
            name: default_stack_name(),
            description: None,
            export_outputs: true,
        }
    }
}

fn default_stack_name() -> String {
    DEFAULT_STACK_NAME.to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocationConfig {
    pub bucket_arn: Arn,
    pub subdirectory: String,
    pub bucket_access_role_arn: Arn,
    /// Required for the source, forbidden for the destination.
    #[serde(default)]
    pub agent_arns: Option<Vec<Arn>>,
    #[serde(default)]
    pub storage_class: Option<S3StorageClass>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskConfig {
    #[serde(default)]
    pub name: Option<String>,
    pub options: TaskOptions,
    pub schedule_expression: ScheduleExpression,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl PipelineConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading pipeline config");
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn example() -> Result<Self, ConfigError> {
        Self::from_toml_str(EXAMPLE_TOML)
    }
}
