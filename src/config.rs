//! Configuration
//!
//! Plain structs with `Default` values and `with_*` setters, loadable from
//! TOML files.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::kinematics::RotationEncoding;

pub trait Config: Serialize + DeserializeOwned + Default {
    fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        if path.ends_with(".toml") {
            Self::from_toml_str(&contents)
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Pairs whose summed face weights have a dot product above this are
    /// dropped.
    pub correlation_threshold: f32,
    /// Vertices with a signed distance above this are classified as surface.
    pub distance_threshold: f32,
    /// Case-sensitive substrings marking extremity joints.
    pub extremity_patterns: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            correlation_threshold: 0.25,
            distance_threshold: -0.1,
            extremity_patterns: ["Arm", "Leg", "Hand", "Foot"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl FilterConfig {
    pub fn new(correlation_threshold: f32) -> Self {
        Self {
            correlation_threshold,
            ..Default::default()
        }
    }

    pub fn with_distance_threshold(mut self, threshold: f32) -> Self {
        self.distance_threshold = threshold;
        self
    }

    pub fn with_extremity_patterns<S: Into<String>>(mut self, patterns: Vec<S>) -> Self {
        self.extremity_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }
}

impl Config for FilterConfig {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub encoding: RotationEncoding,
    pub filter: FilterConfig,
}

impl PipelineConfig {
    pub fn with_encoding(mut self, encoding: RotationEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_filter(mut self, filter: FilterConfig) -> Self {
        self.filter = filter;
        self
    }
}

impl Config for PipelineConfig {}
