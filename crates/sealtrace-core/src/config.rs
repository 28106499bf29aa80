use crate::error::ConfigError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub audio: AudioConfig,

    #[serde(default)]
    pub detector: DetectorConfig,

    #[serde(default)]
    pub metadata: MetadataConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeneralConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AudioConfig {
    #[serde(default = "default_input_path")]
    pub input_path: PathBuf,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            input_path: default_input_path(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DetectorConfig {
    #[serde(default = "default_engine")]
    pub engine: String,

    /// Rate the detector model was trained at; input is resampled to it.
    #[serde(default = "default_model_sample_rate")]
    pub model_sample_rate: u32,

    #[serde(default = "default_threshold")]
    pub detection_threshold: f32,

    #[serde(default)]
    pub onnx: OnnxConfig,

    /// Fixed result reported by the `null` engine.
    #[serde(default)]
    pub null: Option<toml::Value>,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            engine: default_engine(),
            model_sample_rate: default_model_sample_rate(),
            detection_threshold: default_threshold(),
            onnx: OnnxConfig::default(),
            null: None,
        }
    }
}

impl DetectorConfig {
    /// The TOML table handed to the selected engine's `initialize`.
    pub fn engine_config(&self) -> Result<toml::Value, ConfigError> {
        match self.engine.as_str() {
            "onnx" => Ok(toml::Value::try_from(&self.onnx)?),
            "null" => Ok(self
                .null
                .clone()
                .unwrap_or_else(|| toml::Value::Table(Default::default()))),
            _ => Ok(toml::Value::Table(Default::default())),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct OnnxConfig {
    #[serde(default = "default_model_path")]
    pub model_path: String,

    #[serde(default = "default_input_name")]
    pub input_name: String,

    #[serde(default = "default_nbits")]
    pub nbits: usize,

    #[serde(default = "default_threshold")]
    pub frame_threshold: f32,

    #[serde(default = "default_threshold")]
    pub message_threshold: f32,
}

impl Default for OnnxConfig {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            input_name: default_input_name(),
            nbits: default_nbits(),
            frame_threshold: default_threshold(),
            message_threshold: default_threshold(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct MetadataConfig {
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            log_path: default_log_path(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_input_path() -> PathBuf {
    PathBuf::from("watermarked_song.wav")
}

fn default_engine() -> String {
    "onnx".to_string()
}

fn default_model_sample_rate() -> u32 {
    16000
}

fn default_threshold() -> f32 {
    0.5
}

fn default_model_path() -> String {
    "models/audioseal_detector_16bits.onnx".to_string()
}

fn default_input_name() -> String {
    "audio".to_string()
}

fn default_nbits() -> usize {
    16
}

fn default_log_path() -> PathBuf {
    PathBuf::from("metadata_log.csv")
}

/// Interpolate `${VAR}` patterns with environment variable values.
fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let re = Regex::new(r"\$\{([^}]+)\}").expect("static regex is valid");
    let mut result = input.to_string();

    for cap in re.captures_iter(input) {
        let var_name = &cap[1];
        match std::env::var(var_name) {
            Ok(val) => {
                result = result.replace(&cap[0], &val);
            }
            Err(_) => return Err(ConfigError::EnvVarNotFound(var_name.to_string())),
        }
    }

    Ok(result)
}

impl AppConfig {
    /// Load configuration from a TOML file, with environment variable interpolation.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let interpolated = interpolate_env_vars(s)?;
        let config: AppConfig = toml::from_str(&interpolated)?;
        tracing::debug!(engine = %config.detector.engine, "configuration parsed");
        Ok(config)
    }
}
