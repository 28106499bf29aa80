pub mod config;
pub mod error;
pub mod message;
pub mod types;

pub use config::{AppConfig, DetectorConfig, OnnxConfig};
pub use error::{
    AudioError, ConfigError, DetectorError, MessageError, MetadataError, PipelineError,
};
pub use message::MessageId;
pub use types::{AudioBuffer, Detection, LookupOutcome};
