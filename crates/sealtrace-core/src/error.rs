use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("environment variable not found: {0}")]
    EnvVarNotFound(String),
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("failed to open audio file: {0}")]
    FileOpen(String),

    #[error("failed to decode audio: {0}")]
    Decode(String),

    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(String),

    #[error("resampling failed: {0}")]
    Resample(String),
}

#[derive(Debug, Error)]
pub enum DetectorError {
    #[error("detector initialization failed: {0}")]
    InitializationFailed(String),

    #[error("watermark detection failed: {0}")]
    DetectionFailed(String),

    #[error("detector engine not found: {0}")]
    EngineNotFound(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MessageError {
    #[error("decoded message has no bits")]
    Empty,

    #[error("decoded message has {0} bits, at most 64 are supported")]
    TooLong(usize),

    #[error("invalid bit value {value} at position {position}")]
    InvalidBit { position: usize, value: u8 },
}

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("failed to read metadata log: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse metadata log: {0}")]
    Parse(String),
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Audio(#[from] AudioError),

    #[error(transparent)]
    Detector(#[from] DetectorError),

    #[error(transparent)]
    Message(#[from] MessageError),

    #[error(transparent)]
    Metadata(#[from] MetadataError),
}
