use sealtrace_core::{AudioBuffer, Detection, DetectorError};

/// A pretrained watermark detector.
///
/// Implementations are created through [`DetectorRegistry`](crate::DetectorRegistry)
/// and configured once with their engine-specific TOML table.
pub trait WatermarkDetector {
    /// Returns the engine name (e.g. `"onnx"`, `"null"`).
    fn name(&self) -> &str;
    /// One-time initialisation; loads the model where there is one.
    fn initialize(&mut self, config: toml::Value) -> Result<(), DetectorError>;
    /// Score a mono buffer already at the model's sample rate and decode its message.
    fn detect(&mut self, audio: &AudioBuffer) -> Result<Detection, DetectorError>;
}
