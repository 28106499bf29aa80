use crate::detector_trait::WatermarkDetector;
use sealtrace_core::{AudioBuffer, Detection, DetectorError};

/// Detector that reports a fixed, configured result without running a model.
///
/// Config keys: `score` (float, default `0.0`) and `bits` (string of `0`/`1`,
/// default empty).
pub struct NullDetector {
    score: f32,
    bits: Vec<u8>,
    detect_count: usize,
}

impl NullDetector {
    pub fn new() -> Self {
        Self {
            score: 0.0,
            bits: Vec::new(),
            detect_count: 0,
        }
    }

    pub fn detect_count(&self) -> usize {
        self.detect_count
    }
}

impl Default for NullDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl WatermarkDetector for NullDetector {
    fn name(&self) -> &str {
        "null"
    }

    fn initialize(&mut self, config: toml::Value) -> Result<(), DetectorError> {
        if let Some(score) = config.get("score") {
            let score = score
                .as_float()
                .or_else(|| score.as_integer().map(|i| i as f64))
                .ok_or_else(|| {
                    DetectorError::InitializationFailed("'score' must be a number".to_string())
                })?;
            self.score = score as f32;
        }

        if let Some(bits) = config.get("bits") {
            let bits = bits.as_str().ok_or_else(|| {
                DetectorError::InitializationFailed("'bits' must be a string".to_string())
            })?;
            self.bits = bits
                .chars()
                .map(|c| match c {
                    '0' => Ok(0),
                    '1' => Ok(1),
                    other => Err(DetectorError::InitializationFailed(format!(
                        "invalid character {other:?} in 'bits'"
                    ))),
                })
                .collect::<Result<_, _>>()?;
        }

        tracing::debug!(score = self.score, nbits = self.bits.len(), "NullDetector initialized");
        Ok(())
    }

    fn detect(&mut self, audio: &AudioBuffer) -> Result<Detection, DetectorError> {
        self.detect_count += 1;
        tracing::trace!(
            call = self.detect_count,
            samples = audio.samples.len(),
            "NullDetector returning fixed result"
        );
        Ok(Detection {
            score: self.score,
            bits: self.bits.clone(),
        })
    }
}
