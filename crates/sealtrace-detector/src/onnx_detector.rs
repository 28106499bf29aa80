//! ONNX Runtime backed watermark detector.
//!
//! Expects an AudioSeal-style detector export with one input of shape
//! `[1, 1, samples]` and two outputs:
//!
//! * `[0]` per-frame class probabilities `[1, 2, frames]`
//! * `[1]` per-bit message probabilities `[1, nbits]`

use crate::detector_trait::WatermarkDetector;
use crate::postprocess::{frame_detection_score, threshold_bits};
use ndarray::Array3;
use ort::session::Session;
use ort::value::Tensor;
use sealtrace_core::{AudioBuffer, Detection, DetectorError};
use std::path::PathBuf;

pub struct OnnxDetector {
    session: Option<Session>,
    model_path: Option<PathBuf>,
    input_name: String,
    nbits: usize,
    frame_threshold: f32,
    message_threshold: f32,
}

impl OnnxDetector {
    pub fn new() -> Self {
        Self {
            session: None,
            model_path: None,
            input_name: "audio".to_string(),
            nbits: 16,
            frame_threshold: 0.5,
            message_threshold: 0.5,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.session.is_some()
    }
}

impl Default for OnnxDetector {
    fn default() -> Self {
        Self::new()
    }
}

fn float_field(config: &toml::Value, key: &str) -> Result<Option<f32>, DetectorError> {
    match config.get(key) {
        None => Ok(None),
        Some(v) => v
            .as_float()
            .or_else(|| v.as_integer().map(|i| i as f64))
            .map(|f| Some(f as f32))
            .ok_or_else(|| {
                DetectorError::InitializationFailed(format!("'{key}' must be a number"))
            }),
    }
}

impl WatermarkDetector for OnnxDetector {
    fn name(&self) -> &str {
        "onnx"
    }

    fn initialize(&mut self, config: toml::Value) -> Result<(), DetectorError> {
        let model_path = config
            .get("model_path")
            .and_then(|v| v.as_str())
            .map(PathBuf::from)
            .ok_or_else(|| {
                DetectorError::InitializationFailed("missing 'model_path' in onnx config".to_string())
            })?;

        if let Some(name) = config.get("input_name").and_then(|v| v.as_str()) {
            self.input_name = name.to_string();
        }
        if let Some(nbits) = config.get("nbits").and_then(|v| v.as_integer()) {
            if nbits <= 0 || nbits > 64 {
                return Err(DetectorError::InitializationFailed(format!(
                    "'nbits' must be between 1 and 64, got {nbits}"
                )));
            }
            self.nbits = nbits as usize;
        }
        if let Some(t) = float_field(&config, "frame_threshold")? {
            self.frame_threshold = t;
        }
        if let Some(t) = float_field(&config, "message_threshold")? {
            self.message_threshold = t;
        }

        if !model_path.exists() {
            return Err(DetectorError::InitializationFailed(format!(
                "model not found: {}",
                model_path.display()
            )));
        }

        let session = Session::builder()
            .and_then(|b| b.with_intra_threads(1))
            .and_then(|b| b.commit_from_file(&model_path))
            .map_err(|e| {
                DetectorError::InitializationFailed(format!(
                    "failed to load {}: {e}",
                    model_path.display()
                ))
            })?;

        tracing::info!(
            model_path = %model_path.display(),
            input_name = %self.input_name,
            nbits = self.nbits,
            "OnnxDetector initialized"
        );
        self.session = Some(session);
        self.model_path = Some(model_path);
        Ok(())
    }

    fn detect(&mut self, audio: &AudioBuffer) -> Result<Detection, DetectorError> {
        if !audio.is_mono() {
            return Err(DetectorError::DetectionFailed(format!(
                "expected mono audio, got {} channels",
                audio.channels
            )));
        }
        if audio.samples.is_empty() {
            return Err(DetectorError::DetectionFailed("audio is empty".to_string()));
        }

        let session = self
            .session
            .as_mut()
            .ok_or_else(|| DetectorError::DetectionFailed("model not loaded".to_string()))?;

        let input = Array3::from_shape_vec((1, 1, audio.samples.len()), audio.samples.clone())
            .map_err(|e| DetectorError::DetectionFailed(format!("input shape error: {e}")))?;
        let input_tensor = Tensor::from_array(input)
            .map_err(|e| DetectorError::DetectionFailed(format!("tensor creation error: {e}")))?;

        let outputs = session
            .run(ort::inputs![self.input_name.as_str() => input_tensor])
            .map_err(|e| DetectorError::DetectionFailed(format!("inference error: {e}")))?;

        let mut output_iter = outputs.iter();
        let (_, frame_value) = output_iter
            .next()
            .ok_or_else(|| DetectorError::DetectionFailed("model produced no output".to_string()))?;
        let (_shape, frame_data) = frame_value
            .try_extract_tensor::<f32>()
            .map_err(|e| DetectorError::DetectionFailed(format!("frame output error: {e}")))?;
        let score = frame_detection_score(frame_data, self.frame_threshold)?;

        let (_, message_value) = output_iter.next().ok_or_else(|| {
            DetectorError::DetectionFailed("model produced no message output".to_string())
        })?;
        let (_shape, message_data) = message_value
            .try_extract_tensor::<f32>()
            .map_err(|e| DetectorError::DetectionFailed(format!("message output error: {e}")))?;
        if message_data.len() != self.nbits {
            return Err(DetectorError::DetectionFailed(format!(
                "expected {} message bits, model produced {}",
                self.nbits,
                message_data.len()
            )));
        }
        let bits = threshold_bits(message_data, self.message_threshold);

        tracing::debug!(score, frames = frame_data.len() / 2, "detector inference complete");
        Ok(Detection { score, bits })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_onnx_detector_name() {
        let detector = OnnxDetector::new();
        assert_eq!(detector.name(), "onnx");
        assert!(!detector.is_loaded());
    }

    #[test]
    fn test_onnx_detector_initialize_missing_model_path_fails() {
        let mut detector = OnnxDetector::new();
        match detector.initialize(toml::Value::Table(Default::default())) {
            Err(DetectorError::InitializationFailed(msg)) => assert!(msg.contains("model_path")),
            _ => panic!("expected InitializationFailed"),
        }
    }

    #[test]
    fn test_onnx_detector_initialize_nonexistent_model_fails() {
        let mut detector = OnnxDetector::new();
        let mut table = toml::map::Map::new();
        table.insert(
            "model_path".to_string(),
            toml::Value::String("/nonexistent/detector.onnx".to_string()),
        );
        match detector.initialize(toml::Value::Table(table)) {
            Err(DetectorError::InitializationFailed(msg)) => {
                assert!(msg.contains("model not found"))
            }
            _ => panic!("expected InitializationFailed"),
        }
        assert!(!detector.is_loaded());
    }

    #[test]
    fn test_onnx_detector_rejects_out_of_range_nbits() {
        let mut detector = OnnxDetector::new();
        let mut table = toml::map::Map::new();
        table.insert(
            "model_path".to_string(),
            toml::Value::String("/nonexistent/detector.onnx".to_string()),
        );
        table.insert("nbits".to_string(), toml::Value::Integer(65));
        match detector.initialize(toml::Value::Table(table)) {
            Err(DetectorError::InitializationFailed(msg)) => assert!(msg.contains("nbits")),
            _ => panic!("expected InitializationFailed"),
        }
    }

    #[test]
    fn test_onnx_detector_detect_before_initialize_fails() {
        let mut detector = OnnxDetector::new();
        let result = detector.detect(&AudioBuffer::mono(vec![0.0; 16000], 16000));
        match result {
            Err(DetectorError::DetectionFailed(msg)) => assert!(msg.contains("not loaded")),
            _ => panic!("expected DetectionFailed"),
        }
    }

    #[test]
    fn test_onnx_detector_rejects_stereo() {
        let mut detector = OnnxDetector::new();
        let stereo = AudioBuffer {
            samples: vec![0.0; 32],
            sample_rate: 16000,
            channels: 2,
        };
        assert!(matches!(
            detector.detect(&stereo),
            Err(DetectorError::DetectionFailed(_))
        ));
    }

    #[test]
    #[ignore] // Requires an exported detector model in SEALTRACE_TEST_MODEL
    fn test_onnx_detector_silence_is_not_watermarked() {
        let model_path = std::env::var("SEALTRACE_TEST_MODEL").unwrap();
        let mut detector = OnnxDetector::new();
        let mut table = toml::map::Map::new();
        table.insert("model_path".to_string(), toml::Value::String(model_path));
        detector.initialize(toml::Value::Table(table)).unwrap();

        let detection = detector
            .detect(&AudioBuffer::mono(vec![0.0; 16000], 16000))
            .unwrap();
        assert!(detection.score <= 0.5);
        assert_eq!(detection.bits.len(), 16);
    }
}
