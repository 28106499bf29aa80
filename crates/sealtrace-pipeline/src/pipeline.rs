use crate::report::Report;
use sealtrace_core::{AppConfig, AudioBuffer, Detection, MessageId, PipelineError};
use sealtrace_detector::{DetectorRegistry, WatermarkDetector};
use sealtrace_metadata::MetadataLog;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub model_sample_rate: u32,
    pub detection_threshold: f32,
    pub metadata_log: PathBuf,
}

impl PipelineSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            model_sample_rate: config.detector.model_sample_rate,
            detection_threshold: config.detector.detection_threshold,
            metadata_log: config.metadata.log_path.clone(),
        }
    }
}

/// Load → normalize → detect → decode → look up, run once per input file.
pub struct Pipeline {
    detector: Box<dyn WatermarkDetector>,
    settings: PipelineSettings,
    metadata: MetadataLog,
}

impl Pipeline {
    pub fn new(detector: Box<dyn WatermarkDetector>, settings: PipelineSettings) -> Self {
        let metadata = MetadataLog::new(settings.metadata_log.clone());
        Self {
            detector,
            settings,
            metadata,
        }
    }

    /// Create and initialize the configured detector. This is where the model loads.
    pub fn from_config(
        config: &AppConfig,
        registry: &DetectorRegistry,
    ) -> Result<Self, PipelineError> {
        let engine_config = config.detector.engine_config()?;
        tracing::info!("loading '{}' watermark detector", config.detector.engine);
        let detector = registry.load(&config.detector.engine, engine_config)?;
        Ok(Self::new(detector, PipelineSettings::from_config(config)))
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    pub fn detector_name(&self) -> &str {
        self.detector.name()
    }

    pub fn load_audio(&self, path: &Path) -> Result<AudioBuffer, PipelineError> {
        let audio = sealtrace_audio::load_wav(path)?;
        tracing::info!(
            "loaded '{}', sample rate: {}",
            path.display(),
            audio.sample_rate
        );
        Ok(audio)
    }

    /// Mono at the detector's sample rate.
    pub fn prepare(&self, audio: &AudioBuffer) -> Result<AudioBuffer, PipelineError> {
        Ok(sealtrace_audio::prepare_for_model(
            audio,
            self.settings.model_sample_rate,
        )?)
    }

    pub fn detect(&mut self, audio: &AudioBuffer) -> Result<Detection, PipelineError> {
        tracing::info!("detecting watermark");
        let detection = self.detector.detect(audio)?;
        tracing::debug!(score = detection.score, bits = %detection.bit_string(), "detection");
        Ok(detection)
    }

    /// Apply the threshold and, for a watermarked result, resolve the message ID.
    pub fn interpret(&self, detection: Detection) -> Result<Report, PipelineError> {
        if !detection.is_watermarked(self.settings.detection_threshold) {
            return Ok(Report::NotDetected {
                score: detection.score,
            });
        }

        let message_id = MessageId::from_bits(&detection.bits)?;
        let lookup = self.metadata.lookup(&message_id.to_string())?;
        tracing::debug!(%message_id, ?lookup, "metadata lookup");

        Ok(Report::Detected {
            score: detection.score,
            bits: detection.bit_string(),
            message_id,
            log_path: self.settings.metadata_log.clone(),
            lookup,
        })
    }

    pub fn run(&mut self, input: &Path) -> Result<Report, PipelineError> {
        let audio = self.load_audio(input)?;
        let prepared = self.prepare(&audio)?;
        let detection = self.detect(&prepared)?;
        self.interpret(detection)
    }
}
