/// Interleaved PCM samples normalized to `[-1.0, 1.0]`.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    pub channels: u16,
}

impl AudioBuffer {
    pub fn mono(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
            channels: 1,
        }
    }

    /// Number of frames (samples per channel).
    pub fn frames(&self) -> usize {
        if self.channels == 0 {
            return 0;
        }
        self.samples.len() / self.channels as usize
    }

    pub fn is_mono(&self) -> bool {
        self.channels == 1
    }

    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames() as f64 / self.sample_rate as f64
    }
}

/// Output of a watermark detector for one buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Confidence in `[0.0, 1.0]` that the buffer carries a watermark.
    pub score: f32,
    /// Decoded message, one `0`/`1` value per bit, most significant first.
    pub bits: Vec<u8>,
}

impl Detection {
    /// A watermark counts as present only when the score is strictly above `threshold`.
    pub fn is_watermarked(&self, threshold: f32) -> bool {
        self.score > threshold
    }

    pub fn bit_string(&self) -> String {
        self.bits.iter().map(|b| b.to_string()).collect()
    }
}

/// Result of scanning the metadata log for a message ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Found(String),
    NotFound,
    LogMissing,
}
