pub mod downmix;
pub mod loader;
pub mod resample;

pub use downmix::downmix_to_mono;
pub use loader::{load_wav, read_wav};
pub use resample::resample;

use sealtrace_core::{AudioBuffer, AudioError};

/// Reduce to mono, then bring the buffer to the detector's sample rate.
pub fn prepare_for_model(buffer: &AudioBuffer, model_rate: u32) -> Result<AudioBuffer, AudioError> {
    let mono = if buffer.is_mono() {
        buffer.clone()
    } else {
        tracing::info!(
            "audio has {} channels, converting to mono by averaging channels",
            buffer.channels
        );
        downmix_to_mono(buffer)
    };

    if mono.sample_rate == model_rate {
        return Ok(mono);
    }
    tracing::info!(
        "resampling audio from {} Hz to {} Hz",
        mono.sample_rate,
        model_rate
    );
    resample(&mono, model_rate)
}
