//! Channel reduction.

use sealtrace_core::AudioBuffer;

/// Average all channels of each frame into a single mono sample.
///
/// Mono input is returned as is. A trailing partial frame is dropped.
pub fn downmix_to_mono(buffer: &AudioBuffer) -> AudioBuffer {
    if buffer.channels <= 1 {
        return buffer.clone();
    }

    let channels = buffer.channels as usize;
    tracing::debug!(channels, "averaging channels to mono");
    let samples = buffer
        .samples
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect();

    AudioBuffer::mono(samples, buffer.sample_rate)
}
