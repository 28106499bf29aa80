use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};
use sealtrace_core::{AudioBuffer, AudioError};

/// Frames fed to the resampler per call.
const CHUNK_SIZE: usize = 1024;

/// Convert a mono buffer to `target_rate` with band-limited sinc interpolation.
///
/// The buffer is fed in fixed-size chunks and the resampler is flushed, so
/// the output holds `ceil(len * target / source)` samples aligned with the
/// input (the filter delay is trimmed).
pub fn resample(buffer: &AudioBuffer, target_rate: u32) -> Result<AudioBuffer, AudioError> {
    if !buffer.is_mono() {
        return Err(AudioError::Resample(format!(
            "expected mono input, got {} channels",
            buffer.channels
        )));
    }
    if buffer.sample_rate == 0 || target_rate == 0 {
        return Err(AudioError::Resample(format!(
            "invalid rate conversion {} Hz -> {} Hz",
            buffer.sample_rate, target_rate
        )));
    }
    if buffer.sample_rate == target_rate {
        return Ok(buffer.clone());
    }
    if buffer.samples.is_empty() {
        return Ok(AudioBuffer::mono(Vec::new(), target_rate));
    }

    let ratio = target_rate as f64 / buffer.sample_rate as f64;
    let expected_len = (buffer.samples.len() as u64 * target_rate as u64)
        .div_ceil(buffer.sample_rate as u64) as usize;

    let params = SincInterpolationParameters {
        sinc_len: 256,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Linear,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    };

    let mut resampler = SincFixedIn::<f32>::new(ratio, 1.0, params, CHUNK_SIZE, 1)
        .map_err(|e| AudioError::Resample(e.to_string()))?;
    let delay = resampler.output_delay();
    let needed = expected_len + delay;

    let mut output = Vec::with_capacity(needed + CHUNK_SIZE);
    for chunk in buffer.samples.chunks(CHUNK_SIZE) {
        let wave = [chunk];
        let mut out = if chunk.len() == CHUNK_SIZE {
            resampler.process(&wave[..], None)
        } else {
            resampler.process_partial(Some(&wave[..]), None)
        }
        .map_err(|e| AudioError::Resample(e.to_string()))?;
        output.append(&mut out[0]);
    }

    // Push zeros through until the delayed tail has been emitted. A single
    // flush may yield no frames, so the loop is bounded by count, not by output.
    let per_flush = resampler.output_frames_next().max(1);
    let max_flushes = needed.saturating_sub(output.len()).div_ceil(per_flush) + 2;
    for _ in 0..max_flushes {
        if output.len() >= needed {
            break;
        }
        let mut tail = resampler
            .process_partial::<&[f32]>(None, None)
            .map_err(|e| AudioError::Resample(e.to_string()))?;
        output.append(&mut tail[0]);
    }

    let start = delay.min(output.len());
    let end = (start + expected_len).min(output.len());
    let mut samples = output[start..end].to_vec();
    // Anything past the flushed tail is silence.
    samples.resize(expected_len, 0.0);

    tracing::debug!(
        from = buffer.sample_rate,
        to = target_rate,
        input_len = buffer.samples.len(),
        output_len = samples.len(),
        "resampled"
    );

    Ok(AudioBuffer::mono(samples, target_rate))
}
