//! Reduction of raw detector outputs to a [`Detection`](sealtrace_core::Detection).

use sealtrace_core::DetectorError;

/// Fraction of frames whose watermark probability is above `threshold`.
///
/// `frame_probs` is a `(2, T)` row-major block: row 0 holds the
/// "no watermark" class, row 1 the "watermark" class.
pub fn frame_detection_score(frame_probs: &[f32], threshold: f32) -> Result<f32, DetectorError> {
    if frame_probs.is_empty() || frame_probs.len() % 2 != 0 {
        return Err(DetectorError::DetectionFailed(format!(
            "expected (2, T) frame probabilities, got {} values",
            frame_probs.len()
        )));
    }
    let frames = frame_probs.len() / 2;
    let watermarked = &frame_probs[frames..];
    let hits = watermarked.iter().filter(|&&p| p > threshold).count();
    Ok(hits as f32 / frames as f32)
}

/// Hard-decide each message probability into a `0`/`1` bit.
pub fn threshold_bits(message_probs: &[f32], threshold: f32) -> Vec<u8> {
    message_probs
        .iter()
        .map(|&p| u8::from(p > threshold))
        .collect()
}
