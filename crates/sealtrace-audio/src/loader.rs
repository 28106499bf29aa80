use hound::{SampleFormat, WavReader};
use sealtrace_core::{AudioBuffer, AudioError};
use std::io::Read;
use std::path::Path;

/// Read a WAV file into interleaved `f32` samples.
///
/// Integer PCM is scaled by `1 / 2^(bits - 1)` so that full scale maps to
/// `[-1.0, 1.0)`. Float data is passed through untouched.
pub fn load_wav(path: &Path) -> Result<AudioBuffer, AudioError> {
    let reader = WavReader::open(path)
        .map_err(|e| AudioError::FileOpen(format!("{}: {e}", path.display())))?;
    let buffer = read_wav(reader)?;
    tracing::debug!(
        path = %path.display(),
        sample_rate = buffer.sample_rate,
        channels = buffer.channels,
        frames = buffer.frames(),
        "decoded WAV file"
    );
    Ok(buffer)
}

/// Decode WAV data from an arbitrary reader.
pub fn read_wav<R: Read>(mut reader: WavReader<R>) -> Result<AudioBuffer, AudioError> {
    let spec = reader.spec();
    if spec.channels == 0 {
        return Err(AudioError::UnsupportedFormat("zero channels".to_string()));
    }

    let samples: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => {
            if spec.bits_per_sample != 32 {
                return Err(AudioError::UnsupportedFormat(format!(
                    "{}-bit float",
                    spec.bits_per_sample
                )));
            }
            reader
                .samples::<f32>()
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| AudioError::Decode(e.to_string()))?
        }
        SampleFormat::Int => {
            if spec.bits_per_sample == 0 || spec.bits_per_sample > 32 {
                return Err(AudioError::UnsupportedFormat(format!(
                    "{}-bit integer",
                    spec.bits_per_sample
                )));
            }
            let scale = (1u64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|s| s as f32 / scale))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| AudioError::Decode(e.to_string()))?
        }
    };

    Ok(AudioBuffer {
        samples,
        sample_rate: spec.sample_rate,
        channels: spec.channels,
    })
}
