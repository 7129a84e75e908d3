//! WAV file reading and writing.

use crate::Result;
use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;
use tracing::debug;

/// WAV audio encoding format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    /// Linear PCM (integer samples).
    Pcm,
    /// IEEE 754 floating-point samples.
    IeeeFloat,
}

/// WAV file metadata extracted without loading sample data.
#[derive(Debug, Clone)]
pub struct WavInfo {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
    /// Total number of sample frames (samples per channel).
    pub num_frames: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Audio encoding format.
    pub format: WavFormat,
}

/// Read WAV metadata without loading sample data.
///
/// Much faster than [`read_wav`] when only format details and duration
/// are needed.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let total_samples = u64::from(reader.len()); // total across all channels
    let num_frames = total_samples / u64::from(spec.channels);
    let duration_secs = num_frames as f64 / f64::from(spec.sample_rate);

    let format = match spec.sample_format {
        SampleFormat::Float => WavFormat::IeeeFloat,
        SampleFormat::Int => WavFormat::Pcm,
    };

    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        num_frames,
        duration_secs,
        format,
    })
}

/// WAV file specification.
#[derive(Debug, Clone, Copy)]
pub struct WavSpec {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz (e.g., 44100, 48000).
    pub sample_rate: u32,
    /// Bit depth per sample (e.g., 16, 24, 32).
    pub bits_per_sample: u16,
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            channels: 2,
            sample_rate: 48000,
            bits_per_sample: 32,
        }
    }
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        }
    }
}

impl From<WavSpec> for hound::WavSpec {
    fn from(spec: WavSpec) -> Self {
        hound::WavSpec {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format: if spec.bits_per_sample == 32 {
                SampleFormat::Float
            } else {
                SampleFormat::Int
            },
        }
    }
}

/// Deinterleaved stereo sample buffers.
#[derive(Debug, Clone, Default)]
pub struct StereoSamples {
    /// Left channel samples.
    pub left: Vec<f32>,
    /// Right channel samples.
    pub right: Vec<f32>,
}

impl StereoSamples {
    /// Create from separate channel buffers.
    ///
    /// Both buffers should have the same length; processing stops at the
    /// shorter one.
    pub fn new(left: Vec<f32>, right: Vec<f32>) -> Self {
        Self { left, right }
    }

    /// Duplicate a mono buffer to both channels.
    pub fn from_mono(samples: Vec<f32>) -> Self {
        Self {
            left: samples.clone(),
            right: samples,
        }
    }

    /// Split an interleaved L/R buffer into channel buffers.
    pub fn from_interleaved(samples: &[f32]) -> Self {
        let frames = samples.len() / 2;
        let mut left = Vec::with_capacity(frames);
        let mut right = Vec::with_capacity(frames);
        for pair in samples.chunks_exact(2) {
            left.push(pair[0]);
            right.push(pair[1]);
        }
        Self { left, right }
    }

    /// Number of sample frames.
    pub fn len(&self) -> usize {
        self.left.len().min(self.right.len())
    }

    /// Whether there are no frames.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn read_samples<R: std::io::Read>(reader: WavReader<R>) -> Result<Vec<f32>> {
    let spec = reader.spec();
    let samples = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = (1i32 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };
    Ok(samples)
}

/// Read a WAV file and return samples as f32 along with the spec.
///
/// Multi-channel files are mixed down to mono by averaging channels.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(Vec<f32>, WavSpec)> {
    let reader = WavReader::open(path)?;
    let spec = WavSpec::from(reader.spec());
    let channels = spec.channels as usize;

    let samples = read_samples(reader)?;

    // Mix down to mono if multi-channel
    let mono_samples = if channels > 1 {
        samples
            .chunks(channels)
            .map(|chunk| chunk.iter().sum::<f32>() / channels as f32)
            .collect()
    } else {
        samples
    };

    debug!(frames = mono_samples.len(), sample_rate = spec.sample_rate, "read mono WAV");
    Ok((mono_samples, spec))
}

/// Write mono samples to a WAV file.
pub fn write_wav<P: AsRef<Path>>(path: P, samples: &[f32], spec: WavSpec) -> Result<()> {
    let mut mono_spec = spec;
    mono_spec.channels = 1;

    let hound_spec = hound::WavSpec::from(mono_spec);
    let mut writer = WavWriter::create(path, hound_spec)?;

    if spec.bits_per_sample == 32 {
        for &sample in samples {
            writer.write_sample(sample)?;
        }
    } else {
        let max_val = (1i32 << (spec.bits_per_sample - 1)) as f32;
        for &sample in samples {
            let int_sample = (sample * max_val).clamp(-max_val, max_val - 1.0) as i32;
            writer.write_sample(int_sample)?;
        }
    }

    writer.finalize()?;
    Ok(())
}

/// Read a WAV file and return stereo samples along with the spec.
///
/// Mono files are expanded to stereo by duplicating to both channels.
/// Files with more than 2 channels are rejected with
/// [`Error::UnsupportedLayout`](crate::Error::UnsupportedLayout).
pub fn read_wav_stereo<P: AsRef<Path>>(path: P) -> Result<(StereoSamples, WavSpec)> {
    let reader = WavReader::open(path)?;
    let spec = WavSpec::from(reader.spec());

    if spec.channels > 2 {
        return Err(crate::Error::UnsupportedLayout(spec.channels));
    }

    let all_samples = read_samples(reader)?;

    let stereo = if spec.channels == 1 {
        StereoSamples::from_mono(all_samples)
    } else {
        StereoSamples::from_interleaved(&all_samples)
    };

    debug!(frames = stereo.len(), sample_rate = spec.sample_rate, "read stereo WAV");
    Ok((stereo, spec))
}

/// Write stereo samples to a WAV file.
pub fn write_wav_stereo<P: AsRef<Path>>(
    path: P,
    samples: &StereoSamples,
    spec: WavSpec,
) -> Result<()> {
    let mut stereo_spec = spec;
    stereo_spec.channels = 2;

    let hound_spec = hound::WavSpec::from(stereo_spec);
    let mut writer = WavWriter::create(path, hound_spec)?;

    if spec.bits_per_sample == 32 {
        for (l, r) in samples.left.iter().zip(samples.right.iter()) {
            writer.write_sample(*l)?;
            writer.write_sample(*r)?;
        }
    } else {
        let max_val = (1i32 << (spec.bits_per_sample - 1)) as f32;
        for (l, r) in samples.left.iter().zip(samples.right.iter()) {
            let int_l = (*l * max_val).clamp(-max_val, max_val - 1.0) as i32;
            let int_r = (*r * max_val).clamp(-max_val, max_val - 1.0) as i32;
            writer.write_sample(int_l)?;
            writer.write_sample(int_r)?;
        }
    }

    writer.finalize()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn roundtrip_f32_mono() {
        let samples: Vec<f32> = (0..1000).map(|i| (i as f32 / 50.0).sin() * 0.5).collect();
        let spec = WavSpec {
            channels: 1,
            sample_rate: 48000,
            bits_per_sample: 32,
        };

        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &samples, spec).unwrap();

        let (loaded, loaded_spec) = read_wav(file.path()).unwrap();
        assert_eq!(loaded_spec.sample_rate, 48000);
        assert_eq!(loaded.len(), samples.len());
        for (a, b) in loaded.iter().zip(samples.iter()) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn roundtrip_stereo_16bit() {
        let left: Vec<f32> = (0..500).map(|i| (i as f32 / 30.0).sin() * 0.8).collect();
        let right: Vec<f32> = (0..500).map(|i| (i as f32 / 40.0).cos() * 0.6).collect();
        let samples = StereoSamples::new(left, right);
        let spec = WavSpec {
            channels: 2,
            sample_rate: 44100,
            bits_per_sample: 16,
        };

        let file = NamedTempFile::new().unwrap();
        write_wav_stereo(file.path(), &samples, spec).unwrap();

        let (loaded, loaded_spec) = read_wav_stereo(file.path()).unwrap();
        assert_eq!(loaded_spec.channels, 2);
        assert_eq!(loaded.len(), samples.len());
        // 16-bit quantization tolerance
        for i in 0..loaded.len() {
            assert!((loaded.left[i] - samples.left[i]).abs() < 1e-3);
            assert!((loaded.right[i] - samples.right[i]).abs() < 1e-3);
        }
    }

    #[test]
    fn mono_file_expands_to_stereo() {
        let samples: Vec<f32> = (0..100).map(|i| i as f32 / 100.0).collect();
        let spec = WavSpec {
            channels: 1,
            sample_rate: 48000,
            bits_per_sample: 32,
        };

        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &samples, spec).unwrap();

        let (stereo, _) = read_wav_stereo(file.path()).unwrap();
        assert_eq!(stereo.left, stereo.right);
        assert_eq!(stereo.len(), samples.len());
    }

    #[test]
    fn multichannel_file_is_rejected() {
        let hound_spec = hound::WavSpec {
            channels: 4,
            sample_rate: 48000,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };

        let file = NamedTempFile::new().unwrap();
        let mut writer = WavWriter::create(file.path(), hound_spec).unwrap();
        for _ in 0..64 {
            for _ in 0..4 {
                writer.write_sample(0.25f32).unwrap();
            }
        }
        writer.finalize().unwrap();

        match read_wav_stereo(file.path()) {
            Err(crate::Error::UnsupportedLayout(channels)) => assert_eq!(channels, 4),
            other => panic!("expected UnsupportedLayout, got {other:?}"),
        }
    }

    #[test]
    fn info_reports_duration() {
        let samples = vec![0.0f32; 48000];
        let spec = WavSpec {
            channels: 1,
            sample_rate: 48000,
            bits_per_sample: 32,
        };

        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &samples, spec).unwrap();

        let info = read_wav_info(file.path()).unwrap();
        assert_eq!(info.channels, 1);
        assert_eq!(info.num_frames, 48000);
        assert!((info.duration_secs - 1.0).abs() < 1e-9);
        assert_eq!(info.format, WavFormat::IeeeFloat);
    }

    #[test]
    fn processed_audio_round_trips() {
        use tinte_core::Effect;
        use tinte_effects::{ChannelPair, Character, Model};

        let mut pair = ChannelPair::new(48000.0);
        pair.set_mode(Character::Opal, Model::Luminescent);
        pair.set_processing(0.6);

        let mut samples = StereoSamples::new(vec![0.0; 256], vec![0.0; 256]);
        for i in 0..256 {
            let x = (i as f32 / 20.0).sin() * 0.5;
            let (l, r) = pair.process_stereo(x, x);
            samples.left[i] = l;
            samples.right[i] = r;
        }

        let file = NamedTempFile::new().unwrap();
        write_wav_stereo(file.path(), &samples, WavSpec::default()).unwrap();
        let (loaded, _) = read_wav_stereo(file.path()).unwrap();
        assert_eq!(loaded.len(), 256);
        assert!(loaded.left.iter().all(|s| s.is_finite()));
    }
}
