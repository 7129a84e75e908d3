//! Audio file I/O layer for the tinte processors.
//!
//! This crate provides:
//!
//! - **WAV file I/O**: [`read_wav_stereo`] and [`write_wav_stereo`] for
//!   loading/saving stereo audio, plus mono variants
//! - **Metadata inspection**: [`read_wav_info`] without loading samples
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tinte_core::Effect;
//! use tinte_effects::BusCompressor;
//! use tinte_io::{read_wav_stereo, write_wav_stereo};
//!
//! let (mut samples, spec) = read_wav_stereo("input.wav")?;
//!
//! let mut comp = BusCompressor::new(spec.sample_rate as f32);
//! for i in 0..samples.len() {
//!     let (l, r) = comp.process_stereo(samples.left[i], samples.right[i]);
//!     samples.left[i] = l;
//!     samples.right[i] = r;
//! }
//!
//! write_wav_stereo("output.wav", &samples, spec)?;
//! ```

mod wav;

pub use wav::{
    StereoSamples, WavFormat, WavInfo, WavSpec, read_wav, read_wav_info, read_wav_stereo,
    write_wav, write_wav_stereo,
};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// The file's channel layout cannot be processed.
    #[error("Unsupported channel layout: {0} channels")]
    UnsupportedLayout(u16),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
