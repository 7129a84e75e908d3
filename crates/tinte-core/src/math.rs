//! Mathematical utility functions for DSP.
//!
//! Allocation-free helpers suitable for `no_std`:
//!
//! - [`db_to_linear`] / [`linear_to_db`] - level conversions
//! - [`ms_encode`] / [`ms_decode`] - mid/side stereo rotation
//! - [`flush_denormal`] - subnormal protection for feedback state
//! - [`wet_dry_mix`] / [`lerp`] / [`mono_sum`] - blending utilities

use libm::{expf, logf};

/// Convert decibels to linear gain.
///
/// # Example
/// ```rust
/// use tinte_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 0.001);
/// assert!((db_to_linear(-6.02) - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    // 10^(dB/20) = e^(dB * ln(10)/20)
    const FACTOR: f32 = core::f32::consts::LN_10 / 20.0;
    expf(db * FACTOR)
}

/// Convert linear gain to decibels.
///
/// Inputs at or below zero are clamped to a -200 dB floor rather than
/// returning -inf, so level detectors never feed infinities downstream.
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    const FACTOR: f32 = 20.0 / core::f32::consts::LN_10;
    logf(linear.max(1e-10)) * FACTOR
}

/// Linear interpolation between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Crossfade between dry and wet signals.
///
/// Equivalent to `dry * (1 - mix) + wet * mix` with one fewer multiply.
#[inline]
pub fn wet_dry_mix(dry: f32, wet: f32, mix: f32) -> f32 {
    dry + (wet - dry) * mix
}

/// Sum stereo to mono (average).
#[inline]
pub fn mono_sum(left: f32, right: f32) -> f32 {
    (left + right) * 0.5
}

/// Flush subnormal (denormalized) floats to zero.
///
/// Subnormal floats cause severe CPU slowdowns on most architectures.
/// Values below 1e-20 are replaced with zero, leaving margin before the
/// IEEE 754 subnormal range begins. Use in any feedback path where signal
/// decays indefinitely toward zero.
#[allow(clippy::inline_always)]
#[inline(always)]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}

/// Energy-preserving mid/side rotation factor (√½).
const MS_SCALE: f32 = core::f32::consts::FRAC_1_SQRT_2;

/// Rotate a stereo pair into mid/side.
///
/// `mid = (L + R)·√½`, `side = (L − R)·√½`. The rotation is energy
/// preserving and exactly inverted by [`ms_decode`].
///
/// # Example
/// ```rust
/// use tinte_core::{ms_decode, ms_encode};
///
/// let (m, s) = ms_encode(0.8, -0.3);
/// let (l, r) = ms_decode(m, s);
/// assert!((l - 0.8).abs() < 1e-6);
/// assert!((r - (-0.3)).abs() < 1e-6);
/// ```
#[inline]
pub fn ms_encode(left: f32, right: f32) -> (f32, f32) {
    ((left + right) * MS_SCALE, (left - right) * MS_SCALE)
}

/// Rotate a mid/side pair back to stereo.
///
/// `L = (M + S)·√½`, `R = (M − S)·√½`. Inverse of [`ms_encode`].
#[inline]
pub fn ms_decode(mid: f32, side: f32) -> (f32, f32) {
    ((mid + side) * MS_SCALE, (mid - side) * MS_SCALE)
}
