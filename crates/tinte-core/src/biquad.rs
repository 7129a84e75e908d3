//! Biquad (bi-quadratic) filter for the compressor sidechain.
//!
//! A generic second-order IIR filter. The only response shipped here is
//! the RBJ cookbook high-pass, which the bus compressor uses to keep
//! low-frequency energy out of its level detector.

use core::f32::consts::PI;
use libm::{cosf, sinf};

/// Generic biquad filter coefficients and state.
///
/// Direct Form I structure:
/// ```text
/// y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2]
///                - a1*y[n-1] - a2*y[n-2]
/// ```
#[derive(Debug, Clone)]
pub struct Biquad {
    b0: f32,
    b1: f32,
    b2: f32,
    a1: f32,
    a2: f32,

    /// Input delay line: x[n-1], x[n-2]
    x1: f32,
    x2: f32,

    /// Output delay line: y[n-1], y[n-2]
    y1: f32,
    y2: f32,
}

impl Biquad {
    /// Creates a new biquad with passthrough coefficients (`y[n] = x[n]`).
    pub fn new() -> Self {
        Self {
            b0: 1.0,
            b1: 0.0,
            b2: 0.0,
            a1: 0.0,
            a2: 0.0,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    /// Sets the biquad coefficients, normalizing by `a0` internally.
    pub fn set_coefficients(&mut self, b0: f32, b1: f32, b2: f32, a0: f32, a1: f32, a2: f32) {
        let a0_inv = 1.0 / a0;
        self.b0 = b0 * a0_inv;
        self.b1 = b1 * a0_inv;
        self.b2 = b2 * a0_inv;
        self.a1 = a1 * a0_inv;
        self.a2 = a2 * a0_inv;
    }

    /// Processes a single sample through the filter.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let output = self.b0 * input + self.b1 * self.x1 + self.b2 * self.x2
            - self.a1 * self.y1
            - self.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;

        output
    }

    /// Clears the filter delay lines without changing coefficients.
    pub fn clear(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }
}

impl Default for Biquad {
    fn default() -> Self {
        Self::new()
    }
}

/// High-pass filter coefficients from the RBJ Audio EQ Cookbook.
///
/// # Arguments
///
/// * `frequency` - Cutoff frequency in Hz
/// * `q` - Q factor (0.707 for Butterworth response)
/// * `sample_rate` - Sample rate in Hz
///
/// # Returns
///
/// `(b0, b1, b2, a0, a1, a2)` for [`Biquad::set_coefficients`].
pub fn highpass_coefficients(
    frequency: f32,
    q: f32,
    sample_rate: f32,
) -> (f32, f32, f32, f32, f32, f32) {
    let omega = 2.0 * PI * frequency / sample_rate;
    let cos_omega = cosf(omega);
    let sin_omega = sinf(omega);
    let alpha = sin_omega / (2.0 * q);

    let b0 = (1.0 + cos_omega) / 2.0;
    let b1 = -(1.0 + cos_omega);
    let b2 = (1.0 + cos_omega) / 2.0;
    let a0 = 1.0 + alpha;
    let a1 = -2.0 * cos_omega;
    let a2 = 1.0 - alpha;

    (b0, b1, b2, a0, a1, a2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passthrough_by_default() {
        let mut biquad = Biquad::new();
        for i in 0..10 {
            let input = i as f32 * 0.1;
            let output = biquad.process(input);
            assert!((output - input).abs() < 0.0001);
        }
    }

    #[test]
    fn clear_zeroes_state() {
        let mut biquad = Biquad::new();
        for _ in 0..10 {
            biquad.process(1.0);
        }
        biquad.clear();
        assert_eq!(biquad.x1, 0.0);
        assert_eq!(biquad.x2, 0.0);
        assert_eq!(biquad.y1, 0.0);
        assert_eq!(biquad.y2, 0.0);
    }

    #[test]
    fn highpass_rejects_dc() {
        let mut biquad = Biquad::new();
        let (b0, b1, b2, a0, a1, a2) = highpass_coefficients(150.0, 0.707, 48000.0);
        biquad.set_coefficients(b0, b1, b2, a0, a1, a2);

        let mut output = 1.0;
        for _ in 0..48000 {
            output = biquad.process(1.0);
        }
        assert!(output.abs() < 0.001, "DC should be rejected, got {output}");
    }

    #[test]
    fn highpass_passes_high_frequencies() {
        let mut biquad = Biquad::new();
        let (b0, b1, b2, a0, a1, a2) = highpass_coefficients(150.0, 0.707, 48000.0);
        biquad.set_coefficients(b0, b1, b2, a0, a1, a2);

        // 5 kHz tone, well above the 150 Hz cutoff
        let sr = 48000.0;
        let freq = 5000.0;
        let mut max_out = 0.0f32;
        for i in 0..4800 {
            let t = i as f32 / sr;
            let input = sinf(2.0 * PI * freq * t);
            let out = biquad.process(input);
            if i > 2400 {
                max_out = max_out.max(out.abs());
            }
        }
        assert!(max_out > 0.95, "5 kHz should pass, peak was {max_out}");
    }

    #[test]
    fn coefficients_are_finite() {
        let (b0, b1, b2, a0, a1, a2) = highpass_coefficients(150.0, 0.707, 44100.0);
        for v in [b0, b1, b2, a0, a1, a2] {
            assert!(v.is_finite());
        }
        assert!(a0 > 0.0);
    }
}
