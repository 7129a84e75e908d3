//! Parameter smoothing for zipper-free changes.
//!
//! Parameters set from a control thread (trim gains, drive amounts) need
//! smooth transitions to avoid audible zipper noise when they land mid-block.
//! [`SmoothedParam`] provides exponential (one-pole lowpass) smoothing with
//! a configurable time constant.
//!
//! ```rust
//! use tinte_core::SmoothedParam;
//!
//! let mut gain = SmoothedParam::with_config(1.0, 48000.0, 10.0);
//! gain.set_target(0.5);
//!
//! // In the audio callback, advance once per sample
//! for _ in 0..480 {
//!     let g = gain.advance();
//!     // use g...
//! }
//! ```

use libm::expf;

/// A parameter with built-in exponential smoothing.
///
/// The smoother is a one-pole lowpass toward the target value; the time
/// constant is the time to reach ~63.2% of a step.
#[derive(Debug, Clone)]
pub struct SmoothedParam {
    /// Current smoothed value.
    current: f32,
    /// Target value being approached.
    target: f32,
    /// One-pole coefficient (1.0 = instant).
    coeff: f32,
    /// Sample rate in Hz.
    sample_rate: f32,
    /// Smoothing time constant in milliseconds.
    smoothing_time_ms: f32,
}

impl SmoothedParam {
    /// Standard smoothing time for trim/drive parameters.
    const STANDARD_MS: f32 = 10.0;

    /// Create a parameter with the standard 10 ms smoothing time.
    pub fn standard(initial: f32, sample_rate: f32) -> Self {
        Self::with_config(initial, sample_rate, Self::STANDARD_MS)
    }

    /// Create a parameter with a specific smoothing time constant.
    pub fn with_config(initial: f32, sample_rate: f32, smoothing_time_ms: f32) -> Self {
        let mut param = Self {
            current: initial,
            target: initial,
            coeff: 1.0,
            sample_rate,
            smoothing_time_ms,
        };
        param.recalculate_coeff();
        param
    }

    /// Set the target value; the parameter smooths toward it.
    #[inline]
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Set target and snap to it immediately (no smoothing).
    #[inline]
    pub fn set_immediate(&mut self, value: f32) {
        self.target = value;
        self.current = value;
    }

    /// Update sample rate and recalculate the smoothing coefficient.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.recalculate_coeff();
    }

    /// Get the next smoothed value, advancing by one sample.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        self.current += self.coeff * (self.target - self.current);
        self.current
    }

    /// Current smoothed value without advancing.
    #[inline]
    pub fn get(&self) -> f32 {
        self.current
    }

    /// The target value.
    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Skip ahead to the target immediately. Used on reset so a stopped
    /// transport restarts without a fade from stale values.
    #[inline]
    pub fn snap_to_target(&mut self) {
        self.current = self.target;
    }

    /// `coeff = 1 - exp(-1 / (tau * fs))` where tau is the smoothing time
    /// in seconds. Zero smoothing time gives instant response.
    fn recalculate_coeff(&mut self) {
        if self.smoothing_time_ms <= 0.0 || self.sample_rate <= 0.0 {
            self.coeff = 1.0;
        } else {
            let samples = self.smoothing_time_ms / 1000.0 * self.sample_rate;
            self.coeff = 1.0 - expf(-1.0 / samples);
        }
    }
}

impl Default for SmoothedParam {
    fn default() -> Self {
        Self::with_config(0.0, 44100.0, 0.0)
    }
}
