//! Asymmetric attack/release envelope smoother.
//!
//! The gain-reduction filter at the heart of a compressor: a one-pole
//! smoother whose coefficient is switched each sample depending on whether
//! the target is above or below the current envelope. Rising targets use
//! the (fast) attack coefficient, falling targets the (slow) release
//! coefficient, producing the classic fast-attack/slow-release shape.
//!
//! The envelope here lives in positive reduction-dB units: a target of
//! `6.0` means "reduce by 6 dB". Tracking positive reduction keeps the
//! attack/release selection aligned with the audible behavior — clamping
//! down is always the attack phase, letting go is always the release phase.

use libm::expf;

/// Asymmetric envelope smoother with attack/release time constants.
///
/// # Example
///
/// ```rust
/// use tinte_core::Ballistics;
///
/// let mut env = Ballistics::new(48000.0);
/// env.set_attack_ms(10.0);
/// env.set_release_ms(300.0);
///
/// // Step toward 6 dB of reduction at the attack rate
/// let smoothed = env.process(6.0);
/// assert!(smoothed > 0.0 && smoothed < 6.0);
/// ```
#[derive(Debug, Clone)]
pub struct Ballistics {
    /// Current envelope value (positive reduction dB).
    envelope: f32,
    attack_coeff: f32,
    release_coeff: f32,
    sample_rate: f32,
    attack_ms: f32,
    release_ms: f32,
}

impl Ballistics {
    /// Create with default 10 ms attack / 300 ms release.
    pub fn new(sample_rate: f32) -> Self {
        let mut filter = Self {
            envelope: 0.0,
            attack_coeff: 0.0,
            release_coeff: 0.0,
            sample_rate,
            attack_ms: 10.0,
            release_ms: 300.0,
        };
        filter.recalculate_coefficients();
        filter
    }

    /// Set the attack time in milliseconds (how fast reduction engages).
    pub fn set_attack_ms(&mut self, attack_ms: f32) {
        self.attack_ms = attack_ms.max(0.1);
        self.recalculate_coefficients();
    }

    /// Current attack time in milliseconds.
    pub fn attack_ms(&self) -> f32 {
        self.attack_ms
    }

    /// Set the release time in milliseconds (how fast reduction lets go).
    pub fn set_release_ms(&mut self, release_ms: f32) {
        self.release_ms = release_ms.max(1.0);
        self.recalculate_coefficients();
    }

    /// Current release time in milliseconds.
    pub fn release_ms(&self) -> f32 {
        self.release_ms
    }

    /// Update sample rate and recalculate coefficients.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.recalculate_coefficients();
    }

    /// Smooth one target value through the asymmetric filter.
    ///
    /// Moves toward `target` at the attack rate when `target` exceeds the
    /// current envelope, at the release rate otherwise.
    #[inline]
    pub fn process(&mut self, target: f32) -> f32 {
        let coeff = if target > self.envelope {
            self.attack_coeff
        } else {
            self.release_coeff
        };
        self.envelope += coeff * (target - self.envelope);
        self.envelope
    }

    /// Current envelope value without processing new input.
    pub fn level(&self) -> f32 {
        self.envelope
    }

    /// Reset the envelope to zero (no reduction).
    pub fn reset(&mut self) {
        self.envelope = 0.0;
    }

    /// `coeff = 1 - exp(-1 / (time_ms * fs / 1000))`: one time constant
    /// reaches ~63.2% of a step.
    fn recalculate_coefficients(&mut self) {
        self.attack_coeff = 1.0 - expf(-1.0 / (self.attack_ms * self.sample_rate / 1000.0));
        self.release_coeff = 1.0 - expf(-1.0 / (self.release_ms * self.sample_rate / 1000.0));
    }
}

impl Default for Ballistics {
    fn default() -> Self {
        Self::new(48000.0)
    }
}
