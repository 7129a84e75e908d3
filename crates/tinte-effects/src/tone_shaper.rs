//! Per-channel nonlinear drive core.
//!
//! [`ToneShaper`] is the heart of the tinte signal path: a one-pole
//! high-pass/low-pass filter pair wrapped around a [`Character`] waveshaper,
//! with drive-dependent pre-emphasis and static auto-gain compensation so
//! turning the processing amount up does not proportionally raise loudness.
//!
//! The dry signal is always summed back in at the output, so the shaper is
//! a parallel blend stage rather than a pure serial insert. At zero
//! processing it is exactly transparent.

use libm::{ceilf, expf, fabsf};
use tinte_core::{Effect, flush_denormal};

use crate::curve::Character;

/// Coefficient preset selecting drive scaling, presence, and harmonic
/// balance for a [`Character`] family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Model {
    /// Balanced, all-purpose voicing.
    #[default]
    Luminescent,
    /// Brighter, more presence and bite.
    Iridescent,
    /// Hot voicing with a cascaded second saturation pass.
    Radiant,
    /// Clean voicing, raw signal into the curve.
    Luster,
    /// Dense, dark voicing with a low smoothing corner.
    DarkEssence,
}

impl Model {
    /// Convert a zero-based index into a model, clamping out-of-range
    /// values to the last variant.
    pub fn from_index(index: usize) -> Self {
        match index {
            0 => Self::Luminescent,
            1 => Self::Iridescent,
            2 => Self::Radiant,
            3 => Self::Luster,
            _ => Self::DarkEssence,
        }
    }

    /// Zero-based index of this model.
    pub fn index(self) -> usize {
        match self {
            Self::Luminescent => 0,
            Self::Iridescent => 1,
            Self::Radiant => 2,
            Self::Luster => 3,
            Self::DarkEssence => 4,
        }
    }
}

/// Shaping constants for one (character, model) pair.
///
/// Replaced as a whole on every mode change so the render path never
/// observes a torn mix of old and new constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriveCoefficients {
    /// Drive scale into the waveshaper (`1 + processing * a3`).
    pub a3: f32,
    /// Linear pre-saturation gain term.
    pub f1: f32,
    /// Processing-dependent linear boost.
    pub p20: f32,
    /// Processing-dependent cubic boost (harmonic injection).
    pub p24: f32,
    /// Direct-signal weight of the high-pass stage.
    pub hpf: f32,
    /// Delta feedback of the high-pass stage, just below 1, at the 44.1 kHz
    /// reference rate.
    pub feedback: f32,
    /// Low-pass smoothing amount at the 44.1 kHz reference rate.
    pub lpf: f32,
    /// Route the raw input into the waveshaper instead of the shaped signal.
    pub g0: bool,
    /// Run a cascaded second saturation pass.
    pub second_pass: bool,
    /// First auto-gain compensation coefficient.
    pub k1: f32,
    /// Second auto-gain compensation coefficient.
    pub k2: f32,
    /// Above-knee auto-gain boost coefficient.
    pub k3: f32,
    /// Post-multiplier on the wet path.
    pub post_gain: f32,
    /// Dry-signal subtraction weight in the wet path.
    pub trim: f32,
}

/// Processing amount above which auto-gain applies an extra boost.
const AUTO_GAIN_KNEE: f32 = 0.65;

impl DriveCoefficients {
    /// Preset lookup for a (character, model) pair.
    ///
    /// These tunings are voicing data, not derived quantities; treat each
    /// entry as an interchangeable preset.
    pub const fn lookup(character: Character, model: Model) -> Self {
        match character {
            Character::Opal => match model {
                Model::Luminescent => Self {
                    a3: 1.8,
                    f1: 0.60,
                    p20: 0.32,
                    p24: 0.18,
                    hpf: 0.022,
                    feedback: 0.9980,
                    lpf: 0.20,
                    g0: false,
                    second_pass: false,
                    k1: 1.10,
                    k2: 0.65,
                    k3: 0.55,
                    post_gain: 1.00,
                    trim: 0.15,
                },
                Model::Iridescent => Self {
                    a3: 2.3,
                    f1: 0.72,
                    p20: 0.42,
                    p24: 0.25,
                    hpf: 0.027,
                    feedback: 0.9976,
                    lpf: 0.26,
                    g0: false,
                    second_pass: false,
                    k1: 1.40,
                    k2: 0.80,
                    k3: 0.60,
                    post_gain: 1.05,
                    trim: 0.12,
                },
                Model::Radiant => Self {
                    a3: 3.1,
                    f1: 0.88,
                    p20: 0.52,
                    p24: 0.32,
                    hpf: 0.032,
                    feedback: 0.9972,
                    lpf: 0.30,
                    g0: false,
                    second_pass: true,
                    k1: 1.80,
                    k2: 1.05,
                    k3: 0.72,
                    post_gain: 0.95,
                    trim: 0.10,
                },
                Model::Luster => Self {
                    a3: 1.3,
                    f1: 0.50,
                    p20: 0.22,
                    p24: 0.10,
                    hpf: 0.018,
                    feedback: 0.9985,
                    lpf: 0.16,
                    g0: true,
                    second_pass: false,
                    k1: 0.75,
                    k2: 0.45,
                    k3: 0.42,
                    post_gain: 1.10,
                    trim: 0.20,
                },
                Model::DarkEssence => Self {
                    a3: 2.8,
                    f1: 0.78,
                    p20: 0.48,
                    p24: 0.28,
                    hpf: 0.013,
                    feedback: 0.9980,
                    lpf: 0.12,
                    g0: false,
                    second_pass: true,
                    k1: 1.60,
                    k2: 0.95,
                    k3: 0.68,
                    post_gain: 0.90,
                    trim: 0.08,
                },
            },
            Character::Gold => match model {
                Model::Luminescent => Self {
                    a3: 2.0,
                    f1: 0.60,
                    p20: 0.35,
                    p24: 0.20,
                    hpf: 0.025,
                    feedback: 0.9980,
                    lpf: 0.25,
                    g0: false,
                    second_pass: false,
                    k1: 1.20,
                    k2: 0.70,
                    k3: 0.60,
                    post_gain: 1.00,
                    trim: 0.15,
                },
                Model::Iridescent => Self {
                    a3: 2.6,
                    f1: 0.75,
                    p20: 0.45,
                    p24: 0.28,
                    hpf: 0.030,
                    feedback: 0.9975,
                    lpf: 0.32,
                    g0: false,
                    second_pass: false,
                    k1: 1.50,
                    k2: 0.85,
                    k3: 0.65,
                    post_gain: 1.05,
                    trim: 0.12,
                },
                Model::Radiant => Self {
                    a3: 3.4,
                    f1: 0.90,
                    p20: 0.55,
                    p24: 0.35,
                    hpf: 0.035,
                    feedback: 0.9970,
                    lpf: 0.38,
                    g0: false,
                    second_pass: true,
                    k1: 1.90,
                    k2: 1.10,
                    k3: 0.75,
                    post_gain: 0.95,
                    trim: 0.10,
                },
                Model::Luster => Self {
                    a3: 1.4,
                    f1: 0.50,
                    p20: 0.25,
                    p24: 0.12,
                    hpf: 0.020,
                    feedback: 0.9985,
                    lpf: 0.20,
                    g0: true,
                    second_pass: false,
                    k1: 0.80,
                    k2: 0.50,
                    k3: 0.45,
                    post_gain: 1.10,
                    trim: 0.20,
                },
                Model::DarkEssence => Self {
                    a3: 3.0,
                    f1: 0.80,
                    p20: 0.50,
                    p24: 0.30,
                    hpf: 0.015,
                    feedback: 0.9980,
                    lpf: 0.15,
                    g0: false,
                    second_pass: true,
                    k1: 1.70,
                    k2: 1.00,
                    k3: 0.70,
                    post_gain: 0.90,
                    trim: 0.08,
                },
            },
            Character::Sapphire => match model {
                Model::Luminescent => Self {
                    a3: 2.2,
                    f1: 0.64,
                    p20: 0.38,
                    p24: 0.22,
                    hpf: 0.030,
                    feedback: 0.9978,
                    lpf: 0.30,
                    g0: false,
                    second_pass: false,
                    k1: 1.30,
                    k2: 0.75,
                    k3: 0.62,
                    post_gain: 1.02,
                    trim: 0.14,
                },
                Model::Iridescent => Self {
                    a3: 2.8,
                    f1: 0.80,
                    p20: 0.48,
                    p24: 0.30,
                    hpf: 0.036,
                    feedback: 0.9973,
                    lpf: 0.38,
                    g0: false,
                    second_pass: false,
                    k1: 1.60,
                    k2: 0.90,
                    k3: 0.68,
                    post_gain: 1.08,
                    trim: 0.11,
                },
                Model::Radiant => Self {
                    a3: 3.6,
                    f1: 0.95,
                    p20: 0.58,
                    p24: 0.38,
                    hpf: 0.040,
                    feedback: 0.9970,
                    lpf: 0.44,
                    g0: false,
                    second_pass: true,
                    k1: 2.00,
                    k2: 1.15,
                    k3: 0.78,
                    post_gain: 0.92,
                    trim: 0.09,
                },
                Model::Luster => Self {
                    a3: 1.5,
                    f1: 0.54,
                    p20: 0.27,
                    p24: 0.14,
                    hpf: 0.024,
                    feedback: 0.9984,
                    lpf: 0.24,
                    g0: true,
                    second_pass: false,
                    k1: 0.85,
                    k2: 0.55,
                    k3: 0.48,
                    post_gain: 1.08,
                    trim: 0.19,
                },
                Model::DarkEssence => Self {
                    a3: 3.2,
                    f1: 0.84,
                    p20: 0.52,
                    p24: 0.32,
                    hpf: 0.018,
                    feedback: 0.9979,
                    lpf: 0.18,
                    g0: false,
                    second_pass: true,
                    k1: 1.80,
                    k2: 1.05,
                    k3: 0.72,
                    post_gain: 0.88,
                    trim: 0.07,
                },
            },
            // Neutral tuning: raw signal into the clip curve, full smoothing,
            // no compensation. Gives a dry-to-clipped blend over processing.
            Character::Transparent => Self {
                a3: 1.0,
                f1: 1.0,
                p20: 0.0,
                p24: 0.0,
                hpf: 0.0,
                feedback: 0.0,
                lpf: 1.0,
                g0: true,
                second_pass: false,
                k1: 0.0,
                k2: 0.0,
                k3: 0.0,
                post_gain: 1.0,
                trim: 1.0,
            },
        }
    }
}

/// Per-channel stateful drive core.
///
/// Call [`set_sample_rate`](Effect::set_sample_rate) before the first
/// [`process`](Effect::process); a freshly constructed shaper is already
/// configured for its constructor rate with default mode and zero
/// processing, so an unconfigured instance passes audio through untouched.
///
/// # Example
///
/// ```rust
/// use tinte_core::Effect;
/// use tinte_effects::{Character, Model, ToneShaper};
///
/// let mut shaper = ToneShaper::new(48000.0);
/// shaper.set_mode(Character::Gold, Model::Luminescent);
/// shaper.set_processing(0.5);
///
/// let output = shaper.process(0.25);
/// ```
pub struct ToneShaper {
    sample_rate: f32,
    /// `1 / ceil(rate / 44100)`, keeps filter corners rate-invariant.
    sample_rate_scale: f32,

    character: Character,
    model: Model,
    coeffs: DriveCoefficients,

    // Rate-scaled coefficients, rebuilt on mode or rate change.
    feedback_eff: f32,
    lpf_eff: f32,
    env_coeff: f32,

    /// Normalized processing amount, 0..1.
    processing: f32,
    auto_gain: f32,

    // Per-sample state.
    lowpass_state: f32,
    previous_input: f32,
    envelope: f32,
}

impl Default for ToneShaper {
    fn default() -> Self {
        Self::new(48000.0)
    }
}

impl ToneShaper {
    /// Envelope follower time constant in milliseconds.
    const ENVELOPE_MS: f32 = 20.0;

    /// Create a new tone shaper with default mode and zero processing.
    pub fn new(sample_rate: f32) -> Self {
        let character = Character::default();
        let model = Model::default();
        let mut shaper = Self {
            sample_rate,
            sample_rate_scale: 1.0,
            character,
            model,
            coeffs: DriveCoefficients::lookup(character, model),
            feedback_eff: 0.0,
            lpf_eff: 0.0,
            env_coeff: 0.0,
            processing: 0.0,
            auto_gain: 1.0,
            lowpass_state: 0.0,
            previous_input: 0.0,
            envelope: 0.0,
        };
        shaper.set_sample_rate(sample_rate);
        shaper
    }

    /// Select the (character, model) voicing.
    ///
    /// Swaps the whole coefficient bundle and recomputes the derived
    /// filter and compensation values; filter memory is untouched so the
    /// change is click-free apart from the voicing itself.
    pub fn set_mode(&mut self, character: Character, model: Model) {
        self.character = character;
        self.model = model;
        self.coeffs = DriveCoefficients::lookup(character, model);
        self.update_rate_coefficients();
        self.update_auto_gain();
    }

    /// Set the processing (drive) amount, normalized 0..1.
    ///
    /// Values outside the range are clamped. Recomputes auto-gain so the
    /// next sample already sees coherent compensation.
    pub fn set_processing(&mut self, amount: f32) {
        self.processing = amount.clamp(0.0, 1.0);
        self.update_auto_gain();
    }

    /// Current processing amount, 0..1.
    pub fn processing(&self) -> f32 {
        self.processing
    }

    /// Current character family.
    pub fn character(&self) -> Character {
        self.character
    }

    /// Current model preset.
    pub fn model(&self) -> Model {
        self.model
    }

    /// Current auto-gain compensation factor.
    pub fn auto_gain(&self) -> f32 {
        self.auto_gain
    }

    fn update_rate_coefficients(&mut self) {
        let scale = self.sample_rate_scale;
        self.feedback_eff = 1.0 - (1.0 - self.coeffs.feedback) * scale;
        self.lpf_eff = (self.coeffs.lpf * scale).min(1.0);
        let samples = Self::ENVELOPE_MS * self.sample_rate / 1000.0;
        self.env_coeff = 1.0 - expf(-1.0 / samples);
    }

    fn update_auto_gain(&mut self) {
        let p = self.processing;
        let c = &self.coeffs;
        let mut gain = 1.0 / ((1.0 + p * c.k1) * (1.0 + p * c.k2));
        if p > AUTO_GAIN_KNEE {
            gain *= 1.0 + (p - AUTO_GAIN_KNEE) * c.k3;
        }
        self.auto_gain = gain;
    }
}

impl Effect for ToneShaper {
    fn process(&mut self, input: f32) -> f32 {
        // A NaN or infinity must not poison the filter memory.
        if !input.is_finite() {
            self.lowpass_state = 0.0;
            self.previous_input = 0.0;
            self.envelope = 0.0;
            return 0.0;
        }

        let p = self.processing;
        let c = self.coeffs;

        // High-pass delta stage: mostly the sample-to-sample difference,
        // with a small direct term.
        let x1 = c.hpf * input + self.feedback_eff * (input - self.previous_input);
        self.previous_input = input;

        // Drive-dependent pre-emphasis before the curve.
        let x2 = x1 * (c.f1 + p * c.p20) + x1 * (1.0 + p * c.p24 * x1 * x1);

        let curve_input = if c.g0 { input } else { x2 };

        self.envelope += (fabsf(curve_input) - self.envelope) * self.env_coeff;
        self.envelope = flush_denormal(self.envelope);

        let drive = 1.0 + p * c.a3;
        let mut shaped = self.character.shape(curve_input * drive, self.envelope);
        if c.second_pass {
            shaped = self.character.shape(shaped * 1.2, self.envelope);
        }

        self.lowpass_state =
            flush_denormal(self.lowpass_state + (shaped - self.lowpass_state) * self.lpf_eff);

        let wet = p * (self.lowpass_state - input * c.trim) * c.post_gain;

        (wet + input) * self.auto_gain
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.sample_rate_scale = 1.0 / ceilf(sample_rate / 44100.0);
        self.update_rate_coefficients();
    }

    fn reset(&mut self) {
        self.lowpass_state = 0.0;
        self.previous_input = 0.0;
        self.envelope = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driven_shaper() -> ToneShaper {
        let mut shaper = ToneShaper::new(48000.0);
        shaper.set_mode(Character::Gold, Model::Luminescent);
        shaper.set_processing(0.5);
        shaper
    }

    #[test]
    fn zero_processing_is_transparent() {
        let mut shaper = ToneShaper::new(48000.0);
        shaper.set_mode(Character::Gold, Model::Iridescent);
        shaper.set_processing(0.0);
        for &x in &[0.0, 0.25, -0.7, 1.0] {
            assert_eq!(shaper.process(x), x);
        }
    }

    #[test]
    fn deterministic_given_same_state() {
        let mut a = driven_shaper();
        let mut b = driven_shaper();
        for i in 0..256 {
            let x = libm::sinf(i as f32 * 0.1) * 0.5;
            assert_eq!(a.process(x), b.process(x));
        }
    }

    #[test]
    fn reset_is_idempotent() {
        let mut once = driven_shaper();
        let mut twice = driven_shaper();
        for i in 0..64 {
            let x = libm::sinf(i as f32 * 0.3);
            once.process(x);
            twice.process(x);
        }
        once.reset();
        twice.reset();
        twice.reset();
        for i in 0..64 {
            let x = libm::sinf(i as f32 * 0.3);
            assert_eq!(once.process(x), twice.process(x));
        }
    }

    #[test]
    fn nan_input_recovers() {
        let mut shaper = driven_shaper();
        for _ in 0..32 {
            shaper.process(0.5);
        }
        assert_eq!(shaper.process(f32::NAN), 0.0);
        assert_eq!(shaper.process(f32::INFINITY), 0.0);
        // Subsequent output is finite again.
        for _ in 0..64 {
            assert!(shaper.process(0.5).is_finite());
        }
    }

    #[test]
    fn sample_rate_scale_follows_rate_family() {
        let mut shaper = ToneShaper::new(44100.0);
        assert_eq!(shaper.sample_rate_scale, 1.0);
        shaper.set_sample_rate(48000.0);
        assert_eq!(shaper.sample_rate_scale, 0.5);
        shaper.set_sample_rate(96000.0);
        assert_eq!(shaper.sample_rate_scale, 1.0 / 3.0);
    }

    #[test]
    fn auto_gain_decreases_with_processing() {
        let mut shaper = driven_shaper();
        shaper.set_processing(0.0);
        let g0 = shaper.auto_gain();
        shaper.set_processing(0.5);
        let g_half = shaper.auto_gain();
        shaper.set_processing(1.0);
        let g_full = shaper.auto_gain();
        assert_eq!(g0, 1.0);
        assert!(g_half < g0);
        assert!(g_full < g_half);
    }

    #[test]
    fn mode_change_updates_auto_gain_coherently() {
        let mut shaper = driven_shaper();
        let before = shaper.auto_gain();
        shaper.set_mode(Character::Sapphire, Model::Radiant);
        let after = shaper.auto_gain();
        assert_ne!(before, after);
    }
}
