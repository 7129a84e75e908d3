//! Saturation curve families.
//!
//! Stateless waveshaping transfer functions selected by [`Character`].
//! Each family has a distinct harmonic signature but shares a common
//! contract: continuous, zero at zero, bounded for the intended operating
//! range, and monotonic for `|x| < 2` so the shaper never folds back.

use libm::{atanf, tanhf};

/// Tonal brightness family selecting the waveshaping curve.
///
/// The three named families map to the brightness switch positions of the
/// hardware these processors emulate. [`Character::Transparent`] is a
/// degenerate variant used when a signal path needs clip protection with
/// no tonal color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Character {
    /// Smooth tanh saturation with odd-harmonic emphasis. Darkest of the
    /// three families.
    #[default]
    Opal,
    /// Asymmetric rational soft clipper with 2nd and 3rd harmonic
    /// content. The only envelope-adaptive family: sustained level opens
    /// the curve up slightly.
    Gold,
    /// Arctangent saturation with a touch of added odd harmonics.
    /// Brightest, most open family.
    Sapphire,
    /// Hard clip at ±1 with cubic softening. No harmonic enhancement
    /// below clipping.
    Transparent,
}

impl Character {
    /// Convert a zero-based index into a character, clamping out-of-range
    /// values to the last named family.
    ///
    /// Only the three named families are addressable by index;
    /// [`Character::Transparent`] is constructed explicitly.
    pub fn from_index(index: usize) -> Self {
        match index {
            0 => Self::Opal,
            1 => Self::Gold,
            _ => Self::Sapphire,
        }
    }

    /// Zero-based index of this character.
    pub fn index(self) -> usize {
        match self {
            Self::Opal => 0,
            Self::Gold => 1,
            Self::Sapphire => 2,
            Self::Transparent => 3,
        }
    }

    /// Apply this family's transfer function to `x`.
    ///
    /// `envelope` is a slowly varying, non-negative level estimate; only
    /// [`Character::Gold`] reads it. Passing `0.0` gives the static curve.
    #[inline]
    pub fn shape(self, x: f32, envelope: f32) -> f32 {
        match self {
            Self::Opal => {
                let y = tanhf(x);
                y + 0.12 * y * y * y - 0.03 * y * y * y * y * y
            }
            Self::Gold => {
                // Sustained program material relaxes the clip slightly.
                let drive = 1.4 - 0.3 * envelope.clamp(0.0, 1.0);
                let pos = x * drive;
                let mut y = if pos >= 0.0 {
                    pos / (1.0 + pos)
                } else {
                    0.92 * pos / (1.0 - pos)
                };
                y += 0.06 * y * y + 0.04 * y * y * y;
                y
            }
            Self::Sapphire => {
                let y = atanf(1.5 * x) * core::f32::consts::FRAC_2_PI;
                y + 0.08 * y * y * y
            }
            Self::Transparent => {
                let c = x.clamp(-1.0, 1.0);
                c - 0.1 * c * c * c
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Character; 4] = [
        Character::Opal,
        Character::Gold,
        Character::Sapphire,
        Character::Transparent,
    ];

    #[test]
    fn zero_in_zero_out() {
        for ch in ALL {
            assert_eq!(ch.shape(0.0, 0.0), 0.0, "{ch:?}");
            assert_eq!(ch.shape(0.0, 1.0), 0.0, "{ch:?}");
        }
    }

    #[test]
    fn bounded_for_moderate_input() {
        for ch in ALL {
            let mut x = -4.0;
            while x <= 4.0 {
                let y = ch.shape(x, 0.0);
                assert!(y.abs() <= 2.0, "{ch:?} shape({x}) = {y}");
                x += 0.01;
            }
        }
    }

    #[test]
    fn monotonic_in_working_region() {
        for ch in ALL {
            let mut prev = ch.shape(-2.0, 0.5);
            let mut x = -2.0 + 0.005;
            while x < 2.0 {
                let y = ch.shape(x, 0.5);
                assert!(
                    y >= prev - 1e-6,
                    "{ch:?} not monotonic at x = {x}: {y} < {prev}"
                );
                prev = y;
                x += 0.005;
            }
        }
    }

    #[test]
    fn transparent_is_linear_near_zero() {
        let x = 0.01;
        let y = Character::Transparent.shape(x, 0.0);
        assert!((y - x).abs() < 1e-5);
    }

    #[test]
    fn gold_envelope_reduces_drive() {
        let quiet = Character::Gold.shape(0.5, 0.0);
        let loud = Character::Gold.shape(0.5, 1.0);
        assert!(loud.abs() < quiet.abs());
    }

    #[test]
    fn index_round_trip() {
        for i in 0..3 {
            assert_eq!(Character::from_index(i).index(), i);
        }
        assert_eq!(Character::from_index(99), Character::Sapphire);
    }
}
