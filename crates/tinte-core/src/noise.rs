//! Small allocation-free PRNG for analog idle-noise emulation.
//!
//! The bus compressor injects a tiny pseudo-random DC offset each block to
//! emulate the idle noise floor of analog circuitry. That calls for a
//! generator that is cheap, deterministic, and usable from the audio thread;
//! xorshift32 (Marsaglia, "Xorshift RNGs", 2003) fits in one u32 of state.

/// Xorshift32 pseudo-random number generator.
///
/// Not cryptographic. Period 2^32 - 1; the state must be non-zero.
///
/// # Example
///
/// ```rust
/// use tinte_core::Xorshift32;
///
/// let mut rng = Xorshift32::new(0x1234_5678);
/// let x = rng.next_unit();
/// assert!((0.0..1.0).contains(&x));
/// ```
#[derive(Debug, Clone)]
pub struct Xorshift32 {
    state: u32,
}

impl Xorshift32 {
    /// Create a generator from a seed. A zero seed is remapped to a fixed
    /// non-zero constant (xorshift has an all-zeroes fixed point).
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 0x9E37_79B9 } else { seed },
        }
    }

    /// Next raw 32-bit value.
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Next value in `[0, 1)`.
    #[inline]
    pub fn next_unit(&mut self) -> f32 {
        // 24 mantissa-sized bits into [0, 1)
        (self.next_u32() >> 8) as f32 * (1.0 / 16_777_216.0)
    }

    /// Next value in `[-1, 1)`.
    #[inline]
    pub fn next_bipolar(&mut self) -> f32 {
        self.next_unit() * 2.0 - 1.0
    }
}

impl Default for Xorshift32 {
    fn default() -> Self {
        Self::new(0x1234_5678)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_for_same_seed() {
        let mut a = Xorshift32::new(42);
        let mut b = Xorshift32::new(42);
        for _ in 0..100 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn unit_range() {
        let mut rng = Xorshift32::new(7);
        for _ in 0..10_000 {
            let x = rng.next_unit();
            assert!((0.0..1.0).contains(&x), "out of range: {x}");
        }
    }

    #[test]
    fn bipolar_range_and_spread() {
        let mut rng = Xorshift32::new(99);
        let mut min = f32::MAX;
        let mut max = f32::MIN;
        for _ in 0..10_000 {
            let x = rng.next_bipolar();
            assert!((-1.0..1.0).contains(&x));
            min = min.min(x);
            max = max.max(x);
        }
        assert!(min < -0.9 && max > 0.9, "poor spread: [{min}, {max}]");
    }

    #[test]
    fn zero_seed_is_remapped() {
        let mut rng = Xorshift32::new(0);
        assert_ne!(rng.next_u32(), 0);
    }
}
