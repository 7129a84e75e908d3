//! Property-based tests for the tinte effects.
//!
//! Uses proptest to verify fundamental invariants across the whole voicing
//! matrix: finite output, boundedness, determinism, and a clean mid/side
//! round trip.

use proptest::prelude::*;
use tinte_core::{Effect, ParameterInfo, ms_decode, ms_encode};
use tinte_effects::{BusCompressor, ChannelPair, Character, Model, ToneShaper};

const CHARACTERS: [Character; 3] = [Character::Opal, Character::Gold, Character::Sapphire];
const MODELS: [Model; 5] = [
    Model::Luminescent,
    Model::Iridescent,
    Model::Radiant,
    Model::Luster,
    Model::DarkEssence,
];

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every voicing produces finite output for any finite input in [-2, 2]
    /// and any processing amount.
    #[test]
    fn tone_shaper_finite_output(
        input in prop::array::uniform32(-2.0f32..=2.0f32),
        processing in 0.0f32..=1.0f32,
        character_idx in 0usize..3,
        model_idx in 0usize..5,
    ) {
        let mut shaper = ToneShaper::new(48000.0);
        shaper.set_mode(CHARACTERS[character_idx], MODELS[model_idx]);
        shaper.set_processing(processing);

        for &sample in &input {
            let out = shaper.process(sample);
            prop_assert!(
                out.is_finite(),
                "{:?}/{:?} produced {} for input {}",
                CHARACTERS[character_idx], MODELS[model_idx], out, sample
            );
        }
    }

    /// Nominal-level input never explodes: for |x| <= 1 the shaper output
    /// stays within a generous fixed bound for every voicing.
    #[test]
    fn tone_shaper_bounded_output(
        input in prop::array::uniform32(-1.0f32..=1.0f32),
        processing in 0.0f32..=1.0f32,
        character_idx in 0usize..3,
        model_idx in 0usize..5,
    ) {
        let mut shaper = ToneShaper::new(48000.0);
        shaper.set_mode(CHARACTERS[character_idx], MODELS[model_idx]);
        shaper.set_processing(processing);

        for &sample in &input {
            let out = shaper.process(sample);
            prop_assert!(out.abs() <= 3.0, "output {} exceeds bound", out);
        }
    }

    /// Two shapers given the same input history agree exactly.
    #[test]
    fn tone_shaper_deterministic(
        input in prop::collection::vec(-1.0f32..=1.0f32, 1..256),
        processing in 0.0f32..=1.0f32,
    ) {
        let mut a = ToneShaper::new(48000.0);
        let mut b = ToneShaper::new(48000.0);
        for shaper in [&mut a, &mut b] {
            shaper.set_mode(Character::Gold, Model::Iridescent);
            shaper.set_processing(processing);
        }
        for &sample in &input {
            prop_assert_eq!(a.process(sample), b.process(sample));
        }
    }

    /// Mid/side encode followed by decode reproduces the input.
    #[test]
    fn mid_side_round_trip(left in -2.0f32..=2.0f32, right in -2.0f32..=2.0f32) {
        let (mid, side) = ms_encode(left, right);
        let (l, r) = ms_decode(mid, side);
        prop_assert!((l - left).abs() < 1e-5);
        prop_assert!((r - right).abs() < 1e-5);
    }

    /// The compressor stays finite for any parameter combination drawn
    /// from the descriptor ranges.
    #[test]
    fn bus_compressor_finite_output(
        input in prop::array::uniform32(-1.5f32..=1.5f32),
        params in prop::array::uniform10(0.0f32..=1.0f32),
    ) {
        let mut comp = BusCompressor::new(48000.0);
        for (i, &t) in params.iter().enumerate() {
            if let Some(desc) = comp.param_info(i) {
                comp.set_param(i, desc.min + t * (desc.max - desc.min));
            }
        }
        for &sample in &input {
            let (l, r) = comp.process_stereo(sample, -sample);
            prop_assert!(l.is_finite() && r.is_finite());
        }
        prop_assert!(comp.gain_reduction_db() <= 0.0);
    }

    /// A channel pair fed identical channels keeps them identical.
    #[test]
    fn channel_pair_symmetry(
        input in prop::collection::vec(-1.0f32..=1.0f32, 1..128),
        processing in 0.0f32..=1.0f32,
        model_idx in 0usize..5,
    ) {
        let mut pair = ChannelPair::new(48000.0);
        pair.set_mode(Character::Sapphire, MODELS[model_idx]);
        pair.set_processing(processing);
        for &sample in &input {
            let (l, r) = pair.process_stereo(sample, sample);
            prop_assert_eq!(l, r);
        }
    }
}
