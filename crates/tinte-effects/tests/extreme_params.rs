//! Extreme parameter tests for the tinte effects.
//!
//! Verifies finite output when every parameter sits at its minimum or
//! maximum, and when running at extreme sample rates (8 kHz and 192 kHz).

use tinte_core::{Effect, ParameterInfo};
use tinte_effects::{BusCompressor, ChannelPair};

const DEFAULT_SAMPLE_RATE: f32 = 48000.0;
const LOW_SAMPLE_RATE: f32 = 8000.0;
const HIGH_SAMPLE_RATE: f32 = 192_000.0;
const NUM_SAMPLES: usize = 1000;

/// Process `NUM_SAMPLES` through an effect and assert all outputs are finite.
fn assert_finite_output(effect: &mut dyn Effect, label: &str) {
    for i in 0..NUM_SAMPLES {
        let input = match i % 3 {
            0 => 0.5,
            1 => -0.5,
            _ => 0.0,
        };
        let (l, r) = effect.process_stereo(input, -input);
        assert!(
            l.is_finite() && r.is_finite(),
            "{label}: non-finite output at sample {i}: ({l}, {r})"
        );
    }
}

/// Set all parameters to their minimum values using ParameterInfo.
fn set_all_params_min(effect: &mut (impl Effect + ParameterInfo)) {
    for i in 0..effect.param_count() {
        if let Some(desc) = effect.param_info(i) {
            effect.set_param(i, desc.min);
        }
    }
}

/// Set all parameters to their maximum values using ParameterInfo.
fn set_all_params_max(effect: &mut (impl Effect + ParameterInfo)) {
    for i in 0..effect.param_count() {
        if let Some(desc) = effect.param_info(i) {
            effect.set_param(i, desc.max);
        }
    }
}

#[test]
fn channel_pair_extreme_params() {
    for sample_rate in [LOW_SAMPLE_RATE, DEFAULT_SAMPLE_RATE, HIGH_SAMPLE_RATE] {
        let mut pair = ChannelPair::new(sample_rate);
        set_all_params_min(&mut pair);
        assert_finite_output(&mut pair, "ChannelPair min");

        let mut pair = ChannelPair::new(sample_rate);
        set_all_params_max(&mut pair);
        assert_finite_output(&mut pair, "ChannelPair max");
    }
}

#[test]
fn bus_compressor_extreme_params() {
    for sample_rate in [LOW_SAMPLE_RATE, DEFAULT_SAMPLE_RATE, HIGH_SAMPLE_RATE] {
        let mut comp = BusCompressor::new(sample_rate);
        set_all_params_min(&mut comp);
        assert_finite_output(&mut comp, "BusCompressor min");

        let mut comp = BusCompressor::new(sample_rate);
        set_all_params_max(&mut comp);
        assert_finite_output(&mut comp, "BusCompressor max");
    }
}

#[test]
fn sample_rate_change_mid_stream_stays_finite() {
    let mut pair = ChannelPair::new(DEFAULT_SAMPLE_RATE);
    set_all_params_max(&mut pair);
    assert_finite_output(&mut pair, "ChannelPair before rate change");
    pair.set_sample_rate(HIGH_SAMPLE_RATE);
    assert_finite_output(&mut pair, "ChannelPair after rate change");
}

#[test]
fn prepare_can_be_called_repeatedly() {
    let mut comp = BusCompressor::new(DEFAULT_SAMPLE_RATE);
    for _ in 0..4 {
        comp.prepare(DEFAULT_SAMPLE_RATE);
        comp.prepare(HIGH_SAMPLE_RATE);
    }
    assert_finite_output(&mut comp, "BusCompressor after repeated prepare");
}
