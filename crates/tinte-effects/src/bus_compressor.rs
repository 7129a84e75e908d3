//! Console-style bus compressor with linked detection.
//!
//! # Signal Flow
//!
//! ```text
//! Input → [M/S Encode] → Sidechain HPF → Level → Gain Computer
//!                                                     ↓
//!        Output ← Mix ← [M/S Decode] ← Saturation ← Ballistics + Makeup
//! ```
//!
//! Detection is per channel with a stereo-link blend toward the louder
//! channel: at full link both channels receive identical gain reduction,
//! at zero link they compress independently.

use libm::{fabsf, sinf};
use tinte_core::{
    Ballistics, Biquad, Effect, ParamDescriptor, ParamId, ParamUnit, ParameterInfo, SmoothedParam,
    Xorshift32, db_to_linear, highpass_coefficients, lerp, linear_to_db, ms_decode, ms_encode,
    wet_dry_mix,
};

/// Sidechain high-pass corner frequency in Hz.
const SIDECHAIN_HPF_HZ: f32 = 150.0;

/// Output saturation corner level and blend region.
const SAT_THRESHOLD: f32 = 0.8;
const SAT_KNEE: f32 = 0.1;

/// Bus compressor with sidechain filtering, mid/side operation, makeup
/// gain, output saturation, and dry/wet mix.
///
/// ## Parameter Indices (`ParameterInfo`)
///
/// | Index | Name | Range | Default |
/// |-------|------|-------|---------|
/// | 0 | Threshold | -60.0–0.0 dB | -10.0 |
/// | 1 | Ratio | 1.0–20.0 | 4.0 |
/// | 2 | Attack | 0.1–100.0 ms | 10.0 |
/// | 3 | Release | 50.0–3000.0 ms | 300.0 |
/// | 4 | Makeup | -12.0–12.0 dB | 0.0 |
/// | 5 | Mix | 0–100% | 100.0 |
/// | 6 | Drive | 0–100% | 0.0 |
/// | 7 | Stereo Link | 0–100% | 100.0 |
/// | 8 | Sidechain HPF | 0–1 (stepped) | 1 |
/// | 9 | Mid/Side | 0–1 (stepped) | 0 |
///
/// # Example
///
/// ```rust
/// use tinte_core::Effect;
/// use tinte_effects::BusCompressor;
///
/// let mut comp = BusCompressor::new(48000.0);
/// comp.set_threshold_db(-10.0);
/// comp.set_ratio(4.0);
///
/// let (out_l, out_r) = comp.process_stereo(0.5, 0.5);
/// let meter = comp.gain_reduction_db();
/// ```
pub struct BusCompressor {
    sample_rate: f32,

    threshold_db: f32,
    ratio: f32,
    makeup_gain: SmoothedParam,
    hpf_enabled: bool,
    mid_side: bool,
    /// Output saturation drive, 0..1.
    drive: f32,
    /// Detector link amount, 0..1.
    stereo_link: f32,
    /// Dry/wet blend, 0..1.
    mix: f32,

    ballistics_left: Ballistics,
    ballistics_right: Ballistics,
    sidechain_left: Biquad,
    sidechain_right: Biquad,

    /// Idle-noise source for the per-block DC offset.
    noise: Xorshift32,
    dc_offset: f32,

    last_gain_reduction_db: f32,
}

impl Default for BusCompressor {
    fn default() -> Self {
        Self::new(48000.0)
    }
}

impl BusCompressor {
    /// Create a new bus compressor with console-style defaults.
    pub fn new(sample_rate: f32) -> Self {
        let mut comp = Self {
            sample_rate,
            threshold_db: -10.0,
            ratio: 4.0,
            makeup_gain: SmoothedParam::standard(1.0, sample_rate),
            hpf_enabled: true,
            mid_side: false,
            drive: 0.0,
            stereo_link: 1.0,
            mix: 1.0,
            ballistics_left: Ballistics::new(sample_rate),
            ballistics_right: Ballistics::new(sample_rate),
            sidechain_left: Biquad::new(),
            sidechain_right: Biquad::new(),
            noise: Xorshift32::new(0xD1CE_5EED),
            dc_offset: 0.0,
            last_gain_reduction_db: 0.0,
        };
        comp.update_sidechain_filters();
        comp
    }

    /// Reconfigure for a sample rate and clear all detector state.
    ///
    /// Safe to call repeatedly; the host calls this before playback and
    /// on every rate change.
    pub fn prepare(&mut self, sample_rate: f32) {
        self.set_sample_rate(sample_rate);
        self.reset();
    }

    /// Set the compression threshold in dBFS.
    pub fn set_threshold_db(&mut self, threshold_db: f32) {
        self.threshold_db = threshold_db.clamp(-60.0, 0.0);
    }

    /// Set the compression ratio (n:1).
    pub fn set_ratio(&mut self, ratio: f32) {
        self.ratio = ratio.clamp(1.0, 20.0);
    }

    /// Set the attack time in milliseconds.
    pub fn set_attack_ms(&mut self, attack_ms: f32) {
        self.ballistics_left.set_attack_ms(attack_ms);
        self.ballistics_right.set_attack_ms(attack_ms);
    }

    /// Set the release time in milliseconds.
    pub fn set_release_ms(&mut self, release_ms: f32) {
        self.ballistics_left.set_release_ms(release_ms);
        self.ballistics_right.set_release_ms(release_ms);
    }

    /// Set makeup gain in decibels.
    pub fn set_makeup_db(&mut self, makeup_db: f32) {
        self.makeup_gain
            .set_target(db_to_linear(makeup_db.clamp(-12.0, 12.0)));
    }

    /// Enable the 150 Hz sidechain high-pass filter.
    pub fn set_sidechain_hpf(&mut self, enabled: bool) {
        self.hpf_enabled = enabled;
    }

    /// Switch between L/R and mid/side operation.
    pub fn set_mid_side(&mut self, enabled: bool) {
        self.mid_side = enabled;
    }

    /// Set output saturation drive, 0..1.
    pub fn set_drive(&mut self, drive: f32) {
        self.drive = drive.clamp(0.0, 1.0);
    }

    /// Set the detector stereo link amount, 0..1.
    pub fn set_stereo_link(&mut self, link: f32) {
        self.stereo_link = link.clamp(0.0, 1.0);
    }

    /// Set the dry/wet blend, 0..1.
    pub fn set_mix(&mut self, mix: f32) {
        self.mix = mix.clamp(0.0, 1.0);
    }

    /// Most recent smoothed gain reduction in dB, 0 or negative.
    ///
    /// Cheap read-only snapshot for metering; a UI can poll this at its
    /// own refresh rate.
    pub fn gain_reduction_db(&self) -> f32 {
        -self.last_gain_reduction_db
    }

    fn update_sidechain_filters(&mut self) {
        let (b0, b1, b2, a0, a1, a2) = highpass_coefficients(
            SIDECHAIN_HPF_HZ,
            core::f32::consts::FRAC_1_SQRT_2,
            self.sample_rate,
        );
        self.sidechain_left.set_coefficients(b0, b1, b2, a0, a1, a2);
        self.sidechain_right.set_coefficients(b0, b1, b2, a0, a1, a2);
    }

    /// Static characteristic: positive dB of reduction requested for a
    /// detector level.
    fn reduction_target(&self, level_db: f32) -> f32 {
        if level_db <= self.threshold_db {
            0.0
        } else {
            (level_db - self.threshold_db) * (1.0 - 1.0 / self.ratio)
        }
    }

    /// Soft clip above the saturation corner with a drive-dependent level
    /// boost. Exactly transparent at zero drive.
    fn saturate(x: f32, drive: f32) -> f32 {
        let mut y = x;
        if x > SAT_THRESHOLD + SAT_KNEE {
            y = SAT_THRESHOLD + (x - SAT_THRESHOLD) / (1.0 + drive * (x - SAT_THRESHOLD));
        } else if x < -(SAT_THRESHOLD + SAT_KNEE) {
            y = -SAT_THRESHOLD + (x + SAT_THRESHOLD) / (1.0 + drive * fabsf(x + SAT_THRESHOLD));
        }
        y * (1.0 + drive * 0.3)
    }

    /// Draw a fresh idle-noise DC offset, applied to every sample of the
    /// following block.
    fn next_dc_offset(&mut self) {
        self.dc_offset = 1.0e-4
            * self.noise.next_unit()
            * sinf(core::f32::consts::TAU * self.noise.next_unit());
    }
}

impl Effect for BusCompressor {
    fn process(&mut self, input: f32) -> f32 {
        self.process_stereo(input, input).0
    }

    fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
        let (dry_l, dry_r) = (left, right);
        let (mut l, mut r) = if self.mid_side {
            ms_encode(left, right)
        } else {
            (left, right)
        };

        let (det_l, det_r) = if self.hpf_enabled {
            (self.sidechain_left.process(l), self.sidechain_right.process(r))
        } else {
            (l, r)
        };

        let level_l = linear_to_db(fabsf(det_l));
        let level_r = linear_to_db(fabsf(det_r));
        let linked = level_l.max(level_r);

        let target_l = self.reduction_target(lerp(level_l, linked, self.stereo_link));
        let target_r = self.reduction_target(lerp(level_r, linked, self.stereo_link));

        let reduction_l = self.ballistics_left.process(target_l);
        let reduction_r = self.ballistics_right.process(target_r);
        self.last_gain_reduction_db = reduction_l.max(reduction_r);

        let makeup = self.makeup_gain.advance();
        l *= db_to_linear(-reduction_l) * makeup;
        r *= db_to_linear(-reduction_r) * makeup;

        l = Self::saturate(l, self.drive);
        r = Self::saturate(r, self.drive);

        if self.mid_side {
            (l, r) = ms_decode(l, r);
        }

        (
            wet_dry_mix(dry_l, l, self.mix) + self.dc_offset,
            wet_dry_mix(dry_r, r, self.mix) + self.dc_offset,
        )
    }

    fn process_block_stereo(
        &mut self,
        left_in: &[f32],
        right_in: &[f32],
        left_out: &mut [f32],
        right_out: &mut [f32],
    ) {
        debug_assert_eq!(left_in.len(), right_in.len());
        debug_assert_eq!(left_in.len(), left_out.len());
        debug_assert_eq!(left_in.len(), right_out.len());

        self.next_dc_offset();
        for i in 0..left_in.len() {
            let (l, r) = self.process_stereo(left_in[i], right_in[i]);
            left_out[i] = l;
            right_out[i] = r;
        }
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.ballistics_left.set_sample_rate(sample_rate);
        self.ballistics_right.set_sample_rate(sample_rate);
        self.makeup_gain.set_sample_rate(sample_rate);
        self.update_sidechain_filters();
    }

    fn reset(&mut self) {
        self.ballistics_left.reset();
        self.ballistics_right.reset();
        self.sidechain_left.clear();
        self.sidechain_right.clear();
        self.makeup_gain.snap_to_target();
        self.dc_offset = 0.0;
        self.last_gain_reduction_db = 0.0;
    }
}

impl ParameterInfo for BusCompressor {
    fn param_count(&self) -> usize {
        10
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        match index {
            0 => Some(
                ParamDescriptor::gain_db("Threshold", "Thresh", -60.0, 0.0, -10.0)
                    .with_id(ParamId(1), "bus_threshold"),
            ),
            1 => Some(
                ParamDescriptor::custom("Ratio", "Ratio", 1.0, 20.0, 4.0)
                    .with_unit(ParamUnit::Ratio)
                    .with_id(ParamId(2), "bus_ratio"),
            ),
            2 => Some(
                ParamDescriptor::time_ms("Attack", "Attack", 0.1, 100.0, 10.0)
                    .with_id(ParamId(3), "bus_attack"),
            ),
            3 => Some(
                ParamDescriptor::time_ms("Release", "Release", 50.0, 3000.0, 300.0)
                    .with_id(ParamId(4), "bus_release"),
            ),
            4 => Some(
                ParamDescriptor::gain_db("Makeup", "Makeup", -12.0, 12.0, 0.0)
                    .with_id(ParamId(5), "bus_makeup"),
            ),
            5 => Some(
                ParamDescriptor::percent("Mix", "Mix", 100.0).with_id(ParamId(6), "bus_mix"),
            ),
            6 => Some(
                ParamDescriptor::percent("Drive", "Drive", 0.0).with_id(ParamId(7), "bus_drive"),
            ),
            7 => Some(
                ParamDescriptor::percent("Stereo Link", "Link", 100.0)
                    .with_id(ParamId(8), "bus_stereo_link"),
            ),
            8 => Some(
                ParamDescriptor::stepped("Sidechain HPF", "SC HPF", 1.0, 1.0)
                    .with_id(ParamId(9), "bus_sidechain_hpf"),
            ),
            9 => Some(
                ParamDescriptor::stepped("Mid/Side", "M/S", 1.0, 0.0)
                    .with_id(ParamId(10), "bus_mid_side"),
            ),
            _ => None,
        }
    }

    fn get_param(&self, index: usize) -> f32 {
        match index {
            0 => self.threshold_db,
            1 => self.ratio,
            2 => self.ballistics_left.attack_ms(),
            3 => self.ballistics_left.release_ms(),
            4 => linear_to_db(self.makeup_gain.target()),
            5 => self.mix * 100.0,
            6 => self.drive * 100.0,
            7 => self.stereo_link * 100.0,
            8 => f32::from(self.hpf_enabled),
            9 => f32::from(self.mid_side),
            _ => 0.0,
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        match index {
            0 => self.set_threshold_db(value),
            1 => self.set_ratio(value),
            2 => self.set_attack_ms(value),
            3 => self.set_release_ms(value),
            4 => self.set_makeup_db(value),
            5 => self.set_mix(value / 100.0),
            6 => self.set_drive(value / 100.0),
            7 => self.set_stereo_link(value / 100.0),
            8 => self.set_sidechain_hpf(value >= 0.5),
            9 => self.set_mid_side(value >= 0.5),
            _ => {}
        }
    }
}
