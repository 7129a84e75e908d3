//! Stereo channel pair with input/output trim.

use tinte_core::{
    Effect, ParamDescriptor, ParamId, ParameterInfo, SmoothedParam, db_to_linear, linear_to_db,
};

use crate::curve::Character;
use crate::tone_shaper::{Model, ToneShaper};

/// Two [`ToneShaper`] channels behind smoothed input/output trim gains.
///
/// Both channels always share the same mode and processing amount; only
/// the filter state differs between them.
///
/// ## Parameter Indices (`ParameterInfo`)
///
/// | Index | Name | Range | Default |
/// |-------|------|-------|---------|
/// | 0 | Input Trim | -12.0–12.0 dB | 0.0 |
/// | 1 | Process | 0–100% | 0.0 |
/// | 2 | Output Trim | -12.0–12.0 dB | 0.0 |
/// | 3 | Character | 0–2 (stepped) | 0 |
/// | 4 | Model | 0–4 (stepped) | 0 |
pub struct ChannelPair {
    left: ToneShaper,
    right: ToneShaper,
    input_trim: SmoothedParam,
    output_trim: SmoothedParam,
}

impl Default for ChannelPair {
    fn default() -> Self {
        Self::new(48000.0)
    }
}

impl ChannelPair {
    /// Create a new channel pair at unity trim and zero processing.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            left: ToneShaper::new(sample_rate),
            right: ToneShaper::new(sample_rate),
            input_trim: SmoothedParam::standard(1.0, sample_rate),
            output_trim: SmoothedParam::standard(1.0, sample_rate),
        }
    }

    /// Select the voicing for both channels.
    pub fn set_mode(&mut self, character: Character, model: Model) {
        self.left.set_mode(character, model);
        self.right.set_mode(character, model);
    }

    /// Set the processing amount for both channels, normalized 0..1.
    pub fn set_processing(&mut self, amount: f32) {
        self.left.set_processing(amount);
        self.right.set_processing(amount);
    }

    /// Set input trim in decibels.
    pub fn set_input_trim_db(&mut self, db: f32) {
        self.input_trim.set_target(db_to_linear(db.clamp(-12.0, 12.0)));
    }

    /// Set output trim in decibels.
    pub fn set_output_trim_db(&mut self, db: f32) {
        self.output_trim.set_target(db_to_linear(db.clamp(-12.0, 12.0)));
    }

    /// Current character family.
    pub fn character(&self) -> Character {
        self.left.character()
    }

    /// Current model preset.
    pub fn model(&self) -> Model {
        self.left.model()
    }
}

impl Effect for ChannelPair {
    fn process(&mut self, input: f32) -> f32 {
        let in_gain = self.input_trim.advance();
        let out_gain = self.output_trim.advance();
        self.left.process(input * in_gain) * out_gain
    }

    fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
        // Trims advance once per frame so both channels see the same gain.
        let in_gain = self.input_trim.advance();
        let out_gain = self.output_trim.advance();
        let l = self.left.process(left * in_gain) * out_gain;
        let r = self.right.process(right * in_gain) * out_gain;
        (l, r)
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.left.set_sample_rate(sample_rate);
        self.right.set_sample_rate(sample_rate);
        self.input_trim.set_sample_rate(sample_rate);
        self.output_trim.set_sample_rate(sample_rate);
    }

    fn reset(&mut self) {
        self.left.reset();
        self.right.reset();
        self.input_trim.snap_to_target();
        self.output_trim.snap_to_target();
    }
}

impl ParameterInfo for ChannelPair {
    fn param_count(&self) -> usize {
        5
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        match index {
            0 => Some(
                ParamDescriptor::gain_db("Input Trim", "InTrim", -12.0, 12.0, 0.0)
                    .with_id(ParamId(1), "pair_input_trim"),
            ),
            1 => Some(
                ParamDescriptor::percent("Process", "Process", 0.0)
                    .with_id(ParamId(2), "pair_process"),
            ),
            2 => Some(
                ParamDescriptor::gain_db("Output Trim", "OutTrim", -12.0, 12.0, 0.0)
                    .with_id(ParamId(3), "pair_output_trim"),
            ),
            3 => Some(
                ParamDescriptor::stepped("Character", "Char", 2.0, 0.0)
                    .with_id(ParamId(4), "pair_character"),
            ),
            4 => Some(
                ParamDescriptor::stepped("Model", "Model", 4.0, 0.0)
                    .with_id(ParamId(5), "pair_model"),
            ),
            _ => None,
        }
    }

    fn get_param(&self, index: usize) -> f32 {
        match index {
            0 => linear_to_db(self.input_trim.target()),
            1 => self.left.processing() * 100.0,
            2 => linear_to_db(self.output_trim.target()),
            3 => self.character().index() as f32,
            4 => self.model().index() as f32,
            _ => 0.0,
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        match index {
            0 => self.set_input_trim_db(value),
            1 => self.set_processing(value / 100.0),
            2 => self.set_output_trim_db(value),
            3 => {
                let character = Character::from_index(value.clamp(0.0, 2.0) as usize);
                self.set_mode(character, self.model());
            }
            4 => {
                let model = Model::from_index(value.clamp(0.0, 4.0) as usize);
                self.set_mode(self.character(), model);
            }
            _ => {}
        }
    }
}
