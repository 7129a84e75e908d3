//! Tone-shaper file processing command.

use crate::commands::common::{print_stats, process_file};
use crate::preset::{Preset, apply_params};
use anyhow::Context;
use clap::Args;
use std::path::PathBuf;
use tinte_core::Effect;
use tinte_effects::{ChannelPair, Character, Model};
use tinte_io::{read_wav_stereo, write_wav_stereo};

#[derive(Args)]
pub struct SaturateArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Character family: opal, gold, or sapphire
    #[arg(short, long, default_value = "opal")]
    character: String,

    /// Model preset index (0-4)
    #[arg(short, long, default_value = "0")]
    model: usize,

    /// Processing amount in percent (0-100)
    #[arg(short, long, default_value = "50")]
    process: f32,

    /// Input trim in dB
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    input_trim: f32,

    /// Output trim in dB
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    output_trim: f32,

    /// Preset file (TOML), applied before the flags above
    #[arg(long)]
    preset: Option<PathBuf>,
}

fn parse_character(name: &str) -> anyhow::Result<Character> {
    match name.to_ascii_lowercase().as_str() {
        "opal" => Ok(Character::Opal),
        "gold" => Ok(Character::Gold),
        "sapphire" => Ok(Character::Sapphire),
        other => anyhow::bail!("unknown character '{other}' (expected opal, gold, or sapphire)"),
    }
}

pub fn run(args: SaturateArgs) -> anyhow::Result<()> {
    println!("Reading {}...", args.input.display());
    let (samples, spec) = read_wav_stereo(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let sample_rate = spec.sample_rate as f32;

    let mut pair = ChannelPair::new(sample_rate);
    if let Some(preset_path) = &args.preset {
        let preset = Preset::load(preset_path)?;
        println!("Loading preset: {}", preset.name);
        apply_params(&mut pair, &preset.saturator);
    }
    pair.set_mode(parse_character(&args.character)?, Model::from_index(args.model));
    pair.set_processing(args.process / 100.0);
    pair.set_input_trim_db(args.input_trim);
    pair.set_output_trim_db(args.output_trim);
    pair.reset();

    println!(
        "Saturating: {:?}/{:?} at {}%...",
        pair.character(),
        pair.model(),
        args.process
    );
    let output = process_file(&mut pair, &samples);

    print_stats(&samples, &output);
    write_wav_stereo(&args.output, &output, spec)
        .with_context(|| format!("writing {}", args.output.display()))?;
    println!("Wrote {}", args.output.display());
    Ok(())
}
