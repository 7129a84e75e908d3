//! Full mastering chain: tone shaper pair into bus compressor.

use crate::commands::common::{print_stats, process_file};
use crate::preset::{Preset, apply_params};
use anyhow::Context;
use clap::Args;
use std::path::PathBuf;
use tinte_core::EffectExt;
use tinte_effects::{BusCompressor, ChannelPair};
use tinte_io::{read_wav_stereo, write_wav_stereo};

#[derive(Args)]
pub struct MasterArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Preset file (TOML) with saturator and compressor sections
    #[arg(short, long)]
    preset: PathBuf,
}

pub fn run(args: MasterArgs) -> anyhow::Result<()> {
    println!("Reading {}...", args.input.display());
    let (samples, spec) = read_wav_stereo(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let sample_rate = spec.sample_rate as f32;

    let preset = Preset::load(&args.preset)?;
    println!("Loading preset: {}", preset.name);

    let mut pair = ChannelPair::new(sample_rate);
    apply_params(&mut pair, &preset.saturator);

    let mut comp = BusCompressor::new(sample_rate);
    apply_params(&mut comp, &preset.compressor);
    comp.prepare(sample_rate);

    let mut chain = pair.chain(comp);
    println!("Mastering...");
    let output = process_file(&mut chain, &samples);

    println!(
        "Final gain reduction: {:.1} dB",
        chain.second().gain_reduction_db()
    );
    print_stats(&samples, &output);
    write_wav_stereo(&args.output, &output, spec)
        .with_context(|| format!("writing {}", args.output.display()))?;
    println!("Wrote {}", args.output.display());
    Ok(())
}
