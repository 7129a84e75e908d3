//! Bus-compressor file processing command.

use crate::commands::common::{print_stats, process_file};
use crate::preset::{Preset, apply_params};
use anyhow::Context;
use clap::Args;
use std::path::PathBuf;
use tinte_effects::BusCompressor;
use tinte_io::{read_wav_stereo, write_wav_stereo};

#[derive(Args)]
pub struct CompressArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Threshold in dBFS
    #[arg(short, long, default_value = "-10", allow_hyphen_values = true)]
    threshold: f32,

    /// Compression ratio (n:1)
    #[arg(short, long, default_value = "4")]
    ratio: f32,

    /// Attack time in milliseconds
    #[arg(short, long, default_value = "10")]
    attack: f32,

    /// Release time in milliseconds
    #[arg(long, default_value = "300")]
    release: f32,

    /// Makeup gain in dB
    #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
    makeup: f32,

    /// Output saturation drive in percent (0-100)
    #[arg(short, long, default_value = "0")]
    drive: f32,

    /// Dry/wet mix in percent (0-100)
    #[arg(long, default_value = "100")]
    mix: f32,

    /// Stereo link amount in percent (0-100)
    #[arg(long, default_value = "100")]
    link: f32,

    /// Disable the 150 Hz sidechain high-pass filter
    #[arg(long)]
    no_hpf: bool,

    /// Compress in mid/side instead of left/right
    #[arg(long)]
    mid_side: bool,

    /// Preset file (TOML), applied before the flags above
    #[arg(long)]
    preset: Option<PathBuf>,
}

pub fn run(args: CompressArgs) -> anyhow::Result<()> {
    println!("Reading {}...", args.input.display());
    let (samples, spec) = read_wav_stereo(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let sample_rate = spec.sample_rate as f32;

    let mut comp = BusCompressor::new(sample_rate);
    if let Some(preset_path) = &args.preset {
        let preset = Preset::load(preset_path)?;
        println!("Loading preset: {}", preset.name);
        apply_params(&mut comp, &preset.compressor);
    }
    comp.set_threshold_db(args.threshold);
    comp.set_ratio(args.ratio);
    comp.set_attack_ms(args.attack);
    comp.set_release_ms(args.release);
    comp.set_makeup_db(args.makeup);
    comp.set_drive(args.drive / 100.0);
    comp.set_mix(args.mix / 100.0);
    comp.set_stereo_link(args.link / 100.0);
    comp.set_sidechain_hpf(!args.no_hpf);
    comp.set_mid_side(args.mid_side);
    comp.prepare(sample_rate);

    println!(
        "Compressing: threshold {} dB, ratio {}:1, attack {} ms, release {} ms...",
        args.threshold, args.ratio, args.attack, args.release
    );
    let output = process_file(&mut comp, &samples);

    println!("Final gain reduction: {:.1} dB", comp.gain_reduction_db());
    print_stats(&samples, &output);
    write_wav_stereo(&args.output, &output, spec)
        .with_context(|| format!("writing {}", args.output.display()))?;
    println!("Wrote {}", args.output.display());
    Ok(())
}
