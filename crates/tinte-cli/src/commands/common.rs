//! Shared helpers for file-processing commands.

use indicatif::{ProgressBar, ProgressStyle};
use tinte_core::{Effect, linear_to_db};
use tinte_io::StereoSamples;

/// Processing block size for file commands.
pub const BLOCK_SIZE: usize = 512;

/// Standard progress bar for sample processing.
pub fn progress_bar(total_frames: u64) -> ProgressBar {
    let pb = ProgressBar::new(total_frames);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .unwrap()
            .progress_chars("##-"),
    );
    pb
}

/// Run a stereo effect over a whole file block by block.
pub fn process_file(effect: &mut impl Effect, input: &StereoSamples) -> StereoSamples {
    let frames = input.len();
    let mut output = StereoSamples::new(vec![0.0; frames], vec![0.0; frames]);

    let pb = progress_bar(frames as u64);
    let mut position = 0;
    while position < frames {
        let end = (position + BLOCK_SIZE).min(frames);
        effect.process_block_stereo(
            &input.left[position..end],
            &input.right[position..end],
            &mut output.left[position..end],
            &mut output.right[position..end],
        );
        position = end;
        pb.set_position(position as u64);
    }
    pb.finish_with_message("done");

    output
}

fn rms(samples: &StereoSamples) -> f32 {
    let frames = samples.len();
    if frames == 0 {
        return 0.0;
    }
    let sum: f32 = samples
        .left
        .iter()
        .zip(samples.right.iter())
        .map(|(l, r)| l * l + r * r)
        .sum();
    (sum / (2.0 * frames as f32)).sqrt()
}

fn peak(samples: &StereoSamples) -> f32 {
    samples
        .left
        .iter()
        .chain(samples.right.iter())
        .fold(0.0f32, |acc, &s| acc.max(s.abs()))
}

/// Print input/output level statistics.
pub fn print_stats(input: &StereoSamples, output: &StereoSamples) {
    println!("\nStats:");
    println!(
        "  Input:  RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(rms(input)),
        linear_to_db(peak(input))
    );
    println!(
        "  Output: RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(rms(output)),
        linear_to_db(peak(output))
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinte_effects::{ChannelPair, Character, Model};

    #[test]
    fn process_file_preserves_length() {
        let mut pair = ChannelPair::new(48000.0);
        pair.set_mode(Character::Gold, Model::Luminescent);
        pair.set_processing(0.5);

        // Length deliberately not a multiple of the block size.
        let frames = BLOCK_SIZE * 3 + 17;
        let input = StereoSamples::new(vec![0.25; frames], vec![-0.25; frames]);
        let output = process_file(&mut pair, &input);
        assert_eq!(output.len(), frames);
        assert!(output.left.iter().all(|s| s.is_finite()));
    }
}
