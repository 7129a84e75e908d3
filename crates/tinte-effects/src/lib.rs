//! Tinte Effects - Saturation and bus dynamics
//!
//! This crate provides the tinte color processors built on tinte-core:
//!
//! - [`ToneShaper`] - Per-channel nonlinear drive core with filter shaping
//! - [`Character`] - Stateless saturation curve families
//! - [`ChannelPair`] - Stereo pair of tone shapers with trim gains
//! - [`BusCompressor`] - Linked-detector bus compressor with sidechain HPF,
//!   mid/side operation, and a console-style output saturation stage
//!
//! ## Example
//!
//! ```rust,ignore
//! use tinte_core::Effect;
//! use tinte_effects::{Character, ChannelPair, Model};
//!
//! let mut pair = ChannelPair::new(48000.0);
//! pair.set_mode(Character::Gold, Model::Luminescent);
//! pair.set_processing(0.5);
//!
//! let (out_l, out_r) = pair.process_stereo(in_l, in_r);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod bus_compressor;
pub mod channel_pair;
pub mod curve;
pub mod tone_shaper;

// Re-export main types at crate root
pub use bus_compressor::BusCompressor;
pub use channel_pair::ChannelPair;
pub use curve::Character;
pub use tone_shaper::{Model, ToneShaper};
