//! Tinte Core - DSP primitives for the tinte analog-color signal path.
//!
//! This crate provides the building blocks shared by the saturation and
//! dynamics engines in `tinte-effects`, designed for real-time processing
//! with zero allocation in the audio path.
//!
//! # Core Abstractions
//!
//! - [`Effect`] - Object-safe trait for all audio processors
//! - [`Chain`] - Static-dispatch effect chain combinator
//! - [`SmoothedParam`] - Exponential parameter smoothing (zipper-free)
//! - [`Ballistics`] - Asymmetric attack/release envelope smoother
//! - [`Biquad`] - Second-order IIR with RBJ high-pass coefficients
//! - [`Xorshift32`] - Allocation-free PRNG for analog idle-noise emulation
//! - [`ParameterInfo`] - Parameter introspection for hosts and presets
//!
//! # Utilities
//!
//! Math helpers: [`db_to_linear`], [`linear_to_db`], [`ms_encode`],
//! [`ms_decode`], [`flush_denormal`], [`wet_dry_mix`].
//!
//! # no_std Support
//!
//! Disable the default `std` feature for embedded targets:
//!
//! ```toml
//! [dependencies]
//! tinte-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: no allocations, locks, or logging in audio paths
//! - **No dependency on std**: pure `no_std` with `libm` for math
//! - **Coefficients swapped as units**: mode changes replace whole Copy
//!   bundles so a render call never observes a torn coefficient mix

#![cfg_attr(not(feature = "std"), no_std)]

pub mod ballistics;
pub mod biquad;
pub mod effect;
pub mod math;
pub mod noise;
pub mod param;
pub mod param_info;

// Re-export main types at crate root
pub use ballistics::Ballistics;
pub use biquad::{Biquad, highpass_coefficients};
pub use effect::{Chain, Effect, EffectExt};
pub use math::{
    db_to_linear, flush_denormal, lerp, linear_to_db, mono_sum, ms_decode, ms_encode, wet_dry_mix,
};
pub use noise::Xorshift32;
pub use param::SmoothedParam;
pub use param_info::{ParamDescriptor, ParamFlags, ParamId, ParamScale, ParamUnit, ParameterInfo};
