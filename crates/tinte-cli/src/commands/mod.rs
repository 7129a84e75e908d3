//! CLI subcommands.

pub mod common;
pub mod compress;
pub mod info;
pub mod master;
pub mod saturate;
