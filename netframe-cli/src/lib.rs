//! CLI interface for netframe
//!
//! This crate provides the command-line front end: argument parsing, frame
//! file persistence and the layer-by-layer narration printed while frames
//! are built and taken apart.

pub mod args;
pub mod commands;
pub mod report;

pub use args::{AddressArgs, Cli, Commands};
pub use commands::{load_frame, run, save_frame};
