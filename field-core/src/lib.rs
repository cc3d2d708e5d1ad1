//! Core 2-D particle field simulation library.
//!
//! Main components:
//! - [`particle`] — individual particles and their random generation.
//! - [`field`] — the particle population, viewport bounds, and pointer state.
//! - [`config`] — tuning parameters and the built-in presets.
//! - [`connections`] — per-frame buffer of lines between nearby particles.
//! - [`phases`] — the per-tick update pipeline.
//! - [`error`] — configuration validation errors.
//! - [`types`] — shared type aliases.

pub mod config;
pub mod connections;
pub mod error;
pub mod field;
pub mod particle;
pub mod phases;
pub mod types;
