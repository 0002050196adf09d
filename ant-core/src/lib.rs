//! Core of the ant path demo: a random layered path graph and the ants
//! that walk it.
//!
//! Main components:
//! - [`graph`]: joints, the joint arena and drawable segments.
//! - [`generator`]: builds a [`generator::PathSystem`] from a grid shape.
//! - [`ant`]: ant particles and their branch routing.
//! - [`animation`]: the per-frame driver (spawning, sweeping, FPS).
//! - [`fps`]: smoothed frames-per-second estimate and its readout.
//! - [`config`]: every tunable, its bounds and JSON persistence.
//! - [`error`]: errors from loading or saving a config.
//! - [`random`]: closed-range integer sampling.
//! - [`types`]: shared type aliases and IDs.

pub mod animation;
pub mod ant;
pub mod config;
pub mod error;
pub mod fps;
pub mod generator;
pub mod graph;
pub mod random;
pub mod types;
