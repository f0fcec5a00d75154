//! # Initial Conditions Module
//!
//! Builders for the initial configuration and velocity field of a run.
//!
//! ## Key Components
//!
//! - [`positions`] - Manual positions and face-centred cubic lattices
//! - [`velocities`] - Zero, manual, Gaussian and temperature-scaled velocities
//!
//! Every builder validates its own input and reports problems as [`InitError`], so the
//! simulation loop only ever receives dense, rectangular fields.

pub mod positions;
pub mod velocities;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum InitError {
    #[error("No particles were provided")]
    Empty,
    #[error("Row {row} has {found} components, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Unsupported number of dimensions: {0} (expected 1, 2 or 3)")]
    UnsupportedDimensions(usize),
    #[error(
        "Velocity field has shape {found:?}, expected ({num_particles}, {num_dimensions})"
    )]
    ShapeMismatch {
        num_particles: usize,
        num_dimensions: usize,
        found: (usize, usize),
    },
    #[error("Invalid lattice parameters: {0}")]
    InvalidLattice(String),
    #[error("Invalid velocity distribution: {0}")]
    InvalidDistribution(String),
}
