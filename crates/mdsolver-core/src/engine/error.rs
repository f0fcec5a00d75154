use thiserror::Error;

use super::config::ConfigError;
use crate::core::boundary::{BoundaryError, BoundaryPolicy};
use crate::core::forcefield::lennard_jones::PotentialError;
use crate::core::init::InitError;
use crate::core::io::OutputError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid boundary: {0}")]
    Boundary(#[from] BoundaryError),

    #[error("Invalid potential: {0}")]
    Potential(#[from] PotentialError),

    #[error("Failed to build initial conditions: {0}")]
    Init(#[from] InitError),

    #[error("Failed to set up output: {0}")]
    OutputSetup(#[from] OutputError),

    #[error("Evaluator measures distances with {evaluator} but the simulation uses {simulation}")]
    BoundaryMismatch {
        simulation: BoundaryPolicy,
        evaluator: BoundaryPolicy,
    },

    #[error("Output failed at step {step}: {source}")]
    Output {
        step: usize,
        #[source]
        source: OutputError,
    },
}
