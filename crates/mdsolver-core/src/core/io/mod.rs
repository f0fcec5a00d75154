//! Writers for trajectory dumps and thermodynamic logs.
//!
//! Both writers are generic over [`std::io::Write`] so tests can capture their output in
//! memory, and both only ever read a [`SimulationState`](crate::core::models::state::SimulationState).
//! Column selection is expressed with the quantities in [`quantity`].

pub mod dump;
pub mod quantity;
pub mod thermo;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Output frequency must be at least one step")]
    InvalidFrequency,
    #[error("At least one output quantity must be requested")]
    NoQuantities,
    #[error("Quantity '{quantity}' is not available in a {num_dimensions}-dimensional system")]
    UnsupportedQuantity {
        quantity: &'static str,
        num_dimensions: usize,
    },
    #[error("Unknown output quantity: '{0}'")]
    UnknownQuantity(String),
}
