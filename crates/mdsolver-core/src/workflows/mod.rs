//! # Workflows Module
//!
//! End-to-end entry points that turn a [`SimulationConfig`](crate::engine::config::SimulationConfig)
//! into a finished run.
//!
//! - **Simulation Workflow** ([`simulate`]) - Builds initial conditions, the potential and the
//!   configured output writers, then drives the simulation loop to completion.

pub mod simulate;
