//! # Core Models Module
//!
//! This module contains the data structures that describe a particle system while it is
//! being integrated: the dense per-particle fields and the simulation state that bundles them.
//!
//! ## Overview
//!
//! Every per-particle quantity (positions, velocities, forces) is stored as a dense
//! `particles × dimensions` matrix with one row per particle. The row index of a particle
//! never changes during a run, and neither does the number of particles or dimensions.
//!
//! ## Key Components
//!
//! - [`fields`] - Matrix aliases for positions, velocities and forces plus shape helpers
//! - [`state`] - The [`state::SimulationState`] owned by the simulation loop
//!
//! ## Usage
//!
//! ```ignore
//! use mdsolver::core::models::fields::Positions;
//!
//! let positions = Positions::from_row_slice(2, 1, &[0.0, 1.5]);
//! assert_eq!(positions.nrows(), 2);
//! ```

pub mod fields;
pub mod state;
