//! # Core Module
//!
//! Stateless building blocks of the solver: field types and the simulation state, the
//! Lennard-Jones force field, boundary policies, time integrators, initial-condition
//! builders and output writers.
//!
//! ## Architecture
//!
//! - **Data** ([`models`]) - Dense per-particle fields and the read-only [`models::state::SimulationState`]
//! - **Forces** ([`forcefield`]) - The potential evaluator trait and the truncated Lennard-Jones potential
//! - **Boundaries** ([`boundary`]) - Open, reflective and periodic policies
//! - **Integration** ([`integrator`]) - Euler-Cromer and Velocity-Verlet schemes
//! - **Initial conditions** ([`init`]) - Position and velocity builders
//! - **Output** ([`io`]) - Trajectory dumps and thermo logs
//!
//! Nothing in this layer owns a run; the loop that ties these pieces together lives in
//! [`crate::engine`].

pub mod boundary;
pub mod forcefield;
pub mod init;
pub mod integrator;
pub mod io;
pub mod models;
