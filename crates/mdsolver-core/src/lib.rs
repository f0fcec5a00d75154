//! # mdsolver Core Library
//!
//! A small, deterministic molecular dynamics engine for point particles interacting through
//! a truncated Lennard-Jones potential in reduced units.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture.
//!
//! - **[`core`]: The Foundation.** Stateless data and math: dense particle fields,
//!   boundary policies, the Lennard-Jones force field, the Euler-Cromer and Velocity-Verlet
//!   integrators, initial-condition builders and output writers.
//!
//! - **[`engine`]: The Logic Core.** The stateful [`engine::simulation::Simulation`] that
//!   owns the particle state, drives a fixed number of steps and notifies observers, together
//!   with its configuration, progress reporting and error types.
//!
//! - **[`workflows`]: The Public API.** Turns a validated configuration into a finished run,
//!   including trajectory and thermo output.
//!
//! The pairwise force loop is serial and bit-reproducible by default. Enabling the
//! `parallel` feature distributes it over the rayon thread pool.

pub mod core;
pub mod engine;
pub mod workflows;
