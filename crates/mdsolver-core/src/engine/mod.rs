//! # Engine Module
//!
//! The stateful layer of the solver. It owns the particle state for the duration of a run
//! and drives the integrator over a fixed number of steps.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Run parameters, initial-condition specs and the config builder
//! - **Simulation Loop** ([`simulation`]) - Seeding, stepping and observer notification
//! - **Observers** ([`observer`]) - Per-step hooks such as trajectory and thermo writers
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events
//! - **Error Handling** ([`error`]) - The umbrella [`error::EngineError`]
//!
//! All validation happens when a run is configured or constructed; once stepping starts,
//! only observers can fail.

pub mod config;
pub mod error;
pub mod observer;
pub mod progress;
pub mod simulation;
