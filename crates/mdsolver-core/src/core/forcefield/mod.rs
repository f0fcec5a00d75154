//! # Force Field Module
//!
//! This module evaluates inter-particle forces and potential energies for a configuration.
//!
//! ## Overview
//!
//! Forces are computed by brute force over all unordered pairs `(i, j)` with `j < i`,
//! visited with `i` ascending. Every pair contribution is added to particle `i` and
//! subtracted from particle `j`, so the force field always obeys Newton's third law.
//! In the default serial build this visiting order is fixed, which makes repeated
//! evaluations of the same configuration bit-identical.
//!
//! With the `parallel` feature enabled, rows are distributed over the rayon thread pool.
//! Each worker accumulates into a private force matrix and the partial matrices are summed
//! afterwards. The result is race-free but no longer bit-reproducible.
//!
//! ## Key Components
//!
//! - [`evaluator`] - The [`evaluator::PotentialEvaluator`] trait and its result type
//! - [`lennard_jones`] - Truncated, shifted Lennard-Jones potential with boundary-aware distances
//! - [`potentials`] - Scalar Lennard-Jones kernels shared by the evaluator and its tests
//!
//! ## Usage
//!
//! ```ignore
//! use mdsolver::core::boundary::BoundaryPolicy;
//! use mdsolver::core::forcefield::lennard_jones::LennardJones;
//! use mdsolver::core::forcefield::evaluator::PotentialEvaluator;
//!
//! let lj = LennardJones::new(3.0, BoundaryPolicy::periodic(12.0)?)?;
//! let evaluation = lj.evaluate(&positions, true);
//! println!("U = {:?}", evaluation.potential_energy);
//! ```

pub mod evaluator;
pub mod lennard_jones;
pub mod potentials;
