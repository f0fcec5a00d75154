use super::evaluator::{ForceEvaluation, PotentialEvaluator};
use super::potentials;
use crate::core::boundary::BoundaryPolicy;
use crate::core::models::fields::{self, Forces, MAX_DIMENSIONS, Positions};
use std::fmt;
use thiserror::Error;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

pub const DEFAULT_CUTOFF: f64 = 3.0;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum PotentialError {
    #[error("Cutoff radius must be finite and strictly positive (got {0})")]
    InvalidCutoff(f64),
}

/// Truncated and shifted Lennard-Jones pair potential in reduced units.
///
/// Pair displacements are corrected with the bound boundary policy before the
/// cutoff test, so periodic systems interact through their nearest images.
#[derive(Debug, Clone, PartialEq)]
pub struct LennardJones {
    cutoff: f64,
    cutoff_sqrd: f64,
    energy_shift: f64,
    boundary: BoundaryPolicy,
}

struct PairTerm {
    force: [f64; MAX_DIMENSIONS],
    r6: f64,
    r12: f64,
}

impl LennardJones {
    pub fn new(cutoff: f64, boundary: BoundaryPolicy) -> Result<Self, PotentialError> {
        if !(cutoff.is_finite() && cutoff > 0.0) {
            return Err(PotentialError::InvalidCutoff(cutoff));
        }
        let cutoff_sqrd = cutoff * cutoff;
        Ok(Self {
            cutoff,
            cutoff_sqrd,
            energy_shift: potentials::energy_shift(cutoff_sqrd),
            boundary,
        })
    }

    pub fn with_default_cutoff(boundary: BoundaryPolicy) -> Self {
        let cutoff_sqrd = DEFAULT_CUTOFF * DEFAULT_CUTOFF;
        Self {
            cutoff: DEFAULT_CUTOFF,
            cutoff_sqrd,
            energy_shift: potentials::energy_shift(cutoff_sqrd),
            boundary,
        }
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    pub fn boundary(&self) -> &BoundaryPolicy {
        &self.boundary
    }

    #[inline]
    fn pair_term(&self, positions: &Positions, i: usize, j: usize) -> Option<PairTerm> {
        let dim = positions.ncols();
        let mut dr = [0.0; MAX_DIMENSIONS];
        for (d, component) in dr.iter_mut().enumerate().take(dim) {
            *component = positions[(i, d)] - positions[(j, d)];
        }
        self.boundary.check_distance(&mut dr[..dim]);

        let dist_sqrd: f64 = dr[..dim].iter().map(|c| c * c).sum();
        if dist_sqrd >= self.cutoff_sqrd {
            return None;
        }

        let (r6, r12) = potentials::inverse_powers(dist_sqrd);
        let scale = potentials::lennard_jones_force_scale(dist_sqrd, r6, r12);
        let mut force = [0.0; MAX_DIMENSIONS];
        for d in 0..dim {
            force[d] = scale * dr[d];
        }
        Some(PairTerm { force, r6, r12 })
    }

    /// Adds the contributions of all pairs `(i, j)` with `j < i` for one row `i`.
    #[inline]
    fn accumulate_row(
        &self,
        positions: &Positions,
        i: usize,
        forces: &mut Forces,
        energy: &mut f64,
        compute_energy: bool,
    ) {
        let dim = positions.ncols();
        for j in 0..i {
            let Some(term) = self.pair_term(positions, i, j) else {
                continue;
            };
            for d in 0..dim {
                forces[(i, d)] += term.force[d];
                forces[(j, d)] -= term.force[d];
            }
            if compute_energy {
                *energy += potentials::lennard_jones_energy(term.r6, term.r12) - self.energy_shift;
            }
        }
    }
}

impl PotentialEvaluator for LennardJones {
    fn evaluate(&self, positions: &Positions, compute_energy: bool) -> ForceEvaluation {
        let (num_particles, num_dimensions) = positions.shape();
        debug_assert!(
            fields::is_supported_dimension(num_dimensions),
            "unsupported dimensionality {num_dimensions}"
        );

        #[cfg(not(feature = "parallel"))]
        let (forces, energy) = {
            let mut forces = Forces::zeros(num_particles, num_dimensions);
            let mut energy = 0.0;
            for i in 0..num_particles {
                self.accumulate_row(positions, i, &mut forces, &mut energy, compute_energy);
            }
            (forces, energy)
        };

        #[cfg(feature = "parallel")]
        let (forces, energy) = (0..num_particles)
            .into_par_iter()
            .fold(
                || (Forces::zeros(num_particles, num_dimensions), 0.0),
                |(mut forces, mut energy), i| {
                    self.accumulate_row(positions, i, &mut forces, &mut energy, compute_energy);
                    (forces, energy)
                },
            )
            .reduce(
                || (Forces::zeros(num_particles, num_dimensions), 0.0),
                |(forces_a, energy_a), (forces_b, energy_b)| {
                    (forces_a + forces_b, energy_a + energy_b)
                },
            );

        ForceEvaluation {
            forces,
            potential_energy: compute_energy.then_some(energy),
        }
    }

    fn distance_boundary(&self) -> Option<&BoundaryPolicy> {
        Some(&self.boundary)
    }
}

impl fmt::Display for LennardJones {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lennard-Jones potential (cutoff {})", self.cutoff)
    }
}
