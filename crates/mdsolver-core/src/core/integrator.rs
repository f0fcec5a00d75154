//! Time-stepping schemes.
//!
//! Both integrators evaluate the potential exactly once per step and reuse the forces of
//! the previous step as `a_old`. They keep no state between calls.

use super::boundary::BoundaryPolicy;
use super::forcefield::evaluator::{ForceEvaluation, PotentialEvaluator};
use super::models::fields::{Forces, Positions, Velocities};
use serde::Deserialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Integrator {
    /// Semi-implicit Euler: first order, velocity updated before position.
    #[serde(alias = "euler-chromer")]
    EulerCromer,
    /// Second order, time reversible and symplectic.
    #[default]
    VelocityVerlet,
}

/// Borrowed view of the state an integrator advances from.
#[derive(Debug, Clone, Copy)]
pub struct StepInput<'a> {
    pub positions: &'a Positions,
    pub velocities: &'a Velocities,
    /// Forces evaluated at `positions` by the previous step.
    pub accelerations: &'a Forces,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StepOutput {
    pub positions: Positions,
    pub velocities: Velocities,
    pub accelerations: Forces,
    pub potential_energy: Option<f64>,
}

impl Integrator {
    pub fn advance(
        &self,
        input: StepInput<'_>,
        evaluator: &dyn PotentialEvaluator,
        boundary: &BoundaryPolicy,
        dt: f64,
        compute_energy: bool,
    ) -> StepOutput {
        match self {
            Self::EulerCromer => euler_cromer(input, evaluator, boundary, dt, compute_energy),
            Self::VelocityVerlet => velocity_verlet(input, evaluator, boundary, dt, compute_energy),
        }
    }
}

impl fmt::Display for Integrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EulerCromer => write!(f, "Euler-Cromer"),
            Self::VelocityVerlet => write!(f, "Velocity-Verlet"),
        }
    }
}

fn euler_cromer(
    input: StepInput<'_>,
    evaluator: &dyn PotentialEvaluator,
    boundary: &BoundaryPolicy,
    dt: f64,
    compute_energy: bool,
) -> StepOutput {
    let velocities = input.velocities + input.accelerations * dt;
    let raw_positions = input.positions + &velocities * dt;

    let positions = boundary.check_position(&raw_positions);
    let velocities = boundary.check_velocity(velocities, &raw_positions);

    let ForceEvaluation {
        forces,
        potential_energy,
    } = evaluator.evaluate(&positions, compute_energy);

    StepOutput {
        positions,
        velocities,
        accelerations: forces,
        potential_energy,
    }
}

fn velocity_verlet(
    input: StepInput<'_>,
    evaluator: &dyn PotentialEvaluator,
    boundary: &BoundaryPolicy,
    dt: f64,
    compute_energy: bool,
) -> StepOutput {
    let raw_positions =
        input.positions + input.velocities * dt + input.accelerations * (0.5 * dt * dt);
    let positions = boundary.check_position(&raw_positions);

    let ForceEvaluation {
        forces,
        potential_energy,
    } = evaluator.evaluate(&positions, compute_energy);

    let raw_velocities = input.velocities + (input.accelerations + &forces) * (0.5 * dt);
    let velocities = boundary.check_velocity(raw_velocities, &raw_positions);

    StepOutput {
        positions,
        velocities,
        accelerations: forces,
        potential_energy,
    }
}
