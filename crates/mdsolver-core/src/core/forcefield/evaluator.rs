use crate::core::boundary::BoundaryPolicy;
use crate::core::models::fields::{Forces, Positions};
use std::fmt;

/// Forces and, on request, the potential energy of one configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ForceEvaluation {
    pub forces: Forces,
    /// `None` unless energy was requested from [`PotentialEvaluator::evaluate`].
    pub potential_energy: Option<f64>,
}

/// Computes per-particle forces for a configuration.
///
/// Implementations are stateless between calls: the result depends only on the
/// positions passed in and the evaluator's fixed parameters.
pub trait PotentialEvaluator: fmt::Display {
    /// Positions must have between one and three columns.
    fn evaluate(&self, positions: &Positions, compute_energy: bool) -> ForceEvaluation;

    /// Boundary policy used to measure pair distances, for evaluators that depend on one.
    ///
    /// [`Simulation::run`](crate::engine::simulation::Simulation::run) refuses to pair an
    /// evaluator with a simulation integrating under a different policy.
    fn distance_boundary(&self) -> Option<&BoundaryPolicy> {
        None
    }
}
