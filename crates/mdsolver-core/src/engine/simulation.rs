use super::config::{ConfigError, validate_times};
use super::error::EngineError;
use super::observer::Observer;
use super::progress::{Progress, ProgressReporter};
use crate::core::boundary::BoundaryPolicy;
use crate::core::forcefield::evaluator::{ForceEvaluation, PotentialEvaluator};
use crate::core::integrator::{Integrator, StepInput, StepOutput};
use crate::core::models::fields::{self, Positions, Velocities};
use crate::core::models::state::SimulationState;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, trace, warn};

/// Totals reported once a run has finished.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub steps: usize,
    pub elapsed: Duration,
    pub final_time: f64,
    pub kinetic_energy: f64,
    /// Potential energy of the final configuration, when it was evaluated.
    pub potential_energy: Option<f64>,
    pub total_energy: Option<f64>,
}

/// Owns the particle state of one run and advances it a fixed number of steps.
#[derive(Debug, Clone)]
pub struct Simulation {
    state: SimulationState,
    boundary: BoundaryPolicy,
    total_time: f64,
    num_steps: usize,
    seeded: bool,
    diverged: bool,
}

impl Simulation {
    /// Validates the initial conditions and prepares the state at step zero.
    ///
    /// # Arguments
    ///
    /// * `positions` - Initial configuration, one row per particle.
    /// * `velocities` - Initial velocities; all zero when `None`.
    /// * `boundary` - Policy applied to the advanced positions and velocities.
    /// * `total_time` - Simulated time span `T`.
    /// * `timestep` - Integration timestep `dt`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the system is empty, has an unsupported dimensionality,
    /// contains non-finite values, or if the times do not describe at least one step.
    pub fn new(
        positions: Positions,
        velocities: Option<Velocities>,
        boundary: BoundaryPolicy,
        total_time: f64,
        timestep: f64,
    ) -> Result<Self, ConfigError> {
        let (num_particles, num_dimensions) = positions.shape();
        if num_particles == 0 {
            return Err(ConfigError::EmptyConfiguration);
        }
        if !fields::is_supported_dimension(num_dimensions) {
            return Err(ConfigError::UnsupportedDimensions(num_dimensions));
        }

        let velocities =
            velocities.unwrap_or_else(|| Velocities::zeros(num_particles, num_dimensions));
        if !fields::same_shape(&positions, &velocities) {
            return Err(ConfigError::ShapeMismatch {
                positions: positions.shape(),
                velocities: velocities.shape(),
            });
        }
        if !fields::all_finite(&positions) {
            return Err(ConfigError::NonFiniteInput("positions"));
        }
        if !fields::all_finite(&velocities) {
            return Err(ConfigError::NonFiniteInput("velocities"));
        }
        validate_times(total_time, timestep)?;

        let num_steps = (total_time / timestep).floor() as usize;
        Ok(Self {
            state: SimulationState::new(positions, velocities, timestep),
            boundary,
            total_time,
            num_steps,
            seeded: false,
            diverged: false,
        })
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn boundary(&self) -> &BoundaryPolicy {
        &self.boundary
    }

    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    /// Number of steps a full [`Simulation::run`] performs, `⌊T / dt⌋`.
    pub fn num_steps(&self) -> usize {
        self.num_steps
    }

    pub fn steps_remaining(&self) -> usize {
        self.num_steps.saturating_sub(self.state.step())
    }

    pub fn into_state(self) -> SimulationState {
        self.state
    }

    /// Evaluates the forces of the current configuration without advancing time.
    pub fn seed(&mut self, evaluator: &dyn PotentialEvaluator, compute_energy: bool) {
        let ForceEvaluation {
            forces,
            potential_energy,
        } = evaluator.evaluate(self.state.positions(), compute_energy);
        self.state.seed(forces, potential_energy);
        self.seeded = true;
    }

    /// Advances the state by a single step, seeding the forces first if needed.
    ///
    /// This ignores the step budget of the run so callers can stop or continue on their own
    /// terms. Unlike [`Simulation::run`] it does not compare the evaluator's boundary with
    /// the simulation's.
    pub fn step_once(
        &mut self,
        evaluator: &dyn PotentialEvaluator,
        integrator: Integrator,
        compute_energy: bool,
    ) -> &SimulationState {
        if !self.seeded {
            self.seed(evaluator, compute_energy);
        }

        let StepOutput {
            positions,
            velocities,
            accelerations,
            potential_energy,
        } = integrator.advance(
            StepInput {
                positions: self.state.positions(),
                velocities: self.state.velocities(),
                accelerations: self.state.accelerations(),
            },
            evaluator,
            &self.boundary,
            self.state.timestep(),
            compute_energy,
        );
        self.state
            .commit_step(positions, velocities, accelerations, potential_energy);
        trace!(step = self.state.step(), "Step completed.");

        if !self.diverged && !self.state.is_finite() {
            self.diverged = true;
            warn!(
                step = self.state.step(),
                "State contains non-finite values; the timestep is likely too large."
            );
        }

        &self.state
    }

    /// Runs all remaining steps, notifying every observer after each one.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::BoundaryMismatch`] before any work if the evaluator measures
    /// distances under a different boundary policy, and [`EngineError::Output`] as soon as
    /// an observer fails. The state is left as it was after the step that triggered the
    /// failure.
    #[instrument(skip_all, name = "simulation_run", fields(steps = self.num_steps))]
    pub fn run(
        &mut self,
        evaluator: &dyn PotentialEvaluator,
        integrator: Integrator,
        observers: &mut [&mut dyn Observer],
        reporter: &ProgressReporter,
    ) -> Result<RunSummary, EngineError> {
        if let Some(&evaluator_boundary) = evaluator
            .distance_boundary()
            .filter(|&boundary| *boundary != self.boundary)
        {
            return Err(EngineError::BoundaryMismatch {
                simulation: self.boundary,
                evaluator: evaluator_boundary,
            });
        }

        let compute_energy = observers.iter().any(|o| o.needs_potential_energy());
        debug!(
            observers = observers.len(),
            compute_energy, "Seeding initial forces."
        );
        if !self.seeded || (compute_energy && self.state.potential_energy().is_none()) {
            self.seed(evaluator, compute_energy);
        }

        let remaining = self.steps_remaining();
        info!(
            "Running {} steps with {} and {}.",
            remaining, integrator, evaluator
        );
        reporter.report(Progress::RunStart {
            total_steps: remaining as u64,
        });

        let start = Instant::now();
        for _ in 0..remaining {
            self.step_once(evaluator, integrator, compute_energy);
            let step = self.state.step();
            for observer in observers.iter_mut() {
                observer
                    .notify(&self.state)
                    .map_err(|source| EngineError::Output { step, source })?;
            }
            reporter.report(Progress::StepCompleted { step: step as u64 });
        }

        let step = self.state.step();
        for observer in observers.iter_mut() {
            observer
                .finish()
                .map_err(|source| EngineError::Output { step, source })?;
        }
        reporter.report(Progress::RunFinish);

        let elapsed = start.elapsed();
        info!(
            elapsed_secs = elapsed.as_secs_f64(),
            "Simulation finished after {} steps.", remaining
        );

        Ok(RunSummary {
            steps: remaining,
            elapsed,
            final_time: self.state.time(),
            kinetic_energy: self.state.kinetic_energy(),
            potential_energy: self.state.potential_energy(),
            total_energy: self.state.total_energy(),
        })
    }
}
