use super::fields::{self, Forces, Positions, Velocities};

/// The complete dynamical state of a run at one step.
///
/// The state is owned by the simulation loop and only ever handed out by shared
/// reference, so observers cannot alter particle count, dimensionality or the
/// consistency between the fields.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    /// Current particle positions.
    positions: Positions,
    /// Current particle velocities.
    velocities: Velocities,
    /// Forces evaluated at `positions`.
    accelerations: Forces,
    /// Total potential energy at `positions`, present only if it was requested.
    potential_energy: Option<f64>,
    /// Number of completed integration steps.
    step: usize,
    /// Integration timestep used to convert steps into time.
    timestep: f64,
}

impl SimulationState {
    /// Creates the state at step zero with a zero acceleration field.
    ///
    /// # Arguments
    ///
    /// * `positions` - Initial configuration.
    /// * `velocities` - Initial velocities, same shape as `positions`.
    /// * `timestep` - The integration timestep of the run.
    pub(crate) fn new(positions: Positions, velocities: Velocities, timestep: f64) -> Self {
        debug_assert!(fields::same_shape(&positions, &velocities));
        let accelerations = Forces::zeros(positions.nrows(), positions.ncols());
        Self {
            positions,
            velocities,
            accelerations,
            potential_energy: None,
            step: 0,
            timestep,
        }
    }

    /// Replaces the acceleration field and energy without advancing the step counter.
    pub(crate) fn seed(&mut self, accelerations: Forces, potential_energy: Option<f64>) {
        debug_assert!(fields::same_shape(&self.positions, &accelerations));
        self.accelerations = accelerations;
        self.potential_energy = potential_energy;
    }

    /// Stores the result of one integration step and increments the step counter.
    pub(crate) fn commit_step(
        &mut self,
        positions: Positions,
        velocities: Velocities,
        accelerations: Forces,
        potential_energy: Option<f64>,
    ) {
        debug_assert!(fields::same_shape(&self.positions, &positions));
        debug_assert!(fields::same_shape(&self.velocities, &velocities));
        self.positions = positions;
        self.velocities = velocities;
        self.accelerations = accelerations;
        self.potential_energy = potential_energy;
        self.step += 1;
    }

    pub fn positions(&self) -> &Positions {
        &self.positions
    }

    pub fn velocities(&self) -> &Velocities {
        &self.velocities
    }

    pub fn accelerations(&self) -> &Forces {
        &self.accelerations
    }

    /// Returns the potential energy of the current configuration.
    ///
    /// # Return
    ///
    /// `None` when energy evaluation was not requested for the latest step.
    pub fn potential_energy(&self) -> Option<f64> {
        self.potential_energy
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn timestep(&self) -> f64 {
        self.timestep
    }

    /// Simulated time elapsed since the start of the run.
    pub fn time(&self) -> f64 {
        self.step as f64 * self.timestep
    }

    pub fn num_particles(&self) -> usize {
        self.positions.nrows()
    }

    pub fn num_dimensions(&self) -> usize {
        self.positions.ncols()
    }

    pub fn kinetic_energy(&self) -> f64 {
        fields::kinetic_energy(&self.velocities)
    }

    /// Sum of potential and kinetic energy, if the potential energy is known.
    pub fn total_energy(&self) -> Option<f64> {
        self.potential_energy
            .map(|potential| potential + self.kinetic_energy())
    }

    /// Instantaneous temperature in reduced units, `2K / (N·D)`.
    pub fn temperature(&self) -> f64 {
        let degrees_of_freedom = (self.num_particles() * self.num_dimensions()) as f64;
        if degrees_of_freedom == 0.0 {
            return 0.0;
        }
        2.0 * self.kinetic_energy() / degrees_of_freedom
    }

    /// Whether every position, velocity and force component is finite.
    pub fn is_finite(&self) -> bool {
        fields::all_finite(&self.positions)
            && fields::all_finite(&self.velocities)
            && fields::all_finite(&self.accelerations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_particle_state() -> SimulationState {
        let positions = Positions::from_row_slice(2, 1, &[0.0, 1.5]);
        let velocities = Velocities::from_row_slice(2, 1, &[1.0, -1.0]);
        SimulationState::new(positions, velocities, 0.01)
    }

    #[test]
    fn new_state_starts_at_step_zero_with_zero_forces() {
        let state = two_particle_state();
        assert_eq!(state.step(), 0);
        assert_eq!(state.time(), 0.0);
        assert_eq!(state.accelerations(), &Forces::zeros(2, 1));
        assert_eq!(state.potential_energy(), None);
    }

    #[test]
    fn commit_step_advances_step_and_time() {
        let mut state = two_particle_state();
        let positions = state.positions().clone();
        let velocities = state.velocities().clone();
        state.commit_step(positions, velocities, Forces::zeros(2, 1), Some(-0.5));
        state.commit_step(
            state.positions().clone(),
            state.velocities().clone(),
            Forces::zeros(2, 1),
            None,
        );
        assert_eq!(state.step(), 2);
        assert!((state.time() - 0.02).abs() < 1e-15);
        assert_eq!(state.potential_energy(), None);
    }

    #[test]
    fn total_energy_requires_potential_energy() {
        let mut state = two_particle_state();
        assert_eq!(state.total_energy(), None);
        state.seed(Forces::zeros(2, 1), Some(-0.25));
        assert_eq!(state.kinetic_energy(), 1.0);
        assert_eq!(state.total_energy(), Some(0.75));
    }

    #[test]
    fn temperature_uses_all_degrees_of_freedom() {
        let state = two_particle_state();
        assert_eq!(state.temperature(), 1.0);
    }
}
