//! End-to-end dynamics checks for the simulation loop.

use approx::assert_relative_eq;
use mdsolver::core::boundary::BoundaryPolicy;
use mdsolver::core::forcefield::evaluator::PotentialEvaluator;
use mdsolver::core::forcefield::lennard_jones::LennardJones;
use mdsolver::core::forcefield::potentials::equilibrium_separation;
use mdsolver::core::init::positions::{FaceCenteredCubic, PositionInitializer};
use mdsolver::core::init::velocities::{
    ARGON_EPSILON_KELVIN, GaussianVelocities, TemperatureVelocities, VelocityInitializer,
};
use mdsolver::core::integrator::Integrator;
use mdsolver::core::models::fields::Positions;
use mdsolver::core::models::state::SimulationState;
use mdsolver::engine::observer::CallbackObserver;
use mdsolver::engine::progress::ProgressReporter;
use mdsolver::engine::simulation::Simulation;

/// Two particles on a line, initially at rest.
fn dimer(separation: f64) -> Positions {
    Positions::from_row_slice(2, 1, &[0.0, separation])
}

/// Runs `positions` from rest and returns the total energy recorded after every step.
fn energy_trace(integrator: Integrator, timestep: f64, total_time: f64) -> (f64, Vec<f64>) {
    let potential = LennardJones::new(3.0, BoundaryPolicy::Open).unwrap();
    let initial_energy = potential
        .evaluate(&dimer(1.5), true)
        .potential_energy
        .unwrap();

    let mut sim = Simulation::new(
        dimer(1.5),
        None,
        BoundaryPolicy::Open,
        total_time,
        timestep,
    )
    .unwrap();

    let mut energies = Vec::new();
    let mut recorder = CallbackObserver::with_energy(|state: &SimulationState| {
        energies.push(state.total_energy().unwrap());
    });
    sim.run(
        &potential,
        integrator,
        &mut [&mut recorder],
        &ProgressReporter::new(),
    )
    .unwrap();
    drop(recorder);

    (initial_energy, energies)
}

fn max_drift(initial: f64, energies: &[f64]) -> f64 {
    energies
        .iter()
        .map(|e| (e - initial).abs())
        .fold(0.0, f64::max)
}

#[test]
fn velocity_verlet_conserves_energy_of_a_dimer() {
    let (initial, energies) = energy_trace(Integrator::VelocityVerlet, 0.001, 1.0);

    assert_eq!(energies.len(), 1000);
    assert_relative_eq!(initial, -0.3148571525, epsilon = 1e-9);
    assert!(max_drift(initial, &energies) < 0.01 * initial.abs());
}

#[test]
fn euler_cromer_drifts_more_than_velocity_verlet() {
    let (initial, verlet) = energy_trace(Integrator::VelocityVerlet, 0.001, 1.0);
    let (_, cromer) = energy_trace(Integrator::EulerCromer, 0.001, 1.0);

    assert!(max_drift(initial, &cromer) > max_drift(initial, &verlet));
}

#[test]
fn dimer_released_outside_equilibrium_oscillates_around_it() {
    let potential = LennardJones::new(3.0, BoundaryPolicy::Open).unwrap();
    let mut sim = Simulation::new(dimer(1.5), None, BoundaryPolicy::Open, 10.0, 0.001).unwrap();

    let mut distances = Vec::new();
    let mut recorder = CallbackObserver::new(|state: &SimulationState| {
        let r = state.positions();
        distances.push(r[(1, 0)] - r[(0, 0)]);
    });
    sim.run(
        &potential,
        Integrator::EulerCromer,
        &mut [&mut recorder],
        &ProgressReporter::new(),
    )
    .unwrap();
    drop(recorder);

    assert_eq!(distances.len(), 10_000);
    let equilibrium = equilibrium_separation();

    // Beyond 2^(1/6) the pair attracts, so the distance first shrinks monotonically.
    let turning = distances
        .windows(2)
        .position(|w| w[1] >= w[0])
        .unwrap();
    assert!(turning > 0);
    assert!(distances[0] < 1.5);
    let inner = distances[turning];
    assert!(inner < equilibrium);
    assert!(inner > 0.95);

    // Afterwards it keeps bouncing between the inner turning point and the release distance.
    let after = &distances[turning..];
    assert!(after.iter().all(|&d| d > 0.95 && d < 1.51));
    let crossings = after
        .windows(2)
        .filter(|w| (w[0] - equilibrium) * (w[1] - equilibrium) < 0.0)
        .count();
    assert!(crossings >= 4);
}

#[cfg(not(feature = "parallel"))]
#[test]
fn identical_inputs_give_identical_trajectories() {
    let run = || {
        let positions = FaceCenteredCubic::new(2, 3.4).build().unwrap();
        let velocities = TemperatureVelocities {
            kelvin: 0.5 * ARGON_EPSILON_KELVIN,
            seed: Some(42),
        }
        .build(positions.nrows(), 3)
        .unwrap();
        let boundary = BoundaryPolicy::periodic(3.4).unwrap();
        let potential = LennardJones::new(1.6, boundary).unwrap();

        let mut sim = Simulation::new(positions, Some(velocities), boundary, 0.5, 0.005).unwrap();
        sim.run(
            &potential,
            Integrator::VelocityVerlet,
            &mut [],
            &ProgressReporter::new(),
        )
        .unwrap();
        sim.into_state()
    };

    assert_eq!(run(), run());
}

#[test]
fn forces_on_an_open_cluster_sum_to_zero() {
    let lattice = FaceCenteredCubic::new(2, 3.4).build().unwrap();
    let jitter = GaussianVelocities {
        mean: 0.0,
        std_dev: 0.05,
        seed: Some(9),
    }
    .build(lattice.nrows(), 3)
    .unwrap();
    let positions = lattice + jitter;

    let forces = LennardJones::new(3.0, BoundaryPolicy::Open)
        .unwrap()
        .evaluate(&positions, false)
        .forces;
    let scale = forces.amax();
    for net in forces.row_sum().iter() {
        assert!(net.abs() < 1e-10 * scale);
    }
}

#[test]
fn walls_and_periodic_boxes_keep_particles_inside() {
    for boundary in [
        BoundaryPolicy::reflective(3.4).unwrap(),
        BoundaryPolicy::periodic(3.4).unwrap(),
    ] {
        let positions = FaceCenteredCubic::new(2, 3.4).build().unwrap();
        let velocities = TemperatureVelocities {
            kelvin: 2.0 * ARGON_EPSILON_KELVIN,
            seed: Some(5),
        }
        .build(positions.nrows(), 3)
        .unwrap();
        let potential = LennardJones::new(1.6, boundary).unwrap();

        let mut sim = Simulation::new(positions, Some(velocities), boundary, 1.0, 0.002).unwrap();
        let mut outside = 0usize;
        let mut recorder = CallbackObserver::new(|state: &SimulationState| {
            outside += state
                .positions()
                .iter()
                .filter(|&&x| !(0.0..=3.4).contains(&x))
                .count();
        });
        sim.run(
            &potential,
            Integrator::VelocityVerlet,
            &mut [&mut recorder],
            &ProgressReporter::new(),
        )
        .unwrap();
        drop(recorder);

        assert_eq!(outside, 0, "{boundary}");
    }
}
