use crate::core::forcefield::evaluator::PotentialEvaluator;
use crate::core::forcefield::lennard_jones::LennardJones;
use crate::core::integrator::Integrator;
use crate::core::io::dump::DumpWriter;
use crate::core::io::thermo::ThermoWriter;
use crate::core::models::state::SimulationState;
use crate::engine::config::{OutputConfig, SimulationConfig};
use crate::engine::error::EngineError;
use crate::engine::observer::Observer;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::simulation::{RunSummary, Simulation};
use std::fs::File;
use std::io::BufWriter;
use tracing::{debug, info, instrument};

/// A validated run that is ready to be stepped.
#[derive(Debug, Clone)]
pub struct PreparedRun {
    pub simulation: Simulation,
    pub potential: LennardJones,
    pub integrator: Integrator,
}

#[derive(Debug, Clone)]
pub struct SimulationOutcome {
    pub summary: RunSummary,
    pub final_state: SimulationState,
}

/// Builds the initial state and the potential described by `config`.
pub fn prepare(config: &SimulationConfig) -> Result<PreparedRun, EngineError> {
    let positions = config.system.positions.build()?;
    let (num_particles, num_dimensions) = positions.shape();
    let velocities = config
        .system
        .velocities
        .build(num_particles, num_dimensions)?;

    let simulation = Simulation::new(
        positions,
        Some(velocities),
        config.system.boundary,
        config.integration.total_time,
        config.integration.timestep,
    )?;
    let potential = LennardJones::new(config.potential.cutoff, config.system.boundary)?;

    info!(
        "System: {} particles in {}D, {}.",
        num_particles, num_dimensions, config.system.boundary
    );
    info!(
        "Simulation: T = {}, dt = {} ({} steps), {}, {}.",
        config.integration.total_time,
        config.integration.timestep,
        simulation.num_steps(),
        potential,
        config.integration.integrator
    );

    Ok(PreparedRun {
        simulation,
        potential,
        integrator: config.integration.integrator,
    })
}

#[instrument(skip_all, name = "simulation_workflow")]
pub fn run(
    config: &SimulationConfig,
    reporter: &ProgressReporter,
) -> Result<SimulationOutcome, EngineError> {
    run_with_observers(config, &mut [], reporter)
}

/// Runs the configured simulation with additional caller-supplied observers.
///
/// Observers created from the output configuration are notified before `extra`.
#[instrument(skip_all, name = "simulation_workflow")]
pub fn run_with_observers(
    config: &SimulationConfig,
    extra: &mut [&mut dyn Observer],
    reporter: &ProgressReporter,
) -> Result<SimulationOutcome, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Preparation",
    });
    let PreparedRun {
        mut simulation,
        potential,
        integrator,
    } = prepare(config)?;
    let (mut dump, mut thermo) = open_writers(&config.output)?;
    reporter.report(Progress::PhaseFinish);

    let mut observers: Vec<&mut dyn Observer> = Vec::with_capacity(extra.len() + 2);
    if let Some(dump) = dump.as_mut() {
        observers.push(dump);
    }
    if let Some(thermo) = thermo.as_mut() {
        observers.push(thermo);
    }
    for observer in extra.iter_mut() {
        observers.push(&mut **observer);
    }

    reporter.report(Progress::PhaseStart {
        name: "Integration",
    });
    let mut summary = simulation.run(&potential, integrator, &mut observers, reporter)?;
    reporter.report(Progress::PhaseFinish);

    if summary.potential_energy.is_none() {
        let energy = potential
            .evaluate(simulation.state().positions(), true)
            .potential_energy;
        summary.potential_energy = energy;
        summary.total_energy = energy.map(|u| u + summary.kinetic_energy);
    }

    info!(
        "Final energies: kinetic = {:.8}, potential = {}, total = {}.",
        summary.kinetic_energy,
        format_energy(summary.potential_energy),
        format_energy(summary.total_energy)
    );

    Ok(SimulationOutcome {
        summary,
        final_state: simulation.into_state(),
    })
}

type Writers = (
    Option<DumpWriter<BufWriter<File>>>,
    Option<ThermoWriter<BufWriter<File>>>,
);

fn open_writers(output: &OutputConfig) -> Result<Writers, EngineError> {
    let dump = match &output.dump {
        Some(dump) => {
            debug!(path = %dump.path.display(), every = dump.every, "Opening trajectory dump.");
            Some(DumpWriter::create(
                &dump.path,
                dump.every,
                dump.quantities.clone(),
            )?)
        }
        None => None,
    };
    let thermo = match &output.thermo {
        Some(thermo) => {
            debug!(path = %thermo.path.display(), every = thermo.every, "Opening thermo log.");
            Some(ThermoWriter::create(
                &thermo.path,
                thermo.every,
                thermo.quantities.clone(),
            )?)
        }
        None => None,
    };
    Ok((dump, thermo))
}

fn format_energy(energy: Option<f64>) -> String {
    energy.map_or_else(|| "n/a".to_string(), |e| format!("{:.8}", e))
}
