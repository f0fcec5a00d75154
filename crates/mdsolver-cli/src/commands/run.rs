use crate::cli::RunArgs;
use crate::config::defaults::DefaultsConfig;
use crate::config::file::FileConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use mdsolver::engine::config::SimulationConfig;
use mdsolver::engine::progress::ProgressReporter;
use mdsolver::workflows::simulate::{self, SimulationOutcome};
use tracing::info;

pub fn run(args: RunArgs) -> Result<()> {
    let file_config = FileConfig::from_file(&args.config)?;
    info!("Merging configuration from file and CLI arguments...");
    let config = file_config.merge_with_cli(&args.overrides, &DefaultsConfig::default())?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Starting simulation...");
    info!("Invoking the simulation workflow...");
    let outcome = simulate::run(&config, &reporter)?;

    print_report(&config, &outcome);
    Ok(())
}

fn print_report(config: &SimulationConfig, outcome: &SimulationOutcome) {
    let summary = &outcome.summary;
    println!(
        "Simulation complete: {} steps ({:.4} time units) in {:.3}s.",
        summary.steps,
        summary.final_time,
        summary.elapsed.as_secs_f64()
    );
    println!("  Kinetic energy:   {:.8}", summary.kinetic_energy);
    if let Some(potential) = summary.potential_energy {
        println!("  Potential energy: {:.8}", potential);
    }
    if let Some(total) = summary.total_energy {
        println!("  Total energy:     {:.8}", total);
    }
    println!("  Temperature:      {:.8}", outcome.final_state.temperature());

    if let Some(dump) = &config.output.dump {
        println!("Trajectory written to: {}", dump.path.display());
    }
    if let Some(thermo) = &config.output.thermo {
        println!("Thermo log written to: {}", thermo.path.display());
    }
}
