use crate::cli::CheckArgs;
use crate::config::defaults::DefaultsConfig;
use crate::config::file::FileConfig;
use crate::error::Result;
use mdsolver::workflows::simulate::{self, PreparedRun};
use tracing::info;

/// Validates the configuration and builds the initial state without integrating.
pub fn run(args: CheckArgs) -> Result<()> {
    let file_config = FileConfig::from_file(&args.config)?;
    let config = file_config.merge_with_cli(&args.overrides, &DefaultsConfig::default())?;

    info!("Building initial state to validate the configuration...");
    let prepared = simulate::prepare(&config)?;

    println!("{}", describe(&prepared));
    println!("Configuration '{}' is valid.", args.config.display());
    Ok(())
}

fn describe(prepared: &PreparedRun) -> String {
    let simulation = &prepared.simulation;
    let state = simulation.state();
    format!(
        "System:     {} particles in {}D, {}\n\
         Simulation: T = {}, dt = {} ({} steps)\n\
         Potential:  {}\n\
         Integrator: {}",
        state.num_particles(),
        state.num_dimensions(),
        simulation.boundary(),
        simulation.total_time(),
        state.timestep(),
        simulation.num_steps(),
        prepared.potential,
        prepared.integrator
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OverrideArgs;
    use crate::error::CliError;
    use mdsolver::engine::error::EngineError;
    use std::fs;

    fn prepared_from(content: &str) -> Result<PreparedRun> {
        let config = FileConfig::from_toml_str(content)?
            .merge_with_cli(&OverrideArgs::default(), &DefaultsConfig::default())?;
        Ok(simulate::prepare(&config)?)
    }

    #[test]
    fn description_summarises_the_system() {
        let prepared = prepared_from(
            r#"
            [system]
            boundary = { kind = "periodic", box-length = 6.0 }

            [system.positions]
            kind = "fcc"
            cells = 2
            lenbulk = 6.0

            [integration]
            total-time = 1.0
            timestep = 0.005
            "#,
        )
        .unwrap();

        let description = describe(&prepared);
        assert!(description.contains("32 particles in 3D"));
        assert!(description.contains("Periodic boundaries with box length 6"));
        assert!(description.contains("(200 steps)"));
        assert!(description.contains("Lennard-Jones potential (cutoff 3)"));
        assert!(description.contains("Velocity-Verlet"));
    }

    #[test]
    fn mismatched_velocities_fail_the_check() {
        let result = prepared_from(
            r#"
            [system.positions]
            kind = "manual"
            rows = [[0.0], [1.5]]

            [system.velocities]
            kind = "manual"
            rows = [[0.0]]
            "#,
        );
        assert!(matches!(result, Err(CliError::Engine(EngineError::Init(_)))));
    }

    #[test]
    fn check_command_accepts_a_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("sim.toml");
        fs::write(&config_path, "[integration]\ntotal-time = 1.0\n").unwrap();

        let result = run(CheckArgs {
            config: config_path,
            overrides: OverrideArgs::default(),
        });
        assert!(result.is_ok());
    }
}
