pub mod defaults;
pub mod file;

use crate::cli::OverrideArgs;
use crate::error::{CliError, Result};
use defaults::DefaultsConfig;
use file::{FileConfig, FileDumpConfig, FileThermoConfig};
use mdsolver::core::boundary::BoundaryPolicy;
use mdsolver::core::integrator::Integrator;
use mdsolver::engine::config::{
    DumpConfig, PositionSpec, SimulationConfig, SimulationConfigBuilder, ThermoConfig,
};
use serde::Deserialize;
use serde::de::IntoDeserializer;
use serde::de::value::Error as ValueError;
use std::str::FromStr;
use tracing::debug;

impl FileConfig {
    /// Resolves the final configuration with precedence CLI > file > defaults.
    pub fn merge_with_cli(
        mut self,
        overrides: &OverrideArgs,
        defaults: &DefaultsConfig,
    ) -> Result<SimulationConfig> {
        self.apply_set_values(&overrides.set_values)?;

        let system = self.system.take().unwrap_or_default();
        let integration = self.integration.take().unwrap_or_default();
        let potential = self.potential.take().unwrap_or_default();
        let output = self.output.take().unwrap_or_default();

        let boundary = match system.boundary {
            Some(boundary) => BoundaryPolicy::try_from(boundary)
                .map_err(|e| CliError::Config(e.to_string()))?,
            None => BoundaryPolicy::default(),
        };

        let mut builder = SimulationConfigBuilder::new()
            .positions(system.positions.unwrap_or_else(PositionSpec::default))
            .velocities(system.velocities.unwrap_or_default())
            .boundary(boundary)
            .total_time(
                overrides
                    .total_time
                    .or(integration.total_time)
                    .unwrap_or(defaults.total_time),
            )
            .timestep(
                overrides
                    .timestep
                    .or(integration.timestep)
                    .unwrap_or(defaults.timestep),
            )
            .integrator(
                overrides
                    .integrator
                    .map(Integrator::from)
                    .or(integration.integrator)
                    .unwrap_or(defaults.integrator),
            )
            .cutoff(
                overrides
                    .cutoff
                    .or(potential.cutoff)
                    .unwrap_or(defaults.cutoff),
            );

        if let Some(dump) = output.dump {
            builder = builder.dump(Self::merge_dump(dump, defaults));
        }
        if let Some(thermo) = output.thermo {
            builder = builder.thermo(Self::merge_thermo(thermo, defaults));
        }

        let config = builder
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;
        debug!("Resolved configuration: {:?}", config);
        Ok(config)
    }

    fn merge_dump(dump: FileDumpConfig, defaults: &DefaultsConfig) -> DumpConfig {
        DumpConfig {
            path: dump.path,
            every: dump.every.unwrap_or(defaults.dump_every),
            quantities: dump.quantities,
        }
    }

    fn merge_thermo(thermo: FileThermoConfig, defaults: &DefaultsConfig) -> ThermoConfig {
        ThermoConfig {
            path: thermo.path,
            every: thermo.every.unwrap_or(defaults.thermo_every),
            quantities: thermo
                .quantities
                .unwrap_or_else(|| defaults.thermo_quantities.clone()),
        }
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Argument(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };

            match key {
                "integration.total-time" => {
                    self.integration
                        .get_or_insert_with(Default::default)
                        .total_time = Some(parse_value(key, value_str)?);
                }
                "integration.timestep" => {
                    self.integration
                        .get_or_insert_with(Default::default)
                        .timestep = Some(parse_value(key, value_str)?);
                }
                "integration.integrator" => {
                    let integrator =
                        Integrator::deserialize(value_str.into_deserializer()).map_err(
                            |e: ValueError| {
                                CliError::Config(format!(
                                    "Invalid integrator for {}: {} ({})",
                                    key, value_str, e
                                ))
                            },
                        )?;
                    self.integration
                        .get_or_insert_with(Default::default)
                        .integrator = Some(integrator);
                }
                "potential.cutoff" => {
                    self.potential.get_or_insert_with(Default::default).cutoff =
                        Some(parse_value(key, value_str)?);
                }
                "output.dump.every" => {
                    let dump = self
                        .output
                        .as_mut()
                        .and_then(|output| output.dump.as_mut())
                        .ok_or_else(|| {
                            CliError::Config(format!(
                                "Cannot set '{}' without an [output.dump] section.",
                                key
                            ))
                        })?;
                    dump.every = Some(parse_value(key, value_str)?);
                }
                "output.thermo.every" => {
                    let thermo = self
                        .output
                        .as_mut()
                        .and_then(|output| output.thermo.as_mut())
                        .ok_or_else(|| {
                            CliError::Config(format!(
                                "Cannot set '{}' without an [output.thermo] section.",
                                key
                            ))
                        })?;
                    thermo.every = Some(parse_value(key, value_str)?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

fn parse_value<T: FromStr>(key: &str, value_str: &str) -> Result<T> {
    value_str.parse().map_err(|_| {
        CliError::Config(format!("Invalid value for {}: {}", key, value_str))
    })
}
