use crate::core::boundary::BoundaryPolicy;
use crate::core::forcefield::lennard_jones::DEFAULT_CUTOFF;
use crate::core::init::InitError;
use crate::core::init::positions::{FaceCenteredCubic, PositionInitializer, SetPositions};
use crate::core::init::velocities::{
    GaussianVelocities, SetVelocities, TemperatureVelocities, VelocityInitializer, ZeroVelocities,
};
use crate::core::integrator::Integrator;
use crate::core::io::quantity::{AtomQuantity, ThermoQuantity};
use crate::core::models::fields::{Positions, Velocities};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Timestep must be finite and strictly positive (got {0})")]
    InvalidTimestep(f64),

    #[error("Total time must be finite (got {0})")]
    InvalidTotalTime(f64),

    #[error("Total time {total_time} is shorter than one timestep ({timestep})")]
    TotalTimeShorterThanTimestep { total_time: f64, timestep: f64 },

    #[error("Cutoff radius must be finite and strictly positive (got {0})")]
    InvalidCutoff(f64),

    #[error("The initial configuration contains no particles")]
    EmptyConfiguration,

    #[error("Unsupported number of dimensions: {0} (expected 1, 2 or 3)")]
    UnsupportedDimensions(usize),

    #[error("Positions have shape {positions:?} but velocities have shape {velocities:?}")]
    ShapeMismatch {
        positions: (usize, usize),
        velocities: (usize, usize),
    },

    #[error("Initial {0} contain non-finite values")]
    NonFiniteInput(&'static str),
}

/// How the initial configuration is produced.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(
    tag = "kind",
    rename_all = "kebab-case",
    rename_all_fields = "kebab-case",
    deny_unknown_fields
)]
pub enum PositionSpec {
    Manual {
        rows: Vec<Vec<f64>>,
    },
    Fcc {
        #[serde(default = "default_fcc_cells")]
        cells: usize,
        #[serde(default = "default_fcc_lenbulk")]
        lenbulk: f64,
    },
}

fn default_fcc_cells() -> usize {
    FaceCenteredCubic::default().cells
}

fn default_fcc_lenbulk() -> f64 {
    FaceCenteredCubic::default().lenbulk
}

impl Default for PositionSpec {
    fn default() -> Self {
        let lattice = FaceCenteredCubic::default();
        Self::Fcc {
            cells: lattice.cells,
            lenbulk: lattice.lenbulk,
        }
    }
}

impl PositionSpec {
    pub fn build(&self) -> Result<Positions, InitError> {
        match self {
            Self::Manual { rows } => SetPositions::new(rows.clone()).build(),
            Self::Fcc { cells, lenbulk } => FaceCenteredCubic::new(*cells, *lenbulk).build(),
        }
    }
}

/// How the initial velocity field is produced.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(
    tag = "kind",
    rename_all = "kebab-case",
    rename_all_fields = "kebab-case",
    deny_unknown_fields
)]
pub enum VelocitySpec {
    #[default]
    Zero,
    Manual {
        rows: Vec<Vec<f64>>,
    },
    Gaussian {
        #[serde(default)]
        mean: f64,
        std_dev: f64,
        #[serde(default)]
        seed: Option<u64>,
    },
    Temperature {
        kelvin: f64,
        #[serde(default)]
        seed: Option<u64>,
    },
}

impl VelocitySpec {
    pub fn build(
        &self,
        num_particles: usize,
        num_dimensions: usize,
    ) -> Result<Velocities, InitError> {
        match self {
            Self::Zero => ZeroVelocities.build(num_particles, num_dimensions),
            Self::Manual { rows } => {
                SetVelocities::new(rows.clone()).build(num_particles, num_dimensions)
            }
            Self::Gaussian {
                mean,
                std_dev,
                seed,
            } => GaussianVelocities {
                mean: *mean,
                std_dev: *std_dev,
                seed: *seed,
            }
            .build(num_particles, num_dimensions),
            Self::Temperature { kelvin, seed } => TemperatureVelocities {
                kelvin: *kelvin,
                seed: *seed,
            }
            .build(num_particles, num_dimensions),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SystemConfig {
    pub positions: PositionSpec,
    pub velocities: VelocitySpec,
    pub boundary: BoundaryPolicy,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegrationConfig {
    pub total_time: f64,
    pub timestep: f64,
    pub integrator: Integrator,
}

impl IntegrationConfig {
    /// Number of steps of the run, `⌊total_time / timestep⌋`.
    pub fn num_steps(&self) -> usize {
        (self.total_time / self.timestep).floor() as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PotentialConfig {
    pub cutoff: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DumpConfig {
    pub path: PathBuf,
    pub every: usize,
    pub quantities: Vec<AtomQuantity>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThermoConfig {
    pub path: PathBuf,
    pub every: usize,
    pub quantities: Vec<ThermoQuantity>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OutputConfig {
    pub dump: Option<DumpConfig>,
    pub thermo: Option<ThermoConfig>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub system: SystemConfig,
    pub integration: IntegrationConfig,
    pub potential: PotentialConfig,
    pub output: OutputConfig,
}

#[derive(Default)]
pub struct SimulationConfigBuilder {
    positions: Option<PositionSpec>,
    velocities: Option<VelocitySpec>,
    boundary: Option<BoundaryPolicy>,
    total_time: Option<f64>,
    timestep: Option<f64>,
    integrator: Option<Integrator>,
    cutoff: Option<f64>,
    dump: Option<DumpConfig>,
    thermo: Option<ThermoConfig>,
}

impl SimulationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn positions(mut self, spec: PositionSpec) -> Self {
        self.positions = Some(spec);
        self
    }
    pub fn velocities(mut self, spec: VelocitySpec) -> Self {
        self.velocities = Some(spec);
        self
    }
    pub fn boundary(mut self, boundary: BoundaryPolicy) -> Self {
        self.boundary = Some(boundary);
        self
    }
    pub fn total_time(mut self, time: f64) -> Self {
        self.total_time = Some(time);
        self
    }
    pub fn timestep(mut self, dt: f64) -> Self {
        self.timestep = Some(dt);
        self
    }
    pub fn integrator(mut self, integrator: Integrator) -> Self {
        self.integrator = Some(integrator);
        self
    }
    pub fn cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = Some(cutoff);
        self
    }
    pub fn dump(mut self, dump: DumpConfig) -> Self {
        self.dump = Some(dump);
        self
    }
    pub fn thermo(mut self, thermo: ThermoConfig) -> Self {
        self.thermo = Some(thermo);
        self
    }

    pub fn build(self) -> Result<SimulationConfig, ConfigError> {
        let system = SystemConfig {
            positions: self
                .positions
                .ok_or(ConfigError::MissingParameter("positions"))?,
            velocities: self.velocities.unwrap_or_default(),
            boundary: self.boundary.unwrap_or_default(),
        };

        let integration = IntegrationConfig {
            total_time: self
                .total_time
                .ok_or(ConfigError::MissingParameter("total_time"))?,
            timestep: self
                .timestep
                .ok_or(ConfigError::MissingParameter("timestep"))?,
            integrator: self.integrator.unwrap_or_default(),
        };
        validate_times(integration.total_time, integration.timestep)?;

        let cutoff = self.cutoff.unwrap_or(DEFAULT_CUTOFF);
        if !(cutoff.is_finite() && cutoff > 0.0) {
            return Err(ConfigError::InvalidCutoff(cutoff));
        }

        Ok(SimulationConfig {
            system,
            integration,
            potential: PotentialConfig { cutoff },
            output: OutputConfig {
                dump: self.dump,
                thermo: self.thermo,
            },
        })
    }
}

pub(crate) fn validate_times(total_time: f64, timestep: f64) -> Result<(), ConfigError> {
    if !(timestep.is_finite() && timestep > 0.0) {
        return Err(ConfigError::InvalidTimestep(timestep));
    }
    if !total_time.is_finite() {
        return Err(ConfigError::InvalidTotalTime(total_time));
    }
    if total_time < timestep {
        return Err(ConfigError::TotalTimeShorterThanTimestep {
            total_time,
            timestep,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> SimulationConfigBuilder {
        SimulationConfigBuilder::new()
            .positions(PositionSpec::Manual {
                rows: vec![vec![0.0], vec![1.5]],
            })
            .total_time(1.0)
            .timestep(0.001)
    }

    #[test]
    fn builder_fills_optional_parameters_with_defaults() {
        let config = minimal().build().unwrap();
        assert_eq!(config.system.velocities, VelocitySpec::Zero);
        assert_eq!(config.system.boundary, BoundaryPolicy::Open);
        assert_eq!(config.integration.integrator, Integrator::VelocityVerlet);
        assert_eq!(config.potential.cutoff, DEFAULT_CUTOFF);
        assert_eq!(config.output, OutputConfig::default());
        assert_eq!(config.integration.num_steps(), 1000);
    }

    #[test]
    fn builder_reports_missing_parameters() {
        let result = SimulationConfigBuilder::new().total_time(1.0).timestep(0.1).build();
        assert_eq!(result, Err(ConfigError::MissingParameter("positions")));

        let result = SimulationConfigBuilder::new()
            .positions(PositionSpec::default())
            .timestep(0.1)
            .build();
        assert_eq!(result, Err(ConfigError::MissingParameter("total_time")));
    }

    #[test]
    fn builder_rejects_invalid_times() {
        assert_eq!(
            minimal().timestep(0.0).build(),
            Err(ConfigError::InvalidTimestep(0.0))
        );
        assert_eq!(
            minimal().total_time(0.0005).build(),
            Err(ConfigError::TotalTimeShorterThanTimestep {
                total_time: 0.0005,
                timestep: 0.001
            })
        );
        assert!(minimal().total_time(f64::INFINITY).build().is_err());
    }

    #[test]
    fn builder_rejects_invalid_cutoff() {
        assert_eq!(
            minimal().cutoff(-1.0).build(),
            Err(ConfigError::InvalidCutoff(-1.0))
        );
    }

    #[test]
    fn step_count_truncates_towards_zero() {
        let config = minimal().total_time(1.0).timestep(0.3).build().unwrap();
        assert_eq!(config.integration.num_steps(), 3);
    }

    #[test]
    fn default_position_spec_is_a_single_fcc_cell() {
        let positions = PositionSpec::default().build().unwrap();
        assert_eq!(positions.shape(), (4, 3));
    }

    #[test]
    fn velocity_spec_builds_matching_shape() {
        let spec = VelocitySpec::Temperature {
            kelvin: 119.7,
            seed: Some(1),
        };
        assert_eq!(spec.build(8, 2).unwrap().shape(), (8, 2));
        assert_eq!(VelocitySpec::Zero.build(3, 1).unwrap(), Velocities::zeros(3, 1));
    }
}
