use crate::error::{CliError, Result};
use mdsolver::core::boundary::{BoundaryError, BoundaryPolicy};
use mdsolver::core::integrator::Integrator;
use mdsolver::core::io::quantity::{AtomQuantity, ThermoQuantity};
use mdsolver::engine::config::{PositionSpec, VelocitySpec};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "kebab-case", tag = "kind", deny_unknown_fields)]
pub enum FileBoundary {
    Open,
    Reflective {
        #[serde(rename = "box-length")]
        box_length: f64,
    },
    Periodic {
        #[serde(rename = "box-length")]
        box_length: f64,
    },
}

impl TryFrom<FileBoundary> for BoundaryPolicy {
    type Error = BoundaryError;

    fn try_from(boundary: FileBoundary) -> std::result::Result<Self, Self::Error> {
        match boundary {
            FileBoundary::Open => Ok(BoundaryPolicy::open()),
            FileBoundary::Reflective { box_length } => BoundaryPolicy::reflective(box_length),
            FileBoundary::Periodic { box_length } => BoundaryPolicy::periodic(box_length),
        }
    }
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileSystemConfig {
    pub positions: Option<PositionSpec>,
    pub velocities: Option<VelocitySpec>,
    pub boundary: Option<FileBoundary>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileIntegrationConfig {
    #[serde(rename = "total-time")]
    pub total_time: Option<f64>,
    pub timestep: Option<f64>,
    pub integrator: Option<Integrator>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FilePotentialConfig {
    pub cutoff: Option<f64>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileDumpConfig {
    pub path: PathBuf,
    pub every: Option<usize>,
    pub quantities: Vec<AtomQuantity>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileThermoConfig {
    pub path: PathBuf,
    pub every: Option<usize>,
    pub quantities: Option<Vec<ThermoQuantity>>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileOutputConfig {
    pub dump: Option<FileDumpConfig>,
    pub thermo: Option<FileThermoConfig>,
}

/// The configuration file as written by the user; every section is optional.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub system: Option<FileSystemConfig>,
    pub integration: Option<FileIntegrationConfig>,
    pub potential: Option<FilePotentialConfig>,
    pub output: Option<FileOutputConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| match e {
            CliError::Other(source) => CliError::FileParsing {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| CliError::Other(e.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_file_is_parsed_into_sections() {
        let config = FileConfig::from_toml_str(
            r#"
            [system]
            boundary = { kind = "periodic", box-length = 12.0 }

            [system.positions]
            kind = "manual"
            rows = [[0.0], [1.5]]

            [system.velocities]
            kind = "temperature"
            kelvin = 119.7
            seed = 42

            [integration]
            total-time = 10.0
            timestep = 0.001
            integrator = "euler-cromer"

            [potential]
            cutoff = 2.5

            [output.dump]
            path = "traj.xyz"
            every = 50
            quantities = ["x", "vx"]

            [output.thermo]
            path = "thermo.log"
            quantities = ["step", "toteng"]
            "#,
        )
        .unwrap();

        let system = config.system.unwrap();
        assert_eq!(
            system.positions,
            Some(PositionSpec::Manual {
                rows: vec![vec![0.0], vec![1.5]]
            })
        );
        assert_eq!(
            system.velocities,
            Some(VelocitySpec::Temperature {
                kelvin: 119.7,
                seed: Some(42)
            })
        );
        assert_eq!(
            system.boundary,
            Some(FileBoundary::Periodic { box_length: 12.0 })
        );

        let integration = config.integration.unwrap();
        assert_eq!(integration.total_time, Some(10.0));
        assert_eq!(integration.integrator, Some(Integrator::EulerCromer));
        assert_eq!(config.potential.unwrap().cutoff, Some(2.5));

        let output = config.output.unwrap();
        let dump = output.dump.unwrap();
        assert_eq!(dump.every, Some(50));
        assert_eq!(dump.quantities, vec![AtomQuantity::X, AtomQuantity::Vx]);
        let thermo = output.thermo.unwrap();
        assert_eq!(thermo.every, None);
        assert_eq!(
            thermo.quantities,
            Some(vec![ThermoQuantity::Step, ThermoQuantity::TotEng])
        );
    }

    #[test]
    fn lattice_positions_use_their_defaults() {
        let config = FileConfig::from_toml_str(
            r#"
            [system.positions]
            kind = "fcc"
            cells = 3
            "#,
        )
        .unwrap();
        assert_eq!(
            config.system.unwrap().positions,
            Some(PositionSpec::Fcc {
                cells: 3,
                lenbulk: 3.0
            })
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = FileConfig::from_toml_str(
            r#"
            [integration]
            time-step = 0.01
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn boundary_conversion_validates_box_length() {
        assert_eq!(
            BoundaryPolicy::try_from(FileBoundary::Open),
            Ok(BoundaryPolicy::Open)
        );
        assert_eq!(
            BoundaryPolicy::try_from(FileBoundary::Reflective { box_length: -1.0 }),
            Err(BoundaryError::InvalidBoxLength(-1.0))
        );
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = FileConfig::from_file(&dir.path().join("missing.toml"));
        assert!(matches!(result, Err(CliError::Io(_))));
    }

    #[test]
    fn malformed_file_reports_its_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[integration\n").unwrap();

        let result = FileConfig::from_file(&path);
        assert!(matches!(result, Err(CliError::FileParsing { path: p, .. }) if p == path));
    }
}
