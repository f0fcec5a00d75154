use super::OutputError;
use crate::core::models::state::SimulationState;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// A per-particle column of a trajectory dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AtomQuantity {
    X,
    Y,
    Z,
    Vx,
    Vy,
    Vz,
    Fx,
    Fy,
    Fz,
}

impl AtomQuantity {
    pub fn label(&self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
            Self::Vx => "vx",
            Self::Vy => "vy",
            Self::Vz => "vz",
            Self::Fx => "fx",
            Self::Fy => "fy",
            Self::Fz => "fz",
        }
    }

    /// Spatial axis the column refers to.
    pub fn axis(&self) -> usize {
        match self {
            Self::X | Self::Vx | Self::Fx => 0,
            Self::Y | Self::Vy | Self::Fy => 1,
            Self::Z | Self::Vz | Self::Fz => 2,
        }
    }

    pub(crate) fn check_dimensions(&self, num_dimensions: usize) -> Result<(), OutputError> {
        if self.axis() < num_dimensions {
            Ok(())
        } else {
            Err(OutputError::UnsupportedQuantity {
                quantity: self.label(),
                num_dimensions,
            })
        }
    }

    pub(crate) fn value(&self, state: &SimulationState, particle: usize) -> f64 {
        let field = match self {
            Self::X | Self::Y | Self::Z => state.positions(),
            Self::Vx | Self::Vy | Self::Vz => state.velocities(),
            Self::Fx | Self::Fy | Self::Fz => state.accelerations(),
        };
        field[(particle, self.axis())]
    }
}

impl FromStr for AtomQuantity {
    type Err = OutputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let quantity = match s {
            "x" => Self::X,
            "y" => Self::Y,
            "z" => Self::Z,
            "vx" => Self::Vx,
            "vy" => Self::Vy,
            "vz" => Self::Vz,
            "fx" => Self::Fx,
            "fy" => Self::Fy,
            "fz" => Self::Fz,
            other => return Err(OutputError::UnknownQuantity(other.to_string())),
        };
        Ok(quantity)
    }
}

impl fmt::Display for AtomQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A scalar column of the thermo log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThermoQuantity {
    Step,
    Time,
    Atoms,
    PotEng,
    KinEng,
    TotEng,
    Temp,
}

impl ThermoQuantity {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Step => "step",
            Self::Time => "time",
            Self::Atoms => "atoms",
            Self::PotEng => "poteng",
            Self::KinEng => "kineng",
            Self::TotEng => "toteng",
            Self::Temp => "temp",
        }
    }

    pub fn needs_potential_energy(&self) -> bool {
        matches!(self, Self::PotEng | Self::TotEng)
    }

    pub(crate) fn format(&self, state: &SimulationState) -> String {
        match self {
            Self::Step => state.step().to_string(),
            Self::Atoms => state.num_particles().to_string(),
            Self::Time => format!("{:.6}", state.time()),
            Self::PotEng => format_optional(state.potential_energy()),
            Self::KinEng => format!("{:.8}", state.kinetic_energy()),
            Self::TotEng => format_optional(state.total_energy()),
            Self::Temp => format!("{:.8}", state.temperature()),
        }
    }
}

fn format_optional(value: Option<f64>) -> String {
    value.map_or_else(|| "nan".to_string(), |v| format!("{:.8}", v))
}

impl FromStr for ThermoQuantity {
    type Err = OutputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let quantity = match s {
            "step" => Self::Step,
            "time" => Self::Time,
            "atoms" => Self::Atoms,
            "poteng" => Self::PotEng,
            "kineng" => Self::KinEng,
            "toteng" => Self::TotEng,
            "temp" => Self::Temp,
            other => return Err(OutputError::UnknownQuantity(other.to_string())),
        };
        Ok(quantity)
    }
}

impl fmt::Display for ThermoQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
