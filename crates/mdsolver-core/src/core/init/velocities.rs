use super::InitError;
use super::positions::rows_to_field;
use crate::core::models::fields::Velocities;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

/// Well depth of argon expressed in Kelvin, `ε / k_B`.
pub const ARGON_EPSILON_KELVIN: f64 = 119.7;

pub trait VelocityInitializer {
    fn build(&self, num_particles: usize, num_dimensions: usize) -> Result<Velocities, InitError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ZeroVelocities;

impl VelocityInitializer for ZeroVelocities {
    fn build(&self, num_particles: usize, num_dimensions: usize) -> Result<Velocities, InitError> {
        Ok(Velocities::zeros(num_particles, num_dimensions))
    }
}

/// Velocities given explicitly, one row per particle.
#[derive(Debug, Clone, PartialEq)]
pub struct SetVelocities {
    rows: Vec<Vec<f64>>,
}

impl SetVelocities {
    pub fn new(rows: Vec<Vec<f64>>) -> Self {
        Self { rows }
    }
}

impl VelocityInitializer for SetVelocities {
    fn build(&self, num_particles: usize, num_dimensions: usize) -> Result<Velocities, InitError> {
        let velocities = rows_to_field(&self.rows)?;
        if velocities.shape() != (num_particles, num_dimensions) {
            return Err(InitError::ShapeMismatch {
                num_particles,
                num_dimensions,
                found: velocities.shape(),
            });
        }
        Ok(velocities)
    }
}

/// Independent normally distributed velocity components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianVelocities {
    pub mean: f64,
    pub std_dev: f64,
    /// Fixed seed for reproducible runs; entropy-seeded when `None`.
    pub seed: Option<u64>,
}

impl VelocityInitializer for GaussianVelocities {
    fn build(&self, num_particles: usize, num_dimensions: usize) -> Result<Velocities, InitError> {
        sample_normal(self.mean, self.std_dev, self.seed, num_particles, num_dimensions)
    }
}

/// Normally distributed velocities whose variance matches a target temperature.
///
/// In reduced units the temperature is `⟨v²⟩`, so the components are drawn with
/// standard deviation `sqrt(T / 119.7 K)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureVelocities {
    pub kelvin: f64,
    pub seed: Option<u64>,
}

impl TemperatureVelocities {
    pub fn reduced_temperature(&self) -> f64 {
        self.kelvin / ARGON_EPSILON_KELVIN
    }
}

impl VelocityInitializer for TemperatureVelocities {
    fn build(&self, num_particles: usize, num_dimensions: usize) -> Result<Velocities, InitError> {
        let reduced = self.reduced_temperature();
        if !(reduced.is_finite() && reduced >= 0.0) {
            return Err(InitError::InvalidDistribution(format!(
                "temperature must be finite and non-negative (got {} K)",
                self.kelvin
            )));
        }
        sample_normal(0.0, reduced.sqrt(), self.seed, num_particles, num_dimensions)
    }
}

fn sample_normal(
    mean: f64,
    std_dev: f64,
    seed: Option<u64>,
    num_particles: usize,
    num_dimensions: usize,
) -> Result<Velocities, InitError> {
    if !mean.is_finite() {
        return Err(InitError::InvalidDistribution(format!(
            "mean must be finite (got {})",
            mean
        )));
    }
    if !(std_dev.is_finite() && std_dev >= 0.0) {
        return Err(InitError::InvalidDistribution(format!(
            "standard deviation must be finite and non-negative (got {})",
            std_dev
        )));
    }
    let normal =
        Normal::new(mean, std_dev).map_err(|e| InitError::InvalidDistribution(e.to_string()))?;
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut velocities = Velocities::zeros(num_particles, num_dimensions);
    for i in 0..num_particles {
        for d in 0..num_dimensions {
            velocities[(i, d)] = normal.sample(&mut rng);
        }
    }
    Ok(velocities)
}
