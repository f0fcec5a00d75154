use mdsolver::core::forcefield::lennard_jones::DEFAULT_CUTOFF;
use mdsolver::core::integrator::Integrator;
use mdsolver::core::io::quantity::ThermoQuantity;

/// Values used for every setting that neither the file nor the command line provides.
pub struct DefaultsConfig {
    pub total_time: f64,
    pub timestep: f64,
    pub cutoff: f64,
    pub integrator: Integrator,
    pub dump_every: usize,
    pub thermo_every: usize,
    pub thermo_quantities: Vec<ThermoQuantity>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            total_time: 5.0,
            timestep: 0.01,
            cutoff: DEFAULT_CUTOFF,
            integrator: Integrator::VelocityVerlet,
            dump_every: 100,
            thermo_every: 10,
            thermo_quantities: vec![
                ThermoQuantity::Step,
                ThermoQuantity::Time,
                ThermoQuantity::PotEng,
                ThermoQuantity::KinEng,
                ThermoQuantity::TotEng,
                ThermoQuantity::Temp,
            ],
        }
    }
}
