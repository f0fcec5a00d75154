//! Per-step hooks invoked by the simulation loop.

use crate::core::io::OutputError;
use crate::core::io::dump::DumpWriter;
use crate::core::io::thermo::ThermoWriter;
use crate::core::models::state::SimulationState;
use std::io::Write;

/// Receives the full simulation state after every completed step.
///
/// Observers decide on their own whether a given step is of interest. Returning an error
/// from [`Observer::notify`] aborts the run after the current step.
pub trait Observer {
    /// Whether the observer reads [`SimulationState::potential_energy`].
    ///
    /// The loop only pays for energy evaluation when at least one observer asks for it.
    fn needs_potential_energy(&self) -> bool {
        false
    }

    fn notify(&mut self, state: &SimulationState) -> Result<(), OutputError>;

    /// Called once after the last step.
    fn finish(&mut self) -> Result<(), OutputError> {
        Ok(())
    }
}

impl<W: Write> Observer for DumpWriter<W> {
    fn notify(&mut self, state: &SimulationState) -> Result<(), OutputError> {
        self.record(state)
    }

    fn finish(&mut self) -> Result<(), OutputError> {
        self.flush()
    }
}

impl<W: Write> Observer for ThermoWriter<W> {
    fn needs_potential_energy(&self) -> bool {
        ThermoWriter::needs_potential_energy(self)
    }

    fn notify(&mut self, state: &SimulationState) -> Result<(), OutputError> {
        self.record(state)
    }

    fn finish(&mut self) -> Result<(), OutputError> {
        self.flush()
    }
}

/// Adapts a closure into an [`Observer`].
pub struct CallbackObserver<F> {
    callback: F,
    needs_energy: bool,
}

impl<F> CallbackObserver<F>
where
    F: FnMut(&SimulationState),
{
    pub fn new(callback: F) -> Self {
        Self {
            callback,
            needs_energy: false,
        }
    }

    /// Like [`CallbackObserver::new`], but requests the potential energy on every step.
    pub fn with_energy(callback: F) -> Self {
        Self {
            callback,
            needs_energy: true,
        }
    }
}

impl<F> Observer for CallbackObserver<F>
where
    F: FnMut(&SimulationState),
{
    fn needs_potential_energy(&self) -> bool {
        self.needs_energy
    }

    fn notify(&mut self, state: &SimulationState) -> Result<(), OutputError> {
        (self.callback)(state);
        Ok(())
    }
}
