use super::OutputError;
use super::quantity::AtomQuantity;
use crate::core::models::state::SimulationState;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes per-particle trajectory frames in an XYZ-style layout.
///
/// Each frame starts with the particle count, followed by a comment line carrying the
/// step, the simulated time and the column names, and then one line per particle.
pub struct DumpWriter<W: Write> {
    writer: W,
    every: usize,
    quantities: Vec<AtomQuantity>,
    frames_written: usize,
    columns_checked: bool,
}

impl DumpWriter<BufWriter<File>> {
    pub fn create<P: AsRef<Path>>(
        path: P,
        every: usize,
        quantities: Vec<AtomQuantity>,
    ) -> Result<Self, OutputError> {
        let file = File::create(path)?;
        Self::new(BufWriter::new(file), every, quantities)
    }
}

impl<W: Write> DumpWriter<W> {
    pub fn new(writer: W, every: usize, quantities: Vec<AtomQuantity>) -> Result<Self, OutputError> {
        if every == 0 {
            return Err(OutputError::InvalidFrequency);
        }
        if quantities.is_empty() {
            return Err(OutputError::NoQuantities);
        }
        Ok(Self {
            writer,
            every,
            quantities,
            frames_written: 0,
            columns_checked: false,
        })
    }

    pub fn every(&self) -> usize {
        self.every
    }

    pub fn frames_written(&self) -> usize {
        self.frames_written
    }

    #[inline]
    pub fn is_due(&self, step: usize) -> bool {
        step % self.every == 0
    }

    /// Writes a frame if the state's step is a multiple of the dump frequency.
    ///
    /// The requested columns are checked against the run's dimensionality on the first
    /// call, whether or not that step is due.
    pub fn record(&mut self, state: &SimulationState) -> Result<(), OutputError> {
        if !self.columns_checked {
            self.check_columns(state.num_dimensions())?;
        }
        if self.is_due(state.step()) {
            self.write_frame(state)?;
        }
        Ok(())
    }

    pub fn write_frame(&mut self, state: &SimulationState) -> Result<(), OutputError> {
        self.check_columns(state.num_dimensions())?;

        let columns: Vec<&str> = self.quantities.iter().map(AtomQuantity::label).collect();
        writeln!(self.writer, "{}", state.num_particles())?;
        writeln!(
            self.writer,
            "step={} time={:.6} columns={}",
            state.step(),
            state.time(),
            columns.join(",")
        )?;

        for particle in 0..state.num_particles() {
            let line: Vec<String> = self
                .quantities
                .iter()
                .map(|quantity| format!("{:.6}", quantity.value(state, particle)))
                .collect();
            writeln!(self.writer, "{}", line.join(" "))?;
        }

        self.frames_written += 1;
        Ok(())
    }

    fn check_columns(&mut self, num_dimensions: usize) -> Result<(), OutputError> {
        for quantity in &self.quantities {
            quantity.check_dimensions(num_dimensions)?;
        }
        self.columns_checked = true;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), OutputError> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
