use super::OutputError;
use super::quantity::ThermoQuantity;
use crate::core::models::state::SimulationState;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes whitespace-separated thermodynamic rows, one per due step.
///
/// The header line (`# step time ...`) is written as soon as the writer is created.
pub struct ThermoWriter<W: Write> {
    writer: W,
    every: usize,
    quantities: Vec<ThermoQuantity>,
    rows_written: usize,
}

impl ThermoWriter<BufWriter<File>> {
    pub fn create<P: AsRef<Path>>(
        path: P,
        every: usize,
        quantities: Vec<ThermoQuantity>,
    ) -> Result<Self, OutputError> {
        let file = File::create(path)?;
        Self::new(BufWriter::new(file), every, quantities)
    }
}

impl<W: Write> ThermoWriter<W> {
    pub fn new(
        mut writer: W,
        every: usize,
        quantities: Vec<ThermoQuantity>,
    ) -> Result<Self, OutputError> {
        if every == 0 {
            return Err(OutputError::InvalidFrequency);
        }
        if quantities.is_empty() {
            return Err(OutputError::NoQuantities);
        }

        let header: Vec<&str> = quantities.iter().map(ThermoQuantity::label).collect();
        writeln!(writer, "# {}", header.join(" "))?;

        Ok(Self {
            writer,
            every,
            quantities,
            rows_written: 0,
        })
    }

    pub fn every(&self) -> usize {
        self.every
    }

    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Whether any requested column depends on the potential energy.
    pub fn needs_potential_energy(&self) -> bool {
        self.quantities
            .iter()
            .any(ThermoQuantity::needs_potential_energy)
    }

    #[inline]
    pub fn is_due(&self, step: usize) -> bool {
        step % self.every == 0
    }

    pub fn record(&mut self, state: &SimulationState) -> Result<(), OutputError> {
        if self.is_due(state.step()) {
            self.write_row(state)?;
        }
        Ok(())
    }

    pub fn write_row(&mut self, state: &SimulationState) -> Result<(), OutputError> {
        let row: Vec<String> = self.quantities.iter().map(|q| q.format(state)).collect();
        writeln!(self.writer, "{}", row.join(" "))?;
        self.rows_written += 1;
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::fields::{Forces, Positions, Velocities};

    fn state(step: usize, energy: Option<f64>) -> SimulationState {
        let positions = Positions::from_row_slice(2, 1, &[0.0, 1.5]);
        let velocities = Velocities::from_row_slice(2, 1, &[1.0, -1.0]);
        let mut state = SimulationState::new(positions, velocities, 0.25);
        for _ in 0..step {
            state.commit_step(
                state.positions().clone(),
                state.velocities().clone(),
                Forces::zeros(2, 1),
                energy,
            );
        }
        state
    }

    fn lines(writer: ThermoWriter<Vec<u8>>) -> Vec<String> {
        String::from_utf8(writer.into_inner())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn header_is_written_on_creation() {
        let thermo = ThermoWriter::new(
            Vec::new(),
            1,
            vec![ThermoQuantity::Step, ThermoQuantity::TotEng],
        )
        .unwrap();
        assert_eq!(lines(thermo), vec!["# step toteng"]);
    }

    #[test]
    fn rows_follow_requested_column_order() {
        let mut thermo = ThermoWriter::new(
            Vec::new(),
            1,
            vec![
                ThermoQuantity::Step,
                ThermoQuantity::Time,
                ThermoQuantity::Atoms,
                ThermoQuantity::KinEng,
                ThermoQuantity::PotEng,
                ThermoQuantity::TotEng,
            ],
        )
        .unwrap();
        thermo.write_row(&state(2, Some(-0.5))).unwrap();

        assert_eq!(
            lines(thermo)[1],
            "2 0.500000 2 1.00000000 -0.50000000 0.50000000"
        );
    }

    #[test]
    fn missing_energy_is_written_as_nan() {
        let mut thermo =
            ThermoWriter::new(Vec::new(), 1, vec![ThermoQuantity::PotEng]).unwrap();
        thermo.write_row(&state(1, None)).unwrap();
        assert_eq!(lines(thermo)[1], "nan");
    }

    #[test]
    fn energy_columns_request_potential_energy() {
        let kinetic = ThermoWriter::new(Vec::new(), 1, vec![ThermoQuantity::KinEng]).unwrap();
        let total = ThermoWriter::new(Vec::new(), 1, vec![ThermoQuantity::TotEng]).unwrap();
        assert!(!kinetic.needs_potential_energy());
        assert!(total.needs_potential_energy());
    }

    #[test]
    fn record_respects_frequency() {
        let mut thermo = ThermoWriter::new(Vec::new(), 2, vec![ThermoQuantity::Step]).unwrap();
        for step in 1..=5 {
            thermo.record(&state(step, None)).unwrap();
        }
        assert_eq!(thermo.rows_written(), 2);
        assert_eq!(lines(thermo), vec!["# step", "2", "4"]);
    }

    #[test]
    fn new_rejects_invalid_configuration() {
        assert!(matches!(
            ThermoWriter::new(Vec::new(), 0, vec![ThermoQuantity::Step]),
            Err(OutputError::InvalidFrequency)
        ));
        assert!(matches!(
            ThermoWriter::new(Vec::new(), 1, vec![]),
            Err(OutputError::NoQuantities)
        ));
    }
}
