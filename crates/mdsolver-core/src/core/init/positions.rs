use super::InitError;
use crate::core::models::fields::{self, Positions};
use itertools::iproduct;

/// Fractional coordinates of the four basis sites of an FCC unit cell.
const FCC_BASIS: [[f64; 3]; 4] = [
    [0.0, 0.0, 0.0],
    [0.5, 0.5, 0.0],
    [0.5, 0.0, 0.5],
    [0.0, 0.5, 0.5],
];

pub trait PositionInitializer {
    fn build(&self) -> Result<Positions, InitError>;
}

/// Positions given explicitly, one row per particle.
#[derive(Debug, Clone, PartialEq)]
pub struct SetPositions {
    rows: Vec<Vec<f64>>,
}

impl SetPositions {
    pub fn new(rows: Vec<Vec<f64>>) -> Self {
        Self { rows }
    }
}

impl PositionInitializer for SetPositions {
    fn build(&self) -> Result<Positions, InitError> {
        rows_to_field(&self.rows)
    }
}

/// A cube of side `lenbulk` filled with `cells³` face-centred cubic unit cells.
///
/// Particles are ordered by unit cell (`i`, `j`, `k` ascending) and then by basis site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceCenteredCubic {
    pub cells: usize,
    pub lenbulk: f64,
}

impl Default for FaceCenteredCubic {
    fn default() -> Self {
        Self {
            cells: 1,
            lenbulk: 3.0,
        }
    }
}

impl FaceCenteredCubic {
    pub fn new(cells: usize, lenbulk: f64) -> Self {
        Self { cells, lenbulk }
    }

    pub fn num_particles(&self) -> usize {
        FCC_BASIS.len() * self.cells.pow(3)
    }
}

impl PositionInitializer for FaceCenteredCubic {
    fn build(&self) -> Result<Positions, InitError> {
        if self.cells == 0 {
            return Err(InitError::InvalidLattice(
                "at least one unit cell is required".to_string(),
            ));
        }
        if !(self.lenbulk.is_finite() && self.lenbulk > 0.0) {
            return Err(InitError::InvalidLattice(format!(
                "bulk length must be finite and positive (got {})",
                self.lenbulk
            )));
        }

        let cell_length = self.lenbulk / self.cells as f64;
        let mut positions = Positions::zeros(self.num_particles(), 3);
        let sites = iproduct!(0..self.cells, 0..self.cells, 0..self.cells, FCC_BASIS.iter());
        for (row, (i, j, k, basis)) in sites.enumerate() {
            let cell = [i as f64, j as f64, k as f64];
            for d in 0..3 {
                positions[(row, d)] = (cell[d] + basis[d]) * cell_length;
            }
        }
        Ok(positions)
    }
}

pub(crate) fn rows_to_field(rows: &[Vec<f64>]) -> Result<Positions, InitError> {
    let expected = rows.first().map(Vec::len).ok_or(InitError::Empty)?;
    if let Some((row, found)) = rows
        .iter()
        .map(Vec::len)
        .enumerate()
        .find(|&(_, len)| len != expected)
    {
        return Err(InitError::RaggedRows {
            row,
            expected,
            found,
        });
    }
    if !fields::is_supported_dimension(expected) {
        return Err(InitError::UnsupportedDimensions(expected));
    }
    fields::from_rows(rows).ok_or(InitError::Empty)
}
