use nalgebra::DMatrix;

/// Highest spatial dimensionality a run may use.
pub const MAX_DIMENSIONS: usize = 3;

/// Particle positions, one row per particle.
pub type Positions = DMatrix<f64>;

/// Particle velocities, same shape as [`Positions`].
pub type Velocities = DMatrix<f64>;

/// Per-particle forces. With unit mass these are also the accelerations.
pub type Forces = DMatrix<f64>;

#[inline]
pub fn is_supported_dimension(num_dimensions: usize) -> bool {
    (1..=MAX_DIMENSIONS).contains(&num_dimensions)
}

#[inline]
pub fn same_shape(a: &DMatrix<f64>, b: &DMatrix<f64>) -> bool {
    a.shape() == b.shape()
}

#[inline]
pub fn all_finite(field: &DMatrix<f64>) -> bool {
    field.iter().all(|value| value.is_finite())
}

/// Builds a dense field from nested rows, returning `None` for ragged input.
pub fn from_rows(rows: &[Vec<f64>]) -> Option<DMatrix<f64>> {
    let num_columns = rows.first().map_or(0, Vec::len);
    if rows.iter().any(|row| row.len() != num_columns) {
        return None;
    }
    Some(DMatrix::from_fn(rows.len(), num_columns, |i, d| rows[i][d]))
}

/// Half the sum of squared velocities (unit mass).
pub fn kinetic_energy(velocities: &Velocities) -> f64 {
    0.5 * velocities.iter().map(|v| v * v).sum::<f64>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_keeps_particle_order() {
        let field = from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]).unwrap();
        assert_eq!(field.shape(), (3, 2));
        assert_eq!(field[(0, 1)], 2.0);
        assert_eq!(field[(2, 0)], 5.0);
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        assert!(from_rows(&[vec![1.0, 2.0], vec![3.0]]).is_none());
    }

    #[test]
    fn kinetic_energy_is_half_the_squared_speed_sum() {
        let velocities = Velocities::from_row_slice(2, 2, &[1.0, 0.0, 2.0, 2.0]);
        assert_eq!(kinetic_energy(&velocities), 4.5);
    }

    #[test]
    fn supported_dimensions_are_one_to_three() {
        assert!(!is_supported_dimension(0));
        assert!(is_supported_dimension(1));
        assert!(is_supported_dimension(3));
        assert!(!is_supported_dimension(4));
    }

    #[test]
    fn all_finite_detects_nan() {
        let mut field = Positions::zeros(2, 3);
        assert!(all_finite(&field));
        field[(1, 2)] = f64::NAN;
        assert!(!all_finite(&field));
    }
}
