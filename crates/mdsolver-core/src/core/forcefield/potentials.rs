//! Scalar Lennard-Jones kernels in reduced units (σ = ε = 1).
//!
//! All kernels take the squared separation so the pair loop never needs a square root.

/// Inverse sixth and twelfth powers of the separation, `(r⁻⁶, r⁻¹²)`.
#[inline]
pub fn inverse_powers(dist_sqrd: f64) -> (f64, f64) {
    let r6 = dist_sqrd.powi(-3);
    (r6, r6 * r6)
}

/// Unshifted pair energy `4(r⁻¹² − r⁻⁶)`.
#[inline]
pub fn lennard_jones_energy(r6: f64, r12: f64) -> f64 {
    4.0 * (r12 - r6)
}

/// Factor that turns the displacement vector `R = rᵢ − rⱼ` into the force on `i`.
///
/// The force on `i` is `force_scale · R`, so a positive value means repulsion.
#[inline]
pub fn lennard_jones_force_scale(dist_sqrd: f64, r6: f64, r12: f64) -> f64 {
    24.0 * (2.0 * r12 - r6) / dist_sqrd
}

/// Energy offset that makes the truncated potential vanish at the cutoff.
#[inline]
pub fn energy_shift(cutoff_sqrd: f64) -> f64 {
    let (cutoff6, cutoff12) = inverse_powers(cutoff_sqrd);
    lennard_jones_energy(cutoff6, cutoff12)
}

/// Separation of the potential minimum, `2^(1/6)`.
#[inline]
pub fn equilibrium_separation() -> f64 {
    2f64.powf(1.0 / 6.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-12;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn energy_at_unit_separation_is_zero() {
        let (r6, r12) = inverse_powers(1.0);
        assert!(f64_approx_equal(lennard_jones_energy(r6, r12), 0.0));
    }

    #[test]
    fn energy_at_equilibrium_is_minus_well_depth() {
        let r_min = equilibrium_separation();
        let (r6, r12) = inverse_powers(r_min * r_min);
        assert!(f64_approx_equal(lennard_jones_energy(r6, r12), -1.0));
    }

    #[test]
    fn force_vanishes_at_equilibrium() {
        let r_min = equilibrium_separation();
        let dist_sqrd = r_min * r_min;
        let (r6, r12) = inverse_powers(dist_sqrd);
        assert!(f64_approx_equal(
            lennard_jones_force_scale(dist_sqrd, r6, r12),
            0.0
        ));
    }

    #[test]
    fn force_is_repulsive_inside_and_attractive_outside_equilibrium() {
        let (r6, r12) = inverse_powers(1.0);
        assert!(lennard_jones_force_scale(1.0, r6, r12) > 0.0);

        let (r6, r12) = inverse_powers(2.25);
        assert!(lennard_jones_force_scale(2.25, r6, r12) < 0.0);
    }

    #[test]
    fn force_scale_matches_negative_energy_gradient() {
        let r: f64 = 1.3;
        let h = 1e-6;
        let energy_at = |x: f64| {
            let (r6, r12) = inverse_powers(x * x);
            lennard_jones_energy(r6, r12)
        };
        let numeric_force = -(energy_at(r + h) - energy_at(r - h)) / (2.0 * h);

        let (r6, r12) = inverse_powers(r * r);
        let analytic_force = lennard_jones_force_scale(r * r, r6, r12) * r;

        assert!((numeric_force - analytic_force).abs() < 1e-6);
    }

    #[test]
    fn shifted_energy_is_zero_at_cutoff() {
        let cutoff_sqrd = 9.0;
        let (r6, r12) = inverse_powers(cutoff_sqrd);
        assert!(f64_approx_equal(
            lennard_jones_energy(r6, r12) - energy_shift(cutoff_sqrd),
            0.0
        ));
    }
}
