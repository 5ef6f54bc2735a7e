//! # Beam Stress Formulas
//!
//! Classical Euler–Bernoulli stress formulas and 2-D stress transformation.
//!
//! ## Sign Conventions
//!
//! - **Moment**: positive causes tension on the bottom fiber (sagging)
//! - **Shear**: positive when the resultant of forces left of the cut acts upward
//! - **Stress**: tension positive
//!
//! ## References
//!
//! - Gere & Goodno, Mechanics of Materials, Sections 5.5 and 5.8
//! - Mohr, O. (1882), stress circle construction

/// Bending (flexure) stress at distance `y` above the neutral axis
///
/// # Formula
/// σ = −M·y / I
///
/// # Example
/// ```rust
/// use beam_core::equations::stress::flexure_stress;
///
/// // Sagging moment puts the top fiber in compression
/// assert!(flexure_stress(10.0, 0.15, 4.5e-4) < 0.0);
/// ```
#[inline]
pub fn flexure_stress(moment: f64, y: f64, inertia: f64) -> f64 {
    -moment * y / inertia
}

/// Transverse shear stress from the shear formula
///
/// # Formula
/// τ = −V·Q / (I·b)
#[inline]
pub fn shear_formula_stress(shear: f64, first_moment: f64, inertia: f64, width: f64) -> f64 {
    -shear * first_moment / (inertia * width)
}

/// Principal stresses of the in-plane block [[σ, τ], [τ, 0]]
///
/// # Formula
/// σ₁,₂ = σ/2 ± √((σ/2)² + τ²)
///
/// Returns `(σ₁, σ₂)` with σ₁ ≥ σ₂.
///
/// # Example
/// ```rust
/// use beam_core::equations::stress::principal_stresses;
///
/// // Pure shear: ±τ
/// let (s1, s2) = principal_stresses(0.0, 5.0);
/// assert_eq!((s1, s2), (5.0, -5.0));
/// ```
#[inline]
pub fn principal_stresses(sigma: f64, tau: f64) -> (f64, f64) {
    let center = sigma / 2.0;
    let radius = mohr_radius(sigma, tau);
    (center + radius, center - radius)
}

/// Radius of Mohr's circle for the in-plane block [[σ, τ], [τ, 0]]
///
/// Equal to the maximum in-plane shear stress.
#[inline]
pub fn mohr_radius(sigma: f64, tau: f64) -> f64 {
    (sigma / 2.0).hypot(tau)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_flexure_stress_sign() {
        // Sagging: bottom (y < 0) in tension
        assert!(flexure_stress(1000.0, -0.15, 4.5e-4) > 0.0);
        assert!(flexure_stress(1000.0, 0.15, 4.5e-4) < 0.0);
        assert_eq!(flexure_stress(1000.0, 0.0, 4.5e-4), 0.0);
    }

    #[test]
    fn test_flexure_stress_value() {
        // M = 5 kN·m on 200x300: σ_top = -5000 * 0.15 / 4.5e-4 = -1.6667 MPa
        assert_relative_eq!(flexure_stress(5000.0, 0.15, 4.5e-4), -1.0e6 * 5.0 / 3.0, max_relative = 1e-12);
    }

    #[test]
    fn test_shear_formula_peak_is_one_and_half_average() {
        let (b, d, v) = (0.2_f64, 0.3_f64, 6000.0_f64);
        let i = b * d.powi(3) / 12.0;
        let q = b * d * d / 8.0;
        let tau = shear_formula_stress(v, q, i, b);
        assert_relative_eq!(tau.abs(), 1.5 * v / (b * d), max_relative = 1e-12);
    }

    #[test]
    fn test_principal_stresses_uniaxial() {
        let (s1, s2) = principal_stresses(10.0, 0.0);
        assert_relative_eq!(s1, 10.0);
        assert_relative_eq!(s2, 0.0);

        let (s1, s2) = principal_stresses(-10.0, 0.0);
        assert_relative_eq!(s1, 0.0);
        assert_relative_eq!(s2, -10.0);
    }

    #[test]
    fn test_principal_stress_invariants() {
        let (sigma, tau) = (12.0, -4.0);
        let (s1, s2) = principal_stresses(sigma, tau);
        // Trace and determinant of [[σ, τ], [τ, 0]]
        assert_relative_eq!(s1 + s2, sigma, epsilon = 1e-12);
        assert_relative_eq!(s1 * s2, -tau * tau, epsilon = 1e-9);
        assert_relative_eq!(mohr_radius(sigma, tau), (s1 - s2) / 2.0, epsilon = 1e-12);
    }
}
