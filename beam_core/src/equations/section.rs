//! # Cross-Section Property Formulas
//!
//! Closed-form geometric properties of solid rectangular cross-sections, in
//! any consistent length unit.
//!
//! ## Notation
//!
//! - `A` = Cross-sectional area
//! - `I` = Moment of inertia (second moment of area) about the centroidal axis
//! - `Q` = First moment of area beyond a fiber, about the neutral axis
//! - `b` = Width of section
//! - `d` = Depth (height) of section
//!
//! ## References
//!
//! - Roark's Formulas for Stress and Strain, 8th Edition, Chapter 3
//! - Gere & Goodno, Mechanics of Materials, Section 5.8 (shear in rectangular beams)

// =============================================================================
// RECTANGULAR SECTION PROPERTIES
// =============================================================================

/// Calculate cross-sectional area for rectangular section
///
/// # Formula
/// A = b × d
///
/// # Example
/// ```rust
/// use beam_core::equations::section::rectangular_area;
///
/// let area = rectangular_area(0.2, 0.3);
/// assert!((area - 0.06).abs() < 1e-12);
/// ```
#[inline]
pub fn rectangular_area(b: f64, d: f64) -> f64 {
    b * d
}

/// Calculate moment of inertia for rectangular section about its centroidal axis
///
/// ```text
///     ┌─────────┐
///     │         │
///   d │ ════════│ ← neutral axis at d/2
///     │         │
///     └─────────┘
///          b
/// ```
///
/// # Formula
/// I = bd³/12
///
/// # Example
/// ```rust
/// use beam_core::equations::section::rectangular_moment_of_inertia;
///
/// // 200 mm x 300 mm section
/// let i = rectangular_moment_of_inertia(0.2, 0.3);
/// assert!((i - 4.5e-4).abs() < 1e-12);
/// ```
#[inline]
pub fn rectangular_moment_of_inertia(b: f64, d: f64) -> f64 {
    b * d.powi(3) / 12.0
}

/// First moment of area of the part of a rectangle beyond a fiber
///
/// `eta` is the distance of the fiber from the rectangle's own centroid.
/// The area between the fiber and the nearer extreme fiber is taken, so the
/// result is symmetric in `eta`.
///
/// ```text
///     ┌─────────┐  ← extreme fiber, eta = d/2
///     │▒▒▒▒▒▒▒▒▒│  ← area counted in Q
///     ├─────────┤  ← fiber at eta
///     │ ════════│  ← centroid, eta = 0
///     └─────────┘
/// ```
///
/// # Formula
/// Q = (b/2)·(d²/4 − η²), zero for |η| ≥ d/2
///
/// # Example
/// ```rust
/// use beam_core::equations::section::rectangular_first_moment;
///
/// // Maximum at the centroid: b·d²/8
/// let q = rectangular_first_moment(0.2, 0.3, 0.0);
/// assert!((q - 0.2 * 0.09 / 8.0).abs() < 1e-12);
/// assert_eq!(rectangular_first_moment(0.2, 0.3, 0.15), 0.0);
/// ```
#[inline]
pub fn rectangular_first_moment(b: f64, d: f64, eta: f64) -> f64 {
    let half = d / 2.0;
    if eta.abs() >= half {
        return 0.0;
    }
    b / 2.0 * (half * half - eta * eta)
}

/// Centroid height of the material remaining after removing `notch` from the
/// bottom of a rectangle of depth `d` centred on y = 0
///
/// # Formula
/// y_c = ((−d/2 + notch) + d/2) / 2 = notch / 2
#[inline]
pub fn reduced_rectangle_centroid(notch: f64) -> f64 {
    notch / 2.0
}

// =============================================================================
// UNIT TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rectangular_area() {
        assert_relative_eq!(rectangular_area(0.2, 0.3), 0.06, epsilon = 1e-12);
    }

    #[test]
    fn test_rectangular_moment_of_inertia() {
        // I = 0.2 * 0.3^3 / 12 = 4.5e-4
        assert_relative_eq!(rectangular_moment_of_inertia(0.2, 0.3), 4.5e-4, max_relative = 1e-12);
    }

    #[test]
    fn test_first_moment_symmetry() {
        let above = rectangular_first_moment(0.2, 0.3, 0.05);
        let below = rectangular_first_moment(0.2, 0.3, -0.05);
        assert_eq!(above, below);
        // (0.1)*(0.0225 - 0.0025) = 0.002
        assert_relative_eq!(above, 0.002, max_relative = 1e-12);
    }

    #[test]
    fn test_first_moment_vanishes_at_extreme_fibers() {
        assert_eq!(rectangular_first_moment(0.2, 0.3, 0.15), 0.0);
        assert_eq!(rectangular_first_moment(0.2, 0.3, -0.15), 0.0);
        assert_eq!(rectangular_first_moment(0.2, 0.3, 0.2), 0.0);
    }

    #[test]
    fn test_first_moment_matches_area_times_lever_arm() {
        // Q = A' * ybar' for the strip above eta
        let (b, d, eta) = (0.2_f64, 0.3_f64, 0.06_f64);
        let strip = d / 2.0 - eta;
        let lever = eta + strip / 2.0;
        assert_relative_eq!(rectangular_first_moment(b, d, eta), b * strip * lever, max_relative = 1e-12);
    }

    #[test]
    fn test_reduced_centroid() {
        assert_eq!(reduced_rectangle_centroid(0.0), 0.0);
        assert_relative_eq!(reduced_rectangle_centroid(0.15), 0.075);
    }
}
