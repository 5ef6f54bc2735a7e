//! # Prismatic Beam Section
//!
//! Geometry of the beam: length along x, a solid rectangular cross-section of
//! width b (along z) and height h (along y), centroid at y = 0.
//!
//! ```text
//!   y
//!   ↑     ┌─────────┐  y = +h/2 (top fiber)
//!   │     │         │
//!   0 ────│ ════════│  centroid
//!   │     │         │
//!         └─────────┘  y = −h/2 (bottom fiber, support level)
//!              b
//! ```
//!
//! ## Example
//! ```rust
//! use beam_core::section::Section;
//!
//! let section = Section::from_millimeters(4.0, 200.0, 300.0).unwrap();
//! assert!((section.moment_of_inertia() - 4.5e-4).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::section::{
    rectangular_area, rectangular_first_moment, rectangular_moment_of_inertia,
};
use crate::errors::{require_finite, CalcError, CalcResult};
use crate::units::mm_to_m;

/// Beam geometry with derived moment of inertia.
///
/// Fields are private so I stays consistent with b and h.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Section {
    length_m: f64,
    width_m: f64,
    height_m: f64,
    inertia_m4: f64,
}

impl Section {
    /// Create a section from dimensions in meters.
    ///
    /// # Errors
    /// `DegenerateGeometry` if any dimension is not strictly positive.
    pub fn new(length_m: f64, width_m: f64, height_m: f64) -> CalcResult<Self> {
        for (field, value) in [("length", length_m), ("width", width_m), ("height", height_m)] {
            require_finite(field, value)?;
            if value <= 0.0 {
                return Err(CalcError::degenerate_geometry(
                    field,
                    format!("{field} must be positive, got {value} m"),
                ));
            }
        }

        Ok(Section {
            length_m,
            width_m,
            height_m,
            inertia_m4: rectangular_moment_of_inertia(width_m, height_m),
        })
    }

    /// Create a section with length in meters and cross-section in millimeters.
    pub fn from_millimeters(length_m: f64, width_mm: f64, height_mm: f64) -> CalcResult<Self> {
        Section::new(length_m, mm_to_m(width_mm), mm_to_m(height_mm))
    }

    /// Beam length L (m)
    pub fn length(&self) -> f64 {
        self.length_m
    }

    /// Section width b (m)
    pub fn width(&self) -> f64 {
        self.width_m
    }

    /// Section height h (m)
    pub fn height(&self) -> f64 {
        self.height_m
    }

    /// Moment of inertia I = bh³/12 (m⁴)
    pub fn moment_of_inertia(&self) -> f64 {
        self.inertia_m4
    }

    /// Cross-sectional area A = bh (m²)
    pub fn area(&self) -> f64 {
        rectangular_area(self.width_m, self.height_m)
    }

    /// y-coordinate of the top fiber (+h/2)
    pub fn top_fiber(&self) -> f64 {
        self.height_m / 2.0
    }

    /// y-coordinate of the bottom fiber (−h/2), where the supports sit
    pub fn bottom_fiber(&self) -> f64 {
        -self.height_m / 2.0
    }

    /// First moment of area beyond fiber `y` about the centroid (m³)
    pub fn first_moment_beyond(&self, y: f64) -> f64 {
        rectangular_first_moment(self.width_m, self.height_m, y)
    }

    /// Whether (y, z) lies within the cross-section, allowing `tolerance`
    pub fn contains(&self, y: f64, z: f64, tolerance: f64) -> bool {
        y.abs() <= self.top_fiber() + tolerance && z.abs() <= self.width_m / 2.0 + tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_section_from_millimeters() {
        let s = Section::from_millimeters(4.0, 200.0, 300.0).unwrap();
        assert_relative_eq!(s.width(), 0.2);
        assert_relative_eq!(s.height(), 0.3);
        assert_relative_eq!(s.area(), 0.06, epsilon = 1e-12);
        assert_relative_eq!(s.moment_of_inertia(), 4.5e-4, max_relative = 1e-12);
    }

    #[test]
    fn test_fibers() {
        let s = Section::new(4.0, 0.2, 0.3).unwrap();
        assert_eq!(s.top_fiber(), 0.15);
        assert_eq!(s.bottom_fiber(), -0.15);
        assert_eq!(s.first_moment_beyond(s.top_fiber()), 0.0);
        assert_eq!(s.first_moment_beyond(s.bottom_fiber()), 0.0);
    }

    #[test]
    fn test_non_positive_dimensions_rejected() {
        for (l, b, h) in [(0.0, 0.2, 0.3), (4.0, 0.0, 0.3), (4.0, 0.2, -0.3)] {
            let err = Section::new(l, b, h).unwrap_err();
            assert_eq!(err.error_code(), "DEGENERATE_GEOMETRY");
        }
    }

    #[test]
    fn test_non_finite_dimensions_rejected() {
        let err = Section::new(f64::NAN, 0.2, 0.3).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_contains() {
        let s = Section::new(4.0, 0.2, 0.3).unwrap();
        assert!(s.contains(0.15, 0.1, 0.0));
        assert!(s.contains(-0.15, -0.1, 0.0));
        assert!(!s.contains(0.16, 0.0, 1e-9));
        assert!(!s.contains(0.0, 0.11, 1e-9));
    }
}
