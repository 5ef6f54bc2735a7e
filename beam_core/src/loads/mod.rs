//! Loads applied to the beam
//!
//! # Overview
//!
//! - [`Load`] - Closed set of load kinds (point load, point moment, distributed load)
//! - [`LoadSet`] - Ordered collection of loads with superposition sums
//!
//! # Example
//!
//! ```
//! use beam_core::loads::{Load, LoadSet};
//!
//! let mut loads = LoadSet::new();
//! loads.add(Load::point(2.0, -10.0)).unwrap();
//! loads.add(Load::distributed(1.0, 3.0, -2.0)).unwrap();
//!
//! assert_eq!(loads.len(), 2);
//! assert!((loads.total_force() - -14.0).abs() < 1e-12);
//! ```

pub mod load_types;

pub use load_types::Load;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Ordered collection of loads.
///
/// Insertion order is kept for reporting; every sum is order-independent.
///
/// # JSON Format
/// ```json
/// {
///   "loads": [
///     { "type": "Point", "position_m": 2.0, "magnitude_n": -10000.0 },
///     { "type": "Distributed", "start_m": 1.0, "end_m": 3.0, "intensity_npm": -2000.0 }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadSet {
    loads: Vec<Load>,
}

impl LoadSet {
    /// Create an empty load set
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append a load
    pub fn add(&mut self, load: Load) -> CalcResult<()> {
        load.validate()?;
        self.loads.push(load);
        Ok(())
    }

    /// Validate and append a load (builder pattern)
    pub fn with_load(mut self, load: Load) -> CalcResult<Self> {
        self.add(load)?;
        Ok(self)
    }

    /// Iterate loads in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Load> {
        self.loads.iter()
    }

    /// Number of registered loads
    pub fn len(&self) -> usize {
        self.loads.len()
    }

    /// Whether no load has been registered
    pub fn is_empty(&self) -> bool {
        self.loads.is_empty()
    }

    /// Fail with `IncompleteConfiguration` if there is nothing to analyze
    pub fn require_loads(&self) -> CalcResult<()> {
        if self.is_empty() {
            return Err(CalcError::incomplete("no loads registered"));
        }
        Ok(())
    }

    /// Point loads only, in insertion order
    pub fn point_loads(&self) -> impl Iterator<Item = &Load> {
        self.iter().filter(|l| matches!(l, Load::Point { .. }))
    }

    /// Point moments only, in insertion order
    pub fn point_moments(&self) -> impl Iterator<Item = &Load> {
        self.iter().filter(|l| matches!(l, Load::Moment { .. }))
    }

    /// Distributed loads only, in insertion order
    pub fn distributed_loads(&self) -> impl Iterator<Item = &Load> {
        self.iter().filter(|l| matches!(l, Load::Distributed { .. }))
    }

    /// Total applied vertical force (N), positive upward
    pub fn total_force(&self) -> f64 {
        self.iter().map(Load::total_force).sum()
    }

    /// Total counterclockwise moment of all loads about `pivot_m` (N·m)
    pub fn moment_about(&self, pivot_m: f64) -> f64 {
        self.iter().map(|load| load.moment_about(pivot_m)).sum()
    }

    /// Shear contribution of all loads at `x_m` (superposition)
    pub fn shear_at(&self, x_m: f64) -> f64 {
        self.iter().map(|load| load.shear_at(x_m)).sum()
    }

    /// Moment contribution of all loads at `x_m` (superposition)
    pub fn moment_at(&self, x_m: f64, consider_point_moment: bool, tolerance_m: f64) -> f64 {
        self.iter()
            .map(|load| load.moment_at(x_m, consider_point_moment, tolerance_m))
            .sum()
    }

    /// Position and magnitude of every non-zero point load and point moment
    pub fn concentrated(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.iter().filter_map(|load| match *load {
            Load::Point {
                position_m,
                magnitude_n,
            } if magnitude_n != 0.0 => Some((position_m, magnitude_n)),
            Load::Moment {
                position_m,
                magnitude_nm,
            } if magnitude_nm != 0.0 => Some((position_m, magnitude_nm)),
            _ => None,
        })
    }

    /// Every load breakpoint, unsorted and possibly repeated
    pub fn breakpoints(&self) -> Vec<f64> {
        self.iter().flat_map(Load::breakpoints).collect()
    }
}

impl<'a> IntoIterator for &'a LoadSet {
    type Item = &'a Load;
    type IntoIter = std::slice::Iter<'a, Load>;

    fn into_iter(self) -> Self::IntoIter {
        self.loads.iter()
    }
}
