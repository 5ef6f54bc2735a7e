//! # Crack Model
//!
//! A crack at section x removes material from the bottom fiber up to the crack
//! tip. What remains is a homogeneous rectangle of height h' = h − a spanning
//! y ∈ [−h/2 + a, h/2], so the neutral axis moves up to its centroid.
//!
//! ```text
//!     ┌─────────┐  y = +h/2
//!     │         │
//!     │ ════════│  y_na = a/2   (shifted neutral axis)
//!     │         │
//!     ├─────────┤  y = −h/2 + a (crack tip)
//!     │ ░ crack │  no material, no stress
//!     └─────────┘  y = −h/2
//! ```
//!
//! Properties of the reduced section:
//!
//! - I' = b·h'³/12
//! - Q(y) = (b/2)·(h'²/4 − (y − y_na)²) for tip < y < h/2, maximum b·h'²/8 on
//!   the shifted axis, zero at the top fiber and at the tip
//!
//! ## Example
//! ```rust
//! use beam_core::crack::{CrackRecord, CrackRegistry};
//! use beam_core::section::Section;
//!
//! let section = Section::from_millimeters(4.0, 200.0, 300.0).unwrap();
//! let mut cracks = CrackRegistry::new();
//! cracks.add(CrackRecord::from_millimeters(2.0, 150.0), &section).unwrap();
//!
//! let cracked = cracks.at(2.0, &section, 1e-9).unwrap();
//! assert!((cracked.effective_height() - 0.15).abs() < 1e-12);
//! assert!((cracked.neutral_axis_offset() - 0.075).abs() < 1e-12);
//! assert!(cracks.at(1.0, &section, 1e-9).is_none());
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::section::{
    rectangular_area, rectangular_first_moment, rectangular_moment_of_inertia,
    reduced_rectangle_centroid,
};
use crate::errors::{require_finite, CalcError, CalcResult};
use crate::section::Section;
use crate::units::mm_to_m;

/// A registered crack
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrackRecord {
    /// Section position along the beam (m)
    pub position_m: f64,
    /// Depth measured up from the bottom fiber (m)
    pub depth_m: f64,
}

impl CrackRecord {
    pub fn new(position_m: f64, depth_m: f64) -> Self {
        CrackRecord {
            position_m,
            depth_m,
        }
    }

    /// Position in meters, depth in millimeters
    pub fn from_millimeters(position_m: f64, depth_mm: f64) -> Self {
        CrackRecord::new(position_m, mm_to_m(depth_mm))
    }

    /// Check the crack against the section it cuts.
    ///
    /// # Errors
    /// - `InvalidInput` for a non-finite value or negative depth
    /// - `InvalidCrackDepth` when the crack would sever the section
    pub fn validate(&self, section: &Section) -> CalcResult<()> {
        require_finite("crack.position_m", self.position_m)?;
        require_finite("crack.depth_m", self.depth_m)?;
        if self.depth_m < 0.0 {
            return Err(CalcError::invalid_input(
                "crack.depth_m",
                self.depth_m.to_string(),
                "Crack depth cannot be negative",
            ));
        }
        if self.depth_m >= section.height() {
            return Err(CalcError::InvalidCrackDepth {
                x_m: self.position_m,
                depth_m: self.depth_m,
                height_m: section.height(),
            });
        }
        Ok(())
    }
}

/// Reduced section properties at a cracked x
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrackedSection {
    width_m: f64,
    top_m: f64,
    tip_m: f64,
    neutral_axis_m: f64,
    inertia_m4: f64,
}

impl CrackedSection {
    fn new(section: &Section, depth_m: f64) -> Self {
        let remaining = section.height() - depth_m;
        CrackedSection {
            width_m: section.width(),
            top_m: section.top_fiber(),
            tip_m: section.bottom_fiber() + depth_m,
            neutral_axis_m: reduced_rectangle_centroid(depth_m),
            inertia_m4: rectangular_moment_of_inertia(section.width(), remaining),
        }
    }

    /// Remaining height h − a (m)
    pub fn effective_height(&self) -> f64 {
        self.top_m - self.tip_m
    }

    /// Shifted neutral-axis height above the original centroid (m)
    pub fn neutral_axis_offset(&self) -> f64 {
        self.neutral_axis_m
    }

    /// y-coordinate of the crack tip (m)
    pub fn tip(&self) -> f64 {
        self.tip_m
    }

    /// Moment of inertia of the remaining rectangle about its own centroid (m⁴)
    pub fn moment_of_inertia(&self) -> f64 {
        self.inertia_m4
    }

    /// Remaining area (m²)
    pub fn area(&self) -> f64 {
        rectangular_area(self.width_m, self.effective_height())
    }

    /// Whether fiber `y` lies in the crack, where nothing carries load
    pub fn is_unloaded(&self, y: f64) -> bool {
        y <= self.tip_m
    }

    /// Distance of fiber `y` above the shifted neutral axis (m)
    pub fn distance_from_neutral_axis(&self, y: f64) -> f64 {
        y - self.neutral_axis_m
    }

    /// First moment of remaining area beyond fiber `y` about the shifted axis (m³)
    ///
    /// Above the axis the area between y and the top fiber counts; between the
    /// tip and the axis, the area between the tip and y. Zero on and outside
    /// both boundaries.
    pub fn first_moment_beyond(&self, y: f64) -> f64 {
        if y <= self.tip_m || y >= self.top_m {
            return 0.0;
        }
        rectangular_first_moment(
            self.width_m,
            self.effective_height(),
            self.distance_from_neutral_axis(y),
        )
    }
}

/// All cracks registered on a beam, keyed by position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrackRegistry {
    records: Vec<CrackRecord>,
}

impl CrackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and register a crack.
    ///
    /// A crack at a position already holding one (within 1e-9 m) replaces it.
    pub fn add(&mut self, record: CrackRecord, section: &Section) -> CalcResult<()> {
        record.validate(section)?;
        match self
            .records
            .iter_mut()
            .find(|r| (r.position_m - record.position_m).abs() <= REPLACE_TOLERANCE_M)
        {
            Some(existing) => {
                log::debug!(
                    "crack at x = {} m replaced: depth {} m -> {} m",
                    record.position_m,
                    existing.depth_m,
                    record.depth_m
                );
                *existing = record;
            }
            None => self.records.push(record),
        }
        Ok(())
    }

    /// Registered cracks in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, CrackRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Reduced section at `x_m`, if a crack of non-zero depth is registered there
    pub fn at(&self, x_m: f64, section: &Section, tolerance_m: f64) -> Option<CrackedSection> {
        self.records
            .iter()
            .find(|r| (r.position_m - x_m).abs() <= tolerance_m)
            .filter(|r| r.depth_m > 0.0)
            .map(|r| CrackedSection::new(section, r.depth_m))
    }
}

const REPLACE_TOLERANCE_M: f64 = 1.0e-9;
