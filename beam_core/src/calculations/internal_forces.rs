//! Internal Force Field
//!
//! Shear V(x) and bending moment M(x) by the method of sections, sweeping from
//! the left end: every reaction and load "activates" at its x-coordinate and
//! stays in effect for all sections beyond it.
//!
//! ## Discontinuities
//!
//! At a support or load coordinate V (and M, under a point moment) jumps. A
//! section there is evaluated from both sides:
//!
//! - left limit at x − δ, point moments on the section excluded
//! - right limit at x + δ, point moments on the section included
//!
//! The side with the larger |V| is reported as the effective pair for stress
//! evaluation, the right side winning ties. That tie-break is a reporting
//! policy, not mechanics.
//!
//! ## Example
//! ```rust
//! use beam_core::calculations::internal_forces::{InternalForceField, Side};
//! use beam_core::calculations::reactions::solve_reactions;
//! use beam_core::loads::{Load, LoadSet};
//! use beam_core::settings::AnalysisSettings;
//! use beam_core::supports::Supports;
//!
//! let loads = LoadSet::new().with_load(Load::point(2.0, -10.0)).unwrap();
//! let reactions = solve_reactions(&loads, &Supports::new(4.0, 0.0), 1e-9).unwrap();
//! let field = InternalForceField::new(&loads, reactions, AnalysisSettings::default());
//!
//! let at_load = field.section_forces(2.0);
//! assert!((at_load.left.shear_n - 5.0).abs() < 1e-9);
//! assert!((at_load.right.shear_n + 5.0).abs() < 1e-9);
//! assert_eq!(at_load.governing, Side::Right);
//! assert!((at_load.effective().moment_nm - 10.0).abs() < 1e-4);
//! ```

use serde::{Deserialize, Serialize};

use super::reactions::Reactions;
use crate::loads::LoadSet;
use crate::settings::AnalysisSettings;

/// Shear and moment at one side of a section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForcePair {
    /// Shear force (N)
    pub shear_n: f64,
    /// Bending moment (N·m), sagging positive
    pub moment_nm: f64,
}

/// Which one-sided limit was used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

/// Both one-sided limits at a section and the governing choice
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionForces {
    pub x_m: f64,
    pub left: ForcePair,
    pub right: ForcePair,
    /// Side with the larger |V|; right on a tie
    pub governing: Side,
    /// Whether a concentrated force or moment acts within δ of the section
    pub discontinuous: bool,
}

impl SectionForces {
    /// The force pair used for stress evaluation
    pub fn effective(&self) -> ForcePair {
        match self.governing {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

/// One sampled point of the shear and moment diagrams
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiagramPoint {
    pub x_m: f64,
    pub shear_n: f64,
    pub moment_nm: f64,
}

/// Largest absolute shear and moment found in a set of samples
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiagramExtremes {
    pub max_shear_n: f64,
    pub max_shear_position_m: f64,
    pub max_moment_nm: f64,
    pub max_moment_position_m: f64,
}

/// Shear and moment as functions of x for a solved beam.
///
/// Borrows the load set, so loads cannot change while the field is alive.
#[derive(Debug, Clone)]
pub struct InternalForceField<'a> {
    loads: &'a LoadSet,
    reactions: Reactions,
    settings: AnalysisSettings,
}

impl<'a> InternalForceField<'a> {
    /// Build the field from the loads and their solved reactions
    pub fn new(loads: &'a LoadSet, reactions: Reactions, settings: AnalysisSettings) -> Self {
        InternalForceField {
            loads,
            reactions,
            settings,
        }
    }

    /// Reactions the field was built with
    pub fn reactions(&self) -> &Reactions {
        &self.reactions
    }

    /// Shear force V(x) (N): sum of upward forces at or left of x
    pub fn shear(&self, x_m: f64) -> f64 {
        let from_supports: f64 = self
            .reactions
            .iter()
            .filter(|r| r.position_m <= x_m)
            .map(|r| r.force_n)
            .sum();
        from_supports + self.loads.shear_at(x_m)
    }

    /// Bending moment M(x) (N·m), sagging positive
    ///
    /// `consider_point_moment` decides whether point moments applied exactly
    /// at `x_m` are counted; those strictly left of it always are.
    pub fn moment(&self, x_m: f64, consider_point_moment: bool) -> f64 {
        let from_supports: f64 = self
            .reactions
            .iter()
            .filter(|r| r.position_m <= x_m)
            .map(|r| r.force_n * (x_m - r.position_m))
            .sum();
        from_supports
            + self
                .loads
                .moment_at(x_m, consider_point_moment, self.settings.position_tolerance_m)
    }

    /// Evaluate both one-sided limits at `x_m` and pick the governing side
    pub fn section_forces(&self, x_m: f64) -> SectionForces {
        let delta = self.settings.discontinuity_offset_m;

        let left_x = x_m - delta;
        let left = ForcePair {
            shear_n: self.shear(left_x),
            moment_nm: self.moment(left_x, false),
        };

        let right_x = x_m + delta;
        let right = ForcePair {
            shear_n: self.shear(right_x),
            moment_nm: self.moment(right_x, true),
        };

        let governing = if left.shear_n.abs() > right.shear_n.abs() {
            Side::Left
        } else {
            Side::Right
        };

        let near = |position_m: f64| (position_m - x_m).abs() <= delta;
        let discontinuous = self
            .reactions
            .iter()
            .any(|r| r.force_n != 0.0 && near(r.position_m))
            || self
                .loads
                .concentrated()
                .any(|(position_m, _)| near(position_m));

        SectionForces {
            x_m,
            left,
            right,
            governing,
            discontinuous,
        }
    }

    /// Sorted, de-duplicated x-coordinates of every support and load breakpoint
    pub fn discontinuities(&self) -> Vec<f64> {
        let mut positions = self.loads.breakpoints();
        positions.extend(self.reactions.iter().map(|r| r.position_m));
        positions.sort_by(f64::total_cmp);
        let tolerance = self.settings.position_tolerance_m;
        positions.dedup_by(|a, b| (*a - *b).abs() <= tolerance);
        positions
    }

    /// Sample V and M over [0, length] for diagrams.
    ///
    /// `points` evenly spaced samples (at least 2) plus a sample just either
    /// side of every breakpoint inside the beam.
    pub fn sample(&self, length_m: f64, points: usize) -> Vec<DiagramPoint> {
        let points = points.max(2);
        let delta = self.settings.discontinuity_offset_m;

        let mut positions: Vec<f64> = (0..points)
            .map(|i| length_m * i as f64 / (points - 1) as f64)
            .collect();

        for x in self.discontinuities() {
            for candidate in [x - delta, x + delta] {
                if (0.0..=length_m).contains(&candidate) {
                    positions.push(candidate);
                }
            }
        }

        positions.sort_by(f64::total_cmp);
        positions.dedup_by(|a, b| (*a - *b).abs() < delta / 2.0);

        positions
            .into_iter()
            .map(|x| DiagramPoint {
                x_m: x,
                shear_n: self.shear(x),
                moment_nm: self.moment(x, true),
            })
            .collect()
    }
}

/// Locate the largest |V| and |M| in a set of diagram samples
pub fn diagram_extremes(samples: &[DiagramPoint]) -> DiagramExtremes {
    let mut extremes = DiagramExtremes {
        max_shear_n: 0.0,
        max_shear_position_m: 0.0,
        max_moment_nm: 0.0,
        max_moment_position_m: 0.0,
    };

    for point in samples {
        if point.shear_n.abs() > extremes.max_shear_n.abs() {
            extremes.max_shear_n = point.shear_n;
            extremes.max_shear_position_m = point.x_m;
        }
        if point.moment_nm.abs() > extremes.max_moment_nm.abs() {
            extremes.max_moment_nm = point.moment_nm;
            extremes.max_moment_position_m = point.x_m;
        }
    }

    extremes
}
