//! # Analysis Settings
//!
//! Numeric tolerances that govern how sections are located along the beam.
//! Settings travel with a case file so a saved analysis reproduces exactly.
//!
//! ## JSON Format
//! ```json
//! {
//!   "discontinuity_offset_m": 1e-6,
//!   "position_tolerance_m": 1e-9
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Default offset used to evaluate one-sided limits at a section (m)
pub const DEFAULT_DISCONTINUITY_OFFSET_M: f64 = 1.0e-6;

/// Default tolerance for treating two x-positions as the same section (m)
pub const DEFAULT_POSITION_TOLERANCE_M: f64 = 1.0e-9;

/// Tolerances used by the internal-force field and the crack lookup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// Offset δ: left limits are evaluated at x − δ, right limits at x + δ
    #[serde(default = "default_offset")]
    pub discontinuity_offset_m: f64,

    /// Two positions closer than this are the same section
    ///
    /// Used for crack lookup and for point moments applied exactly at a section.
    #[serde(default = "default_tolerance")]
    pub position_tolerance_m: f64,
}

fn default_offset() -> f64 {
    DEFAULT_DISCONTINUITY_OFFSET_M
}

fn default_tolerance() -> f64 {
    DEFAULT_POSITION_TOLERANCE_M
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        AnalysisSettings {
            discontinuity_offset_m: DEFAULT_DISCONTINUITY_OFFSET_M,
            position_tolerance_m: DEFAULT_POSITION_TOLERANCE_M,
        }
    }
}

impl AnalysisSettings {
    /// Set the discontinuity offset (builder pattern)
    pub fn with_discontinuity_offset(mut self, offset_m: f64) -> Self {
        self.discontinuity_offset_m = offset_m;
        self
    }

    /// Set the position tolerance (builder pattern)
    pub fn with_position_tolerance(mut self, tolerance_m: f64) -> Self {
        self.position_tolerance_m = tolerance_m;
        self
    }

    /// Validate the settings.
    ///
    /// The offset must exceed the tolerance, otherwise a point moment sitting
    /// exactly at a section would be counted on both sides.
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.position_tolerance_m.is_finite() && self.position_tolerance_m >= 0.0) {
            return Err(CalcError::invalid_input(
                "position_tolerance_m",
                self.position_tolerance_m.to_string(),
                "Tolerance must be a non-negative finite length",
            ));
        }
        if !(self.discontinuity_offset_m.is_finite()
            && self.discontinuity_offset_m > self.position_tolerance_m)
        {
            return Err(CalcError::invalid_input(
                "discontinuity_offset_m",
                self.discontinuity_offset_m.to_string(),
                "Offset must be finite and larger than the position tolerance",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(AnalysisSettings::default().validate().is_ok());
    }

    #[test]
    fn test_offset_must_exceed_tolerance() {
        let settings = AnalysisSettings::default()
            .with_discontinuity_offset(1e-9)
            .with_position_tolerance(1e-6);
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_negative_tolerance_rejected() {
        let settings = AnalysisSettings::default().with_position_tolerance(-1.0);
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: AnalysisSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, AnalysisSettings::default());

        let settings: AnalysisSettings =
            serde_json::from_str(r#"{ "discontinuity_offset_m": 1e-4 }"#).unwrap();
        assert_eq!(settings.discontinuity_offset_m, 1e-4);
        assert_eq!(settings.position_tolerance_m, DEFAULT_POSITION_TOLERANCE_M);
    }
}
