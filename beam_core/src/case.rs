//! # Analysis Case
//!
//! An `AnalysisCase` is the unit that gets saved to disk: who ran it, the
//! tolerances it was run with, and the beam itself. Cases serialize to
//! human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! AnalysisCase
//! ├── meta: CaseMetadata (version, engineer, job id, timestamps)
//! ├── settings: AnalysisSettings (discontinuity offset, position tolerance)
//! └── beam: BeamInput (geometry, supports, loads, cracks, limits, queries)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use beam_core::case::AnalysisCase;
//! use beam_core::calculations::beam::{BeamInput, LoadInput};
//! use beam_core::supports::Supports;
//!
//! let beam = BeamInput {
//!     label: "B-1".to_string(),
//!     length_m: 4.0,
//!     width_mm: 200.0,
//!     height_mm: 300.0,
//!     supports: Supports::new(4.0, 0.0),
//!     loads: vec![LoadInput::Point { position_m: 2.0, magnitude_kn: -10.0 }],
//!     cracks: vec![],
//!     limits: None,
//!     queries: vec![],
//!     diagram_points: 21,
//! };
//!
//! let case = AnalysisCase::new("Jane Engineer", "26-014", beam);
//! let result = case.run().unwrap();
//! assert_eq!(result.label, "B-1");
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calculations::beam::{calculate, BeamInput, BeamResult};
use crate::errors::CalcResult;
use crate::settings::AnalysisSettings;

/// Current schema version for case files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root container written to a case file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisCase {
    pub meta: CaseMetadata,

    #[serde(default)]
    pub settings: AnalysisSettings,

    pub beam: BeamInput,
}

impl AnalysisCase {
    /// Create a new case stamped with the current time
    pub fn new(engineer: impl Into<String>, job_id: impl Into<String>, beam: BeamInput) -> Self {
        let now = Utc::now();
        AnalysisCase {
            meta: CaseMetadata {
                version: SCHEMA_VERSION.to_string(),
                engineer: engineer.into(),
                job_id: job_id.into(),
                created: now,
                modified: now,
            },
            settings: AnalysisSettings::default(),
            beam,
        }
    }

    /// Replace the settings (builder pattern)
    pub fn with_settings(mut self, settings: AnalysisSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Update the modified timestamp
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    /// Run the analysis with the case's own settings
    pub fn run(&self) -> CalcResult<BeamResult> {
        calculate(&self.beam, &self.settings)
    }
}

/// Case metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Name of the responsible engineer
    pub engineer: String,

    /// Job/project number
    pub job_id: String,

    pub created: DateTime<Utc>,

    pub modified: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::beam::LoadInput;
    use crate::supports::Supports;

    fn beam() -> BeamInput {
        BeamInput {
            label: "B-2".to_string(),
            length_m: 4.0,
            width_mm: 200.0,
            height_mm: 300.0,
            supports: Supports::new(4.0, 0.0),
            loads: vec![LoadInput::Distributed {
                start_m: 1.0,
                end_m: 3.0,
                intensity_knpm: -2.0,
            }],
            cracks: vec![],
            limits: None,
            queries: vec![],
            diagram_points: 11,
        }
    }

    #[test]
    fn test_case_creation() {
        let case = AnalysisCase::new("John Doe", "26-001", beam());
        assert_eq!(case.meta.engineer, "John Doe");
        assert_eq!(case.meta.job_id, "26-001");
        assert_eq!(case.meta.version, SCHEMA_VERSION);
        assert_eq!(case.meta.created, case.meta.modified);
        assert_eq!(case.settings, AnalysisSettings::default());
    }

    #[test]
    fn test_touch_updates_modified() {
        let mut case = AnalysisCase::new("John Doe", "26-001", beam());
        let created = case.meta.created;
        case.touch();
        assert!(case.meta.modified >= created);
        assert_eq!(case.meta.created, created);
    }

    #[test]
    fn test_run_uses_case_settings() {
        let case = AnalysisCase::new("John Doe", "26-001", beam())
            .with_settings(AnalysisSettings::default().with_discontinuity_offset(0.0));
        let err = case.run().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        let result = AnalysisCase::new("John Doe", "26-001", beam()).run().unwrap();
        assert!((result.reactions.pin.force_n - 2_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_case_serialization() {
        let case = AnalysisCase::new("Jane Engineer", "26-042", beam());
        let json = serde_json::to_string_pretty(&case).unwrap();

        assert!(json.contains("Jane Engineer"));
        assert!(json.contains("discontinuity_offset_m"));
        assert!(json.contains("Distributed"));

        let roundtrip: AnalysisCase = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.meta.job_id, "26-042");
        assert_eq!(roundtrip.beam, case.beam);
    }

    #[test]
    fn test_missing_settings_use_defaults() {
        let json = r#"{
            "meta": {
                "version": "0.1.0",
                "engineer": "A",
                "job_id": "1",
                "created": "2026-01-05T09:00:00Z",
                "modified": "2026-01-05T09:00:00Z"
            },
            "beam": {
                "length_m": 4.0,
                "width_mm": 200.0,
                "height_mm": 300.0,
                "supports": { "pin_m": 4.0, "roller_m": 0.0 },
                "loads": []
            }
        }"#;
        let case: AnalysisCase = serde_json::from_str(json).unwrap();
        assert_eq!(case.settings, AnalysisSettings::default());
        assert!(case.beam.loads.is_empty());
    }
}
