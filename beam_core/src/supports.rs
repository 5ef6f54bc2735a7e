//! Support conditions for a simply-supported beam
//!
//! Exactly one pin and one roller, both on the bottom fiber. Either may sit
//! anywhere along x, so overhangs are allowed.

use serde::{Deserialize, Serialize};

use crate::errors::{require_finite, CalcError, CalcResult};

/// Support type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SupportKind {
    /// Restrains vertical and horizontal translation
    Pin,
    /// Restrains vertical translation only
    Roller,
}

impl SupportKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            SupportKind::Pin => "pin",
            SupportKind::Roller => "roller",
        }
    }
}

impl std::fmt::Display for SupportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Support positions, filled in before solving.
///
/// Setting a support again moves it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Supports {
    #[serde(default)]
    pub pin_m: Option<f64>,
    #[serde(default)]
    pub roller_m: Option<f64>,
}

/// Both support positions, guaranteed present.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SupportPositions {
    pub pin_m: f64,
    pub roller_m: f64,
}

impl Supports {
    /// Create supports with both positions set
    pub fn new(pin_m: f64, roller_m: f64) -> Self {
        Supports {
            pin_m: Some(pin_m),
            roller_m: Some(roller_m),
        }
    }

    /// Place the pin (builder pattern)
    pub fn with_pin(mut self, x_m: f64) -> Self {
        self.pin_m = Some(x_m);
        self
    }

    /// Place the roller (builder pattern)
    pub fn with_roller(mut self, x_m: f64) -> Self {
        self.roller_m = Some(x_m);
        self
    }

    /// Place a support of the given kind
    pub fn set(&mut self, kind: SupportKind, x_m: f64) {
        match kind {
            SupportKind::Pin => self.pin_m = Some(x_m),
            SupportKind::Roller => self.roller_m = Some(x_m),
        }
    }

    /// Both positions, or `IncompleteConfiguration` naming the missing support
    pub fn positions(&self) -> CalcResult<SupportPositions> {
        let pin_m = self
            .pin_m
            .ok_or_else(|| CalcError::incomplete("pin support position not set"))?;
        let roller_m = self
            .roller_m
            .ok_or_else(|| CalcError::incomplete("roller support position not set"))?;
        require_finite("supports.pin_m", pin_m)?;
        require_finite("supports.roller_m", roller_m)?;
        Ok(SupportPositions { pin_m, roller_m })
    }
}

impl SupportPositions {
    /// Signed distance from roller to pin (m)
    pub fn span(&self) -> f64 {
        self.pin_m - self.roller_m
    }

    /// `DegenerateGeometry` if the supports coincide within `tolerance_m`
    pub fn require_distinct(&self, tolerance_m: f64) -> CalcResult<()> {
        if self.span().abs() <= tolerance_m {
            return Err(CalcError::degenerate_geometry(
                "supports",
                format!(
                    "pin and roller coincide at x = {} m; the support span has zero length",
                    self.pin_m
                ),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_supports() {
        let err = Supports::default().positions().unwrap_err();
        assert_eq!(err.error_code(), "INCOMPLETE_CONFIGURATION");

        let err = Supports::default().with_pin(4.0).positions().unwrap_err();
        assert!(err.to_string().contains("roller"));

        let err = Supports::default().with_roller(0.0).positions().unwrap_err();
        assert!(err.to_string().contains("pin"));
    }

    #[test]
    fn test_set_moves_support() {
        let mut supports = Supports::new(4.0, 0.0);
        supports.set(SupportKind::Pin, 3.5);
        let positions = supports.positions().unwrap();
        assert_eq!(positions.pin_m, 3.5);
        assert_eq!(positions.span(), 3.5);
    }

    #[test]
    fn test_coincident_supports() {
        let positions = Supports::new(2.0, 2.0).positions().unwrap();
        let err = positions.require_distinct(1e-9).unwrap_err();
        assert_eq!(err.error_code(), "DEGENERATE_GEOMETRY");
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(SupportKind::Pin.to_string(), "pin");
        assert_eq!(SupportKind::Roller.to_string(), "roller");
    }
}
