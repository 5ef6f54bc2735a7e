//! Load kinds applied in the beam's transverse plane
//!
//! The three load kinds form a closed set. Each computation the analysis
//! needs (total force, moment about a pivot, shear and moment at a section)
//! is a single `match` here, and [`LoadSet`](super::LoadSet) sums them.
//!
//! ## Sign Convention
//! - Forces and distributed intensities: positive upward
//! - Applied moments: positive clockwise

use serde::{Deserialize, Serialize};

use crate::errors::{require_finite, CalcError, CalcResult};

/// A single load applied to the beam
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Load {
    /// Concentrated force (N) at position (m)
    Point { position_m: f64, magnitude_n: f64 },

    /// Concentrated clockwise moment (N·m) at position (m)
    Moment { position_m: f64, magnitude_nm: f64 },

    /// Constant intensity (N/m) over [start, end] (m)
    Distributed {
        start_m: f64,
        end_m: f64,
        intensity_npm: f64,
    },
}

impl Load {
    /// Create a point load
    pub fn point(position_m: f64, magnitude_n: f64) -> Self {
        Load::Point {
            position_m,
            magnitude_n,
        }
    }

    /// Create a point moment (clockwise positive)
    pub fn moment(position_m: f64, magnitude_nm: f64) -> Self {
        Load::Moment {
            position_m,
            magnitude_nm,
        }
    }

    /// Create a uniform distributed load over [start, end]
    pub fn distributed(start_m: f64, end_m: f64, intensity_npm: f64) -> Self {
        Load::Distributed {
            start_m,
            end_m,
            intensity_npm,
        }
    }

    /// Get display name for reports
    pub fn display_name(&self) -> &'static str {
        match self {
            Load::Point { .. } => "Point load",
            Load::Moment { .. } => "Point moment",
            Load::Distributed { .. } => "Distributed load",
        }
    }

    /// Check the load is finite and, for distributed loads, that start < end
    pub fn validate(&self) -> CalcResult<()> {
        match *self {
            Load::Point {
                position_m,
                magnitude_n,
            } => {
                require_finite("point.position_m", position_m)?;
                require_finite("point.magnitude_n", magnitude_n)?;
            }
            Load::Moment {
                position_m,
                magnitude_nm,
            } => {
                require_finite("moment.position_m", position_m)?;
                require_finite("moment.magnitude_nm", magnitude_nm)?;
            }
            Load::Distributed {
                start_m,
                end_m,
                intensity_npm,
            } => {
                require_finite("distributed.start_m", start_m)?;
                require_finite("distributed.end_m", end_m)?;
                require_finite("distributed.intensity_npm", intensity_npm)?;
                if start_m >= end_m {
                    return Err(CalcError::invalid_input(
                        "distributed.end_m",
                        end_m.to_string(),
                        format!("Distributed load must end after its start ({start_m} m)"),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Resultant vertical force (N), positive upward
    pub fn total_force(&self) -> f64 {
        match *self {
            Load::Point { magnitude_n, .. } => magnitude_n,
            Load::Moment { .. } => 0.0,
            Load::Distributed {
                start_m,
                end_m,
                intensity_npm,
            } => intensity_npm * (end_m - start_m),
        }
    }

    /// Counterclockwise moment of this load about `pivot_m` (N·m)
    ///
    /// An upward force right of the pivot turns counterclockwise; a clockwise
    /// applied moment contributes its negative.
    pub fn moment_about(&self, pivot_m: f64) -> f64 {
        match *self {
            Load::Point {
                position_m,
                magnitude_n,
            } => magnitude_n * (position_m - pivot_m),
            Load::Moment { magnitude_nm, .. } => -magnitude_nm,
            Load::Distributed {
                start_m, end_m, ..
            } => {
                let centroid = (start_m + end_m) / 2.0;
                self.total_force() * (centroid - pivot_m)
            }
        }
    }

    /// Contribution to the shear at `x_m` from the left-end sweep (N)
    ///
    /// A load contributes once x reaches its application point.
    pub fn shear_at(&self, x_m: f64) -> f64 {
        match *self {
            Load::Point {
                position_m,
                magnitude_n,
            } => {
                if position_m <= x_m {
                    magnitude_n
                } else {
                    0.0
                }
            }
            Load::Moment { .. } => 0.0,
            Load::Distributed { intensity_npm, .. } => self
                .loaded_length(x_m)
                .map_or(0.0, |len| intensity_npm * len),
        }
    }

    /// Contribution to the sagging internal moment at `x_m` (N·m)
    ///
    /// Point moments strictly left of `x_m` always count. One sitting on the
    /// section itself (within `tolerance_m`) counts only when
    /// `consider_point_moment` is set, which is how the right-hand limit is
    /// distinguished from the left-hand one.
    pub fn moment_at(&self, x_m: f64, consider_point_moment: bool, tolerance_m: f64) -> f64 {
        match *self {
            Load::Point {
                position_m,
                magnitude_n,
            } => {
                if position_m <= x_m {
                    magnitude_n * (x_m - position_m)
                } else {
                    0.0
                }
            }
            Load::Moment {
                position_m,
                magnitude_nm,
            } => {
                if (position_m - x_m).abs() <= tolerance_m {
                    if consider_point_moment {
                        magnitude_nm
                    } else {
                        0.0
                    }
                } else if position_m < x_m {
                    magnitude_nm
                } else {
                    0.0
                }
            }
            Load::Distributed {
                start_m,
                intensity_npm,
                ..
            } => match self.loaded_length(x_m) {
                Some(len) => {
                    let resultant = intensity_npm * len;
                    let centroid = start_m + len / 2.0;
                    resultant * (x_m - centroid)
                }
                None => 0.0,
            },
        }
    }

    /// x-coordinates where this load makes V or M discontinuous or kinked
    pub fn breakpoints(&self) -> Vec<f64> {
        match *self {
            Load::Point { position_m, .. } | Load::Moment { position_m, .. } => vec![position_m],
            Load::Distributed { start_m, end_m, .. } => vec![start_m, end_m],
        }
    }

    /// Length of a distributed load lying left of `x_m`, `None` before it starts
    fn loaded_length(&self, x_m: f64) -> Option<f64> {
        match *self {
            Load::Distributed { start_m, end_m, .. } if x_m >= start_m => {
                Some((x_m - start_m).min(end_m - start_m))
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for Load {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Load::Point {
                position_m,
                magnitude_n,
            } => write!(f, "{} {:+.3} N at x = {:.3} m", self.display_name(), magnitude_n, position_m),
            Load::Moment {
                position_m,
                magnitude_nm,
            } => write!(f, "{} {:+.3} N·m at x = {:.3} m", self.display_name(), magnitude_nm, position_m),
            Load::Distributed {
                start_m,
                end_m,
                intensity_npm,
            } => write!(
                f,
                "{} {:+.3} N/m over [{:.3}, {:.3}] m",
                self.display_name(),
                intensity_npm,
                start_m,
                end_m
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TOL: f64 = 1e-9;

    #[test]
    fn test_point_load_contributions() {
        let load = Load::point(2.0, -10.0);
        assert_eq!(load.total_force(), -10.0);
        assert_eq!(load.moment_about(0.0), -20.0);
        assert_eq!(load.shear_at(1.999), 0.0);
        assert_eq!(load.shear_at(2.0), -10.0);
        assert_eq!(load.moment_at(2.0, false, TOL), 0.0);
        assert_relative_eq!(load.moment_at(3.0, false, TOL), -10.0);
    }

    #[test]
    fn test_distributed_load_partial_and_full() {
        // 2 N/m over [1, 3]
        let load = Load::distributed(1.0, 3.0, -2.0);
        assert_eq!(load.total_force(), -4.0);
        assert_eq!(load.shear_at(0.5), 0.0);
        assert_relative_eq!(load.shear_at(2.0), -2.0);
        assert_relative_eq!(load.shear_at(5.0), -4.0);

        // Inside: resultant -2 at centroid 1.5, lever 0.5
        assert_relative_eq!(load.moment_at(2.0, false, TOL), -1.0);
        // Past: resultant -4 at centroid 2.0, lever 2.0
        assert_relative_eq!(load.moment_at(4.0, false, TOL), -8.0);
        assert_eq!(load.moment_at(0.5, false, TOL), 0.0);
    }

    #[test]
    fn test_distributed_moment_about_uses_centroid() {
        let load = Load::distributed(1.0, 3.0, -2.0);
        assert_relative_eq!(load.moment_about(0.0), -8.0);
        assert_relative_eq!(load.moment_about(2.0), 0.0);
    }

    #[test]
    fn test_point_moment_gate() {
        let load = Load::moment(1.5, 7.0);
        assert_eq!(load.total_force(), 0.0);
        assert_eq!(load.moment_about(10.0), -7.0);
        assert_eq!(load.shear_at(3.0), 0.0);

        assert_eq!(load.moment_at(1.0, true, TOL), 0.0);
        assert_eq!(load.moment_at(1.5, false, TOL), 0.0);
        assert_eq!(load.moment_at(1.5, true, TOL), 7.0);
        assert_eq!(load.moment_at(2.0, false, TOL), 7.0);
    }

    #[test]
    fn test_validate() {
        assert!(Load::point(1.0, 5.0).validate().is_ok());
        assert!(Load::distributed(1.0, 3.0, 2.0).validate().is_ok());

        let err = Load::distributed(3.0, 3.0, 2.0).validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(Load::distributed(3.0, 1.0, 2.0).validate().is_err());
        assert!(Load::moment(f64::NAN, 1.0).validate().is_err());
    }

    #[test]
    fn test_breakpoints() {
        assert_eq!(Load::point(1.0, 5.0).breakpoints(), vec![1.0]);
        assert_eq!(Load::distributed(1.0, 3.0, 2.0).breakpoints(), vec![1.0, 3.0]);
    }

    #[test]
    fn test_serialization() {
        let load = Load::distributed(0.5, 2.5, -1500.0);
        let json = serde_json::to_string(&load).unwrap();
        assert!(json.contains("\"type\":\"Distributed\""));
        let parsed: Load = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, load);
    }
}
