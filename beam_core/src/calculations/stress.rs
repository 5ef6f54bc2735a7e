//! # Stress Engine
//!
//! Stress state at a point (x, y, z) of the beam from the section forces at x.
//!
//! ## Tensor
//!
//! Plane stress in the x-y plane, no loading along z:
//!
//! ```text
//!          ┌                ┐
//!          │ σxx   τxy   0  │
//!    σ  =  │ τxy    0    0  │
//!          │  0     0    0  │
//!          └                ┘
//! ```
//!
//! - σxx = N/A − M·(y − y_na)/I
//! - τxy = −V·Q(y)/(I·b)
//!
//! A, I, y_na and Q come from the gross section, or from the reduced section
//! when a crack is registered at x. Fibers inside a crack carry nothing.
//!
//! ## Safety
//!
//! Three independent envelopes, each with its own unity ratio:
//!
//! - σ1 ≤ tensile limit
//! - σ2 ≥ compressive limit (a negative stress)
//! - |τxy| ≤ shear limit
//!
//! ## Example
//! ```rust
//! use beam_core::calculations::stress::{StressEngine, StressLimits, SafetyVerdict};
//! use beam_core::crack::CrackRegistry;
//! use beam_core::section::Section;
//! use beam_core::settings::AnalysisSettings;
//!
//! let section = Section::from_millimeters(4.0, 200.0, 300.0).unwrap();
//! let cracks = CrackRegistry::new();
//! let engine = StressEngine::new(&section, &cracks, AnalysisSettings::default());
//!
//! // 10 kN·m sagging: bottom fiber in tension
//! let state = engine.stress_tensor(2.0, -0.15, 0.0, 0.0, 10_000.0, 0.0).unwrap();
//! assert!(state.sigma_xx() > 0.0);
//!
//! let limits = StressLimits::from_megapascals(5.0, 30.0, 2.0).unwrap();
//! assert_eq!(state.safety_check(&limits).verdict, SafetyVerdict::Safe);
//! ```

use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};

use crate::crack::{CrackRegistry, CrackedSection};
use crate::equations::{
    flexure_stress, mohr_radius, principal_stresses as principal_pair,
    shear_formula_stress,
};
use crate::errors::{require_finite, CalcError, CalcResult};
use crate::section::Section;
use crate::settings::AnalysisSettings;
use crate::units::{Megapascals, Pascals};

pub type Mat3 = Matrix3<f64>;

// =============================================================================
// Stress state
// =============================================================================

/// Stress at one point of the beam
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StressState {
    pub x_m: f64,
    pub y_m: f64,
    pub z_m: f64,
    /// Full 3×3 Cauchy stress tensor (Pa)
    pub tensor: Mat3,
    /// Reduced section at x, if cracked
    pub crack: Option<CrackedSection>,
    /// The point lies inside the crack
    pub in_crack: bool,
}

impl StressState {
    /// Normal stress σxx (Pa)
    pub fn sigma_xx(&self) -> f64 {
        self.tensor[(0, 0)]
    }

    /// In-plane shear stress τxy (Pa)
    pub fn tau_xy(&self) -> f64 {
        self.tensor[(0, 1)]
    }

    /// Rows of the tensor, for reporting
    pub fn rows(&self) -> [[f64; 3]; 3] {
        let t = &self.tensor;
        [
            [t[(0, 0)], t[(0, 1)], t[(0, 2)]],
            [t[(1, 0)], t[(1, 1)], t[(1, 2)]],
            [t[(2, 0)], t[(2, 1)], t[(2, 2)]],
        ]
    }

    pub fn principal_stresses(&self) -> (f64, f64) {
        principal_stresses(self.sigma_xx(), self.tau_xy())
    }

    pub fn mohr_circle(&self) -> MohrCircle {
        mohr_circle(self.sigma_xx(), self.tau_xy())
    }

    pub fn safety_check(&self, limits: &StressLimits) -> SafetyCheck {
        safety_check(self.sigma_xx(), self.tau_xy(), limits)
    }
}

/// Symmetric plane-stress tensor with σxx and τxy populated
pub fn plane_stress_tensor(sigma_xx: f64, tau_xy: f64) -> Mat3 {
    Mat3::new(
        sigma_xx, tau_xy, 0.0, //
        tau_xy, 0.0, 0.0, //
        0.0, 0.0, 0.0,
    )
}

// =============================================================================
// Engine
// =============================================================================

/// Evaluates stress tensors on one section with its registered cracks.
#[derive(Debug, Clone)]
pub struct StressEngine<'a> {
    section: &'a Section,
    cracks: &'a CrackRegistry,
    settings: AnalysisSettings,
}

impl<'a> StressEngine<'a> {
    pub fn new(section: &'a Section, cracks: &'a CrackRegistry, settings: AnalysisSettings) -> Self {
        StressEngine {
            section,
            cracks,
            settings,
        }
    }

    /// Reduced section at `x_m`, if a crack is registered there
    pub fn crack_at(&self, x_m: f64) -> Option<CrackedSection> {
        self.cracks
            .at(x_m, self.section, self.settings.position_tolerance_m)
    }

    /// Stress tensor at (x, y, z) from axial force N, moment M and shear V.
    ///
    /// # Errors
    /// `InvalidInput` if a value is not finite or (y, z) lies outside the
    /// cross-section.
    pub fn stress_tensor(
        &self,
        x_m: f64,
        y_m: f64,
        z_m: f64,
        axial_n: f64,
        moment_nm: f64,
        shear_n: f64,
    ) -> CalcResult<StressState> {
        for (field, value) in [
            ("x", x_m),
            ("y", y_m),
            ("z", z_m),
            ("axial_force", axial_n),
            ("moment", moment_nm),
            ("shear", shear_n),
        ] {
            require_finite(field, value)?;
        }

        if !self
            .section
            .contains(y_m, z_m, self.settings.position_tolerance_m)
        {
            return Err(CalcError::invalid_input(
                "query_point",
                format!("(y = {y_m} m, z = {z_m} m)"),
                format!(
                    "Point lies outside the {} m x {} m cross-section",
                    self.section.width(),
                    self.section.height()
                ),
            ));
        }

        let crack = self.crack_at(x_m);
        let width = self.section.width();

        let (sigma_xx, tau_xy, in_crack) = match crack {
            Some(cracked) if cracked.is_unloaded(y_m) => (0.0, 0.0, true),
            Some(cracked) => {
                let inertia = cracked.moment_of_inertia();
                let sigma = axial_n / cracked.area()
                    + flexure_stress(moment_nm, cracked.distance_from_neutral_axis(y_m), inertia);
                let tau =
                    shear_formula_stress(shear_n, cracked.first_moment_beyond(y_m), inertia, width);
                (sigma, tau, false)
            }
            None => {
                let inertia = self.section.moment_of_inertia();
                let area = self.section.area();
                let sigma = axial_n / area + flexure_stress(moment_nm, y_m, inertia);
                let tau =
                    shear_formula_stress(shear_n, self.section.first_moment_beyond(y_m), inertia, width);
                (sigma, tau, false)
            }
        };

        Ok(StressState {
            x_m,
            y_m,
            z_m,
            tensor: plane_stress_tensor(sigma_xx, tau_xy),
            crack,
            in_crack,
        })
    }
}

// =============================================================================
// Principal stresses and Mohr's circle
// =============================================================================

/// Principal stresses (σ1, σ2), σ1 ≥ σ2 (Pa)
pub fn principal_stresses(sigma_xx: f64, tau_xy: f64) -> (f64, f64) {
    principal_pair(sigma_xx, tau_xy)
}

/// Mohr's circle of the in-plane stress state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MohrCircle {
    pub center_pa: f64,
    pub radius_pa: f64,
    pub sigma_1_pa: f64,
    pub sigma_2_pa: f64,
    /// Maximum in-plane shear stress, equal to the radius
    pub max_shear_pa: f64,
    /// Rotation from x to the σ1 direction (rad)
    pub principal_angle_rad: f64,
    /// The stress point (σxx, τxy) on the circle
    pub sigma_xx_pa: f64,
    pub tau_xy_pa: f64,
}

/// Mohr's circle for σxx and τxy (σyy = 0)
pub fn mohr_circle(sigma_xx: f64, tau_xy: f64) -> MohrCircle {
    let (sigma_1_pa, sigma_2_pa) = principal_stresses(sigma_xx, tau_xy);
    let radius_pa = mohr_radius(sigma_xx, tau_xy);
    MohrCircle {
        center_pa: sigma_xx / 2.0,
        radius_pa,
        sigma_1_pa,
        sigma_2_pa,
        max_shear_pa: radius_pa,
        principal_angle_rad: 0.5 * (2.0 * tau_xy).atan2(sigma_xx),
        sigma_xx_pa: sigma_xx,
        tau_xy_pa: tau_xy,
    }
}

// =============================================================================
// Safety check
// =============================================================================

/// Allowable stresses (Pa)
///
/// The compressive limit is stored signed (negative).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StressLimits {
    pub tensile_pa: f64,
    pub compressive_pa: f64,
    pub shear_pa: f64,
}

impl StressLimits {
    /// Build limits from magnitudes in pascals.
    ///
    /// The compressive limit may be given with either sign.
    ///
    /// # Errors
    /// `InvalidInput` if any limit is zero, negative (tensile, shear) or not finite.
    pub fn new(tensile_pa: f64, compressive_pa: f64, shear_pa: f64) -> CalcResult<Self> {
        for (field, value) in [
            ("limits.tensile", tensile_pa),
            ("limits.compressive", compressive_pa.abs()),
            ("limits.shear", shear_pa),
        ] {
            require_finite(field, value)?;
            if value <= 0.0 {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Stress limit must be a positive magnitude",
                ));
            }
        }

        Ok(StressLimits {
            tensile_pa,
            compressive_pa: -compressive_pa.abs(),
            shear_pa,
        })
    }

    /// Build limits from values in megapascals
    pub fn from_megapascals(tensile_mpa: f64, compressive_mpa: f64, shear_mpa: f64) -> CalcResult<Self> {
        let pa = |mpa: f64| Pascals::from(Megapascals(mpa)).value();
        StressLimits::new(pa(tensile_mpa), pa(compressive_mpa), pa(shear_mpa))
    }
}

/// Overall result of a safety check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SafetyVerdict {
    Safe,
    Unsafe,
}

impl SafetyVerdict {
    pub fn is_safe(&self) -> bool {
        matches!(self, SafetyVerdict::Safe)
    }
}

impl std::fmt::Display for SafetyVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SafetyVerdict::Safe => write!(f, "safe"),
            SafetyVerdict::Unsafe => write!(f, "unsafe"),
        }
    }
}

/// One envelope of the safety check
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeCheck {
    /// Governing stress (Pa)
    pub demand_pa: f64,
    /// Allowable stress (Pa), signed like the demand
    pub limit_pa: f64,
    /// demand / limit, zero when the stress acts the other way
    pub unity_ratio: f64,
    pub passes: bool,
}

/// Result of checking a stress state against [`StressLimits`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SafetyCheck {
    pub verdict: SafetyVerdict,
    pub tension: EnvelopeCheck,
    pub compression: EnvelopeCheck,
    pub shear: EnvelopeCheck,
}

impl SafetyCheck {
    /// Largest unity ratio over the three envelopes
    pub fn governing_ratio(&self) -> f64 {
        self.tension
            .unity_ratio
            .max(self.compression.unity_ratio)
            .max(self.shear.unity_ratio)
    }
}

/// Check σxx and τxy against the three stress envelopes
pub fn safety_check(sigma_xx: f64, tau_xy: f64, limits: &StressLimits) -> SafetyCheck {
    let (sigma_1, sigma_2) = principal_stresses(sigma_xx, tau_xy);

    let tension = EnvelopeCheck {
        demand_pa: sigma_1,
        limit_pa: limits.tensile_pa,
        unity_ratio: (sigma_1 / limits.tensile_pa).max(0.0),
        passes: sigma_1 <= limits.tensile_pa,
    };
    let compression = EnvelopeCheck {
        demand_pa: sigma_2,
        limit_pa: limits.compressive_pa,
        unity_ratio: (sigma_2 / limits.compressive_pa).max(0.0),
        passes: sigma_2 >= limits.compressive_pa,
    };
    let shear = EnvelopeCheck {
        demand_pa: tau_xy.abs(),
        limit_pa: limits.shear_pa,
        unity_ratio: tau_xy.abs() / limits.shear_pa,
        passes: tau_xy.abs() <= limits.shear_pa,
    };

    let verdict = if tension.passes && compression.passes && shear.passes {
        SafetyVerdict::Safe
    } else {
        SafetyVerdict::Unsafe
    };

    SafetyCheck {
        verdict,
        tension,
        compression,
        shear,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crack::CrackRecord;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn section() -> Section {
        Section::from_millimeters(4.0, 200.0, 300.0).unwrap()
    }

    fn tensor_at(section: &Section, cracks: &CrackRegistry, y: f64, m: f64, v: f64) -> StressState {
        StressEngine::new(section, cracks, AnalysisSettings::default())
            .stress_tensor(2.0, y, 0.0, 0.0, m, v)
            .unwrap()
    }

    #[test]
    fn test_tensor_is_symmetric_plane_stress() {
        let s = section();
        let cracks = CrackRegistry::new();
        let state = tensor_at(&s, &cracks, 0.05, 10_000.0, 5_000.0);
        let t = state.tensor;
        assert_eq!(t, t.transpose());
        assert_eq!(t[(1, 1)], 0.0);
        assert_eq!(t[(2, 2)], 0.0);
        assert_eq!(t[(0, 2)], 0.0);
        assert_eq!(t[(1, 2)], 0.0);
        assert_eq!(state.rows()[1][0], state.tau_xy());
    }

    #[test]
    fn test_flexure_through_depth() {
        let s = section();
        let cracks = CrackRegistry::new();
        // σ = -M y / I = -10000 * 0.15 / 4.5e-4
        let top = tensor_at(&s, &cracks, 0.15, 10_000.0, 0.0);
        assert_relative_eq!(top.sigma_xx(), -10_000.0 * 0.15 / 4.5e-4, max_relative = 1e-12);
        let bottom = tensor_at(&s, &cracks, -0.15, 10_000.0, 0.0);
        assert_relative_eq!(bottom.sigma_xx(), -top.sigma_xx(), max_relative = 1e-12);
        assert_eq!(tensor_at(&s, &cracks, 0.0, 10_000.0, 0.0).sigma_xx(), 0.0);
    }

    #[test]
    fn test_shear_vanishes_at_extreme_fibers() {
        let s = section();
        let cracks = CrackRegistry::new();
        assert_eq!(tensor_at(&s, &cracks, 0.15, 0.0, 5_000.0).tau_xy(), 0.0);
        assert_eq!(tensor_at(&s, &cracks, -0.15, 0.0, 5_000.0).tau_xy(), 0.0);
    }

    #[test]
    fn test_shear_peak_on_neutral_axis() {
        let s = section();
        let cracks = CrackRegistry::new();
        let state = tensor_at(&s, &cracks, 0.0, 0.0, 6_000.0);
        // 1.5 V / A, sign opposite to V
        assert_relative_eq!(state.tau_xy(), -1.5 * 6_000.0 / 0.06, max_relative = 1e-12);
    }

    #[test]
    fn test_axial_force_adds_uniform_stress() {
        let s = section();
        let cracks = CrackRegistry::new();
        let engine = StressEngine::new(&s, &cracks, AnalysisSettings::default());
        let state = engine.stress_tensor(2.0, 0.0, 0.0, 6_000.0, 0.0, 0.0).unwrap();
        assert_relative_eq!(state.sigma_xx(), 100_000.0, max_relative = 1e-12);
    }

    #[test]
    fn test_point_in_crack_is_unloaded() {
        let s = section();
        let mut cracks = CrackRegistry::new();
        cracks.add(CrackRecord::from_millimeters(2.0, 150.0), &s).unwrap();
        let state = tensor_at(&s, &cracks, -0.149, 10_000.0, 5_000.0);
        assert!(state.in_crack);
        assert_eq!(state.tensor, Mat3::zeros());
    }

    #[test]
    fn test_cracked_section_uses_shifted_axis() {
        let s = section();
        let mut cracks = CrackRegistry::new();
        cracks.add(CrackRecord::from_millimeters(2.0, 100.0), &s).unwrap();

        // On the shifted axis (y = 50 mm) bending stress vanishes
        let on_axis = tensor_at(&s, &cracks, 0.05, 10_000.0, 6_000.0);
        assert_abs_diff_eq!(on_axis.sigma_xx(), 0.0, epsilon = 1e-6);
        // and shear peaks at 1.5 V / A'
        assert_relative_eq!(on_axis.tau_xy(), -1.5 * 6_000.0 / (0.2 * 0.2), max_relative = 1e-12);

        let top = tensor_at(&s, &cracks, 0.15, 10_000.0, 0.0);
        let i_eff = 0.2 * 0.2_f64.powi(3) / 12.0;
        assert_relative_eq!(top.sigma_xx(), -10_000.0 * 0.1 / i_eff, max_relative = 1e-12);
    }

    #[test]
    fn test_crack_elsewhere_does_not_apply() {
        let s = section();
        let mut cracks = CrackRegistry::new();
        cracks.add(CrackRecord::from_millimeters(1.0, 100.0), &s).unwrap();
        let state = tensor_at(&s, &cracks, -0.149, 10_000.0, 5_000.0);
        assert!(state.crack.is_none());
        assert!(state.sigma_xx() > 0.0);
    }

    #[test]
    fn test_zero_depth_crack_matches_uncracked() {
        let s = section();
        let none = CrackRegistry::new();
        let mut zero = CrackRegistry::new();
        zero.add(CrackRecord::new(2.0, 0.0), &s).unwrap();

        for y in [-0.15, -0.07, 0.0, 0.03, 0.15] {
            let a = tensor_at(&s, &none, y, 12_345.0, -6_789.0);
            let b = tensor_at(&s, &zero, y, 12_345.0, -6_789.0);
            assert_eq!(a.tensor, b.tensor);
        }
    }

    #[test]
    fn test_point_outside_section_rejected() {
        let s = section();
        let cracks = CrackRegistry::new();
        let engine = StressEngine::new(&s, &cracks, AnalysisSettings::default());
        let err = engine.stress_tensor(2.0, 0.2, 0.0, 0.0, 1.0, 1.0).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        let err = engine.stress_tensor(2.0, 0.0, 0.11, 0.0, 1.0, 1.0).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_principal_stresses_match_eigenvalues() {
        let tensor = plane_stress_tensor(12.0e6, -4.0e6);
        let (s1, s2) = principal_stresses(12.0e6, -4.0e6);
        let mut eigen: Vec<f64> = tensor.symmetric_eigen().eigenvalues.iter().copied().collect();
        eigen.sort_by(|a, b| b.total_cmp(a));
        assert_relative_eq!(eigen[0], s1, max_relative = 1e-9);
        assert_abs_diff_eq!(eigen[1], 0.0, epsilon = 1e-3);
        assert_relative_eq!(eigen[2], s2, max_relative = 1e-9);
    }

    #[test]
    fn test_mohr_circle() {
        let circle = mohr_circle(10.0, 0.0);
        assert_relative_eq!(circle.center_pa, 5.0);
        assert_relative_eq!(circle.radius_pa, 5.0);
        assert_relative_eq!(circle.sigma_1_pa, 10.0);
        assert_relative_eq!(circle.sigma_2_pa, 0.0);
        assert_eq!(circle.principal_angle_rad, 0.0);

        // Pure shear: principal direction at 45°
        let circle = mohr_circle(0.0, 3.0);
        assert_relative_eq!(circle.max_shear_pa, 3.0);
        assert_relative_eq!(circle.principal_angle_rad, std::f64::consts::FRAC_PI_4);
    }

    #[test]
    fn test_limits_validation() {
        let limits = StressLimits::from_megapascals(3.0, 30.0, 2.0).unwrap();
        assert_relative_eq!(limits.compressive_pa, -30.0e6);
        let limits = StressLimits::from_megapascals(3.0, -30.0, 2.0).unwrap();
        assert_relative_eq!(limits.compressive_pa, -30.0e6);

        for (t, c, s) in [(0.0, 30.0, 2.0), (3.0, 0.0, 2.0), (3.0, 30.0, -2.0)] {
            let err = StressLimits::from_megapascals(t, c, s).unwrap_err();
            assert_eq!(err.error_code(), "INVALID_INPUT");
        }
    }

    #[test]
    fn test_safety_check_envelopes() {
        let limits = StressLimits::new(10.0, 20.0, 5.0).unwrap();

        let check = safety_check(8.0, 0.0, &limits);
        assert_eq!(check.verdict, SafetyVerdict::Safe);
        assert_relative_eq!(check.tension.unity_ratio, 0.8);
        assert_eq!(check.compression.unity_ratio, 0.0);

        // Exactly on the limit still passes
        assert!(safety_check(10.0, 0.0, &limits).verdict.is_safe());

        let check = safety_check(12.0, 0.0, &limits);
        assert_eq!(check.verdict, SafetyVerdict::Unsafe);
        assert!(!check.tension.passes);

        let check = safety_check(-25.0, 0.0, &limits);
        assert_eq!(check.verdict, SafetyVerdict::Unsafe);
        assert!(!check.compression.passes);
        assert_relative_eq!(check.compression.unity_ratio, 1.25);

        // Pure shear of 6 fails shear only
        let check = safety_check(0.0, 6.0, &limits);
        assert!(check.tension.passes);
        assert!(check.compression.passes);
        assert!(!check.shear.passes);
        assert_relative_eq!(check.governing_ratio(), 1.2);
    }

    #[test]
    fn test_verdict_display() {
        assert_eq!(SafetyVerdict::Safe.to_string(), "safe");
        assert_eq!(SafetyVerdict::Unsafe.to_string(), "unsafe");
        assert_eq!(serde_json::to_string(&SafetyVerdict::Unsafe).unwrap(), "\"unsafe\"");
    }
}
