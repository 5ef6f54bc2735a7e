//! # Beam Analysis
//!
//! End-to-end analysis of a rectangular beam on a pin and a roller: reactions,
//! shear and moment diagrams, and the stress state at each queried point.
//!
//! ## Assumptions
//!
//! - Linear-elastic, homogeneous, isotropic material
//! - Euler–Bernoulli bending, small deflections
//! - Rectangular section, supports on the bottom fiber
//! - Vertical loads only; axial force is zero throughout
//!
//! Inputs use engineering units (mm, kN, MPa) and are converted to N, m and
//! Pa before entering the core.
//!
//! ## Example
//!
//! ```rust
//! use beam_core::calculations::beam::{calculate, BeamInput, LoadInput, QueryPoint};
//! use beam_core::settings::AnalysisSettings;
//! use beam_core::supports::Supports;
//!
//! let input = BeamInput {
//!     label: "B-1".to_string(),
//!     length_m: 4.0,
//!     width_mm: 200.0,
//!     height_mm: 300.0,
//!     supports: Supports::new(4.0, 0.0),
//!     loads: vec![LoadInput::Point { position_m: 2.0, magnitude_kn: -10.0 }],
//!     cracks: vec![],
//!     limits: None,
//!     queries: vec![QueryPoint::new(2.0, -150.0, 0.0)],
//!     diagram_points: 41,
//! };
//!
//! let result = calculate(&input, &AnalysisSettings::default()).unwrap();
//! assert!((result.reactions.pin.force_n - 5_000.0).abs() < 1e-9);
//! println!("σxx at bottom midspan: {:.3} MPa", result.queries[0].sigma_xx_mpa());
//! ```

use serde::{Deserialize, Serialize};

use super::internal_forces::{
    diagram_extremes, DiagramExtremes, DiagramPoint, ForcePair, InternalForceField, SectionForces,
};
use super::reactions::{solve_reactions, Reactions};
use super::stress::{MohrCircle, SafetyCheck, SafetyVerdict, StressEngine, StressLimits};
use crate::crack::{CrackRecord, CrackRegistry, CrackedSection};
use crate::errors::{require_finite, CalcResult};
use crate::loads::{Load, LoadSet};
use crate::section::Section;
use crate::settings::AnalysisSettings;
use crate::supports::Supports;
use crate::units::{
    mm_to_m, pa_to_mpa, KilonewtonMeters, Kilonewtons, KilonewtonsPerMeter, NewtonMeters, Newtons,
    NewtonsPerMeter,
};

/// Default number of evenly spaced diagram samples
pub const DEFAULT_DIAGRAM_POINTS: usize = 101;

fn default_diagram_points() -> usize {
    DEFAULT_DIAGRAM_POINTS
}

/// A load in engineering units.
///
/// Positive magnitudes act upward, positive moments clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LoadInput {
    Point { position_m: f64, magnitude_kn: f64 },
    Moment { position_m: f64, magnitude_knm: f64 },
    Distributed { start_m: f64, end_m: f64, intensity_knpm: f64 },
}

impl LoadInput {
    /// Convert to a core load in N, N·m and N/m
    pub fn to_load(&self) -> Load {
        match *self {
            LoadInput::Point {
                position_m,
                magnitude_kn,
            } => Load::point(position_m, Newtons::from(Kilonewtons(magnitude_kn)).value()),
            LoadInput::Moment {
                position_m,
                magnitude_knm,
            } => Load::moment(
                position_m,
                NewtonMeters::from(KilonewtonMeters(magnitude_knm)).value(),
            ),
            LoadInput::Distributed {
                start_m,
                end_m,
                intensity_knpm,
            } => Load::distributed(
                start_m,
                end_m,
                NewtonsPerMeter::from(KilonewtonsPerMeter(intensity_knpm)).value(),
            ),
        }
    }
}

/// A crack: position in meters, depth in millimeters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrackInput {
    pub position_m: f64,
    pub depth_mm: f64,
}

/// Allowable stresses in MPa. Compression may be given with either sign.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LimitsInput {
    pub tensile_mpa: f64,
    pub compressive_mpa: f64,
    pub shear_mpa: f64,
}

/// A stress query point: x along the beam (m), y and z in the section (mm)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueryPoint {
    pub x_m: f64,
    /// Height above the section centroid, positive up (mm)
    pub y_mm: f64,
    /// Lateral offset from the section centroid (mm)
    #[serde(default)]
    pub z_mm: f64,
}

impl QueryPoint {
    pub fn new(x_m: f64, y_mm: f64, z_mm: f64) -> Self {
        QueryPoint { x_m, y_mm, z_mm }
    }
}

/// Input parameters for a beam analysis.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "B-1",
///   "length_m": 4.0,
///   "width_mm": 200.0,
///   "height_mm": 300.0,
///   "supports": { "pin_m": 4.0, "roller_m": 0.0 },
///   "loads": [
///     { "type": "Point", "position_m": 2.0, "magnitude_kn": -10.0 },
///     { "type": "Distributed", "start_m": 1.0, "end_m": 3.0, "intensity_knpm": -2.0 }
///   ],
///   "cracks": [ { "position_m": 2.0, "depth_mm": 150.0 } ],
///   "limits": { "tensile_mpa": 3.0, "compressive_mpa": 30.0, "shear_mpa": 2.0 },
///   "queries": [ { "x_m": 2.0, "y_mm": 149.0 } ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamInput {
    /// User label for this beam (e.g., "B-1")
    #[serde(default)]
    pub label: String,

    /// Beam length in meters
    pub length_m: f64,

    /// Section width b in millimeters
    pub width_mm: f64,

    /// Section height h in millimeters
    pub height_mm: f64,

    pub supports: Supports,

    pub loads: Vec<LoadInput>,

    #[serde(default)]
    pub cracks: Vec<CrackInput>,

    /// Allowable stresses; without them no safety check is made
    #[serde(default)]
    pub limits: Option<LimitsInput>,

    #[serde(default)]
    pub queries: Vec<QueryPoint>,

    /// Evenly spaced samples for the V and M diagrams
    #[serde(default = "default_diagram_points")]
    pub diagram_points: usize,
}

impl BeamInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        let section = self.section()?;
        self.load_set()?;
        self.crack_registry(&section)?;
        self.stress_limits()?;
        for (i, query) in self.queries.iter().enumerate() {
            require_finite(&format!("queries[{i}].x_m"), query.x_m)?;
            require_finite(&format!("queries[{i}].y_mm"), query.y_mm)?;
            require_finite(&format!("queries[{i}].z_mm"), query.z_mm)?;
        }
        Ok(())
    }

    /// Beam section in SI units
    pub fn section(&self) -> CalcResult<Section> {
        Section::from_millimeters(self.length_m, self.width_mm, self.height_mm)
    }

    /// Loads in SI units, in input order
    pub fn load_set(&self) -> CalcResult<LoadSet> {
        let mut loads = LoadSet::new();
        for load in &self.loads {
            loads.add(load.to_load())?;
        }
        Ok(loads)
    }

    /// Cracks validated against `section`
    pub fn crack_registry(&self, section: &Section) -> CalcResult<CrackRegistry> {
        let mut cracks = CrackRegistry::new();
        for crack in &self.cracks {
            cracks.add(
                CrackRecord::from_millimeters(crack.position_m, crack.depth_mm),
                section,
            )?;
        }
        Ok(cracks)
    }

    /// Stress limits in pascals, if given
    pub fn stress_limits(&self) -> CalcResult<Option<StressLimits>> {
        self.limits
            .map(|l| StressLimits::from_megapascals(l.tensile_mpa, l.compressive_mpa, l.shear_mpa))
            .transpose()
    }
}

/// Section properties used by the analysis (SI)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionSummary {
    pub length_m: f64,
    pub width_m: f64,
    pub height_m: f64,
    pub area_m2: f64,
    pub moment_of_inertia_m4: f64,
}

impl From<&Section> for SectionSummary {
    fn from(section: &Section) -> Self {
        SectionSummary {
            length_m: section.length(),
            width_m: section.width(),
            height_m: section.height(),
            area_m2: section.area(),
            moment_of_inertia_m4: section.moment_of_inertia(),
        }
    }
}

/// Stress state at one query point.
///
/// All stresses in Pa, forces in N and N·m.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub x_m: f64,
    pub y_m: f64,
    pub z_m: f64,

    /// Both one-sided limits and the governing side
    pub forces: SectionForces,

    /// The pair the stresses were computed from
    pub effective: ForcePair,

    /// Reduced section at x, if cracked
    pub crack: Option<CrackedSection>,

    /// Point lies inside the crack and carries nothing
    pub in_crack: bool,

    /// Stress tensor, row-major
    pub tensor_pa: [[f64; 3]; 3],

    pub sigma_xx_pa: f64,
    pub tau_xy_pa: f64,
    pub sigma_1_pa: f64,
    pub sigma_2_pa: f64,

    pub mohr: MohrCircle,

    /// Present when limits were given
    pub safety: Option<SafetyCheck>,
}

impl QueryResult {
    pub fn sigma_xx_mpa(&self) -> f64 {
        pa_to_mpa(self.sigma_xx_pa)
    }

    pub fn tau_xy_mpa(&self) -> f64 {
        pa_to_mpa(self.tau_xy_pa)
    }

    /// Verdict, if a safety check was made
    pub fn verdict(&self) -> Option<SafetyVerdict> {
        self.safety.map(|s| s.verdict)
    }
}

/// Results from a beam analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamResult {
    pub label: String,

    pub section: SectionSummary,

    /// Signed support reactions (N)
    pub reactions: Reactions,

    /// Net applied vertical load (N), positive upward
    pub total_load_n: f64,

    /// Support and load coordinates where V or M may jump (m)
    pub discontinuities_m: Vec<f64>,

    /// V and M samples over [0, L]
    pub diagram: Vec<DiagramPoint>,

    pub extremes: DiagramExtremes,

    /// One entry per query point, in input order
    pub queries: Vec<QueryResult>,
}

impl BeamResult {
    /// True unless some query failed its safety check
    pub fn passes(&self) -> bool {
        self.queries
            .iter()
            .all(|q| q.verdict().map_or(true, |v| v.is_safe()))
    }

    /// Highest unity ratio over all checked queries
    pub fn governing_ratio(&self) -> Option<f64> {
        self.queries
            .iter()
            .filter_map(|q| q.safety.map(|s| s.governing_ratio()))
            .reduce(f64::max)
    }

    /// Queries whose verdict is unsafe
    pub fn unsafe_queries(&self) -> impl Iterator<Item = &QueryResult> {
        self.queries
            .iter()
            .filter(|q| q.verdict() == Some(SafetyVerdict::Unsafe))
    }
}

/// Analyze a beam.
///
/// # Arguments
///
/// * `input` - Beam geometry, supports, loads, cracks, limits and query points
/// * `settings` - Numeric tolerances
///
/// # Returns
///
/// * `Ok(BeamResult)` - Reactions, diagrams and per-query stress states
/// * `Err(CalcError)` - Structured error if the configuration is invalid
pub fn calculate(input: &BeamInput, settings: &AnalysisSettings) -> CalcResult<BeamResult> {
    settings.validate()?;
    input.validate()?;

    let section = input.section()?;
    let loads = input.load_set()?;
    let cracks = input.crack_registry(&section)?;
    let limits = input.stress_limits()?;

    log::info!(
        "analyzing beam '{}': L = {} m, {} x {} mm, {} load(s), {} crack(s), {} query point(s)",
        input.label,
        section.length(),
        input.width_mm,
        input.height_mm,
        loads.len(),
        cracks.len(),
        input.queries.len()
    );

    let reactions = solve_reactions(&loads, &input.supports, settings.position_tolerance_m)?;
    let field = InternalForceField::new(&loads, reactions, *settings);
    let engine = StressEngine::new(&section, &cracks, *settings);

    let diagram = field.sample(section.length(), input.diagram_points);
    let extremes = diagram_extremes(&diagram);

    let mut queries = Vec::with_capacity(input.queries.len());
    for query in &input.queries {
        let forces = field.section_forces(query.x_m);
        let effective = forces.effective();
        let state = engine.stress_tensor(
            query.x_m,
            mm_to_m(query.y_mm),
            mm_to_m(query.z_mm),
            0.0,
            effective.moment_nm,
            effective.shear_n,
        )?;

        let (sigma_1_pa, sigma_2_pa) = state.principal_stresses();
        let safety = limits.as_ref().map(|l| state.safety_check(l));

        log::debug!(
            "query x = {} m, y = {} mm: V = {:.3} N, M = {:.3} N·m ({:?} side), σxx = {:.4} MPa, τxy = {:.4} MPa",
            query.x_m,
            query.y_mm,
            effective.shear_n,
            effective.moment_nm,
            forces.governing,
            pa_to_mpa(state.sigma_xx()),
            pa_to_mpa(state.tau_xy())
        );

        if let Some(check) = safety.filter(|c| !c.verdict.is_safe()) {
            log::warn!(
                "unsafe stress at x = {} m, y = {} mm: σ1 = {:.4} MPa, σ2 = {:.4} MPa, |τ| = {:.4} MPa (ratio {:.2})",
                query.x_m,
                query.y_mm,
                pa_to_mpa(sigma_1_pa),
                pa_to_mpa(sigma_2_pa),
                pa_to_mpa(state.tau_xy().abs()),
                check.governing_ratio()
            );
        }

        queries.push(QueryResult {
            x_m: state.x_m,
            y_m: state.y_m,
            z_m: state.z_m,
            forces,
            effective,
            crack: state.crack,
            in_crack: state.in_crack,
            tensor_pa: state.rows(),
            sigma_xx_pa: state.sigma_xx(),
            tau_xy_pa: state.tau_xy(),
            sigma_1_pa,
            sigma_2_pa,
            mohr: state.mohr_circle(),
            safety,
        });
    }

    let result = BeamResult {
        label: input.label.clone(),
        section: SectionSummary::from(&section),
        reactions,
        total_load_n: loads.total_force(),
        discontinuities_m: field.discontinuities(),
        diagram,
        extremes,
        queries,
    };

    log::info!(
        "beam '{}' done: R_pin = {:.3} N {}, R_roller = {:.3} N {}, |M|max = {:.3} N·m at x = {} m, {}",
        result.label,
        result.reactions.pin.force_n,
        result.reactions.pin.direction,
        result.reactions.roller.force_n,
        result.reactions.roller.direction,
        result.extremes.max_moment_nm,
        result.extremes.max_moment_position_m,
        if result.passes() { "all checks pass" } else { "UNSAFE" }
    );

    Ok(result)
}
