//! # Structural Calculations
//!
//! The analysis pipeline, in the order it runs:
//!
//! - [`reactions`] - Pin and roller reactions from static equilibrium
//! - [`internal_forces`] - Shear and moment at any section, with one-sided limits
//! - [`stress`] - Stress tensor, principal stresses, Mohr's circle, safety check
//! - [`beam`] - `BeamInput` / `BeamResult` / `calculate()` tying the above together
//!
//! Each stage takes the previous stage's output as an explicit value, so the
//! pipeline can also be driven step by step from library code.

pub mod beam;
pub mod internal_forces;
pub mod reactions;
pub mod stress;

// Re-export commonly used types
pub use beam::{calculate, BeamInput, BeamResult, LoadInput, QueryPoint, QueryResult};
pub use internal_forces::{ForcePair, InternalForceField, SectionForces, Side};
pub use reactions::{solve_reactions, Direction, Reaction, Reactions};
pub use stress::{
    mohr_circle, principal_stresses, safety_check, MohrCircle, SafetyCheck, SafetyVerdict,
    StressEngine, StressLimits, StressState,
};
