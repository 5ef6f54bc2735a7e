//! # Structural Mechanics Equations
//!
//! The closed-form formulas used by the analysis components, kept in one place
//! so they can be checked against textbook references.
//!
//! ## Modules
//!
//! - [`section`] - Rectangular cross-section properties (A, I, Q)
//! - [`stress`] - Flexure, shear formula and principal stress transformation
//!
//! ## Sign Conventions
//!
//! - **Loads**: Positive upward
//! - **Applied moments**: Positive clockwise
//! - **Internal moment**: Positive causes tension on bottom fiber (sagging)
//! - **Internal shear**: Positive when forces left of the cut resolve upward
//! - **Reactions**: Positive upward

pub mod section;
pub mod stress;

pub use section::{
    rectangular_area,
    rectangular_first_moment,
    rectangular_moment_of_inertia,
    reduced_rectangle_centroid,
};

pub use stress::{
    flexure_stress,
    mohr_radius,
    principal_stresses,
    shear_formula_stress,
};
