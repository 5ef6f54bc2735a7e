//! # beam_core - Beam Analysis Engine
//!
//! `beam_core` analyzes a prismatic rectangular beam on one pin and one roller:
//! support reactions, shear and moment at any section, and the stress state at
//! any point of the cross-section, optionally weakened by cracks. All inputs
//! and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **SI inside**: N, m and Pa in the core; mm, kN and MPa only at the boundary
//!
//! ## Quick Start
//!
//! ```rust
//! use beam_core::calculations::{solve_reactions, InternalForceField};
//! use beam_core::loads::{Load, LoadSet};
//! use beam_core::settings::AnalysisSettings;
//! use beam_core::supports::Supports;
//!
//! let mut loads = LoadSet::new();
//! loads.add(Load::distributed(1.0, 3.0, -2.0)).unwrap();
//!
//! let supports = Supports::new(4.0, 0.0);
//! let settings = AnalysisSettings::default();
//! let reactions = solve_reactions(&loads, &supports, settings.position_tolerance_m).unwrap();
//! assert!((reactions.pin.force_n - 2.0).abs() < 1e-12);
//!
//! let field = InternalForceField::new(&loads, reactions, settings);
//! assert!((field.moment(2.0, true) - 3.0).abs() < 1e-12);
//! ```
//!
//! ## Modules
//!
//! - [`section`] - Beam geometry and gross section properties
//! - [`loads`] - Point loads, point moments and distributed loads
//! - [`supports`] - Pin and roller positions
//! - [`crack`] - Registered cracks and reduced section properties
//! - [`calculations`] - Reactions, internal forces, stresses and the full analysis
//! - [`equations`] - Closed-form section and stress formulas
//! - [`settings`] - Numeric tolerances
//! - [`case`] - Saved analysis cases with metadata
//! - [`file_io`] - Atomic case file saves
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod case;
pub mod crack;
pub mod equations;
pub mod errors;
pub mod file_io;
pub mod loads;
pub mod section;
pub mod settings;
pub mod supports;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate, BeamInput, BeamResult};
pub use case::{AnalysisCase, CaseMetadata};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_case, save_case};
pub use settings::AnalysisSettings;
