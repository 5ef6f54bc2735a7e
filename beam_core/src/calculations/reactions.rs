//! Support Reaction Solver
//!
//! Static equilibrium for a rigid beam on one pin and one roller: two vertical
//! unknowns, two equations (ΣFy = 0 and ΣM about the roller = 0).
//!
//! ## Formulas
//!
//! With every load's counterclockwise moment about the roller summed as
//! `M_r = Σ P·(x − x_r) + Σ W·(c − x_r) − Σ M₀`:
//!
//! - R_pin    = −M_r / (x_pin − x_r)
//! - R_roller = −ΣF − R_pin
//!
//! Reactions are signed (positive upward) and tagged with a [`Direction`].
//!
//! ## Example
//! ```rust
//! use beam_core::calculations::reactions::solve_reactions;
//! use beam_core::loads::{Load, LoadSet};
//! use beam_core::supports::Supports;
//!
//! let loads = LoadSet::new().with_load(Load::point(2.0, -10.0)).unwrap();
//! let reactions = solve_reactions(&loads, &Supports::new(4.0, 0.0), 1e-9).unwrap();
//! assert!((reactions.pin.force_n - 5.0).abs() < 1e-12);
//! assert!((reactions.roller.force_n - 5.0).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::loads::LoadSet;
use crate::supports::{SupportKind, SupportPositions, Supports};

/// Direction a reaction acts in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Direction of a signed vertical force; zero counts as upward
    pub fn of(force_n: f64) -> Self {
        if force_n < 0.0 {
            Direction::Down
        } else {
            Direction::Up
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Up => write!(f, "upward"),
            Direction::Down => write!(f, "downward"),
        }
    }
}

/// Vertical reaction at one support
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    pub kind: SupportKind,
    /// Support x-position (m)
    pub position_m: f64,
    /// Signed vertical force (N), positive upward
    pub force_n: f64,
    pub direction: Direction,
}

impl Reaction {
    fn new(kind: SupportKind, position_m: f64, force_n: f64) -> Self {
        Reaction {
            kind,
            position_m,
            force_n,
            direction: Direction::of(force_n),
        }
    }

    /// Unsigned magnitude for reporting (N)
    pub fn magnitude(&self) -> f64 {
        self.force_n.abs()
    }
}

/// Both solved reactions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reactions {
    pub pin: Reaction,
    pub roller: Reaction,
}

impl Reactions {
    /// Both reactions, pin first
    pub fn iter(&self) -> impl Iterator<Item = &Reaction> {
        [&self.pin, &self.roller].into_iter()
    }

    /// Signed sum of both reactions (N)
    pub fn total(&self) -> f64 {
        self.pin.force_n + self.roller.force_n
    }

    /// Support positions the reactions were solved for
    pub fn positions(&self) -> SupportPositions {
        SupportPositions {
            pin_m: self.pin.position_m,
            roller_m: self.roller.position_m,
        }
    }
}

/// Solve the two vertical support reactions.
///
/// # Errors
/// - `IncompleteConfiguration` if a support is unset or no load is registered
/// - `DegenerateGeometry` if the supports coincide within `tolerance_m`
pub fn solve_reactions(loads: &LoadSet, supports: &Supports, tolerance_m: f64) -> CalcResult<Reactions> {
    let positions = supports.positions()?;
    loads.require_loads()?;
    positions.require_distinct(tolerance_m)?;

    let total_force = loads.total_force();
    let moment_about_roller = loads.moment_about(positions.roller_m);

    let pin_force = -moment_about_roller / positions.span();
    let roller_force = -total_force - pin_force;

    let reactions = Reactions {
        pin: Reaction::new(SupportKind::Pin, positions.pin_m, pin_force),
        roller: Reaction::new(SupportKind::Roller, positions.roller_m, roller_force),
    };

    log::debug!(
        "reactions solved: pin {:.6} N {} at x = {} m, roller {:.6} N {} at x = {} m (applied {:.6} N)",
        reactions.pin.force_n,
        reactions.pin.direction,
        positions.pin_m,
        reactions.roller.force_n,
        reactions.roller.direction,
        positions.roller_m,
        total_force
    );

    Ok(reactions)
}
