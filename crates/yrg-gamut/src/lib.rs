//! # yrg-gamut
//!
//! Gamut-boundary chroma in the Yrg colour space.
//!
//! Given a luminance `Y`, a hue `h` and one row of an LMS -> display RGB
//! matrix, [`GamutChromaSolver`] returns the chroma at which that display
//! channel reaches a target value `k` (0 for the black point, 1 for the
//! white point). [`GamutBoundaryPolicy`] combines the three channels and
//! both extremes into the largest chroma that stays in gamut.
//!
//! # Architecture
//!
//! ```text
//!                     yrg-gamut
//!                         |
//!        +----------------+----------------+
//!        |                                 |
//!   coord / pipeline                  policy / formula
//!   (Y, c, h) -> channel              min over channels
//!        |                                 |
//!        +---------------+-----------------+
//!                        |
//!             yrg-primaries    yrg-math
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use yrg_gamut::{GamutBoundaryPolicy, GamutChromaSolver};
//! use yrg_primaries::SRGB;
//!
//! let solver = GamutChromaSolver::default();
//! let policy = GamutBoundaryPolicy::for_primaries(&SRGB).unwrap();
//!
//! let red = policy.lms_to_rgb.row(0);
//! let white_hit = solver.solve_for_chroma(0.5, 0.0, red, 1.0).unwrap();
//!
//! let limit = policy.max_chroma(&solver, 0.5, 0.0).unwrap();
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod coord;
pub mod formula;
pub mod pipeline;
pub mod policy;
pub mod solver;

pub use coord::{ColourCoordinate, YRG_WHITE, build_colour_coordinate, to_normalized_rgb};
pub use error::{GamutError, GamutResult};
pub use formula::{BoundaryFormula, FormulaStyle};
pub use pipeline::{
    LuminanceWeights, RGB_TO_LMS, YrgModel, normalize_by_luminance, project_to_channel,
    rgb_to_lms,
};
pub use policy::{
    BoundaryHit, BoundaryRow, BoundaryTable, Channel, GamutBoundaryPolicy,
    select_min_non_negative,
};
pub use solver::{ChromaSolution, Extreme, GamutChromaSolver, SolverConfig};

// Re-export sub-crates for convenience
pub use yrg_math as math;
pub use yrg_primaries as primaries;
