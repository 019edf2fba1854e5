//! # yrg-math
//!
//! Math primitives for the Yrg gamut-boundary solver.
//!
//! - [`Mat3`] - 3x3 matrices for RGB/LMS/XYZ transforms
//! - [`Vec3`] - 3D vectors for colour triplets
//! - [`roots`] - sign-change bracketing and bisection
//!
//! # Design
//!
//! Everything is `f64`. Boundary chroma values are checked by evaluating the
//! forward pipeline at the root and comparing against the target to ~1e-9,
//! which single precision cannot hold.
//!
//! All matrix operations assume **row-major** storage and **column vectors**:
//!
//! ```text
//! result = matrix * vector
//! ```
//!
//! # Usage
//!
//! ```rust
//! use yrg_math::{Mat3, Vec3};
//!
//! let rgb_to_lms = Mat3::from_rows([
//!     [0.95, 0.38, 0.00],
//!     [0.05, 0.62, 0.03],
//!     [0.00, 0.00, 0.97],
//! ]);
//!
//! let lms = rgb_to_lms * Vec3::new(0.3, 0.5, 0.2);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod mat3;
mod vec3;
pub mod roots;

pub use mat3::*;
pub use vec3::*;

/// Re-export glam types for direct use
pub mod glam {
    pub use ::glam::{DMat3, DVec3};
}
