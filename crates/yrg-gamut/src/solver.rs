//! Chroma at which one output channel reaches a target value.
//!
//! For a fixed luminance `Y` and hue `h`, one display channel is the
//! rational function
//!
//! ```text
//! channel(c) = Y * (n0 + c*n1) / (d0 + c*d1)
//! ```
//!
//! so `channel(c) = k` clears to the linear equation
//!
//! ```text
//! c * (Y*n1 - k*d1) = k*d0 - Y*n0
//! ```
//!
//! [`GamutChromaSolver::solve_for_chroma`] solves that exactly.
//! [`GamutChromaSolver::solve_for_chroma_bracketed`] finds the same roots
//! numerically by bisection on the forward pipeline, restricted to
//! `[0, max_chroma]`.

use serde::{Deserialize, Serialize};
use tracing::trace;
use yrg_math::Vec3;
use yrg_math::roots::{bisect, scan_sign_changes};

use crate::error::{GamutError, GamutResult, ensure_finite};
use crate::pipeline::{ChannelLine, YrgModel, is_negligible};

/// Target value of an output channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Extreme {
    /// Black point, k = 0.
    Black,
    /// White point, k = 1.
    White,
    /// Any other target.
    Custom(f64),
}

impl Extreme {
    /// Numeric target k.
    #[inline]
    pub fn value(&self) -> f64 {
        match self {
            Self::Black => 0.0,
            Self::White => 1.0,
            Self::Custom(k) => *k,
        }
    }
}

impl std::fmt::Display for Extreme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Black => f.pad("black"),
            Self::White => f.pad("white"),
            Self::Custom(k) => f.pad(&k.to_string()),
        }
    }
}

/// Real chroma values solving `channel(c) = k`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChromaSolution {
    /// The channel never reaches the target.
    None,
    /// Isolated roots in ascending order. Negative roots are kept.
    Roots(Vec<f64>),
    /// The channel equals the target at every chroma.
    Everywhere,
}

impl ChromaSolution {
    /// Isolated roots; empty for [`ChromaSolution::None`] and
    /// [`ChromaSolution::Everywhere`].
    pub fn roots(&self) -> &[f64] {
        match self {
            Self::Roots(roots) => roots,
            Self::None | Self::Everywhere => &[],
        }
    }

    /// True if no isolated root exists.
    pub fn is_empty(&self) -> bool {
        self.roots().is_empty()
    }

    fn from_roots(mut roots: Vec<f64>) -> Self {
        if roots.is_empty() {
            Self::None
        } else {
            roots.sort_by(f64::total_cmp);
            Self::Roots(roots)
        }
    }
}

/// Settings of the numeric solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Upper end of the scanned chroma range.
    pub max_chroma: f64,
    /// Number of scan intervals over `[0, max_chroma]`.
    pub samples: usize,
    /// Bisection stops below this bracket width.
    pub tolerance: f64,
    /// Bisection iteration cap.
    pub max_iterations: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_chroma: 1.0,
            samples: 256,
            tolerance: 1e-14,
            max_iterations: 200,
        }
    }
}

/// Solves the boundary equation of one channel.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GamutChromaSolver {
    model: YrgModel,
}

impl GamutChromaSolver {
    /// Creates a solver over `model`.
    pub fn new(model: YrgModel) -> Self {
        Self { model }
    }

    /// The underlying Yrg model.
    pub fn model(&self) -> &YrgModel {
        &self.model
    }

    /// Forward pipeline value of `row` at `(Y, c, h)`.
    pub fn evaluate_channel(
        &self,
        luminance: f64,
        chroma: f64,
        hue: f64,
        row: Vec3,
    ) -> GamutResult<f64> {
        self.model.evaluate_channel(luminance, chroma, hue, row)
    }

    /// Every real chroma `c` with `channel(c) = k`, unfiltered.
    ///
    /// Fails with [`GamutError::DegenerateNormalization`] when the
    /// normalization denominator vanishes identically along the hue line,
    /// or when `Y = 0` puts the only candidate root on the pole.
    ///
    /// # Example
    ///
    /// ```rust
    /// use yrg_gamut::{ChromaSolution, GamutChromaSolver};
    /// use yrg_math::Vec3;
    ///
    /// let solver = GamutChromaSolver::default();
    /// let row = Vec3::new(4.972204839931804, -4.923181968063908, 0.32155482099646393);
    /// let solution = solver.solve_for_chroma(0.5, 0.0, row, 1.0).unwrap();
    /// assert_eq!(solution.roots().len(), 1);
    /// ```
    pub fn solve_for_chroma(
        &self,
        luminance: f64,
        hue: f64,
        row: Vec3,
        k: f64,
    ) -> GamutResult<ChromaSolution> {
        trace!(luminance, hue, k, "solve_for_chroma");
        check_inputs(luminance, hue, row, k)?;

        match linear_root(&self.model.channel_line(hue, row), luminance, k)? {
            LinearRoot::Fixed(solution) => Ok(solution),
            LinearRoot::At(chroma) => Ok(ChromaSolution::Roots(vec![chroma])),
        }
    }

    /// Numeric counterpart of [`Self::solve_for_chroma`] over
    /// `[0, config.max_chroma]`.
    ///
    /// Scan intervals across which the normalization denominator changes
    /// sign contain the pole, not a root, and are skipped.
    pub fn solve_for_chroma_bracketed(
        &self,
        luminance: f64,
        hue: f64,
        row: Vec3,
        k: f64,
        config: &SolverConfig,
    ) -> GamutResult<ChromaSolution> {
        trace!(luminance, hue, k, samples = config.samples, "solve_for_chroma_bracketed");
        check_inputs(luminance, hue, row, k)?;

        // Constant and degenerate channels are decided on the line itself;
        // sampling them only sees rounding noise around k.
        if let LinearRoot::Fixed(solution) =
            linear_root(&self.model.channel_line(hue, row), luminance, k)?
        {
            return Ok(solution);
        }

        let residual = |c: f64| {
            self.model
                .evaluate_channel(luminance, c, hue, row)
                .ok()
                .map(|v| v - k)
        };

        let roots = scan_sign_changes(residual, 0.0, config.max_chroma, config.samples)
            .into_iter()
            .filter(|b| {
                let lo = self.model.denominator(b.lo, hue);
                let hi = self.model.denominator(b.hi, hue);
                lo.signum() == hi.signum()
            })
            .filter_map(|b| bisect(residual, b, config.tolerance, config.max_iterations))
            .collect();

        Ok(ChromaSolution::from_roots(roots))
    }
}

/// Outcome of `k * (d0 + c*d1) = Y * (n0 + c*n1)` before any root is trusted.
enum LinearRoot {
    /// No isolated root: never or always equal to k.
    Fixed(ChromaSolution),
    /// The single root.
    At(f64),
}

/// Classifies the cleared boundary equation of one channel line.
///
/// All zero tests are relative to the magnitude of the terms, so the
/// outcome does not change with the scale of `Y` and `k`.
fn linear_root(line: &ChannelLine, luminance: f64, k: f64) -> GamutResult<LinearRoot> {
    if line.is_degenerate() {
        return Err(GamutError::DegenerateNormalization {
            luminance,
            chroma: None,
        });
    }

    let slope = luminance * line.n1 - k * line.d1;
    let offset = k * line.d0 - luminance * line.n0;
    let flat = is_negligible(slope, (luminance * line.n1).abs() + (k * line.d1).abs());
    let level = is_negligible(offset, (k * line.d0).abs() + (luminance * line.n0).abs());

    // A proportional line is constant off the pole; its cleared root, if
    // any, is the pole itself.
    if flat || line.is_proportional() {
        return Ok(LinearRoot::Fixed(if flat && level {
            ChromaSolution::Everywhere
        } else {
            ChromaSolution::None
        }));
    }

    let chroma = offset / slope;
    if !chroma.is_finite() {
        return Ok(LinearRoot::Fixed(ChromaSolution::None));
    }
    // The denominator at the root is Y * (d0*n1 - d1*n0) / slope.
    if luminance == 0.0 {
        return Err(GamutError::DegenerateNormalization {
            luminance,
            chroma: Some(chroma),
        });
    }
    Ok(LinearRoot::At(chroma))
}

fn check_inputs(luminance: f64, hue: f64, row: Vec3, k: f64) -> GamutResult<()> {
    ensure_finite("luminance", luminance)?;
    ensure_finite("hue", hue)?;
    ensure_finite("k", k)?;
    if !row.is_finite() {
        return Err(GamutError::InvalidValue(format!("row = {row:?}")));
    }
    Ok(())
}
