//! Forward Yrg -> display channel pipeline.
//!
//! ```text
//! (Y, c, h) -> rgb -> lms -> LMS (luminance normalized) -> row . LMS
//! ```
//!
//! Each stage is a free function so it can be checked on its own; the
//! [`YrgModel`] holds the matrices and runs the composition.

use tracing::trace;
use yrg_math::{Mat3, Vec3};

use crate::coord::{build_colour_coordinate, chroma_direction, white_rgb};
use crate::error::{GamutError, GamutResult, ensure_finite};

/// Relative size below which a sum counts as cancelled to zero.
pub const DEGENERATE_EPSILON: f64 = 1e-12;

/// True when `value`, a sum of terms with total magnitude `scale`, is zero
/// up to cancellation. Independent of the overall scale of the terms.
#[inline]
pub fn is_negligible(value: f64, scale: f64) -> bool {
    value.abs() <= DEGENERATE_EPSILON * scale
}

/// Normalized rgb to normalized lms.
pub const RGB_TO_LMS: Mat3 = Mat3::from_rows([
    [0.95, 0.38, 0.00],
    [0.05, 0.62, 0.03],
    [0.00, 0.00, 0.97],
]);

/// Luminance weights of L and M.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LuminanceWeights {
    /// Weight of L.
    pub l: f64,
    /// Weight of M.
    pub m: f64,
}

impl LuminanceWeights {
    /// CIE 2006 luminance weights.
    pub const CIE_2006: Self = Self {
        l: 0.68990272,
        m: 0.34832189,
    };

    /// `w1*L + w2*M`. S does not contribute to luminance.
    #[inline]
    pub fn luminance(&self, lms: Vec3) -> f64 {
        self.l * lms.x + self.m * lms.y
    }
}

impl Default for LuminanceWeights {
    fn default() -> Self {
        Self::CIE_2006
    }
}

/// Applies the rgb -> lms matrix.
#[inline]
pub fn rgb_to_lms(rgb: Vec3, matrix: &Mat3) -> Vec3 {
    *matrix * rgb
}

/// Rescales `lms` so that its luminance equals `luminance`.
///
/// Fails with [`GamutError::DegenerateNormalization`] instead of producing
/// an infinite or NaN result.
pub fn normalize_by_luminance(
    lms: Vec3,
    luminance: f64,
    weights: &LuminanceWeights,
) -> GamutResult<Vec3> {
    let denominator = weights.luminance(lms);
    let scale = (weights.l * lms.x).abs() + (weights.m * lms.y).abs();
    if is_negligible(denominator, scale) {
        return Err(GamutError::DegenerateNormalization {
            luminance,
            chroma: None,
        });
    }
    Ok(lms * (luminance / denominator))
}

/// Predicted intensity of one output channel.
#[inline]
pub fn project_to_channel(lms: Vec3, row: Vec3) -> f64 {
    lms.dot(row)
}

/// Affine form of the channel along one hue line:
/// `channel(c) = Y * (n0 + c*n1) / (d0 + c*d1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelLine {
    /// Row projection at zero chroma.
    pub n0: f64,
    /// Row projection per unit chroma.
    pub n1: f64,
    /// Luminance denominator at zero chroma.
    pub d0: f64,
    /// Luminance denominator per unit chroma.
    pub d1: f64,
    /// Magnitude of the weighted terms summed into `d0` and `d1`.
    pub scale: f64,
}

impl ChannelLine {
    /// Normalization denominator at chroma `c`.
    #[inline]
    pub fn denominator(&self, chroma: f64) -> f64 {
        self.d0 + chroma * self.d1
    }

    /// True when the denominator vanishes for every chroma.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        is_negligible(self.d0, self.scale) && is_negligible(self.d1, self.scale)
    }

    /// True when numerator and denominator are proportional, so the
    /// channel is constant wherever it is defined.
    #[inline]
    pub fn is_proportional(&self) -> bool {
        let cross = self.d0 * self.n1 - self.d1 * self.n0;
        is_negligible(cross, (self.d0 * self.n1).abs() + (self.d1 * self.n0).abs())
    }
}

/// The rgb -> lms transform and luminance weights of a Yrg space.
///
/// The white point is not part of the model; see [`crate::YRG_WHITE`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YrgModel {
    /// Normalized rgb -> lms.
    pub rgb_to_lms: Mat3,
    /// Luminance weights.
    pub weights: LuminanceWeights,
}

impl Default for YrgModel {
    fn default() -> Self {
        Self {
            rgb_to_lms: RGB_TO_LMS,
            weights: LuminanceWeights::CIE_2006,
        }
    }
}

impl YrgModel {
    /// Creates a model with a custom rgb -> lms matrix.
    pub fn new(rgb_to_lms: Mat3, weights: LuminanceWeights) -> Self {
        Self {
            rgb_to_lms,
            weights,
        }
    }

    /// Luminance-normalized LMS of `(Y, c, h)`.
    pub fn lms(&self, luminance: f64, chroma: f64, hue: f64) -> GamutResult<Vec3> {
        let rgb = build_colour_coordinate(luminance, chroma, hue).to_normalized_rgb();
        let lms = rgb_to_lms(rgb, &self.rgb_to_lms);
        normalize_by_luminance(lms, luminance, &self.weights).map_err(|e| match e {
            GamutError::DegenerateNormalization { luminance, .. } => {
                GamutError::DegenerateNormalization {
                    luminance,
                    chroma: Some(chroma),
                }
            }
            other => other,
        })
    }

    /// Runs the full forward pipeline and projects onto `row`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use yrg_gamut::YrgModel;
    /// use yrg_math::Vec3;
    ///
    /// let model = YrgModel::default();
    /// // The luminance row itself reproduces Y.
    /// let row = Vec3::new(0.68990272, 0.34832189, 0.0);
    /// let y = model.evaluate_channel(0.42, 0.1, 1.0, row).unwrap();
    /// assert!((y - 0.42).abs() < 1e-12);
    /// ```
    pub fn evaluate_channel(
        &self,
        luminance: f64,
        chroma: f64,
        hue: f64,
        row: Vec3,
    ) -> GamutResult<f64> {
        trace!(luminance, chroma, hue, "evaluate_channel");
        ensure_finite("luminance", luminance)?;
        ensure_finite("chroma", chroma)?;
        ensure_finite("hue", hue)?;
        Ok(project_to_channel(self.lms(luminance, chroma, hue)?, row))
    }

    /// Unnormalized luminance denominator `w1*L + w2*M` at `(c, h)`.
    pub fn denominator(&self, chroma: f64, hue: f64) -> f64 {
        let rgb = build_colour_coordinate(0.0, chroma, hue).to_normalized_rgb();
        self.weights.luminance(rgb_to_lms(rgb, &self.rgb_to_lms))
    }

    /// Splits the channel at hue `h` into its affine numerator and
    /// denominator in chroma.
    pub fn channel_line(&self, hue: f64, row: Vec3) -> ChannelLine {
        let lms0 = rgb_to_lms(white_rgb(), &self.rgb_to_lms);
        let lms1 = rgb_to_lms(chroma_direction(hue), &self.rgb_to_lms);
        let w = &self.weights;
        ChannelLine {
            n0: project_to_channel(lms0, row),
            n1: project_to_channel(lms1, row),
            d0: w.luminance(lms0),
            d1: w.luminance(lms1),
            scale: (w.l * lms0.x).abs()
                + (w.m * lms0.y).abs()
                + (w.l * lms1.x).abs()
                + (w.m * lms1.y).abs(),
        }
    }
}
