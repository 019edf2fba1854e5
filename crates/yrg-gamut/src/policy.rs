//! Maximum in-gamut chroma for a luminance and hue.
//!
//! The solver answers one (channel, extreme) question at a time. The
//! policy asks all of them, keeps the non-negative roots, and takes the
//! smallest: any larger chroma pushes at least one channel out of
//! `[black, white]`.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use yrg_math::Mat3;
use yrg_primaries::{Primaries, lms_to_rgb_matrix};

use crate::error::{GamutError, GamutResult};
use crate::solver::{ChromaSolution, Extreme, GamutChromaSolver};

/// Display output channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Red, row 0.
    Red,
    /// Green, row 1.
    Green,
    /// Blue, row 2.
    Blue,
}

impl Channel {
    /// All channels in row order.
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Matrix row of this channel.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Self::Red => 0,
            Self::Green => 1,
            Self::Blue => 2,
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
        };
        f.pad(name)
    }
}

/// One channel reaching one extreme at a non-negative chroma.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundaryHit {
    /// Chroma of the hit.
    pub chroma: f64,
    /// Channel that hits.
    pub channel: Channel,
    /// Extreme it hits.
    pub extreme: Extreme,
}

/// Reduces candidate hits to the in-gamut maximum chroma: the smallest
/// non-negative one. Negative and non-finite chroma are ignored.
pub fn select_min_non_negative<I>(hits: I) -> Option<BoundaryHit>
where
    I: IntoIterator<Item = BoundaryHit>,
{
    hits.into_iter()
        .filter(|hit| hit.chroma.is_finite() && hit.chroma >= 0.0)
        .min_by(|a, b| a.chroma.total_cmp(&b.chroma))
}

/// Channel/extreme combinations consulted for the gamut boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct GamutBoundaryPolicy {
    /// Targets every channel is solved against.
    pub extremes: Vec<Extreme>,
    /// LMS -> display RGB; row `i` is channel `i`.
    pub lms_to_rgb: Mat3,
}

impl GamutBoundaryPolicy {
    /// Black and white boundaries of the given display matrix.
    pub fn new(lms_to_rgb: Mat3) -> Self {
        Self {
            extremes: vec![Extreme::Black, Extreme::White],
            lms_to_rgb,
        }
    }

    /// Black and white boundaries of a display given by its primaries.
    pub fn for_primaries(primaries: &Primaries) -> GamutResult<Self> {
        let lms_to_rgb = lms_to_rgb_matrix(primaries)
            .ok_or_else(|| GamutError::SingularPrimaries(primaries.name.to_string()))?;
        Ok(Self::new(lms_to_rgb))
    }

    /// Replaces the extremes.
    pub fn with_extremes(mut self, extremes: Vec<Extreme>) -> Self {
        self.extremes = extremes;
        self
    }

    /// All non-negative boundary hits at `(Y, h)`.
    ///
    /// Channels with a degenerate normalization are skipped; so are
    /// solutions without an isolated root.
    pub fn candidates(
        &self,
        solver: &GamutChromaSolver,
        luminance: f64,
        hue: f64,
    ) -> GamutResult<Vec<BoundaryHit>> {
        let mut hits = Vec::new();
        for channel in Channel::ALL {
            let row = self.lms_to_rgb.row(channel.index());
            for &extreme in &self.extremes {
                let solution = match solver.solve_for_chroma(luminance, hue, row, extreme.value()) {
                    Ok(solution) => solution,
                    Err(e @ GamutError::DegenerateNormalization { .. }) => {
                        debug!(%channel, %extreme, hue, "skipping channel: {e}");
                        continue;
                    }
                    Err(e) => return Err(e),
                };
                // A channel sitting on the extreme at every chroma never
                // crosses it, so it bounds nothing.
                if solution == ChromaSolution::Everywhere {
                    trace!(%channel, %extreme, "channel constant at extreme");
                }
                hits.extend(
                    solution
                        .roots()
                        .iter()
                        .filter(|c| **c >= 0.0)
                        .map(|&chroma| BoundaryHit {
                            chroma,
                            channel,
                            extreme,
                        }),
                );
            }
        }
        Ok(hits)
    }

    /// Largest chroma that keeps every channel in range at `(Y, h)`, with
    /// the channel and extreme that limit it. `None` if no channel ever
    /// reaches an extreme along this hue.
    ///
    /// # Example
    ///
    /// ```rust
    /// use yrg_gamut::{GamutBoundaryPolicy, GamutChromaSolver};
    /// use yrg_primaries::SRGB;
    ///
    /// let policy = GamutBoundaryPolicy::for_primaries(&SRGB).unwrap();
    /// let hit = policy
    ///     .max_chroma(&GamutChromaSolver::default(), 0.5, 0.0)
    ///     .unwrap()
    ///     .unwrap();
    /// assert!(hit.chroma > 0.0);
    /// ```
    pub fn max_chroma(
        &self,
        solver: &GamutChromaSolver,
        luminance: f64,
        hue: f64,
    ) -> GamutResult<Option<BoundaryHit>> {
        Ok(select_min_non_negative(self.candidates(solver, luminance, hue)?))
    }

    /// Maximum chroma at `steps` evenly spaced hues over `[0, 2*pi)`.
    pub fn boundary_table(
        &self,
        solver: &GamutChromaSolver,
        luminance: f64,
        steps: usize,
    ) -> GamutResult<BoundaryTable> {
        let steps = steps.max(1);
        let rows = (0..steps)
            .into_par_iter()
            .map(|i| {
                let hue = std::f64::consts::TAU * i as f64 / steps as f64;
                Ok(BoundaryRow {
                    hue,
                    hit: self.max_chroma(solver, luminance, hue)?,
                })
            })
            .collect::<GamutResult<Vec<_>>>()?;

        Ok(BoundaryTable { luminance, rows })
    }
}

/// Maximum chroma at one hue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundaryRow {
    /// Hue in radians.
    pub hue: f64,
    /// Limiting hit, if any.
    pub hit: Option<BoundaryHit>,
}

/// Maximum chroma around the hue circle at one luminance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryTable {
    /// Luminance of every row.
    pub luminance: f64,
    /// Rows ordered by hue.
    pub rows: Vec<BoundaryRow>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{LuminanceWeights, YrgModel};
    use approx::assert_abs_diff_eq;
    use yrg_primaries::SRGB;

    fn hit(chroma: f64) -> BoundaryHit {
        BoundaryHit {
            chroma,
            channel: Channel::Red,
            extreme: Extreme::White,
        }
    }

    #[test]
    fn test_select_min_non_negative() {
        let picked = select_min_non_negative([hit(0.3), hit(-0.1), hit(0.12), hit(f64::NAN)]);
        assert_eq!(picked.map(|h| h.chroma), Some(0.12));
        assert!(select_min_non_negative([hit(-1.0)]).is_none());
        assert_eq!(select_min_non_negative([hit(0.0)]).map(|h| h.chroma), Some(0.0));
    }

    #[test]
    fn test_reference_hue_zero() {
        let policy = GamutBoundaryPolicy::for_primaries(&SRGB).unwrap();
        let solver = GamutChromaSolver::default();
        let best = policy.max_chroma(&solver, 0.5, 0.0).unwrap().unwrap();
        assert_abs_diff_eq!(best.chroma, 0.14465438753482124, epsilon = 1e-9);
        assert_eq!(best.channel, Channel::Red);
        assert_eq!(best.extreme, Extreme::White);
    }

    #[test]
    fn test_max_chroma_keeps_channels_in_range() {
        let policy = GamutBoundaryPolicy::for_primaries(&SRGB).unwrap();
        let solver = GamutChromaSolver::default();
        for i in 0..36 {
            let h = i as f64 * std::f64::consts::TAU / 36.0;
            let best = policy.max_chroma(&solver, 0.5, h).unwrap().unwrap();
            // Just inside the boundary every channel is in range.
            let c = best.chroma * (1.0 - 1e-6);
            for ch in Channel::ALL {
                let v = solver
                    .evaluate_channel(0.5, c, h, policy.lms_to_rgb.row(ch.index()))
                    .unwrap();
                assert!((-1e-9..=1.0 + 1e-9).contains(&v), "h={h} {ch}={v}");
            }
            let limiting = solver
                .evaluate_channel(0.5, best.chroma, h, policy.lms_to_rgb.row(best.channel.index()))
                .unwrap();
            assert_abs_diff_eq!(limiting, best.extreme.value(), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_degenerate_channels_are_skipped() {
        let model = YrgModel::new(Mat3::ZERO, LuminanceWeights::CIE_2006);
        let solver = GamutChromaSolver::new(model);
        let policy = GamutBoundaryPolicy::for_primaries(&SRGB).unwrap();
        assert!(policy.candidates(&solver, 0.5, 1.0).unwrap().is_empty());
        assert!(policy.max_chroma(&solver, 0.5, 1.0).unwrap().is_none());
    }

    #[test]
    fn test_custom_extreme() {
        let solver = GamutChromaSolver::default();
        let policy = GamutBoundaryPolicy::for_primaries(&SRGB)
            .unwrap()
            .with_extremes(vec![Extreme::Custom(0.9)]);
        let hit = policy.max_chroma(&solver, 0.5, 0.0).unwrap().unwrap();
        assert_eq!(hit.extreme, Extreme::Custom(0.9));

        let row = policy.lms_to_rgb.row(hit.channel.index());
        let value = solver.evaluate_channel(0.5, hit.chroma, 0.0, row).unwrap();
        assert_abs_diff_eq!(value, 0.9, epsilon = 1e-9);

        // Red crosses 0.9 before it reaches white.
        assert!(hit.chroma > 0.0 && hit.chroma < 0.14465438753482124);
        let red = solver.solve_for_chroma(0.5, 0.0, policy.lms_to_rgb.row(0), 0.9).unwrap();
        assert!(hit.chroma <= red.roots()[0]);
    }

    #[test]
    fn test_low_luminance_keeps_black_limit() {
        let solver = GamutChromaSolver::default();
        let policy = GamutBoundaryPolicy::for_primaries(&SRGB).unwrap();
        let h = std::f64::consts::PI;
        let reference = policy.max_chroma(&solver, 0.5, h).unwrap().unwrap();
        let tiny = policy.max_chroma(&solver, 1e-13, h).unwrap().unwrap();
        assert_eq!(reference.channel, Channel::Red);
        assert_eq!(reference.extreme, Extreme::Black);
        assert_eq!((tiny.channel, tiny.extreme), (reference.channel, reference.extreme));
        assert_abs_diff_eq!(tiny.chroma, reference.chroma, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_input_propagates() {
        let policy = GamutBoundaryPolicy::for_primaries(&SRGB).unwrap();
        let solver = GamutChromaSolver::default();
        assert!(matches!(
            policy.max_chroma(&solver, f64::NAN, 0.0),
            Err(GamutError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_boundary_table_ordered() {
        let policy = GamutBoundaryPolicy::for_primaries(&SRGB).unwrap();
        let solver = GamutChromaSolver::default();
        let table = policy.boundary_table(&solver, 0.5, 12).unwrap();
        assert_eq!(table.rows.len(), 12);
        assert!(table.rows.windows(2).all(|w| w[0].hue < w[1].hue));
        assert_abs_diff_eq!(
            table.rows[0].hit.unwrap().chroma,
            0.14465438753482124,
            epsilon = 1e-9
        );
        for row in &table.rows {
            assert!(row.hit.is_some());
        }
    }

    #[test]
    fn test_channel_index() {
        assert_eq!(Channel::ALL.map(Channel::index), [0, 1, 2]);
        assert_eq!(Channel::Green.to_string(), "green");
    }
}
