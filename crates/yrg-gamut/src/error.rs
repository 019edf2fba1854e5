//! Error types for gamut-boundary solving.

use thiserror::Error;

/// Gamut solver error.
///
/// An empty root set is not an error; see [`crate::ChromaSolution::None`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GamutError {
    /// The luminance normalization `w1*L + w2*M` is zero, so the cone
    /// response cannot be rescaled to the requested luminance.
    #[error("degenerate luminance normalization (Y = {luminance}, chroma = {chroma:?})")]
    DegenerateNormalization {
        /// Target luminance.
        luminance: f64,
        /// Chroma at which the denominator vanished, if a single one.
        chroma: Option<f64>,
    },

    /// Input value is invalid (NaN, Inf).
    #[error("invalid input value: {0}")]
    InvalidValue(String),

    /// Primaries do not span a colour space.
    #[error("singular primaries: {0}")]
    SingularPrimaries(String),
}

/// Result type for gamut operations.
pub type GamutResult<T> = Result<T, GamutError>;

/// Rejects NaN and infinite inputs with a named [`GamutError::InvalidValue`].
pub(crate) fn ensure_finite(name: &str, value: f64) -> GamutResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(GamutError::InvalidValue(format!("{name} = {value}")))
    }
}
