//! Yrg coordinates in polar form.
//!
//! A colour is described by luminance `Y` and a chroma/hue pair around the
//! fixed Yrg white point:
//!
//! ```text
//! r = c * cos(h) + r0
//! g = c * sin(h) + g0
//! b = 1 - r - g
//! ```

use yrg_math::Vec3;

/// Yrg white point `(r0, g0)`. Constants of the colour space.
pub const YRG_WHITE: (f64, f64) = (0.21902143, 0.54371398);

/// A Yrg colour: luminance plus two chromaticity coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColourCoordinate {
    /// Luminance Y.
    pub luminance: f64,
    /// r chromaticity.
    pub r: f64,
    /// g chromaticity.
    pub g: f64,
}

impl ColourCoordinate {
    /// Builds a coordinate from luminance, chroma and hue (radians).
    ///
    /// # Example
    ///
    /// ```rust
    /// use yrg_gamut::{ColourCoordinate, YRG_WHITE};
    ///
    /// let neutral = ColourCoordinate::from_polar(0.5, 0.0, 1.2);
    /// assert_eq!((neutral.r, neutral.g), YRG_WHITE);
    /// ```
    #[inline]
    pub fn from_polar(luminance: f64, chroma: f64, hue: f64) -> Self {
        let (sh, ch) = hue.sin_cos();
        Self {
            luminance,
            r: chroma * ch + YRG_WHITE.0,
            g: chroma * sh + YRG_WHITE.1,
        }
    }

    /// Normalized rgb with the closure `r + g + b = 1`.
    ///
    /// Components may leave [0, 1]; that is how an out-of-gamut chromaticity
    /// shows up before any correction.
    #[inline]
    pub fn to_normalized_rgb(&self) -> Vec3 {
        Vec3::new(self.r, self.g, 1.0 - self.r - self.g)
    }
}

/// Free-function form of [`ColourCoordinate::from_polar`].
#[inline]
pub fn build_colour_coordinate(luminance: f64, chroma: f64, hue: f64) -> ColourCoordinate {
    ColourCoordinate::from_polar(luminance, chroma, hue)
}

/// Free-function form of [`ColourCoordinate::to_normalized_rgb`].
#[inline]
pub fn to_normalized_rgb(coord: &ColourCoordinate) -> Vec3 {
    coord.to_normalized_rgb()
}

/// Normalized rgb of the achromatic axis.
#[inline]
pub fn white_rgb() -> Vec3 {
    Vec3::new(YRG_WHITE.0, YRG_WHITE.1, 1.0 - YRG_WHITE.0 - YRG_WHITE.1)
}

/// Change of normalized rgb per unit chroma at hue `h`: `(ch, sh, -ch - sh)`.
#[inline]
pub fn chroma_direction(hue: f64) -> Vec3 {
    let (sh, ch) = hue.sin_cos();
    Vec3::new(ch, sh, -ch - sh)
}
