//! # yrg-primaries
//!
//! Display primaries and the LMS 2006 matrices that connect the Yrg
//! cone space to a display RGB space.
//!
//! The boundary solver works one output channel at a time; each channel is
//! one row of the LMS → display RGB matrix built here:
//!
//! ```text
//! LMS 2006 --[LMS_2006_TO_XYZ]--> XYZ (D65) --[xyz_to_rgb_matrix]--> RGB
//! ```
//!
//! # Included Color Spaces
//!
//! Only D65 spaces are provided, matching the D65 white of Yrg; no
//! chromatic adaptation happens on this path.
//!
//! | Color Space | Gamut Size | Primary Use |
//! |-------------|------------|-------------|
//! | sRGB / Rec.709 | Small | Web, HDTV |
//! | Display P3 | Medium | Wide gamut displays |
//! | Adobe RGB | Medium | Print |
//! | Rec.2020 | Large | UHDTV, HDR |
//!
//! # Usage
//!
//! ```rust
//! use yrg_primaries::{SRGB, lms_to_rgb_matrix};
//!
//! let lms_to_srgb = lms_to_rgb_matrix(&SRGB).unwrap();
//! let red_row = lms_to_srgb.row(0);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

use yrg_math::{Mat3, Vec3};

/// RGB color space primaries definition.
///
/// Defines a color space by its three primary colors (R, G, B) and white point,
/// all specified as CIE xy chromaticity coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Primaries {
    /// Red primary (x, y) chromaticity
    pub r: (f64, f64),
    /// Green primary (x, y) chromaticity
    pub g: (f64, f64),
    /// Blue primary (x, y) chromaticity
    pub b: (f64, f64),
    /// White point (x, y) chromaticity
    pub w: (f64, f64),
    /// Color space name
    pub name: &'static str,
}

impl Primaries {
    /// Looks up a preset by name, case-insensitively.
    ///
    /// # Example
    ///
    /// ```rust
    /// use yrg_primaries::Primaries;
    ///
    /// assert_eq!(Primaries::from_name("Rec2020").unwrap().name, "Rec.2020");
    /// assert!(Primaries::from_name("ntsc").is_none());
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().replace(['-', '_', '.', ' '], "").as_str() {
            "srgb" | "rec709" | "bt709" => Some(SRGB),
            "rec2020" | "bt2020" => Some(REC2020),
            "p3" | "displayp3" | "p3d65" => Some(DISPLAY_P3),
            "adobergb" | "adobe" | "adobergb1998" => Some(ADOBE_RGB),
            _ => None,
        }
    }

    /// White point as XYZ (Y=1).
    #[inline]
    pub fn white_xyz(&self) -> Vec3 {
        xy_to_xyz(self.w.0, self.w.1)
    }
}

/// All presets, in the order the CLI lists them.
pub const PRESETS: [Primaries; 4] = [SRGB, DISPLAY_P3, ADOBE_RGB, REC2020];

// ============================================================================
// Standard White Points
// ============================================================================

/// D65 white point chromaticity (daylight, ~6500K).
pub const D65_XY: (f64, f64) = (0.31270, 0.32900);

// ============================================================================
// Standard Color Space Primaries
// ============================================================================

/// sRGB / Rec.709 primaries (D65 white point).
pub const SRGB: Primaries = Primaries {
    r: (0.6400, 0.3300),
    g: (0.3000, 0.6000),
    b: (0.1500, 0.0600),
    w: D65_XY,
    name: "sRGB",
};

/// Rec.709 primaries (identical to sRGB).
pub const REC709: Primaries = SRGB;

/// Rec.2020 primaries (D65 white point).
pub const REC2020: Primaries = Primaries {
    r: (0.7080, 0.2920),
    g: (0.1700, 0.7970),
    b: (0.1310, 0.0460),
    w: D65_XY,
    name: "Rec.2020",
};

/// Display P3 primaries (D65 white point).
pub const DISPLAY_P3: Primaries = Primaries {
    r: (0.6800, 0.3200),
    g: (0.2650, 0.6900),
    b: (0.1500, 0.0600),
    w: D65_XY,
    name: "Display P3",
};

/// Adobe RGB (1998) primaries (D65 white point).
pub const ADOBE_RGB: Primaries = Primaries {
    r: (0.6400, 0.3300),
    g: (0.2100, 0.7100),
    b: (0.1500, 0.0600),
    w: D65_XY,
    name: "Adobe RGB",
};

// ============================================================================
// LMS 2006
// ============================================================================

/// CIE 2006 LMS cone space to XYZ (D65).
pub const LMS_2006_TO_XYZ: Mat3 = Mat3::from_rows([
    [1.80794659, -1.29971660, 0.34785879],
    [0.61783960, 0.39595453, -0.04104687],
    [-0.12546960, 0.20478038, 1.74274183],
]);

/// XYZ (D65) to CIE 2006 LMS cone space.
pub const XYZ_TO_LMS_2006: Mat3 = Mat3::from_rows([
    [0.257085, 0.859943, -0.031061],
    [-0.394427, 1.175800, 0.106423],
    [0.064856, -0.076250, 0.559067],
]);

// ============================================================================
// Matrix Generation
// ============================================================================

/// Converts xy chromaticity to XYZ (with Y=1).
fn xy_to_xyz(x: f64, y: f64) -> Vec3 {
    if y.abs() < 1e-12 {
        Vec3::ZERO
    } else {
        Vec3::new(x / y, 1.0, (1.0 - x - y) / y)
    }
}

/// Computes the RGB to XYZ matrix for a set of primaries.
///
/// # Algorithm
///
/// 1. Convert xy chromaticities to XYZ (with Y=1)
/// 2. Compute scaling factors so white point maps correctly
/// 3. Multiply primaries by scaling factors
///
/// Returns `None` when the primaries are collinear.
pub fn rgb_to_xyz_matrix(primaries: &Primaries) -> Option<Mat3> {
    let r_xyz = xy_to_xyz(primaries.r.0, primaries.r.1);
    let g_xyz = xy_to_xyz(primaries.g.0, primaries.g.1);
    let b_xyz = xy_to_xyz(primaries.b.0, primaries.b.1);

    // Solve M * S = W for the per-primary scale
    let m = Mat3::from_col_vecs(r_xyz, g_xyz, b_xyz);
    let s = m.inverse()? * primaries.white_xyz();

    Some(Mat3::from_col_vecs(r_xyz * s.x, g_xyz * s.y, b_xyz * s.z))
}

/// Computes the XYZ to RGB matrix for a set of primaries.
///
/// This is the inverse of [`rgb_to_xyz_matrix`].
pub fn xyz_to_rgb_matrix(primaries: &Primaries) -> Option<Mat3> {
    rgb_to_xyz_matrix(primaries)?.inverse()
}

/// Computes the LMS 2006 to display RGB matrix.
///
/// Row `i` of the result predicts display channel `i` from LMS, which is
/// exactly the row vector the boundary solver consumes.
///
/// # Example
///
/// ```rust
/// use yrg_primaries::{SRGB, lms_to_rgb_matrix};
///
/// let m = lms_to_rgb_matrix(&SRGB).unwrap();
/// assert!(m.is_finite());
/// ```
pub fn lms_to_rgb_matrix(primaries: &Primaries) -> Option<Mat3> {
    Some(xyz_to_rgb_matrix(primaries)? * LMS_2006_TO_XYZ)
}
