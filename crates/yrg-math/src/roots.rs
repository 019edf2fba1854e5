//! Root bracketing and bisection on a closed interval.
//!
//! Used where a closed form is not wanted or not trusted: the interval is
//! sampled uniformly, every sign change of the function becomes a
//! [`Bracket`], and each bracket is narrowed by bisection.
//!
//! The function may be undefined at some points (e.g. a division by zero
//! inside it); it reports that by returning `None`, and intervals touching
//! such a point are skipped.
//!
//! ```rust
//! use yrg_math::roots::{bisect, scan_sign_changes};
//!
//! let f = |x: f64| Some(x * x - 2.0);
//! let brackets = scan_sign_changes(f, 0.0, 4.0, 16);
//! assert_eq!(brackets.len(), 1);
//!
//! let root = bisect(f, brackets[0], 1e-12, 200).unwrap();
//! assert!((root - 2f64.sqrt()).abs() < 1e-10);
//! ```

/// An interval `[lo, hi]` known to contain a sign change (or an exact zero
/// when `lo == hi`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    /// Lower end.
    pub lo: f64,
    /// Upper end.
    pub hi: f64,
}

impl Bracket {
    /// Midpoint of the interval.
    #[inline]
    pub fn midpoint(&self) -> f64 {
        0.5 * (self.lo + self.hi)
    }

    /// True when the bracket collapsed onto an exact zero.
    #[inline]
    pub fn is_exact(&self) -> bool {
        self.lo == self.hi
    }
}

/// Samples `f` at `samples + 1` evenly spaced points over `[lo, hi]` and
/// returns every sub-interval over which `f` changes sign.
///
/// Points where `f` is exactly zero are returned as degenerate brackets.
/// Sub-intervals where `f` is undefined at either end are skipped.
pub fn scan_sign_changes<F>(mut f: F, lo: f64, hi: f64, samples: usize) -> Vec<Bracket>
where
    F: FnMut(f64) -> Option<f64>,
{
    let samples = samples.max(1);
    let step = (hi - lo) / samples as f64;
    let mut brackets = Vec::new();

    let mut prev_x = lo;
    let mut prev = f(lo);
    if prev == Some(0.0) {
        brackets.push(Bracket { lo, hi: lo });
    }

    for i in 1..=samples {
        let x = if i == samples { hi } else { lo + step * i as f64 };
        let cur = f(x);

        match (prev, cur) {
            (_, Some(b)) if b == 0.0 => {
                brackets.push(Bracket { lo: x, hi: x });
            }
            (Some(a), Some(b)) if a * b < 0.0 => {
                brackets.push(Bracket { lo: prev_x, hi: x });
            }
            _ => {}
        }

        prev_x = x;
        prev = cur;
    }

    brackets
}

/// Narrows a sign-change bracket by bisection until it is narrower than
/// `tolerance` or `max_iter` halvings were done.
///
/// Returns `None` if `f` becomes undefined inside the bracket.
pub fn bisect<F>(mut f: F, bracket: Bracket, tolerance: f64, max_iter: usize) -> Option<f64>
where
    F: FnMut(f64) -> Option<f64>,
{
    if bracket.is_exact() {
        return Some(bracket.lo);
    }

    let mut lo = bracket.lo;
    let mut hi = bracket.hi;
    let mut f_lo = f(lo)?;

    for _ in 0..max_iter {
        if (hi - lo) <= tolerance {
            break;
        }
        let mid = 0.5 * (lo + hi);
        let f_mid = f(mid)?;
        if f_mid == 0.0 {
            return Some(mid);
        }
        if f_lo * f_mid < 0.0 {
            hi = mid;
        } else {
            lo = mid;
            f_lo = f_mid;
        }
    }

    Some(0.5 * (lo + hi))
}
