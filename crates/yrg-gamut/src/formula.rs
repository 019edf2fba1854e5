//! Closed-form boundary chroma with symbolic inputs.
//!
//! Keeps `Y`, `ch = cos(h)`, `sh = sin(h)`, `k` and the output row
//! `a1, a2, a3` symbolic and folds every Yrg constant into numeric
//! coefficients:
//!
//! ```text
//!          k*D0 - Y*(a . LMS0)
//! c = -----------------------------------------------
//!     Y*(ch*(a . P) + sh*(a . Q)) - k*(ch*Dp + sh*Dq)
//! ```
//!
//! where `LMS0` is the white point in lms, `P`/`Q` the lms change per unit
//! `ch`/`sh`, and `D*` their luminance weights. The rendered text is meant
//! to be pasted into pipeline source.

use std::fmt;

use yrg_math::Vec3;

use crate::coord::white_rgb;
use crate::pipeline::{YrgModel, is_negligible, rgb_to_lms};

/// How [`BoundaryFormula::render`] spells the expression.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormulaStyle {
    /// Plain math with `a1 a2 a3`.
    #[default]
    Math,
    /// C expression with `a[0] a[1] a[2]` and float literals.
    C,
}

/// Numeric coefficients of the boundary chroma formula.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryFormula {
    /// White point lms.
    pub lms0: Vec3,
    /// lms per unit `ch`.
    pub p: Vec3,
    /// lms per unit `sh`.
    pub q: Vec3,
    /// Luminance of `lms0`.
    pub d0: f64,
    /// Luminance of `p`.
    pub dp: f64,
    /// Luminance of `q`.
    pub dq: f64,
}

impl BoundaryFormula {
    /// Folds the constants of `model` into the formula.
    pub fn derive(model: &YrgModel) -> Self {
        let lms0 = rgb_to_lms(white_rgb(), &model.rgb_to_lms);
        let p = rgb_to_lms(Vec3::new(1.0, 0.0, -1.0), &model.rgb_to_lms);
        let q = rgb_to_lms(Vec3::new(0.0, 1.0, -1.0), &model.rgb_to_lms);
        Self {
            lms0,
            p,
            q,
            d0: model.weights.luminance(lms0),
            dp: model.weights.luminance(p),
            dq: model.weights.luminance(q),
        }
    }

    /// Evaluates the formula. `None` when its denominator vanishes.
    pub fn evaluate(&self, luminance: f64, ch: f64, sh: f64, row: Vec3, k: f64) -> Option<f64> {
        let numerator = k * self.d0 - luminance * row.dot(self.lms0);
        let chroma_term = luminance * (ch * row.dot(self.p) + sh * row.dot(self.q));
        let weight_term = k * (ch * self.dp + sh * self.dq);
        let denominator = chroma_term - weight_term;
        if is_negligible(denominator, chroma_term.abs() + weight_term.abs()) {
            return None;
        }
        Some(numerator / denominator)
    }

    /// Renders `c = ...` in the given style.
    pub fn render(&self, style: FormulaStyle) -> String {
        let names = match style {
            FormulaStyle::Math => ["a1", "a2", "a3"],
            FormulaStyle::C => ["a[0]", "a[1]", "a[2]"],
        };
        let row = |v: Vec3| {
            linear(
                &[(v.x, names[0]), (v.y, names[1]), (v.z, names[2])],
                style,
            )
        };
        let trig = |c: f64, s: f64| linear(&[(c, "ch"), (s, "sh")], style);

        let numerator = format!("k * {} - Y * ({})", literal(self.d0, style), row(self.lms0));
        let denominator = format!(
            "Y * (ch * ({}) + sh * ({})) - k * ({})",
            row(self.p),
            row(self.q),
            trig(self.dp, self.dq),
        );

        match style {
            FormulaStyle::Math => format!("c = ({numerator}) / ({denominator})"),
            FormulaStyle::C => format!("const float c = ({numerator}) / ({denominator});"),
        }
    }
}

impl fmt::Display for BoundaryFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(FormulaStyle::Math))
    }
}

/// Formats a coefficient with at most 10 decimals, trailing zeros dropped.
fn literal(value: f64, style: FormulaStyle) -> String {
    let mut s = format!("{value:.10}");
    if s.contains('.') {
        s = s.trim_end_matches('0').trim_end_matches('.').to_string();
    }
    if s == "-0" {
        s = "0".to_string();
    }
    match style {
        FormulaStyle::Math => s,
        FormulaStyle::C if s.contains('.') => format!("{s}f"),
        FormulaStyle::C => format!("{s}.0f"),
    }
}

/// `c1*x1 + c2*x2 - ...`, skipping zero coefficients.
fn linear(terms: &[(f64, &str)], style: FormulaStyle) -> String {
    let mut out = String::new();
    for &(coeff, name) in terms {
        if coeff.abs() < 5e-11 {
            continue;
        }
        let magnitude = literal(coeff.abs(), style);
        if out.is_empty() {
            if coeff < 0.0 {
                out.push('-');
            }
        } else {
            out.push_str(if coeff < 0.0 { " - " } else { " + " });
        }
        out.push_str(&format!("{magnitude} * {name}"));
    }
    if out.is_empty() {
        out.push_str(&literal(0.0, style));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::GamutChromaSolver;
    use approx::assert_abs_diff_eq;
    use yrg_primaries::{REC2020, lms_to_rgb_matrix};

    #[test]
    fn test_formula_matches_solver() {
        let model = YrgModel::default();
        let formula = BoundaryFormula::derive(&model);
        let solver = GamutChromaSolver::new(model);
        let rows = lms_to_rgb_matrix(&REC2020).unwrap();

        for i in 0..10 {
            let h = 0.3 + i as f64 * 0.6;
            let (sh, ch) = h.sin_cos();
            for c in 0..3 {
                for k in [0.0, 1.0] {
                    let row = rows.row(c);
                    let solved = solver.solve_for_chroma(0.4, h, row, k).unwrap();
                    let direct = formula.evaluate(0.4, ch, sh, row, k).unwrap();
                    assert_abs_diff_eq!(solved.roots()[0], direct, epsilon = 1e-10);
                }
            }
        }
    }

    #[test]
    fn test_formula_low_luminance() {
        let formula = BoundaryFormula::derive(&YrgModel::default());
        let rows = lms_to_rgb_matrix(&REC2020).unwrap();
        let reference = formula.evaluate(0.5, 1.0, 0.0, rows.row(0), 0.0).unwrap();
        let tiny = formula.evaluate(1e-13, 1.0, 0.0, rows.row(0), 0.0).unwrap();
        assert_abs_diff_eq!(tiny, reference, epsilon = 1e-12);
    }

    #[test]
    fn test_reference_coefficients() {
        let formula = BoundaryFormula::derive(&YrgModel::default());
        assert_abs_diff_eq!(formula.d0, 0.4098040824255, epsilon = 1e-12);
        assert_eq!(formula.p, Vec3::new(0.95, 0.05 - 0.03, -0.97));
        assert_eq!(formula.q, Vec3::new(0.38, 0.62 - 0.03, -0.97));
    }

    #[test]
    fn test_render_math() {
        let formula = BoundaryFormula::derive(&YrgModel::default());
        let text = formula.to_string();
        assert!(text.starts_with("c = (k * 0.4098040824 - Y * (0.4146816709 * a1"));
        assert!(text.contains("ch * (0.95 * a1 + 0.02 * a2 - 0.97 * a3)"));
        assert!(text.contains("sh * (0.38 * a1 + 0.59 * a2 - 0.97 * a3)"));
    }

    #[test]
    fn test_render_c() {
        let formula = BoundaryFormula::derive(&YrgModel::default());
        let text = formula.render(FormulaStyle::C);
        assert!(text.starts_with("const float c = (k * 0.4098040824f"));
        assert!(text.contains("0.95f * a[0]"));
        assert!(text.ends_with(");"));
    }

    #[test]
    fn test_literal_formatting() {
        assert_eq!(literal(0.5, FormulaStyle::Math), "0.5");
        assert_eq!(literal(2.0, FormulaStyle::Math), "2");
        assert_eq!(literal(2.0, FormulaStyle::C), "2.0f");
        assert_eq!(literal(-0.0, FormulaStyle::Math), "0");
        assert_eq!(linear(&[(0.0, "x"), (-1.5, "y")], FormulaStyle::Math), "-1.5 * y");
        assert_eq!(linear(&[(0.0, "x")], FormulaStyle::Math), "0");
    }
}
