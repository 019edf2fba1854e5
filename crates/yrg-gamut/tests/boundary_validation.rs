//! Gamut-boundary validation tests.
//!
//! Checks the solver against the forward Yrg pipeline and against
//! reference values of the sRGB display.
//!
//! # Reference Values
//!
//! LMS 2006 -> sRGB (D65), row 0:
//!   [4.972204839931804, -4.923181968063908, 0.32155482099646393]
//!
//! At Y = 0.5, h = 0 (ch = 1, sh = 0):
//!   white lms          = (0.4146816709, 0.3551716768, 0.2301466523)
//!   w1*L + w2*M        = 0.4098040824255
//!   red at c = 0       = 0.47255773976443693
//!   red = 1 at c       = 0.14465438753482124

use std::f64::consts::{PI, TAU};

use approx::assert_abs_diff_eq;
use yrg_gamut::primaries::{DISPLAY_P3, PRESETS, SRGB, lms_to_rgb_matrix};
use yrg_gamut::math::{Mat3, Vec3};
use yrg_gamut::{
    Channel, ChromaSolution, Extreme, GamutBoundaryPolicy, GamutChromaSolver, GamutError,
    LuminanceWeights, RGB_TO_LMS, SolverConfig, YrgModel, build_colour_coordinate,
    normalize_by_luminance, project_to_channel, rgb_to_lms, to_normalized_rgb,
};

const ROUND_TRIP_TOLERANCE: f64 = 1e-9;

/// (channel, k, chroma) at Y = 0.5, h = 0 for sRGB.
const SRGB_HUE_ZERO: &[(usize, f64, f64)] = &[
    (0, 0.0, -0.08979647039614609),
    (0, 1.0, 0.14465438753482124),
    (1, 0.0, 1.9679243605049028),
    (1, 1.0, -0.2840273953652263),
    (2, 0.0, 0.19733455633210317),
    (2, 1.0, -0.131514504100938),
];

fn srgb() -> Mat3 {
    lms_to_rgb_matrix(&SRGB).unwrap()
}

/// Runs every stage by hand.
fn forward(luminance: f64, chroma: f64, hue: f64, row: Vec3) -> f64 {
    let rgb = to_normalized_rgb(&build_colour_coordinate(luminance, chroma, hue));
    let lms = rgb_to_lms(rgb, &RGB_TO_LMS);
    let scaled = normalize_by_luminance(lms, luminance, &LuminanceWeights::CIE_2006).unwrap();
    project_to_channel(scaled, row)
}

// ============================================================================
// Forward pipeline
// ============================================================================

#[test]
fn closure_holds_everywhere() {
    for i in 0..=20 {
        let y = i as f64 * 0.05;
        for j in 0..36 {
            let h = j as f64 * TAU / 36.0;
            for c in [0.0, 0.01, 0.1, 0.3, 0.6] {
                let rgb = to_normalized_rgb(&build_colour_coordinate(y, c, h));
                assert_abs_diff_eq!(rgb.sum(), 1.0, epsilon = 1e-12);
            }
        }
    }
}

#[test]
fn zero_chroma_is_hue_invariant() {
    let rows = srgb();
    for ch in Channel::ALL {
        let row = rows.row(ch.index());
        let neutral = forward(0.5, 0.0, 0.0, row);
        for j in 1..64 {
            let h = j as f64 * TAU / 64.0;
            assert_abs_diff_eq!(forward(0.5, 0.0, h, row), neutral, epsilon = 1e-15);
        }
    }
    assert_abs_diff_eq!(forward(0.5, 0.0, 0.0, rows.row(0)), 0.47255773976443693, epsilon = 1e-12);
}

#[test]
fn model_matches_hand_pipeline() {
    let model = YrgModel::default();
    let rows = srgb();
    for (y, c, h) in [(0.1, 0.05, 0.4), (0.5, 0.12, 3.3), (0.9, 0.2, 5.9)] {
        for ch in 0..3 {
            let row = rows.row(ch);
            assert_abs_diff_eq!(
                model.evaluate_channel(y, c, h, row).unwrap(),
                forward(y, c, h, row),
                epsilon = 1e-15
            );
        }
    }
}

// ============================================================================
// Solver
// ============================================================================

#[test]
fn srgb_hue_zero_reference() {
    let solver = GamutChromaSolver::default();
    let rows = srgb();
    for &(ch, k, expected) in SRGB_HUE_ZERO {
        let solution = solver.solve_for_chroma(0.5, 0.0, rows.row(ch), k).unwrap();
        assert_eq!(solution.roots().len(), 1, "channel {ch}, k {k}");
        assert_abs_diff_eq!(solution.roots()[0], expected, epsilon = 1e-9);
    }
}

#[test]
fn white_boundary_of_red_is_single_positive_root() {
    let solver = GamutChromaSolver::default();
    let solution = solver.solve_for_chroma(0.5, 0.0, srgb().row(0), 1.0).unwrap();
    match solution {
        ChromaSolution::Roots(roots) => {
            assert_eq!(roots.len(), 1);
            assert!(roots[0] > 0.0);
        }
        other => panic!("expected a single root, got {other:?}"),
    }
}

#[test]
fn roots_round_trip_through_forward_pipeline() {
    let solver = GamutChromaSolver::default();
    for primaries in PRESETS {
        let rows = lms_to_rgb_matrix(&primaries).unwrap();
        for i in 1..10 {
            let y = i as f64 * 0.1;
            for j in 0..24 {
                let h = j as f64 * PI / 12.0 + 0.01;
                for ch in 0..3 {
                    for k in [0.0, 1.0] {
                        let Ok(solution) = solver.solve_for_chroma(y, h, rows.row(ch), k) else {
                            continue;
                        };
                        for &c in solution.roots() {
                            if c.abs() > 10.0 {
                                continue;
                            }
                            let v = forward(y, c, h, rows.row(ch));
                            assert_abs_diff_eq!(v, k, epsilon = ROUND_TRIP_TOLERANCE);
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn numeric_solve_agrees_with_exact() {
    let solver = GamutChromaSolver::default();
    let rows = lms_to_rgb_matrix(&DISPLAY_P3).unwrap();
    let config = SolverConfig {
        samples: 512,
        ..SolverConfig::default()
    };
    for j in 0..12 {
        let h = j as f64 * TAU / 12.0 + 0.2;
        let exact = solver.solve_for_chroma(0.3, h, rows.row(2), 1.0).unwrap();
        let numeric = solver
            .solve_for_chroma_bracketed(0.3, h, rows.row(2), 1.0, &config)
            .unwrap();
        for &c in numeric.roots() {
            assert!(exact.roots().iter().any(|e| (e - c).abs() < 1e-10));
        }
    }
}

#[test]
fn black_roots_do_not_depend_on_luminance() {
    let solver = GamutChromaSolver::default();
    let rows = srgb();
    for j in 0..24 {
        let h = j as f64 * TAU / 24.0 + 0.03;
        for ch in 0..3 {
            let reference = solver.solve_for_chroma(0.5, h, rows.row(ch), 0.0).unwrap();
            let dim = solver.solve_for_chroma(1e-13, h, rows.row(ch), 0.0).unwrap();
            assert_eq!(dim.roots().len(), reference.roots().len(), "h={h} ch={ch}");
            for (a, b) in dim.roots().iter().zip(reference.roots()) {
                assert_abs_diff_eq!(a, b, epsilon = 1e-10);
            }
        }
    }
}

// ============================================================================
// Gamut boundary
// ============================================================================

#[test]
fn chroma_grows_away_from_neutral() {
    let solver = GamutChromaSolver::default();
    let policy = GamutBoundaryPolicy::for_primaries(&SRGB).unwrap();
    for j in 0..24 {
        let h = j as f64 * TAU / 24.0;
        let limit = policy.max_chroma(&solver, 0.5, h).unwrap().unwrap().chroma;

        let mut previous = 0.0;
        for s in 1..=50 {
            let c = limit * s as f64 / 50.0;
            let deviation = Channel::ALL
                .iter()
                .map(|ch| {
                    let row = policy.lms_to_rgb.row(ch.index());
                    (forward(0.5, c, h, row) - forward(0.5, 0.0, h, row)).abs()
                })
                .fold(0.0, f64::max);
            assert!(deviation >= previous, "h={h} c={c}");
            previous = deviation;
        }
        assert!(previous > 0.0);
    }
}

#[test]
fn boundary_is_tight() {
    let solver = GamutChromaSolver::default();
    let policy = GamutBoundaryPolicy::for_primaries(&SRGB).unwrap();
    for j in 0..24 {
        let h = j as f64 * TAU / 24.0 + 0.05;
        let hit = policy.max_chroma(&solver, 0.25, h).unwrap().unwrap();
        let row = policy.lms_to_rgb.row(hit.channel.index());
        let beyond = forward(0.25, hit.chroma * 1.01, h, row);
        match hit.extreme {
            Extreme::Black => assert!(beyond < 0.0),
            Extreme::White => assert!(beyond > 1.0),
            Extreme::Custom(_) => unreachable!(),
        }
    }
}

// ============================================================================
// Degenerate inputs
// ============================================================================

#[test]
fn degenerate_normalization_is_signalled() {
    // L and M rows vanish: w1*L + w2*M = 0 for every colour.
    let model = YrgModel::new(
        Mat3::from_rows([[0.0; 3], [0.0; 3], [0.0, 0.0, 0.97]]),
        LuminanceWeights::CIE_2006,
    );
    let solver = GamutChromaSolver::new(model);

    let err = solver.solve_for_chroma(0.5, 0.7, srgb().row(0), 1.0).unwrap_err();
    assert!(matches!(err, GamutError::DegenerateNormalization { .. }));

    let err = solver.evaluate_channel(0.5, 0.1, 0.7, srgb().row(0)).unwrap_err();
    assert!(matches!(err, GamutError::DegenerateNormalization { .. }));
}

#[test]
fn pole_inside_scan_is_not_a_root() {
    // At h = pi the denominator vanishes near c = 0.62 and red flips sign
    // across it. The only real root of red = 1 is negative.
    let solver = GamutChromaSolver::default();
    let red = srgb().row(0);

    let exact = solver.solve_for_chroma(0.5, PI, red, 1.0).unwrap();
    assert_abs_diff_eq!(exact.roots()[0], -0.14465438753482118, epsilon = 1e-9);

    let numeric = solver
        .solve_for_chroma_bracketed(0.5, PI, red, 1.0, &SolverConfig::default())
        .unwrap();
    assert_eq!(numeric, ChromaSolution::None);
}
