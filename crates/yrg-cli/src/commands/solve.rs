//! Solve command
//!
//! Chroma at which one or more channels reach an extreme. A degenerate
//! normalization is reported per channel rather than failing the run.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info, trace};
use yrg_gamut::{ChromaSolution, Channel, GamutChromaSolver, GamutError, SolverConfig};
use yrg_math::Vec3;

use crate::SolveArgs;

#[derive(Serialize)]
struct SolveReport {
    target: String,
    row: [f64; 3],
    luminance: f64,
    hue: f64,
    k: f64,
    solution: Option<ChromaSolution>,
    degenerate: bool,
}

pub fn run(args: SolveArgs, verbose: u8, json: bool) -> Result<()> {
    trace!(luminance = args.luminance, hue = args.hue, "solve::run");

    let hue = super::hue_radians(args.hue, args.radians);
    let extreme = super::parse_extreme(&args.extreme)?;
    let k = extreme.value();

    let targets: Vec<(String, Vec3)> = match &args.row {
        Some(row) => vec![("row".to_string(), super::parse_row(row)?)],
        None => {
            let (primaries, policy) = super::load_policy(&args.primaries)?;
            let channels = match &args.channel {
                Some(name) => vec![super::parse_channel(name)?],
                None => Channel::ALL.to_vec(),
            };
            if verbose > 0 {
                println!("Primaries: {}", primaries.name);
            }
            channels
                .into_iter()
                .map(|ch| (ch.to_string(), policy.lms_to_rgb.row(ch.index())))
                .collect()
        }
    };

    info!(extreme = %extreme, numeric = args.numeric, "Solving boundary chroma");

    let solver = GamutChromaSolver::default();
    let config = SolverConfig {
        max_chroma: args.max_chroma,
        samples: args.samples,
        ..SolverConfig::default()
    };

    let mut reports = Vec::with_capacity(targets.len());
    for (target, row) in targets {
        let result = if args.numeric {
            solver.solve_for_chroma_bracketed(args.luminance, hue, row, k, &config)
        } else {
            solver.solve_for_chroma(args.luminance, hue, row, k)
        };

        let (solution, degenerate) = match result {
            Ok(solution) => (Some(solution), false),
            Err(e @ GamutError::DegenerateNormalization { .. }) => {
                debug!(channel = %target, "{e}");
                (None, true)
            }
            Err(e) => return Err(e).with_context(|| format!("Failed to solve {}", target)),
        };

        reports.push(SolveReport {
            target,
            row: row.to_array(),
            luminance: args.luminance,
            hue,
            k,
            solution,
            degenerate,
        });
    }

    if json {
        return super::print_json(&reports);
    }

    if verbose > 0 {
        println!(
            "Y = {}, h = {:.6} rad, k = {} ({})",
            args.luminance, hue, k, extreme
        );
    }
    for report in &reports {
        println!("{}: {}", report.target, describe(report));
    }

    Ok(())
}

fn describe(report: &SolveReport) -> String {
    match &report.solution {
        None => "degenerate normalization, no boundary".to_string(),
        Some(ChromaSolution::None) => "no real root".to_string(),
        Some(ChromaSolution::Everywhere) => "equal to target at every chroma".to_string(),
        Some(ChromaSolution::Roots(roots)) => roots
            .iter()
            .map(|c| format!("c = {:.10}", c))
            .collect::<Vec<_>>()
            .join(", "),
    }
}
