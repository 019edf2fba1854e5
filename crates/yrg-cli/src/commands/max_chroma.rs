//! Max-chroma command
//!
//! Largest chroma keeping every display channel between black and white.

use anyhow::Result;
use serde::Serialize;
use tracing::{info, trace};
use yrg_gamut::{BoundaryHit, GamutChromaSolver};

use crate::MaxChromaArgs;

#[derive(Serialize)]
struct MaxChromaReport {
    primaries: String,
    luminance: f64,
    hue: f64,
    limit: Option<BoundaryHit>,
    candidates: Vec<BoundaryHit>,
}

pub fn run(args: MaxChromaArgs, verbose: u8, json: bool) -> Result<()> {
    trace!(luminance = args.luminance, hue = args.hue, "max_chroma::run");

    let hue = super::hue_radians(args.hue, args.radians);
    let (primaries, policy) = super::load_policy(&args.primaries)?;
    let policy = policy.with_extremes(super::parse_extremes(&args.extremes)?);
    info!(primaries = primaries.name, "Selecting in-gamut chroma");

    let solver = GamutChromaSolver::default();
    let mut candidates = policy.candidates(&solver, args.luminance, hue)?;
    candidates.sort_by(|a, b| a.chroma.total_cmp(&b.chroma));
    let limit = yrg_gamut::select_min_non_negative(candidates.iter().copied());

    if json {
        return super::print_json(&MaxChromaReport {
            primaries: primaries.name.to_string(),
            luminance: args.luminance,
            hue,
            limit,
            candidates: if args.all { candidates } else { Vec::new() },
        });
    }

    if verbose > 0 {
        println!("{}: Y = {}, h = {:.6} rad", primaries.name, args.luminance, hue);
    }

    if args.all {
        for hit in &candidates {
            println!("  {:<5} {:<5} c = {:.10}", hit.channel, hit.extreme, hit.chroma);
        }
    }

    match limit {
        Some(hit) => println!(
            "max chroma = {:.10} (limited by {} at {})",
            hit.chroma, hit.channel, hit.extreme
        ),
        None => println!("max chroma = unbounded (no channel reaches an extreme)"),
    }

    Ok(())
}
