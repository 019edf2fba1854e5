//! Table command
//!
//! Maximum in-gamut chroma at evenly spaced hues.

use anyhow::{Result, bail};
use tracing::info;
use yrg_gamut::GamutChromaSolver;

use crate::TableArgs;

pub fn run(args: TableArgs, verbose: u8, json: bool) -> Result<()> {
    if args.steps == 0 {
        bail!("--steps must be at least 1");
    }

    let (primaries, policy) = super::load_policy(&args.primaries)?;
    let policy = policy.with_extremes(super::parse_extremes(&args.extremes)?);
    info!(primaries = primaries.name, steps = args.steps, "Building boundary table");

    let solver = GamutChromaSolver::default();
    let table = policy.boundary_table(&solver, args.luminance, args.steps)?;

    if json {
        return super::print_json(&table);
    }

    if verbose > 0 {
        println!("{}: Y = {}", primaries.name, table.luminance);
    }
    println!("{:>9}  {:>12}  {:<5}  {:<5}", "hue_deg", "chroma", "chan", "ext");
    for row in &table.rows {
        let (channel, extreme) = match &row.hit {
            Some(hit) => (hit.channel.to_string(), hit.extreme.to_string()),
            None => ("-".to_string(), "-".to_string()),
        };
        println!(
            "{:>9.3}  {:>12}  {:<5}  {:<5}",
            row.hue.to_degrees(),
            super::format_chroma(row.hit.map(|h| h.chroma)),
            channel,
            extreme
        );
    }

    Ok(())
}
