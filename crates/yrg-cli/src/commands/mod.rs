//! CLI command implementations

pub mod formula;
pub mod max_chroma;
pub mod solve;
pub mod table;

use anyhow::{Context, Result, anyhow, bail};
use serde::Serialize;
use yrg_gamut::{Channel, Extreme, GamutBoundaryPolicy};
use yrg_math::Vec3;
use yrg_primaries::{PRESETS, Primaries};

/// Resolve a primaries name to a boundary policy
pub fn load_policy(name: &str) -> Result<(Primaries, GamutBoundaryPolicy)> {
    let primaries = Primaries::from_name(name).with_context(|| {
        let known: Vec<&str> = PRESETS.iter().map(|p| p.name).collect();
        format!("Unknown primaries: '{}'. Use one of: {}", name, known.join(", "))
    })?;
    let policy = GamutBoundaryPolicy::for_primaries(&primaries)?;
    Ok((primaries, policy))
}

/// Hue argument in radians
pub fn hue_radians(hue: f64, radians: bool) -> f64 {
    if radians { hue } else { hue.to_radians() }
}

/// Parse "black", "white" or a number
pub fn parse_extreme(s: &str) -> Result<Extreme> {
    match s.trim().to_lowercase().as_str() {
        "black" | "min" => Ok(Extreme::Black),
        "white" | "max" => Ok(Extreme::White),
        other => other
            .parse::<f64>()
            .map(Extreme::Custom)
            .map_err(|_| anyhow!("Invalid extreme: '{}'. Use black, white or a number", s)),
    }
}

/// Parse a list of extremes, rejecting an empty one
pub fn parse_extremes(values: &[String]) -> Result<Vec<Extreme>> {
    if values.is_empty() {
        bail!("At least one extreme is required");
    }
    values.iter().map(|s| parse_extreme(s)).collect()
}

/// Parse a channel name
pub fn parse_channel(s: &str) -> Result<Channel> {
    match s.trim().to_lowercase().as_str() {
        "r" | "red" | "0" => Ok(Channel::Red),
        "g" | "green" | "1" => Ok(Channel::Green),
        "b" | "blue" | "2" => Ok(Channel::Blue),
        other => bail!("Unknown channel: '{}'. Use red, green or blue", other),
    }
}

/// Parse a row string like "4.97,-4.92,0.32"
pub fn parse_row(s: &str) -> Result<Vec3> {
    let parts: Result<Vec<f64>, _> = s.split(',').map(|p| p.trim().parse::<f64>()).collect();
    let parts = parts.map_err(|_| anyhow!("Invalid row format: {}", s))?;

    match parts.as_slice() {
        [a1, a2, a3] => Ok(Vec3::new(*a1, *a2, *a3)),
        _ => bail!("Row needs 3 coefficients, got {}: {}", parts.len(), s),
    }
}

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", text);
    Ok(())
}

/// Format an optional chroma for tables
pub fn format_chroma(chroma: Option<f64>) -> String {
    match chroma {
        Some(c) => format!("{:.8}", c),
        None => "unbounded".to_string(),
    }
}
