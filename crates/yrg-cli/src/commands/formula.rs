//! Formula command
//!
//! Prints the closed-form boundary chroma with `Y`, hue, `k` and the output
//! row left symbolic.

use anyhow::{Result, bail};
use serde::Serialize;
use tracing::info;
use yrg_gamut::{BoundaryFormula, FormulaStyle, YrgModel};

use crate::FormulaArgs;

#[derive(Serialize)]
struct FormulaReport {
    style: String,
    formula: String,
    white_lms: [f64; 3],
    white_luminance: f64,
}

pub fn run(args: FormulaArgs, verbose: u8, json: bool) -> Result<()> {
    let style = match args.style.to_lowercase().as_str() {
        "math" | "text" => FormulaStyle::Math,
        "c" | "opencl" => FormulaStyle::C,
        other => bail!("Unknown formula style: '{}'. Use: math, c", other),
    };
    info!(style = %args.style, "Deriving boundary formula");

    let formula = BoundaryFormula::derive(&YrgModel::default());
    let text = formula.render(style);

    if json {
        return super::print_json(&FormulaReport {
            style: args.style,
            formula: text,
            white_lms: formula.lms0.to_array(),
            white_luminance: formula.d0,
        });
    }

    if verbose > 0 {
        println!("ch = cos(h), sh = sin(h), a = LMS -> RGB row, k = target");
        println!(
            "white lms = ({:.10}, {:.10}, {:.10}), luminance = {:.10}",
            formula.lms0.x, formula.lms0.y, formula.lms0.z, formula.d0
        );
    }
    println!("{}", text);

    Ok(())
}
