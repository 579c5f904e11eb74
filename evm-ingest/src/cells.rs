//! Cell-level parsing shared by the CSV and checklist readers.

use anyhow::{bail, Result};
use regex::Regex;

/// Parse a money cell: `12000`, `12,000`, `$12,000.50`.
pub fn parse_amount(cell: &str) -> Result<f64> {
    let amount_re = Regex::new(r"^\$?\s*(?P<num>\d[\d,]*(?:\.\d+)?|\.\d+)$")?;

    let cell = cell.trim();
    let Some(caps) = amount_re.captures(cell) else {
        bail!("invalid amount '{cell}'");
    };
    Ok(caps["num"].replace(',', "").parse()?)
}

/// Like `parse_amount`, but a blank cell is zero.
pub fn parse_amount_or_zero(cell: &str) -> Result<f64> {
    if cell.trim().is_empty() {
        return Ok(0.0);
    }
    parse_amount(cell)
}

/// Parse a completion flag. Blank means not completed.
pub fn parse_flag(cell: &str) -> Result<bool> {
    match cell.trim().to_lowercase().as_str() {
        "" | "false" | "no" | "n" | "0" => Ok(false),
        "true" | "yes" | "y" | "1" | "x" | "done" => Ok(true),
        other => bail!("invalid completion flag '{other}'"),
    }
}
