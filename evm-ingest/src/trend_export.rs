//! Export a trend series as CSV (`date,pv,ev,ac,spi,cpi`) for charting tools.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use evm_core::EvmTrendData;

pub fn write_trend_csv<W: Write>(writer: W, trend: &[EvmTrendData]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for point in trend {
        wtr.serialize(point)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_trend_csv_file(path: &Path, trend: &[EvmTrendData]) -> Result<()> {
    let file = std::fs::File::create(path).with_context(|| format!("create {}", path.display()))?;
    write_trend_csv(file, trend).with_context(|| format!("write {}", path.display()))
}
