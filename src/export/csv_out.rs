use super::COLUMNS;
use crate::error::Result;
use crate::registry::PlanResults;
use crate::schedule::AmortizationSchedule;
use log::info;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

/// Write one schedule as CSV, header first, amounts to 2 decimals.
pub fn write_schedule<W: io::Write>(writer: W, schedule: &AmortizationSchedule) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(COLUMNS)?;

    for row in schedule.rows() {
        wtr.write_record([
            row.period.to_string(),
            format!("{:.2}", row.beginning_balance),
            format!("{:.2}", row.payment),
            format!("{:.2}", row.interest_paid),
            format!("{:.2}", row.principal_paid),
            format!("{:.2}", row.ending_balance),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write every plan's schedule to `<dir>/<plan name>.csv`, creating `dir` if
/// needed. Returns the files written in plan order.
pub fn write_all_csv<P: AsRef<Path>>(dir: P, results: &PlanResults) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let mut written = Vec::new();
    for (plan, schedule) in results.schedules() {
        let path = dir.join(format!("{}.csv", plan.name().replace(' ', "_")));
        write_schedule(File::create(&path)?, schedule)?;
        info!("{} schedule written to {}", plan, path.display());
        written.push(path);
    }
    Ok(written)
}
