//! Writers that hand finished schedules to spreadsheet consumers.

mod csv_out;
mod workbook;

pub use csv_out::{write_all_csv, write_schedule};
pub use workbook::{build_workbook, save_workbook, CHART_SHEET};

/// Column headings shared by every tabular export.
pub const COLUMNS: [&str; 6] = [
    "Period",
    "Beginning Balance",
    "Payment",
    "Interest Paid",
    "Principal Paid",
    "Ending Balance",
];
