use super::COLUMNS;
use crate::error::Result;
use crate::loan::{LoanParameters, PaymentPlan};
use crate::registry::PlanResults;
use crate::schedule::AmortizationSchedule;
use log::info;
use rust_xlsxwriter::{Chart, ChartType, Format, Workbook};
use std::path::Path;

/// Name of the worksheet holding the balance-decline chart.
pub const CHART_SHEET: &str = "Balance Chart";

const COLUMN_WIDTH: f64 = 18.;

/// Build a workbook with one worksheet per plan, named after the plan, and a
/// final worksheet charting Ending Balance against Period for every plan.
pub fn build_workbook(results: &PlanResults) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let money = Format::new().set_num_format("#,##0.00");

    let mut chart = Chart::new(ChartType::ScatterStraight);
    chart
        .title()
        .set_name(chart_title(&results.loan).as_str());
    chart.x_axis().set_name(
        format!(
            "Payment Period (over a {}-year Term)",
            results.loan.term_years()
        )
        .as_str(),
    );
    chart.y_axis().set_name("Ending Loan Balance ($)");
    chart.set_width(960).set_height(560);

    for (plan, schedule) in results.schedules() {
        let worksheet = workbook.add_worksheet().set_name(plan.name())?;

        for (col, heading) in COLUMNS.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *heading, &header)?;
            worksheet.set_column_width(col as u16, COLUMN_WIDTH)?;
        }

        for (i, row) in schedule.rows().iter().enumerate() {
            let r = i as u32 + 1;
            worksheet.write_number(r, 0, row.period)?;
            worksheet.write_number_with_format(r, 1, row.beginning_balance, &money)?;
            worksheet.write_number_with_format(r, 2, row.payment, &money)?;
            worksheet.write_number_with_format(r, 3, row.interest_paid, &money)?;
            worksheet.write_number_with_format(r, 4, row.principal_paid, &money)?;
            worksheet.write_number_with_format(r, 5, row.ending_balance, &money)?;
        }

        if !schedule.is_empty() {
            let last = schedule.len() as u32;
            chart
                .add_series()
                .set_categories((plan.name(), 1, 0, last, 0))
                .set_values((plan.name(), 1, 5, last, 5))
                .set_name(series_name(*plan, schedule).as_str());
        }
    }

    workbook
        .add_worksheet()
        .set_name(CHART_SHEET)?
        .insert_chart(1, 1, &chart)?;

    Ok(workbook)
}

/// Build the workbook and write it to `path`.
pub fn save_workbook<P: AsRef<Path>>(path: P, results: &PlanResults) -> Result<()> {
    let mut workbook = build_workbook(results)?;
    workbook.save(path.as_ref())?;
    info!("workbook saved: {}", path.as_ref().display());
    Ok(())
}

/// Legend label for one plan's balance series.
fn series_name(plan: PaymentPlan, schedule: &AmortizationSchedule) -> String {
    format!("{} ({} payments)", plan, schedule.final_period())
}

fn chart_title(loan: &LoanParameters) -> String {
    format!(
        "Loan Balance Decline Over Term (Rate: {}%, Principal: ${})",
        trim_decimal(loan.nominal_annual_rate() * 100.),
        group_thousands(loan.principal())
    )
}

// 5.5000 -> 5.5, 5.0000 -> 5
fn trim_decimal(value: f64) -> String {
    let s = format!("{:.4}", value);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn group_thousands(amount: f64) -> String {
    let fixed = format!("{:.2}", amount);
    let (whole, cents) = fixed.split_at(fixed.len() - 3);
    let mut grouped = String::new();
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped + cents
}

#[cfg(test)]
mod tests {
    use super::{
        build_workbook, chart_title, group_thousands, series_name, trim_decimal, CHART_SHEET,
    };
    use crate::export::COLUMNS;
    use crate::loan::{LoanParameters, PaymentPlan};
    use crate::registry::PlanResults;
    use test_log::test;

    #[test]
    fn test_build_workbook() {
        let loan = LoanParameters::new(100000., 0.05, 25., 5.).unwrap();
        let results = PlanResults::build(&loan);
        let mut workbook = build_workbook(&results).unwrap();

        for plan in PaymentPlan::ALL {
            let sheet = workbook.worksheet_from_name(plan.name()).unwrap();
            assert_eq!(sheet.name(), plan.name());
        }
        assert!(workbook.worksheet_from_name(CHART_SHEET).is_ok());
        assert!(workbook.worksheet_from_name("Sheet7").is_err());

        let bytes = workbook.save_to_buffer().unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_column_set() {
        assert_eq!(
            COLUMNS,
            [
                "Period",
                "Beginning Balance",
                "Payment",
                "Interest Paid",
                "Principal Paid",
                "Ending Balance"
            ]
        );
    }

    #[test]
    fn test_series_names() {
        let loan = LoanParameters::new(100000., 0.05, 25., 25.).unwrap();
        let results = PlanResults::build(&loan);
        let names: Vec<String> = results
            .schedules()
            .map(|(plan, schedule)| series_name(*plan, schedule))
            .collect();
        assert_eq!(
            names,
            vec![
                "Monthly (300 payments)",
                "Semi-Monthly (600 payments)",
                "Bi-Weekly (650 payments)",
                "Weekly (1300 payments)",
                "Rapid Bi-Weekly (559 payments)",
                "Rapid Weekly (1116 payments)"
            ]
        );
    }

    #[test]
    fn test_chart_title() {
        let loan = LoanParameters::new(250000., 0.055, 25., 5.).unwrap();
        assert_eq!(
            chart_title(&loan),
            "Loan Balance Decline Over Term (Rate: 5.5%, Principal: $250,000.00)"
        );
    }

    #[test]
    fn test_number_formatting() {
        assert_eq!(trim_decimal(5.), "5");
        assert_eq!(trim_decimal(4.75), "4.75");
        assert_eq!(group_thousands(999.5), "999.50");
        assert_eq!(group_thousands(1234567.891), "1,234,567.89");
        assert_eq!(group_thousands(100000.), "100,000.00");
    }
}
