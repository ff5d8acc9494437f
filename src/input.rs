//! Collects loan parameters from command-line values, prompting for any that
//! were not supplied.

use crate::error::{LoanError, Result};
use crate::loan::LoanParameters;
use std::io::{BufRead, Write};

/// Parameter values as typed by the user, before parsing. The rate is a
/// yearly percentage (5.5 for 5.5%).
#[derive(Clone, Default, Debug)]
pub struct RawParameters {
    pub principal: Option<String>,
    pub rate_percent: Option<String>,
    pub amortization_years: Option<String>,
    pub term_years: Option<String>,
}

const PROMPTS: [(&str, &str); 4] = [
    ("principal", "Enter the Principal Loan Amount (e.g., 100000): "),
    ("rate", "Enter the Yearly Interest Rate (e.g., 5.5): "),
    ("amortization", "Enter the Amortization Period in years (e.g., 25): "),
    ("term", "Enter the Term of the mortgage in years (e.g., 5): "),
];

pub fn parse_number(field: &str, raw: &str) -> Result<f64> {
    raw.trim().parse::<f64>().map_err(|_| LoanError::Input {
        field: field.to_string(),
        value: raw.trim().to_string(),
    })
}

/// Write `prompt` and parse the next line of `input`. End of input counts as
/// an empty answer.
pub fn prompt_number<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    field: &str,
    prompt: &str,
) -> Result<f64> {
    write!(output, "{}", prompt)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    parse_number(field, &line)
}

/// Parse supplied values and prompt for missing ones, in the order principal,
/// rate, amortization, term. Stops at the first value that is not a number.
pub fn collect_parameters<R: BufRead, W: Write>(
    raw: RawParameters,
    input: &mut R,
    output: &mut W,
) -> Result<LoanParameters> {
    let supplied = [
        raw.principal,
        raw.rate_percent,
        raw.amortization_years,
        raw.term_years,
    ];

    let mut values = [0.; 4];
    for (i, value) in supplied.into_iter().enumerate() {
        let (field, prompt) = PROMPTS[i];
        values[i] = match value {
            Some(text) => parse_number(field, &text)?,
            None => prompt_number(input, output, field, prompt)?,
        };
    }

    let [principal, rate_percent, amortization_years, term_years] = values;
    LoanParameters::new(principal, rate_percent / 100., amortization_years, term_years)
}
