use crate::loan::{round_cents, LoanParameters, PaymentPlan, PlanTerms};
use log::{debug, trace};
use std::fmt;

/// One period of an amortization schedule. Amounts are rounded to cents.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduleRow {
    pub period: u32,
    pub beginning_balance: f64,
    pub payment: f64,
    pub interest_paid: f64,
    pub principal_paid: f64,
    pub ending_balance: f64,
}

impl ScheduleRow {
    pub fn new(
        period: u32,
        beginning_balance: f64,
        payment: f64,
        interest_paid: f64,
        principal_paid: f64,
        ending_balance: f64,
    ) -> Self {
        Self {
            period,
            beginning_balance,
            payment,
            interest_paid,
            principal_paid,
            ending_balance,
        }
    }
}

impl fmt::Display for ScheduleRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "period {}, beginning balance ${:.2}, payment ${:.2}, interest paid ${:.2}, principal paid ${:.2}, ending balance ${:.2}",
            self.period,
            self.beginning_balance,
            self.payment,
            self.interest_paid,
            self.principal_paid,
            self.ending_balance
        )
    }
}

/// The finished period-by-period schedule of one plan over the loan term.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AmortizationSchedule {
    pub plan: PaymentPlan,
    pub term_periods: u32,
    rows: Vec<ScheduleRow>,
}

impl AmortizationSchedule {
    /// Simulates `plan` on `loan` over the loan term.
    pub fn generate(loan: &LoanParameters, plan: PaymentPlan) -> Self {
        simulate(
            &loan.plan_terms(plan),
            loan.principal(),
            loan.total_term_periods(plan),
        )
    }

    pub fn rows(&self) -> &[ScheduleRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row for a 1-based period number.
    pub fn row(&self, period: u32) -> Option<&ScheduleRow> {
        match period {
            0 => None,
            p => self.rows.get(p as usize - 1),
        }
    }

    pub fn last_row(&self) -> Option<&ScheduleRow> {
        self.rows.last()
    }

    /// Period number of the last payment, 0 for an empty schedule.
    pub fn final_period(&self) -> u32 {
        self.last_row().map_or(0, |row| row.period)
    }

    pub fn ending_balance(&self) -> f64 {
        self.last_row().map_or(0., |row| row.ending_balance)
    }

    /// True when the balance reached zero within the term.
    pub fn is_paid_off(&self) -> bool {
        self.last_row().is_some_and(|row| row.ending_balance == 0.)
    }

    pub fn total_interest(&self) -> f64 {
        round_cents(self.rows.iter().map(|row| row.interest_paid).sum())
    }

    pub fn total_principal(&self) -> f64 {
        round_cents(self.rows.iter().map(|row| row.principal_paid).sum())
    }
}

/// Runs the balance-reduction loop for one plan. Every figure is rounded to
/// cents as it is produced, so rounding carries from one period to the next.
/// Stops after `term_periods` payments or as soon as the balance is retired.
pub fn simulate(terms: &PlanTerms, principal: f64, term_periods: u32) -> AmortizationSchedule {
    let rate = terms.periodic_rate;
    let pmt_amount = terms.periodic_payment;
    let mut rows = Vec::new();

    let mut balance = principal;
    let mut period = 1;

    while period <= term_periods && balance > 0. {
        let interest = round_cents(balance * rate);
        let mut principal_paid = round_cents(pmt_amount - interest);
        let end_balance;

        if balance - principal_paid < 0. {
            // final payment retires whatever is left
            principal_paid = balance;
            end_balance = 0.;
        } else {
            end_balance = round_cents(balance - principal_paid);
        }
        trace!(
            "{} pmt # {}, interest {}, principal {}, end bal {}",
            terms.plan,
            period,
            interest,
            principal_paid,
            end_balance
        );

        rows.push(ScheduleRow::new(
            period,
            round_cents(balance),
            round_cents(pmt_amount),
            interest,
            principal_paid,
            end_balance,
        ));

        balance = end_balance;
        period += 1;
    }

    debug!(
        "{}: {} of {} periods simulated, ending balance {}",
        terms.plan,
        rows.len(),
        term_periods,
        balance
    );

    AmortizationSchedule {
        plan: terms.plan,
        term_periods,
        rows,
    }
}
