use crate::error::{LoanError, Result};
use log::{debug, warn};
use std::fmt;

/// The six payment plans offered on a loan. Declaration order is the
/// reporting order used by every output.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaymentPlan {
    Monthly,
    SemiMonthly,
    BiWeekly,
    Weekly,
    RapidBiWeekly,
    RapidWeekly,
}

impl PaymentPlan {
    pub const ALL: [PaymentPlan; 6] = [
        PaymentPlan::Monthly,
        PaymentPlan::SemiMonthly,
        PaymentPlan::BiWeekly,
        PaymentPlan::Weekly,
        PaymentPlan::RapidBiWeekly,
        PaymentPlan::RapidWeekly,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PaymentPlan::Monthly => "Monthly",
            PaymentPlan::SemiMonthly => "Semi-Monthly",
            PaymentPlan::BiWeekly => "Bi-Weekly",
            PaymentPlan::Weekly => "Weekly",
            PaymentPlan::RapidBiWeekly => "Rapid Bi-Weekly",
            PaymentPlan::RapidWeekly => "Rapid Weekly",
        }
    }

    pub fn periods_per_year(&self) -> u32 {
        match self {
            PaymentPlan::Monthly => 12,
            PaymentPlan::SemiMonthly => 24,
            PaymentPlan::BiWeekly | PaymentPlan::RapidBiWeekly => 26,
            PaymentPlan::Weekly | PaymentPlan::RapidWeekly => 52,
        }
    }

    /// The base plan whose periodic rate this plan charges interest at.
    pub fn rate_basis(&self) -> PaymentPlan {
        match self {
            PaymentPlan::RapidBiWeekly => PaymentPlan::BiWeekly,
            PaymentPlan::RapidWeekly => PaymentPlan::Weekly,
            base => *base,
        }
    }

    pub fn is_rapid(&self) -> bool {
        matches!(self, PaymentPlan::RapidBiWeekly | PaymentPlan::RapidWeekly)
    }
}

impl fmt::Display for PaymentPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// weekly plans have the most periods in a term
const MAX_PERIODS_PER_YEAR: f64 = 52.;

/// Immutable loan inputs. Rates are decimal fractions (0.055 for 5.5%).
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoanParameters {
    principal: f64,
    nominal_annual_rate: f64,
    amortization_years: f64,
    term_years: f64,
}

impl LoanParameters {
    /// Builds the parameter set, rejecting values that would produce a
    /// meaningless schedule. A zero rate is accepted.
    pub fn new(
        principal: f64,
        nominal_annual_rate: f64,
        amortization_years: f64,
        term_years: f64,
    ) -> Result<Self> {
        for (field, value) in [
            ("principal", principal),
            ("nominal_annual_rate", nominal_annual_rate),
            ("amortization_years", amortization_years),
            ("term_years", term_years),
        ] {
            if !value.is_finite() {
                return Err(LoanError::invalid(field, format!("{} is not finite", value)));
            }
        }
        if principal <= 0. {
            return Err(LoanError::invalid("principal", "must be positive"));
        }
        if nominal_annual_rate < 0. {
            return Err(LoanError::invalid("nominal_annual_rate", "must not be negative"));
        }
        if amortization_years <= 0. {
            return Err(LoanError::invalid("amortization_years", "must be positive"));
        }
        if term_years <= 0. {
            return Err(LoanError::invalid("term_years", "must be positive"));
        }
        if term_years * MAX_PERIODS_PER_YEAR > u32::MAX as f64 {
            return Err(LoanError::invalid(
                "term_years",
                format!("{} years is too many payment periods", term_years),
            ));
        }
        if term_years > amortization_years {
            warn!(
                "term of {} years exceeds the {} year amortization period",
                term_years, amortization_years
            );
        }

        Ok(Self {
            principal,
            nominal_annual_rate,
            amortization_years,
            term_years,
        })
    }

    pub fn principal(&self) -> f64 {
        self.principal
    }

    pub fn nominal_annual_rate(&self) -> f64 {
        self.nominal_annual_rate
    }

    pub fn amortization_years(&self) -> f64 {
        self.amortization_years
    }

    pub fn term_years(&self) -> f64 {
        self.term_years
    }

    /// Effective rate charged once per period of `plan`.
    pub fn periodic_rate(&self, plan: PaymentPlan) -> f64 {
        periodic_rate(
            self.nominal_annual_rate,
            plan.rate_basis().periods_per_year(),
        )
    }

    /// Number of payments that fall within the term. Fractional products
    /// are truncated.
    pub fn total_term_periods(&self, plan: PaymentPlan) -> u32 {
        (self.term_years * plan.periods_per_year() as f64).floor() as u32
    }

    /// Fixed periodic payment for `plan`, sized over the full amortization
    /// period. Rapid plans are fractions of the monthly payment.
    pub fn periodic_payment(&self, plan: PaymentPlan) -> f64 {
        match plan {
            PaymentPlan::RapidBiWeekly => self.periodic_payment(PaymentPlan::Monthly) / 2.,
            PaymentPlan::RapidWeekly => self.periodic_payment(PaymentPlan::Monthly) / 4.,
            base => annuity_payment(
                self.principal,
                self.periodic_rate(base),
                amortization_periods(self.amortization_years, base),
            ),
        }
    }

    pub fn plan_terms(&self, plan: PaymentPlan) -> PlanTerms {
        let terms = PlanTerms {
            plan,
            periods_per_year: plan.periods_per_year(),
            periodic_rate: self.periodic_rate(plan),
            periodic_payment: self.periodic_payment(plan),
        };
        debug!(
            "{}: rate {} per period, payment {}",
            plan, terms.periodic_rate, terms.periodic_payment
        );
        terms
    }

    pub fn all_plan_terms(&self) -> [PlanTerms; 6] {
        PaymentPlan::ALL.map(|plan| self.plan_terms(plan))
    }
}

/// Derived figures for one plan on one loan.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanTerms {
    pub plan: PaymentPlan,
    pub periods_per_year: u32,
    pub periodic_rate: f64,
    pub periodic_payment: f64,
}

/// Rounds to cents, ties to even on the value scaled by 100. Every
/// intermediate schedule figure goes through here.
pub fn round_cents(amt: f64) -> f64 {
    if amt == 0. {
        0.
    } else {
        (amt * 100.).round_ties_even() / 100.
    }
}

/// Converts a nominal annual rate compounded semi-annually into the
/// effective rate for `periods_per_year` payments a year.
pub fn periodic_rate(nominal_annual_rate: f64, periods_per_year: u32) -> f64 {
    (1. + nominal_annual_rate / 2.).powf(2. / periods_per_year as f64) - 1.
}

/// Number of periods the payment of a base plan is sized over. Bi-weekly and
/// weekly counts scale the month count and are left fractional.
pub fn amortization_periods(amortization_years: f64, plan: PaymentPlan) -> f64 {
    let months = amortization_years * 12.;
    match plan.rate_basis() {
        PaymentPlan::Monthly => months,
        PaymentPlan::SemiMonthly => months * 2.,
        PaymentPlan::BiWeekly => months * (26. / 12.),
        _ => months * (52. / 12.),
    }
}

/// Level payment that retires `principal` over `periods` at `rate` per period.
pub fn annuity_payment(principal: f64, rate: f64, periods: f64) -> f64 {
    if rate == 0. {
        return principal / periods;
    }
    let factor = (1. + rate).powf(periods);
    (principal * (rate * factor)) / (factor - 1.)
}

#[cfg(test)]
mod tests {
    use super::{
        amortization_periods, annuity_payment, periodic_rate, round_cents, LoanParameters,
        PaymentPlan,
    };
    use crate::error::LoanError;
    use approx::assert_abs_diff_eq;
    use test_log::test;

    fn reference_loan() -> LoanParameters {
        LoanParameters::new(100000., 0.05, 25., 5.).unwrap()
    }

    #[test]
    fn test_round_cents_ties_to_even() {
        assert_eq!(round_cents(0.125), 0.12);
        assert_eq!(round_cents(0.375), 0.38);
        assert_eq!(round_cents(412.3916), 412.39);
        assert_eq!(round_cents(169.2149), 169.21);
        assert_eq!(round_cents(0.), 0.);
        assert_eq!(round_cents(-0.004), 0.);
    }

    #[test]
    fn test_periodic_rates() {
        assert_abs_diff_eq!(periodic_rate(0.05, 12), 0.0041239154651442345, epsilon = 1e-15);
        assert_abs_diff_eq!(periodic_rate(0.05, 24), 0.002059836269842741, epsilon = 1e-15);
        assert_abs_diff_eq!(periodic_rate(0.05, 26), 0.0019012368008677338, epsilon = 1e-15);
        assert_abs_diff_eq!(periodic_rate(0.05, 52), 0.0009501669917777456, epsilon = 1e-15);
        assert_eq!(periodic_rate(0., 12), 0.);

        // two semi-annual periods compound back to the nominal convention
        let monthly = periodic_rate(0.05, 12);
        assert_abs_diff_eq!((1. + monthly).powi(6), 1.025, epsilon = 1e-12);
    }

    #[test]
    fn test_rapid_plans_share_base_rates() {
        let loan = reference_loan();
        assert_eq!(
            loan.periodic_rate(PaymentPlan::RapidBiWeekly),
            loan.periodic_rate(PaymentPlan::BiWeekly)
        );
        assert_eq!(
            loan.periodic_rate(PaymentPlan::RapidWeekly),
            loan.periodic_rate(PaymentPlan::Weekly)
        );
    }

    #[test]
    fn test_amortization_periods_stay_fractional() {
        assert_eq!(amortization_periods(25., PaymentPlan::Monthly), 300.);
        assert_eq!(amortization_periods(25., PaymentPlan::SemiMonthly), 600.);
        assert_abs_diff_eq!(amortization_periods(25., PaymentPlan::BiWeekly), 650., epsilon = 1e-9);
        assert_abs_diff_eq!(amortization_periods(25., PaymentPlan::Weekly), 1300., epsilon = 1e-9);

        // month-scaled counts are used as is, not rounded to whole payments
        let periods = amortization_periods(7.5, PaymentPlan::BiWeekly);
        assert_abs_diff_eq!(periods, 195., epsilon = 1e-9);
        let weekly = amortization_periods(1. / 12., PaymentPlan::Weekly);
        assert_abs_diff_eq!(weekly, 52. / 12., epsilon = 1e-12);
        assert!(weekly.fract() > 0.);
    }

    #[test]
    fn test_periodic_payments() {
        let loan = reference_loan();
        assert_abs_diff_eq!(loan.periodic_payment(PaymentPlan::Monthly), 581.6049850370155, epsilon = 1e-9);
        assert_abs_diff_eq!(loan.periodic_payment(PaymentPlan::SemiMonthly), 290.5032979037355, epsilon = 1e-9);
        assert_abs_diff_eq!(loan.periodic_payment(PaymentPlan::BiWeekly), 268.13566147672043, epsilon = 1e-9);
        assert_abs_diff_eq!(loan.periodic_payment(PaymentPlan::Weekly), 134.00416756996816, epsilon = 1e-9);
        assert_abs_diff_eq!(loan.periodic_payment(PaymentPlan::RapidBiWeekly), 290.80249251850773, epsilon = 1e-9);
        assert_abs_diff_eq!(loan.periodic_payment(PaymentPlan::RapidWeekly), 145.40124625925387, epsilon = 1e-9);

        let monthly = loan.periodic_payment(PaymentPlan::Monthly);
        assert_eq!(loan.periodic_payment(PaymentPlan::RapidBiWeekly), monthly / 2.);
        assert_eq!(loan.periodic_payment(PaymentPlan::RapidWeekly), monthly / 4.);
    }

    #[test]
    fn test_fractional_period_sizing_changes_payment() {
        // sizing over 195.0000x fractional periods differs from a rounded count
        let loan = LoanParameters::new(50000., 0.04, 7.5, 7.5).unwrap();
        let rate = loan.periodic_rate(PaymentPlan::BiWeekly);
        let fractional = annuity_payment(50000., rate, 7.5 * 12. * (26. / 12.));
        assert_eq!(loan.periodic_payment(PaymentPlan::BiWeekly), fractional);
        assert!(annuity_payment(50000., rate, 194.) > fractional);
    }

    #[test]
    fn test_zero_rate_payment() {
        let loan = LoanParameters::new(120000., 0., 25., 5.).unwrap();
        assert_eq!(loan.periodic_payment(PaymentPlan::Monthly), 120000. / 300.);
        assert_eq!(loan.periodic_payment(PaymentPlan::SemiMonthly), 120000. / 600.);
        assert_eq!(
            loan.periodic_payment(PaymentPlan::BiWeekly),
            120000. / amortization_periods(25., PaymentPlan::BiWeekly)
        );
        assert_eq!(loan.periodic_payment(PaymentPlan::RapidWeekly), 100.);
        for plan in PaymentPlan::ALL {
            assert_eq!(loan.periodic_rate(plan), 0.);
        }
    }

    #[test]
    fn test_total_term_periods() {
        let loan = reference_loan();
        let periods: Vec<u32> = PaymentPlan::ALL
            .iter()
            .map(|plan| loan.total_term_periods(*plan))
            .collect();
        assert_eq!(periods, vec![60, 120, 130, 260, 130, 260]);

        let partial = LoanParameters::new(100000., 0.05, 25., 2.5).unwrap();
        assert_eq!(partial.total_term_periods(PaymentPlan::Monthly), 30);
        assert_eq!(partial.total_term_periods(PaymentPlan::BiWeekly), 65);
    }

    #[test]
    fn test_plan_terms() {
        let terms = reference_loan().all_plan_terms();
        assert_eq!(terms.len(), 6);
        assert_eq!(terms[4].plan, PaymentPlan::RapidBiWeekly);
        assert_eq!(terms[4].periods_per_year, 26);
        assert_eq!(terms[4].periodic_rate, terms[2].periodic_rate);
        assert_eq!(terms[5].periodic_payment, terms[0].periodic_payment / 4.);
    }

    #[test]
    fn test_invalid_parameters() {
        let cases = [
            (0., 0.05, 25., 5., "principal"),
            (-100., 0.05, 25., 5., "principal"),
            (100000., -0.01, 25., 5., "nominal_annual_rate"),
            (100000., 0.05, 0., 5., "amortization_years"),
            (100000., 0.05, 25., -5., "term_years"),
            (f64::NAN, 0.05, 25., 5., "principal"),
            (100000., f64::INFINITY, 25., 5., "nominal_annual_rate"),
        ];
        for (principal, rate, amortization, term, expected) in cases {
            match LoanParameters::new(principal, rate, amortization, term) {
                Err(LoanError::InvalidParameter { field, .. }) => assert_eq!(field, expected),
                other => panic!("expected {} to be rejected, got {:?}", expected, other),
            }
        }
    }

    #[test]
    fn test_term_period_count_must_fit() {
        match LoanParameters::new(100000., 0.05, 25., 1.0e8) {
            Err(LoanError::InvalidParameter { field, .. }) => assert_eq!(field, "term_years"),
            other => panic!("expected term_years to be rejected, got {:?}", other),
        }

        let long = LoanParameters::new(100000., 0.05, 25., 1.0e7).unwrap();
        assert_eq!(long.total_term_periods(PaymentPlan::Weekly), 520_000_000);
    }

    #[test]
    fn test_term_longer_than_amortization_is_accepted() {
        let loan = LoanParameters::new(100000., 0.05, 5., 10.).unwrap();
        assert_eq!(loan.total_term_periods(PaymentPlan::Monthly), 120);
    }

    #[test]
    fn test_plan_names() {
        let names: Vec<String> = PaymentPlan::ALL.iter().map(|p| p.to_string()).collect();
        assert_eq!(
            names,
            vec![
                "Monthly",
                "Semi-Monthly",
                "Bi-Weekly",
                "Weekly",
                "Rapid Bi-Weekly",
                "Rapid Weekly"
            ]
        );
        assert!(PaymentPlan::RapidWeekly.is_rapid());
        assert!(!PaymentPlan::Weekly.is_rapid());
    }
}
