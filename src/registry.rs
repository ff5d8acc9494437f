use crate::loan::{LoanParameters, PaymentPlan, PlanTerms};
use crate::schedule::{simulate, AmortizationSchedule};
use log::info;
use rayon::prelude::*;
use std::collections::BTreeMap;

/// Everything produced for one loan: the terms of each plan and its schedule,
/// keyed and iterated in plan order.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanResults {
    pub loan: LoanParameters,
    terms: BTreeMap<PaymentPlan, PlanTerms>,
    schedules: BTreeMap<PaymentPlan, AmortizationSchedule>,
}

impl PlanResults {
    /// Simulates all six plans. Plans share only the read-only loan and are
    /// run on the rayon pool.
    pub fn build(loan: &LoanParameters) -> Self {
        let terms: BTreeMap<PaymentPlan, PlanTerms> = loan
            .all_plan_terms()
            .into_iter()
            .map(|t| (t.plan, t))
            .collect();

        let schedules: BTreeMap<PaymentPlan, AmortizationSchedule> = terms
            .par_iter()
            .map(|(plan, t)| {
                let schedule = simulate(t, loan.principal(), loan.total_term_periods(*plan));
                (*plan, schedule)
            })
            .collect();

        info!(
            "built {} schedules for ${:.2} at {}% over a {} year term",
            schedules.len(),
            loan.principal(),
            loan.nominal_annual_rate() * 100.,
            loan.term_years()
        );

        Self {
            loan: *loan,
            terms,
            schedules,
        }
    }

    pub fn schedule(&self, plan: PaymentPlan) -> &AmortizationSchedule {
        &self.schedules[&plan]
    }

    pub fn terms(&self, plan: PaymentPlan) -> &PlanTerms {
        &self.terms[&plan]
    }

    pub fn periodic_payment(&self, plan: PaymentPlan) -> f64 {
        self.terms(plan).periodic_payment
    }

    pub fn schedules(&self) -> impl Iterator<Item = (&PaymentPlan, &AmortizationSchedule)> {
        self.schedules.iter()
    }

    /// Periodic payment of each plan, in plan order.
    pub fn payments(&self) -> [(PaymentPlan, f64); 6] {
        PaymentPlan::ALL.map(|plan| (plan, self.periodic_payment(plan)))
    }

    /// Schedules paired with their display names, in plan order, for
    /// collaborators that address plans by name.
    pub fn by_name(&self) -> Vec<(&'static str, &AmortizationSchedule)> {
        self.schedules
            .iter()
            .map(|(plan, schedule)| (plan.name(), schedule))
            .collect()
    }
}
