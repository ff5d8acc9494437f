//! Mortgage payment plans and amortization schedules.
//!
//! A nominal annual rate, compounded semi-annually, is converted to a rate per
//! payment period; a level payment is sized over the amortization period for
//! each plan; and each plan is then run period by period over the shorter
//! loan term.

pub mod error;
pub mod export;
pub mod input;
pub mod loan;
pub mod registry;
pub mod schedule;

pub use error::{LoanError, Result};
pub use loan::{LoanParameters, PaymentPlan, PlanTerms};
pub use registry::PlanResults;
pub use schedule::{AmortizationSchedule, ScheduleRow};
