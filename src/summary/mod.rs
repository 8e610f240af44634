//! Implements the monthly summary: aggregating records into headline totals
//! and a per-category budget overview.

mod aggregation;
mod api;
mod page;
mod period;
mod presenter;
mod totals;

pub use aggregation::{spend_by_category, totals_by_payment_type};
pub use api::get_summary_api;
pub use page::{PeriodQuery, SummaryState, get_summary_page};
pub use period::Period;
pub use presenter::{BudgetStanding, CategorySpentView, budget_overview};
pub use totals::{PAYMENT_TYPES, PaymentTotals};
