//! Headline totals for a month: income, card spending and cash spending.

use std::collections::HashMap;

use serde::Serialize;

/// The payment types that represent money coming in.
pub const INCOME_PAYMENT_TYPES: [&str; 3] = ["Salario FL", "Salario GM", "Otro ingreso"];

/// The payment type for credit card spending.
pub const CARD_PAYMENT_TYPE: &str = "TC Master";

/// The payment type for cash spending.
pub const CASH_PAYMENT_TYPE: &str = "Efectivo";

/// Every payment type a record can be created with, in the order the forms
/// list them.
pub const PAYMENT_TYPES: [&str; 5] = [
    CARD_PAYMENT_TYPE,
    CASH_PAYMENT_TYPE,
    "Salario FL",
    "Salario GM",
    "Otro ingreso",
];

fn is_income(payment_type: &str) -> bool {
    INCOME_PAYMENT_TYPES.contains(&payment_type)
}

/// The three headline numbers at the top of the summary page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaymentTotals {
    /// The sum over the income payment types.
    pub total_income: i64,
    /// The sum over the card payment type.
    pub total_card_spend: i64,
    /// Spending not made with the card.
    pub total_cash_spend: i64,
}

impl PaymentTotals {
    /// Derive the headline totals from the by-payment-type sums for a month.
    ///
    /// Income comes from the income payment types only. Spending is the sum
    /// over every non-income payment type, and cash spending is whatever part
    /// of it was not paid by card. An unknown payment type therefore counts as
    /// cash spending, never as income.
    pub fn from_totals(by_payment_type: &HashMap<String, i64>) -> Self {
        let mut total_income = 0;
        let mut total_spend = 0;

        for (payment_type, amount) in by_payment_type {
            if is_income(payment_type) {
                total_income += amount;
            } else {
                total_spend += amount;
            }
        }

        let total_card_spend = *by_payment_type.get(CARD_PAYMENT_TYPE).unwrap_or(&0);

        Self {
            total_income,
            total_card_spend,
            total_cash_spend: total_spend - total_card_spend,
        }
    }
}
