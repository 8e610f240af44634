//! Number formatting for displaying amounts.
//!
//! Amounts are whole currency units rendered with a dot as the thousands
//! separator, matching the deployment locale ("1.000" for one thousand).

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};

/// Format `amount` with a dot as the thousands separator, e.g. `1.000.000`.
///
/// Negative amounts keep their minus sign: `-50.000`.
pub fn format_amount(amount: i64) -> String {
    static FMT: OnceLock<Formatter> = OnceLock::new();

    let fmt = FMT.get_or_init(|| {
        Formatter::new()
            .separator('.')
            .unwrap()
            .precision(Precision::Decimals(0))
    });

    if amount < 0 {
        format!("-{}", fmt.fmt_string(amount.unsigned_abs() as f64))
    } else {
        fmt.fmt_string(amount as f64)
    }
}

/// Format an amount that may be missing.
///
/// A missing amount renders as "0" rather than failing, so a degraded view
/// can always be drawn.
pub fn format_amount_or_zero(amount: Option<i64>) -> String {
    match amount {
        Some(amount) => format_amount(amount),
        None => "0".to_owned(),
    }
}
