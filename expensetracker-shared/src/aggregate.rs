//! Dashboard aggregates derived from the fetched transaction list.
//!
//! Aggregates are never cached: views call [`Aggregates::from_transactions`]
//! on every render.

use crate::models::Transaction;

/// Numeric summary of a transaction list.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Aggregates {
    /// Income minus expenses.
    pub balance: f64,
    /// Sum of every expense amount.
    ///
    /// No date filter is applied: every expense ever recorded is counted,
    /// not just those of the current month. The dashboard has always shown
    /// it this way, so it stays until the intended window is settled.
    pub monthly_spending: f64,
    /// Sum of every income amount.
    pub income: f64,
    pub count: usize,
}

impl Aggregates {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        transactions
            .iter()
            .fold(Self::default(), |mut totals, transaction| {
                totals.balance += transaction.signed_amount();
                if transaction.is_expense {
                    totals.monthly_spending += transaction.amount;
                } else {
                    totals.income += transaction.amount;
                }
                totals.count += 1;
                totals
            })
    }
}

/// Formats a dollar figure with two decimals, keeping the sign in front of
/// the currency symbol (`-$12.50`).
pub fn format_currency(value: f64) -> String {
    if value < 0.0 {
        format!("-${:.2}", value.abs())
    } else {
        format!("${value:.2}")
    }
}
