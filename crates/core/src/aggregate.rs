//! Normalised monthly totals.

use rust_decimal::Decimal;
use smartspend_types::{ReportData, TransactionEntry};

/// Income, expense and balance for one report. Built once by
/// [`FinancialSummary::resolve`]; the balance always equals income minus
/// expenses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinancialSummary {
    incomes_total: Decimal,
    expenses_total: Decimal,
    balance: Decimal,
}

impl FinancialSummary {
    pub fn new(incomes_total: Decimal, expenses_total: Decimal) -> Self {
        Self {
            incomes_total,
            expenses_total,
            balance: incomes_total - expenses_total,
        }
    }

    /// Prefers the upstream statistics field by field. A field that is
    /// missing or zero falls back to the sum of absolute amounts over the
    /// matching list. Upstream `balance` is never used.
    pub fn resolve(data: &ReportData) -> Self {
        let derived_incomes = sum_abs(&data.incomes);
        let derived_expenses = sum_abs(&data.expenses);
        let stats = data.statistics.as_ref();

        let incomes_total = prefer_nonzero(stats.and_then(|s| s.incomes_total), derived_incomes);
        let expenses_total = prefer_nonzero(stats.and_then(|s| s.expenses_total), derived_expenses);

        log::debug!(
            "Resolved totals: income {} (derived {}), expenses {} (derived {})",
            incomes_total,
            derived_incomes,
            expenses_total,
            derived_expenses
        );
        Self::new(incomes_total, expenses_total)
    }

    pub fn incomes_total(&self) -> Decimal {
        self.incomes_total
    }

    pub fn expenses_total(&self) -> Decimal {
        self.expenses_total
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }
}

/// Σ|amount|; malformed entries contribute their numeric amount if any.
pub fn sum_abs<'a>(entries: impl IntoIterator<Item = &'a TransactionEntry>) -> Decimal {
    entries.into_iter().map(|e| e.amount_or_zero().abs()).sum()
}

fn prefer_nonzero(upstream: Option<Decimal>, derived: Decimal) -> Decimal {
    match upstream {
        Some(value) if !value.is_zero() => value,
        _ => derived,
    }
}
