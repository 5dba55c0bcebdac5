use crate::error::SkipReason;
use itertools::Itertools;
use rust_decimal::Decimal;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    Income,
    Expense,
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableKind::Income => f.write_str("income"),
            TableKind::Expense => f.write_str("expense"),
        }
    }
}

/// Row accounting for one transaction table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableStats {
    /// Entries inside the display cap.
    pub displayed: usize,
    /// Displayed entries that produced a row.
    pub rendered: usize,
    /// Entries beyond the cap, summarised in the "more" line.
    pub hidden: usize,
    pub total: usize,
    /// The figure printed on the TOTAL line.
    pub displayed_total: Decimal,
}

/// What a report build left out or decided along the way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    pub skipped: Vec<SkipReason>,
    pub income_table: Option<TableStats>,
    pub expense_table: Option<TableStats>,
    pub charts_embedded: usize,
    pub page_breaks: usize,
}

impl Diagnostics {
    pub fn record(&mut self, reason: SkipReason) {
        log::warn!("{}", reason);
        self.skipped.push(reason);
    }

    pub fn table(&self, kind: TableKind) -> Option<&TableStats> {
        match kind {
            TableKind::Income => self.income_table.as_ref(),
            TableKind::Expense => self.expense_table.as_ref(),
        }
    }

    /// One line per skipped item, in the order they were recorded.
    pub fn describe(&self) -> String {
        self.skipped.iter().join("\n")
    }

    pub fn malformed_rows(&self) -> usize {
        self.skipped
            .iter()
            .filter(|r| matches!(r, SkipReason::MalformedRow { .. }))
            .count()
    }
}
