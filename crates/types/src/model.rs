//! The monthly report payload as served by the SmartSpend backend
//! (`GET /api/v1/report/report-data`).
//!
//! Deserialisation is deliberately lenient at row granularity: a list entry
//! that does not look like a transaction is kept as
//! [`TransactionEntry::Malformed`] instead of failing the whole payload, so the
//! report can skip just that row.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Everything needed to build one account/month report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportData {
    #[serde(rename = "bankAccount", alias = "account", default)]
    pub account: AccountRef,
    #[serde(
        rename = "incomesList",
        alias = "incomes",
        default,
        deserialize_with = "null_as_empty"
    )]
    pub incomes: Vec<TransactionEntry>,
    #[serde(
        rename = "expensesList",
        alias = "expenses",
        default,
        deserialize_with = "null_as_empty"
    )]
    pub expenses: Vec<TransactionEntry>,
    /// Upstream aggregates. The backend spells the key `stadistics`.
    #[serde(rename = "stadistics", alias = "statistics", default)]
    pub statistics: Option<ReportStatistics>,
    #[serde(flatten)]
    pub chart_payloads: ChartPayloads,
}

impl ReportData {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRef {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub account_name: Option<String>,
    #[serde(default)]
    pub current_balance: Option<Decimal>,
}

impl AccountRef {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            account_name: Some(name.into()),
            ..Self::default()
        }
    }

    /// The account name, or `fallback` when it is missing or blank.
    pub fn display_name<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self.account_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => fallback,
        }
    }
}

/// Pre-aggregated totals. Any field may be missing or zero when the upstream
/// aggregation only returned partial data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportStatistics {
    #[serde(default)]
    pub incomes_total: Option<Decimal>,
    #[serde(default)]
    pub expenses_total: Option<Decimal>,
    #[serde(default)]
    pub balance: Option<Decimal>,
}

/// Chart datasets computed by the backend. They feed the external chart
/// widgets and pass through the report engine untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPayloads {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income_pie_chart: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expense_pie_chart: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_chart: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bar_line_chart: Option<Value>,
}

impl ChartPayloads {
    pub fn present(&self) -> usize {
        [
            &self.income_pie_chart,
            &self.expense_pie_chart,
            &self.line_chart,
            &self.bar_line_chart,
        ]
        .iter()
        .filter(|p| p.as_ref().is_some_and(|v| !v.is_null()))
        .count()
    }
}

/// One entry of an income or expense list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TransactionEntry {
    Parsed(Transaction),
    Malformed(Value),
}

impl TransactionEntry {
    pub fn as_transaction(&self) -> Option<&Transaction> {
        match self {
            TransactionEntry::Parsed(tx) => Some(tx),
            TransactionEntry::Malformed(_) => None,
        }
    }

    /// The signed amount, or zero when absent. Malformed entries still
    /// contribute a numeric `amount` field if they carry one.
    pub fn amount_or_zero(&self) -> Decimal {
        match self {
            TransactionEntry::Parsed(tx) => tx.amount.unwrap_or_default(),
            TransactionEntry::Malformed(raw) => raw
                .get("amount")
                .and_then(Value::as_number)
                .and_then(|n| {
                    let text = n.to_string();
                    text.parse::<Decimal>()
                        .or_else(|_| Decimal::from_scientific(&text))
                        .ok()
                })
                .unwrap_or_default(),
        }
    }
}

impl From<Transaction> for TransactionEntry {
    fn from(tx: Transaction) -> Self {
        TransactionEntry::Parsed(tx)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default, alias = "transactionDate")]
    pub date: Option<TransactionDate>,
    #[serde(default, deserialize_with = "object_or_none")]
    pub category: Option<CategoryRef>,
}

impl Transaction {
    pub fn new(description: impl Into<String>, amount: Decimal) -> Self {
        Self {
            description: Some(description.into()),
            amount: Some(amount),
            ..Self::default()
        }
    }

    pub fn on(mut self, date: TransactionDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn in_category(mut self, name: impl Into<String>) -> Self {
        self.category = Some(CategoryRef {
            id: None,
            name: Some(name.into()),
        });
        self
    }
}

/// Dates arrive either as ISO strings or as `[year, month, day]` arrays
/// (Jackson's default `LocalDate` encoding). Anything else is kept and later
/// rendered as "N/A".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TransactionDate {
    Parts(Vec<i64>),
    Text(String),
    Other(Value),
}

impl TransactionDate {
    pub fn ymd(year: i64, month: i64, day: i64) -> Self {
        TransactionDate::Parts(vec![year, month, day])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryRef {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Categories that are not objects (e.g. a bare enum string) carry no name.
fn object_or_none<'de, D>(deserializer: D) -> Result<Option<CategoryRef>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_object() {
        Ok(serde_json::from_value(value).ok())
    } else {
        Ok(None)
    }
}
