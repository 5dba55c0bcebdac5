//! Every user-visible string of the report, per locale.

use crate::period::ReportPeriod;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl std::str::FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" | "en-us" | "en-gb" => Ok(Locale::En),
            "es" | "es-es" => Ok(Locale::Es),
            other => Err(format!("unsupported locale '{}', expected 'en' or 'es'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLabels {
    pub locale: Locale,
    pub months: [&'static str; 12],
    pub wordmark: &'static str,
    pub report_title: &'static str,
    pub account_fallback: &'static str,
    pub summary_title: &'static str,
    pub concept: &'static str,
    pub amount: &'static str,
    pub income: &'static str,
    pub expenses: &'static str,
    pub balance: &'static str,
    pub chart_titles: [&'static str; 4],
    pub no_charts: &'static str,
    pub no_valid_charts: &'static str,
    pub transactions_band: &'static str,
    pub income_table_title: &'static str,
    pub expense_table_title: &'static str,
    pub columns: [&'static str; 4],
    pub total: &'static str,
    pub not_available: &'static str,
    pub footer_brand: &'static str,
}

const ENGLISH: ReportLabels = ReportLabels {
    locale: Locale::En,
    months: [
        "January", "February", "March", "April", "May", "June", "July", "August", "September",
        "October", "November", "December",
    ],
    wordmark: "SmartSpend",
    report_title: "MONTHLY FINANCIAL REPORT",
    account_fallback: "Account",
    summary_title: "Financial Summary",
    concept: "Concept",
    amount: "Amount",
    income: "Income",
    expenses: "Expenses",
    balance: "Balance",
    chart_titles: ["Income Chart", "Expense Chart", "Line Chart", "Bar Chart"],
    no_charts: "No charts were found to include",
    no_valid_charts: "No valid charts could be captured",
    transactions_band: "TRANSACTION DETAILS",
    income_table_title: "Income for the Month",
    expense_table_title: "Expenses for the Month",
    columns: ["DESCRIPTION", "AMOUNT", "DATE", "CATEGORY"],
    total: "TOTAL",
    not_available: "N/A",
    footer_brand: "SmartSpend - Smart Financial Management",
};

const SPANISH: ReportLabels = ReportLabels {
    locale: Locale::Es,
    months: [
        "Enero", "Febrero", "Marzo", "Abril", "Mayo", "Junio", "Julio", "Agosto", "Septiembre",
        "Octubre", "Noviembre", "Diciembre",
    ],
    wordmark: "SmartSpend",
    report_title: "REPORTE FINANCIERO MENSUAL",
    account_fallback: "Cuenta",
    summary_title: "Resumen Financiero",
    concept: "Concepto",
    amount: "Cantidad",
    income: "Ingresos",
    expenses: "Gastos",
    balance: "Balance",
    chart_titles: [
        "Gráfico de Ingresos",
        "Gráfico de Gastos",
        "Gráfico de Línea",
        "Gráfico de Barras",
    ],
    no_charts: "No se encontraron gráficos para incluir",
    no_valid_charts: "No se pudieron capturar gráficos válidos",
    transactions_band: "DETALLE DE TRANSACCIONES",
    income_table_title: "Ingresos del Mes",
    expense_table_title: "Gastos del Mes",
    columns: ["DESCRIPCIÓN", "CANTIDAD", "FECHA", "CATEGORÍA"],
    total: "TOTAL",
    not_available: "N/A",
    footer_brand: "SmartSpend - Gestión Financiera Inteligente",
};

impl ReportLabels {
    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::En => ENGLISH,
            Locale::Es => SPANISH,
        }
    }

    pub fn month_name(&self, period: ReportPeriod) -> &'static str {
        self.months[period.month0()]
    }

    /// Positional chart title: the fixed list first, then "Chart N" (1-based).
    pub fn chart_title(&self, index: usize) -> String {
        match self.chart_titles.get(index) {
            Some(title) => title.to_string(),
            None => match self.locale {
                Locale::En => format!("Chart {}", index + 1),
                Locale::Es => format!("Gráfico {}", index + 1),
            },
        }
    }

    pub fn chart_error(&self, title: &str) -> String {
        match self.locale {
            Locale::En => format!("Error loading {}", title),
            Locale::Es => format!("Error cargando {}", title),
        }
    }

    pub fn more_transactions(&self, hidden: usize) -> String {
        match self.locale {
            Locale::En => format!("... and {} more transactions", hidden),
            Locale::Es => format!("... y {} transacciones más", hidden),
        }
    }

    pub fn generated_on(&self, long_date: &str) -> String {
        match self.locale {
            Locale::En => format!("Report generated on {}", long_date),
            Locale::Es => format!("Reporte generado el {}", long_date),
        }
    }
}

impl Default for ReportLabels {
    fn default() -> Self {
        ENGLISH
    }
}
