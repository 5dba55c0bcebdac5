//! Report configuration. Every field has a default, so a partial JSON file
//! only needs to name what it changes.

use crate::error::ReportError;
use crate::labels::{Locale, ReportLabels};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use smartspend_layout::PageGeometry;
use smartspend_types::Color;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReportConfig {
    pub geometry: PageGeometry,
    pub locale: Locale,
    pub currency_symbol: String,
    /// Looked up through the configured resource provider.
    pub logo_path: Option<String>,
    /// Shared deadline for every chart readiness signal.
    pub chart_ready_timeout_ms: u64,
    /// Date printed in the footer. Today's local date when unset.
    pub generated_on: Option<NaiveDate>,
    pub theme: ReportTheme,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            geometry: PageGeometry::a4(),
            locale: Locale::En,
            currency_symbol: "€".to_string(),
            logo_path: None,
            chart_ready_timeout_ms: 1000,
            generated_on: None,
            theme: ReportTheme::default(),
        }
    }
}

impl ReportConfig {
    pub fn from_json(json: &str) -> Result<Self, ReportError> {
        let config: ReportConfig =
            serde_json::from_str(json).map_err(|e| ReportError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ReportError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            ReportError::Config(format!("Failed to read config from '{}': {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ReportError> {
        self.geometry.validate().map_err(ReportError::Config)
    }

    pub fn labels(&self) -> ReportLabels {
        ReportLabels::for_locale(self.locale)
    }

    pub fn chart_ready_timeout(&self) -> Duration {
        Duration::from_millis(self.chart_ready_timeout_ms)
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_logo(mut self, path: impl Into<String>) -> Self {
        self.logo_path = Some(path.into());
        self
    }

    pub fn with_generated_on(mut self, date: NaiveDate) -> Self {
        self.generated_on = Some(date);
        self
    }
}

/// Report palette. Colours serialise as `#RRGGBB`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReportTheme {
    /// Title bands, headings and the brand line.
    pub primary: Color,
    /// Separators, the wordmark underline and the footer rule.
    pub accent: Color,
    pub text: Color,
    pub muted_text: Color,
    pub rule: Color,
    pub table_header: Color,
    pub row_stripe: Color,
    pub positive: Color,
    pub negative: Color,
}

impl Default for ReportTheme {
    fn default() -> Self {
        Self {
            primary: Color::rgb(30, 41, 59),
            accent: Color::rgb(59, 130, 246),
            text: Color::BLACK,
            muted_text: Color::rgb(107, 114, 128),
            rule: Color::rgb(203, 213, 224),
            table_header: Color::rgb(71, 85, 105),
            row_stripe: Color::rgb(249, 250, 251),
            positive: Color::rgb(34, 197, 94),
            negative: Color::rgb(239, 68, 68),
        }
    }
}
