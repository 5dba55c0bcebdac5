//! Error types for report assembly. Fatal problems are [`ReportError`]s and
//! abort the build; recoverable ones are [`SkipReason`]s that end up in the
//! report diagnostics while assembly carries on.

use crate::diagnostics::TableKind;
use smartspend_render_lopdf::RenderError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("No report data was provided; nothing to assemble")]
    MissingReportData,
    #[error("Invalid report period {year}-{month}: month must be between 1 and 12")]
    InvalidPeriod { year: i32, month: u32 },
    #[error("Could not load report data: {0}")]
    Source(#[from] SourceError),
    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),
    #[error("Export failed: {0}")]
    Export(#[from] ExportError),
    #[error("Configuration error: {0}")]
    Config(String),
}

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("I/O error reading '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Report payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Report API answered {status} for {url}")]
    Status { status: u16, url: String },
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Could not write '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Export rejected: {0}")]
    Rejected(String),
}

/// Something left out of the document. Never escalates to a [`ReportError`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("Chart slot {index} was not ready: {reason}")]
    ChartNotReady { index: usize, reason: String },
    #[error("Chart slot {index} has an empty surface")]
    ChartEmpty { index: usize },
    #[error("Could not encode '{title}': {reason}")]
    ChartEncoding { title: String, reason: String },
    #[error("Logo unavailable, using the wordmark: {0}")]
    LogoUnavailable(String),
    #[error("Skipping malformed {table} row {index}")]
    MalformedRow { table: TableKind, index: usize },
}
