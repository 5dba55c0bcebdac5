//! Monthly report assembly for SmartSpend: totals, chart collection, page
//! sections and the assembler that ties them to a renderer and an exporter.

pub mod aggregate;
pub mod assembler;
pub mod charts;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod export;
pub mod format;
pub mod labels;
pub mod period;
pub mod sections;
pub mod source;

pub use aggregate::FinancialSummary;
pub use assembler::{
    AssembledReport, AssemblyStage, ExportedReport, LaidOutReport, ReportAssembler, report_filename,
};
pub use charts::{
    ChartCollection, ChartCollector, ChartReadiness, ChartSlot, ChartSurface, CollectedChart, MAX_CHARTS,
    RenderedSurface,
};
pub use config::{ReportConfig, ReportTheme};
pub use diagnostics::{Diagnostics, TableKind, TableStats};
pub use error::{ExportError, ReportError, SkipReason, SourceError};
pub use export::{FileExporter, MemoryExporter, ReportExporter};
pub use labels::{Locale, ReportLabels};
pub use period::ReportPeriod;
#[cfg(feature = "http")]
pub use source::HttpReportSource;
pub use source::{InMemorySource, JsonFileSource, ReportSource};
