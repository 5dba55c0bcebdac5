//! SmartSpend monthly financial reports.
//!
//! [`ReportPipeline`] fetches one month of account data, lays it out with the
//! rendered charts and exports the PDF. The building blocks are re-exported
//! for callers that drive [`ReportAssembler`] themselves.

pub mod pipeline;

pub use pipeline::{ReportPipeline, ReportPipelineBuilder};

pub use smartspend_core::*;
pub use smartspend_layout::{LaidOutDocument, LayoutCursor, PageGeometry};
pub use smartspend_render_lopdf::{DocumentRenderer, LopdfRenderer, RenderError, from_win_ansi, to_win_ansi};
pub use smartspend_resource::{
    FilesystemResourceProvider, InMemoryResourceProvider, ResourceError, ResourceProvider,
};
pub use smartspend_types::{
    AccountRef, CategoryRef, Decimal, ReportData, ReportStatistics, Transaction, TransactionDate,
    TransactionEntry,
};
