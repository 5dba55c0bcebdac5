//! PDF output for laid-out SmartSpend reports.
//!
//! [`LopdfRenderer`] walks a [`smartspend_layout::LaidOutDocument`] page by page,
//! builds one content stream per page with a [`PageContext`] and streams the
//! objects through [`StreamingPdfWriter`].

mod error;
mod page;
mod renderer;
mod writer;

pub use error::RenderError;
pub use page::{PageContext, WIN_ANSI_HIGH, from_win_ansi, to_win_ansi};
pub use renderer::{DocumentRenderer, LopdfRenderer};
pub use writer::StreamingPdfWriter;
