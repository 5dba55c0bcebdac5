//! Page sections. Each renderer takes the cursor plus its inputs, checks
//! that its next block fits, places elements and moves the cursor.

mod footer;
mod gallery;
mod header;
mod summary;
mod transactions;

pub use footer::render_footer;
pub use gallery::render_gallery;
pub use header::{load_logo, render_header};
pub use summary::render_summary;
pub use transactions::{MAX_TABLE_ROWS, render_transaction_band, render_transaction_table};

use crate::config::ReportTheme;
use crate::format::format_currency;
use crate::labels::ReportLabels;
use rust_decimal::Decimal;
use smartspend_types::{Color, FontFace, TextAlign, TextStyle};

/// Read-only inputs shared by every section of one report.
#[derive(Debug, Clone)]
pub struct SectionContext<'a> {
    pub labels: &'a ReportLabels,
    pub theme: &'a ReportTheme,
    pub currency_symbol: &'a str,
}

impl SectionContext<'_> {
    pub fn currency(&self, amount: Decimal) -> String {
        format_currency(amount, self.currency_symbol)
    }

    pub(crate) fn text(&self, face: FontFace, size: f32) -> TextStyle {
        TextStyle::new(face, size, self.theme.text)
    }

    pub(crate) fn centered(&self, face: FontFace, size: f32) -> TextStyle {
        self.text(face, size).aligned(TextAlign::Center)
    }

    pub(crate) fn colored(&self, face: FontFace, size: f32, color: Color) -> TextStyle {
        TextStyle::new(face, size, color)
    }
}
