//! Foundation types shared across the SmartSpend report crates: the report
//! payload model plus the colour, text and image primitives the layout and
//! render layers exchange.

pub mod color;
pub mod image;
pub mod model;
pub mod style;

pub use color::Color;
pub use image::EncodedImage;
pub use model::{
    AccountRef, CategoryRef, ChartPayloads, ReportData, ReportStatistics, Transaction,
    TransactionDate, TransactionEntry,
};
pub use rust_decimal::Decimal;
pub use style::{FontFace, Stroke, TextAlign, TextStyle};
