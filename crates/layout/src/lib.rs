//! Vertical layout for SmartSpend reports: page geometry, absolutely
//! positioned elements and the cursor that decides page breaks.

pub mod config;
pub mod cursor;
pub mod elements;
pub mod output;

pub use config::{MM_PER_PT, PageGeometry};
pub use cursor::LayoutCursor;
pub use elements::{
    ImageElement, LayoutElement, LineElement, PositionedElement, RectElement, TextElement,
    approx_text_width,
};
pub use output::{LaidOutDocument, Page};
