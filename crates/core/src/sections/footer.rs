use super::SectionContext;
use crate::format::format_long_date;
use chrono::NaiveDate;
use smartspend_layout::{LayoutCursor, PositionedElement};
use smartspend_types::{FontFace, Stroke, TextAlign};

/// Stamps the brand line and generation date at the foot of the current
/// page. Positions are fixed from the page bottom and the cursor is left
/// where it was.
pub fn render_footer(cursor: &mut LayoutCursor, ctx: &SectionContext<'_>, generated_on: NaiveDate) {
    let geometry = *cursor.geometry();
    let bottom = geometry.height;

    cursor.place(PositionedElement::hline(
        20.0,
        geometry.width - 20.0,
        bottom - 35.0,
        Stroke::new(2.0, ctx.theme.accent),
    ));

    let brand = ctx.colored(FontFace::Bold, 10.0, ctx.theme.primary).aligned(TextAlign::Center);
    cursor.place(PositionedElement::text(geometry.center_x(), bottom - 25.0, ctx.labels.footer_brand, brand));

    let stamp = ctx.labels.generated_on(&format_long_date(generated_on, ctx.labels));
    let muted = ctx.colored(FontFace::Regular, 8.0, ctx.theme.muted_text).aligned(TextAlign::Center);
    cursor.place(PositionedElement::text(geometry.center_x(), bottom - 15.0, stamp, muted));
}
