use super::SectionContext;
use crate::aggregate::FinancialSummary;
use smartspend_layout::{LayoutCursor, PositionedElement};
use smartspend_types::{FontFace, Stroke, TextAlign};

const CONCEPT_WIDTH: f32 = 50.0;
const AMOUNT_WIDTH: f32 = 30.0;
const ROW_HEIGHT: f32 = 10.0;
const TITLE_GAP: f32 = 15.0;

/// Title, header row and the three total rows, then a light rule.
pub fn render_summary(cursor: &mut LayoutCursor, ctx: &SectionContext<'_>, summary: &FinancialSummary) {
    let theme = ctx.theme;
    let labels = ctx.labels;
    let geometry = *cursor.geometry();

    cursor.ensure_space(TITLE_GAP + 4.0 * ROW_HEIGHT);
    let title = ctx.colored(FontFace::Bold, 16.0, theme.primary).aligned(TextAlign::Center);
    cursor.place(PositionedElement::text(geometry.center_x(), cursor.y(), labels.summary_title, title));
    cursor.advance(TITLE_GAP);

    let table_x = geometry.center_x() - (CONCEPT_WIDTH + AMOUNT_WIDTH) / 2.0;
    let amount_x = table_x + CONCEPT_WIDTH;
    let cell = Stroke::new(0.5, theme.rule);
    let top = cursor.y();

    let header = ctx.centered(FontFace::Bold, 12.0);
    cursor.place(PositionedElement::rect(table_x, top, CONCEPT_WIDTH, ROW_HEIGHT, Some(theme.row_stripe), Some(cell)));
    cursor.place(PositionedElement::rect(amount_x, top, AMOUNT_WIDTH, ROW_HEIGHT, Some(theme.row_stripe), Some(cell)));
    cursor.place(PositionedElement::text(table_x + CONCEPT_WIDTH / 2.0, top + 6.0, labels.concept, header));
    cursor.place(PositionedElement::text(amount_x + AMOUNT_WIDTH / 2.0, top + 6.0, labels.amount, header));

    let balance_color = if summary.balance().is_sign_negative() {
        theme.negative
    } else {
        theme.positive
    };
    let rows = [
        (labels.income, summary.incomes_total(), FontFace::Regular, ctx.theme.text),
        (labels.expenses, summary.expenses_total(), FontFace::Regular, ctx.theme.text),
        (labels.balance, summary.balance(), FontFace::Bold, balance_color),
    ];

    let mut row_y = top;
    for (label, amount, face, amount_color) in rows {
        row_y += ROW_HEIGHT;
        cursor.place(PositionedElement::rect(table_x, row_y, CONCEPT_WIDTH, ROW_HEIGHT, None, Some(cell)));
        cursor.place(PositionedElement::rect(amount_x, row_y, AMOUNT_WIDTH, ROW_HEIGHT, None, Some(cell)));
        cursor.place(PositionedElement::text(table_x + 5.0, row_y + 6.0, label, ctx.text(face, 11.0)));
        let amount_style = ctx.colored(face, 11.0, amount_color).aligned(TextAlign::Center);
        cursor.place(PositionedElement::text(
            amount_x + AMOUNT_WIDTH / 2.0,
            row_y + 6.0,
            ctx.currency(amount),
            amount_style,
        ));
    }

    cursor.set_y(row_y + 20.0);
    cursor.advance(10.0);
    let y = cursor.y();
    cursor.place(PositionedElement::hline(20.0, geometry.width - 20.0, y, Stroke::new(0.5, theme.rule)));
    cursor.advance(15.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::test_support::context;
    use rust_decimal::Decimal;
    use smartspend_layout::{LayoutElement, PageGeometry};

    fn amount_color(cursor: &LayoutCursor, text: &str) -> smartspend_types::Color {
        cursor.pages()[0]
            .elements
            .iter()
            .find_map(|el| match &el.element {
                LayoutElement::Text(t) if t.content == text => Some(t.style.color),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn lays_out_the_three_rows_with_currency() {
        let mut cursor = LayoutCursor::new(PageGeometry::a4());
        cursor.set_y(90.0);
        let summary = FinancialSummary::new(Decimal::new(123450, 2), Decimal::new(200, 0));
        render_summary(&mut cursor, &context(), &summary);

        let texts = cursor.pages()[0].texts().collect::<Vec<_>>();
        assert_eq!(
            texts,
            vec![
                "Financial Summary", "Concept", "Amount", "Income", "€1234.50", "Expenses", "€200.00",
                "Balance", "€1034.50",
            ]
        );
        assert_eq!(cursor.y(), 180.0);
    }

    #[test]
    fn balance_colour_follows_its_sign() {
        let ctx = context();
        let mut cursor = LayoutCursor::new(PageGeometry::a4());
        render_summary(&mut cursor, &ctx, &FinancialSummary::new(Decimal::ZERO, Decimal::new(50, 0)));
        assert_eq!(amount_color(&cursor, "€-50.00"), ctx.theme.negative);

        let mut cursor = LayoutCursor::new(PageGeometry::a4());
        render_summary(&mut cursor, &ctx, &FinancialSummary::new(Decimal::new(30, 0), Decimal::new(10, 0)));
        assert_eq!(amount_color(&cursor, "€20.00"), ctx.theme.positive);
    }
}
