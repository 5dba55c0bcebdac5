use super::SectionContext;
use crate::aggregate::sum_abs;
use crate::diagnostics::{Diagnostics, TableKind, TableStats};
use crate::error::SkipReason;
use crate::format::{CATEGORY_MAX_CHARS, DESCRIPTION_MAX_CHARS, format_short_date, truncate_cell};
use smartspend_layout::{LayoutCursor, PositionedElement};
use smartspend_types::{Color, FontFace, Stroke, TextAlign, TransactionEntry};

/// Rows shown per table. Later entries only appear in the "more" count.
pub const MAX_TABLE_ROWS: usize = 20;

const COLUMN_X: [f32; 4] = [25.0, 85.0, 125.0, 160.0];
const TITLE_GAP: f32 = 15.0;
const HEADER_HEIGHT: f32 = 12.0;
const ROW_HEIGHT: f32 = 8.0;

/// The slate band opening the transactions page.
pub fn render_transaction_band(cursor: &mut LayoutCursor, ctx: &SectionContext<'_>) {
    let width = cursor.geometry().width;
    cursor.ensure_space(20.0);
    let y = cursor.y();
    cursor.place(PositionedElement::filled_rect(15.0, y - 10.0, width - 30.0, 20.0, ctx.theme.primary));
    let style = ctx.colored(FontFace::Bold, 18.0, Color::WHITE).aligned(TextAlign::Center);
    cursor.place(PositionedElement::text(cursor.geometry().center_x(), y, ctx.labels.transactions_band, style));
    cursor.advance(25.0);
}

struct RowCells {
    description: String,
    amount: String,
    date: String,
    category: String,
}

fn row_cells(
    ctx: &SectionContext<'_>,
    kind: TableKind,
    index: usize,
    entry: &TransactionEntry,
) -> Result<RowCells, SkipReason> {
    let tx = entry
        .as_transaction()
        .ok_or(SkipReason::MalformedRow { table: kind, index })?;
    let labels = ctx.labels;
    Ok(RowCells {
        description: truncate_cell(tx.description.as_deref(), DESCRIPTION_MAX_CHARS, labels),
        amount: ctx.currency(tx.amount.unwrap_or_default().abs()),
        date: format_short_date(tx.date.as_ref(), labels),
        category: truncate_cell(
            tx.category.as_ref().and_then(|c| c.name.as_deref()),
            CATEGORY_MAX_CHARS,
            labels,
        ),
    })
}

/// Title, header band, up to [`MAX_TABLE_ROWS`] striped rows and the totals
/// block. Nothing is placed for an empty list.
///
/// The title and header stay with the first row. Each further row and the
/// totals block break the page on their own when they do not fit. The TOTAL
/// figure covers the displayed entries only, including rows that were skipped.
pub fn render_transaction_table(
    cursor: &mut LayoutCursor,
    ctx: &SectionContext<'_>,
    kind: TableKind,
    entries: &[TransactionEntry],
    diagnostics: &mut Diagnostics,
) -> Option<TableStats> {
    if entries.is_empty() {
        log::debug!("No {} entries, table omitted", kind);
        return None;
    }

    let theme = ctx.theme;
    let labels = ctx.labels;
    let geometry = *cursor.geometry();

    cursor.ensure_space(TITLE_GAP + HEADER_HEIGHT + ROW_HEIGHT);
    let title = match kind {
        TableKind::Income => labels.income_table_title,
        TableKind::Expense => labels.expense_table_title,
    };
    let title_style = ctx.colored(FontFace::Bold, 14.0, theme.primary);
    cursor.place(PositionedElement::text(COLUMN_X[0], cursor.y(), title, title_style));
    cursor.advance(TITLE_GAP);

    let y = cursor.y();
    cursor.place(PositionedElement::filled_rect(20.0, y - 3.0, geometry.width - 40.0, HEADER_HEIGHT, theme.table_header));
    let header_style = ctx.colored(FontFace::Bold, 11.0, Color::WHITE);
    for (x, column) in COLUMN_X.iter().zip(labels.columns) {
        cursor.place(PositionedElement::text(*x, y + 5.0, column, header_style));
    }
    cursor.advance(HEADER_HEIGHT);

    let displayed = &entries[..entries.len().min(MAX_TABLE_ROWS)];
    let mut rendered = 0;
    for (index, entry) in displayed.iter().enumerate() {
        let cells = match row_cells(ctx, kind, index, entry) {
            Ok(cells) => cells,
            Err(reason) => {
                diagnostics.record(reason);
                continue;
            }
        };

        cursor.ensure_space(ROW_HEIGHT);
        let y = cursor.y();
        if index % 2 == 0 {
            cursor.place(PositionedElement::filled_rect(20.0, y - 2.0, geometry.width - 40.0, ROW_HEIGHT, theme.row_stripe));
        }
        let regular = ctx.text(FontFace::Regular, 10.0);
        let bold = ctx.text(FontFace::Bold, 10.0);
        cursor.place(PositionedElement::text(COLUMN_X[0], y + 4.0, cells.description, regular));
        cursor.place(PositionedElement::text(COLUMN_X[1], y + 4.0, cells.amount, bold));
        cursor.place(PositionedElement::text(COLUMN_X[2], y + 4.0, cells.date, regular));
        cursor.place(PositionedElement::text(COLUMN_X[3], y + 4.0, cells.category, regular));
        cursor.advance(ROW_HEIGHT);
        rendered += 1;
    }

    let hidden = entries.len() - displayed.len();
    let displayed_total = sum_abs(displayed);

    cursor.ensure_space(15.0 + if hidden > 0 { 10.0 } else { 0.0 });
    let y = cursor.y();
    cursor.place(PositionedElement::hline(20.0, geometry.width - 20.0, y, Stroke::new(1.0, theme.rule)));
    cursor.advance(5.0);
    let total_style = ctx.text(FontFace::Bold, 12.0).aligned(TextAlign::Right);
    let total = format!("{}: {}", labels.total, ctx.currency(displayed_total));
    cursor.place(PositionedElement::text(geometry.width - 25.0, cursor.y() + 5.0, total, total_style));
    cursor.advance(15.0);

    if hidden > 0 {
        let style = ctx.colored(FontFace::Italic, 9.0, theme.muted_text);
        cursor.place(PositionedElement::text(COLUMN_X[0], cursor.y(), labels.more_transactions(hidden), style));
        cursor.advance(10.0);
    }

    log::debug!(
        "{} table: {} of {} rows rendered, {} hidden, ends on page {}",
        kind,
        rendered,
        entries.len(),
        hidden,
        cursor.page_index() + 1
    );
    Some(TableStats {
        displayed: displayed.len(),
        rendered,
        hidden,
        total: entries.len(),
        displayed_total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::test_support::context;
    use rust_decimal::Decimal;
    use serde_json::json;
    use smartspend_layout::PageGeometry;
    use smartspend_types::{Transaction, TransactionDate};

    fn entries(n: usize, amount: i64) -> Vec<TransactionEntry> {
        (0..n)
            .map(|i| Transaction::new(format!("Item {}", i + 1), Decimal::new(amount, 0)).into())
            .collect()
    }

    fn row_y_of(cursor: &LayoutCursor, page: usize, text: &str) -> Option<f32> {
        cursor.pages()[page]
            .elements
            .iter()
            .find(|el| el.as_text().is_some_and(|t| t.content == text))
            .map(|el| el.y)
    }

    #[test]
    fn empty_list_renders_nothing() {
        let mut cursor = LayoutCursor::new(PageGeometry::a4());
        let mut diagnostics = Diagnostics::default();
        let stats = render_transaction_table(&mut cursor, &context(), TableKind::Income, &[], &mut diagnostics);
        assert!(stats.is_none());
        assert!(cursor.pages()[0].elements.is_empty());
        assert_eq!(cursor.y(), 20.0);
    }

    #[test]
    fn caps_rows_and_counts_the_rest() {
        let mut cursor = LayoutCursor::new(PageGeometry::a4());
        cursor.break_page();
        let mut diagnostics = Diagnostics::default();
        let stats = render_transaction_table(
            &mut cursor,
            &context(),
            TableKind::Income,
            &entries(25, -10),
            &mut diagnostics,
        )
        .unwrap();

        assert_eq!(stats.displayed, 20);
        assert_eq!(stats.rendered, 20);
        assert_eq!(stats.hidden, 5);
        assert_eq!(stats.displayed_total, Decimal::new(200, 0));

        let texts = cursor.pages()[1].texts().collect::<Vec<_>>();
        assert!(texts.contains(&"Item 20"));
        assert!(!texts.contains(&"Item 21"));
        assert!(texts.contains(&"TOTAL: €200.00"));
        assert_eq!(texts.last(), Some(&"... and 5 more transactions"));
        assert_eq!(texts.iter().filter(|t| **t == "€10.00").count(), 20);
    }

    #[test]
    fn rows_resume_at_the_top_margin_after_a_break() {
        let mut cursor = LayoutCursor::new(PageGeometry::a4());
        cursor.set_y(200.0);
        let mut diagnostics = Diagnostics::default();
        render_transaction_table(&mut cursor, &context(), TableKind::Expense, &entries(10, 5), &mut diagnostics);

        assert_eq!(cursor.page_breaks(), 1);
        assert_eq!(row_y_of(&cursor, 0, "Item 5"), Some(263.0));
        assert_eq!(row_y_of(&cursor, 1, "Item 6"), Some(34.0));
        assert!(row_y_of(&cursor, 0, "Expenses for the Month").is_some());
    }

    #[test]
    fn title_moves_with_the_first_row() {
        let mut cursor = LayoutCursor::new(PageGeometry::a4());
        cursor.set_y(240.0);
        let mut diagnostics = Diagnostics::default();
        render_transaction_table(&mut cursor, &context(), TableKind::Income, &entries(1, 5), &mut diagnostics);

        assert!(cursor.pages()[0].elements.is_empty());
        assert_eq!(row_y_of(&cursor, 1, "Income for the Month"), Some(30.0));
    }

    #[test]
    fn malformed_rows_are_skipped_but_counted_in_the_total() {
        let mut list = entries(2, 10);
        list.insert(1, TransactionEntry::Malformed(json!({ "description": 7, "amount": -40 })));

        let mut cursor = LayoutCursor::new(PageGeometry::a4());
        let mut diagnostics = Diagnostics::default();
        let stats =
            render_transaction_table(&mut cursor, &context(), TableKind::Expense, &list, &mut diagnostics).unwrap();

        assert_eq!(stats.rendered, 2);
        assert_eq!(stats.displayed, 3);
        assert_eq!(stats.displayed_total, Decimal::new(60, 0));
        assert_eq!(
            diagnostics.skipped,
            vec![SkipReason::MalformedRow { table: TableKind::Expense, index: 1 }]
        );
    }

    #[test]
    fn cells_are_truncated_and_defaulted() {
        let tx = Transaction::new("Groceries at the market", Decimal::new(-1999, 2))
            .on(TransactionDate::ymd(2024, 3, 15))
            .in_category("Supermarkets");
        let bare = Transaction::default().on(TransactionDate::Text("not a date".into()));

        let mut cursor = LayoutCursor::new(PageGeometry::a4());
        let mut diagnostics = Diagnostics::default();
        render_transaction_table(
            &mut cursor,
            &context(),
            TableKind::Expense,
            &[tx.into(), bare.into()],
            &mut diagnostics,
        );

        let texts = cursor.pages()[0].texts().collect::<Vec<_>>();
        for expected in ["Groceries at the...", "€19.99", "15/03/24", "Supermarke...", "€0.00"] {
            assert!(texts.contains(&expected), "missing {expected}: {texts:?}");
        }
        assert_eq!(texts.iter().filter(|t| **t == "N/A").count(), 3);
    }

    #[test]
    fn band_is_centred_on_the_page() {
        let mut cursor = LayoutCursor::new(PageGeometry::a4());
        cursor.break_page();
        render_transaction_band(&mut cursor, &context());
        let band = &cursor.pages()[1].elements[1];
        assert_eq!(band.as_text().map(|t| t.content.as_str()), Some("TRANSACTION DETAILS"));
        assert_eq!(band.x, 105.0);
        assert_eq!(cursor.y(), 55.0);
    }
}
