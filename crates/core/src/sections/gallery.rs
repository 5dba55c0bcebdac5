use super::SectionContext;
use crate::charts::{CollectedChart, MAX_CHARTS};
use smartspend_layout::{LayoutCursor, PositionedElement};
use smartspend_types::FontFace;

const MARGIN_X: f32 = 20.0;
const TITLE_GAP: f32 = 10.0;
const CHART_SIZE: f32 = 80.0;
const CHART_GAP: f32 = 95.0;
const NOTE_GAP: f32 = 10.0;

/// Lays out the collected charts one per block. Returns how many images were
/// embedded.
pub fn render_gallery(cursor: &mut LayoutCursor, ctx: &SectionContext<'_>, charts: &[CollectedChart]) -> usize {
    if charts.is_empty() {
        note(cursor, ctx, ctx.labels.no_charts);
        return 0;
    }

    let mut embedded = 0;
    for (index, chart) in charts.iter().enumerate() {
        if embedded >= MAX_CHARTS {
            break;
        }
        match chart {
            CollectedChart::Embedded(surface) => {
                cursor.ensure_space(TITLE_GAP + CHART_SIZE);
                let title = ctx.colored(FontFace::Bold, 12.0, ctx.theme.primary);
                cursor.place(PositionedElement::text(MARGIN_X, cursor.y(), surface.title.as_str(), title));
                cursor.advance(TITLE_GAP);

                let key = format!("chart-{}", index + 1);
                cursor.register_image(key.as_str(), surface.image.clone());
                cursor.place(PositionedElement::image(MARGIN_X, cursor.y(), CHART_SIZE, CHART_SIZE, key));
                cursor.advance(CHART_GAP);
                embedded += 1;
            }
            CollectedChart::Failed { title, .. } => {
                note(cursor, ctx, &ctx.labels.chart_error(title));
            }
        }
    }

    if embedded == 0 {
        note(cursor, ctx, ctx.labels.no_valid_charts);
    }
    log::debug!("Gallery placed {} chart(s), cursor at y = {}", embedded, cursor.y());
    embedded
}

fn note(cursor: &mut LayoutCursor, ctx: &SectionContext<'_>, text: &str) {
    cursor.ensure_space(NOTE_GAP);
    let style = ctx.colored(FontFace::Italic, 11.0, ctx.theme.muted_text);
    cursor.place(PositionedElement::text(MARGIN_X, cursor.y(), text, style));
    cursor.advance(NOTE_GAP);
}
