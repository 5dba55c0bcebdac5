use super::SectionContext;
use crate::error::SkipReason;
use crate::period::ReportPeriod;
use smartspend_layout::{LayoutCursor, PositionedElement};
use smartspend_resource::{ResourceProvider, decode_image};
use smartspend_types::{Color, EncodedImage, FontFace, Stroke, TextAlign};
use std::sync::Arc;

const LOGO_KEY: &str = "logo";
const LOGO_WIDTH: f32 = 40.0;
const LOGO_HEIGHT: f32 = 12.0;
const MARGIN_X: f32 = 20.0;

/// Fetches and decodes the logo. Any failure becomes the reason the header
/// falls back to the wordmark.
pub fn load_logo(provider: &dyn ResourceProvider, path: &str) -> Result<EncodedImage, SkipReason> {
    let bytes = provider
        .load(path)
        .map_err(|e| SkipReason::LogoUnavailable(e.to_string()))?;
    decode_image(&bytes).map_err(|e| SkipReason::LogoUnavailable(format!("'{}': {}", path, e)))
}

/// Logo or wordmark, the title band with the period and account, and a
/// separator rule.
pub fn render_header(
    cursor: &mut LayoutCursor,
    ctx: &SectionContext<'_>,
    logo: Option<Arc<EncodedImage>>,
    period: ReportPeriod,
    account_name: &str,
) {
    let theme = ctx.theme;
    let width = cursor.geometry().width;
    let center = cursor.geometry().center_x();

    match logo {
        Some(image) => {
            cursor.ensure_space(LOGO_HEIGHT);
            let y = cursor.y();
            cursor.register_image(LOGO_KEY, image);
            cursor.place(PositionedElement::image(MARGIN_X, y, LOGO_WIDTH, LOGO_HEIGHT, LOGO_KEY));
            cursor.advance(22.0);
        }
        None => {
            cursor.ensure_space(14.0);
            let y = cursor.y();
            let style = ctx.colored(FontFace::Bold, 24.0, theme.primary);
            cursor.place(PositionedElement::text(MARGIN_X, y + 10.0, ctx.labels.wordmark, style));
            cursor.place(PositionedElement::hline(MARGIN_X, 80.0, y + 12.0, Stroke::new(2.0, theme.accent)));
            cursor.advance(20.0);
        }
    }

    cursor.ensure_space(25.0);
    let y = cursor.y();
    cursor.place(PositionedElement::filled_rect(15.0, y - 5.0, width - 30.0, 25.0, theme.primary));

    let title = ctx.colored(FontFace::Bold, 22.0, Color::WHITE).aligned(TextAlign::Center);
    cursor.place(PositionedElement::text(center, y + 8.0, ctx.labels.report_title, title));

    let subtitle = format!(
        "{} {} - {}",
        ctx.labels.month_name(period),
        period.year(),
        account_name
    );
    let sub_style = ctx.colored(FontFace::Regular, 14.0, Color::WHITE).aligned(TextAlign::Center);
    cursor.place(PositionedElement::text(center, y + 16.0, subtitle, sub_style));
    cursor.advance(35.0);

    let y = cursor.y();
    cursor.place(PositionedElement::hline(MARGIN_X, width - MARGIN_X, y, Stroke::new(1.0, theme.accent)));
    cursor.advance(15.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::test_support::context;
    use smartspend_layout::{LayoutElement, PageGeometry};
    use smartspend_resource::{InMemoryResourceProvider, ResourceError};

    fn period() -> ReportPeriod {
        ReportPeriod::new(2024, 3).unwrap()
    }

    #[test]
    fn wordmark_header_lays_out_title_and_subtitle() {
        let mut cursor = LayoutCursor::new(PageGeometry::a4());
        render_header(&mut cursor, &context(), None, period(), "Checking");

        let texts = cursor.pages()[0].texts().collect::<Vec<_>>();
        assert_eq!(texts, vec!["SmartSpend", "MONTHLY FINANCIAL REPORT", "March 2024 - Checking"]);
        // 20 + wordmark 20 + band 35 + separator 15
        assert_eq!(cursor.y(), 90.0);
    }

    #[test]
    fn logo_replaces_the_wordmark() {
        let mut cursor = LayoutCursor::new(PageGeometry::a4());
        let logo = Arc::new(EncodedImage::new(1, 1, vec![0, 0, 0]).unwrap());
        render_header(&mut cursor, &context(), Some(logo), period(), "Checking");

        let first = &cursor.pages()[0].elements[0];
        assert!(matches!(&first.element, LayoutElement::Image(img) if img.src == LOGO_KEY));
        assert!(!cursor.pages()[0].texts().any(|t| t == "SmartSpend"));
        assert_eq!(cursor.y(), 92.0);

        let doc = cursor.finish();
        assert!(doc.images.contains_key(LOGO_KEY));
    }

    #[test]
    fn missing_logo_is_a_skip_reason() {
        let provider = InMemoryResourceProvider::new();
        let err = load_logo(&provider, "logo.png").unwrap_err();
        assert!(matches!(err, SkipReason::LogoUnavailable(_)));
        assert!(err.to_string().contains(&ResourceError::NotFound("logo.png".into()).to_string()));
    }

    #[test]
    fn undecodable_logo_is_a_skip_reason() {
        let provider = InMemoryResourceProvider::new().with("logo.png", b"not a png".to_vec());
        assert!(matches!(load_logo(&provider, "logo.png"), Err(SkipReason::LogoUnavailable(_))));
    }
}
