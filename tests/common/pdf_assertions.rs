use lopdf::content::Content;
use lopdf::{Document as LopdfDocument, Object};
use smartspend_report::from_win_ansi;

fn page_operations(doc: &LopdfDocument, page_num: u32) -> Vec<lopdf::content::Operation> {
    let Some(page_id) = doc.get_pages().get(&page_num).copied() else {
        return Vec::new();
    };
    doc.get_page_content(page_id)
        .ok()
        .and_then(|bytes| Content::decode(&bytes).ok())
        .map(|content| content.operations)
        .unwrap_or_default()
}

/// Every `Tj` string of one page (1-based), in drawing order
pub fn page_text_runs(doc: &LopdfDocument, page_num: u32) -> Vec<String> {
    page_operations(doc, page_num)
        .into_iter()
        .filter(|op| op.operator == "Tj")
        .filter_map(|op| match op.operands.first() {
            Some(Object::String(bytes, _)) => Some(from_win_ansi(bytes)),
            _ => None,
        })
        .collect()
}

/// Extract all text content from a PDF document, one run per line
pub fn extract_text(doc: &LopdfDocument) -> String {
    let pages = doc.get_pages().len() as u32;
    let mut text = String::new();
    for page_num in 1..=pages {
        for run in page_text_runs(doc, page_num) {
            text.push_str(&run);
            text.push('\n');
        }
    }
    text
}

/// Number of image XObjects drawn across all pages
pub fn count_image_draws(doc: &LopdfDocument) -> usize {
    let pages = doc.get_pages().len() as u32;
    (1..=pages)
        .map(|p| page_operations(doc, p).iter().filter(|op| op.operator == "Do").count())
        .sum()
}

/// Number of image XObject streams stored in the file
pub fn count_image_objects(doc: &LopdfDocument) -> usize {
    doc.objects
        .values()
        .filter(|obj| match obj {
            Object::Stream(stream) => stream
                .dict
                .get(b"Subtype")
                .and_then(Object::as_name)
                .is_ok_and(|name| name == b"Image"),
            _ => false,
        })
        .count()
}

/// Page size in points, from the MediaBox
pub fn get_page_dimensions(doc: &LopdfDocument, page_num: u32) -> Option<(f32, f32)> {
    let page_id = *doc.get_pages().get(&page_num)?;
    let page = doc.get_dictionary(page_id).ok()?;
    let media_box = page.get(b"MediaBox").ok()?.as_array().ok()?;
    let width = media_box.get(2)?.as_float().ok()?;
    let height = media_box.get(3)?.as_float().ok()?;
    Some((width, height))
}

/// Assert that PDF contains specific text
#[macro_export]
macro_rules! assert_pdf_contains_text {
    ($pdf:expr, $text:expr) => {
        let extracted = $crate::common::pdf_assertions::extract_text(&$pdf.doc);
        assert!(
            extracted.contains($text),
            "PDF should contain '{}', but extracted text was:\n{}",
            $text,
            extracted
        );
    };
}

/// Assert that PDF does NOT contain specific text
#[macro_export]
macro_rules! assert_pdf_not_contains_text {
    ($pdf:expr, $text:expr) => {
        let extracted = $crate::common::pdf_assertions::extract_text(&$pdf.doc);
        assert!(
            !extracted.contains($text),
            "PDF should NOT contain '{}', but it was found in:\n{}",
            $text,
            extracted
        );
    };
}

/// Assert the number of pages in a PDF
#[macro_export]
macro_rules! assert_pdf_page_count {
    ($pdf:expr, $count:expr) => {
        assert_eq!(
            $pdf.page_count(),
            $count,
            "Expected {} pages, got {}",
            $count,
            $pdf.page_count()
        );
    };
}

/// Assert the page (1-based) a text run lands on
#[macro_export]
macro_rules! assert_pdf_text_on_page {
    ($pdf:expr, $text:expr, $page:expr) => {
        assert_eq!(
            $pdf.page_of($text),
            Some($page),
            "Expected '{}' on page {}",
            $text,
            $page
        );
    };
}
