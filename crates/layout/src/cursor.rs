use crate::config::PageGeometry;
use crate::elements::PositionedElement;
use crate::output::{LaidOutDocument, Page};
use smartspend_types::EncodedImage;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Single-column, top-down layout state.
///
/// Sections write at absolute positions derived from [`LayoutCursor::y`] and
/// move the cursor themselves. Before placing a block they call
/// [`LayoutCursor::ensure_space`] so the block lands whole on one page.
#[derive(Debug)]
pub struct LayoutCursor {
    geometry: PageGeometry,
    pages: Vec<Page>,
    y: f32,
    page_breaks: usize,
    images: BTreeMap<String, Arc<EncodedImage>>,
}

impl LayoutCursor {
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            y: geometry.first_page_top,
            geometry,
            pages: vec![Page::new(0)],
            page_breaks: 0,
            images: BTreeMap::new(),
        }
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn set_y(&mut self, y: f32) {
        self.y = y;
    }

    pub fn advance(&mut self, dy: f32) {
        self.y += dy;
    }

    /// Zero-based index of the page currently being written.
    pub fn page_index(&self) -> usize {
        self.pages.len() - 1
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Number of breaks taken so far, forced or not.
    pub fn page_breaks(&self) -> usize {
        self.page_breaks
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// True when a block of `height` starting at the cursor would cross the
    /// bottom limit.
    pub fn would_overflow(&self, height: f32) -> bool {
        self.y + height > self.geometry.bottom_limit
    }

    /// Starts a fresh page and moves the cursor to the top margin.
    pub fn break_page(&mut self) {
        let index = self.pages.len();
        self.pages.push(Page::new(index));
        self.y = self.geometry.top_margin;
        self.page_breaks += 1;
        log::debug!("Page break: now on page {} (y = {})", index + 1, self.y);
    }

    /// Breaks the page if a block of `height` does not fit. Returns whether a
    /// break happened.
    pub fn ensure_space(&mut self, height: f32) -> bool {
        if self.would_overflow(height) {
            self.break_page();
            true
        } else {
            false
        }
    }

    /// Adds an element to the current page.
    pub fn place(&mut self, element: PositionedElement) {
        if let Some(page) = self.pages.last_mut() {
            page.elements.push(element);
        }
    }

    /// Registers bitmap data for image elements that reference `key`.
    pub fn register_image(&mut self, key: impl Into<String>, image: Arc<EncodedImage>) {
        self.images.insert(key.into(), image);
    }

    pub fn finish(self) -> LaidOutDocument {
        LaidOutDocument {
            geometry: self.geometry,
            pages: self.pages,
            images: self.images,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartspend_types::{Color, FontFace, TextStyle};

    fn style() -> TextStyle {
        TextStyle::new(FontFace::Regular, 10.0, Color::BLACK)
    }

    #[test]
    fn starts_at_first_page_top() {
        let cursor = LayoutCursor::new(PageGeometry::a4());
        assert_eq!(cursor.y(), 20.0);
        assert_eq!(cursor.page_index(), 0);
    }

    #[test]
    fn ensure_space_breaks_only_past_the_bottom_limit() {
        let mut cursor = LayoutCursor::new(PageGeometry::a4());
        cursor.set_y(262.0);
        // 262 + 8 == 270 still fits.
        assert!(!cursor.ensure_space(8.0));
        assert_eq!(cursor.page_count(), 1);

        cursor.set_y(263.0);
        assert!(cursor.ensure_space(8.0));
        assert_eq!(cursor.page_count(), 2);
        assert_eq!(cursor.page_breaks(), 1);
        assert_eq!(cursor.y(), 30.0);
    }

    #[test]
    fn places_elements_on_the_current_page() {
        let mut cursor = LayoutCursor::new(PageGeometry::a4());
        cursor.place(PositionedElement::text(20.0, 40.0, "first", style()));
        cursor.break_page();
        cursor.place(PositionedElement::text(20.0, 40.0, "second", style()));

        let doc = cursor.finish();
        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.page_texts(0), vec!["first"]);
        assert_eq!(doc.page_texts(1), vec!["second"]);
    }

    #[test]
    fn carries_registered_images() {
        let mut cursor = LayoutCursor::new(PageGeometry::a4());
        let img = EncodedImage::new(1, 1, vec![255, 0, 0]).unwrap();
        cursor.register_image("chart-0", Arc::new(img));
        cursor.place(PositionedElement::image(20.0, 50.0, 80.0, 80.0, "chart-0"));

        let doc = cursor.finish();
        assert!(doc.images.contains_key("chart-0"));
        assert_eq!(doc.image_count(), 1);
    }
}
