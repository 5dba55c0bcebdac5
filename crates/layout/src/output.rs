//! The output of the layout pass: pages of absolutely positioned elements
//! plus the bitmap store the image elements point into.

use crate::config::PageGeometry;
use crate::elements::{LayoutElement, PositionedElement};
use smartspend_types::EncodedImage;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Page {
    pub index: usize,
    pub elements: Vec<PositionedElement>,
}

impl Page {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            elements: Vec::new(),
        }
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.elements
            .iter()
            .filter_map(|el| el.as_text().map(|t| t.content.as_str()))
    }
}

/// A fully laid-out report, ready for a renderer.
#[derive(Debug, Clone)]
pub struct LaidOutDocument {
    pub geometry: PageGeometry,
    pub pages: Vec<Page>,
    pub images: BTreeMap<String, Arc<EncodedImage>>,
}

impl LaidOutDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Text runs of one page in placement order. Empty for an unknown page.
    pub fn page_texts(&self, index: usize) -> Vec<&str> {
        self.pages
            .get(index)
            .map(|p| p.texts().collect())
            .unwrap_or_default()
    }

    /// Every text run of the document in placement order.
    pub fn all_texts(&self) -> Vec<&str> {
        self.pages.iter().flat_map(Page::texts).collect()
    }

    /// Number of image elements placed across all pages.
    pub fn image_count(&self) -> usize {
        self.pages
            .iter()
            .flat_map(|p| &p.elements)
            .filter(|el| matches!(el.element, LayoutElement::Image(_)))
            .count()
    }

    /// Index of the first page holding a text run equal to `needle`.
    pub fn find_text_page(&self, needle: &str) -> Option<usize> {
        self.pages
            .iter()
            .position(|p| p.texts().any(|t| t == needle))
    }
}
