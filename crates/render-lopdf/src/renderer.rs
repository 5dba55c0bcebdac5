use crate::error::RenderError;
use crate::page::PageContext;
use crate::writer::StreamingPdfWriter;
use lopdf::{Dictionary, Object, StringFormat, Stream, dictionary};
use smartspend_layout::LaidOutDocument;
use smartspend_types::{EncodedImage, FontFace};
use std::collections::BTreeMap;
use std::io::{Cursor, Seek, Write};

/// Turns a laid-out document into PDF bytes.
pub trait DocumentRenderer {
    fn render_to<W: Write + Seek>(&self, document: &LaidOutDocument, writer: W) -> Result<W, RenderError>;

    fn render(&self, document: &LaidOutDocument) -> Result<Vec<u8>, RenderError> {
        Ok(self.render_to(document, Cursor::new(Vec::new()))?.into_inner())
    }
}

/// Renders with the 14 standard Type1 fonts and uncompressed RGB image
/// XObjects, so the output needs no font files.
#[derive(Debug, Clone, Default)]
pub struct LopdfRenderer {
    title: Option<String>,
    producer: Option<String>,
}

impl LopdfRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_producer(mut self, producer: impl Into<String>) -> Self {
        self.producer = Some(producer.into());
        self
    }

    fn font_dictionary() -> Dictionary {
        let mut fonts = Dictionary::new();
        for face in FontFace::ALL {
            let font = dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => face.postscript_name(),
                "Encoding" => "WinAnsiEncoding",
            };
            fonts.set(face.resource_name(), Object::Dictionary(font));
        }
        fonts
    }

    fn image_stream(image: &EncodedImage) -> Stream {
        let dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => image.width as i64,
            "Height" => image.height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
        };
        Stream::new(dict, image.rgb.clone())
    }

    fn info_dictionary(&self) -> Option<Dictionary> {
        if self.title.is_none() && self.producer.is_none() {
            return None;
        }
        let mut info = Dictionary::new();
        if let Some(title) = &self.title {
            info.set("Title", Object::String(crate::page::to_win_ansi(title), StringFormat::Literal));
        }
        if let Some(producer) = &self.producer {
            info.set("Producer", Object::String(crate::page::to_win_ansi(producer), StringFormat::Literal));
        }
        Some(info)
    }
}

impl DocumentRenderer for LopdfRenderer {
    fn render_to<W: Write + Seek>(&self, document: &LaidOutDocument, writer: W) -> Result<W, RenderError> {
        if document.pages.is_empty() {
            return Err(RenderError::EmptyDocument);
        }
        let mut pdf = StreamingPdfWriter::new(writer, "1.7")?;

        // Images go first so every page can reference them by name.
        let mut image_names = BTreeMap::new();
        let mut xobjects = Dictionary::new();
        for (index, (key, image)) in document.images.iter().enumerate() {
            let name = format!("Im{}", index + 1);
            let id = pdf.write_object(Object::Stream(Self::image_stream(image)))?;
            xobjects.set(name.as_bytes(), id);
            image_names.insert(key.clone(), name);
        }

        let (width, height) = (document.geometry.width_pt(), document.geometry.height_pt());
        for page in &document.pages {
            let mut ctx = PageContext::new(document.geometry.height, &image_names);
            for el in &page.elements {
                ctx.draw_element(el)?;
            }
            let content_id = pdf.write_content_stream(ctx.finish())?;
            pdf.write_page(content_id, width, height)?;
        }
        log::debug!(
            "Rendered {} page(s) with {} image(s)",
            pdf.page_count(),
            image_names.len()
        );

        if let Some(info) = self.info_dictionary() {
            pdf.set_info(info);
        }
        let mut resources = dictionary! { "Font" => Self::font_dictionary() };
        if !xobjects.is_empty() {
            resources.set("XObject", xobjects);
        }
        Ok(pdf.finish(resources)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartspend_layout::{LayoutCursor, PageGeometry, PositionedElement};
    use smartspend_types::{Color, Stroke, TextStyle};
    use std::sync::Arc;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    /// Literal strings shown with `Tj` on one page, decoded from WinAnsi.
    fn page_text(doc: &lopdf::Document, page: u32) -> String {
        let page_id = doc.get_pages()[&page];
        let bytes = doc.get_page_content(page_id).unwrap();
        let content = lopdf::content::Content::decode(&bytes).unwrap();
        content
            .operations
            .iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| op.operands.first()?.as_str().ok())
            .map(|raw| raw.iter().map(|&b| if b == 0x80 { '€' } else { b as char }).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn renders_pages_text_and_images() {
        init_logger();
        let mut cursor = LayoutCursor::new(PageGeometry::a4());
        let bold = TextStyle::new(FontFace::Bold, 16.0, Color::rgb(30, 41, 59));
        cursor.place(PositionedElement::text(20.0, 30.0, "Financial Summary", bold));
        cursor.place(PositionedElement::rect(15.0, 40.0, 180.0, 25.0, Some(Color::gray(200)), None));
        cursor.place(PositionedElement::hline(20.0, 190.0, 70.0, Stroke::new(1.0, Color::BLACK)));
        let img = EncodedImage::new(2, 1, vec![255, 0, 0, 0, 0, 255]).unwrap();
        cursor.register_image("chart-0", Arc::new(img));
        cursor.place(PositionedElement::image(20.0, 80.0, 80.0, 80.0, "chart-0"));
        cursor.break_page();
        cursor.place(PositionedElement::text(20.0, 40.0, "Second page", TextStyle::new(FontFace::Regular, 10.0, Color::BLACK)));

        let bytes = LopdfRenderer::new().with_title("Report").render(&cursor.finish()).unwrap();
        let doc = lopdf::Document::load_mem(&bytes).unwrap();

        assert_eq!(doc.get_pages().len(), 2);
        assert!(page_text(&doc, 1).contains("Financial Summary"));
        assert!(page_text(&doc, 2).contains("Second page"));

        let image_count = doc
            .objects
            .values()
            .filter(|obj| {
                obj.as_stream()
                    .ok()
                    .and_then(|s| s.dict.get(b"Subtype").ok())
                    .and_then(|st| st.as_name().ok())
                    == Some(b"Image".as_slice())
            })
            .count();
        assert_eq!(image_count, 1);
    }

    #[test]
    fn empty_documents_are_rejected() {
        let doc = LaidOutDocument {
            geometry: PageGeometry::a4(),
            pages: vec![],
            images: BTreeMap::new(),
        };
        assert!(matches!(LopdfRenderer::new().render(&doc), Err(RenderError::EmptyDocument)));
    }

    #[test]
    fn a4_media_box_in_points() {
        let cursor = LayoutCursor::new(PageGeometry::a4());
        let bytes = LopdfRenderer::new().render(&cursor.finish()).unwrap();
        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        let (_, page_id) = doc.get_pages().into_iter().next().unwrap();
        let media_box = doc.get_dictionary(page_id).unwrap().get(b"MediaBox").unwrap().as_array().unwrap().clone();
        let height = media_box[3].as_float().unwrap();
        assert!((height - 841.89).abs() < 0.01);
    }
}
