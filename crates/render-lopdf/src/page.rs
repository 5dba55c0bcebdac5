use crate::error::RenderError;
use lopdf::content::{Content, Operation};
use lopdf::{Object, StringFormat};
use smartspend_layout::{
    ImageElement, LayoutElement, LineElement, MM_PER_PT, PositionedElement, RectElement, TextElement,
};
use smartspend_types::{Color, FontFace, Stroke};
use std::collections::BTreeMap;

fn pt(mm: f32) -> f32 {
    mm / MM_PER_PT
}

fn color_operands(color: Color) -> Vec<Object> {
    color.to_unit().into_iter().map(Object::from).collect()
}

/// Graphics state already emitted on this page, so repeated runs with the
/// same font or colour do not repeat the operators.
#[derive(Default, Clone, PartialEq)]
struct PageRenderState {
    font: Option<(FontFace, f32)>,
    fill_color: Option<Color>,
    stroke_color: Option<Color>,
    line_width: Option<f32>,
}

/// Translates one page of top-left millimetre layout into a PDF content
/// stream in bottom-left point space.
pub struct PageContext<'a> {
    page_height_mm: f32,
    content: Content,
    state: PageRenderState,
    image_names: &'a BTreeMap<String, String>,
}

impl<'a> PageContext<'a> {
    pub fn new(page_height_mm: f32, image_names: &'a BTreeMap<String, String>) -> Self {
        Self {
            page_height_mm,
            content: Content { operations: vec![] },
            state: PageRenderState::default(),
            image_names,
        }
    }

    pub fn finish(self) -> Content {
        self.content
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.content.operations.push(Operation::new(operator, operands));
    }

    /// Converts a top-left y in millimetres to a PDF y in points.
    fn flip(&self, y_mm: f32) -> f32 {
        pt(self.page_height_mm - y_mm)
    }

    pub fn draw_element(&mut self, el: &PositionedElement) -> Result<(), RenderError> {
        match &el.element {
            LayoutElement::Text(text) => self.draw_text(text, el),
            LayoutElement::Rectangle(rect) => self.draw_rect(rect, el),
            LayoutElement::Line(line) => self.draw_line(line, el),
            LayoutElement::Image(image) => self.draw_image(image, el)?,
        }
        Ok(())
    }

    fn set_fill_color(&mut self, color: Color) {
        if self.state.fill_color != Some(color) {
            self.push("rg", color_operands(color));
            self.state.fill_color = Some(color);
        }
    }

    fn set_stroke(&mut self, stroke: &Stroke) {
        if self.state.stroke_color != Some(stroke.color) {
            self.push("RG", color_operands(stroke.color));
            self.state.stroke_color = Some(stroke.color);
        }
        let width = pt(stroke.width);
        if self.state.line_width != Some(width) {
            self.push("w", vec![width.into()]);
            self.state.line_width = Some(width);
        }
    }

    fn set_font(&mut self, face: FontFace, size: f32) {
        if self.state.font != Some((face, size)) {
            self.push("Tf", vec![Object::Name(face.resource_name().as_bytes().to_vec()), size.into()]);
            self.state.font = Some((face, size));
        }
    }

    fn draw_text(&mut self, text: &TextElement, el: &PositionedElement) {
        if text.content.trim().is_empty() {
            return;
        }
        self.push("BT", vec![]);
        self.set_font(text.style.face, text.style.size);
        self.set_fill_color(text.style.color);
        let x = pt(el.left());
        let y = self.flip(el.y);
        self.push("Td", vec![x.into(), y.into()]);
        self.push("Tj", vec![Object::String(to_win_ansi(&text.content), StringFormat::Literal)]);
        self.push("ET", vec![]);
    }

    fn draw_rect(&mut self, rect: &RectElement, el: &PositionedElement) {
        let operator = match (rect.fill, &rect.stroke) {
            (Some(fill), Some(stroke)) => {
                self.set_fill_color(fill);
                self.set_stroke(stroke);
                "B"
            }
            (Some(fill), None) => {
                self.set_fill_color(fill);
                "f"
            }
            (None, Some(stroke)) => {
                self.set_stroke(stroke);
                "S"
            }
            (None, None) => return,
        };
        let bottom = self.flip(el.y + el.height);
        self.push(
            "re",
            vec![pt(el.x).into(), bottom.into(), pt(el.width).into(), pt(el.height).into()],
        );
        self.push(operator, vec![]);
    }

    fn draw_line(&mut self, line: &LineElement, el: &PositionedElement) {
        self.set_stroke(&line.stroke);
        let (x1, y1) = (pt(el.x), self.flip(el.y));
        let (x2, y2) = (pt(el.x + el.width), self.flip(el.y + el.height));
        self.push("m", vec![x1.into(), y1.into()]);
        self.push("l", vec![x2.into(), y2.into()]);
        self.push("S", vec![]);
    }

    fn draw_image(&mut self, image: &ImageElement, el: &PositionedElement) -> Result<(), RenderError> {
        let name = self
            .image_names
            .get(&image.src)
            .ok_or_else(|| RenderError::MissingImage(image.src.clone()))?
            .clone();
        let (w, h) = (pt(el.width), pt(el.height));
        let bottom = self.flip(el.y + el.height);
        self.push("q", vec![]);
        self.push(
            "cm",
            vec![w.into(), 0.into(), 0.into(), h.into(), pt(el.x).into(), bottom.into()],
        );
        self.push("Do", vec![Object::Name(name.into_bytes())]);
        self.push("Q", vec![]);
        Ok(())
    }
}

/// The characters WinAnsiEncoding places in `0x80..=0x9F`. The five unused
/// codes (0x81, 0x8D, 0x8F, 0x90, 0x9D) have no entry.
pub const WIN_ANSI_HIGH: [(char, u8); 27] = [
    ('€', 0x80),
    ('‚', 0x82),
    ('ƒ', 0x83),
    ('„', 0x84),
    ('…', 0x85),
    ('†', 0x86),
    ('‡', 0x87),
    ('ˆ', 0x88),
    ('‰', 0x89),
    ('Š', 0x8A),
    ('‹', 0x8B),
    ('Œ', 0x8C),
    ('Ž', 0x8E),
    ('‘', 0x91),
    ('’', 0x92),
    ('“', 0x93),
    ('”', 0x94),
    ('•', 0x95),
    ('–', 0x96),
    ('—', 0x97),
    ('˜', 0x98),
    ('™', 0x99),
    ('š', 0x9A),
    ('›', 0x9B),
    ('œ', 0x9C),
    ('ž', 0x9E),
    ('Ÿ', 0x9F),
];

/// Encodes text for the standard Type1 fonts' WinAnsiEncoding. Printable
/// Latin-1 maps through unchanged and the `0x80..=0x9F` block goes through
/// [`WIN_ANSI_HIGH`]. C1 controls and anything outside the encoding become '?'.
pub fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| match c as u32 {
            0x00..=0x7F | 0xA0..=0xFF => c as u8,
            _ => WIN_ANSI_HIGH
                .iter()
                .find(|(ch, _)| *ch == c)
                .map_or(b'?', |(_, byte)| *byte),
        })
        .collect()
}

/// Inverse of [`to_win_ansi`] for bytes read back from a content stream.
/// Unused codes decode to U+FFFD.
pub fn from_win_ansi(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| match b {
            0x80..=0x9F => WIN_ANSI_HIGH
                .iter()
                .find(|(_, byte)| *byte == b)
                .map_or(char::REPLACEMENT_CHARACTER, |(ch, _)| *ch),
            b => b as char,
        })
        .collect()
}
