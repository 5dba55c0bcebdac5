use crate::config::MM_PER_PT;
use smartspend_types::{Color, Stroke, TextAlign, TextStyle};

/// Average Helvetica advance as a fraction of the font size. Good enough for
/// centring and right-aligning short labels without font metrics.
const AVG_CHAR_WIDTH_EM: f32 = 0.5;

/// Approximate rendered width of `text` in millimetres.
pub fn approx_text_width(text: &str, size_pt: f32) -> f32 {
    text.chars().count() as f32 * size_pt * AVG_CHAR_WIDTH_EM * MM_PER_PT
}

#[derive(Clone, Debug, PartialEq)]
pub enum LayoutElement {
    Text(TextElement),
    Rectangle(RectElement),
    Line(LineElement),
    Image(ImageElement),
}

/// A single line of text. The owning element's `y` is the baseline and `x` is
/// the anchor named by the style's alignment.
#[derive(Clone, Debug, PartialEq)]
pub struct TextElement {
    pub content: String,
    pub style: TextStyle,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RectElement {
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
}

/// A straight rule from `(x, y)` to `(x + width, y + height)`.
#[derive(Clone, Debug, PartialEq)]
pub struct LineElement {
    pub stroke: Stroke,
}

/// References an entry of the document's image store.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageElement {
    pub src: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PositionedElement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub element: LayoutElement,
}

impl PositionedElement {
    pub fn text(x: f32, y: f32, content: impl Into<String>, style: TextStyle) -> Self {
        let content = content.into();
        let width = approx_text_width(&content, style.size);
        Self {
            x,
            y,
            width,
            height: style.size * MM_PER_PT,
            element: LayoutElement::Text(TextElement { content, style }),
        }
    }

    pub fn rect(x: f32, y: f32, width: f32, height: f32, fill: Option<Color>, stroke: Option<Stroke>) -> Self {
        Self {
            x,
            y,
            width,
            height,
            element: LayoutElement::Rectangle(RectElement { fill, stroke }),
        }
    }

    pub fn filled_rect(x: f32, y: f32, width: f32, height: f32, fill: Color) -> Self {
        Self::rect(x, y, width, height, Some(fill), None)
    }

    pub fn hline(x1: f32, x2: f32, y: f32, stroke: Stroke) -> Self {
        Self {
            x: x1,
            y,
            width: x2 - x1,
            height: 0.0,
            element: LayoutElement::Line(LineElement { stroke }),
        }
    }

    pub fn image(x: f32, y: f32, width: f32, height: f32, src: impl Into<String>) -> Self {
        Self {
            x,
            y,
            width,
            height,
            element: LayoutElement::Image(ImageElement { src: src.into() }),
        }
    }

    pub fn as_text(&self) -> Option<&TextElement> {
        match &self.element {
            LayoutElement::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Left edge of the element once its alignment is applied.
    pub fn left(&self) -> f32 {
        match &self.element {
            LayoutElement::Text(t) => match t.style.align {
                TextAlign::Left => self.x,
                TextAlign::Center => self.x - self.width / 2.0,
                TextAlign::Right => self.x - self.width,
            },
            _ => self.x,
        }
    }
}
