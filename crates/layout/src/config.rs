use serde::{Deserialize, Serialize};

/// Millimetres per PDF point.
pub const MM_PER_PT: f32 = 25.4 / 72.0;

/// Physical page size and the vertical limits the layout cursor enforces.
/// All values are millimetres, measured from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    /// Where writing starts on the first page.
    pub first_page_top: f32,
    /// Where writing resumes after a page break.
    pub top_margin: f32,
    /// A block whose bottom edge would pass this line goes to the next page.
    pub bottom_limit: f32,
}

impl PageGeometry {
    pub const fn a4() -> Self {
        Self {
            width: 210.0,
            height: 297.0,
            first_page_top: 20.0,
            top_margin: 30.0,
            bottom_limit: 270.0,
        }
    }

    pub fn center_x(&self) -> f32 {
        self.width / 2.0
    }

    pub fn width_pt(&self) -> f32 {
        self.width / MM_PER_PT
    }

    pub fn height_pt(&self) -> f32 {
        self.height / MM_PER_PT
    }

    /// Checks the limits are ordered and leave room to write.
    pub fn validate(&self) -> Result<(), String> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(format!(
                "page size must be positive, got {}x{}",
                self.width, self.height
            ));
        }
        if !(self.top_margin < self.bottom_limit && self.bottom_limit <= self.height) {
            return Err(format!(
                "expected top margin ({}) < bottom limit ({}) <= page height ({})",
                self.top_margin, self.bottom_limit, self.height
            ));
        }
        if self.first_page_top >= self.bottom_limit {
            return Err(format!(
                "first page top ({}) must be above the bottom limit ({})",
                self.first_page_top, self.bottom_limit
            ));
        }
        Ok(())
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}
