use std::fmt;

/// A decoded raster ready to be written as a PDF image XObject:
/// 8 bits per channel, DeviceRGB, rows top to bottom.
#[derive(Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
}

impl EncodedImage {
    /// Returns `None` when the buffer length does not match `width * height * 3`.
    pub fn new(width: u32, height: u32, rgb: Vec<u8>) -> Option<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(3)?;
        if width == 0 || height == 0 || rgb.len() != expected {
            return None;
        }
        Some(Self { width, height, rgb })
    }
}

impl fmt::Debug for EncodedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.rgb.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_mismatched_buffers() {
        assert!(EncodedImage::new(2, 2, vec![0; 12]).is_some());
        assert!(EncodedImage::new(2, 2, vec![0; 11]).is_none());
        assert!(EncodedImage::new(0, 2, vec![]).is_none());
    }
}
