use crate::error::CoreError;
use crate::palette::MAX_ENTRIES;

/// Buffer de pixels RGBA, row-major, 4 bytes par pixel.
///
/// # Example
/// ```
/// use bm_core::frame::FrameBuffer;
/// let fb = FrameBuffer::new(10, 10);
/// assert_eq!(fb.data.len(), 400);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    /// Pixels RGBA, row-major, 4 bytes par pixel.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl FrameBuffer {
    /// Crée un buffer transparent aux dimensions données.
    ///
    /// # Example
    /// ```
    /// use bm_core::frame::FrameBuffer;
    /// let fb = FrameBuffer::new(100, 50);
    /// assert_eq!(fb.width, 100);
    /// assert_eq!(fb.height, 50);
    /// assert_eq!(fb.data.len(), 100 * 50 * 4);
    /// ```
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; width as usize * height as usize * 4],
            width,
            height,
        }
    }

    /// Accès au pixel (x, y) → [r, g, b, a]. Hors limites → transparent.
    ///
    /// # Example
    /// ```
    /// use bm_core::frame::FrameBuffer;
    /// let mut fb = FrameBuffer::new(2, 1);
    /// fb.data[4..8].copy_from_slice(&[1, 2, 3, 4]);
    /// assert_eq!(fb.pixel(1, 0), [1, 2, 3, 4]);
    /// assert_eq!(fb.pixel(5, 5), [0, 0, 0, 0]);
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        if x >= self.width || y >= self.height {
            return [0, 0, 0, 0];
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }

    /// Copie le rectangle (x, y, w, h) intersecté avec le buffer.
    ///
    /// # Errors
    /// Returns `InvalidDimensions` if the intersection is empty.
    ///
    /// # Example
    /// ```
    /// use bm_core::frame::FrameBuffer;
    /// let fb = FrameBuffer::new(10, 10);
    /// let sub = fb.crop(8, 2, 5, 3).unwrap();
    /// assert_eq!((sub.width, sub.height), (2, 3));
    /// assert!(fb.crop(10, 0, 1, 1).is_err());
    /// ```
    pub fn crop(&self, x: u32, y: u32, w: u32, h: u32) -> Result<Self, CoreError> {
        let x0 = x.min(self.width);
        let y0 = y.min(self.height);
        let x1 = x.saturating_add(w).min(self.width);
        let y1 = y.saturating_add(h).min(self.height);
        if x1 <= x0 || y1 <= y0 {
            return Err(CoreError::InvalidDimensions {
                width: x1.saturating_sub(x0),
                height: y1.saturating_sub(y0),
            });
        }

        let (cw, ch) = (x1 - x0, y1 - y0);
        let stride = self.width as usize * 4;
        let row_len = cw as usize * 4;
        let mut data = Vec::with_capacity(row_len * ch as usize);
        for row in y0..y1 {
            let start = row as usize * stride + x0 as usize * 4;
            data.extend_from_slice(&self.data[start..start + row_len]);
        }
        Ok(Self {
            data,
            width: cw,
            height: ch,
        })
    }
}

/// Image indexée : chaque pixel est un index dans une palette RGBA.
///
/// Invariant : tout index présent est `< palette.len()`, et la palette
/// tient dans un octet.
///
/// # Example
/// ```
/// use bm_core::frame::IndexedImage;
/// let img = IndexedImage::new(2, 1, vec![[0, 0, 0, 255], [255; 4]], vec![1, 0]).unwrap();
/// assert_eq!(img.index_at(0, 0), 1);
/// assert!(IndexedImage::new(1, 1, vec![[0; 4]], vec![3]).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexedImage {
    width: u32,
    height: u32,
    palette: Vec<[u8; 4]>,
    pixels: Vec<u8>,
}

impl IndexedImage {
    /// Build an indexed image, checking the palette invariant.
    ///
    /// # Errors
    /// Returns an error for zero dimensions, a pixel count that does not
    /// match, an oversized palette, or an index outside the palette.
    pub fn new(
        width: u32,
        height: u32,
        palette: Vec<[u8; 4]>,
        pixels: Vec<u8>,
    ) -> Result<Self, CoreError> {
        if width == 0 || height == 0 || pixels.len() != width as usize * height as usize {
            return Err(CoreError::InvalidDimensions { width, height });
        }
        if palette.len() > MAX_ENTRIES {
            return Err(CoreError::Config(format!(
                "palette du quantificateur trop grande : {}",
                palette.len()
            )));
        }
        if let Some(&index) = pixels.iter().find(|&&i| usize::from(i) >= palette.len()) {
            return Err(CoreError::IndexOutOfPalette {
                index,
                len: palette.len(),
            });
        }
        Ok(Self {
            width,
            height,
            palette,
            pixels,
        })
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Couleurs RGBA de la palette du quantificateur.
    #[must_use]
    pub fn palette(&self) -> &[[u8; 4]] {
        &self.palette
    }

    /// Indices, row-major.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    #[inline(always)]
    #[must_use]
    pub fn index_at(&self, x: u32, y: u32) -> u8 {
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// Rows of indices, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.pixels.chunks_exact(self.width as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(width: u32, height: u32) -> FrameBuffer {
        let mut fb = FrameBuffer::new(width, height);
        for (i, px) in fb.data.chunks_exact_mut(4).enumerate() {
            px.copy_from_slice(&[i as u8, 0, 0, 255]);
        }
        fb
    }

    #[test]
    fn crop_copies_the_right_pixels() {
        let fb = numbered(4, 3);
        let sub = fb.crop(1, 1, 2, 2).unwrap();
        assert_eq!((sub.width, sub.height), (2, 2));
        assert_eq!(sub.pixel(0, 0)[0], 5);
        assert_eq!(sub.pixel(1, 0)[0], 6);
        assert_eq!(sub.pixel(0, 1)[0], 9);
        assert_eq!(sub.pixel(1, 1)[0], 10);
    }

    #[test]
    fn crop_is_clipped_to_bounds() {
        let fb = numbered(4, 3);
        let sub = fb.crop(3, 2, 100, 100).unwrap();
        assert_eq!((sub.width, sub.height), (1, 1));
        assert_eq!(sub.pixel(0, 0)[0], 11);
    }

    #[test]
    fn crop_outside_or_empty_fails() {
        let fb = numbered(4, 3);
        assert!(fb.crop(4, 0, 1, 1).is_err());
        assert!(fb.crop(0, 0, 0, 3).is_err());
        assert!(fb.crop(u32::MAX, u32::MAX, u32::MAX, 1).is_err());
    }

    #[test]
    fn indexed_rows_follow_width() {
        let img = IndexedImage::new(3, 2, vec![[0; 4]; 2], vec![0, 1, 0, 1, 1, 0]).unwrap();
        let rows: Vec<&[u8]> = img.rows().collect();
        assert_eq!(rows, vec![&[0u8, 1, 0][..], &[1u8, 1, 0][..]]);
        assert_eq!(img.index_at(2, 1), 0);
    }

    #[test]
    fn indexed_rejects_bad_shapes() {
        assert!(IndexedImage::new(0, 1, vec![[0; 4]], vec![]).is_err());
        assert!(IndexedImage::new(2, 2, vec![[0; 4]], vec![0; 3]).is_err());
        assert!(IndexedImage::new(1, 1, vec![[0; 4]; 257], vec![0]).is_err());
    }
}
