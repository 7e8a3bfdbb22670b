use anyhow::{Context, Result};
use bm_core::frame::{FrameBuffer, IndexedImage};
use bm_core::traits::Quantizer;
use imagequant::RGBA;

/// Vitesse libimagequant par défaut (1 = lent/précis, 10 = rapide).
pub const DEFAULT_SPEED: i32 = 4;

/// Quantificateur basé sur libimagequant.
///
/// Sans tramage : une zone de couleur uniforme reste un seul symbole.
///
/// # Example
/// ```
/// use bm_core::frame::FrameBuffer;
/// use bm_core::traits::Quantizer;
/// use bm_quant::quantize::ImageQuantizer;
///
/// let frame = FrameBuffer::new(4, 4);
/// let indexed = ImageQuantizer::default().quantize(&frame, 9).unwrap();
/// assert!(indexed.palette().len() <= 9);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ImageQuantizer {
    speed: i32,
}

impl ImageQuantizer {
    /// Create a quantizer with a libimagequant speed in `1..=10`.
    #[must_use]
    pub fn with_speed(speed: i32) -> Self {
        Self {
            speed: speed.clamp(1, 10),
        }
    }
}

impl Default for ImageQuantizer {
    fn default() -> Self {
        Self::with_speed(DEFAULT_SPEED)
    }
}

impl Quantizer for ImageQuantizer {
    fn quantize(&self, frame: &FrameBuffer, max_colors: usize) -> Result<IndexedImage> {
        if max_colors == 0 {
            anyhow::bail!("Au moins une couleur est requise");
        }
        if max_colors == 1 {
            // libimagequant refuse moins de 2 couleurs.
            return Ok(single_color(frame)?);
        }

        let pixels: Vec<RGBA> = frame
            .data
            .chunks_exact(4)
            .map(|p| RGBA {
                r: p[0],
                g: p[1],
                b: p[2],
                a: p[3],
            })
            .collect();

        let mut liq = imagequant::new();
        liq.set_speed(self.speed).context("libimagequant : vitesse")?;
        liq.set_quality(0, 100).context("libimagequant : qualité")?;
        liq.set_max_colors(max_colors.min(256) as u32)
            .context("libimagequant : nombre de couleurs")?;

        let mut img = liq
            .new_image(pixels, frame.width as usize, frame.height as usize, 0.0)
            .context("libimagequant : image")?;
        let mut res = liq.quantize(&mut img).context("Quantification échouée")?;
        res.set_dithering_level(0.0)
            .context("libimagequant : tramage")?;
        let (palette, indexes) = res.remapped(&mut img).context("Remappage échoué")?;

        log::debug!(
            "Quantifié {}×{} en {} couleurs (max {max_colors})",
            frame.width,
            frame.height,
            palette.len()
        );

        let palette = palette.iter().map(|c| [c.r, c.g, c.b, c.a]).collect();
        Ok(IndexedImage::new(
            frame.width,
            frame.height,
            palette,
            indexes,
        )?)
    }

    fn name(&self) -> &'static str {
        "libimagequant"
    }
}

/// Palette d'une seule couleur : la moyenne de la frame.
fn single_color(frame: &FrameBuffer) -> Result<IndexedImage, bm_core::CoreError> {
    let count = (frame.width as usize * frame.height as usize).max(1) as u64;
    let mut sums = [0u64; 4];
    for px in frame.data.chunks_exact(4) {
        for (sum, &c) in sums.iter_mut().zip(px) {
            *sum += u64::from(c);
        }
    }
    let mean = sums.map(|s| (s / count) as u8);
    IndexedImage::new(
        frame.width,
        frame.height,
        vec![mean],
        vec![0; frame.width as usize * frame.height as usize],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> FrameBuffer {
        let mut fb = FrameBuffer::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let idx = ((y * width + x) * 4) as usize;
                let v = (x * 255 / (width - 1)) as u8;
                fb.data[idx..idx + 4].copy_from_slice(&[v, v / 2, 255 - v, 255]);
            }
        }
        fb
    }

    #[test]
    fn palette_is_bounded_by_max_colors() {
        let frame = gradient(64, 8);
        for max in [2, 4, 9, 16] {
            let img = ImageQuantizer::default().quantize(&frame, max).unwrap();
            assert!(img.palette().len() <= max, "{} > {max}", img.palette().len());
            assert_eq!(img.pixels().len(), 64 * 8);
        }
    }

    #[test]
    fn two_flat_colors_stay_separate() {
        let mut frame = FrameBuffer::new(4, 1);
        for (i, px) in frame.data.chunks_exact_mut(4).enumerate() {
            let v = if i < 2 { 0 } else { 255 };
            px.copy_from_slice(&[v, v, v, 255]);
        }
        let img = ImageQuantizer::default().quantize(&frame, 4).unwrap();
        let p = img.pixels();
        assert_eq!(p[0], p[1]);
        assert_eq!(p[2], p[3]);
        assert_ne!(p[0], p[2]);
    }

    #[test]
    fn quantization_is_deterministic() {
        let frame = gradient(32, 4);
        let q = ImageQuantizer::default();
        let a = q.quantize(&frame, 6).unwrap();
        let b = q.quantize(&frame, 6).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn single_color_palette_averages() {
        let mut frame = FrameBuffer::new(2, 1);
        frame.data.copy_from_slice(&[0, 0, 0, 255, 200, 100, 50, 255]);
        let img = ImageQuantizer::default().quantize(&frame, 1).unwrap();
        assert_eq!(img.palette(), &[[100, 50, 25, 255]]);
        assert_eq!(img.pixels(), &[0, 0]);
    }

    #[test]
    fn zero_colors_is_an_error() {
        assert!(ImageQuantizer::default().quantize(&FrameBuffer::new(1, 1), 0).is_err());
    }
}
