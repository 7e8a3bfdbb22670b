use anyhow::Result;

use crate::frame::{FrameBuffer, IndexedImage};

/// Réduit une frame RGBA à une image indexée d'au plus `max_colors` couleurs.
///
/// Implémenté par : `ImageQuantizer` (libimagequant).
///
/// # Example
/// ```
/// use anyhow::Result;
/// use bm_core::frame::{FrameBuffer, IndexedImage};
/// use bm_core::traits::Quantizer;
///
/// /// Tout pixel devient l'index 0.
/// struct Flat;
/// impl Quantizer for Flat {
///     fn quantize(&self, frame: &FrameBuffer, _max_colors: usize) -> Result<IndexedImage> {
///         let n = frame.width as usize * frame.height as usize;
///         Ok(IndexedImage::new(frame.width, frame.height, vec![[0; 4]], vec![0; n])?)
///     }
///     fn name(&self) -> &'static str { "flat" }
/// }
///
/// let img = Flat.quantize(&FrameBuffer::new(2, 2), 4).unwrap();
/// assert_eq!(img.pixels(), &[0, 0, 0, 0]);
/// ```
pub trait Quantizer {
    /// Quantize `frame`.
    ///
    /// CONTRAT : la palette retournée a au plus `max_colors` entrées.
    ///
    /// # Errors
    /// Propagates the backend's failure unchanged in kind.
    fn quantize(&self, frame: &FrameBuffer, max_colors: usize) -> Result<IndexedImage>;

    /// Nom lisible pour les logs.
    fn name(&self) -> &'static str;
}
