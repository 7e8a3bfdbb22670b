use crate::error::CoreError;
use crate::frame::IndexedImage;
use crate::palette::{Palette, PaletteEntry};

/// Lookup table mapping a quantizer palette index [0..255] → output symbol.
///
/// Built fresh per image from the intensity ranking: the i-th least intense
/// color used in the image gets the i-th palette entry.
///
/// # Example
/// ```
/// use bm_core::palette::Palette;
/// use bm_core::symbols::SymbolTable;
/// let palette: Palette = "abc".parse().unwrap();
/// // Index 7 is the darkest used color, index 2 the brightest.
/// let table = SymbolTable::build(&[7, 2], &palette).unwrap();
/// assert_eq!(table.get(7).unwrap().ch, 'a');
/// assert_eq!(table.get(2).unwrap().ch, 'b');
/// assert!(table.get(0).is_none());
/// ```
#[derive(Clone, Debug)]
pub struct SymbolTable {
    ranks: [Option<u8>; 256],
    ranked: Vec<PaletteEntry>,
}

impl SymbolTable {
    /// Bind each ranked palette index to the palette entry at the same rank.
    ///
    /// # Errors
    /// Returns `PaletteTooSmall` if more colors are ranked than the palette
    /// has entries.
    pub fn build(ranked_indexes: &[u8], palette: &Palette) -> Result<Self, CoreError> {
        if ranked_indexes.len() > palette.len() {
            return Err(CoreError::PaletteTooSmall {
                used: ranked_indexes.len(),
                available: palette.len(),
            });
        }

        let mut ranks = [None; 256];
        for (rank, &index) in ranked_indexes.iter().enumerate() {
            ranks[usize::from(index)] = Some(rank as u8);
        }
        let ranked = palette.entries()[..ranked_indexes.len()].to_vec();
        Ok(Self { ranks, ranked })
    }

    /// Symbol for a quantizer palette index, if that index was ranked.
    #[inline(always)]
    #[must_use]
    pub fn get(&self, index: u8) -> Option<PaletteEntry> {
        self.ranks[usize::from(index)].map(|rank| self.ranked[usize::from(rank)])
    }

    /// One entry per ranked color, least intense first.
    #[must_use]
    pub fn ranked(&self) -> &[PaletteEntry] {
        &self.ranked
    }

    /// Entries that actually appear in `image`, in rank order.
    ///
    /// Used by dialects that only declare constants for symbols present
    /// in the output.
    #[must_use]
    pub fn used_symbols(&self, image: &IndexedImage) -> Vec<PaletteEntry> {
        let mut seen = [false; 256];
        for &index in image.pixels() {
            if let Some(rank) = self.ranks[usize::from(index)] {
                seen[usize::from(rank)] = true;
            }
        }
        self.ranked
            .iter()
            .enumerate()
            .filter(|&(rank, _)| seen[rank])
            .map(|(_, &entry)| entry)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(pixels: Vec<u8>) -> IndexedImage {
        let len = pixels.len() as u32;
        IndexedImage::new(len, 1, vec![[0; 4]; 8], pixels).unwrap()
    }

    #[test]
    fn ranks_bind_to_palette_order() {
        let palette: Palette = "o=10,x=20,X=30".parse().unwrap();
        let table = SymbolTable::build(&[5, 0, 3], &palette).unwrap();
        assert_eq!(table.get(5), Some(PaletteEntry { ch: 'o', value: 10 }));
        assert_eq!(table.get(0), Some(PaletteEntry { ch: 'x', value: 20 }));
        assert_eq!(table.get(3), Some(PaletteEntry { ch: 'X', value: 30 }));
        assert_eq!(table.ranked().len(), 3);
    }

    #[test]
    fn fewer_colors_than_palette_uses_lowest_ranks() {
        let palette: Palette = "abcdef".parse().unwrap();
        let table = SymbolTable::build(&[1, 4], &palette).unwrap();
        let chars: String = table.ranked().iter().map(|e| e.ch).collect();
        assert_eq!(chars, "ab");
    }

    #[test]
    fn too_many_colors_is_an_error() {
        let palette: Palette = "ab".parse().unwrap();
        let err = SymbolTable::build(&[0, 1, 2], &palette).unwrap_err();
        assert!(matches!(
            err,
            CoreError::PaletteTooSmall {
                used: 3,
                available: 2
            }
        ));
    }

    #[test]
    fn used_symbols_only_lists_present_ranks() {
        let palette: Palette = "abc".parse().unwrap();
        let table = SymbolTable::build(&[2, 6, 4], &palette).unwrap();
        let img = image(vec![4, 4, 2, 4]);
        let used: String = table.used_symbols(&img).iter().map(|e| e.ch).collect();
        assert_eq!(used, "ac");
    }
}
