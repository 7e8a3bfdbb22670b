use bm_core::color::hsp_intensity;
use bm_core::frame::IndexedImage;

/// Indices de palette réellement présents dans l'image, par ordre croissant.
///
/// Les entrées inutilisées de la palette du quantificateur sont écartées :
/// le nombre de symboles émis reste borné par ce qui est visible.
///
/// # Example
/// ```
/// use bm_core::frame::IndexedImage;
/// use bm_quant::intensity::used_palette_indexes;
/// let img = IndexedImage::new(3, 1, vec![[0; 4]; 4], vec![3, 1, 3]).unwrap();
/// assert_eq!(used_palette_indexes(&img), vec![1, 3]);
/// ```
#[must_use]
pub fn used_palette_indexes(image: &IndexedImage) -> Vec<u8> {
    let mut found = [false; 256];
    for &index in image.pixels() {
        found[usize::from(index)] = true;
    }
    (0..=u8::MAX).filter(|&i| found[usize::from(i)]).collect()
}

/// Trie les indices utilisés par intensité HSP croissante (décroissante si
/// `invert`). Le rang dans le résultat est le rang d'intensité.
///
/// À intensité égale, l'index de palette le plus petit passe en premier,
/// dans les deux sens.
///
/// # Example
/// ```
/// use bm_core::frame::IndexedImage;
/// use bm_quant::intensity::rank_by_intensity;
/// let palette = vec![[255, 255, 255, 255], [0, 0, 0, 255], [128, 128, 128, 255]];
/// let img = IndexedImage::new(3, 1, palette, vec![0, 1, 2]).unwrap();
/// assert_eq!(rank_by_intensity(&img, false), vec![1, 2, 0]);
/// assert_eq!(rank_by_intensity(&img, true), vec![0, 2, 1]);
/// ```
#[must_use]
pub fn rank_by_intensity(image: &IndexedImage, invert: bool) -> Vec<u8> {
    let palette = image.palette();
    let mut keyed: Vec<(u8, f64)> = used_palette_indexes(image)
        .into_iter()
        .map(|index| (index, hsp_intensity(palette[usize::from(index)])))
        .collect();

    // Tri stable sur une liste déjà croissante par index.
    keyed.sort_by(|(_, a), (_, b)| if invert { b.total_cmp(a) } else { a.total_cmp(b) });

    keyed.into_iter().map(|(index, _)| index).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grey_image(levels: &[u8], pixels: Vec<u8>) -> IndexedImage {
        let palette = levels.iter().map(|&v| [v, v, v, 255]).collect();
        let len = pixels.len() as u32;
        IndexedImage::new(len, 1, palette, pixels).unwrap()
    }

    fn intensities(image: &IndexedImage, ranked: &[u8]) -> Vec<f64> {
        ranked
            .iter()
            .map(|&i| hsp_intensity(image.palette()[usize::from(i)]))
            .collect()
    }

    #[test]
    fn ascending_ranking_is_monotonic() {
        let img = grey_image(&[90, 10, 250, 0, 170], vec![0, 1, 2, 3, 4, 4, 2]);
        let ranked = rank_by_intensity(&img, false);
        assert_eq!(ranked, vec![3, 1, 0, 4, 2]);
        let values = intensities(&img, &ranked);
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn inverted_ranking_is_reversed() {
        let img = grey_image(&[90, 10, 250, 0, 170], vec![0, 1, 2, 3, 4]);
        let ranked = rank_by_intensity(&img, true);
        assert_eq!(ranked, vec![2, 4, 0, 1, 3]);
        let values = intensities(&img, &ranked);
        assert!(values.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn unused_palette_slots_are_dropped() {
        let img = grey_image(&[0, 50, 100, 150, 200, 250], vec![5, 1, 1, 5]);
        assert_eq!(rank_by_intensity(&img, false), vec![1, 5]);
    }

    #[test]
    fn ties_break_by_palette_index_both_ways() {
        // 3 et 1 ont la même couleur.
        let img = grey_image(&[200, 40, 0, 40], vec![0, 1, 2, 3]);
        assert_eq!(rank_by_intensity(&img, false), vec![2, 1, 3, 0]);
        assert_eq!(rank_by_intensity(&img, true), vec![0, 1, 3, 2]);
    }

    #[test]
    fn green_outranks_red_outranks_blue() {
        let palette = vec![[0, 0, 255, 255], [0, 255, 0, 255], [255, 0, 0, 255]];
        let img = IndexedImage::new(3, 1, palette, vec![0, 1, 2]).unwrap();
        assert_eq!(rank_by_intensity(&img, false), vec![0, 2, 1]);
    }
}
