use anyhow::{Context, Result};
use bm_core::config::Generator;
use bm_core::frame::{FrameBuffer, IndexedImage};
use bm_core::symbols::SymbolTable;
use bm_core::traits::Quantizer;
use bm_render::RenderContext;
use bm_source::{prepare_size, resize_frame};

/// Résultat d'une génération : le source émis et l'image quantifiée.
pub struct Build {
    /// Source C++ ou JS, sans saut de ligne final ajouté.
    pub text: String,
    /// Image après redimensionnement et quantification.
    pub indexed: IndexedImage,
}

/// Resize, quantize, rank, map and render one frame.
///
/// # Errors
/// Returns an error if resizing or quantization fails, if the image uses
/// more colors than the palette has entries, or if rendering fails.
pub fn build<Q: Quantizer + ?Sized>(
    frame: &FrameBuffer,
    generator: &Generator,
    quantizer: &Q,
) -> Result<Build> {
    let resized;
    let frame = match prepare_size(
        generator.target_width,
        generator.target_height,
        (frame.width, frame.height),
    ) {
        Some((w, h)) => {
            resized = resize_frame(frame, w, h, generator.scaler)?;
            &resized
        }
        None => frame,
    };

    let indexed = quantizer
        .quantize(frame, generator.palette.len())
        .with_context(|| format!("Quantification ({})", quantizer.name()))?;
    let ranked = bm_quant::rank_by_intensity(&indexed, generator.invert);
    let symbols = SymbolTable::build(&ranked, &generator.palette)?;

    let text = bm_render::render(&RenderContext {
        image: &indexed,
        symbols: &symbols,
        generator,
    })?;
    Ok(Build { text, indexed })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use bm_core::config::Renderer;
    use bm_core::palette::Palette;
    use bm_quant::ImageQuantizer;

    /// 4×2 : deux colonnes noires puis deux blanches.
    pub(crate) fn black_white() -> FrameBuffer {
        let mut frame = FrameBuffer::new(4, 2);
        for (i, px) in frame.data.chunks_exact_mut(4).enumerate() {
            let v = if i % 4 < 2 { 0 } else { 255 };
            px.copy_from_slice(&[v, v, v, 255]);
        }
        frame
    }

    fn gradient(width: u32, height: u32) -> FrameBuffer {
        let mut frame = FrameBuffer::new(width, height);
        for (i, px) in frame.data.chunks_exact_mut(4).enumerate() {
            let x = (i as u32 % width) * 255 / width;
            let y = (i as u32 / width) * 255 / height;
            px.copy_from_slice(&[x as u8, y as u8, 128, 255]);
        }
        frame
    }

    #[test]
    fn darkest_gets_first_symbol() {
        let generator = Generator {
            renderer: Renderer::Js,
            ..Generator::default()
        };
        let built = build(&black_white(), &generator, &ImageQuantizer::default()).unwrap();
        assert!(built.text.contains("    _,_,c,c,\n"), "{}", built.text);
        assert!(built.text.contains("const _=0, c=1;"), "{}", built.text);
    }

    #[test]
    fn invert_swaps_symbols() {
        let generator = Generator {
            renderer: Renderer::Js,
            invert: true,
            ..Generator::default()
        };
        let built = build(&black_white(), &generator, &ImageQuantizer::default()).unwrap();
        assert!(built.text.contains("    c,c,_,_,\n"), "{}", built.text);
    }

    #[test]
    fn symbol_count_is_bounded_by_palette() {
        let generator = Generator {
            palette: "abcd".parse::<Palette>().unwrap(),
            renderer: Renderer::Js,
            ..Generator::default()
        };
        let built = build(&gradient(32, 16), &generator, &ImageQuantizer::default()).unwrap();

        // Lignes de pixels du tableau plat : "    a,b,c,".
        let rows: Vec<&str> = built
            .text
            .lines()
            .filter(|l| l.starts_with("    ") && l.ends_with(','))
            .collect();
        assert_eq!(rows.len(), 16);
        let symbols: std::collections::BTreeSet<&str> = rows
            .iter()
            .flat_map(|l| l.trim().split(','))
            .filter(|s| !s.is_empty())
            .collect();
        assert!(!symbols.is_empty());
        assert!(symbols.len() <= 4, "{symbols:?}");
        assert!(symbols.iter().all(|s| ["a", "b", "c", "d"].contains(s)));
    }

    #[test]
    fn resize_applies_before_quantization() {
        let generator = Generator {
            target_width: 8,
            target_height: 0,
            ..Generator::default()
        };
        let built = build(&gradient(32, 16), &generator, &ImageQuantizer::default()).unwrap();
        assert_eq!((built.indexed.width(), built.indexed.height()), (8, 4));
        assert!(built.text.contains("std::array<uint8_t, 8*4>"), "{}", built.text);
    }

    #[test]
    fn builds_are_deterministic() {
        let generator = Generator::default();
        let frame = gradient(24, 12);
        let q = ImageQuantizer::default();
        let a = build(&frame, &generator, &q).unwrap();
        let b = build(&frame, &generator, &q).unwrap();
        assert_eq!(a.text, b.text);
    }

    #[test]
    fn single_symbol_palette_flattens_image() {
        let generator = Generator {
            palette: "o".parse::<Palette>().unwrap(),
            renderer: Renderer::Js,
            ..Generator::default()
        };
        let built = build(&black_white(), &generator, &ImageQuantizer::default()).unwrap();
        assert!(built.text.contains("    o,o,o,o,\n"), "{}", built.text);
    }
}
