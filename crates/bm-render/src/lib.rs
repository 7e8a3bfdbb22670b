/// Source-code dialects for img2bitmap.
///
/// Serializes an indexed image and its symbol table as C++ or JavaScript.

pub mod cpp;
pub mod cpp17;
pub mod js;

use anyhow::Result;
use bm_core::config::{Generator, Renderer};
use bm_core::frame::IndexedImage;
use bm_core::palette::PaletteEntry;
use bm_core::symbols::SymbolTable;

/// Everything a dialect needs for one build.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    /// Image quantifiée.
    pub image: &'a IndexedImage,
    /// Index de palette → symbole.
    pub symbols: &'a SymbolTable,
    /// Configuration effective.
    pub generator: &'a Generator,
}

impl RenderContext<'_> {
    /// Symbol for a pixel index.
    ///
    /// # Errors
    /// Returns an error if the index was never ranked.
    fn symbol(&self, index: u8) -> Result<PaletteEntry> {
        self.symbols
            .get(index)
            .ok_or_else(|| anyhow::anyhow!("Index {index} sans symbole"))
    }

    /// `<w>*<h>`, la taille du tableau C++.
    fn size_expr(&self) -> String {
        format!("{}*{}", self.image.width(), self.image.height())
    }

    /// Écrit chaque ligne de pixels : `indent`, puis `c,` par pixel.
    fn write_rows(&self, out: &mut String, indent: &str, open: &str, close: &str) -> Result<()> {
        for row in self.image.rows() {
            out.push_str(indent);
            out.push_str(open);
            for &index in row {
                out.push(self.symbol(index)?.ch);
                out.push(',');
            }
            out.push_str(close);
            out.push('\n');
        }
        Ok(())
    }
}

/// `a=0, b=1` — déclarations des constantes, valeurs décalées.
fn declarations(entries: &[PaletteEntry], offset: i32) -> String {
    entries
        .iter()
        .map(|e| format!("{}={}", e.ch, e.value_with_offset(offset)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render `ctx` in the dialect selected by its generator.
///
/// # Errors
/// Returns an error if a pixel index has no symbol or formatting fails.
///
/// # Example
/// ```
/// use bm_core::config::{Generator, Renderer};
/// use bm_core::frame::IndexedImage;
/// use bm_core::symbols::SymbolTable;
/// use bm_render::{RenderContext, render};
///
/// let image = IndexedImage::new(2, 1, vec![[0, 0, 0, 255], [255; 4]], vec![1, 0]).unwrap();
/// let generator = Generator { renderer: Renderer::Js, ..Generator::default() };
/// let symbols = SymbolTable::build(&[0, 1], &generator.palette).unwrap();
/// let text = render(&RenderContext { image: &image, symbols: &symbols, generator: &generator }).unwrap();
/// assert!(text.contains("    c,_,\n"));
/// ```
pub fn render(ctx: &RenderContext<'_>) -> Result<String> {
    let mut out = String::new();
    match ctx.generator.renderer {
        Renderer::Cpp17 => cpp17::render(ctx, &mut out)?,
        Renderer::Cpp => cpp::render(ctx, &mut out)?,
        Renderer::Js => js::render(ctx, &mut out, js::Module::Esm)?,
        Renderer::Cjs => js::render(ctx, &mut out, js::Module::CommonJs)?,
    }
    log::debug!(
        "Rendu {} : {} octets",
        ctx.generator.renderer,
        out.len()
    );
    Ok(out)
}

#[cfg(test)]
pub(crate) mod test_support {
    use bm_core::config::Generator;
    use bm_core::frame::IndexedImage;
    use bm_core::palette::Palette;
    use bm_core::symbols::SymbolTable;

    /// Image 3×2 sur trois couleurs, dont une inutilisée dans la palette
    /// de sortie.
    pub fn fixture(palette: &str) -> (IndexedImage, SymbolTable, Generator) {
        let image = IndexedImage::new(
            3,
            2,
            vec![[255; 4], [0, 0, 0, 255], [128, 128, 128, 255]],
            vec![1, 2, 0, 0, 2, 1],
        )
        .unwrap();
        let generator = Generator {
            palette: palette.parse::<Palette>().unwrap(),
            var_name: "sprite".into(),
            ..Generator::default()
        };
        // Du plus sombre au plus clair : 1, 2, 0.
        let symbols = SymbolTable::build(&[1, 2, 0], &generator.palette).unwrap();
        (image, symbols, generator)
    }
}
