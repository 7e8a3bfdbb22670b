use std::fmt::Write;

use anyhow::Result;

use crate::{RenderContext, declarations};

/// Forme d'export du module JavaScript.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Module {
    /// `export const <var> = …`
    Esm,
    /// `exports.<var> = …`
    CommonJs,
}

/// JavaScript : une IIFE qui déclare les symboles présents puis retourne
/// un `Uint8Array` plat, ou un tableau gelé de `Uint8Array` par ligne si
/// `row_wise_js`.
///
/// # Errors
/// Returns an error if a pixel has no symbol.
pub fn render(ctx: &RenderContext<'_>, out: &mut String, module: Module) -> Result<()> {
    let generator = ctx.generator;
    let used = ctx.symbols.used_symbols(ctx.image);

    // Les formateurs réalignent les tableaux ligne par ligne.
    out.push_str("// prettier-ignore deno-fmt-ignore\n");

    match module {
        Module::Esm => writeln!(out, "export const {} = (() => {{", generator.var_name)?,
        Module::CommonJs => writeln!(out, "exports.{} = (() => {{", generator.var_name)?,
    }
    writeln!(
        out,
        "  const {};",
        declarations(&used, generator.palette_offset)
    )?;

    if generator.row_wise_js {
        out.push_str("  return Object.freeze([\n");
        ctx.write_rows(out, "    ", "  new Uint8Array([", "]),")?;
    } else {
        out.push_str("  return new Uint8Array([\n");
        ctx.write_rows(out, "    ", "", "")?;
    }
    out.push_str("  ]);\n");
    out.push_str("})();\n");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixture;

    fn rendered(module: Module, row_wise: bool) -> String {
        let (image, symbols, mut generator) = fixture("abcd");
        generator.row_wise_js = row_wise;
        let ctx = RenderContext {
            image: &image,
            symbols: &symbols,
            generator: &generator,
        };
        let mut out = String::new();
        render(&ctx, &mut out, module).unwrap();
        out
    }

    #[test]
    fn flat_esm_layout() {
        assert_eq!(
            rendered(Module::Esm, false),
            "// prettier-ignore deno-fmt-ignore\n\
             export const sprite = (() => {\n\
             \x20 const a=0, b=1, c=2;\n\
             \x20 return new Uint8Array([\n\
             \x20   a,b,c,\n\
             \x20   c,b,a,\n\
             \x20 ]);\n\
             })();\n"
        );
    }

    #[test]
    fn row_wise_commonjs_layout() {
        assert_eq!(
            rendered(Module::CommonJs, true),
            "// prettier-ignore deno-fmt-ignore\n\
             exports.sprite = (() => {\n\
             \x20 const a=0, b=1, c=2;\n\
             \x20 return Object.freeze([\n\
             \x20     new Uint8Array([a,b,c,]),\n\
             \x20     new Uint8Array([c,b,a,]),\n\
             \x20 ]);\n\
             })();\n"
        );
    }

    #[test]
    fn row_wise_esm_has_one_array_per_row() {
        let out = rendered(Module::Esm, true);
        assert_eq!(out.matches("new Uint8Array([").count(), 2);
        assert!(out.starts_with("// prettier-ignore deno-fmt-ignore\nexport const sprite"));
    }
}
