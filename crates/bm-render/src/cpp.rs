use std::fmt::Write;

use anyhow::Result;

use crate::RenderContext;

/// C++ : un `#define` par entrée de la palette configurée, le tableau
/// statique, puis les `#undef` correspondants.
///
/// Toute la palette est déclarée, présente ou non : les `#undef` évitent
/// les fuites dans l'unité de compilation.
///
/// # Errors
/// Returns an error if a pixel has no symbol.
pub fn render(ctx: &RenderContext<'_>, out: &mut String) -> Result<()> {
    let generator = ctx.generator;
    let entries = generator.palette.entries();

    for entry in entries {
        writeln!(
            out,
            "#define {} {}",
            entry.ch,
            entry.value_with_offset(generator.palette_offset)
        )?;
    }
    out.push('\n');

    writeln!(
        out,
        "static const std::array<uint8_t, {}> {} = {{{{",
        ctx.size_expr(),
        generator.var_name
    )?;
    ctx.write_rows(out, "    ", "", "")?;
    out.push_str("}};\n\n");

    for entry in entries {
        writeln!(out, "#undef {}", entry.ch)?;
    }
    out.push('\n');
    Ok(())
}
