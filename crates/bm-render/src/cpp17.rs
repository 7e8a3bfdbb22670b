use std::fmt::Write;

use anyhow::Result;

use crate::{RenderContext, declarations};

/// C++17 : tableau `std::array` initialisé par une lambda `constexpr`, les
/// constantes restent locales à la lambda.
///
/// Seuls les symboles présents dans l'image sont déclarés, sinon le
/// compilateur signale des variables inutilisées.
///
/// # Errors
/// Returns an error if a pixel has no symbol.
pub fn render(ctx: &RenderContext<'_>, out: &mut String) -> Result<()> {
    let generator = ctx.generator;
    let used = ctx.symbols.used_symbols(ctx.image);

    writeln!(
        out,
        "static const auto {} = []() constexpr -> const std::array<uint8_t, {}> {{",
        generator.var_name,
        ctx.size_expr()
    )?;
    writeln!(
        out,
        "    const uint8_t {};",
        declarations(&used, generator.palette_offset)
    )?;
    out.push_str("    return {{\n");
    ctx.write_rows(out, "        ", "", "")?;
    out.push_str("    }};\n");
    out.push_str("}();\n\n");
    Ok(())
}
