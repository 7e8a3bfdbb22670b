use std::path::PathBuf;

use bm_core::config::{GeneratorOverride, Renderer, Scaler, parse_size};
use bm_core::palette::Palette;
use clap::Parser;

/// img2bitmap — convertit une image en tableau de pixels à palette fixe,
/// émis en source C++ ou JavaScript.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Image source : PNG, BMP, TIFF, GIF, WEBP ou JPEG (d'après l'extension).
    pub input: PathBuf,

    /// Taille cible `<w>x<h>`. <= 0 sur un axe : dérivé du ratio.
    #[arg(long, allow_hyphen_values = true, value_parser = parse_size)]
    pub size: Option<(i32, i32)>,

    /// Palette, du moins au plus intense : "_cowgCONW" ou "o=0,x=1,X=2".
    /// Caractères d'identifiant uniquement. Défaut : _cowgCONW.
    #[arg(long, visible_alias = "palette")]
    pub chars: Option<Palette>,

    /// Algorithme de redimensionnement : nn, approxbilinear, bilinear, catmullrom.
    #[arg(long)]
    pub scaler: Option<Scaler>,

    /// Dialecte de sortie : cpp17, cpp, js, cjs.
    #[arg(long)]
    pub renderer: Option<Renderer>,

    /// Nom de la variable générée. Défaut : bitmap.
    #[arg(long = "var")]
    pub var_name: Option<String>,

    /// Inverser l'ordre d'intensité.
    #[arg(long, default_value_t = false, overrides_with = "no_invert")]
    pub invert: bool,

    /// Ordre d'intensité normal, même si `--config` inverse.
    #[arg(long, default_value_t = false, overrides_with = "invert")]
    pub no_invert: bool,

    /// Décalage ajouté aux valeurs de palette (modulo 256).
    #[arg(long, allow_negative_numbers = true)]
    pub offset: Option<i32>,

    /// JS : un `Uint8Array` par ligne au lieu d'un tableau plat.
    #[arg(long, default_value_t = false, overrides_with = "no_row_wise_js")]
    pub row_wise_js: bool,

    /// JS : tableau plat, même si `--config` active `rowWiseJS`.
    #[arg(long, default_value_t = false, overrides_with = "row_wise_js")]
    pub no_row_wise_js: bool,

    /// Carte de zones JSON : une sortie par zone.
    #[arg(long)]
    pub map: Option<PathBuf>,

    /// Fichier TOML de valeurs par défaut (mêmes clés que `gen`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Écrit aussi l'image quantifiée en PNG (suffixe -<n> par zone).
    #[arg(long)]
    pub preview: Option<PathBuf>,

    /// Vitesse libimagequant, 1 (précis) à 10 (rapide).
    #[arg(long, default_value_t = bm_quant::quantize::DEFAULT_SPEED)]
    pub speed: i32,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Surcharges issues des options effectivement passées.
    #[must_use]
    pub fn to_override(&self) -> GeneratorOverride {
        GeneratorOverride {
            palette: self.chars.clone(),
            invert: switch(self.invert, self.no_invert),
            target_width: self.size.map(|(w, _)| w),
            target_height: self.size.map(|(_, h)| h),
            scaler: self.scaler,
            renderer: self.renderer,
            var_name: self.var_name.clone(),
            palette_offset: self.offset,
            row_wise_js: switch(self.row_wise_js, self.no_row_wise_js),
        }
    }
}

/// `--x` / `--no-x` : `None` si aucun des deux n'est passé.
fn switch(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}
