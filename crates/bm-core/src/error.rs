use thiserror::Error;

/// Errors originating from the core module.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Invalid configuration value or structure.
    #[error("Configuration invalide : {0}")]
    Config(String),

    /// Unsupported input image format.
    #[error("Format non supporté : {format}")]
    UnsupportedFormat {
        /// The extension (or lack of one) that was rejected.
        format: String,
    },

    /// Invalid width/height dimensions.
    #[error("Dimensions invalides : {width}×{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Size string not in `<w>x<h>` form.
    #[error("Taille invalide '{0}' : format attendu <w>x<h>")]
    InvalidSize(String),

    /// Malformed palette specification.
    #[error("Palette invalide : {0}")]
    InvalidPalette(String),

    /// Renderer name not in the known set.
    #[error("unknown renderer '{0}' (valeurs : cpp17, cpp, js, cjs)")]
    UnknownRenderer(String),

    /// Scaler name not in the known set.
    #[error("unknown scaler '{0}' (valeurs : nn, approxbilinear, bilinear, catmullrom)")]
    UnknownScaler(String),

    /// The image uses more colors than the palette has symbols.
    #[error("Palette trop petite : {used} couleurs utilisées pour {available} symboles")]
    PaletteTooSmall {
        /// Distinct colors present in the indexed image.
        used: usize,
        /// Entries in the configured palette.
        available: usize,
    },

    /// Indexed image pixel refers past the end of its palette.
    #[error("Index {index} hors palette ({len} couleurs)")]
    IndexOutOfPalette {
        /// Offending pixel index.
        index: u8,
        /// Palette length.
        len: usize,
    },
}
