use std::path::Path;

use anyhow::{Context, Result};
use bm_core::error::CoreError;
use bm_core::frame::FrameBuffer;
use image::ImageFormat;

/// Extensions reconnues, en minuscules.
const SUPPORTED_EXTS: &[(&str, ImageFormat)] = &[
    ("png", ImageFormat::Png),
    ("bmp", ImageFormat::Bmp),
    ("tif", ImageFormat::Tiff),
    ("tiff", ImageFormat::Tiff),
    ("gif", ImageFormat::Gif),
    ("webp", ImageFormat::WebP),
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
];

/// Choisit le décodeur d'après l'extension (insensible à la casse).
///
/// # Errors
/// Returns `UnsupportedFormat` for any extension outside the known set.
///
/// # Example
/// ```
/// use bm_source::image::format_for;
/// use std::path::Path;
/// assert!(format_for(Path::new("logo.PNG")).is_ok());
/// assert!(format_for(Path::new("logo.svg")).is_err());
/// ```
pub fn format_for(path: &Path) -> Result<ImageFormat, CoreError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let found = SUPPORTED_EXTS
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|&(_, format)| format);

    found.ok_or_else(|| CoreError::UnsupportedFormat {
        format: if ext.is_empty() {
            "(aucune extension)".to_string()
        } else {
            ext
        },
    })
}

/// Lit le fichier entier et le décode en RGBA. Première frame seulement.
///
/// # Errors
/// Returns an error if the extension is unsupported, the file cannot be
/// read, or the decoder rejects the data.
///
/// # Example
/// ```no_run
/// use bm_source::image::decode;
/// use std::path::Path;
/// let frame = decode(Path::new("sprite.png")).unwrap();
/// ```
pub fn decode(path: &Path) -> Result<FrameBuffer> {
    let format = format_for(path)?;
    let bytes =
        std::fs::read(path).with_context(|| format!("Impossible de lire {}", path.display()))?;
    let frame = decode_bytes(&bytes, format)
        .with_context(|| format!("Impossible de décoder {}", path.display()))?;
    log::debug!(
        "{} décodé ({:?}) : {}×{}",
        path.display(),
        format,
        frame.width,
        frame.height
    );
    Ok(frame)
}

/// Décode un buffer en mémoire avec un format imposé.
///
/// # Errors
/// Returns an error if the decoder rejects the data.
pub fn decode_bytes(bytes: &[u8], format: ImageFormat) -> Result<FrameBuffer> {
    let img = image::load_from_memory_with_format(bytes, format)?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(FrameBuffer {
        data: rgba.into_raw(),
        width,
        height,
    })
}
