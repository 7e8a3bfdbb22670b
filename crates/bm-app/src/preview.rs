use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bm_core::frame::IndexedImage;

/// Écrit l'image quantifiée en PNG, couleurs de palette réelles.
///
/// # Errors
/// Returns an error if the image cannot be encoded or written.
pub fn save(indexed: &IndexedImage, path: &Path) -> Result<()> {
    let rgba = image::RgbaImage::from_fn(indexed.width(), indexed.height(), |x, y| {
        let index = usize::from(indexed.index_at(x, y));
        image::Rgba(indexed.palette()[index])
    });
    rgba.save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("Aperçu non écrit : {}", path.display()))?;
    log::info!("Aperçu écrit : {}", path.display());
    Ok(())
}

/// `out.png` → `out-3.png` pour la zone 3.
#[must_use]
pub fn area_path(base: &Path, idx: usize) -> PathBuf {
    let stem = base
        .file_stem()
        .map_or_else(|| "preview".into(), |s| s.to_string_lossy().into_owned());
    let name = match base.extension() {
        Some(ext) => format!("{stem}-{idx}.{}", ext.to_string_lossy()),
        None => format!("{stem}-{idx}"),
    };
    base.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn area_path_inserts_index() {
        assert_eq!(
            area_path(Path::new("/tmp/out.png"), 3),
            PathBuf::from("/tmp/out-3.png")
        );
        assert_eq!(area_path(Path::new("out"), 0), PathBuf::from("out-0"));
    }

    #[test]
    fn saved_preview_has_palette_colors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.png");
        let indexed =
            IndexedImage::new(2, 1, vec![[10, 20, 30, 255], [200, 100, 0, 255]], vec![1, 0])
                .unwrap();
        save(&indexed, &path).unwrap();

        let back = image::open(&path).unwrap().to_rgba8();
        assert_eq!(back.dimensions(), (2, 1));
        assert_eq!(back.get_pixel(0, 0).0, [200, 100, 0, 255]);
        assert_eq!(back.get_pixel(1, 0).0, [10, 20, 30, 255]);
    }
}
