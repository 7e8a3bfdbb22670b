use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use bm_core::frame::FrameBuffer;
use bm_core::region::RegionMap;
use bm_core::traits::Quantizer;

use crate::{pipeline, preview};

/// Génère chaque zone de la carte, dans l'ordre, sur `out`.
///
/// Les sorties sont séparées par une ligne vide et vidées au fil de l'eau :
/// à la première erreur, les zones précédentes restent écrites.
///
/// # Errors
/// Returns an error naming the first area that fails to crop, build or write.
pub fn run_regions<W: Write, Q: Quantizer + ?Sized>(
    frame: &FrameBuffer,
    map: &RegionMap,
    quantizer: &Q,
    out: &mut W,
    preview_base: Option<&Path>,
) -> Result<()> {
    for (idx, area) in map.areas.iter().enumerate() {
        let sub = frame
            .crop(area.x, area.y, area.w, area.h)
            .with_context(|| format!("Zone {idx} hors de l'image"))?;
        let built =
            pipeline::build(&sub, &area.generator, quantizer).with_context(|| format!("Zone {idx}"))?;

        if idx > 0 {
            writeln!(out)?;
        }
        writeln!(out, "{}", built.text)?;
        out.flush()?;

        if let Some(base) = preview_base {
            preview::save(&built.indexed, &preview::area_path(base, idx))?;
        }
        log::info!(
            "Zone {idx} : {}×{} en {}",
            built.indexed.width(),
            built.indexed.height(),
            area.generator.renderer
        );
    }
    Ok(())
}
