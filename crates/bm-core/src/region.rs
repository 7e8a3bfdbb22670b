use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::config::{Generator, GeneratorOverride};

/// Document JSON brut. Les zones restent en `Value` pour être décodées une
/// par une et signaler l'index fautif.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RegionMapFile {
    areas: Vec<serde_json::Value>,
    #[serde(default, rename = "gen")]
    generator: Option<GeneratorOverride>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct AreaFile {
    x: u32,
    y: u32,
    w: u32,
    h: u32,
    #[serde(default, rename = "gen")]
    generator: Option<GeneratorOverride>,
}

/// Une zone rectangulaire de l'image source et sa configuration effective.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Area {
    /// Left edge in source pixels.
    pub x: u32,
    /// Top edge in source pixels.
    pub y: u32,
    /// Width in source pixels.
    pub w: u32,
    /// Height in source pixels.
    pub h: u32,
    /// Parent config, then map-level `gen`, then area-level `gen`.
    pub generator: Generator,
}

/// Carte de zones : découpe une image en sous-rectangles générés
/// indépendamment.
///
/// # Example
/// ```
/// use bm_core::config::{Generator, Renderer};
/// use bm_core::region::RegionMap;
/// let json = r#"{"gen": {"renderer": "js"}, "areas": [{"x": 0, "y": 0, "w": 8, "h": 8}]}"#;
/// let map = RegionMap::parse(json, &Generator::default()).unwrap();
/// assert_eq!(map.areas.len(), 1);
/// assert_eq!(map.areas[0].generator.renderer, Renderer::Js);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionMap {
    /// Zones, dans l'ordre du document.
    pub areas: Vec<Area>,
}

impl RegionMap {
    /// Decode a region map, layering overrides on a copy of `parent`.
    ///
    /// # Errors
    /// Returns an error on malformed JSON, unknown fields at any level, or an
    /// invalid effective configuration. Area errors name the area index.
    pub fn parse(json: &str, parent: &Generator) -> Result<Self> {
        let file: RegionMapFile =
            serde_json::from_str(json).context("Carte de zones rejetée")?;

        let map_level = match &file.generator {
            Some(o) => o.layered_on(parent),
            None => parent.clone(),
        };

        let mut areas = Vec::with_capacity(file.areas.len());
        for (idx, raw) in file.areas.into_iter().enumerate() {
            let area: AreaFile =
                serde_json::from_value(raw).with_context(|| format!("invalid area {idx}"))?;
            let generator = match &area.generator {
                Some(o) => o.layered_on(&map_level),
                None => map_level.clone(),
            };
            generator
                .validate()
                .with_context(|| format!("invalid area {idx}"))?;
            areas.push(Area {
                x: area.x,
                y: area.y,
                w: area.w,
                h: area.h,
                generator,
            });
        }

        log::debug!("Carte de zones : {} zone(s)", areas.len());
        Ok(Self { areas })
    }

    /// Lit et décode un fichier de carte de zones.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or [`RegionMap::parse`] fails.
    pub fn load(path: &Path, parent: &Generator) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Impossible de lire {}", path.display()))?;
        Self::parse(&content, parent).with_context(|| format!("Dans {}", path.display()))
    }
}
