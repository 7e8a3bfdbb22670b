use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::palette::Palette;

/// Configuration d'une génération, immuable le temps d'un build.
///
/// Construite depuis les défauts, un fichier TOML, la CLI, puis clonée et
/// surchargée par zone via [`GeneratorOverride`].
///
/// # Example
/// ```
/// use bm_core::config::{Generator, Renderer};
/// let g = Generator::default();
/// assert_eq!(g.renderer, Renderer::Cpp17);
/// assert_eq!(g.var_name, "bitmap");
/// assert_eq!(g.palette.len(), 9);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Generator {
    /// Symboles de sortie, du moins au plus intense.
    pub palette: Palette,
    /// Trier du plus intense au moins intense.
    pub invert: bool,
    /// Largeur cible. <= 0 : dérivée du ratio.
    pub target_width: i32,
    /// Hauteur cible. <= 0 : dérivée du ratio.
    pub target_height: i32,
    /// Algorithme de redimensionnement.
    pub scaler: Scaler,
    /// Dialecte de sortie.
    pub renderer: Renderer,
    /// Nom de la variable générée.
    pub var_name: String,
    /// Décalage ajouté à chaque valeur de palette (modulo 256).
    pub palette_offset: i32,
    /// Tableau de lignes plutôt que tableau plat (dialectes JS).
    #[serde(rename = "rowWiseJS")]
    pub row_wise_js: bool,
}

impl Default for Generator {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            invert: false,
            target_width: 0,
            target_height: 0,
            scaler: Scaler::CatmullRom,
            renderer: Renderer::Cpp17,
            var_name: "bitmap".to_string(),
            palette_offset: 0,
            row_wise_js: false,
        }
    }
}

impl Generator {
    /// Check fields the type system cannot.
    ///
    /// # Errors
    /// Returns an error if `var_name` is not a valid C++/JavaScript identifier.
    ///
    /// # Example
    /// ```
    /// use bm_core::config::Generator;
    /// let mut g = Generator::default();
    /// assert!(g.validate().is_ok());
    /// g.var_name = "2fast".into();
    /// assert!(g.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut chars = self.var_name.chars();
        let valid = chars
            .next()
            .is_some_and(|c| c == '_' || c.is_ascii_alphabetic())
            && chars.all(|c| c == '_' || c.is_ascii_alphanumeric());
        if valid {
            Ok(())
        } else {
            Err(CoreError::Config(format!(
                "nom de variable invalide : '{}'",
                self.var_name
            )))
        }
    }
}

/// Scaler used when resizing before quantization.
///
/// # Example
/// ```
/// use bm_core::config::Scaler;
/// assert_eq!("nn".parse::<Scaler>().unwrap(), Scaler::NearestNeighbor);
/// assert!("lanczos".parse::<Scaler>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub enum Scaler {
    /// Plus proche voisin.
    NearestNeighbor,
    /// Interpolation bilinéaire sans convolution.
    ApproxBiLinear,
    /// Convolution bilinéaire.
    BiLinear,
    /// Convolution Catmull-Rom (défaut).
    #[default]
    CatmullRom,
}

impl Scaler {
    /// Nom utilisé en CLI et en JSON.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::NearestNeighbor => "nn",
            Self::ApproxBiLinear => "approxbilinear",
            Self::BiLinear => "bilinear",
            Self::CatmullRom => "catmullrom",
        }
    }
}

impl FromStr for Scaler {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nn" => Ok(Self::NearestNeighbor),
            "approxbilinear" => Ok(Self::ApproxBiLinear),
            "bilinear" => Ok(Self::BiLinear),
            "catmullrom" | "" => Ok(Self::CatmullRom),
            other => Err(CoreError::UnknownScaler(other.to_string())),
        }
    }
}

impl fmt::Display for Scaler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<String> for Scaler {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Scaler> for String {
    fn from(scaler: Scaler) -> Self {
        scaler.name().to_string()
    }
}

/// Output dialect.
///
/// # Example
/// ```
/// use bm_core::config::Renderer;
/// assert_eq!("cjs".parse::<Renderer>().unwrap(), Renderer::Cjs);
/// let err = "rust".parse::<Renderer>().unwrap_err();
/// assert!(err.to_string().contains("unknown renderer"));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub enum Renderer {
    /// C++17 : tableau initialisé par une lambda constexpr, constantes locales.
    #[default]
    Cpp17,
    /// C++ : constantes `#define`/`#undef` autour d'un tableau statique.
    Cpp,
    /// Module ES (`export const`).
    Js,
    /// Module CommonJS (`exports.`).
    Cjs,
}

impl Renderer {
    /// Nom utilisé en CLI et en JSON.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Cpp17 => "cpp17",
            Self::Cpp => "cpp",
            Self::Js => "js",
            Self::Cjs => "cjs",
        }
    }
}

impl FromStr for Renderer {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cpp17" => Ok(Self::Cpp17),
            "cpp" => Ok(Self::Cpp),
            "js" => Ok(Self::Js),
            "cjs" => Ok(Self::Cjs),
            other => Err(CoreError::UnknownRenderer(other.to_string())),
        }
    }
}

impl fmt::Display for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<String> for Renderer {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Renderer> for String {
    fn from(renderer: Renderer) -> Self {
        renderer.name().to_string()
    }
}

/// Surcharge partielle d'un [`Generator`] : seuls les champs présents
/// dans le document remplacent ceux de la copie.
///
/// Champs inconnus refusés.
///
/// # Example
/// ```
/// use bm_core::config::{Generator, GeneratorOverride, Renderer};
/// let o: GeneratorOverride = serde_json::from_str(r#"{"renderer":"js","invert":true}"#).unwrap();
/// let mut g = Generator::default();
/// o.apply_to(&mut g);
/// assert_eq!(g.renderer, Renderer::Js);
/// assert!(g.invert);
/// assert_eq!(g.var_name, "bitmap");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GeneratorOverride {
    pub palette: Option<Palette>,
    pub invert: Option<bool>,
    pub target_width: Option<i32>,
    pub target_height: Option<i32>,
    pub scaler: Option<Scaler>,
    pub renderer: Option<Renderer>,
    pub var_name: Option<String>,
    pub palette_offset: Option<i32>,
    #[serde(rename = "rowWiseJS")]
    pub row_wise_js: Option<bool>,
}

impl GeneratorOverride {
    /// Écrase les champs présents dans `target`.
    pub fn apply_to(&self, target: &mut Generator) {
        if let Some(v) = &self.palette {
            target.palette = v.clone();
        }
        if let Some(v) = self.invert {
            target.invert = v;
        }
        if let Some(v) = self.target_width {
            target.target_width = v;
        }
        if let Some(v) = self.target_height {
            target.target_height = v;
        }
        if let Some(v) = self.scaler {
            target.scaler = v;
        }
        if let Some(v) = self.renderer {
            target.renderer = v;
        }
        if let Some(v) = &self.var_name {
            target.var_name.clone_from(v);
        }
        if let Some(v) = self.palette_offset {
            target.palette_offset = v;
        }
        if let Some(v) = self.row_wise_js {
            target.row_wise_js = v;
        }
    }

    /// Clone `base` and apply this override to the copy.
    #[must_use]
    pub fn layered_on(&self, base: &Generator) -> Generator {
        let mut out = base.clone();
        self.apply_to(&mut out);
        out
    }
}

/// Parse `<w>x<h>`. Either side may be `<= 0` to derive it from the aspect
/// ratio.
///
/// # Errors
/// Returns `InvalidSize` if the string is not two integers around an `x`.
///
/// # Example
/// ```
/// use bm_core::config::parse_size;
/// assert_eq!(parse_size("64x32").unwrap(), (64, 32));
/// assert_eq!(parse_size("128x0").unwrap(), (128, 0));
/// assert_eq!(parse_size("-1x48").unwrap(), (-1, 48));
/// assert!(parse_size("64").is_err());
/// ```
pub fn parse_size(raw: &str) -> Result<(i32, i32), CoreError> {
    let invalid = || CoreError::InvalidSize(raw.to_string());
    let (w, h) = raw.trim().split_once('x').ok_or_else(invalid)?;
    let w = w.parse::<i32>().map_err(|_| invalid())?;
    let h = h.parse::<i32>().map_err(|_| invalid())?;
    Ok((w, h))
}

/// Charge un fichier TOML de surcharges et l'applique aux valeurs par défaut.
///
/// Le fichier utilise les mêmes clés que le champ `gen` d'une carte de zones.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use bm_core::config::load_config;
/// use std::path::Path;
/// let generator = load_config(Path::new("img2bitmap.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<Generator> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;

    let file: GeneratorOverride = toml::from_str(&content)
        .with_context(|| format!("Erreur de parsing TOML dans {}", path.display()))?;

    let generator = file.layered_on(&Generator::default());
    generator.validate()?;
    log::debug!("Config chargée depuis {}", path.display());
    Ok(generator)
}
