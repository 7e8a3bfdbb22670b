use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// 9 caractères — palette par défaut, du moins au plus intense.
pub const DEFAULT_PALETTE: &str = "_cowgCONW";

/// Un index de palette tient sur un octet.
pub const MAX_ENTRIES: usize = 256;

/// One output symbol: the identifier written per pixel and the numeric
/// value it is declared as.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaletteEntry {
    /// Caractère émis dans le tableau généré.
    pub ch: char,
    /// Valeur numérique attribuée par l'utilisateur.
    pub value: u8,
}

impl PaletteEntry {
    /// Value shifted by the generator's palette offset, wrapping on a byte.
    ///
    /// # Example
    /// ```
    /// use bm_core::palette::PaletteEntry;
    /// let e = PaletteEntry { ch: 'x', value: 250 };
    /// assert_eq!(e.value_with_offset(3), 253);
    /// assert_eq!(e.value_with_offset(10), 4);
    /// assert_eq!(e.value_with_offset(-251), 255);
    /// ```
    #[must_use]
    pub fn value_with_offset(self, offset: i32) -> u8 {
        (i64::from(self.value) + i64::from(offset)).rem_euclid(256) as u8
    }
}

/// Palette de sortie, ordonnée par rang d'intensité (0 = le moins intense).
///
/// Deux syntaxes :
/// - une suite de caractères nue (`"_cowgCONW"`) : valeur = rang ;
/// - une liste `c=v` séparée par des virgules (`"o=0,x=1,X=2,W=3"`).
///
/// # Example
/// ```
/// use bm_core::palette::Palette;
/// let p: Palette = "o=0, x=4".parse().unwrap();
/// assert_eq!(p.len(), 2);
/// assert_eq!(p.get(1).unwrap().value, 4);
/// assert_eq!(p.to_string(), "o=0,x=4");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct Palette {
    entries: Vec<PaletteEntry>,
}

impl Palette {
    /// Number of ranks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a parsed palette; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at intensity rank `rank`.
    #[must_use]
    pub fn get(&self, rank: usize) -> Option<PaletteEntry> {
        self.entries.get(rank).copied()
    }

    /// All entries, least intense first.
    #[must_use]
    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    fn from_bare_chars(chars: &str) -> Result<Self, CoreError> {
        let count = chars.chars().count();
        if count > MAX_ENTRIES {
            return Err(too_many(count));
        }
        let entries = chars
            .chars()
            .enumerate()
            .map(|(rank, ch)| PaletteEntry {
                ch,
                value: rank as u8,
            })
            .collect();
        Ok(Self { entries })
    }

    fn from_pairs(spec: &str) -> Result<Self, CoreError> {
        let items: Vec<&str> = spec.split(',').map(str::trim_start).collect();
        if items.len() > MAX_ENTRIES {
            return Err(too_many(items.len()));
        }

        let mut entries = Vec::with_capacity(items.len());
        for (rank, item) in items.into_iter().enumerate() {
            let mut chars = item.chars();
            let ch = chars.next().ok_or_else(|| {
                CoreError::InvalidPalette(format!("entrée vide au rang {rank}"))
            })?;
            let raw = chars.as_str().strip_prefix('=').ok_or_else(|| {
                CoreError::InvalidPalette(format!(
                    "'=' attendu après le caractère au rang {rank}"
                ))
            })?;
            let value = raw.trim_end().parse::<u8>().map_err(|e| {
                CoreError::InvalidPalette(format!("valeur invalide au rang {rank} : {e}"))
            })?;
            entries.push(PaletteEntry { ch, value });
        }
        Ok(Self { entries })
    }

    fn validate(&self) -> Result<(), CoreError> {
        if self.entries.is_empty() {
            return Err(CoreError::InvalidPalette("palette vide".into()));
        }
        let mut seen = HashSet::with_capacity(self.entries.len());
        for (rank, entry) in self.entries.iter().enumerate() {
            if !is_identifier_char(entry.ch) {
                return Err(CoreError::InvalidPalette(format!(
                    "'{}' au rang {rank} n'est pas un identifiant valide",
                    entry.ch
                )));
            }
            if !seen.insert(entry.ch) {
                return Err(CoreError::InvalidPalette(format!(
                    "'{}' dupliqué au rang {rank}",
                    entry.ch
                )));
            }
        }
        Ok(())
    }
}

impl Default for Palette {
    fn default() -> Self {
        let entries = DEFAULT_PALETTE
            .chars()
            .enumerate()
            .map(|(rank, ch)| PaletteEntry {
                ch,
                value: rank as u8,
            })
            .collect();
        Self { entries }
    }
}

impl FromStr for Palette {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let palette = if s.contains('=') {
            Self::from_pairs(s)?
        } else {
            Self::from_bare_chars(s)?
        };
        palette.validate()?;
        Ok(palette)
    }
}

impl TryFrom<String> for Palette {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Palette> for String {
    fn from(palette: Palette) -> Self {
        palette.to_string()
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (rank, entry) in self.entries.iter().enumerate() {
            if rank > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}={}", entry.ch, entry.value)?;
        }
        Ok(())
    }
}

/// Single-character identifier, valid in both C++ and JavaScript.
#[must_use]
pub fn is_identifier_char(ch: char) -> bool {
    ch == '_' || ch.is_alphabetic()
}

fn too_many(count: usize) -> CoreError {
    CoreError::InvalidPalette(format!(
        "trop de caractères : {count} (maximum {MAX_ENTRIES})"
    ))
}
