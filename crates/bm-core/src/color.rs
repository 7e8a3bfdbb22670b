/// Poids HSP par canal (modèle de Finley).
const WEIGHT_R: f64 = 0.299;
const WEIGHT_G: f64 = 0.587;
const WEIGHT_B: f64 = 0.114;

/// Intensité perceptuelle d'une couleur RGBA, dans [0.0, 1.0].
///
/// `sqrt((0.299·R)² + (0.587·G)² + (0.114·B)²)` sur des canaux normalisés
/// et prémultipliés par l'alpha : une couleur totalement transparente a
/// une intensité nulle.
///
/// # Example
/// ```
/// use bm_core::color::hsp_intensity;
/// assert_eq!(hsp_intensity([0, 0, 0, 255]), 0.0);
/// assert!(hsp_intensity([0, 255, 0, 255]) > hsp_intensity([255, 0, 0, 255]));
/// assert!(hsp_intensity([255, 0, 0, 255]) > hsp_intensity([0, 0, 255, 255]));
/// assert_eq!(hsp_intensity([255, 255, 255, 0]), 0.0);
/// ```
#[must_use]
pub fn hsp_intensity(rgba: [u8; 4]) -> f64 {
    let [r, g, b, a] = rgba;
    let alpha = f64::from(a) / 255.0;
    let r = WEIGHT_R * f64::from(r) / 255.0 * alpha;
    let g = WEIGHT_G * f64::from(g) / 255.0 * alpha;
    let b = WEIGHT_B * f64::from(b) / 255.0 * alpha;
    (r * r + g * g + b * b).sqrt()
}
