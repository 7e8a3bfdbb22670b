/// Color reduction and intensity ranking for img2bitmap.
///
/// Reduces a frame to an indexed image, then orders its used colors by
/// perceptual brightness.
pub mod intensity;
pub mod quantize;

pub use intensity::{rank_by_intensity, used_palette_indexes};
pub use quantize::ImageQuantizer;
