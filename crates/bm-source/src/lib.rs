/// Image sources for img2bitmap: decoding by extension and resizing.

pub mod image;
pub mod resize;

pub use crate::image::decode;
pub use resize::{prepare_size, resize_frame};
