/// Configuration, types, and shared structures for img2bitmap.
///
/// This crate contains the palette, the generator configuration and its
/// override layer, the frame types, and the symbol lookup table shared by
/// the rest of the workspace.

pub mod color;
pub mod config;
pub mod error;
pub mod frame;
pub mod palette;
pub mod region;
pub mod symbols;
pub mod traits;

pub use config::{Generator, GeneratorOverride, Renderer, Scaler};
pub use error::CoreError;
pub use frame::{FrameBuffer, IndexedImage};
pub use palette::{Palette, PaletteEntry};
pub use region::{Area, RegionMap};
pub use symbols::SymbolTable;
