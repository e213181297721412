pub mod preprocess;
pub mod raster;

pub use preprocess::preprocess;
pub use raster::{CanvasSource, PixelBuffer, RasterImage};
