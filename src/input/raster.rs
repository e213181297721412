/// A raw raster snapshot handed over by the drawing surface.
#[derive(Debug, Clone)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub pixels: PixelBuffer,
}

/// Pixel payload variants the preprocessor accepts.
#[derive(Debug, Clone)]
pub enum PixelBuffer {
    /// 8-bit grayscale, `width * height` bytes, row-major.
    Gray(Vec<u8>),
    /// 8-bit RGB, `width * height * 3` bytes, row-major.
    Rgb(Vec<u8>),
    /// An encoded image file (png/jpeg/bmp/gif); dimensions come from the
    /// decoded header, the `width`/`height` fields are advisory.
    Encoded(Vec<u8>),
}

impl RasterImage {
    pub fn gray(width: u32, height: u32, pixels: Vec<u8>) -> RasterImage {
        RasterImage { width, height, pixels: PixelBuffer::Gray(pixels) }
    }

    pub fn rgb(width: u32, height: u32, pixels: Vec<u8>) -> RasterImage {
        RasterImage { width, height, pixels: PixelBuffer::Rgb(pixels) }
    }
}

/// Pull-style handle onto the drawing surface: the pipeline asks for the
/// current canvas contents when the user commits or classifies a drawing.
/// `None` means nothing has been drawn yet.
pub trait CanvasSource {
    fn capture(&self) -> Option<RasterImage>;
}

/// A fixed snapshot, convenient for tests and non-interactive callers.
impl CanvasSource for RasterImage {
    fn capture(&self) -> Option<RasterImage> {
        Some(self.clone())
    }
}
