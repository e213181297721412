use image::imageops::FilterType;
use image::{DynamicImage, GrayImage, RgbImage};

use crate::error::SketchError;
use crate::input::raster::{PixelBuffer, RasterImage};
use crate::math::Tensor;
use crate::network::builder::{INPUT_CHANNELS, INPUT_SIZE};

/// Normalizes a raw canvas snapshot into the fixed network input shape:
/// single channel, 28×28, values in [0, 1].
///
/// Grayscale conversion happens first, then a bilinear resize to the target
/// size regardless of the source resolution, then the 1/255 scaling. All
/// intermediate images are locals and dropped on return.
pub fn preprocess(raster: &RasterImage) -> Result<Tensor, SketchError> {
    let gray = to_gray(raster)?;
    let resized = DynamicImage::ImageLuma8(gray)
        .resize_exact(INPUT_SIZE as u32, INPUT_SIZE as u32, FilterType::Triangle)
        .into_luma8();
    let data: Vec<f64> = resized.pixels().map(|p| p.0[0] as f64 / 255.0).collect();
    Ok(Tensor::from_data(INPUT_SIZE, INPUT_SIZE, INPUT_CHANNELS, data))
}

fn to_gray(raster: &RasterImage) -> Result<GrayImage, SketchError> {
    if raster.width == 0 || raster.height == 0 {
        return Err(SketchError::SourceNotReady);
    }
    match &raster.pixels {
        PixelBuffer::Gray(bytes) => {
            GrayImage::from_raw(raster.width, raster.height, bytes.clone())
                .ok_or(SketchError::SourceNotReady)
        }
        PixelBuffer::Rgb(bytes) => {
            let rgb = RgbImage::from_raw(raster.width, raster.height, bytes.clone())
                .ok_or(SketchError::SourceNotReady)?;
            Ok(DynamicImage::ImageRgb8(rgb).into_luma8())
        }
        PixelBuffer::Encoded(bytes) => {
            let decoded =
                image::load_from_memory(bytes).map_err(|_| SketchError::SourceNotReady)?;
            Ok(decoded.into_luma8())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_shape_is_fixed_for_any_source_size() {
        for (w, h) in [(28u32, 28u32), (7, 300), (640, 480), (1, 1)] {
            let raster = RasterImage::gray(w, h, vec![128; (w * h) as usize]);
            let tensor = preprocess(&raster).unwrap();
            assert_eq!(tensor.shape(), (28, 28, 1));
        }
    }

    #[test]
    fn values_are_normalized_to_unit_range() {
        let raster = RasterImage::gray(64, 64, (0..64 * 64).map(|i| (i % 256) as u8).collect());
        let tensor = preprocess(&raster).unwrap();
        assert!(tensor.data.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn rgb_sources_are_converted_to_intensity() {
        let raster = RasterImage::rgb(10, 10, vec![255; 10 * 10 * 3]);
        let tensor = preprocess(&raster).unwrap();
        // Pure white stays (close to) 1.0 after conversion and resize.
        assert!(tensor.data.iter().all(|&v| v > 0.99));
    }

    #[test]
    fn empty_or_mismatched_buffers_are_source_not_ready() {
        let zero = RasterImage::gray(0, 0, Vec::new());
        assert!(matches!(preprocess(&zero), Err(SketchError::SourceNotReady)));

        let short = RasterImage::gray(10, 10, vec![0; 5]);
        assert!(matches!(preprocess(&short), Err(SketchError::SourceNotReady)));

        let garbage = RasterImage {
            width: 4,
            height: 4,
            pixels: PixelBuffer::Encoded(vec![1, 2, 3]),
        };
        assert!(matches!(preprocess(&garbage), Err(SketchError::SourceNotReady)));
    }
}
