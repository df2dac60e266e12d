//! # Image Processor Implementation (image-rs)
//!
//! Provides an [`ImageProcessor`] implementation using the [`image`] crate.
//!
//! The pipeline for one call is:
//! 1. decode with the codec selected by the declared [`AllowedFormat`]
//!    (never guessed from the bytes), under decoder allocation and
//!    dimension limits,
//! 2. shrink into the configured box if either side is over the limit,
//!    preserving aspect ratio,
//! 3. re-encode in the same format (JPEG at a fixed quality, PNG lossless),
//! 4. reject the result if it is still larger than the byte ceiling.
//!
//! Every buffer is owned by the call and dropped on return, including the
//! error paths.
//!
//! # Example
//! ```rust,no_run
//! use imgup_web::image::format::AllowedFormat;
//! use imgup_web::image::image_rs_processor::ImageRsProcessor;
//! use imgup_web::image::processor::{ImageProcessor, NormalizeOpts};
//!
//! let processor = ImageRsProcessor::new(NormalizeOpts::new(800, 600));
//! let img_data = std::fs::read("input.png").unwrap();
//!
//! let out = processor
//!     .normalize(&img_data, AllowedFormat::Png)
//!     .expect("normalize ok");
//! assert_eq!(out.content_type, "image/png");
//! std::fs::write("normalized.png", out.bytes).unwrap();
//! ```

use std::io::Cursor;

use image::{
    DynamicImage, GenericImageView, ImageReader, Limits,
    codecs::{jpeg::JpegEncoder, png::PngEncoder},
    imageops::FilterType,
};

use super::format::AllowedFormat;
use super::processor::{ImageProcessor, NormalizeOpts, NormalizedImage};
use crate::error::image::ImageError;

/// A concrete implementation of [`ImageProcessor`] using the `image` crate.
#[derive(Clone, Debug, Default)]
pub struct ImageRsProcessor {
    opts: NormalizeOpts,
}

impl ImageRsProcessor {
    pub fn new(opts: NormalizeOpts) -> Self {
        Self { opts }
    }

    /// Returns the policy this processor applies.
    pub fn opts(&self) -> &NormalizeOpts {
        &self.opts
    }

    /// Decodes, fits, re-encodes and size-checks one image.
    pub fn normalize(
        &self,
        img_bytes: &[u8],
        format: AllowedFormat,
    ) -> Result<NormalizedImage, ImageError> {
        let img = self.decode(img_bytes, format)?;
        let img = resize_fit(img, self.opts.max_w, self.opts.max_h);
        let (w, h) = img.dimensions();

        let bytes = self.encode(&img, format)?;

        if bytes.len() > self.opts.max_file_size {
            return Err(ImageError::TooLarge {
                size: bytes.len(),
                max: self.opts.max_file_size,
            });
        }

        Ok(NormalizedImage::new(bytes, format, w, h))
    }

    fn decode(&self, img_bytes: &[u8], format: AllowedFormat) -> Result<DynamicImage, ImageError> {
        let mut limits = Limits::default();
        limits.max_alloc = Some(self.opts.max_decode_alloc);
        limits.max_image_width = Some(self.opts.max_decode_width);
        limits.max_image_height = Some(self.opts.max_decode_height);

        let mut reader = ImageReader::with_format(Cursor::new(img_bytes), format.image_format());
        reader.limits(limits);
        reader.decode().map_err(|source| ImageError::Decode {
            format: format.content_type(),
            source,
        })
    }

    fn encode(&self, img: &DynamicImage, format: AllowedFormat) -> Result<Vec<u8>, ImageError> {
        let mut out = Vec::new();

        let res = match format {
            AllowedFormat::Jpeg => {
                // JPEG has no alpha channel.
                let encoder = JpegEncoder::new_with_quality(&mut out, self.opts.jpeg_quality);
                img.to_rgb8().write_with_encoder(encoder)
            }
            AllowedFormat::Png => {
                let encoder = PngEncoder::new(&mut out);
                img.write_with_encoder(encoder)
            }
        };

        res.map_err(|source| ImageError::Encode {
            format: format.content_type(),
            source,
        })?;
        Ok(out)
    }
}

impl ImageProcessor for ImageRsProcessor {
    fn normalize(
        &self,
        img_bytes: &[u8],
        format: AllowedFormat,
    ) -> Result<NormalizedImage, ImageError> {
        ImageRsProcessor::normalize(self, img_bytes, format)
    }
}

/// Computes the largest size that fits inside `max_w` × `max_h` while
/// keeping the aspect ratio of `w` × `h`.
///
/// Images already inside the box are returned unchanged (no upscaling).
/// Each side is rounded to the nearest pixel and never drops below 1.
pub fn fit_within(w: u32, h: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    if w <= max_w && h <= max_h {
        return (w, h);
    }

    let scale = f64::min(max_w as f64 / w as f64, max_h as f64 / h as f64);
    let nw = ((w as f64 * scale).round() as u32).clamp(1, max_w.max(1));
    let nh = ((h as f64 * scale).round() as u32).clamp(1, max_h.max(1));
    (nw, nh)
}

/// Resizes the image proportionally to fit within the specified bounds.
///
/// Uses [`FilterType::Triangle`] (bilinear) for quality-speed balance.
fn resize_fit(img: DynamicImage, max_w: u32, max_h: u32) -> DynamicImage {
    let (w, h) = img.dimensions();
    let (nw, nh) = fit_within(w, h, max_w, max_h);
    if (nw, nh) == (w, h) {
        return img;
    }
    img.resize_exact(nw, nh, FilterType::Triangle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, ImageFormat, Luma, Rgb, Rgba};

    fn make_png(w: u32, h: u32) -> Vec<u8> {
        let img: ImageBuffer<Rgba<u8>, _> = ImageBuffer::from_fn(w, h, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 255, 0, 255])
            }
        });
        let mut cur = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut cur, ImageFormat::Png)
            .expect("encode png");
        cur.into_inner()
    }

    fn make_jpeg(w: u32, h: u32) -> Vec<u8> {
        let img: ImageBuffer<Rgb<u8>, _> = ImageBuffer::from_fn(w, h, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
        });
        let mut cur = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut cur, ImageFormat::Jpeg)
            .expect("encode jpeg");
        cur.into_inner()
    }

    /// Deterministic pseudo-random RGBA noise; PNG cannot compress it.
    fn make_noise_png(w: u32, h: u32) -> Vec<u8> {
        let mut state: u32 = 0x1234_5678;
        let img: ImageBuffer<Rgba<u8>, _> = ImageBuffer::from_fn(w, h, |_, _| {
            let mut px = [0u8; 4];
            for c in px.iter_mut() {
                state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
                *c = (state >> 24) as u8;
            }
            Rgba(px)
        });
        let mut cur = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut cur, ImageFormat::Png)
            .expect("encode png");
        cur.into_inner()
    }

    fn dims_of(bytes: &[u8]) -> (u32, u32) {
        image::load_from_memory(bytes)
            .expect("decode output")
            .dimensions()
    }

    #[test]
    fn fit_within_wide_image() {
        assert_eq!(fit_within(1000, 500, 555, 555), (555, 278));
    }

    #[test]
    fn fit_within_tall_image() {
        assert_eq!(fit_within(300, 1200, 555, 555), (139, 555));
    }

    #[test]
    fn fit_within_square_and_inside_box() {
        assert_eq!(fit_within(1110, 1110, 555, 555), (555, 555));
        assert_eq!(fit_within(555, 555, 555, 555), (555, 555));
        assert_eq!(fit_within(100, 50, 555, 555), (100, 50));
        assert_eq!(fit_within(1, 1, 555, 555), (1, 1));
    }

    #[test]
    fn fit_within_never_collapses_to_zero() {
        assert_eq!(fit_within(10_000, 1, 100, 100), (100, 1));
    }

    #[test]
    fn png_is_fit_into_box_without_crop() {
        let p = ImageRsProcessor::new(NormalizeOpts::new(555, 555));
        let out = p
            .normalize(&make_png(1000, 500), AllowedFormat::Png)
            .expect("normalize ok");

        assert_eq!(out.content_type, "image/png");
        assert_eq!(&out.bytes[0..8], &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]);
        assert_eq!((out.width, out.height), (555, 278));
        assert_eq!(dims_of(&out.bytes), (555, 278));
    }

    #[test]
    fn jpeg_is_fit_into_box_and_stays_jpeg() {
        let p = ImageRsProcessor::new(NormalizeOpts::new(555, 555));
        let out = p
            .normalize(&make_jpeg(2000, 1000), AllowedFormat::Jpeg)
            .expect("normalize ok");

        assert_eq!(out.content_type, "image/jpeg");
        assert_eq!(&out.bytes[0..3], &[0xFF, 0xD8, 0xFF]);

        let (rw, rh) = dims_of(&out.bytes);
        assert!(rw <= 555 && rh <= 555, "resized dims: {rw}x{rh}");
        let ratio = (rw as f64) / (rh as f64);
        assert!((ratio - 2.0).abs() < 0.01, "ratio approx 2.0, got {ratio}");
    }

    #[test]
    fn small_image_is_not_upscaled() {
        let p = ImageRsProcessor::default();

        let out = p
            .normalize(&make_png(100, 50), AllowedFormat::Png)
            .expect("png ok");
        assert_eq!(dims_of(&out.bytes), (100, 50));

        let out = p
            .normalize(&make_jpeg(120, 90), AllowedFormat::Jpeg)
            .expect("jpeg ok");
        assert_eq!(dims_of(&out.bytes), (120, 90));
    }

    #[test]
    fn png_declared_as_jpeg_fails_to_decode() {
        let p = ImageRsProcessor::default();
        let err = p
            .normalize(&make_png(20, 20), AllowedFormat::Jpeg)
            .unwrap_err();
        assert!(
            matches!(err, ImageError::Decode { format: "image/jpeg", .. }),
            "got {err:?}"
        );
    }

    #[test]
    fn jpeg_declared_as_png_fails_to_decode() {
        let p = ImageRsProcessor::default();
        let err = p
            .normalize(&make_jpeg(20, 20), AllowedFormat::Png)
            .unwrap_err();
        assert!(
            matches!(err, ImageError::Decode { format: "image/png", .. }),
            "got {err:?}"
        );
    }

    #[test]
    fn garbage_and_truncated_input_fail_to_decode() {
        let p = ImageRsProcessor::default();

        let err = p
            .normalize(b"definitely not an image", AllowedFormat::Png)
            .unwrap_err();
        assert!(matches!(err, ImageError::Decode { .. }));

        let err = p.normalize(&[], AllowedFormat::Jpeg).unwrap_err();
        assert!(matches!(err, ImageError::Decode { .. }));

        let png = make_png(64, 64);
        let err = p
            .normalize(&png[..png.len() / 2], AllowedFormat::Png)
            .unwrap_err();
        assert!(matches!(err, ImageError::Decode { .. }));
    }

    #[test]
    fn decoder_allocation_limit_is_enforced() {
        let p = ImageRsProcessor::new(NormalizeOpts::default().with_max_decode_alloc(64));
        let err = p
            .normalize(&make_png(100, 50), AllowedFormat::Png)
            .unwrap_err();
        assert!(
            matches!(
                err,
                ImageError::Decode {
                    source: image::ImageError::Limits(_),
                    ..
                }
            ),
            "got {err:?}"
        );
    }

    #[test]
    fn extreme_dimensions_are_rejected_before_decoding() {
        // A tiny file: a flat grayscale strip compresses to about a kilobyte.
        let strip: ImageBuffer<Luma<u8>, _> = ImageBuffer::from_pixel(60_000, 4, Luma([128]));
        let mut cur = Cursor::new(Vec::new());
        DynamicImage::ImageLuma8(strip)
            .write_to(&mut cur, ImageFormat::Png)
            .expect("encode png");

        let err = ImageRsProcessor::default()
            .normalize(&cur.into_inner(), AllowedFormat::Png)
            .unwrap_err();
        assert!(
            matches!(
                err,
                ImageError::Decode {
                    source: image::ImageError::Limits(_),
                    ..
                }
            ),
            "got {err:?}"
        );
    }

    #[test]
    fn dimension_limits_are_configurable() {
        let p = ImageRsProcessor::new(NormalizeOpts::default().with_max_decode_dimensions(64, 64));
        assert!(p.normalize(&make_png(64, 64), AllowedFormat::Png).is_ok());

        let err = p.normalize(&make_png(65, 10), AllowedFormat::Png).unwrap_err();
        assert!(err.is_client_error(), "got {err:?}");
        assert!(matches!(err, ImageError::Decode { .. }));
    }

    #[test]
    fn high_entropy_png_over_ceiling_is_rejected() {
        let p = ImageRsProcessor::new(NormalizeOpts::default().with_max_file_size(4 * 1024));
        let err = p
            .normalize(&make_noise_png(128, 128), AllowedFormat::Png)
            .unwrap_err();
        match err {
            ImageError::TooLarge { size, max } => {
                assert_eq!(max, 4 * 1024);
                assert!(size > max);
            }
            other => panic!("expected TooLarge, got {other:?}"),
        }
    }

    #[test]
    fn output_under_ceiling_is_accepted() {
        let p = ImageRsProcessor::default();
        let out = p
            .normalize(&make_noise_png(128, 128), AllowedFormat::Png)
            .expect("under default ceiling");
        assert!(out.bytes.len() <= p.opts().max_file_size);
    }

    #[test]
    fn jpeg_quality_is_applied() {
        let input = make_jpeg(300, 300);
        let low = ImageRsProcessor::new(NormalizeOpts::default().with_jpeg_quality(10))
            .normalize(&input, AllowedFormat::Jpeg)
            .expect("low ok");
        let high = ImageRsProcessor::new(NormalizeOpts::default().with_jpeg_quality(95))
            .normalize(&input, AllowedFormat::Jpeg)
            .expect("high ok");
        assert!(low.bytes.len() < high.bytes.len());
    }

    #[test]
    fn normalization_is_deterministic() {
        let p = ImageRsProcessor::default();

        let png = make_png(1000, 500);
        let a = p.normalize(&png, AllowedFormat::Png).expect("a");
        let b = p.normalize(&png, AllowedFormat::Png).expect("b");
        assert_eq!(a, b);

        let jpeg = make_jpeg(800, 600);
        let a = p.normalize(&jpeg, AllowedFormat::Jpeg).expect("a");
        let b = p.normalize(&jpeg, AllowedFormat::Jpeg).expect("b");
        assert_eq!(a, b);
    }
}
