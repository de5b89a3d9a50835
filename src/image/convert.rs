use std::path::Path;

use image as imagex; // external, for decoding
use log::debug;

use super::*;

/// Converts a decoded image of any color type to our own RGBA image.
pub fn from_dynamic(img: &imagex::DynamicImage) -> Result<RgbaImage> {
    let img_x = img.to_rgba8();
    let size: Size = (img_x.width(), img_x.height()).into();
    RgbaImage::from_rgba_bytes(size, img_x.as_raw())
}

/// Decodes an encoded image, format guessed from content.
/// `origin` is only used for error reporting.
pub fn decode(data: &[u8], origin: &Path) -> Result<RgbaImage> {
    let img_x = imagex::load_from_memory(data).map_err(|source| Error::Decode {
        path: origin.to_path_buf(),
        source,
    })?;
    from_dynamic(&img_x)
}

/// Lanczos3 resample to exactly `target` with color channels weighted by alpha,
/// so fully transparent areas come out black instead of bleeding their hidden RGB.
pub fn resize_premultiplied(img_x: &imagex::RgbaImage, target: Size) -> imagex::RgbaImage {
    let mut premultiplied = img_x.clone();
    for px in premultiplied.pixels_mut() {
        let alpha = px[3] as u32;
        for c in &mut px.0[..3] {
            *c = ((*c as u32 * alpha + 127) / 255) as u8;
        }
    }

    let mut resized = imagex::imageops::resize(
        &premultiplied,
        target.width,
        target.height,
        imagex::imageops::FilterType::Lanczos3,
    );
    for px in resized.pixels_mut() {
        let alpha = px[3] as u32;
        for c in &mut px.0[..3] {
            *c = match alpha {
                0 => 0,
                _ => ((*c as u32 * 255 + alpha / 2) / alpha).min(255) as u8,
            };
        }
    }
    resized
}

/// Decodes and resamples to exactly `target`. Aspect ratio is not kept.
pub fn decode_resized(data: &[u8], origin: &Path, target: Size) -> Result<RgbaImage> {
    if target.width == 0 || target.height == 0 {
        return Err(Error::InvalidImageSize {
            width: target.width,
            height: target.height,
            pixels: 0,
        });
    }
    let mut img_x = imagex::load_from_memory(data)
        .map_err(|source| Error::Decode {
            path: origin.to_path_buf(),
            source,
        })?
        .into_rgba8();
    if img_x.width() != target.width || img_x.height() != target.height {
        debug!(
            "Resizing {} from {}x{} to {}",
            origin.display(),
            img_x.width(),
            img_x.height(),
            target
        );
        img_x = resize_premultiplied(&img_x, target);
    }
    RgbaImage::from_rgba_bytes(target, img_x.as_raw())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_png(img: &imagex::RgbaImage) -> Vec<u8> {
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, imagex::ImageOutputFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_decode_keeps_pixels() {
        let mut img_x = imagex::RgbaImage::new(3, 2);
        img_x.put_pixel(0, 0, imagex::Rgba([255, 0, 0, 255]));
        img_x.put_pixel(2, 1, imagex::Rgba([1, 2, 3, 4]));
        let png = encode_png(&img_x);

        let img = decode(&png, Path::new("test.png")).unwrap();
        assert_eq!(img.size(), Size { width: 3, height: 2 });
        assert_eq!(img.pixels()[0], Pixel::new(255, 0, 0, 255));
        assert_eq!(img.pixels()[5], Pixel::new(1, 2, 3, 4));
    }

    #[test]
    fn test_decode_resized() {
        let img_x = imagex::RgbaImage::from_pixel(8, 8, imagex::Rgba([200, 100, 50, 255]));
        let png = encode_png(&img_x);

        let img = decode_resized(&png, Path::new("test.png"), (4u32, 3u32).into()).unwrap();
        assert_eq!(img.size(), Size { width: 4, height: 3 });
        // uniform color survives resampling
        assert!(img.pixels().iter().all(|px| *px == Pixel::new(200, 100, 50, 255)));
    }

    #[test]
    fn test_resize_transparent_is_black() {
        let img_x = imagex::RgbaImage::from_pixel(6, 6, imagex::Rgba([255, 255, 255, 0]));
        let png = encode_png(&img_x);

        let img = decode_resized(&png, Path::new("test.png"), (3u32, 2u32).into()).unwrap();
        assert_eq!(img.size(), Size { width: 3, height: 2 });
        assert!(img.pixels().iter().all(|px| *px == Pixel::new(0, 0, 0, 0)));
    }

    #[test]
    fn test_resize_same_size_untouched() {
        let img_x = imagex::RgbaImage::from_pixel(2, 2, imagex::Rgba([255, 255, 255, 0]));
        let png = encode_png(&img_x);

        let img = decode_resized(&png, Path::new("test.png"), (2u32, 2u32).into()).unwrap();
        assert!(img.pixels().iter().all(|px| *px == Pixel::new(255, 255, 255, 0)));
    }

    #[test]
    fn test_decode_corrupt() {
        let res = decode(b"definitely not an image", Path::new("bad.png"));
        assert!(matches!(res, Err(Error::Decode { .. })));
    }

    #[test]
    fn test_decode_resized_zero_target() {
        let png = encode_png(&imagex::RgbaImage::new(1, 1));
        let res = decode_resized(&png, Path::new("test.png"), (0u32, 1u32).into());
        assert!(matches!(res, Err(Error::InvalidImageSize { .. })));
    }
}
