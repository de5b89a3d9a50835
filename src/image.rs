use crate::{Error, Result};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Pixel { r, g, b, a }
    }
}

impl From<[u8; 4]> for Pixel {
    fn from(value: [u8; 4]) -> Self {
        Pixel::new(value[0], value[1], value[2], value[3])
    }
}

impl From<(u8, u8, u8, u8)> for Pixel {
    fn from(value: (u8, u8, u8, u8)) -> Self {
        Pixel::new(value.0, value.1, value.2, value.3)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl<T> From<(T, T)> for Size
where
    T: Into<u32>,
{
    fn from(value: (T, T)) -> Self {
        Size {
            width: value.0.into(),
            height: value.1.into(),
        }
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Owned RGBA image, pixels stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbaImage {
    size: Size,
    pixels: Vec<Pixel>,
}

impl RgbaImage {
    pub fn new(size: Size, pixels: Vec<Pixel>) -> Result<Self> {
        if size.width == 0 || size.height == 0 || pixels.len() != size.pixel_count() {
            return Err(Error::InvalidImageSize {
                width: size.width,
                height: size.height,
                pixels: pixels.len(),
            });
        }
        Ok(RgbaImage { size, pixels })
    }

    /// Builds an image from interleaved RGBA bytes, 4 bytes per pixel.
    pub fn from_rgba_bytes(size: Size, data: &[u8]) -> Result<Self> {
        if data.len() % 4 != 0 {
            return Err(Error::InvalidImageSize {
                width: size.width,
                height: size.height,
                pixels: data.len() / 4,
            });
        }
        let pixels = data
            .chunks_exact(4)
            .map(|px| Pixel::new(px[0], px[1], px[2], px[3]))
            .collect();
        Self::new(size, pixels)
    }

    pub fn size(&self) -> Size {
        self.size
    }
    pub fn width(&self) -> u32 {
        self.size.width
    }
    pub fn height(&self) -> u32 {
        self.size.height
    }
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }
}


pub mod convert;
