use std::fmt;
use std::str::FromStr;

use crate::image::Pixel;
use crate::{Error, Result};

/// Placement of one color channel inside the packed word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChannelLayout {
    /// high-order bits kept from the 8-bit sample
    pub bits: u8,
    /// shift of the kept bits inside the packed word
    pub offset: u8,
}

impl ChannelLayout {
    pub const fn new(bits: u8, offset: u8) -> Self {
        ChannelLayout { bits, offset }
    }

    fn mask(&self) -> u32 {
        ((1u32 << self.bits) - 1) << self.offset
    }
}

/// Packed RGB layout. Alpha is always dropped.
///
/// Every packed value is written as a big-endian word of `container_bytes` bytes.
/// Only constructible through [`PixelFormat::new`] (or the constants), so packing never fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelFormat {
    red: ChannelLayout,
    green: ChannelLayout,
    blue: ChannelLayout,
    container_bytes: u8,
}

impl PixelFormat {
    /// 4 bits per channel in a 16-bit word, top nibble zero.
    pub const RGB444: PixelFormat = PixelFormat {
        red: ChannelLayout::new(4, 8),
        green: ChannelLayout::new(4, 4),
        blue: ChannelLayout::new(4, 0),
        container_bytes: 2,
    };

    /// 3-3-2 bits in a single byte.
    pub const RGB332: PixelFormat = PixelFormat {
        red: ChannelLayout::new(3, 5),
        green: ChannelLayout::new(3, 2),
        blue: ChannelLayout::new(2, 0),
        container_bytes: 1,
    };

    pub fn new(
        red: ChannelLayout,
        green: ChannelLayout,
        blue: ChannelLayout,
        container_bytes: u8,
    ) -> Result<Self> {
        if !(1..=4).contains(&container_bytes) {
            return Err(Error::InvalidFormatConfiguration(format!(
                "container must be 1 to 4 bytes, got {}",
                container_bytes
            )));
        }
        let container_bits = container_bytes as u32 * 8;
        let mut used = 0u32;
        for (name, ch) in [("red", red), ("green", green), ("blue", blue)] {
            if !(1..=8).contains(&ch.bits) {
                return Err(Error::InvalidFormatConfiguration(format!(
                    "{} channel must keep 1 to 8 bits, got {}",
                    name, ch.bits
                )));
            }
            if ch.offset as u32 + ch.bits as u32 > container_bits {
                return Err(Error::InvalidFormatConfiguration(format!(
                    "{} channel bits {}..{} exceed the {}-bit container",
                    name,
                    ch.offset,
                    ch.offset as u32 + ch.bits as u32,
                    container_bits
                )));
            }
            if used & ch.mask() != 0 {
                return Err(Error::InvalidFormatConfiguration(format!(
                    "{} channel bits {}..{} overlap another channel",
                    name,
                    ch.offset,
                    ch.offset as u32 + ch.bits as u32
                )));
            }
            used |= ch.mask();
        }
        Ok(PixelFormat {
            red,
            green,
            blue,
            container_bytes,
        })
    }

    /// Parses `RGBxyz` (one digit per channel), or the aliases `12`/`format-12` and `8`/`format-8`.
    /// Blue is packed at bit 0 with green and red above it, in the smallest byte container that fits.
    pub fn parse(format: &str) -> Result<Self> {
        let format_lower = format.trim().to_ascii_lowercase();
        match format_lower.as_str() {
            "12" | "format-12" => return Ok(Self::RGB444),
            "8" | "format-8" => return Ok(Self::RGB332),
            _ => {}
        }

        let digits = format_lower.strip_prefix("rgb").ok_or_else(|| {
            Error::InvalidFormatConfiguration(format!(
                "unknown format '{}': expected RGB followed by 3 digits (e.g. RGB444)",
                format
            ))
        })?;
        let bits: Vec<u8> = digits
            .chars()
            .map(|c| c.to_digit(10).map(|d| d as u8))
            .collect::<Option<_>>()
            .filter(|v: &Vec<u8>| v.len() == 3)
            .ok_or_else(|| {
                Error::InvalidFormatConfiguration(format!(
                    "invalid format '{}': expected RGB followed by 3 digits (e.g. RGB444)",
                    format
                ))
            })?;
        let (bits_r, bits_g, bits_b) = (bits[0], bits[1], bits[2]);
        let total_bits = bits_r as u32 + bits_g as u32 + bits_b as u32;
        let container_bytes = ((total_bits + 7) / 8).max(1) as u8;

        Self::new(
            ChannelLayout::new(bits_r, bits_g.saturating_add(bits_b)),
            ChannelLayout::new(bits_g, bits_b),
            ChannelLayout::new(bits_b, 0),
            container_bytes,
        )
    }

    pub fn red(&self) -> ChannelLayout {
        self.red
    }
    pub fn green(&self) -> ChannelLayout {
        self.green
    }
    pub fn blue(&self) -> ChannelLayout {
        self.blue
    }
    pub fn bytes_per_pixel(&self) -> usize {
        self.container_bytes as usize
    }
    pub fn container_bits(&self) -> u32 {
        self.container_bytes as u32 * 8
    }

    pub fn name(&self) -> String {
        format!("RGB{}{}{}", self.red.bits, self.green.bits, self.blue.bits)
    }

    /// Quantizes and composes one pixel, result fits in `container_bits()`.
    pub fn pack(&self, pixel: Pixel) -> u32 {
        ((quantize(pixel.r, self.red.bits) as u32) << self.red.offset)
            | ((quantize(pixel.g, self.green.bits) as u32) << self.green.offset)
            | ((quantize(pixel.b, self.blue.bits) as u32) << self.blue.offset)
    }
}

impl FromStr for PixelFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Keeps the top `bits` bits of an 8-bit sample. `bits` must be in 1..=8.
#[inline]
pub fn quantize(sample: u8, bits: u8) -> u8 {
    debug_assert!(bits >= 1 && bits <= 8);
    sample >> (8 - bits)
}

/// Packs every pixel in order, `format.bytes_per_pixel()` big-endian bytes each.
pub fn pack_pixels(pixels: &[Pixel], format: &PixelFormat) -> Vec<u8> {
    let mut packed = Vec::with_capacity(pixels.len() * format.bytes_per_pixel());
    pack_pixels_into(pixels, format, &mut packed);
    packed
}

/// Same as [`pack_pixels`], appending to `out`.
pub fn pack_pixels_into(pixels: &[Pixel], format: &PixelFormat, out: &mut Vec<u8>) {
    let n = format.bytes_per_pixel();
    out.reserve(pixels.len() * n);
    for pixel in pixels {
        let word = format.pack(*pixel).to_be_bytes();
        out.extend_from_slice(&word[4 - n..]);
    }
}
