pub mod bitpack;

pub use bitpack::{pack_pixels, pack_pixels_into, quantize, ChannelLayout, PixelFormat};
