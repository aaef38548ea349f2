// Turns the rasterized text into the byte layout the compositor blits directly:
// B, G, R, A per pixel, rows top to bottom, 8 bits per channel.

use crate::error::Error;
use crate::types::{DevicePixelBuffer, RasterImage};

/// Build the device buffer for `image`.
/// Each 16-bit channel keeps only its high byte; no premultiplication, no colour conversion.
/// The only failure is not getting the memory for the output.
pub fn build<I: RasterImage + ?Sized>(image: &I) -> Result<DevicePixelBuffer, Error> {
    let (w, h) = (image.width(), image.height());
    let len = (w as usize)
        .checked_mul(h as usize)
        .and_then(|n| n.checked_mul(DevicePixelBuffer::BYTES_PER_PIXEL));

    let mut bytes = Vec::<u8>::new();
    let reserved = match len {
        Some(len) => bytes.try_reserve_exact(len),
        // Size not even representable: ask for the impossible to get the same error kind.
        None => bytes.try_reserve_exact(usize::MAX),
    };
    reserved.map_err(|source| Error::Allocation {
        width: w,
        height: h,
        bytes: len.unwrap_or(usize::MAX),
        source,
    })?;

    // Row 0 of the output is the top row, independent of the source's storage order.
    for y in 0..h {
        for x in 0..w {
            let [r, g, b, a] = image.rgba16(x, y);
            bytes.extend_from_slice(&[high_byte(b), high_byte(g), high_byte(r), high_byte(a)]);
        }
    }

    log::debug!("device buffer built: {w}x{h}, {} bytes", bytes.len());
    Ok(DevicePixelBuffer::from_parts(w, h, bytes))
}

#[inline]
fn high_byte(v: u16) -> u8 {
    (v >> 8) as u8
}
