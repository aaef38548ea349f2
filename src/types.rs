// Core types shared by the bitmap builder, the region extractor and the overlay.

use std::ops::Deref;
use std::str::FromStr;

use image::{ImageBuffer, Rgba};

/// Rasterized text as produced by the glyph rasterizer: 16 bits per channel.
pub type RasterImage16 = ImageBuffer<Rgba<u16>, Vec<u16>>;

/// Read access to an RGBA image with 16-bit channels.
/// Coordinates start at the top-left pixel; row 0 is the top row no matter how the
/// pixels are stored underneath.
pub trait RasterImage {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// `[R, G, B, A]` at (x, y), each 0..=0xFFFF.
    fn rgba16(&self, x: u32, y: u32) -> [u16; 4];

    /// Alpha channel only.
    fn alpha16(&self, x: u32, y: u32) -> u16 {
        self.rgba16(x, y)[3]
    }
}

impl<C> RasterImage for ImageBuffer<Rgba<u16>, C>
where
    C: Deref<Target = [u16]>,
{
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn rgba16(&self, x: u32, y: u32) -> [u16; 4] {
        self.get_pixel(x, y).0
    }
}

/// 8-bit images widen every channel with `v * 257` (0xAB -> 0xABAB), so 0xFF maps to 0xFFFF.
impl<C> RasterImage for ImageBuffer<Rgba<u8>, C>
where
    C: Deref<Target = [u8]>,
{
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn rgba16(&self, x: u32, y: u32) -> [u16; 4] {
        self.get_pixel(x, y).0.map(widen)
    }
}

#[inline]
fn widen(v: u8) -> u16 {
    v as u16 * 257
}

/// Byte-packed pixels ready for blitting: 4 bytes per pixel in the order
/// blue, green, red, alpha; rows top to bottom, no padding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DevicePixelBuffer {
    width: u32,
    height: u32,
    bytes: Vec<u8>,
}

impl DevicePixelBuffer {
    pub const BYTES_PER_PIXEL: usize = 4;

    /// `bytes.len()` must be `width * height * 4`.
    pub(crate) fn from_parts(width: u32, height: u32, bytes: Vec<u8>) -> Self {
        debug_assert_eq!(bytes.len(), width as usize * height as usize * Self::BYTES_PER_PIXEL);
        Self { width, height, bytes }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// `[B, G, R, A]` at (x, y).
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.width as usize + x as usize) * Self::BYTES_PER_PIXEL;
        [self.bytes[i], self.bytes[i + 1], self.bytes[i + 2], self.bytes[i + 3]]
    }
}

/// Lets a built buffer be fed back into the region extractor.
impl RasterImage for DevicePixelBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn rgba16(&self, x: u32, y: u32) -> [u16; 4] {
        let [b, g, r, a] = self.pixel(x, y);
        [widen(r), widen(g), widen(b), widen(a)]
    }
}

/// Axis-aligned rectangle, half-open: covers `left..right` x `top..bottom`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }
}

/// Visible shape of the overlay: a set of non-overlapping rectangles.
/// A pixel is visible iff some rectangle contains it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClipRegion {
    rects: Vec<Rect>,
}

impl ClipRegion {
    /// Caller guarantees the rectangles do not overlap and none is empty.
    pub(crate) fn from_rects(rects: Vec<Rect>) -> Self {
        debug_assert!(rects.iter().all(|r| !r.is_empty()));
        Self { rects }
    }

    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Number of covered pixels.
    pub fn area(&self) -> u64 {
        self.rects
            .iter()
            .map(|r| r.width() as u64 * r.height() as u64)
            .sum()
    }

    /// Smallest rectangle enclosing the whole region, `None` when empty.
    pub fn bounds(&self) -> Option<Rect> {
        let first = *self.rects.first()?;
        Some(self.rects[1..].iter().fold(first, |acc, r| Rect {
            left: acc.left.min(r.left),
            top: acc.top.min(r.top),
            right: acc.right.max(r.right),
            bottom: acc.bottom.max(r.bottom),
        }))
    }

    /// Rasterize the region into a row-major `width * height` visibility mask.
    /// Parts of rectangles outside `0..width` x `0..height` are dropped.
    pub fn to_mask(&self, width: usize, height: usize) -> Vec<bool> {
        let mut mask = vec![false; width * height];
        for r in &self.rects {
            let x0 = r.left.clamp(0, width as i32) as usize;
            let x1 = r.right.clamp(0, width as i32) as usize;
            let y0 = r.top.clamp(0, height as i32) as usize;
            let y1 = r.bottom.clamp(0, height as i32) as usize;
            for y in y0..y1 {
                mask[y * width + x0..y * width + x1].fill(true);
            }
        }
        mask
    }
}

/// Usable screen rectangle (screen minus task bars etc).
/// `right` is where the overlay spawns and where it reappears after wrapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorkArea {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Default for WorkArea {
    fn default() -> Self {
        Self { left: 0, top: 0, right: 1920, bottom: 1080 }
    }
}

/// Parses `"left,top,right,bottom"`.
impl FromStr for WorkArea {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split(',')
            .map(|p| p.trim().parse::<i32>().map_err(|e| format!("{p:?}: {e}")))
            .collect::<Result<Vec<_>, _>>()?;
        let &[left, top, right, bottom] = parts.as_slice() else {
            return Err(format!("expected left,top,right,bottom, got {} values", parts.len()));
        };
        if right <= left || bottom <= top {
            return Err(format!("empty work area {s:?}"));
        }
        Ok(Self { left, top, right, bottom })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    #[test]
    fn eight_bit_images_widen_to_full_range() {
        let img = RgbaImage::from_pixel(1, 1, Rgba([0x00, 0x01, 0xAB, 0xFF]));
        assert_eq!(img.rgba16(0, 0), [0x0000, 0x0101, 0xABAB, 0xFFFF]);
    }

    #[test]
    fn device_buffer_reads_back_as_rgba() {
        let buf = DevicePixelBuffer::from_parts(2, 1, vec![1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(buf.pixel(1, 0), [5, 6, 7, 8]);
        assert_eq!(buf.pixel(0, 0)[3], 4);
        assert_eq!(buf.rgba16(0, 0), [3 * 257, 2 * 257, 257, 4 * 257]);
    }

    #[test]
    fn region_mask_clips_to_canvas() {
        let region = ClipRegion::from_rects(vec![Rect::new(-2, 1, 2, 2), Rect::new(3, 0, 9, 1)]);
        let mask = region.to_mask(4, 2);
        assert_eq!(mask, vec![false, false, false, true, true, true, false, false]);
        assert_eq!(region.area(), 4 + 6);
        assert_eq!(region.bounds(), Some(Rect::new(-2, 0, 9, 2)));
    }

    #[test]
    fn empty_region_has_no_bounds() {
        let region = ClipRegion::default();
        assert!(region.is_empty());
        assert_eq!(region.bounds(), None);
        assert_eq!(region.area(), 0);
    }

    #[test]
    fn work_area_parses_four_numbers() {
        let wa: WorkArea = "0, 0, 2560,1400".parse().unwrap();
        assert_eq!(wa, WorkArea { left: 0, top: 0, right: 2560, bottom: 1400 });
        assert!("0,0,1920".parse::<WorkArea>().is_err());
        assert!("0,0,x,1".parse::<WorkArea>().is_err());
        assert!("100,0,100,1".parse::<WorkArea>().is_err());
    }
}
