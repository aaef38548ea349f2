// Loads the font and draws the message into a 16-bit RGBA image.
// Output: black text on a fully transparent canvas, one 100px cell per character,
// the whole line centered horizontally on a fixed baseline.

use std::path::Path;

use fontdue::{Font, FontSettings};
use image::Rgba;

use crate::error::Error;
use crate::types::RasterImage16;

/// Canvas width reserved per character.
pub const CELL_WIDTH: u32 = 100;
/// Canvas height, whatever the text.
pub const CANVAS_HEIGHT: u32 = 100;
/// Distance from the top of the canvas to the baseline.
pub const BASELINE: i32 = 90;

/// Read and parse a TrueType font (or one face of a `.ttc` collection).
pub fn load_font(path: &Path, collection_index: u32) -> Result<Font, Error> {
    let data = std::fs::read(path).map_err(|source| Error::FontRead { path: path.to_path_buf(), source })?;

    let settings = FontSettings { collection_index, ..FontSettings::default() };
    let font = Font::from_bytes(data, settings).map_err(|reason| Error::FontParse {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    })?;

    log::info!("font loaded: {} (face {collection_index})", path.display());
    Ok(font)
}

/// Width of the pen run for `text` at `size` px, kerning included.
pub fn measure(font: &Font, text: &str, size: f32) -> f32 {
    let mut width = 0.0;
    let mut prev = None;
    for ch in text.chars() {
        width += kern(font, prev, ch, size) + font.metrics(ch, size).advance_width;
        prev = Some(ch);
    }
    width
}

fn kern(font: &Font, prev: Option<char>, ch: char, size: f32) -> f32 {
    prev.and_then(|p| font.horizontal_kern(p, ch, size)).unwrap_or(0.0)
}

/// Draw `text` at `size` px. Canvas is `chars * CELL_WIDTH` by `CANVAS_HEIGHT`;
/// glyph pixels that fall outside it are dropped.
pub fn rasterize(font: &Font, text: &str, size: f32) -> RasterImage16 {
    let width = text.chars().count() as u32 * CELL_WIDTH;
    let mut img = RasterImage16::new(width, CANVAS_HEIGHT);

    let mut pen_x = (width as f32 - measure(font, text, size)) / 2.0;
    let mut prev = None;
    for ch in text.chars() {
        pen_x += kern(font, prev, ch, size);
        let (metrics, coverage) = font.rasterize(ch, size);

        // fontdue bitmaps are top row first; ymin is the bottom edge above the baseline.
        let left = pen_x.round() as i32 + metrics.xmin;
        let top = BASELINE - metrics.height as i32 - metrics.ymin;
        for gy in 0..metrics.height {
            for gx in 0..metrics.width {
                let c = coverage[gy * metrics.width + gx];
                if c == 0 {
                    continue;
                }
                let (x, y) = (left + gx as i32, top + gy as i32);
                if x < 0 || y < 0 || x >= width as i32 || y >= CANVAS_HEIGHT as i32 {
                    continue;
                }
                let px = img.get_pixel_mut(x as u32, y as u32);
                // Overlapping glyphs keep the stronger coverage.
                let a = (c as u16 * 257).max(px.0[3]);
                *px = Rgba([0, 0, 0, a]);
            }
        }

        pen_x += metrics.advance_width;
        prev = Some(ch);
    }

    log::info!("rasterized {text:?} at {size}px into {width}x{CANVAS_HEIGHT}");
    img
}

/// Write the rasterized text to disk (16-bit PNG when the extension is `.png`).
pub fn save(img: &RasterImage16, path: &Path) -> Result<(), Error> {
    img.save(path)
        .map_err(|source| Error::ImageSave { path: path.to_path_buf(), source })?;
    log::info!("rasterized image written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    static MONO: &[u8] = include_bytes!("../fixtures/DejaVuSansMono.ttf");

    fn mono() -> Font {
        Font::from_bytes(MONO, FontSettings::default()).unwrap()
    }

    /// (left, top, right, bottom) of all pixels with alpha > 0, half-open.
    fn ink_bounds(img: &RasterImage16) -> Option<(u32, u32, u32, u32)> {
        let mut bounds: Option<(u32, u32, u32, u32)> = None;
        for (x, y, px) in img.enumerate_pixels() {
            if px.0[3] == 0 {
                continue;
            }
            let (l, t, r, b) = bounds.unwrap_or((x, y, x + 1, y + 1));
            bounds = Some((l.min(x), t.min(y), r.max(x + 1), b.max(y + 1)));
        }
        bounds
    }

    /// Every pixel is black; alpha is 8-bit coverage widened by 257.
    fn assert_black_ink(img: &RasterImage16) {
        for (x, y, px) in img.enumerate_pixels() {
            let [r, g, b, a] = px.0;
            assert_eq!((r, g, b), (0, 0, 0), "colour at ({x}, {y})");
            assert_eq!(a % 257, 0, "alpha {a:#x} at ({x}, {y})");
        }
    }

    #[test]
    fn canvas_is_one_cell_per_char() {
        let font = mono();
        let img = rasterize(&font, "Hi", 50.0);
        assert_eq!((img.width(), img.height()), (200, 100));
        let img = rasterize(&font, "日本", 50.0);
        assert_eq!(img.dimensions(), (200, CANVAS_HEIGHT));
    }

    #[test]
    fn text_is_black_centered_and_sits_on_the_baseline() {
        let img = rasterize(&mono(), "HH", 50.0);
        assert_black_ink(&img);

        let (left, top, right, bottom) = ink_bounds(&img).expect("no ink drawn");
        // Flat-bottomed glyphs end on the row just above the baseline.
        assert!((BASELINE as u32 - 1..=BASELINE as u32).contains(&(bottom - 1)), "bottom row {}", bottom - 1);
        assert!(top > 0, "cap height should fit under the top edge");
        let (lmargin, rmargin) = (left as i32, img.width() as i32 - right as i32);
        assert!((lmargin - rmargin).abs() <= 4, "margins {lmargin} / {rmargin}");
    }

    #[test]
    fn oversized_glyphs_are_clipped_to_the_canvas() {
        // A full block this large overhangs the 100x100 cell on every side.
        let img = rasterize(&mono(), "\u{2588}", 400.0);
        assert_eq!(img.dimensions(), (CELL_WIDTH, CANVAS_HEIGHT));
        assert_black_ink(&img);
        assert_eq!(ink_bounds(&img), Some((0, 0, CELL_WIDTH, CANVAS_HEIGHT)));
    }

    #[test]
    fn measure_adds_advances() {
        let font = mono();
        let one = measure(&font, "H", 50.0);
        assert!(one > 0.0);
        // Monospaced, no kerning pairs.
        assert!((measure(&font, "HHH", 50.0) - 3.0 * one).abs() < 0.01);
        assert_eq!(measure(&font, "", 50.0), 0.0);
    }

    fn load_err(path: &Path) -> Error {
        match load_font(path, 0) {
            Ok(_) => panic!("{} unexpectedly loaded", path.display()),
            Err(e) => e,
        }
    }

    #[test]
    fn missing_font_is_a_read_error() {
        let err = load_err(Path::new("/definitely/not/here.ttf"));
        assert!(matches!(err, Error::FontRead { .. }), "{err}");
    }

    #[test]
    fn garbage_font_is_a_parse_error() {
        let path = std::env::temp_dir().join(format!("marquee-garbage-{}.ttf", std::process::id()));
        std::fs::write(&path, b"this is not a font").unwrap();
        let err = load_err(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, Error::FontParse { .. }), "{err}");
    }

    #[test]
    fn font_file_loads_from_disk() {
        let path = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures/DejaVuSansMono.ttf");
        assert!(load_font(&path, 0).is_ok());
    }
}
