// Derives the window shape from the alpha channel: every pixel with alpha > 0 is
// visible, everything else is cut away.

use crate::types::{ClipRegion, RasterImage, Rect};

/// Scan `image` row by row and collect its opaque runs as rectangles.
///
/// A run that spans exactly the same columns as one in the row above extends that
/// rectangle downwards instead of starting a new one, so a solid block comes out as a
/// single rectangle. The covered pixel set is the same either way.
pub fn extract<I: RasterImage + ?Sized>(image: &I) -> ClipRegion {
    let (w, h) = (image.width(), image.height());
    let mut rects: Vec<Rect> = Vec::new();
    // Indices into `rects` of the runs closed on the previous / current row, left to right.
    let mut above: Vec<usize> = Vec::new();
    let mut current: Vec<usize> = Vec::new();

    for y in 0..h {
        let mut opaque = false;
        let mut start = 0;
        for x in 0..w {
            if image.alpha16(x, y) > 0 {
                if !opaque {
                    opaque = true;
                    start = x;
                }
            } else if opaque {
                opaque = false;
                add_run(&mut rects, &above, &mut current, start, x, y);
            }
        }
        // Run still open at the right edge closes at `w`, one past the last column.
        if opaque {
            add_run(&mut rects, &above, &mut current, start, w, y);
        }

        std::mem::swap(&mut above, &mut current);
        current.clear();
    }

    log::debug!("clip region: {} rects from {w}x{h} image", rects.len());
    ClipRegion::from_rects(rects)
}

/// Union `[start, end) x [y, y + 1)` into the region.
fn add_run(rects: &mut Vec<Rect>, above: &[usize], current: &mut Vec<usize>, start: u32, end: u32, y: u32) {
    let (left, right, top) = (start as i32, end as i32, y as i32);

    // `above` is sorted by left edge since runs are found left to right.
    let matched = above
        .binary_search_by_key(&left, |&i| rects[i].left)
        .ok()
        .filter(|&i| rects[above[i]].right == right)
        .map(|i| above[i]);

    match matched {
        Some(i) => {
            rects[i].bottom = top + 1;
            current.push(i);
        }
        None => {
            current.push(rects.len());
            rects.push(Rect::new(left, top, right, top + 1));
        }
    }
}
