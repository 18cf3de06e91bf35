//! Pixel-exact line rasterization.

use crate::foundation::error::{GlyphGridError, GlyphGridResult};
use crate::glyph::shape::PixelBox;
use crate::grid::Grid;

/// Write `value` into every cell of the 8-connected line from `(x0, y0)` to `(x1, y1)`,
/// both endpoints included.
///
/// Integer-only Bresenham with a symmetric error accumulator. Both endpoints must lie
/// inside `canvas`; every other cell of the line is inside their bounding box, so the
/// check happens once up front and nothing is written on failure. On a stacked canvas
/// every plane of a covered cell receives `value`.
pub fn draw_line<T: Clone>(
    canvas: &mut Grid<T>,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    value: T,
) -> GlyphGridResult<()> {
    let (w, h) = (canvas.width(), canvas.height());
    for (x, y) in [(x0, y0), (x1, y1)] {
        let inside =
            usize::try_from(x).is_ok_and(|x| x < w) && usize::try_from(y).is_ok_and(|y| y < h);
        if !inside {
            return Err(GlyphGridError::bounds(format!(
                "line endpoint ({x}, {y}) outside {w}x{h} canvas"
            )));
        }
    }

    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx - dy;
    let (mut x, mut y) = (x0, y0);

    loop {
        if let Some(cell) = canvas.cell_mut(x as usize, y as usize) {
            cell.fill(value.clone());
        }

        if x == x1 && y == y1 {
            break;
        }

        let e2 = err * 2;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
    Ok(())
}

/// Visit the cells of the line from `(x0, y0)` to `(x1, y1)` that fall inside `window`.
///
/// Produces exactly the cells [`draw_line`] would, without walking the parts of the
/// line outside `window`: after `j` steps along the major axis the minor axis has
/// moved `max(0, ceil((2·j·d_minor − d_major) / (2·d_major)))` cells, so only the
/// steps whose major coordinate lands in the window are evaluated. Arithmetic is in
/// i64/i128, so endpoints anywhere in i32 range are fine.
pub(crate) fn for_each_line_cell_in(
    (x0, y0): (i64, i64),
    (x1, y1): (i64, i64),
    window: &PixelBox,
    mut visit: impl FnMut(i64, i64),
) {
    let (dx, dy) = ((x1 - x0).abs(), (y1 - y0).abs());
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let x_major = dx >= dy;
    let (d_major, d_minor) = if x_major { (dx, dy) } else { (dy, dx) };
    let (start, s_major) = if x_major { (x0, sx) } else { (y0, sy) };
    let (lo, hi) = if x_major {
        (i64::from(window.x0), i64::from(window.x1) - 1)
    } else {
        (i64::from(window.y0), i64::from(window.y1) - 1)
    };
    if lo > hi {
        return;
    }

    // Steps j in [0, d_major] whose major coordinate start + s_major * j is in [lo, hi].
    let (j_lo, j_hi) = if s_major > 0 {
        (lo - start, hi - start)
    } else {
        (start - hi, start - lo)
    };
    let (j_lo, j_hi) = (j_lo.max(0), j_hi.min(d_major));

    let minor_steps = |j: i64| -> i64 {
        let num = 2 * i128::from(j) * i128::from(d_minor) - i128::from(d_major);
        if num <= 0 {
            return 0;
        }
        let den = 2 * i128::from(d_major);
        // num > 0 implies d_major > 0; the quotient is at most j.
        ((num + den - 1) / den) as i64
    };

    for j in j_lo..=j_hi {
        let m = minor_steps(j);
        let (x, y) = if x_major {
            (x0 + sx * j, y0 + sy * m)
        } else {
            (x0 + sx * m, y0 + sy * j)
        };
        if window.contains(x, y) {
            visit(x, y);
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/geometry.rs"]
mod tests;
