//! Shape rasterization. Everything here is integer-only.

use core::mem::swap;

use itertools::iproduct;

use super::Canvas;

/// Bresenham's line algorithm, valid in all octants and inclusive of both endpoints.
pub fn line<C: Canvas + ?Sized>(c: &mut C, mut x0: i32, mut y0: i32, x1: i32, y1: i32) {
    let dx = (x1 as i64 - x0 as i64).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 as i64 - y0 as i64).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        c.set_pixel(x0, y0);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Four edges of the rectangle. Nothing is drawn unless both `w` and `h` are positive.
pub fn rect<C: Canvas + ?Sized>(c: &mut C, x: i32, y: i32, w: i32, h: i32) {
    if w <= 0 || h <= 0 {
        return;
    }
    let right = x.saturating_add(w - 1);
    let bottom = y.saturating_add(h - 1);
    line(c, x, y, right, y);
    line(c, x, bottom, right, bottom);
    line(c, x, y, x, bottom);
    line(c, right, y, right, bottom);
}

/// Every pixel of the half-open region `[x, x + w) x [y, y + h)`.
pub fn fill_rect<C: Canvas + ?Sized>(c: &mut C, x: i32, y: i32, w: i32, h: i32) {
    let columns = x.max(0)..x.saturating_add(w).min(c.width());
    let rows = y.max(0)..y.saturating_add(h).min(c.height());
    for (i, j) in iproduct!(columns, rows) {
        c.set_pixel(i, j);
    }
}

/// Midpoint circle. Each step computes one point of the first octant and mirrors it into the
/// other seven. A negative radius draws nothing, and neither does a circle whose bounding box
/// misses the canvas.
pub fn circle<C: Canvas + ?Sized>(c: &mut C, x0: i32, y0: i32, radius: i32) {
    if radius < 0 {
        return;
    }
    let (cx, cy, r) = (x0 as i64, y0 as i64, radius as i64);
    if cx + r < 0 || cy + r < 0 || cx - r >= c.width() as i64 || cy - r >= c.height() as i64 {
        return;
    }

    let mut x = r;
    let mut y = 0i64;
    let mut err = 0i64;

    while x >= y {
        let octants = [(x, y), (y, x), (-y, x), (-x, y), (-x, -y), (-y, -x), (y, -x), (x, -y)];
        for &(dx, dy) in &octants {
            plot(c, cx + dx, cy + dy);
        }

        y += 1;
        if err <= 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}

/// `set_pixel` for a widened coordinate. Anything beyond `i32` is off every canvas.
fn plot<C: Canvas + ?Sized>(c: &mut C, x: i64, y: i64) {
    if let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) {
        c.set_pixel(x, y);
    }
}

pub fn triangle<C: Canvas + ?Sized>(
    c: &mut C,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
) {
    line(c, x0, y0, x1, y1);
    line(c, x1, y1, x2, y2);
    line(c, x2, y2, x0, y0);
}

/// Scanline fill. Rows run from the top vertex down to, but excluding, the row of the bottom
/// vertex. Each row spans between the long edge (top to bottom vertex) and whichever short edge
/// covers that row.
pub fn fill_triangle<C: Canvas + ?Sized>(
    c: &mut C,
    mut x0: i32,
    mut y0: i32,
    mut x1: i32,
    mut y1: i32,
    mut x2: i32,
    mut y2: i32,
) {
    if y0 > y1 {
        swap(&mut y0, &mut y1);
        swap(&mut x0, &mut x1);
    }
    if y1 > y2 {
        swap(&mut y1, &mut y2);
        swap(&mut x1, &mut x2);
    }
    if y0 > y1 {
        swap(&mut y0, &mut y1);
        swap(&mut x0, &mut x1);
    }

    let (x0, y0, x1, y1, x2, y2) = (
        x0 as i64, y0 as i64, x1 as i64, y1 as i64, x2 as i64, y2 as i64,
    );
    let total_height = y2 - y0;
    let upper_height = y1 - y0;
    let last_column = c.width() as i64 - 1;
    let rows = (-y0).max(0)..total_height.min(c.height() as i64 - y0);

    for i in rows {
        let second_half = i > upper_height || y1 == y0;
        let (segment_i, segment_height) = match second_half {
            true => (i - upper_height, y2 - y1),
            false => (i, upper_height),
        };

        let mut ax = lerp(x0, x2, i, total_height);
        let mut bx = match second_half {
            true => lerp(x1, x2, segment_i, segment_height),
            false => lerp(x0, x1, segment_i, segment_height),
        };
        if ax > bx {
            swap(&mut ax, &mut bx);
        }

        for j in ax.max(0)..=bx.min(last_column) {
            plot(c, j, y0 + i);
        }
    }
}

/// `from + (to - from) * num / den`, rounded towards negative infinity. `den` is positive.
fn lerp(from: i64, to: i64, num: i64, den: i64) -> i64 {
    let offset = ((to - from) as i128 * num as i128).div_euclid(den as i128);
    from + offset as i64
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::super::testing::PixelSet;
    use super::*;

    fn set(points: &[(i32, i32)]) -> BTreeSet<(i32, i32)> {
        points.iter().cloned().collect()
    }

    #[test]
    fn line_single_point() {
        let mut c = PixelSet::new(128, 64);
        line(&mut c, 5, 5, 5, 5);
        assert_eq!(c.pixels, set(&[(5, 5)]));
    }

    #[test]
    fn line_axis_aligned() {
        let mut c = PixelSet::new(128, 64);
        line(&mut c, 2, 3, 6, 3);
        assert_eq!(c.pixels, set(&[(2, 3), (3, 3), (4, 3), (5, 3), (6, 3)]));

        let mut c = PixelSet::new(128, 64);
        line(&mut c, 4, 9, 4, 6);
        assert_eq!(c.pixels, set(&[(4, 6), (4, 7), (4, 8), (4, 9)]));
    }

    #[test]
    fn line_diagonal() {
        let mut c = PixelSet::new(128, 64);
        line(&mut c, 3, 3, 0, 0);
        assert_eq!(c.pixels, set(&[(0, 0), (1, 1), (2, 2), (3, 3)]));
    }

    #[test]
    fn line_every_octant_hits_endpoints_once_per_major_step() {
        let (cx, cy) = (32, 32);
        let targets = [
            (40, 35),
            (35, 40),
            (29, 40),
            (24, 35),
            (24, 29),
            (29, 24),
            (35, 24),
            (40, 29),
        ];
        for &(tx, ty) in &targets {
            let mut c = PixelSet::new(128, 64);
            line(&mut c, cx, cy, tx, ty);
            assert!(c.contains(cx, cy));
            assert!(c.contains(tx, ty));
            let major = (tx - cx).abs().max((ty - cy).abs());
            assert_eq!(c.pixels.len() as i32, major + 1, "line to ({tx}, {ty})");
        }
    }

    #[test]
    fn line_clips_silently() {
        let mut c = PixelSet::new(16, 16);
        line(&mut c, -4, 2, 20, 2);
        assert_eq!(c.pixels.len(), 16);
    }

    #[test]
    fn rect_outline_only() {
        let mut c = PixelSet::new(128, 64);
        rect(&mut c, 10, 10, 6, 6);
        assert_eq!(c.pixels.len(), 20);
        for x in 10..16 {
            for y in 10..16 {
                let edge = x == 10 || x == 15 || y == 10 || y == 15;
                assert_eq!(c.contains(x, y), edge, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn rect_degenerate_sizes() {
        let mut c = PixelSet::new(128, 64);
        rect(&mut c, 10, 10, 0, 6);
        rect(&mut c, 10, 10, 6, -1);
        assert!(c.pixels.is_empty());

        rect(&mut c, 10, 10, 1, 1);
        assert_eq!(c.pixels, set(&[(10, 10)]));
    }

    #[test]
    fn fill_rect_half_open() {
        let mut c = PixelSet::new(128, 64);
        fill_rect(&mut c, 4, 5, 3, 2);
        assert_eq!(
            c.pixels,
            set(&[(4, 5), (5, 5), (6, 5), (4, 6), (5, 6), (6, 6)])
        );
    }

    #[test]
    fn fill_rect_clips_and_ignores_empty() {
        let mut c = PixelSet::new(8, 8);
        fill_rect(&mut c, 3, 3, 0, 4);
        fill_rect(&mut c, 3, 3, 4, -2);
        assert!(c.pixels.is_empty());

        fill_rect(&mut c, -2, 6, 4, 10);
        assert_eq!(c.pixels, set(&[(0, 6), (1, 6), (0, 7), (1, 7)]));
    }

    #[test]
    fn circle_eightfold_symmetry() {
        let mut c = PixelSet::new(128, 64);
        circle(&mut c, 32, 32, 5);
        assert!(c.contains(37, 32));
        assert!(c.contains(27, 32));
        assert!(c.contains(32, 37));
        assert!(c.contains(32, 27));
        assert!(!c.contains(32, 32));
        for &(x, y) in &c.pixels {
            let (dx, dy) = (x - 32, y - 32);
            assert!(c.contains(32 - dx, 32 + dy));
            assert!(c.contains(32 + dx, 32 - dy));
            assert!(c.contains(32 + dy, 32 + dx));
            assert!(c.contains(32 - dy, 32 - dx));
            let dist_sq = dx * dx + dy * dy;
            assert!((16..=36).contains(&dist_sq), "({x}, {y}) off the ring");
        }
    }

    #[test]
    fn circle_degenerate_radius() {
        let mut c = PixelSet::new(128, 64);
        circle(&mut c, 10, 10, 0);
        assert_eq!(c.pixels, set(&[(10, 10)]));

        let mut c = PixelSet::new(128, 64);
        circle(&mut c, 10, 10, -3);
        assert!(c.pixels.is_empty());
    }

    #[test]
    fn triangle_outline_connects_vertices() {
        let mut c = PixelSet::new(128, 64);
        triangle(&mut c, 0, 0, 4, 0, 0, 4);
        let mut expected = PixelSet::new(128, 64);
        line(&mut expected, 0, 0, 4, 0);
        line(&mut expected, 4, 0, 0, 4);
        line(&mut expected, 0, 4, 0, 0);
        assert_eq!(c.pixels, expected.pixels);
    }

    fn permutations(v: [(i32, i32); 3]) -> [[(i32, i32); 3]; 6] {
        [
            [v[0], v[1], v[2]],
            [v[0], v[2], v[1]],
            [v[1], v[0], v[2]],
            [v[1], v[2], v[0]],
            [v[2], v[0], v[1]],
            [v[2], v[1], v[0]],
        ]
    }

    fn filled(v: [(i32, i32); 3]) -> BTreeSet<(i32, i32)> {
        let mut c = PixelSet::new(128, 64);
        fill_triangle(&mut c, v[0].0, v[0].1, v[1].0, v[1].1, v[2].0, v[2].1);
        c.pixels
    }

    #[test]
    fn fill_triangle_flat_bottom() {
        let expected = set(&[
            (0, 0),
            (0, 1),
            (1, 1),
            (0, 2),
            (1, 2),
            (2, 2),
            (0, 3),
            (1, 3),
            (2, 3),
            (3, 3),
        ]);
        for p in &permutations([(0, 0), (0, 4), (4, 4)]) {
            assert_eq!(filled(*p), expected, "vertices {p:?}");
        }
    }

    #[test]
    fn fill_triangle_flat_top() {
        let mut expected = BTreeSet::new();
        for y in 0..4 {
            for x in 0..=(4 - y) {
                expected.insert((x, y));
            }
        }
        assert_eq!(expected.len(), 14);
        for p in &permutations([(0, 0), (4, 0), (0, 4)]) {
            assert_eq!(filled(*p), expected, "vertices {p:?}");
        }
    }

    #[test]
    fn fill_triangle_split_at_middle_vertex() {
        // Middle vertex at row 2: rows 0..=2 use the upper short edge, row 3 the lower one.
        let pixels = filled([(2, 0), (6, 2), (0, 4)]);
        let row = |y: i32| -> Vec<i32> {
            pixels.iter().filter(|p| p.1 == y).map(|p| p.0).collect()
        };
        assert_eq!(row(0), vec![2]);
        assert_eq!(row(1), vec![1, 2, 3, 4]);
        assert_eq!(row(2), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(row(3), vec![0, 1, 2, 3]);
        assert!(row(4).is_empty());
    }

    #[test]
    fn fill_triangle_degenerate() {
        assert!(filled([(0, 5), (10, 5), (20, 5)]).is_empty());
        assert!(filled([(3, 3), (3, 3), (3, 3)]).is_empty());
    }

    #[test]
    fn circle_far_off_canvas_is_skipped() {
        let mut c = PixelSet::new(128, 64);
        circle(&mut c, i32::MAX - 2, 10, 5);
        circle(&mut c, i32::MIN, i32::MIN, 5);
        circle(&mut c, 64, i32::MIN + 3, 40);
        assert!(c.pixels.is_empty());
    }

    #[test]
    fn circle_straddling_edge_is_clipped() {
        let mut c = PixelSet::new(128, 64);
        circle(&mut c, 0, 0, 5);
        assert!(c.contains(5, 0));
        assert!(c.contains(0, 5));
        assert!(c.pixels.iter().all(|&(x, y)| x >= 0 && y >= 0));
    }

    #[test]
    fn fill_triangle_extreme_vertices() {
        // Only the 64 on-canvas rows are filled; the long and short edges meet at column 5.
        let pixels = filled([(0, i32::MIN), (5, 0), (10, i32::MAX)]);
        let expected: BTreeSet<_> = (0..64).map(|y| (5, y)).collect();
        assert_eq!(pixels, expected);

        assert!(filled([(i32::MIN, 0), (i32::MAX, 0), (0, i32::MIN)]).is_empty());
        assert!(filled([(0, 100), (10, 200), (20, i32::MAX)]).is_empty());
    }

    #[test]
    fn fill_triangle_interpolates_exactly() {
        // The long edge from (60, 0) to (2, 58) crosses row 31 at exactly x = 29.
        let pixels = filled([(60, 0), (63, 29), (2, 58)]);
        assert!(pixels.contains(&(29, 31)));
        assert!(!pixels.contains(&(28, 31)));
    }

    #[test]
    fn lerp_rounds_down() {
        assert_eq!(lerp(0, 4, 1, 4), 1);
        assert_eq!(lerp(4, 0, 1, 3), 2);
        assert_eq!(lerp(0, 5, 1, 2), 2);
        assert_eq!(lerp(5, 0, 1, 2), 2);
    }
}
