//! Scanline polygon fill.

use crate::{
    render::{Canvas, Point},
    Result,
};

/// Fills the polygon formed by `points[indices[0]], points[indices[1]], ...`
/// with the canvas draw colour.
///
/// Rows between the top and bottom vertex are intersected with every edge
/// using a half-open `[top, bottom)` test so shared vertices are counted
/// once. The bottom row uses a closed test instead, which keeps the last row
/// of the polygon from disappearing. Intersections are sorted and filled in
/// pairs; an unpaired last intersection draws nothing. Only rows inside the
/// canvas are scanned.
pub fn fill_polygon<C: Canvas + ?Sized>(
    canvas: &mut C,
    points: &[Point],
    indices: &[usize],
) -> Result<()> {
    let polygon: Vec<Point> = indices.iter().filter_map(|&i| points.get(i).copied()).collect();
    if polygon.len() < 3 {
        return Ok(());
    }

    let (min_y, max_y) = polygon
        .iter()
        .fold((i32::MAX, i32::MIN), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)));

    let (_, height) = canvas.size();
    let top = min_y.max(0);
    let bottom = max_y.min(i32::try_from(height).unwrap_or(i32::MAX) - 1);

    let mut crossings = Vec::with_capacity(polygon.len());
    for y in top..=bottom {
        crossings.clear();
        let last_row = y == max_y;
        for (i, a) in polygon.iter().enumerate() {
            let b = polygon[(i + 1) % polygon.len()];
            if a.y == b.y {
                continue;
            }
            let spans = if last_row {
                a.y.min(b.y) <= y && y <= a.y.max(b.y)
            } else {
                (a.y <= y && b.y > y) || (b.y <= y && a.y > y)
            };
            if spans {
                crossings.push(intersect_x(*a, b, y));
            }
        }

        crossings.sort_unstable();
        for pair in crossings.chunks_exact(2) {
            canvas.draw_line(Point::new(pair[0], y), Point::new(pair[1], y))?;
        }
    }
    Ok(())
}

fn intersect_x(a: Point, b: Point, y: i32) -> i32 {
    // i128 keeps the product exact for vertices anywhere in the i32 range.
    let (ax, ay) = (i128::from(a.x), i128::from(a.y));
    let (bx, by) = (i128::from(b.x), i128::from(b.y));
    let x = ax + (i128::from(y) - ay) * (bx - ax) / (by - ay);
    x.clamp(i128::from(i32::MIN), i128::from(i32::MAX)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Framebuffer, Rgba};

    fn filled(fb: &Framebuffer) -> Vec<(i32, i32)> {
        let (w, h) = fb.size();
        let mut out = Vec::new();
        for y in 0..h as i32 {
            for x in 0..w as i32 {
                if fb.pixel(x, y) == Some(Rgba::WHITE) {
                    out.push((x, y));
                }
            }
        }
        out
    }

    fn canvas(size: u32) -> Framebuffer {
        let mut fb = Framebuffer::new(size, size);
        fb.clear().unwrap();
        fb.set_draw_color(Rgba::WHITE);
        fb
    }

    #[test]
    fn square_fills_inclusive_bounds() {
        let mut fb = canvas(16);
        let square = [
            Point::new(0, 0),
            Point::new(10, 0),
            Point::new(10, 10),
            Point::new(0, 10),
        ];
        fill_polygon(&mut fb, &square, &[0, 1, 2, 3]).unwrap();

        let pixels = filled(&fb);
        assert_eq!(pixels.len(), 121);
        assert!(pixels.iter().all(|&(x, y)| (0..=10).contains(&x) && (0..=10).contains(&y)));
    }

    #[test]
    fn index_order_selects_the_polygon() {
        let mut fb = canvas(16);
        let points = [
            Point::new(9, 9),
            Point::new(2, 2),
            Point::new(6, 2),
            Point::new(6, 6),
            Point::new(2, 6),
        ];
        fill_polygon(&mut fb, &points, &[1, 2, 3, 4]).unwrap();

        let pixels = filled(&fb);
        assert_eq!(pixels.len(), 25);
        assert!(!pixels.contains(&(9, 9)));
    }

    #[test]
    fn triangle_stays_inside_its_bounding_box() {
        let mut fb = canvas(32);
        let tri = [Point::new(4, 2), Point::new(20, 12), Point::new(6, 25)];
        fill_polygon(&mut fb, &tri, &[0, 1, 2]).unwrap();

        let pixels = filled(&fb);
        assert!(!pixels.is_empty());
        assert!(pixels
            .iter()
            .all(|&(x, y)| (4..=20).contains(&x) && (2..=25).contains(&y)));
        // Every row between the top and bottom vertex is touched.
        for y in 2..=25 {
            assert!(pixels.iter().any(|&(_, py)| py == y), "row {y} empty");
        }
    }

    #[test]
    fn degenerate_polygons_draw_nothing() {
        let mut fb = canvas(8);
        let points = [Point::new(1, 1), Point::new(5, 1)];
        fill_polygon(&mut fb, &points, &[0, 1]).unwrap();
        fill_polygon(&mut fb, &points, &[0, 1, 1]).unwrap();
        assert!(filled(&fb).is_empty());
    }

    #[test]
    fn off_screen_vertices_only_scan_visible_rows() {
        let mut fb = canvas(8);
        let huge = [
            Point::new(i32::MIN, i32::MIN),
            Point::new(i32::MAX, i32::MIN),
            Point::new(i32::MAX, i32::MAX),
            Point::new(i32::MIN, i32::MAX),
        ];
        fill_polygon(&mut fb, &huge, &[0, 1, 2, 3]).unwrap();
        assert_eq!(filled(&fb).len(), 64);
    }

    #[test]
    fn polygon_below_the_canvas_draws_nothing() {
        let mut fb = canvas(8);
        let below = [Point::new(0, 20), Point::new(5, 20), Point::new(5, 30)];
        fill_polygon(&mut fb, &below, &[0, 1, 2]).unwrap();
        assert!(filled(&fb).is_empty());
    }
}
