//! Rasterization: lines, circles, rectangles and text on a [`ViewportBuffer`].
//!
//! Shapes are in point coordinates; text is placed at pixel coordinates.
//! Offsets are computed in `i64`, so shapes anywhere in the `i32` plane are
//! legal. Only the steps that land inside the viewport are visited.

use arrayvec::ArrayVec;

use crate::types::{Circle, Color, Rectangle, Vector2};
use crate::viewport::{Ink, ViewportBuffer};

/// Integer Bresenham walk from `from` to `to`, both endpoints included.
///
/// x advances when `2·err ≥ dy`, y advances when `2·err ≤ dx`; a diagonal
/// step fires both.
#[derive(Debug, Clone)]
pub struct LineWalk {
    x: i64,
    y: i64,
    x2: i64,
    y2: i64,
    dx: i64,
    dy: i64,
    sx: i64,
    sy: i64,
    err: i64,
    done: bool,
}

impl LineWalk {
    pub fn new(from: Vector2, to: Vector2) -> Self {
        let (x1, y1) = (from.x as i64, from.y as i64);
        let (x2, y2) = (to.x as i64, to.y as i64);
        let dx = (x2 - x1).abs();
        let dy = -(y2 - y1).abs();
        Self {
            x: x1,
            y: y1,
            x2,
            y2,
            dx,
            dy,
            sx: if x1 < x2 { 1 } else { -1 },
            sy: if y1 < y2 { 1 } else { -1 },
            err: dx + dy,
            done: false,
        }
    }
}

impl Iterator for LineWalk {
    type Item = Vector2;

    fn next(&mut self) -> Option<Vector2> {
        if self.done {
            return None;
        }

        let current = Vector2::new(self.x as i32, self.y as i32);
        if self.x == self.x2 && self.y == self.y2 {
            self.done = true;
            return Some(current);
        }

        let e2 = 2 * self.err;
        if e2 >= self.dy {
            self.err += self.dy;
            self.x += self.sx;
        }
        if e2 <= self.dx {
            self.err += self.dx;
            self.y += self.sy;
        }
        Some(current)
    }
}

/// Put the endpoints in a fixed order so a line and its reverse cover the
/// same points. Returns `true` when they were swapped.
fn ordered(from: Vector2, to: Vector2) -> (Vector2, Vector2, bool) {
    if (to.y, to.x) < (from.y, from.x) {
        (to, from, true)
    } else {
        (from, to, false)
    }
}

/// Points of the line `from → to`, starting at `from` and ending at `to`.
///
/// Every consecutive pair is 8-connected, and `line_points(b, a)` yields the
/// same set as `line_points(a, b)`.
pub fn line_points(from: Vector2, to: Vector2) -> Vec<Vector2> {
    let (a, b, swapped) = ordered(from, to);
    let mut points: Vec<Vector2> = LineWalk::new(a, b).collect();
    if swapped {
        points.reverse();
    }
    points
}

/// Steps `k` in `0..=len` for which `start + step·k` lies in `0..limit`.
fn clip_steps(start: i64, step: i64, len: i64, limit: i64) -> Option<(i64, i64)> {
    let (lo, hi) = if step > 0 {
        ((-start).max(0), len.min(limit - 1 - start))
    } else {
        ((start - (limit - 1)).max(0), len.min(start))
    };
    (lo <= hi).then_some((lo, hi))
}

/// Minor-axis offset after `k` major-axis steps of a [`LineWalk`] whose
/// major span is `major` and minor span is `minor`.
fn minor_offset(k: i64, major: i64, minor: i64) -> i64 {
    let (k, major, minor) = (i128::from(k), i128::from(major), i128::from(minor));
    ((2 * k * minor + major) / (2 * major)) as i64
}

/// First-octant offsets `(cx, cy)` of a circle of radius `r`, with `cx ≥ cy`.
///
/// Each step moves exactly one axis, picking whichever keeps
/// `cx² + cy² - r²` closer to zero, so the mirrored ring is 4-connected.
/// The loop ends once `cx < cy`.
fn octant_steps(radius: i32) -> impl Iterator<Item = (i64, i64)> {
    let mut cx = radius as i64;
    let mut cy = 0i64;
    let mut err = 0i64;
    std::iter::from_fn(move || {
        if cx < cy {
            return None;
        }
        let step = (cx, cy);
        let err_y = err + 2 * cy + 1;
        let err_x = err - 2 * cx + 1;
        if err_y.abs() <= err_x.abs() {
            err = err_y;
            cy += 1;
        } else {
            err = err_x;
            cx -= 1;
        }
        Some(step)
    })
}

/// The eight symmetric offsets of one octant step.
fn mirror(cx: i64, cy: i64) -> ArrayVec<(i64, i64), 8> {
    ArrayVec::from([
        (cx, cy),
        (cy, cx),
        (-cy, cx),
        (-cx, cy),
        (-cx, -cy),
        (-cy, -cx),
        (cy, -cx),
        (cx, -cy),
    ])
}

/// Distinct points of the ring around `center`, sorted by row then column.
///
/// Points that fall outside the `i32` plane are left out.
pub fn circle_points(center: Vector2, radius: i32) -> Vec<Vector2> {
    let (x, y) = (i64::from(center.x), i64::from(center.y));
    let mut points: Vec<Vector2> = octant_steps(radius)
        .flat_map(|(cx, cy)| mirror(cx, cy))
        .filter_map(|(dx, dy)| {
            let px = i32::try_from(x + dx).ok()?;
            let py = i32::try_from(y + dy).ok()?;
            Some(Vector2::new(px, py))
        })
        .collect();
    points.sort_by_key(|p| (p.y, p.x));
    points.dedup();
    points
}

impl ViewportBuffer {
    /// Draw the line between two points, clipped to the viewport.
    ///
    /// The points drawn are exactly those of [`line_points`] that lie inside
    /// the grid.
    pub fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, ink: Ink) {
        self.plot_segment(
            (i64::from(x1), i64::from(y1)),
            (i64::from(x2), i64::from(y2)),
            ink,
        );
    }

    /// Draw a circle outline, or a filled disc when `fill` is set.
    ///
    /// The fill draws four horizontal spans per octant step; rows shared by
    /// several steps are simply drawn again.
    pub fn draw_circle(&mut self, x: i32, y: i32, radius: i32, fill: bool, ink: Ink) {
        if radius < 0 {
            return;
        }
        let (x, y, r) = (i64::from(x), i64::from(y), i64::from(radius));
        if self.beyond_radius(x, y, r + 1) {
            return;
        }

        // Ring points stay within one cell of the radius: a grid entirely
        // inside `r - 2` never meets the outline and is covered by the disc.
        if self.within_radius(x, y, r - 2) {
            if fill {
                let (w, h) = (i64::from(self.width()), i64::from(self.height()));
                self.plot_rows(0, h - 1, 0, w - 1, ink);
            }
            return;
        }

        for (cx, cy) in octant_steps(radius) {
            if fill {
                self.plot_segment((x - cy, y + cx), (x + cy, y + cx), ink);
                self.plot_segment((x - cx, y + cy), (x + cx, y + cy), ink);
                self.plot_segment((x - cx, y - cy), (x + cx, y - cy), ink);
                self.plot_segment((x - cy, y - cx), (x + cy, y - cx), ink);
            } else {
                for (dx, dy) in mirror(cx, cy) {
                    self.plot(x + dx, y + dy, ink);
                }
            }
        }
    }

    pub fn draw_circle_shape(&mut self, circle: Circle, fill: bool, ink: Ink) {
        self.draw_circle(circle.x, circle.y, circle.radius, fill, ink);
    }

    /// Draw the rectangle covering `[x, x + w - 1] × [y, y + h - 1]`.
    ///
    /// Non-positive sizes draw nothing.
    pub fn draw_rectangle(&mut self, x: i32, y: i32, w: i32, h: i32, fill: bool, ink: Ink) {
        if w <= 0 || h <= 0 {
            return;
        }
        let (x, y) = (i64::from(x), i64::from(y));
        let (right, bottom) = (x + i64::from(w) - 1, y + i64::from(h) - 1);

        if fill {
            self.plot_rows(y, bottom, x, right, ink);
        } else {
            self.plot_segment((x, y), (right, y), ink);
            self.plot_segment((x, bottom), (x, y), ink);
            self.plot_segment((right, y), (right, bottom), ink);
            self.plot_segment((right, bottom), (x, bottom), ink);
        }
    }

    pub fn draw_rect_shape(&mut self, rect: Rectangle, fill: bool, ink: Ink) {
        self.draw_rectangle(rect.x, rect.y, rect.width, rect.height, fill, ink);
    }

    /// Lay out `text` left to right starting at pixel `(px, py)`.
    ///
    /// Spaces advance the cursor without drawing, so whatever is underneath
    /// shows through. At the right edge the text wraps to column 0 of the
    /// next row when `wrap` is set and stops otherwise; a `'\n'` always moves
    /// to column 0 of the next row. Text stops at the bottom edge.
    pub fn draw_text(&mut self, px: i32, py: i32, text: &str, wrap: bool, color: Color) {
        let width = self.pixel_width() as i64;
        let height = i64::from(self.height());
        let (mut px, mut py) = (i64::from(px), i64::from(py));

        for ch in text.chars() {
            if py >= height {
                break;
            }
            if ch == '\n' {
                px = 0;
                py += 1;
                continue;
            }
            if ch != ' ' {
                if let (Ok(x), Ok(y)) = (i32::try_from(px), i32::try_from(py)) {
                    self.draw_pixel(x, y, Ink::new(ch, color));
                }
            }

            px += 1;
            if px >= width {
                if !wrap {
                    break;
                }
                px = 0;
                py += 1;
            }
        }
    }

    /// Write the point `(x, y)` if it lies inside the grid.
    fn plot(&mut self, x: i64, y: i64, ink: Ink) {
        if let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) {
            self.draw_point(x, y, ink);
        }
    }

    /// Fill rows `top..=bottom` between columns `left..=right`, clamped to
    /// the grid.
    fn plot_rows(&mut self, top: i64, bottom: i64, left: i64, right: i64, ink: Ink) {
        let (w, h) = (i64::from(self.width()), i64::from(self.height()));
        let (left, right) = (left.max(0), right.min(w - 1));
        for row in top.max(0)..=bottom.min(h - 1) {
            for col in left..=right {
                self.plot(col, row, ink);
            }
        }
    }

    /// Draw the segment `a → b` in canonical order, stepping only along the
    /// stretch of the major axis that lies inside the grid.
    fn plot_segment(&mut self, a: (i64, i64), b: (i64, i64), ink: Ink) {
        let ((x1, y1), (x2, y2)) = if (b.1, b.0) < (a.1, a.0) { (b, a) } else { (a, b) };
        let (dx, dy) = ((x2 - x1).abs(), (y2 - y1).abs());
        let sx = if x1 < x2 { 1 } else { -1 };
        let sy = if y1 < y2 { 1 } else { -1 };
        let (w, h) = (i64::from(self.width()), i64::from(self.height()));

        if dx == 0 && dy == 0 {
            self.plot(x1, y1, ink);
        } else if dx >= dy {
            let Some((lo, hi)) = clip_steps(x1, sx, dx, w) else {
                return;
            };
            for i in lo..=hi {
                self.plot(x1 + sx * i, y1 + sy * minor_offset(i, dx, dy), ink);
            }
        } else {
            let Some((lo, hi)) = clip_steps(y1, sy, dy, h) else {
                return;
            };
            for j in lo..=hi {
                self.plot(x1 + sx * minor_offset(j, dy, dx), y1 + sy * j, ink);
            }
        }
    }

    /// No cell of the grid is within `radius` of `(x, y)`.
    fn beyond_radius(&self, x: i64, y: i64, radius: i64) -> bool {
        let (w, h) = (i64::from(self.width()), i64::from(self.height()));
        let dx = i128::from(x.clamp(0, w - 1) - x);
        let dy = i128::from(y.clamp(0, h - 1) - y);
        let r = i128::from(radius);
        dx * dx + dy * dy > r * r
    }

    /// Every cell of the grid is within `radius` of `(x, y)`.
    fn within_radius(&self, x: i64, y: i64, radius: i64) -> bool {
        if radius <= 0 {
            return false;
        }
        let (w, h) = (i64::from(self.width()), i64::from(self.height()));
        let r2 = i128::from(radius) * i128::from(radius);
        [(0, 0), (w - 1, 0), (0, h - 1), (w - 1, h - 1)]
            .into_iter()
            .all(|(cx, cy)| {
                let (dx, dy) = (i128::from(cx - x), i128::from(cy - y));
                dx * dx + dy * dy <= r2
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::Cell;

    const INK: Ink = Ink::new('#', Color::Default);

    fn filled_points(buf: &ViewportBuffer) -> Vec<(i32, i32)> {
        let mut out = Vec::new();
        for y in 0..buf.height() as i32 {
            for x in 0..buf.width() as i32 {
                if !buf.point(x, y).unwrap().is_empty() {
                    out.push((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn line_walk_horizontal() {
        let pts: Vec<_> = LineWalk::new(Vector2::new(0, 0), Vector2::new(3, 0)).collect();
        assert_eq!(
            pts,
            vec![
                Vector2::new(0, 0),
                Vector2::new(1, 0),
                Vector2::new(2, 0),
                Vector2::new(3, 0)
            ]
        );
    }

    #[test]
    fn line_walk_single_point() {
        let pts: Vec<_> = LineWalk::new(Vector2::new(2, 2), Vector2::new(2, 2)).collect();
        assert_eq!(pts, vec![Vector2::new(2, 2)]);
    }

    #[test]
    fn line_walk_diagonal_steps_both_axes() {
        let pts: Vec<_> = LineWalk::new(Vector2::new(0, 0), Vector2::new(3, 3)).collect();
        assert_eq!(pts.len(), 4);
        assert_eq!(pts[1], Vector2::new(1, 1));
    }

    #[test]
    fn line_points_keeps_caller_direction() {
        let pts = line_points(Vector2::new(2, 1), Vector2::new(0, 0));
        assert_eq!(pts.first(), Some(&Vector2::new(2, 1)));
        assert_eq!(pts.last(), Some(&Vector2::new(0, 0)));
    }

    #[test]
    fn circle_radius_one_is_the_3x3_ring() {
        let pts = circle_points(Vector2::new(0, 0), 1);
        assert_eq!(pts.len(), 8);
        assert!(!pts.contains(&Vector2::new(0, 0)));
    }

    #[test]
    fn circle_radius_zero_is_the_center() {
        assert_eq!(circle_points(Vector2::new(4, 4), 0), vec![Vector2::new(4, 4)]);
        assert!(circle_points(Vector2::new(4, 4), -1).is_empty());
    }

    #[test]
    fn circle_stroke_matches_circle_points() {
        let mut buf = ViewportBuffer::new(20, 20).unwrap();
        buf.draw_circle(10, 10, 5, false, INK);
        let expected: Vec<(i32, i32)> = circle_points(Vector2::new(10, 10), 5)
            .into_iter()
            .map(|p| (p.x, p.y))
            .collect();
        assert_eq!(filled_points(&buf), expected);
    }

    #[test]
    fn circle_fill_has_no_holes() {
        let mut buf = ViewportBuffer::new(30, 30).unwrap();
        buf.draw_circle(15, 15, 8, true, INK);
        for y in 7..=23 {
            let row: Vec<i32> = filled_points(&buf)
                .into_iter()
                .filter(|&(_, py)| py == y)
                .map(|(px, _)| px)
                .collect();
            assert!(!row.is_empty(), "row {} empty", y);
            let (lo, hi) = (row[0], row[row.len() - 1]);
            assert_eq!(row.len() as i32, hi - lo + 1, "row {} has a gap", y);
        }
    }

    #[test]
    fn rectangle_stroke_outlines_only() {
        let mut buf = ViewportBuffer::new(10, 10).unwrap();
        buf.draw_rectangle(1, 1, 4, 3, false, INK);
        let pts = filled_points(&buf);
        assert_eq!(pts.len(), 2 * 4 + 2 * (3 - 2));
        assert!(!pts.contains(&(2, 2)));
        assert!(pts.contains(&(4, 3)));
    }

    #[test]
    fn rectangle_with_zero_size_draws_nothing() {
        let mut buf = ViewportBuffer::new(4, 4).unwrap();
        buf.draw_rectangle(0, 0, 0, 3, true, INK);
        buf.draw_rectangle(0, 0, 3, -1, false, INK);
        assert_eq!(buf.filled_count(), 0);
    }

    #[test]
    fn text_skips_spaces_and_stops_without_wrap() {
        let mut buf = ViewportBuffer::new(2, 2).unwrap();
        buf.draw_text(1, 0, "a bcd", false, Color::Red);
        assert_eq!(buf.pixel(1, 0), Some(Cell::Filled(Ink::new('a', Color::Red))));
        assert_eq!(buf.pixel(2, 0), Some(Cell::Empty));
        assert_eq!(buf.pixel(3, 0), Some(Cell::Filled(Ink::new('b', Color::Red))));
        assert!(buf.pixel(0, 1).unwrap().is_empty());
    }

    #[test]
    fn text_wraps_to_next_row() {
        let mut buf = ViewportBuffer::new(2, 2).unwrap();
        buf.draw_text(2, 0, "abcdefgh", true, Color::Default);
        assert_eq!(buf.pixel(3, 0).unwrap().ink().unwrap().ch, 'b');
        assert_eq!(buf.pixel(0, 1).unwrap().ink().unwrap().ch, 'c');
        assert_eq!(buf.pixel(3, 1).unwrap().ink().unwrap().ch, 'f');
        // "gh" would land on row 2, which does not exist.
        assert_eq!(buf.filled_count(), 6);
    }

    #[test]
    fn text_newline_moves_to_next_row() {
        let mut buf = ViewportBuffer::new(4, 2).unwrap();
        buf.draw_text(3, 0, "x\ny", false, Color::Default);
        assert_eq!(buf.pixel(3, 0).unwrap().ink().unwrap().ch, 'x');
        assert_eq!(buf.pixel(0, 1).unwrap().ink().unwrap().ch, 'y');
    }

    #[test]
    fn clipped_line_matches_full_walk() {
        let mut buf = ViewportBuffer::new(12, 9).unwrap();
        let lines = [(-5, -3, 20, 11), (14, -2, -6, 10), (3, -40, 7, 50), (-9, 4, 30, 5)];
        for (x1, y1, x2, y2) in lines {
            buf.clear();
            buf.draw_line(x1, y1, x2, y2, INK);
            let mut expected: Vec<(i32, i32)> =
                line_points(Vector2::new(x1, y1), Vector2::new(x2, y2))
                    .into_iter()
                    .filter(|p| p.x >= 0 && p.x < 12 && p.y >= 0 && p.y < 9)
                    .map(|p| (p.x, p.y))
                    .collect();
            expected.sort_by_key(|&(x, y)| (y, x));
            expected.dedup();
            assert_eq!(filled_points(&buf), expected, "line {:?}", (x1, y1, x2, y2));
        }
    }

    #[test]
    fn line_across_whole_plane_is_clipped() {
        let mut buf = ViewportBuffer::new(6, 6).unwrap();
        buf.draw_line(i32::MIN, i32::MIN, i32::MAX, i32::MAX, INK);
        let diagonal: Vec<(i32, i32)> = (0..6).map(|i| (i, i)).collect();
        assert_eq!(filled_points(&buf), diagonal);
    }

    #[test]
    fn shapes_at_extreme_coordinates_are_clipped() {
        let mut buf = ViewportBuffer::new(8, 8).unwrap();
        buf.draw_rectangle(i32::MAX - 1, 0, 5, 1, true, INK);
        buf.draw_rectangle(i32::MAX - 1, i32::MAX - 1, 5, 5, false, INK);
        buf.draw_rectangle(i32::MIN, i32::MIN, 3, 3, true, INK);
        buf.draw_circle(i32::MAX - 2, 0, 5, false, INK);
        buf.draw_circle(i32::MAX - 2, 0, 5, true, INK);
        buf.draw_circle(i32::MIN, i32::MIN, 5, true, INK);
        buf.draw_text(i32::MAX, i32::MAX, "abc", true, Color::Default);
        assert_eq!(buf.filled_count(), 0);

        let left_half: Vec<Vector2> = circle_points(Vector2::new(0, 0), 2)
            .into_iter()
            .filter(|p| p.x <= 0)
            .map(|p| Vector2::new(p.x + i32::MAX, p.y))
            .collect();
        assert_eq!(circle_points(Vector2::new(i32::MAX, 0), 2), left_half);
    }

    #[test]
    fn oversized_fill_covers_only_the_grid() {
        let mut buf = ViewportBuffer::new(6, 5).unwrap();
        buf.draw_rectangle(0, 0, 4, i32::MAX, true, INK);
        assert_eq!(filled_points(&buf).len(), 4 * 5);

        buf.clear();
        buf.draw_rectangle(i32::MIN, i32::MIN, i32::MAX, i32::MAX, true, INK);
        assert_eq!(buf.filled_count(), 0);

        buf.draw_circle(3, 2, i32::MAX, true, INK);
        assert_eq!(filled_points(&buf).len(), 6 * 5);
    }

    #[test]
    fn huge_rectangle_outline_stays_outside_the_grid() {
        let mut buf = ViewportBuffer::new(6, 5).unwrap();
        buf.draw_rectangle(i32::MIN, i32::MIN, i32::MAX, i32::MAX, false, INK);
        buf.draw_rectangle(-1, -1, 8, 7, false, INK);
        assert_eq!(buf.filled_count(), 0);

        buf.draw_rectangle(-1, 2, i32::MAX, 2, false, INK);
        let rows: Vec<(i32, i32)> = (2..4).flat_map(|y| (0..6).map(move |x| (x, y))).collect();
        assert_eq!(filled_points(&buf), rows);
    }
}

