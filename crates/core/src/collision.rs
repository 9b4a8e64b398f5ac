//! Collision predicates over the geometry value types.
//!
//! Rectangles are closed on `[x, x + width - 1]`: a rectangle covers exactly
//! `width × height` points. Arithmetic is widened (`i64` for spans,
//! `i128` for squared distances) so far-apart shapes cannot overflow.

use crate::types::{Circle, Rectangle, Vector2};

/// Extra slack added to the radii sum in [`circles_overlap`].
pub const CIRCLE_OVERLAP_SLACK: i64 = 2;

pub fn point_in_rect(point: Vector2, rect: Rectangle) -> bool {
    let (x, y) = (point.x as i64, point.y as i64);
    let (left, top) = (rect.x as i64, rect.y as i64);
    let right = left + rect.width as i64 - 1;
    let bottom = top + rect.height as i64 - 1;
    x >= left && x <= right && y >= top && y <= bottom
}

pub fn point_in_circle(point: Vector2, circle: Circle) -> bool {
    let dx = circle.x as i128 - point.x as i128;
    let dy = circle.y as i128 - point.y as i128;
    let r = circle.radius as i128;
    dx * dx + dy * dy <= r * r
}

pub fn rects_overlap(a: Rectangle, b: Rectangle) -> bool {
    let span = |start: i32, len: i32| (start as i64, start as i64 + len as i64 - 1);
    let (ax1, ax2) = span(a.x, a.width);
    let (bx1, bx2) = span(b.x, b.width);
    let (ay1, ay2) = span(a.y, a.height);
    let (by1, by2) = span(b.y, b.height);
    ax1 <= bx2 && ax2 >= bx1 && ay1 <= by2 && ay2 >= by1
}

/// Loose proximity test between two circles.
///
/// True when the center distance is at most `a.radius + b.radius + 2`. This
/// is an approximation: circles up to two points apart count as touching.
pub fn circles_overlap(a: Circle, b: Circle) -> bool {
    let dx = a.x as i128 - b.x as i128;
    let dy = a.y as i128 - b.y as i128;
    let reach = a.radius as i128 + b.radius as i128 + CIRCLE_OVERLAP_SLACK as i128;
    if reach < 0 {
        return false;
    }
    dx * dx + dy * dy <= reach * reach
}
