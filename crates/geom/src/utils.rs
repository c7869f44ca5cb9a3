use crate::math::Point;
use crate::DISTANCE_TOLERANCE;

/// Returns true if both coordinates of `a` and `b` are within [`DISTANCE_TOLERANCE`].
#[inline]
pub fn points_are_close(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < DISTANCE_TOLERANCE && (a.y - b.y).abs() < DISTANCE_TOLERANCE
}

#[inline]
pub fn point_is_finite(p: Point) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

/// Square of the distance between `p` and the segment `[from, to]`.
pub fn square_distance_to_segment(p: Point, from: Point, to: Point) -> f32 {
    let edge = to - from;
    let v = p - from;
    let len2 = edge.square_length();
    let mut t = edge.dot(v);
    if len2 > 0.0 {
        t /= len2;
    }
    let t = t.max(0.0).min(1.0);

    (from + edge * t - p).square_length()
}

#[test]
fn distance_to_segment() {
    use crate::math::point;

    let from = point(0.0, 0.0);
    let to = point(10.0, 0.0);
    assert_eq!(square_distance_to_segment(point(5.0, 3.0), from, to), 9.0);
    assert_eq!(square_distance_to_segment(point(-3.0, 4.0), from, to), 25.0);
    assert_eq!(square_distance_to_segment(point(14.0, 3.0), from, to), 25.0);
    assert_eq!(square_distance_to_segment(point(1.0, 1.0), from, from), 2.0);
}
