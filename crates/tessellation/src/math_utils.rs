//! Various math tools that are mostly useful for the tessellators.

use crate::math::*;

/// Largest scale applied to a miter vector, which bounds the length of the
/// miters of nearly reversed joins.
const MAX_MITER_SCALE: f32 = 1000.0;

/// The normal of an edge going in direction `dir`, rotated a quarter turn
/// clockwise in a y-up coordinate system.
#[inline]
pub fn edge_normal(dir: Vector) -> Vector {
    vector(dir.y, -dir.x)
}

/// Compute the miter vector at a point P such that ```x ---v1----> P ---v2---> x```
///
/// Returns the miter vector and the square length of the half-sum of the two edge
/// normals, which is the squared cosine of half the angle between them.
///
/// The miter vector is scaled so that extruding the shape along it yields segments
/// parallel to the edges and exactly 1 unit away from them. Nearly reversed joins
/// are not scaled at all.
///
/// v1 and v2 are expected to be normalized.
pub fn compute_miter(v1: Vector, v2: Vector) -> (Vector, f32) {
    let n = (edge_normal(v1) + edge_normal(v2)) * 0.5;
    let dot = n.square_length();

    if dot > f32::EPSILON {
        let scale = (1.0 / dot).max(0.0).min(MAX_MITER_SCALE);
        (n * scale, dot)
    } else {
        (n, dot)
    }
}

/// Twice the signed area of a polygon.
///
/// Positive for polygons going counter-clockwise in a y-up coordinate system.
pub fn signed_area_x2(points: &[Point]) -> f32 {
    let n = points.len();
    let mut area = 0.0;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        area += a.x * b.y - b.x * a.y;
    }

    area
}

/// Twice the signed area of a triangle. Same orientation convention as `signed_area_x2`.
#[inline]
pub fn triangle_area_x2(a: Point, b: Point, c: Point) -> f32 {
    (b - a).cross(c - a)
}

#[test]
fn test_compute_miter() {
    fn assert_almost_eq(a: Vector, b: Vector) {
        if (a - b).square_length() > 0.00001 {
            panic!("assert almost equal: {:?} != {:?}", a, b);
        }
    }

    let (n, dot) = compute_miter(vector(1.0, 0.0), vector(0.0, 1.0));
    assert_almost_eq(n, vector(1.0, -1.0));
    assert!((dot - 0.5).abs() < 0.0001);

    let (n, dot) = compute_miter(vector(1.0, 0.0), vector(0.0, -1.0));
    assert_almost_eq(n, vector(-1.0, -1.0));
    assert!((dot - 0.5).abs() < 0.0001);

    let (n, dot) = compute_miter(vector(1.0, 0.0), vector(1.0, 0.0));
    assert_almost_eq(n, vector(0.0, -1.0));
    assert!((dot - 1.0).abs() < 0.0001);

    let (n, _) = compute_miter(vector(1.0, 0.0), vector(-1.0, 0.0));
    assert_almost_eq(n, vector(0.0, 0.0));
}

#[test]
fn test_signed_area() {
    let square = [
        point(0.0, 0.0),
        point(10.0, 0.0),
        point(10.0, 10.0),
        point(0.0, 10.0),
    ];
    assert_eq!(signed_area_x2(&square), 200.0);

    let mut reversed = square;
    reversed.reverse();
    assert_eq!(signed_area_x2(&reversed), -200.0);

    assert_eq!(triangle_area_x2(square[0], square[1], square[2]), 100.0);
}
