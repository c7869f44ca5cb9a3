//! Recursive subdivision flattening of cubic bézier curves.
//!
//! Each step splits the curve in two halves with de Casteljau's algorithm and
//! checks whether the control points are close enough to the baseline of the
//! curve for a single point to represent it. The checks follow the classical
//! Anti-Grain Geometry approach of comparing the distance of each control point
//! to the baseline against the tolerance.

use crate::math::Point;
use crate::utils::point_is_finite;
use crate::{CubicBezierSegment, PointKind, PointSink};

/// Maximum number of subdivisions along any branch.
pub(crate) const MAX_RECURSION_DEPTH: u32 = 32;

const COLLINEARITY_EPSILON: f32 = f32::EPSILON;

/// Writes the flattened curve into `output`, excluding the start point and
/// including the end point.
///
/// The points inserted in the middle of the curve are `PointKind::Flattened`,
/// the end point is a `PointKind::Corner`.
pub(crate) fn flatten_cubic_bezier(
    curve: &CubicBezierSegment,
    tolerance: f32,
    output: &mut dyn PointSink,
) {
    if curve.is_finite() {
        let square_tolerance = tolerance * tolerance;
        subdivide(curve, square_tolerance, 0, output);
    }

    if point_is_finite(curve.to) {
        output.add_point(curve.to, PointKind::Corner);
    }
}

fn subdivide(
    curve: &CubicBezierSegment,
    square_tolerance: f32,
    depth: u32,
    output: &mut dyn PointSink,
) {
    if depth > MAX_RECURSION_DEPTH {
        return;
    }

    let p1 = curve.from;
    let p2 = curve.ctrl1;
    let p3 = curve.ctrl2;
    let p4 = curve.to;

    let baseline = p4 - p1;
    let d2 = (p2 - p4).cross(baseline).abs();
    let d3 = (p3 - p4).cross(baseline).abs();
    let baseline_len2 = baseline.square_length();

    let p2_is_off = d2 > COLLINEARITY_EPSILON;
    let p3_is_off = d3 > COLLINEARITY_EPSILON;

    match (p2_is_off, p3_is_off) {
        (false, false) => {
            // All collinear, or p1 == p4.
            let (d2, d3) = if baseline_len2 <= COLLINEARITY_EPSILON {
                ((p1 - p2).square_length(), (p4 - p3).square_length())
            } else {
                let inv_len2 = 1.0 / baseline_len2;
                let t2 = inv_len2 * (p2 - p1).dot(baseline);
                let t3 = inv_len2 * (p3 - p1).dot(baseline);
                if t2 > 0.0 && t2 < 1.0 && t3 > 0.0 && t3 < 1.0 {
                    // Simple collinear case, 1---2---3---4.
                    // The end points are enough.
                    return;
                }

                (
                    square_distance_to_projection(p2, p1, p4, t2),
                    square_distance_to_projection(p3, p1, p4, t3),
                )
            };

            if d2 > d3 {
                if d2 < square_tolerance {
                    output.add_point(p2, PointKind::Flattened);
                    return;
                }
            } else if d3 < square_tolerance {
                output.add_point(p3, PointKind::Flattened);
                return;
            }
        }
        (false, true) => {
            // p1, p2 and p4 are collinear, p3 is significant.
            if d3 * d3 <= square_tolerance * baseline_len2 {
                output.add_point(p2.lerp(p3, 0.5), PointKind::Flattened);
                return;
            }
        }
        (true, false) => {
            // p1, p3 and p4 are collinear, p2 is significant.
            if d2 * d2 <= square_tolerance * baseline_len2 {
                output.add_point(p2.lerp(p3, 0.5), PointKind::Flattened);
                return;
            }
        }
        (true, true) => {
            if (d2 + d3) * (d2 + d3) <= square_tolerance * baseline_len2 {
                output.add_point(p2.lerp(p3, 0.5), PointKind::Flattened);
                return;
            }
        }
    }

    let (first, second) = curve.split_in_half();
    subdivide(&first, square_tolerance, depth + 1, output);
    subdivide(&second, square_tolerance, depth + 1, output);
}

// Square distance between `p` and the point at parameter `t` along `[from, to]`,
// with `t` clamped to the segment.
fn square_distance_to_projection(p: Point, from: Point, to: Point, t: f32) -> f32 {
    if t <= 0.0 {
        (p - from).square_length()
    } else if t >= 1.0 {
        (p - to).square_length()
    } else {
        (p - from.lerp(to, t)).square_length()
    }
}
