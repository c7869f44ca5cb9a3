//! Rounded corners between two line segments, as drawn by the HTML canvas
//! `arcTo` method.

use crate::math::{point, Angle, Point};
use crate::utils::{points_are_close, square_distance_to_segment};
use crate::{Arc, FlattenOptions, PointKind, PointSink, DISTANCE_TOLERANCE};

/// A circular arc of a given radius, tangent to both `[from, corner]` and
/// `[corner, to]`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Fillet {
    pub from: Point,
    pub corner: Point,
    pub to: Point,
    pub radius: f32,
}

impl Fillet {
    /// Computes the arc rounding the corner.
    ///
    /// Returns `None` when the corner can't be rounded: the three points are
    /// (nearly) collinear or coincident, the radius is too small, or the arc
    /// would touch the segments further than `max_tangent_distance` away from
    /// the corner.
    pub fn to_arc(&self, max_tangent_distance: f32) -> Option<Arc> {
        let p0 = self.from;
        let p1 = self.corner;
        let p2 = self.to;
        let radius = self.radius;

        if points_are_close(p0, p1)
            || points_are_close(p1, p2)
            || square_distance_to_segment(p1, p0, p2) < DISTANCE_TOLERANCE * DISTANCE_TOLERANCE
            || !(radius >= DISTANCE_TOLERANCE)
        {
            return None;
        }

        let d0 = (p0 - p1).normalize();
        let d1 = (p2 - p1).normalize();
        let angle = d0.dot(d1).max(-1.0).min(1.0).acos();
        let tangent_distance = radius / (angle * 0.5).tan();

        if !(tangent_distance <= max_tangent_distance) {
            return None;
        }

        let cross = d1.x * d0.y - d0.x * d1.y;
        let (center, start, end, anticlockwise) = if cross > 0.0 {
            (
                point(
                    p1.x + d0.x * tangent_distance + d0.y * radius,
                    p1.y + d0.y * tangent_distance - d0.x * radius,
                ),
                d0.x.atan2(-d0.y),
                (-d1.x).atan2(d1.y),
                false,
            )
        } else {
            (
                point(
                    p1.x + d0.x * tangent_distance - d0.y * radius,
                    p1.y + d0.y * tangent_distance + d0.x * radius,
                ),
                (-d0.x).atan2(d0.y),
                d1.x.atan2(-d1.y),
                true,
            )
        };

        Some(Arc {
            center,
            radius,
            start_angle: Angle::radians(start),
            end_angle: Angle::radians(end),
            anticlockwise,
        })
    }

    /// Writes the rounded corner into `output`, or only the corner point if it
    /// can't be rounded.
    pub fn for_each_flattened(&self, options: &FlattenOptions, output: &mut dyn PointSink) {
        match self.to_arc(options.max_tangent_distance) {
            Some(arc) => arc.for_each_flattened(options.tolerance, output),
            None => output.add_point(self.corner, PointKind::Corner),
        }
    }
}

#[cfg(test)]
fn fillet(radius: f32) -> Fillet {
    Fillet {
        from: point(0.0, 0.0),
        corner: point(10.0, 0.0),
        to: point(10.0, 10.0),
        radius,
    }
}

#[test]
fn right_angle_fillet() {
    let arc = fillet(2.0).to_arc(FlattenOptions::DEFAULT_MAX_TANGENT_DISTANCE).unwrap();

    assert!((arc.center - point(8.0, 2.0)).length() < 0.0001);
    assert!((arc.from() - point(8.0, 0.0)).length() < 0.0001);
    assert!((arc.to() - point(10.0, 2.0)).length() < 0.0001);

    let mut points = Vec::new();
    fillet(2.0).for_each_flattened(&FlattenOptions::tolerance(0.001), &mut points);
    assert!(points.len() > 3);
    for p in &points {
        assert!(((*p - arc.center).length() - 2.0).abs() < 0.01);
    }
}

#[test]
fn fillet_winding() {
    // The same corner walked in the opposite direction must round it on the same side.
    let reversed = Fillet {
        from: point(10.0, 10.0),
        corner: point(10.0, 0.0),
        to: point(0.0, 0.0),
        radius: 2.0,
    };
    let arc = reversed.to_arc(FlattenOptions::DEFAULT_MAX_TANGENT_DISTANCE).unwrap();

    assert!((arc.center - point(8.0, 2.0)).length() < 0.0001);
    assert!((arc.from() - point(10.0, 2.0)).length() < 0.0001);
    assert!((arc.to() - point(8.0, 0.0)).length() < 0.0001);
}

#[test]
fn degenerate_fillets_emit_the_corner() {
    let options = FlattenOptions::DEFAULT;
    let check = |f: Fillet| {
        let mut points = Vec::new();
        f.for_each_flattened(&options, &mut points);
        assert_eq!(points, vec![f.corner]);
    };

    // Huge radius.
    check(fillet(1.0e9));
    // Tiny radius.
    check(fillet(0.001));
    // NaN radius.
    check(fillet(f32::NAN));
    // Collinear.
    check(Fillet {
        from: point(0.0, 0.0),
        corner: point(5.0, 0.0),
        to: point(10.0, 0.0),
        radius: 1.0,
    });
    // Coincident.
    check(Fillet {
        from: point(10.0, 0.0),
        corner: point(10.0, 0.0),
        to: point(10.0, 10.0),
        radius: 1.0,
    });
}

#[test]
fn max_tangent_distance() {
    assert!(fillet(50.0).to_arc(100.0).is_some());
    assert!(fillet(50.0).to_arc(10.0).is_none());
}
