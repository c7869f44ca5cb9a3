use crate::flatten_cubic::flatten_cubic_bezier;
use crate::math::Point;
use crate::utils::point_is_finite;
use crate::PointSink;

/// A 2d curve segment defined by four points: the beginning of the segment, two control
/// points and the end of the segment.
///
/// The curve is defined by equation:
/// ```∀ t ∈ [0..1],  P(t) = (1 - t)³ * from + 3 * (1 - t)² * t * ctrl1 + 3 * t² * (1 - t) * ctrl2 + t³ * to```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct CubicBezierSegment {
    pub from: Point,
    pub ctrl1: Point,
    pub ctrl2: Point,
    pub to: Point,
}

impl CubicBezierSegment {
    /// Sample the curve at t (expecting t between 0 and 1).
    pub fn sample(&self, t: f32) -> Point {
        let t2 = t * t;
        let t3 = t2 * t;
        let one_t = 1.0 - t;
        let one_t2 = one_t * one_t;
        let one_t3 = one_t2 * one_t;

        self.from * one_t3
            + self.ctrl1.to_vector() * 3.0 * one_t2 * t
            + self.ctrl2.to_vector() * 3.0 * one_t * t2
            + self.to.to_vector() * t3
    }

    /// Split this curve into two sub-curves at t = 0.5.
    pub fn split_in_half(&self) -> (CubicBezierSegment, CubicBezierSegment) {
        let ctrl1a = self.from.lerp(self.ctrl1, 0.5);
        let ctrl12 = self.ctrl1.lerp(self.ctrl2, 0.5);
        let ctrl2b = self.ctrl2.lerp(self.to, 0.5);
        let ctrl1aa = ctrl1a.lerp(ctrl12, 0.5);
        let ctrl2bb = ctrl12.lerp(ctrl2b, 0.5);
        let mid = ctrl1aa.lerp(ctrl2bb, 0.5);

        (
            CubicBezierSegment {
                from: self.from,
                ctrl1: ctrl1a,
                ctrl2: ctrl1aa,
                to: mid,
            },
            CubicBezierSegment {
                from: mid,
                ctrl1: ctrl2bb,
                ctrl2: ctrl2b,
                to: self.to,
            },
        )
    }

    pub fn is_finite(&self) -> bool {
        point_is_finite(self.from)
            && point_is_finite(self.ctrl1)
            && point_is_finite(self.ctrl2)
            && point_is_finite(self.to)
    }

    /// Approximates the curve with a sequence of line segments.
    ///
    /// The start point is not written, the end point always is (as a corner).
    /// Curves with non-finite control points only produce their end point.
    pub fn for_each_flattened(&self, tolerance: f32, output: &mut dyn PointSink) {
        flatten_cubic_bezier(self, tolerance, output);
    }
}

#[cfg(test)]
use crate::math::point;

#[test]
fn straight_curve_flattens_to_end_point() {
    let curve = CubicBezierSegment {
        from: point(0.0, 0.0),
        ctrl1: point(1.0, 0.0),
        ctrl2: point(2.0, 0.0),
        to: point(3.0, 0.0),
    };

    let mut points = vec![curve.from];
    curve.for_each_flattened(0.01, &mut points);

    assert_eq!(points, vec![point(0.0, 0.0), point(3.0, 0.0)]);
}

#[test]
fn flattened_points_are_close_to_the_curve() {
    let curve = CubicBezierSegment {
        from: point(0.0, 0.0),
        ctrl1: point(100.0, 0.0),
        ctrl2: point(100.0, 100.0),
        to: point(0.0, 100.0),
    };

    for &tolerance in &[0.01, 0.1, 0.5, 2.0] {
        let mut points = vec![curve.from];
        curve.for_each_flattened(tolerance, &mut points);

        assert!(points.len() > 4);
        assert_eq!(points.last(), Some(&curve.to));

        // Densely sample the curve and check that every sample is near the polyline.
        for i in 0..=100 {
            let p = curve.sample(i as f32 / 100.0);
            let mut min = f32::MAX;
            for edge in points.windows(2) {
                min = min.min(crate::utils::square_distance_to_segment(p, edge[0], edge[1]));
            }
            assert!(
                min.sqrt() <= tolerance * 2.0 + 0.01,
                "tolerance {:?}: sample {:?} is {:?} away",
                tolerance,
                p,
                min.sqrt()
            );
        }
    }
}

#[test]
fn smaller_tolerance_produces_more_points() {
    let curve = CubicBezierSegment {
        from: point(141.0, 135.0),
        ctrl1: point(141.0, 130.0),
        ctrl2: point(140.0, 130.0),
        to: point(131.0, 130.0),
    };

    let mut coarse = Vec::new();
    curve.for_each_flattened(1.0, &mut coarse);
    let mut fine = Vec::new();
    curve.for_each_flattened(0.01, &mut fine);

    assert!(fine.len() > coarse.len());
}

#[test]
fn non_finite_curve() {
    let curve = CubicBezierSegment {
        from: point(0.0, 0.0),
        ctrl1: point(f32::NAN, 0.0),
        ctrl2: point(2.0, f32::INFINITY),
        to: point(3.0, 1.0),
    };

    let mut points = Vec::new();
    curve.for_each_flattened(0.1, &mut points);

    assert_eq!(points, vec![point(3.0, 1.0)]);
}

#[test]
fn split_in_half() {
    let curve = CubicBezierSegment {
        from: point(0.0, 0.0),
        ctrl1: point(1.0, 3.0),
        ctrl2: point(4.0, 3.0),
        to: point(5.0, 0.0),
    };
    let (a, b) = curve.split_in_half();

    assert_eq!(a.from, curve.from);
    assert_eq!(b.to, curve.to);
    assert_eq!(a.to, b.from);
    assert!((a.to - curve.sample(0.5)).length() < 0.0001);
    assert!((a.sample(0.5) - curve.sample(0.25)).length() < 0.0001);
}
