use crate::math::Point;
use crate::{CubicBezierSegment, PointSink};

/// A 2d curve segment defined by three points: the beginning of the segment, a control
/// point and the end of the segment.
///
/// The curve is defined by equation:
/// ```∀ t ∈ [0..1],  P(t) = (1 - t)² * from + 2 * (1 - t) * t * ctrl + t² * to```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct QuadraticBezierSegment {
    pub from: Point,
    pub ctrl: Point,
    pub to: Point,
}

impl QuadraticBezierSegment {
    /// Sample the curve at t (expecting t between 0 and 1).
    pub fn sample(&self, t: f32) -> Point {
        let t2 = t * t;
        let one_t = 1.0 - t;
        let one_t2 = one_t * one_t;

        self.from * one_t2 + self.ctrl.to_vector() * 2.0 * one_t * t + self.to.to_vector() * t2
    }

    /// Elevate this curve to a third order bézier.
    pub fn to_cubic(&self) -> CubicBezierSegment {
        CubicBezierSegment {
            from: self.from,
            ctrl1: self.from + (self.ctrl - self.from) * (2.0 / 3.0),
            ctrl2: self.to + (self.ctrl - self.to) * (2.0 / 3.0),
            to: self.to,
        }
    }

    /// Approximates the curve with a sequence of line segments.
    ///
    /// See [`CubicBezierSegment::for_each_flattened`].
    pub fn for_each_flattened(&self, tolerance: f32, output: &mut dyn PointSink) {
        self.to_cubic().for_each_flattened(tolerance, output);
    }
}

#[test]
fn to_cubic_matches_samples() {
    use crate::math::point;

    let quadratic = QuadraticBezierSegment {
        from: point(0.0, 0.0),
        ctrl: point(3.0, 6.0),
        to: point(6.0, 0.0),
    };
    let cubic = quadratic.to_cubic();

    assert_eq!(cubic.ctrl1, point(2.0, 4.0));
    assert_eq!(cubic.ctrl2, point(4.0, 4.0));
    for i in 0..=10 {
        let t = i as f32 / 10.0;
        assert!((quadratic.sample(t) - cubic.sample(t)).length() < 0.0001);
    }
}
