//! Circular arcs.

use std::f32::consts::{FRAC_PI_2, PI};

use crate::math::{vector, Angle, Point, Vector};
use crate::{CubicBezierSegment, PointKind, PointSink};

const TWO_PI: f32 = 2.0 * PI;

/// A circular arc, described the same way as the HTML canvas `arc` method.
///
/// Angles are measured from the positive x axis, towards the positive y axis.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Arc {
    pub center: Point,
    pub radius: f32,
    pub start_angle: Angle,
    pub end_angle: Angle,
    /// Direction of the sweep from `start_angle` to `end_angle`.
    pub anticlockwise: bool,
}

impl Arc {
    /// The signed angle covered by the arc.
    ///
    /// Positive when sweeping clockwise, negative otherwise. Sweeps of a full
    /// turn or more are clamped to exactly one turn; shorter sweeps going the
    /// wrong way are wrapped around to match the direction.
    pub fn sweep_angle(&self) -> Angle {
        let mut delta = self.end_angle.radians - self.start_angle.radians;

        if !delta.is_finite() {
            return Angle::radians(0.0);
        }

        if self.anticlockwise {
            if delta.abs() < TWO_PI {
                while delta > 0.0 {
                    delta -= TWO_PI;
                }
            } else {
                delta = -TWO_PI;
            }
        } else if delta.abs() < TWO_PI {
            while delta < 0.0 {
                delta += TWO_PI;
            }
        } else {
            delta = TWO_PI;
        }

        Angle::radians(delta)
    }

    /// Sample the arc at a given angle.
    #[inline]
    pub fn sample_angle(&self, angle: f32) -> Point {
        self.center + unit_vector(angle) * self.radius
    }

    #[inline]
    pub fn from(&self) -> Point {
        self.sample_angle(self.start_angle.radians)
    }

    #[inline]
    pub fn to(&self) -> Point {
        self.sample_angle(self.start_angle.radians + self.sweep_angle().radians)
    }

    /// Approximates the arc with cubic bézier curves covering at most a quarter
    /// of a turn each.
    pub fn for_each_cubic_bezier<F>(&self, callback: &mut F)
    where
        F: FnMut(&CubicBezierSegment),
    {
        let sweep = self.sweep_angle().radians;
        let segment_count = (sweep.abs() / FRAC_PI_2).ceil() as u32;
        if segment_count == 0 {
            return;
        }

        let half_step = sweep / segment_count as f32 * 0.5;
        let mut tangent_factor = (4.0 / 3.0 * (1.0 - half_step.cos()) / half_step.sin()).abs();
        if self.anticlockwise {
            tangent_factor = -tangent_factor;
        }
        let tangent_len = tangent_factor * self.radius;

        let start = self.start_angle.radians;
        let mut prev = self.sample_angle(start);
        let start_dir = unit_vector(start);
        let mut prev_tangent = vector(-start_dir.y, start_dir.x) * tangent_len;

        for segment in 1..=segment_count {
            let angle = start + sweep * (segment as f32 / segment_count as f32);
            let pos = self.sample_angle(angle);
            let dir = unit_vector(angle);
            let tangent = vector(-dir.y, dir.x) * tangent_len;

            callback(&CubicBezierSegment {
                from: prev,
                ctrl1: prev + prev_tangent,
                ctrl2: pos - tangent,
                to: pos,
            });

            prev = pos;
            prev_tangent = tangent;
        }
    }

    /// Approximates the arc with a sequence of line segments.
    ///
    /// Unlike curve segments, the start point of the arc is written too (as a corner).
    pub fn for_each_flattened(&self, tolerance: f32, output: &mut dyn PointSink) {
        output.add_point(self.from(), PointKind::Corner);
        self.for_each_cubic_bezier(&mut |curve| {
            curve.for_each_flattened(tolerance, &mut *output);
        });
    }
}

#[inline]
fn unit_vector(angle: f32) -> Vector {
    let (sin, cos) = angle.sin_cos();
    vector(cos, sin)
}

#[cfg(test)]
use crate::math::point;

#[cfg(test)]
fn arc(start: f32, end: f32, anticlockwise: bool) -> Arc {
    Arc {
        center: point(0.0, 0.0),
        radius: 1.0,
        start_angle: Angle::radians(start),
        end_angle: Angle::radians(end),
        anticlockwise,
    }
}

#[test]
fn sweep_angle_normalization() {
    assert!((arc(0.0, FRAC_PI_2, false).sweep_angle().radians - FRAC_PI_2).abs() < 1e-6);
    assert!((arc(0.0, FRAC_PI_2, true).sweep_angle().radians + 3.0 * FRAC_PI_2).abs() < 1e-5);
    assert!((arc(0.0, -FRAC_PI_2, false).sweep_angle().radians - 3.0 * FRAC_PI_2).abs() < 1e-5);
    assert_eq!(arc(0.0, 10.0, false).sweep_angle().radians, TWO_PI);
    assert_eq!(arc(0.0, 10.0, true).sweep_angle().radians, -TWO_PI);
    assert_eq!(arc(1.0, 1.0, false).sweep_angle().radians, 0.0);
}

#[test]
fn full_circle_stays_on_the_circle() {
    let arc = Arc {
        center: point(10.0, 20.0),
        radius: 50.0,
        start_angle: Angle::radians(0.0),
        end_angle: Angle::radians(TWO_PI),
        anticlockwise: false,
    };
    let tolerance = 0.5;

    let mut points = Vec::new();
    arc.for_each_flattened(tolerance, &mut points);

    assert!(points.len() > 8);
    for p in &points {
        let d = (*p - arc.center).length();
        assert!((d - 50.0).abs() <= tolerance, "{:?} is {:?} away from the center", p, d);
    }
}

#[test]
fn quarter_segments() {
    let mut count = 0;
    arc(0.0, PI, false).for_each_cubic_bezier(&mut |_| count += 1);
    assert_eq!(count, 2);

    let mut count = 0;
    arc(0.0, 0.1, true).for_each_cubic_bezier(&mut |_| count += 1);
    assert_eq!(count, 4);

    let mut count = 0;
    arc(0.5, 0.5, true).for_each_cubic_bezier(&mut |_| count += 1);
    assert_eq!(count, 0);
}

#[test]
fn empty_sweep_emits_the_start_point() {
    let mut points = Vec::new();
    arc(0.0, 0.0, false).for_each_flattened(0.1, &mut points);
    assert_eq!(points, vec![point(1.0, 0.0)]);
}

#[test]
fn anticlockwise_half_circle() {
    let mut points = Vec::new();
    arc(0.0, PI, true).for_each_flattened(0.01, &mut points);

    // Going anticlockwise from angle 0 to angle π passes through negative y.
    assert!(points.iter().any(|p| p.y < -0.9));
    assert!(points.iter().all(|p| p.y < 0.01));
    let last = *points.last().unwrap();
    assert!((last - point(-1.0, 0.0)).length() < 0.001);
}
