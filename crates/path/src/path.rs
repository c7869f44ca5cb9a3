//! The path recorder.
//!

use crate::geom::utils::point_is_finite;
use crate::geom::{Arc, CubicBezierSegment, Fillet, QuadraticBezierSegment};
use crate::math::*;
use crate::{FlattenOptions, PointKind, PointSink, SubPath};

use std::mem;

/// Records drawing commands into a list of flattened sub-paths.
///
/// The API follows the HTML canvas 2D context. Curves and arcs are flattened
/// immediately using the path's [`FlattenOptions`].
///
/// Commands that continue a sub-path (`line_to`, the bézier curves and `arc_to`)
/// start a new sub-path at the origin if there is no sub-path or if the last one
/// is closed. Commands with non-finite coordinates are ignored.
#[derive(Clone, Debug, Default)]
pub struct Path {
    sub_paths: Vec<SubPath>,
    options: FlattenOptions,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: FlattenOptions) -> Self {
        Path {
            sub_paths: Vec::new(),
            options,
        }
    }

    pub fn with_tolerance(tolerance: f32) -> Self {
        Self::with_options(FlattenOptions::tolerance(tolerance))
    }

    #[inline]
    pub fn options(&self) -> &FlattenOptions {
        &self.options
    }

    /// Only affects the commands recorded afterwards.
    pub fn set_options(&mut self, options: FlattenOptions) {
        self.options = options;
    }

    /// Discards all recorded sub-paths.
    pub fn begin_path(&mut self) {
        self.sub_paths.clear();
    }

    /// Starts a new sub-path.
    pub fn move_to(&mut self, to: Point) {
        if !point_is_finite(to) {
            return;
        }

        self.sub_paths.push(SubPath::starting_at(to));
    }

    pub fn line_to(&mut self, to: Point) {
        if !point_is_finite(to) {
            return;
        }

        self.current_sub_path(Some(Point::origin()))
            .add_point(to, PointKind::Corner);
    }

    pub fn bezier_curve_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        if !point_is_finite(ctrl1) || !point_is_finite(ctrl2) || !point_is_finite(to) {
            return;
        }

        let tolerance = self.options.tolerance;
        let sub_path = self.current_sub_path(Some(Point::origin()));
        let from = sub_path.last_position().unwrap_or_else(Point::origin);

        CubicBezierSegment {
            from,
            ctrl1,
            ctrl2,
            to,
        }
        .for_each_flattened(tolerance, sub_path);
    }

    pub fn quadratic_curve_to(&mut self, ctrl: Point, to: Point) {
        if !point_is_finite(ctrl) || !point_is_finite(to) {
            return;
        }

        let tolerance = self.options.tolerance;
        let sub_path = self.current_sub_path(Some(Point::origin()));
        let from = sub_path.last_position().unwrap_or_else(Point::origin);

        QuadraticBezierSegment { from, ctrl, to }.for_each_flattened(tolerance, sub_path);
    }

    /// Adds a circular arc.
    ///
    /// If the current sub-path is not empty, it is connected to the start of the arc
    /// with a straight line. Negative radii are ignored.
    pub fn arc(
        &mut self,
        center: Point,
        radius: f32,
        start_angle: Angle,
        end_angle: Angle,
        anticlockwise: bool,
    ) {
        if !point_is_finite(center)
            || !(radius >= 0.0)
            || !radius.is_finite()
            || !start_angle.radians.is_finite()
            || !end_angle.radians.is_finite()
        {
            return;
        }

        let tolerance = self.options.tolerance;
        let sub_path = self.current_sub_path(None);

        Arc {
            center,
            radius,
            start_angle,
            end_angle,
            anticlockwise,
        }
        .for_each_flattened(tolerance, sub_path);
    }

    /// Adds a fillet of the given radius between the line from the current point
    /// to `ctrl` and the line from `ctrl` to `to`.
    ///
    /// Only `ctrl` is added when the corner can't be rounded. Like in the HTML
    /// canvas API, `to` itself is not added.
    pub fn arc_to(&mut self, ctrl: Point, to: Point, radius: f32) {
        if !point_is_finite(ctrl) || !point_is_finite(to) {
            return;
        }

        let options = self.options;
        let sub_path = self.current_sub_path(Some(Point::origin()));
        let from = sub_path.last_position().unwrap_or_else(Point::origin);

        Fillet {
            from,
            corner: ctrl,
            to,
            radius,
        }
        .for_each_flattened(&options, sub_path);
    }

    /// Closes the current sub-path and adds a closed rectangle as a new one.
    ///
    /// The corners are added in the order `(x, y)`, `(x, y + h)`, `(x + w, y + h)`,
    /// `(x + w, y)`.
    pub fn rect(&mut self, rect: &Rect) {
        let min = rect.min();
        let max = rect.max();
        if !point_is_finite(min) || !point_is_finite(max) {
            return;
        }

        self.close_path();

        let mut sub_path = SubPath::starting_at(rect.origin);
        sub_path.add_point(point(min.x, max.y), PointKind::Corner);
        sub_path.add_point(max, PointKind::Corner);
        sub_path.add_point(point(max.x, min.y), PointKind::Corner);
        sub_path.close();

        self.sub_paths.push(sub_path);
    }

    /// Closes the current sub-path, unless it has less than three points in which
    /// case it is left open.
    pub fn close_path(&mut self) {
        if let Some(sub_path) = self.sub_paths.last_mut() {
            sub_path.close();
        }
    }

    /// The last recorded position, if any.
    pub fn current_position(&self) -> Option<Point> {
        self.sub_paths.last().and_then(SubPath::last_position)
    }

    #[inline]
    pub fn sub_paths(&self) -> &[SubPath] {
        &self.sub_paths
    }

    /// Removes and returns all recorded sub-paths, leaving the path empty.
    pub fn take_sub_paths(&mut self) -> Vec<SubPath> {
        mem::take(&mut self.sub_paths)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sub_paths.is_empty()
    }

    // Returns the sub-path to append to, starting a new one if needed.
    fn current_sub_path(&mut self, seed: Option<Point>) -> &mut SubPath {
        let need_new = self.sub_paths.last().map_or(true, SubPath::is_closed);
        if need_new {
            self.sub_paths.push(SubPath::new());
        }

        let idx = self.sub_paths.len() - 1;
        let sub_path = &mut self.sub_paths[idx];
        if let Some(seed) = seed {
            if sub_path.is_empty() {
                sub_path.add_point(seed, PointKind::Corner);
            }
        }

        sub_path
    }
}

#[cfg(test)]
fn positions(sub_path: &SubPath) -> Vec<Point> {
    sub_path.positions().collect()
}

#[test]
fn line_to_without_move_to_starts_at_origin() {
    let mut path = Path::new();
    path.line_to(point(10.0, 0.0));
    path.line_to(point(10.0, 10.0));

    assert_eq!(path.sub_paths().len(), 1);
    assert_eq!(
        positions(&path.sub_paths()[0]),
        vec![point(0.0, 0.0), point(10.0, 0.0), point(10.0, 10.0)]
    );
}

#[test]
fn move_to_starts_sub_paths() {
    let mut path = Path::new();
    path.move_to(point(1.0, 1.0));
    path.line_to(point(2.0, 1.0));
    path.move_to(point(5.0, 5.0));
    path.line_to(point(6.0, 5.0));
    path.move_to(point(8.0, 8.0));

    assert_eq!(path.sub_paths().len(), 3);
    assert_eq!(path.sub_paths()[2].len(), 1);
    assert_eq!(path.current_position(), Some(point(8.0, 8.0)));
}

#[test]
fn line_to_after_close_starts_a_new_sub_path() {
    let mut path = Path::new();
    path.move_to(point(1.0, 1.0));
    path.line_to(point(2.0, 1.0));
    path.line_to(point(2.0, 2.0));
    path.close_path();
    path.line_to(point(5.0, 5.0));

    assert_eq!(path.sub_paths().len(), 2);
    assert!(path.sub_paths()[0].is_closed());
    assert_eq!(
        positions(&path.sub_paths()[1]),
        vec![point(0.0, 0.0), point(5.0, 5.0)]
    );
}

#[test]
fn close_path_needs_three_points() {
    let mut path = Path::new();
    path.move_to(point(1.0, 1.0));
    path.line_to(point(2.0, 1.0));
    path.close_path();
    assert!(!path.sub_paths()[0].is_closed());

    // The sub-path is still open, so this continues it.
    path.line_to(point(2.0, 2.0));
    path.close_path();
    assert_eq!(path.sub_paths().len(), 1);
    assert!(path.sub_paths()[0].is_closed());
}

#[test]
fn rect_command() {
    let mut path = Path::new();
    path.move_to(point(0.0, 0.0));
    path.line_to(point(1.0, 0.0));
    path.line_to(point(1.0, 1.0));
    path.rect(&rect(10.0, 20.0, 30.0, 40.0));

    assert_eq!(path.sub_paths().len(), 2);
    assert!(path.sub_paths()[0].is_closed());
    let sub_path = &path.sub_paths()[1];
    assert!(sub_path.is_closed());
    assert_eq!(
        positions(sub_path),
        vec![
            point(10.0, 20.0),
            point(10.0, 60.0),
            point(40.0, 60.0),
            point(40.0, 20.0),
        ]
    );
    assert!(sub_path.points().iter().all(|p| p.is_corner()));
}

#[test]
fn arc_does_not_start_at_origin() {
    let mut path = Path::new();
    path.arc(
        point(10.0, 10.0),
        5.0,
        Angle::radians(0.0),
        Angle::radians(std::f32::consts::PI),
        false,
    );

    let sub_path = &path.sub_paths()[0];
    assert_eq!(sub_path.first_position(), Some(point(15.0, 10.0)));
    let last = sub_path.last_position().unwrap();
    assert!((last - point(5.0, 10.0)).length() < 0.001);
}

#[test]
fn arc_to_with_huge_radius_adds_the_corner() {
    let mut path = Path::new();
    path.move_to(point(0.0, 0.0));
    path.arc_to(point(10.0, 0.0), point(10.0, 10.0), 1.0e9);

    assert_eq!(
        positions(&path.sub_paths()[0]),
        vec![point(0.0, 0.0), point(10.0, 0.0)]
    );
}

#[test]
fn arc_to_rounds_the_corner() {
    let mut path = Path::with_tolerance(0.01);
    path.move_to(point(0.0, 0.0));
    path.arc_to(point(10.0, 0.0), point(10.0, 10.0), 2.0);
    path.line_to(point(10.0, 10.0));

    let points = positions(&path.sub_paths()[0]);
    assert!(points.len() > 4);
    assert!(!points.contains(&point(10.0, 0.0)));
    assert!((points[1] - point(8.0, 0.0)).length() < 0.001);
}

#[test]
fn straight_bezier_adds_the_end_point() {
    let mut path = Path::new();
    path.move_to(point(0.0, 0.0));
    path.bezier_curve_to(point(1.0, 0.0), point(2.0, 0.0), point(3.0, 0.0));
    path.quadratic_curve_to(point(3.0, 1.0), point(3.0, 2.0));

    assert_eq!(
        positions(&path.sub_paths()[0]),
        vec![point(0.0, 0.0), point(3.0, 0.0), point(3.0, 2.0)]
    );
}

#[test]
fn curve_points_are_not_corners() {
    let mut path = Path::new();
    path.move_to(point(0.0, 0.0));
    path.bezier_curve_to(point(0.0, 100.0), point(100.0, 100.0), point(100.0, 0.0));

    let points = path.sub_paths()[0].points();
    assert!(points.len() > 3);
    assert!(points[0].is_corner());
    assert!(points[points.len() - 1].is_corner());
    assert!(points[1..points.len() - 1].iter().all(|p| !p.is_corner()));
}

#[test]
fn begin_path_and_take() {
    let mut path = Path::new();
    path.rect(&rect(0.0, 0.0, 1.0, 1.0));
    assert!(!path.is_empty());

    let sub_paths = path.take_sub_paths();
    assert_eq!(sub_paths.len(), 1);
    assert!(path.is_empty());

    path.rect(&rect(0.0, 0.0, 1.0, 1.0));
    path.begin_path();
    assert!(path.is_empty());
}

#[test]
fn non_finite_commands_are_ignored() {
    let mut path = Path::new();
    path.move_to(point(f32::NAN, 0.0));
    assert!(path.is_empty());

    path.move_to(point(0.0, 0.0));
    path.line_to(point(f32::INFINITY, 0.0));
    path.bezier_curve_to(point(1.0, f32::NAN), point(1.0, 1.0), point(2.0, 2.0));
    path.arc(point(0.0, 0.0), f32::NAN, Angle::radians(0.0), Angle::radians(1.0), false);

    assert_eq!(path.sub_paths().len(), 1);
    assert_eq!(path.sub_paths()[0].len(), 1);
}
