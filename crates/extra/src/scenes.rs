//! Sample drawings.
//!
//! Each function appends its sub-paths to the given path without clearing it.

use crate::math::{point, rect, Angle, Point, Rect};
use crate::path::Path;

use std::f32::consts::PI;

/// The heart drawn by [`build_heart`], as SVG path data.
pub const HEART_PATH_DATA: &str = "M75,40 C75,37 70,25 50,25 C20,25 20,62.5 20,62.5 C20,80 40,102 75,120 C110,102 130,80 130,62.5 C130,62.5 130,25 100,25 C85,25 75,37 75,40 Z";

/// A heart made of six cubic bézier curves, meant to be filled.
pub fn build_heart(path: &mut Path) {
    path.move_to(point(75.0, 40.0));
    path.bezier_curve_to(point(75.0, 37.0), point(70.0, 25.0), point(50.0, 25.0));
    path.bezier_curve_to(point(20.0, 25.0), point(20.0, 62.5), point(20.0, 62.5));
    path.bezier_curve_to(point(20.0, 80.0), point(40.0, 102.0), point(75.0, 120.0));
    path.bezier_curve_to(point(110.0, 102.0), point(130.0, 80.0), point(130.0, 62.5));
    path.bezier_curve_to(point(130.0, 62.5), point(130.0, 25.0), point(100.0, 25.0));
    path.bezier_curve_to(point(85.0, 25.0), point(75.0, 37.0), point(75.0, 40.0));
    path.close_path();
}

/// A smiling face made of arcs, meant to be stroked.
pub fn build_smiley(path: &mut Path) {
    let full_turn = Angle::radians(PI * 2.0);
    let zero = Angle::radians(0.0);

    // Face.
    path.arc(point(75.0, 75.0), 50.0, zero, full_turn, true);
    // Mouth.
    path.move_to(point(110.0, 75.0));
    path.arc(point(75.0, 75.0), 35.0, zero, Angle::radians(PI), false);
    // Eyes.
    path.move_to(point(65.0, 65.0));
    path.arc(point(60.0, 65.0), 5.0, zero, full_turn, true);
    path.move_to(point(95.0, 65.0));
    path.arc(point(90.0, 65.0), 5.0, zero, full_turn, true);
}

/// A rectangle with rounded corners drawn with `arc_to`.
///
/// The sub-path is left open, ending next to where it starts.
pub fn add_rounded_rect(path: &mut Path, r: &Rect, radius: f32) {
    let (x, y) = (r.origin.x, r.origin.y);
    let (w, h) = (r.size.width, r.size.height);

    path.move_to(point(x, y + radius));
    path.line_to(point(x, y + h - radius));
    path.arc_to(point(x, y + h), point(x + radius, y + h), radius);
    path.line_to(point(x + w - radius, y + h));
    path.arc_to(point(x + w, y + h), point(x + w, y + h - radius), radius);
    path.line_to(point(x + w, y + radius));
    path.arc_to(point(x + w, y), point(x + w - radius, y), radius);
    path.line_to(point(x + radius, y));
    path.arc_to(point(x, y), point(x, y + radius), radius);
}

/// The walls of the maze, meant to be stroked.
pub fn build_maze(path: &mut Path) {
    add_rounded_rect(path, &rect(12.0, 12.0, 150.0, 150.0), 15.0);
    add_rounded_rect(path, &rect(19.0, 19.0, 150.0, 150.0), 9.0);
    add_rounded_rect(path, &rect(53.0, 53.0, 49.0, 33.0), 10.0);
    add_rounded_rect(path, &rect(53.0, 119.0, 49.0, 16.0), 6.0);
    add_rounded_rect(path, &rect(135.0, 53.0, 49.0, 33.0), 10.0);
    add_rounded_rect(path, &rect(135.0, 119.0, 25.0, 49.0), 10.0);
}

/// A pac-man shaped arc, meant to be filled.
pub fn build_pacman(path: &mut Path) {
    path.arc(
        point(37.0, 37.0),
        13.0,
        Angle::radians(PI / 7.0),
        Angle::radians(-PI / 7.0),
        false,
    );
    path.line_to(point(31.0, 37.0));
}

/// The positions of the dots the pac-man eats, each one a 4x4 square.
pub fn pellets() -> Vec<Rect> {
    let mut pellets = Vec::new();
    for i in 0..8 {
        pellets.push(rect(51.0 + i as f32 * 16.0, 35.0, 4.0, 4.0));
    }
    for i in 0..6 {
        pellets.push(rect(115.0, 51.0 + i as f32 * 16.0, 4.0, 4.0));
    }
    for i in 0..8 {
        pellets.push(rect(51.0 + i as f32 * 16.0, 99.0, 4.0, 4.0));
    }

    pellets
}

/// The body of a ghost, meant to be filled.
pub fn build_ghost(path: &mut Path) {
    path.move_to(point(83.0, 116.0));
    path.line_to(point(83.0, 102.0));
    path.bezier_curve_to(point(83.0, 94.0), point(89.0, 88.0), point(97.0, 88.0));
    path.bezier_curve_to(point(105.0, 88.0), point(111.0, 94.0), point(111.0, 102.0));
    path.line_to(point(111.0, 116.0));
    path.line_to(point(106.333, 111.333));
    path.line_to(point(101.666, 116.0));
    path.line_to(point(97.0, 111.333));
    path.line_to(point(92.333, 116.0));
    path.line_to(point(87.666, 111.333));
    path.line_to(point(83.0, 116.0));
}

/// The whites of the ghost's eyes, two ellipses.
pub fn build_ghost_eyes(path: &mut Path) {
    for &x in &[91.0, 103.0] {
        add_eye(path, x);
    }
}

/// The ghost's pupils.
pub fn build_ghost_pupils(path: &mut Path) {
    let full_turn = Angle::radians(PI * 2.0);
    for &x in &[101.0, 89.0] {
        path.move_to(point(x + 2.0, 102.0));
        path.arc(point(x, 102.0), 2.0, Angle::radians(0.0), full_turn, true);
    }
}

fn add_eye(path: &mut Path, x: f32) {
    let p = |dx: f32, y: f32| -> Point { point(x + dx, y) };
    path.move_to(p(0.0, 96.0));
    path.bezier_curve_to(p(-3.0, 96.0), p(-4.0, 99.0), p(-4.0, 101.0));
    path.bezier_curve_to(p(-4.0, 103.0), p(-3.0, 106.0), p(0.0, 106.0));
    path.bezier_curve_to(p(3.0, 106.0), p(4.0, 103.0), p(4.0, 101.0));
    path.bezier_curve_to(p(4.0, 99.0), p(3.0, 96.0), p(0.0, 96.0));
}

#[cfg(test)]
fn bounding_box(path: &Path) -> Rect {
    Rect::from_points(path.sub_paths().iter().flat_map(|sub_path| sub_path.positions()))
}

#[test]
fn heart() {
    let mut path = Path::new();
    build_heart(&mut path);

    assert_eq!(path.sub_paths().len(), 1);
    assert!(path.sub_paths()[0].is_closed());
    assert!(path.sub_paths()[0].len() > 12);

    let aabb = bounding_box(&path);
    assert!((aabb.min().x - 20.0).abs() < 0.5);
    assert!((aabb.max().x - 130.0).abs() < 0.5);
    assert!((aabb.max().y - 120.0).abs() < 0.01);
}

#[test]
fn smiley() {
    let mut path = Path::new();
    build_smiley(&mut path);

    let sub_paths = path.sub_paths();
    assert_eq!(sub_paths.len(), 4);
    assert_eq!(sub_paths[1].first_position(), Some(point(110.0, 75.0)));

    // The mouth is the lower half of a circle.
    for p in sub_paths[1].positions() {
        assert!(p.y >= 75.0 - 0.01);
        assert!(((p - point(75.0, 75.0)).length() - 35.0).abs() < 0.5);
    }
}

#[test]
fn rounded_rect() {
    let mut path = Path::with_tolerance(0.1);
    add_rounded_rect(&mut path, &rect(12.0, 12.0, 150.0, 150.0), 15.0);

    let sub_paths = path.sub_paths();
    assert_eq!(sub_paths.len(), 1);
    assert!(!sub_paths[0].is_closed());

    let sub_path = &sub_paths[0];
    assert_eq!(sub_path.first_position(), Some(point(12.0, 27.0)));
    let last = sub_path.last_position().unwrap();
    assert!((last - point(12.0, 27.0)).length() < 0.01);

    // The corners are cut.
    for corner in &[point(12.0, 12.0), point(162.0, 162.0)] {
        assert!(sub_path.positions().all(|p| (p - *corner).length() > 4.0));
    }
}

#[test]
fn maze_and_pellets() {
    let mut path = Path::new();
    build_maze(&mut path);
    assert_eq!(path.sub_paths().len(), 6);

    assert_eq!(pellets().len(), 22);
}

#[test]
fn pacman() {
    let mut path = Path::new();
    build_pacman(&mut path);

    assert_eq!(path.sub_paths().len(), 1);
    assert_eq!(path.current_position(), Some(point(31.0, 37.0)));
}

#[test]
fn ghost() {
    let mut path = Path::new();
    build_ghost(&mut path);
    assert_eq!(path.sub_paths().len(), 1);

    build_ghost_eyes(&mut path);
    assert_eq!(path.sub_paths().len(), 3);

    build_ghost_pupils(&mut path);
    assert_eq!(path.sub_paths().len(), 5);

    let aabb = bounding_box(&path);
    assert!((aabb.min().x - 83.0).abs() < 0.01);
    assert!((aabb.max().x - 111.0).abs() < 0.01);
    assert!((aabb.min().y - 88.0).abs() < 0.01);
}
