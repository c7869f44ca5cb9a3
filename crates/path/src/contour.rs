use crate::geom::utils::points_are_close;
use crate::math::{Point, Vector};
use crate::{PointKind, PointSink};

bitflags::bitflags! {
    /// Per-point properties of a contour.
    ///
    /// `CORNER` is set while recording. The other flags are computed by the
    /// stroke tessellator.
    #[derive(Default)]
    #[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
    pub struct PointFlags: u8 {
        /// The point ends a drawing command, as opposed to points inserted
        /// while flattening a curve.
        const CORNER = 0x01;
        /// The contour turns left at this point.
        const LEFT_TURN = 0x02;
        /// The contour turns right at this point.
        const RIGHT_TURN = 0x04;
        /// The join at this point must be widened with a bevel or a round
        /// join instead of a miter.
        const BEVEL = 0x08;
        /// The miter at this point is longer than one of the adjacent segments.
        const SHARP = 0x10;
    }
}

/// A point of a flattened contour.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct ContourPoint {
    pub position: Point,
    /// Unit vector towards the next point.
    pub direction: Vector,
    /// Offset direction of the stroke at this point. Its length is the miter
    /// ratio, so it is not a unit vector.
    pub normal: Vector,
    /// Distance to the next point.
    pub length: f32,
    pub flags: PointFlags,
}

impl ContourPoint {
    /// Creates a point. The stroke properties are zero until computed by the
    /// stroke tessellator.
    pub fn new(position: Point, flags: PointFlags) -> Self {
        ContourPoint {
            position,
            direction: Vector::zero(),
            normal: Vector::zero(),
            length: 0.0,
            flags,
        }
    }

    #[inline]
    pub fn is_corner(&self) -> bool {
        self.flags.contains(PointFlags::CORNER)
    }
}

/// A flattened sub-path and, once stroked, the outlines of its stroke.
///
/// A sub-path with less than three points can't be closed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SubPath {
    points: Vec<ContourPoint>,
    outer_points: Vec<Point>,
    inner_points: Vec<Point>,
    closed: bool,
}

impl SubPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sub-path starting with a corner at the given position.
    pub fn starting_at(at: Point) -> Self {
        let mut sub_path = SubPath::new();
        sub_path.add_point(at, PointKind::Corner);
        sub_path
    }

    #[inline]
    pub fn points(&self) -> &[ContourPoint] {
        &self.points
    }

    pub fn positions(&self) -> impl Iterator<Item = Point> + '_ {
        self.points.iter().map(|p| p.position)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn first_position(&self) -> Option<Point> {
        self.points.first().map(|p| p.position)
    }

    pub fn last_position(&self) -> Option<Point> {
        self.points.last().map(|p| p.position)
    }

    /// Marks the sub-path as closed if it has at least three points.
    ///
    /// Returns whether the sub-path is closed.
    pub fn close(&mut self) -> bool {
        if self.points.len() >= 3 {
            self.closed = true;
        }

        self.closed
    }

    /// Removes the last point if it is the same as the first one, and closes the
    /// sub-path in that case.
    ///
    /// A sub-path left with fewer than 3 points is open, even if it was closed.
    pub fn remove_closing_point(&mut self) {
        let n = self.points.len();
        if n >= 2 && points_are_close(self.points[0].position, self.points[n - 1].position) {
            self.points.pop();
            self.closed = self.points.len() >= 3;
        }
    }

    /// The outlines computed by the stroke tessellator.
    ///
    /// For closed sub-paths the outer outline encloses the inner one. Open
    /// sub-paths only have an outer outline, going around the whole stroke.
    pub fn outlines(&self) -> (&[Point], &[Point]) {
        (&self.outer_points, &self.inner_points)
    }

    /// Mutable access to the points and the outer and inner outlines.
    pub fn as_mut_parts(&mut self) -> (&mut [ContourPoint], &mut Vec<Point>, &mut Vec<Point>) {
        (&mut self.points, &mut self.outer_points, &mut self.inner_points)
    }
}

/// Appends points, merging points that are within `DISTANCE_TOLERANCE` of the
/// previous one.
impl PointSink for SubPath {
    fn add_point(&mut self, at: Point, kind: PointKind) {
        let flags = match kind {
            PointKind::Corner => PointFlags::CORNER,
            PointKind::Flattened => PointFlags::empty(),
        };

        if let Some(last) = self.points.last_mut() {
            if points_are_close(last.position, at) {
                last.flags |= flags;
                return;
            }
        }

        self.points.push(ContourPoint::new(at, flags));
    }
}

#[cfg(test)]
use crate::math::point;

#[test]
fn merge_duplicate_points() {
    let mut sub_path = SubPath::starting_at(point(0.0, 0.0));
    sub_path.add_point(point(1.0, 0.0), PointKind::Flattened);
    sub_path.add_point(point(1.001, 0.0), PointKind::Corner);
    sub_path.add_point(point(1.0, 1.0), PointKind::Corner);

    assert_eq!(sub_path.len(), 3);
    assert!(sub_path.points()[1].is_corner());
    assert_eq!(sub_path.points()[1].position, point(1.0, 0.0));
}

#[test]
fn close_needs_three_points() {
    let mut sub_path = SubPath::starting_at(point(0.0, 0.0));
    sub_path.add_point(point(1.0, 0.0), PointKind::Corner);
    assert!(!sub_path.close());
    assert!(!sub_path.is_closed());

    sub_path.add_point(point(1.0, 1.0), PointKind::Corner);
    assert!(sub_path.close());
    assert!(sub_path.is_closed());
}

#[test]
fn remove_closing_point() {
    let mut sub_path = SubPath::starting_at(point(0.0, 0.0));
    for &p in &[point(10.0, 0.0), point(10.0, 10.0), point(0.0, 0.005)] {
        sub_path.add_point(p, PointKind::Corner);
    }
    sub_path.remove_closing_point();

    assert_eq!(sub_path.len(), 3);
    assert!(sub_path.is_closed());

    // A back and forth line can't be closed.
    let mut sub_path = SubPath::starting_at(point(0.0, 0.0));
    sub_path.add_point(point(10.0, 0.0), PointKind::Corner);
    sub_path.add_point(point(0.0, 0.0), PointKind::Corner);
    sub_path.remove_closing_point();

    assert_eq!(sub_path.len(), 2);
    assert!(!sub_path.is_closed());

    // Same line, closed before the duplicate is removed.
    let mut sub_path = SubPath::starting_at(point(0.0, 0.0));
    sub_path.add_point(point(10.0, 0.0), PointKind::Corner);
    sub_path.add_point(point(0.0, 0.0), PointKind::Corner);
    assert!(sub_path.close());
    sub_path.remove_closing_point();

    assert_eq!(sub_path.len(), 2);
    assert!(!sub_path.is_closed());
}

#[test]
fn flags() {
    let mut flags = PointFlags::CORNER;
    flags.insert(PointFlags::LEFT_TURN | PointFlags::SHARP);
    assert!(flags.contains(PointFlags::CORNER | PointFlags::SHARP));

    flags.remove(PointFlags::SHARP);
    assert!(!flags.contains(PointFlags::SHARP));
    assert!(flags.contains(PointFlags::LEFT_TURN));
    assert_eq!(PointFlags::default(), PointFlags::empty());
}
