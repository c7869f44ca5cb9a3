use crate::error::{GeometryBuilderError, TessellationResult};
use crate::geometry_builder::GeometryBuilder;
use crate::geom::utils::points_are_close;
use crate::geom::Fillet;
use crate::math::{Point, Vector};
use crate::math_utils::{compute_miter, edge_normal, signed_area_x2};
use crate::path::{ContourPoint, PointFlags, PointKind, PointSink, SubPath};
use crate::triangulation::{fill_polygon, EarcutTriangulator, Triangulation, Triangulator};
use crate::{LineCap, LineJoin, StrokeOptions};

/// A Context object that can tessellate stroke operations for sub-paths.
///
/// The stroke of each sub-path is computed as one or two outlines (see
/// [`expand_stroke`]) and the area they delimit is triangulated:
///
/// - The stroke of a closed sub-path is the area between its outer and inner
///   outlines. If [`StrokeOptions::inner_hole`] is false the inner outline is
///   ignored and the whole shape is covered.
/// - The stroke of an open sub-path, caps included, is a single polygon.
///
/// # Examples
///
/// ```
/// # extern crate quill_tessellation as tess;
/// # use tess::path::Path;
/// # use tess::math::{Point, point};
/// # use tess::geometry_builder::{BuffersBuilder, Positions, VertexBuffers};
/// # use tess::*;
/// # fn main() {
/// // Create a simple path.
/// let mut path = Path::new();
/// path.move_to(point(0.0, 0.0));
/// path.line_to(point(1.0, 2.0));
/// path.line_to(point(2.0, 0.0));
/// path.line_to(point(1.0, 1.0));
/// path.close_path();
///
/// // Create the destination vertex and index buffers.
/// let mut buffers: VertexBuffers<Point, u16> = VertexBuffers::new();
///
/// {
///     // Create the tessellator.
///     let mut tessellator = StrokeTessellator::new();
///
///     // Compute the tessellation.
///     let result = tessellator.tessellate(
///         &mut path.take_sub_paths(),
///         &StrokeOptions::default().with_line_width(0.1),
///         &mut BuffersBuilder::new(&mut buffers, Positions),
///     );
///     assert!(result.is_ok());
/// }
///
/// println!("The generated vertices are: {:?}.", &buffers.vertices[..]);
/// println!("The generated indices are: {:?}.", &buffers.indices[..]);
///
/// # }
/// ```
pub struct StrokeTessellator<T = EarcutTriangulator> {
    triangulator: T,
    triangulation: Triangulation,
}

impl Default for StrokeTessellator {
    fn default() -> Self {
        Self::new()
    }
}

impl StrokeTessellator {
    pub fn new() -> Self {
        StrokeTessellator::with_triangulator(EarcutTriangulator::new())
    }
}

impl<T: Triangulator> StrokeTessellator<T> {
    /// Creates a stroke tessellator using a specific triangulation algorithm.
    pub fn with_triangulator(triangulator: T) -> Self {
        StrokeTessellator {
            triangulator,
            triangulation: Triangulation::new(),
        }
    }

    /// Compute the tessellation of the stroke of the sub-paths.
    ///
    /// The sub-paths are normalized in place (see [`SubPath::remove_closing_point`])
    /// and their outlines are updated. If the output runs out of vertex indices,
    /// everything produced during this call is discarded with
    /// `GeometryBuilder::abort_geometry`.
    pub fn tessellate(
        &mut self,
        sub_paths: &mut [SubPath],
        options: &StrokeOptions,
        output: &mut dyn GeometryBuilder,
    ) -> TessellationResult {
        output.begin_geometry();

        match self.tessellate_impl(sub_paths, options, output) {
            Ok(()) => {
                output.end_geometry();
                Ok(())
            }
            Err(e) => {
                output.abort_geometry();
                Err(e.into())
            }
        }
    }

    fn tessellate_impl(
        &mut self,
        sub_paths: &mut [SubPath],
        options: &StrokeOptions,
        output: &mut dyn GeometryBuilder,
    ) -> Result<(), GeometryBuilderError> {
        for sub_path in sub_paths.iter_mut() {
            sub_path.remove_closing_point();
            expand_stroke(sub_path, options);

            let (outer, inner) = sub_path.outlines();
            if sub_path.is_closed() && options.inner_hole {
                fill_polygon(
                    &mut self.triangulator,
                    &mut self.triangulation,
                    outer,
                    &[inner],
                    output,
                )?;
            } else {
                fill_polygon(
                    &mut self.triangulator,
                    &mut self.triangulation,
                    outer,
                    &[],
                    output,
                )?;
            }
        }

        Ok(())
    }
}

/// Computes the outlines of the stroke of a sub-path.
///
/// The per-point stroke properties (direction, length, normal and the turn, bevel
/// and sharpness flags) are updated, then the outlines are rebuilt:
///
/// - For a closed sub-path, the outer outline encloses the inner one.
/// - For an open sub-path, the outer outline goes along one side of the sub-path,
///   around the end cap, back along the other side and around the start cap. The
///   inner outline is empty.
///
/// Sub-paths with less than two points, or strokes without width, have no outline.
pub fn expand_stroke(sub_path: &mut SubPath, options: &StrokeOptions) {
    let closed = sub_path.is_closed();
    let (points, outer, inner) = sub_path.as_mut_parts();
    outer.clear();
    inner.clear();

    let half_width = options.line_width * 0.5;
    if points.len() < 2 || !(half_width > 0.0) || !half_width.is_finite() {
        log::debug!(
            "No stroke for a sub-path of {} points with a line width of {}",
            points.len(),
            options.line_width
        );
        return;
    }

    compute_directions(points, closed);
    compute_joins(points, closed, options, half_width);

    let stroker = Stroker {
        points,
        options,
        half_width,
    };

    if closed {
        stroker.closed_outlines(outer, inner);
        if signed_area_x2(inner).abs() > signed_area_x2(outer).abs() {
            std::mem::swap(outer, inner);
        }
    } else {
        stroker.open_outline(outer);
    }
}

fn compute_directions(points: &mut [ContourPoint], closed: bool) {
    let n = points.len();
    for i in 0..n {
        let next = if i + 1 < n {
            i + 1
        } else if closed {
            0
        } else {
            // The end of an open sub-path keeps the direction of the last segment.
            points[i].direction = points[i - 1].direction;
            points[i].length = 0.0;
            continue;
        };

        let d = points[next].position - points[i].position;
        let length = d.length();
        points[i].length = length;
        points[i].direction = if length > 0.0 { d / length } else { Vector::zero() };
    }
}

fn compute_joins(points: &mut [ContourPoint], closed: bool, options: &StrokeOptions, half_width: f32) {
    let n = points.len();
    for i in 0..n {
        points[i].flags &= PointFlags::CORNER;

        if !closed && (i == 0 || i == n - 1) {
            points[i].normal = edge_normal(points[i].direction);
            continue;
        }

        let prev = if i == 0 { n - 1 } else { i - 1 };
        let d0 = points[prev].direction;
        let d1 = points[i].direction;
        let (miter, dot) = compute_miter(d0, d1);
        points[i].normal = miter;

        let mut flags = if d1.x * d0.y - d1.y * d0.x > 0.0 {
            PointFlags::LEFT_TURN
        } else {
            PointFlags::RIGHT_TURN
        };

        let miter_length = if dot > f32::EPSILON {
            half_width / dot.sqrt()
        } else {
            f32::INFINITY
        };
        let shortest = points[prev].length.min(points[i].length);
        if miter_length > options.sharp_corner_ratio * shortest {
            flags |= PointFlags::SHARP;
        }

        if points[i].is_corner() {
            let bevel = match options.line_join {
                LineJoin::Bevel | LineJoin::Round => true,
                LineJoin::Miter => dot * options.miter_limit * options.miter_limit < 1.0,
            };
            if bevel {
                flags |= PointFlags::BEVEL;
            }
        }

        points[i].flags |= flags;
    }
}

struct Stroker<'l> {
    points: &'l [ContourPoint],
    options: &'l StrokeOptions,
    half_width: f32,
}

impl<'l> Stroker<'l> {
    // The "negative" side (position - normal) goes into `negative` and the other
    // one into `positive`.
    fn closed_outlines(&self, negative: &mut Vec<Point>, positive: &mut Vec<Point>) {
        let n = self.points.len();
        for i in 0..n {
            let prev = if i == 0 { n - 1 } else { i - 1 };
            let point = &self.points[i];
            let n_in = edge_normal(self.points[prev].direction) * self.half_width;
            let n_out = edge_normal(point.direction) * self.half_width;
            let miter = point.normal * self.half_width;

            self.add_join(
                negative,
                point,
                -n_in,
                -n_out,
                -miter,
                point.flags.contains(PointFlags::LEFT_TURN),
            );
            self.add_join(
                positive,
                point,
                n_in,
                n_out,
                miter,
                point.flags.contains(PointFlags::RIGHT_TURN),
            );
        }
    }

    fn open_outline(&self, output: &mut Vec<Point>) {
        let n = self.points.len();
        let hw = self.half_width;
        let first = &self.points[0];
        let last = &self.points[n - 1];

        // Forward along the negative side.
        output.add_point(first.position - first.normal * hw, PointKind::Corner);
        for i in 1..n - 1 {
            let point = &self.points[i];
            let n_in = edge_normal(self.points[i - 1].direction) * hw;
            let n_out = edge_normal(point.direction) * hw;
            self.add_join(
                output,
                point,
                -n_in,
                -n_out,
                -point.normal * hw,
                point.flags.contains(PointFlags::LEFT_TURN),
            );
        }
        output.add_point(last.position - last.normal * hw, PointKind::Corner);

        self.add_cap(output, last.position, last.direction, -last.normal * hw);

        // Backward along the positive side.
        output.add_point(last.position + last.normal * hw, PointKind::Corner);
        for i in (1..n - 1).rev() {
            let point = &self.points[i];
            let n_in = edge_normal(self.points[i - 1].direction) * hw;
            let n_out = edge_normal(point.direction) * hw;
            self.add_join(
                output,
                point,
                n_out,
                n_in,
                point.normal * hw,
                point.flags.contains(PointFlags::RIGHT_TURN),
            );
        }
        output.add_point(first.position + first.normal * hw, PointKind::Corner);

        self.add_cap(output, first.position, -first.direction, first.normal * hw);

        if output.len() > 1 && points_are_close(output[0], output[output.len() - 1]) {
            output.pop();
        }
    }

    // `before` and `after` are the offsets of the edges entering and leaving the
    // join in traversal order, `miter` the offset of the miter point.
    fn add_join(
        &self,
        output: &mut Vec<Point>,
        point: &ContourPoint,
        before: Vector,
        after: Vector,
        miter: Vector,
        convex: bool,
    ) {
        let pos = point.position;

        if convex && point.flags.contains(PointFlags::BEVEL) {
            output.add_point(pos + before, PointKind::Corner);
            if self.options.line_join == LineJoin::Round {
                Fillet {
                    from: pos + before,
                    corner: pos + miter,
                    to: pos + after,
                    radius: self.half_width,
                }
                .for_each_flattened(&self.options.flattening, output);
            }
            output.add_point(pos + after, PointKind::Corner);
        } else if !convex && point.flags.contains(PointFlags::SHARP) {
            output.add_point(pos + before, PointKind::Corner);
            output.add_point(pos + after, PointKind::Corner);
        } else {
            output.add_point(pos + miter, PointKind::Corner);
        }
    }

    // Goes around the end of the stroke at `center`, from `center + offset` to
    // `center - offset`.
    fn add_cap(&self, output: &mut Vec<Point>, center: Point, outward: Vector, offset: Vector) {
        let hw = self.half_width;
        let extent = outward * hw;
        match self.options.line_cap {
            LineCap::Butt => {}
            LineCap::Square => {
                output.add_point(center + offset + extent, PointKind::Corner);
                output.add_point(center - offset + extent, PointKind::Corner);
            }
            LineCap::Round => {
                let flattening = &self.options.flattening;
                Fillet {
                    from: center + offset,
                    corner: center + offset + extent,
                    to: center + extent,
                    radius: hw,
                }
                .for_each_flattened(flattening, output);
                Fillet {
                    from: center + extent,
                    corner: center - offset + extent,
                    to: center - offset,
                    radius: hw,
                }
                .for_each_flattened(flattening, output);
            }
        }
    }
}

#[cfg(test)]
use crate::math::point;

#[test]
fn turn_flags() {
    let mut sub_path = SubPath::starting_at(point(0.0, 0.0));
    sub_path.add_point(point(10.0, 0.0), PointKind::Corner);
    sub_path.add_point(point(10.0, 10.0), PointKind::Corner);
    sub_path.add_point(point(20.0, 10.0), PointKind::Corner);

    expand_stroke(&mut sub_path, &StrokeOptions::default().with_line_width(2.0));

    let points = sub_path.points();
    assert!(points[1].flags.contains(PointFlags::RIGHT_TURN));
    assert!(points[2].flags.contains(PointFlags::LEFT_TURN));
    assert!(!points[1].flags.intersects(PointFlags::BEVEL | PointFlags::SHARP));
    assert_eq!(points[0].flags, PointFlags::CORNER);
    assert_eq!(points[3].direction, points[2].direction);
    assert_eq!(points[0].length, 10.0);
}

#[test]
fn bevel_flags() {
    let mut sub_path = SubPath::starting_at(point(0.0, 0.0));
    sub_path.add_point(point(10.0, 0.0), PointKind::Corner);
    sub_path.add_point(point(10.0, 10.0), PointKind::Corner);

    // A right angle has a miter ratio of sqrt(2).
    let miter = StrokeOptions::default().with_miter_limit(1.5);
    expand_stroke(&mut sub_path, &miter);
    assert!(!sub_path.points()[1].flags.contains(PointFlags::BEVEL));

    expand_stroke(&mut sub_path, &miter.with_miter_limit(1.4));
    assert!(sub_path.points()[1].flags.contains(PointFlags::BEVEL));

    expand_stroke(&mut sub_path, &miter.with_line_join(LineJoin::Round));
    assert!(sub_path.points()[1].flags.contains(PointFlags::BEVEL));

    // Flattened points are never beveled.
    let mut sub_path = SubPath::starting_at(point(0.0, 0.0));
    sub_path.add_point(point(10.0, 0.0), PointKind::Flattened);
    sub_path.add_point(point(10.0, 10.0), PointKind::Corner);
    expand_stroke(&mut sub_path, &miter.with_line_join(LineJoin::Bevel));
    assert!(!sub_path.points()[1].flags.contains(PointFlags::BEVEL));
}

#[test]
fn sharp_flags() {
    let mut sub_path = SubPath::starting_at(point(0.0, 0.0));
    sub_path.add_point(point(10.0, 0.0), PointKind::Corner);
    sub_path.add_point(point(10.0, 1.0), PointKind::Corner);
    sub_path.add_point(point(0.0, 1.0), PointKind::Corner);

    // The miter length is sqrt(2) * 0.5 for a line width of 1.
    expand_stroke(&mut sub_path, &StrokeOptions::default());
    assert!(!sub_path.points()[1].flags.contains(PointFlags::SHARP));

    expand_stroke(&mut sub_path, &StrokeOptions::default().with_line_width(2.0));
    assert!(sub_path.points()[1].flags.contains(PointFlags::SHARP));
    assert!(sub_path.points()[2].flags.contains(PointFlags::SHARP));
}

#[test]
fn degenerate_strokes() {
    let mut single = SubPath::starting_at(point(1.0, 1.0));
    expand_stroke(&mut single, &StrokeOptions::default());
    assert!(single.outlines().0.is_empty());

    let mut line = SubPath::starting_at(point(0.0, 0.0));
    line.add_point(point(10.0, 0.0), PointKind::Corner);
    expand_stroke(&mut line, &StrokeOptions::default().with_line_width(0.0));
    assert!(line.outlines().0.is_empty());

    expand_stroke(&mut line, &StrokeOptions::default().with_line_width(f32::NAN));
    assert!(line.outlines().0.is_empty());
}
