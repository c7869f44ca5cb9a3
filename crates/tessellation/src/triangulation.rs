//! Triangulation of simple polygons with holes.
//!
//! The tessellators reduce every shape to polygons and rely on a [`Triangulator`]
//! to split them into triangles. The default implementation is based on the
//! ear clipping algorithm of the `earcutr` crate.

use crate::error::{GeometryBuilderError, TriangulationError};
use crate::geometry_builder::GeometryBuilder;
use crate::math::Point;
use crate::math_utils::triangle_area_x2;
use crate::VertexId;

/// The output of a triangulation: a pool of points and triangles indexing into it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Triangulation {
    /// The outline's points followed by the points of each hole.
    pub points: Vec<Point>,
    pub triangles: Vec<[u32; 3]>,
}

impl Triangulation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.triangles.clear();
    }

    /// Writes the triangles into a geometry builder.
    ///
    /// All triangles are written with the same orientation: `(b - a) × (c - a) >= 0`.
    pub fn build(&self, output: &mut dyn GeometryBuilder) -> Result<(), GeometryBuilderError> {
        if self.triangles.is_empty() {
            return Ok(());
        }

        let mut ids = Vec::with_capacity(self.points.len());
        for p in &self.points {
            ids.push(output.add_vertex(*p)?);
        }

        for &[a, b, c] in &self.triangles {
            let (a, b, c) = (a as usize, b as usize, c as usize);
            let id = |i: usize| -> VertexId { ids[i] };
            if triangle_area_x2(self.points[a], self.points[b], self.points[c]) < 0.0 {
                output.add_triangle(id(a), id(c), id(b));
            } else {
                output.add_triangle(id(a), id(b), id(c));
            }
        }

        Ok(())
    }
}

/// Splits a polygon with holes into triangles.
pub trait Triangulator {
    /// Triangulates `outline` minus `holes`, replacing the content of `output`.
    ///
    /// The outline and holes can have any orientation. They are not closed:
    /// the last point is implicitly connected to the first one.
    fn triangulate(
        &mut self,
        outline: &[Point],
        holes: &[&[Point]],
        output: &mut Triangulation,
    ) -> Result<(), TriangulationError>;
}

/// A [`Triangulator`] implemented with the `earcutr` crate.
#[derive(Debug, Default)]
pub struct EarcutTriangulator {
    coords: Vec<f64>,
    hole_indices: Vec<usize>,
}

impl EarcutTriangulator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Triangulator for EarcutTriangulator {
    fn triangulate(
        &mut self,
        outline: &[Point],
        holes: &[&[Point]],
        output: &mut Triangulation,
    ) -> Result<(), TriangulationError> {
        output.clear();
        self.coords.clear();
        self.hole_indices.clear();

        for &p in outline {
            self.coords.push(p.x as f64);
            self.coords.push(p.y as f64);
            output.points.push(p);
        }

        for hole in holes {
            self.hole_indices.push(output.points.len());
            for &p in *hole {
                self.coords.push(p.x as f64);
                self.coords.push(p.y as f64);
                output.points.push(p);
            }
        }

        let indices = earcutr::earcut(&self.coords, &self.hole_indices, 2)
            .map_err(|e| TriangulationError::Failed(format!("{:?}", e)))?;

        if indices.len() % 3 != 0 || indices.iter().any(|&i| i >= output.points.len()) {
            output.clear();
            return Err(TriangulationError::InvalidIndices);
        }

        output.triangles.extend(
            indices
                .chunks_exact(3)
                .map(|t| [t[0] as u32, t[1] as u32, t[2] as u32]),
        );

        Ok(())
    }
}

/// Triangulates a polygon and writes the triangles into `output`.
///
/// Polygons with less than three points are ignored. Triangulation failures are
/// logged and the polygon is skipped, only the geometry builder's errors are
/// propagated.
pub(crate) fn fill_polygon(
    triangulator: &mut dyn Triangulator,
    triangulation: &mut Triangulation,
    outline: &[Point],
    holes: &[&[Point]],
    output: &mut dyn GeometryBuilder,
) -> Result<(), GeometryBuilderError> {
    if outline.len() < 3 {
        return Ok(());
    }

    let holes: Vec<&[Point]> = holes.iter().copied().filter(|h| h.len() >= 3).collect();

    if let Err(e) = triangulator.triangulate(outline, &holes, triangulation) {
        log::warn!("Skipping a polygon of {} points: {}", outline.len(), e);
        return Ok(());
    }

    triangulation.build(output)
}

#[cfg(test)]
use crate::math::point;

#[cfg(test)]
fn total_area(triangulation: &Triangulation) -> f32 {
    triangulation
        .triangles
        .iter()
        .map(|&[a, b, c]| {
            let p = &triangulation.points;
            triangle_area_x2(p[a as usize], p[b as usize], p[c as usize]).abs() * 0.5
        })
        .sum()
}

#[test]
fn square() {
    let mut triangulator = EarcutTriangulator::new();
    let mut output = Triangulation::new();
    let square = [
        point(0.0, 0.0),
        point(0.0, 10.0),
        point(10.0, 10.0),
        point(10.0, 0.0),
    ];
    triangulator.triangulate(&square, &[], &mut output).unwrap();

    assert_eq!(output.points.len(), 4);
    assert_eq!(output.triangles.len(), 2);
    assert!((total_area(&output) - 100.0).abs() < 0.001);
}

#[test]
fn square_with_hole() {
    let mut triangulator = EarcutTriangulator::new();
    let mut output = Triangulation::new();
    let outer = [
        point(0.0, 0.0),
        point(10.0, 0.0),
        point(10.0, 10.0),
        point(0.0, 10.0),
    ];
    let inner = [
        point(2.0, 2.0),
        point(8.0, 2.0),
        point(8.0, 8.0),
        point(2.0, 8.0),
    ];
    triangulator
        .triangulate(&outer, &[&inner[..]], &mut output)
        .unwrap();

    assert_eq!(output.points.len(), 8);
    assert_eq!(output.triangles.len(), 8);
    assert!((total_area(&output) - 64.0).abs() < 0.001);
}

#[test]
fn consistent_orientation() {
    use crate::geometry_builder::{BuffersBuilder, Positions, VertexBuffers};

    let triangulation = Triangulation {
        points: vec![
            point(0.0, 0.0),
            point(1.0, 0.0),
            point(1.0, 1.0),
            point(0.0, 1.0),
        ],
        triangles: vec![[0, 1, 2], [0, 3, 2]],
    };

    let mut buffers: VertexBuffers<Point, u16> = VertexBuffers::new();
    triangulation
        .build(&mut BuffersBuilder::new(&mut buffers, Positions))
        .unwrap();

    assert_eq!(buffers.indices, vec![0, 1, 2, 0, 2, 3]);
}

#[test]
fn flat_polygon_adds_no_vertices() {
    use crate::geometry_builder::{BuffersBuilder, Positions, VertexBuffers};

    let mut triangulator = EarcutTriangulator::new();
    let mut triangulation = Triangulation::new();
    let mut buffers: VertexBuffers<Point, u16> = VertexBuffers::new();
    let line = [point(0.0, 0.0), point(5.0, 0.0), point(10.0, 0.0)];

    fill_polygon(
        &mut triangulator,
        &mut triangulation,
        &line,
        &[],
        &mut BuffersBuilder::new(&mut buffers, Positions),
    )
    .unwrap();

    assert!(triangulation.triangles.is_empty());
    assert!(buffers.vertices.is_empty());
    assert!(buffers.indices.is_empty());
}
