//! Tools to help with generating vertex and index buffers.
//!
//! ## Overview
//!
//! The tessellators don't write vertex and index buffers directly. They produce
//! positions and triangles through the [`GeometryBuilder`] trait, which lets the
//! caller decide on the vertex layout and on where the geometry is stored.
//!
//! It is very common to push vertices and indices into a pair of vectors, so to
//! facilitate this pattern this module also provides:
//!
//! * The struct [`VertexBuffers`] is a simple pair of vectors of vertices and indices
//!   (generic parameters). [`Mesh`] is the vertex buffer type produced by the canvas API:
//!   colored vertices and 16 bits indices.
//! * The struct [`BuffersBuilder`] which writes into a [`VertexBuffers`] and implements
//!   [`GeometryBuilder`]. It takes care of filling the buffers and offsetting the indices
//!   while producing vertices is delegated to a [`VertexConstructor`].
//! * The [`WithColor`] vertex constructor, which produces [`ColorVertex`] values.
//!   Closures taking a position can be used as vertex constructors too.
//!
//! ## Examples
//!
//! The example below tessellates two shapes with different colors into the same mesh.
//!
//! ```
//! extern crate quill_tessellation as tess;
//! use tess::{BuffersBuilder, Color, FillTessellator, Mesh, WithColor};
//! use tess::path::Path;
//! use tess::math::{point, rect};
//!
//! fn main() {
//!     let mut mesh = Mesh::new();
//!     let mut tessellator = FillTessellator::new();
//!
//!     let mut path = Path::new();
//!     path.rect(&rect(0.0, 0.0, 10.0, 10.0));
//!     tessellator.tessellate(
//!         &mut path.take_sub_paths(),
//!         &mut BuffersBuilder::new(&mut mesh, WithColor(Color::RED)),
//!     ).unwrap();
//!
//!     path.move_to(point(20.0, 0.0));
//!     path.line_to(point(30.0, 0.0));
//!     path.line_to(point(25.0, 10.0));
//!     tessellator.tessellate(
//!         &mut path.take_sub_paths(),
//!         &mut BuffersBuilder::new(&mut mesh, WithColor(Color::GREEN)),
//!     ).unwrap();
//!
//!     assert_eq!(mesh.vertices.len(), 7);
//!     assert_eq!(mesh.indices.len(), 9);
//! }
//! ```
//!

pub use crate::error::GeometryBuilderError;
use crate::math::Point;
use crate::{Color, Index, VertexId};

use std::convert::From;
use std::ops::Add;

/// An interface separating the tessellators from the actual vertex construction.
///
/// See the [`geometry_builder`](index.html) module documentation for more detailed explanation.
pub trait GeometryBuilder {
    /// Called at the beginning of a generation.
    ///
    /// end_geometry must be called before begin_geometry is called again.
    fn begin_geometry(&mut self) {}

    /// Called at the end of a generation.
    fn end_geometry(&mut self) {}

    /// Inserts a vertex and returns its id.
    ///
    /// The id is only valid between begin_geometry and end_geometry.
    fn add_vertex(&mut self, position: Point) -> Result<VertexId, GeometryBuilderError>;

    /// Insert a triangle made of vertices that were added after the last call to begin_geometry.
    ///
    /// This method can only be called between begin_geometry and end_geometry.
    fn add_triangle(&mut self, a: VertexId, b: VertexId, c: VertexId);

    /// abort_geometry is called instead of end_geometry if an error occurred while producing
    /// the geometry and we won't be able to finish.
    ///
    /// The implementation is expected to discard the geometry that was generated since the last
    /// time begin_geometry was called, and to remain in a usable state.
    fn abort_geometry(&mut self) {}
}

/// Structure that holds the vertex and index data.
///
/// Usually written into though temporary `BuffersBuilder` objects.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct VertexBuffers<OutputVertex, OutputIndex> {
    pub vertices: Vec<OutputVertex>,
    pub indices: Vec<OutputIndex>,
}

impl<OutputVertex, OutputIndex> VertexBuffers<OutputVertex, OutputIndex> {
    /// Constructor
    pub fn new() -> Self {
        VertexBuffers::with_capacity(512, 1024)
    }

    /// Constructor
    pub fn with_capacity(num_vertices: usize, num_indices: usize) -> Self {
        VertexBuffers {
            vertices: Vec::with_capacity(num_vertices),
            indices: Vec::with_capacity(num_indices),
        }
    }

    /// Empty the buffers without freeing memory, for reuse without reallocation.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.indices.is_empty()
    }
}

/// A vertex with a position and an 8 bits per channel RGBA color.
///
/// The z coordinate of the position is always zero. The layout is stable so that
/// vertex buffers can be uploaded to the GPU as they are.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct ColorVertex {
    pub position: [f32; 3],
    pub color: [u8; 4],
}

impl ColorVertex {
    #[inline]
    pub fn position_2d(&self) -> Point {
        Point::new(self.position[0], self.position[1])
    }
}

/// Colored triangles with 16 bits indices, addressing at most 65536 vertices.
pub type Mesh = VertexBuffers<ColorVertex, u16>;

/// A temporary view on a `VertexBuffers` object which facilitate the population of vertex and index
/// data.
///
/// `BuffersBuilders` record the vertex offset from when they are created so that algorithms using
/// them don't need to worry about offsetting indices if some geometry was added beforehand. This
/// means that from the point of view of a `BuffersBuilder` user, the first added vertex is at always
/// offset at the offset 0 and `BuffersBuilder` takes care of translating indices adequately.
pub struct BuffersBuilder<'l, OutputVertex: 'l, OutputIndex: 'l, Ctor> {
    buffers: &'l mut VertexBuffers<OutputVertex, OutputIndex>,
    first_vertex: Index,
    first_index: Index,
    vertex_offset: Index,
    vertex_constructor: Ctor,
}

impl<'l, OutputVertex: 'l, OutputIndex: 'l, Ctor>
    BuffersBuilder<'l, OutputVertex, OutputIndex, Ctor>
{
    pub fn new(buffers: &'l mut VertexBuffers<OutputVertex, OutputIndex>, ctor: Ctor) -> Self {
        let first_vertex = buffers.vertices.len() as Index;
        let first_index = buffers.indices.len() as Index;
        BuffersBuilder {
            buffers,
            first_vertex,
            first_index,
            vertex_offset: first_vertex,
            vertex_constructor: ctor,
        }
    }
}

impl<'l, OutputVertex, OutputIndex, Ctor> GeometryBuilder
    for BuffersBuilder<'l, OutputVertex, OutputIndex, Ctor>
where
    OutputVertex: 'l,
    OutputIndex: Add + From<VertexId> + MaxIndex,
    Ctor: VertexConstructor<OutputVertex>,
{
    fn begin_geometry(&mut self) {
        self.first_vertex = self.buffers.vertices.len() as Index;
        self.first_index = self.buffers.indices.len() as Index;
        self.vertex_offset = self.first_vertex;
    }

    fn add_vertex(&mut self, position: Point) -> Result<VertexId, GeometryBuilderError> {
        if !position.x.is_finite() || !position.y.is_finite() {
            return Err(GeometryBuilderError::InvalidVertex);
        }

        let len = self.buffers.vertices.len();
        if len > OutputIndex::MAX {
            return Err(GeometryBuilderError::TooManyVertices);
        }

        self.buffers
            .vertices
            .push(self.vertex_constructor.new_vertex(position));

        Ok(VertexId(len as Index - self.vertex_offset))
    }

    fn add_triangle(&mut self, a: VertexId, b: VertexId, c: VertexId) {
        debug_assert!(a != VertexId::INVALID);
        debug_assert!(b != VertexId::INVALID);
        debug_assert!(c != VertexId::INVALID);
        self.buffers.indices.push((a + self.vertex_offset).into());
        self.buffers.indices.push((b + self.vertex_offset).into());
        self.buffers.indices.push((c + self.vertex_offset).into());
    }

    fn abort_geometry(&mut self) {
        self.buffers.vertices.truncate(self.first_vertex as usize);
        self.buffers.indices.truncate(self.first_index as usize);
    }
}

/// A trait specifying how to create vertex values.
pub trait VertexConstructor<OutputVertex> {
    fn new_vertex(&mut self, position: Point) -> OutputVertex;
}

impl<F, OutputVertex> VertexConstructor<OutputVertex> for F
where
    F: Fn(Point) -> OutputVertex,
{
    fn new_vertex(&mut self, position: Point) -> OutputVertex {
        self(position)
    }
}

/// A simple vertex constructor that just takes the position.
pub struct Positions;

impl VertexConstructor<Point> for Positions {
    fn new_vertex(&mut self, position: Point) -> Point {
        position
    }
}

/// Creates [`ColorVertex`] values of a given color.
pub struct WithColor(pub Color);

impl VertexConstructor<ColorVertex> for WithColor {
    fn new_vertex(&mut self, position: Point) -> ColorVertex {
        ColorVertex {
            position: [position.x, position.y, 0.0],
            color: self.0.to_array(),
        }
    }
}

/// Provides the maximum value of an index.
///
/// This should be the maximum value representable by the index type up
/// to u32::MAX because the tessellators can't internally represent more
/// than u32::MAX indices.
pub trait MaxIndex {
    const MAX: usize;
}

impl MaxIndex for u16 {
    const MAX: usize = u16::MAX as usize;
}
impl MaxIndex for u32 {
    const MAX: usize = u32::MAX as usize;
}

#[cfg(test)]
use crate::math::point;

#[test]
fn vertex_offset() {
    let mut buffers: VertexBuffers<Point, u16> = VertexBuffers::new();
    buffers.vertices.push(point(0.0, 0.0));
    buffers.vertices.push(point(1.0, 0.0));

    let mut builder = BuffersBuilder::new(&mut buffers, Positions);
    builder.begin_geometry();
    let a = builder.add_vertex(point(0.0, 0.0)).unwrap();
    let b = builder.add_vertex(point(1.0, 0.0)).unwrap();
    let c = builder.add_vertex(point(1.0, 1.0)).unwrap();
    builder.add_triangle(a, b, c);
    builder.end_geometry();

    assert_eq!(a, VertexId(0));
    assert_eq!(buffers.vertices.len(), 5);
    assert_eq!(buffers.indices, vec![2, 3, 4]);
}

#[test]
fn abort_restores_the_buffers() {
    let mut buffers: Mesh = VertexBuffers::new();
    let mut builder = BuffersBuilder::new(&mut buffers, WithColor(Color::BLACK));
    builder.begin_geometry();
    let a = builder.add_vertex(point(0.0, 0.0)).unwrap();
    let b = builder.add_vertex(point(1.0, 0.0)).unwrap();
    let c = builder.add_vertex(point(1.0, 1.0)).unwrap();
    builder.add_triangle(a, b, c);
    builder.end_geometry();

    builder.begin_geometry();
    builder.add_vertex(point(5.0, 0.0)).unwrap();
    builder.abort_geometry();

    assert_eq!(buffers.vertices.len(), 3);
    assert_eq!(buffers.indices, vec![0, 1, 2]);
    assert_eq!(buffers.vertices[2].position, [1.0, 1.0, 0.0]);
    assert_eq!(buffers.vertices[2].color, [0, 0, 0, 255]);
}

#[test]
fn u16_capacity() {
    let mut buffers: VertexBuffers<Point, u16> = VertexBuffers::new();
    let mut builder = BuffersBuilder::new(&mut buffers, |p: Point| p);
    builder.begin_geometry();
    for i in 0..65536 {
        let id = builder.add_vertex(point(i as f32, 0.0)).unwrap();
        assert_eq!(id.offset(), i);
    }
    assert_eq!(
        builder.add_vertex(point(0.0, 1.0)),
        Err(GeometryBuilderError::TooManyVertices)
    );
    assert_eq!(
        builder.add_vertex(point(f32::NAN, 1.0)),
        Err(GeometryBuilderError::InvalidVertex)
    );
}
