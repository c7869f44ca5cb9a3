#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::float_cmp)]
#![allow(clippy::too_many_arguments)]

//! Tessellation of 2D fill and stroke operations.
//!
//! This crate is reexported in [quill](https://docs.rs/quill/).
//!
//! ## Overview
//!
//! The most interesting types and traits of this crate are:
//!
//! * [FillTessellator](struct.FillTessellator.html) - Tessellator for path fill operations.
//! * [StrokeTessellator](struct.StrokeTessellator.html) - Tessellator for path stroke operations.
//! * [`GeometryBuilder`](geometry_builder/trait.GeometryBuilder.html) - (See the documentation of the
//!   [geometry_builder module](geometry_builder/index.html)) which the above two are built on. This trait
//!   provides an interface for types that help with building and assembling the vertices and triangles that
//!   form the tessellation, usually in the form of arbitrary vertex and index buffers.
//!
//! ## The tessellation pipeline
//!
//! ### The input: sub-paths
//!
//! The tessellators consume flattened sub-paths (see [`SubPath`]), usually recorded with the
//! canvas-like [Path](https://docs.rs/quill_path/*/quill_path/struct.Path.html) of the
//! `quill_path` crate. Curves and arcs are flattened when they are recorded, so the
//! tessellators only ever see polylines.
//!
//! ### Polygons and triangulation
//!
//! Fills triangulate each sub-path as a polygon. Strokes first compute the outlines of the
//! stroke of each sub-path (miters, bevels, round joins and caps included) and triangulate
//! the area between them. The triangulation itself is delegated to a
//! [`Triangulator`](triangulation/trait.Triangulator.html), by default based on the ear
//! clipping algorithm.
//!
//! A polygon that can't be triangulated is skipped and the failure is logged. The rest of
//! the geometry is still produced.
//!
//! ### The output: geometry builders
//!
//! The tessellators are parametrized over a type implementing the
//! [GeometryBuilder trait](geometry_builder/trait.GeometryBuilder.html).
//! This trait provides some simple methods to add vertices and triangles, without enforcing
//! any particular representation for the resulting geometry.
//!
//! The structs [VertexBuffers](geometry_builder/struct.VertexBuffers.html) and
//! [geometry_builder::BuffersBuilder](geometry_builder/struct.BuffersBuilder.html) are provided
//! for convenience. If the geometry builder runs out of vertex indices, the tessellator
//! discards everything it produced during the call and returns an error.
//!
//! ### Flattening and tolerance
//!
//! When paths contain bézier curves or arcs, the latter need to be approximated with sequences
//! of line segments. This approximation depends on a `tolerance` parameter which represents the
//! maximum distance between a curve and its flattened approximation. The path records its
//! flattening options, and the stroke options carry their own for round joins and caps.
//!
//! ## Examples
//!
//! - [Tessellating path fills](struct.FillTessellator.html#examples).
//! - [Tessellating path strokes](struct.StrokeTessellator.html#examples).
//! - [Generating colored vertices](geometry_builder/index.html#examples).
//!

pub use quill_path as path;

#[cfg(test)]
use quill_extra as extra;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

mod color;
mod error;
mod fill;
pub mod geometry_builder;
mod math_utils;
mod stroke;
pub mod triangulation;

#[cfg(test)]
mod fill_tests;
#[cfg(test)]
mod stroke_tests;

pub use crate::path::math;

pub use crate::path::geom;

#[doc(inline)]
pub use crate::color::Color;

#[doc(inline)]
pub use crate::fill::*;

#[doc(inline)]
pub use crate::stroke::*;

#[doc(inline)]
pub use crate::geometry_builder::{
    BuffersBuilder, ColorVertex, GeometryBuilder, GeometryBuilderError, Mesh,
    Positions, VertexBuffers, VertexConstructor, WithColor,
};

#[doc(inline)]
pub use crate::triangulation::{EarcutTriangulator, Triangulation, Triangulator};

#[doc(inline)]
pub use crate::error::*;

pub use crate::path::{FlattenOptions, LineCap, LineJoin, PointFlags, SubPath};

use std::ops::Add;

/// Parameters for the stroke tessellator.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct StrokeOptions {
    /// Line width
    ///
    /// Default value: `StrokeOptions::DEFAULT_LINE_WIDTH`.
    pub line_width: f32,

    /// See the SVG specification.
    ///
    /// Default value: `LineJoin::Miter`.
    pub line_join: LineJoin,

    /// What cap to use at both ends of open sub-paths.
    ///
    /// Default value: `LineCap::Butt`.
    pub line_cap: LineCap,

    /// Miters longer than `miter_limit` times the half line width are replaced
    /// with bevels.
    ///
    /// Must be greater than or equal to 1.0.
    /// Default value: `StrokeOptions::DEFAULT_MITER_LIMIT`.
    pub miter_limit: f32,

    /// A join is sharp when its miter is longer than this ratio times the
    /// shortest adjacent segment. The inner side of sharp joins is not mitered.
    ///
    /// Default value: `StrokeOptions::DEFAULT_SHARP_CORNER_RATIO`.
    pub sharp_corner_ratio: f32,

    /// Whether the inner outline of closed sub-paths is a hole in the stroke.
    ///
    /// Default value: `true`.
    pub inner_hole: bool,

    /// Flattening of round joins and caps.
    ///
    /// See [Flattening and tolerance](index.html#flattening-and-tolerance).
    /// Default value: `FlattenOptions::DEFAULT`.
    pub flattening: FlattenOptions,
}

impl StrokeOptions {
    /// Minimum miter limit as defined by the SVG specification.
    ///
    /// See [StrokeMiterLimitProperty](https://svgwg.org/specs/strokes/#StrokeMiterlimitProperty)
    pub const MINIMUM_MITER_LIMIT: f32 = 1.0;
    pub const DEFAULT_MITER_LIMIT: f32 = 10.0;
    pub const DEFAULT_LINE_CAP: LineCap = LineCap::Butt;
    pub const DEFAULT_LINE_JOIN: LineJoin = LineJoin::Miter;
    pub const DEFAULT_LINE_WIDTH: f32 = 1.0;
    pub const DEFAULT_SHARP_CORNER_RATIO: f32 = 1.0;

    pub const DEFAULT: Self = StrokeOptions {
        line_width: Self::DEFAULT_LINE_WIDTH,
        line_join: Self::DEFAULT_LINE_JOIN,
        line_cap: Self::DEFAULT_LINE_CAP,
        miter_limit: Self::DEFAULT_MITER_LIMIT,
        sharp_corner_ratio: Self::DEFAULT_SHARP_CORNER_RATIO,
        inner_hole: true,
        flattening: FlattenOptions::DEFAULT,
    };

    #[inline]
    pub fn tolerance(tolerance: f32) -> Self {
        Self::DEFAULT.with_tolerance(tolerance)
    }

    #[inline]
    pub fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.flattening = self.flattening.with_tolerance(tolerance);
        self
    }

    #[inline]
    pub const fn with_flattening(mut self, flattening: FlattenOptions) -> Self {
        self.flattening = flattening;
        self
    }

    #[inline]
    pub const fn with_line_cap(mut self, cap: LineCap) -> Self {
        self.line_cap = cap;
        self
    }

    #[inline]
    pub const fn with_line_join(mut self, join: LineJoin) -> Self {
        self.line_join = join;
        self
    }

    #[inline]
    pub const fn with_line_width(mut self, width: f32) -> Self {
        self.line_width = width;
        self
    }

    #[inline]
    pub fn with_miter_limit(mut self, limit: f32) -> Self {
        assert!(limit >= Self::MINIMUM_MITER_LIMIT);
        self.miter_limit = limit;
        self
    }

    #[inline]
    pub const fn with_sharp_corner_ratio(mut self, ratio: f32) -> Self {
        self.sharp_corner_ratio = ratio;
        self
    }

    #[inline]
    pub const fn with_inner_hole(mut self, inner_hole: bool) -> Self {
        self.inner_hole = inner_hole;
        self
    }
}

impl Default for StrokeOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

type Index = u32;

/// A virtual vertex offset in a geometry.
///
/// The `VertexId`s are only valid between `GeometryBuilder::begin_geometry` and
/// `GeometryBuilder::end_geometry`. `GeometryBuilder` implementations typically
/// translate the ids internally so that first `VertexId` after `begin_geometry` is zero.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct VertexId(pub Index);

impl VertexId {
    pub const INVALID: VertexId = VertexId(u32::MAX);

    pub fn offset(self) -> Index {
        self.0
    }
}

impl Add<u32> for VertexId {
    type Output = Self;
    fn add(self, rhs: u32) -> Self {
        VertexId(self.0 + rhs)
    }
}

impl From<u16> for VertexId {
    fn from(v: u16) -> Self {
        VertexId(v as Index)
    }
}
impl From<u32> for VertexId {
    fn from(v: u32) -> Self {
        VertexId(v)
    }
}

impl From<VertexId> for u16 {
    fn from(v: VertexId) -> Self {
        v.0 as u16
    }
}

impl From<VertexId> for u32 {
    fn from(v: VertexId) -> Self {
        v.0
    }
}

#[test]
fn stroke_options_builders() {
    let options = StrokeOptions::tolerance(0.5)
        .with_line_width(3.0)
        .with_line_join(LineJoin::Round)
        .with_line_cap(LineCap::Square)
        .with_miter_limit(2.0)
        .with_inner_hole(false);

    assert_eq!(options.flattening.tolerance, 0.5);
    assert_eq!(options.line_width, 3.0);
    assert_eq!(options.line_join, LineJoin::Round);
    assert_eq!(options.line_cap, LineCap::Square);
    assert_eq!(options.miter_limit, 2.0);
    assert_eq!(options.sharp_corner_ratio, StrokeOptions::DEFAULT_SHARP_CORNER_RATIO);
    assert!(!options.inner_hole);
    assert_eq!(StrokeOptions::default(), StrokeOptions::DEFAULT);
}

#[test]
#[should_panic]
fn miter_limit_too_small() {
    let _ = StrokeOptions::DEFAULT.with_miter_limit(0.5);
}
