#![deny(bare_trait_objects)]

//! Canvas-style 2D path tessellation in Rust.
//!
//! # Crates
//!
//! This meta-crate (`quill`) reexports the following sub-crates for convenience:
//!
//! * **quill_tessellation** - Fill and stroke tessellation into triangle meshes.
//! * **quill_path** - Path recording into flattened sub-paths.
//! * **quill_geom** - Flattening of bézier curves, arcs and rounded corners.
//! * **quill_extra** - SVG path data parsing and sample drawings.
//!
//! Each `quill_<name>` crate is reexported as a `<name>` module in `quill`. For example:
//!
//! ```ignore
//! extern crate quill_tessellation;
//! use quill_tessellation::FillTessellator;
//! ```
//!
//! Is equivalent to:
//!
//! ```ignore
//! extern crate quill;
//! use quill::tessellation::FillTessellator;
//! ```
//!
//! On top of that, [`Path2D`] bundles a path, a drawing style and the tessellators
//! behind an API similar to the HTML canvas 2D context.
//!
//! # Feature flags
//!
//! serialization using serde can be enabled on each crate using the
//! `serialization` feature flag (disabled by default).
//!
//! # Examples
//!
//! ## Filling a heart
//!
//! ```
//! use quill::math::point;
//! use quill::tessellation::{Color, Mesh};
//! use quill::{Path2D, Style};
//!
//! let mut mesh = Mesh::new();
//!
//! let style = Style::DEFAULT
//!     .with_fill_color(Color::CRIMSON)
//!     .with_line_width(2.0);
//! let mut ctx = Path2D::with_style(10.0, style);
//!
//! ctx.move_to(point(75.0, 40.0));
//! ctx.bezier_curve_to(point(75.0, 37.0), point(70.0, 25.0), point(50.0, 25.0));
//! ctx.bezier_curve_to(point(20.0, 25.0), point(20.0, 62.5), point(20.0, 62.5));
//! ctx.bezier_curve_to(point(20.0, 80.0), point(40.0, 102.0), point(75.0, 120.0));
//! ctx.bezier_curve_to(point(110.0, 102.0), point(130.0, 80.0), point(130.0, 62.5));
//! ctx.bezier_curve_to(point(130.0, 62.5), point(130.0, 25.0), point(100.0, 25.0));
//! ctx.bezier_curve_to(point(85.0, 25.0), point(75.0, 37.0), point(75.0, 40.0));
//! ctx.close_path();
//!
//! // Filling consumes the recorded sub-paths.
//! ctx.fill(&mut mesh).unwrap();
//! assert!(ctx.path().is_empty());
//!
//! // The mesh is ready to be uploaded to the GPU.
//! println!(" -- {} vertices {} indices", mesh.vertices.len(), mesh.indices.len());
//! ```
//!
//! ## What is the tessellation factor?
//!
//! Curves and arcs are approximated with sequences of line segments as they
//! are recorded. The tessellation factor is the inverse of the tolerance: the
//! maximum distance allowed between a curve and its approximation. Higher
//! factors produce more vertices.

pub extern crate quill_extra;
pub extern crate quill_tessellation;

pub use quill_extra as extra;
pub use quill_tessellation as tessellation;
pub use tessellation::geom;
pub use tessellation::path;

pub use path::math;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

mod canvas;

#[cfg(test)]
mod canvas_tests;

pub use crate::canvas::{Path2D, Style};
