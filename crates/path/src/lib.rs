#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::match_like_matches_macro)]

//! Data structures to record paths (vector graphics) and store them as
//! flattened contours.
//!
//! Paths are recorded with an API modeled after the HTML canvas 2D context.
//! Curves and arcs are flattened as they are recorded, so a [`Path`] is a list of
//! [`SubPath`] polylines ready to be filled or stroked.
//!
//! This crate is reexported in [quill](https://docs.rs/quill/).
//!
//! # Examples
//!
//! ```
//! # extern crate quill_path;
//! # fn main() {
//! use quill_path::Path;
//! use quill_path::math::point;
//!
//! let mut path = Path::new();
//! path.move_to(point(0.0, 0.0));
//! path.line_to(point(1.0, 2.0));
//! path.line_to(point(2.0, 0.0));
//! path.quadratic_curve_to(point(1.0, -1.0), point(0.0, 0.0));
//! path.close_path();
//!
//! for sub_path in path.sub_paths() {
//!     println!("{} points, closed: {}", sub_path.len(), sub_path.is_closed());
//! }
//! # }
//! ```
//!

pub use quill_geom as geom;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

mod contour;
mod path;

#[doc(inline)]
pub use crate::contour::{ContourPoint, PointFlags, SubPath};
#[doc(inline)]
pub use crate::path::Path;

pub use crate::geom::{FlattenOptions, PointKind, PointSink, DISTANCE_TOLERANCE};

pub mod math {
    //! f32 version of the euclid types used everywhere. Most other quill
    //! crates reexport them.

    pub use crate::geom::math::*;
}

/// Line cap as defined by the SVG specification.
///
/// See: <https://svgwg.org/specs/strokes/#StrokeLinecapProperty>
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum LineCap {
    /// The stroke for each sub-path does not extend beyond its two endpoints.
    /// A zero length sub-path will therefore not have any stroke.
    Butt,
    /// At the end of each sub-path, the shape representing the stroke will be
    /// extended by a rectangle with the same width as the stroke width and
    /// whose length is half of the stroke width.
    Square,
    /// At each end of each sub-path, the shape representing the stroke will be extended
    /// by a half circle with a radius equal to the stroke width.
    Round,
}

/// Line join as defined by the SVG specification.
///
/// See: <https://svgwg.org/specs/strokes/#StrokeLinejoinProperty>
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum LineJoin {
    /// A sharp corner is to be used to join path segments.
    /// Falls back to a bevel when the miter would be longer than the miter limit.
    Miter,
    /// A round corner is to be used to join path segments.
    Round,
    /// A bevelled corner is to be used to join path segments.
    /// The bevel shape is a triangle that fills the area between the two stroked
    /// segments.
    Bevel,
}
