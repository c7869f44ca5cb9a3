#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::float_cmp)]

//! Simple 2D geometric primitives on top of euclid.
//!
//! This crate is reexported in [quill](https://docs.rs/quill/).
//!
//! # Overview.
//!
//! This crate implements the maths to turn curves into polylines:
//!
//! - quadratic and cubic bézier curves,
//! - circular arcs,
//! - fillets (rounded corners between two line segments).
//!
//! # Flattening
//!
//! Flattening is the action of approximating a curve with a succession of line segments.
//!
//! The tolerance threshold taken as input by the flattening algorithms corresponds
//! to the maximum distance between the curve and its linear approximation.
//! The smaller the tolerance is, the more precise the approximation and the more segments
//! are generated. This value is typically chosen in function of the zoom level.
//!
//! Flattened points are not returned but written into a [`PointSink`], which lets the
//! consumer decide how to store them and drop near-duplicates.

// Reexport dependencies.
pub use euclid;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod arc;
pub mod cubic_bezier;
pub mod fillet;
mod flatten_cubic;
pub mod quadratic_bezier;
pub mod utils;

#[doc(inline)]
pub use crate::arc::Arc;
#[doc(inline)]
pub use crate::cubic_bezier::CubicBezierSegment;
#[doc(inline)]
pub use crate::fillet::Fillet;
#[doc(inline)]
pub use crate::quadratic_bezier::QuadraticBezierSegment;

pub mod math {
    //! f32 version of the euclid types used everywhere. The other quill
    //! crates reexport them.

    /// Alias for ```euclid::default::Point2D<f32>```.
    pub type Point = euclid::default::Point2D<f32>;

    /// Alias for ```euclid::default::Vector2D<f32>```.
    pub type Vector = euclid::default::Vector2D<f32>;

    /// Alias for ```euclid::default::Size2D<f32>```.
    pub type Size = euclid::default::Size2D<f32>;

    /// Alias for ```euclid::default::Rect<f32>```
    pub type Rect = euclid::default::Rect<f32>;

    /// An angle in radians (f32).
    pub type Angle = euclid::Angle<f32>;

    /// Shorthand for `Rect::new(Point::new(x, y), Size::new(w, h))`.
    #[inline]
    pub fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect {
            origin: point(x, y),
            size: size(w, h),
        }
    }

    /// Shorthand for `Vector::new(x, y)`.
    #[inline]
    pub fn vector(x: f32, y: f32) -> Vector {
        Vector::new(x, y)
    }

    /// Shorthand for `Point::new(x, y)`.
    #[inline]
    pub fn point(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }

    /// Shorthand for `Size::new(x, y)`.
    #[inline]
    pub fn size(w: f32, h: f32) -> Size {
        Size::new(w, h)
    }
}

use crate::math::Point;

/// Two points closer than this on both axes are considered to be the same point.
pub const DISTANCE_TOLERANCE: f32 = 0.01;

/// Whether a point was explicitly provided by a drawing command or inserted
/// while approximating a curve.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum PointKind {
    /// The end of a drawing command. Joins are only applied at corners.
    Corner,
    /// A point in the middle of a flattened curve.
    Flattened,
}

/// Receives the points produced by the flattening algorithms.
pub trait PointSink {
    fn add_point(&mut self, at: Point, kind: PointKind);
}

/// Collects positions, dropping points that are within [`DISTANCE_TOLERANCE`]
/// of the previous one.
impl PointSink for Vec<Point> {
    fn add_point(&mut self, at: Point, _kind: PointKind) {
        if let Some(last) = self.last() {
            if utils::points_are_close(*last, at) {
                return;
            }
        }
        self.push(at);
    }
}

/// Parameters of the curve flattening and fillet algorithms.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct FlattenOptions {
    /// Maximum allowed distance between a curve and its linear approximation.
    ///
    /// Default value: `FlattenOptions::DEFAULT_TOLERANCE`.
    pub tolerance: f32,

    /// Fillets which would be tangent to their segments further than this
    /// distance away from the corner are replaced with the corner itself.
    ///
    /// Default value: `FlattenOptions::DEFAULT_MAX_TANGENT_DISTANCE`.
    pub max_tangent_distance: f32,
}

impl FlattenOptions {
    pub const DEFAULT_TOLERANCE: f32 = 0.25;
    pub const MIN_TOLERANCE: f32 = 0.0001;
    pub const MAX_TOLERANCE: f32 = 10000.0;
    pub const DEFAULT_MAX_TANGENT_DISTANCE: f32 = 10000.0;

    pub const DEFAULT: Self = FlattenOptions {
        tolerance: Self::DEFAULT_TOLERANCE,
        max_tangent_distance: Self::DEFAULT_MAX_TANGENT_DISTANCE,
    };

    #[inline]
    pub fn tolerance(tolerance: f32) -> Self {
        Self::DEFAULT.with_tolerance(tolerance)
    }

    /// The tolerance is the inverse of the tessellation factor: the higher the
    /// factor, the finer the approximation.
    pub fn from_tessellation_factor(factor: f32) -> Self {
        Self::tolerance(1.0 / factor)
    }

    /// Sets the tolerance, clamped to `[MIN_TOLERANCE, MAX_TOLERANCE]`.
    ///
    /// A NaN tolerance falls back to `DEFAULT_TOLERANCE`.
    #[inline]
    pub fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = if tolerance.is_nan() {
            log::warn!("NaN flattening tolerance, using {}", Self::DEFAULT_TOLERANCE);
            Self::DEFAULT_TOLERANCE
        } else if tolerance < Self::MIN_TOLERANCE || tolerance > Self::MAX_TOLERANCE {
            let clamped = tolerance.max(Self::MIN_TOLERANCE).min(Self::MAX_TOLERANCE);
            log::warn!("Flattening tolerance {} out of range, using {}", tolerance, clamped);
            clamped
        } else {
            tolerance
        };
        self
    }

    #[inline]
    pub const fn with_max_tangent_distance(mut self, distance: f32) -> Self {
        self.max_tangent_distance = distance;
        self
    }
}

impl Default for FlattenOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[test]
fn dedup_near_points() {
    use crate::math::point;

    let mut points: Vec<Point> = Vec::new();
    points.add_point(point(0.0, 0.0), PointKind::Corner);
    points.add_point(point(0.005, -0.005), PointKind::Flattened);
    points.add_point(point(0.005, 1.0), PointKind::Corner);
    points.add_point(point(0.0, 1.0), PointKind::Corner);

    assert_eq!(points, vec![point(0.0, 0.0), point(0.005, 1.0)]);
}

#[test]
fn tessellation_factor() {
    assert_eq!(FlattenOptions::from_tessellation_factor(4.0).tolerance, 0.25);
    assert_eq!(
        FlattenOptions::from_tessellation_factor(0.0).tolerance,
        FlattenOptions::MAX_TOLERANCE
    );
    assert_eq!(
        FlattenOptions::tolerance(f32::NAN).tolerance,
        FlattenOptions::DEFAULT_TOLERANCE
    );
    assert_eq!(
        FlattenOptions::tolerance(-1.0).tolerance,
        FlattenOptions::MIN_TOLERANCE
    );
}
