use crate::error::{GeometryBuilderError, TessellationResult};
use crate::geometry_builder::GeometryBuilder;
use crate::math::Point;
use crate::path::SubPath;
use crate::triangulation::{fill_polygon, EarcutTriangulator, Triangulation, Triangulator};

/// A Context object that can tessellate fill operations for sub-paths.
///
/// Each sub-path is filled independently as a simple polygon: overlapping
/// sub-paths are not merged and don't punch holes in each other.
///
/// Before being filled, a sub-path that ends where it starts loses its duplicate
/// end point and is considered closed. Sub-paths with less than three points
/// don't produce any geometry.
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
///     let mut tessellator = FillTessellator::new();
///
///     // Compute the tessellation.
///     let result = tessellator.tessellate(
///         &mut path.take_sub_paths(),
///         &mut BuffersBuilder::new(&mut buffers, Positions),
///     );
///     assert!(result.is_ok());
/// }
///
/// assert_eq!(buffers.vertices.len(), 4);
/// assert_eq!(buffers.indices.len(), 6);
/// # }
/// ```
pub struct FillTessellator<T = EarcutTriangulator> {
    triangulator: T,
    triangulation: Triangulation,
    outline: Vec<Point>,
}

impl Default for FillTessellator {
    fn default() -> Self {
        Self::new()
    }
}

impl FillTessellator {
    /// Constructor.
    pub fn new() -> Self {
        FillTessellator::with_triangulator(EarcutTriangulator::new())
    }
}

impl<T: Triangulator> FillTessellator<T> {
    /// Creates a fill tessellator using a specific triangulation algorithm.
    pub fn with_triangulator(triangulator: T) -> Self {
        FillTessellator {
            triangulator,
            triangulation: Triangulation::new(),
            outline: Vec::new(),
        }
    }

    /// Compute the tessellation of the sub-paths.
    ///
    /// The sub-paths are normalized in place (see [`SubPath::remove_closing_point`]).
    /// If the output runs out of vertex indices, everything produced during this
    /// call is discarded with `GeometryBuilder::abort_geometry`.
    pub fn tessellate(
        &mut self,
        sub_paths: &mut [SubPath],
        output: &mut dyn GeometryBuilder,
    ) -> TessellationResult {
        output.begin_geometry();

        match self.tessellate_impl(sub_paths, output) {
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

    /// Fills a single polygon.
    pub fn tessellate_polygon(
        &mut self,
        polygon: &[Point],
        output: &mut dyn GeometryBuilder,
    ) -> TessellationResult {
        output.begin_geometry();

        let result = fill_polygon(
            &mut self.triangulator,
            &mut self.triangulation,
            polygon,
            &[],
            output,
        );

        match result {
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
        output: &mut dyn GeometryBuilder,
    ) -> Result<(), GeometryBuilderError> {
        for sub_path in sub_paths.iter_mut() {
            sub_path.remove_closing_point();
            if sub_path.len() < 3 {
                log::trace!("Skipping the fill of a sub-path of {} points", sub_path.len());
                continue;
            }

            self.outline.clear();
            self.outline.extend(sub_path.positions());

            fill_polygon(
                &mut self.triangulator,
                &mut self.triangulation,
                &self.outline,
                &[],
                output,
            )?;
        }

        Ok(())
    }
}
