use crate::extra::parser::{parse_path_data, ParseError};
use crate::math::{Angle, Point, Rect};
use crate::path::{FlattenOptions, LineCap, LineJoin, Path};
use crate::tessellation::geometry_builder::{BuffersBuilder, Mesh, WithColor};
use crate::tessellation::{
    Color, FillTessellator, StrokeOptions, StrokeTessellator, TessellationResult,
};

/// The drawing state of a [`Path2D`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Style {
    /// The color of filled shapes.
    ///
    /// Default value: `Color::BLACK`.
    pub fill_color: Color,

    /// The color of stroked shapes.
    ///
    /// Default value: `Color::BLACK`.
    pub stroke_color: Color,

    /// Default value: `StrokeOptions::DEFAULT_LINE_WIDTH`.
    pub line_width: f32,

    /// Default value: `StrokeOptions::DEFAULT_LINE_JOIN`.
    pub line_join: LineJoin,

    /// Default value: `StrokeOptions::DEFAULT_LINE_CAP`.
    pub line_cap: LineCap,

    /// Default value: `StrokeOptions::DEFAULT_MITER_LIMIT`.
    pub miter_limit: f32,
}

impl Style {
    pub const DEFAULT: Self = Style {
        fill_color: Color::BLACK,
        stroke_color: Color::BLACK,
        line_width: StrokeOptions::DEFAULT_LINE_WIDTH,
        line_join: StrokeOptions::DEFAULT_LINE_JOIN,
        line_cap: StrokeOptions::DEFAULT_LINE_CAP,
        miter_limit: StrokeOptions::DEFAULT_MITER_LIMIT,
    };

    #[inline]
    pub const fn with_fill_color(mut self, color: Color) -> Self {
        self.fill_color = color;
        self
    }

    #[inline]
    pub const fn with_stroke_color(mut self, color: Color) -> Self {
        self.stroke_color = color;
        self
    }

    #[inline]
    pub const fn with_line_width(mut self, width: f32) -> Self {
        self.line_width = width;
        self
    }

    #[inline]
    pub const fn with_line_join(mut self, join: LineJoin) -> Self {
        self.line_join = join;
        self
    }

    #[inline]
    pub const fn with_line_cap(mut self, cap: LineCap) -> Self {
        self.line_cap = cap;
        self
    }

    #[inline]
    pub fn with_miter_limit(mut self, limit: f32) -> Self {
        assert!(limit >= StrokeOptions::MINIMUM_MITER_LIMIT);
        self.miter_limit = limit;
        self
    }

    /// The stroke options matching this style.
    ///
    /// The inner contour of closed sub-paths is left as a hole when the fill and
    /// stroke colors differ.
    pub fn stroke_options(&self, flattening: FlattenOptions) -> StrokeOptions {
        StrokeOptions::DEFAULT
            .with_flattening(flattening)
            .with_line_width(self.line_width)
            .with_line_join(self.line_join)
            .with_line_cap(self.line_cap)
            .with_miter_limit(self.miter_limit.max(StrokeOptions::MINIMUM_MITER_LIMIT))
            .with_inner_hole(self.fill_color != self.stroke_color)
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A drawing context similar to the HTML canvas 2D context.
///
/// Drawing commands are recorded into a [`Path`] and turned into triangles by
/// [`fill`](Path2D::fill) and [`stroke`](Path2D::stroke). Both consume the
/// recorded sub-paths: a context records a new path after each tessellation.
///
/// # Examples
///
/// ```
/// # use quill::{Path2D, Style};
/// # use quill::math::rect;
/// # use quill::tessellation::{Color, Mesh};
/// let mut mesh = Mesh::new();
/// let mut ctx = Path2D::with_style(1.0, Style::DEFAULT.with_fill_color(Color::GOLD));
///
/// ctx.fill_rect(&mut mesh, &rect(51.0, 35.0, 4.0, 4.0)).unwrap();
///
/// assert_eq!(mesh.vertices.len(), 4);
/// assert_eq!(mesh.indices.len(), 6);
/// ```
pub struct Path2D {
    path: Path,
    style: Style,
    fill_tessellator: FillTessellator,
    stroke_tessellator: StrokeTessellator,
}

impl Path2D {
    /// Creates a context with the default style.
    ///
    /// The flattening tolerance is the inverse of `tessellation_factor`.
    pub fn new(tessellation_factor: f32) -> Self {
        Self::with_style(tessellation_factor, Style::DEFAULT)
    }

    pub fn with_style(tessellation_factor: f32, style: Style) -> Self {
        Path2D {
            path: Path::with_options(FlattenOptions::from_tessellation_factor(tessellation_factor)),
            style,
            fill_tessellator: FillTessellator::new(),
            stroke_tessellator: StrokeTessellator::new(),
        }
    }

    /// Creates a context and records SVG path data into it.
    ///
    /// Parse errors are logged and the commands they affect are skipped; use
    /// [`add_path_data`](Path2D::add_path_data) to inspect them.
    pub fn from_path_data(tessellation_factor: f32, style: Style, data: &str) -> Self {
        let mut ctx = Self::with_style(tessellation_factor, style);
        ctx.add_path_data(data);

        ctx
    }

    /// Records SVG path data, returning the parse errors.
    pub fn add_path_data(&mut self, data: &str) -> Vec<ParseError> {
        parse_path_data(data, &mut self.path)
    }

    #[inline]
    pub fn style(&self) -> &Style {
        &self.style
    }

    #[inline]
    pub fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    pub fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn path_mut(&mut self) -> &mut Path {
        &mut self.path
    }

    pub fn begin_path(&mut self) {
        self.path.begin_path();
    }

    pub fn move_to(&mut self, to: Point) {
        self.path.move_to(to);
    }

    pub fn line_to(&mut self, to: Point) {
        self.path.line_to(to);
    }

    pub fn bezier_curve_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        self.path.bezier_curve_to(ctrl1, ctrl2, to);
    }

    pub fn quadratic_curve_to(&mut self, ctrl: Point, to: Point) {
        self.path.quadratic_curve_to(ctrl, to);
    }

    pub fn arc(
        &mut self,
        center: Point,
        radius: f32,
        start_angle: Angle,
        end_angle: Angle,
        anticlockwise: bool,
    ) {
        self.path
            .arc(center, radius, start_angle, end_angle, anticlockwise);
    }

    pub fn arc_to(&mut self, ctrl: Point, to: Point, radius: f32) {
        self.path.arc_to(ctrl, to, radius);
    }

    pub fn rect(&mut self, rect: &Rect) {
        self.path.rect(rect);
    }

    pub fn close_path(&mut self) {
        self.path.close_path();
    }

    /// Fills the recorded sub-paths with the fill color and clears the path.
    pub fn fill(&mut self, mesh: &mut Mesh) -> TessellationResult {
        let mut sub_paths = self.path.take_sub_paths();
        let result = self.fill_tessellator.tessellate(
            &mut sub_paths,
            &mut BuffersBuilder::new(mesh, WithColor(self.style.fill_color)),
        );

        log::debug!(
            "fill: {} vertices, {} indices",
            mesh.vertices.len(),
            mesh.indices.len()
        );

        result
    }

    /// Strokes the recorded sub-paths with the stroke color and clears the path.
    pub fn stroke(&mut self, mesh: &mut Mesh) -> TessellationResult {
        let options = self.style.stroke_options(*self.path.options());

        let mut sub_paths = self.path.take_sub_paths();
        let result = self.stroke_tessellator.tessellate(
            &mut sub_paths,
            &options,
            &mut BuffersBuilder::new(mesh, WithColor(self.style.stroke_color)),
        );

        log::debug!(
            "stroke: {} vertices, {} indices",
            mesh.vertices.len(),
            mesh.indices.len()
        );

        result
    }

    /// Adds a rectangle to the path and fills it, along with the other recorded
    /// sub-paths.
    pub fn fill_rect(&mut self, mesh: &mut Mesh, rect: &Rect) -> TessellationResult {
        self.path.rect(rect);
        self.fill(mesh)
    }
}
