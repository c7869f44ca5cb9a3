use crate::extra::scenes::{add_rounded_rect, build_smiley};
use crate::geom::utils::square_distance_to_segment;
use crate::geometry_builder::*;
use crate::math::*;
use crate::math_utils::{signed_area_x2, triangle_area_x2};
use crate::path::{Path, SubPath};
use crate::{
    expand_stroke, Color, LineCap, LineJoin, StrokeOptions, StrokeTessellator, TessellationError,
};

fn tessellate(
    sub_paths: &mut [SubPath],
    options: &StrokeOptions,
) -> Result<VertexBuffers<Point, u16>, TessellationError> {
    let mut buffers: VertexBuffers<Point, u16> = VertexBuffers::new();
    StrokeTessellator::new().tessellate(
        sub_paths,
        options,
        &mut BuffersBuilder::new(&mut buffers, Positions),
    )?;

    Ok(buffers)
}

fn area(buffers: &VertexBuffers<Point, u16>) -> f32 {
    buffers
        .indices
        .chunks(3)
        .map(|t| {
            let p = |i: u16| buffers.vertices[i as usize];
            let a = triangle_area_x2(p(t[0]), p(t[1]), p(t[2]));
            assert!(a >= 0.0);
            a * 0.5
        })
        .sum()
}

fn contains(points: &[Point], p: Point) -> bool {
    points.iter().any(|q| (*q - p).length() < 0.001)
}

fn square(size: f32) -> SubPath {
    let mut path = Path::new();
    path.rect(&rect(0.0, 0.0, size, size));
    path.take_sub_paths().remove(0)
}

fn polyline(points: &[Point]) -> SubPath {
    let mut path = Path::new();
    path.move_to(points[0]);
    for p in &points[1..] {
        path.line_to(*p);
    }
    path.take_sub_paths().remove(0)
}

fn max_distance_to_polyline(outline: &[Point], polyline: &[Point]) -> f32 {
    outline
        .iter()
        .map(|p| {
            polyline
                .windows(2)
                .map(|s| square_distance_to_segment(*p, s[0], s[1]))
                .fold(f32::MAX, f32::min)
                .sqrt()
        })
        .fold(0.0, f32::max)
}

#[test]
fn test_miter_square() {
    let mut sub_path = square(10.0);
    expand_stroke(&mut sub_path, &StrokeOptions::default().with_line_width(2.0));

    let (outer, inner) = sub_path.outlines();
    assert_eq!(outer.len(), 4);
    assert_eq!(inner.len(), 4);

    // The miter points are k/2 / sin(45°) away from the corners.
    for &p in &[point(-1.0, -1.0), point(11.0, -1.0), point(11.0, 11.0), point(-1.0, 11.0)] {
        assert!(contains(outer, p), "{:?} not in {:?}", p, outer);
    }
    for &p in &[point(1.0, 1.0), point(9.0, 1.0), point(9.0, 9.0), point(1.0, 9.0)] {
        assert!(contains(inner, p), "{:?} not in {:?}", p, inner);
    }

    let buffers = tessellate(&mut [square(10.0)], &StrokeOptions::default().with_line_width(2.0)).unwrap();
    assert_eq!(buffers.vertices.len(), 8);
    assert!((area(&buffers) - 80.0).abs() < 0.01);
}

#[test]
fn test_outer_encloses_inner() {
    // Same square with the opposite winding.
    let mut sub_path = polyline(&[
        point(0.0, 0.0),
        point(10.0, 0.0),
        point(10.0, 10.0),
        point(0.0, 10.0),
    ]);
    sub_path.close();

    let options = StrokeOptions::default().with_line_width(2.0);
    expand_stroke(&mut sub_path, &options);
    let (outer, inner) = sub_path.outlines();
    assert!(signed_area_x2(outer).abs() > signed_area_x2(inner).abs());
    assert!(contains(outer, point(-1.0, -1.0)));
    assert!(contains(inner, point(1.0, 1.0)));

    let mut sub_path = square(10.0);
    expand_stroke(&mut sub_path, &options);
    let (outer, inner) = sub_path.outlines();
    assert!(signed_area_x2(outer).abs() > signed_area_x2(inner).abs());
}

#[test]
fn test_no_inner_hole() {
    let options = StrokeOptions::default()
        .with_line_width(2.0)
        .with_inner_hole(false);
    let buffers = tessellate(&mut [square(10.0)], &options).unwrap();

    assert_eq!(buffers.vertices.len(), 4);
    assert!((area(&buffers) - 144.0).abs() < 0.01);
}

#[test]
fn test_closed_back_and_forth_line() {
    let mut path = Path::new();
    path.move_to(point(0.0, 0.0));
    path.line_to(point(10.0, 0.0));
    path.line_to(point(0.0, 0.0));
    path.close_path();
    assert!(path.sub_paths()[0].is_closed());

    // Once the closing point is removed the line is stroked as an open one.
    let mut sub_paths = path.take_sub_paths();
    let buffers = tessellate(&mut sub_paths, &StrokeOptions::default().with_line_width(2.0)).unwrap();

    assert!(!sub_paths[0].is_closed());
    assert!((area(&buffers) - 20.0).abs() < 0.01);
}

#[test]
fn test_butt_cap() {
    let line = [point(0.0, 0.0), point(10.0, 0.0)];
    let options = StrokeOptions::default().with_line_width(2.0);

    let mut sub_path = polyline(&line);
    expand_stroke(&mut sub_path, &options);
    let (outer, inner) = sub_path.outlines();
    assert_eq!(outer.len(), 4);
    assert!(inner.is_empty());
    for &p in &[point(0.0, 1.0), point(10.0, 1.0), point(10.0, -1.0), point(0.0, -1.0)] {
        assert!(contains(outer, p), "{:?} not in {:?}", p, outer);
    }

    let buffers = tessellate(&mut [polyline(&line)], &options).unwrap();
    assert!((area(&buffers) - 20.0).abs() < 0.01);
}

#[test]
fn test_square_cap() {
    let line = [point(0.0, 0.0), point(10.0, 0.0)];
    let options = StrokeOptions::default()
        .with_line_width(2.0)
        .with_line_cap(LineCap::Square);

    let mut sub_path = polyline(&line);
    expand_stroke(&mut sub_path, &options);
    let (outer, _) = sub_path.outlines();
    for &p in &[point(11.0, 1.0), point(11.0, -1.0), point(-1.0, -1.0), point(-1.0, 1.0)] {
        assert!(contains(outer, p), "{:?} not in {:?}", p, outer);
    }

    let buffers = tessellate(&mut [polyline(&line)], &options).unwrap();
    assert!((area(&buffers) - 24.0).abs() < 0.01);
}

#[test]
fn test_round_cap() {
    let line = [point(0.0, 0.0), point(10.0, 0.0)];
    let tolerance = 0.01;
    let options = StrokeOptions::tolerance(tolerance)
        .with_line_width(2.0)
        .with_line_cap(LineCap::Round);

    let mut sub_path = polyline(&line);
    expand_stroke(&mut sub_path, &options);
    let (outer, _) = sub_path.outlines();
    assert!(outer.len() > 8);
    assert!(contains(outer, point(11.0, 0.0)));
    assert!(contains(outer, point(-1.0, 0.0)));
    assert!(max_distance_to_polyline(outer, &line) <= 1.0 + tolerance);

    let buffers = tessellate(&mut [polyline(&line)], &options).unwrap();
    let expected = 20.0 + std::f32::consts::PI;
    assert!((area(&buffers) - expected).abs() < 0.1, "{}", area(&buffers));
}

#[test]
fn test_joins() {
    let line = [point(0.0, 0.0), point(10.0, 0.0), point(10.0, 10.0)];
    let options = StrokeOptions::default().with_line_width(4.0);

    let mut miter = polyline(&line);
    expand_stroke(&mut miter, &options);
    assert!(contains(miter.outlines().0, point(12.0, -2.0)));
    assert!(contains(miter.outlines().0, point(8.0, 2.0)));

    let mut bevel = polyline(&line);
    expand_stroke(&mut bevel, &options.with_line_join(LineJoin::Bevel));
    let (outer, _) = bevel.outlines();
    assert!(!contains(outer, point(12.0, -2.0)));
    assert!(contains(outer, point(10.0, -2.0)));
    assert!(contains(outer, point(12.0, 0.0)));
    assert!(contains(outer, point(8.0, 2.0)));

    // A right angle needs a miter limit of at least sqrt(2).
    let mut limited = polyline(&line);
    expand_stroke(&mut limited, &options.with_miter_limit(1.2));
    assert_eq!(limited.outlines().0, bevel.outlines().0);
}

#[test]
fn test_round_join() {
    let line = [point(0.0, 0.0), point(10.0, 0.0), point(10.0, 10.0)];
    let tolerance = 0.1;
    let options = StrokeOptions::tolerance(tolerance)
        .with_line_width(4.0)
        .with_line_join(LineJoin::Round);

    let mut sub_path = polyline(&line);
    expand_stroke(&mut sub_path, &options);
    let (outer, _) = sub_path.outlines();

    assert!(outer.len() > 6);
    assert!(!contains(outer, point(12.0, -2.0)));
    assert!(max_distance_to_polyline(outer, &line) <= 2.0 + tolerance);
}

#[test]
fn test_stroke_rounded_rect() {
    let mut path = Path::with_tolerance(0.1);
    add_rounded_rect(&mut path, &rect(12.0, 12.0, 150.0, 150.0), 15.0);
    let mut sub_paths = path.take_sub_paths();

    let buffers = tessellate(&mut sub_paths, &StrokeOptions::default()).unwrap();
    assert!(!buffers.indices.is_empty());

    // The stroke covers a band of width 1 around the shape.
    let (outer, inner) = sub_paths[0].outlines();
    let band = (signed_area_x2(outer).abs() - signed_area_x2(inner).abs()) * 0.5;
    assert!((area(&buffers) - band).abs() < 1.0);
}

#[test]
fn test_smiley() {
    let mut path = Path::with_tolerance(0.2);
    build_smiley(&mut path);

    let mut mesh = Mesh::new();
    StrokeTessellator::new()
        .tessellate(
            &mut path.take_sub_paths(),
            &StrokeOptions::default(),
            &mut BuffersBuilder::new(&mut mesh, WithColor(Color::DARK_MAGENTA)),
        )
        .unwrap();

    assert!(!mesh.indices.is_empty());
    assert!(mesh.vertices.iter().all(|v| v.color == [139, 0, 139, 255]));
}

#[test]
fn test_empty_strokes() {
    let mut path = Path::new();
    path.move_to(point(1.0, 1.0));
    let buffers = tessellate(&mut path.take_sub_paths(), &StrokeOptions::default()).unwrap();
    assert!(buffers.is_empty());

    let buffers = tessellate(&mut [], &StrokeOptions::default()).unwrap();
    assert!(buffers.is_empty());

    let line = [point(0.0, 0.0), point(10.0, 0.0)];
    let buffers = tessellate(
        &mut [polyline(&line)],
        &StrokeOptions::default().with_line_width(0.0),
    )
    .unwrap();
    assert!(buffers.is_empty());
}

#[test]
fn test_too_many_vertices_restores_the_mesh() {
    let mut mesh = Mesh::new();

    let mut path = Path::new();
    path.rect(&rect(0.0, 0.0, 1.0, 1.0));
    StrokeTessellator::new()
        .tessellate(
            &mut path.take_sub_paths(),
            &StrokeOptions::default(),
            &mut BuffersBuilder::new(&mut mesh, WithColor(Color::RED)),
        )
        .unwrap();

    let before = mesh.clone();

    // Each stroked square needs 8 vertices.
    for i in 0..9000 {
        let x = (i % 100) as f32 * 20.0;
        let y = (i / 100) as f32 * 20.0;
        path.rect(&rect(x, y, 10.0, 10.0));
    }

    let result = StrokeTessellator::new().tessellate(
        &mut path.take_sub_paths(),
        &StrokeOptions::default(),
        &mut BuffersBuilder::new(&mut mesh, WithColor(Color::BLUE)),
    );

    assert_eq!(
        result,
        Err(TessellationError::GeometryBuilder(
            GeometryBuilderError::TooManyVertices
        ))
    );
    assert_eq!(mesh, before);
}
