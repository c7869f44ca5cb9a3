use crate::extra::parser::parse_path_data;
use crate::extra::scenes::{build_ghost, build_heart, HEART_PATH_DATA};
use crate::geometry_builder::*;
use crate::math::*;
use crate::math_utils::triangle_area_x2;
use crate::path::{Path, SubPath};
use crate::{Color, FillTessellator, TessellationError, VertexId};

fn tessellate(sub_paths: &mut [SubPath]) -> Result<VertexBuffers<Point, u16>, TessellationError> {
    let mut buffers: VertexBuffers<Point, u16> = VertexBuffers::new();
    FillTessellator::new().tessellate(sub_paths, &mut BuffersBuilder::new(&mut buffers, Positions))?;

    Ok(buffers)
}

fn tessellate_path_data(data: &str) -> VertexBuffers<Point, u16> {
    let mut path = Path::new();
    let errors = parse_path_data(data, &mut path);
    assert!(errors.is_empty(), "{:?}", errors);

    tessellate(&mut path.take_sub_paths()).unwrap()
}

fn area(buffers: &VertexBuffers<Point, u16>) -> f32 {
    buffers
        .indices
        .chunks(3)
        .map(|t| {
            let p = |i: u16| buffers.vertices[i as usize];
            triangle_area_x2(p(t[0]), p(t[1]), p(t[2])) * 0.5
        })
        .sum()
}

fn check_orientation(buffers: &VertexBuffers<Point, u16>) {
    for t in buffers.indices.chunks(3) {
        let p = |i: u16| buffers.vertices[i as usize];
        assert!(triangle_area_x2(p(t[0]), p(t[1]), p(t[2])) >= 0.0);
    }
}

#[test]
fn test_simple_triangle() {
    let mut path = Path::new();
    path.move_to(point(0.0, 0.0));
    path.line_to(point(1.0, 1.0));
    path.line_to(point(0.0, 1.0));
    path.close_path();

    let buffers = tessellate(&mut path.take_sub_paths()).unwrap();

    assert_eq!(buffers.vertices.len(), 3);
    assert_eq!(buffers.indices.len(), 3);
    check_orientation(&buffers);
}

#[test]
fn test_rect() {
    let mut path = Path::new();
    path.rect(&rect(10.0, 20.0, 30.0, 40.0));

    let buffers = tessellate(&mut path.take_sub_paths()).unwrap();

    assert_eq!(buffers.vertices.len(), 4);
    assert_eq!(buffers.indices.len(), 6);
    assert!((area(&buffers) - 1200.0).abs() < 0.01);
    check_orientation(&buffers);
}

#[test]
fn test_path_data_square() {
    let buffers = tessellate_path_data("M0,0 L10,0 L10,10 L0,10 Z");

    assert_eq!(buffers.vertices.len(), 4);
    assert_eq!(buffers.indices.len(), 6);
    assert!((area(&buffers) - 100.0).abs() < 0.01);
}

#[test]
fn test_closing_point_is_removed() {
    // The last point is the same as the first one but the sub-path is not closed.
    let buffers = tessellate_path_data("M0,0 L10,0 L10,10 L0,10 L0,0");

    assert_eq!(buffers.vertices.len(), 4);
    assert_eq!(buffers.indices.len(), 6);
}

#[test]
fn test_relative_and_absolute() {
    let pairs = [
        (
            "M 10 10 L 20 10 C 25 10 30 15 30 20 L 30 30 Q 20 35 10 30 Z",
            "m 10 10 l 10 0 c 5 0 10 5 10 10 l 0 10 q -10 5 -20 0 z",
        ),
        (
            "M 10 10 H 30 C 35 10 40 15 40 20 S 45 30 40 40 V 50 L 10 50 Z",
            "m 10 10 h 20 c 5 0 10 5 10 10 s 5 10 0 20 v 10 l -30 0 z",
        ),
    ];

    for &(absolute, relative) in &pairs {
        let absolute = tessellate_path_data(absolute);
        let relative = tessellate_path_data(relative);

        assert!(!absolute.indices.is_empty());
        assert_eq!(absolute.indices, relative.indices);
        assert_eq!(absolute.vertices.len(), relative.vertices.len());
        for (a, b) in absolute.vertices.iter().zip(relative.vertices.iter()) {
            assert!((*a - *b).square_length() < 0.0001, "{:?} != {:?}", a, b);
        }
    }
}

#[test]
fn test_concave() {
    // An arrow head.
    let buffers = tessellate_path_data("M0,0 L10,5 L0,10 L3,5 Z");

    assert_eq!(buffers.indices.len(), 6);
    assert!((area(&buffers) - 35.0).abs() < 0.01);
    check_orientation(&buffers);
}

#[test]
fn test_each_sub_path_is_filled_separately() {
    let buffers = tessellate_path_data("M0,0 L10,0 L10,10 L0,10 Z M2,2 L8,2 L8,8 L2,8 Z");

    assert_eq!(buffers.vertices.len(), 8);
    assert_eq!(buffers.indices.len(), 12);
    assert!((area(&buffers) - 136.0).abs() < 0.01);
}

#[test]
fn test_degenerate_sub_paths() {
    let mut path = Path::new();
    path.move_to(point(5.0, 5.0));
    let buffers = tessellate(&mut path.take_sub_paths()).unwrap();
    assert!(buffers.is_empty());

    let mut path = Path::new();
    path.move_to(point(0.0, 0.0));
    path.line_to(point(1.0, 0.0));
    path.move_to(point(0.0, 0.0));
    path.line_to(point(1.0, 0.0));
    path.line_to(point(1.0, 1.0));
    let buffers = tessellate(&mut path.take_sub_paths()).unwrap();
    assert_eq!(buffers.vertices.len(), 3);
    assert_eq!(buffers.indices.len(), 3);

    let buffers = tessellate(&mut []).unwrap();
    assert!(buffers.is_empty());
}

#[test]
fn test_heart() {
    let mut path = Path::with_tolerance(0.1);
    build_heart(&mut path);

    let buffers = tessellate(&mut path.take_sub_paths()).unwrap();

    assert!(buffers.indices.len() >= 3 * 10);
    assert!(buffers.indices.len() <= (buffers.vertices.len() - 2) * 3);
    check_orientation(&buffers);

    let mut path = Path::with_tolerance(0.1);
    assert!(parse_path_data(HEART_PATH_DATA, &mut path).is_empty());
    let from_path_data = tessellate(&mut path.take_sub_paths()).unwrap();

    assert_eq!(from_path_data.indices.len(), buffers.indices.len());
    assert!((area(&from_path_data) - area(&buffers)).abs() < 0.1);
}

#[test]
fn test_ghost() {
    let mut path = Path::with_tolerance(0.1);
    build_ghost(&mut path);
    let buffers = tessellate(&mut path.take_sub_paths()).unwrap();
    check_orientation(&buffers);
    assert!(!buffers.indices.is_empty());
}

#[test]
fn test_colors() {
    let mut mesh = Mesh::new();
    let mut path = Path::new();
    path.rect(&rect(0.0, 0.0, 1.0, 1.0));
    FillTessellator::new()
        .tessellate(
            &mut path.take_sub_paths(),
            &mut BuffersBuilder::new(&mut mesh, WithColor(Color::CRIMSON)),
        )
        .unwrap();

    for v in &mesh.vertices {
        assert_eq!(v.color, [220, 20, 60, 255]);
        assert_eq!(v.position[2], 0.0);
    }
}

#[test]
fn test_too_many_vertices() {
    // This test checks that the tessellator returns the proper error when
    // the geometry builder run out of vertex ids.

    struct Builder {
        max_vertices: u32,
    }
    impl GeometryBuilder for Builder {
        fn add_vertex(&mut self, _: Point) -> Result<VertexId, GeometryBuilderError> {
            if self.max_vertices == 0 {
                return Err(GeometryBuilderError::TooManyVertices);
            }
            self.max_vertices -= 1;
            Ok(VertexId(self.max_vertices))
        }
        fn add_triangle(&mut self, _a: VertexId, _b: VertexId, _c: VertexId) {}
    }

    let mut path = Path::with_tolerance(0.05);
    build_heart(&mut path);
    let mut sub_paths = path.take_sub_paths();

    let mut tess = FillTessellator::new();

    assert_eq!(
        tess.tessellate(&mut sub_paths, &mut Builder { max_vertices: 0 }),
        Err(TessellationError::GeometryBuilder(
            GeometryBuilderError::TooManyVertices
        )),
    );
    assert_eq!(
        tess.tessellate(&mut sub_paths, &mut Builder { max_vertices: 10 }),
        Err(TessellationError::GeometryBuilder(
            GeometryBuilderError::TooManyVertices
        )),
    );
}

#[test]
fn test_too_many_vertices_restores_the_mesh() {
    let mut mesh = Mesh::new();

    let mut path = Path::new();
    path.rect(&rect(0.0, 0.0, 1.0, 1.0));
    FillTessellator::new()
        .tessellate(
            &mut path.take_sub_paths(),
            &mut BuffersBuilder::new(&mut mesh, WithColor(Color::RED)),
        )
        .unwrap();

    let before = mesh.clone();

    // 17000 squares need 68000 vertices.
    for i in 0..17000 {
        let x = (i % 100) as f32 * 2.0;
        let y = (i / 100) as f32 * 2.0;
        path.rect(&rect(x, y, 1.0, 1.0));
    }

    let result = FillTessellator::new().tessellate(
        &mut path.take_sub_paths(),
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

#[test]
fn test_polygon() {
    let mut buffers: VertexBuffers<Point, u32> = VertexBuffers::new();
    let polygon = [
        point(0.0, 0.0),
        point(4.0, 0.0),
        point(4.0, 4.0),
        point(2.0, 1.0),
        point(0.0, 4.0),
    ];

    FillTessellator::new()
        .tessellate_polygon(&polygon, &mut BuffersBuilder::new(&mut buffers, Positions))
        .unwrap();

    assert_eq!(buffers.vertices.len(), 5);
    assert_eq!(buffers.indices.len(), 9);
}
