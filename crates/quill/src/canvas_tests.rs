use crate::extra::scenes::*;
use crate::math::*;
use crate::path::FlattenOptions;
use crate::tessellation::geometry_builder::{GeometryBuilderError, Mesh};
use crate::tessellation::{Color, LineCap, LineJoin, StrokeOptions, TessellationError};
use crate::{Path2D, Style};

fn area(mesh: &Mesh) -> f32 {
    mesh.indices
        .chunks(3)
        .map(|t| {
            let p = |i: u16| mesh.vertices[i as usize].position_2d();
            let (a, b, c) = (p(t[0]), p(t[1]), p(t[2]));
            (b - a).cross(c - a) * 0.5
        })
        .sum()
}

#[test]
fn test_fill_heart() {
    let mut mesh = Mesh::new();
    let mut ctx = Path2D::with_style(10.0, Style::DEFAULT.with_fill_color(Color::CRIMSON));
    build_heart(ctx.path_mut());

    ctx.fill(&mut mesh).unwrap();

    assert!(ctx.path().is_empty());
    assert!(mesh.indices.len() >= 30);
    assert!(mesh.vertices.iter().all(|v| v.color == [220, 20, 60, 255]));
}

#[test]
fn test_fill_and_stroke_consume_the_path() {
    let mut mesh = Mesh::new();
    let mut ctx = Path2D::new(1.0);

    ctx.rect(&rect(0.0, 0.0, 10.0, 10.0));
    ctx.fill(&mut mesh).unwrap();
    assert_eq!(mesh.vertices.len(), 4);

    // Nothing left to fill or stroke.
    ctx.fill(&mut mesh).unwrap();
    ctx.stroke(&mut mesh).unwrap();
    assert_eq!(mesh.vertices.len(), 4);
    assert_eq!(mesh.indices.len(), 6);
}

#[test]
fn test_stroke_inner_hole_depends_on_colors() {
    let style = Style::DEFAULT.with_line_width(2.0);

    // Same fill and stroke colors: the inside of the stroke is covered.
    let mut mesh = Mesh::new();
    let mut ctx = Path2D::with_style(1.0, style);
    ctx.rect(&rect(0.0, 0.0, 10.0, 10.0));
    ctx.stroke(&mut mesh).unwrap();
    assert_eq!(mesh.vertices.len(), 4);
    assert!((area(&mesh) - 144.0).abs() < 0.01);

    let mut mesh = Mesh::new();
    let mut ctx = Path2D::with_style(
        1.0,
        style
            .with_fill_color(Color::TRANSPARENT)
            .with_stroke_color(Color::DARK_MAGENTA),
    );
    ctx.rect(&rect(0.0, 0.0, 10.0, 10.0));
    ctx.stroke(&mut mesh).unwrap();
    assert_eq!(mesh.vertices.len(), 8);
    assert!((area(&mesh) - 80.0).abs() < 0.01);
    assert!(mesh.vertices.iter().all(|v| v.color == [139, 0, 139, 255]));
}

#[test]
fn test_style_to_stroke_options() {
    let style = Style::DEFAULT
        .with_line_width(3.0)
        .with_line_join(LineJoin::Round)
        .with_line_cap(LineCap::Square)
        .with_miter_limit(4.0);
    let options = style.stroke_options(FlattenOptions::tolerance(0.5));

    assert_eq!(options.line_width, 3.0);
    assert_eq!(options.line_join, LineJoin::Round);
    assert_eq!(options.line_cap, LineCap::Square);
    assert_eq!(options.miter_limit, 4.0);
    assert_eq!(options.flattening.tolerance, 0.5);
    assert!(!options.inner_hole);

    let mut bad_limit = Style::DEFAULT;
    bad_limit.miter_limit = 0.0;
    assert_eq!(
        bad_limit.stroke_options(FlattenOptions::DEFAULT).miter_limit,
        StrokeOptions::MINIMUM_MITER_LIMIT
    );
}

#[test]
#[should_panic]
fn test_style_miter_limit_too_small() {
    let _ = Style::DEFAULT.with_miter_limit(0.5);
}

#[test]
fn test_fill_rect() {
    let mut mesh = Mesh::new();
    let mut ctx = Path2D::with_style(1.0, Style::DEFAULT.with_fill_color(Color::GOLD));

    for pellet in pellets() {
        ctx.fill_rect(&mut mesh, &pellet).unwrap();
    }

    assert_eq!(mesh.vertices.len(), 22 * 4);
    assert_eq!(mesh.indices.len(), 22 * 6);
    assert!((area(&mesh) - 22.0 * 16.0).abs() < 0.01);
    assert!(mesh.vertices.iter().all(|v| v.color == [255, 215, 0, 255]));
}

#[test]
fn test_path_data() {
    let mut mesh = Mesh::new();
    let mut ctx = Path2D::from_path_data(1.0, Style::DEFAULT, "M0,0 L10,0 L10,10 L0,10 Z");
    ctx.fill(&mut mesh).unwrap();

    assert_eq!(mesh.vertices.len(), 4);
    assert_eq!(mesh.indices.len(), 6);
    assert!((area(&mesh) - 100.0).abs() < 0.01);

    // The unsupported arc command is reported and skipped.
    let errors = ctx.add_path_data("M0,0 L10,0 A 5 5 0 0 1 10 10 L10,10 L0,10 Z");
    assert_eq!(errors.len(), 1);

    let mut mesh = Mesh::new();
    ctx.fill(&mut mesh).unwrap();
    assert!((area(&mesh) - 100.0).abs() < 0.01);
}

#[test]
fn test_pacman_game() {
    let mut mesh = Mesh::new();
    let mut ctx = Path2D::new(4.0);

    build_maze(ctx.path_mut());
    ctx.stroke(&mut mesh).unwrap();

    ctx.style_mut().fill_color = Color::YELLOW;
    build_pacman(ctx.path_mut());
    ctx.fill(&mut mesh).unwrap();

    ctx.style_mut().fill_color = Color::GOLD;
    for pellet in pellets() {
        ctx.fill_rect(&mut mesh, &pellet).unwrap();
    }

    ctx.style_mut().fill_color = Color::FIRE_BRICK;
    build_ghost(ctx.path_mut());
    ctx.fill(&mut mesh).unwrap();

    ctx.style_mut().fill_color = Color::WHITE;
    build_ghost_eyes(ctx.path_mut());
    ctx.fill(&mut mesh).unwrap();

    ctx.style_mut().fill_color = Color::BLACK;
    build_ghost_pupils(ctx.path_mut());
    ctx.fill(&mut mesh).unwrap();

    assert!(mesh.vertices.len() < u16::MAX as usize);
    for t in mesh.indices.chunks(3) {
        let p = |i: u16| mesh.vertices[i as usize].position_2d();
        assert!((p(t[1]) - p(t[0])).cross(p(t[2]) - p(t[0])) >= 0.0);
    }
    for color in &[Color::YELLOW, Color::GOLD, Color::FIRE_BRICK, Color::WHITE] {
        assert!(mesh.vertices.iter().any(|v| v.color == color.to_array()));
    }
}

#[test]
fn test_mesh_is_restored_on_overflow() {
    let mut mesh = Mesh::new();
    let mut ctx = Path2D::new(1.0);

    ctx.rect(&rect(0.0, 0.0, 1.0, 1.0));
    ctx.fill(&mut mesh).unwrap();
    let before = mesh.clone();

    for i in 0..17000 {
        ctx.rect(&rect(i as f32 * 2.0, 0.0, 1.0, 1.0));
    }

    assert_eq!(
        ctx.fill(&mut mesh),
        Err(TessellationError::GeometryBuilder(
            GeometryBuilderError::TooManyVertices
        ))
    );
    assert_eq!(mesh, before);
    assert!(ctx.path().is_empty());
}
