use crate::commands::{Input, Scene, TessellateCmd};
use quill::extra::scenes::*;
use quill::tessellation::geometry_builder::Mesh;
use quill::tessellation::{Color, TessellationError};
use quill::{Path2D, Style};
use std::io;

#[derive(Debug)]
pub enum TessError {
    Io(io::Error),
    Tessellation(TessellationError),
}

impl std::convert::From<io::Error> for TessError {
    fn from(err: io::Error) -> Self {
        TessError::Io(err)
    }
}

impl std::convert::From<TessellationError> for TessError {
    fn from(err: TessellationError) -> Self {
        TessError::Tessellation(err)
    }
}

impl std::fmt::Display for TessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TessError::Io(err) => write!(f, "{}", err),
            TessError::Tessellation(err) => write!(f, "{}", err),
        }
    }
}

pub fn tessellate(mut cmd: TessellateCmd) -> Result<(), TessError> {
    let mut mesh = Mesh::new();

    match cmd.input {
        Input::PathData(ref data) => {
            let mut ctx = Path2D::with_style(cmd.tessellation_factor, cmd.style);
            let errors = ctx.add_path_data(data);
            if !errors.is_empty() {
                log::warn!("{} parse error(s), the affected commands were skipped", errors.len());
            }

            // Both passes consume the path.
            let recorded = ctx.path().clone();
            if cmd.fill {
                ctx.fill(&mut mesh)?;
            }
            if cmd.stroke {
                *ctx.path_mut() = recorded;
                ctx.stroke(&mut mesh)?;
            }
        }
        Input::Scene(scene) => {
            draw_scene(scene, cmd.tessellation_factor, &mut mesh)?;
        }
    }

    if cmd.count {
        writeln!(&mut *cmd.output, "vertices: {}", mesh.vertices.len())?;
        writeln!(&mut *cmd.output, "triangles: {}", mesh.indices.len() / 3)?;

        return Ok(());
    }

    write!(&mut *cmd.output, "vertices: [")?;
    let mut is_first = true;
    for vertex in &mesh.vertices {
        if !is_first {
            write!(&mut *cmd.output, ", ")?;
        }
        write!(&mut *cmd.output, "({}, {})", vertex.position[0], vertex.position[1])?;
        is_first = false;
    }
    writeln!(&mut *cmd.output, "]")?;

    write!(&mut *cmd.output, "indices: [")?;
    let mut is_first = true;
    for index in &mesh.indices {
        if !is_first {
            write!(&mut *cmd.output, ", ")?;
        }
        write!(&mut *cmd.output, "{}", index)?;
        is_first = false;
    }
    writeln!(&mut *cmd.output, "]")?;

    Ok(())
}

fn draw_scene(scene: Scene, factor: f32, mesh: &mut Mesh) -> Result<(), TessellationError> {
    let mut ctx = Path2D::new(factor);

    match scene {
        Scene::Heart => {
            ctx.style_mut().fill_color = Color::CRIMSON;
            build_heart(ctx.path_mut());
            ctx.fill(mesh)?;
        }
        Scene::Smiley => {
            ctx.set_style(
                Style::DEFAULT
                    .with_fill_color(Color::TRANSPARENT)
                    .with_stroke_color(Color::DARK_MAGENTA),
            );
            build_smiley(ctx.path_mut());
            ctx.stroke(mesh)?;
        }
        Scene::Ghost => {
            draw_ghost(&mut ctx, mesh)?;
        }
        Scene::Pacman => {
            build_maze(ctx.path_mut());
            ctx.stroke(mesh)?;

            ctx.style_mut().fill_color = Color::YELLOW;
            build_pacman(ctx.path_mut());
            ctx.fill(mesh)?;

            ctx.style_mut().fill_color = Color::GOLD;
            for pellet in pellets() {
                ctx.fill_rect(mesh, &pellet)?;
            }

            draw_ghost(&mut ctx, mesh)?;
        }
    }

    Ok(())
}

fn draw_ghost(ctx: &mut Path2D, mesh: &mut Mesh) -> Result<(), TessellationError> {
    ctx.style_mut().fill_color = Color::FIRE_BRICK;
    build_ghost(ctx.path_mut());
    ctx.fill(mesh)?;

    ctx.style_mut().fill_color = Color::WHITE;
    build_ghost_eyes(ctx.path_mut());
    ctx.fill(mesh)?;

    ctx.style_mut().fill_color = Color::BLACK;
    build_ghost_pupils(ctx.path_mut());
    ctx.fill(mesh)
}
