use quill::Style;
use std::io;

/// Where the geometry comes from.
pub enum Input {
    PathData(String),
    Scene(Scene),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Scene {
    Heart,
    Smiley,
    Ghost,
    Pacman,
}

impl Scene {
    pub const NAMES: &'static [&'static str] = &["heart", "smiley", "ghost", "pacman"];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "heart" => Some(Scene::Heart),
            "smiley" => Some(Scene::Smiley),
            "ghost" => Some(Scene::Ghost),
            "pacman" => Some(Scene::Pacman),
            _ => None,
        }
    }
}

pub struct TessellateCmd {
    pub input: Input,
    pub output: Box<dyn io::Write>,
    pub fill: bool,
    pub stroke: bool,
    pub style: Style,
    pub tessellation_factor: f32,
    pub count: bool,
}

pub struct FlattenCmd {
    pub input: String,
    pub output: Box<dyn io::Write>,
    pub tessellation_factor: f32,
    pub count: bool,
}
