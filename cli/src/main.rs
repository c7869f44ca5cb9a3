extern crate clap;
extern crate quill;

mod commands;
mod flatten;
mod tessellate;

use clap::{App, Arg, ArgMatches, SubCommand};
use commands::*;
use quill::path::{LineCap, LineJoin};
use quill::tessellation::{Color, StrokeOptions};
use quill::Style;

use std::fs::File;
use std::io::prelude::*;
use std::io::{self, stdout};
use std::process;

const DEFAULT_TESSELLATION_FACTOR: f32 = 100.0;

#[derive(Debug)]
pub enum CliError {
    Io(io::Error),
    InvalidArgument(String),
    Tessellate(tessellate::TessError),
}

impl std::convert::From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Io(err)
    }
}

impl std::convert::From<tessellate::TessError> for CliError {
    fn from(err: tessellate::TessError) -> Self {
        CliError::Tessellate(err)
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Io(err) => write!(f, "{}", err),
            CliError::InvalidArgument(msg) => write!(f, "{}", msg),
            CliError::Tessellate(err) => write!(f, "{}", err),
        }
    }
}

fn main() {
    env_logger::init();

    let factor_arg = Arg::with_name("FACTOR")
        .short("t")
        .long("tessellation-factor")
        .help("Sets the tessellation factor, the inverse of the flattening tolerance (100 by default)")
        .value_name("FACTOR")
        .takes_value(true);
    let count_arg = Arg::with_name("COUNT")
        .short("c")
        .long("count")
        .help("Prints the number of vertices instead of the geometry");

    let matches = App::new("quill command-line interface")
        .version("0.1")
        .author("The quill developers")
        .about("Path tessellator")
        .subcommand(SubCommand::with_name("tessellate")
            .about("Tessellates a path")
            .arg(Arg::with_name("FILL")
                .short("f")
                .long("fill")
                .help("Fills the path")
            )
            .arg(Arg::with_name("STROKE")
                .short("s")
                .long("stroke")
                .help("Strokes the path")
            )
            .arg(factor_arg.clone())
            .arg(Arg::with_name("LINE_WIDTH")
                .short("w")
                .long("line-width")
                .help("The stroke width (1 by default)")
                .value_name("LINE_WIDTH")
                .takes_value(true)
            )
            .arg(Arg::with_name("LINE_JOIN")
                .long("line-join")
                .help("The stroke line join")
                .value_name("LINE_JOIN")
                .possible_values(&["miter", "round", "bevel"])
                .takes_value(true)
            )
            .arg(Arg::with_name("LINE_CAP")
                .long("line-cap")
                .help("The stroke line cap")
                .value_name("LINE_CAP")
                .possible_values(&["butt", "square", "round"])
                .takes_value(true)
            )
            .arg(Arg::with_name("MITER_LIMIT")
                .long("miter-limit")
                .help("The stroke miter limit (10 by default)")
                .value_name("MITER_LIMIT")
                .takes_value(true)
            )
            .arg(Arg::with_name("FILL_COLOR")
                .long("fill-color")
                .help("The fill color, as #rrggbb (black by default)")
                .value_name("COLOR")
                .takes_value(true)
            )
            .arg(Arg::with_name("STROKE_COLOR")
                .long("stroke-color")
                .help("The stroke color, as #rrggbb (black by default)")
                .value_name("COLOR")
                .takes_value(true)
            )
            .arg(Arg::with_name("SCENE")
                .long("scene")
                .help("Tessellates a built-in drawing instead of the input path")
                .value_name("SCENE")
                .possible_values(Scene::NAMES)
                .takes_value(true)
            )
            .arg(count_arg.clone())
        )
        .subcommand(SubCommand::with_name("flatten")
            .about("Flattens a path")
            .arg(factor_arg)
            .arg(count_arg)
        )
        .arg(Arg::with_name("PATH")
            .value_name("PATH")
            .help("An SVG path")
            .takes_value(true)
            .required(false)
        )
        .arg(Arg::with_name("INPUT")
            .help("Sets the input file to use")
            .short("i")
            .long("input")
            .value_name("FILE")
            .takes_value(true)
            .required(false)
        )
        .arg(Arg::with_name("OUTPUT")
            .help("Sets the output file to use")
            .value_name("FILE")
            .short("o")
            .long("output")
            .takes_value(true)
            .required(false)
        )
        .get_matches();

    if let Err(err) = run(&matches) {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<(), CliError> {
    let mut input_buffer = matches.value_of("PATH").unwrap_or("").to_string();

    if let Some(input_file) = matches.value_of("INPUT") {
        let mut file = File::open(input_file)?;
        file.read_to_string(&mut input_buffer)?;
    }

    let output: Box<dyn Write> = match matches.value_of("OUTPUT") {
        Some(output_file) => Box::new(File::create(output_file)?),
        None => Box::new(stdout()),
    };

    if let Some(tess_matches) = matches.subcommand_matches("tessellate") {
        let fill_cmd = tess_matches.is_present("FILL");
        let stroke_cmd = tess_matches.is_present("STROKE");
        let input = match tess_matches.value_of("SCENE").and_then(Scene::from_name) {
            Some(scene) => Input::Scene(scene),
            None => Input::PathData(input_buffer),
        };

        let cmd = TessellateCmd {
            input,
            output,
            fill: fill_cmd || !stroke_cmd,
            stroke: stroke_cmd,
            style: get_style(tess_matches)?,
            tessellation_factor: get_factor(tess_matches)?,
            count: tess_matches.is_present("COUNT"),
        };

        tessellate::tessellate(cmd)?;
    } else if let Some(flatten_matches) = matches.subcommand_matches("flatten") {
        let cmd = FlattenCmd {
            input: input_buffer,
            output,
            tessellation_factor: get_factor(flatten_matches)?,
            count: flatten_matches.is_present("COUNT"),
        };

        flatten::flatten(cmd)?;
    }

    Ok(())
}

fn get_number(matches: &ArgMatches, name: &str, default: f32) -> Result<f32, CliError> {
    match matches.value_of(name) {
        Some(value) => value
            .parse()
            .map_err(|_| CliError::InvalidArgument(format!("Invalid {} value: {:?}", name, value))),
        None => Ok(default),
    }
}

fn get_color(matches: &ArgMatches, name: &str, default: Color) -> Result<Color, CliError> {
    match matches.value_of(name) {
        Some(value) => Color::from_hex(value)
            .ok_or_else(|| CliError::InvalidArgument(format!("Invalid color: {:?}", value))),
        None => Ok(default),
    }
}

fn get_factor(matches: &ArgMatches) -> Result<f32, CliError> {
    let factor = get_number(matches, "FACTOR", DEFAULT_TESSELLATION_FACTOR)?;
    if !(factor > 0.0) {
        return Err(CliError::InvalidArgument(format!(
            "The tessellation factor must be positive, got {}",
            factor
        )));
    }

    Ok(factor)
}

fn get_style(matches: &ArgMatches) -> Result<Style, CliError> {
    let line_join = match matches.value_of("LINE_JOIN") {
        Some("round") => LineJoin::Round,
        Some("bevel") => LineJoin::Bevel,
        _ => StrokeOptions::DEFAULT_LINE_JOIN,
    };
    let line_cap = match matches.value_of("LINE_CAP") {
        Some("square") => LineCap::Square,
        Some("round") => LineCap::Round,
        _ => StrokeOptions::DEFAULT_LINE_CAP,
    };

    let miter_limit = get_number(matches, "MITER_LIMIT", StrokeOptions::DEFAULT_MITER_LIMIT)?;
    if !(miter_limit >= StrokeOptions::MINIMUM_MITER_LIMIT) {
        return Err(CliError::InvalidArgument(format!(
            "The miter limit must be at least {}, got {}",
            StrokeOptions::MINIMUM_MITER_LIMIT,
            miter_limit
        )));
    }

    // The inside of closed strokes is left empty when the stroke is drawn on its own.
    let default_fill = if matches.is_present("FILL") {
        Color::BLACK
    } else {
        Color::TRANSPARENT
    };

    Ok(Style::DEFAULT
        .with_fill_color(get_color(matches, "FILL_COLOR", default_fill)?)
        .with_stroke_color(get_color(matches, "STROKE_COLOR", Color::BLACK)?)
        .with_line_width(get_number(matches, "LINE_WIDTH", StrokeOptions::DEFAULT_LINE_WIDTH)?)
        .with_line_join(line_join)
        .with_line_cap(line_cap)
        .with_miter_limit(miter_limit))
}

#[test]
fn tessellate_arguments() {
    let app = App::new("quill")
        .arg(Arg::with_name("FACTOR").short("t").takes_value(true))
        .arg(Arg::with_name("LINE_JOIN").long("line-join").takes_value(true))
        .arg(Arg::with_name("FILL").long("fill"));

    let matches = app
        .clone()
        .get_matches_from(vec!["quill", "-t", "4", "--line-join", "round", "--fill"]);
    assert_eq!(get_factor(&matches).unwrap(), 4.0);
    let style = get_style(&matches).unwrap();
    assert_eq!(style.line_join, LineJoin::Round);
    assert_eq!(style.fill_color, Color::BLACK);

    let matches = app.get_matches_from(vec!["quill", "-t", "0"]);
    assert!(get_factor(&matches).is_err());
    assert_eq!(get_style(&matches).unwrap().fill_color, Color::TRANSPARENT);
}
