use crate::path::math::{point, Point};
use crate::path::Path;

extern crate thiserror;

use self::thiserror::Error;

#[derive(Error, Clone, Debug, PartialEq)]
pub enum ParseError {
    #[error("Line {line} Column {column}: Expected number, got {src:?}.")]
    Number { src: String, line: i32, column: i32 },
    #[error("Line {line} Column {column}: Invalid command {command:?}.")]
    Command {
        command: char,
        line: i32,
        column: i32,
    },
}

// A buffered iterator of characters keeping track of line and column.
pub struct Source<Iter> {
    src: Iter,
    current: char,
    line: i32,
    col: i32,
    finished: bool,
}

impl<Iter: Iterator<Item = char>> Source<Iter> {
    pub fn new<IntoIter>(src: IntoIter) -> Self
    where
        IntoIter: IntoIterator<IntoIter = Iter>,
    {
        Self::with_position(0, 0, src)
    }

    pub fn with_position<IntoIter>(line: i32, column: i32, src: IntoIter) -> Self
    where
        IntoIter: IntoIterator<IntoIter = Iter>,
    {
        let mut src = src.into_iter();

        let (current, finished) = match src.next() {
            Some(c) => (c, false),
            None => (' ', true),
        };

        let line = line + if current == '\n' { 1 } else { 0 };

        Source {
            current,
            finished,
            src,
            line,
            col: column,
        }
    }

    fn skip_whitespace(&mut self) {
        while !self.finished && (self.current.is_whitespace() || self.current == ',') {
            self.advance_one();
        }
    }

    // Skips the rest of a command that could not be parsed.
    fn skip_to_next_command(&mut self) {
        while !self.finished && !is_command_start(self.current) {
            self.advance_one();
        }
    }

    fn advance_one(&mut self) {
        if self.finished {
            return;
        }
        match self.src.next() {
            Some('\n') => {
                self.current = '\n';
                self.line += 1;
                self.col = -1;
            }
            Some(c) => {
                self.current = c;
                self.col += 1;
            }
            None => {
                self.current = '~';
                self.finished = true;
            }
        }
    }
}

// Exponents are the only letters that can appear in a number.
fn is_command_start(c: char) -> bool {
    c.is_ascii_alphabetic() && c != 'e' && c != 'E'
}

/// A context object for parsing the SVG path data syntax into a [`Path`].
///
/// # Syntax
///
/// The supported commands are `M`, `L`, `H`, `V`, `C`, `S`, `Q` and `Z`, in their
/// absolute (upper case) and relative (lower case) forms. Parameters can be
/// separated with white space, commas or signs, and a command's parameters can be
/// repeated without repeating the command: `L 1 2 3 4` is two line segments and
/// extra coordinates after a move-to are line segments.
///
/// After a close command, a drawing command starts a new sub-path at the start of
/// the closed one.
///
/// # Errors
///
/// Parsing does not stop at the first error. An unsupported command (including
/// `T` and `A`) or a malformed number is reported, the command is skipped along
/// with its parameters, and parsing resumes at the next command.
#[derive(Debug, Default)]
pub struct PathParser {
    float_buffer: String,
    current_position: Point,
}

impl PathParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the whole source and records the commands into `output`.
    ///
    /// Returns the errors encountered along the way.
    pub fn parse<Iter>(&mut self, src: &mut Source<Iter>, output: &mut Path) -> Vec<ParseError>
    where
        Iter: Iterator<Item = char>,
    {
        // A relative move-to at the start of the path is treated as absolute.
        self.current_position = point(0.0, 0.0);
        let mut first_position = point(0.0, 0.0);

        let mut need_start = false;
        let mut prev_cubic_ctrl = None;
        let mut implicit_cmd = 'M';
        let mut errors = Vec::new();

        src.skip_whitespace();

        while !src.finished {
            let mut cmd = src.current;
            let cmd_line = src.line;
            let cmd_col = src.col;

            if cmd.is_ascii_alphabetic() {
                src.advance_one();
            } else {
                cmd = implicit_cmd;
            }

            if need_start && is_drawing_command(cmd) {
                output.move_to(first_position);
                need_start = false;
            }

            let result = self.parse_command(cmd, src, output, prev_cubic_ctrl);

            match result {
                Ok(Command::Curve { ctrl }) => {
                    prev_cubic_ctrl = Some(ctrl);
                }
                Ok(Command::MoveTo) => {
                    first_position = self.current_position;
                    need_start = false;
                    prev_cubic_ctrl = None;
                }
                Ok(Command::Close) => {
                    self.current_position = first_position;
                    need_start = true;
                    prev_cubic_ctrl = None;
                }
                Ok(Command::Other) => {
                    prev_cubic_ctrl = None;
                }
                Err(error) => {
                    let error = match error {
                        CommandError::Number(e) => e,
                        CommandError::Unsupported => ParseError::Command {
                            command: cmd,
                            line: cmd_line,
                            column: cmd_col,
                        },
                    };
                    log::warn!("{}", error);
                    errors.push(error);
                    prev_cubic_ctrl = None;
                    src.skip_to_next_command();
                    continue;
                }
            }

            implicit_cmd = match cmd {
                'm' => 'l',
                'M' => 'L',
                'z' => 'm',
                'Z' => 'M',
                c => c,
            };

            src.skip_whitespace();
        }

        errors
    }

    fn parse_command(
        &mut self,
        cmd: char,
        src: &mut Source<impl Iterator<Item = char>>,
        output: &mut Path,
        prev_cubic_ctrl: Option<Point>,
    ) -> Result<Command, CommandError> {
        let is_relative = cmd.is_lowercase();

        match cmd {
            'l' | 'L' => {
                let to = self.parse_endpoint(is_relative, src)?;
                output.line_to(to);
            }
            'h' | 'H' => {
                let mut x = self.parse_number(src)?;
                if is_relative {
                    x += self.current_position.x;
                }
                let to = point(x, self.current_position.y);
                self.current_position = to;
                output.line_to(to);
            }
            'v' | 'V' => {
                let mut y = self.parse_number(src)?;
                if is_relative {
                    y += self.current_position.y;
                }
                let to = point(self.current_position.x, y);
                self.current_position = to;
                output.line_to(to);
            }
            'q' | 'Q' => {
                let ctrl = self.parse_point(is_relative, src)?;
                let to = self.parse_endpoint(is_relative, src)?;
                output.quadratic_curve_to(ctrl, to);
            }
            'c' | 'C' => {
                let ctrl1 = self.parse_point(is_relative, src)?;
                let ctrl2 = self.parse_point(is_relative, src)?;
                let to = self.parse_endpoint(is_relative, src)?;
                output.bezier_curve_to(ctrl1, ctrl2, to);
                return Ok(Command::Curve { ctrl: ctrl2 });
            }
            's' | 'S' => {
                let ctrl1 = self.get_smooth_ctrl(prev_cubic_ctrl);
                let ctrl2 = self.parse_point(is_relative, src)?;
                let to = self.parse_endpoint(is_relative, src)?;
                output.bezier_curve_to(ctrl1, ctrl2, to);
                return Ok(Command::Curve { ctrl: ctrl2 });
            }
            'm' | 'M' => {
                let to = self.parse_endpoint(is_relative, src)?;
                output.move_to(to);
                return Ok(Command::MoveTo);
            }
            'z' | 'Z' => {
                output.close_path();
                return Ok(Command::Close);
            }
            _ => {
                return Err(CommandError::Unsupported);
            }
        }

        Ok(Command::Other)
    }

    fn get_smooth_ctrl(&self, prev_ctrl: Option<Point>) -> Point {
        if let Some(prev_ctrl) = prev_ctrl {
            self.current_position + (self.current_position - prev_ctrl)
        } else {
            self.current_position
        }
    }

    fn parse_endpoint(
        &mut self,
        is_relative: bool,
        src: &mut Source<impl Iterator<Item = char>>,
    ) -> Result<Point, ParseError> {
        let position = self.parse_point(is_relative, src)?;
        self.current_position = position;

        Ok(position)
    }

    fn parse_point(
        &mut self,
        is_relative: bool,
        src: &mut Source<impl Iterator<Item = char>>,
    ) -> Result<Point, ParseError> {
        let mut x = self.parse_number(src)?;
        let mut y = self.parse_number(src)?;

        if is_relative {
            x += self.current_position.x;
            y += self.current_position.y;
        }

        Ok(point(x, y))
    }

    fn parse_number(
        &mut self,
        src: &mut Source<impl Iterator<Item = char>>,
    ) -> Result<f32, ParseError> {
        self.float_buffer.clear();

        src.skip_whitespace();

        let line = src.line;
        let column = src.col;

        if src.current == '-' || src.current == '+' {
            self.float_buffer.push(src.current);
            src.advance_one();
        }

        while src.current.is_ascii_digit() {
            self.float_buffer.push(src.current);
            src.advance_one();
        }

        if src.current == '.' {
            self.float_buffer.push('.');
            src.advance_one();

            while src.current.is_ascii_digit() {
                self.float_buffer.push(src.current);
                src.advance_one();
            }
        }

        if src.current == 'e' || src.current == 'E' {
            self.float_buffer.push(src.current);
            src.advance_one();

            if src.current == '-' || src.current == '+' {
                self.float_buffer.push(src.current);
                src.advance_one();
            }

            while src.current.is_ascii_digit() {
                self.float_buffer.push(src.current);
                src.advance_one();
            }
        }

        match self.float_buffer.parse::<f32>() {
            Ok(val) => Ok(val),
            Err(_) => Err(ParseError::Number {
                src: std::mem::take(&mut self.float_buffer),
                line,
                column,
            }),
        }
    }
}

fn is_drawing_command(cmd: char) -> bool {
    matches!(
        cmd,
        'l' | 'L' | 'h' | 'H' | 'v' | 'V' | 'c' | 'C' | 's' | 'S' | 'q' | 'Q'
    )
}

enum Command {
    MoveTo,
    Close,
    Curve { ctrl: Point },
    Other,
}

enum CommandError {
    Number(ParseError),
    Unsupported,
}

impl From<ParseError> for CommandError {
    fn from(e: ParseError) -> Self {
        CommandError::Number(e)
    }
}

/// Parses SVG path data into `output`, returning the errors encountered.
///
/// ```
/// # extern crate quill_extra;
/// use quill_extra::parser::parse_path_data;
/// use quill_extra::path::Path;
///
/// let mut path = Path::new();
/// let errors = parse_path_data("M 0 0 L 10 0 l 0 10 Z", &mut path);
///
/// assert!(errors.is_empty());
/// assert_eq!(path.sub_paths()[0].len(), 3);
/// ```
pub fn parse_path_data(data: &str, output: &mut Path) -> Vec<ParseError> {
    PathParser::new().parse(&mut Source::new(data.chars()), output)
}

#[cfg(test)]
fn parse(src: &str) -> (Path, Vec<ParseError>) {
    let mut path = Path::new();
    let errors = parse_path_data(src, &mut path);
    (path, errors)
}

#[cfg(test)]
fn positions(path: &Path) -> Vec<Vec<Point>> {
    path.sub_paths()
        .iter()
        .map(|sub_path| sub_path.positions().collect())
        .collect()
}

#[test]
fn empty() {
    let (path, errors) = parse("");
    assert!(errors.is_empty());
    assert!(path.is_empty());

    let (path, errors) = parse(" ");
    assert!(errors.is_empty());
    assert!(path.is_empty());
}

#[test]
fn simple_square() {
    let (path, errors) = parse("M 0 0 L 1 0 L 1 1 L 0 1 Z");

    assert!(errors.is_empty());
    assert_eq!(
        positions(&path),
        vec![vec![point(0.0, 0.0), point(1.0, 0.0), point(1.0, 1.0), point(0.0, 1.0)]]
    );
    assert!(path.sub_paths()[0].is_closed());
}

#[test]
fn relative_commands() {
    let (absolute, errors) = parse("M 10 10 H 20 V 20 L 10 20 Z");
    assert!(errors.is_empty());
    let (relative, errors) = parse("m 10 10 h 10 v 10 l -10 0 z");
    assert!(errors.is_empty());

    assert_eq!(positions(&absolute), positions(&relative));
}

#[test]
fn implicit_polyline() {
    let (path, errors) = parse("M 0 0 1 1 2 2 L 3 3 4 4");

    assert!(errors.is_empty());
    assert_eq!(path.sub_paths().len(), 1);
    assert_eq!(path.sub_paths()[0].len(), 5);
}

#[test]
fn smooth_cubic() {
    let (smooth, errors) = parse("M 0 0 C 0 10 10 10 10 0 S 20 -10 20 0");
    assert!(errors.is_empty());
    let (explicit, errors) = parse("M 0 0 C 0 10 10 10 10 0 C 10 -10 20 -10 20 0");
    assert!(errors.is_empty());

    assert_eq!(positions(&smooth), positions(&explicit));

    // Without a previous cubic curve, the first control point is the current point.
    let (smooth, _) = parse("M 0 0 L 10 0 S 20 10 20 0");
    let (explicit, _) = parse("M 0 0 L 10 0 C 10 0 20 10 20 0");
    assert_eq!(positions(&smooth), positions(&explicit));
}

#[test]
fn implicit_move_to_after_close() {
    let (path, errors) = parse("M 5 5 L 10 5 L 10 10 Z L 20 20");

    assert!(errors.is_empty());
    assert_eq!(path.sub_paths().len(), 2);
    assert!(path.sub_paths()[0].is_closed());
    assert_eq!(
        positions(&path)[1],
        vec![point(5.0, 5.0), point(20.0, 20.0)]
    );

    // Relative commands after a close are relative to the start of the closed sub-path.
    let (path, _) = parse("M 5 5 l 5 0 l 0 5 z l 1 1");
    assert_eq!(
        positions(&path)[1],
        vec![point(5.0, 5.0), point(6.0, 6.0)]
    );
}

#[test]
fn invalid_cmd() {
    let (_, errors) = parse("x 0 0 0");
    assert_eq!(
        errors,
        vec![ParseError::Command {
            command: 'x',
            line: 0,
            column: 0
        }]
    );

    let (path, errors) = parse("\n M 0 \n0 x 1 1 L 2 2");
    assert_eq!(
        errors,
        vec![ParseError::Command {
            command: 'x',
            line: 2,
            column: 2
        }]
    );

    // Parsing continues after the invalid command.
    assert_eq!(
        positions(&path),
        vec![vec![point(0.0, 0.0), point(2.0, 2.0)]]
    );
}

#[test]
fn unsupported_commands() {
    let (path, errors) = parse("M 0 0 T 5 5 A 1 1 0 0 1 3 3 L 1 0 L 1 1");

    assert_eq!(errors.len(), 2);
    assert!(matches!(errors[0], ParseError::Command { command: 'T', .. }));
    assert!(matches!(errors[1], ParseError::Command { command: 'A', .. }));
    assert_eq!(
        positions(&path),
        vec![vec![point(0.0, 0.0), point(1.0, 0.0), point(1.0, 1.0)]]
    );
}

#[test]
fn number_01() {
    // Two numbers: "M 0.6 0.5".
    let (path, errors) = parse("M 0.6.5");

    assert!(errors.is_empty());
    assert_eq!(positions(&path), vec![vec![point(0.6, 0.5)]]);
}

#[test]
fn number_signs() {
    let (path, errors) = parse("M1-2L+3+4-5-6");

    assert!(errors.is_empty());
    assert_eq!(
        positions(&path),
        vec![vec![point(1.0, -2.0), point(3.0, 4.0), point(-5.0, -6.0)]]
    );
}

#[test]
fn number_scientific_notation() {
    let (path, errors) = parse("M 1e-2 -1E3 L 1.5e+1 0");

    assert!(errors.is_empty());
    assert_eq!(
        positions(&path),
        vec![vec![point(0.01, -1000.0), point(15.0, 0.0)]]
    );
}

#[test]
fn bad_numbers() {
    let bad_number = |src: &str| {
        let (_, errors) = parse(src);
        match errors.first() {
            Some(ParseError::Number { .. }) => true,
            _ => {
                println!("{errors:?}");
                false
            }
        }
    };

    assert!(bad_number("M 0 --1"));
    assert!(bad_number("M 0 1ee2"));
    assert!(bad_number("M 0 1e--1"));
    assert!(bad_number("M 0 *2"));
    assert!(bad_number("M 0 e"));
    assert!(bad_number("M 0 1e"));
}

#[test]
fn bad_number_is_skipped() {
    let (path, errors) = parse("M 0 0 L 1 * L 2 2");

    assert_eq!(
        errors,
        vec![ParseError::Number {
            src: String::new(),
            line: 0,
            column: 10
        }]
    );
    assert_eq!(
        positions(&path),
        vec![vec![point(0.0, 0.0), point(2.0, 2.0)]]
    );
}

#[test]
fn issue_895() {
    let parse_ok = |src: &str| {
        let (_, errors) = parse(src);
        assert!(errors.is_empty(), "{:?}", errors);
    };

    parse_ok("M 1e-9 0");
    parse_ok("M -1e-9 0");
    parse_ok("M -1e11 0");
    parse_ok("M 1.e-9 1.4e-4z");
    parse_ok("M 1.6e-9 1.4e-4 z");
    parse_ok("M0 1.6e-9L0 1.4e-4");
}
