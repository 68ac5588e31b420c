//! The path-data interpreter: turns a `d` attribute string into cubic
//! Bézier segments.

use log::trace;

use crate::error::Error;
use crate::{optimize, ParserOptions, Point, Segment};

/// The command families this crate interprets. The shortcut and arc
/// families (`S s Q q T t A a`) are rejected by the dispatcher before a
/// variant is ever selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    MoveTo,
    LineTo,
    HorizontalTo,
    VerticalTo,
    CurveTo,
}

/// A pending command run: the letter that opened it, the coordinate mode
/// it selected and the offset of its first token character.
#[derive(Debug, Clone, Copy)]
struct Run {
    command: Command,
    letter: char,
    absolute: bool,
    start: usize,
}

/// Pen state for a single path's parse. `current` is the absolute pen
/// position, `initial` the start of the current subpath and the implicit
/// destination of a close.
#[derive(Debug, Default, Clone, Copy)]
struct Cursor {
    current: Point,
    initial: Point,
}

/// Parse a raw `d` attribute string into cubic Bézier segments.
///
/// The string is cleaned first (commas become spaces, whitespace runs
/// collapse), then interpreted command by command, then run through the
/// collinear-merge pass with the configured tolerance. Negative
/// tolerances are clamped to zero.
pub fn parse_path_data(data: &str, options: ParserOptions) -> Result<Vec<Segment>, Error> {
    trace!("parse_path_data");
    let cleaned = clean(data);
    let segments = interpret(&cleaned)?;
    Ok(optimize::merge_collinear(
        segments,
        options.slope_tolerance.max(0.0),
    ))
}

/// Normalize a `d` attribute for tokenizing: commas become spaces, runs
/// of whitespace collapse to a single space, leading and trailing
/// whitespace is trimmed.
fn clean(data: &str) -> String {
    data.replace(',', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Scan the cleaned string once, left to right, slicing it into command
/// runs and routing each run to the matching builder.
fn interpret(data: &str) -> Result<Vec<Segment>, Error> {
    let mut segments = Vec::new();
    let mut cursor = Cursor::default();
    let mut pending: Option<Run> = None;

    for (i, c) in data.char_indices() {
        let command = match c {
            'M' | 'm' => Command::MoveTo,
            'L' | 'l' => Command::LineTo,
            'H' | 'h' => Command::HorizontalTo,
            'V' | 'v' => Command::VerticalTo,
            'C' | 'c' => Command::CurveTo,
            'S' | 's' | 'Q' | 'q' | 'T' | 't' | 'A' | 'a' => {
                return Err(Error::UnsupportedCommand { command: c });
            }
            'Z' | 'z' => {
                // A close carries no coordinate data: flush the pending
                // run, then synthesize the closing segment directly.
                flush(data, pending.take(), i, &mut cursor, &mut segments)?;
                segments.push(close_path(&mut cursor));
                continue;
            }
            _ => continue,
        };
        flush(data, pending.take(), i, &mut cursor, &mut segments)?;
        pending = Some(Run {
            command,
            letter: c,
            absolute: c.is_ascii_uppercase(),
            start: i + 1,
        });
    }
    flush(data, pending.take(), data.len(), &mut cursor, &mut segments)?;

    Ok(segments)
}

/// Close out a pending command run ending at `end` and append whatever
/// segments its builder produces. Without a pending run (before the first
/// command letter, or after a close) the tokens are ignored.
fn flush(
    data: &str,
    run: Option<Run>,
    end: usize,
    cursor: &mut Cursor,
    segments: &mut Vec<Segment>,
) -> Result<(), Error> {
    let run = match run {
        Some(run) => run,
        None => return Ok(()),
    };
    let tokens: Vec<&str> = data[run.start..end].split_whitespace().collect();
    let built = match run.command {
        Command::MoveTo => move_to(&tokens, &run, cursor)?,
        Command::LineTo => line_to(&tokens, &run, cursor)?,
        Command::HorizontalTo => horizontal_to(&tokens, &run, cursor)?,
        Command::VerticalTo => vertical_to(&tokens, &run, cursor)?,
        Command::CurveTo => curve_to(&tokens, &run, cursor)?,
    };
    segments.extend(built);
    Ok(())
}

/// `M`/`m`: the first pair starts a new subpath, any further pairs are
/// implicit line-to steps.
fn move_to(tokens: &[&str], run: &Run, cursor: &mut Cursor) -> Result<Vec<Segment>, Error> {
    if tokens.is_empty() {
        return Err(Error::EmptyCoordinate {
            command: run.letter,
        });
    }
    if tokens.len() % 2 != 0 {
        return Err(Error::InvalidCoordinate {
            command: run.letter,
            data: tokens.join(" "),
        });
    }

    if run.absolute {
        cursor.current = Point::default();
    }
    let first = parse_point(tokens[0], tokens[1], run.letter)?;
    cursor.current += first;
    cursor.initial = cursor.current;

    let mut segments = Vec::with_capacity(tokens.len() / 2 - 1);
    let mut previous = cursor.current;
    for pair in tokens[2..].chunks(2) {
        if run.absolute {
            cursor.current = Point::default();
        }
        let step = parse_point(pair[0], pair[1], run.letter)?;
        cursor.current += step;
        segments.push(Segment::line(previous, cursor.current));
        previous = cursor.current;
    }

    Ok(segments)
}

/// `L`/`l`: one straight segment per coordinate pair.
fn line_to(tokens: &[&str], run: &Run, cursor: &mut Cursor) -> Result<Vec<Segment>, Error> {
    if tokens.is_empty() {
        return Err(Error::EmptyCoordinate {
            command: run.letter,
        });
    }
    if tokens.len() % 2 != 0 {
        return Err(Error::InvalidCoordinate {
            command: run.letter,
            data: tokens.join(" "),
        });
    }

    let mut segments = Vec::with_capacity(tokens.len() / 2);
    let mut previous = cursor.current;
    for pair in tokens.chunks(2) {
        if run.absolute {
            cursor.current = Point::default();
        }
        let step = parse_point(pair[0], pair[1], run.letter)?;
        cursor.current += step;
        segments.push(Segment::line(previous, cursor.current));
        previous = cursor.current;
    }

    Ok(segments)
}

/// `H`/`h`: one straight segment per token, moving only on the x axis.
fn horizontal_to(tokens: &[&str], run: &Run, cursor: &mut Cursor) -> Result<Vec<Segment>, Error> {
    if tokens.is_empty() {
        return Err(Error::EmptyCoordinate {
            command: run.letter,
        });
    }

    let mut segments = Vec::with_capacity(tokens.len());
    let mut previous = cursor.current.x;
    for token in tokens {
        if run.absolute {
            cursor.current.x = 0.0;
        }
        cursor.current.x += parse_abscissa(token, run.letter)?;
        let y = cursor.current.y;
        segments.push(Segment::line(
            Point::new(previous, y),
            Point::new(cursor.current.x, y),
        ));
        previous = cursor.current.x;
    }

    Ok(segments)
}

/// `V`/`v`: one straight segment per token, moving only on the y axis.
fn vertical_to(tokens: &[&str], run: &Run, cursor: &mut Cursor) -> Result<Vec<Segment>, Error> {
    if tokens.is_empty() {
        return Err(Error::EmptyCoordinate {
            command: run.letter,
        });
    }

    let mut segments = Vec::with_capacity(tokens.len());
    let mut previous = cursor.current.y;
    for token in tokens {
        if run.absolute {
            cursor.current.y = 0.0;
        }
        cursor.current.y += parse_ordinate(token, run.letter)?;
        let x = cursor.current.x;
        segments.push(Segment::line(
            Point::new(x, previous),
            Point::new(x, cursor.current.y),
        ));
        previous = cursor.current.y;
    }

    Ok(segments)
}

/// `C`/`c`: each group of six tokens is two control points plus an
/// endpoint. In absolute mode the cursor resets once per group and all
/// three points are added to that same baseline.
fn curve_to(tokens: &[&str], run: &Run, cursor: &mut Cursor) -> Result<Vec<Segment>, Error> {
    if tokens.is_empty() {
        return Err(Error::EmptyCoordinate {
            command: run.letter,
        });
    }
    if tokens.len() % 6 != 0 {
        return Err(Error::InvalidCoordinate {
            command: run.letter,
            data: tokens.join(" "),
        });
    }

    let mut segments = Vec::with_capacity(tokens.len() / 6);
    let mut previous = cursor.current;
    for group in tokens.chunks(6) {
        let mut points = [Point::default(); 3];
        for (j, point) in points.iter_mut().enumerate() {
            *point = parse_point(group[2 * j], group[2 * j + 1], run.letter)?;
        }

        if run.absolute {
            cursor.current = Point::default();
        }
        let base = cursor.current;
        let end = base + points[2];
        segments.push(Segment {
            start: previous,
            end,
            control: [base + points[0], base + points[1]],
        });

        previous = end;
        cursor.current = end;
    }

    Ok(segments)
}

/// `Z`/`z`: a straight segment back to the subpath start, which also
/// becomes the new pen position. Legal in any state since it carries no
/// coordinate data.
fn close_path(cursor: &mut Cursor) -> Segment {
    let segment = Segment::line(cursor.current, cursor.initial);
    cursor.current = cursor.initial;
    segment
}

fn parse_point(x: &str, y: &str, command: char) -> Result<Point, Error> {
    Ok(Point::new(
        parse_abscissa(x, command)?,
        parse_ordinate(y, command)?,
    ))
}

fn parse_abscissa(token: &str, command: char) -> Result<f64, Error> {
    token.parse().map_err(|_| Error::InvalidX {
        command,
        data: token.to_string(),
    })
}

fn parse_ordinate(token: &str, command: char) -> Result<f64, Error> {
    token.parse().map_err(|_| Error::InvalidY {
        command,
        data: token.to_string(),
    })
}
