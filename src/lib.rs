//! Convert SVG path data to a flat list of cubic Bézier segments.
//!
//! The `d` attribute of every `<path>` element (including paths nested in
//! `<g>` groups) is interpreted into absolute-coordinate cubic Bézier
//! segments. Straight-line commands (`M`, `L`, `H`, `V`, `Z`) produce
//! degenerate cubics whose control points sit on the segment midpoint, so
//! downstream consumers handle a single segment kind regardless of the
//! command a segment came from. A post-pass merges consecutive segments
//! that are collinear within a configurable slope tolerance.
//!
//! The shortcut and arc families (`S s Q q T t A a`) are rejected with an
//! error rather than approximated.
//!
//! Segments convert into [`lyon_geom::CubicBezierSegment`] for further
//! geometric processing (flattening, length measurement, ...).
//!
//! You can optionally get serde 1 support by enabling the `serde` feature.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::single_match)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

use std::convert;
use std::ops;
use std::str;

use log::{debug, trace};
use lyon_geom::euclid::default::Point2D;
use lyon_geom::CubicBezierSegment;
use quick_xml::events::Event;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

mod error;
mod optimize;
mod path;

pub use crate::error::Error;
pub use crate::path::parse_path_data;

/// A point (or offset) in absolute path space.
#[derive(Debug, Default, PartialEq, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(C)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The point halfway between `self` and `other`.
    pub fn midpoint(self, other: Self) -> Self {
        Self::new(0.5 * (self.x + other.x), 0.5 * (self.y + other.y))
    }

    /// Slope of the line through `self` and `other`. A vertical line
    /// gives ±∞, a zero-length one NaN.
    pub(crate) fn slope_to(self, other: Self) -> f64 {
        (other.y - self.y) / (other.x - self.x)
    }
}

impl convert::From<(f64, f64)> for Point {
    fn from(val: (f64, f64)) -> Self {
        Self { x: val.0, y: val.1 }
    }
}

impl ops::Add for Point {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl ops::AddAssign for Point {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

/// One cubic Bézier segment in absolute coordinates.
///
/// Straight-line commands set both control points to the segment
/// midpoint, degenerating the cubic to a line while keeping the
/// representation uniform across command families.
#[derive(Debug, PartialEq, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(C)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
    pub control: [Point; 2],
}

impl Segment {
    /// A straight line from `start` to `end` as a degenerate cubic.
    pub fn line(start: Point, end: Point) -> Self {
        let middle = start.midpoint(end);
        Self {
            start,
            end,
            control: [middle, middle],
        }
    }

    /// View this segment as a `lyon_geom` cubic Bézier segment.
    pub fn to_bezier(&self) -> CubicBezierSegment<f64> {
        CubicBezierSegment {
            from: Point2D::new(self.start.x, self.start.y),
            ctrl1: Point2D::new(self.control[0].x, self.control[0].y),
            ctrl2: Point2D::new(self.control[1].x, self.control[1].y),
            to: Point2D::new(self.end.x, self.end.y),
        }
    }
}

impl convert::From<Segment> for CubicBezierSegment<f64> {
    fn from(segment: Segment) -> Self {
        segment.to_bezier()
    }
}

/// A parsed `<path>` element: its `id` attribute (verbatim, empty when
/// absent) and its segments in draw order.
#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Path {
    pub id: String,
    pub segments: Vec<Segment>,
}

/// Options for the path-data interpreter.
#[derive(Debug, Default, PartialEq, Copy, Clone)]
pub struct ParserOptions {
    /// Maximum absolute difference between the slopes of two adjacent
    /// segments for them to be merged into one. `0.0` merges nothing.
    /// Negative values are clamped to `0.0`.
    pub slope_tolerance: f64,
}

impl ParserOptions {
    pub fn new(slope_tolerance: f64) -> Self {
        Self { slope_tolerance }
    }
}

/// Parse an SVG string, return the `(id, d)` attribute pair of every
/// `<path>` element in document order.
///
/// The streaming reader visits group content in document order, so paths
/// nested in `<g>` elements need no explicit recursion.
fn parse_xml(svg: &str) -> Result<Vec<(String, String)>, Error> {
    trace!("parse_xml");

    let mut reader = quick_xml::Reader::from_str(svg);
    reader.trim_text(true);

    let mut paths = Vec::new();
    let mut buf = Vec::new();
    loop {
        match reader.read_event(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                if e.name() == b"path" {
                    trace!("parse_xml: Found path element");
                    let mut id = String::new();
                    let mut data: Option<String> = None;
                    for attr in e.attributes().filter_map(Result::ok) {
                        let value = match attr.unescaped_value() {
                            Ok(value) => value,
                            Err(_) => continue,
                        };
                        let value = match str::from_utf8(&value) {
                            Ok(value) => value,
                            Err(_) => continue,
                        };
                        match attr.key {
                            // If a "d" attribute occurs twice, the first one wins.
                            b"d" if data.is_none() => data = Some(value.to_string()),
                            b"id" => id = value.to_string(),
                            _ => {}
                        }
                    }
                    if let Some(data) = data {
                        paths.push((id, data));
                    }
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(Error::SvgParse(e.to_string())),
        }

        // If we don't keep a borrow elsewhere, we can clear the buffer to keep memory usage low
        buf.clear();
    }
    trace!("parse_xml: Return {} paths", paths.len());
    Ok(paths)
}

/// Parse an SVG document into a list of paths, each carrying its `id`
/// attribute and its cubic Bézier segments in draw order.
///
/// Paths appear in document order; paths that draw nothing (e.g. a lone
/// `MoveTo`) are omitted. The first malformed path aborts the whole
/// parse. Callers that want partial results can walk the document
/// themselves and call [`parse_path_data`] per path.
pub fn parse(svg: &str, options: ParserOptions) -> Result<Vec<Path>, Error> {
    trace!("parse");

    let elements = parse_xml(svg)?;
    trace!("parse: Found {} path expressions", elements.len());

    let mut paths = Vec::with_capacity(elements.len());
    for (id, data) in elements {
        debug!("New path");
        let segments = parse_path_data(&data, options)?;
        if segments.is_empty() {
            continue;
        }
        paths.push(Path { id, segments });
    }

    trace!("parse: This results in {} paths", paths.len());
    Ok(paths)
}
