use std::env;
use std::fs;
use std::io::Read;
use std::process::exit;

use svg2cubics::{ParserOptions, Segment};

use csv::Writer;
use serde::Serialize;

/// One CSV row per segment, with the coordinates flattened out.
#[derive(Serialize)]
struct SegmentRow {
    start_x: f64,
    start_y: f64,
    control1_x: f64,
    control1_y: f64,
    control2_x: f64,
    control2_y: f64,
    end_x: f64,
    end_y: f64,
}

impl From<&Segment> for SegmentRow {
    fn from(segment: &Segment) -> Self {
        Self {
            start_x: segment.start.x,
            start_y: segment.start.y,
            control1_x: segment.control[0].x,
            control1_y: segment.control[0].y,
            control2_x: segment.control[1].x,
            control2_y: segment.control[1].y,
            end_x: segment.end.x,
            end_y: segment.end.y,
        }
    }
}

fn main() {
    // Logging
    env_logger::init();

    // Argument parsing
    let args: Vec<_> = env::args().collect();
    match args.len() {
        2 => {}
        _ => {
            println!("Usage: {} <path/to/file.svg>", args[0]);
            exit(1);
        }
    };

    // Load file
    let mut file = fs::File::open(&args[1]).unwrap();
    let mut s = String::new();
    file.read_to_string(&mut s).unwrap();

    // Parse data
    let paths = svg2cubics::parse(&s, ParserOptions::new(0.001)).unwrap_or_else(|e| {
        println!("Error: {}", e);
        exit(2);
    });

    // Write one CSV file per path
    println!("Found {} paths.", paths.len());
    for (num, path) in paths.iter().enumerate() {
        let filename = if path.id.is_empty() {
            format!("unk_{}.csv", num)
        } else {
            format!("{}_{}.csv", path.id, num)
        };

        let mut wtr = Writer::from_path(filename).unwrap();
        for segment in &path.segments {
            wtr.serialize(SegmentRow::from(segment)).unwrap();
        }
        wtr.flush().unwrap();
    }
}
