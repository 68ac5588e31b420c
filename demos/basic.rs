use std::env;
use std::fs;
use std::io::Read;
use std::process::exit;

use svg2cubics::ParserOptions;

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

    // Print data
    println!("Found {} paths.", paths.len());
    for path in &paths {
        let id = if path.id.is_empty() {
            "<no id>"
        } else {
            &path.id
        };
        println!("{}: {} segments", id, path.segments.len());
        for segment in &path.segments {
            println!(
                "  ({}, {}) -> ({}, {})",
                segment.start.x, segment.start.y, segment.end.x, segment.end.y
            );
        }
    }
}
