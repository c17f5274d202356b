//! Springboard compiler command-line driver.
//!
//! Thin wrapper around the library: reads a source file, compiles it, and
//! writes the flat brainfuck output to a file or stdout.

extern crate clap;
extern crate env_logger;
extern crate springboard;

use std::fs::File;
use std::io::prelude::*;
use std::path::Path;
use std::process;

use clap::{App, Arg};

use springboard::conf::{EXPANSION_LIMIT_KEY, OPTIMIZATION_PASSES_KEY};
use springboard::{compile_file_with, CompilationStats, SpringboardConf};

fn main() {
    env_logger::init();

    let matches = App::new("sbc")
        .about("Springboard compiler")
        .arg(
            Arg::with_name("input")
                .help("Springboard source file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("output")
                .help("Output file; stdout if omitted")
                .index(2),
        )
        .arg(
            Arg::with_name("passes")
                .long("passes")
                .takes_value(true)
                .help("Comma-separated optimization passes to run"),
        )
        .arg(
            Arg::with_name("no-optimize")
                .long("no-optimize")
                .help("Emit the expanded program without optimization"),
        )
        .arg(
            Arg::with_name("expansion-limit")
                .long("expansion-limit")
                .takes_value(true)
                .help("Maximum symbol expansion depth"),
        )
        .arg(
            Arg::with_name("stats")
                .long("stats")
                .help("Print compilation statistics to stderr"),
        )
        .get_matches();

    let mut conf = SpringboardConf::new();
    if matches.is_present("no-optimize") {
        conf.set(OPTIMIZATION_PASSES_KEY, "");
    } else if let Some(passes) = matches.value_of("passes") {
        conf.set(OPTIMIZATION_PASSES_KEY, passes);
    }
    if let Some(limit) = matches.value_of("expansion-limit") {
        conf.set(EXPANSION_LIMIT_KEY, limit);
    }

    let input = matches.value_of("input").unwrap();
    let mut stats = CompilationStats::new();

    let code = match compile_file_with(Path::new(input), &conf, &mut stats) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    if matches.is_present("stats") {
        eprint!("{}", stats.pretty_print());
    }

    let result = match matches.value_of("output") {
        Some(path) => File::create(path).and_then(|mut f| writeln!(f, "{}", code)),
        None => {
            println!("{}", code);
            Ok(())
        }
    };
    if let Err(e) = result {
        eprintln!("Cannot write output: {}", e);
        process::exit(1);
    }
}
