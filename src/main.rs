use std::{fs, path::PathBuf};

use clap::Parser;
use inferra::get_result;

/// inferra is a declarative, structural pattern-matching language modeled
/// on conditional types, executed as real runtime computation.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells inferra to look at a file instead of a script.
    #[arg(short, long)]
    file: bool,

    contents: String,
}

fn main() {
    let args = Args::parse();

    let (script, path) = if args.file {
        let script = fs::read_to_string(&args.contents).unwrap_or_else(|_| {
                         eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                                   &args.contents);
                         std::process::exit(1);
                     });
        (script, PathBuf::from(&args.contents))
    } else {
        (args.contents.clone(), PathBuf::from("script.inferra"))
    };

    match get_result(&script, &path) {
        Ok(report) => {
            if !report.is_empty() {
                println!("{report}");
            }
        },
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        },
    }
}
