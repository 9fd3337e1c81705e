//! Command-line color checker for PPM fixtures
//!
//! Reports color frequencies of each configured file and whether its
//! expected solid color is present.

use colorcheck::{check_files, report::render_outcome, CheckerConfig};
use std::{env, path::Path, process};

fn main() {
    env_logger::init_from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "warn"),
    );

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("color_checker");

    let mut json_output = false;
    let mut config_path = None;

    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--json" => json_output = true,
            "--help" | "-h" => {
                print_help(program);
                process::exit(0);
            }
            arg if !arg.starts_with("--") => {
                if config_path.is_none() {
                    config_path = Some(arg.to_string());
                } else {
                    eprintln!("Error: Multiple configuration files provided");
                    process::exit(1);
                }
            }
            _ => {
                eprintln!("Unknown option: {}", arg);
                eprintln!("Use --help for usage information");
                process::exit(1);
            }
        }
    }

    let config = match config_path {
        Some(path) => match CheckerConfig::from_json_file(Path::new(&path)) {
            Ok(config) => config,
            Err(error) => {
                eprintln!("Error: {}", error);
                process::exit(1);
            }
        },
        None => CheckerConfig::default_solid_colors(),
    };

    let outcomes = check_files(&config);

    if json_output {
        match serde_json::to_string_pretty(&outcomes) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing results: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    for outcome in &outcomes {
        print!("{}", render_outcome(outcome));
        println!();
    }
    println!("{}", "=".repeat(50));
}

fn print_help(program_name: &str) {
    eprintln!("Usage: {} [OPTIONS] [config.json]", program_name);
    eprintln!();
    eprintln!("Check PPM files for an expected solid color.");
    eprintln!("Without a configuration file, solid_blue.ppm, solid_red.ppm and");
    eprintln!("solid_green.ppm in the current directory are checked.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --json           Print structured results as JSON");
    eprintln!("  --help, -h       Show this help message");
}
