// src/cli.rs
use std::env;
use std::path::PathBuf;

use crate::csv::Delim;
use crate::error::{Error, Result};
use crate::params::Params;
use crate::{logging, runner, store};

pub fn run() -> Result<()> {
    let mut params = Params::new();
    parse_cli(&mut params)?;

    if let Err(e) = logging::init(&params.out_dir) {
        eprintln!("Warning: {e}");
    }

    match runner::run(&params) {
        Ok(summary) => {
            println!("OK events: {}", summary.events_count);
            for path in &summary.files_written {
                println!("OK saved: {}", path.display());
            }
            Ok(())
        }
        Err(e) => {
            log::error!("run failed: {e}");
            let trace = error_trace(&e);
            if let Some(path) = store::write_error_trace(&params.out_dir, &trace) {
                eprintln!("Error trace saved: {}", path.display());
            }
            Err(e)
        }
    }
}

/// Full error text for the side-channel file: display chain plus debug.
fn error_trace(e: &Error) -> String {
    use std::error::Error as _;

    let mut trace = format!("{e}\n");
    let mut source = e.source();
    while let Some(cause) = source {
        trace.push_str(&format!("caused by: {cause}\n"));
        source = cause.source();
    }
    trace.push_str(&format!("\n{e:?}\n"));
    trace
}

fn parse_cli(params: &mut Params) -> Result<()> {
    let mut args = env::args().skip(1);
    while let Some(a) = args.next() {
        match a.as_str() {
            "-i" | "--input" => {
                let v = args.next().ok_or_else(|| usage("Missing value for --input"))?;
                params.input = PathBuf::from(v);
            }
            "-o" | "--out" => {
                let v = args.next().ok_or_else(|| usage("Missing value for --out"))?;
                params.out_dir = PathBuf::from(v);
            }
            "--marker" => {
                let v = args.next().ok_or_else(|| usage("Missing value for --marker"))?;
                if v.is_empty() {
                    return Err(usage("Marker must not be empty"));
                }
                params.marker = v;
            }
            "--format" => {
                let v = args.next().ok_or_else(|| usage("Missing value for --format"))?;
                params.format = match v.to_ascii_lowercase().as_str() {
                    "csv" => Delim::Csv,
                    "tsv" => Delim::Tsv,
                    other => return Err(usage(&format!("Unknown format: {}", other))),
                };
            }
            "-h" | "--help" => {
                eprintln!(include_str!("cli_help.txt"));
                std::process::exit(0);
            }
            _ => return Err(usage(&format!("Unknown arg: {}", a))),
        }
    }

    Ok(())
}

fn usage(msg: &str) -> Error {
    Error::Usage(s!(msg))
}
