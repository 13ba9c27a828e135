//! `readability [-v] [-u URL] [--json] [file]`
//!
//! Reads an HTML document from `file` (or stdin, if `-u` is given without
//! a file) and prints its summary to stdout. Exits with status 1 and a
//! usage message if neither `-u` nor a file argument is given.
//!
//! `-u URL` sets the base URL used to resolve relative links; it does not
//! fetch the URL over the network (the pipeline never performs I/O of its
//! own). `-v` enables debug-level logging of the driver's retry decisions.
//! `--json` prints `title`/`short_title` as a JSON object to stderr
//! alongside the summary, instead of discarding them.

use std::io::Read as _;
use std::process::ExitCode;

use readabilityrs::{Document, ReadabilityOptions};

struct Args {
    verbose: bool,
    json: bool,
    url: Option<String>,
    file: Option<String>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut verbose = false;
    let mut json = false;
    let mut url = None;
    let mut file = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-v" | "--verbose" => verbose = true,
            "--json" => json = true,
            "-u" | "--url" => {
                url = Some(args.next().ok_or("-u requires a URL argument")?);
            }
            _ if file.is_none() => file = Some(arg),
            other => return Err(format!("unexpected argument: {other}")),
        }
    }

    Ok(Args { verbose, json, url, file })
}

fn main() -> ExitCode {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{msg}");
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    if args.url.is_none() && args.file.is_none() {
        print_usage();
        return ExitCode::FAILURE;
    }

    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    }

    let input = match read_input(args.file.as_deref()) {
        Ok(input) => input,
        Err(err) => {
            eprintln!("readability: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut builder = ReadabilityOptions::builder();
    if let Some(url) = &args.url {
        builder = match builder.url_str(url) {
            Ok(b) => b,
            Err(err) => {
                eprintln!("readability: invalid url {url}: {err}");
                return ExitCode::FAILURE;
            }
        };
    }

    let doc = Document::new(input, builder.build());

    if args.json {
        match serde_json::to_string_pretty(&doc.metadata()) {
            Ok(json) => eprintln!("{json}"),
            Err(err) => eprintln!("readability: failed to serialize metadata: {err}"),
        }
    }

    match doc.summary(false) {
        Ok(summary) => {
            println!("{summary}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("readability: {err}");
            ExitCode::FAILURE
        }
    }
}

fn read_input(file: Option<&str>) -> std::io::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn print_usage() {
    eprintln!("usage: readability [-v] [-u URL] [--json] [file]");
}
