//! Command-line interface for dokweave
//! This binary turns annotated Kotlin sources into markdown documentation and
//! standalone runnable example programs.
//!
//! Usage:
//!   dokweave process [--config `<path>`] [overrides]  - Run the full pipeline
//!   dokweave file `<path>` [--package `<name>`]         - Process one file to stdout
//!   dokweave labels                                 - List recognized labels

use clap::{Arg, ArgMatches, Command};
use dokweave::config::Loader;
use dokweave::error::PipelineError;
use dokweave::labels;
use dokweave::pipeline::{Pipeline, Summary};
use std::error::Error;
use std::fs;
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let matches = Command::new("dokweave")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Extracts literate documentation and runnable examples from annotated Kotlin sources")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("process")
                .about("Process every annotated source per the project configuration")
                .arg(
                    Arg::new("config")
                        .long("config")
                        .value_name("PATH")
                        .help("Configuration file (default: dokweave.toml when present)"),
                )
                .arg(
                    Arg::new("sources")
                        .long("sources")
                        .value_name("DIR")
                        .help("Directory scanned for annotated sources"),
                )
                .arg(
                    Arg::new("docs-out")
                        .long("docs-out")
                        .value_name("DIR")
                        .help("Directory for rendered markdown documents"),
                )
                .arg(
                    Arg::new("examples-out")
                        .long("examples-out")
                        .value_name("DIR")
                        .help("Directory for extracted example programs"),
                )
                .arg(
                    Arg::new("web-root")
                        .long("web-root")
                        .value_name("URL")
                        .help("Base URL for links to extracted examples"),
                ),
        )
        .subcommand(
            Command::new("file")
                .about("Process one file and print the result to stdout")
                .arg(
                    Arg::new("path")
                        .help("Path to the annotated source file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("package")
                        .long("package")
                        .value_name("NAME")
                        .help("Dotted package name for extracted programs"),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .value_name("FORMAT")
                        .value_parser(["text", "json"])
                        .default_value("text")
                        .help("Output format: the rendered document, or everything as json"),
                ),
        )
        .subcommand(Command::new("labels").about("List the recognized annotation labels"))
        .get_matches();

    match matches.subcommand() {
        Some(("process", sub)) => handle_process_command(sub),
        Some(("file", sub)) => {
            let path = sub.get_one::<String>("path").unwrap();
            let package = sub.get_one::<String>("package");
            let format = sub.get_one::<String>("format").unwrap();
            handle_file_command(path, package, format);
        }
        Some(("labels", _)) => handle_labels_command(),
        _ => unreachable!(),
    }
}

/// Handle the process command
fn handle_process_command(matches: &ArgMatches) {
    match run_pipeline(matches) {
        Ok(summary) => {
            println!(
                "processed {} files ({} failed)",
                summary.files_processed, summary.files_failed
            );
            println!(
                "wrote {} applications, copied {} media files",
                summary.applications_written, summary.media_copied
            );
            if summary.files_failed > 0 {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run_pipeline(matches: &ArgMatches) -> Result<Summary, PipelineError> {
    let mut loader = match matches.get_one::<String>("config") {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new().with_optional_file("dokweave.toml"),
    };
    if let Some(dir) = matches.get_one::<String>("sources") {
        loader = loader.set_override("pipeline.sources_dir", dir.as_str())?;
    }
    if let Some(dir) = matches.get_one::<String>("docs-out") {
        loader = loader.set_override("pipeline.docs_out_dir", dir.as_str())?;
    }
    if let Some(dir) = matches.get_one::<String>("examples-out") {
        loader = loader.set_override("pipeline.examples_out_dir", dir.as_str())?;
    }
    if let Some(url) = matches.get_one::<String>("web-root") {
        loader = loader.set_override("render.web_root_url", url.as_str())?;
    }
    let config = loader.build()?;
    Pipeline::new(config).run()
}

/// Handle the file command
fn handle_file_command(path: &str, package: Option<&String>, format: &str) {
    let header = match package {
        Some(name) => format!("package {}", name),
        None => String::new(),
    };
    match process_one(path, &header, format) {
        Ok(output) => print!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn process_one(path: &str, header: &str, format: &str) -> Result<String, Box<dyn Error>> {
    let source = fs::read_to_string(path)?;
    let result = dokweave::process(&source, header, None)?;
    match format {
        "json" => {
            let mut out = serde_json::to_string_pretty(&result)?;
            out.push('\n');
            Ok(out)
        }
        _ => {
            let mut out = result.doc;
            if !out.is_empty() && !out.ends_with('\n') {
                out.push('\n');
            }
            Ok(out)
        }
    }
}

/// Handle the labels command
fn handle_labels_command() {
    println!("Recognized annotation labels:");
    for name in labels::recognized_names() {
        println!("  @{}", name);
    }
}
