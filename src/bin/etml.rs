//! Command-line interface for etml
//! This binary parses mood-tagged scripts and prints the resulting document
//! in one of the registered formats, or checks whether a script is markup.
//!
//! Usage:
//!   etml `<path>` [--format `<format>`] [--config `<file>`]   - Parse and print a script
//!   etml `<path>` --validate                                - Check a script without printing it
//!   etml --list-formats                                     - List all available formats
//!
//! An `etml.toml` in the working directory is picked up when present.
//! Set `RUST_LOG=debug` to trace the parser.

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use config::ConfigError;
use etml::etml::config::{EtmlConfig, Loader};
use etml::etml::error::{format_source_context, MarkupError};
use etml::etml::formats::DEFAULT_REGISTRY;
use etml::etml::parser::parse_with_diagnostics;
use etml::etml::processor::{available_formats, process_source, ProcessingSpec};
use etml::etml::validator::is_markup_bearing;
use std::process;

const LOCAL_CONFIG: &str = "etml.toml";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error")).init();

    let matches = Command::new("etml")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for parsing mood-tagged script markup")
        .arg_required_else_help(true)
        .arg(
            Arg::new("path")
                .help("Path to the script file")
                .required_unless_present("list-formats")
                .index(1),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format: a document format (e.g. 'json', 'treeviz') or a full spec (e.g. 'token-simple')"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the defaults and ./etml.toml"),
        )
        .arg(
            Arg::new("validate")
                .long("validate")
                .help("Only check that the script is well-formed markup")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("reject-outside-text")
                .long("reject-outside-text")
                .help("Fail on text outside of tags instead of discarding it")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("lenient-closing")
                .long("lenient-closing")
                .help("Accept any [/...] as the close of the open tag")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("max-segments")
                .long("max-segments")
                .help("Fail when a document holds more segments than this")
                .value_parser(value_parser!(u32)),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available output formats")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    let config = load_config(&matches).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        process::exit(2);
    });
    let path = matches
        .get_one::<String>("path")
        .expect("path is required unless listing formats");
    let source = std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file: {}", e);
        process::exit(2);
    });

    if matches.get_flag("validate") {
        handle_validate_command(&source, &config);
    } else {
        let format = matches
            .get_one::<String>("format")
            .cloned()
            .unwrap_or_else(|| config.output.format.clone());
        handle_parse_command(&source, &format, &config);
    }
}

/// Layer `./etml.toml`, the config file and command-line flags over the defaults
fn load_config(matches: &ArgMatches) -> Result<EtmlConfig, ConfigError> {
    let mut loader = Loader::new().with_optional_file(LOCAL_CONFIG);
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if matches.get_flag("reject-outside-text") {
        loader = loader.set_override("parsing.outside_text", "reject")?;
    }
    if matches.get_flag("lenient-closing") {
        loader = loader.set_override("parsing.strict_closing", false)?;
    }
    if let Some(max) = matches.get_one::<u32>("max-segments") {
        loader = loader.set_override("parsing.max_segments", i64::from(*max))?;
    }
    loader.build()
}

/// Handle the default parse-and-print command
fn handle_parse_command(source: &str, format: &str, config: &EtmlConfig) {
    let options = config.parse_options();

    if format.starts_with("token-") {
        let spec = ProcessingSpec::from_string(format).unwrap_or_else(|e| {
            eprintln!("{}", e);
            process::exit(2);
        });
        match process_source(source, &spec, &options) {
            Ok(output) => println!("{}", output),
            Err(e) => {
                eprintln!("{}", e);
                process::exit(1);
            }
        }
        return;
    }

    let format = format.strip_prefix("document-").unwrap_or(format);
    let registry = &*DEFAULT_REGISTRY;
    if !registry.has(format) {
        eprintln!("Format '{}' not supported", format);
        eprintln!("Available formats: {}", available_formats().join(", "));
        process::exit(2);
    }

    let parsed = parse_with_diagnostics(source, &options).unwrap_or_else(|e| {
        report_markup_error(source, &e);
        process::exit(1);
    });
    for warning in &parsed.warnings {
        eprintln!("warning: {}", warning);
    }

    match registry.serialize(&parsed.document, format) {
        Ok(output) => print!("{}", output),
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    }
}

/// Handle the validate command
fn handle_validate_command(source: &str, config: &EtmlConfig) {
    if !is_markup_bearing(source) {
        println!("not markup: no tags found");
        process::exit(1);
    }

    match parse_with_diagnostics(source, &config.parse_options()) {
        Ok(parsed) => {
            for warning in &parsed.warnings {
                eprintln!("warning: {}", warning);
            }
            println!("well-formed: {} segments", parsed.document.len());
        }
        Err(e) => {
            report_markup_error(source, &e);
            process::exit(1);
        }
    }
}

fn report_markup_error(source: &str, error: &MarkupError) {
    eprintln!("Error: {}", error);
    if let Some(position) = error.position() {
        eprintln!();
        eprint!("{}", format_source_context(source, &position));
    }
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    let registry = &*DEFAULT_REGISTRY;
    println!("Available output formats:\n");
    for name in registry.list_formats() {
        let description = registry.get(&name).map(|f| f.description()).unwrap_or("");
        println!("  {}", name);
        println!("    {}", description);
        println!();
    }
    println!("  token-simple, token-json");
    println!("    Raw lexer tokens");
}
