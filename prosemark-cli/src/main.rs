// Command-line interface for prosemark
//
// This binary provides commands for converting, sanitizing and measuring
// rich-text documents.
//
// The core capabilities use the prosemark-engine crate. This binary is a thin
// shell over prosemark_cli::pipeline, which wires the engine's format registry
// and sanitizer to the loaded configuration.
//
// Converting:
//
// A conversion needs a from and to pair. The from side is auto-detected from
// the file extension, while being overridable by an explicit --from flag.
// Usage:
//  prosemark <input> --to <format> [--from <format>] [--output <file>]  - Convert between formats (default)
//  prosemark convert <input> --to <format> [--from <format>] [--output <file>]  - Same as above (explicit)
//  prosemark sanitize <input> [--from <format>] [--output <file>]  - Filter against the configured allow list
//  prosemark stats <input> [--from <format>] [--json]  - Word, character and paragraph counts

use prosemark_cli::pipeline;

use clap::{Arg, ArgAction, Command, ValueHint};
use prosemark_config::{Loader, ProsemarkConfig};
use std::fs;

fn build_cli() -> Command {
    Command::new("prosemark")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert, sanitize and measure rich-text documents")
        .long_about(
            "prosemark is a command-line tool for working with editor documents.\n\n\
            Commands:\n  \
            - convert:  Transform between document formats (markdown, HTML)\n  \
            - sanitize: Filter a document against the configured allow list\n  \
            - stats:    Word, character and paragraph counts\n\n\
            The source format is auto-detected from the file extension.\n\
            Output goes to stdout by default, or use -o to specify a file.\n\n\
            Examples:\n  \
            prosemark convert note.md --to html            # Convert to HTML (stdout)\n  \
            prosemark note.md --to html -o note.html       # 'convert' is optional\n  \
            prosemark sanitize pasted.html -o clean.html   # Apply the allow list\n  \
            prosemark stats note.md --json                 # Counts as JSON",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a prosemark.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert a document between formats (default command)")
                .long_about(
                    "Convert documents between the supported formats.\n\n\
                    Supported formats:\n  \
                    - markdown: the stored editor dialect (.md)\n  \
                    - html:     HTML5 fragments, or whole documents with --standalone (.html)\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\n\
                    Examples:\n  \
                    prosemark convert note.md --to html            # Convert to HTML (stdout)\n  \
                    prosemark convert page.html --to markdown      # Import HTML\n  \
                    prosemark note.md --to html --standalone       # Whole HTML document\n  \
                    prosemark note.md --to html -o note.html       # 'convert' is optional",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from the file extension if not specified)")
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            pipeline::AVAILABLE_FORMATS,
                        )),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (required)")
                        .required(true)
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            pipeline::AVAILABLE_FORMATS,
                        )),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("standalone")
                        .long("standalone")
                        .help("Wrap HTML output in a complete document")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("sanitize")
                .about("Filter a document against the configured allow list")
                .long_about(
                    "Parse a document, drop everything the configured allow list rejects,\n\
                    and write it back in its own format.\n\n\
                    Disallowed elements lose their wrapper but keep their text; disallowed\n\
                    attributes and executable link targets disappear. The allow list comes\n\
                    from the [sanitize] section of prosemark.toml.\n\n\
                    Examples:\n  \
                    prosemark sanitize pasted.html                 # Clean HTML to stdout\n  \
                    prosemark sanitize pasted.html -o clean.html   # Clean HTML to a file\n  \
                    prosemark sanitize note.md                     # Works on markdown too",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Document format (auto-detected from the file extension if not specified)")
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            pipeline::AVAILABLE_FORMATS,
                        )),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("stats")
                .about("Show text statistics for a document")
                .long_about(
                    "Count words, characters and paragraphs over the rendered text of a\n\
                    document, ignoring its markup.\n\n\
                    Examples:\n  \
                    prosemark stats note.md        # Human-readable counts\n  \
                    prosemark stats note.md --json # Counts as JSON",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Document format (auto-detected from the file extension if not specified)")
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            pipeline::AVAILABLE_FORMATS,
                        )),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Emit the statistics as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
}

/// Whether a bare `prosemark <file> ...` invocation should be retried as
/// `prosemark convert <file> ...`.
fn should_inject_convert(args: &[String]) -> bool {
    args.len() > 1
        && !args[1].starts_with('-')
        && args[1] != "convert"
        && args[1] != "sanitize"
        && args[1] != "stats"
        && args[1] != "help"
}

fn main() {
    // Try to parse args. If no subcommand is provided, inject "convert"
    let args: Vec<String> = std::env::args().collect();

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&args) {
        Ok(m) => m,
        Err(e) => {
            if should_inject_convert(&args) {
                // Inject "convert" as the subcommand and try again
                let mut new_args = vec![args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                // Not a case where we should inject convert, show original error
                e.exit();
            }
        }
    };

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let to = sub_matches.get_one::<String>("to").expect("to is required");

            // The flag can only switch standalone output on; the config file
            // holds the resting default.
            if sub_matches.get_flag("standalone") {
                config.convert.html.standalone = true;
            }

            let from = resolve_format(sub_matches.get_one::<String>("from"), input, &config);
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(input, &from, to, output, &config);
        }
        Some(("sanitize", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let from = resolve_format(sub_matches.get_one::<String>("from"), input, &config);
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_sanitize_command(input, &from, output, &config);
        }
        Some(("stats", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let from = resolve_format(sub_matches.get_one::<String>("from"), input, &config);
            let json = sub_matches.get_flag("json");
            handle_stats_command(input, &from, json, &config);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Handle the convert command
fn handle_convert_command(
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    config: &ProsemarkConfig,
) {
    let source = read_input(input);

    let result = pipeline::convert(&source, from, to, config).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    write_output(output, &result);
}

/// Handle the sanitize command
fn handle_sanitize_command(
    input: &str,
    format: &str,
    output: Option<&str>,
    config: &ProsemarkConfig,
) {
    let source = read_input(input);

    let outcome = pipeline::sanitize_document(&source, format, config).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    if let Some(reason) = &outcome.report.fallback {
        eprintln!(
            "Warning: library sanitizer unavailable ({reason}); the {} backend served this run",
            outcome.report.backend
        );
    }

    write_output(output, &outcome.output);
}

/// Handle the stats command
fn handle_stats_command(input: &str, format: &str, json: bool, config: &ProsemarkConfig) {
    let source = read_input(input);

    let stats = pipeline::document_stats(&source, format, config).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    if json {
        let rendered = serde_json::to_string_pretty(&stats).unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            std::process::exit(1);
        });
        println!("{rendered}");
    } else {
        println!("words: {}", stats.words);
        println!("characters: {}", stats.characters);
        println!("characters (no spaces): {}", stats.characters_no_spaces);
        println!("paragraphs: {}", stats.paragraphs);
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> ProsemarkConfig {
    let loader = Loader::new().with_optional_file("prosemark.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

/// Resolve the document format: an explicit --from wins, otherwise the file
/// extension decides.
fn resolve_format(explicit: Option<&String>, input: &str, config: &ProsemarkConfig) -> String {
    if let Some(format) = explicit {
        return format.clone();
    }

    match pipeline::registry(config).detect_format_from_filename(input) {
        Some(detected) => detected,
        None => {
            eprintln!("Error: Could not detect format from filename '{input}'");
            eprintln!("Please specify --from explicitly");
            std::process::exit(1);
        }
    }
}

fn read_input(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    })
}

fn write_output(output: Option<&str>, content: &str) {
    match output {
        Some(path) => {
            fs::write(path, content).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => print!("{content}"),
    }
}
