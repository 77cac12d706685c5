// Command-line interface for include-code
//
// This binary extracts marker-delimited snippets from source files and resolves
// `#include_code` macros in Markdown pages. The heavy lifting lives in the include-code
// crate; this crate wires it to files, configuration and exit codes.
//
// Usage:
//  include-code extract <file> <identifier> [--json]       - Print one snippet
//  include-code render <input> [--to <format>] [-o <file>]  - Resolve macros and write the page
//  include-code check <inputs>...                           - Report broken macros, exit 1 if any
//  include-code --list-formats                              - List available output formats
//
// Configuration:
//
// Settings come from the embedded defaults, then `include-code.toml` in the working
// directory, then `--config <path>`, then INCLUDE_CODE_* environment variables. `--root`
// and `--tag` override the resolver root directory and the source link revision.
//
// Diagnostics and logs go to stderr; stdout only carries snippets and rendered pages.
// Set RUST_LOG=include_code=debug to trace every extraction.

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use include_code::{
    extract_snippet, include_code_markdown, Diagnostic, FormatRegistry, Resolver, ResolverOptions,
};
use include_code_config::{IncludeCodeConfig, Loader, PROJECT_CONFIG_FILE};
use std::fs;
use std::io;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "include_code=warn";

fn resolver_args() -> [Arg; 2] {
    [
        Arg::new("root")
            .long("root")
            .value_name("DIR")
            .help("Directory that macro file paths are resolved against")
            .value_hint(ValueHint::DirPath),
        Arg::new("tag")
            .long("tag")
            .value_name("TAG")
            .help("Revision used in source links (defaults to the configured tag)")
            .value_hint(ValueHint::Other),
    ]
}

fn build_cli() -> Command {
    Command::new("include-code")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Extract code snippets and resolve #include_code macros in Markdown")
        .long_about(
            "include-code pulls named regions out of source files and splices them into\n\
            Markdown documentation.\n\n\
            Source files delimit regions with comment markers:\n  \
            // docs:start:<identifier>\n  \
            ...\n  \
            // docs:end:<identifier>\n\n\
            Markdown pages request a region with a macro line:\n  \
            #include_code <identifier> <filePath> <language> [noTitle,noLineNumbers,noSourceLink]\n\n\
            Examples:\n  \
            include-code extract src/main.rs setup           # Print the 'setup' snippet\n  \
            include-code render docs/guide.md -o out/guide.md  # Resolve every macro\n  \
            include-code check docs/*.md --root ../repo      # Fail on broken macros"
        )
        .arg_required_else_help(true)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available output formats")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to an include-code.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("extract")
                .about("Print the snippet delimited by an identifier's markers")
                .arg(
                    Arg::new("file")
                        .help("Source file containing the markers")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("identifier")
                        .help("Snippet identifier")
                        .required(true)
                        .index(2)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print the snippet and its marker lines as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("render")
                .about("Resolve #include_code macros in a Markdown file")
                .long_about(
                    "Resolve every #include_code macro in a Markdown file.\n\n\
                    Output goes to stdout by default, or use -o to write a file. The output\n\
                    format is taken from --to, then from the -o file extension, then from\n\
                    the configuration (render.format).\n\n\
                    Macros that cannot be resolved are left as written and reported on\n\
                    stderr as <input>:<line>:<column>: <message>."
                )
                .arg(
                    Arg::new("input")
                        .help("Markdown file to process")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Output format (markdown, html)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("strict")
                        .long("strict")
                        .help("Exit with status 1 if any macro could not be resolved")
                        .action(ArgAction::SetTrue),
                )
                .args(resolver_args()),
        )
        .subcommand(
            Command::new("check")
                .about("Report #include_code macros that cannot be resolved")
                .arg(
                    Arg::new("inputs")
                        .help("Markdown files to check")
                        .required(true)
                        .num_args(1..)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .args(resolver_args()),
        )
}

fn main() {
    init_tracing();

    let matches = build_cli().get_matches();

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    let config_path = matches.get_one::<String>("config").map(|s| s.as_str());

    match matches.subcommand() {
        Some(("extract", sub_matches)) => {
            let file = sub_matches
                .get_one::<String>("file")
                .expect("file is required");
            let identifier = sub_matches
                .get_one::<String>("identifier")
                .expect("identifier is required");
            handle_extract_command(file, identifier, sub_matches.get_flag("json"));
        }
        Some(("render", sub_matches)) => {
            let config = load_cli_config(config_path, &resolver_overrides(sub_matches));
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let to = sub_matches.get_one::<String>("to").map(|s| s.as_str());
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            let strict = sub_matches.get_flag("strict");
            handle_render_command(input, to, output, strict, &config);
        }
        Some(("check", sub_matches)) => {
            let config = load_cli_config(config_path, &resolver_overrides(sub_matches));
            let inputs: Vec<&str> = sub_matches
                .get_many::<String>("inputs")
                .expect("inputs are required")
                .map(|s| s.as_str())
                .collect();
            handle_check_command(&inputs, &config);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Logs go to stderr so piping stdout yields only the document.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Handle the extract command
fn handle_extract_command(file: &str, identifier: &str, json: bool) {
    let snippet = extract_snippet(file, identifier).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    if json {
        let text = serde_json::to_string_pretty(&snippet).unwrap_or_else(|e| {
            eprintln!("Serialization error: {e}");
            std::process::exit(1);
        });
        println!("{text}");
    } else {
        println!("{}", snippet.code);
    }
}

/// Handle the render command
fn handle_render_command(
    input: &str,
    to: Option<&str>,
    output: Option<&str>,
    strict: bool,
    config: &IncludeCodeConfig,
) {
    let registry = FormatRegistry::default();
    let format_name = select_format(&registry, to, output, config);
    let format = registry.get(&format_name).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    let source = fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    });

    debug!(input, format = %format_name, "rendering");
    let resolver = Resolver::new(ResolverOptions::from(config));
    let rendered = include_code_markdown(&source, &resolver, format).unwrap_or_else(|e| {
        eprintln!("Serialization error: {e}");
        std::process::exit(1);
    });

    report_diagnostics(input, &rendered.diagnostics);

    match output {
        Some(path) => {
            fs::write(path, rendered.output.as_bytes()).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => print!("{}", rendered.output),
    }

    if strict && !rendered.is_clean() {
        std::process::exit(1);
    }
}

/// Handle the check command
fn handle_check_command(inputs: &[&str], config: &IncludeCodeConfig) {
    let registry = FormatRegistry::default();
    let format = registry.get("markdown").unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
    let resolver = Resolver::new(ResolverOptions::from(config));

    let mut problems = 0;
    for input in inputs {
        let source = fs::read_to_string(input).unwrap_or_else(|e| {
            eprintln!("Error reading file '{input}': {e}");
            std::process::exit(1);
        });
        let rendered = include_code_markdown(&source, &resolver, format).unwrap_or_else(|e| {
            eprintln!("Serialization error: {e}");
            std::process::exit(1);
        });
        report_diagnostics(input, &rendered.diagnostics);
        problems += rendered.diagnostics.len();
    }

    if problems > 0 {
        eprintln!("{problems} unresolved #include_code macro(s)");
        std::process::exit(1);
    }
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    println!("Available output formats:\n");
    let registry = FormatRegistry::default();
    for format_name in registry.list_formats() {
        if let Ok(format) = registry.get(&format_name) {
            println!(
                "  {format_name:<10} {} (.{})",
                format.description(),
                format.file_extensions().join(", .")
            );
        }
    }
}

/// `--to`, then the output file extension, then the configured default.
fn select_format(
    registry: &FormatRegistry,
    to: Option<&str>,
    output: Option<&str>,
    config: &IncludeCodeConfig,
) -> String {
    if let Some(name) = to {
        return name.to_string();
    }
    output
        .and_then(|path| registry.detect_format_from_filename(path))
        .unwrap_or_else(|| config.render.format.clone())
}

fn diagnostic_line(input: &str, diagnostic: &Diagnostic) -> String {
    match diagnostic.position {
        Some(position) => format!(
            "{input}:{}:{}: {}",
            position.line, position.column, diagnostic.message
        ),
        None => format!("{input}: {}", diagnostic.message),
    }
}

fn report_diagnostics(input: &str, diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        eprintln!("{}", diagnostic_line(input, diagnostic));
    }
}

/// Config keys set by `--root` and `--tag`.
fn resolver_overrides(matches: &ArgMatches) -> Vec<(&'static str, String)> {
    let mut overrides = Vec::new();
    if let Some(root) = matches.get_one::<String>("root") {
        overrides.push(("resolver.root_dir", root.clone()));
    }
    if let Some(tag) = matches.get_one::<String>("tag") {
        overrides.push(("source_link.commit_tag", tag.clone()));
    }
    overrides
}

fn load_cli_config(
    explicit_path: Option<&str>,
    overrides: &[(&'static str, String)],
) -> IncludeCodeConfig {
    let loader = Loader::new().with_optional_file(PROJECT_CONFIG_FILE);
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };
    let mut loader = loader.with_environment();

    for (key, value) in overrides {
        loader = loader.set_override(key, value.clone()).unwrap_or_else(|err| {
            eprintln!("Invalid override for '{key}': {err}");
            std::process::exit(1);
        });
    }

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}
