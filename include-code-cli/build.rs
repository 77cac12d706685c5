use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the command tree in src/main.rs
// We need to duplicate this here since build scripts can't access src/ modules
const OUTPUT_FORMATS: &[&str] = &["markdown", "html"];

fn resolver_args() -> [Arg; 2] {
    [
        Arg::new("root")
            .long("root")
            .help("Directory that macro file paths are resolved against")
            .value_hint(ValueHint::DirPath),
        Arg::new("tag")
            .long("tag")
            .help("Revision used in source links")
            .value_hint(ValueHint::Other),
    ]
}

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("include-code")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Extract code snippets and resolve #include_code macros in Markdown")
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
                .help("Path to an include-code.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("extract")
                .about("Print the snippet delimited by an identifier's markers")
                .arg(
                    Arg::new("file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("identifier")
                        .required(true)
                        .index(2)
                        .value_hint(ValueHint::Other),
                )
                .arg(Arg::new("json").long("json").action(ArgAction::SetTrue)),
        )
        .subcommand(
            Command::new("render")
                .about("Resolve #include_code macros in a Markdown file")
                .arg(
                    Arg::new("input")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .value_parser(clap::builder::PossibleValuesParser::new(OUTPUT_FORMATS)),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_hint(ValueHint::FilePath),
                )
                .arg(Arg::new("strict").long("strict").action(ArgAction::SetTrue))
                .args(resolver_args()),
        )
        .subcommand(
            Command::new("check")
                .about("Report #include_code macros that cannot be resolved")
                .arg(
                    Arg::new("inputs")
                        .required(true)
                        .num_args(1..)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .args(resolver_args()),
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "include-code", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "include-code", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "include-code", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
