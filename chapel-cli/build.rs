use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the transforms from src/transforms.rs
// We need to duplicate this here since build scripts can't access src/ modules
const AVAILABLE_TRANSFORMS: &[&str] = &["ir-json", "ir-tag", "events"];

const FORMATS: &[&str] = &["html", "markdown", "text", "tag"];

fn input_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .help(help)
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("chapel")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render and convert chapel content markup")
        .arg_required_else_help(true)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Path to a chapel.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log debug output to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between document formats")
                .arg(input_arg("input", "Input file path"))
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format")
                        .value_parser(["markdown"]),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format")
                        .required(true)
                        .value_parser(FORMATS.to_vec()),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("render")
                .about("Render markdown to an HTML fragment")
                .arg(input_arg("input", "Markdown file path")),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect the intermediate representation of a document")
                .arg(input_arg("path", "Path to the markdown file"))
                .arg(
                    Arg::new("transform")
                        .help("Transform to apply")
                        .value_parser(AVAILABLE_TRANSFORMS.to_vec())
                        .index(2),
                ),
        )
        .subcommand(
            Command::new("record")
                .about("Validate a JSON content record and render its markdown fields")
                .arg(input_arg("path", "Path to the record JSON"))
                .arg(
                    Arg::new("validate-only")
                        .long("validate-only")
                        .help("Only validate, do not render")
                        .action(ArgAction::SetTrue),
                ),
        );

    generate_to(Bash, &mut cmd, "chapel", &outdir)?;
    generate_to(Zsh, &mut cmd, "chapel", &outdir)?;
    generate_to(Fish, &mut cmd, "chapel", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
