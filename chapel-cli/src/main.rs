// Command-line interface for chapel
//
// This binary renders and converts the markup used by the church site's
// authored content (bulletins, event descriptions, sermon notes, minister bios).
//
// The core capabilities live in the chapel-markup crate; this crate wires them
// to files, the layered chapel.toml configuration and the terminal.
//
// Converting:
//
// The conversion needs a to and from pair. The from can be auto-detected from
// the file extension, while being overridable by an explicit --from flag.
// Usage:
//  chapel <input> --to <format> [--from <format>] [--output <file>]  - Convert between formats (default)
//  chapel convert <input> --to <format> [--from <format>] [--output <file>]  - Same as above (explicit)
//  chapel render <input>                     - Markdown to an HTML fragment using the configured render knobs
//  chapel inspect <path> [<transform>]       - Execute a transform (defaults to "ir-tag")
//  chapel record <file.json> [--validate-only] - Validate a content record and render its markdown fields
//  chapel --list-formats                     - List available formats
//
// Extra Parameters:
//
// Format-specific parameters can be passed using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix and passes the parameters to the format/transform.
// Example:
//  chapel notes.md --to html --extra-standalone --extra-title "Sunday Notes"

use chapel_cli::transforms::{self, AVAILABLE_TRANSFORMS, DEFAULT_TRANSFORM};

use chapel_config::{ChapelConfig, Loader};
use chapel_markup::content::{ContentRecord, Validate};
use chapel_markup::publish::{publish, PublishArtifact, PublishSpec};
use chapel_markup::{render_with_options, FormatRegistry, RenderOptions};
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing_subscriber::EnvFilter;

const SUBCOMMANDS: &[&str] = &["convert", "render", "inspect", "record", "help"];

/// Picked up from the working directory when present.
const LOCAL_CONFIG: &str = "chapel.toml";

/// Exit status for records that parse but fail validation.
const EXIT_INVALID: i32 = 2;

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = if let Some(key) = arg.strip_prefix("--extra-") {
            Some(key)
        } else {
            arg.strip_prefix("--extras-")
        };

        if let Some(key) = key_opt {
            let has_value = args.get(i + 1).is_some_and(|next| !next.starts_with('-'));

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn build_cli() -> Command {
    Command::new("chapel")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render and convert chapel content markup")
        .long_about(
            "chapel is a command-line tool for the markup used in church site content.\n\n\
            Commands:\n  \
            - convert: Transform between formats (markdown, html, text, tag)\n  \
            - render:  Markdown to an HTML fragment, as the site would show it\n  \
            - inspect: View the lexer's intermediate representation\n  \
            - record:  Validate a JSON content record and render its markdown fields\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass format-specific options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            chapel notes.md --to html                       # HTML fragment on stdout\n  \
            chapel notes.md --to html --extra-standalone    # Full HTML page\n  \
            chapel notes.md --to text --extra-max-chars 160 # Plain-text excerpt\n  \
            chapel inspect notes.md events                  # Flat event stream\n  \
            chapel record event.json                        # Validate and render",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
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
                .value_name("PATH")
                .help("Path to a chapel.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log debug output to stderr (RUST_LOG takes precedence)")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between document formats (default command)")
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
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (html, markdown, text, tag)")
                        .required(true)
                        .value_hint(ValueHint::Other),
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
            Command::new("render")
                .about("Render markdown to an HTML fragment using the configured render options")
                .arg(
                    Arg::new("input")
                        .help("Markdown file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect the intermediate representation of a document")
                .long_about(
                    "View what the lexer recognized before any HTML is emitted.\n\n\
                    Transforms:\n  \
                    - ir-tag:  IR as XML-like tags (default)\n  \
                    - ir-json: IR as JSON\n  \
                    - events:  Flat event stream consumed by the HTML serializer\n\n\
                    Extra Parameters:\n  \
                    --extra-pretty false           Compact ir-json\n  \
                    --extra-line-breaks paragraphs Group lines into paragraphs for events",
                )
                .arg(
                    Arg::new("path")
                        .help("Path to the markdown file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("transform")
                        .help(format!(
                            "Transform to apply. Available: {}",
                            AVAILABLE_TRANSFORMS.join(", ")
                        ))
                        .value_parser(AVAILABLE_TRANSFORMS.to_vec())
                        .index(2)
                        .value_hint(ValueHint::Other),
                ),
        )
        .subcommand(
            Command::new("record")
                .about("Validate a JSON content record and render its markdown fields")
                .arg(
                    Arg::new("path")
                        .help("Path to the record JSON (with a \"kind\" field)")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("validate-only")
                        .long("validate-only")
                        .help("Only validate, do not render")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let (cleaned_args, extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            // A leading path means the user left out the default "convert"
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && !SUBCOMMANDS.contains(&cleaned_args[1].as_str())
            {
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    init_logging(matches.get_flag("verbose"));

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    let config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));

    match matches.subcommand() {
        Some(("convert", sub_matches)) => handle_convert_command(sub_matches, &extra_params, &config),
        Some(("render", sub_matches)) => {
            let input = required_arg(sub_matches, "input");
            handle_render_command(input, &extra_params, &config);
        }
        Some(("inspect", sub_matches)) => {
            let path = required_arg(sub_matches, "path");
            let transform = sub_matches
                .get_one::<String>("transform")
                .map(|s| s.as_str())
                .unwrap_or(DEFAULT_TRANSFORM);
            handle_inspect_command(path, transform, &extra_params, &config);
        }
        Some(("record", sub_matches)) => {
            let path = required_arg(sub_matches, "path");
            handle_record_command(path, sub_matches.get_flag("validate-only"), &config);
        }
        _ => fail("Unknown subcommand. Use --help for usage information."),
    }
}

/// Logs go to stderr so they never mix with converted output.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Handle the convert command
fn handle_convert_command(
    sub_matches: &ArgMatches,
    extra_params: &HashMap<String, String>,
    config: &ChapelConfig,
) {
    let input = required_arg(sub_matches, "input");
    let to = required_arg(sub_matches, "to");
    let output = sub_matches.get_one::<String>("output");
    let registry = FormatRegistry::default();

    let from = match sub_matches.get_one::<String>("from") {
        Some(f) => f.clone(),
        None => registry
            .format_for_path(input)
            .map(|format| format.name().to_string())
            .unwrap_or_else(|| {
                fail(&format!(
                    "Could not detect format from filename '{input}'. Please specify --from explicitly"
                ))
            }),
    };

    if let Err(e) = registry.get(to) {
        fail(&e.to_string());
    }

    let source = read_input(input);
    let doc = registry
        .parse(&source, &from)
        .unwrap_or_else(|e| fail(&e.to_string()));

    let options = format_options(to, config, extra_params);
    tracing::debug!(from = %from, to, options = options.len(), "converting");

    let mut spec = PublishSpec::new(&doc, to).with_options(options);
    if let Some(path) = output {
        spec = spec.with_output_path(path);
    }

    match publish(spec) {
        Ok(PublishArtifact::InMemory(text)) => print_document(&text),
        Ok(PublishArtifact::File(path)) => {
            tracing::info!(path = %path.display(), "wrote output");
        }
        Err(e) => fail(&e.to_string()),
    }
}

/// Handle the render command
fn handle_render_command(
    input: &str,
    extra_params: &HashMap<String, String>,
    config: &ChapelConfig,
) {
    let source = read_input(input);
    let options = render_options(config, extra_params).unwrap_or_else(|e| fail(&e));
    print_document(&render_with_options(&source, &options));
}

/// Handle the inspect command
fn handle_inspect_command(
    path: &str,
    transform: &str,
    extra_params: &HashMap<String, String>,
    config: &ChapelConfig,
) {
    let source = read_input(path);
    let params = build_inspect_params(config, extra_params);

    let output = transforms::execute_transform(&source, transform, &params)
        .unwrap_or_else(|e| fail(&e));

    print!("{output}");
}

/// Handle the record command
fn handle_record_command(path: &str, validate_only: bool, config: &ChapelConfig) {
    let source = read_input(path);
    let record = ContentRecord::from_json(&source)
        .unwrap_or_else(|e| fail(&format!("Invalid record '{path}': {e}")));

    if let Err(errors) = record.validate() {
        tracing::debug!(kind = record.kind(), errors = errors.len(), "record rejected");
        for error in errors.errors() {
            eprintln!("{error}");
        }
        std::process::exit(EXIT_INVALID);
    }

    if validate_only {
        println!("{} record is valid", record.kind());
        return;
    }

    let options = RenderOptions::from(&config.render);
    let fields = record.render_fields(&options);
    let json = if config.inspect.pretty_json {
        serde_json::to_string_pretty(&fields)
    } else {
        serde_json::to_string(&fields)
    };
    match json {
        Ok(json) => println!("{json}"),
        Err(e) => fail(&format!("JSON serialization failed: {e}")),
    }
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    let registry = FormatRegistry::default();
    println!("Available formats:\n");
    for format in registry.formats() {
        let mut caps = Vec::new();
        if format.supports_parsing() {
            caps.push("parse");
        }
        if format.supports_serialization() {
            caps.push("serialize");
        }
        println!(
            "  {:<10} {} [{}]",
            format.name(),
            format.description(),
            caps.join(", ")
        );
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> ChapelConfig {
    let mut loader = Loader::new().with_optional_file(LOCAL_CONFIG);
    if let Some(path) = explicit_path {
        loader = loader.with_file(path);
    }
    loader
        .build()
        .unwrap_or_else(|err| fail(&format!("Failed to load configuration: {err}")))
}

/// Render knobs from config, with `--extra-*` overrides applied.
fn render_options(
    config: &ChapelConfig,
    overrides: &HashMap<String, String>,
) -> Result<RenderOptions, String> {
    let mut options = RenderOptions::from(&config.render);
    if let Some(raw) = overrides.get("line-breaks") {
        options.line_breaks = raw.parse()?;
    }
    if let Some(raw) = overrides.get("link-target") {
        options.link_target_blank = match raw.as_str() {
            "blank" | "_blank" => true,
            "self" | "_self" => false,
            other => return Err(format!("Invalid value '{other}' for --extra-link-target")),
        };
    }
    if let Some(raw) = overrides.get("sanitize-urls") {
        options.sanitize_urls = parse_bool_arg("sanitize-urls", raw)?;
    }
    Ok(options)
}

/// Options handed to the target format: config first, then `--extra-*`.
fn format_options(
    format: &str,
    config: &ChapelConfig,
    overrides: &HashMap<String, String>,
) -> HashMap<String, String> {
    let mut params = HashMap::new();
    match format {
        "html" => {
            let render = &config.render;
            let html = &config.convert.html;
            params.insert("line-breaks".to_string(), render.line_breaks.to_string());
            params.insert("link-target".to_string(), render.link_target.as_str().to_string());
            params.insert("sanitize-urls".to_string(), render.sanitize_urls.to_string());
            params.insert("standalone".to_string(), html.standalone.to_string());
            params.insert("title".to_string(), html.title.clone());
            if !html.custom_css.is_empty() {
                params.insert("custom-css".to_string(), html.custom_css.clone());
            }
        }
        "text" => {
            if config.convert.text.max_chars > 0 {
                params.insert(
                    "max-chars".to_string(),
                    config.convert.text.max_chars.to_string(),
                );
            }
        }
        _ => {}
    }
    for (key, value) in overrides {
        params.insert(key.clone(), value.clone());
    }
    params
}

fn build_inspect_params(
    config: &ChapelConfig,
    overrides: &HashMap<String, String>,
) -> HashMap<String, String> {
    let mut params = HashMap::new();
    params.insert("pretty".to_string(), config.inspect.pretty_json.to_string());
    params.insert(
        "line-breaks".to_string(),
        config.render.line_breaks.to_string(),
    );
    for (key, value) in overrides {
        params.insert(key.clone(), value.clone());
    }
    params
}

fn parse_bool_arg(flag: &str, raw: &str) -> Result<bool, String> {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Ok(true),
        "false" | "0" | "no" | "n" => Ok(false),
        other => Err(format!("Invalid boolean value '{other}' for --extra-{flag}")),
    }
}

fn required_arg<'a>(matches: &'a ArgMatches, name: &str) -> &'a str {
    matches
        .get_one::<String>(name)
        .map(|s| s.as_str())
        .unwrap_or_else(|| fail(&format!("Missing required argument '{name}'")))
}

fn read_input(path: &str) -> String {
    fs::read_to_string(Path::new(path))
        .unwrap_or_else(|e| fail(&format!("Error reading file '{path}': {e}")))
}

/// Terminate stdout output with exactly one newline.
fn print_document(text: &str) {
    if text.ends_with('\n') {
        print!("{text}");
    } else {
        println!("{text}");
    }
}

fn fail(message: &str) -> ! {
    eprintln!("Error: {message}");
    std::process::exit(1);
}
