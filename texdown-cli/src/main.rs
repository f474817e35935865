// Command-line interface for texdown
//
// This binary converts Markdown with embedded LaTeX math into styled documents
// (HTML, PDF, DOCX, JSON) and can show the intermediate stages of that conversion.
//
// Converting:
//
// The source format is auto-detected from the file extension (markdown is the only input
// format), while being overwrittable by an explicit --from flag.
// Usage:
//  texdown <input> --to <format> [--from <format>] [--output <file>]          - Convert (default)
//  texdown convert <input> --to <format> [--from <format>] [--output <file>]  - Same as above
//  texdown inspect <path> [<transform>]   - Show a pipeline stage (defaults to "blocks-json")
//  texdown css                            - Print the baseline CSS
//  texdown --list-formats                 - List formats and inspect transforms
//
// Configuration:
//
// Defaults are embedded, then ./texdown.toml is layered on top when present, then the file
// given with --config.
//
// Extra Parameters:
//
// Format-specific parameters can be passed using --extra-<parameter-name> <value>.
// `theme`, `size`, `latex` and `css-path` override the configuration; anything else is
// passed to the target format as is.
// Example:
//  texdown notes.md --to pdf -o notes.pdf --extra-size letter --extra-theme serif

mod transforms;

use clap::{Arg, ArgAction, Command, ValueHint};
use log::debug;
use std::collections::HashMap;
use std::fs;
use texdown_babel::{FormatRegistry, SerializedDocument};
use texdown_config::{ConfigError, Loader, TexdownConfig, LOCAL_CONFIG_FILE};

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        if let Some(key) = arg.strip_prefix("--extra-") {
            // A following arg is a value unless it looks like another flag
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
    Command::new("texdown")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert Markdown with LaTeX math into styled documents")
        .long_about(
            "texdown converts Markdown that embeds LaTeX-style math into styled\n\
            HTML, PDF, DOCX or JSON documents.\n\n\
            Commands:\n  \
            - convert: Convert a Markdown file (default command)\n  \
            - inspect: View a pipeline stage (normalized math, tokens, blocks)\n  \
            - css:     Print the baseline stylesheet\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass format-specific options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            texdown notes.md --to html -o notes.html        # Convert to HTML file\n  \
            texdown notes.md --to pdf -o notes.pdf          # Print to PDF\n  \
            texdown notes.md --to docx -o notes.docx        # Word with native fractions\n  \
            texdown notes.md --to html --extra-theme serif  # Serif typography\n  \
            texdown inspect notes.md math                   # Show normalized math",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats and inspect transforms")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a texdown.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect the intermediate stages of a conversion")
                .long_about(
                    "View what each stage of the conversion produces.\n\n\
                    Transforms:\n  \
                    - math:          Source after math normalization\n  \
                    - tokens-json:   Token stream as JSON\n  \
                    - tokens-simple: Token kinds, one per line\n  \
                    - blocks-json:   Styled block tree as JSON (default)\n\n\
                    Extra Parameters:\n  \
                    --extra-latex false   Skip math normalization",
                )
                .arg(
                    Arg::new("path")
                        .help("Path to the Markdown file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("transform")
                        .help("Stage to show. Defaults to 'blocks-json'")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            transforms::AVAILABLE_TRANSFORMS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                ),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert a document (default command)")
                .long_about(
                    "Convert Markdown with LaTeX math into a styled document.\n\n\
                    Output formats:\n  \
                    - html: Self-contained HTML with embedded CSS (.html)\n  \
                    - pdf:  HTML printed through headless Chrome (.pdf)\n  \
                    - docx: Word document with native equation fractions (.docx)\n  \
                    - json: Styled block tree (.json)\n\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\
                    Binary formats (pdf, docx) require -o.",
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
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (required)")
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
            Command::new("css")
                .about("Output the baseline CSS used for HTML export")
                .long_about(
                    "Outputs the baseline CSS embedded in every HTML export.\n\n\
                    Save it, edit it, then pass it back with --extra-css-path to\n\
                    extend the default styles.",
                ),
        )
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // Parse extra-* arguments before clap processing
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            // A bare file path as the first arg means an implicit "convert"
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && !["inspect", "convert", "css", "help"].contains(&cleaned_args[1].as_str())
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

    let config = load_cli_config(
        matches.get_one::<String>("config").map(|s| s.as_str()),
        &mut extra_params,
    );
    init_logging(&config);

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    match matches.subcommand() {
        Some(("inspect", sub_matches)) => {
            let path = sub_matches
                .get_one::<String>("path")
                .expect("path is required");
            let transform = sub_matches
                .get_one::<String>("transform")
                .map(|s| s.as_str())
                .unwrap_or(transforms::DEFAULT_TRANSFORM);
            handle_inspect_command(path, transform, &extra_params, &config);
        }
        Some(("convert", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let to = sub_matches.get_one::<String>("to").expect("to is required");

            // Auto-detect --from if not provided
            let from = match sub_matches.get_one::<String>("from") {
                Some(f) => f.to_string(),
                None => {
                    let registry = FormatRegistry::default();
                    match registry.detect_format_from_filename(input) {
                        Some(detected) => detected,
                        None => {
                            eprintln!("Error: Could not detect format from filename '{input}'");
                            eprintln!("Please specify --from explicitly");
                            std::process::exit(1);
                        }
                    }
                }
            };

            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(input, &from, to, output, &extra_params, &config);
        }
        Some(("css", _)) => {
            print!("{}", texdown_babel::formats::get_default_css());
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Install env_logger; `RUST_LOG` wins over the configured level.
fn init_logging(config: &TexdownConfig) {
    let env = env_logger::Env::default().default_filter_or(config.logging.level.as_str());
    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .init();
}

/// Handle the inspect command
fn handle_inspect_command(
    path: &str,
    transform: &str,
    extra_params: &HashMap<String, String>,
    config: &TexdownConfig,
) {
    let source = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    });

    let mut params = config.convert.parse_options();
    params.extend(extra_params.iter().map(|(k, v)| (k.clone(), v.clone())));

    let output = transforms::execute_transform(&source, transform, &params).unwrap_or_else(|e| {
        eprintln!("Execution error: {e}");
        std::process::exit(1);
    });

    println!("{output}");
}

/// Handle the convert command
fn handle_convert_command(
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    extra_params: &HashMap<String, String>,
    config: &TexdownConfig,
) {
    let registry = FormatRegistry::default();

    // Validate formats exist
    for name in [from, to] {
        if let Err(e) = registry.get(name) {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }

    let source = fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    });

    let parse_options = if from == "markdown" {
        config.convert.parse_options()
    } else {
        HashMap::new()
    };
    let doc = registry
        .parse_with_options(&source, from, &parse_options)
        .unwrap_or_else(|e| {
            eprintln!("Parse error: {e}");
            std::process::exit(1);
        });
    debug!("parsed '{input}' into {} blocks", doc.blocks.len());

    // Configured options first, then any remaining --extra-* parameters
    let mut format_options = config.convert.serialize_options(to);
    for (key, value) in extra_params {
        format_options.insert(key.clone(), value.clone());
    }

    let result = registry
        .serialize_with_options(&doc, to, &format_options)
        .unwrap_or_else(|e| {
            eprintln!("Serialization error: {e}");
            std::process::exit(1);
        });

    match (output, result) {
        (Some(path), data) => {
            fs::write(path, data.into_bytes()).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        (None, SerializedDocument::Text(text)) => {
            print!("{text}");
        }
        (None, SerializedDocument::Binary(_)) => {
            eprintln!("Binary formats (like PDF or DOCX) require an output file. Use -o <path>.");
            std::process::exit(1);
        }
    }
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    let registry = FormatRegistry::default();

    println!("Conversion formats:");
    for format_name in registry.list_formats() {
        let description = registry
            .get(&format_name)
            .map(|f| f.description().to_string())
            .unwrap_or_default();
        println!("  {format_name:<10} {description}");
    }

    println!("\nInspect transforms:");
    for transform_name in transforms::AVAILABLE_TRANSFORMS {
        println!("  {transform_name}");
    }
}

/// Layer the configuration files and fold config-level `--extra-*` overrides into it.
fn load_cli_config(
    explicit_path: Option<&str>,
    extra_params: &mut HashMap<String, String>,
) -> TexdownConfig {
    let loader = Loader::new().with_optional_file(LOCAL_CONFIG_FILE);
    let loader = match explicit_path {
        Some(path) => loader.with_file(path),
        None => loader,
    };

    apply_config_overrides(loader, extra_params)
        .and_then(Loader::build)
        .unwrap_or_else(|err| {
            eprintln!("Failed to load configuration: {err}");
            std::process::exit(1);
        })
}

fn apply_config_overrides(
    mut loader: Loader,
    extra_params: &mut HashMap<String, String>,
) -> Result<Loader, ConfigError> {
    if let Some(raw) = take_override(extra_params, &["theme"]) {
        loader = loader.set_override("convert.html.theme", raw.to_ascii_lowercase())?;
    }
    if let Some(path) = take_override(extra_params, &["css", "css-path"]) {
        loader = loader.set_override("convert.html.custom_css", path)?;
    }
    if let Some(raw) = take_override(extra_params, &["size"]) {
        let size = raw.to_ascii_lowercase();
        loader = loader
            .set_override("convert.pdf.size", size.clone())?
            .set_override("convert.docx.size", size)?;
    }
    if let Some(raw) = take_override(extra_params, &["latex"]) {
        loader = loader.set_override("convert.latex", parse_bool_arg("latex", &raw))?;
    }
    if let Some(level) = take_override(extra_params, &["log-level"]) {
        loader = loader.set_override("logging.level", level)?;
    }
    Ok(loader)
}

fn take_override(map: &mut HashMap<String, String>, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(value) = map.remove(*key) {
            return Some(value);
        }
    }
    None
}

fn parse_bool_arg(flag: &str, raw: &str) -> bool {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => true,
        "false" | "0" | "no" | "n" => false,
        other => {
            eprintln!("Invalid boolean value '{other}' for --extra-{flag}");
            std::process::exit(1);
        }
    }
}
