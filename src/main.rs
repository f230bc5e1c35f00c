use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use stackgen::logging::{init_logging, level_for};
use stackgen::{
    Bundle, GeneratorConfig, Result, StackgenError, check_bundle, generate, parse_binding,
    plan_outputs,
};

const LONG_HELP: &str = r#"
Placeholders:
  <REPLACE_DB_USER>        PostgreSQL username
  <REPLACE_DB_PASSWORD>    PostgreSQL password
  <REPLACE_DB_HOST>        PostgreSQL host (IP or DNS)
  <REPLACE_DB_NAME>        PostgreSQL database name
  <YOUR_JIRA_WEBHOOK_URL>  Jira webhook URL for Alertmanager

Examples:
  # Generate the monitoring stack with example values
  stackgen
  # Generate with real values into a chosen directory
  stackgen -o /srv/monitoring -s '<REPLACE_DB_HOST>=db.internal' -s '<REPLACE_DB_NAME>=metrics'
  # Start from a clean directory and fail on unbound or unused placeholders
  stackgen --clean --strict
  # List placeholders and their prompts
  stackgen --list
  # List with values and the files that use them
  stackgen --list=detailed
  # Output as JSON for scripting
  stackgen --list=json
  # Show what would be written
  stackgen --dry-run
  # Use your own bundle definition
  stackgen --manifest bundle.json
"#;

/// Parameterized monitoring stack bundle generator.
#[derive(Parser, Debug)]
#[command(
    name = "stackgen",
    version,
    about = "Generate a parameterized monitoring stack bundle.",
    after_long_help = LONG_HELP
)]
struct Cli {
    /// Bundle manifest (JSON). Defaults to the built-in monitoring stack.
    #[arg(short, long, value_name = "FILE")]
    manifest: Option<PathBuf>,

    /// Directory the bundle is written to (defaults to the bundle name)
    #[arg(short, long, value_name = "DIR", env = "STACKGEN_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Zip archive path (defaults to <output-dir>.zip)
    #[arg(short, long, value_name = "FILE", env = "STACKGEN_ARCHIVE")]
    archive: Option<PathBuf>,

    /// Skip creating the zip archive
    #[arg(long)]
    no_archive: bool,

    /// Override a placeholder value (repeatable)
    #[arg(short, long = "set", value_name = "TOKEN=VALUE", action = clap::ArgAction::Append)]
    set: Vec<String>,

    /// Remove the output directory before writing
    #[arg(long)]
    clean: bool,

    /// Fail if templates use unbound placeholders or bindings go unused
    #[arg(long)]
    strict: bool,

    /// List placeholders (optionally with format: plain, detailed, json)
    #[arg(long, value_name = "FORMAT", num_args = 0..=1, default_missing_value = "plain", conflicts_with = "dry_run")]
    list: Option<ListFormat>,

    /// Show the files that would be written without touching the filesystem
    #[arg(long, conflicts_with = "list")]
    dry_run: bool,

    /// Increase verbosity (can be used multiple times)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq)]
enum ListFormat {
    /// Token and prompt per line
    Plain,
    /// Token, value, prompt and the templates using it
    Detailed,
    /// JSON output for scripting
    Json,
}

#[derive(Serialize)]
struct PlaceholderInfo<'a> {
    token: &'a str,
    value: &'a str,
    prompt: &'a str,
    used_in: Vec<&'a str>,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(level_for(cli.quiet, cli.verbose)) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let config = match build_config(&cli) {
        Ok(c) => c,
        Err(e @ StackgenError::InvalidBinding { .. }) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let result = if let Some(list_format) = cli.list {
        list_placeholders(&config.bundle, list_format)
    } else if cli.dry_run {
        dry_run(&config)
    } else {
        run(&config, cli.quiet)
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn build_config(cli: &Cli) -> Result<GeneratorConfig> {
    let bundle = match &cli.manifest {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading bundle manifest");
            Bundle::load(path)?
        }
        None => Bundle::monitoring_stack(),
    };

    let overrides = cli
        .set
        .iter()
        .map(|binding| parse_binding(binding))
        .collect::<Result<Vec<_>>>()?;
    let bundle = bundle.with_values(overrides);

    let mut config = GeneratorConfig::new(bundle);
    if let Some(dir) = &cli.output_dir {
        config.output_root = dir.clone();
    }
    config.archive_path = cli.archive.clone();
    config.create_archive = !cli.no_archive;
    config.clean = cli.clean;
    config.strict = cli.strict;
    Ok(config)
}

fn run(config: &GeneratorConfig, quiet: bool) -> Result<()> {
    let report = generate(config)?;

    if !quiet {
        println!(
            "Wrote {} files to {}",
            report.files.len() + 1,
            report.output_root.display()
        );
        println!("  Guidance: {}", report.guidance.display());
        if let Some(archive) = &report.archive_path {
            println!(
                "  Archive:  {} ({} entries)",
                archive.display(),
                report.archived.len()
            );
        }
    }

    Ok(())
}

fn dry_run(config: &GeneratorConfig) -> Result<()> {
    tracing::info!("performing dry run, nothing will be written");

    let bundle = &config.bundle;
    let root = &config.output_root;

    println!("Output directory: {}", root.display());
    let mut invalid_count = 0;
    for (relative, resolved) in plan_outputs(bundle, root) {
        match resolved {
            Ok(path) => println!("  ✓ {}", path.display()),
            Err(e) => {
                println!("  ✗ {relative} -> {e}");
                invalid_count += 1;
            }
        }
    }
    if config.create_archive {
        println!("Archive: {}", config.resolved_archive_path()?.display());
    }

    let report = check_bundle(bundle)?;
    let findings = report.findings();

    println!(
        "\nSummary: {} templates, {} placeholders",
        bundle.templates.len(),
        bundle.placeholders.len()
    );
    if invalid_count > 0 {
        println!("  ✗ {invalid_count} invalid output paths");
    }
    if findings.is_empty() {
        println!("  ✓ all placeholders bound and used");
    } else {
        for finding in &findings {
            println!("  ✗ {finding}");
        }
    }

    if invalid_count > 0 || !findings.is_empty() {
        std::process::exit(1);
    }

    Ok(())
}

fn list_placeholders(bundle: &Bundle, format: ListFormat) -> Result<()> {
    match format {
        ListFormat::Plain => {
            for placeholder in &bundle.placeholders {
                println!("{}: {}", placeholder.token, placeholder.prompt);
            }
        }
        ListFormat::Detailed => {
            for placeholder in &bundle.placeholders {
                println!("Placeholder: {}", placeholder.token);
                println!("  Prompt: {}", placeholder.prompt);
                println!("  Value: {}", placeholder.value);
                let used_in = templates_using(bundle, &placeholder.token);
                if used_in.is_empty() {
                    println!("  Used in: (none)");
                } else {
                    println!("  Used in: {}", used_in.join(", "));
                }
                println!();
            }
        }
        ListFormat::Json => {
            let infos: Vec<PlaceholderInfo> = bundle
                .placeholders
                .iter()
                .map(|p| PlaceholderInfo {
                    token: &p.token,
                    value: &p.value,
                    prompt: &p.prompt,
                    used_in: templates_using(bundle, &p.token),
                })
                .collect();

            let json = serde_json::to_string_pretty(&infos)?;
            println!("{json}");
        }
    }

    Ok(())
}

fn templates_using<'a>(bundle: &'a Bundle, token: &str) -> Vec<&'a str> {
    bundle
        .templates
        .iter()
        .filter(|t| t.content.contains(token))
        .map(|t| t.path.as_str())
        .collect()
}
