mod cli;

use std::io::{self, Write};
use std::path::Path;

use clap::Parser;
use cli::{Cli, Commands};
use colored::Colorize;
use secure_repo::finding::ResultKind;
use secure_repo::logger::ResultLogger;
use secure_repo::output::{self, OutputFormat};
use secure_repo::{audit, checks, config, github};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Audit {
            repos,
            format,
            output: output_path,
            fail_on,
            api_url,
            config: config_path,
        } => {
            let mut config = load_config(config_path.as_deref());
            if let Some(url) = api_url {
                config.api.base_url = url;
            }
            if fail_on.is_some() {
                config.fail_on = fail_on;
            }

            config::load_dotenv();
            let token = config::token_from_env().unwrap_or_else(|e| {
                eprintln!("Error: {e}");
                std::process::exit(2);
            });
            let api = github::Client::new(&token, &config.api).unwrap_or_else(|e| {
                eprintln!("Error: {e}");
                std::process::exit(2);
            });

            // Pretty output is streamed as findings are recorded; JSON is
            // rendered once the whole report is known.
            let sink: Box<dyn Write> = match (format, &output_path) {
                (OutputFormat::Json, _) => Box::new(io::sink()),
                (OutputFormat::Pretty, Some(path)) => {
                    Box::new(std::fs::File::create(path).unwrap_or_else(|e| {
                        eprintln!("Error writing output: {e}");
                        std::process::exit(2);
                    }))
                }
                (OutputFormat::Pretty, None) => Box::new(io::stdout()),
            };
            let mut logger = ResultLogger::new(sink);

            if let Err(e) = audit::run_audit(&api, &repos, &config, &mut logger) {
                eprintln!("Error: {e}");
                std::process::exit(2);
            }

            let formatted = output::format_report(logger.report(), format);
            let written = match (format, &output_path) {
                (OutputFormat::Pretty, _) => logger
                    .write_raw(&formatted)
                    .and_then(|()| logger.flush())
                    .map_err(|e| e.to_string()),
                (OutputFormat::Json, Some(path)) => {
                    std::fs::write(path, &formatted).map_err(|e| e.to_string())
                }
                (OutputFormat::Json, None) => {
                    println!("{formatted}");
                    Ok(())
                }
            };
            if let Err(e) = written {
                eprintln!("Error writing output: {e}");
                std::process::exit(2);
            }
            if let Some(path) = output_path {
                eprintln!("Output written to {}", path.display());
            }

            let worst = logger.report().worst_kind();
            let failed = config
                .fail_on
                .is_some_and(|threshold| worst.rank() >= threshold.rank());
            std::process::exit(if failed { 1 } else { 0 });
        }

        Commands::ListChecks {
            config: config_path,
        } => {
            let config = load_config(config_path.as_deref());

            println!("{}", "Checks".bold().underline());
            println!();

            for check in checks::all_checks() {
                let status = if config.is_check_enabled(check.name()) {
                    "ENABLED ".green().bold().to_string()
                } else {
                    "DISABLED".dimmed().to_string()
                };

                println!(
                    "  [{status}] {name:<24} {desc}",
                    name = check.name(),
                    desc = check.description(),
                );
            }

            println!();
            println!(
                "Glyphs: {} good  {} danger  {} warning  {} caution  {}info  {} unknown",
                ResultKind::Good.glyph(),
                ResultKind::Danger.glyph(),
                ResultKind::Warning.glyph(),
                ResultKind::Caution.glyph(),
                ResultKind::Info.glyph(),
                ResultKind::Unknown.glyph(),
            );
        }
    }
}

fn load_config(path: Option<&Path>) -> config::Config {
    config::Config::load(path).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(2);
    })
}

/// Diagnostics go to stderr so they never mix with the report on stdout.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "secure_repo=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
