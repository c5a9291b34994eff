use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use postscribe::cli::Output;
use postscribe::cli::commands::{docs::DocsOptions, patch::PatchOptions};
use postscribe::ScribeError;
use postscribe::config::ConfigLoader;
use postscribe::verification::{Preset, StatusMarker};

#[derive(Parser)]
#[command(name = "postscribe")]
#[command(
    version,
    about = "Markdown API docs and verification logs from Postman collections"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Project config file (defaults to ./postscribe.toml)
    #[arg(long, short, global = true, env = "POSTSCRIBE_CONFIG")]
    config: Option<PathBuf>,

    #[arg(long, short, global = true, conflicts_with = "quiet")]
    verbose: bool,

    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the Markdown API reference
    Docs {
        #[arg(long, help = "Postman collection file")]
        collection: Option<PathBuf>,
        #[arg(long, short, help = "Output Markdown file")]
        output: Option<PathBuf>,
        #[arg(long, help = "Document title (defaults to the collection name)")]
        title: Option<String>,
        #[arg(long, help = "Print to stdout instead of writing a file")]
        stdout: bool,
    },

    /// Generate the endpoint verification log
    Log {
        #[arg(long, help = "Postman collection file")]
        collection: Option<PathBuf>,
        #[arg(long, short, help = "Output Markdown file")]
        output: Option<PathBuf>,
        #[arg(long, help = "Print to stdout instead of writing a file")]
        stdout: bool,
    },

    /// Update endpoint statuses in an existing verification log
    Patch {
        #[arg(long, help = "Verification log to patch")]
        log: Option<PathBuf>,
        #[arg(long, short, help = "Built-in rule set: auth, webhooks")]
        preset: Vec<Preset>,
        #[arg(long, short, help = "TOML file with [[rule]] entries")]
        rules: Option<PathBuf>,
        #[arg(long, help = "Single endpoint to patch, e.g. \"GET /users\"")]
        endpoint: Option<String>,
        #[arg(long, help = "Status for --endpoint: verified, in-progress, not-used, needs-fix, missing, review-needed")]
        status: Option<StatusMarker>,
        #[arg(long, requires = "endpoint", help = "Note shown after the status")]
        note: Option<String>,
        #[arg(long, help = "Report what would change without writing")]
        dry_run: bool,
    },

    /// Build a Postman collection from an endpoint catalog (TOML or YAML)
    Scaffold {
        catalog: PathBuf,
        #[arg(long, short, help = "Output collection file")]
        output: Option<PathBuf>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(
            short = 'f',
            long,
            default_value = "toml",
            help = "Output format: toml, json"
        )]
        format: String,
    },
    /// Show configuration file paths
    Path,
    /// Write a starter postscribe.toml
    Init {
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31mpostscribe encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }
        eprintln!();

        // Call default hook for backtrace (if RUST_BACKTRACE=1)
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let out = Output::new();
            out.error(&e.to_string());
            if e
                .downcast_ref::<ScribeError>()
                .is_some_and(ScribeError::is_missing_input)
            {
                out.info("Pass the path explicitly or set it in postscribe.toml (see `postscribe config show`)");
            }
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let out = Output::quiet(cli.quiet);
    let config = ConfigLoader::load_with(cli.config.as_deref())?;

    match cli.command {
        Commands::Docs {
            collection,
            output,
            title,
            stdout,
        } => {
            postscribe::cli::commands::docs::run(
                &config,
                DocsOptions {
                    collection,
                    output,
                    title,
                    stdout,
                },
                &out,
            )?;
        }
        Commands::Log {
            collection,
            output,
            stdout,
        } => {
            postscribe::cli::commands::log::run(&config, collection, output, stdout, &out)?;
        }
        Commands::Patch {
            log,
            preset,
            rules,
            endpoint,
            status,
            note,
            dry_run,
        } => {
            postscribe::cli::commands::patch::run(
                &config,
                PatchOptions {
                    log,
                    presets: preset,
                    rules,
                    endpoint,
                    status,
                    note,
                    dry_run,
                },
                &out,
            )?;
        }
        Commands::Scaffold { catalog, output } => {
            postscribe::cli::commands::scaffold::run(&config, &catalog, output, &out)?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { format } => {
                postscribe::cli::commands::config::show(&config, &format)?;
            }
            ConfigAction::Path => {
                postscribe::cli::commands::config::path()?;
            }
            ConfigAction::Init { force } => {
                postscribe::cli::commands::config::init(force, &out)?;
            }
        },
    }

    Ok(())
}
