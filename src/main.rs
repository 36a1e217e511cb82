//! layout-explorer: interactive explorer for content build layouts
//!
//! Shows the groups, bundles and assets of a build as sortable, searchable
//! trees, in a terminal UI or as plain reports.

#![allow(clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use layout_explorer::{
    cli::{self, TreeOptions, exit_codes},
    config::{AppConfig, Validatable, generate_full_example_config, generate_json_schema},
    reports::ReportFormat,
    views::ViewKind,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build long version string with view info
const fn build_long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\n\nViews:",
        "\n  bundles, groups, assets",
        "\n\nOutput Formats:",
        "\n  table, json"
    )
}

#[derive(Parser)]
#[command(name = "layout-explorer")]
#[command(version, long_version = build_long_version())]
#[command(about = "Explore the groups, bundles and assets of a build layout", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    1  No rows matched --search
    3  Error occurred

EXAMPLES:
    # Browse a layout interactively
    layout-explorer view buildlayout.json

    # Largest assets first, as JSON
    layout-explorer tree buildlayout.json --view assets -o json

    # Find every row mentioning a texture
    layout-explorer tree buildlayout.json --view assets --search texture")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `view` subcommand
#[derive(Parser)]
struct ViewArgs {
    /// Path to the build layout JSON file
    layout: PathBuf,

    /// View to open first
    #[arg(long, value_enum)]
    view: Option<ViewKind>,
}

/// Arguments for the `tree` subcommand
#[derive(Parser)]
struct TreeArgs {
    /// Path to the build layout JSON file
    layout: PathBuf,

    /// View to print
    #[arg(long, value_enum, default_value_t = ViewKind::Bundles)]
    view: ViewKind,

    /// Column to sort by (0 is the name column)
    #[arg(long)]
    sort_column: Option<usize>,

    /// Sort descending
    #[arg(long, conflicts_with = "ascending")]
    descending: bool,

    /// Sort ascending
    #[arg(long)]
    ascending: bool,

    /// Expand every node before printing
    #[arg(long)]
    expand_all: bool,

    /// Print the nodes whose name contains QUERY instead of the tree
    #[arg(long, value_name = "QUERY")]
    search: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    output: Option<ReportFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse a build layout in the terminal UI
    View(ViewArgs),

    /// Print the rows of one view
    Tree(TreeArgs),

    /// Print one status line per view
    Summary {
        /// Path to the build layout JSON file
        layout: PathBuf,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Print the JSON Schema of the config file
    ConfigSchema {
        /// Write the schema to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write an example `.layout-explorer.yaml` to the current directory
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn init_tracing(verbose: bool, interactive: bool) {
    let log_level = if verbose {
        "debug"
    } else if interactive {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();
}

/// Config file merged with the global flags.
fn load_config(cli: &Cli) -> Result<AppConfig> {
    let overrides = AppConfig::builder().no_color(cli.no_color).build();
    let (config, loaded_from) = AppConfig::from_file_with_overrides(cli.config.as_deref(), &overrides);
    if let Some(path) = &loaded_from {
        tracing::debug!("Using config from {}", path.display());
    }
    let errors = config.validate();
    if !errors.is_empty() {
        let details: Vec<String> = errors.iter().map(ToString::to_string).collect();
        anyhow::bail!("Invalid configuration:\n  {}", details.join("\n  "));
    }
    Ok(config)
}

fn run(cli: Cli) -> Result<i32> {
    match &cli.command {
        Commands::View(args) => {
            let mut config = load_config(&cli)?;
            if let Some(view) = args.view {
                config.views.default_view = view;
            }
            cli::run_view(&args.layout, &config)
        }

        Commands::Tree(args) => {
            let config = load_config(&cli)?;
            let ascending = match (args.ascending, args.descending) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            let options = TreeOptions {
                layout_path: args.layout.clone(),
                view: args.view,
                sort_column: args.sort_column,
                ascending,
                expand_all: args.expand_all,
                search: args.search.clone(),
                format: args.output.unwrap_or(config.output.format),
                output_file: args.output_file.clone(),
            };
            cli::run_tree(&options, &config)
        }

        Commands::Summary { layout } => {
            let config = load_config(&cli)?;
            cli::run_summary(layout, &config)
        }

        Commands::Completions { shell } => {
            generate(*shell, &mut Cli::command(), "layout-explorer", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }

        Commands::ConfigSchema { output } => {
            let schema = generate_json_schema();
            match output {
                Some(path) => {
                    std::fs::write(path, &schema)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => println!("{schema}"),
            }
            Ok(exit_codes::SUCCESS)
        }

        Commands::InitConfig { force } => {
            let path = PathBuf::from(".layout-explorer.yaml");
            if path.exists() && !force {
                anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
            }
            std::fs::write(&path, generate_full_example_config())
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Config written to {}", path.display());
            Ok(exit_codes::SUCCESS)
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, matches!(cli.command, Commands::View(_)));

    let code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            exit_codes::ERROR
        }
    };
    std::process::exit(code);
}
