//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{analyze, menu_cmd, place, tui};
use crate::storage::Config;

#[derive(Parser)]
#[command(name = "menu-order")]
#[command(author, version, about = "Order from the menu and see which products are most liked")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Order log file (overrides the configured path)
    #[arg(long, global = true, env = "MENU_ORDER_LOG")]
    pub log: Option<PathBuf>,

    /// Configuration file to use instead of the default lookup
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the menu
    Menu,

    /// Build an order interactively
    Order {
        /// Customer name (prompted for if omitted)
        #[arg(long, short)]
        customer: Option<String>,
    },

    /// Build and save an order without interaction
    Place {
        /// Customer name
        #[arg(long, short)]
        customer: String,

        /// Items as ID[:QTY], e.g. cheese-pizza:2 water
        #[arg(required = true)]
        items: Vec<String>,
    },

    /// Rank products by how often they were ordered
    Analyze {
        /// Keep running and re-rank whenever the order log changes
        #[arg(long, short)]
        watch: bool,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    output.verbose("menu-order starting");

    let config = Config::load(cli.config.as_deref())?.with_log_path(cli.log);
    match &config.source {
        Some(path) => output.verbose_ctx("config", &format!("Loaded {}", path.display())),
        None => output.verbose_ctx("config", "Using default configuration"),
    }
    output.verbose_ctx("config", &format!("Order log: {}", config.log_path.display()));

    match cli.command {
        Commands::Menu => menu_cmd::run(&output)?,

        Commands::Order { customer } => {
            output.verbose_ctx("order", &format!("Starting interactive order, customer: {:?}", customer));
            tui::run(&output, &config, customer.as_deref())?
        }

        Commands::Place { customer, items } => {
            output.verbose_ctx("place", &format!("Placing order for {} with {} item spec(s)", customer, items.len()));
            place::run(&output, &config, &customer, &items)?
        }

        Commands::Analyze { watch } => {
            if watch {
                analyze::watch(&output, &config)?
            } else {
                analyze::once(&output, &config)?
            }
        }
    }

    output.verbose("Command completed successfully");
    Ok(())
}
