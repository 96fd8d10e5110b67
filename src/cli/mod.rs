pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "vitals")]
#[command(about = "Vitals - personal health-metrics dashboard and logging API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the dashboard server (default)")]
    Serve {
        #[arg(long, help = "Main listen address, e.g. 0.0.0.0:8181 or :8181")]
        addr: Option<String>,
        #[arg(long, help = "Optional API-only listen address")]
        api_addr: Option<String>,
    },

    #[command(about = "Print the projected milestone and goal dates")]
    Goals,

    #[command(about = "Print one day's summary")]
    Day {
        #[arg(long, help = "Date as YYYY-MM-DD (defaults to today)")]
        date: Option<String>,
    },

    #[command(about = "Check database connectivity")]
    Health,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    let command = cli.command.unwrap_or(Commands::Serve {
        addr: None,
        api_addr: None,
    });

    match command {
        Commands::Serve { addr, api_addr } => commands::serve::handle(config, addr, api_addr).await,
        Commands::Goals => commands::report::goals(&config, output_format).await,
        Commands::Day { date } => commands::report::day(&config, date.as_deref(), output_format).await,
        Commands::Health => commands::report::health(&config, output_format).await,
    }
}
