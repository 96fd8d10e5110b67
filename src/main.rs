use clap::Parser;
use vitals::cli::{self, Cli};

#[tokio::main]
async fn main() {
    // Load .env if present so DATABASE_URL, ADDR, etc. are picked up
    let _ = dotenvy::dotenv();

    // Initialize configuration (this loads the config singleton)
    let config = vitals::config::config();
    vitals::logging::init(&config.logging);

    let cli = Cli::parse();

    if let Err(e) = cli::run(cli, config.clone()).await {
        match std::env::var("VITALS_VERBOSE").as_deref() {
            Ok("true") | Ok("1") => eprintln!("Error: {e:?}"),
            _ => eprintln!("Error: {e:#}"),
        }
        std::process::exit(1);
    }
}
