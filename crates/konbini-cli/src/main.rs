mod output;
mod search;

use clap::{Parser, Subcommand};

use konbini_gemini::GeminiClient;

#[derive(Debug, Parser)]
#[command(name = "konbini")]
#[command(about = "Gemini-grounded franchise store finder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search for stores around coordinates, an address, or the default center.
    Search(search::SearchArgs),
    /// Resolve a free-text place description to coordinates.
    Geocode {
        /// Place description, e.g. "Tokyo Tower".
        query: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = konbini_core::load_app_config_from_env()?;
    let gemini = match config.gemini_base_url.as_deref() {
        Some(base_url) => GeminiClient::with_base_url(
            &config.gemini_api_key,
            &config.gemini_model,
            config.request_timeout_secs,
            base_url,
        )?,
        None => GeminiClient::new(
            &config.gemini_api_key,
            &config.gemini_model,
            config.request_timeout_secs,
        )?,
    };

    match cli.command {
        Commands::Search(args) => search::run(&config, &gemini, &args).await,
        Commands::Geocode { query } => match gemini.geocode(&query).await? {
            Some(coords) => {
                println!("{coords}");
                Ok(())
            }
            None => anyhow::bail!("could not resolve \"{query}\" to coordinates"),
        },
    }
}
