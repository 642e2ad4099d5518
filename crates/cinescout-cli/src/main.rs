use std::sync::Arc;

use anyhow::{Context, Result};
use cinescout_client::{Config, MovieService, RemoteClient};
use clap::Parser;

mod commands;
mod tui;

#[derive(Debug, Parser)]
#[command(name = "cinescout", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Address of the recommendation service (default: http://127.0.0.1:8000)
    #[arg(long, global = true)]
    base_url: Option<String>,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Run the interactive movie finder (the default)
    ///
    /// Walks through five steps (genres, mood, era, language and optional
    /// notes), submits the answers to the recommendation service and shows
    /// the matches as cards. Selecting a card asks the service for an AI
    /// introduction to that film.
    Wizard,
    /// List the genres the service offers
    Genres,
    /// List the languages the service offers
    Languages,
    /// Ask for recommendations without the wizard
    Recommend {
        /// A genre to include (repeat for several)
        #[arg(long = "genre", required = true)]
        genres: Vec<String>,
        /// Preferred mood (e.g. dark, romantic)
        #[arg(long)]
        mood: String,
        /// Era id (e.g. golden, streaming, any)
        #[arg(long)]
        era: String,
        /// Language code (e.g. en, fr)
        #[arg(long)]
        language: String,
        /// Free-form notes for the recommender
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Print the AI introduction for one movie
    Describe {
        #[arg(long)]
        title: String,
        #[arg(long)]
        year: i32,
        /// Movie id, when the service supplied one
        #[arg(long)]
        id: Option<String>,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigAction {
    /// Show the current effective configuration
    Show,
    /// Get a config value (or print the whole config file)
    Get {
        /// Config key (base_url, image_base_url, min_loading_ms)
        key: Option<String>,
    },
    /// Set a config value in the config file
    Set { key: String, value: String },
    /// Show the config file path
    Path,
    /// Print an example config file
    Example,
    /// Create the config file with defaults
    Init,
}

/// Install the logger. The wizard owns the terminal, so it only logs when
/// `[logging]` is configured.
fn init_logging(opts: Option<twyg::Opts>, interactive: bool) -> Result<()> {
    let opts = match opts {
        Some(opts) => opts,
        None if interactive => return Ok(()),
        None => twyg::Opts::default(),
    };
    twyg::setup(opts)
        .map(|_| ())
        .map_err(|e| anyhow::anyhow!("Failed to set up logging: {:?}", e))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Wizard);

    let mut config = Config::load()?;
    if let Some(base_url) = cli.base_url {
        config = config.with_base_url(base_url);
    }

    init_logging(config.logging.clone(), matches!(command, Commands::Wizard))?;

    if let Commands::Config { action } = command {
        return match action {
            ConfigAction::Show => commands::config::show_config(&config),
            ConfigAction::Get { key } => commands::config::get_config(&config, key),
            ConfigAction::Set { key, value } => commands::config::set_config(&key, &value),
            ConfigAction::Path => commands::config::show_path(),
            ConfigAction::Example => commands::config::show_example(),
            ConfigAction::Init => commands::config::init_config(),
        };
    }

    let client = RemoteClient::from_config(&config).context("Failed to create HTTP client")?;
    let service: Arc<dyn MovieService> = Arc::new(client);

    match command {
        Commands::Wizard => tui::run_tui(service, &config)?,
        Commands::Genres => commands::list_genres(service.as_ref()).await?,
        Commands::Languages => commands::list_languages(service.as_ref()).await?,
        Commands::Recommend {
            genres,
            mood,
            era,
            language,
            notes,
        } => {
            let record = commands::recommend::preferences(&genres, mood, era, language, notes);
            commands::run_recommend(service.as_ref(), &record, &config.image_base_url).await?;
        }
        Commands::Describe { title, year, id } => {
            commands::run_describe(service.as_ref(), title, year, id).await?;
        }
        Commands::Config { .. } => {}
    }

    Ok(())
}
