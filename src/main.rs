use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use console::Emoji;
use flexi_logger::Logger;

use showcast::present::{EXCERPT_WORDS, excerpt, format_duration, format_published};
use showcast::{
    CatalogClient, CredentialSource, Credentials, EnvCredentials, EpisodeRecord, ProviderConfig,
    RenderCache, ReqwestClient, StaticCredentials,
};

// Emoji with fallback for terminals without Unicode support
static MICROPHONE: Emoji<'_, '_> = Emoji("🎙️  ", "");
static CALENDAR: Emoji<'_, '_> = Emoji("📅 ", "");
static HEADPHONES: Emoji<'_, '_> = Emoji("🎧 ", "[>] ");
static PICTURE: Emoji<'_, '_> = Emoji("🖼️  ", "[img] ");
static EMPTY: Emoji<'_, '_> = Emoji("📭 ", "[ ] ");
static FAILURE: Emoji<'_, '_> = Emoji("❌ ", "[!] ");

/// Exit code for a missing episode
const EXIT_NOT_FOUND: i32 = 2;

/// Browse a podcast's episodes from its streaming provider catalog
#[derive(Parser, Debug)]
#[command(name = "showcast")]
#[command(about = "Browse a podcast's episodes from its streaming provider catalog")]
#[command(version)]
struct Args {
    /// Provider show id (defaults to SPOTIFY_SHOW_ID or the built-in show)
    #[arg(long, global = true)]
    show_id: Option<String>,

    /// Client id (defaults to SPOTIFY_ID)
    #[arg(long, global = true, requires = "client_secret")]
    client_id: Option<String>,

    /// Client secret (defaults to SPOTIFY_SECRET)
    #[arg(long, global = true, requires = "client_id")]
    client_secret: Option<String>,

    /// Print normalized records as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the show's episodes
    List,
    /// Show one episode's notes
    Show {
        /// Episode id
        id: String,
    },
}

fn print_entry(episode: &EpisodeRecord) {
    let date = episode
        .published_on()
        .map(format_published)
        .unwrap_or_else(|| episode.published.clone());

    println!("{CALENDAR}{}", date.dimmed());
    println!("  {}", episode.title.bold());
    println!("  {}", excerpt(&episode.description, EXCERPT_WORDS));
    println!(
        "  {HEADPHONES}{} {} {}\n",
        format_duration(episode.duration_ms).cyan(),
        "/".dimmed(),
        episode.id.yellow()
    );
}

fn print_detail(episode: &EpisodeRecord) {
    let date = episode
        .published_on()
        .map(format_published)
        .unwrap_or_else(|| episode.published.clone());

    println!("{}", episode.title.bold().green());
    println!("{CALENDAR}{}  {}", date.dimmed(), format_duration(episode.duration_ms).cyan());
    println!("\n{}\n", episode.description);

    if let Some(artwork) = &episode.artwork_url {
        println!("{PICTURE}{}", artwork.cyan());
    }

    match episode.embed_url(false) {
        Some(embed) => println!("{HEADPHONES}{} {}", "Embedded player:".bold(), embed.cyan()),
        None => println!(
            "{HEADPHONES}{} {} ({})",
            "Audio:".bold(),
            episode.audio.src.cyan(),
            episode.audio.mime_or_kind()
        ),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    let _logger = Logger::try_with_env_or_str(level)
        .context("Invalid log specification")?
        .start()
        .context("Failed to start logger")?;

    let mut config = ProviderConfig::from_env();
    if let Some(show_id) = args.show_id {
        config.show_id = show_id;
    }

    let credentials: Arc<dyn CredentialSource> = match (args.client_id, args.client_secret) {
        (Some(client_id), Some(client_secret)) => Arc::new(StaticCredentials(Credentials {
            client_id,
            client_secret,
        })),
        _ => Arc::new(EnvCredentials),
    };

    let catalog = CatalogClient::new(ReqwestClient::new(), config, credentials);
    let cache = RenderCache::new(&catalog);

    match args.command {
        Command::List => {
            let episodes = cache.list_episodes().await;

            if args.json {
                println!("{}", serde_json::to_string_pretty(episodes)?);
                return Ok(());
            }

            println!(
                "\n{}{} {}\n",
                MICROPHONE,
                "showcast".bold().magenta(),
                format!("- {} episodes", episodes.len()).dimmed()
            );

            if episodes.is_empty() {
                println!("{EMPTY}{}", "No episodes available right now.".yellow());
            }
            for episode in episodes {
                print_entry(episode);
            }
        }

        Command::Show { id } => {
            let episode = cache.resolve_episode(&id).await;

            let Some(episode) = episode else {
                eprintln!("{FAILURE}{} {}", "Episode not found:".red().bold(), id.yellow());
                std::process::exit(EXIT_NOT_FOUND);
            };

            if args.json {
                println!("{}", serde_json::to_string_pretty(&episode)?);
            } else {
                print_detail(&episode);
            }
        }
    }

    Ok(())
}
