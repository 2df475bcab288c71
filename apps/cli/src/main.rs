mod config;

use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::{bail, Context, Result};
use clap::Parser;
use client_core::{
    spawn_home, CatalogGateway, CatalogTransport, HomeState, HttpCatalogTransport,
    MissingCatalogTransport,
};
use futures::StreamExt;
use shared::domain::{DisplayMode, MenuEntry};
use tokio_stream::wrappers::WatchStream;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Drive the catalog home screen from the terminal")]
struct Args {
    /// Config file; missing files fall back to defaults.
    #[arg(long, default_value = "catalog.toml")]
    config: PathBuf,
    /// Menu entry to select (0 Now Playing .. 4 Genres).
    #[arg(long, default_value_t = 0)]
    menu_index: usize,
    /// Extra pages to load after the first.
    #[arg(long, default_value_t = 0)]
    pages: u32,
    /// Switch to grid mode after startup.
    #[arg(long)]
    grid: bool,
    /// How long to wait for each step to settle.
    #[arg(long, default_value_t = 1500)]
    wait_ms: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    let args = Args::parse();

    if MenuEntry::at(args.menu_index).is_none() {
        bail!(
            "--menu-index {} is out of range; expected 0..{}",
            args.menu_index,
            MenuEntry::ALL.len()
        );
    }

    let settings = config::load_settings(&args.config);
    let transport: Arc<dyn CatalogTransport> = if settings.api_key.is_some() {
        let http = HttpCatalogTransport::new(&settings.api_base_url, settings.api_key.clone())
            .with_context(|| format!("invalid api base url {}", settings.api_base_url))?;
        Arc::new(http)
    } else {
        warn!("no API key configured (TMDB_API_KEY); every fetch will fail and lists stay empty");
        Arc::new(MissingCatalogTransport)
    };

    let handle = spawn_home(CatalogGateway::new(transport), settings.home_settings());
    let mut updates = WatchStream::new(handle.subscribe());
    let printer = tokio::spawn(async move {
        while let Some(state) = updates.next().await {
            println!(
                "[{}] {} | page {} | {} movies | {} genres",
                state.swap_icon,
                state.nav_title,
                state.page,
                state.movies.len(),
                state.genres.len()
            );
        }
    });

    let wait = Duration::from_millis(args.wait_ms);
    handle.set_selected_index(args.menu_index);
    if args.grid {
        handle.set_mode(DisplayMode::Grid);
    }
    tokio::time::sleep(wait).await;

    for _ in 0..args.pages {
        info!("loading next page");
        handle.load_more();
        tokio::time::sleep(wait).await;
    }

    let last = handle.state();
    handle.shutdown().await;
    printer.abort();

    print_listing(&last);
    Ok(())
}

fn print_listing(state: &HomeState) {
    println!();
    println!("{} (page {})", state.nav_title, state.page);
    if state.selected_entry().is_genres() {
        for genre in &state.genres {
            println!("  {:>6}  {}", genre.id.0, genre.name);
        }
        return;
    }
    for movie in &state.movies {
        let year = movie
            .release_year()
            .map(|y| y.to_string())
            .unwrap_or_else(|| "----".into());
        println!(
            "  {:>8}  {year}  {:>4.1}  {}",
            movie.id.0, movie.vote_average, movie.title
        );
    }
}
