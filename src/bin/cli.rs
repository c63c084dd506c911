// CatMusic - music search and download for the desktop
// Copyright (C) 2025 CatMusic contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.


use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};

use catmusic_core::download::{BatchDownloadCoordinator, DownloadService, DownloadTask};
use catmusic_core::search::{SearchQuery, SearchService, Track};
use catmusic_core::storage::{Database, SettingsStore};

#[derive(Parser)]
#[command(name = "catmusic-cli")]
#[command(about = "CatMusic CLI - search and download music from the terminal", long_about = None)]
struct Cli {
    /// Settings database file
    #[arg(long, global = true, default_value = "catmusic.db")]
    database: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for tracks and list the ones with live download links
    Search {
        /// Keyword to search for
        keyword: String,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search, then download results into the saved directory
    Download {
        /// Keyword to search for
        keyword: String,
        /// Result numbers to download (1-based); omit to download everything
        #[arg(short, long)]
        tracks: Vec<usize>,
        /// Download into this directory instead of the saved one
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },
    /// Print the saved download directory
    GetDir,
    /// Save the download directory
    SetDir {
        /// Directory downloads should land in
        dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so progress output on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let Cli { database, command } = Cli::parse();

    match command {
        Commands::Search { keyword, json } => run_search(&keyword, json).await,
        Commands::Download { keyword, tracks, dir } => {
            run_download(&database, &keyword, &tracks, dir).await
        }
        Commands::GetDir => run_get_dir(&database).await,
        Commands::SetDir { dir } => run_set_dir(&database, &dir).await,
    }
}

async fn run_search(keyword: &str, json: bool) -> anyhow::Result<()> {
    let tracks = search(keyword).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&tracks)?);
        return Ok(());
    }

    if tracks.is_empty() {
        println!("No results for '{keyword}'.");
        return Ok(());
    }
    for (i, track) in tracks.iter().enumerate() {
        println!("{:>3}. {} - {}", i + 1, track.title, track.author);
    }
    Ok(())
}

async fn run_download(
    database: &Path,
    keyword: &str,
    selection: &[usize],
    dir_override: Option<PathBuf>,
) -> anyhow::Result<()> {
    let tracks = search(keyword).await?;
    if tracks.is_empty() {
        println!("No results for '{keyword}', nothing to download.");
        return Ok(());
    }

    let picked = pick(&tracks, selection)?;
    let dir = match dir_override {
        Some(dir) => dir,
        None => open_settings(database).await?.download_dir().await?,
    };

    let tasks: Vec<DownloadTask> =
        picked.iter().map(|t| DownloadTask::for_track(t, &dir)).collect();
    println!("Downloading {} track(s) to {}", tasks.len(), dir.display());

    let coordinator = BatchDownloadCoordinator::new(DownloadService::new()?);
    let result = coordinator
        .run_batch(&tasks, |percent| {
            print!("\r{percent:>3}%");
            let _ = std::io::stdout().flush();
        })
        .await;
    println!();

    println!("Done: {} succeeded, {} failed", result.success_count, result.failure_count);
    if result.success_count == 0 {
        anyhow::bail!("every download failed");
    }
    Ok(())
}

async fn run_get_dir(database: &Path) -> anyhow::Result<()> {
    let settings = open_settings(database).await?;
    println!("{}", settings.download_dir().await?.display());
    Ok(())
}

async fn run_set_dir(database: &Path, dir: &Path) -> anyhow::Result<()> {
    let settings = open_settings(database).await?;
    settings.set_download_dir(dir).await?;
    println!("Download directory saved: {}", dir.display());
    Ok(())
}

async fn search(keyword: &str) -> anyhow::Result<Vec<Track>> {
    let service = SearchService::new()?;
    let query = SearchQuery::new(keyword)?;
    service
        .search(&query)
        .await
        .with_context(|| format!("search for '{keyword}' failed"))
}

/// Resolve 1-based result numbers; an empty selection means everything
fn pick<'a>(tracks: &'a [Track], selection: &[usize]) -> anyhow::Result<Vec<&'a Track>> {
    if selection.is_empty() {
        return Ok(tracks.iter().collect());
    }
    selection
        .iter()
        .map(|&n| {
            tracks
                .get(n.checked_sub(1).context("result numbers start at 1")?)
                .with_context(|| format!("no result #{n} (search returned {})", tracks.len()))
        })
        .collect()
}

async fn open_settings(database: &Path) -> anyhow::Result<SettingsStore> {
    let db = Database::new(database)
        .await
        .with_context(|| format!("failed to open settings database {}", database.display()))?;
    Ok(SettingsStore::new(&db))
}
