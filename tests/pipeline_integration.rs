//! Integration tests for the search/download pipeline
//!
//! The two live tests talk to the real musicjx.com service and download real
//! audio, so they are ignored by default and meant for manual runs. The
//! settings test only touches a temporary database file and always runs.

use catmusic_core::download::{BatchDownloadCoordinator, DownloadService, DownloadTask};
use catmusic_core::search::{SearchQuery, SearchService};
use catmusic_core::storage::{Database, SettingsStore};

#[tokio::test]
#[ignore] // Run with: cargo test --test pipeline_integration -- --ignored --nocapture
async fn test_live_search_returns_playable_tracks() -> Result<(), Box<dyn std::error::Error>> {
    println!("\n=== Live search against musicjx.com ===\n");

    println!("1. Searching for a common keyword...");
    let service = SearchService::new()?;
    let query = SearchQuery::new("晴天")?;
    let tracks = service.search(&query).await.ok_or("search failed")?;
    println!("   ✓ Search returned {} validated track(s)", tracks.len());

    // A popular keyword should survive validation with at least one track;
    // an empty list here usually means the upstream changed its envelope.
    assert!(!tracks.is_empty(), "expected at least one validated track");

    for (i, track) in tracks.iter().take(5).enumerate() {
        println!("   {}. {} - {}", i + 1, track.title, track.author);
        assert!(!track.url.is_empty(), "validated track has an empty url");
    }

    Ok(())
}

#[tokio::test]
#[ignore] // Run with: cargo test --test pipeline_integration -- --ignored --nocapture
async fn test_live_search_then_batch_download() -> Result<(), Box<dyn std::error::Error>> {
    println!("\n=== Live search + single-track batch download ===\n");

    println!("1. Searching...");
    let service = SearchService::new()?;
    let query = SearchQuery::new("晴天")?;
    let tracks = service.search(&query).await.ok_or("search failed")?;
    assert!(!tracks.is_empty(), "nothing to download");
    println!("   ✓ {} track(s) found", tracks.len());

    println!("\n2. Downloading the first track...");
    let temp_dir = tempfile::tempdir()?;
    let tasks = vec![DownloadTask::for_track(&tracks[0], temp_dir.path())];

    let coordinator = BatchDownloadCoordinator::new(DownloadService::new()?);
    let mut progress = Vec::new();
    let result = coordinator.run_batch(&tasks, |p| progress.push(p)).await;

    println!("   ✓ Batch done: {} ok, {} failed", result.success_count, result.failure_count);
    assert_eq!(result.total(), 1);
    assert_eq!(progress, vec![100]);

    if result.success_count == 1 {
        let file = tasks[0].target_path();
        let bytes = std::fs::read(&file)?;
        println!("   ✓ Wrote {} bytes to {:?}", bytes.len(), file);
        assert!(!bytes.is_empty(), "downloaded file is empty");
    }

    Ok(())
}

#[tokio::test]
async fn test_download_dir_survives_reopening_the_database() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = tempfile::tempdir()?;
    let db_path = temp_dir.path().join("catmusic.db");

    // First run: user picks a directory
    {
        let db = Database::new(&db_path).await?;
        let settings = SettingsStore::new(&db);
        settings.set_download_dir("/srv/music").await?;
        db.close().await?;
    }

    // Second run: the choice is still there
    let db = Database::new(&db_path).await?;
    let settings = SettingsStore::new(&db);
    assert_eq!(
        settings.download_dir().await?,
        std::path::PathBuf::from("/srv/music")
    );

    Ok(())
}
