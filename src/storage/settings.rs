// CatMusic - music search and download for the desktop
// Copyright (C) 2025 CatMusic contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

//! Persisted application settings
//!
//! Key-value rows scoped by vendor and application name, mirroring how the
//! desktop platform's settings registries are keyed. Today the only setting
//! is the download directory; readers fall back to a default under the
//! working directory when it has never been saved.

use crate::error::Result;
use crate::storage::database::Database;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};

/// Organization scope for this application's rows
pub const VENDOR: &str = "MyTeam";

/// Application scope for this application's rows
pub const APPLICATION: &str = "CatMusicApp";

/// Subdirectory of the working directory used when no directory was saved
pub const DEFAULT_DOWNLOAD_SUBDIR: &str = "music_downloaded";

const DOWNLOAD_DIR_KEY: &str = "download_path";

/// One persisted setting row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SettingEntry {
    pub key: String,
    pub value: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Settings reader/writer bound to this application's scope
#[derive(Debug, Clone)]
pub struct SettingsStore {
    pool: SqlitePool,
}

impl SettingsStore {
    pub fn new(database: &Database) -> Self {
        Self {
            pool: database.pool().clone(),
        }
    }

    /// Read one setting
    ///
    /// # Returns
    /// `None` if the key was never saved
    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let value: Option<String> = sqlx::query_scalar(
            "SELECT value FROM Settings WHERE vendor = ? AND application = ? AND key = ?",
        )
        .bind(VENDOR)
        .bind(APPLICATION)
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(value)
    }

    /// Save one setting, replacing any previous value
    pub async fn set(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO Settings (vendor, application, key, value)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(vendor, application, key)
            DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP
            "#,
        )
        .bind(VENDOR)
        .bind(APPLICATION)
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// The directory downloads should land in
    ///
    /// Falls back to [`default_download_dir`] when no directory has been
    /// saved yet. The fallback is not written back; it only becomes
    /// persistent once the user picks a directory.
    pub async fn download_dir(&self) -> Result<PathBuf> {
        match self.get(DOWNLOAD_DIR_KEY).await? {
            Some(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
            _ => default_download_dir(),
        }
    }

    /// Persist the download directory
    pub async fn set_download_dir<P: AsRef<Path>>(&self, dir: P) -> Result<()> {
        self.set(DOWNLOAD_DIR_KEY, &dir.as_ref().to_string_lossy()).await
    }

    /// List every setting in this application's scope
    pub async fn entries(&self) -> Result<Vec<SettingEntry>> {
        let rows = sqlx::query_as::<_, SettingEntry>(
            r#"
            SELECT key, value, created_at, updated_at
            FROM Settings
            WHERE vendor = ? AND application = ?
            ORDER BY key
            "#,
        )
        .bind(VENDOR)
        .bind(APPLICATION)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

/// Download directory used before the user has saved one
pub fn default_download_dir() -> Result<PathBuf> {
    Ok(std::env::current_dir()?.join(DEFAULT_DOWNLOAD_SUBDIR))
}
