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


//! Persistent storage
//!
//! SQLite-backed settings that survive application restarts. The GUI loads
//! the saved download directory at startup and writes it back whenever the
//! user picks a new one.
//!
//! # Usage Example
//! ```no_run
//! use catmusic_core::storage::{Database, SettingsStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::new("./catmusic.db").await?;
//! let settings = SettingsStore::new(&db);
//!
//! let dir = settings.download_dir().await?;
//! settings.set_download_dir("/srv/music").await?;
//! # Ok(())
//! # }
//! ```

pub mod database;
pub mod settings;

// Re-export commonly used types
pub use database::Database;
pub use settings::{default_download_dir, SettingEntry, SettingsStore};
