//! Config file persistence.
//!
//! The whole catalog lives in one JSON file, by default `~/.progman.json`.
//! Reads never fail from the caller's point of view: a missing file yields a
//! freshly written default catalog, an unreadable one yields the same default
//! but is left untouched on disk. Writes go through a temporary file next to
//! the real file (symlinks followed) that is renamed over it.

use crate::catalog::Catalog;
use crate::types::{ProgramGroup, ProgramItem, Theme};
use document::CatalogDocument;
use error::{ConfigReadError, ConfigWriteError};
use log::{info, warn};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

mod document;

pub mod error {
    use std::path::PathBuf;
    use thiserror::Error;

    /// The file exists but could not be turned into a catalog.
    #[derive(Debug, Error)]
    pub enum ConfigReadError {
        #[error("IO error: {0}")]
        Io(#[from] std::io::Error),

        #[error("parse error: {0}")]
        Parse(#[from] serde_json::Error),
    }

    #[derive(Debug, Error)]
    pub enum ConfigWriteError {
        #[error("cannot create directory {}: {source}", path.display())]
        CreateDir {
            path: PathBuf,
            source: std::io::Error,
        },

        #[error("serialize error: {0}")]
        Serialize(#[from] serde_json::Error),

        #[error("IO error: {0}")]
        Io(#[from] std::io::Error),

        #[error("cannot replace config file: {0}")]
        Persist(#[from] tempfile::PersistError),
    }
}

/// File name of the config inside the home directory.
pub const DEFAULT_FILE_NAME: &str = ".progman.json";

/// Where a loaded catalog came from.
#[derive(Debug)]
pub enum LoadSource {
    /// Parsed from the existing file.
    File,
    /// No file existed; the default catalog was synthesized and written out.
    /// `write_error` is set when that initial write failed.
    CreatedDefault {
        write_error: Option<ConfigWriteError>,
    },
    /// The file could not be read or parsed; the default catalog was used and
    /// the file was not modified.
    Fallback(ConfigReadError),
}

/// Loads and saves a catalog at a fixed path.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at [`default_path`](Self::default_path), if a home directory exists.
    pub fn at_default_path() -> Option<Self> {
        Self::default_path().map(Self::new)
    }

    /// `~/.progman.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(DEFAULT_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the catalog, substituting the default on any read problem.
    pub fn load(&self) -> Catalog {
        self.load_detailed().0
    }

    /// Like [`load`](Self::load), also reporting which path was taken.
    pub fn load_detailed(&self) -> (Catalog, LoadSource) {
        let target = resolve_links(&self.path);
        let missing = match std::fs::symlink_metadata(&target) {
            Ok(_) => false,
            Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => true,
            Err(e) => {
                warn!("cannot stat config at {}: {e}", self.path.display());
                return (default_catalog(), LoadSource::Fallback(e.into()));
            }
        };

        if missing {
            let catalog = default_catalog();
            let write_error = self.save(&catalog).err();
            match &write_error {
                None => info!("created default config at {}", self.path.display()),
                Some(e) => warn!(
                    "cannot write default config to {}: {e}",
                    self.path.display()
                ),
            }
            return (catalog, LoadSource::CreatedDefault { write_error });
        }

        match read_catalog(&target) {
            Ok(catalog) => {
                info!(
                    "loaded {} groups from {}",
                    catalog.len(),
                    self.path.display()
                );
                (catalog, LoadSource::File)
            }
            Err(e) => {
                warn!(
                    "unreadable config at {}, using defaults: {e}",
                    self.path.display()
                );
                (default_catalog(), LoadSource::Fallback(e))
            }
        }
    }

    /// Writes the full catalog, creating parent directories as needed.
    ///
    /// When the configured path is a symlink the file it points to is
    /// replaced and the link itself is left alone. An existing file keeps its
    /// permission bits.
    pub fn save(&self, catalog: &Catalog) -> Result<(), ConfigWriteError> {
        let target = resolve_links(&self.path);
        let parent = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&parent).map_err(|source| ConfigWriteError::CreateDir {
            path: parent.clone(),
            source,
        })?;

        let mut content = to_json(catalog)?;
        content.push('\n');

        let mut file = NamedTempFile::new_in(&parent)?;
        file.write_all(content.as_bytes())?;
        file.as_file().sync_all()?;
        if let Ok(metadata) = std::fs::metadata(&target) {
            file.as_file().set_permissions(metadata.permissions())?;
        }
        file.persist(&target)?;

        info!("saved config to {}", self.path.display());
        Ok(())
    }
}

/// Parses config file contents. Absent fields take their defaults and unknown
/// keys are ignored.
pub fn from_json(content: &str) -> Result<Catalog, ConfigReadError> {
    let document: CatalogDocument = serde_json::from_str(content)?;
    Ok(document.into())
}

/// Serializes a catalog with two-space indentation and fixed key order.
pub fn to_json(catalog: &Catalog) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&CatalogDocument::from(catalog))
}

/// Upper bound on chained symlinks, matching the usual kernel limit.
const MAX_LINK_DEPTH: usize = 40;

/// Follows symlinks at `path` without requiring the final target to exist.
fn resolve_links(path: &Path) -> PathBuf {
    let mut resolved = path.to_path_buf();
    for _ in 0..MAX_LINK_DEPTH {
        let is_link = std::fs::symlink_metadata(&resolved)
            .map(|metadata| metadata.file_type().is_symlink())
            .unwrap_or(false);
        if !is_link {
            break;
        }
        let Ok(link) = std::fs::read_link(&resolved) else {
            break;
        };
        resolved = match resolved.parent() {
            Some(parent) => parent.join(link),
            None => link,
        };
    }
    resolved
}

fn read_catalog(path: &Path) -> Result<Catalog, ConfigReadError> {
    let content = std::fs::read_to_string(path)?;
    from_json(&content)
}

/// One `Main` group holding a single platform-appropriate program.
pub fn default_catalog() -> Catalog {
    let item = if cfg!(windows) {
        ProgramItem::new("Notepad", "notepad.exe")
    } else {
        ProgramItem::new("Terminal", "xterm")
    };

    Catalog::from_parts(
        Theme::default(),
        String::new(),
        vec![ProgramGroup::new("Main", vec![item])],
    )
}
