use crate::target::Target;
use progman_core::{CatalogError, ConfigWriteError, LaunchFailure};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("no home directory; pass --config")]
    NoHomeDir,

    #[error("group {0} not found")]
    GroupNotFound(Target),

    #[error("item {item} not found in group '{group}'")]
    ItemNotFound { group: String, item: Target },

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("cannot save config: {0}")]
    Save(#[from] ConfigWriteError),

    #[error(transparent)]
    Launch(#[from] LaunchFailure),
}
