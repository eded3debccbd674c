pub mod catalog;
pub mod launcher;
pub mod store;
pub mod types;

pub use catalog::error::CatalogError;
pub use catalog::{Catalog, Group};
pub use launcher::{LaunchFailure, LaunchResult, Launcher, ShellSpawner, Spawn, SpawnRequest};
pub use store::error::{ConfigReadError, ConfigWriteError};
pub use store::{ConfigStore, LoadSource};
