use nutype::nutype;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Display title of an accepted item. Surrounding whitespace is dropped.
#[nutype(
    sanitize(trim),
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, AsRef, Deref, TryFrom, Into, Display)
)]
pub struct ItemTitle(String);

/// Shell command line of an accepted item. Surrounding whitespace is dropped.
#[nutype(
    sanitize(trim),
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, AsRef, Deref, TryFrom, Into, Display)
)]
pub struct ItemCommand(String);

/// A single launchable program definition.
///
/// Every field defaults to an empty string when absent from the config file.
/// Items read from disk are kept exactly as written; only items going through
/// [`Catalog::add_item`](crate::catalog::Catalog::add_item) or
/// [`Catalog::edit_item`](crate::catalog::Catalog::edit_item) are validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgramItem {
    pub title: String,
    /// Passed verbatim to the host shell.
    pub command: String,
    /// Empty means "inherit the launcher's current directory".
    pub working_dir: String,
    /// Empty means "no custom icon".
    pub icon_path: String,
}

impl ProgramItem {
    pub fn new(title: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            command: command.into(),
            ..Self::default()
        }
    }

    pub fn with_working_dir(mut self, working_dir: impl Into<String>) -> Self {
        self.working_dir = working_dir.into();
        self
    }

    pub fn with_icon_path(mut self, icon_path: impl Into<String>) -> Self {
        self.icon_path = icon_path.into();
        self
    }

    /// Returns the trimmed copy the catalog stores, or the first field that fails.
    pub fn validated(&self) -> Result<Self, InvalidItem> {
        let title = ItemTitle::try_new(self.title.clone())?;
        let command = ItemCommand::try_new(self.command.clone())?;

        Ok(Self {
            title: title.into_inner(),
            command: command.into_inner(),
            working_dir: self.working_dir.trim().to_string(),
            icon_path: self.icon_path.trim().to_string(),
        })
    }
}

/// Rejected item fields on add or edit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidItem {
    #[error("invalid title: {0}")]
    Title(#[from] ItemTitleError),

    #[error("invalid command: {0}")]
    Command(#[from] ItemCommandError),
}
