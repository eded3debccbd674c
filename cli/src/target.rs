//! Resolving command-line references to catalog handles.

use crate::error::CliError;
use progman_core::Catalog;
use progman_core::types::{GroupHandle, ItemHandle};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// A group or item named on the command line: a zero-based position or a title.
///
/// A leading `=` forces a title lookup, so `=2048` names the title "2048".
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    Index(usize),
    Title(String),
}

impl FromStr for Target {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(title) = s.strip_prefix('=') {
            return Ok(Target::Title(title.to_string()));
        }
        Ok(match s.parse() {
            Ok(index) => Target::Index(index),
            Err(_) => Target::Title(s.to_string()),
        })
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Index(index) => write!(f, "#{index}"),
            Target::Title(title) => write!(f, "'{title}'"),
        }
    }
}

pub fn group(catalog: &Catalog, target: &Target) -> Result<GroupHandle, CliError> {
    let handle = match target {
        Target::Index(index) => catalog.group_at(*index),
        Target::Title(title) => catalog.find_group(title),
    };
    handle.ok_or_else(|| CliError::GroupNotFound(target.clone()))
}

pub fn item(catalog: &Catalog, group: &Target, target: &Target) -> Result<ItemHandle, CliError> {
    let group_handle = self::group(catalog, group)?;
    let owner = catalog
        .group(group_handle)
        .ok_or_else(|| CliError::GroupNotFound(group.clone()))?;

    let handle = match target {
        Target::Index(index) => owner.item_at(*index),
        Target::Title(title) => owner.find_item(title),
    };
    handle.ok_or_else(|| CliError::ItemNotFound {
        group: owner.title().to_string(),
        item: target.clone(),
    })
}
