use super::ProgramItem;
use serde::{Deserialize, Serialize};

/// Plain group data as it appears in the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgramGroup {
    pub title: String,
    pub items: Vec<ProgramItem>,
}

impl ProgramGroup {
    pub fn new(title: impl Into<String>, items: Vec<ProgramItem>) -> Self {
        Self {
            title: title.into(),
            items,
        }
    }
}
