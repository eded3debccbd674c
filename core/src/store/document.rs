//! On-disk shape of the config file.

use crate::catalog::Catalog;
use crate::types::{ProgramGroup, Theme};
use serde::{Deserialize, Serialize};

/// Field order here is the key order written to disk.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct CatalogDocument {
    pub theme: Theme,
    pub layout_state: String,
    pub groups: Vec<ProgramGroup>,
}

impl From<&Catalog> for CatalogDocument {
    fn from(catalog: &Catalog) -> Self {
        Self {
            theme: catalog.theme(),
            layout_state: catalog.layout_state().to_string(),
            groups: catalog.to_program_groups(),
        }
    }
}

impl From<CatalogDocument> for Catalog {
    fn from(document: CatalogDocument) -> Self {
        Catalog::from_parts(document.theme, document.layout_state, document.groups)
    }
}
