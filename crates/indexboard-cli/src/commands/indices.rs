use serde::Serialize;

use indexboard_core::IndexCatalog;

use crate::error::CliError;

use super::{CommandResult, CommandView};

/// One catalog row as presented to the user.
#[derive(Debug, Clone, Serialize)]
pub struct IndexListing {
    pub name: String,
    pub symbol: String,
    /// Preselected when `show` is called without an index name.
    pub default: bool,
}

pub fn run() -> Result<CommandResult, CliError> {
    let catalog = IndexCatalog::global();
    let default_name = catalog.default_entry().name.clone();
    let listings = catalog
        .entries()
        .iter()
        .map(|entry| IndexListing {
            name: entry.name.clone(),
            symbol: entry.symbol.to_string(),
            default: entry.name == default_name,
        })
        .collect();

    Ok(CommandResult::ok(CommandView::Indices(listings), "catalog"))
}
