//! Built-in index catalog.
//!
//! The catalog is an immutable, ordered name-to-ticker table constructed at
//! startup and handed to the dashboard. Nothing mutates it afterwards; the
//! first entry doubles as the default selection.

use serde::{Deserialize, Serialize};

use crate::{Symbol, ValidationError};

/// One selectable index: display name plus the provider ticker behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub name: String,
    pub symbol: Symbol,
}

impl IndexEntry {
    pub fn new(name: impl Into<String>, symbol: Symbol) -> Self {
        Self {
            name: name.into(),
            symbol,
        }
    }
}

/// Ordered, immutable index registry.
///
/// Names are unique: each selectable name maps to exactly one ticker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexCatalog {
    entries: Vec<IndexEntry>,
}

impl IndexCatalog {
    pub fn new(entries: Vec<IndexEntry>) -> Result<Self, ValidationError> {
        if entries.is_empty() {
            return Err(ValidationError::EmptyCatalog);
        }

        for (index, entry) in entries.iter().enumerate() {
            let duplicated = entries[..index].iter().any(|prior| prior.name == entry.name);
            if duplicated {
                return Err(ValidationError::DuplicateIndexName {
                    name: entry.name.clone(),
                });
            }
        }

        Ok(Self { entries })
    }

    /// The bundled global-index catalog.
    pub fn global() -> Self {
        let entries = [
            ("NIFTY 50", "^NSEI"),
            ("NIFTY BANK", "^NSEBANK"),
            ("NIFTY IT", "^CNXIT"),
            ("Sensex (BSE 30)", "^BSESN"),
            ("S&P 500", "^GSPC"),
            ("NASDAQ", "^IXIC"),
            ("Dow Jones", "^DJI"),
            ("Nikkei 225 (Japan)", "^N225"),
            ("FTSE 100 (UK)", "^FTSE"),
            ("DAX (Germany)", "^GDAXI"),
        ]
        .into_iter()
        .map(|(name, symbol)| {
            IndexEntry::new(
                name,
                Symbol::parse(symbol).expect("built-in catalog symbols are valid"),
            )
        })
        .collect();

        Self::new(entries).expect("built-in catalog is valid")
    }

    /// Exact-match lookup by display name.
    pub fn resolve(&self, name: &str) -> Result<&IndexEntry, ValidationError> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .ok_or_else(|| ValidationError::UnknownIndex {
                name: name.to_owned(),
            })
    }

    /// The entry preselected when the user names none.
    pub fn default_entry(&self) -> &IndexEntry {
        &self.entries[0]
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
