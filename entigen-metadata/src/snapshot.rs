//! Schema snapshot documents.
//!
//! A snapshot is the JSON export of a catalog introspection pass. Reading
//! one is the only I/O this crate performs; live introspection lives behind
//! [`MetadataProvider`] in other crates.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, MetadataProvider, Result, SchemaFilter, TableDescriptor, TableSet};

/// Root of a schema snapshot document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotDocument {
    pub tables: Vec<TableDescriptor>,
}

/// Provider backed by a snapshot document.
#[derive(Debug, Clone)]
pub struct SnapshotProvider {
    document: SnapshotDocument,
}

impl SnapshotProvider {
    /// Load a snapshot from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|source| Error::io(path, source))?;
        Self::from_str(&content, &path.display().to_string())
    }

    /// Parse a snapshot from JSON text.
    pub fn from_str(content: &str, filename: &str) -> Result<Self> {
        let document: SnapshotDocument = serde_json::from_str(content)
            .map_err(|source| Error::parse(source, content, filename))?;
        Ok(Self { document })
    }

    /// Build the filtered, self-contained table set.
    ///
    /// Enforces the provider guarantee: tables outside the filter are
    /// dropped, and with them every foreign key that would dangle.
    pub fn tables(&self, filter: &SchemaFilter) -> Result<TableSet> {
        let mut seen = HashSet::new();
        let mut kept: Vec<TableDescriptor> = Vec::new();

        for table in &self.document.tables {
            if !filter.matches(table) {
                continue;
            }
            if !seen.insert(table.key()) {
                return Err(Box::new(Error::DuplicateTable {
                    key: table.key().to_string(),
                }));
            }
            for fk in &table.foreign_keys {
                if fk.columns.len() != fk.referenced_columns.len() {
                    return Err(Box::new(Error::MalformedForeignKey {
                        table: table.key().to_string(),
                        constraint: fk.constraint_name.clone(),
                    }));
                }
            }
            kept.push(table.clone());
        }

        // Second pass: drop foreign keys whose target did not survive the
        // filter, so the returned set never contains dangling references.
        let surviving: HashSet<_> = kept.iter().map(TableDescriptor::key).collect();
        for table in &mut kept {
            table
                .foreign_keys
                .retain(|fk| surviving.contains(&fk.referenced_key()));
        }

        Ok(TableSet::new(kept))
    }
}

impl MetadataProvider for SnapshotProvider {
    fn table_set(&self, filter: &SchemaFilter) -> eyre::Result<TableSet> {
        Ok(self.tables(filter)?)
    }
}
