//! Shared command plumbing: snapshot → settings → resolved names → models.

use std::path::Path;

use entigen_codegen::{compile_entity, EntityModel, ResolvedNames};
use entigen_metadata::{SnapshotProvider, TableSet};

use crate::commands::UnwrapOrExit;
use crate::config::{Overrides, ProjectConfig, Settings};

/// Everything a generation command needs, in pipeline order.
pub(crate) struct Pipeline {
    pub settings: Settings,
    pub set: TableSet,
    pub names: ResolvedNames,
}

impl Pipeline {
    /// Load config and snapshot, filter the table set, and run phase 1.
    ///
    /// Exits with a diagnostic on snapshot or config errors.
    pub fn load(snapshot: &Path, config: &Path, overrides: &Overrides) -> Self {
        let config = ProjectConfig::load_or_default(config).unwrap_or_exit();
        let settings = Settings::merge(&config.scaffold, overrides);
        let provider = SnapshotProvider::from_path(snapshot).unwrap_or_exit();
        let set = provider.tables(&settings.filter).unwrap_or_exit();
        let names = ResolvedNames::resolve(&set);
        Self {
            settings,
            set,
            names,
        }
    }

    /// Phase 2: compile every table against the frozen name lookup.
    pub fn compile_entities(&self) -> Vec<EntityModel> {
        self.set
            .iter()
            .map(|table| compile_entity(&self.set, table, &self.names))
            .collect()
    }
}
