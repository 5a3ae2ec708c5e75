//! Aggregate container building and incremental merge planning.
//!
//! Full mode rebuilds the container model from scratch. Incremental mode
//! never touches existing content: the previously generated text is parsed
//! (by the emitter crate that understands its syntax) into a
//! [`ParsedContainer`], and the merge is a plain set difference against the
//! newly resolved entities. Formatting changes in the existing file cannot
//! break it, and running the merge twice is a no-op by construction.

use indexmap::IndexSet;

use crate::model::EntityModel;
use crate::names::ensure_unique;
use entigen_core::pluralize;

/// One collection accessor on the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySet {
    /// Accessor name: the pluralized resolved class name.
    pub accessor: String,
    /// Resolved class name of the entity.
    pub class_name: String,
    /// Owning schema, used for schema-grouped emission.
    pub schema: String,
}

/// The aggregate container model.
#[derive(Debug, Clone)]
pub struct ContainerModel {
    /// Container type name.
    pub name: String,
    /// Namespace the container lives in.
    pub namespace: String,
    /// Whether accessors are grouped by schema on emission.
    pub separate_by_schema: bool,
    /// One accessor per entity, in entity order.
    pub entity_sets: Vec<EntitySet>,
}

impl ContainerModel {
    /// Build the container model from scratch (full mode).
    pub fn build(
        name: impl Into<String>,
        namespace: impl Into<String>,
        entities: &[EntityModel],
        separate_by_schema: bool,
    ) -> Self {
        let mut taken = IndexSet::new();
        let entity_sets = entities
            .iter()
            .map(|entity| {
                // Class names are pairwise distinct, but their plurals can
                // still meet ("Order" / "Orders"); accessors must not.
                let accessor = ensure_unique(pluralize(&entity.class_name), &taken);
                taken.insert(accessor.clone());
                EntitySet {
                    accessor,
                    class_name: entity.class_name.clone(),
                    schema: entity.schema.clone(),
                }
            })
            .collect();
        Self {
            name: name.into(),
            namespace: namespace.into(),
            separate_by_schema,
            entity_sets,
        }
    }

    /// Distinct schemas in accessor order.
    pub fn schemas(&self) -> Vec<&str> {
        let mut schemas: IndexSet<&str> = IndexSet::new();
        for set in &self.entity_sets {
            schemas.insert(set.schema.as_str());
        }
        schemas.into_iter().collect()
    }
}

/// Structural view of a previously generated container file.
///
/// Produced by the emitter crate that understands the file's syntax; the
/// merge itself only ever sees this representation.
#[derive(Debug, Clone)]
pub struct ParsedContainer {
    /// Declared container type name.
    pub name: String,
    /// Accessor names already declared, in file order.
    pub accessors: IndexSet<String>,
}

impl ParsedContainer {
    /// Whether an accessor is already declared.
    pub fn declares(&self, accessor: &str) -> bool {
        self.accessors.contains(accessor)
    }
}

/// Accessors of `desired` absent from the existing container, in order.
///
/// An empty result means the merge is a no-op; callers skip the write and
/// report `changed = false`.
pub fn plan_additions<'a>(
    existing: &ParsedContainer,
    desired: &'a [EntitySet],
) -> Vec<&'a EntitySet> {
    desired
        .iter()
        .filter(|set| !existing.declares(&set.accessor))
        .collect()
}
