//! The table set for one generation run.

use indexmap::IndexMap;

use crate::{ForeignKeyDescriptor, TableDescriptor, TableKey};

/// One incoming foreign key: the referencing table and the key itself.
#[derive(Debug, Clone, Copy)]
pub struct IncomingKey<'a> {
    /// Table declaring the foreign key.
    pub table: &'a TableDescriptor,
    /// The foreign key.
    pub foreign_key: &'a ForeignKeyDescriptor,
    /// Position of the key in the declaring table's outgoing list.
    pub fk_index: usize,
}

/// All tables of one generation run, with lookup indexes.
///
/// The incoming (referencing) foreign-key view is computed once at
/// construction as the exact mirror of the outgoing lists. It is never
/// recomputed independently, so the two sides cannot drift apart.
#[derive(Debug, Clone)]
pub struct TableSet {
    tables: Vec<TableDescriptor>,
    by_key: IndexMap<TableKey, usize>,
    // (referencing table index, foreign key index) per referenced table
    incoming: IndexMap<TableKey, Vec<(usize, usize)>>,
}

impl TableSet {
    /// Build the set and its indexes from a run's descriptors.
    pub fn new(tables: Vec<TableDescriptor>) -> Self {
        let mut by_key = IndexMap::with_capacity(tables.len());
        let mut incoming: IndexMap<TableKey, Vec<(usize, usize)>> = IndexMap::new();

        for (table_idx, table) in tables.iter().enumerate() {
            by_key.insert(table.key(), table_idx);
        }
        for (table_idx, table) in tables.iter().enumerate() {
            for (fk_idx, fk) in table.foreign_keys.iter().enumerate() {
                incoming
                    .entry(fk.referenced_key())
                    .or_default()
                    .push((table_idx, fk_idx));
            }
        }

        Self {
            tables,
            by_key,
            incoming,
        }
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Iterate tables in snapshot order.
    pub fn iter(&self) -> impl Iterator<Item = &TableDescriptor> {
        self.tables.iter()
    }

    /// Look up a table by identity.
    pub fn get(&self, key: &TableKey) -> Option<&TableDescriptor> {
        self.by_key.get(key).map(|&idx| &self.tables[idx])
    }

    /// Foreign keys elsewhere in the set whose target is `key`, paired with
    /// their declaring table, in snapshot order.
    pub fn referencing_keys(&self, key: &TableKey) -> impl Iterator<Item = IncomingKey<'_>> {
        self.incoming
            .get(key)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(|&(table_idx, fk_idx)| {
                let table = &self.tables[table_idx];
                IncomingKey {
                    table,
                    foreign_key: &table.foreign_keys[fk_idx],
                    fk_index: fk_idx,
                }
            })
    }
}
