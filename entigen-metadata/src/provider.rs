//! The provider seam between catalog introspection and the generator core.

use eyre::Result;

use crate::{TableDescriptor, TableSet};

/// Which catalog objects a run maps.
#[derive(Debug, Clone, Default)]
pub struct SchemaFilter {
    /// Schemas to include; empty means every schema in the source.
    pub schemas: Vec<String>,
    /// Optional table-name allow-list, matched against raw names.
    pub tables: Option<Vec<String>>,
    /// Whether partition children are mapped as entities of their own.
    pub include_partitions: bool,
}

impl SchemaFilter {
    /// Whether a descriptor passes the filter.
    pub fn matches(&self, table: &TableDescriptor) -> bool {
        if !self.schemas.is_empty() && !self.schemas.iter().any(|s| s == &table.schema) {
            return false;
        }
        if let Some(allowed) = &self.tables
            && !allowed.iter().any(|t| t == &table.name)
        {
            return false;
        }
        if table.is_partition && !self.include_partitions {
            return false;
        }
        true
    }
}

/// Source of schema metadata for a generation run.
///
/// Implementations guarantee that the returned set is self-contained: every
/// foreign key targets a table present in the set (dangling references and
/// excluded partitions are pre-filtered).
pub trait MetadataProvider {
    /// Query the catalog and return the filtered table set.
    fn table_set(&self, filter: &SchemaFilter) -> Result<TableSet>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ObjectKind;

    fn table(schema: &str, name: &str, is_partition: bool) -> TableDescriptor {
        TableDescriptor {
            schema: schema.into(),
            name: name.into(),
            kind: ObjectKind::Table,
            is_partition,
            columns: vec![],
            primary_key: None,
            foreign_keys: vec![],
            indexes: vec![],
        }
    }

    #[test]
    fn test_schema_filter_default_accepts_tables() {
        let filter = SchemaFilter::default();
        assert!(filter.matches(&table("public", "order", false)));
        assert!(filter.matches(&table("sales", "order", false)));
    }

    #[test]
    fn test_schema_filter_restricts_schemas() {
        let filter = SchemaFilter {
            schemas: vec!["sales".into()],
            ..Default::default()
        };
        assert!(!filter.matches(&table("public", "order", false)));
        assert!(filter.matches(&table("sales", "order", false)));
    }

    #[test]
    fn test_schema_filter_table_allow_list() {
        let filter = SchemaFilter {
            tables: Some(vec!["order".into()]),
            ..Default::default()
        };
        assert!(filter.matches(&table("public", "order", false)));
        assert!(!filter.matches(&table("public", "customer", false)));
    }

    #[test]
    fn test_schema_filter_excludes_partitions() {
        let filter = SchemaFilter::default();
        assert!(!filter.matches(&table("public", "events_2024", true)));

        let filter = SchemaFilter {
            include_partitions: true,
            ..Default::default()
        };
        assert!(filter.matches(&table("public", "events_2024", true)));
    }
}
