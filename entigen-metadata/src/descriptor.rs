//! Schema object descriptors.
//!
//! One `TableDescriptor` per mapped catalog object, carrying everything the
//! compiler needs: columns, the primary key, outgoing foreign keys, and
//! indexes. Incoming (referencing) foreign keys are not stored here; they
//! are derived by [`crate::TableSet`] as the mirror of the outgoing lists.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of catalog object a descriptor maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    #[default]
    Table,
    View,
    MaterializedView,
}

impl ObjectKind {
    /// Get the lowercase string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Table => "table",
            ObjectKind::View => "view",
            ObjectKind::MaterializedView => "materialized_view",
        }
    }

    /// Views and materialized views map without a key declaration.
    pub fn is_keyless(&self) -> bool {
        !matches!(self, ObjectKind::Table)
    }
}

/// Identity of a table within a run: schema plus raw table name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableKey {
    pub schema: String,
    pub name: String,
}

impl TableKey {
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for TableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.schema, self.name)
    }
}

/// A single column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Raw column name as it appears in the catalog.
    pub name: String,
    /// Native type tag (e.g., "int4", "varchar", "timestamptz").
    pub native_type: String,
    /// Whether the column admits NULL.
    #[serde(default)]
    pub nullable: bool,
    /// Declared maximum length for length-bounded types.
    #[serde(default)]
    pub max_length: Option<u32>,
    /// Default expression text, passed through verbatim.
    #[serde(default)]
    pub default: Option<String>,
}

/// Primary key declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryKey {
    /// Ordered key column names.
    pub columns: Vec<String>,
    /// Constraint name, when the catalog reports one.
    #[serde(default)]
    pub constraint_name: Option<String>,
}

/// An outgoing foreign key.
///
/// Source and target column lists are equal in length and matching in
/// order; composite keys are carried as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeyDescriptor {
    /// Constraint name.
    pub constraint_name: String,
    /// Ordered source column names on the declaring table.
    pub columns: Vec<String>,
    /// Schema of the referenced table.
    pub referenced_schema: String,
    /// Name of the referenced table.
    pub referenced_table: String,
    /// Ordered referenced column names.
    pub referenced_columns: Vec<String>,
}

impl ForeignKeyDescriptor {
    /// Identity of the referenced table.
    pub fn referenced_key(&self) -> TableKey {
        TableKey::new(&self.referenced_schema, &self.referenced_table)
    }
}

/// An index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDescriptor {
    pub name: String,
    /// Ordered indexed column names.
    pub columns: Vec<String>,
    #[serde(default)]
    pub unique: bool,
}

/// A mapped catalog object and everything known about it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDescriptor {
    /// Owning schema.
    pub schema: String,
    /// Raw object name.
    pub name: String,
    /// Table, view, or materialized view.
    #[serde(default)]
    pub kind: ObjectKind,
    /// Whether this object is a partition child.
    #[serde(default)]
    pub is_partition: bool,
    /// Columns in catalog order.
    #[serde(default)]
    pub columns: Vec<ColumnDescriptor>,
    /// Primary key, absent for keyless objects.
    #[serde(default)]
    pub primary_key: Option<PrimaryKey>,
    /// Outgoing foreign keys.
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKeyDescriptor>,
    /// Indexes, primary key excluded.
    #[serde(default)]
    pub indexes: Vec<IndexDescriptor>,
}

impl TableDescriptor {
    /// Identity of this table within the run.
    pub fn key(&self) -> TableKey {
        TableKey::new(&self.schema, &self.name)
    }

    /// Look up a column by raw name.
    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name == name)
    }
}
