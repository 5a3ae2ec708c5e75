//! The compiled per-entity code model.
//!
//! An [`EntityModel`] is everything an emitter needs to render one entity
//! source file plus that entity's slice of the container configuration. It
//! carries resolved names only; raw catalog identifiers survive solely as
//! storage names inside configuration directives.

use entigen_metadata::ObjectKind;

/// Scalar type of a mapped column, language-agnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    Bool,
    Int16,
    Int32,
    Int64,
    Decimal,
    Float32,
    Float64,
    Text,
    Uuid,
    Date,
    Timestamp,
    TimestampTz,
    Time,
    Interval,
    Bytes,
    Json,
    /// Untyped fallback for native types outside the fixed mapping table.
    Unknown,
}

impl ScalarType {
    /// Whether a declared maximum length applies to this scalar.
    pub fn is_length_bounded(&self) -> bool {
        matches!(self, ScalarType::Text | ScalarType::Bytes)
    }

    /// Whether the scalar can hold an absent value without further
    /// wrapping (reference-typed and untyped-fallback scalars).
    pub fn is_inherently_nullable(&self) -> bool {
        matches!(
            self,
            ScalarType::Text | ScalarType::Bytes | ScalarType::Json | ScalarType::Unknown
        )
    }
}

/// One column property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyModel {
    /// Resolved member name.
    pub name: String,
    /// Storage column name.
    pub column_name: String,
    pub scalar: ScalarType,
    pub nullable: bool,
    pub max_length: Option<u32>,
    /// Default expression text, passed through verbatim.
    pub default_sql: Option<String>,
    /// Whether the column participates in the primary key.
    pub is_key: bool,
}

/// Forward navigation, one per outgoing foreign key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationModel {
    /// Resolved member name on the declaring entity.
    pub name: String,
    /// Resolved class name of the referenced entity.
    pub target_class: String,
    /// Matching inverse collection name on the referenced entity.
    pub inverse_collection: String,
    /// Resolved property names of the foreign-key columns, in key order.
    pub foreign_key_properties: Vec<String>,
    /// Resolved property names of the referenced columns, in key order.
    pub principal_properties: Vec<String>,
    pub constraint_name: String,
}

/// Inverse collection, one per incoming foreign key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionModel {
    /// Resolved member name on the declaring (referenced) entity.
    pub name: String,
    /// Resolved class name of the referencing entity.
    pub source_class: String,
    /// Matching navigation name on the referencing entity.
    pub inverse_navigation: String,
    pub constraint_name: String,
}

/// One fluent-configuration directive.
///
/// Directives are ordered; emitters render them as-is without reordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigDirective {
    /// Explicit storage-table mapping.
    MapTable { table: String, schema: String },
    /// Keyless read-only mapping for views and materialized views.
    MapKeyless {
        view: String,
        schema: String,
        materialized: bool,
    },
    /// Key declaration, composite-aware.
    Key {
        properties: Vec<String>,
        constraint_name: Option<String>,
    },
    /// Per-column storage mapping.
    Column {
        property: String,
        column: String,
        required: bool,
        max_length: Option<u32>,
        default_sql: Option<String>,
    },
    /// Index declaration.
    Index {
        properties: Vec<String>,
        name: String,
        unique: bool,
    },
    /// Relationship wiring for one outgoing foreign key.
    Relationship {
        navigation: String,
        collection: String,
        foreign_key_properties: Vec<String>,
        principal_class: String,
        constraint_name: String,
    },
}

/// The complete code model of one entity.
#[derive(Debug, Clone)]
pub struct EntityModel {
    /// Resolved class name, unique across the run.
    pub class_name: String,
    /// Owning schema of the mapped object.
    pub schema: String,
    /// Raw storage name of the mapped object.
    pub storage_name: String,
    pub kind: ObjectKind,
    pub properties: Vec<PropertyModel>,
    pub navigations: Vec<NavigationModel>,
    pub collections: Vec<CollectionModel>,
    /// Fluent configuration, in emission order.
    pub directives: Vec<ConfigDirective>,
}
