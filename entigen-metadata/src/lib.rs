//! Normalized relational schema metadata for the entigen model scaffolder.
//!
//! This crate defines the immutable schema facts the code generation
//! pipeline consumes: tables, columns, keys, foreign keys, and indexes,
//! plus the provider seam that produces them.
//!
//! # Architecture
//!
//! ```text
//! catalog snapshot (JSON) → SnapshotProvider → TableSet → entigen-codegen
//! ```
//!
//! Descriptors are plain value facts. Resolved type and member names never
//! live here; the resolver hands them around as a separate immutable lookup.

mod descriptor;
mod error;
mod provider;
mod snapshot;
mod table_set;

pub use descriptor::{
    ColumnDescriptor, ForeignKeyDescriptor, IndexDescriptor, ObjectKind, PrimaryKey, TableDescriptor,
    TableKey,
};
pub use error::{Error, Result};
pub use provider::{MetadataProvider, SchemaFilter};
pub use snapshot::{SnapshotDocument, SnapshotProvider};
pub use table_set::{IncomingKey, TableSet};
