//! Core utilities and types for the entigen model scaffolder.
//!
//! This crate provides fundamental types and utilities used across
//! the entigen workspace.

mod file;
mod inflect;
mod utils;

// File operations
pub use file::{File, FileRules, GeneratedFile, Overwrite, WriteResult};
// String utilities
pub use inflect::{pluralize, singularize};
pub use utils::to_pascal_case;
