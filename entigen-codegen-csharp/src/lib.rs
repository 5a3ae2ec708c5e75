//! C# Entity Framework Core emitter for the entigen scaffolder.
//!
//! Serializes compiled entity and container models into formatted C#
//! source text, and parses previously generated context files back into
//! the structural form the incremental merge works on.

mod context_parse;
mod files;
mod generator;
mod naming;
mod type_mapper;

pub use context_parse::{append_accessors, parse_context};
pub use files::{ContextCs, EntityCs, GENERATED_HEADER};
pub use generator::Generator;
pub use naming::{is_reserved, safe_name};
pub use type_mapper::CSharpTypeMapper;
