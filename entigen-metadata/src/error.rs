use std::path::PathBuf;

use miette::{Diagnostic, NamedSource};
use thiserror::Error;

/// Result type for metadata operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("export a schema snapshot first, e.g. with 'pg_snapshot > schema.json'"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse schema snapshot (line {line}, column {column})")]
    #[diagnostic(code(entigen::snapshot_parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        line: usize,
        column: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate table '{key}' in snapshot")]
    #[diagnostic(
        code(entigen::duplicate_table),
        help("table names must be unique per schema; re-export the snapshot")
    )]
    DuplicateTable { key: String },

    #[error("foreign key '{constraint}' on '{table}' has mismatched column lists")]
    #[diagnostic(
        code(entigen::malformed_foreign_key),
        help("source and referenced column lists must have equal length")
    )]
    MalformedForeignKey { table: String, constraint: String },
}

impl Error {
    /// Create an I/O error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Box<Self> {
        Box::new(Error::Io {
            path: path.into(),
            source,
        })
    }

    /// Create a parse error from a serde_json error with source context
    pub fn parse(source: serde_json::Error, src: &str, filename: &str) -> Box<Self> {
        Box::new(Error::Parse {
            src: NamedSource::new(filename, src.to_string()),
            line: source.line(),
            column: source.column(),
            source,
        })
    }
}
