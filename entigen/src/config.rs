//! Project configuration (`entigen.toml`).
//!
//! Everything here can also be given on the command line; flags win over
//! the file, and the file is optional.

use std::path::{Path, PathBuf};

use entigen_metadata::SchemaFilter;
use miette::{Diagnostic, NamedSource, SourceSpan};
use serde::Deserialize;
use thiserror::Error;

/// Result type for configuration loading (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<ConfigError>>;

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse entigen.toml")]
    #[diagnostic(code(entigen::config_parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },
}

/// Root of an `entigen.toml` file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    #[serde(default)]
    pub scaffold: ScaffoldConfig,
}

/// The `[scaffold]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScaffoldConfig {
    /// Namespace for generated types.
    pub namespace: Option<String>,
    /// Container class name.
    pub context: Option<String>,
    /// Output directory for generated files.
    pub output: Option<PathBuf>,
    /// Schemas to include; empty means all.
    #[serde(default)]
    pub schemas: Vec<String>,
    /// Optional table allow-list.
    pub tables: Option<Vec<String>>,
    /// Group container accessors by schema.
    #[serde(default)]
    pub separate_by_schema: bool,
    /// Map partition children as entities of their own.
    #[serde(default)]
    pub include_partitions: bool,
}

impl ProjectConfig {
    /// Load a config file, treating a missing file as empty defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse(&content, &path.display().to_string()),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(Box::new(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })),
        }
    }

    /// Parse config text.
    pub fn parse(content: &str, filename: &str) -> Result<Self> {
        toml::from_str(content).map_err(|source: toml::de::Error| {
            let span = source.span().map(SourceSpan::from);
            Box::new(ConfigError::Parse {
                src: NamedSource::new(filename, content.to_string()),
                span,
                source,
            })
        })
    }
}

/// Effective settings for one run: config file merged with flag overrides.
#[derive(Debug, Clone)]
pub struct Settings {
    pub namespace: String,
    pub context: String,
    pub output: PathBuf,
    pub filter: SchemaFilter,
    pub separate_by_schema: bool,
}

/// Flag-level overrides collected from the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub namespace: Option<String>,
    pub context: Option<String>,
    pub output: Option<PathBuf>,
    pub schemas: Vec<String>,
    pub tables: Vec<String>,
    pub separate_by_schema: bool,
    pub include_partitions: bool,
}

impl Settings {
    /// Merge the config file with command-line overrides. Flags win.
    pub fn merge(config: &ScaffoldConfig, overrides: &Overrides) -> Self {
        let schemas = if overrides.schemas.is_empty() {
            config.schemas.clone()
        } else {
            overrides.schemas.clone()
        };
        let tables = if overrides.tables.is_empty() {
            config.tables.clone()
        } else {
            Some(overrides.tables.clone())
        };
        Self {
            namespace: overrides
                .namespace
                .clone()
                .or_else(|| config.namespace.clone())
                .unwrap_or_else(|| "Models".to_string()),
            context: overrides
                .context
                .clone()
                .or_else(|| config.context.clone())
                .unwrap_or_else(|| "AppDbContext".to_string()),
            output: overrides
                .output
                .clone()
                .or_else(|| config.output.clone())
                .unwrap_or_else(|| PathBuf::from(".")),
            filter: SchemaFilter {
                schemas,
                tables,
                include_partitions: overrides.include_partitions || config.include_partitions,
            },
            separate_by_schema: overrides.separate_by_schema || config.separate_by_schema,
        }
    }
}
