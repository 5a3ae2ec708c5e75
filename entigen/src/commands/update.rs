use std::path::PathBuf;

use clap::Args;
use entigen_codegen_csharp::Generator;
use entigen_core::{File, FileRules, WriteResult};
use eyre::{Context, Result};

use super::UnwrapOrExit;
use crate::config::Overrides;
use crate::pipeline::Pipeline;

#[derive(Args)]
pub struct UpdateCommand {
    /// Path to the schema snapshot (JSON)
    #[arg(short, long, default_value = "schema.json")]
    pub snapshot: PathBuf,

    /// Path to entigen.toml (defaults to ./entigen.toml)
    #[arg(short, long, default_value = "entigen.toml")]
    pub config: PathBuf,

    /// Output directory holding the previously generated files
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Namespace for generated types
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// Container class name
    #[arg(long)]
    pub context: Option<String>,

    /// Schema to include (repeatable; default: all)
    #[arg(long = "schema")]
    pub schemas: Vec<String>,

    /// Table to include (repeatable; default: all)
    #[arg(long = "table")]
    pub tables: Vec<String>,

    /// Map partition children as entities of their own
    #[arg(long)]
    pub include_partitions: bool,
}

impl UpdateCommand {
    pub fn run(&self) -> Result<()> {
        let pipeline = Pipeline::load(&self.snapshot, &self.config, &self.overrides());
        let entities = pipeline.compile_entities();
        let generator = Generator::new(&pipeline.settings.namespace);

        let output = &pipeline.settings.output;
        let container_path = output.join(format!("{}.cs", pipeline.settings.context));
        let existing = std::fs::read_to_string(&container_path)
            .wrap_err_with(|| format!("Failed to read {}", container_path.display()))?;

        let (container, changed) = generator
            .update_container(&existing, &entities, &pipeline.settings.context)
            .unwrap_or_exit();

        // Entity files for newly mapped tables; existing ones are the
        // user's to keep.
        let mut created = Vec::new();
        for entity in &entities {
            let file = generator.entity_file(entity);
            let result = File::new(output.join(&file.path), file.content)
                .with_rules(FileRules::if_missing())
                .write()
                .wrap_err_with(|| format!("Failed to write {}", file.path))?;
            if result == WriteResult::Written {
                created.push(file.path);
            }
        }

        if changed {
            File::new(&container_path, container.content)
                .write()
                .wrap_err_with(|| format!("Failed to write {}", container_path.display()))?;
            println!("Updated {}", container_path.display());
        } else {
            println!("{} already up to date", container_path.display());
        }

        if !created.is_empty() {
            println!();
            println!("New entities:");
            for path in &created {
                println!("  + {path}");
            }
        }

        Ok(())
    }

    fn overrides(&self) -> Overrides {
        Overrides {
            namespace: self.namespace.clone(),
            context: self.context.clone(),
            output: self.output.clone(),
            schemas: self.schemas.clone(),
            tables: self.tables.clone(),
            separate_by_schema: false,
            include_partitions: self.include_partitions,
        }
    }
}
