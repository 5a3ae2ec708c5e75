use std::path::PathBuf;

use clap::Args;
use entigen_codegen::PreviewFile;
use entigen_codegen_csharp::Generator;
use entigen_core::File;
use eyre::{Context, Result};

use crate::config::Overrides;
use crate::pipeline::Pipeline;

#[derive(Args)]
pub struct ScaffoldCommand {
    /// Path to the schema snapshot (JSON)
    #[arg(short, long, default_value = "schema.json")]
    pub snapshot: PathBuf,

    /// Path to entigen.toml (defaults to ./entigen.toml)
    #[arg(short, long, default_value = "entigen.toml")]
    pub config: PathBuf,

    /// Output directory for generated files
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

    /// Group container accessors by schema
    #[arg(long)]
    pub separate_by_schema: bool,

    /// Map partition children as entities of their own
    #[arg(long)]
    pub include_partitions: bool,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl ScaffoldCommand {
    pub fn run(&self) -> Result<()> {
        let pipeline = Pipeline::load(&self.snapshot, &self.config, &self.overrides());
        let entities = pipeline.compile_entities();
        let generator = Generator::new(&pipeline.settings.namespace);

        let mut files: Vec<PreviewFile> =
            entities.iter().map(|e| generator.entity_file(e)).collect();
        files.push(generator.generate_container(
            &entities,
            &pipeline.settings.context,
            pipeline.settings.separate_by_schema,
        ));

        if self.dry_run {
            self.run_preview(&files)
        } else {
            self.run_generation(&pipeline, &files)
        }
    }

    fn run_generation(&self, pipeline: &Pipeline, files: &[PreviewFile]) -> Result<()> {
        let output = &pipeline.settings.output;
        for file in files {
            File::new(output.join(&file.path), file.content.clone())
                .write()
                .wrap_err_with(|| format!("Failed to write {}", file.path))?;
        }

        println!(
            "Scaffolded {} entities into {}",
            pipeline.set.len(),
            output.display()
        );
        for (key, class) in pipeline.names.classes() {
            println!("  {} -> {}", key, class);
        }
        println!("Context: {}.cs", pipeline.settings.context);

        Ok(())
    }

    fn run_preview(&self, files: &[PreviewFile]) -> Result<()> {
        for file in files {
            println!("── {} ──", file.path);
            println!("{}", file.content);
        }

        println!("── Summary ──");
        println!("{} files would be generated", files.len());

        Ok(())
    }

    fn overrides(&self) -> Overrides {
        Overrides {
            namespace: self.namespace.clone(),
            context: self.context.clone(),
            output: self.output.clone(),
            schemas: self.schemas.clone(),
            tables: self.tables.clone(),
            separate_by_schema: self.separate_by_schema,
            include_partitions: self.include_partitions,
        }
    }
}
