use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use crate::config::Overrides;
use crate::pipeline::Pipeline;

#[derive(Args)]
pub struct ListCommand {
    /// Path to the schema snapshot (JSON)
    #[arg(short, long, default_value = "schema.json")]
    pub snapshot: PathBuf,

    /// Path to entigen.toml (defaults to ./entigen.toml)
    #[arg(short, long, default_value = "entigen.toml")]
    pub config: PathBuf,

    /// Schema to include (repeatable; default: all)
    #[arg(long = "schema")]
    pub schemas: Vec<String>,

    /// Map partition children as entities of their own
    #[arg(long)]
    pub include_partitions: bool,
}

impl ListCommand {
    pub fn run(&self) -> Result<()> {
        let overrides = Overrides {
            schemas: self.schemas.clone(),
            include_partitions: self.include_partitions,
            ..Default::default()
        };
        let pipeline = Pipeline::load(&self.snapshot, &self.config, &overrides);

        if pipeline.set.is_empty() {
            println!("No tables matched the filter");
            return Ok(());
        }

        println!("Tables ({}):", pipeline.set.len());
        for table in pipeline.set.iter() {
            let class = pipeline.names.class(&table.key());
            println!("  {} -> {} ({})", table.key(), class, table.kind.as_str());
        }

        Ok(())
    }
}
