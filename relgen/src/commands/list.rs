use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use relgen_meta::{Config, PgMetadataStore, load_schema};

use super::UnwrapOrExit;

#[derive(Args)]
pub struct ListCommand {
    /// Path to relgen.toml (defaults to ./relgen.toml)
    #[arg(short, long, default_value = "relgen.toml")]
    pub config: PathBuf,

    /// Dump the loaded metadata as JSON
    #[arg(long)]
    pub json: bool,
}

impl ListCommand {
    pub async fn run(&self) -> Result<()> {
        let config = Config::open(&self.config).unwrap_or_exit();
        let store = PgMetadataStore::connect(&config.database.url)
            .await
            .unwrap_or_exit();
        let graph = load_schema(&store).await.unwrap_or_exit();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&graph)?);
            return Ok(());
        }

        if graph.is_empty() {
            println!("No entities defined");
            return Ok(());
        }

        println!("Entities ({}):", graph.len());
        for entity_graph in &graph.entities {
            let entity = &entity_graph.entity;
            println!("  {} ({})", entity.name, entity.display_name);
            for column in &entity.columns {
                println!(
                    "    {} {}({})",
                    column.name, column.column_type.name, column.size
                );
            }
            for relation in &entity_graph.parent_relations {
                println!(
                    "    -> {} ({}, via {})",
                    relation.child_entity.name,
                    relation.relation_type.name(),
                    relation.child_column.name
                );
            }
            for relation in &entity_graph.child_relations {
                println!(
                    "    <- {} ({}, via {})",
                    relation.parent_entity.name,
                    relation.relation_type.name(),
                    relation.child_column.name
                );
            }
        }

        Ok(())
    }
}
