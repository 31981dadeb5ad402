use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use relgen_core::to_pascal_case;
use relgen_meta::{Config, PgMetadataStore, Relation, SchemaGraph, load_schema};

use super::UnwrapOrExit;

/// Generation itself never validates the metadata — a relation anchored on
/// a column of the wrong entity silently becomes wrong generated code.
/// `check` surfaces those inconsistencies up front without changing what
/// `generate` does.
#[derive(Args)]
pub struct CheckCommand {
    /// Path to relgen.toml (defaults to ./relgen.toml)
    #[arg(short, long, default_value = "relgen.toml")]
    pub config: PathBuf,
}

impl CheckCommand {
    pub async fn run(&self) -> Result<()> {
        let config = Config::open(&self.config).unwrap_or_exit();
        let store = PgMetadataStore::connect(&config.database.url)
            .await
            .unwrap_or_exit();
        let graph = load_schema(&store).await.unwrap_or_exit();

        let errors = Self::report_type_collisions(&graph);
        let mut warnings = 0;
        warnings += Self::report_column_issues(&graph);
        warnings += Self::report_anchor_issues(&graph);

        if graph.is_empty() {
            println!("No entities defined; a run would only generate the root artifacts");
        }

        if errors > 0 {
            eprintln!();
            eprintln!("{} error(s)", errors);
            std::process::exit(1);
        }

        if warnings > 0 {
            println!();
            println!("{} warning(s); generation would still run", warnings);
        } else {
            println!(
                "✓ metadata is consistent ({} entities)",
                graph.len()
            );
        }

        Ok(())
    }

    /// Two entities whose display names transform to the same type name
    /// would generate colliding artifacts.
    fn report_type_collisions(graph: &SchemaGraph) -> usize {
        let mut seen: HashMap<String, &str> = HashMap::new();
        let mut errors = 0;
        for entity_graph in &graph.entities {
            let entity = &entity_graph.entity;
            let type_name = to_pascal_case(&entity.display_name);
            if let Some(first) = seen.get(type_name.as_str()) {
                eprintln!(
                    "error: entities '{}' and '{}' both generate type {}",
                    first, entity.name, type_name
                );
                errors += 1;
            } else {
                seen.insert(type_name, entity.name.as_str());
            }
        }
        errors
    }

    fn report_column_issues(graph: &SchemaGraph) -> usize {
        let mut warnings = 0;
        for entity_graph in &graph.entities {
            let entity = &entity_graph.entity;
            if !entity.columns.iter().any(|c| c.name == "id") {
                println!(
                    "warning: entity '{}' has no 'id' column; generated lookups assume one",
                    entity.name
                );
                warnings += 1;
            }
            for column in &entity.columns {
                if !matches!(column.column_type.name.as_str(), "int" | "varchar") {
                    println!(
                        "warning: column '{}.{}' has unrecognized type '{}' and will default to string",
                        entity.name, column.name, column.column_type.name
                    );
                    warnings += 1;
                }
            }
        }
        warnings
    }

    /// A relation anchored on a column that belongs to neither declared
    /// endpoint produces filters against the wrong table.
    fn report_anchor_issues(graph: &SchemaGraph) -> usize {
        let columns_by_entity: HashMap<i32, HashSet<i32>> = graph
            .entities
            .iter()
            .map(|g| {
                (
                    g.entity.id,
                    g.entity.columns.iter().map(|c| c.id).collect(),
                )
            })
            .collect();

        // each relation shows up in both endpoint projections; report once
        let mut seen: HashSet<i32> = HashSet::new();
        let mut warnings = 0;
        for entity_graph in &graph.entities {
            for relation in entity_graph
                .parent_relations
                .iter()
                .chain(&entity_graph.child_relations)
            {
                if !seen.insert(relation.id) {
                    continue;
                }
                warnings += Self::check_anchor(
                    relation,
                    &columns_by_entity,
                    relation.parent_entity.id,
                    relation.parent_column.id,
                    "parent",
                );
                warnings += Self::check_anchor(
                    relation,
                    &columns_by_entity,
                    relation.child_entity.id,
                    relation.child_column.id,
                    "child",
                );
            }
        }
        warnings
    }

    fn check_anchor(
        relation: &Relation,
        columns_by_entity: &HashMap<i32, HashSet<i32>>,
        entity_id: i32,
        column_id: i32,
        side: &str,
    ) -> usize {
        let owned = columns_by_entity
            .get(&entity_id)
            .map(|cols| cols.contains(&column_id))
            .unwrap_or(false);
        if owned {
            0
        } else {
            println!(
                "warning: relation {} anchors its {} side on a column outside the declared {} entity",
                relation.id, side, side
            );
            1
        }
    }
}
