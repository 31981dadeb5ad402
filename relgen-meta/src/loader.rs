//! Schema loader.
//!
//! Assembles the generator's working set: every entity together with the
//! two raw relation projections the classifier consumes (relations seen
//! from the parent side and from the child side). One loader pass per
//! generation run; the graph is dropped when the run ends.

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::model::{Entity, Relation};
use crate::store::MetadataStore;

/// One entity with its raw relation rows.
#[derive(Debug, Clone, Serialize)]
pub struct EntityGraph {
    pub entity: Entity,
    /// Relations where this entity is the parent.
    pub parent_relations: Vec<Relation>,
    /// Relations where this entity is the child.
    pub child_relations: Vec<Relation>,
}

/// The full loaded metadata set, ordered by entity id.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SchemaGraph {
    pub entities: Vec<EntityGraph>,
}

impl SchemaGraph {
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }
}

/// Fetch all entities and, per entity, both relation projections.
///
/// Entities are processed strictly in store order (entity id); an empty
/// store yields an empty graph, not an error.
pub async fn load_schema(store: &dyn MetadataStore) -> Result<SchemaGraph> {
    let entities = store.fetch_entities().await?;
    let mut graph = SchemaGraph::default();

    for entity in entities {
        let parent_relations = store.relations_by_parent(entity.id).await?;
        let child_relations = store.relations_by_child(entity.id).await?;
        debug!(
            entity = %entity.name,
            parents = parent_relations.len(),
            children = child_relations.len(),
            "loaded entity"
        );
        graph.entities.push(EntityGraph {
            entity,
            parent_relations,
            child_relations,
        });
    }

    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Column, ColumnRef, ColumnType, EntityRef, RelationTypeId};
    use crate::store::MemoryStore;

    fn entity(id: i32, name: &str) -> Entity {
        Entity {
            id,
            name: name.to_string(),
            display_name: name.to_string(),
            columns: vec![Column {
                id: id * 10,
                name: "id".to_string(),
                display_name: "id".to_string(),
                size: 11,
                column_type: ColumnType {
                    id: 1,
                    name: "int".to_string(),
                },
            }],
        }
    }

    fn entity_ref(e: &Entity) -> EntityRef {
        EntityRef {
            id: e.id,
            name: e.name.clone(),
            display_name: e.display_name.clone(),
        }
    }

    #[tokio::test]
    async fn test_load_schema_orders_entities_by_id() {
        let store = MemoryStore::new()
            .with_entity(entity(3, "wheel"))
            .with_entity(entity(1, "car"));

        let graph = load_schema(&store).await.unwrap();

        let names: Vec<&str> = graph
            .entities
            .iter()
            .map(|g| g.entity.name.as_str())
            .collect();
        assert_eq!(names, ["car", "wheel"]);
    }

    #[tokio::test]
    async fn test_load_schema_splits_relation_projections() {
        let car = entity(1, "car");
        let wheel = entity(2, "wheel");
        let relation = Relation {
            id: 7,
            parent_entity: entity_ref(&car),
            child_entity: entity_ref(&wheel),
            inter_entity: None,
            parent_column: ColumnRef {
                id: 10,
                name: "id".to_string(),
            },
            child_column: ColumnRef {
                id: 21,
                name: "car_id".to_string(),
            },
            relation_type: RelationTypeId::OneToMany,
        };
        let store = MemoryStore::new()
            .with_entity(car)
            .with_entity(wheel)
            .with_relation(relation);

        let graph = load_schema(&store).await.unwrap();

        assert_eq!(graph.len(), 2);
        let car_graph = &graph.entities[0];
        assert_eq!(car_graph.parent_relations.len(), 1);
        assert!(car_graph.child_relations.is_empty());
        let wheel_graph = &graph.entities[1];
        assert!(wheel_graph.parent_relations.is_empty());
        assert_eq!(wheel_graph.child_relations.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_store_yields_empty_graph() {
        let graph = load_schema(&MemoryStore::new()).await.unwrap();
        assert!(graph.is_empty());
    }

    #[tokio::test]
    async fn test_schema_graph_serializes() {
        let store = MemoryStore::new().with_entity(entity(1, "car"));
        let graph = load_schema(&store).await.unwrap();

        let json = serde_json::to_value(&graph).unwrap();
        assert_eq!(json["entities"][0]["entity"]["name"], "car");
        assert_eq!(
            json["entities"][0]["entity"]["columns"][0]["column_type"]["name"],
            "int"
        );
    }
}
