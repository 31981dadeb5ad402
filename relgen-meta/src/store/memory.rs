//! In-memory metadata store.
//!
//! Fixture store for tests and offline inspection: holds fully resolved
//! rows and serves them with the same ordering guarantees as the Postgres
//! implementation.

use async_trait::async_trait;
use indexmap::IndexMap;

use crate::error::Result;
use crate::model::{Entity, Relation};
use crate::store::MetadataStore;

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entities: IndexMap<i32, Entity>,
    relations: Vec<Relation>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity (columns included). Re-adding an id replaces it.
    pub fn with_entity(mut self, entity: Entity) -> Self {
        self.entities.insert(entity.id, entity);
        self
    }

    /// Add a fully resolved relation row.
    pub fn with_relation(mut self, relation: Relation) -> Self {
        self.relations.push(relation);
        self
    }
}

#[async_trait]
impl MetadataStore for MemoryStore {
    async fn fetch_entities(&self) -> Result<Vec<Entity>> {
        let mut entities: Vec<Entity> = self.entities.values().cloned().collect();
        entities.sort_by_key(|e| e.id);
        Ok(entities)
    }

    async fn relations_by_parent(&self, entity_id: i32) -> Result<Vec<Relation>> {
        let mut relations: Vec<Relation> = self
            .relations
            .iter()
            .filter(|r| r.parent_entity.id == entity_id)
            .cloned()
            .collect();
        relations.sort_by_key(|r| r.id);
        Ok(relations)
    }

    async fn relations_by_child(&self, entity_id: i32) -> Result<Vec<Relation>> {
        let mut relations: Vec<Relation> = self
            .relations
            .iter()
            .filter(|r| r.child_entity.id == entity_id)
            .cloned()
            .collect();
        relations.sort_by_key(|r| r.id);
        Ok(relations)
    }
}
