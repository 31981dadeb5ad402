//! The metadata-store read boundary.

mod memory;
mod postgres;

use async_trait::async_trait;

pub use memory::MemoryStore;
pub use postgres::PgMetadataStore;

use crate::error::Result;
use crate::model::{Entity, Relation};

/// Read operations the generator needs from the metadata store.
///
/// Implementations eagerly resolve nested data: entities arrive with their
/// columns and column types, relations with both endpoint entities, both
/// anchor columns and the intermediate entity. All results are ordered by
/// row id so repeated runs against an unchanged store emit identical
/// output.
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// All entities, columns and column types included, ordered by entity
    /// id (columns by column id).
    async fn fetch_entities(&self) -> Result<Vec<Entity>>;

    /// Relations where the given entity is the parent, ordered by relation
    /// id.
    async fn relations_by_parent(&self, entity_id: i32) -> Result<Vec<Relation>>;

    /// Relations where the given entity is the child, ordered by relation
    /// id.
    async fn relations_by_child(&self, entity_id: i32) -> Result<Vec<Relation>>;
}
