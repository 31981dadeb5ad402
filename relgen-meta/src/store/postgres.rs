//! Postgres-backed metadata store.
//!
//! Reads the `c_entity` / `c_column` / `c_column_type` / `c_relation`
//! tables. Every query carries an explicit `ORDER BY` on the row id;
//! nothing downstream re-sorts.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::error::{Error, Result};
use crate::model::{Column, ColumnRef, ColumnType, Entity, EntityRef, Relation, RelationTypeId};
use crate::store::MetadataStore;

pub struct PgMetadataStore {
    pool: PgPool,
}

impl PgMetadataStore {
    /// Connect to the metadata store.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(2)
            .connect(url)
            .await
            .map_err(Error::store)?;
        Ok(Self { pool })
    }

    /// Wrap an existing pool (used by integration tests).
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_columns(&self, entity_id: i32) -> Result<Vec<Column>> {
        let rows = sqlx::query_as::<_, ColumnRow>(
            r#"
            select c.id, c.name, c.display_name, c.size, t.id as type_id, t.type as type_name
            from c_column c
            join c_column_type t on t.id = c.type_id
            where c.entity_id = $1
            order by c.id
            "#,
        )
        .bind(entity_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::store)?;

        Ok(rows
            .into_iter()
            .map(|row| Column {
                id: row.id,
                name: row.name,
                display_name: row.display_name,
                size: row.size,
                column_type: ColumnType {
                    id: row.type_id,
                    name: row.type_name,
                },
            })
            .collect())
    }

    async fn fetch_relations(&self, filter_column: &str, entity_id: i32) -> Result<Vec<Relation>> {
        // filter_column is one of two fixed literals, never user input
        let sql = format!(
            r#"
            select r.id, r.relation_type_id,
                   pe.id as parent_id, pe.name as parent_name, pe.display_name as parent_display_name,
                   ce.id as child_id, ce.name as child_name, ce.display_name as child_display_name,
                   ie.id as inter_id, ie.name as inter_name, ie.display_name as inter_display_name,
                   pc.id as parent_column_id, pc.name as parent_column_name,
                   cc.id as child_column_id, cc.name as child_column_name
            from c_relation r
            join c_entity pe on pe.id = r.parent_entity_id
            join c_entity ce on ce.id = r.child_entity_id
            left join c_entity ie on ie.id = r.inter_entity_id
            join c_column pc on pc.id = r.parent_entity_col_id
            join c_column cc on cc.id = r.child_entity_col_id
            where r.{} = $1
            order by r.id
            "#,
            filter_column
        );

        let rows = sqlx::query_as::<_, RelationRow>(&sql)
            .bind(entity_id)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::store)?;

        rows.into_iter().map(RelationRow::into_relation).collect()
    }
}

#[async_trait]
impl MetadataStore for PgMetadataStore {
    async fn fetch_entities(&self) -> Result<Vec<Entity>> {
        let rows = sqlx::query_as::<_, EntityRow>(
            "select id, name, display_name from c_entity order by id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(Error::store)?;

        let mut entities = Vec::with_capacity(rows.len());
        for row in rows {
            let columns = self.fetch_columns(row.id).await?;
            entities.push(Entity {
                id: row.id,
                name: row.name,
                display_name: row.display_name,
                columns,
            });
        }
        Ok(entities)
    }

    async fn relations_by_parent(&self, entity_id: i32) -> Result<Vec<Relation>> {
        self.fetch_relations("parent_entity_id", entity_id).await
    }

    async fn relations_by_child(&self, entity_id: i32) -> Result<Vec<Relation>> {
        self.fetch_relations("child_entity_id", entity_id).await
    }
}

#[derive(sqlx::FromRow)]
struct EntityRow {
    id: i32,
    name: String,
    display_name: String,
}

#[derive(sqlx::FromRow)]
struct ColumnRow {
    id: i32,
    name: String,
    display_name: String,
    size: i32,
    type_id: i32,
    type_name: String,
}

#[derive(sqlx::FromRow)]
struct RelationRow {
    id: i32,
    relation_type_id: i32,
    parent_id: i32,
    parent_name: String,
    parent_display_name: String,
    child_id: i32,
    child_name: String,
    child_display_name: String,
    inter_id: Option<i32>,
    inter_name: Option<String>,
    inter_display_name: Option<String>,
    parent_column_id: i32,
    parent_column_name: String,
    child_column_id: i32,
    child_column_name: String,
}

impl RelationRow {
    fn into_relation(self) -> Result<Relation> {
        let relation_type = RelationTypeId::from_discriminant(self.relation_type_id).ok_or_else(
            || {
                Box::new(Error::UnknownRelationType {
                    relation_id: self.id,
                    discriminant: self.relation_type_id,
                })
            },
        )?;

        // A zero intermediate id is the store's "no join table" marker.
        let inter_entity = match (self.inter_id, self.inter_name, self.inter_display_name) {
            (Some(id), Some(name), Some(display_name)) if id != 0 => Some(EntityRef {
                id,
                name,
                display_name,
            }),
            _ => None,
        };

        Ok(Relation {
            id: self.id,
            parent_entity: EntityRef {
                id: self.parent_id,
                name: self.parent_name,
                display_name: self.parent_display_name,
            },
            child_entity: EntityRef {
                id: self.child_id,
                name: self.child_name,
                display_name: self.child_display_name,
            },
            inter_entity,
            parent_column: ColumnRef {
                id: self.parent_column_id,
                name: self.parent_column_name,
            },
            child_column: ColumnRef {
                id: self.child_column_id,
                name: self.child_column_name,
            },
            relation_type,
        })
    }
}
