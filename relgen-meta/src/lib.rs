//! Metadata model and store access for the relgen generator.
//!
//! The application data model the generator scaffolds from lives as rows in
//! a relational metadata store: entities, their typed columns, and typed
//! relations between entities. This crate owns the row types, the
//! [`MetadataStore`] read boundary (with a Postgres implementation and an
//! in-memory fixture store), the [`load_schema`] loader that assembles the
//! per-entity relation projections, and the `relgen.toml` configuration.

mod config;
mod error;
mod loader;
mod model;
pub mod store;

pub use config::{AppConfig, Config, DatabaseConfig, PackagePaths};
pub use error::{Error, Result};
pub use loader::{EntityGraph, SchemaGraph, load_schema};
pub use model::{Column, ColumnRef, ColumnType, Entity, EntityRef, Relation, RelationTypeId};
pub use store::{MemoryStore, MetadataStore, PgMetadataStore};
