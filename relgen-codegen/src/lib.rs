//! The schema-to-artifact compiler.
//!
//! Consumes the loaded metadata graph and emits, per entity, three
//! coordinated Go source artifacts — storage model, REST controller and
//! GraphQL resolver — plus the root resolver, the schema-description text
//! and the application bootstrap. The classifier in [`classify`] decides,
//! per relation and per endpoint, which composite fields and fetch
//! accessors each artifact carries; [`type_mapper`] and the naming rules in
//! `relgen-core` keep the three artifacts addressing the same column by the
//! same identifier.

pub mod classify;
pub mod context;
pub mod files;
mod generator;
mod go_file;
pub mod type_mapper;

pub use context::{EntityContext, RelationAccessor, ScalarField};
pub use generator::{GenerateSummary, Generator, PreviewFile};
pub use go_file::{GoFile, GoImport};
