//! Schema-description emitter.
//!
//! Builds the single text blob the query-resolution layer parses at the
//! hosting application's startup: the root declaration, one query field
//! per entity, and a type plus input declaration per entity. Field order
//! follows column declaration order; entity order follows the loader's
//! entity-id order.

use std::path::{Path, PathBuf};

use relgen_core::GeneratedFile;
use relgen_meta::PackagePaths;

use crate::context::EntityContext;
use crate::go_file::{GoFile, qualifier};

pub struct SchemaGo<'a> {
    contexts: &'a [EntityContext],
    paths: &'a PackagePaths,
}

impl<'a> SchemaGo<'a> {
    pub fn new(contexts: &'a [EntityContext], paths: &'a PackagePaths) -> Self {
        Self { contexts, paths }
    }

    /// The schema-description text, without the surrounding Go declaration.
    pub fn schema_text(&self) -> String {
        let mut s = String::new();
        s.push_str("schema {\n\tquery: Query\n}\n\n");

        s.push_str("# The query type, represents all of the entry points into our object graph\n");
        s.push_str("type Query {\n");
        for ctx in self.contexts {
            s.push_str(&format!(
                "\t{}(id: ID!) : [{}]!\n",
                ctx.query_field, ctx.type_name
            ));
        }
        s.push_str("}\n");

        for ctx in self.contexts {
            s.push('\n');
            s.push_str(&format!("type {} {{\n", ctx.type_name));
            for field in &ctx.fields {
                s.push_str(&format!("\t{}: {}!\n", field.column, field.schema_type));
            }
            s.push_str("}\n");
            s.push_str(&format!("input {}Input {{\n", ctx.type_name));
            for field in &ctx.fields {
                s.push_str(&format!("\t{}: {}!\n", field.column, field.schema_type));
            }
            s.push_str("}\n");
        }

        s
    }
}

impl GeneratedFile for SchemaGo<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(&self.paths.source_root)
            .join(&self.paths.graphql)
            .join("schema.go")
    }

    fn render(&self) -> String {
        let chunk = format!("var Schema = `\n{}`", self.schema_text());
        GoFile::new(qualifier(&self.paths.graphql).to_string())
            .add(chunk)
            .render()
    }
}
