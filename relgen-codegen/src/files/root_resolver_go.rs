//! Root-resolver emitter.
//!
//! Aggregates across all entities: the `Resolver` entry-point struct and
//! one query method per entity delegating to that entity's resolve
//! function.

use std::path::{Path, PathBuf};

use relgen_core::{CodeBuilder, GeneratedFile};
use relgen_meta::PackagePaths;

use crate::context::EntityContext;
use crate::go_file::{GoFile, qualifier};

pub struct RootResolverGo<'a> {
    contexts: &'a [EntityContext],
    paths: &'a PackagePaths,
}

impl<'a> RootResolverGo<'a> {
    pub fn new(contexts: &'a [EntityContext], paths: &'a PackagePaths) -> Self {
        Self { contexts, paths }
    }
}

impl GeneratedFile for RootResolverGo<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(&self.paths.source_root)
            .join(&self.paths.graphql)
            .join("resolver.go")
    }

    fn render(&self) -> String {
        let mut file = GoFile::new(qualifier(&self.paths.graphql).to_string())
            .import_aliased("graphql", &self.paths.graphql_lib)
            .add("type Resolver struct{}\n");

        for ctx in self.contexts {
            let chunk = CodeBuilder::go()
                .comment(&format!("query resolver for {}", ctx.type_name))
                .block_with_close(
                    &format!(
                        "func (r *Resolver) {}(args struct{{ ID graphql.ID }}) []*{}Resolver {{",
                        ctx.type_name, ctx.var_name
                    ),
                    "}",
                    |b| b.line(&format!("return Resolve{}(args)", ctx.type_name)),
                )
                .build();
            file = file.add(chunk);
        }

        file.render()
    }
}
