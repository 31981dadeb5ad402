//! Query-layer (resolver) emitter.
//!
//! Emits the per-entity `mygraphql` package file: the lower-cased
//! representation struct, the upsert input struct, the resolver wrapper,
//! the root resolve function (lookup-by-id when an id is supplied, else
//! list-all), one field accessor per scalar column and the mapper from the
//! storage struct. A zero-valued storage struct maps to the empty
//! representation, which is the layer's not-found sentinel.

use std::path::{Path, PathBuf};

use relgen_core::{CodeBuilder, GeneratedFile};
use relgen_meta::PackagePaths;

use crate::context::EntityContext;
use crate::go_file::{GoFile, qualifier};

pub struct ResolverGo<'a> {
    ctx: &'a EntityContext,
    paths: &'a PackagePaths,
}

impl<'a> ResolverGo<'a> {
    pub fn new(ctx: &'a EntityContext, paths: &'a PackagePaths) -> Self {
        Self { ctx, paths }
    }

    fn models(&self) -> &str {
        qualifier(&self.paths.models)
    }

    fn utils(&self) -> &str {
        qualifier(&self.paths.utils)
    }

    fn representation_chunk(&self) -> String {
        let ctx = self.ctx;
        CodeBuilder::go()
            .comment("Struct for graphql")
            .block_with_close(&format!("type {} struct {{", ctx.var_name), "}", |b| {
                b.each(&ctx.fields, |b, field| {
                    b.line(&format!("{} {}", field.query_name, field.query_type))
                })
            })
            .build()
    }

    fn input_chunk(&self) -> String {
        let ctx = self.ctx;
        CodeBuilder::go()
            .comment("Struct for upserting")
            .block_with_close(&format!("type {}Input struct {{", ctx.var_name), "}", |b| {
                b.each(&ctx.fields, |b, field| {
                    // identifier fields stay pointer-typed so partial
                    // updates can omit them
                    let pointer = if field.is_id { "*" } else { "" };
                    b.line(&format!("{} {}{}", field.go_name, pointer, field.query_type))
                })
            })
            .build()
    }

    fn wrapper_chunk(&self) -> String {
        let ctx = self.ctx;
        CodeBuilder::go()
            .comment("Struct for response")
            .block_with_close(
                &format!("type {}Resolver struct {{", ctx.var_name),
                "}",
                |b| b.line(&format!("{} *{}", ctx.var_name, ctx.var_name)),
            )
            .build()
    }

    fn resolve_chunk(&self) -> String {
        let ctx = self.ctx;
        let models = self.models();
        CodeBuilder::go()
            .block_with_close(
                &format!(
                    "func Resolve{}(args struct{{ ID graphql.ID }}) (response []*{}Resolver) {{",
                    ctx.type_name, ctx.var_name
                ),
                "}",
                |b| {
                    b.block_with_close("if args.ID != \"\" {", "}", |b| {
                        b.line(&format!(
                            "response = append(response, &{}Resolver{{{}: Map{}({}.{}({}.ConvertId(args.ID)))}})",
                            ctx.var_name,
                            ctx.var_name,
                            ctx.type_name,
                            models,
                            ctx.get_name(),
                            self.utils()
                        ))
                        .line("return response")
                    })
                    .block_with_close(
                        &format!("for _, val := range {}.{}() {{", models, ctx.get_all_name()),
                        "}",
                        |b| {
                            b.line(&format!(
                                "response = append(response, &{}Resolver{{{}: Map{}(val)}})",
                                ctx.var_name, ctx.var_name, ctx.type_name
                            ))
                        },
                    )
                    .line("return response")
                },
            )
            .build()
    }

    fn field_resolver_chunks(&self) -> Vec<String> {
        let ctx = self.ctx;
        let mut chunks = vec![CodeBuilder::go().comment("Fields resolvers").build()];
        for field in &ctx.fields {
            chunks.push(
                CodeBuilder::go()
                    .block_with_close(
                        &format!(
                            "func (r *{}Resolver) {}() {} {{",
                            ctx.var_name, field.go_name, field.query_type
                        ),
                        "}",
                        |b| {
                            b.line(&format!(
                                "return r.{}.{}",
                                ctx.var_name, field.query_name
                            ))
                        },
                    )
                    .build(),
            );
        }
        chunks
    }

    fn mapper_chunk(&self) -> String {
        let ctx = self.ctx;
        let models = self.models();
        let arg = format!("model{}", ctx.type_name);
        CodeBuilder::go()
            .comment("Mapper methods")
            .block_with_close(
                &format!(
                    "func Map{}({} {}.{}) *{} {{",
                    ctx.type_name, arg, models, ctx.type_name, ctx.var_name
                ),
                "}",
                |b| {
                    let b = b
                        .block_with_close(
                            &format!(
                                "if reflect.DeepEqual({}, {}.{}{{}}) {{",
                                arg, models, ctx.type_name
                            ),
                            "}",
                            |b| b.line(&format!("return &{}{{}}", ctx.var_name)),
                        )
                        .blank()
                        .comment(&format!(
                            "Create graphql {} from {} {}",
                            ctx.var_name, models, ctx.type_name
                        ));
                    b.block_with_close(
                        &format!("{} := {}{{", ctx.var_name, ctx.var_name),
                        "}",
                        |b| {
                            b.each(&ctx.fields, |b, field| {
                                let value = if field.is_id {
                                    format!("{}.UintToGraphId({}.{})", self.utils(), arg, field.go_name)
                                } else if field.query_type == "int32" {
                                    format!("int32({}.{})", arg, field.go_name)
                                } else {
                                    format!("{}.{}", arg, field.go_name)
                                };
                                b.line(&format!("{}: {},", field.query_name, value))
                            })
                        },
                    )
                    .line(&format!("return &{}", ctx.var_name))
                },
            )
            .build()
    }
}

impl GeneratedFile for ResolverGo<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(&self.paths.source_root)
            .join(&self.paths.graphql)
            .join(format!("{}_resolver.go", self.ctx.var_name))
    }

    fn render(&self) -> String {
        let mut file = GoFile::new(qualifier(&self.paths.graphql).to_string())
            .import_aliased("graphql", &self.paths.graphql_lib)
            .import(&self.paths.models)
            .import("reflect")
            .import(&self.paths.utils);

        file = file
            .add(self.representation_chunk())
            .add(self.input_chunk())
            .add(self.wrapper_chunk())
            .add(self.resolve_chunk());

        for chunk in self.field_resolver_chunks() {
            file = file.add(chunk);
        }

        file.add(self.mapper_chunk()).render()
    }
}
