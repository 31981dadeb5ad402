//! Storage-model emitter.
//!
//! Emits the per-entity `models` package file: the storage struct with its
//! scalar and composite fields, the table-name accessor, the five CRUD
//! functions, one fetch function per per-endpoint relation (four access
//! patterns, selected by relation kind) and, when the entity has
//! all-endpoint relations, the combined filterable sub-entity accessor.

use std::path::{Path, PathBuf};

use relgen_core::{CodeBuilder, GeneratedFile};
use relgen_meta::PackagePaths;

use crate::classify::RelationKind;
use crate::context::{EntityContext, RelationAccessor};
use crate::go_file::{GoFile, qualifier};

pub struct ModelGo<'a> {
    ctx: &'a EntityContext,
    paths: &'a PackagePaths,
}

impl<'a> ModelGo<'a> {
    pub fn new(ctx: &'a EntityContext, paths: &'a PackagePaths) -> Self {
        Self { ctx, paths }
    }

    fn db(&self) -> &str {
        qualifier(&self.paths.database)
    }

    fn struct_chunk(&self) -> String {
        let ctx = self.ctx;
        CodeBuilder::go()
            .block_with_close(&format!("type {} struct {{", ctx.type_name), "}", |b| {
                let b = b.each(&ctx.fields, |b, field| {
                    b.line(&format!(
                        "{} {} `gorm:\"column:{}\" json:\"{},omitempty\"`",
                        field.go_name, field.storage_type, field.column, field.column
                    ))
                });
                b.each(&ctx.relations.composite_fields, |b, field| {
                    b.line(&format!(
                        "{} {} `gorm:\"{}\" json:\"{},omitempty\"`",
                        field.name, field.go_type, field.gorm, field.json
                    ))
                })
            })
            .build()
    }

    fn table_name_chunk(&self) -> String {
        let ctx = self.ctx;
        CodeBuilder::go()
            .block_with_close(
                &format!("func ({}) TableName() string {{", ctx.type_name),
                "}",
                |b| b.line(&format!("return \"{}\"", ctx.table_name)),
            )
            .build()
    }

    fn children_chunk(&self) -> String {
        let ctx = self.ctx;
        let children = ctx
            .relations
            .child_field_names()
            .iter()
            .map(|name| format!("\"{}\"", name))
            .collect::<Vec<_>>()
            .join(", ");
        CodeBuilder::go()
            .comment("Child entities")
            .line(&format!(
                "var {} = []string{{{}}}",
                ctx.children_var(),
                children
            ))
            .build()
    }

    fn get_all_chunk(&self) -> String {
        let ctx = self.ctx;
        CodeBuilder::go()
            .comment(&format!(
                "This method will return a list of all {}s",
                ctx.type_name
            ))
            .block_with_close(
                &format!("func {}() []{} {{", ctx.get_all_name(), ctx.type_name),
                "}",
                |b| {
                    b.line(&format!("data := []{}{{}}", ctx.type_name))
                        .line(&format!("{}.SQL.Find(&data)", self.db()))
                        .line("return data")
                },
            )
            .build()
    }

    fn get_chunk(&self) -> String {
        let ctx = self.ctx;
        CodeBuilder::go()
            .comment(&format!(
                "This method will return one {} based on id",
                ctx.type_name
            ))
            .block_with_close(
                &format!("func {}(ID uint) {} {{", ctx.get_name(), ctx.type_name),
                "}",
                |b| {
                    b.line(&format!("data := {}{{}}", ctx.type_name))
                        .line(&format!("{}.SQL.First(&data, ID)", self.db()))
                        .line("return data")
                },
            )
            .build()
    }

    fn post_chunk(&self) -> String {
        let ctx = self.ctx;
        CodeBuilder::go()
            .comment(&format!(
                "This method will insert one {} in db",
                ctx.type_name
            ))
            .block_with_close(
                &format!("func {}(data {}) {} {{", ctx.post_name(), ctx.type_name, ctx.type_name),
                "}",
                |b| {
                    b.line(&format!("{}.SQL.Create(&data)", self.db()))
                        .line("return data")
                },
            )
            .build()
    }

    fn put_chunk(&self) -> String {
        let ctx = self.ctx;
        CodeBuilder::go()
            .comment(&format!(
                "This method will update {} based on id",
                ctx.type_name
            ))
            .block_with_close(
                &format!(
                    "func {}(newData {}) {} {{",
                    ctx.put_name(),
                    ctx.type_name,
                    ctx.type_name
                ),
                "}",
                |b| {
                    b.line(&format!("oldData := {}{{Id: newData.Id}}", ctx.type_name))
                        .line(&format!("{}.SQL.Model(&oldData).Updates(newData)", self.db()))
                        .line("return newData")
                },
            )
            .build()
    }

    fn delete_chunk(&self) -> String {
        let ctx = self.ctx;
        CodeBuilder::go()
            .comment(&format!(
                "This method will delete {} based on id",
                ctx.type_name
            ))
            .block_with_close(
                &format!("func {}(ID uint) {} {{", ctx.delete_name(), ctx.type_name),
                "}",
                |b| {
                    b.line(&format!("data := {}{{Id: ID}}", ctx.type_name))
                        .line(&format!("{}.SQL.Delete(&data)", self.db()))
                        .line("return data")
                },
            )
            .build()
    }

    fn accessor_chunk(&self, accessor: &RelationAccessor) -> String {
        let ctx = self.ctx;
        let db = self.db();
        match accessor.kind {
            // fetch all rows of the related table matching the anchor
            RelationKind::OneToMany | RelationKind::OneToOneNormal => {
                let ret = format!("[]{}", accessor.target);
                CodeBuilder::go()
                    .comment(&format!(
                        "This method will return the {} of one {}",
                        accessor.field, ctx.type_name
                    ))
                    .block_with_close(
                        &format!("func {}(ID uint) {} {{", accessor.method, ret),
                        "}",
                        |b| {
                            b.line(&format!("data := {}{{}}", ret))
                                .line(&format!(
                                    "{}.SQL.Find(&data, \" {} = ?\", ID)",
                                    db, accessor.anchor
                                ))
                                .line("return data")
                        },
                    )
                    .build()
            }
            // same anchor filter, at most one row
            RelationKind::OneToOneSelf => CodeBuilder::go()
                .comment(&format!(
                    "This method will return the related {} of one {}",
                    accessor.target, ctx.type_name
                ))
                .block_with_close(
                    &format!("func {}(ID uint) {} {{", accessor.method, accessor.target),
                    "}",
                    |b| {
                        b.line(&format!("data := {}{{}}", accessor.target))
                            .line(&format!(
                                "{}.SQL.Find(&data, \" {} = ?\", ID)",
                                db, accessor.anchor
                            ))
                            .line("return data")
                    },
                )
                .build(),
            // resolve the anchor from the current row, then fetch the
            // single related row by that value
            RelationKind::ManyToOne | RelationKind::OneToOneReverse => CodeBuilder::go()
                .comment(&format!(
                    "This method will return the {} one {} belongs to",
                    accessor.target, ctx.type_name
                ))
                .block_with_close(
                    &format!("func {}(ID uint) {} {{", accessor.method, accessor.target),
                    "}",
                    |b| {
                        b.line(&format!("{} := {}{{Id: ID}}", ctx.var_name, ctx.type_name))
                            .line(&format!("data := {}{{}}", accessor.target))
                            .line(&format!(
                                "{}.SQL.Find(&data, \" id = (?)\", {}.SQL.Select(\"{}\").First(&{}).QueryExpr())",
                                db, db, accessor.anchor, ctx.var_name
                            ))
                            .line("return data")
                    },
                )
                .build(),
            // fetch the current row, then resolve the association
            RelationKind::ManyToMany => CodeBuilder::go()
                .comment(&format!(
                    "This method will return one {} with its {}",
                    ctx.type_name, accessor.field
                ))
                .block_with_close(
                    &format!("func {}(ID uint) {} {{", accessor.method, ctx.type_name),
                    "}",
                    |b| {
                        b.line(&format!("data := {}{{Id: ID}}", ctx.type_name))
                            .line(&format!("{}.SQL.Find(&data)", db))
                            .line(&format!(
                                "{}.SQL.Model(&data).Association(\"{}\").Find(&data.{})",
                                db, accessor.field, accessor.field
                            ))
                            .line("return data")
                    },
                )
                .build(),
            // unrefined tag never reaches the per-endpoint projection
            RelationKind::OneToOne => String::new(),
        }
    }

    fn all_chunk(&self) -> String {
        let ctx = self.ctx;
        let children_var = ctx.children_var();
        CodeBuilder::go()
            .comment(&format!(
                "This method will return one {} with the requested sub entities",
                ctx.type_name
            ))
            .block_with_close(
                &format!(
                    "func {}(ID uint, children string) {} {{",
                    ctx.all_method_name(),
                    ctx.type_name
                ),
                "}",
                |b| {
                    b.line(&format!("data := {}{{Id: ID}}", ctx.type_name))
                        .line("neededChildren := []string{}")
                        .block_with_close("if children != \"\" {", "} else {", |b| {
                            b.block_with_close(
                                &format!("for _, child := range {} {{", children_var),
                                "}",
                                |b| {
                                    b.block_with_close(
                                        "if isValueInList(child, strings.Split(children, \",\")) {",
                                        "}",
                                        |b| b.line("neededChildren = append(neededChildren, child)"),
                                    )
                                },
                            )
                        })
                        .indent()
                        .line(&format!("neededChildren = {}", children_var))
                        .dedent()
                        .line("}")
                        .block_with_close("if len(neededChildren) > 0 {", "}", |b| {
                            b.line(&format!("tx := {}.SQL", self.db()))
                                .block_with_close(
                                    "for _, child := range neededChildren {",
                                    "}",
                                    |b| b.line("tx = tx.Preload(child)"),
                                )
                                .line("tx.First(&data)")
                        })
                        .line("return data")
                },
            )
            .build()
    }
}

impl GeneratedFile for ModelGo<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(&self.paths.source_root)
            .join(&self.paths.models)
            .join(format!("{}.go", self.ctx.var_name))
    }

    fn render(&self) -> String {
        let models = qualifier(&self.paths.models).to_string();
        let mut file = GoFile::new(models).import(&self.paths.database);
        if self.ctx.has_all_endpoint() {
            file = file.import("strings");
        }

        file = file
            .add(self.struct_chunk())
            .add(self.table_name_chunk())
            .add(self.children_chunk())
            .add(self.get_all_chunk())
            .add(self.get_chunk())
            .add(self.post_chunk())
            .add(self.put_chunk())
            .add(self.delete_chunk());

        for accessor in self.ctx.relation_accessors() {
            file = file.add(self.accessor_chunk(&accessor));
        }

        if self.ctx.has_all_endpoint() {
            file = file.add(self.all_chunk());
        }

        file.render()
    }
}
