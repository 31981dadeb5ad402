//! Controller emitter.
//!
//! Emits the per-entity `controllers` package file: the route registration
//! `init()` and one request handler per model function. Handlers extract
//! path and query parameters, decode request bodies where applicable and
//! write the JSON response envelope; a body-decode failure short-circuits
//! with a plain string body and never reaches the model layer.

use std::path::{Path, PathBuf};

use relgen_core::{CodeBuilder, GeneratedFile};
use relgen_meta::PackagePaths;

use crate::context::EntityContext;
use crate::go_file::{GoFile, qualifier};

pub struct ControllerGo<'a> {
    ctx: &'a EntityContext,
    paths: &'a PackagePaths,
}

impl<'a> ControllerGo<'a> {
    pub fn new(ctx: &'a EntityContext, paths: &'a PackagePaths) -> Self {
        Self { ctx, paths }
    }

    fn models(&self) -> &str {
        qualifier(&self.paths.models)
    }

    fn router(&self) -> &str {
        qualifier(&self.paths.router)
    }

    fn utils(&self) -> &str {
        qualifier(&self.paths.utils)
    }

    /// The two lines writing the success envelope.
    fn respond(&self, b: CodeBuilder) -> CodeBuilder {
        b.line("w.Header().Set(\"Content-Type\", \"application/json\")")
            .line(&format!(
                "json.NewEncoder(w).Encode({}.Response{{2000, \"Data fetched successfully\", data}})",
                self.models()
            ))
    }

    /// The decode-failure short-circuit: a bare string body, no envelope.
    fn reject_invalid(&self, b: CodeBuilder) -> CodeBuilder {
        b.block_with_close("if err != nil {", "}", |b| {
            b.line("w.Header().Set(\"Content-Type\", \"application/json\")")
                .line("json.NewEncoder(w).Encode(\"invalid data\")")
                .line("return")
        })
    }

    fn routes_chunk(&self) -> String {
        let ctx = self.ctx;
        let router = self.router();
        let root = format!("/{}", ctx.var_name);
        let by_id = format!("/{}/:id", ctx.var_name);
        let accessors = ctx.relation_accessors();

        CodeBuilder::go()
            .comment(&format!("Routes related to {}", ctx.type_name))
            .block_with_close("func init() {", "}", |b| {
                let b = b
                    .comment("Standard routes")
                    .line(&format!("{}.Get(\"{}\", {})", router, root, ctx.get_all_name()))
                    .line(&format!("{}.Get(\"{}\", {})", router, by_id, ctx.get_name()))
                    .line(&format!("{}.Post(\"{}\", {})", router, root, ctx.post_name()))
                    .line(&format!("{}.Put(\"{}\", {})", router, by_id, ctx.put_name()))
                    .line(&format!(
                        "{}.Delete(\"{}\", {})",
                        router,
                        by_id,
                        ctx.delete_name()
                    ));
                let b = b.when(!accessors.is_empty(), |b| {
                    b.blank().comment("Sub entity routes").each(&accessors, |b, accessor| {
                        b.line(&format!(
                            "{}.Get(\"{}\", {})",
                            router, accessor.route, accessor.method
                        ))
                    })
                });
                b.when(ctx.has_all_endpoint(), |b| {
                    b.blank().comment("Combined sub entities route").line(&format!(
                        "{}.Get(\"/{}/:id/all\", {})",
                        router,
                        ctx.var_name,
                        ctx.all_method_name()
                    ))
                })
            })
            .build()
    }

    fn handler_header(&self, name: &str) -> String {
        format!("func {}(w http.ResponseWriter, req *http.Request) {{", name)
    }

    fn get_all_chunk(&self) -> String {
        let ctx = self.ctx;
        CodeBuilder::go()
            .block_with_close(&self.handler_header(&ctx.get_all_name()), "}", |b| {
                let b = b.line(&format!("data := {}.{}()", self.models(), ctx.get_all_name()));
                self.respond(b)
            })
            .build()
    }

    fn get_chunk(&self) -> String {
        let ctx = self.ctx;
        CodeBuilder::go()
            .block_with_close(&self.handler_header(&ctx.get_name()), "}", |b| {
                let b = b
                    .line(&format!("params := {}.Params(req)", self.router()))
                    .line(&format!(
                        "ID := {}.StringToUInt(params.ByName(\"id\"))",
                        self.utils()
                    ))
                    .line(&format!("data := {}.{}(ID)", self.models(), ctx.get_name()));
                self.respond(b)
            })
            .build()
    }

    fn post_chunk(&self) -> String {
        let ctx = self.ctx;
        CodeBuilder::go()
            .block_with_close(&self.handler_header(&ctx.post_name()), "}", |b| {
                let b = b
                    .line("decoder := json.NewDecoder(req.Body)")
                    .line(&format!("var data {}.{}", self.models(), ctx.type_name))
                    .line("err := decoder.Decode(&data)");
                let b = self.reject_invalid(b);
                let b = b
                    .line("defer req.Body.Close()")
                    .line(&format!("data = {}.{}(data)", self.models(), ctx.post_name()));
                self.respond(b)
            })
            .build()
    }

    fn put_chunk(&self) -> String {
        let ctx = self.ctx;
        CodeBuilder::go()
            .block_with_close(&self.handler_header(&ctx.put_name()), "}", |b| {
                let b = b
                    .line(&format!("params := {}.Params(req)", self.router()))
                    .line("ID := params.ByName(\"id\")")
                    .line("decoder := json.NewDecoder(req.Body)")
                    .line(&format!("var newData {}.{}", self.models(), ctx.type_name))
                    .line("err := decoder.Decode(&newData)");
                let b = self.reject_invalid(b);
                let b = b
                    .line("defer req.Body.Close()")
                    .line(&format!("newData.Id = {}.StringToUInt(ID)", self.utils()))
                    .line(&format!(
                        "data := {}.{}(newData)",
                        self.models(),
                        ctx.put_name()
                    ));
                self.respond(b)
            })
            .build()
    }

    fn delete_chunk(&self) -> String {
        let ctx = self.ctx;
        CodeBuilder::go()
            .block_with_close(&self.handler_header(&ctx.delete_name()), "}", |b| {
                let b = b
                    .line(&format!("params := {}.Params(req)", self.router()))
                    .line(&format!(
                        "ID := {}.StringToUInt(params.ByName(\"id\"))",
                        self.utils()
                    ))
                    .line(&format!(
                        "data := {}.{}(ID)",
                        self.models(),
                        ctx.delete_name()
                    ));
                self.respond(b)
            })
            .build()
    }

    fn accessor_chunk(&self, method: &str) -> String {
        CodeBuilder::go()
            .block_with_close(&self.handler_header(method), "}", |b| {
                let b = b
                    .line(&format!("params := {}.Params(req)", self.router()))
                    .line(&format!(
                        "ID := {}.StringToUInt(params.ByName(\"id\"))",
                        self.utils()
                    ))
                    .line(&format!("data := {}.{}(ID)", self.models(), method));
                self.respond(b)
            })
            .build()
    }

    fn all_chunk(&self) -> String {
        let ctx = self.ctx;
        CodeBuilder::go()
            .block_with_close(&self.handler_header(&ctx.all_method_name()), "}", |b| {
                let b = b
                    .line(&format!("params := {}.Params(req)", self.router()))
                    .line(&format!(
                        "ID := {}.StringToUInt(params.ByName(\"id\"))",
                        self.utils()
                    ))
                    .line("children := req.URL.Query().Get(\"child\")")
                    .line(&format!(
                        "data := {}.{}(ID, children)",
                        self.models(),
                        ctx.all_method_name()
                    ));
                self.respond(b)
            })
            .build()
    }
}

impl GeneratedFile for ControllerGo<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(&self.paths.source_root)
            .join(&self.paths.controllers)
            .join(format!("{}.go", self.ctx.var_name))
    }

    fn render(&self) -> String {
        let mut file = GoFile::new(qualifier(&self.paths.controllers).to_string())
            .import("encoding/json")
            .import(&self.paths.models)
            .import("net/http")
            .import(&self.paths.router)
            .import(&self.paths.utils);

        file = file
            .add(self.routes_chunk())
            .add(self.get_all_chunk())
            .add(self.get_chunk())
            .add(self.post_chunk())
            .add(self.put_chunk())
            .add(self.delete_chunk());

        for accessor in self.ctx.relation_accessors() {
            file = file.add(self.accessor_chunk(&accessor.method));
        }

        if self.ctx.has_all_endpoint() {
            file = file.add(self.all_chunk());
        }

        file.render()
    }
}
