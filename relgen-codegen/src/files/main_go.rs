//! Bootstrap emitter.
//!
//! Emits the composition root of the scaffolded application: configuration
//! load, database connection, schema parse, route registration,
//! auto-migration of every generated model and the listener start.

use std::path::{Path, PathBuf};

use relgen_core::{CodeBuilder, GeneratedFile};
use relgen_meta::PackagePaths;

use crate::context::EntityContext;
use crate::go_file::{GoFile, qualifier};

pub struct MainGo<'a> {
    app_name: &'a str,
    contexts: &'a [EntityContext],
    paths: &'a PackagePaths,
}

impl<'a> MainGo<'a> {
    pub fn new(app_name: &'a str, contexts: &'a [EntityContext], paths: &'a PackagePaths) -> Self {
        Self {
            app_name,
            contexts,
            paths,
        }
    }
}

impl GeneratedFile for MainGo<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(format!("{}.go", self.app_name.to_lowercase()))
    }

    fn render(&self) -> String {
        let paths = self.paths;
        let config = qualifier(&paths.config);
        let controllers = qualifier(&paths.controllers);
        let database = qualifier(&paths.database);
        let jsonconfig = qualifier(&paths.jsonconfig);
        let models = qualifier(&paths.models);
        let graphql_pkg = qualifier(&paths.graphql);
        let route = qualifier(&paths.route);
        let server = qualifier(&paths.server);

        let conf_chunk = format!("var conf = &{}.Configuration{{}}\n", config);

        let init_chunk = CodeBuilder::go()
            .block_with_close("func init() {", "}", |b| {
                b.comment("Use all cpu cores")
                    .line("runtime.GOMAXPROCS(runtime.NumCPU())")
            })
            .build();

        let migrate_args = self
            .contexts
            .iter()
            .map(|ctx| format!("&{}.{}{{}}", models, ctx.type_name))
            .collect::<Vec<_>>()
            .join(", ");

        let main_chunk = CodeBuilder::go()
            .block_with_close("func main() {", "}", |b| {
                b.comment("Load the configuration file")
                    .line(&format!(
                        "{}.Load(\"{}\"+string(os.PathSeparator)+\"config.json\", conf)",
                        jsonconfig, config
                    ))
                    .blank()
                    .comment("Connect to database")
                    .line(&format!("{}.Connect(conf.Database)", database))
                    .blank()
                    .comment("Create schema")
                    .line(&format!(
                        "schema := graphql.MustParseSchema({}.Schema, &{}.Resolver{{}})",
                        graphql_pkg, graphql_pkg
                    ))
                    .blank()
                    .comment("Load the controller routes")
                    .line(&format!("{}.Load(schema)", controllers))
                    .blank()
                    .comment("Auto migrate all models")
                    .line(&format!("{}.SQL.AutoMigrate({})", database, migrate_args))
                    .blank()
                    .comment("Start the listener")
                    .line(&format!(
                        "{}.Run({}.LoadHTTP(), {}.LoadHTTPS(), conf.Server)",
                        server, route, route
                    ))
            })
            .build();

        GoFile::new("main")
            .import(&paths.config)
            .import(&paths.controllers)
            .import(&paths.database)
            .import_aliased("graphql", &paths.graphql_lib)
            .import(&paths.jsonconfig)
            .import(&paths.models)
            .import(&paths.graphql)
            .import("os")
            .import(&paths.route)
            .import("runtime")
            .import(&paths.server)
            .add(conf_chunk)
            .add(init_chunk)
            .add(main_chunk)
            .render()
    }
}
