//! Generation orchestration.
//!
//! One batch run: for each loaded entity, in store order, render and write
//! the three per-entity artifacts; then the root resolver, the schema
//! description and the bootstrap. Files are overwritten unconditionally;
//! the first write failure aborts the run and leaves earlier output on
//! disk.

use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use relgen_core::GeneratedFile;
use relgen_meta::{PackagePaths, SchemaGraph};
use tracing::info;

use crate::context::EntityContext;
use crate::files::{ControllerGo, MainGo, ModelGo, ResolverGo, RootResolverGo, SchemaGo};

/// A rendered file that has not been written to disk.
pub struct PreviewFile {
    pub path: String,
    pub content: String,
}

/// What one generation run produced.
#[derive(Debug, Default)]
pub struct GenerateSummary {
    /// Transformed entity type names, in generation order.
    pub entities: Vec<String>,
    /// Every file written, in write order.
    pub files: Vec<PathBuf>,
}

pub struct Generator<'a> {
    paths: &'a PackagePaths,
    app_name: &'a str,
    contexts: Vec<EntityContext>,
}

impl<'a> Generator<'a> {
    pub fn new(graph: &SchemaGraph, paths: &'a PackagePaths, app_name: &'a str) -> Self {
        let contexts = graph.entities.iter().map(EntityContext::build).collect();
        Self {
            paths,
            app_name,
            contexts,
        }
    }

    /// Render every artifact without writing to disk.
    pub fn preview(&self) -> Vec<PreviewFile> {
        let mut files = Vec::new();
        let base = Path::new("");

        for ctx in &self.contexts {
            for artifact in self.entity_artifacts(ctx) {
                files.push(PreviewFile {
                    path: artifact.path(base).display().to_string(),
                    content: artifact.render(),
                });
            }
        }
        for artifact in self.root_artifacts() {
            files.push(PreviewFile {
                path: artifact.path(base).display().to_string(),
                content: artifact.render(),
            });
        }

        files
    }

    /// Generate all artifacts into the output directory.
    pub fn generate(&self, output_dir: &Path) -> Result<GenerateSummary> {
        let mut summary = GenerateSummary::default();

        for ctx in &self.contexts {
            for artifact in self.entity_artifacts(ctx) {
                let written = artifact
                    .write(output_dir)
                    .wrap_err_with(|| format!("failed to generate {}", ctx.type_name))?;
                summary.files.push(written);
            }
            info!("{} generated", ctx.type_name);
            summary.entities.push(ctx.type_name.clone());
        }

        for artifact in self.root_artifacts() {
            let written = artifact
                .write(output_dir)
                .wrap_err("failed to generate root artifacts")?;
            summary.files.push(written);
        }
        info!("{} generated", self.app_name);

        Ok(summary)
    }

    fn entity_artifacts<'b>(&'b self, ctx: &'b EntityContext) -> Vec<Box<dyn GeneratedFile + 'b>> {
        vec![
            Box::new(ModelGo::new(ctx, self.paths)),
            Box::new(ControllerGo::new(ctx, self.paths)),
            Box::new(ResolverGo::new(ctx, self.paths)),
        ]
    }

    fn root_artifacts(&self) -> Vec<Box<dyn GeneratedFile + '_>> {
        vec![
            Box::new(RootResolverGo::new(&self.contexts, self.paths)),
            Box::new(SchemaGo::new(&self.contexts, self.paths)),
            Box::new(MainGo::new(self.app_name, &self.contexts, self.paths)),
        ]
    }
}
