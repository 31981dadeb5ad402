//! Structured representation of one generated Go source file.
//!
//! A file is a package clause, a sorted import set and a sequence of body
//! chunks separated by blank lines. Emitters build chunks with
//! [`relgen_core::CodeBuilder`] and hand them to a `GoFile` for assembly.

/// One import of a generated file, optionally aliased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoImport {
    path: String,
    alias: Option<String>,
}

impl GoImport {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            alias: None,
        }
    }

    pub fn aliased(alias: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            alias: Some(alias.into()),
        }
    }

    fn render(&self) -> String {
        match &self.alias {
            Some(alias) => format!("{} \"{}\"", alias, self.path),
            None => format!("\"{}\"", self.path),
        }
    }
}

/// A Go source file under construction.
#[derive(Debug, Clone)]
pub struct GoFile {
    package: String,
    imports: Vec<GoImport>,
    chunks: Vec<String>,
}

impl GoFile {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            imports: Vec::new(),
            chunks: Vec::new(),
        }
    }

    /// Add an unaliased import.
    pub fn import(mut self, path: impl Into<String>) -> Self {
        self.imports.push(GoImport::new(path));
        self
    }

    /// Add an aliased import.
    pub fn import_aliased(mut self, alias: impl Into<String>, path: impl Into<String>) -> Self {
        self.imports.push(GoImport::aliased(alias, path));
        self
    }

    /// Add a body chunk. Chunks render in insertion order, separated by one
    /// blank line; empty chunks are dropped.
    pub fn add(mut self, chunk: impl Into<String>) -> Self {
        let chunk = chunk.into();
        if !chunk.is_empty() {
            self.chunks.push(chunk);
        }
        self
    }

    /// Render the file: package clause, import block (paths sorted), body.
    pub fn render(&self) -> String {
        let mut out = format!("package {}\n", self.package);

        let mut imports = self.imports.clone();
        imports.sort_by(|a, b| a.path.cmp(&b.path));
        imports.dedup();
        match imports.len() {
            0 => {}
            1 => {
                out.push('\n');
                out.push_str(&format!("import {}\n", imports[0].render()));
            }
            _ => {
                out.push('\n');
                out.push_str("import (\n");
                for import in &imports {
                    out.push_str(&format!("\t{}\n", import.render()));
                }
                out.push_str(")\n");
            }
        }

        for chunk in &self.chunks {
            out.push('\n');
            out.push_str(chunk.trim_end());
            out.push('\n');
        }

        out
    }
}

/// Package qualifier of an import path (its last segment).
pub(crate) fn qualifier(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_only() {
        assert_eq!(GoFile::new("models").render(), "package models\n");
    }

    #[test]
    fn test_single_import() {
        let file = GoFile::new("models").import("database");
        assert_eq!(
            file.render(),
            "package models\n\nimport \"database\"\n"
        );
    }

    #[test]
    fn test_imports_are_sorted_and_deduped() {
        let file = GoFile::new("controllers")
            .import("router")
            .import("encoding/json")
            .import("router")
            .import_aliased("graphql", "github.com/neelance/graphql-go");

        let code = file.render();
        let expected = "package controllers\n\nimport (\n\t\"encoding/json\"\n\tgraphql \"github.com/neelance/graphql-go\"\n\t\"router\"\n)\n";
        assert_eq!(code, expected);
    }

    #[test]
    fn test_chunks_are_blank_line_separated() {
        let file = GoFile::new("models")
            .add("type Car struct {\n}\n")
            .add("func GetCar() {\n}");

        assert_eq!(
            file.render(),
            "package models\n\ntype Car struct {\n}\n\nfunc GetCar() {\n}\n"
        );
    }

    #[test]
    fn test_qualifier() {
        assert_eq!(qualifier("database"), "database");
        assert_eq!(qualifier("github.com/neelance/graphql-go"), "graphql-go");
    }
}
