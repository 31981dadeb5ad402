use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for relgen-meta operations (boxed to reduce size on stack).
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("create a relgen.toml for your project or pass --config"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse relgen.toml")]
    #[diagnostic(code(relgen::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("metadata store query failed")]
    #[diagnostic(
        code(relgen::store_error),
        help("check the [database] url in relgen.toml and that the metadata tables exist")
    )]
    Store {
        #[source]
        source: sqlx::Error,
    },

    #[error("relation {relation_id} has unknown relation type discriminant {discriminant}")]
    #[diagnostic(
        code(relgen::unknown_relation_type),
        help("valid discriminants are 1 (one to one), 2 (one to many), 3 (many to many)")
    )]
    UnknownRelationType { relation_id: i32, discriminant: i32 },
}

impl Error {
    /// Create an io error for a config path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Box<Self> {
        Box::new(Error::Io {
            path: path.into(),
            source,
        })
    }

    /// Create a parse error from a toml error with source context.
    pub fn parse(source: toml::de::Error, src: &str, filename: &str) -> Box<Self> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        })
    }

    /// Wrap a store-level failure.
    pub fn store(source: sqlx::Error) -> Box<Self> {
        Box::new(Error::Store { source })
    }
}
