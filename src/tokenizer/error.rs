use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::error::Category;
use thiserror::Error;

/// What went wrong while loading a vocabulary, when it can be classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadErrorKind {
    MissingResource,
    MalformedJson,
    SchemaMismatch,
}

impl fmt::Display for LoadErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LoadErrorKind::MissingResource => "missing resource",
            LoadErrorKind::MalformedJson => "malformed json",
            LoadErrorKind::SchemaMismatch => "schema mismatch",
        };
        f.write_str(name)
    }
}

/// Failure to produce a vocabulary. The tokenizer is never constructed when
/// this is returned.
#[derive(Error, Debug)]
#[error("failed to load vocabulary{}: {}", location(.path), .cause)]
pub struct LoadError {
    kind: Option<LoadErrorKind>,
    cause: String,
    path: Option<PathBuf>,
}

impl LoadError {
    pub fn new(kind: Option<LoadErrorKind>, cause: impl Into<String>) -> Self {
        Self {
            kind,
            cause: cause.into(),
            path: None,
        }
    }

    pub fn missing_resource(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self::new(
            Some(LoadErrorKind::MissingResource),
            "file not found",
        )
        .with_path(path)
    }

    pub fn schema_mismatch(cause: impl Into<String>) -> Self {
        Self::new(Some(LoadErrorKind::SchemaMismatch), cause)
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn kind(&self) -> Option<LoadErrorKind> {
        self.kind
    }

    pub fn cause(&self) -> &str {
        &self.cause
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

fn location(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" from {}", p.display()))
        .unwrap_or_default()
}

impl From<io::Error> for LoadError {
    fn from(err: io::Error) -> Self {
        let kind = match err.kind() {
            io::ErrorKind::NotFound => Some(LoadErrorKind::MissingResource),
            _ => None,
        };
        Self::new(kind, err.to_string())
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        let kind = match err.classify() {
            Category::Syntax | Category::Eof => Some(LoadErrorKind::MalformedJson),
            Category::Data => Some(LoadErrorKind::SchemaMismatch),
            Category::Io => None,
        };
        Self::new(kind, err.to_string())
    }
}
