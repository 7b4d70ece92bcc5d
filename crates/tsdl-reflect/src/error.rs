use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReflectError {
    #[error("malformed project JSON: {0}")]
    ProjectJson(#[source] serde_json::Error),

    #[error("malformed compatibility data: {0}")]
    CompatJson(#[source] serde_json::Error),

    #[error("malformed reflection mapping `{path}`: {source}")]
    MappingJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("reflection id {0} appears more than once")]
    DuplicateId(u32),

    #[error("no reflection with id {0}")]
    UnknownReflection(u32),

    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ReflectError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReflectError::Io {
            path: path.into(),
            source,
        }
    }
}
