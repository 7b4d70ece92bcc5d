use std::path::PathBuf;

use thiserror::Error;
use tsdl_reflect::ReflectError;

#[derive(Debug, Error)]
pub enum LinksError {
    #[error("resolver option `{0}` is required")]
    MissingOption(&'static str),

    #[error("cannot read host version `{0}`")]
    InvalidHostVersion(String),

    #[error("could not open url mapping file at {path}: {source}")]
    MappingUnreadable {
        path: PathBuf,
        #[source]
        source: ReflectError,
    },
}
