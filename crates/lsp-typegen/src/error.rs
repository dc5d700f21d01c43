//! Errors surfaced by a generation run.

use crate::traits::RenderError;
use lsp_metamodel::ParseError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("unknown renderer `{0}`")]
    UnknownRenderer(String),
}
