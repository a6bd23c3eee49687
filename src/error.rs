//! Error types shared by the catalogue loader and the PackageKit client.

use std::path::PathBuf;

use thiserror::Error;

/// Failure reported by one backend stage.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub(crate) enum BackendError {
    /// The request never completed: bus unavailable, call rejected, reply malformed.
    #[error("{0}")]
    Transport(String),

    /// The backend ran the request and reported a failure.
    #[error("{details}")]
    Operation { code: u32, details: String },
}

impl BackendError {
    pub(crate) fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub(crate) fn operation(code: u32, details: impl Into<String>) -> Self {
        Self::Operation {
            code,
            details: details.into(),
        }
    }

    /// PackageKit error code, when the daemon reported one.
    pub(crate) fn code(&self) -> Option<u32> {
        match self {
            Self::Transport(_) => None,
            Self::Operation { code, .. } => Some(*code),
        }
    }
}

impl From<zbus::Error> for BackendError {
    fn from(err: zbus::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

impl From<zbus::zvariant::Error> for BackendError {
    fn from(err: zbus::zvariant::Error) -> Self {
        Self::Transport(format!("Malformed reply from PackageKit: {}", err))
    }
}

#[derive(Error, Debug)]
pub(crate) enum CatalogueError {
    #[error("Unable to open package data file (tried {})", display_paths(.tried))]
    Unavailable { tried: Vec<PathBuf> },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
