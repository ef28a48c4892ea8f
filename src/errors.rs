use std::path::PathBuf;
use thiserror::Error;

use crate::exitcode;

/// Errors produced while building trees from external data.
///
/// The core tree operations never fail: invalid mutations and view
/// transitions are defined as silent no-ops. Everything here comes from
/// the builder layer (filesystem walks, dataset parsing).
#[derive(Error, Debug)]
pub enum TreeError {
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Failed to read input: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Invalid dataset format in {path}: {reason}")]
    InvalidFormat {
        path: PathBuf,
        reason: String,
    },

    #[error("Path resolution failed: {path}, reason: {reason}")]
    PathResolution {
        path: PathBuf,
        reason: String,
    },
}

impl TreeError {
    /// Exit code for this error (sysexits.h conventions).
    pub fn exit_code(&self) -> i32 {
        match self {
            TreeError::PathNotFound(_) => exitcode::NOINPUT,
            TreeError::FileReadError(_) => exitcode::IOERR,
            TreeError::InvalidFormat { .. } => exitcode::DATAERR,
            TreeError::PathResolution { .. } => exitcode::NOINPUT,
        }
    }
}

pub type TreeResult<T> = Result<T, TreeError>;
