use std::path::{Path, PathBuf};

use crate::errors::{TreeError, TreeResult};

pub trait PathExt {
    fn to_canonical(&self) -> TreeResult<PathBuf>;
}

impl PathExt for Path {
    fn to_canonical(&self) -> TreeResult<PathBuf> {
        self.canonicalize().map_err(|e| TreeError::PathResolution {
            path: self.to_path_buf(),
            reason: e.to_string(),
        })
    }
}
