//! Explicit input and output locations for an analysis run.
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Where tables are read from and where results are written to.
///
/// Constructed once at startup with [`WorkDirs::new`], which checks the input
/// directory and creates the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WorkDirs {
    input_dir: PathBuf,
    output_dir: PathBuf,
}

impl WorkDirs {
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(input_dir: P, output_dir: Q) -> Result<Self, ConfigError> {
        let input_dir = input_dir.into();
        let output_dir = output_dir.into();
        if !input_dir.exists() {
            return Err(ConfigError::MissingInputDir(input_dir));
        }
        if !input_dir.is_dir() {
            return Err(ConfigError::InputNotADirectory(input_dir));
        }
        if !output_dir.exists() {
            debug!("Creating output directory {}", output_dir.display());
            fs::create_dir_all(&output_dir).map_err(|source| ConfigError::OutputDir {
                path: output_dir.clone(),
                source,
            })?;
        }
        Ok(Self {
            input_dir,
            output_dir,
        })
    }

    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// The path of `name` under the input directory
    pub fn input_path<P: AsRef<Path>>(&self, name: P) -> PathBuf {
        self.input_dir.join(name)
    }

    /// The path of `name` under the output directory
    pub fn output_path<P: AsRef<Path>>(&self, name: P) -> PathBuf {
        self.output_dir.join(name)
    }
}
