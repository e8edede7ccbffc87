// error.rs - Errors reported by the engine and its configuration

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("grid dimensions must be positive and fit in memory, got {width}x{height}")]
    InvalidDimension { width: usize, height: usize },
    #[error("pattern {name} needs {needed_width}x{needed_height} cells but the grid is {width}x{height}")]
    PatternTooLarge {
        name: &'static str,
        needed_width: usize,
        needed_height: usize,
        width: usize,
        height: usize,
    },
    #[error("snapshot of {width}x{height} carries {cells} cells")]
    SnapshotShape { width: usize, height: usize, cells: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
