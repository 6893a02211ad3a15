/// Error types shared by the loader, the viewer loop and the display surfaces
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure while loading a mesh file
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to open mesh file \"{}\": {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read mesh file \"{}\": {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("out of memory while reserving {requested} {what}")]
    OutOfMemory { what: &'static str, requested: usize },
    #[error("parse error at line {line}, column {column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },
    #[error("mesh file contains no meshes")]
    NoMeshes,
}

/// Failure reported by a display surface
#[derive(Error, Debug)]
pub enum SurfaceError {
    #[error("{0}")]
    Init(String),
    #[error("display i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("display surface lost: {0}")]
    Lost(String),
}

/// Top-level error for a viewer session
#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("{0}")]
    Usage(String),
    #[error("failed to initialize display: {0}")]
    Init(#[source] SurfaceError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("display failure: {0}")]
    Display(#[source] SurfaceError),
}

pub type ViewerResult<T> = Result<T, ViewerError>;
