use {
    crate::selection::Axis,
    std::{io, path::PathBuf},
};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("snapshot file {path:?} does not exist")]
    FileNotFound { path: PathBuf },
    #[error("snapshot file {path:?} has {actual} bytes, expected {expected} for the declared extents")]
    ShapeMismatch {
        path: PathBuf,
        expected: u64,
        actual: u64,
    },
    #[error("extents {nx} x {ny} x {nz} are too large to address")]
    ExtentsOverflow { nx: usize, ny: usize, nz: usize },
    #[error("{axis} selection reaches index {bound}, outside the domain extent of {extent}")]
    OutOfBounds {
        axis: Axis,
        bound: usize,
        extent: usize,
    },
    #[error("invalid {axis} selection: {reason}")]
    InvalidSelection { axis: Axis, reason: &'static str },
    #[error("invalid {name} {value:?}, expected one of {expected}")]
    InvalidOption {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("failed to read parameters from {path:?}")]
    Parameters {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to build array: {0}")]
    Shape(#[from] ndarray::ShapeError),
    #[error("failed to encode PNG: {0}")]
    Png(#[from] png::EncodingError),
    #[error("failed to serialize box: {0}")]
    Bincode(#[from] bincode::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
