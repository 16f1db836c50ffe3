use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("couldn't read image {}", .path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("couldn't open image {}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("couldn't write image {}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("image has invalid dimensions: {0}x{1}")]
    EmptyImage(u32, u32),

    #[error("invalid square size: {0} (must be positive)")]
    InvalidSquareSize(u32),

    #[error("invalid worker count: {0} (must be positive)")]
    InvalidWorkers(usize),

    #[error("invalid mode: {0:?} (use 'S' for single-threaded or 'M' for multi-threaded)")]
    InvalidMode(String),

    #[error("processing interrupted after {processed} of {total} blocks")]
    Interrupted { processed: usize, total: usize },

    #[error("image buffer lock poisoned by a panicking worker")]
    Poisoned,

    #[error("couldn't build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
