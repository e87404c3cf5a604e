use thiserror::Error;

use crate::types::Vertex;

#[derive(Error, Debug)]
pub enum OutlineError {
    #[error("Failed to load image: {0}")]
    ImageLoad(#[from] image::ImageError),

    #[error("Grid is not square: {rows} rows, row {row} has {len} cells")]
    NotSquare { rows: usize, row: usize, len: usize },

    #[error("Invalid cell character {ch:?} at row {row}, column {col}")]
    InvalidCell { ch: char, row: usize, col: usize },

    /// The tracer ran out of edges before returning to the loop start.
    /// Only an unbalanced edge set can cause this.
    #[error("Loop starting at {start} stalled at {stalled_at} before closing")]
    UnclosedLoop { start: Vertex, stalled_at: Vertex },

    #[error("Path data syntax error at byte {offset}: {message}")]
    PathSyntax { offset: usize, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),
}

pub type Result<T> = std::result::Result<T, OutlineError>;
