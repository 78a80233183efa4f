use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(
        "config file {} must include: pallet_id, item_id, name, cantidad. Missing: {missing:?}",
        .path.display()
    )]
    Config { path: PathBuf, missing: Vec<String> },

    #[error("invalid config file {}: {source}", .path.display())]
    ConfigFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("missing arguments: {}. Alternatively use --config path/to/config.json", .0.join(", "))]
    MissingArguments(Vec<String>),

    #[error("cantidad must be a positive integer, got {0}")]
    Validation(i64),

    #[error("QR encoding failed: {0}")]
    Encode(String),

    #[error("image side overflows u32: {modules} modules, border {border}, box size {box_size}")]
    ImageTooLarge {
        modules: usize,
        border: u32,
        box_size: u32,
    },

    #[error("invalid label payload: {0}")]
    InvalidPayload(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
