//! Error types
//!
//! Only configuration problems abort generation. Placement and door skips are
//! counted in [`GenerationStats`](crate::world::generation::GenerationStats).

use thiserror::Error;

use crate::world::Surface;

/// Errors surfaced to callers of the generator
#[derive(Error, Debug)]
pub enum GenError {
    #[error("unknown surface '{0}' (expected floor, wall or ceiling)")]
    UnknownSurface(String),

    #[error("texture pool for {0} surfaces must not be empty")]
    EmptyTexturePool(Surface),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] ron::error::SpannedError),

    #[error("failed to serialize configuration: {0}")]
    ConfigSerialize(#[from] ron::Error),
}

pub type Result<T> = std::result::Result<T, GenError>;
