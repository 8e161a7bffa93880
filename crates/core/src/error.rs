//! Error types for dungeon generation and configuration loading.

use std::{io, result};

use thiserror::Error;

pub type Result<T> = result::Result<T, DungeonError>;

#[derive(Debug, Error)]
pub enum DungeonError {
    /// Generation parameters that can never yield a valid level.
    #[error("invalid generation config: {0}")]
    InvalidConfig(String),

    /// The layout pass accepted no room, so there is nowhere to spawn the player.
    #[error("generation failed: no rooms were placed")]
    NoRoomsPlaced,

    #[error("config file I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("config file is not valid JSON: {0}")]
    ConfigFormat(#[from] serde_json::Error),
}
