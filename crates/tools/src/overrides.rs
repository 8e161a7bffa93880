use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use dungeon_core::GenerationConfig;

/// Command-line overrides layered on top of the defaults or a config file.
#[derive(Args, Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// JSON generation config; missing fields keep their defaults
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub width: Option<i32>,
    #[arg(long)]
    pub height: Option<i32>,
    #[arg(long)]
    pub room_min: Option<i32>,
    /// Exclusive upper bound for room sides
    #[arg(long)]
    pub room_max: Option<i32>,
    #[arg(long)]
    pub max_rooms: Option<u32>,
    #[arg(long)]
    pub max_monsters: Option<u32>,
    #[arg(long)]
    pub max_items: Option<u32>,
    /// Candidate cells tried per monster or item
    #[arg(long)]
    pub attempts: Option<u32>,
}

impl ConfigOverrides {
    /// Loads the base config (file or defaults), applies overrides and validates.
    pub fn resolve(&self) -> Result<GenerationConfig> {
        let base = match &self.config {
            Some(path) => GenerationConfig::load(path)
                .with_context(|| format!("failed to load config file: {}", path.display()))?,
            None => GenerationConfig::default(),
        };
        let config = self.apply(base);
        config.validate().context("generation config rejected")?;
        Ok(config)
    }

    pub fn apply(&self, mut config: GenerationConfig) -> GenerationConfig {
        if let Some(width) = self.width {
            config.map_width = width;
        }
        if let Some(height) = self.height {
            config.map_height = height;
        }
        if let Some(min) = self.room_min {
            config.room_min_size = min;
        }
        if let Some(max) = self.room_max {
            config.room_max_size = max;
        }
        if let Some(rooms) = self.max_rooms {
            config.max_rooms = rooms;
        }
        if let Some(monsters) = self.max_monsters {
            config.max_monsters_per_room = monsters;
        }
        if let Some(items) = self.max_items {
            config.max_items_per_room = items;
        }
        if let Some(attempts) = self.attempts {
            config.placement_attempts = attempts;
        }
        config
    }
}
