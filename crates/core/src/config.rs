//! Level generation parameters and their JSON file form.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DungeonError, Result};

/// Retry cap for placing one monster or item before it is skipped.
pub const DEFAULT_PLACEMENT_ATTEMPTS: u32 = 30;

/// Largest per-room monster or item cap; the count draw is `[0, cap + 1)` in `i32`.
pub const MAX_CONTENT_PER_ROOM: u32 = (i32::MAX - 1) as u32;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub map_width: i32,
    pub map_height: i32,
    pub room_min_size: i32,
    /// Exclusive upper bound for room width/height draws.
    pub room_max_size: i32,
    pub max_rooms: u32,
    pub max_monsters_per_room: u32,
    pub max_items_per_room: u32,
    pub placement_attempts: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            map_width: 350,
            map_height: 200,
            room_min_size: 8,
            room_max_size: 30,
            max_rooms: 10,
            max_monsters_per_room: 4,
            max_items_per_room: 5,
            placement_attempts: DEFAULT_PLACEMENT_ATTEMPTS,
        }
    }
}

impl GenerationConfig {
    /// Positional constructor; `placement_attempts` keeps its default.
    pub fn new(
        map_width: i32,
        map_height: i32,
        room_min_size: i32,
        room_max_size: i32,
        max_rooms: u32,
        max_monsters_per_room: u32,
        max_items_per_room: u32,
    ) -> Self {
        Self {
            map_width,
            map_height,
            room_min_size,
            room_max_size,
            max_rooms,
            max_monsters_per_room,
            max_items_per_room,
            placement_attempts: DEFAULT_PLACEMENT_ATTEMPTS,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.map_width < 3 || self.map_height < 3 {
            return Err(DungeonError::InvalidConfig(format!(
                "map must be at least 3x3, got {}x{}",
                self.map_width, self.map_height
            )));
        }
        if self.room_min_size < 3 {
            return Err(DungeonError::InvalidConfig(format!(
                "room_min_size must leave a floor interior (>= 3), got {}",
                self.room_min_size
            )));
        }
        if self.room_min_size > self.room_max_size {
            return Err(DungeonError::InvalidConfig(format!(
                "room_min_size {} exceeds room_max_size {}",
                self.room_min_size, self.room_max_size
            )));
        }
        for (name, cap) in [
            ("max_monsters_per_room", self.max_monsters_per_room),
            ("max_items_per_room", self.max_items_per_room),
        ] {
            if cap > MAX_CONTENT_PER_ROOM {
                return Err(DungeonError::InvalidConfig(format!(
                    "{name} must be at most {MAX_CONTENT_PER_ROOM}, got {cap}"
                )));
            }
        }
        if self.placement_attempts == 0 {
            return Err(DungeonError::InvalidConfig(
                "placement_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn write_atomic(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    }
}
