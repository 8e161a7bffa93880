use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct EntityId;
}

/// Integer grid coordinate. Ordered row-major (`y`, then `x`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { y, x }
    }

    /// World-space centre of this cell.
    pub fn to_world(self) -> WorldPos {
        WorldPos { x: self.x as f32 + 0.5, y: self.y as f32 + 0.5 }
    }

    pub fn neighbors8(self) -> impl Iterator<Item = Pos> {
        (-1..=1).flat_map(move |dy| {
            (-1..=1)
                .filter(move |&dx| dx != 0 || dy != 0)
                .map(move |dx| Pos { y: self.y + dy, x: self.x + dx })
        })
    }
}

/// Continuous position used by the entity layer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldPos {
    pub x: f32,
    pub y: f32,
}

impl WorldPos {
    pub fn to_cell(self) -> Pos {
        Pos { y: self.y.floor() as i32, x: self.x.floor() as i32 }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TileKind {
    #[default]
    Empty,
    Wall,
    Floor,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MonsterKind {
    FireSprite,
    FlyMob,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    PotionOfHeart,
    ConfusionScroll,
    FireballScroll,
    LightningScroll,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Monster(MonsterKind),
    Item(ItemKind),
}

impl EntityKind {
    /// Prefab tag understood by the entity factory.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Player => "Player",
            Self::Monster(MonsterKind::FireSprite) => "FireSprite",
            Self::Monster(MonsterKind::FlyMob) => "FlyMob",
            Self::Item(ItemKind::PotionOfHeart) => "Potion of Heart",
            Self::Item(ItemKind::ConfusionScroll) => "Confusion Scroll",
            Self::Item(ItemKind::FireballScroll) => "Fireball Scroll",
            Self::Item(ItemKind::LightningScroll) => "Lightning Scroll",
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Self::Player => '@',
            Self::Monster(MonsterKind::FireSprite) => 'f',
            Self::Monster(MonsterKind::FlyMob) => 'm',
            Self::Item(ItemKind::PotionOfHeart) => '!',
            Self::Item(_) => '?',
        }
    }

    pub fn is_actor(self) -> bool {
        matches!(self, Self::Player | Self::Monster(_))
    }
}
