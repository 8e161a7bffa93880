//! Entity creation and the live roster queried for occupancy.

use slotmap::SlotMap;

use crate::grid::Grid;
use crate::types::{EntityId, EntityKind, Pos, WorldPos};

/// Creates entities on behalf of the generator.
pub trait EntityFactory {
    type Handle;

    fn spawn(&mut self, kind: EntityKind, position: WorldPos) -> Self::Handle;
}

/// Read access to the positions of every live actor and item.
pub trait Roster {
    fn world_positions(&self) -> Vec<WorldPos>;

    fn is_occupied(&self, cell: Pos) -> bool {
        self.world_positions().into_iter().any(|world| world.to_cell() == cell)
    }
}

#[derive(Clone, Debug)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub position: WorldPos,
}

impl Entity {
    pub fn cell(&self) -> Pos {
        self.position.to_cell()
    }
}

#[derive(Clone, Debug, Default)]
pub struct EntityRoster {
    entities: SlotMap<EntityId, Entity>,
}

impl EntityRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        self.entities.remove(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn player(&self) -> Option<&Entity> {
        self.entities.values().find(|entity| entity.kind == EntityKind::Player)
    }

    pub fn entities_at(&self, cell: Pos) -> impl Iterator<Item = &Entity> {
        self.entities.values().filter(move |entity| entity.cell() == cell)
    }

    /// Non-player entities standing on a currently visible cell, in insertion order.
    pub fn visible_entities(&self, grid: &Grid) -> Vec<EntityId> {
        self.entities
            .values()
            .filter(|entity| entity.kind != EntityKind::Player)
            .filter(|entity| grid.visible_cells().contains(&entity.cell()))
            .map(|entity| entity.id)
            .collect()
    }
}

impl EntityFactory for EntityRoster {
    type Handle = EntityId;

    fn spawn(&mut self, kind: EntityKind, position: WorldPos) -> EntityId {
        let id = self.entities.insert(Entity { id: EntityId::default(), kind, position });
        self.entities[id].id = id;
        id
    }
}

impl Roster for EntityRoster {
    fn world_positions(&self) -> Vec<WorldPos> {
        self.entities.values().map(|entity| entity.position).collect()
    }

    fn is_occupied(&self, cell: Pos) -> bool {
        self.entities.values().any(|entity| entity.cell() == cell)
    }
}
