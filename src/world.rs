//! World state: the grid plus the per-species registries that own entity
//! lifetime, and the month counter.

use std::collections::HashMap;

use rand::Rng;

use crate::entity::{Entity, EntityId, EntityKind, GrowthStage, Species};
use crate::grid::{Grid, GridPos, Occupant};
use crate::scenario::Rules;

/// Aggregate counts for one month, as consumed by the renderer and by
/// determinism checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Census {
    pub month: u64,
    pub trees: usize,
    pub lumberjacks: usize,
    pub bears: usize,
}

pub struct World {
    grid: Grid,
    rules: Rules,
    entities: HashMap<EntityId, Entity>,
    trees: Vec<EntityId>,
    lumberjacks: Vec<EntityId>,
    bears: Vec<EntityId>,
    month: u64,
    next_entity: u64,
}

impl World {
    pub fn new(width: u32, height: u32, rules: Rules) -> Self {
        Self {
            grid: Grid::new(width, height),
            rules,
            entities: HashMap::new(),
            trees: Vec::new(),
            lumberjacks: Vec::new(),
            bears: Vec::new(),
            month: 1,
            next_entity: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn rules(&self) -> Rules {
        self.rules
    }

    /// The month currently being simulated; starts at 1.
    pub fn month(&self) -> u64 {
        self.month
    }

    pub fn advance_month(&mut self) {
        self.month += 1;
    }

    fn registry_mut(&mut self, species: Species) -> &mut Vec<EntityId> {
        match species {
            Species::Tree => &mut self.trees,
            Species::Lumberjack => &mut self.lumberjacks,
            Species::Bear => &mut self.bears,
        }
    }

    pub fn registry(&self, species: Species) -> &[EntityId] {
        match species {
            Species::Tree => &self.trees,
            Species::Lumberjack => &self.lumberjacks,
            Species::Bear => &self.bears,
        }
    }

    pub fn tree_ids(&self) -> &[EntityId] {
        &self.trees
    }

    pub fn lumberjack_ids(&self) -> &[EntityId] {
        &self.lumberjacks
    }

    pub fn bear_ids(&self) -> &[EntityId] {
        &self.bears
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    pub fn lumberjack_count(&self) -> usize {
        self.lumberjacks.len()
    }

    pub fn bear_count(&self) -> usize {
        self.bears.len()
    }

    /// Create an entity at `pos`: store, registry and cell occupant list are
    /// updated together.
    pub fn spawn(&mut self, pos: GridPos, kind: EntityKind) -> EntityId {
        let id = EntityId(self.next_entity);
        self.next_entity += 1;
        let species = kind.species();
        self.entities.insert(id, Entity { id, pos, kind });
        self.registry_mut(species).push(id);
        self.grid.add_occupant(pos, Occupant { id, species });
        id
    }

    pub fn spawn_tree(&mut self, pos: GridPos, stage: GrowthStage) -> EntityId {
        self.spawn(pos, EntityKind::tree(stage))
    }

    pub fn spawn_lumberjack(&mut self, pos: GridPos) -> EntityId {
        self.spawn(pos, EntityKind::lumberjack())
    }

    pub fn spawn_bear(&mut self, pos: GridPos) -> EntityId {
        self.spawn(pos, EntityKind::bear())
    }

    /// Detach an entity from its cell and its registry. Safe to call while a
    /// system iterates a snapshot of that registry.
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let entity = self.entities.remove(&id)?;
        self.grid.remove_occupant(entity.pos, id);
        self.registry_mut(entity.species()).retain(|&e| e != id);
        Some(entity)
    }

    /// Move an entity to `to`, updating both cell occupant lists.
    pub fn relocate(&mut self, id: EntityId, to: GridPos) {
        let (from, species) = match self.entities.get(&id) {
            Some(entity) => (entity.pos, entity.species()),
            None => return,
        };
        self.grid.remove_occupant(from, id);
        self.grid.add_occupant(to, Occupant { id, species });
        if let Some(entity) = self.entities.get_mut(&id) {
            entity.pos = to;
        }
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn occupant(&self, pos: GridPos, species: Species) -> Option<EntityId> {
        self.grid.occupant(pos, species)
    }

    pub fn tree_stage(&self, id: EntityId) -> Option<GrowthStage> {
        match self.entities.get(&id)?.kind {
            EntityKind::Tree { stage, .. } => Some(stage),
            _ => None,
        }
    }

    /// One tick of tree aging: bump the age, then re-evaluate the stage.
    /// Stages only ever move forward.
    pub fn age_tree(&mut self, id: EntityId) {
        let rules = self.rules.tree;
        if let Some(entity) = self.entities.get_mut(&id) {
            if let EntityKind::Tree { stage, age } = &mut entity.kind {
                *age += 1;
                *stage = (*stage).max(GrowthStage::for_age(*age, &rules));
            }
        }
    }

    pub fn add_lumber(&mut self, id: EntityId, amount: u64) {
        if let Some(entity) = self.entities.get_mut(&id) {
            if let EntityKind::Lumberjack { lumber } = &mut entity.kind {
                *lumber += amount;
            }
        }
    }

    pub fn record_attack(&mut self, id: EntityId) {
        if let Some(entity) = self.entities.get_mut(&id) {
            if let EntityKind::Bear { attacks } = &mut entity.kind {
                *attacks += 1;
            }
        }
    }

    pub fn total_lumber(&self) -> u64 {
        self.lumberjacks
            .iter()
            .filter_map(|id| match self.entities.get(id)?.kind {
                EntityKind::Lumberjack { lumber } => Some(lumber),
                _ => None,
            })
            .sum()
    }

    pub fn reset_lumber(&mut self) {
        for id in &self.lumberjacks {
            if let Some(entity) = self.entities.get_mut(id) {
                if let EntityKind::Lumberjack { lumber } = &mut entity.kind {
                    *lumber = 0;
                }
            }
        }
    }

    pub fn total_attacks(&self) -> u64 {
        self.bears
            .iter()
            .filter_map(|id| match self.entities.get(id)?.kind {
                EntityKind::Bear { attacks } => Some(attacks),
                _ => None,
            })
            .sum()
    }

    pub fn reset_attacks(&mut self) {
        for id in &self.bears {
            if let Some(entity) = self.entities.get_mut(id) {
                if let EntityKind::Bear { attacks } = &mut entity.kind {
                    *attacks = 0;
                }
            }
        }
    }

    /// Random probing placement: pick uniform random cells until one holds
    /// no entity of the prototype's species, then spawn a clone of the
    /// prototype there. Attempts are capped at 8x the cell count per
    /// placement so a saturated grid cannot loop forever; returns how many
    /// entities were actually placed.
    pub fn scatter(&mut self, prototype: EntityKind, count: usize, rng: &mut impl Rng) -> usize {
        let species = prototype.species();
        let max_attempts = self.grid.cell_count() * 8;
        let mut placed = 0;
        for _ in 0..count {
            let mut attempts = 0;
            loop {
                if attempts >= max_attempts {
                    return placed;
                }
                attempts += 1;
                let pos = self.grid.random_pos(rng);
                if self.grid.occupant(pos, species).is_none() {
                    self.spawn(pos, prototype);
                    placed += 1;
                    break;
                }
            }
        }
        placed
    }

    pub fn census(&self) -> Census {
        Census {
            month: self.month,
            trees: self.trees.len(),
            lumberjacks: self.lumberjacks.len(),
            bears: self.bears.len(),
        }
    }

    /// The entity the renderer should show at `pos`: a bear wins over a
    /// lumberjack, a lumberjack over a tree.
    pub fn display_occupant(&self, pos: GridPos) -> Option<&Entity> {
        for species in [Species::Bear, Species::Lumberjack, Species::Tree] {
            if let Some(id) = self.grid.occupant(pos, species) {
                return self.entities.get(&id);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn world(width: u32, height: u32) -> World {
        World::new(width, height, Rules::default())
    }

    #[test]
    fn removal_detaches_cell_and_registry() {
        let mut world = world(3, 3);
        let pos = GridPos::new(1, 1);
        let id = world.spawn_lumberjack(pos);
        assert_eq!(world.occupant(pos, Species::Lumberjack), Some(id));
        assert_eq!(world.lumberjack_ids(), &[id]);

        let removed = world.remove(id).expect("entity was live");
        assert_eq!(removed.id, id);
        assert!(world.occupant(pos, Species::Lumberjack).is_none());
        assert!(world.lumberjack_ids().is_empty());
        assert!(!world.contains(id));
        assert!(world.remove(id).is_none());
    }

    #[test]
    fn relocate_moves_between_cells() {
        let mut world = world(3, 3);
        let from = GridPos::new(0, 0);
        let to = GridPos::new(2, 1);
        let id = world.spawn_bear(from);

        world.relocate(id, to);
        assert!(world.occupant(from, Species::Bear).is_none());
        assert_eq!(world.occupant(to, Species::Bear), Some(id));
        assert_eq!(world.entity(id).unwrap().pos, to);
    }

    #[test]
    fn scatter_avoids_only_same_species() {
        let mut world = world(1, 2);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        world.spawn_tree(GridPos::new(0, 0), GrowthStage::Mature);
        world.spawn_tree(GridPos::new(0, 1), GrowthStage::Mature);

        // No cell is free of trees, so a third tree cannot land.
        assert_eq!(world.scatter(EntityKind::tree(GrowthStage::Sapling), 1, &mut rng), 0);
        assert_eq!(world.tree_count(), 2);

        // A lumberjack may share a cell with a tree.
        assert_eq!(world.scatter(EntityKind::lumberjack(), 1, &mut rng), 1);
        assert_eq!(world.lumberjack_count(), 1);
    }

    #[test]
    fn tree_aging_is_monotonic() {
        let mut world = world(1, 1);
        let id = world.spawn_tree(GridPos::new(0, 0), GrowthStage::Mature);
        // A starting mature tree has age 0; aging must not demote it.
        for _ in 0..5 {
            world.age_tree(id);
            assert_eq!(world.tree_stage(id), Some(GrowthStage::Mature));
        }
    }

    #[test]
    fn tallies_sum_and_reset() {
        let mut world = world(2, 2);
        let a = world.spawn_lumberjack(GridPos::new(0, 0));
        let b = world.spawn_lumberjack(GridPos::new(1, 0));
        let bear = world.spawn_bear(GridPos::new(0, 1));

        world.add_lumber(a, 5);
        world.add_lumber(b, 6);
        world.record_attack(bear);
        assert_eq!(world.total_lumber(), 11);
        assert_eq!(world.total_attacks(), 1);

        world.reset_lumber();
        world.reset_attacks();
        assert_eq!(world.total_lumber(), 0);
        assert_eq!(world.total_attacks(), 0);
    }

    #[test]
    fn display_priority_is_bear_lumberjack_tree() {
        let mut world = world(2, 2);
        let pos = GridPos::new(0, 0);
        world.spawn_tree(pos, GrowthStage::Elder);
        world.spawn_lumberjack(pos);
        assert_eq!(
            world.display_occupant(pos).unwrap().species(),
            Species::Lumberjack
        );
        world.spawn_bear(pos);
        assert_eq!(world.display_occupant(pos).unwrap().species(), Species::Bear);
        assert!(world.display_occupant(GridPos::new(1, 1)).is_none());
    }
}
