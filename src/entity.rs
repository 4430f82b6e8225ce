//! The three kinds of creature that occupy the grid, modeled as a closed
//! tagged variant sharing an identity and a position.

use crate::scenario::TreeRules;

/// Stable identity for one entity; allocated by the [`World`](crate::World)
/// and never reused within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub(crate) u64);

impl EntityId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Species {
    Tree,
    Lumberjack,
    Bear,
}

/// A tree's maturity. Ordered so a stage transition can never regress: the
/// current stage is replaced by `max(current, for_age(age))` after each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum GrowthStage {
    Sapling,
    Mature,
    Elder,
}

impl GrowthStage {
    /// The stage an age maps to on its own, before monotonicity is applied.
    pub fn for_age(age: u32, rules: &TreeRules) -> Self {
        if age >= rules.elder_age {
            GrowthStage::Elder
        } else if age >= rules.mature_age {
            GrowthStage::Mature
        } else {
            GrowthStage::Sapling
        }
    }
}

/// Variant-specific state. Trees track growth, lumberjacks the lumber
/// gathered since the last labor inspection, bears the attacks landed since
/// the last wildlife inspection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntityKind {
    Tree { stage: GrowthStage, age: u32 },
    Lumberjack { lumber: u64 },
    Bear { attacks: u64 },
}

impl EntityKind {
    pub fn tree(stage: GrowthStage) -> Self {
        EntityKind::Tree { stage, age: 0 }
    }

    pub fn lumberjack() -> Self {
        EntityKind::Lumberjack { lumber: 0 }
    }

    pub fn bear() -> Self {
        EntityKind::Bear { attacks: 0 }
    }

    pub fn species(&self) -> Species {
        match self {
            EntityKind::Tree { .. } => Species::Tree,
            EntityKind::Lumberjack { .. } => Species::Lumberjack,
            EntityKind::Bear { .. } => Species::Bear,
        }
    }
}

/// One live entity. The position is a plain coordinate key; the cell's
/// occupant list and the species registry jointly define placement, and the
/// registry owns the lifetime.
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    pub pos: crate::grid::GridPos,
    pub kind: EntityKind,
}

impl Entity {
    pub fn species(&self) -> Species {
        self.kind.species()
    }
}
