//! Fixed-size 2D grid of cells with precomputed Moore-neighborhood
//! adjacency, clipped at the edges (no wraparound).

use rand::Rng;

use crate::entity::{EntityId, Species};

/// A cell coordinate. Always in bounds for the grid that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPos {
    pub x: u32,
    pub y: u32,
}

impl GridPos {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occupant {
    pub id: EntityId,
    pub species: Species,
}

/// One grid position: its occupants and its precomputed neighbors. Cells are
/// never destroyed during a run; only their occupant lists change.
#[derive(Debug, Clone, Default)]
struct Cell {
    occupants: Vec<Occupant>,
    adjacent: Vec<GridPos>,
}

pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Build the grid and link adjacency once. Dimensions are immutable
    /// afterwards.
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be non-zero");
        let mut grid = Self {
            width,
            height,
            cells: vec![Cell::default(); (width * height) as usize],
        };
        grid.link_adjacency();
        grid
    }

    fn link_adjacency(&mut self) {
        for y in 0..self.height {
            for x in 0..self.width {
                let x_lo = x.saturating_sub(1);
                let x_hi = (x + 1).min(self.width - 1);
                let y_lo = y.saturating_sub(1);
                let y_hi = (y + 1).min(self.height - 1);
                let mut adjacent = Vec::with_capacity(8);
                for ny in y_lo..=y_hi {
                    for nx in x_lo..=x_hi {
                        if nx != x || ny != y {
                            adjacent.push(GridPos::new(nx, ny));
                        }
                    }
                }
                let index = self.index(GridPos::new(x, y));
                self.cells[index].adjacent = adjacent;
            }
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Panics when out of bounds. Every coordinate the simulation produces is
    /// bounds-constrained, so this is unreachable in normal operation.
    fn index(&self, pos: GridPos) -> usize {
        assert!(
            pos.x < self.width && pos.y < self.height,
            "grid position ({}, {}) out of bounds for {}x{} grid",
            pos.x,
            pos.y,
            self.width,
            self.height
        );
        (pos.y * self.width + pos.x) as usize
    }

    pub fn random_pos(&self, rng: &mut impl Rng) -> GridPos {
        GridPos::new(rng.gen_range(0..self.width), rng.gen_range(0..self.height))
    }

    /// First occupant of the given species at `pos`, if any.
    pub fn occupant(&self, pos: GridPos, species: Species) -> Option<EntityId> {
        self.cells[self.index(pos)]
            .occupants
            .iter()
            .find(|occ| occ.species == species)
            .map(|occ| occ.id)
    }

    /// True iff no entity of any species occupies `pos`.
    pub fn is_open(&self, pos: GridPos) -> bool {
        self.cells[self.index(pos)].occupants.is_empty()
    }

    pub fn occupants(&self, pos: GridPos) -> &[Occupant] {
        &self.cells[self.index(pos)].occupants
    }

    pub fn adjacent(&self, pos: GridPos) -> &[GridPos] {
        &self.cells[self.index(pos)].adjacent
    }

    /// Uniform pick among the precomputed neighbors. `None` only on a 1x1
    /// grid, where the neighbor set is empty; callers treat that as no move.
    pub fn random_adjacent(&self, pos: GridPos, rng: &mut impl Rng) -> Option<GridPos> {
        let adjacent = self.adjacent(pos);
        if adjacent.is_empty() {
            None
        } else {
            Some(adjacent[rng.gen_range(0..adjacent.len())])
        }
    }

    /// Uniform pick among neighbors with zero occupants; `None` when every
    /// neighbor is occupied.
    pub fn random_open_adjacent(&self, pos: GridPos, rng: &mut impl Rng) -> Option<GridPos> {
        let open: Vec<GridPos> = self
            .adjacent(pos)
            .iter()
            .copied()
            .filter(|&p| self.is_open(p))
            .collect();
        if open.is_empty() {
            None
        } else {
            Some(open[rng.gen_range(0..open.len())])
        }
    }

    pub(crate) fn add_occupant(&mut self, pos: GridPos, occupant: Occupant) {
        let index = self.index(pos);
        self.cells[index].occupants.push(occupant);
    }

    pub(crate) fn remove_occupant(&mut self, pos: GridPos, id: EntityId) {
        let index = self.index(pos);
        self.cells[index].occupants.retain(|occ| occ.id != id);
    }
}
