//! Spatial model - fixed-size terrain grid with harvestable trees

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tile position in the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TilePos {
    pub x: u32,
    pub y: u32,
}

impl TilePos {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileKind {
    Grass,
    Tree,
    Water,
}

impl TileKind {
    pub fn color(self) -> &'static str {
        match self {
            TileKind::Grass => "#4ade80",
            TileKind::Tree => "#2d6a4f",
            TileKind::Water => "#4361ee",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileCell {
    pub kind: TileKind,
    pub wood: u32,
}

impl TileCell {
    pub fn grass() -> Self {
        Self {
            kind: TileKind::Grass,
            wood: 0,
        }
    }

    pub fn water() -> Self {
        Self {
            kind: TileKind::Water,
            wood: 0,
        }
    }

    /// A tree with no wood is not a tree.
    pub fn tree(wood: u32) -> Self {
        if wood == 0 {
            Self::grass()
        } else {
            Self {
                kind: TileKind::Tree,
                wood,
            }
        }
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MapError {
    #[error("tile ({x}, {y}) is outside the {width}x{height} map")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
}

/// Cumulative weights used when drawing fresh terrain.
#[derive(Debug, Clone, Copy)]
pub struct TerrainMix {
    pub water_ratio: f64,
    pub tree_ratio: f64,
    pub tree_wood: u32,
}

impl Default for TerrainMix {
    fn default() -> Self {
        Self {
            water_ratio: 0.1,
            tree_ratio: 0.2,
            tree_wood: 5,
        }
    }
}

/// Row-major terrain grid. Dimensions never change after construction.
#[derive(Debug, Clone)]
pub struct TileMap {
    width: u32,
    height: u32,
    cells: Vec<TileCell>,
}

impl TileMap {
    pub fn filled(width: u32, height: u32, cell: TileCell) -> Self {
        Self {
            width,
            height,
            cells: vec![cell; (width as usize) * (height as usize)],
        }
    }

    pub fn generate<R: Rng + ?Sized>(width: u32, height: u32, mix: TerrainMix, rng: &mut R) -> Self {
        let mut cells = Vec::with_capacity((width as usize) * (height as usize));
        for _ in 0..height {
            for _ in 0..width {
                let roll: f64 = rng.gen();
                let cell = if roll < mix.water_ratio {
                    TileCell::water()
                } else if roll < mix.water_ratio + mix.tree_ratio {
                    TileCell::tree(mix.tree_wood)
                } else {
                    TileCell::grass()
                };
                cells.push(cell);
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn tile_count(&self) -> usize {
        self.cells.len()
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    pub fn cell_at(&self, x: u32, y: u32) -> Result<&TileCell, MapError> {
        let index = self.index(x, y)?;
        Ok(&self.cells[index])
    }

    pub fn set_cell(&mut self, x: u32, y: u32, cell: TileCell) -> Result<(), MapError> {
        let index = self.index(x, y)?;
        self.cells[index] = cell;
        Ok(())
    }

    /// Takes one unit of wood from a tree. Returns the amount taken (0 or 1).
    pub fn harvest_wood(&mut self, x: u32, y: u32) -> Result<u32, MapError> {
        let index = self.index(x, y)?;
        let cell = &mut self.cells[index];
        if cell.kind != TileKind::Tree || cell.wood == 0 {
            return Ok(0);
        }
        cell.wood -= 1;
        if cell.wood == 0 {
            *cell = TileCell::grass();
        }
        Ok(1)
    }

    /// First tree in row-major scan order from (0, 0). Not distance-nearest.
    pub fn find_first_tree(&self) -> Option<TilePos> {
        self.cells
            .iter()
            .position(|cell| cell.kind == TileKind::Tree)
            .map(|index| self.pos_of(index))
    }

    pub fn cells_of_kind(&self, kind: TileKind) -> Vec<TilePos> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.kind == kind)
            .map(|(index, _)| self.pos_of(index))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TilePos, &TileCell)> {
        self.cells
            .iter()
            .enumerate()
            .map(move |(index, cell)| (self.pos_of(index), cell))
    }

    pub fn total_wood(&self) -> u64 {
        self.cells.iter().map(|cell| cell.wood as u64).sum()
    }

    fn index(&self, x: u32, y: u32) -> Result<usize, MapError> {
        if !self.contains(x, y) {
            return Err(MapError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y as usize * self.width as usize + x as usize)
    }

    fn pos_of(&self, index: usize) -> TilePos {
        let width = self.width as usize;
        TilePos {
            x: (index % width) as u32,
            y: (index / width) as u32,
        }
    }
}
