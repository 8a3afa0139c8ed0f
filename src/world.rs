use anyhow::{Error, Result, anyhow, bail};

pub const MAZE_ROWS: usize = 10;
pub const MAZE_COLUMNS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Floor,
    Wall,
}

/// Map codes: 0 is floor, 1 is wall. Nothing else is a valid cell.
impl TryFrom<u8> for Cell {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0 => Ok(Cell::Floor),
            1 => Ok(Cell::Wall),
            other => Err(anyhow!("invalid map code {other}")),
        }
    }
}

const O: Cell = Cell::Floor;
const X: Cell = Cell::Wall;

#[rustfmt::skip]
const DEFAULT_MAZE: [[Cell; MAZE_COLUMNS]; MAZE_ROWS] = [
    [X, X, X, X, X, X, X, X, X, X],
    [X, O, O, O, O, O, O, O, O, X],
    [X, X, X, O, O, O, X, X, X, X],
    [X, O, O, O, O, O, O, O, O, X],
    [X, O, O, O, O, O, O, O, O, X],
    [X, O, O, O, O, O, O, O, O, X],
    [X, O, O, O, X, O, O, X, X, X],
    [X, O, O, O, X, O, O, O, O, X],
    [X, O, O, O, X, O, O, O, O, X],
    [X, X, X, X, X, X, X, X, X, X],
];

/// Immutable grid of cells, indexed [row][column].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct World {
    rows: usize,
    columns: usize,
    cells: Vec<Cell>, // row-major
}

impl Default for World {
    fn default() -> Self {
        Self {
            rows: MAZE_ROWS,
            columns: MAZE_COLUMNS,
            cells: DEFAULT_MAZE.iter().flatten().copied().collect(),
        }
    }
}

impl World {
    /// Builds a map from rows of cell codes (0 = floor, 1 = wall).
    pub fn from_rows(rows: &[&[u8]]) -> Result<Self> {
        let Some(first) = rows.first() else {
            bail!("map has no rows");
        };
        let columns = first.len();
        if columns == 0 {
            bail!("map has no columns");
        }

        let mut cells = Vec::with_capacity(rows.len() * columns);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != columns {
                bail!("map row {i} has {} cells, expected {columns}", row.len());
            }
            for (j, &code) in row.iter().enumerate() {
                let cell = Cell::try_from(code)
                    .map_err(|e| anyhow!("map row {i} column {j}: {e}"))?;
                cells.push(cell);
            }
        }

        Ok(Self {
            rows: rows.len(),
            columns,
            cells,
        })
    }

    /// A rectangle of floor enclosed by a one-cell wall ring.
    pub fn bordered(rows: usize, columns: usize) -> Result<Self> {
        let grid: Vec<Vec<u8>> = (0..rows)
            .map(|r| {
                (0..columns)
                    .map(|c| {
                        let edge = r == 0 || c == 0 || r + 1 == rows || c + 1 == columns;
                        u8::from(edge)
                    })
                    .collect()
            })
            .collect();
        let refs: Vec<&[u8]> = grid.iter().map(Vec::as_slice).collect();
        Self::from_rows(&refs)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Cell at a grid index. Anything outside the grid reads as wall.
    pub fn cell(&self, row: i64, column: i64) -> Cell {
        if row < 0 || column < 0 || row >= self.rows as i64 || column >= self.columns as i64 {
            return Cell::Wall;
        }
        self.cells[row as usize * self.columns + column as usize]
    }

    #[inline]
    pub fn is_wall(&self, row: i64, column: i64) -> bool {
        self.cell(row, column) == Cell::Wall
    }

    /// Wall test for an integer pixel position.
    pub fn is_wall_at_pixel(&self, x: i32, y: i32, tile_size: i32) -> bool {
        let column = x.div_euclid(tile_size) as i64;
        let row = y.div_euclid(tile_size) as i64;
        self.is_wall(row, column)
    }

    /// Wall test for a continuous position, as used by the ray march.
    pub fn is_wall_at_point(&self, x: f64, y: f64, tile_size: f64) -> bool {
        let column = (x / tile_size).floor() as i64;
        let row = (y / tile_size).floor() as i64;
        self.is_wall(row, column)
    }

    /// Grid indices of every wall cell, row-major.
    pub fn walls(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Cell::Wall)
            .map(|(i, _)| (i / self.columns, i % self.columns))
    }

    /// Pixel length of the grid diagonal.
    pub fn diagonal(&self, tile_size: f64) -> f64 {
        let w = self.columns as f64 * tile_size;
        let h = self.rows as f64 * tile_size;
        (w * w + h * h).sqrt()
    }
}
