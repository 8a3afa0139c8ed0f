use crate::world::World;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Order in which held directions are applied within one frame.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    #[inline]
    pub fn delta(self) -> [i32; 2] {
        match self {
            Direction::Left => [-1, 0],
            Direction::Right => [1, 0],
            Direction::Up => [0, -1],
            Direction::Down => [0, 1],
        }
    }
}

/// Player position in pixel space (top-left of its tile).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Player {
    pub x: i32,
    pub y: i32,
}

impl Player {
    pub fn new(pos: [i32; 2]) -> Self {
        Self {
            x: pos[0],
            y: pos[1],
        }
    }

    #[inline]
    pub fn pos(&self) -> [i32; 2] {
        [self.x, self.y]
    }

    /// Moves one tile in `dir` if the target cell is floor.
    /// Returns whether the move was applied.
    pub fn try_step(&mut self, world: &World, dir: Direction, tile_size: i32) -> bool {
        let [dx, dy] = dir.delta();
        let nx = self.x + dx * tile_size;
        let ny = self.y + dy * tile_size;
        if world.is_wall_at_pixel(nx, ny, tile_size) {
            return false;
        }
        self.x = nx;
        self.y = ny;
        true
    }

    /// Applies every held direction for this frame. Each axis is checked on
    /// its own, so two perpendicular moves may both land (diagonal through a
    /// corner is allowed).
    pub fn apply_moves(
        &mut self,
        world: &World,
        held: impl Fn(Direction) -> bool,
        tile_size: i32,
    ) {
        for dir in Direction::ALL {
            if held(dir) {
                self.try_step(world, dir, tile_size);
            }
        }
    }
}
