#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// A chaser's move on the track.
pub enum Move {
    Left,
    #[default]
    Stay,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Status of a chase.
pub enum Status {
    Ongoing,
    Caught,
    Escaped,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Pursuit on a circular track of `width` cells.
///
/// The prey advances one cell every other tick while the chaser may move
/// one cell every tick, so a chaser that closes the gap on every tick
/// eventually wins. If the prey survives `max_ticks` ticks, it escapes.
pub struct Chase {
    width: u64,
    max_ticks: u64,
    tick: u64,
    chaser: u64,
    prey: u64,
}

impl Chase {
    /// Create a new chase. The chaser starts at cell 0 with the prey half
    /// a track ahead. `width` must be at least 2.
    pub fn new(width: u64, max_ticks: u64) -> Self {
        Self {
            width,
            max_ticks,
            tick: 0,
            chaser: 0,
            prey: width / 2,
        }
    }

    /// Number of ticks already played.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn width(&self) -> u64 {
        self.width
    }

    pub fn chaser(&self) -> u64 {
        self.chaser
    }

    pub fn prey(&self) -> u64 {
        self.prey
    }

    /// Signed shortest gap from the chaser to the prey; positive means the
    /// prey is ahead rightward, zero means they share a cell.
    pub fn distance(&self) -> i64 {
        let width = self.width as i64;
        let mut gap = (self.prey as i64 - self.chaser as i64).rem_euclid(width);

        if width / 2 < gap {
            gap -= width;
        }

        gap
    }

    /// Advance the world by one tick: the chaser moves per the action, the
    /// prey advances on even ticks, and the resulting status is reported.
    pub fn advance(&mut self, chaser_move: Move) -> Status {
        self.chaser = step(self.chaser, chaser_move, self.width);

        if self.tick % 2 == 0 {
            self.prey = step(self.prey, Move::Right, self.width);
        }

        self.tick += 1;

        if self.chaser == self.prey {
            Status::Caught
        } else if self.max_ticks <= self.tick {
            Status::Escaped
        } else {
            Status::Ongoing
        }
    }
}

fn step(cell: u64, direction: Move, width: u64) -> u64 {
    match direction {
        Move::Left => (cell + width - 1) % width,
        Move::Stay => cell,
        Move::Right => (cell + 1) % width,
    }
}
