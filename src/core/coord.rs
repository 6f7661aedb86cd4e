use std::{
    fmt::Display, ops::{Add, Sub}, str::FromStr
};
use anyhow::Context;
use lazy_static::lazy_static;

/// Number of hexes from the centre to an edge of the board
pub const BOARD_SIDE: i32 = 4;

/// Upper bound on the distance between any two on-board hexes, plus one
pub const MAX_DIST: i32 = 10;

/// A hex on the axial grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn on_board(&self) -> bool {
        self.x.abs() <= BOARD_SIDE &&
        self.y.abs() <= BOARD_SIDE &&
        (self.x + self.y).abs() <= BOARD_SIDE
    }

    /// Every hex one step away, on-board or not
    pub fn adjacent(&self) -> [Coord; 6] {
        DIRS.map(|dir| self + &CoordDelta::from(dir))
    }

    pub fn dist(&self, other: &Coord) -> i32 {
        (self - other).length()
    }

    pub fn is_adjacent(&self, other: &Coord) -> bool {
        self.dist(other) == 1
    }

    /// All on-board hexes, ordered by row then column
    pub fn all() -> &'static [Coord] {
        &ALL_COORDS
    }
}

impl FromStr for Coord {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s.trim_matches(|c| c == '(' || c == ')')
            .split_once(',')
            .context("Invalid coordinate")?;

        Ok(Coord {
            x: x.trim().parse()?,
            y: y.trim().parse()?,
        })
    }
}

impl Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoordDelta {
    pub dx: i32,
    pub dy: i32,
}

impl CoordDelta {
    /// Hex manhattan length
    pub fn length(&self) -> i32 {
        if self.dx * self.dy > 0 {
            (self.dx + self.dy).abs()
        } else {
            self.dx.abs().max(self.dy.abs())
        }
    }
}

impl Add<&CoordDelta> for &Coord {
    type Output = Coord;

    fn add(self, other: &CoordDelta) -> Self::Output {
        Coord {
            x: self.x + other.dx,
            y: self.y + other.dy,
        }
    }
}

impl Sub<&Coord> for &Coord {
    type Output = CoordDelta;

    fn sub(self, other: &Coord) -> Self::Output {
        CoordDelta {
            dx: self.x - other.x,
            dy: self.y - other.y,
        }
    }
}

#[derive(Clone, Copy)]
enum Dir {
    Down,
    UpLeft,
    Left,
    Up,
    UpRight,
    Right,
}

const DIRS: [Dir; 6] = [
    Dir::Down,
    Dir::UpLeft,
    Dir::Left,
    Dir::Up,
    Dir::UpRight,
    Dir::Right,
];

impl From<Dir> for CoordDelta {
    fn from(dir: Dir) -> Self {
        match dir {
            Dir::Down => CoordDelta { dx: 0, dy: -1 },
            Dir::UpLeft => CoordDelta { dx: -1, dy: 0 },
            Dir::Left => CoordDelta { dx: -1, dy: 1 },
            Dir::Up => CoordDelta { dx: 0, dy: 1 },
            Dir::UpRight => CoordDelta { dx: 1, dy: 0 },
            Dir::Right => CoordDelta { dx: 1, dy: -1 },
        }
    }
}

lazy_static!(
    static ref ALL_COORDS: Vec<Coord> = {
        (-BOARD_SIDE..=BOARD_SIDE)
            .flat_map(|x| (-BOARD_SIDE..=BOARD_SIDE).map(move |y| Coord::new(x, y)))
            .filter(|c| c.on_board())
            .collect()
    };
);
