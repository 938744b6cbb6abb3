//! Tetromino definitions and shapes
//!
//! Each of the 7 pieces owns a cyclic list of rotation states. A state is a
//! small square occupancy grid whose top-left corner is the piece position.

use ratatui::style::Color;

/// The 7 tetromino types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TetrominoType {
    I, // Cyan - long bar
    J, // Indigo
    L, // Orange
    O, // Yellow - square
    S, // Green
    T, // Purple
    Z, // Pink
}

/// One rotation state: a `size` x `size` grid, row-major
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    size: usize,
    grid: [[bool; 4]; 4],
}

impl Shape {
    /// Build a shape from rows of `#` (filled) and `.` (empty)
    const fn parse(rows: &[&str]) -> Self {
        let mut grid = [[false; 4]; 4];
        let mut r = 0;
        while r < rows.len() {
            let bytes = rows[r].as_bytes();
            let mut c = 0;
            while c < bytes.len() {
                grid[r][c] = bytes[c] == b'#';
                c += 1;
            }
            r += 1;
        }
        Self {
            size: rows.len(),
            grid,
        }
    }

    /// Side length of the occupancy grid
    pub fn size(&self) -> usize {
        self.size
    }

    /// Grid width, used to centre the piece on spawn
    pub fn width(&self) -> usize {
        self.size
    }

    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size && self.grid[row][col]
    }

    /// Offsets (row, col) of occupied cells relative to the top-left corner
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (0..self.size).flat_map(move |r| {
            (0..self.size)
                .filter(move |&c| self.grid[r][c])
                .map(move |c| (r as i32, c as i32))
        })
    }
}

const I_ROTATIONS: [Shape; 4] = [
    Shape::parse(&["....", "####", "....", "...."]),
    Shape::parse(&["..#.", "..#.", "..#.", "..#."]),
    Shape::parse(&["....", "....", "####", "...."]),
    Shape::parse(&[".#..", ".#..", ".#..", ".#.."]),
];

const J_ROTATIONS: [Shape; 4] = [
    Shape::parse(&["#..", "###", "..."]),
    Shape::parse(&[".##", ".#.", ".#."]),
    Shape::parse(&["...", "###", "..#"]),
    Shape::parse(&[".#.", ".#.", "##."]),
];

const L_ROTATIONS: [Shape; 4] = [
    Shape::parse(&["..#", "###", "..."]),
    Shape::parse(&[".#.", ".#.", ".##"]),
    Shape::parse(&["...", "###", "#.."]),
    Shape::parse(&["##.", ".#.", ".#."]),
];

// O piece doesn't rotate
const O_ROTATIONS: [Shape; 1] = [Shape::parse(&["##", "##"])];

const S_ROTATIONS: [Shape; 2] = [
    Shape::parse(&[".##", "##.", "..."]),
    Shape::parse(&[".#.", ".##", "..#"]),
];

const T_ROTATIONS: [Shape; 4] = [
    Shape::parse(&[".#.", "###", "..."]),
    Shape::parse(&[".#.", ".##", ".#."]),
    Shape::parse(&["...", "###", ".#."]),
    Shape::parse(&[".#.", "##.", ".#."]),
];

const Z_ROTATIONS: [Shape; 2] = [
    Shape::parse(&["##.", ".##", "..."]),
    Shape::parse(&["..#", ".##", ".#."]),
];

impl TetrominoType {
    /// All tetromino types, in bag order before shuffling
    pub const ALL: [TetrominoType; 7] = [
        TetrominoType::I,
        TetrominoType::J,
        TetrominoType::L,
        TetrominoType::O,
        TetrominoType::S,
        TetrominoType::T,
        TetrominoType::Z,
    ];

    /// Get the color for this tetromino
    pub fn color(&self) -> Color {
        match self {
            TetrominoType::I => Color::Rgb(0x00, 0xbc, 0xd4),
            TetrominoType::J => Color::Rgb(0x3f, 0x51, 0xb5),
            TetrominoType::L => Color::Rgb(0xff, 0x98, 0x00),
            TetrominoType::O => Color::Rgb(0xff, 0xeb, 0x3b),
            TetrominoType::S => Color::Rgb(0x4c, 0xaf, 0x50),
            TetrominoType::T => Color::Rgb(0x9c, 0x27, 0xb0),
            TetrominoType::Z => Color::Rgb(0xe9, 0x1e, 0x63),
        }
    }

    /// Ordered rotation states; index 0 is the spawn state
    pub fn rotations(&self) -> &'static [Shape] {
        match self {
            TetrominoType::I => &I_ROTATIONS,
            TetrominoType::J => &J_ROTATIONS,
            TetrominoType::L => &L_ROTATIONS,
            TetrominoType::O => &O_ROTATIONS,
            TetrominoType::S => &S_ROTATIONS,
            TetrominoType::T => &T_ROTATIONS,
            TetrominoType::Z => &Z_ROTATIONS,
        }
    }

    /// Shape for a rotation index, wrapping past the last state
    pub fn shape(&self, rotation: usize) -> &'static Shape {
        let rotations = self.rotations();
        &rotations[rotation % rotations.len()]
    }
}

/// Direction for rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

impl RotationDirection {
    /// Next rotation index in a cycle of `len` states
    pub fn apply(self, index: usize, len: usize) -> usize {
        match self {
            RotationDirection::Clockwise => (index + 1) % len,
            RotationDirection::CounterClockwise => (index + len - 1) % len,
        }
    }
}
