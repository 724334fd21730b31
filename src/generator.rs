//! Generates two-color, symmetric, 8x8 artifacts.
//!
//! The whole appearance of an artifact is a pure function of its 32-bit
//! identifier: the id seeds a Wyrand stream, and every draw the algorithm
//! makes comes from that stream in a fixed order. Same id, same grid,
//! on every platform, forever.

use std::fmt;

use tinyrand::{Rand, Seeded, StdRand};

/// Side length of a generated artifact, in cells.
pub const GENERATED_SIZE: usize = 8;

const CELL_COUNT: usize = GENERATED_SIZE * GENERATED_SIZE;
const HALF: usize = GENERATED_SIZE / 2;
const R: usize = GENERATED_SIZE - 1;

/// Index into the linear cell array.
#[inline]
fn idx(x: usize, y: usize) -> usize {
    debug_assert!(x < GENERATED_SIZE && y < GENERATED_SIZE);
    x + GENERATED_SIZE * y
}

/// An RGBA color. Alpha is set by the [`AlphaPolicy`] of the generating
/// call, never by the random stream.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    fn from_draw(draw: u64, a: u8) -> Self {
        Self {
            r: draw as u8,
            g: (draw >> 8) as u8,
            b: (draw >> 16) as u8,
            a,
        }
    }
}

/// One cell of an artifact grid.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Cell {
    #[default]
    Empty,
    Colored(Color),
}

impl Cell {
    #[inline]
    pub fn is_colored(self) -> bool {
        matches!(self, Cell::Colored(_))
    }

    #[inline]
    pub fn color(self) -> Option<Color> {
        match self {
            Cell::Empty => None,
            Cell::Colored(color) => Some(color),
        }
    }
}

/// How the alpha channel of colored cells is produced.
///
/// The generator never draws alpha from the random stream; it is either
/// forced fully opaque or taken verbatim from a caller-supplied mask.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum AlphaPolicy {
    #[default]
    Opaque,
    Mask(u8),
}

impl AlphaPolicy {
    fn alpha(self) -> u8 {
        match self {
            AlphaPolicy::Opaque => 0xFF,
            AlphaPolicy::Mask(mask) => mask,
        }
    }
}

/// A fixed 8x8 grid of cells, linear layout `x + 8 * y`.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    cells: [Cell; CELL_COUNT],
}

impl Grid {
    pub fn empty() -> Self {
        Self {
            cells: [Cell::Empty; CELL_COUNT],
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Cell {
        self.cells[idx(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        self.cells[idx(x, y)] = cell;
    }

    /// Iterates all cells as `(x, y, cell)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &cell)| (i % GENERATED_SIZE, i / GENERATED_SIZE, cell))
    }

    /// Number of colored cells.
    pub fn colored_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_colored()).count()
    }

    /// Builds a new grid whose cell at `(x, y)` is this grid's cell at
    /// `source(x, y)`. Always reads the receiver, never the grid under
    /// construction.
    fn remapped(&self, source: impl Fn(usize, usize) -> (usize, usize)) -> Self {
        let mut out = Self::empty();
        for y in 0..GENERATED_SIZE {
            for x in 0..GENERATED_SIZE {
                let (sx, sy) = source(x, y);
                out.cells[idx(x, y)] = self.cells[idx(sx, sy)];
            }
        }
        out
    }

    /// Mirrored across the vertical center axis.
    pub fn flipped_horizontal(&self) -> Self {
        self.remapped(|x, y| (R - x, y))
    }

    /// Mirrored across the horizontal center axis.
    pub fn flipped_vertical(&self) -> Self {
        self.remapped(|x, y| (x, R - y))
    }

    /// Rotated a half turn about the grid center.
    pub fn rotated_180(&self) -> Self {
        self.remapped(|x, y| (R - x, R - y))
    }

    /// Rotated 90 degrees clockwise about the grid center.
    pub fn rotated_90(&self) -> Self {
        self.remapped(|x, y| (y, R - x))
    }

    /// Mirrored across the main diagonal `\`.
    pub fn transposed(&self) -> Self {
        self.remapped(|x, y| (y, x))
    }

    /// Mirrored across the anti-diagonal `/`.
    pub fn anti_transposed(&self) -> Self {
        self.remapped(|x, y| (R - y, R - x))
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid [")?;
        for y in 0..GENERATED_SIZE {
            write!(f, "    ")?;
            for x in 0..GENERATED_SIZE {
                let c = if self.get(x, y).is_colored() { '#' } else { '.' };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        write!(f, "]")
    }
}

/// The symmetry applied to an artifact, drawn per-artifact from the
/// random stream. Not part of the public contract; it is only implicit
/// in the final grid.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Symmetry {
    Vertical { rotate: bool },
    Horizontal { rotate: bool },
    Quadrant { rotate: bool },
    Diagonal { forward: bool },
}

impl Symmetry {
    fn from_draws(family: u64, alt: u64) -> Self {
        let alt = alt & 1 == 1;
        match family & 3 {
            0 => Symmetry::Vertical { rotate: alt },
            1 => Symmetry::Horizontal { rotate: alt },
            2 => Symmetry::Quadrant { rotate: alt },
            _ => Symmetry::Diagonal { forward: alt },
        }
    }

    /// Overwrites the derived region of the grid with a mirrored or
    /// rotated copy of the source region. All reads go through a snapshot
    /// taken before the first write, so no pass can observe its own
    /// output; the source region itself is never written.
    fn apply(self, grid: &mut Grid) {
        let src = grid.cells;
        match self {
            // source: left half
            Symmetry::Vertical { rotate } => {
                for x in 0..HALF {
                    for y in 0..GENERATED_SIZE {
                        let cell = src[idx(x, y)];
                        if rotate {
                            grid.cells[idx(R - x, R - y)] = cell;
                        } else {
                            grid.cells[idx(R - x, y)] = cell;
                        }
                    }
                }
            }
            // source: top half
            Symmetry::Horizontal { rotate } => {
                for x in 0..GENERATED_SIZE {
                    for y in 0..HALF {
                        let cell = src[idx(x, y)];
                        if rotate {
                            grid.cells[idx(R - x, R - y)] = cell;
                        } else {
                            grid.cells[idx(x, R - y)] = cell;
                        }
                    }
                }
            }
            // source: top-left quadrant, copied to the other three
            Symmetry::Quadrant { rotate } => {
                for x in 0..HALF {
                    for y in 0..HALF {
                        let cell = src[idx(x, y)];
                        if rotate {
                            let (mut rx, mut ry) = (x, y);
                            for _ in 0..3 {
                                (rx, ry) = (R - ry, rx);
                                grid.cells[idx(rx, ry)] = cell;
                            }
                        } else {
                            grid.cells[idx(R - x, R - y)] = cell;
                            grid.cells[idx(x, R - y)] = cell;
                            grid.cells[idx(R - x, y)] = cell;
                        }
                    }
                }
            }
            // source: one triangle, the other is derived
            Symmetry::Diagonal { forward } => {
                for x in 0..GENERATED_SIZE {
                    for y in 0..GENERATED_SIZE {
                        if forward {
                            if x + y < R {
                                grid.cells[idx(x, y)] = src[idx(R - y, R - x)];
                            }
                        } else if x < y {
                            grid.cells[idx(x, y)] = src[idx(y, x)];
                        }
                    }
                }
            }
        }
    }
}

/// Generates the artifact for `id` with fully opaque colors.
pub fn generate(id: u32) -> Grid {
    generate_with_alpha(id, AlphaPolicy::Opaque)
}

/// Generates the artifact for `id`.
///
/// Total over the whole u32 domain and deterministic: the id seeds a
/// fresh Wyrand stream and every draw below is one `next_u64` call, so
/// the result never depends on prior calls or the platform.
pub fn generate_with_alpha(id: u32, alpha: AlphaPolicy) -> Grid {
    let mut rand = StdRand::seed(u64::from(id));

    // randomly fill in cells; low two bits in {0, 1} is a coin flip
    let mut filled = [false; CELL_COUNT];
    for x in 0..GENERATED_SIZE {
        for y in 0..GENERATED_SIZE {
            filled[idx(x, y)] = (rand.next_u64() & 3) <= 1;
        }
    }

    // randomly assign two colors
    let a = alpha.alpha();
    let color_a = Color::from_draw(rand.next_u64(), a);
    let color_b = Color::from_draw(rand.next_u64(), a);

    let mut grid = Grid::empty();
    for x in 0..GENERATED_SIZE {
        for y in 0..GENERATED_SIZE {
            if filled[idx(x, y)] {
                let color = if rand.next_u64() & 1 == 0 {
                    color_a
                } else {
                    color_b
                };
                grid.cells[idx(x, y)] = Cell::Colored(color);
            }
        }
    }

    // determine symmetry (rotate or reflect some region of the grid)
    let symmetry = Symmetry::from_draws(rand.next_u64(), rand.next_u64());
    symmetry.apply(&mut grid);

    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    /// An asymmetric scrambled grid for exercising transforms directly.
    fn scrambled(seed: u64) -> Grid {
        let mut rand = StdRand::seed(seed);
        let mut grid = Grid::empty();
        for y in 0..GENERATED_SIZE {
            for x in 0..GENERATED_SIZE {
                let draw = rand.next_u64();
                if draw & 1 == 0 {
                    grid.set(
                        x,
                        y,
                        Cell::Colored(Color::from_draw(draw >> 1, 0xFF)),
                    );
                }
            }
        }
        grid
    }

    fn all_symmetries() -> [Symmetry; 8] {
        [
            Symmetry::Vertical { rotate: false },
            Symmetry::Vertical { rotate: true },
            Symmetry::Horizontal { rotate: false },
            Symmetry::Horizontal { rotate: true },
            Symmetry::Quadrant { rotate: false },
            Symmetry::Quadrant { rotate: true },
            Symmetry::Diagonal { forward: false },
            Symmetry::Diagonal { forward: true },
        ]
    }

    /// The reflection or rotation a transformed grid must be a fixed
    /// point of.
    fn defining_reflection(symmetry: Symmetry, grid: &Grid) -> Grid {
        match symmetry {
            Symmetry::Vertical { rotate: false } => grid.flipped_horizontal(),
            Symmetry::Vertical { rotate: true } => grid.rotated_180(),
            Symmetry::Horizontal { rotate: false } => grid.flipped_vertical(),
            Symmetry::Horizontal { rotate: true } => grid.rotated_180(),
            Symmetry::Quadrant { rotate: false } => grid.flipped_horizontal(),
            Symmetry::Quadrant { rotate: true } => grid.rotated_90(),
            Symmetry::Diagonal { forward: false } => grid.transposed(),
            Symmetry::Diagonal { forward: true } => grid.anti_transposed(),
        }
    }

    #[test]
    fn transforms_are_idempotent() {
        for symmetry in all_symmetries() {
            for seed in 0..32 {
                let mut once = scrambled(seed);
                symmetry.apply(&mut once);
                let mut twice = once.clone();
                symmetry.apply(&mut twice);
                assert_eq!(once, twice, "{symmetry:?} seed {seed}");
            }
        }
    }

    #[test]
    fn transformed_grids_are_fixed_points_of_their_reflection() {
        for symmetry in all_symmetries() {
            for seed in 0..32 {
                let mut grid = scrambled(seed);
                symmetry.apply(&mut grid);
                assert_eq!(
                    defining_reflection(symmetry, &grid),
                    grid,
                    "{symmetry:?} seed {seed}"
                );
            }
        }
    }

    #[test]
    fn quadrant_reflect_is_symmetric_both_ways() {
        for seed in 0..32 {
            let mut grid = scrambled(seed);
            Symmetry::Quadrant { rotate: false }.apply(&mut grid);
            assert_eq!(grid.flipped_horizontal(), grid);
            assert_eq!(grid.flipped_vertical(), grid);
        }
    }

    #[test]
    fn reflections_are_involutions() {
        let grid = scrambled(7);
        assert_eq!(grid.flipped_horizontal().flipped_horizontal(), grid);
        assert_eq!(grid.flipped_vertical().flipped_vertical(), grid);
        assert_eq!(grid.rotated_180().rotated_180(), grid);
        assert_eq!(grid.transposed().transposed(), grid);
        assert_eq!(grid.anti_transposed().anti_transposed(), grid);
    }

    #[test]
    fn four_quarter_turns_are_identity() {
        let grid = scrambled(11);
        let turned = grid.rotated_90().rotated_90().rotated_90().rotated_90();
        assert_eq!(turned, grid);
    }

    #[test]
    fn symmetry_choice_covers_all_families() {
        assert_eq!(
            Symmetry::from_draws(0, 0),
            Symmetry::Vertical { rotate: false }
        );
        assert_eq!(
            Symmetry::from_draws(1, 1),
            Symmetry::Horizontal { rotate: true }
        );
        assert_eq!(
            Symmetry::from_draws(2, 0),
            Symmetry::Quadrant { rotate: false }
        );
        assert_eq!(
            Symmetry::from_draws(3, 1),
            Symmetry::Diagonal { forward: true }
        );
        // only the low bits matter
        assert_eq!(
            Symmetry::from_draws(4, 2),
            Symmetry::Vertical { rotate: false }
        );
    }

    #[test]
    fn cell_accessors() {
        let color = Color {
            r: 1,
            g: 2,
            b: 3,
            a: 0xFF,
        };
        assert!(Cell::Colored(color).is_colored());
        assert_eq!(Cell::Colored(color).color(), Some(color));
        assert!(!Cell::Empty.is_colored());
        assert_eq!(Cell::Empty.color(), None);
    }
}
