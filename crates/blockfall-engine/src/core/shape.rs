use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

/// Largest extent (rows or columns) of any shape matrix.
pub const MAX_SHAPE_SIZE: usize = 4;

/// Fixed-size occupancy matrix of a shape.
///
/// The matrix has `rows × cols` meaningful cells (3×3 for most shapes, 4×3 for
/// the long bar). Cells outside that region are always empty.
///
/// Matrices are plain `Copy` values: every [`Piece`](super::piece::Piece) owns its
/// own copy, so rotating a piece never touches the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeMatrix {
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
    rows: u8,
    cols: u8,
}

impl ShapeMatrix {
    /// Builds a matrix from rows of `0`/`1` values.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub const fn from_rows<const R: usize, const C: usize>(bits: [[u8; C]; R]) -> Self {
        assert!(R <= MAX_SHAPE_SIZE && C <= MAX_SHAPE_SIZE);
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut y = 0;
        while y < R {
            let mut x = 0;
            while x < C {
                cells[y][x] = bits[y][x] != 0;
                x += 1;
            }
            y += 1;
        }
        Self {
            cells,
            rows: R as u8,
            cols: C as u8,
        }
    }

    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows as usize
    }

    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols as usize
    }

    /// Returns whether the cell at column `x`, row `y` is occupied.
    ///
    /// Coordinates outside the matrix are reported as empty.
    #[must_use]
    pub const fn is_occupied(&self, x: usize, y: usize) -> bool {
        x < self.cols() && y < self.rows() && self.cells[y][x]
    }

    /// Returns an iterator of occupied `(x, y)` cells in row-major order.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.rows()).flat_map(move |y| {
            (0..self.cols()).filter_map(move |x| self.cells[y][x].then_some((x, y)))
        })
    }

    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.occupied_cells().count()
    }

    /// Returns the matrix turned 90° clockwise.
    ///
    /// Reverses the row order, then transposes: an `R × C` matrix becomes
    /// `C × R` with `new[i][j] = old[R - 1 - j][i]`.
    #[must_use]
    pub const fn rotated_clockwise(&self) -> Self {
        let rows = self.rows();
        let cols = self.cols();
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut i = 0;
        while i < cols {
            let mut j = 0;
            while j < rows {
                cells[i][j] = self.cells[rows - 1 - j][i];
                j += 1;
            }
            i += 1;
        }
        Self {
            cells,
            rows: self.cols,
            cols: self.rows,
        }
    }
}

/// Minimal rectangle containing every occupied cell of a matrix.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x_offset: usize,
    pub y_offset: usize,
    pub width: usize,
    pub height: usize,
}

impl BoundingBox {
    /// Scans `matrix` for the first and last non-empty row and column.
    ///
    /// An empty matrix yields a zero-sized box at the origin.
    #[must_use]
    pub fn of(matrix: &ShapeMatrix) -> Self {
        let mut min = (usize::MAX, usize::MAX);
        let mut max = (0, 0);
        for (x, y) in matrix.occupied_cells() {
            min = (min.0.min(x), min.1.min(y));
            max = (max.0.max(x), max.1.max(y));
        }
        if min.0 == usize::MAX {
            return Self::default();
        }
        Self {
            x_offset: min.0,
            y_offset: min.1,
            width: max.0 - min.0 + 1,
            height: max.1 - min.1 + 1,
        }
    }
}

/// Static definition of a shape: its spawn matrix and bounding metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeDefinition {
    pub matrix: ShapeMatrix,
    pub bounds: BoundingBox,
}

/// The seven shape variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ShapeKind {
    L = 0,
    J = 1,
    Z = 2,
    S = 3,
    Square = 4,
    I = 5,
    T = 6,
}

impl Distribution<ShapeKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ShapeKind {
        ShapeKind::ALL[rng.random_range(0..ShapeKind::LEN)]
    }
}

impl ShapeKind {
    /// Number of shape variants (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        ShapeKind::L,
        ShapeKind::J,
        ShapeKind::Z,
        ShapeKind::S,
        ShapeKind::Square,
        ShapeKind::I,
        ShapeKind::T,
    ];

    #[must_use]
    pub const fn definition(self) -> &'static ShapeDefinition {
        &SHAPE_CATALOG[self as usize]
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            ShapeKind::L => 'L',
            ShapeKind::J => 'J',
            ShapeKind::Z => 'Z',
            ShapeKind::S => 'S',
            ShapeKind::Square => 'O',
            ShapeKind::I => 'I',
            ShapeKind::T => 'T',
        }
    }

    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'L' => Some(ShapeKind::L),
            'J' => Some(ShapeKind::J),
            'Z' => Some(ShapeKind::Z),
            'S' => Some(ShapeKind::S),
            'O' => Some(ShapeKind::Square),
            'I' => Some(ShapeKind::I),
            'T' => Some(ShapeKind::T),
            _ => None,
        }
    }
}

const fn def<const R: usize, const C: usize>(
    bits: [[u8; C]; R],
    [x_offset, y_offset, width, height]: [usize; 4],
) -> ShapeDefinition {
    ShapeDefinition {
        matrix: ShapeMatrix::from_rows(bits),
        bounds: BoundingBox {
            x_offset,
            y_offset,
            width,
            height,
        },
    }
}

// Indexed by `ShapeKind as usize`.
const SHAPE_CATALOG: [ShapeDefinition; ShapeKind::LEN] = [
    def([[1, 0, 0], [1, 0, 0], [1, 1, 0]], [0, 0, 2, 3]),
    def([[0, 0, 1], [0, 0, 1], [0, 1, 1]], [1, 0, 2, 3]),
    def([[0, 0, 0], [1, 1, 0], [0, 1, 1]], [0, 1, 3, 2]),
    def([[0, 0, 0], [0, 1, 1], [1, 1, 0]], [0, 1, 3, 2]),
    def([[0, 0, 0], [0, 1, 1], [0, 1, 1]], [1, 1, 2, 2]),
    def([[1, 0, 0], [1, 0, 0], [1, 0, 0], [1, 0, 0]], [0, 0, 1, 4]),
    def([[0, 0, 0], [1, 1, 1], [0, 1, 0]], [0, 1, 3, 2]),
];
