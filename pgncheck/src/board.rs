//! The replay board: a flat array of packed cells.
//!
//! The board is a plain value type. What-if legality checks (king escape
//! trials, castling transit checks) work on a copy instead of mutating and
//! restoring the live board.

use crate::types::{Cell, Color, Coord, File, Piece, Rank};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Cell; 64],
}

impl Board {
    /// Returns a board with no pieces on it.
    pub const fn empty() -> Board {
        Board {
            cells: [Cell::EMPTY; 64],
        }
    }

    /// Returns a board with the standard opening setup.
    pub fn initial() -> Board {
        let mut res = Board::empty();
        for file in File::iter() {
            res.put2(file, Rank::R2, Cell::from_parts(Color::White, Piece::Pawn));
            res.put2(file, Rank::R7, Cell::from_parts(Color::Black, Piece::Pawn));
        }
        for (color, rank) in [(Color::White, Rank::R1), (Color::Black, Rank::R8)] {
            res.put2(File::A, rank, Cell::from_parts(color, Piece::Rook));
            res.put2(File::B, rank, Cell::from_parts(color, Piece::Knight));
            res.put2(File::C, rank, Cell::from_parts(color, Piece::Bishop));
            res.put2(File::D, rank, Cell::from_parts(color, Piece::Queen));
            res.put2(File::E, rank, Cell::from_parts(color, Piece::King));
            res.put2(File::F, rank, Cell::from_parts(color, Piece::Bishop));
            res.put2(File::G, rank, Cell::from_parts(color, Piece::Knight));
            res.put2(File::H, rank, Cell::from_parts(color, Piece::Rook));
        }
        res
    }

    /// Returns the contents of the square with coordinate `c`.
    #[inline]
    pub fn get(&self, c: Coord) -> Cell {
        self.cells[c.index()]
    }

    /// Returns the contents of the square with file `file` and rank `rank`.
    #[inline]
    pub fn get2(&self, file: File, rank: Rank) -> Cell {
        self.get(Coord::from_parts(file, rank))
    }

    /// Puts `cell` to the square with coordinate `c`.
    #[inline]
    pub fn put(&mut self, c: Coord, cell: Cell) {
        self.cells[c.index()] = cell;
    }

    /// Puts `cell` to the square with file `file` and rank `rank`.
    #[inline]
    pub fn put2(&mut self, file: File, rank: Rank, cell: Cell) {
        self.put(Coord::from_parts(file, rank), cell);
    }

    /// Moves the contents of `src` onto `dst`, clearing `src`.
    ///
    /// Whatever occupied `dst` is overwritten, which is exactly a capture.
    pub fn relocate(&mut self, src: Coord, dst: Coord) {
        self.cells[dst.index()] = self.cells[src.index()];
        self.cells[src.index()] = Cell::EMPTY;
    }

    /// Square of the given side's king, if it is still on the board.
    ///
    /// The model assumes at most one king per side; the first match wins.
    pub fn king(&self, color: Color) -> Option<Coord> {
        Coord::iter().find(|&c| self.get(c).is(color, Piece::King))
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::initial()
    }
}
