use std::fmt::{Display, Formatter};

/// An identifier for a given variable, based on its index in the Crossword's `variables` field.
pub type VariableId = usize;

/// An identifier for a given word, based on its index in the Vocabulary's `words` field.
pub type WordId = usize;

/// Zero-indexed row and column for a cell in the grid, where row = 0 is the top row.
pub type GridCoord = (usize, usize);

/// A pair of letter offsets `(i, j)`: letter `i` of the first variable's word must equal letter
/// `j` of the second variable's word.
pub type Overlap = (usize, usize);

/// An ordered pair of variables whose first member should be made consistent with its second.
pub type ArcPair = (VariableId, VariableId);

/// Direction that a variable is facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Across,
    Down,
}

/// A single across or down word slot in the grid. Two variables are the same variable iff their
/// position, direction, and length all match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable {
    pub row: usize,
    pub column: usize,
    pub direction: Direction,
    pub length: usize,
}

impl Variable {
    pub fn new(row: usize, column: usize, direction: Direction, length: usize) -> Variable {
        Variable { row, column, direction, length }
    }

    /// The coords of the cell holding letter `cell_idx` of this variable's word.
    pub fn cell(&self, cell_idx: usize) -> GridCoord {
        match self.direction {
            Direction::Across => (self.row, self.column + cell_idx),
            Direction::Down => (self.row + cell_idx, self.column),
        }
    }

    /// Generate the coords for each cell of this variable.
    pub fn cells(&self) -> impl Iterator<Item = GridCoord> + '_ {
        (0..self.length).map(move |cell_idx| self.cell(cell_idx))
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let direction = match self.direction {
            Direction::Across => "across",
            Direction::Down => "down",
        };
        write!(f, "({}, {}) {} : {}", self.row, self.column, direction, self.length)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use crate::types::{Direction, Variable};

    #[test]
    fn test_cells_follow_direction() {
        let across = Variable::new(1, 2, Direction::Across, 3);
        let down = Variable::new(1, 2, Direction::Down, 3);

        assert_eq!(across.cells().collect::<Vec<_>>(), vec![(1, 2), (1, 3), (1, 4)]);
        assert_eq!(down.cells().collect::<Vec<_>>(), vec![(1, 2), (2, 2), (3, 2)]);
    }

    #[test]
    fn test_identity_uses_every_field() {
        let var = Variable::new(0, 0, Direction::Across, 4);

        assert_eq!(var, Variable::new(0, 0, Direction::Across, 4));
        assert_ne!(var, Variable::new(0, 0, Direction::Down, 4));
        assert_ne!(var, Variable::new(0, 0, Direction::Across, 5));
        assert_ne!(var, Variable::new(0, 1, Direction::Across, 4));
    }

    #[test]
    fn test_display() {
        assert_eq!(Variable::new(2, 3, Direction::Down, 5).to_string(), "(2, 3) down : 5");
    }
}
