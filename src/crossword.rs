use std::collections::HashMap;
use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};

use smallvec::SmallVec;

use crate::types::{Direction, GridCoord, Overlap, Variable, VariableId};
use crate::word_list::Vocabulary;
use crate::MAX_SLOT_LENGTH;

/// A struct representing a crossing between one variable and another, referencing the other
/// variable's id and the location of the shared cell within each of the two variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crossing {
    pub other_variable_id: VariableId,
    pub cell: usize,
    pub other_cell: usize,
}

/// Reasons a set of variables can't be laid out as a crossword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureError {
    /// The variable has length zero.
    EmptyVariable(Variable),

    /// The variable runs past the edge of the grid.
    OutOfBounds(Variable),

    /// The same variable was listed more than once.
    DuplicateVariable(Variable),

    /// Two variables facing the same direction share a cell.
    CollinearOverlap(Variable, Variable),

    /// More than two variables share a cell.
    TooManyCrossings(GridCoord),
}

impl Display for StructureError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::EmptyVariable(var) => write!(f, "variable {} has no cells", var),
            Self::OutOfBounds(var) => write!(f, "variable {} leaves the grid", var),
            Self::DuplicateVariable(var) => write!(f, "variable {} is listed twice", var),
            Self::CollinearOverlap(first, second) => {
                write!(f, "variables {} and {} overlap in the same direction", first, second)
            }
            Self::TooManyCrossings((row, column)) => {
                write!(f, "more than two variables cross at ({}, {})", row, column)
            }
        }
    }
}

impl Error for StructureError {}

/// The static description of a puzzle: its dimensions, its variables, the geometry relating
/// them, and the vocabulary they're filled from. Nothing here changes while solving.
pub struct Crossword {
    width: usize,
    height: usize,
    variables: Vec<Variable>,
    ids_by_variable: HashMap<Variable, VariableId>,
    crossings: Vec<SmallVec<[Crossing; MAX_SLOT_LENGTH]>>,
    vocabulary: Vocabulary,
}

impl Debug for Crossword {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Crossword")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("variables", &self.variables)
            .field("vocabulary", &self.vocabulary)
            .finish()
    }
}

impl Crossword {
    /// Build a crossword from its variables, validating the geometry and working out which
    /// variables cross each other and where.
    pub fn new(
        width: usize,
        height: usize,
        variables: Vec<Variable>,
        vocabulary: Vocabulary,
    ) -> Result<Crossword, StructureError> {
        let mut ids_by_variable: HashMap<Variable, VariableId> =
            HashMap::with_capacity(variables.len());

        for (variable_id, &variable) in variables.iter().enumerate() {
            if variable.length == 0 {
                return Err(StructureError::EmptyVariable(variable));
            }

            // A variable can start anywhere up to `usize::MAX`, so the end is checked.
            let (start, along, across, limit) = match variable.direction {
                Direction::Across => (variable.column, width, variable.row, height),
                Direction::Down => (variable.row, height, variable.column, width),
            };
            let in_bounds = across < limit
                && start.checked_add(variable.length).map_or(false, |end| end <= along);
            if !in_bounds {
                return Err(StructureError::OutOfBounds(variable));
            }

            if ids_by_variable.insert(variable, variable_id).is_some() {
                return Err(StructureError::DuplicateVariable(variable));
            }
        }

        // Build a map from cell location to (variable id, cell index within variable) for every
        // variable covering it, which we can then use to calculate crossings.
        let mut entries_by_loc: HashMap<GridCoord, SmallVec<[(VariableId, usize); 2]>> =
            HashMap::new();

        for (variable_id, variable) in variables.iter().enumerate() {
            for (cell_idx, loc) in variable.cells().enumerate() {
                let entries = entries_by_loc.entry(loc).or_default();

                if entries.len() == 2 {
                    return Err(StructureError::TooManyCrossings(loc));
                }
                if let Some(&(other_id, _)) = entries.first() {
                    if variables[other_id].direction == variable.direction {
                        return Err(StructureError::CollinearOverlap(variables[other_id], *variable));
                    }
                }

                entries.push((variable_id, cell_idx));
            }
        }

        let crossings: Vec<SmallVec<[Crossing; MAX_SLOT_LENGTH]>> = variables
            .iter()
            .enumerate()
            .map(|(variable_id, variable)| {
                variable
                    .cells()
                    .enumerate()
                    .filter_map(|(cell_idx, loc)| {
                        entries_by_loc[&loc]
                            .iter()
                            .find(|&&(other_id, _)| other_id != variable_id)
                            .map(|&(other_variable_id, other_cell)| Crossing {
                                other_variable_id,
                                cell: cell_idx,
                                other_cell,
                            })
                    })
                    .collect()
            })
            .collect();

        Ok(Crossword {
            width,
            height,
            variables,
            ids_by_variable,
            crossings,
            vocabulary,
        })
    }

    /// Build a fully open `size` x `size` grid, with an across and a down variable for each row
    /// and column.
    pub fn square(size: usize, vocabulary: Vocabulary) -> Result<Crossword, StructureError> {
        let variables: Vec<Variable> = (0..size)
            .flat_map(|idx| {
                [
                    Variable::new(idx, 0, Direction::Across, size),
                    Variable::new(0, idx, Direction::Down, size),
                ]
            })
            .collect();

        Crossword::new(size, size, variables, vocabulary)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable(&self, variable_id: VariableId) -> &Variable {
        &self.variables[variable_id]
    }

    pub fn variable_id(&self, variable: &Variable) -> Option<VariableId> {
        self.ids_by_variable.get(variable).copied()
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// The crossings of the given variable, in the order of its cells.
    pub fn crossings(&self, variable_id: VariableId) -> &[Crossing] {
        &self.crossings[variable_id]
    }

    /// The letter offsets at which `x` and `y` share a cell, if they cross.
    pub fn overlap(&self, x: VariableId, y: VariableId) -> Option<Overlap> {
        self.crossings[x]
            .iter()
            .find(|crossing| crossing.other_variable_id == y)
            .map(|crossing| (crossing.cell, crossing.other_cell))
    }

    /// The ids of every variable crossing the given one.
    pub fn neighbors(&self, variable_id: VariableId) -> impl Iterator<Item = VariableId> + '_ {
        self.crossings[variable_id].iter().map(|crossing| crossing.other_variable_id)
    }

    pub fn is_neighbor(&self, x: VariableId, y: VariableId) -> bool {
        self.overlap(x, y).is_some()
    }

    pub fn degree(&self, variable_id: VariableId) -> usize {
        self.crossings[variable_id].len()
    }
}
