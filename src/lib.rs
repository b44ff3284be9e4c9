//! A constraint-satisfaction crossword filler.
//!
//! A [`Crossword`] describes the slots of a grid and the vocabulary they're filled from. A
//! [`Solver`] gives every slot the whole vocabulary as its domain, prunes it with node and arc
//! consistency, and then runs backtracking search ordered by the minimum-remaining-values,
//! degree, and least-constraining-value heuristics.
//!
//! ```
//! use xwordcsp::{Crossword, Direction, Solver, Variable, Vocabulary};
//!
//! let vocabulary: Vocabulary = ["cat", "dog", "cats", "dogs"].into_iter().collect();
//! let variables = vec![
//!     Variable::new(0, 0, Direction::Across, 3),
//!     Variable::new(0, 0, Direction::Down, 4),
//! ];
//! let crossword = Crossword::new(3, 4, variables, vocabulary).unwrap();
//!
//! let assignment = Solver::new(&crossword).solve().unwrap();
//! assert_eq!(assignment.len(), 2);
//! ```

pub mod arc_consistency;
pub mod assignment;
pub mod backtracking_search;
pub mod crossword;
pub mod domains;
pub mod solver;
pub mod types;
pub mod word_list;

pub use assignment::Assignment;
pub use backtracking_search::{Inference, Statistics};
pub use crossword::{Crossword, StructureError};
pub use domains::Domains;
pub use solver::{Solution, SolveFailure, Solver, SolverOptions};
pub use types::{Direction, Variable, VariableId, WordId};
pub use word_list::{Vocabulary, Word};

/// The expected maximum length for a single variable.
pub const MAX_SLOT_LENGTH: usize = 21;
