use std::error::Error;
use std::fmt::{self, Display, Formatter};

use instant::Instant;
use log::{debug, info};

use crate::arc_consistency;
use crate::assignment::{consistent, Assignment};
use crate::backtracking_search::{self, Inference, Search, Statistics};
use crate::crossword::Crossword;
use crate::domains::Domains;
use crate::types::{ArcPair, Variable, VariableId, WordId};

/// Settings for a solve.
#[derive(Debug, Clone, Default)]
pub struct SolverOptions {
    pub inference: Inference,
}

/// A struct representing the results of a successful solve.
#[derive(Debug)]
pub struct Solution {
    pub assignment: Assignment,
    pub statistics: Statistics,
}

/// Why a solve came back empty. Callers of `Solver::solve` only see "no solution"; the
/// distinction is kept for logging and for callers who want to know how early it was detected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveFailure {
    /// No word in the vocabulary has the variable's length.
    EmptyDomain(Variable),

    /// The initial arc consistency pass ruled out every option for some variable.
    ArcConsistencyCollapse,

    /// Search tried every option without completing the grid.
    Exhausted,
}

impl Display for SolveFailure {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::EmptyDomain(var) => write!(f, "no word fits variable {}", var),
            Self::ArcConsistencyCollapse => write!(f, "arc consistency left a variable empty"),
            Self::Exhausted => write!(f, "search exhausted every option"),
        }
    }
}

impl Error for SolveFailure {}

/// Fills a crossword from its vocabulary. The solver owns the domain store for one puzzle, and
/// narrows it with node and arc consistency before handing it to backtracking search.
pub struct Solver<'a> {
    crossword: &'a Crossword,
    domains: Domains,
    options: SolverOptions,
    statistics: Statistics,
}

impl<'a> Solver<'a> {
    pub fn new(crossword: &'a Crossword) -> Solver<'a> {
        Solver::with_options(crossword, SolverOptions::default())
    }

    pub fn with_options(crossword: &'a Crossword, options: SolverOptions) -> Solver<'a> {
        Solver {
            crossword,
            domains: Domains::new(crossword),
            options,
            statistics: Statistics::default(),
        }
    }

    pub fn crossword(&self) -> &'a Crossword {
        self.crossword
    }

    pub fn domains(&self) -> &Domains {
        &self.domains
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    pub fn enforce_node_consistency(&mut self) {
        self.domains.enforce_node_consistency(self.crossword);
    }

    pub fn revise(&mut self, x: VariableId, y: VariableId) -> bool {
        arc_consistency::revise(self.crossword, &mut self.domains, x, y)
    }

    pub fn ac3(&mut self, arcs: Option<&[ArcPair]>) -> bool {
        arc_consistency::ac3(self.crossword, &mut self.domains, arcs)
    }

    pub fn consistent(&self, assignment: &Assignment) -> bool {
        consistent(self.crossword, assignment)
    }

    pub fn select_unassigned_variable(&self, assignment: &Assignment) -> Option<VariableId> {
        backtracking_search::select_unassigned_variable(self.crossword, &self.domains, assignment)
    }

    pub fn order_domain_values(&self, variable_id: VariableId, assignment: &Assignment) -> Vec<WordId> {
        backtracking_search::order_domain_values(
            self.crossword,
            &self.domains,
            variable_id,
            assignment,
        )
    }

    /// Search for a complete assignment extending `assignment`, using the current domains. The
    /// given assignment is left as it was.
    pub fn backtrack(&mut self, assignment: &mut Assignment) -> Option<Assignment> {
        Search::new(self.crossword, self.options.inference, &mut self.statistics)
            .backtrack(&self.domains, assignment)
    }

    /// Enforce node and arc consistency, then search for a fill.
    pub fn find_solution(&mut self) -> Result<Solution, SolveFailure> {
        let start = Instant::now();
        self.statistics = Statistics::default();

        info!(
            "Solving {} variables from {} words with {:?} inference",
            self.crossword.variables().len(),
            self.crossword.vocabulary().len(),
            self.options.inference,
        );

        let result = self.find_solution_impl();
        self.statistics.duration = start.elapsed();

        debug!("{:?}", self.statistics);

        match result {
            Ok(assignment) => {
                info!(
                    "Found a fill after {} states and {} backtracks in {:?}",
                    self.statistics.states, self.statistics.backtracks, self.statistics.duration,
                );
                Ok(Solution { assignment, statistics: self.statistics.clone() })
            }
            Err(failure) => {
                info!(
                    "No fill: {}; gave up after {} states in {:?}",
                    failure, self.statistics.states, self.statistics.duration,
                );
                Err(failure)
            }
        }
    }

    fn find_solution_impl(&mut self) -> Result<Assignment, SolveFailure> {
        self.enforce_node_consistency();

        // A variable with nothing of the right length might not cross anything, in which case
        // AC-3 would never notice it.
        if let Some(variable_id) = self.domains.first_empty() {
            let variable = *self.crossword.variable(variable_id);
            debug!("No words of length {} for {}", variable.length, variable);
            return Err(SolveFailure::EmptyDomain(variable));
        }

        if !self.ac3(None) {
            return Err(SolveFailure::ArcConsistencyCollapse);
        }

        let mut assignment = Assignment::for_crossword(self.crossword);
        self.backtrack(&mut assignment).ok_or(SolveFailure::Exhausted)
    }

    /// Find a complete, consistent assignment, or `None` if there isn't one.
    pub fn solve(&mut self) -> Option<Assignment> {
        self.find_solution().ok().map(|solution| solution.assignment)
    }
}
