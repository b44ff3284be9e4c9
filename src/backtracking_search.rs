use std::cmp::Reverse;
use std::collections::HashMap;

use instant::Duration;
use log::trace;

use crate::arc_consistency::ac3;
use crate::assignment::{consistent, Assignment};
use crate::crossword::Crossword;
use crate::domains::Domains;
use crate::types::{ArcPair, VariableId, WordId};

/// How much constraint propagation to do after each tentative choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Inference {
    /// Only check the extended assignment for consistency. The domains stay exactly as they were
    /// before search began.
    #[default]
    None,

    /// Maintain arc consistency: restrict the chosen variable to its new word in a copy of the
    /// domains, run AC-3 outward from it, and search the rest of the branch with the pruned copy.
    ArcConsistency,
}

/// A struct tracking statistics about the search process.
#[derive(Debug, Clone, Default)]
pub struct Statistics {
    /// How many times a variable was selected for assignment.
    pub states: u64,

    /// How many tentative words were retracted after the branch below them failed.
    pub backtracks: u64,

    /// How many tentative words were rejected because interleaved AC-3 emptied a domain.
    pub inference_failures: u64,

    pub duration: Duration,
}

/// Choose the unassigned variable with the fewest remaining options, breaking ties in favor of
/// the variable crossing the most others and then the lowest id. Returns `None` if everything is
/// assigned.
pub fn select_unassigned_variable(
    crossword: &Crossword,
    domains: &Domains,
    assignment: &Assignment,
) -> Option<VariableId> {
    (0..crossword.variables().len())
        .filter(|&variable_id| !assignment.contains(variable_id))
        .min_by_key(|&variable_id| {
            (domains.len(variable_id), Reverse(crossword.degree(variable_id)), variable_id)
        })
}

/// Return the options for a variable ordered by how many options they would rule out for its
/// unassigned neighbors, fewest first. Options that rule out the same number keep their `WordId`
/// order.
pub fn order_domain_values(
    crossword: &Crossword,
    domains: &Domains,
    variable_id: VariableId,
    assignment: &Assignment,
) -> Vec<WordId> {
    let vocabulary = crossword.vocabulary();

    // For each unassigned crossing, how many of the neighbor's options put each glyph in the
    // shared cell? Anything that doesn't match our glyph there gets ruled out.
    let crossing_glyph_counts: Vec<(usize, usize, HashMap<char, usize>)> = crossword
        .crossings(variable_id)
        .iter()
        .filter(|crossing| !assignment.contains(crossing.other_variable_id))
        .map(|crossing| {
            let mut glyph_counts: HashMap<char, usize> = HashMap::new();
            for other_word_id in domains.iter(crossing.other_variable_id) {
                if let Some(&glyph) = vocabulary.word(other_word_id).glyphs.get(crossing.other_cell)
                {
                    *glyph_counts.entry(glyph).or_insert(0) += 1;
                }
            }
            (crossing.cell, domains.len(crossing.other_variable_id), glyph_counts)
        })
        .collect();

    let mut ranked: Vec<(WordId, usize)> = domains
        .iter(variable_id)
        .map(|word_id| {
            let word = vocabulary.word(word_id);
            let eliminated: usize = crossing_glyph_counts
                .iter()
                .map(|(cell, option_count, glyph_counts)| {
                    let matching = word
                        .glyphs
                        .get(*cell)
                        .and_then(|glyph| glyph_counts.get(glyph))
                        .copied()
                        .unwrap_or(0);
                    option_count - matching
                })
                .sum();
            (word_id, eliminated)
        })
        .collect();

    ranked.sort_by_key(|&(_, eliminated)| eliminated);
    ranked.into_iter().map(|(word_id, _)| word_id).collect()
}

/// Depth-first search over partial assignments. The assignment passed to `backtrack` is always
/// handed back in the state it arrived in; a successful search returns the completed copy.
pub struct Search<'a> {
    crossword: &'a Crossword,
    inference: Inference,
    statistics: &'a mut Statistics,
}

impl<'a> Search<'a> {
    pub fn new(
        crossword: &'a Crossword,
        inference: Inference,
        statistics: &'a mut Statistics,
    ) -> Search<'a> {
        Search { crossword, inference, statistics }
    }

    /// Extend `assignment` into a complete, consistent assignment drawing each word from
    /// `domains`, or return `None` if there isn't one.
    pub fn backtrack(&mut self, domains: &Domains, assignment: &mut Assignment) -> Option<Assignment> {
        let variable_id = match select_unassigned_variable(self.crossword, domains, assignment) {
            Some(variable_id) => variable_id,
            None => return Some(assignment.clone()),
        };
        self.statistics.states += 1;

        trace!(
            "State {}: filling {} with {} options ({} of {} assigned)",
            self.statistics.states,
            self.crossword.variable(variable_id),
            domains.len(variable_id),
            assignment.len(),
            self.crossword.variables().len(),
        );

        for word_id in order_domain_values(self.crossword, domains, variable_id, assignment) {
            assignment.assign(variable_id, word_id);

            let result = if consistent(self.crossword, assignment) {
                self.descend(domains, assignment, variable_id, word_id)
            } else {
                None
            };

            // Undo the tentative choice whether or not it worked out.
            assignment.unassign(variable_id);

            if result.is_some() {
                return result;
            }
        }

        None
    }

    /// Search below a consistent tentative choice of `word_id` for `variable_id`.
    fn descend(
        &mut self,
        domains: &Domains,
        assignment: &mut Assignment,
        variable_id: VariableId,
        word_id: WordId,
    ) -> Option<Assignment> {
        let result = match self.inference {
            Inference::None => self.backtrack(domains, assignment),
            Inference::ArcConsistency => {
                let mut branch_domains = domains.clone();
                branch_domains.restrict(variable_id, word_id);

                let arcs: Vec<ArcPair> = self
                    .crossword
                    .neighbors(variable_id)
                    .filter(|&neighbor_id| !assignment.contains(neighbor_id))
                    .map(|neighbor_id| (neighbor_id, variable_id))
                    .collect();

                if !ac3(self.crossword, &mut branch_domains, Some(arcs.as_slice())) {
                    self.statistics.inference_failures += 1;
                    return None;
                }

                self.backtrack(&branch_domains, assignment)
            }
        };

        if result.is_none() {
            self.statistics.backtracks += 1;
        }
        result
    }
}
