use std::collections::BTreeMap;

use crate::crossword::Crossword;
use crate::types::{Variable, VariableId, WordId};

/// A partial mapping from variables to the words chosen for them. Each variable holds at most one
/// word, and removing a variable's word puts the assignment back exactly as it was before that
/// word was added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    words: Vec<Option<WordId>>,
    assigned_count: usize,
}

impl Assignment {
    /// An empty assignment for a crossword with `variable_count` variables.
    pub fn new(variable_count: usize) -> Assignment {
        Assignment { words: vec![None; variable_count], assigned_count: 0 }
    }

    /// An empty assignment sized for the given crossword.
    pub fn for_crossword(crossword: &Crossword) -> Assignment {
        Assignment::new(crossword.variables().len())
    }

    /// Assign a word to a variable, returning the word it replaced, if any.
    pub fn assign(&mut self, variable_id: VariableId, word_id: WordId) -> Option<WordId> {
        let previous = self.words[variable_id].replace(word_id);
        if previous.is_none() {
            self.assigned_count += 1;
        }
        previous
    }

    /// Clear a variable's word, returning it.
    pub fn unassign(&mut self, variable_id: VariableId) -> Option<WordId> {
        let previous = self.words[variable_id].take();
        if previous.is_some() {
            self.assigned_count -= 1;
        }
        previous
    }

    pub fn get(&self, variable_id: VariableId) -> Option<WordId> {
        self.words[variable_id]
    }

    pub fn contains(&self, variable_id: VariableId) -> bool {
        self.words[variable_id].is_some()
    }

    pub fn len(&self) -> usize {
        self.assigned_count
    }

    pub fn is_empty(&self) -> bool {
        self.assigned_count == 0
    }

    /// Does every variable have a word?
    pub fn is_complete(&self) -> bool {
        self.assigned_count == self.words.len()
    }

    /// The assigned (variable id, word id) pairs, in variable order.
    pub fn iter(&self) -> impl Iterator<Item = (VariableId, WordId)> + '_ {
        self.words
            .iter()
            .enumerate()
            .filter_map(|(variable_id, word_id)| word_id.map(|word_id| (variable_id, word_id)))
    }

    /// The text of the word assigned to a variable.
    pub fn word<'a>(&self, crossword: &'a Crossword, variable: &Variable) -> Option<&'a str> {
        let variable_id = crossword.variable_id(variable)?;
        self.get(variable_id)
            .map(|word_id| crossword.vocabulary().word(word_id).string.as_str())
    }

    /// The assignment keyed by variable, with the words spelled out.
    pub fn to_map(&self, crossword: &Crossword) -> BTreeMap<Variable, String> {
        self.iter()
            .map(|(variable_id, word_id)| {
                (
                    *crossword.variable(variable_id),
                    crossword.vocabulary().word(word_id).string.clone(),
                )
            })
            .collect()
    }
}

/// Check whether the words in an assignment fit the puzzle: each one has its variable's length,
/// no word is used by two variables, and crossing words agree on their shared letter.
pub fn consistent(crossword: &Crossword, assignment: &Assignment) -> bool {
    let vocabulary = crossword.vocabulary();
    let assigned: Vec<(VariableId, WordId)> = assignment.iter().collect();

    for (idx, &(variable_id, word_id)) in assigned.iter().enumerate() {
        let word = vocabulary.word(word_id);
        if word.len() != crossword.variable(variable_id).length {
            return false;
        }

        for &(other_variable_id, other_word_id) in &assigned[idx + 1..] {
            // Word ids are unique per string, so this is a textual comparison.
            if word_id == other_word_id {
                return false;
            }

            if let Some((cell, other_cell)) = crossword.overlap(variable_id, other_variable_id) {
                let other_word = vocabulary.word(other_word_id);
                if word.glyphs.get(cell) != other_word.glyphs.get(other_cell) {
                    return false;
                }
            }
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use crate::assignment::{consistent, Assignment};
    use crate::crossword::Crossword;
    use crate::types::Direction::{Across, Down};
    use crate::types::Variable;
    use crate::word_list::Vocabulary;

    fn corner() -> Crossword {
        let vocabulary: Vocabulary =
            ["cat", "dog", "bat", "cats", "dogs"].into_iter().collect();
        let variables = vec![Variable::new(0, 0, Across, 3), Variable::new(0, 0, Down, 4)];
        Crossword::new(3, 4, variables, vocabulary).unwrap()
    }

    fn assignment_of(crossword: &Crossword, words: &[&str]) -> Assignment {
        let mut assignment = Assignment::for_crossword(crossword);
        for (variable_id, word) in words.iter().enumerate() {
            assignment.assign(variable_id, crossword.vocabulary().id(word).unwrap());
        }
        assignment
    }

    #[test]
    fn test_assign_and_unassign() {
        let mut assignment = Assignment::new(3);
        let empty = assignment.clone();

        assert_eq!(assignment.assign(1, 7), None);
        assert_eq!(assignment.assign(1, 8), Some(7));
        assert_eq!(assignment.len(), 1);
        assert!(!assignment.is_complete());
        assert_eq!(assignment.iter().collect::<Vec<_>>(), vec![(1, 8)]);

        assert_eq!(assignment.unassign(1), Some(8));
        assert_eq!(assignment.unassign(1), None);
        assert_eq!(assignment, empty);
    }

    #[test]
    fn test_projection() {
        let crossword = corner();
        let assignment = assignment_of(&crossword, &["cat", "cats"]);

        assert!(assignment.is_complete());
        assert_eq!(assignment.word(&crossword, &Variable::new(0, 0, Down, 4)), Some("cats"));
        assert_eq!(assignment.word(&crossword, &Variable::new(1, 0, Down, 4)), None);

        let map = assignment.to_map(&crossword);
        assert_eq!(map[&Variable::new(0, 0, Across, 3)], "cat");
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_consistent_crossing() {
        let crossword = corner();

        assert!(consistent(&crossword, &assignment_of(&crossword, &[])));
        assert!(consistent(&crossword, &assignment_of(&crossword, &["cat"])));
        assert!(consistent(&crossword, &assignment_of(&crossword, &["cat", "cats"])));
        assert!(consistent(&crossword, &assignment_of(&crossword, &["dog", "dogs"])));
        assert!(!consistent(&crossword, &assignment_of(&crossword, &["cat", "dogs"])));
    }

    #[test]
    fn test_inconsistent_length() {
        let crossword = corner();

        assert!(!consistent(&crossword, &assignment_of(&crossword, &["cats"])));

        let mut assignment = Assignment::for_crossword(&crossword);
        assignment.assign(1, crossword.vocabulary().id("dog").unwrap());
        assert!(!consistent(&crossword, &assignment));
    }

    #[test]
    fn test_inconsistent_duplicate_word() {
        // Two parallel slots that never touch.
        let variables = vec![Variable::new(0, 0, Across, 3), Variable::new(2, 0, Across, 3)];
        let vocabulary: Vocabulary = ["cat", "dog"].into_iter().collect();
        let crossword = Crossword::new(3, 3, variables, vocabulary).unwrap();

        assert!(consistent(&crossword, &assignment_of(&crossword, &["cat", "dog"])));
        assert!(!consistent(&crossword, &assignment_of(&crossword, &["cat", "cat"])));
    }
}
