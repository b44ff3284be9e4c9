use bit_set::BitSet;
use log::debug;

use crate::crossword::Crossword;
use crate::types::{VariableId, WordId};

/// The live set of candidate words for each variable, indexed by `VariableId`. Iterating a
/// domain always visits words in ascending `WordId` order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domains {
    options: Vec<BitSet>,
}

impl Domains {
    /// Give every variable the whole vocabulary as its starting domain.
    pub fn new(crossword: &Crossword) -> Domains {
        let word_count = crossword.vocabulary().len();
        let mut all_words = BitSet::with_capacity(word_count);
        for word_id in 0..word_count {
            all_words.insert(word_id);
        }

        Domains {
            options: crossword.variables().iter().map(|_| all_words.clone()).collect(),
        }
    }

    pub fn get(&self, variable_id: VariableId) -> &BitSet {
        &self.options[variable_id]
    }

    pub fn contains(&self, variable_id: VariableId, word_id: WordId) -> bool {
        self.options[variable_id].contains(word_id)
    }

    /// Add a word to a domain. Returns false if it was already there.
    pub fn insert(&mut self, variable_id: VariableId, word_id: WordId) -> bool {
        self.options[variable_id].insert(word_id)
    }

    /// Remove a word from a domain. Returns false if it wasn't there.
    pub fn remove(&mut self, variable_id: VariableId, word_id: WordId) -> bool {
        self.options[variable_id].remove(word_id)
    }

    /// Shrink a domain down to a single word.
    pub fn restrict(&mut self, variable_id: VariableId, word_id: WordId) {
        let domain = &mut self.options[variable_id];
        domain.clear();
        domain.insert(word_id);
    }

    pub fn len(&self, variable_id: VariableId) -> usize {
        self.options[variable_id].len()
    }

    pub fn is_empty(&self, variable_id: VariableId) -> bool {
        self.options[variable_id].is_empty()
    }

    /// The first variable, if any, that has no candidates left.
    pub fn first_empty(&self) -> Option<VariableId> {
        self.options.iter().position(|domain| domain.is_empty())
    }

    pub fn iter(&self, variable_id: VariableId) -> impl Iterator<Item = WordId> + '_ {
        self.options[variable_id].iter()
    }

    /// The candidate strings for a variable.
    pub fn words<'a>(
        &'a self,
        crossword: &'a Crossword,
        variable_id: VariableId,
    ) -> impl Iterator<Item = &'a str> + 'a {
        self.iter(variable_id)
            .map(move |word_id| crossword.vocabulary().word(word_id).string.as_str())
    }

    /// Make every domain node-consistent by removing the words whose length doesn't match their
    /// variable's length.
    pub fn enforce_node_consistency(&mut self, crossword: &Crossword) {
        let vocabulary = crossword.vocabulary();

        for (variable_id, variable) in crossword.variables().iter().enumerate() {
            // Walk a snapshot so that removals can't disturb the iteration.
            let snapshot: Vec<WordId> = self.iter(variable_id).collect();

            for word_id in snapshot {
                if vocabulary.word(word_id).len() != variable.length {
                    self.remove(variable_id, word_id);
                }
            }

            debug!(
                "Node consistency left {} options for {}",
                self.len(variable_id),
                variable,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use crate::crossword::Crossword;
    use crate::domains::Domains;
    use crate::types::Direction::{Across, Down};
    use crate::types::Variable;
    use crate::word_list::Vocabulary;

    fn crossword() -> Crossword {
        let vocabulary: Vocabulary =
            ["cat", "dog", "bat", "cats", "dogs", "a"].into_iter().collect();
        let variables = vec![Variable::new(0, 0, Across, 3), Variable::new(0, 0, Down, 4)];

        Crossword::new(3, 4, variables, vocabulary).unwrap()
    }

    #[test]
    fn test_initialized_with_full_vocabulary() {
        let crossword = crossword();
        let domains = Domains::new(&crossword);

        assert_eq!(domains.len(0), 6);
        assert_eq!(domains.len(1), 6);
        assert_eq!(domains.first_empty(), None);
    }

    #[test]
    fn test_insert_and_remove() {
        let crossword = crossword();
        let mut domains = Domains::new(&crossword);

        assert!(domains.remove(0, 2));
        assert!(!domains.remove(0, 2));
        assert!(!domains.contains(0, 2));
        assert!(domains.contains(1, 2));

        assert!(domains.insert(0, 2));
        assert!(!domains.insert(0, 2));
        assert_eq!(domains.len(0), 6);
    }

    #[test]
    fn test_node_consistency() {
        let crossword = crossword();
        let mut domains = Domains::new(&crossword);

        domains.enforce_node_consistency(&crossword);

        assert_eq!(domains.words(&crossword, 0).collect::<Vec<_>>(), vec!["cat", "dog", "bat"]);
        assert_eq!(domains.words(&crossword, 1).collect::<Vec<_>>(), vec!["cats", "dogs"]);

        for (variable_id, variable) in crossword.variables().iter().enumerate() {
            for word_id in domains.iter(variable_id) {
                assert_eq!(crossword.vocabulary().word(word_id).len(), variable.length);
            }
        }
    }

    #[test]
    fn test_node_consistency_is_idempotent() {
        let crossword = crossword();
        let mut domains = Domains::new(&crossword);

        domains.enforce_node_consistency(&crossword);
        let once = domains.clone();
        domains.enforce_node_consistency(&crossword);

        assert_eq!(domains, once);
    }

    #[test]
    fn test_node_consistency_can_empty_a_domain() {
        let vocabulary: Vocabulary = ["cat", "dogs"].into_iter().collect();
        let crossword =
            Crossword::new(5, 1, vec![Variable::new(0, 0, Across, 5)], vocabulary).unwrap();
        let mut domains = Domains::new(&crossword);

        domains.enforce_node_consistency(&crossword);

        assert!(domains.is_empty(0));
        assert_eq!(domains.first_empty(), Some(0));
    }

    #[test]
    fn test_restrict() {
        let crossword = crossword();
        let mut domains = Domains::new(&crossword);

        domains.restrict(1, 3);

        assert_eq!(domains.iter(1).collect::<Vec<_>>(), vec![3]);
        assert_eq!(domains.len(0), 6);
    }
}
