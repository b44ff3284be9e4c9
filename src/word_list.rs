use std::collections::HashMap;
use std::fmt::{Debug, Formatter};

use smallvec::SmallVec;

use crate::types::WordId;
use crate::MAX_SLOT_LENGTH;

/// A struct representing a word that can be chosen for a given variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub string: String,
    pub glyphs: SmallVec<[char; MAX_SLOT_LENGTH]>,
}

impl Word {
    pub fn new(string: &str) -> Word {
        Word {
            string: string.to_string(),
            glyphs: string.chars().collect(),
        }
    }

    /// Length in characters, which is what a variable's length is compared against.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

/// The set of candidate words shared by every variable. Each distinct word is stored once and
/// referred to everywhere else by its `WordId`, so two ids are equal iff their words are.
#[derive(Clone, Default)]
pub struct Vocabulary {
    words: Vec<Word>,
    ids_by_string: HashMap<String, WordId>,
}

impl Debug for Vocabulary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vocabulary")
            .field("words", &(["(", &self.words.len().to_string(), " entries)"].join("")))
            .finish()
    }
}

impl Vocabulary {
    pub fn new() -> Vocabulary {
        Vocabulary::default()
    }

    /// Add a word, returning its id. Adding a word that's already present is a no-op that returns
    /// the existing id.
    pub fn insert(&mut self, string: &str) -> WordId {
        if let Some(&word_id) = self.ids_by_string.get(string) {
            return word_id;
        }

        let word_id = self.words.len();
        self.words.push(Word::new(string));
        self.ids_by_string.insert(string.to_string(), word_id);
        word_id
    }

    pub fn id(&self, string: &str) -> Option<WordId> {
        self.ids_by_string.get(string).copied()
    }

    pub fn word(&self, word_id: WordId) -> &Word {
        &self.words[word_id]
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (WordId, &Word)> {
        self.words.iter().enumerate()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Vocabulary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Vocabulary {
        let mut vocabulary = Vocabulary::new();
        for word in iter {
            vocabulary.insert(word.as_ref());
        }
        vocabulary
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use crate::word_list::{Vocabulary, Word};

    #[test]
    fn test_duplicate_insertion_is_a_no_op() {
        let vocabulary: Vocabulary = ["cat", "dog", "cat"].into_iter().collect();

        assert_eq!(vocabulary.len(), 2);
        assert_eq!(vocabulary.id("cat"), Some(0));
        assert_eq!(vocabulary.id("dog"), Some(1));
        assert_eq!(vocabulary.id("cow"), None);
    }

    #[test]
    fn test_word_length_counts_chars() {
        let word = Word::new("café");

        assert_eq!(word.len(), 4);
        assert_eq!(word.glyphs[3], 'é');
    }
}
