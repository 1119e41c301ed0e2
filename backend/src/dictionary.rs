use hashbrown::HashSet;
use std::fs;
use std::io;
use std::path::Path;
use words_common::Dictionary;

// A word list held in memory. Words compare case-insensitively.
#[derive(Debug, Default)]
pub struct WordList {
    words: HashSet<String>,
}

impl WordList {
    // One word per line, blank lines ignored
    pub fn from_file(path: impl AsRef<Path>) -> io::Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(WordList::from_words(contents.lines()))
    }

    pub fn from_words<'a>(words: impl IntoIterator<Item = &'a str>) -> Self {
        let words = words
            .into_iter()
            .map(str::trim)
            .filter(|word| !word.is_empty())
            .map(str::to_uppercase)
            .collect();
        WordList { words }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_uppercase())
    }
}

impl Dictionary for WordList {
    fn words_not_recognized(&self, words: &[String]) -> Vec<String> {
        words
            .iter()
            .filter(|word| !self.contains(word))
            .cloned()
            .collect()
    }
}
