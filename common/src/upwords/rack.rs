use crate::upwords::letter::Letter;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum RackError {
    #[error("The rack is already full.  It contains '{rack}' and so cannot add letter '{letter}'.")]
    Full { rack: String, letter: Letter },
    #[error("The rack is empty, so cannot remove letter '{0}'.")]
    Empty(Letter),
    #[error("The letter '{letter}' is not on the rack '{rack}'.")]
    LetterNotOnRack { rack: String, letter: Letter },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Rack {
    letters: Vec<Letter>,
    max_len: usize,
}

impl Rack {
    pub fn new(letters: Vec<Letter>, max_len: usize) -> Self {
        Rack { letters, max_len }
    }

    pub fn letters(&self) -> &[Letter] {
        &self.letters
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn contains(&self, letter: &Letter) -> bool {
        self.letters.contains(letter)
    }

    pub fn add(&mut self, letter: Letter) -> Result<(), RackError> {
        if self.letters.len() >= self.max_len {
            return Err(RackError::Full {
                rack: self.to_string(),
                letter,
            });
        }
        self.letters.push(letter);
        Ok(())
    }

    // Removes one copy of the letter
    pub fn remove(&mut self, letter: &Letter) -> Result<(), RackError> {
        if self.letters.is_empty() {
            return Err(RackError::Empty(letter.clone()));
        }
        match self.letters.iter().position(|l| l == letter) {
            Some(index) => {
                self.letters.remove(index);
                Ok(())
            }
            None => Err(RackError::LetterNotOnRack {
                rack: self.to_string(),
                letter: letter.clone(),
            }),
        }
    }
}

impl std::fmt::Display for Rack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let letters: Vec<&str> = self.letters.iter().map(Letter::as_str).collect();
        write!(f, "[{}]", letters.join(", "))
    }
}
