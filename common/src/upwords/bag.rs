use crate::upwords::letter::Letter;
use crate::upwords::rng::{shuffle, DrawRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum BagError {
    #[error("There are no more tiles available.")]
    InsufficientTiles { requested: usize, available: usize },
}

// The shared pool of undrawn tiles. Draws come off the front.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TileBag {
    letters: Vec<Letter>,
}

impl TileBag {
    pub fn new<R: DrawRng + ?Sized>(mut letters: Vec<Letter>, rng: &mut R) -> Self {
        shuffle(&mut letters, rng);
        TileBag { letters }
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    pub fn draw_one(&mut self) -> Option<Letter> {
        if self.letters.is_empty() {
            return None;
        }
        Some(self.letters.remove(0))
    }

    pub fn draw_n(&mut self, count: usize) -> Result<Vec<Letter>, BagError> {
        if count < 1 || count > self.letters.len() {
            return Err(BagError::InsufficientTiles {
                requested: count,
                available: self.letters.len(),
            });
        }
        Ok(self.letters.drain(..count).collect())
    }

    pub fn return_tile(&mut self, letter: Letter) {
        self.letters.push(letter);
    }

    pub fn letters(&self) -> &[Letter] {
        &self.letters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upwords::rng::GameRng;

    struct MockRng;

    impl DrawRng for MockRng {
        fn index(&mut self, upper: usize) -> usize {
            upper - 1
        }

        fn bytes(&mut self) -> [u8; 16] {
            [0; 16]
        }
    }

    fn bag(letters: &str) -> TileBag {
        TileBag::new(Letter::tiles_from(letters), &mut MockRng)
    }

    #[test]
    fn test_draw_one_takes_from_front() {
        let mut bag = bag("ABC");
        assert_eq!(bag.draw_one(), Some(Letter::from("A")));
        assert_eq!(bag.len(), 2);
        bag.draw_one();
        bag.draw_one();
        assert_eq!(bag.draw_one(), None);
        assert!(bag.is_empty());
    }

    #[test]
    fn test_draw_n() {
        let mut bag = bag("ABCDE");
        assert_eq!(bag.draw_n(2).unwrap(), Letter::tiles_from("AB"));
        assert_eq!(bag.len(), 3);
        assert_eq!(
            bag.draw_n(4),
            Err(BagError::InsufficientTiles {
                requested: 4,
                available: 3
            })
        );
        assert!(bag.draw_n(0).is_err());
        assert_eq!(bag.len(), 3);
        assert_eq!(bag.draw_n(3).unwrap(), Letter::tiles_from("CDE"));
    }

    #[test]
    fn test_return_tile_goes_to_back() {
        let mut bag = bag("AB");
        bag.return_tile(Letter::from("Z"));
        assert_eq!(bag.letters(), Letter::tiles_from("ABZ").as_slice());
    }

    #[test]
    fn test_shuffle_conserves_tiles() {
        let letters = Letter::tiles_from("AACDEEFIILLMNOOPRSSTUWY");
        let bag = TileBag::new(letters.clone(), &mut GameRng::seeded(42));
        let mut drawn: Vec<String> = bag.letters().iter().map(|l| l.to_string()).collect();
        let mut expected: Vec<String> = letters.iter().map(|l| l.to_string()).collect();
        drawn.sort();
        expected.sort();
        assert_eq!(drawn, expected);
    }
}
