use serde::{Deserialize, Serialize};
use std::fmt;

// A single tile token. Most tiles carry one letter, but `Qu` is one tile.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Letter(String);

pub const QU: &str = "Qu";

impl Letter {
    pub fn new(letter: impl Into<String>) -> Self {
        Letter(letter.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_qu(&self) -> bool {
        self.0 == QU
    }

    pub fn is_s(&self) -> bool {
        self.0 == "S"
    }

    // Expand a compact letter list into tiles, where `Q` stands for the `Qu` tile
    pub fn tiles_from(letters: &str) -> Vec<Letter> {
        letters
            .chars()
            .map(|c| match c {
                'Q' => Letter::new(QU),
                c => Letter::new(c.to_string()),
            })
            .collect()
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Letter {
    fn from(letter: &str) -> Self {
        Letter::new(letter)
    }
}
