use crate::upwords::letter::Letter;
use crate::upwords::rack::Rack;
use crate::upwords::turn::{Turn, TurnAction};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum IdError {
    #[error("Game {0} is not valid.")]
    InvalidGameId(String),
    #[error("Player name <blank> is not valid.")]
    BlankPlayerName,
}

// Opaque and unique within a game. The server fills it with a UUID.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        PlayerId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(try_from = "String", into = "String")]
pub struct PlayerName(String);

impl PlayerName {
    pub fn new(name: impl Into<String>) -> Result<Self, IdError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(IdError::BlankPlayerName);
        }
        Ok(PlayerName(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PlayerName {
    type Error = IdError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        PlayerName::new(name)
    }
}

impl From<PlayerName> for String {
    fn from(name: PlayerName) -> Self {
        name.0
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Player {
    id: PlayerId,
    name: PlayerName,
    is_creator: bool,
    rack: Rack,
    score: i32,
    last_turn: Option<Turn>,
}

impl Player {
    pub fn new(id: PlayerId, name: PlayerName, is_creator: bool) -> Self {
        Player {
            id,
            name,
            is_creator,
            rack: Rack::new(Vec::new(), 0),
            score: 0,
            last_turn: None,
        }
    }

    pub fn id(&self) -> &PlayerId {
        &self.id
    }

    pub fn name(&self) -> &PlayerName {
        &self.name
    }

    pub fn is_creator(&self) -> bool {
        self.is_creator
    }

    pub fn rack(&self) -> &Rack {
        &self.rack
    }

    pub fn rack_mut(&mut self) -> &mut Rack {
        &mut self.rack
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn last_turn(&self) -> Option<&Turn> {
        self.last_turn.as_ref()
    }

    pub fn deal_rack(&mut self, letters: Vec<Letter>, rack_size: usize) {
        self.rack = Rack::new(letters, rack_size);
    }

    pub fn increase_score(&mut self, score: i32, words: Vec<String>) {
        self.score += score;
        self.last_turn = Some(Turn::new(self.id.clone(), TurnAction::Play, score, Some(words)));
    }

    // End of game penalty for tiles left on the rack
    pub fn decrease_score(&mut self, debit: i32) {
        self.score -= debit;
        self.last_turn = Some(Turn::new(self.id.clone(), TurnAction::EndGame, -debit, None));
    }

    pub fn pass(&mut self) {
        self.last_turn = Some(Turn::new(self.id.clone(), TurnAction::Pass, 0, None));
    }

    pub fn swap(&mut self) {
        self.last_turn = Some(Turn::new(self.id.clone(), TurnAction::Swap, 0, None));
    }

    pub fn has_passed(&self) -> bool {
        matches!(&self.last_turn, Some(turn) if turn.action == TurnAction::Pass)
    }
}
