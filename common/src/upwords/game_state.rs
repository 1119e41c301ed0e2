use crate::upwords::bag::{BagError, TileBag};
use crate::upwords::board::Board;
use crate::upwords::letter::Letter;
use crate::upwords::play::ValidPlay;
use crate::upwords::player::{IdError, Player, PlayerId};
use crate::upwords::rack::RackError;
use crate::upwords::rng::DrawRng;
use crate::upwords::ruleset::GameRules;
use crate::upwords::turn::TurnOrder;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

const GAME_ID_LEN: usize = 4;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct GameId(String);

impl GameId {
    pub fn new(id: impl Into<String>) -> Result<Self, IdError> {
        let id = id.into();
        if id.len() != GAME_ID_LEN || !id.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(IdError::InvalidGameId(id));
        }
        Ok(GameId(id))
    }

    pub fn generate<R: DrawRng + ?Sized>(rng: &mut R) -> Self {
        let id = (0..GAME_ID_LEN)
            .map(|_| char::from(b'A' + rng.index(26) as u8))
            .collect();
        GameId(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for GameId {
    type Error = IdError;

    fn try_from(id: String) -> Result<Self, Self::Error> {
        GameId::new(id)
    }
}

impl From<GameId> for String {
    fn from(id: GameId) -> Self {
        id.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameStatus {
    BeingFormed,
    InProgress,
    Completed,
}

// A game waiting for players, before any tiles exist.
#[derive(Clone, Debug, PartialEq)]
pub struct CreatedGame {
    pub game_id: GameId,
    pub player: Player,
}

#[derive(Error, Debug, PartialEq)]
pub enum StateError {
    #[error("Player {0} is not in this game.")]
    UnknownPlayer(PlayerId),
    #[error("You cannot exchange a letter not on your rack.")]
    SwapLetterNotOnRack(Letter),
    #[error(transparent)]
    Rack(#[from] RackError),
    #[error(transparent)]
    Bag(#[from] BagError),
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    game_id: GameId,
    rules: GameRules,
    board: Board,
    bag: TileBag,
    players: Vec<Player>,
    turn_order: TurnOrder,
    status: GameStatus,
}

impl GameState {
    // Deals every player a full rack from a freshly shuffled bag and picks the turn order
    pub fn start<R: DrawRng + ?Sized>(
        game_id: GameId,
        rules: GameRules,
        mut players: Vec<Player>,
        rng: &mut R,
    ) -> Result<Self, BagError> {
        let mut bag = TileBag::new(rules.letters.clone(), rng);
        for player in players.iter_mut() {
            let letters = bag.draw_n(rules.rack_size)?;
            player.deal_rack(letters, rules.rack_size);
        }
        let ids = players.iter().map(|p| p.id().clone()).collect();
        let turn_order = TurnOrder::new(ids, rng);
        Ok(GameState {
            game_id,
            board: Board::new(&rules),
            rules,
            bag,
            players,
            turn_order,
            status: GameStatus::InProgress,
        })
    }

    pub fn game_id(&self) -> &GameId {
        &self.game_id
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn bag(&self) -> &TileBag {
        &self.bag
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn turn_order(&self) -> &TurnOrder {
        &self.turn_order
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn player(&self, player_id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == player_id)
    }

    fn player_index(&self, player_id: &PlayerId) -> Result<usize, StateError> {
        self.players
            .iter()
            .position(|p| p.id() == player_id)
            .ok_or_else(|| StateError::UnknownPlayer(player_id.clone()))
    }

    pub fn tile_count(&self) -> usize {
        self.bag.len()
            + self.board.tile_count()
            + self.players.iter().map(|p| p.rack().len()).sum::<usize>()
    }

    // Lays the tiles, refilling the rack one for one while the bag lasts. The
    // game is over once the player has nothing left to play.
    pub fn apply_play(&mut self, player_id: &PlayerId, play: &ValidPlay) -> Result<(), StateError> {
        let index = self.player_index(player_id)?;
        for tile in play.tiles() {
            self.players[index].rack_mut().remove(&tile.letter)?;
            self.board.add_tile(tile.position, tile.letter.clone());
            if let Some(next) = self.bag.draw_one() {
                self.players[index].rack_mut().add(next)?;
            }
        }
        self.players[index].increase_score(play.score(), play.words().to_vec());

        if self.players[index].rack().is_empty() {
            self.finalise_scores(Some(player_id));
            self.status = GameStatus::Completed;
        } else {
            self.turn_order.next_turn();
        }
        Ok(())
    }

    // The game is over once every player's latest action is a pass
    pub fn pass(&mut self, player_id: &PlayerId) -> Result<(), StateError> {
        let index = self.player_index(player_id)?;
        self.players[index].pass();

        if self.players.iter().all(Player::has_passed) {
            self.finalise_scores(None);
            self.status = GameStatus::Completed;
        } else {
            self.turn_order.next_turn();
        }
        Ok(())
    }

    pub fn swap(&mut self, player_id: &PlayerId, letter: &Letter) -> Result<(), StateError> {
        let index = self.player_index(player_id)?;
        if self.bag.is_empty() {
            return Err(BagError::InsufficientTiles {
                requested: 1,
                available: 0,
            }
            .into());
        }
        if !self.players[index].rack().contains(letter) {
            return Err(StateError::SwapLetterNotOnRack(letter.clone()));
        }

        let rack = self.players[index].rack_mut();
        rack.remove(letter)?;
        let mut drawn = self.bag.draw_n(1)?;
        for next in drawn.drain(..) {
            rack.add(next)?;
        }
        self.bag.return_tile(letter.clone());

        self.players[index].swap();
        self.turn_order.next_turn();
        Ok(())
    }

    fn finalise_scores(&mut self, except: Option<&PlayerId>) {
        let debit = self.rules.debit_per_remaining_tile;
        for player in self.players.iter_mut() {
            if Some(player.id()) == except {
                continue;
            }
            let remaining = player.rack().len() as i32;
            player.decrease_score(remaining * debit);
        }
    }
}
