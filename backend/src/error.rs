use crate::store::StoreError;
use thiserror::Error;
use words_common::messages::ErrorKind;
use words_common::{BagError, GameId, IdError, PlayError, PlayerId, PlayerName, StateError};

#[derive(Error, Debug)]
pub enum GameError {
    #[error(transparent)]
    Id(#[from] IdError),
    #[error("Game {0} does not exist.")]
    GameDoesNotExist(GameId),
    #[error("Game {0} is already in progress.")]
    AlreadyInProgress(GameId),
    #[error("Game {0} already has the maximum number of players.")]
    AtCapacity(GameId),
    #[error("Game {0} has not started.")]
    NotStarted(GameId),
    #[error("Game {0} is over.")]
    GameOver(GameId),
    #[error("Not enough players in game {0}.")]
    NotEnoughPlayers(GameId),
    #[error("Game {0} already contains a player named {1}.")]
    PlayerAlreadyInGame(GameId, PlayerName),
    #[error("Game {0} does not contain player with Id {1}.")]
    PlayerNotInGame(GameId, PlayerId),
    #[error("Player {player_id} in game {game_id} cannot currently do task '{task}'.")]
    UnexpectedPlayer {
        game_id: GameId,
        player_id: PlayerId,
        task: &'static str,
    },
    #[error(transparent)]
    Play(#[from] PlayError),
    #[error(transparent)]
    State(#[from] StateError),
    #[error(transparent)]
    Bag(#[from] BagError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("A game lock was poisoned")]
    LockPoisoned,
    #[error("Blocking task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl GameError {
    // Validation errors are the caller's fault and safe to show them
    pub fn kind(&self) -> ErrorKind {
        match self {
            GameError::Store(_) | GameError::LockPoisoned | GameError::Task(_) => ErrorKind::System,
            _ => ErrorKind::Validation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game_id() -> GameId {
        GameId::new("ABCD").unwrap()
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            GameError::GameDoesNotExist(game_id()).to_string(),
            "Game ABCD does not exist."
        );
        assert_eq!(
            GameError::UnexpectedPlayer {
                game_id: game_id(),
                player_id: PlayerId::new("p1"),
                task: "start",
            }
            .to_string(),
            "Player p1 in game ABCD cannot currently do task 'start'."
        );
        assert_eq!(
            GameError::from(PlayError::NotConnected).to_string(),
            "You must play letters that connect to a word already on the board."
        );
        assert_eq!(
            GameError::from(BagError::InsufficientTiles {
                requested: 1,
                available: 0
            })
            .to_string(),
            "There are no more tiles available."
        );
    }

    #[test]
    fn test_kinds() {
        assert_eq!(GameError::NotStarted(game_id()).kind(), ErrorKind::Validation);
        assert_eq!(GameError::from(PlayError::NoTiles).kind(), ErrorKind::Validation);
        assert_eq!(
            GameError::from(IdError::InvalidGameId("ab".to_string())).kind(),
            ErrorKind::Validation
        );
        assert_eq!(GameError::LockPoisoned.kind(), ErrorKind::System);
        assert_eq!(
            GameError::from(StoreError::Missing(game_id())).kind(),
            ErrorKind::System
        );
    }
}
