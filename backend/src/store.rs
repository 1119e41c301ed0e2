use hashbrown::HashMap;
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;
use words_common::{CreatedGame, GameId, GameState, GameStatus, History, Player, PlayerId, Turn};

#[derive(Error, Debug, PartialEq)]
pub enum StoreError {
    #[error("Game {0} is not in the store")]
    Missing(GameId),
    #[error("Game {0} is already in the store")]
    Duplicate(GameId),
    #[error("Game {0} has no saved state")]
    NoState(GameId),
    #[error("The store lock was poisoned")]
    Poisoned,
}

type Result<T> = std::result::Result<T, StoreError>;

// Persistence for whole game snapshots. Every read hands back an owned copy.
pub trait GameStore {
    fn game_exists(&self, game_id: &GameId) -> Result<bool>;
    fn has_started(&self, game_id: &GameId) -> Result<bool>;
    fn is_at_capacity(&self, game_id: &GameId, capacity: usize) -> Result<bool>;
    fn load_players(&self, game_id: &GameId) -> Result<Vec<Player>>;
    fn load_state(&self, game_id: &GameId) -> Result<GameState>;
    fn save_created(&self, game: &CreatedGame) -> Result<()>;
    fn add_player(&self, game_id: &GameId, player: Player) -> Result<()>;
    fn start_game(&self, state: &GameState) -> Result<()>;
    // Records the acting player's latest turn
    fn save_turn_state(&self, state: &GameState, player_id: &PlayerId) -> Result<()>;
    // Records every player's latest turn
    fn save_final_state(&self, state: &GameState) -> Result<()>;
    fn load_history(&self, game_id: &GameId) -> Result<History>;
}

#[derive(Debug, Default)]
struct StoredGame {
    players: Vec<Player>,
    state: Option<GameState>,
    turns: Vec<Turn>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    games: Mutex<HashMap<GameId, StoredGame>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    fn games(&self) -> Result<MutexGuard<'_, HashMap<GameId, StoredGame>>> {
        self.games.lock().map_err(|_| StoreError::Poisoned)
    }

    fn with_game<T>(&self, game_id: &GameId, f: impl FnOnce(&mut StoredGame) -> Result<T>) -> Result<T> {
        let mut games = self.games()?;
        let game = games
            .get_mut(game_id)
            .ok_or_else(|| StoreError::Missing(game_id.clone()))?;
        f(game)
    }
}

impl GameStore for MemoryStore {
    fn game_exists(&self, game_id: &GameId) -> Result<bool> {
        Ok(self.games()?.contains_key(game_id))
    }

    fn has_started(&self, game_id: &GameId) -> Result<bool> {
        self.with_game(game_id, |game| Ok(game.state.is_some()))
    }

    fn is_at_capacity(&self, game_id: &GameId, capacity: usize) -> Result<bool> {
        self.with_game(game_id, |game| Ok(game.players.len() >= capacity))
    }

    // Once a game has started its players live in the state, with racks and scores
    fn load_players(&self, game_id: &GameId) -> Result<Vec<Player>> {
        self.with_game(game_id, |game| {
            Ok(match &game.state {
                Some(state) => state.players().to_vec(),
                None => game.players.clone(),
            })
        })
    }

    fn load_state(&self, game_id: &GameId) -> Result<GameState> {
        self.with_game(game_id, |game| {
            game.state
                .clone()
                .ok_or_else(|| StoreError::NoState(game_id.clone()))
        })
    }

    fn save_created(&self, created: &CreatedGame) -> Result<()> {
        let mut games = self.games()?;
        if games.contains_key(&created.game_id) {
            return Err(StoreError::Duplicate(created.game_id.clone()));
        }
        games.insert(
            created.game_id.clone(),
            StoredGame {
                players: vec![created.player.clone()],
                ..StoredGame::default()
            },
        );
        Ok(())
    }

    fn add_player(&self, game_id: &GameId, player: Player) -> Result<()> {
        self.with_game(game_id, |game| {
            game.players.push(player);
            Ok(())
        })
    }

    fn start_game(&self, state: &GameState) -> Result<()> {
        self.with_game(state.game_id(), |game| {
            game.state = Some(state.clone());
            Ok(())
        })
    }

    fn save_turn_state(&self, state: &GameState, player_id: &PlayerId) -> Result<()> {
        self.with_game(state.game_id(), |game| {
            if let Some(turn) = state.player(player_id).and_then(Player::last_turn) {
                game.turns.push(turn.clone());
            }
            game.state = Some(state.clone());
            Ok(())
        })
    }

    fn save_final_state(&self, state: &GameState) -> Result<()> {
        self.with_game(state.game_id(), |game| {
            game.turns
                .extend(state.players().iter().filter_map(|p| p.last_turn().cloned()));
            game.state = Some(state.clone());
            Ok(())
        })
    }

    fn load_history(&self, game_id: &GameId) -> Result<History> {
        self.with_game(game_id, |game| {
            let (status, tiles_left) = match &game.state {
                Some(state) => (state.status(), state.bag().len()),
                None => (GameStatus::BeingFormed, 0),
            };
            Ok(History {
                status,
                turns: game.turns.clone(),
                tiles_left,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use words_common::{DrawRng, GameRules, PlayerName, Ruleset, TurnAction};

    struct MockRng;

    impl DrawRng for MockRng {
        fn index(&mut self, upper: usize) -> usize {
            upper - 1
        }

        fn bytes(&mut self) -> [u8; 16] {
            [0; 16]
        }
    }

    fn game_id() -> GameId {
        GameId::new("ABCD").unwrap()
    }

    fn player(id: &str, is_creator: bool) -> Player {
        Player::new(PlayerId::new(id), PlayerName::new(id).unwrap(), is_creator)
    }

    fn created_store() -> MemoryStore {
        let store = MemoryStore::new();
        store
            .save_created(&CreatedGame {
                game_id: game_id(),
                player: player("a", true),
            })
            .unwrap();
        store.add_player(&game_id(), player("b", false)).unwrap();
        store
    }

    fn started(store: &MemoryStore) -> GameState {
        let players = store.load_players(&game_id()).unwrap();
        let state = GameState::start(
            game_id(),
            GameRules::new(Ruleset::MiniUpwords),
            players,
            &mut MockRng,
        )
        .unwrap();
        store.start_game(&state).unwrap();
        state
    }

    #[test]
    fn test_created_game() {
        let store = created_store();
        assert!(store.game_exists(&game_id()).unwrap());
        assert!(!store.game_exists(&GameId::new("WXYZ").unwrap()).unwrap());
        assert!(!store.has_started(&game_id()).unwrap());
        assert!(store.is_at_capacity(&game_id(), 2).unwrap());
        assert!(!store.is_at_capacity(&game_id(), 4).unwrap());
        assert_eq!(store.load_players(&game_id()).unwrap().len(), 2);
        assert_eq!(
            store.load_state(&game_id()),
            Err(StoreError::NoState(game_id()))
        );
        let history = store.load_history(&game_id()).unwrap();
        assert_eq!(history.status, GameStatus::BeingFormed);
        assert!(history.turns.is_empty());
    }

    #[test]
    fn test_duplicate_and_missing() {
        let store = created_store();
        let again = CreatedGame {
            game_id: game_id(),
            player: player("c", true),
        };
        assert_eq!(store.save_created(&again), Err(StoreError::Duplicate(game_id())));
        let other = GameId::new("WXYZ").unwrap();
        assert_eq!(store.has_started(&other), Err(StoreError::Missing(other.clone())));
        assert_eq!(
            store.add_player(&other, player("d", false)),
            Err(StoreError::Missing(other))
        );
    }

    #[test]
    fn test_turn_and_final_history() {
        let store = created_store();
        let mut state = started(&store);
        assert!(store.has_started(&game_id()).unwrap());

        let a = PlayerId::new("a");
        state.pass(&a).unwrap();
        store.save_turn_state(&state, &a).unwrap();
        let history = store.load_history(&game_id()).unwrap();
        assert_eq!(history.turns.len(), 1);
        assert_eq!(history.turns[0].action, TurnAction::Pass);
        assert_eq!(history.status, GameStatus::InProgress);
        assert_eq!(history.tiles_left, 13);

        let b = PlayerId::new("b");
        state.pass(&b).unwrap();
        store.save_final_state(&state).unwrap();
        let history = store.load_history(&game_id()).unwrap();
        assert_eq!(history.status, GameStatus::Completed);
        assert_eq!(history.turns.len(), 3);
        assert!(history.turns[1..]
            .iter()
            .all(|t| t.action == TurnAction::EndGame));
        assert_eq!(store.load_state(&game_id()).unwrap(), state);
    }

    #[test]
    fn test_loaded_state_is_a_copy() {
        let store = created_store();
        started(&store);
        let mut state = store.load_state(&game_id()).unwrap();
        state.pass(&PlayerId::new("a")).unwrap();
        let stored = store.load_state(&game_id()).unwrap();
        assert!(stored.player(&PlayerId::new("a")).unwrap().last_turn().is_none());
    }
}
