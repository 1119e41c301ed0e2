use crate::error::GameError;
use crate::locks::GameLocks;
use crate::store::GameStore;
use std::sync::Mutex;
use tracing::{debug, info};
use uuid::Builder;
use words_common::{
    CreatedGame, Dictionary, DrawRng, GameId, GameRules, GameState, GameStatus, History, Letter,
    Player, PlayerId, PlayerName, Ruleset, TilePlacement, ValidPlay, MAX_PLAYERS,
};

type Result<T> = std::result::Result<T, GameError>;

// Runs every game action against the store, one action per game at a time.
#[derive(Debug)]
pub struct GameLogic<S, D, R> {
    store: S,
    dictionary: D,
    rng: Mutex<R>,
    locks: GameLocks,
}

impl<S: GameStore, D: Dictionary, R: DrawRng> GameLogic<S, D, R> {
    pub fn new(store: S, dictionary: D, rng: R) -> Self {
        GameLogic {
            store,
            dictionary,
            rng: Mutex::new(rng),
            locks: GameLocks::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut R) -> T) -> Result<T> {
        let mut rng = self.rng.lock().map_err(|_| GameError::LockPoisoned)?;
        Ok(f(&mut *rng))
    }

    fn new_player_id(&self) -> Result<PlayerId> {
        let bytes = self.with_rng(|rng| rng.bytes())?;
        Ok(PlayerId::new(Builder::from_random_bytes(bytes).into_uuid().to_string()))
    }

    fn check_exists(&self, game_id: &GameId) -> Result<()> {
        if !self.store.game_exists(game_id)? {
            return Err(GameError::GameDoesNotExist(game_id.clone()));
        }
        Ok(())
    }

    fn check_started(&self, game_id: &GameId) -> Result<()> {
        self.check_exists(game_id)?;
        if !self.store.has_started(game_id)? {
            return Err(GameError::NotStarted(game_id.clone()));
        }
        Ok(())
    }

    fn check_in_game(state: &GameState, player_id: &PlayerId) -> Result<()> {
        if state.player(player_id).is_none() {
            return Err(GameError::PlayerNotInGame(
                state.game_id().clone(),
                player_id.clone(),
            ));
        }
        Ok(())
    }

    // Loads the state for an action that needs it to be this player's turn
    fn load_for_turn(&self, game_id: &GameId, player_id: &PlayerId, task: &'static str) -> Result<GameState> {
        self.check_started(game_id)?;
        let state = self.store.load_state(game_id)?;
        Self::check_in_game(&state, player_id)?;
        if state.status() == GameStatus::Completed {
            return Err(GameError::GameOver(game_id.clone()));
        }
        if !state.turn_order().is_current(player_id) {
            return Err(GameError::UnexpectedPlayer {
                game_id: game_id.clone(),
                player_id: player_id.clone(),
                task,
            });
        }
        Ok(state)
    }

    fn validate(&self, state: &GameState, player_id: &PlayerId, placements: &[TilePlacement]) -> Result<ValidPlay> {
        let player = state
            .player(player_id)
            .ok_or_else(|| GameError::PlayerNotInGame(state.game_id().clone(), player_id.clone()))?;
        let play = ValidPlay::new(
            placements,
            player.rack(),
            state.board(),
            state.rules(),
            &self.dictionary,
        )?;
        Ok(play)
    }

    fn save_after_turn(&self, state: &GameState, player_id: &PlayerId) -> Result<()> {
        if state.status() == GameStatus::Completed {
            info!(game_id = %state.game_id(), "Game completed");
            self.store.save_final_state(state)?;
        } else {
            self.store.save_turn_state(state, player_id)?;
        }
        Ok(())
    }

    // Retries on the rare clash with an existing game id
    #[tracing::instrument(skip(self))]
    pub fn create(&self, name: PlayerName) -> Result<CreatedGame> {
        loop {
            let game_id = self.with_rng(|rng| GameId::generate(rng))?;
            let created = self.locks.with_game(&game_id, || {
                if self.store.game_exists(&game_id)? {
                    return Ok(None);
                }
                let player = Player::new(self.new_player_id()?, name.clone(), true);
                let created = CreatedGame {
                    game_id: game_id.clone(),
                    player,
                };
                self.store.save_created(&created)?;
                Ok(Some(created))
            })?;
            match created {
                Some(created) => {
                    info!(game_id = %created.game_id, player_id = %created.player.id(), "Created game");
                    return Ok(created);
                }
                None => debug!(%game_id, "Game id already taken"),
            }
        }
    }

    #[tracing::instrument(skip(self))]
    pub fn join(&self, game_id: &GameId, name: PlayerName) -> Result<PlayerId> {
        self.locks.with_game(game_id, || {
            self.check_exists(game_id)?;
            if self.store.has_started(game_id)? {
                return Err(GameError::AlreadyInProgress(game_id.clone()));
            }
            if self.store.is_at_capacity(game_id, MAX_PLAYERS)? {
                return Err(GameError::AtCapacity(game_id.clone()));
            }
            let players = self.store.load_players(game_id)?;
            if players.iter().any(|p| p.name() == &name) {
                return Err(GameError::PlayerAlreadyInGame(game_id.clone(), name));
            }

            let player = Player::new(self.new_player_id()?, name, false);
            let player_id = player.id().clone();
            self.store.add_player(game_id, player)?;
            info!(%game_id, %player_id, "Player joined");
            Ok(player_id)
        })
    }

    // Who has joined so far, and whether the game is under way
    #[tracing::instrument(skip(self))]
    pub fn lobby(&self, game_id: &GameId, player_id: &PlayerId) -> Result<(Vec<Player>, bool)> {
        self.locks.with_game(game_id, || {
            self.check_exists(game_id)?;
            let players = self.store.load_players(game_id)?;
            if !players.iter().any(|p| p.id() == player_id) {
                return Err(GameError::PlayerNotInGame(game_id.clone(), player_id.clone()));
            }
            let has_started = self.store.has_started(game_id)?;
            Ok((players, has_started))
        })
    }

    #[tracing::instrument(skip(self))]
    pub fn start(&self, game_id: &GameId, player_id: &PlayerId, ruleset: Ruleset) -> Result<GameState> {
        self.locks.with_game(game_id, || {
            self.check_exists(game_id)?;
            if self.store.has_started(game_id)? {
                return Err(GameError::AlreadyInProgress(game_id.clone()));
            }

            let players = self.store.load_players(game_id)?;
            let player = players
                .iter()
                .find(|p| p.id() == player_id)
                .ok_or_else(|| GameError::PlayerNotInGame(game_id.clone(), player_id.clone()))?;
            if !player.is_creator() {
                return Err(GameError::UnexpectedPlayer {
                    game_id: game_id.clone(),
                    player_id: player_id.clone(),
                    task: "start",
                });
            }
            if players.len() <= 1 {
                return Err(GameError::NotEnoughPlayers(game_id.clone()));
            }

            let rules = GameRules::new(ruleset);
            if players.len() > rules.max_players {
                return Err(GameError::AtCapacity(game_id.clone()));
            }
            let state = self.with_rng(|rng| GameState::start(game_id.clone(), rules, players, rng))??;
            self.store.start_game(&state)?;
            info!(%game_id, %ruleset, players = state.players().len(), "Game started");
            Ok(state)
        })
    }

    #[tracing::instrument(skip(self))]
    pub fn poll(&self, game_id: &GameId, player_id: &PlayerId) -> Result<GameState> {
        self.locks.with_game(game_id, || {
            self.check_started(game_id)?;
            let state = self.store.load_state(game_id)?;
            Self::check_in_game(&state, player_id)?;
            Ok(state)
        })
    }

    #[tracing::instrument(skip(self))]
    pub fn play(&self, game_id: &GameId, player_id: &PlayerId, placements: &[TilePlacement]) -> Result<(GameState, ValidPlay)> {
        self.locks.with_game(game_id, || {
            let mut state = self.load_for_turn(game_id, player_id, "play")?;
            let play = self.validate(&state, player_id, placements)?;
            state.apply_play(player_id, &play)?;
            self.save_after_turn(&state, player_id)?;
            info!(%game_id, %player_id, score = play.score(), words = ?play.words(), "Played");
            Ok((state, play))
        })
    }

    // Scores a play without changing anything
    #[tracing::instrument(skip(self))]
    pub fn try_play(&self, game_id: &GameId, player_id: &PlayerId, placements: &[TilePlacement]) -> Result<ValidPlay> {
        self.locks.with_game(game_id, || {
            let state = self.load_for_turn(game_id, player_id, "play")?;
            self.validate(&state, player_id, placements)
        })
    }

    #[tracing::instrument(skip(self))]
    pub fn pass(&self, game_id: &GameId, player_id: &PlayerId) -> Result<GameState> {
        self.locks.with_game(game_id, || {
            let mut state = self.load_for_turn(game_id, player_id, "pass")?;
            state.pass(player_id)?;
            self.save_after_turn(&state, player_id)?;
            info!(%game_id, %player_id, "Passed");
            Ok(state)
        })
    }

    #[tracing::instrument(skip(self))]
    pub fn swap(&self, game_id: &GameId, player_id: &PlayerId, letter: &Letter) -> Result<GameState> {
        self.locks.with_game(game_id, || {
            let mut state = self.load_for_turn(game_id, player_id, "swap")?;
            state.swap(player_id, letter)?;
            self.store.save_turn_state(&state, player_id)?;
            info!(%game_id, %player_id, "Swapped a tile");
            Ok(state)
        })
    }

    #[tracing::instrument(skip(self))]
    pub fn history(&self, game_id: &GameId) -> Result<(History, Vec<Player>)> {
        self.locks.with_game(game_id, || {
            self.check_exists(game_id)?;
            let history = self.store.load_history(game_id)?;
            let players = self.store.load_players(game_id)?;
            Ok((history, players))
        })
    }
}
