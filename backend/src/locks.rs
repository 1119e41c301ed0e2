use crate::error::GameError;
use hashbrown::HashMap;
use std::sync::{Arc, Mutex};
use words_common::GameId;

// One mutex per game so that actions on a game never interleave, while
// different games run side by side.
#[derive(Debug, Default)]
pub struct GameLocks {
    locks: Mutex<HashMap<GameId, Arc<Mutex<()>>>>,
}

impl GameLocks {
    pub fn new() -> Self {
        GameLocks::default()
    }

    fn lock_for(&self, game_id: &GameId) -> Result<Arc<Mutex<()>>, GameError> {
        let mut locks = self.locks.lock().map_err(|_| GameError::LockPoisoned)?;
        Ok(locks
            .entry(game_id.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone())
    }

    pub fn with_game<T>(
        &self,
        game_id: &GameId,
        f: impl FnOnce() -> Result<T, GameError>,
    ) -> Result<T, GameError> {
        let lock = self.lock_for(game_id)?;
        let result = {
            let _guard = lock.lock().map_err(|_| GameError::LockPoisoned)?;
            f()
        };
        self.release(game_id, lock)?;
        result
    }

    // Forgets the game's mutex once no other caller holds or waits on it
    fn release(&self, game_id: &GameId, lock: Arc<Mutex<()>>) -> Result<(), GameError> {
        let mut locks = self.locks.lock().map_err(|_| GameError::LockPoisoned)?;
        if Arc::strong_count(&lock) == 2 {
            locks.remove(game_id);
        }
        Ok(())
    }
}
