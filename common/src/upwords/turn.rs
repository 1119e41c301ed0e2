use crate::upwords::game_state::GameStatus;
use crate::upwords::player::PlayerId;
use crate::upwords::rng::{shuffle, DrawRng};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
pub enum TurnAction {
    Play,
    Pass,
    Swap,
    EndGame,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Turn {
    pub player_id: PlayerId,
    pub action: TurnAction,
    pub score: i32,
    pub words: Option<Vec<String>>,
}

impl Turn {
    pub fn new(player_id: PlayerId, action: TurnAction, score: i32, words: Option<Vec<String>>) -> Self {
        Turn {
            player_id,
            action,
            score,
            words,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct History {
    pub status: GameStatus,
    pub turns: Vec<Turn>,
    pub tiles_left: usize,
}

// A circular order of players, fixed when the game starts.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TurnOrder {
    players: Vec<PlayerId>,
    index: usize,
    turn_number: u32,
}

impl TurnOrder {
    pub fn new<R: DrawRng + ?Sized>(mut players: Vec<PlayerId>, rng: &mut R) -> Self {
        shuffle(&mut players, rng);
        TurnOrder {
            players,
            index: 0,
            turn_number: 1,
        }
    }

    pub fn current_player(&self) -> &PlayerId {
        &self.players[self.index]
    }

    pub fn is_current(&self, player_id: &PlayerId) -> bool {
        self.current_player() == player_id
    }

    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    pub fn players(&self) -> &[PlayerId] {
        &self.players
    }

    // How many turns pass before this player is up. None if they are not playing.
    pub fn turns_to_wait(&self, player_id: &PlayerId) -> Option<usize> {
        let position = self.players.iter().position(|p| p == player_id)?;
        Some((position + self.players.len() - self.index) % self.players.len())
    }

    pub fn next_turn(&mut self) {
        self.turn_number += 1;
        self.index = (self.index + 1) % self.players.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockRng;

    impl DrawRng for MockRng {
        fn index(&mut self, upper: usize) -> usize {
            upper - 1
        }

        fn bytes(&mut self) -> [u8; 16] {
            [0; 16]
        }
    }

    fn ids(names: &[&str]) -> Vec<PlayerId> {
        names.iter().map(|n| PlayerId::new(*n)).collect()
    }

    #[test]
    fn test_next_turn_wraps() {
        let mut order = TurnOrder::new(ids(&["a", "b", "c"]), &mut MockRng);
        assert_eq!(order.current_player(), &PlayerId::new("a"));
        assert_eq!(order.turn_number(), 1);
        order.next_turn();
        order.next_turn();
        assert_eq!(order.current_player(), &PlayerId::new("c"));
        order.next_turn();
        assert_eq!(order.current_player(), &PlayerId::new("a"));
        assert_eq!(order.turn_number(), 4);
    }

    #[test]
    fn test_turns_to_wait() {
        let mut order = TurnOrder::new(ids(&["a", "b", "c", "d"]), &mut MockRng);
        order.next_turn();
        assert_eq!(order.turns_to_wait(&PlayerId::new("b")), Some(0));
        assert_eq!(order.turns_to_wait(&PlayerId::new("c")), Some(1));
        assert_eq!(order.turns_to_wait(&PlayerId::new("a")), Some(3));
        assert_eq!(order.turns_to_wait(&PlayerId::new("z")), None);

        for _ in 0..5 {
            let total: usize = order
                .players()
                .iter()
                .filter_map(|p| order.turns_to_wait(p))
                .sum();
            assert_eq!(total, (0..4).sum::<usize>());
            assert_eq!(order.turns_to_wait(order.current_player()), Some(0));
            order.next_turn();
        }
    }

    #[test]
    fn test_order_is_shuffled_with_rng() {
        let players = ids(&["a", "b", "c", "d", "e", "f"]);
        let order1 = TurnOrder::new(players.clone(), &mut crate::upwords::rng::GameRng::seeded(3));
        let order2 = TurnOrder::new(players.clone(), &mut crate::upwords::rng::GameRng::seeded(3));
        assert_eq!(order1, order2);
        let mut sorted = order1.players().to_vec();
        sorted.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        assert_eq!(sorted, players);
    }
}
