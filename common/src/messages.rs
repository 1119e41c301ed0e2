use crate::upwords::{
    GameId, GameState, GameStatus, History, Letter, Player, PlayerId, Ruleset, Square,
    TilePlacement, TurnAction, ValidPlay,
};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateResponse {
    pub game_id: GameId,
    pub player_id: PlayerId,
    pub rulesets: Vec<String>,
}

impl CreateResponse {
    pub fn new(game_id: GameId, player_id: PlayerId) -> Self {
        CreateResponse {
            game_id,
            player_id,
            rulesets: Ruleset::names().into_iter().map(String::from).collect(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JoinResponse {
    pub player_id: PlayerId,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LobbyPlayer {
    pub name: String,
    pub is_creator: bool,
}

// What a player waiting for the game to start gets to see.
#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LobbyResponse {
    pub players: Vec<LobbyPlayer>,
    pub can_start: bool,
    pub has_started: bool,
}

impl LobbyResponse {
    pub fn new(players: &[Player], player_id: &PlayerId, has_started: bool) -> Self {
        let is_creator = players
            .iter()
            .any(|p| p.id() == player_id && p.is_creator());
        LobbyResponse {
            players: players
                .iter()
                .map(|p| LobbyPlayer {
                    name: p.name().to_string(),
                    is_creator: p.is_creator(),
                })
                .collect(),
            can_start: !has_started && is_creator && players.len() > 1,
            has_started,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub name: String,
    pub is_current_player: bool,
    pub score: i32,
    pub turns_to_wait: usize,
    pub last_action: Option<TurnAction>,
    pub last_score: i32,
    pub last_words: Vec<String>,
}

// The game as seen by one player: everyone's scores but only their own rack.
#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StateResponse {
    pub board: Vec<Vec<Square>>,
    pub rack: Vec<Letter>,
    pub players: Vec<PlayerView>,
    pub tiles_left: usize,
    pub is_my_turn: bool,
    pub turn_number: u32,
    pub game_over: bool,
}

impl StateResponse {
    pub fn new(state: &GameState, player_id: &PlayerId) -> Self {
        let turn_order = state.turn_order();
        let players = state
            .players()
            .iter()
            .map(|p| {
                let last_turn = p.last_turn();
                PlayerView {
                    name: p.name().to_string(),
                    is_current_player: p.id() == player_id,
                    score: p.score(),
                    turns_to_wait: turn_order.turns_to_wait(p.id()).unwrap_or_default(),
                    last_action: last_turn.map(|t| t.action),
                    last_score: last_turn.map_or(0, |t| t.score),
                    last_words: last_turn
                        .and_then(|t| t.words.clone())
                        .unwrap_or_default(),
                }
            })
            .collect();
        StateResponse {
            board: state.board().squares().to_vec(),
            rack: state
                .player(player_id)
                .map(|p| p.rack().letters().to_vec())
                .unwrap_or_default(),
            players,
            tiles_left: state.bag().len(),
            is_my_turn: turn_order.is_current(player_id),
            turn_number: turn_order.turn_number(),
            game_over: state.status() == GameStatus::Completed,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TryPlayResponse {
    pub words: Vec<String>,
    pub score: i32,
}

impl From<&ValidPlay> for TryPlayResponse {
    fn from(play: &ValidPlay) -> Self {
        TryPlayResponse {
            words: play.words().to_vec(),
            score: play.score(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TurnView {
    pub player: String,
    pub action: TurnAction,
    pub score: i32,
    pub words: Option<Vec<String>>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub status: GameStatus,
    pub turns: Vec<TurnView>,
    pub tiles_left: usize,
}

impl HistoryResponse {
    // Turns are shown with player names; a turn by an unknown id keeps the id
    pub fn new(history: History, players: &[Player]) -> Self {
        let turns = history
            .turns
            .into_iter()
            .map(|turn| TurnView {
                player: players
                    .iter()
                    .find(|p| p.id() == &turn.player_id)
                    .map_or_else(|| turn.player_id.to_string(), |p| p.name().to_string()),
                action: turn.action,
                score: turn.score,
                words: turn.words,
            })
            .collect();
        HistoryResponse {
            status: history.status,
            turns,
            tiles_left: history.tiles_left,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlayRequest {
    pub game_id: String,
    pub player_id: String,
    pub tile_placements: Vec<TilePlacement>,
}

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    System,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub kind: ErrorKind,
    pub message: String,
}
