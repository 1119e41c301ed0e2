mod bag;
mod board;
mod dictionary;
mod game_state;
mod letter;
mod play;
mod play_info;
mod player;
mod rack;
mod rng;
mod ruleset;
mod turn;

pub use bag::{BagError, TileBag};
pub use board::{Board, BoardPosition, BoardPositionError, Coordinate, Square, COLUMNS, ROWS};
pub use dictionary::Dictionary;
pub use game_state::{CreatedGame, GameId, GameState, GameStatus, StateError};
pub use letter::Letter;
pub use play::{PlayError, TilePlacement, ValidPlay};
pub use play_info::{Orientation, PlacedTile, PlayInfo};
pub use player::{IdError, Player, PlayerId, PlayerName};
pub use rack::{Rack, RackError};
pub use rng::{shuffle, DrawRng, GameRng};
pub use ruleset::{GameRules, Ruleset, SquareType, MAX_PLAYERS};
pub use turn::{History, Turn, TurnAction, TurnOrder};
