use crate::upwords::board::{Board, BoardPosition, Square};
use crate::upwords::dictionary::Dictionary;
use crate::upwords::letter::Letter;
use crate::upwords::play_info::{PlacedTile, PlayInfo};
use crate::upwords::rack::Rack;
use crate::upwords::ruleset::{GameRules, SquareType};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TilePlacement {
    pub letter: Letter,
    pub row: i32,
    pub column: i32,
}

impl TilePlacement {
    pub fn new(letter: impl Into<String>, row: i32, column: i32) -> Self {
        TilePlacement {
            letter: Letter::new(letter),
            row,
            column,
        }
    }
}

#[derive(Error, Clone, Debug, PartialEq)]
pub enum PlayError {
    #[error("You must place at least one letter.")]
    NoTiles,
    #[error("You cannot play letters not on your rack.")]
    NotOnRack { letter: Letter },
    #[error("You must play letters on valid squares.")]
    InvalidSquare { row: i32, column: i32 },
    #[error("You must not place 2 letters on the same square.")]
    SameSquare { row: i32, column: i32 },
    #[error("You must not place a letter on top of the same letter.")]
    SameLetter { letter: Letter, row: i32, column: i32 },
    #[error("You must not place a letter on a square that is already at maximum height.")]
    MaxHeight { row: i32, column: i32, height: u32 },
    #[error("You must place all letters on the same row or column.")]
    NotInLine,
    #[error("You must place at least two letters on the first turn.")]
    FirstWordTooShort,
    #[error("You must play the first word through one of the starting squares.")]
    FirstWordOffStart,
    #[error("You must not just place an S on the end of a word.")]
    Pluralisation,
    #[error("You must not entirely cover a word.")]
    WordCovered,
    #[error("You must only change one word in each row or column.")]
    MultipleWordsChanged,
    #[error("You must play letters that connect to a word already on the board.")]
    NotConnected,
    #[error("Word(s) not in dictionary: {}", .0.join(", "))]
    NotInDictionary(Vec<String>),
}

// A play that has passed every rule, with the words it forms and its score.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidPlay {
    tiles: Vec<PlacedTile>,
    words: Vec<String>,
    score: i32,
}

impl ValidPlay {
    // Rules are checked in a fixed order and the first one broken is reported
    pub fn new<D: Dictionary + ?Sized>(
        placements: &[TilePlacement],
        rack: &Rack,
        board: &Board,
        rules: &GameRules,
        dictionary: &D,
    ) -> Result<Self, PlayError> {
        if placements.is_empty() {
            return Err(PlayError::NoTiles);
        }
        check_letters_on_rack(placements, rack)?;
        let tiles = check_positions(placements, board)?;
        check_unique_positions(placements)?;
        check_different_letters(placements, &tiles, board)?;
        check_heights(placements, &tiles, board, rules)?;

        let info = PlayInfo::new(board, &tiles).ok_or(PlayError::NotInLine)?;

        let first_turn = board.is_empty();
        if first_turn && placements.len() < 2 {
            return Err(PlayError::FirstWordTooShort);
        }
        if first_turn
            && !tiles
                .iter()
                .any(|t| board.get(t.position).square_type == SquareType::Starting)
        {
            return Err(PlayError::FirstWordOffStart);
        }
        if !acceptable_pluralisation(placements, board) {
            return Err(PlayError::Pluralisation);
        }
        if info.covers_whole_word() {
            return Err(PlayError::WordCovered);
        }
        if !info.changes_one_word() {
            return Err(PlayError::MultipleWordsChanged);
        }
        if !first_turn && !is_connected(placements, board) {
            return Err(PlayError::NotConnected);
        }

        let words = info.words();
        let unknown = dictionary.words_not_recognized(&words);
        if !unknown.is_empty() {
            return Err(PlayError::NotInDictionary(unknown));
        }

        let score = info.score(placements.len(), rules.rack_size);
        Ok(ValidPlay {
            tiles,
            words,
            score,
        })
    }

    pub fn tiles(&self) -> &[PlacedTile] {
        &self.tiles
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn score(&self) -> i32 {
        self.score
    }
}

fn check_letters_on_rack(placements: &[TilePlacement], rack: &Rack) -> Result<(), PlayError> {
    let mut letters = rack.letters().to_vec();
    for placement in placements {
        match letters.iter().position(|l| *l == placement.letter) {
            Some(index) => {
                letters.remove(index);
            }
            None => {
                return Err(PlayError::NotOnRack {
                    letter: placement.letter.clone(),
                })
            }
        }
    }
    Ok(())
}

fn check_positions(placements: &[TilePlacement], board: &Board) -> Result<Vec<PlacedTile>, PlayError> {
    placements
        .iter()
        .map(|p| {
            let invalid = PlayError::InvalidSquare {
                row: p.row,
                column: p.column,
            };
            let position = BoardPosition::new(p.row, p.column).map_err(|_| invalid.clone())?;
            if board.get(position).square_type == SquareType::Unplayable {
                return Err(invalid);
            }
            Ok(PlacedTile {
                position,
                letter: p.letter.clone(),
            })
        })
        .collect()
}

fn check_unique_positions(placements: &[TilePlacement]) -> Result<(), PlayError> {
    for (i, placement) in placements.iter().enumerate() {
        if placements[..i]
            .iter()
            .any(|p| p.row == placement.row && p.column == placement.column)
        {
            return Err(PlayError::SameSquare {
                row: placement.row,
                column: placement.column,
            });
        }
    }
    Ok(())
}

fn check_different_letters(
    placements: &[TilePlacement],
    tiles: &[PlacedTile],
    board: &Board,
) -> Result<(), PlayError> {
    for (placement, tile) in placements.iter().zip(tiles) {
        if board.get(tile.position).letter.as_ref() == Some(&tile.letter) {
            return Err(PlayError::SameLetter {
                letter: tile.letter.clone(),
                row: placement.row,
                column: placement.column,
            });
        }
    }
    Ok(())
}

fn check_heights(
    placements: &[TilePlacement],
    tiles: &[PlacedTile],
    board: &Board,
    rules: &GameRules,
) -> Result<(), PlayError> {
    for (placement, tile) in placements.iter().zip(tiles) {
        let height = board.get(tile.position).height;
        if height >= rules.stack_height {
            return Err(PlayError::MaxHeight {
                row: placement.row,
                column: placement.column,
                height,
            });
        }
    }
    Ok(())
}

fn occupied(board: &Board, row: i32, column: i32) -> bool {
    board.try_get(row, column).map_or(false, Square::is_occupied)
}

// A lone S dropped on an empty square must do more than pluralise the word
// it touches. The neighbour naming follows (row, column) offsets: "right" is
// the next row and "below" the next column.
fn acceptable_pluralisation(placements: &[TilePlacement], board: &Board) -> bool {
    let placement = match placements {
        [placement] => placement,
        _ => return true,
    };
    if !placement.letter.is_s() {
        return true;
    }
    let (row, column) = (placement.row, placement.column);
    if occupied(board, row, column) {
        return true;
    }

    let right = occupied(board, row + 1, column);
    let below = occupied(board, row, column + 1);
    if right || below {
        return true;
    }

    let left = occupied(board, row - 1, column);
    let above = occupied(board, row, column - 1);
    if left && above {
        return true;
    }

    // Two letter words such as IS
    if left && !occupied(board, row - 2, column) {
        return true;
    }
    if above && !occupied(board, row, column - 2) {
        return true;
    }

    false
}

fn is_connected(placements: &[TilePlacement], board: &Board) -> bool {
    placements.iter().any(|p| {
        let (row, column) = (p.row, p.column);
        occupied(board, row, column)
            || occupied(board, row + 1, column)
            || occupied(board, row, column + 1)
            || occupied(board, row - 1, column)
            || occupied(board, row, column - 1)
    })
}
