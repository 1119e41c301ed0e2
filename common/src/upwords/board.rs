use crate::upwords::letter::Letter;
use crate::upwords::ruleset::{GameRules, SquareType};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const ROWS: usize = 10;
pub const COLUMNS: usize = 10;

#[derive(Debug, PartialEq)]
pub enum Coordinate {
    Row,
    Column,
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coordinate::Row => write!(f, "row"),
            Coordinate::Column => write!(f, "column"),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum BoardPositionError {
    #[error("{0} {1} is outside the board, which runs from 1 to {2}")]
    OutOfBounds(Coordinate, i32, usize),
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Square {
    pub letter: Option<Letter>,
    pub height: u32,
    pub square_type: SquareType,
}

impl Square {
    fn blank(square_type: SquareType) -> Self {
        Square {
            letter: None,
            height: 0,
            square_type,
        }
    }

    pub fn has_letter(&self) -> bool {
        self.letter.is_some()
    }

    pub fn is_occupied(&self) -> bool {
        self.height > 0
    }

    // Stacking only ever raises a square
    pub fn add_tile(&mut self, letter: Letter) {
        self.height += 1;
        self.letter = Some(letter);
    }
}

// A 1-based position known to lie on the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BoardPosition {
    row: usize,
    column: usize,
}

impl BoardPosition {
    pub fn new(row: i32, column: i32) -> Result<Self, BoardPositionError> {
        let row = to_index(Coordinate::Row, row, ROWS)?;
        let column = to_index(Coordinate::Column, column, COLUMNS)?;
        Ok(BoardPosition { row, column })
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn column(&self) -> usize {
        self.column
    }
}

fn to_index(coordinate: Coordinate, value: i32, max: usize) -> Result<usize, BoardPositionError> {
    match usize::try_from(value) {
        Ok(index) if (1..=max).contains(&index) => Ok(index),
        _ => Err(BoardPositionError::OutOfBounds(coordinate, value, max)),
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Board {
    squares: Vec<Vec<Square>>,
}

impl Board {
    pub fn new(rules: &GameRules) -> Self {
        let squares = (1..=ROWS)
            .map(|row| {
                (1..=COLUMNS)
                    .map(|column| Square::blank(rules.square_type(row, column)))
                    .collect()
            })
            .collect();
        Board { squares }
    }

    pub fn is_empty(&self) -> bool {
        self.squares.iter().flatten().all(|square| !square.has_letter())
    }

    pub fn get(&self, pos: BoardPosition) -> &Square {
        &self.squares[pos.row - 1][pos.column - 1]
    }

    // Off-board coordinates give None, which is how edge neighbours are probed
    pub fn try_get(&self, row: i32, column: i32) -> Option<&Square> {
        BoardPosition::new(row, column).ok().map(|pos| self.get(pos))
    }

    pub fn add_tile(&mut self, pos: BoardPosition, letter: Letter) {
        self.squares[pos.row - 1][pos.column - 1].add_tile(letter);
    }

    pub fn row(&self, row: usize) -> Vec<Square> {
        self.squares[row - 1].clone()
    }

    pub fn column(&self, column: usize) -> Vec<Square> {
        self.squares.iter().map(|row| row[column - 1].clone()).collect()
    }

    pub fn squares(&self) -> &[Vec<Square>] {
        &self.squares
    }

    pub fn tile_count(&self) -> usize {
        self.squares
            .iter()
            .flatten()
            .map(|square| square.height as usize)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upwords::ruleset::Ruleset;

    fn pos(row: i32, column: i32) -> BoardPosition {
        BoardPosition::new(row, column).unwrap()
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(&GameRules::new(Ruleset::SmallUpwords));
        assert!(board.is_empty());
        assert_eq!(board.tile_count(), 0);
        assert_eq!(board.get(pos(1, 1)).square_type, SquareType::Unplayable);
        assert_eq!(board.get(pos(5, 6)).square_type, SquareType::Starting);
        assert_eq!(board.get(pos(2, 2)).square_type, SquareType::Standard);
    }

    #[test]
    fn test_position_bounds() {
        assert!(BoardPosition::new(1, 10).is_ok());
        assert_eq!(
            BoardPosition::new(0, 5),
            Err(BoardPositionError::OutOfBounds(Coordinate::Row, 0, ROWS))
        );
        assert_eq!(
            BoardPosition::new(5, 11),
            Err(BoardPositionError::OutOfBounds(Coordinate::Column, 11, COLUMNS))
        );
        assert!(BoardPosition::new(-1, 3).is_err());
    }

    #[test]
    fn test_try_get_at_edges() {
        let board = Board::new(&GameRules::new(Ruleset::StandardUpwords));
        assert!(board.try_get(1, 1).is_some());
        assert!(board.try_get(0, 1).is_none());
        assert!(board.try_get(10, 11).is_none());
    }

    #[test]
    fn test_add_tile_stacks() {
        let mut board = Board::new(&GameRules::new(Ruleset::StandardUpwords));
        board.add_tile(pos(3, 4), Letter::from("A"));
        board.add_tile(pos(3, 4), Letter::from("E"));
        let square = board.get(pos(3, 4));
        assert_eq!(square.height, 2);
        assert_eq!(square.letter, Some(Letter::from("E")));
        assert!(!board.is_empty());
        assert_eq!(board.tile_count(), 2);
    }

    #[test]
    fn test_row_and_column() {
        let mut board = Board::new(&GameRules::new(Ruleset::StandardUpwords));
        board.add_tile(pos(2, 7), Letter::from("X"));
        let row = board.row(2);
        let column = board.column(7);
        assert_eq!(row.len(), COLUMNS);
        assert_eq!(column.len(), ROWS);
        assert_eq!(row[6].letter, Some(Letter::from("X")));
        assert_eq!(column[1].letter, Some(Letter::from("X")));
        assert!(row[5].letter.is_none());
    }
}
