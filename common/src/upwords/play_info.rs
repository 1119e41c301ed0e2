use crate::upwords::board::{Board, BoardPosition, Square, COLUMNS, ROWS};
use crate::upwords::letter::Letter;
use crate::upwords::ruleset::SquareType;

const FULL_RACK_BONUS: i32 = 20;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

// A tile whose position has already been checked against the board.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedTile {
    pub position: BoardPosition,
    pub letter: Letter,
}

impl Orientation {
    // None when the tiles span more than one row and more than one column
    pub fn of(tiles: &[PlacedTile], board: &Board) -> Option<Orientation> {
        let first = tiles.first()?;
        let same_row = tiles.iter().all(|t| t.position.row() == first.position.row());
        let same_column = tiles
            .iter()
            .all(|t| t.position.column() == first.position.column());

        if same_row && same_column {
            // A lone tile extends a horizontal word if it has a letter beside it,
            // otherwise it has to hang off something vertically
            let row = first.position.row() as i32;
            let column = first.position.column() as i32;
            let beside = [column - 1, column + 1]
                .into_iter()
                .any(|c| board.try_get(row, c).map_or(false, Square::has_letter));
            return Some(if beside {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            });
        }

        if same_row {
            Some(Orientation::Horizontal)
        } else if same_column {
            Some(Orientation::Vertical)
        } else {
            None
        }
    }
}

// What a set of placements does to the line it was played along, and the
// words it forms across the board.
#[derive(Clone, Debug)]
pub struct PlayInfo {
    orientation: Orientation,
    original_line: Vec<Square>,
    placed_line: Vec<Option<Letter>>,
    words: Vec<Vec<Square>>,
}

impl PlayInfo {
    pub fn new(board: &Board, tiles: &[PlacedTile]) -> Option<Self> {
        let orientation = Orientation::of(tiles, board)?;
        let first = &tiles[0].position;

        let (original_line, placed_line, cross_lines) = match orientation {
            Orientation::Horizontal => (
                board.row(first.row()),
                placed_line(tiles, COLUMNS, |p| p.column()),
                (1..=COLUMNS)
                    .filter_map(|column| {
                        let in_column: Vec<PlacedTile> = tiles
                            .iter()
                            .filter(|t| t.position.column() == column)
                            .cloned()
                            .collect();
                        if in_column.is_empty() {
                            return None;
                        }
                        Some((board.column(column), placed_line(&in_column, ROWS, |p| p.row())))
                    })
                    .collect::<Vec<_>>(),
            ),
            Orientation::Vertical => (
                board.column(first.column()),
                placed_line(tiles, ROWS, |p| p.row()),
                (1..=ROWS)
                    .filter_map(|row| {
                        let in_row: Vec<PlacedTile> = tiles
                            .iter()
                            .filter(|t| t.position.row() == row)
                            .cloned()
                            .collect();
                        if in_row.is_empty() {
                            return None;
                        }
                        Some((board.row(row), placed_line(&in_row, COLUMNS, |p| p.column())))
                    })
                    .collect::<Vec<_>>(),
            ),
        };

        let mut words = vec![updated_word(&original_line, &placed_line)];
        for (original, placed) in cross_lines.iter() {
            let word = updated_word(original, placed);
            if word.len() > 1 {
                words.push(word);
            }
        }

        Some(PlayInfo {
            orientation,
            original_line,
            placed_line,
            words,
        })
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn words(&self) -> Vec<String> {
        self.words
            .iter()
            .map(|word| {
                word.iter()
                    .filter_map(|square| square.letter.as_ref())
                    .map(|letter| letter.as_str().to_uppercase())
                    .collect()
            })
            .collect()
    }

    pub fn score(&self, tiles_played: usize, rack_size: usize) -> i32 {
        let mut score: i32 = self.words.iter().map(|word| word_score(word)).sum();
        if tiles_played == rack_size {
            score += FULL_RACK_BONUS;
        }
        score
    }

    // True if some word of two or more letters on the played line has every
    // one of its letters covered
    pub fn covers_whole_word(&self) -> bool {
        let mut in_word = false;
        let mut covered = false;
        let mut covered_len = 0;

        for (original, placed) in self.original_line.iter().zip(self.placed_line.iter()) {
            if !original.has_letter() {
                in_word = false;
                if covered && covered_len > 1 {
                    return true;
                }
                continue;
            }
            if !in_word {
                in_word = true;
                covered = true;
                covered_len = 0;
            }
            if placed.is_none() {
                covered = false;
            } else {
                covered_len += 1;
            }
        }

        covered && covered_len > 1
    }

    // Once the word holding the first placed tile ends, no further tile may be
    // placed on the line
    pub fn changes_one_word(&self) -> bool {
        let mut started = false;
        let mut ended = false;

        for (original, placed) in self.original_line.iter().zip(self.placed_line.iter()) {
            if ended && placed.is_some() {
                return false;
            }
            if started && placed.is_none() && !original.has_letter() {
                ended = true;
            }
            if placed.is_some() {
                started = true;
            }
        }

        true
    }
}

fn placed_line(
    tiles: &[PlacedTile],
    len: usize,
    index: impl Fn(&BoardPosition) -> usize,
) -> Vec<Option<Letter>> {
    let mut line = vec![None; len];
    for tile in tiles {
        line[index(&tile.position) - 1] = Some(tile.letter.clone());
    }
    line
}

// The word through the first placed tile, with placed tiles stacked on the
// original squares
fn updated_word(original: &[Square], placed: &[Option<Letter>]) -> Vec<Square> {
    let first_changed = match placed.iter().position(Option::is_some) {
        Some(index) => index,
        None => return Vec::new(),
    };

    let start = (0..first_changed)
        .rev()
        .find(|&i| !original[i].has_letter())
        .map_or(0, |i| i + 1);

    let mut word = Vec::new();
    for (square, letter) in original.iter().zip(placed.iter()).skip(start) {
        match letter {
            Some(letter) => word.push(Square {
                letter: Some(letter.clone()),
                height: square.height + 1,
                square_type: SquareType::Standard,
            }),
            None if square.has_letter() => word.push(square.clone()),
            None => break,
        }
    }
    word
}

fn word_score(word: &[Square]) -> i32 {
    if word.iter().all(|square| square.height == 1) {
        let mut score = word.len() as i32 * 2;
        if word
            .iter()
            .any(|square| square.letter.as_ref().map_or(false, Letter::is_qu))
        {
            score += 2;
        }
        score
    } else {
        word.iter().map(|square| square.height as i32).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upwords::ruleset::{GameRules, Ruleset};

    fn tile(letter: &str, row: i32, column: i32) -> PlacedTile {
        PlacedTile {
            position: BoardPosition::new(row, column).unwrap(),
            letter: Letter::from(letter),
        }
    }

    fn board_with(tiles: &[PlacedTile]) -> Board {
        let mut board = Board::new(&GameRules::new(Ruleset::StandardUpwords));
        for t in tiles {
            board.add_tile(t.position, t.letter.clone());
        }
        board
    }

    #[test]
    fn test_orientation() {
        let board = board_with(&[tile("A", 5, 5)]);
        assert_eq!(
            Orientation::of(&[tile("B", 5, 6), tile("C", 5, 7)], &board),
            Some(Orientation::Horizontal)
        );
        assert_eq!(
            Orientation::of(&[tile("B", 6, 5), tile("C", 7, 5)], &board),
            Some(Orientation::Vertical)
        );
        assert_eq!(
            Orientation::of(&[tile("B", 6, 5), tile("C", 7, 6)], &board),
            None
        );
        // lone tiles look sideways for a neighbour
        assert_eq!(
            Orientation::of(&[tile("T", 5, 4)], &board),
            Some(Orientation::Horizontal)
        );
        assert_eq!(
            Orientation::of(&[tile("T", 6, 5)], &board),
            Some(Orientation::Vertical)
        );
    }

    #[test]
    fn test_first_word() {
        let board = board_with(&[]);
        let tiles = [tile("C", 5, 4), tile("A", 5, 5), tile("T", 5, 6)];
        let info = PlayInfo::new(&board, &tiles).unwrap();
        assert_eq!(info.words(), vec!["CAT"]);
        assert_eq!(info.score(3, 7), 6);
    }

    #[test]
    fn test_qu_bonus() {
        let board = board_with(&[]);
        let tiles = [tile("Qu", 5, 5), tile("I", 5, 6), tile("T", 5, 7)];
        let info = PlayInfo::new(&board, &tiles).unwrap();
        assert_eq!(info.words(), vec!["QUIT"]);
        assert_eq!(info.score(3, 7), 8);
    }

    #[test]
    fn test_cross_word() {
        let board = board_with(&[tile("C", 5, 5), tile("A", 6, 5), tile("T", 7, 5)]);
        let tiles = [tile("D", 8, 5), tile("O", 8, 6), tile("G", 8, 7)];
        let info = PlayInfo::new(&board, &tiles).unwrap();
        assert_eq!(info.orientation(), Orientation::Horizontal);
        assert_eq!(info.words(), vec!["DOG", "CATD"]);
    }

    #[test]
    fn test_cross_word_over_existing_tile() {
        let board = board_with(&[tile("C", 5, 5), tile("A", 6, 5), tile("T", 7, 5)]);
        let tiles = [tile("D", 7, 5), tile("O", 7, 6), tile("G", 7, 7)];
        let info = PlayInfo::new(&board, &tiles).unwrap();
        assert_eq!(info.words(), vec!["DOG", "CAD"]);
        // DOG has a stacked D so scores by height, CAD likewise
        assert_eq!(info.score(3, 7), 4 + 4);
    }

    #[test]
    fn test_stacked_word_scores_heights() {
        let board = board_with(&[tile("H", 5, 4), tile("A", 5, 5), tile("T", 5, 6)]);
        let info = PlayInfo::new(&board, &[tile("I", 5, 5)]).unwrap();
        assert_eq!(info.words(), vec!["HIT"]);
        assert_eq!(info.score(1, 7), 4);
    }

    #[test]
    fn test_word_extends_backwards_to_start() {
        let board = board_with(&[tile("C", 5, 4), tile("A", 5, 5), tile("T", 5, 6)]);
        let info = PlayInfo::new(&board, &[tile("S", 5, 7)]).unwrap();
        assert_eq!(info.words(), vec!["CATS"]);
        assert_eq!(info.score(1, 7), 8);
    }

    #[test]
    fn test_full_rack_bonus() {
        let board = board_with(&[]);
        let tiles: Vec<PlacedTile> = "PLAYERS"
            .chars()
            .enumerate()
            .map(|(i, c)| tile(&c.to_string(), 5, i as i32 + 2))
            .collect();
        let info = PlayInfo::new(&board, &tiles).unwrap();
        assert_eq!(info.score(7, 7), 14 + 20);
        assert_eq!(info.score(7, 5), 14);
    }

    #[test]
    fn test_covers_whole_word() {
        let board = board_with(&[tile("A", 5, 5), tile("T", 5, 6)]);
        let covered = PlayInfo::new(&board, &[tile("I", 5, 5), tile("N", 5, 6)]).unwrap();
        assert!(covered.covers_whole_word());

        let partly = PlayInfo::new(&board, &[tile("I", 5, 5), tile("N", 5, 7)]).unwrap();
        assert!(!partly.covers_whole_word());
    }

    #[test]
    fn test_single_letter_word_can_be_covered() {
        let board = board_with(&[tile("A", 5, 5)]);
        let info = PlayInfo::new(&board, &[tile("I", 5, 5), tile("T", 5, 6)]).unwrap();
        assert!(!info.covers_whole_word());
    }

    #[test]
    fn test_changes_one_word() {
        let board = board_with(&[tile("C", 5, 4), tile("A", 5, 5), tile("T", 5, 6)]);
        let one = PlayInfo::new(&board, &[tile("S", 5, 7), tile("O", 5, 5)]).unwrap();
        assert!(one.changes_one_word());

        let two = PlayInfo::new(&board, &[tile("S", 5, 7), tile("A", 5, 9)]).unwrap();
        assert!(!two.changes_one_word());
    }
}
