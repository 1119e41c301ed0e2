use crate::upwords::board::{COLUMNS, ROWS};
use crate::upwords::letter::Letter;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Ruleset {
    MiniUpwords,
    SmallUpwords,
    StandardUpwords,
}

impl Default for Ruleset {
    fn default() -> Self {
        Ruleset::MiniUpwords
    }
}

impl Ruleset {
    const ALL: [Ruleset; 3] = [
        Ruleset::MiniUpwords,
        Ruleset::SmallUpwords,
        Ruleset::StandardUpwords,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Ruleset::MiniUpwords => "Mini Upwords",
            Ruleset::SmallUpwords => "Small Upwords",
            Ruleset::StandardUpwords => "Standard Upwords",
        }
    }

    fn variant_name(&self) -> &'static str {
        match self {
            Ruleset::MiniUpwords => "MiniUpwords",
            Ruleset::SmallUpwords => "SmallUpwords",
            Ruleset::StandardUpwords => "StandardUpwords",
        }
    }

    // Matches either the variant name or the display name, case-sensitively
    pub fn from_name_or_default(name: &str) -> Self {
        Ruleset::ALL
            .into_iter()
            .find(|set| set.variant_name() == name || set.display_name() == name)
            .unwrap_or_default()
    }

    pub fn names() -> Vec<&'static str> {
        Ruleset::ALL.iter().map(Ruleset::display_name).collect()
    }
}

impl fmt::Display for Ruleset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.variant_name())
    }
}

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
pub enum SquareType {
    Standard,
    Starting,
    Unplayable,
}

type Layout = [[SquareType; COLUMNS]; ROWS];

// Builds a board layout from 1-based row and column numbers
struct LayoutBuilder {
    layout: Layout,
}

impl LayoutBuilder {
    fn new() -> Self {
        LayoutBuilder {
            layout: [[SquareType::Standard; COLUMNS]; ROWS],
        }
    }

    fn with_row(mut self, row: usize, square_type: SquareType) -> Self {
        self.layout[row - 1] = [square_type; COLUMNS];
        self
    }

    fn with_column(mut self, column: usize, square_type: SquareType) -> Self {
        for row in self.layout.iter_mut() {
            row[column - 1] = square_type;
        }
        self
    }

    fn with_square(mut self, row: usize, column: usize, square_type: SquareType) -> Self {
        self.layout[row - 1][column - 1] = square_type;
        self
    }

    // Marks `ends` squares at both ends of the row
    fn with_row_ends(mut self, row: usize, square_type: SquareType, ends: usize) -> Self {
        for column in 1..=COLUMNS {
            if column <= ends || column > COLUMNS - ends {
                self.layout[row - 1][column - 1] = square_type;
            }
        }
        self
    }

    fn with_starting_squares(self) -> Self {
        self.with_square(5, 5, SquareType::Starting)
            .with_square(5, 6, SquareType::Starting)
            .with_square(6, 5, SquareType::Starting)
            .with_square(6, 6, SquareType::Starting)
    }

    fn with_unplayable_border(self) -> Self {
        self.with_row(1, SquareType::Unplayable)
            .with_row(ROWS, SquareType::Unplayable)
            .with_column(1, SquareType::Unplayable)
            .with_column(COLUMNS, SquareType::Unplayable)
    }

    fn build(self) -> Layout {
        self.layout
    }
}

const MINI_LETTERS: &str = "AACDEEFIILLMNOOPRSSTUWY";
const SMALL_LETTERS: &str = "FJKQVWXZBBCCGGHHRRYYDDDLLLMMMNNNPPPSSSUUUIIIIOOOOTTTTAAAAAEEEEEE";
const STANDARD_LETTERS: &str = "JQVXZKKWWYYBBBFFFGGGHHHPPPCCCCDDDDDLLLLLMMMMMNNNNNRRRRRTTTTTUUUUUSSSSSSAAAAAAAIIIIIIIOOOOOOOEEEEEEEE";

pub const MAX_PLAYERS: usize = 4;

// Everything about a game that is fixed by its ruleset.
#[derive(Clone, Debug, PartialEq)]
pub struct GameRules {
    pub ruleset: Ruleset,
    pub letters: Vec<Letter>,
    pub layout: Layout,
    pub rack_size: usize,
    pub max_players: usize,
    pub stack_height: u32,
    pub debit_per_remaining_tile: i32,
}

impl GameRules {
    pub fn new(ruleset: Ruleset) -> Self {
        match ruleset {
            Ruleset::MiniUpwords => GameRules {
                ruleset,
                letters: Letter::tiles_from(MINI_LETTERS),
                layout: LayoutBuilder::new()
                    .with_unplayable_border()
                    .with_starting_squares()
                    .with_row_ends(2, SquareType::Unplayable, 4)
                    .with_row_ends(3, SquareType::Unplayable, 3)
                    .with_row_ends(4, SquareType::Unplayable, 2)
                    .with_row_ends(7, SquareType::Unplayable, 2)
                    .with_row_ends(8, SquareType::Unplayable, 3)
                    .with_row_ends(9, SquareType::Unplayable, 4)
                    .build(),
                rack_size: 5,
                max_players: MAX_PLAYERS,
                stack_height: 3,
                debit_per_remaining_tile: 3,
            },
            Ruleset::SmallUpwords => GameRules {
                ruleset,
                letters: Letter::tiles_from(SMALL_LETTERS),
                layout: LayoutBuilder::new()
                    .with_unplayable_border()
                    .with_starting_squares()
                    .build(),
                rack_size: 7,
                max_players: MAX_PLAYERS,
                stack_height: 5,
                debit_per_remaining_tile: 5,
            },
            Ruleset::StandardUpwords => GameRules {
                ruleset,
                letters: Letter::tiles_from(STANDARD_LETTERS),
                layout: LayoutBuilder::new().with_starting_squares().build(),
                rack_size: 7,
                max_players: MAX_PLAYERS,
                stack_height: 5,
                debit_per_remaining_tile: 5,
            },
        }
    }

    // 1-based, the caller has already range checked
    pub fn square_type(&self, row: usize, column: usize) -> SquareType {
        self.layout[row - 1][column - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(rules: &GameRules, square_type: SquareType) -> usize {
        rules
            .layout
            .iter()
            .flatten()
            .filter(|s| **s == square_type)
            .count()
    }

    #[test]
    fn test_ruleset_lookup() {
        assert_eq!(Ruleset::from_name_or_default("SmallUpwords"), Ruleset::SmallUpwords);
        assert_eq!(Ruleset::from_name_or_default("Standard Upwords"), Ruleset::StandardUpwords);
        assert_eq!(Ruleset::from_name_or_default("standardupwords"), Ruleset::MiniUpwords);
        assert_eq!(Ruleset::from_name_or_default(""), Ruleset::MiniUpwords);
        assert_eq!(
            Ruleset::names(),
            vec!["Mini Upwords", "Small Upwords", "Standard Upwords"]
        );
    }

    #[test]
    fn test_mini_rules() {
        let rules = GameRules::new(Ruleset::MiniUpwords);
        assert_eq!(rules.letters.len(), 23);
        assert_eq!(rules.rack_size, 5);
        assert_eq!(rules.stack_height, 3);
        assert_eq!(count(&rules, SquareType::Starting), 4);
        // border is 36, row ends add 2 * (3 + 2 + 1) * 2
        assert_eq!(count(&rules, SquareType::Unplayable), 36 + 24);
        assert_eq!(rules.square_type(2, 4), SquareType::Unplayable);
        assert_eq!(rules.square_type(2, 5), SquareType::Standard);
        assert_eq!(rules.square_type(2, 7), SquareType::Unplayable);
        assert_eq!(rules.square_type(3, 5), SquareType::Standard);
        assert_eq!(rules.square_type(4, 3), SquareType::Standard);
        assert_eq!(rules.square_type(5, 2), SquareType::Standard);
        assert_eq!(rules.square_type(5, 5), SquareType::Starting);
    }

    #[test]
    fn test_small_rules() {
        let rules = GameRules::new(Ruleset::SmallUpwords);
        assert_eq!(rules.letters.len(), 64);
        assert_eq!(rules.letters.iter().filter(|l| l.is_qu()).count(), 1);
        assert_eq!(count(&rules, SquareType::Unplayable), 36);
        assert_eq!(count(&rules, SquareType::Starting), 4);
        assert_eq!(rules.square_type(1, 1), SquareType::Unplayable);
        assert_eq!(rules.square_type(2, 2), SquareType::Standard);
    }

    #[test]
    fn test_standard_rules() {
        let rules = GameRules::new(Ruleset::StandardUpwords);
        assert_eq!(rules.letters.len(), 100);
        assert_eq!(count(&rules, SquareType::Unplayable), 0);
        assert_eq!(count(&rules, SquareType::Standard), 96);
        assert_eq!(rules.debit_per_remaining_tile, 5);
    }

    #[test]
    fn test_every_ruleset_shares_the_player_cap() {
        for ruleset in [
            Ruleset::MiniUpwords,
            Ruleset::SmallUpwords,
            Ruleset::StandardUpwords,
        ] {
            assert_eq!(GameRules::new(ruleset).max_players, MAX_PLAYERS);
        }
    }
}
