use core::fmt;
use serde::{Deserialize, Serialize};

/// What a cell holds, fixed when the board is generated.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellContent {
    /// No adjacent mines.
    #[default]
    Empty,
    /// Number of adjacent mines, always in `1..=8`.
    Count(u8),
    Mine,
}

impl CellContent {
    /// Content of a safe cell with `adjacent` neighboring mines.
    pub const fn from_adjacent(adjacent: u8) -> Self {
        if adjacent == 0 {
            Self::Empty
        } else {
            Self::Count(adjacent)
        }
    }

    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Adjacent mine count for safe cells, `None` for mines.
    pub const fn adjacent_mines(self) -> Option<u8> {
        match self {
            Self::Empty => Some(0),
            Self::Count(count) => Some(count),
            Self::Mine => None,
        }
    }
}

impl fmt::Display for CellContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Count(count) => write!(f, "{count}"),
            Self::Mine => f.write_str("*"),
        }
    }
}

/// What a click on a covered cell should do, chosen by the player.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClickAction {
    #[default]
    Uncover,
    Flag,
}

impl ClickAction {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Uncover => Self::Flag,
            Self::Flag => Self::Uncover,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn zero_adjacent_is_empty() {
        assert_eq!(CellContent::from_adjacent(0), CellContent::Empty);
        assert_eq!(CellContent::from_adjacent(3), CellContent::Count(3));
    }

    #[test]
    fn display_matches_board_glyphs() {
        assert_eq!(CellContent::Empty.to_string(), "");
        assert_eq!(CellContent::Count(8).to_string(), "8");
        assert_eq!(CellContent::Mine.to_string(), "*");
    }

    #[test]
    fn mines_have_no_adjacent_count() {
        assert_eq!(CellContent::Mine.adjacent_mines(), None);
        assert_eq!(CellContent::Empty.adjacent_mines(), Some(0));
    }

    #[test]
    fn action_toggles_back_and_forth() {
        let action = ClickAction::default();

        assert_eq!(action, ClickAction::Uncover);
        assert_eq!(action.toggled(), ClickAction::Flag);
        assert_eq!(action.toggled().toggled(), ClickAction::Uncover);
    }
}
