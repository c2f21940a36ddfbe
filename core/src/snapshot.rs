use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// What the player can see of a single cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisibleCell {
    #[default]
    Covered,
    Flagged,
    Uncovered(CellContent),
}

/// Player-visible copy of a board, for renderers that want a value instead of querying the
/// board cell by cell. Covered contents are never included, mines included.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub size: Coord2,
    pub mines: CellCount,
    pub progress: GameProgress,
    pub action: ClickAction,
    pub to_uncover: CellCount,
    pub triggered_mine: Option<Coord2>,
    /// Indexed by `[y, x]`.
    pub cells: Array2<VisibleCell>,
}

impl BoardSnapshot {
    pub fn from_board(board: &Board) -> Self {
        let size = board.size();
        let mut cells = Array2::from_elem(size.to_nd_index(), VisibleCell::Covered);

        let (width, height) = size;
        for y in 0..height {
            for x in 0..width {
                let coords = (x, y);
                let visible = match (board.is_covered(coords), board.is_flagged(coords)) {
                    (Some(false), _) => VisibleCell::Uncovered(board.content_at(coords)),
                    (Some(true), Some(true)) => VisibleCell::Flagged,
                    _ => VisibleCell::Covered,
                };
                cells[coords.to_nd_index()] = visible;
            }
        }

        Self {
            size,
            mines: board.total_mines(),
            progress: board.progress(),
            action: board.current_action(),
            to_uncover: board.to_uncover(),
            triggered_mine: board.triggered_mine(),
            cells,
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<VisibleCell> {
        self.cells.get(coords.to_nd_index()).copied()
    }

    /// Checks a deserialized snapshot: the grid must match `size` and the counters must fit
    /// on it.
    pub fn validate(&self) -> Result<()> {
        if self.cells.dim() != (usize::from(self.size.1), usize::from(self.size.0)) {
            return Err(GameError::InvalidBoardShape);
        }

        let total_cells = mult(self.size.0, self.size.1);
        if self.mines > total_cells {
            return Err(GameError::TooManyMines);
        }
        if self.to_uncover > total_cells - self.mines {
            return Err(GameError::InvalidBoardShape);
        }

        if let Some(coords) = self.triggered_mine {
            if self.cell_at(coords).is_none() {
                return Err(GameError::InvalidCoords);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(size: Coord2, mines: &[Coord2]) -> Board {
        Board::from_minefield(Minefield::from_mine_coords(size, mines).unwrap())
    }

    #[test]
    fn from_board_maps_visible_cells() {
        let mut board = board((3, 2), &[(0, 0)]);
        board.uncover((1, 1)).unwrap();
        board.toggle_flag((0, 0)).unwrap();

        let snapshot = BoardSnapshot::from_board(&board);

        assert_eq!(snapshot.progress, GameProgress::Started);
        assert_eq!(snapshot.mines, 1);
        assert_eq!(
            snapshot.cell_at((1, 1)),
            Some(VisibleCell::Uncovered(CellContent::Count(1)))
        );
        assert_eq!(snapshot.cell_at((0, 0)), Some(VisibleCell::Flagged));
        assert_eq!(snapshot.cell_at((2, 0)), Some(VisibleCell::Covered));
        assert_eq!(snapshot.cell_at((3, 0)), None);
    }

    #[test]
    fn lost_game_keeps_other_mines_hidden() {
        let mut board = board((3, 1), &[(0, 0), (2, 0)]);
        board.uncover((0, 0)).unwrap();

        let snapshot = BoardSnapshot::from_board(&board);

        assert_eq!(snapshot.progress, GameProgress::Lost);
        assert_eq!(snapshot.triggered_mine, Some((0, 0)));
        assert_eq!(
            snapshot.cell_at((0, 0)),
            Some(VisibleCell::Uncovered(CellContent::Mine))
        );
        assert_eq!(snapshot.cell_at((2, 0)), Some(VisibleCell::Covered));
    }

    #[test]
    fn serializes_for_renderers() {
        let mut board = board((2, 1), &[(1, 0)]);
        board.uncover((0, 0)).unwrap();

        let snapshot = BoardSnapshot::from_board(&board);
        let json = serde_json::to_string(&snapshot).unwrap();

        assert!(json.contains("\"progress\":\"Won\""));
        assert!(json.contains("{\"Uncovered\":{\"Count\":1}}"));
        assert_eq!(serde_json::from_str::<BoardSnapshot>(&json).unwrap(), snapshot);
        assert_eq!(snapshot.validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_shape_mismatch() {
        let snapshot = BoardSnapshot {
            size: (3, 3),
            mines: 1,
            progress: GameProgress::NotStarted,
            action: ClickAction::Uncover,
            to_uncover: 0,
            triggered_mine: None,
            cells: Array2::from_elem([1, 1], VisibleCell::Covered),
        };

        assert_eq!(snapshot.validate(), Err(GameError::InvalidBoardShape));
    }

    #[test]
    fn validate_rejects_impossible_counters() {
        let mut board = board((2, 2), &[(0, 0)]);
        board.uncover((1, 1)).unwrap();
        let snapshot = BoardSnapshot::from_board(&board);
        assert_eq!(snapshot.validate(), Ok(()));

        let too_many_mines = BoardSnapshot {
            mines: 5,
            ..snapshot.clone()
        };
        assert_eq!(too_many_mines.validate(), Err(GameError::TooManyMines));

        let bad_trigger = BoardSnapshot {
            triggered_mine: Some((4, 0)),
            ..snapshot
        };
        assert_eq!(bad_trigger.validate(), Err(GameError::InvalidCoords));
    }

    #[test]
    fn deserialized_snapshot_with_wrong_shape_fails_validation() {
        let json = r#"{"size":[3,3],"mines":0,"progress":"NotStarted","action":"Uncover","to_uncover":9,"triggered_mine":null,"cells":{"v":1,"dim":[1,1],"data":["Covered"]}}"#;
        let snapshot = serde_json::from_str::<BoardSnapshot>(json).unwrap();

        assert_eq!(snapshot.cell_at((2, 2)), None);
        assert_eq!(snapshot.validate(), Err(GameError::InvalidBoardShape));
    }
}
