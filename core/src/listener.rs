use crate::Board;

/// Receives the board after every externally visible mutation.
pub trait StateListener {
    fn state_changed(&mut self, board: &Board);
}

impl<F> StateListener for F
where
    F: FnMut(&Board),
{
    fn state_changed(&mut self, board: &Board) {
        self(board)
    }
}

/// How often [`StateListener::state_changed`] fires while uncovering.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum NotifyMode {
    /// Once per accepted command, a whole flood fill included.
    #[default]
    PerCommand,
    /// Once per uncovered cell, so a flood fill fires for every cell it opens. Flag and action
    /// toggles still fire once.
    PerCell,
}
