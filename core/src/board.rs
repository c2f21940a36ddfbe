use alloc::boxed::Box;
use alloc::collections::VecDeque;
use core::fmt;
use core::num::Saturating;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - NotStarted -> Started
/// - Started -> Won
/// - Started -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameProgress {
    /// Nothing uncovered yet
    #[default]
    NotStarted,
    Started,
    /// Every safe cell uncovered
    Won,
    /// A mine was uncovered
    Lost,
}

impl GameProgress {
    pub const fn is_started(self) -> bool {
        matches!(self, Self::Started)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// One game session: the generated minefield plus everything the player changed on it.
pub struct Board {
    minefield: Minefield,
    covered: Array2<bool>,
    flagged: Array2<bool>,
    to_uncover: Saturating<CellCount>,
    flag_count: Saturating<CellCount>,
    progress: GameProgress,
    action: ClickAction,
    triggered_mine: Option<Coord2>,
    notify_mode: NotifyMode,
    listener: Option<Box<dyn StateListener>>,
}

impl Board {
    /// Random board for `config`, mines shuffled with a generator seeded from `seed`.
    pub fn new(
        config: GameConfig,
        seed: u64,
        listener: impl StateListener + 'static,
    ) -> Result<Self> {
        Self::with_generator(ShuffleGenerator::new(seed), config, listener)
    }

    pub fn with_generator(
        generator: impl MinefieldGenerator,
        config: GameConfig,
        listener: impl StateListener + 'static,
    ) -> Result<Self> {
        let minefield = generator.generate(config)?;
        Ok(Self::from_minefield(minefield).with_listener(listener))
    }

    /// Board without a listener, see [`Board::with_listener`].
    pub fn from_minefield(minefield: Minefield) -> Self {
        let shape = minefield.size().to_nd_index();
        let to_uncover = minefield.safe_cell_count();
        Self {
            minefield,
            covered: Array2::from_elem(shape, true),
            flagged: Array2::from_elem(shape, false),
            to_uncover: Saturating(to_uncover),
            flag_count: Saturating(0),
            progress: Default::default(),
            action: Default::default(),
            triggered_mine: None,
            notify_mode: Default::default(),
            listener: None,
        }
    }

    pub fn with_listener(mut self, listener: impl StateListener + 'static) -> Self {
        self.set_listener(listener);
        self
    }

    pub fn set_listener(&mut self, listener: impl StateListener + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn notify_mode(&self) -> NotifyMode {
        self.notify_mode
    }

    pub fn set_notify_mode(&mut self, mode: NotifyMode) {
        self.notify_mode = mode;
    }

    pub fn progress(&self) -> GameProgress {
        self.progress
    }

    pub fn is_finished(&self) -> bool {
        self.progress.is_finished()
    }

    pub fn current_action(&self) -> ClickAction {
        self.action
    }

    pub fn width(&self) -> Coord {
        self.minefield.size().0
    }

    pub fn height(&self) -> Coord {
        self.minefield.size().1
    }

    pub fn size(&self) -> Coord2 {
        self.minefield.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.minefield.mine_count()
    }

    /// Safe cells still covered, the game is won when this reaches zero.
    pub fn to_uncover(&self) -> CellCount {
        self.to_uncover.0
    }

    pub fn flag_count(&self) -> CellCount {
        self.flag_count.0
    }

    /// Mines minus flags, negative when the player placed more flags than there are mines.
    pub fn mines_left(&self) -> isize {
        (self.minefield.mine_count() as isize) - (self.flag_count.0 as isize)
    }

    /// The mine that ended the game, if it was lost.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// Content of a cell regardless of whether it is covered, [`CellContent::Empty`] when out of
    /// bounds.
    pub fn content_at(&self, coords: Coord2) -> CellContent {
        self.minefield.get(coords).unwrap_or_default()
    }

    pub fn is_covered(&self, coords: Coord2) -> Option<bool> {
        self.covered.get(coords.to_nd_index()).copied()
    }

    pub fn is_flagged(&self, coords: Coord2) -> Option<bool> {
        self.flagged.get(coords.to_nd_index()).copied()
    }

    pub fn minefield(&self) -> &Minefield {
        &self.minefield
    }

    /// Uncovers a cell and returns its content. Empty cells also uncover their whole empty
    /// region and its numbered border.
    ///
    /// Coordinates are checked first, so an out-of-bounds call never starts the game. Winning
    /// is only checked after a safe cell is uncovered: a board made only of mines can be lost
    /// but never won, and a lost game stays lost.
    pub fn uncover(&mut self, coords: Coord2) -> Result<CellContent> {
        let coords = self.minefield.validate_coords(coords)?;
        self.check_not_finished()?;

        if !self.covered[coords.to_nd_index()] {
            return Err(GameError::AlreadyUncovered);
        }

        self.mark_started();
        let content = self.uncover_cell(coords);
        log::debug!("Uncover cell at {:?}, content: {:?}", coords, content);

        if content.is_empty() {
            self.flood_fill(coords);
        }

        if matches!(self.notify_mode, NotifyMode::PerCommand) {
            self.notify();
        }
        Ok(content)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.minefield.validate_coords(coords)?;
        self.check_started()?;

        let index = coords.to_nd_index();
        if !self.covered[index] {
            return Ok(MarkOutcome::NoChange);
        }

        if self.flagged[index] {
            self.flagged[index] = false;
            self.flag_count -= 1;
        } else {
            self.flagged[index] = true;
            self.flag_count += 1;
        }
        log::debug!("Flag at {:?}: {}", coords, self.flagged[index]);

        self.notify();
        Ok(MarkOutcome::Changed)
    }

    /// Switches between uncovering and flagging, returns the new action.
    pub fn toggle_action(&mut self) -> Result<ClickAction> {
        self.check_started()?;

        self.action = self.action.toggled();
        log::debug!("Click action: {:?}", self.action);

        self.notify();
        Ok(self.action)
    }

    /// Uncovers a single covered cell and applies its effect on the game progress.
    fn uncover_cell(&mut self, coords: Coord2) -> CellContent {
        let index = coords.to_nd_index();
        self.covered[index] = false;
        if self.flagged[index] {
            self.flagged[index] = false;
            self.flag_count -= 1;
        }

        let content = self.minefield[coords];
        if content.is_mine() {
            self.triggered_mine = Some(coords);
            self.end_game(false);
        } else {
            self.to_uncover -= 1;
            if self.to_uncover.0 == 0 {
                self.end_game(true);
            }
        }

        if matches!(self.notify_mode, NotifyMode::PerCell) {
            self.notify();
        }
        content
    }

    fn flood_fill(&mut self, origin: Coord2) {
        let mut to_visit: VecDeque<_> = self.covered_safe_neighbors(origin).collect();
        log::trace!(
            "Starting flood-fill from {:?}, initial neighbors: {:?}",
            origin,
            to_visit
        );

        while let Some(visit_coords) = to_visit.pop_front() {
            // queued more than once
            if !self.covered[visit_coords.to_nd_index()] {
                continue;
            }

            let content = self.uncover_cell(visit_coords);
            log::trace!("Flood uncovered cell at {:?}: {:?}", visit_coords, content);

            if content.is_empty() {
                to_visit.extend(self.covered_safe_neighbors(visit_coords));
            }
        }
    }

    fn covered_safe_neighbors(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + '_ {
        self.minefield
            .iter_neighbors(coords)
            .filter(move |&pos| self.covered[pos.to_nd_index()])
            .filter(move |&pos| !self.minefield[pos].is_mine())
    }

    fn mark_started(&mut self) {
        if matches!(self.progress, GameProgress::NotStarted) {
            log::debug!("Game started");
            self.progress = GameProgress::Started;
        }
    }

    fn end_game(&mut self, won: bool) {
        if self.progress.is_finished() {
            return;
        }

        self.progress = if won {
            GameProgress::Won
        } else {
            GameProgress::Lost
        };
        log::debug!("Game ended: {:?}", self.progress);
    }

    fn check_started(&self) -> Result<()> {
        match self.progress {
            GameProgress::NotStarted => Err(GameError::NotStarted),
            GameProgress::Started => Ok(()),
            GameProgress::Won | GameProgress::Lost => Err(GameError::AlreadyEnded),
        }
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.progress.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }

    fn notify(&mut self) {
        if let Some(mut listener) = self.listener.take() {
            listener.state_changed(self);
            self.listener = Some(listener);
        }
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("size", &self.size())
            .field("mines", &self.total_mines())
            .field("to_uncover", &self.to_uncover.0)
            .field("flag_count", &self.flag_count.0)
            .field("progress", &self.progress)
            .field("action", &self.action)
            .field("triggered_mine", &self.triggered_mine)
            .field("notify_mode", &self.notify_mode)
            .field("has_listener", &self.listener.is_some())
            .finish_non_exhaustive()
    }
}
