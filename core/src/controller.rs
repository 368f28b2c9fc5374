use alloc::boxed::Box;
use core::fmt;

use crate::*;

type EndStateCallback = Box<dyn FnMut(EndState)>;

/// Top-level state machine of a single game.
///
/// Owns the board exclusively. Mines are laid out on the first action, which is always safe.
pub struct GameController {
    board: Board,
    amount_of_mines: CellCount,
    state: GameState,
    generator: Generator,
    on_end_state: Option<EndStateCallback>,
}

impl GameController {
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            board: Board::new(config.size)?,
            amount_of_mines: config.mines,
            state: GameState::new(config.mines, config.input_mode),
            generator: Generator::from_config(&config),
            on_end_state: None,
        })
    }

    pub fn new_game(
        height: Coord,
        width: Coord,
        amount_of_mines: CellCount,
        winnable_required: bool,
    ) -> Result<Self> {
        Self::new(
            GameConfig::new((height, width), amount_of_mines)
                .with_winnable_required(winnable_required),
        )
    }

    /// Plays on a preset layout, the first move no longer generates anything.
    pub fn from_board(board: Board) -> Self {
        let amount_of_mines = board.mine_count();
        let mut state = GameState::new(amount_of_mines, InputMode::default());
        state.first_move = false;
        Self {
            generator: Generator::from_config(&GameConfig::new(board.size(), amount_of_mines)),
            board,
            amount_of_mines,
            state,
            on_end_state: None,
        }
    }

    pub fn with_generator(mut self, source: impl MineGenerator + 'static) -> Self {
        self.generator = self.generator.with_source(source);
        self
    }

    /// Only consulted when the game was configured to require a winnable board.
    pub fn with_winnability(mut self, winnability: impl Winnability + 'static) -> Self {
        self.generator = self.generator.with_winnability(winnability);
        self
    }

    /// Called once when the game is won or lost.
    pub fn on_end_state(&mut self, callback: impl FnMut(EndState) + 'static) {
        self.on_end_state = Some(Box::new(callback));
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn amount_of_mines(&self) -> CellCount {
        self.amount_of_mines
    }

    pub fn end_state(&self) -> EndState {
        self.state.end_state
    }

    pub fn input_mode(&self) -> InputMode {
        self.state.input_mode
    }

    pub fn is_first_move(&self) -> bool {
        self.state.first_move
    }

    /// Mines minus flags, negative when the player placed too many flags.
    pub fn mines_remaining(&self) -> isize {
        self.state.mines_remaining
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tile_view(&self, coords: Coord2) -> Result<TileView> {
        let tile = *self.board.tile_at(coords)?;
        Ok(TileView::new(tile, self.state.end_state))
    }

    pub fn toggle_input_mode(&mut self) -> InputMode {
        self.state.input_mode = self.state.input_mode.toggled();
        log::debug!("Input mode is now {:?}", self.state.input_mode);
        self.state.input_mode
    }

    /// Click on a tile: generate on the first move, then reveal or flag a hidden tile
    /// depending on the input mode, or chord a revealed one.
    pub fn primary_action(&mut self, coords: Coord2) -> Result<ActionOutcome> {
        let coords = self.board.validate_coords(coords)?;
        let before = self.state.end_state;

        let outcome = if self.state.first_move {
            self.generator
                .generate(&mut self.board, coords, self.amount_of_mines)?;
            self.state.first_move = false;
            self.reveal(coords)
        } else if !self.board[coords].is_revealed() {
            match self.state.input_mode {
                InputMode::Revealing => self.reveal(coords),
                InputMode::Flagging => self.toggle_flag(coords).into(),
            }
        } else if is_chord_safe(&self.board, coords) {
            self.chord(coords)
        } else {
            ActionOutcome::NoChange
        };

        self.evaluate_win();

        Ok(match (before, self.state.end_state) {
            (EndState::Undecided, EndState::Won) => ActionOutcome::Won,
            (EndState::Undecided, EndState::Lost) => ActionOutcome::Exploded,
            _ => outcome,
        })
    }

    /// Long press: the primary action with the input mode swapped for this call only.
    pub fn secondary_action(&mut self, coords: Coord2) -> Result<ActionOutcome> {
        let coords = self.board.validate_coords(coords)?;

        self.state.input_mode = self.state.input_mode.toggled();
        let outcome = self.primary_action(coords);
        self.state.input_mode = self.state.input_mode.toggled();

        outcome
    }

    /// Full-board scan, a loss is never turned into a win.
    ///
    /// Wins when only mines are left hidden, or when every mine carries a flag.
    pub fn evaluate_win(&mut self) -> EndState {
        if self.state.first_move || self.state.end_state != EndState::Undecided {
            return self.state.end_state;
        }

        let all_safe_revealed = self.board.unrevealed_count() == self.amount_of_mines;
        let all_mines_flagged = self
            .board
            .all_tiles()
            .filter(|(_, tile)| tile.is_mine())
            .all(|(_, tile)| tile.is_flagged());

        if all_safe_revealed || all_mines_flagged {
            self.end_game(EndState::Won);
        }
        self.state.end_state
    }

    fn reveal(&mut self, coords: Coord2) -> ActionOutcome {
        let outcome = reveal_from(&mut self.board, coords);
        if outcome == RevealOutcome::HitMine {
            self.end_game(EndState::Lost);
        }
        outcome.into()
    }

    fn chord(&mut self, coords: Coord2) -> ActionOutcome {
        let outcome = reveal_neighbors(&mut self.board, coords);
        if outcome == RevealOutcome::HitMine {
            self.end_game(EndState::Lost);
        }
        outcome.into()
    }

    fn toggle_flag(&mut self, coords: Coord2) -> MarkOutcome {
        let tile = &mut self.board[coords];
        if tile.is_revealed() {
            return MarkOutcome::NoChange;
        }

        tile.toggle_flag();
        if tile.is_flagged() {
            self.state.mines_remaining -= 1;
        } else {
            self.state.mines_remaining += 1;
        }
        MarkOutcome::Changed
    }

    /// Only moves out of `Undecided`, so the callback fires at most once.
    fn end_game(&mut self, end_state: EndState) {
        if self.state.end_state.is_final() || !end_state.is_final() {
            return;
        }

        self.state.end_state = end_state;
        log::debug!("Game ended: {:?}", end_state);
        if let Some(callback) = self.on_end_state.as_mut() {
            callback(end_state);
        }
    }
}

impl fmt::Debug for GameController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameController")
            .field("size", &self.board.size())
            .field("amount_of_mines", &self.amount_of_mines)
            .field("state", &self.state)
            .field("generator", &self.generator)
            .finish_non_exhaustive()
    }
}
