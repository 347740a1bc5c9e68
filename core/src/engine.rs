use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Square ids picked for the current move, at most two.
pub type Selection = SmallVec<[SquareId; 2]>;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    /// Editing settings, no session is active.
    #[default]
    Config,
    Playing,
}

/// Intents the presentation layer dispatches into the engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Action {
    SetMode(OperationMode),
    SetMaxNumber(Number),
    SetBoardSize(BoardSize),
    SetTimesTables(BTreeSet<TimesTable>),
    SetArrangement(BoardArrangement),
    StartGame,
    ExitToConfig,
    RestartGame,
    ToggleSquare(SquareId),
    /// Commits a celebration; carries the session it was scheduled for.
    RevealSquares(SessionId),
    ResetProgress,
}

/// Result of dispatching an [`Action`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    NoChange,
    Changed,
    /// The transition was refused, state is unchanged.
    Rejected(GameError),
    /// Correct answer; the caller fires `RevealSquares` with this session after its delay.
    Celebrate(SessionId),
    /// Wrong answer, the selection was cleared.
    TryAgain,
    /// The board is fully revealed and its image unlocked.
    Completed,
}

impl Outcome {
    /// Whether this outcome could have caused an update to the state.
    pub const fn has_update(self) -> bool {
        use Outcome::*;
        match self {
            NoChange => false,
            Changed => true,
            Rejected(_) => false,
            Celebrate(_) => true,
            TryAgain => true,
            Completed => true,
        }
    }
}

/// State of one play-through, from board creation to completion or exit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActiveGame {
    session_id: SessionId,
    board: Board,
    selected_squares: Selection,
    celebrating_squares: Selection,
    target: Number,
    current_operation: Operation,
    multiplication_table: Option<TimesTable>,
    multiplication_swap_order: bool,
    background: RewardImage,
    is_complete: bool,
    mode: OperationMode,
    times_tables: BTreeSet<TimesTable>,
}

impl ActiveGame {
    fn new(
        session_id: SessionId,
        board: Board,
        background: RewardImage,
        config: &GameConfig,
        next: TargetResult,
    ) -> Self {
        let mut game = Self {
            session_id,
            board,
            selected_squares: Selection::new(),
            celebrating_squares: Selection::new(),
            target: 0,
            current_operation: next.operation,
            multiplication_table: None,
            multiplication_swap_order: false,
            background,
            is_complete: false,
            mode: config.mode,
            times_tables: config.selected_times_tables.clone(),
        };
        game.install_target(next);
        game
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn selected_squares(&self) -> &[SquareId] {
        &self.selected_squares
    }

    pub fn celebrating_squares(&self) -> &[SquareId] {
        &self.celebrating_squares
    }

    pub fn target(&self) -> Number {
        self.target
    }

    pub fn current_operation(&self) -> Operation {
        self.current_operation
    }

    pub fn multiplication_table(&self) -> Option<TimesTable> {
        self.multiplication_table
    }

    pub fn multiplication_swap_order(&self) -> bool {
        self.multiplication_swap_order
    }

    pub fn background(&self) -> &RewardImage {
        &self.background
    }

    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    /// Mode the session was started with.
    pub fn mode(&self) -> OperationMode {
        self.mode
    }

    pub fn square(&self, id: SquareId) -> Option<&Square> {
        self.board.square(id)
    }

    pub fn is_selected(&self, id: SquareId) -> bool {
        self.selected_squares.contains(&id)
    }

    pub fn is_celebrating(&self, id: SquareId) -> bool {
        self.celebrating_squares.contains(&id)
    }

    /// Values of the selected squares, in selection order.
    pub fn selected_values(&self) -> SmallVec<[Number; 2]> {
        self.selected_squares
            .iter()
            .filter_map(|&id| self.board.square(id))
            .map(Square::value)
            .collect()
    }

    pub fn max_selections(&self) -> usize {
        self.current_operation.max_selections()
    }

    pub fn revealed_count(&self) -> usize {
        self.board.revealed_count()
    }

    pub fn remaining_count(&self) -> usize {
        self.board.available_count()
    }

    fn install_target(&mut self, next: TargetResult) {
        log::debug!(
            "next target: {} ({:?}, table {:?})",
            next.target,
            next.operation,
            next.multiplication_table
        );
        self.target = next.target;
        self.current_operation = next.operation;
        self.multiplication_table = next.multiplication_table;
        self.multiplication_swap_order = next.multiplication_swap_order;
        self.selected_squares.clear();
        self.celebrating_squares.clear();
    }

    fn toggle(&mut self, id: SquareId) -> Outcome {
        use Outcome::*;

        let Some(square) = self.board.square(id) else {
            log::warn!("toggle for unknown square {id}");
            return Rejected(GameError::UnknownSquare);
        };

        // revealed squares are inert, and a celebrating selection is already final
        if square.is_revealed() || !self.celebrating_squares.is_empty() {
            return NoChange;
        }

        if let Some(index) = self.selected_squares.iter().position(|&other| other == id) {
            self.selected_squares.remove(index);
            log::trace!("deselect square {id}");
            return Changed;
        }

        let max_selections = self.max_selections();
        if self.selected_squares.len() >= max_selections {
            return NoChange;
        }

        self.selected_squares.push(id);
        log::trace!("select square {id}");
        if self.selected_squares.len() < max_selections {
            return Changed;
        }

        let values = self.selected_values();
        if check_answer(
            &values,
            self.target,
            self.current_operation,
            self.multiplication_table,
        ) {
            log::debug!("correct answer {values:?} for target {}", self.target);
            self.celebrating_squares = self.selected_squares.clone();
            Celebrate(self.session_id)
        } else {
            log::debug!("wrong answer {values:?} for target {}", self.target);
            self.selected_squares.clear();
            TryAgain
        }
    }

    fn finish(&mut self) {
        self.selected_squares.clear();
        self.celebrating_squares.clear();
        self.is_complete = true;
    }
}

/// Everything the presentation layer renders: config, progress and the active session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    config: GameConfig,
    unlocked_images: UnlockedImages,
    screen: Screen,
    game: Option<ActiveGame>,
    last_session_id: SessionId,
}

impl GameState {
    pub fn new(config: GameConfig, unlocked_images: UnlockedImages) -> Self {
        Self {
            config,
            unlocked_images,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn unlocked_images(&self) -> &UnlockedImages {
        &self.unlocked_images
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn game(&self) -> Option<&ActiveGame> {
        self.game.as_ref()
    }

    pub fn gallery(&self) -> Gallery {
        Gallery::new(&self.unlocked_images)
    }

    /// Session waiting for its `RevealSquares`, if a celebration is in progress.
    pub fn pending_reveal(&self) -> Option<SessionId> {
        self.game
            .as_ref()
            .filter(|game| !game.celebrating_squares.is_empty())
            .map(ActiveGame::session_id)
    }

    pub fn dispatch<R: Rng + ?Sized>(&mut self, action: Action, rng: &mut R) -> Outcome {
        use Action::*;

        match action {
            SetMode(mode) => self.update_config(|config| config.set_mode(mode)),
            SetMaxNumber(max_number) => {
                self.update_config(|config| config.set_max_number(max_number))
            }
            SetBoardSize(board_size) => {
                self.update_config(|config| config.set_board_size(board_size))
            }
            SetTimesTables(tables) => self.update_config(|config| config.set_times_tables(tables)),
            SetArrangement(arrangement) => {
                self.update_config(|config| config.set_arrangement(arrangement))
            }
            StartGame => self.start_game(rng),
            ExitToConfig => self.leave_session("exit to config"),
            RestartGame => self.leave_session("restart"),
            ToggleSquare(id) => self.toggle_square(id),
            RevealSquares(session_id) => self.reveal_squares(session_id, rng),
            ResetProgress => self.reset_progress(),
        }
    }

    /// Starts a session on a prepared board, bypassing board generation and reward selection.
    pub fn start_session<R: Rng + ?Sized>(
        &mut self,
        board: Board,
        background: RewardImage,
        rng: &mut R,
    ) -> Outcome {
        if let Err(err) = self.check_can_start() {
            return Outcome::Rejected(err);
        }

        let Some(next) = generate_target(
            rng,
            &board,
            self.config.mode,
            &self.config.selected_times_tables,
        ) else {
            log::warn!("no target for a fresh {:?} board", self.config.mode);
            return Outcome::Rejected(GameError::NoTarget);
        };

        self.last_session_id = self.last_session_id.wrapping_add(1);
        log::debug!(
            "session {} started: {}x{} board, image {}",
            self.last_session_id,
            board.size(),
            board.size(),
            background.number
        );
        self.game = Some(ActiveGame::new(
            self.last_session_id,
            board,
            background,
            &self.config,
            next,
        ));
        self.screen = Screen::Playing;
        Outcome::Changed
    }

    fn update_config(&mut self, update: impl FnOnce(&mut GameConfig)) -> Outcome {
        if self.screen == Screen::Playing {
            log::warn!("config is locked while a session is active");
            return Outcome::NoChange;
        }

        let before = self.config.clone();
        update(&mut self.config);
        if self.config == before {
            Outcome::NoChange
        } else {
            Outcome::Changed
        }
    }

    fn check_can_start(&self) -> Result<()> {
        if !self.config.has_required_times_tables() {
            log::warn!("cannot start {:?} without times tables", self.config.mode);
            return Err(GameError::MissingTimesTables);
        }
        Ok(())
    }

    fn start_game<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Outcome {
        if let Err(err) = self.check_can_start() {
            return Outcome::Rejected(err);
        }

        let board = match RandomBoardGenerator.generate(&self.config, rng) {
            Ok(board) => board,
            Err(err) => {
                log::error!("could not generate board: {err}");
                return Outcome::Rejected(err);
            }
        };
        let catalogue: Vec<ImageNumber> = all_reward_images().collect();
        let background = select_background_image(rng, &self.unlocked_images, &catalogue);

        self.start_session(board, background, rng)
    }

    fn leave_session(&mut self, reason: &str) -> Outcome {
        let had_session = self.game.take().is_some();
        let was_playing = core::mem::take(&mut self.screen) == Screen::Playing;

        if had_session || was_playing {
            log::debug!("session discarded: {reason}");
            Outcome::Changed
        } else {
            Outcome::NoChange
        }
    }

    fn toggle_square(&mut self, id: SquareId) -> Outcome {
        if self.screen != Screen::Playing {
            return Outcome::NoChange;
        }

        match self.game.as_mut() {
            Some(game) if !game.is_complete => game.toggle(id),
            _ => Outcome::NoChange,
        }
    }

    fn reveal_squares<R: Rng + ?Sized>(&mut self, session_id: SessionId, rng: &mut R) -> Outcome {
        let Some(game) = self.game.as_mut() else {
            log::debug!("reveal for session {session_id} without an active session");
            return Outcome::NoChange;
        };

        if game.session_id != session_id {
            log::debug!(
                "stale reveal for session {session_id}, active is {}",
                game.session_id
            );
            return Outcome::NoChange;
        }

        if game.is_complete || game.celebrating_squares.is_empty() {
            return Outcome::NoChange;
        }

        let revealed = game.board.reveal(&game.celebrating_squares);
        log::debug!(
            "revealed {revealed} squares, {} remaining",
            game.remaining_count()
        );

        if !game.board.is_fully_revealed() {
            match generate_target(rng, &game.board, game.mode, &game.times_tables) {
                Some(next) => {
                    game.install_target(next);
                    return Outcome::Changed;
                }
                None => {
                    log::error!(
                        "no target for {} hidden squares in {:?} mode, completing session",
                        game.remaining_count(),
                        game.mode
                    );
                    game.board.reveal_all();
                }
            }
        }

        game.finish();
        let image = game.background.number;
        if self.unlocked_images.insert(image) {
            log::info!("image {image} unlocked");
        }
        Outcome::Completed
    }

    fn reset_progress(&mut self) -> Outcome {
        if self.unlocked_images.is_empty() {
            return Outcome::NoChange;
        }

        log::debug!("progress reset, {} images locked", self.unlocked_images.len());
        self.unlocked_images.clear();
        Outcome::Changed
    }
}

/// Applies `action` to an owned state and hands it back with the outcome.
pub fn reduce<R: Rng + ?Sized>(
    mut state: GameState,
    action: Action,
    rng: &mut R,
) -> (GameState, Outcome) {
    let outcome = state.dispatch(action, rng);
    (state, outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use smallvec::smallvec;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(0x5eed)
    }

    fn addition_config(board_size: BoardSize) -> GameConfig {
        GameConfig::new(OperationMode::Addition, 12, board_size, [2, 5, 10])
    }

    /// Finds squares that satisfy the current target.
    fn solve(game: &ActiveGame) -> Selection {
        let available: Vec<&Square> = game.board().available().collect();

        if let Some(table) = game.multiplication_table() {
            let square = available
                .iter()
                .find(|square| square.value() * Number::from(table) == game.target())
                .expect("multiplication target must be achievable");
            return smallvec![square.id()];
        }

        for (i, first) in available.iter().enumerate() {
            for second in &available[i + 1..] {
                if game.current_operation().apply(first.value(), second.value()) == game.target() {
                    return smallvec![first.id(), second.id()];
                }
            }
        }
        panic!("target {} is not achievable", game.target());
    }

    /// Answers one move correctly and commits the reveal.
    fn play_move(state: &mut GameState, rng: &mut SmallRng) -> Outcome {
        let answer = solve(state.game().unwrap());
        let mut outcome = Outcome::NoChange;
        for id in answer {
            outcome = state.dispatch(Action::ToggleSquare(id), rng);
        }

        let Outcome::Celebrate(session_id) = outcome else {
            panic!("expected a celebration, got {outcome:?}");
        };
        state.dispatch(Action::RevealSquares(session_id), rng)
    }

    fn wrong_pair(game: &ActiveGame) -> Option<Selection> {
        let available: Vec<&Square> = game.board().available().collect();
        for (i, first) in available.iter().enumerate() {
            for second in &available[i + 1..] {
                if first.value() + second.value() != game.target() {
                    return Some(smallvec![first.id(), second.id()]);
                }
            }
        }
        None
    }

    #[test]
    fn start_requires_times_tables_for_multiplication_modes() {
        let mut rng = rng();
        let mut config = GameConfig::new(OperationMode::Multiplication, 12, 4, []);
        let mut state = GameState::new(config.clone(), UnlockedImages::default());

        let outcome = state.dispatch(Action::StartGame, &mut rng);

        assert_eq!(outcome, Outcome::Rejected(GameError::MissingTimesTables));
        assert!(!outcome.has_update());
        assert_eq!(state.screen(), Screen::Config);
        assert!(state.game().is_none());

        config.set_mode(OperationMode::All);
        let mut state = GameState::new(config, UnlockedImages::default());
        assert_eq!(
            state.dispatch(Action::StartGame, &mut rng),
            Outcome::Rejected(GameError::MissingTimesTables)
        );
    }

    #[test]
    fn prepared_boards_also_require_times_tables() {
        let mut rng = rng();
        let config = GameConfig::new(OperationMode::All, 12, 4, []);
        let mut state = GameState::new(config, UnlockedImages::default());
        let board = Board::from_values(2, &[1, 2, 3, 4]).unwrap();

        for _ in 0..50 {
            assert_eq!(
                state.start_session(board.clone(), RewardImage::new(1), &mut rng),
                Outcome::Rejected(GameError::MissingTimesTables)
            );
        }
        assert_eq!(state.screen(), Screen::Config);
        assert!(state.game().is_none());

        state.dispatch(Action::SetTimesTables([4].into_iter().collect()), &mut rng);
        assert_eq!(
            state.start_session(board, RewardImage::new(1), &mut rng),
            Outcome::Changed
        );
        assert_eq!(state.game().unwrap().mode(), OperationMode::All);
    }

    #[test]
    fn addition_session_celebrates_then_reveals() {
        let mut rng = rng();
        let mut state = GameState::new(addition_config(4), UnlockedImages::default());

        assert_eq!(state.dispatch(Action::StartGame, &mut rng), Outcome::Changed);
        assert_eq!(state.screen(), Screen::Playing);

        let game = state.game().unwrap();
        assert!(game.selected_squares().is_empty());
        assert!(game.celebrating_squares().is_empty());
        assert_eq!(game.current_operation(), Operation::Addition);
        assert_eq!(game.board().len(), 16);
        assert!(!game.is_complete());

        let answer = solve(game);
        assert_eq!(
            state.dispatch(Action::ToggleSquare(answer[0]), &mut rng),
            Outcome::Changed
        );
        let outcome = state.dispatch(Action::ToggleSquare(answer[1]), &mut rng);
        let session_id = state.game().unwrap().session_id();
        assert_eq!(outcome, Outcome::Celebrate(session_id));
        assert_eq!(state.pending_reveal(), Some(session_id));

        let game = state.game().unwrap();
        assert_eq!(game.celebrating_squares(), &answer[..]);
        assert_eq!(game.selected_squares(), &answer[..]);
        assert!(answer.iter().all(|&id| !game.square(id).unwrap().is_revealed()));

        assert_eq!(
            state.dispatch(Action::RevealSquares(session_id), &mut rng),
            Outcome::Changed
        );

        let game = state.game().unwrap();
        assert!(answer.iter().all(|&id| game.square(id).unwrap().is_revealed()));
        assert_eq!(game.remaining_count(), 14);
        assert!(game.selected_squares().is_empty());
        assert!(game.celebrating_squares().is_empty());
        assert!(!game.is_complete());
        assert_eq!(state.pending_reveal(), None);
        assert!(!solve(game).is_empty());
    }

    #[test]
    fn wrong_answer_clears_the_selection() {
        let mut rng = rng();
        let mut state = GameState::new(addition_config(4), UnlockedImages::default());
        let board = Board::from_values(2, &[1, 2, 3, 40]).unwrap();
        state.start_session(board, RewardImage::new(1), &mut rng);

        let Some(pair) = wrong_pair(state.game().unwrap()) else {
            panic!("every pair matches the target");
        };
        state.dispatch(Action::ToggleSquare(pair[0]), &mut rng);
        let outcome = state.dispatch(Action::ToggleSquare(pair[1]), &mut rng);

        assert_eq!(outcome, Outcome::TryAgain);
        let game = state.game().unwrap();
        assert!(game.selected_squares().is_empty());
        assert!(game.celebrating_squares().is_empty());
        assert_eq!(game.remaining_count(), 4);
    }

    #[test]
    fn toggle_deselects_and_ignores_revealed_or_unknown_squares() {
        let mut rng = rng();
        let mut state = GameState::new(addition_config(4), UnlockedImages::default());
        let board = Board::from_values(2, &[1, 2, 3, 4]).unwrap();
        state.start_session(board, RewardImage::new(1), &mut rng);

        assert_eq!(state.dispatch(Action::ToggleSquare(2), &mut rng), Outcome::Changed);
        assert!(state.game().unwrap().is_selected(2));
        assert_eq!(state.dispatch(Action::ToggleSquare(2), &mut rng), Outcome::Changed);
        assert!(state.game().unwrap().selected_squares().is_empty());

        assert_eq!(
            state.dispatch(Action::ToggleSquare(99), &mut rng),
            Outcome::Rejected(GameError::UnknownSquare)
        );

        state.game.as_mut().unwrap().board.reveal(&[0]);
        assert_eq!(state.dispatch(Action::ToggleSquare(0), &mut rng), Outcome::NoChange);
        assert!(state.game().unwrap().selected_squares().is_empty());
    }

    #[test]
    fn selection_is_locked_while_celebrating() {
        let mut rng = rng();
        let config = GameConfig::new(OperationMode::Multiplication, 12, 4, [3]);
        let mut state = GameState::new(config, UnlockedImages::default());
        let board = Board::from_values(2, &[1, 2, 3, 4]).unwrap();
        state.start_session(board, RewardImage::new(1), &mut rng);

        let game = state.game().unwrap();
        assert_eq!(game.max_selections(), 1);
        assert_eq!(game.multiplication_table(), Some(3));
        let answer = solve(game);
        let outcome = state.dispatch(Action::ToggleSquare(answer[0]), &mut rng);
        assert!(matches!(outcome, Outcome::Celebrate(_)));

        let other = (0..4).find(|&id| id != answer[0]).unwrap();
        assert_eq!(state.dispatch(Action::ToggleSquare(other), &mut rng), Outcome::NoChange);
        assert_eq!(
            state.dispatch(Action::ToggleSquare(answer[0]), &mut rng),
            Outcome::NoChange
        );
        assert_eq!(state.game().unwrap().celebrating_squares(), &answer[..]);
    }

    #[test]
    fn completing_the_board_unlocks_the_image_once() {
        let mut rng = rng();
        let unlocked: UnlockedImages = [7].into_iter().collect();
        let mut state = GameState::new(addition_config(4), unlocked);
        let board = Board::from_values(2, &[3, 4, 5, 6]).unwrap();
        state.start_session(board, RewardImage::new(7), &mut rng);

        assert_eq!(play_move(&mut state, &mut rng), Outcome::Changed);
        assert_eq!(play_move(&mut state, &mut rng), Outcome::Completed);

        let game = state.game().unwrap();
        assert!(game.is_complete());
        assert!(game.board().is_fully_revealed());
        assert!(game.selected_squares().is_empty());
        assert!(game.celebrating_squares().is_empty());
        assert_eq!(state.unlocked_images().iter().filter(|&n| n == 7).count(), 1);
        assert_eq!(state.unlocked_images().len(), 1);

        assert_eq!(state.dispatch(Action::ToggleSquare(0), &mut rng), Outcome::NoChange);
    }

    #[test]
    fn mixed_mode_always_plays_to_completion() {
        let mut rng = rng();

        for board_size in [4, 6] {
            let config = GameConfig::new(OperationMode::All, 20, board_size, [2, 3, 9]);
            let mut state = GameState::new(config, UnlockedImages::default());
            assert_eq!(state.dispatch(Action::StartGame, &mut rng), Outcome::Changed);
            let image = state.game().unwrap().background().number;

            let mut outcome = Outcome::Changed;
            for _ in 0..usize::from(board_size).pow(2) {
                outcome = play_move(&mut state, &mut rng);
                if outcome == Outcome::Completed {
                    break;
                }
            }

            assert_eq!(outcome, Outcome::Completed);
            assert!(state.game().unwrap().board().is_fully_revealed());
            assert!(state.unlocked_images().contains(image));
        }
    }

    #[test]
    fn exhausted_generation_completes_the_session() {
        let mut rng = rng();
        let mut state = GameState::new(addition_config(4), UnlockedImages::default());
        let board = Board::from_values(2, &[1, 2, 3, 4]).unwrap();
        state.start_session(board, RewardImage::new(5), &mut rng);

        {
            let game = state.game.as_mut().unwrap();
            game.board.reveal(&[0]);
            game.celebrating_squares = smallvec![1, 2];
        }
        let session_id = state.game().unwrap().session_id();

        assert_eq!(
            state.dispatch(Action::RevealSquares(session_id), &mut rng),
            Outcome::Completed
        );
        let game = state.game().unwrap();
        assert!(game.is_complete());
        assert!(game.board().is_fully_revealed());
        assert!(state.unlocked_images().contains(5));
    }

    #[test]
    fn stale_reveal_is_ignored() {
        let mut rng = rng();
        let mut state = GameState::new(addition_config(4), UnlockedImages::default());
        state.dispatch(Action::StartGame, &mut rng);

        let answer = solve(state.game().unwrap());
        let mut outcome = Outcome::NoChange;
        for id in answer {
            outcome = state.dispatch(Action::ToggleSquare(id), &mut rng);
        }
        let Outcome::Celebrate(old_session) = outcome else {
            panic!("expected a celebration");
        };

        assert_eq!(state.dispatch(Action::RestartGame, &mut rng), Outcome::Changed);
        assert_eq!(
            state.dispatch(Action::RevealSquares(old_session), &mut rng),
            Outcome::NoChange
        );

        state.dispatch(Action::StartGame, &mut rng);
        let new_session = state.game().unwrap().session_id();
        assert_ne!(new_session, old_session);
        assert_eq!(
            state.dispatch(Action::RevealSquares(old_session), &mut rng),
            Outcome::NoChange
        );
        assert_eq!(state.game().unwrap().revealed_count(), 0);
    }

    #[test]
    fn reveal_without_celebration_is_a_no_op() {
        let mut rng = rng();
        let mut state = GameState::new(addition_config(4), UnlockedImages::default());
        state.dispatch(Action::StartGame, &mut rng);
        let session_id = state.game().unwrap().session_id();

        assert_eq!(
            state.dispatch(Action::RevealSquares(session_id), &mut rng),
            Outcome::NoChange
        );
    }

    #[test]
    fn exit_discards_the_session_but_keeps_config() {
        let mut rng = rng();
        let config = addition_config(8);
        let mut state = GameState::new(config.clone(), UnlockedImages::default());
        state.dispatch(Action::StartGame, &mut rng);

        assert_eq!(state.dispatch(Action::ExitToConfig, &mut rng), Outcome::Changed);
        assert_eq!(state.screen(), Screen::Config);
        assert!(state.game().is_none());
        assert_eq!(state.config(), &config);
        assert_eq!(state.dispatch(Action::ExitToConfig, &mut rng), Outcome::NoChange);
    }

    #[test]
    fn config_edits_apply_only_on_the_config_screen() {
        let mut rng = rng();
        let mut state = GameState::default();

        assert_eq!(
            state.dispatch(Action::SetMode(OperationMode::Subtraction), &mut rng),
            Outcome::Changed
        );
        assert_eq!(
            state.dispatch(Action::SetMode(OperationMode::Subtraction), &mut rng),
            Outcome::NoChange
        );
        assert_eq!(state.dispatch(Action::SetBoardSize(7), &mut rng), Outcome::Changed);
        assert_eq!(state.config().board_size, 8);
        assert_eq!(state.dispatch(Action::SetMaxNumber(500), &mut rng), Outcome::Changed);
        assert_eq!(state.config().max_number, NUMBER_RANGE_MAX);

        state.dispatch(Action::StartGame, &mut rng);
        assert_eq!(
            state.dispatch(Action::SetMode(OperationMode::Multiplication), &mut rng),
            Outcome::NoChange
        );
        assert_eq!(
            state.dispatch(Action::SetTimesTables(BTreeSet::new()), &mut rng),
            Outcome::NoChange
        );
        assert_eq!(state.config().mode, OperationMode::Subtraction);
        assert_eq!(state.game().unwrap().mode(), OperationMode::Subtraction);
    }

    #[test]
    fn reset_progress_leaves_the_session_alone() {
        let mut rng = rng();
        let unlocked: UnlockedImages = [1, 2, 3].into_iter().collect();
        let config = addition_config(4);
        let mut state = GameState::new(config.clone(), unlocked);
        state.dispatch(Action::StartGame, &mut rng);
        let board_before = state.game().unwrap().board().clone();

        assert_eq!(state.dispatch(Action::ResetProgress, &mut rng), Outcome::Changed);
        assert!(state.unlocked_images().is_empty());
        assert_eq!(state.game().unwrap().board(), &board_before);
        assert_eq!(state.config(), &config);
        assert_eq!(state.gallery().collected(), 0);

        assert_eq!(state.dispatch(Action::ResetProgress, &mut rng), Outcome::NoChange);
        assert!(state.unlocked_images().is_empty());
    }

    #[test]
    fn reduce_returns_the_next_state() {
        let mut rng = rng();
        let (state, outcome) = reduce(GameState::default(), Action::StartGame, &mut rng);

        assert_eq!(outcome, Outcome::Changed);
        assert_eq!(state.screen(), Screen::Playing);
        assert_eq!(state.game().unwrap().board().len(), 36);
    }
}
