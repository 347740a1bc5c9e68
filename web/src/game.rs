use crate::utils::*;
use clap::Args;
use gloo::timers::callback::Timeout;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use square_fruit_core as game;
use game::{Action, BoardArrangement, Number, OperationMode, Outcome, SessionId, SquareId};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

/// How long correct squares celebrate before they are revealed.
const CELEBRATION_DELAY_MS: u32 = 1_000;
const NOTICE_DURATION_MS: u32 = 2_500;

const MODES: [(OperationMode, &str, &str); 4] = [
    (OperationMode::Addition, "addition", "Addition (+)"),
    (OperationMode::Subtraction, "subtraction", "Subtraction (-)"),
    (OperationMode::Multiplication, "multiplication", "Multiplication (×)"),
    (OperationMode::All, "all", "All of them!"),
];

const ARRANGEMENTS: [(BoardArrangement, &str, &str); 3] = [
    (BoardArrangement::Unsorted, "unsorted", "Shuffled"),
    (BoardArrangement::SortedWhenLarge, "sortedWhenLarge", "Sorted on big boards"),
    (BoardArrangement::Sorted, "sorted", "Always sorted"),
];

fn mode_from_value(value: &str) -> Option<OperationMode> {
    MODES
        .iter()
        .find(|(_, name, _)| *name == value)
        .map(|&(mode, _, _)| mode)
}

fn arrangement_from_value(value: &str) -> Option<BoardArrangement> {
    ARRANGEMENTS
        .iter()
        .find(|(_, name, _)| *name == value)
        .map(|&(arrangement, _, _)| arrangement)
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum ViewSquareState {
    Hidden,
    Selected,
    Celebrating,
    Revealed,
}

fn square_state(game: &game::ActiveGame, square: &game::Square) -> ViewSquareState {
    let id = square.id();
    if square.is_revealed() {
        ViewSquareState::Revealed
    } else if game.is_celebrating(id) {
        ViewSquareState::Celebrating
    } else if game.is_selected(id) {
        ViewSquareState::Selected
    } else {
        ViewSquareState::Hidden
    }
}

/// The gallery belongs to the config screen.
fn shows_gallery(state: &game::GameState) -> bool {
    state.screen() == game::Screen::Config
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum Notice {
    TryAgain,
    MissingTimesTables,
}

impl Notice {
    const fn message(self) -> &'static str {
        use Notice::*;
        match self {
            TryAgain => "Oops! That's not quite right. Try again!",
            MissingTimesTables => "Please select at least one times table to practice!",
        }
    }

    fn from_outcome(outcome: Outcome) -> Option<Self> {
        match outcome {
            Outcome::TryAgain => Some(Self::TryAgain),
            Outcome::Rejected(game::GameError::MissingTimesTables) => {
                Some(Self::MissingTimesTables)
            }
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Dispatch(Action),
    ClearNotice,
}

#[derive(Properties, Clone, PartialEq)]
struct SquareProps {
    id: SquareId,
    value: Number,
    square_state: ViewSquareState,
    #[prop_or_default]
    locked: bool,
    callback: Callback<SquareId>,
}

#[function_component(SquareView)]
fn square_component(props: &SquareProps) -> Html {
    use ViewSquareState::*;

    let SquareProps {
        id,
        value,
        square_state,
        locked,
        callback,
    } = props.clone();

    let mut class = classes!(
        "square",
        match square_state {
            Hidden => classes!(),
            Selected => classes!("selected"),
            Celebrating => classes!("selected", "celebrating"),
            Revealed => classes!("revealed"),
        }
    );
    if locked {
        class.push("locked");
    }

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("square {id} clicked");
        callback.emit(id);
    });

    html! {
        <td {class} {onclick}>
            if square_state != Revealed {
                {value}
            }
        </td>
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    pub seed: Option<u64>,
}

pub(crate) struct GameView {
    state: game::GameState,
    persistence: game::Persistence<LocalStore>,
    rng: SmallRng,
    notice: Option<Notice>,
    pending_reveal: Option<Timeout>,
    notice_timeout: Option<Timeout>,
}

impl GameView {
    fn schedule_reveal(&mut self, ctx: &Context<Self>, session_id: SessionId) {
        let link = ctx.link().clone();
        self.pending_reveal = Some(Timeout::new(CELEBRATION_DELAY_MS, move || {
            link.send_message(Msg::Dispatch(Action::RevealSquares(session_id)))
        }));
    }

    fn show_notice(&mut self, ctx: &Context<Self>, notice: Notice) {
        log::debug!("notice: {notice:?}");
        let link = ctx.link().clone();
        self.notice = Some(notice);
        self.notice_timeout = Some(Timeout::new(NOTICE_DURATION_MS, move || {
            link.send_message(Msg::ClearNotice)
        }));
    }

    fn dispatch(&mut self, ctx: &Context<Self>, action: Action) -> bool {
        match action {
            Action::ExitToConfig | Action::RestartGame => {
                if self.pending_reveal.take().is_some() {
                    log::debug!("pending reveal cancelled");
                }
            }
            Action::RevealSquares(_) => {
                self.pending_reveal = None;
            }
            _ => {}
        }

        log::trace!("dispatch: {action:?}");
        let outcome = self.state.dispatch(action, &mut self.rng);
        log::trace!("outcome: {outcome:?}");

        if let Outcome::Celebrate(session_id) = outcome {
            self.schedule_reveal(ctx, session_id);
        }
        let notice = Notice::from_outcome(outcome);
        if let Some(notice) = notice {
            self.show_notice(ctx, notice);
        }

        if outcome.has_update() {
            if let Err(err) = self.persistence.observe(&self.state) {
                log::error!("Could not persist game state: {err}");
            }
        }
        outcome.has_update() || notice.is_some()
    }

    fn view_config(&self, ctx: &Context<Self>) -> Html {
        let config = self.state.config();

        let cb_mode = ctx.link().batch_callback(|e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            mode_from_value(&select.value()).map(|mode| Msg::Dispatch(Action::SetMode(mode)))
        });
        let cb_max_number = ctx.link().batch_callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            input
                .value()
                .parse()
                .ok()
                .map(|max_number| Msg::Dispatch(Action::SetMaxNumber(max_number)))
        });
        let cb_board_size = ctx.link().batch_callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            input
                .value()
                .parse()
                .ok()
                .map(|board_size| Msg::Dispatch(Action::SetBoardSize(board_size)))
        });
        let cb_arrangement = ctx.link().batch_callback(|e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            arrangement_from_value(&select.value())
                .map(|arrangement| Msg::Dispatch(Action::SetArrangement(arrangement)))
        });
        let cb_start = ctx.link().callback(|_| Msg::Dispatch(Action::StartGame));

        html! {
            <section class="config">
                <h1>{"Square Fruit"}</h1>
                <label>
                    {"Operation"}
                    <select onchange={cb_mode}>
                        {
                            for MODES.iter().map(|&(mode, value, label)| html! {
                                <option {value} selected={config.mode == mode}>{label}</option>
                            })
                        }
                    </select>
                </label>
                if config.mode.needs_times_tables() {
                    <fieldset class="times-tables">
                        <legend>{"Times tables"}</legend>
                        {
                            for (game::TIMES_TABLE_MIN..=game::TIMES_TABLE_MAX).map(|table| {
                                let mut tables = config.selected_times_tables.clone();
                                let checked = !tables.insert(table);
                                if checked {
                                    tables.remove(&table);
                                }
                                let onclick = ctx.link().callback(move |_: MouseEvent| {
                                    Msg::Dispatch(Action::SetTimesTables(tables.clone()))
                                });
                                html! {
                                    <label>
                                        <input type="checkbox" {checked} {onclick}/>
                                        {table}
                                    </label>
                                }
                            })
                        }
                    </fieldset>
                }
                <label>
                    {format!("Numbers up to {}", config.max_number)}
                    <input
                        type="range"
                        min={game::NUMBER_RANGE_MIN.to_string()}
                        max={game::NUMBER_RANGE_MAX.to_string()}
                        value={config.max_number.to_string()}
                        oninput={cb_max_number}
                    />
                </label>
                <label>
                    {format!("Board {0}×{0}", config.board_size)}
                    <input
                        type="range"
                        min={game::BOARD_SIZE_MIN.to_string()}
                        max={game::BOARD_SIZE_MAX.to_string()}
                        step={game::BOARD_SIZE_STEP.to_string()}
                        value={config.board_size.to_string()}
                        oninput={cb_board_size}
                    />
                </label>
                <label>
                    {"Board layout"}
                    <select onchange={cb_arrangement}>
                        {
                            for ARRANGEMENTS.iter().map(|&(arrangement, value, label)| html! {
                                <option {value} selected={config.arrangement == arrangement}>{label}</option>
                            })
                        }
                    </select>
                </label>
                <button onclick={cb_start}>{"Start"}</button>
            </section>
        }
    }

    fn view_board(&self, ctx: &Context<Self>, game: &game::ActiveGame) -> Html {
        let cb_exit = ctx.link().callback(|_| Msg::Dispatch(Action::ExitToConfig));
        let cb_restart = ctx.link().callback(|_| Msg::Dispatch(Action::RestartGame));
        let callback = ctx
            .link()
            .callback(|id| Msg::Dispatch(Action::ToggleSquare(id)));
        let locked = game.is_complete() || !game.celebrating_squares().is_empty();
        let background = format!("background-image: url({})", game.background().url);

        html! {
            <section class="board">
                <aside>
                    if game.is_complete() {
                        <h2>{"You Did It!"}</h2>
                        <button onclick={cb_restart}>{"Play Again"}</button>
                    } else {
                        <button onclick={cb_exit}>{"Exit"}</button>
                        {{
                            let equation = game::Equation::from_game(game);
                            html! {
                                <>
                                    <p class="equation">{equation.to_string()}</p>
                                    <small>{equation.prompt()}</small>
                                </>
                            }
                        }}
                        <p>{format!("{} squares left", game.remaining_count())}</p>
                    }
                </aside>
                <table class={classes!((!locked).then_some("playable"))} style={background}>
                    {
                        for game.board().rows().map(|row| html! {
                            <tr>
                                {
                                    for row.map(|square| {
                                        let square_state = square_state(game, square);
                                        html! {
                                            <SquareView
                                                id={square.id()}
                                                value={square.value()}
                                                {square_state}
                                                {locked}
                                                callback={callback.clone()}
                                            />
                                        }
                                    })
                                }
                            </tr>
                        })
                    }
                </table>
            </section>
        }
    }

    fn view_gallery(&self, ctx: &Context<Self>) -> Html {
        let gallery = self.state.gallery();
        let cb_reset = ctx.link().callback(|_| Msg::Dispatch(Action::ResetProgress));

        html! {
            <section class="gallery">
                <h2>{"Reward Gallery"}</h2>
                <p>{format!("{} / {} collected", gallery.collected(), gallery.total())}</p>
                <ul>
                    {
                        for gallery.entries().iter().map(|entry| match entry.image() {
                            Some(image) => html! {
                                <li><img src={image.url} alt={format!("Reward {}", image.number)}/></li>
                            },
                            None => html! { <li class="locked">{"?"}</li> },
                        })
                    }
                </ul>
                <button onclick={cb_reset} disabled={gallery.collected() == 0}>{"Reset progress"}</button>
            </section>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let mut persistence = game::Persistence::new(LocalStore);
        let state = persistence.load_state();
        let seed = ctx.props().seed.unwrap_or_else(js_random_seed);

        Self {
            state,
            persistence,
            rng: SmallRng::seed_from_u64(seed),
            notice: None,
            pending_reveal: None,
            notice_timeout: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Dispatch(action) => self.dispatch(ctx, action),
            ClearNotice => {
                self.notice_timeout = None;
                self.notice.take().is_some()
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="square-fruit">
                if let Some(notice) = self.notice {
                    <p class="notice" role="alert">{notice.message()}</p>
                }
                {
                    match self.state.game() {
                        Some(game) => self.view_board(ctx, game),
                        None => self.view_config(ctx),
                    }
                }
                if shows_gallery(&self.state) {
                    {self.view_gallery(ctx)}
                }
            </div>
        }
    }
}
