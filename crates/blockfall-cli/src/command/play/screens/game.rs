use blockfall_engine::{GameSession, Leaderboard, SessionState, SubmitError, TickOutcome};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, error, info, warn};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout},
    style::{Modifier, Stylize as _},
    text::Line,
    widgets::Block,
};

use crate::{
    command::play::screens::LeaderboardScreen,
    storage::LeaderboardStore,
    tui::{RenderMode, Runtime, Screen, ScreenTransition},
    view::widgets::{
        KeyBinding, KeyBindingDisplay, MenuDisplay, NameEntry, SessionDisplay, color, style,
    },
};

const FPS: f64 = 60.0;
const MAX_NAME_LEN: usize = 16;

const MENU_ITEMS: &[&str] = &["Play", "High Scores", "Quit"];
const MENU_PLAY: usize = 0;
const MENU_HIGH_SCORES: usize = 1;
const MENU_QUIT: usize = 2;

const MENU_KEYS: &[KeyBinding] = &[
    (&["↑", "↓"], "Select"),
    (&["Enter"], "Confirm"),
    (&["Q"], "Quit"),
];
const PLAYING_KEYS: &[KeyBinding] = &[
    (&["←", "→"], "Move"),
    (&["↑"], "Rotate"),
    (&["↓"], "Soft Drop"),
    (&["P"], "Pause"),
    (&["R"], "Restart"),
    (&["Q"], "Quit"),
];
const PAUSED_KEYS: &[KeyBinding] = &[(&["P"], "Resume"), (&["R"], "Restart"), (&["Q"], "Quit")];
const NAME_ENTRY_KEYS: &[KeyBinding] = &[(&["Enter"], "Submit"), (&["Esc"], "Skip")];
const NO_SCORE_KEYS: &[KeyBinding] = &[(&["Enter", "Esc"], "Back to Menu")];

/// Main menu, play field and score submission for one [`GameSession`].
///
/// What is shown follows the session state: the menu in `MainMenu`, the
/// board while playing or paused, and a name prompt after game over.
#[derive(Debug)]
pub struct GameScreen {
    session: GameSession,
    store: LeaderboardStore,
    leaderboard: Leaderboard,
    menu_selected: usize,
    name: String,
    message: Option<String>,
}

impl GameScreen {
    pub fn new(session: GameSession, store: LeaderboardStore, leaderboard: Leaderboard) -> Self {
        Self {
            session,
            store,
            leaderboard,
            menu_selected: MENU_PLAY,
            name: String::new(),
            message: None,
        }
    }

    /// Hands the session's timer request to the runtime.
    fn sync_timer(&self, runtime: &mut Runtime) {
        runtime.set_tick_interval(self.session.tick_interval());
    }

    fn enter_game_over(&mut self) {
        let stats = self.session.stats();
        info!(
            "game over: score {}, level {}, lines {}, pieces {}",
            stats.score(),
            stats.level(),
            stats.total_cleared_lines(),
            stats.completed_pieces()
        );
        self.name.clear();
        self.message = (stats.score() == 0).then(|| "Nothing to record".to_owned());
    }

    fn back_to_menu(&mut self) {
        if let Err(e) = self.session.return_to_menu() {
            warn!("{e}");
        }
        self.name.clear();
    }

    fn handle_menu_key(&mut self, key: KeyEvent) -> ScreenTransition {
        self.message = None;
        match key.code {
            KeyCode::Up => {
                self.menu_selected = self
                    .menu_selected
                    .checked_sub(1)
                    .unwrap_or(MENU_ITEMS.len() - 1);
            }
            KeyCode::Down => self.menu_selected = (self.menu_selected + 1) % MENU_ITEMS.len(),
            KeyCode::Enter => match self.menu_selected {
                MENU_PLAY => {
                    if let Err(e) = self.session.start() {
                        warn!("{e}");
                    }
                }
                MENU_HIGH_SCORES => {
                    return ScreenTransition::Push(Box::new(LeaderboardScreen::new(
                        self.leaderboard.clone(),
                        None,
                    )));
                }
                MENU_QUIT => return ScreenTransition::Exit,
                _ => {}
            },
            KeyCode::Char('q') | KeyCode::Esc => return ScreenTransition::Exit,
            _ => {}
        }
        ScreenTransition::Stay
    }

    fn handle_play_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Down {
            if key.kind == KeyEventKind::Release {
                self.session.soft_drop(false);
            } else {
                self.session.soft_drop(true);
            }
            return;
        }
        if key.kind == KeyEventKind::Release {
            return;
        }

        // Without release events, any other key ends the soft drop.
        self.session.soft_drop(false);
        match key.code {
            KeyCode::Left => _ = self.session.move_left(),
            KeyCode::Right => _ = self.session.move_right(),
            KeyCode::Up => _ = self.session.rotate_clockwise(),
            KeyCode::Char('p') => {
                if let Err(e) = self.session.toggle_pause() {
                    warn!("{e}");
                }
            }
            KeyCode::Char('r') => {
                info!("restarting");
                self.session.restart();
            }
            KeyCode::Char('q') | KeyCode::Esc => match self.session.quit() {
                Ok(()) => self.enter_game_over(),
                Err(e) => warn!("{e}"),
            },
            _ => {}
        }
    }

    fn handle_name_key(&mut self, key: KeyEvent) -> ScreenTransition {
        if key.kind == KeyEventKind::Release {
            return ScreenTransition::Stay;
        }
        if self.session.stats().score() == 0 {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.back_to_menu();
                self.message = None;
            }
            return ScreenTransition::Stay;
        }

        if edit_name(&mut self.name, key) {
            return ScreenTransition::Stay;
        }
        match key.code {
            KeyCode::Enter => self.submit_score(),
            KeyCode::Esc => {
                debug!("score submission skipped");
                self.back_to_menu();
                self.message = None;
                ScreenTransition::Stay
            }
            _ => ScreenTransition::Stay,
        }
    }

    fn submit_score(&mut self) -> ScreenTransition {
        let score = self.session.stats().score();
        match self.leaderboard.submit(&self.name, score) {
            Ok(outcome) => {
                self.message = match self.store.save(&self.leaderboard) {
                    Ok(()) => None,
                    Err(e) => {
                        error!("{e:#}");
                        Some(format!("Failed to save high scores: {e}"))
                    }
                };
                self.back_to_menu();
                ScreenTransition::Push(Box::new(LeaderboardScreen::new(
                    self.leaderboard.clone(),
                    Some(outcome.rank()),
                )))
            }
            Err(SubmitError::EmptyName) => {
                self.message = Some("Enter a name".to_owned());
                ScreenTransition::Stay
            }
            Err(e @ SubmitError::ZeroScore) => {
                debug!("{e}");
                self.back_to_menu();
                ScreenTransition::Stay
            }
        }
    }

    fn draw_menu(&self, frame: &mut Frame) {
        let menu = MenuDisplay::new(MENU_ITEMS, self.menu_selected).block(
            Block::bordered()
                .title(Line::from("BLOCKFALL").centered())
                .border_style(color::WHITE)
                .style(style::DEFAULT),
        );
        let best = self.leaderboard.entries().first().map_or_else(
            || "No high scores yet".to_owned(),
            |best| format!("Best: {} by {}", best.score, best.player),
        );

        let [main_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());
        let [menu_area, best_area, message_area] = Layout::vertical([
            Constraint::Length(menu.height()),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .spacing(1)
        .flex(Flex::Center)
        .areas(main_area);
        let menu_area = menu_area.centered_horizontally(Constraint::Length(menu.width() + 4));

        frame.render_widget(menu, menu_area);
        frame.render_widget(Line::from(best).centered(), best_area);
        if let Some(message) = &self.message {
            frame.render_widget(
                Line::from(message.as_str())
                    .centered()
                    .fg(color::YELLOW)
                    .add_modifier(Modifier::BOLD),
                message_area,
            );
        }
        frame.render_widget(KeyBindingDisplay::new(MENU_KEYS), help_area);
    }

    fn draw_session(&self, frame: &mut Frame) {
        let state = self.session.state();
        let mut display = SessionDisplay::new(&self.session);
        if state.is_game_over() {
            display = display.name_entry(NameEntry {
                name: &self.name,
                message: self.message.as_deref(),
            });
        }
        let bindings = match state {
            SessionState::MainMenu => MENU_KEYS,
            SessionState::Playing => PLAYING_KEYS,
            SessionState::Paused => PAUSED_KEYS,
            SessionState::GameOver if self.session.stats().score() == 0 => NO_SCORE_KEYS,
            SessionState::GameOver => NAME_ENTRY_KEYS,
        };

        let [main_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());
        frame.render_widget(display, main_area);
        frame.render_widget(KeyBindingDisplay::new(bindings), help_area);
    }
}

/// Applies a text editing key to `name`. Returns whether the key was used.
fn edit_name(name: &mut String, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            if name.chars().count() < MAX_NAME_LEN {
                name.push(c);
            }
            true
        }
        KeyCode::Backspace => {
            name.pop();
            true
        }
        _ => false,
    }
}

impl Screen for GameScreen {
    fn on_active(&mut self, runtime: &mut Runtime) {
        runtime.set_render_mode(RenderMode::throttled_from_rate(FPS));
        self.sync_timer(runtime);
    }

    fn on_inactive(&mut self, runtime: &mut Runtime) {
        runtime.set_tick_interval(None);
    }

    fn on_close(&mut self, _runtime: &mut Runtime) {
        debug!("closing in the {} state", self.session.state());
    }

    fn handle_event(&mut self, runtime: &mut Runtime, event: &Event) -> ScreenTransition {
        let Some(key) = event.as_key_event() else {
            return ScreenTransition::Stay;
        };
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return ScreenTransition::Exit;
        }

        let transition = match self.session.state() {
            SessionState::MainMenu if key.kind == KeyEventKind::Release => ScreenTransition::Stay,
            SessionState::MainMenu => self.handle_menu_key(key),
            SessionState::Playing | SessionState::Paused => {
                self.handle_play_key(key);
                ScreenTransition::Stay
            }
            SessionState::GameOver => self.handle_name_key(key),
        };
        self.sync_timer(runtime);
        transition
    }

    fn update(&mut self, runtime: &mut Runtime) {
        match self.session.tick() {
            TickOutcome::GameOver(_) => self.enter_game_over(),
            TickOutcome::Locked(result) if result.leveled_up => {
                info!("level {}", self.session.stats().level());
            }
            TickOutcome::Idle | TickOutcome::Fell | TickOutcome::Locked(_) => {}
        }
        self.sync_timer(runtime);
    }

    fn draw(&self, frame: &mut Frame) {
        if self.session.state().is_main_menu() {
            self.draw_menu(frame);
        } else {
            self.draw_session(frame);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime};

    use blockfall_engine::{EngineConfig, PieceSeed};
    use crossterm::event::KeyEventState;
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    fn screen() -> GameScreen {
        let nanos = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("blockfall-screen-{nanos}"));
        let session =
            GameSession::with_seed(EngineConfig::default(), PieceSeed::from_bytes([7; 16]))
                .unwrap();
        GameScreen::new(session, LeaderboardStore::new(&dir), Leaderboard::new())
    }

    fn event(code: KeyCode, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    fn press(screen: &mut GameScreen, runtime: &mut Runtime, code: KeyCode) -> ScreenTransition {
        screen.handle_event(runtime, &event(code, KeyEventKind::Press))
    }

    fn rendered_text(screen: &GameScreen) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|frame| screen.draw(frame)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_menu_navigation_wraps() {
        let mut screen = screen();
        let mut runtime = Runtime::new();
        press(&mut screen, &mut runtime, KeyCode::Up);
        assert_eq!(screen.menu_selected, MENU_QUIT);
        press(&mut screen, &mut runtime, KeyCode::Down);
        assert_eq!(screen.menu_selected, MENU_PLAY);
        press(&mut screen, &mut runtime, KeyCode::Down);
        assert_eq!(screen.menu_selected, MENU_HIGH_SCORES);

        let transition = press(&mut screen, &mut runtime, KeyCode::Enter);
        assert!(matches!(transition, ScreenTransition::Push(_)));
        assert!(screen.session.state().is_main_menu());

        press(&mut screen, &mut runtime, KeyCode::Down);
        let transition = press(&mut screen, &mut runtime, KeyCode::Enter);
        assert!(matches!(transition, ScreenTransition::Exit));
    }

    #[test]
    fn test_play_pause_and_quit() {
        let mut screen = screen();
        let mut runtime = Runtime::new();
        press(&mut screen, &mut runtime, KeyCode::Enter);
        assert!(screen.session.state().is_playing());
        assert!(rendered_text(&screen).contains("STATS"));

        press(&mut screen, &mut runtime, KeyCode::Char('p'));
        assert!(screen.session.state().is_paused());
        assert!(rendered_text(&screen).contains("PAUSED"));
        press(&mut screen, &mut runtime, KeyCode::Char('p'));
        assert!(screen.session.state().is_playing());

        press(&mut screen, &mut runtime, KeyCode::Char('q'));
        assert!(screen.session.state().is_game_over());
        assert!(rendered_text(&screen).contains("GAME OVER!!"));
        assert_eq!(screen.message.as_deref(), Some("Nothing to record"));

        // A zero score is not recorded; Enter goes straight back.
        let transition = press(&mut screen, &mut runtime, KeyCode::Enter);
        assert!(matches!(transition, ScreenTransition::Stay));
        assert!(screen.session.state().is_main_menu());
        assert!(screen.leaderboard.is_empty());
        assert!(rendered_text(&screen).contains("BLOCKFALL"));
    }

    #[test]
    fn test_soft_drop_follows_down_key() {
        let mut screen = screen();
        let mut runtime = Runtime::new();
        press(&mut screen, &mut runtime, KeyCode::Enter);
        let fall = screen.session.tick_interval();
        assert_eq!(fall, Some(Duration::from_secs(1)));

        press(&mut screen, &mut runtime, KeyCode::Down);
        assert!(screen.session.is_soft_dropping());
        assert_eq!(
            screen.session.tick_interval(),
            Some(Duration::from_millis(100))
        );

        screen.handle_event(&mut runtime, &event(KeyCode::Down, KeyEventKind::Release));
        assert!(!screen.session.is_soft_dropping());
        assert_eq!(screen.session.tick_interval(), fall);

        // Terminals without release events: any other key ends it.
        press(&mut screen, &mut runtime, KeyCode::Down);
        press(&mut screen, &mut runtime, KeyCode::Left);
        assert!(!screen.session.is_soft_dropping());
    }

    #[test]
    fn test_ticks_move_the_piece() {
        let mut screen = screen();
        let mut runtime = Runtime::new();
        screen.update(&mut runtime);
        assert!(screen.session.state().is_main_menu());

        press(&mut screen, &mut runtime, KeyCode::Enter);
        let y = screen.session.falling_piece().position().y;
        screen.update(&mut runtime);
        assert_eq!(screen.session.falling_piece().position().y, y + 1);
        assert_eq!(screen.session.play_time(), Duration::from_secs(1));
    }

    #[test]
    fn test_edit_name() {
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);
        let mut name = String::new();
        for c in "ann".chars() {
            assert!(edit_name(&mut name, key(KeyCode::Char(c))));
        }
        assert!(edit_name(&mut name, key(KeyCode::Backspace)));
        assert_eq!(name, "an");

        assert!(!edit_name(&mut name, key(KeyCode::Enter)));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(!edit_name(&mut name, ctrl_c));
        assert_eq!(name, "an");

        for _ in 0..20 {
            edit_name(&mut name, key(KeyCode::Char('x')));
        }
        assert_eq!(name.chars().count(), MAX_NAME_LEN);
    }

    #[test]
    fn test_zero_score_skips_name_entry() {
        let mut screen = screen();
        let mut runtime = Runtime::new();
        press(&mut screen, &mut runtime, KeyCode::Enter);
        press(&mut screen, &mut runtime, KeyCode::Char('q'));

        press(&mut screen, &mut runtime, KeyCode::Char('a'));
        assert_eq!(screen.name, "");
        assert!(screen.session.state().is_game_over());

        press(&mut screen, &mut runtime, KeyCode::Esc);
        assert!(screen.session.state().is_main_menu());
        assert_eq!(screen.message, None);
    }
}
