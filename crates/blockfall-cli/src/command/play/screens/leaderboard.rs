use blockfall_engine::Leaderboard;
use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    text::Line,
    widgets::Block,
};

use crate::{
    tui::{Runtime, Screen, ScreenTransition},
    view::widgets::{KeyBinding, KeyBindingDisplay, LeaderboardDisplay, style},
};

const KEY_BINDINGS: &[KeyBinding] = &[(&["Enter", "Esc", "Q"], "Back")];

/// Read-only view of the high scores.
#[derive(Debug)]
pub struct LeaderboardScreen {
    leaderboard: Leaderboard,
    highlight: Option<usize>,
}

impl LeaderboardScreen {
    /// Shows `leaderboard`, highlighting the entry at `highlight` if any.
    pub fn new(leaderboard: Leaderboard, highlight: Option<usize>) -> Self {
        Self {
            leaderboard,
            highlight,
        }
    }
}

impl Screen for LeaderboardScreen {
    fn on_active(&mut self, runtime: &mut Runtime) {
        runtime.set_tick_interval(None);
    }

    fn on_inactive(&mut self, _runtime: &mut Runtime) {}

    fn on_close(&mut self, _runtime: &mut Runtime) {}

    fn handle_event(&mut self, _runtime: &mut Runtime, event: &Event) -> ScreenTransition {
        let Some(key) = event.as_key_event() else {
            return ScreenTransition::Stay;
        };
        if key.kind == KeyEventKind::Release {
            return ScreenTransition::Stay;
        }
        match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q') => ScreenTransition::Pop,
            _ => ScreenTransition::Stay,
        }
    }

    fn update(&mut self, _runtime: &mut Runtime) {}

    fn draw(&self, frame: &mut Frame) {
        let display = LeaderboardDisplay::new(&self.leaderboard)
            .highlight(self.highlight)
            .block(
                Block::bordered()
                    .title(Line::from("HIGH SCORES").centered())
                    .style(style::DEFAULT),
            );
        let rows = self.leaderboard.len().clamp(1, 20);
        let height = u16::try_from(rows).unwrap_or(20) + 2;

        let [main_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());
        let table_area = main_area.centered(
            Constraint::Length(display.width()),
            Constraint::Length(height),
        );
        frame.render_widget(display, table_area);
        frame.render_widget(KeyBindingDisplay::new(KEY_BINDINGS), help_area);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyEventState, KeyModifiers};

    use super::*;

    fn key(code: KeyCode, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn test_back_keys_pop() {
        let mut screen = LeaderboardScreen::new(Leaderboard::new(), None);
        let mut runtime = Runtime::new();
        for code in [KeyCode::Enter, KeyCode::Esc, KeyCode::Char('q')] {
            let transition = screen.handle_event(&mut runtime, &key(code, KeyEventKind::Press));
            assert!(matches!(transition, ScreenTransition::Pop));
        }
        let transition =
            screen.handle_event(&mut runtime, &key(KeyCode::Enter, KeyEventKind::Release));
        assert!(matches!(transition, ScreenTransition::Stay));
        let transition =
            screen.handle_event(&mut runtime, &key(KeyCode::Left, KeyEventKind::Press));
        assert!(matches!(transition, ScreenTransition::Stay));
    }
}
