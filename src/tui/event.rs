use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::app::Result;
use crate::pipeline::ViewKind;

pub enum AppEvent {
    Key(KeyEvent),
    Tick,
}

pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    pub fn next(&self) -> Result<AppEvent> {
        if event::poll(self.tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(AppEvent::Key(key));
                }
            }
        }
        Ok(AppEvent::Tick)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ScrollUp,
    ScrollDown,
    NextPage,
    PrevPage,
    NextView,
    PrevView,
    Show(ViewKind),
    Refresh,
    None,
}

impl From<KeyEvent> for Action {
    fn from(key: KeyEvent) -> Self {
        match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
            KeyCode::Char('j') | KeyCode::Down => Action::ScrollDown,
            KeyCode::Char('k') | KeyCode::Up => Action::ScrollUp,
            KeyCode::Char('n') | KeyCode::PageDown => Action::NextPage,
            KeyCode::Char('p') | KeyCode::PageUp => Action::PrevPage,
            KeyCode::Tab => Action::NextView,
            KeyCode::BackTab => Action::PrevView,
            KeyCode::Char('1') => Action::Show(ViewKind::Feed),
            KeyCode::Char('2') => Action::Show(ViewKind::TopUsers),
            KeyCode::Char('3') => Action::Show(ViewKind::Trending),
            KeyCode::Char('R') | KeyCode::Char('r') => Action::Refresh,
            _ => Action::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(Action::from(key(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(Action::from(key(KeyCode::Tab)), Action::NextView);
        assert_eq!(Action::from(key(KeyCode::Char('3'))), Action::Show(ViewKind::Trending));
        assert_eq!(Action::from(key(KeyCode::Char('R'))), Action::Refresh);
        assert_eq!(Action::from(key(KeyCode::Char('x'))), Action::None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(Action::from(ctrl_c), Action::Quit);
        assert_eq!(Action::from(key(KeyCode::Char('c'))), Action::None);
    }
}
