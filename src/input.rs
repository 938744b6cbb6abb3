//! Key handling: maps terminal key presses to game commands
//!
//! Holding a key relies on the terminal's own key repeat.

use blockfall::Action;
use blockfall::settings::Settings;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press asks the front end to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Game(Action),
    Quit,
}

/// Key bindings configuration - supports multiple keys per action
#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub move_left: Vec<KeyCode>,
    pub move_right: Vec<KeyCode>,
    pub soft_drop: Vec<KeyCode>,
    pub hard_drop: Vec<KeyCode>,
    pub rotate_cw: Vec<KeyCode>,
    pub rotate_ccw: Vec<KeyCode>,
    pub pause: Vec<KeyCode>,
    pub restart: Vec<KeyCode>,
    pub quit: Vec<KeyCode>,
}

impl KeyBindings {
    /// Parse a key string into KeyCode
    fn parse_key(s: &str) -> Option<KeyCode> {
        let lower = s.to_lowercase();
        let code = match lower.as_str() {
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "space" => KeyCode::Char(' '),
            "enter" => KeyCode::Enter,
            "tab" => KeyCode::Tab,
            "esc" | "escape" => KeyCode::Esc,
            _ => {
                let mut chars = lower.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return None,
                }
            }
        };
        Some(code)
    }

    /// Parse a list of key strings into KeyCodes, skipping unknown names
    fn parse_keys(keys: &[String]) -> Vec<KeyCode> {
        keys.iter()
            .filter_map(|s| {
                let code = Self::parse_key(s);
                if code.is_none() {
                    tracing::warn!("Unknown key name in settings: {:?}", s);
                }
                code
            })
            .collect()
    }

    /// Create keybindings from settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            move_left: Self::parse_keys(&settings.keys.move_left),
            move_right: Self::parse_keys(&settings.keys.move_right),
            soft_drop: Self::parse_keys(&settings.keys.soft_drop),
            hard_drop: Self::parse_keys(&settings.keys.hard_drop),
            rotate_cw: Self::parse_keys(&settings.keys.rotate_cw),
            rotate_ccw: Self::parse_keys(&settings.keys.rotate_ccw),
            pause: Self::parse_keys(&settings.keys.pause),
            restart: Self::parse_keys(&settings.keys.restart),
            quit: Self::parse_keys(&settings.keys.quit),
        }
    }

    /// Look up the command bound to a key press
    pub fn command_for(&self, key: KeyEvent) -> Option<Command> {
        // Handle Ctrl+C for quit
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Command::Quit);
        }

        let code = normalize_key(key.code);
        let table = [
            (&self.move_left, Command::Game(Action::MoveLeft)),
            (&self.move_right, Command::Game(Action::MoveRight)),
            (&self.soft_drop, Command::Game(Action::SoftDrop)),
            (&self.hard_drop, Command::Game(Action::HardDrop)),
            (&self.rotate_cw, Command::Game(Action::RotateCw)),
            (&self.rotate_ccw, Command::Game(Action::RotateCcw)),
            (&self.pause, Command::Game(Action::TogglePause)),
            (&self.restart, Command::Game(Action::Restart)),
            (&self.quit, Command::Quit),
        ];
        table
            .into_iter()
            .find(|(keys, _)| keys.contains(&code))
            .map(|(_, command)| command)
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Normalize key codes for consistent handling
fn normalize_key(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_default_bindings() {
        let keys = KeyBindings::default();
        assert_eq!(
            keys.command_for(press(KeyCode::Left)),
            Some(Command::Game(Action::MoveLeft))
        );
        assert_eq!(
            keys.command_for(press(KeyCode::Char(' '))),
            Some(Command::Game(Action::HardDrop))
        );
        assert_eq!(
            keys.command_for(press(KeyCode::Char('x'))),
            Some(Command::Game(Action::RotateCw))
        );
        assert_eq!(
            keys.command_for(press(KeyCode::Char('r'))),
            Some(Command::Game(Action::Restart))
        );
        assert_eq!(keys.command_for(press(KeyCode::Esc)), Some(Command::Quit));
        assert_eq!(keys.command_for(press(KeyCode::Char('m'))), None);
    }

    #[test]
    fn test_letters_are_case_insensitive() {
        let keys = KeyBindings::default();
        assert_eq!(
            keys.command_for(press(KeyCode::Char('Z'))),
            Some(Command::Game(Action::RotateCcw))
        );
    }

    #[test]
    fn test_ctrl_c_quits() {
        let keys = KeyBindings::default();
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(keys.command_for(event), Some(Command::Quit));
    }

    #[test]
    fn test_unknown_names_are_skipped() {
        assert_eq!(KeyBindings::parse_key("PageUp"), None);
        assert_eq!(KeyBindings::parse_key("A"), Some(KeyCode::Char('a')));
        assert_eq!(
            KeyBindings::parse_keys(&["bogus".to_string(), "Down".to_string()]),
            vec![KeyCode::Down]
        );
    }
}
