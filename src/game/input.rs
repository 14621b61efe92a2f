use std::collections::HashMap;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::command::{Direction, PaddleCommand};
use super::state::Side;
use crate::config::{ConfigError, KeyBindings};

/// Something the player asked for this frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputAction {
    Quit,
    Start,
    Stop,
    Paddle(PaddleCommand),
    /// Terminal was resized to (columns, rows)
    Resize(u16, u16),
}

/// What a bound key does
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Binding {
    Paddle(Side, Direction),
    Start,
    Stop,
    Quit,
}

/// Key bindings resolved to crossterm key codes
#[derive(Clone, Debug)]
pub struct Controls {
    keys: HashMap<KeyCode, Binding>,
}

impl Controls {
    pub fn from_bindings(bindings: &KeyBindings) -> Result<Self, ConfigError> {
        let entries = [
            (&bindings.left_paddle_up, Binding::Paddle(Side::Left, Direction::Up)),
            (&bindings.left_paddle_down, Binding::Paddle(Side::Left, Direction::Down)),
            (&bindings.right_paddle_up, Binding::Paddle(Side::Right, Direction::Up)),
            (&bindings.right_paddle_down, Binding::Paddle(Side::Right, Direction::Down)),
            (&bindings.start, Binding::Start),
            (&bindings.stop, Binding::Stop),
            (&bindings.quit, Binding::Quit),
        ];

        let mut keys = HashMap::new();
        for (name, binding) in entries {
            let code = parse_key(name).ok_or_else(|| ConfigError::UnknownKey(name.clone()))?;
            if keys.insert(code, binding).is_some() {
                return Err(ConfigError::DuplicateKey(name.clone()));
            }
        }
        Ok(Self { keys })
    }

    pub fn lookup(&self, code: KeyCode) -> Option<Binding> {
        self.keys.get(&normalize(code)).copied()
    }
}

impl Default for Controls {
    fn default() -> Self {
        // Default bindings always parse
        Self::from_bindings(&KeyBindings::default()).unwrap_or(Self {
            keys: HashMap::new(),
        })
    }
}

/// Parse a key name from the config file.
///
/// Accepts "Up", "Down", "Left", "Right", "Enter", "Esc", "Space", "Tab",
/// "Backspace" (any case) or a single character. Characters are case
/// insensitive.
pub fn parse_key(name: &str) -> Option<KeyCode> {
    let trimmed = name.trim();
    let mut chars = trimmed.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(normalize(KeyCode::Char(c)));
    }

    match trimmed.to_ascii_lowercase().as_str() {
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "left" => Some(KeyCode::Left),
        "right" => Some(KeyCode::Right),
        "enter" | "return" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "space" => Some(KeyCode::Char(' ')),
        "tab" => Some(KeyCode::Tab),
        "backspace" => Some(KeyCode::Backspace),
        _ => None,
    }
}

fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

/// Turns key events into paddle press/release commands.
///
/// Terminals that report key releases give exact hold times. Everywhere else
/// a key stays held while press or repeat events keep arriving and is
/// released once none has been seen for `hold`.
#[derive(Debug)]
pub struct KeyTracker {
    release_events: bool,
    hold: Duration,
    held: HashMap<(Side, Direction), Instant>,
}

impl KeyTracker {
    pub fn new(release_events: bool, hold: Duration) -> Self {
        Self {
            release_events,
            hold,
            held: HashMap::new(),
        }
    }

    pub fn handle_key(&mut self, controls: &Controls, key: KeyEvent, now: Instant) -> Option<InputAction> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return (key.kind == KeyEventKind::Press).then_some(InputAction::Quit);
        }

        let is_press = key.kind == KeyEventKind::Press || key.kind == KeyEventKind::Repeat;
        let is_release = key.kind == KeyEventKind::Release;

        match controls.lookup(key.code)? {
            Binding::Paddle(side, direction) => {
                if is_press {
                    let newly_held = self.held.insert((side, direction), now).is_none();
                    newly_held.then(|| InputAction::Paddle(PaddleCommand::press(side, direction)))
                } else if is_release && self.held.remove(&(side, direction)).is_some() {
                    Some(InputAction::Paddle(PaddleCommand::release(side, direction)))
                } else {
                    None
                }
            }
            Binding::Start if key.kind == KeyEventKind::Press => Some(InputAction::Start),
            Binding::Stop if key.kind == KeyEventKind::Press => Some(InputAction::Stop),
            Binding::Quit if key.kind == KeyEventKind::Press => Some(InputAction::Quit),
            _ => None,
        }
    }

    /// Release keys whose repeats stopped arriving. Does nothing when the
    /// terminal reports releases itself.
    pub fn expire(&mut self, now: Instant) -> Vec<PaddleCommand> {
        if self.release_events {
            return Vec::new();
        }

        let hold = self.hold;
        let mut expired: Vec<(Side, Direction)> = self
            .held
            .iter()
            .filter(|(_, seen)| now.saturating_duration_since(**seen) >= hold)
            .map(|(key, _)| *key)
            .collect();
        expired.sort_by_key(|(side, direction)| (*side as u8, *direction as u8));

        expired
            .into_iter()
            .map(|(side, direction)| {
                self.held.remove(&(side, direction));
                PaddleCommand::release(side, direction)
            })
            .collect()
    }

    /// Forget every held key, e.g. when a match restarts
    pub fn clear(&mut self) {
        self.held.clear();
    }
}

/// Drain pending terminal events without blocking and map them to actions
pub fn poll_input(controls: &Controls, tracker: &mut KeyTracker) -> Result<Vec<InputAction>, std::io::Error> {
    let mut actions = Vec::new();
    let now = Instant::now();

    while event::poll(Duration::from_millis(0))? {
        match event::read()? {
            Event::Key(key) => {
                if let Some(action) = tracker.handle_key(controls, key, now) {
                    actions.push(action);
                }
            }
            Event::Resize(columns, rows) => actions.push(InputAction::Resize(columns, rows)),
            _ => {}
        }
    }

    actions.extend(tracker.expire(now).into_iter().map(InputAction::Paddle));
    Ok(actions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_parse_key_names() {
        assert_eq!(parse_key("W"), Some(KeyCode::Char('w')));
        assert_eq!(parse_key("s"), Some(KeyCode::Char('s')));
        assert_eq!(parse_key("Up"), Some(KeyCode::Up));
        assert_eq!(parse_key("DOWN"), Some(KeyCode::Down));
        assert_eq!(parse_key("Space"), Some(KeyCode::Char(' ')));
        assert_eq!(parse_key("Esc"), Some(KeyCode::Esc));
        assert_eq!(parse_key("PageUp"), None);
        assert_eq!(parse_key(""), None);
    }

    #[test]
    fn test_unknown_binding_is_rejected() {
        let bindings = KeyBindings {
            start: "Hyper".to_string(),
            ..KeyBindings::default()
        };
        assert!(matches!(
            Controls::from_bindings(&bindings),
            Err(ConfigError::UnknownKey(name)) if name == "Hyper"
        ));
    }

    #[test]
    fn test_key_bound_twice_is_rejected() {
        let bindings = KeyBindings {
            start: "W".to_string(),
            ..KeyBindings::default()
        };
        assert!(matches!(
            Controls::from_bindings(&bindings),
            Err(ConfigError::DuplicateKey(name)) if name == "W"
        ));

        // Character keys collide regardless of case
        let bindings = KeyBindings {
            quit: "s".to_string(),
            ..KeyBindings::default()
        };
        assert!(matches!(
            Controls::from_bindings(&bindings),
            Err(ConfigError::DuplicateKey(name)) if name == "s"
        ));

        let config = crate::config::Config {
            keybindings: KeyBindings {
                stop: "Up".to_string(),
                ..KeyBindings::default()
            },
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::DuplicateKey(_))));
    }

    #[test]
    fn test_default_controls() {
        let controls = Controls::default();
        assert_eq!(
            controls.lookup(KeyCode::Char('W')),
            Some(Binding::Paddle(Side::Left, Direction::Up))
        );
        assert_eq!(
            controls.lookup(KeyCode::Down),
            Some(Binding::Paddle(Side::Right, Direction::Down))
        );
        assert_eq!(controls.lookup(KeyCode::Char(' ')), Some(Binding::Start));
        assert_eq!(controls.lookup(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_press_and_release_events() {
        let controls = Controls::default();
        let mut tracker = KeyTracker::new(true, Duration::from_millis(500));
        let now = Instant::now();

        assert_eq!(
            tracker.handle_key(&controls, key(KeyCode::Char('w'), KeyEventKind::Press), now),
            Some(InputAction::Paddle(PaddleCommand::press(Side::Left, Direction::Up)))
        );
        // Repeats while held are swallowed
        assert_eq!(
            tracker.handle_key(&controls, key(KeyCode::Char('w'), KeyEventKind::Repeat), now),
            None
        );
        assert_eq!(
            tracker.handle_key(&controls, key(KeyCode::Char('w'), KeyEventKind::Release), now),
            Some(InputAction::Paddle(PaddleCommand::release(Side::Left, Direction::Up)))
        );
        // Release reporting never times out
        tracker.handle_key(&controls, key(KeyCode::Up, KeyEventKind::Press), now);
        assert!(tracker.expire(now + Duration::from_secs(10)).is_empty());
    }

    #[test]
    fn test_hold_timeout_without_release_events() {
        let controls = Controls::default();
        let mut tracker = KeyTracker::new(false, Duration::from_millis(500));
        let start = Instant::now();

        tracker.handle_key(&controls, key(KeyCode::Up, KeyEventKind::Press), start);
        tracker.handle_key(&controls, key(KeyCode::Char('s'), KeyEventKind::Press), start);

        // Auto-repeat keeps the up arrow alive
        let later = start + Duration::from_millis(400);
        tracker.handle_key(&controls, key(KeyCode::Up, KeyEventKind::Press), later);

        let released = tracker.expire(start + Duration::from_millis(600));
        assert_eq!(
            released,
            vec![PaddleCommand::release(Side::Left, Direction::Down)]
        );

        let released = tracker.expire(later + Duration::from_millis(500));
        assert_eq!(
            released,
            vec![PaddleCommand::release(Side::Right, Direction::Up)]
        );
    }

    #[test]
    fn test_match_controls_fire_on_press_only() {
        let controls = Controls::default();
        let mut tracker = KeyTracker::new(true, Duration::from_millis(500));
        let now = Instant::now();

        assert_eq!(
            tracker.handle_key(&controls, key(KeyCode::Char(' '), KeyEventKind::Press), now),
            Some(InputAction::Start)
        );
        assert_eq!(
            tracker.handle_key(&controls, key(KeyCode::Char(' '), KeyEventKind::Release), now),
            None
        );
        assert_eq!(
            tracker.handle_key(&controls, key(KeyCode::Esc, KeyEventKind::Press), now),
            Some(InputAction::Stop)
        );
        assert_eq!(
            tracker.handle_key(&controls, key(KeyCode::Char('Q'), KeyEventKind::Press), now),
            Some(InputAction::Quit)
        );

        let ctrl_c = KeyEvent {
            modifiers: KeyModifiers::CONTROL,
            ..key(KeyCode::Char('c'), KeyEventKind::Press)
        };
        assert_eq!(tracker.handle_key(&controls, ctrl_c, now), Some(InputAction::Quit));
    }
}
