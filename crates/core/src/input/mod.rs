use serde::{Deserialize, Serialize};

/// Keys the demo reacts to; everything else arrives as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Up,
    Down,
    Q,
    Escape,
    Other,
}

/// Discrete event drained from the backend once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Window close request.
    Quit,
    KeyDown(Key),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    ZoomIn,
    ZoomOut,
    Quit,
}

/// Routes a key to an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBinding {
    pub key: Key,
    pub action: Action,
}

/// Key bindings; a window close request always maps to [`Action::Quit`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyMap {
    bindings: Vec<KeyBinding>,
}

impl Default for KeyMap {
    fn default() -> Self {
        let bind = |key, action| KeyBinding { key, action };
        Self {
            bindings: vec![
                bind(Key::Up, Action::ZoomIn),
                bind(Key::Down, Action::ZoomOut),
                bind(Key::Q, Action::Quit),
                bind(Key::Escape, Action::Quit),
            ],
        }
    }
}

impl KeyMap {
    pub fn new(bindings: Vec<KeyBinding>) -> Self {
        Self { bindings }
    }

    pub fn bindings(&self) -> &[KeyBinding] {
        &self.bindings
    }

    pub fn action(&self, event: InputEvent) -> Option<Action> {
        match event {
            InputEvent::Quit => Some(Action::Quit),
            InputEvent::KeyDown(key) => self
                .bindings
                .iter()
                .find(|binding| binding.key == key)
                .map(|binding| binding.action),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bindings() {
        let keys = KeyMap::default();
        assert_eq!(keys.action(InputEvent::KeyDown(Key::Up)), Some(Action::ZoomIn));
        assert_eq!(keys.action(InputEvent::KeyDown(Key::Down)), Some(Action::ZoomOut));
        assert_eq!(keys.action(InputEvent::KeyDown(Key::Escape)), Some(Action::Quit));
        assert_eq!(keys.action(InputEvent::KeyDown(Key::Other)), None);
        assert_eq!(keys.action(InputEvent::Quit), Some(Action::Quit));
    }

    #[test]
    fn close_request_quits_even_without_bindings() {
        let keys = KeyMap::new(Vec::new());
        assert_eq!(keys.action(InputEvent::KeyDown(Key::Q)), None);
        assert_eq!(keys.action(InputEvent::Quit), Some(Action::Quit));
    }

    #[test]
    fn bindings_round_trip_through_json() {
        let keys: KeyMap =
            serde_json::from_str(r#"[{ "key": "q", "action": "zoom_in" }]"#).unwrap();
        assert_eq!(keys.action(InputEvent::KeyDown(Key::Q)), Some(Action::ZoomIn));
    }
}
