use crate::input::KeyCode;
use crate::input::KeyEvent;

/// A named group of keys, with the text shown for it in a hint line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    pub keys: Vec<KeyEvent>,
    pub help_key: String,
    pub help_desc: String,
}

impl Binding {
    pub fn new(
        help_key: impl Into<String>,
        help_desc: impl Into<String>,
        keys: Vec<KeyEvent>,
    ) -> Self {
        Self {
            keys,
            help_key: help_key.into(),
            help_desc: help_desc.into(),
        }
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.keys.iter().any(|k| key_event_matches(k, event))
    }
}

pub fn key_event_matches(pattern: &KeyEvent, event: &KeyEvent) -> bool {
    pattern.code == event.code && pattern.modifiers == event.modifiers
}

pub fn key_char(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickerKeyAction {
    /// Open the dropdown, or pick the option under the cursor when it is open.
    Choose,
    Close,
    Up,
    Down,
    PageUp,
    PageDown,
    First,
    Last,
}

#[derive(Clone, Debug)]
pub struct PickerBindings {
    pub choose: Binding,
    pub close: Binding,
    pub up: Binding,
    pub down: Binding,
    pub page_up: Binding,
    pub page_down: Binding,
    pub first: Binding,
    pub last: Binding,
}

impl Default for PickerBindings {
    fn default() -> Self {
        Self {
            choose: Binding::new(
                "enter",
                "choose",
                vec![KeyEvent::new(KeyCode::Enter), key_char(' ')],
            ),
            close: Binding::new("esc", "close", vec![KeyEvent::new(KeyCode::Esc)]),
            up: Binding::new("↑/k", "up", vec![KeyEvent::new(KeyCode::Up), key_char('k')]),
            down: Binding::new(
                "↓/j",
                "down",
                vec![KeyEvent::new(KeyCode::Down), key_char('j')],
            ),
            page_up: Binding::new("pgup", "page up", vec![KeyEvent::new(KeyCode::PageUp)]),
            page_down: Binding::new(
                "pgdn",
                "page down",
                vec![KeyEvent::new(KeyCode::PageDown)],
            ),
            first: Binding::new("g", "first", vec![KeyEvent::new(KeyCode::Home), key_char('g')]),
            last: Binding::new("G", "last", vec![KeyEvent::new(KeyCode::End), key_char('G')]),
        }
    }
}

impl PickerBindings {
    pub fn action_for(&self, key: &KeyEvent) -> Option<PickerKeyAction> {
        [
            (&self.choose, PickerKeyAction::Choose),
            (&self.close, PickerKeyAction::Close),
            (&self.up, PickerKeyAction::Up),
            (&self.down, PickerKeyAction::Down),
            (&self.page_up, PickerKeyAction::PageUp),
            (&self.page_down, PickerKeyAction::PageDown),
            (&self.first, PickerKeyAction::First),
            (&self.last, PickerKeyAction::Last),
        ]
        .into_iter()
        .find(|(b, _)| b.matches(key))
        .map(|(_, action)| action)
    }

    /// Bindings worth advertising in a one-line hint.
    pub fn hints(&self) -> Vec<&Binding> {
        vec![&self.up, &self.down, &self.choose, &self.close]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyModifiers;

    #[test]
    fn binding_matches_exact_modifiers() {
        let b = Binding::new("j", "down", vec![key_char('j')]);
        assert!(b.matches(&key_char('j')));
        let ctrl_j = key_char('j').with_modifiers(KeyModifiers { ctrl: true });
        assert!(!b.matches(&ctrl_j));
    }

    #[test]
    fn default_bindings_resolve() {
        let b = PickerBindings::default();
        assert_eq!(
            b.action_for(&KeyEvent::new(KeyCode::Enter)),
            Some(PickerKeyAction::Choose)
        );
        assert_eq!(b.action_for(&key_char(' ')), Some(PickerKeyAction::Choose));
        assert_eq!(b.action_for(&key_char('k')), Some(PickerKeyAction::Up));
        assert_eq!(b.action_for(&key_char('G')), Some(PickerKeyAction::Last));
        assert_eq!(b.action_for(&key_char('x')), None);
    }
}
