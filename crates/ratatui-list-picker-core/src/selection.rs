//! Selection values and the rules for folding a user pick into them.

use crate::options::EMPTY_OPTION_KEY;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionMode {
    #[default]
    Single,
    Multi,
}

impl SelectionMode {
    pub fn from_multi_select(multi_select: bool) -> Self {
        if multi_select { Self::Multi } else { Self::Single }
    }
}

/// What to do when a key that is already selected is picked again in multi-select mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Append it again.
    #[default]
    Keep,
    /// Leave the sequence as is.
    Skip,
}

/// The value reported to the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    Single(Option<String>),
    Multi(Vec<String>),
}

impl Default for Selection {
    fn default() -> Self {
        Self::Single(None)
    }
}

impl Selection {
    pub fn none(mode: SelectionMode) -> Self {
        match mode {
            SelectionMode::Single => Self::Single(None),
            SelectionMode::Multi => Self::Multi(Vec::new()),
        }
    }

    pub fn single(key: impl Into<String>) -> Self {
        Self::Single(Some(key.into()))
    }

    pub fn multi<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Multi(keys.into_iter().map(Into::into).collect())
    }

    pub fn keys(&self) -> Vec<&str> {
        match self {
            Self::Single(key) => key.as_deref().into_iter().collect(),
            Self::Multi(keys) => keys.iter().map(String::as_str).collect(),
        }
    }

    /// Reshapes a configured selection to `mode`.
    ///
    /// A scalar becomes a one-element sequence; a sequence keeps its first key. The blank
    /// option key never survives as a selected value.
    pub fn into_mode(self, mode: SelectionMode) -> Self {
        let sel = match (self, mode) {
            (s @ Self::Single(_), SelectionMode::Single) => s,
            (s @ Self::Multi(_), SelectionMode::Multi) => s,
            (Self::Single(key), SelectionMode::Multi) => Self::Multi(key.into_iter().collect()),
            (Self::Multi(keys), SelectionMode::Single) => Self::Single(keys.into_iter().next()),
        };
        match sel {
            Self::Single(Some(k)) if k == EMPTY_OPTION_KEY => Self::Single(None),
            Self::Multi(mut keys) => {
                keys.retain(|k| k != EMPTY_OPTION_KEY);
                Self::Multi(keys)
            }
            s => s,
        }
    }
}

/// Folds user picks into a [`Selection`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SelectionController {
    mode: SelectionMode,
    duplicates: DuplicatePolicy,
}

impl SelectionController {
    pub fn new(mode: SelectionMode, duplicates: DuplicatePolicy) -> Self {
        Self { mode, duplicates }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Applies a pick of `key` to `current`.
    ///
    /// Single-select replaces the value (the blank option clears it). Multi-select appends to
    /// the end; there is no way to remove a key.
    pub fn apply(&self, current: &mut Selection, key: &str) {
        match self.mode {
            SelectionMode::Single => {
                let next = (key != EMPTY_OPTION_KEY).then(|| key.to_string());
                *current = Selection::Single(next);
            }
            SelectionMode::Multi => {
                if !matches!(current, Selection::Multi(_)) {
                    *current = Selection::Multi(Vec::new());
                }
                if let Selection::Multi(keys) = current {
                    let seen = keys.iter().any(|k| k == key);
                    if !(seen && self.duplicates == DuplicatePolicy::Skip) {
                        keys.push(key.to_string());
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_last_pick_wins() {
        let c = SelectionController::new(SelectionMode::Single, DuplicatePolicy::Keep);
        let mut sel = Selection::none(SelectionMode::Single);
        c.apply(&mut sel, "L1");
        c.apply(&mut sel, "L2");
        c.apply(&mut sel, "L2");
        assert_eq!(sel, Selection::single("L2"));
    }

    #[test]
    fn single_blank_option_clears() {
        let c = SelectionController::new(SelectionMode::Single, DuplicatePolicy::Keep);
        let mut sel = Selection::single("L1");
        c.apply(&mut sel, EMPTY_OPTION_KEY);
        assert_eq!(sel, Selection::Single(None));
    }

    #[test]
    fn multi_appends_in_order_with_duplicates() {
        let c = SelectionController::new(SelectionMode::Multi, DuplicatePolicy::Keep);
        let mut sel = Selection::none(SelectionMode::Multi);
        c.apply(&mut sel, "L1");
        c.apply(&mut sel, "L2");
        c.apply(&mut sel, "L1");
        assert_eq!(sel, Selection::multi(["L1", "L2", "L1"]));
    }

    #[test]
    fn multi_skip_policy_ignores_repeats() {
        let c = SelectionController::new(SelectionMode::Multi, DuplicatePolicy::Skip);
        let mut sel = Selection::multi(["L1"]);
        c.apply(&mut sel, "L1");
        c.apply(&mut sel, "L2");
        assert_eq!(sel, Selection::multi(["L1", "L2"]));
    }

    #[test]
    fn multi_initializes_from_wrong_shape() {
        let c = SelectionController::new(SelectionMode::Multi, DuplicatePolicy::Keep);
        let mut sel = Selection::Single(None);
        c.apply(&mut sel, "L1");
        assert_eq!(sel, Selection::multi(["L1"]));
    }

    #[test]
    fn into_mode_reshapes() {
        assert_eq!(
            Selection::single("L1").into_mode(SelectionMode::Multi),
            Selection::multi(["L1"])
        );
        assert_eq!(
            Selection::multi(["L1", "L2"]).into_mode(SelectionMode::Single),
            Selection::single("L1")
        );
        assert_eq!(
            Selection::Multi(vec![]).into_mode(SelectionMode::Single),
            Selection::Single(None)
        );
        assert_eq!(
            Selection::single(EMPTY_OPTION_KEY).into_mode(SelectionMode::Single),
            Selection::Single(None)
        );
    }
}
