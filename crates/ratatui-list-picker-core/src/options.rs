use crate::selection::SelectionMode;
use crate::source::ListEntry;

/// Key of the synthetic blank option offered in single-select mode.
///
/// It only exists in the rendered option list; choosing it clears the selection.
pub const EMPTY_OPTION_KEY: &str = "NO_LIST_SELECTED";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PickerOption {
    pub key: String,
    pub text: String,
}

impl PickerOption {
    pub fn new(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
        }
    }

    pub fn empty() -> Self {
        Self::new(EMPTY_OPTION_KEY, "")
    }

    pub fn is_empty_option(&self) -> bool {
        self.key == EMPTY_OPTION_KEY
    }
}

impl From<&ListEntry> for PickerOption {
    fn from(entry: &ListEntry) -> Self {
        Self::new(entry.id.clone(), entry.title.clone())
    }
}

/// Maps fetched entries to dropdown options, keeping the source order.
///
/// Single-select mode gets the blank option at index 0.
pub fn build_options(entries: &[ListEntry], mode: SelectionMode) -> Vec<PickerOption> {
    let blank = match mode {
        SelectionMode::Single => Some(PickerOption::empty()),
        SelectionMode::Multi => None,
    };
    blank
        .into_iter()
        .chain(entries.iter().map(PickerOption::from))
        .collect()
}
