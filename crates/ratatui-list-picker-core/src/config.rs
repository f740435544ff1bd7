use crate::selection::DuplicatePolicy;
use crate::selection::Selection;
use crate::selection::SelectionMode;
use crate::source::ListQuery;
use std::time::Duration;

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_millis(5000);

/// Construction-time settings for a [`crate::picker::ListPicker`].
///
/// The picker reads these once; changing them means building a new picker.
#[derive(Clone, Debug)]
pub struct ListPickerOptions {
    pub query: ListQuery,
    pub multi_select: bool,
    /// Initial selection. Reshaped to the mode with [`Selection::into_mode`].
    pub selected: Selection,
    pub disabled: bool,
    pub label: Option<String>,
    pub placeholder: Option<String>,
    pub fetch_timeout: Duration,
    pub duplicates: DuplicatePolicy,
}

impl Default for ListPickerOptions {
    fn default() -> Self {
        Self {
            query: ListQuery::default(),
            multi_select: false,
            selected: Selection::default(),
            disabled: false,
            label: None,
            placeholder: None,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            duplicates: DuplicatePolicy::default(),
        }
    }
}

impl ListPickerOptions {
    pub fn mode(&self) -> SelectionMode {
        SelectionMode::from_multi_select(self.multi_select)
    }

    pub fn initial_selection(&self) -> Selection {
        self.selected.clone().into_mode(self.mode())
    }
}
