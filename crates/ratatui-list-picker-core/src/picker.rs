//! The list picker state machine.
//!
//! A [`ListPicker`] owns the runtime state (`loading`, `options`, `selection`) for one mount.
//! The host drives it with two kinds of events:
//!
//! - mount: [`ListPicker::start_load`], then [`ListPicker::finish_load`] once the returned
//!   [`LoadTask`] resolves;
//! - user picks: [`ListPicker::select`], which notifies the host callback synchronously.
//!
//! ```ignore
//! let mut picker = ListPicker::new(ListPickerOptions {
//!     multi_select: true,
//!     ..Default::default()
//! });
//! picker.set_on_selection_changed(|sel| println!("{sel:?}"));
//!
//! if let Some(task) = picker.start_load(source.clone()) {
//!     let done = task.run().await;
//!     picker.finish_load(done);
//! }
//! picker.select("L1")?;
//! ```

use crate::config::ListPickerOptions;
use crate::error::SelectError;
use crate::loader::Accepted;
use crate::loader::LoadCompletion;
use crate::loader::LoadPhase;
use crate::loader::LoadTask;
use crate::loader::Loader;
use crate::loader::MountId;
use crate::options::EMPTY_OPTION_KEY;
use crate::options::PickerOption;
use crate::options::build_options;
use crate::selection::Selection;
use crate::selection::SelectionController;
use crate::selection::SelectionMode;
use crate::source::ListSource;
use std::fmt;
use std::sync::Arc;

/// What [`ListPicker::finish_load`] did with a completion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied { options: usize },
    /// The fetch failed or timed out; the picker stays busy.
    StillLoading,
    /// The completion was stale: wrong mount, already applied, or the picker was unmounted.
    Discarded,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct PickerState {
    loading: bool,
    options: Vec<PickerOption>,
    selection: Selection,
}

/// Everything a renderer needs to draw the picker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PickerView<'a> {
    pub options: &'a [PickerOption],
    pub selected_keys: Vec<&'a str>,
    pub mode: SelectionMode,
    pub disabled: bool,
    pub busy: bool,
    pub label: Option<&'a str>,
    pub placeholder: Option<&'a str>,
}

impl PickerView<'_> {
    pub fn is_selected(&self, option: &PickerOption) -> bool {
        self.selected_keys.iter().any(|k| *k == option.key)
    }
}

type SelectionCallback = Box<dyn FnMut(&Selection)>;

pub struct ListPicker {
    options: ListPickerOptions,
    controller: SelectionController,
    loader: Loader,
    state: PickerState,
    on_selection_changed: Option<SelectionCallback>,
}

impl fmt::Debug for ListPicker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListPicker")
            .field("options", &self.options)
            .field("loader", &self.loader)
            .field("state", &self.state)
            .field("on_selection_changed", &self.on_selection_changed.is_some())
            .finish()
    }
}

impl ListPicker {
    pub fn new(options: ListPickerOptions) -> Self {
        let controller = SelectionController::new(options.mode(), options.duplicates);
        let state = PickerState {
            loading: false,
            options: Vec::new(),
            selection: options.initial_selection(),
        };
        Self {
            options,
            controller,
            loader: Loader::new(),
            state,
            on_selection_changed: None,
        }
    }

    pub fn set_on_selection_changed(&mut self, f: impl FnMut(&Selection) + 'static) {
        self.on_selection_changed = Some(Box::new(f));
    }

    pub fn options(&self) -> &ListPickerOptions {
        &self.options
    }

    pub fn mount_id(&self) -> MountId {
        self.loader.mount()
    }

    pub fn mode(&self) -> SelectionMode {
        self.controller.mode()
    }

    pub fn is_loading(&self) -> bool {
        self.state.loading
    }

    pub fn is_loaded(&self) -> bool {
        self.loader.phase() == LoadPhase::Loaded
    }

    pub fn is_disabled(&self) -> bool {
        self.state.loading || self.options.disabled
    }

    pub fn selection(&self) -> &Selection {
        &self.state.selection
    }

    pub fn picker_options(&self) -> &[PickerOption] {
        &self.state.options
    }

    /// Marks the picker busy and returns the fetch to run. Only the first call per mount
    /// returns a task.
    pub fn start_load(&mut self, source: Arc<dyn ListSource>) -> Option<LoadTask> {
        let task = self.loader.start(
            source,
            self.options.query.clone(),
            self.options.fetch_timeout,
        )?;
        self.state.loading = true;
        Some(task)
    }

    /// Applies a finished fetch: builds the options, seeds the configured selection, and
    /// clears `loading`. The host callback is not invoked.
    pub fn finish_load(&mut self, completion: LoadCompletion) -> LoadOutcome {
        match self.loader.accept(completion) {
            Accepted::Entries(entries) => {
                let options = build_options(&entries, self.mode());
                let count = options.len();
                self.state.options = options;
                self.state.selection = self.options.initial_selection();
                self.state.loading = false;
                tracing::info!(mount = self.mount_id().get(), options = count, "lists loaded");
                LoadOutcome::Applied { options: count }
            }
            Accepted::Failed(_) => LoadOutcome::StillLoading,
            Accepted::Discarded => LoadOutcome::Discarded,
        }
    }

    /// Applies a user pick and notifies the host with the full selection.
    pub fn select(&mut self, key: &str) -> Result<(), SelectError> {
        if self.loader.phase() == LoadPhase::Unmounted {
            return Err(SelectError::Unmounted);
        }
        if self.state.loading || !self.is_loaded() {
            return Err(SelectError::Loading);
        }
        if self.options.disabled {
            return Err(SelectError::Disabled);
        }
        if !self.state.options.iter().any(|o| o.key == key) {
            return Err(SelectError::UnknownKey(key.to_string()));
        }

        self.controller.apply(&mut self.state.selection, key);
        tracing::debug!(
            mount = self.mount_id().get(),
            key,
            selection = ?self.state.selection,
            "selection changed"
        );

        if let Some(cb) = self.on_selection_changed.as_mut() {
            cb(&self.state.selection);
        }
        Ok(())
    }

    /// Tears the picker down. A fetch still in flight is cancelled and its completion ignored.
    pub fn unmount(&mut self) {
        self.loader.unmount();
    }

    pub fn view(&self) -> PickerView<'_> {
        let mut selected_keys = self.state.selection.keys();
        if self.mode() == SelectionMode::Single
            && selected_keys.is_empty()
            && self.state.options.first().is_some_and(PickerOption::is_empty_option)
        {
            selected_keys.push(EMPTY_OPTION_KEY);
        }
        PickerView {
            options: &self.state.options,
            selected_keys,
            mode: self.mode(),
            disabled: self.is_disabled(),
            busy: self.state.loading,
            label: self.options.label.as_deref(),
            placeholder: self.options.placeholder.as_deref(),
        }
    }
}
