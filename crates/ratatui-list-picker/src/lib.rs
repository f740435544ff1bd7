//! `ratatui-list-picker` is a dropdown that loads its entries from a remote site once, then
//! lets the user pick one list or accumulate several.
//!
//! The state machine (loading, options, selection, host callback) lives in
//! `ratatui-list-picker-core` and is re-exported here. This crate adds the ratatui side:
//! [`view::ListPickerView`] draws the label, the field with its busy spinner, and the open
//! option list, and maps key presses onto picks.
pub use ratatui_list_picker_core::config;
pub use ratatui_list_picker_core::error;
pub use ratatui_list_picker_core::input;
pub use ratatui_list_picker_core::keymap;
pub use ratatui_list_picker_core::loader;
pub use ratatui_list_picker_core::options;
pub use ratatui_list_picker_core::picker;
pub use ratatui_list_picker_core::selection;
pub use ratatui_list_picker_core::source;

#[cfg(feature = "crossterm")]
pub use ratatui_list_picker_core::crossterm_input;

pub mod theme;

pub mod render;
pub mod view;
