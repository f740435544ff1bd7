//! `ratatui-list-picker-core` holds the state machine behind a remote-backed list picker.
//!
//! The picker fetches a set of lists from a [`source::ListSource`] once per mount, turns them
//! into dropdown options, and folds user picks into a single- or multi-select
//! [`selection::Selection`] that is reported to the host through a callback.
//!
//! ## Design goals
//!
//! - Event-loop agnostic: the host spawns the [`loader::LoadTask`] on its own runtime and feeds
//!   the completion back with [`picker::ListPicker::finish_load`].
//! - One source of truth: `loading`, `options`, and `selection` live in the
//!   [`picker::ListPicker`] and nowhere else.
//! - Safe teardown: unmounting cancels the fetch and stale completions are discarded.
//!
//! Rendering lives in the facade crate `ratatui-list-picker`.
pub mod config;
pub mod error;
pub mod loader;
pub mod options;
pub mod picker;
pub mod selection;
pub mod source;

#[cfg(feature = "crossterm")]
pub mod crossterm_input;

pub mod input;
pub mod keymap;
