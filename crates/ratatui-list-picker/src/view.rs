//! Terminal rendering of a [`ListPicker`].
//!
//! [`ListPickerView`] holds only presentation state (open/closed, cursor, scroll, spinner
//! frame). Data and selection stay in the core [`ListPicker`], which is passed in on every
//! call, the same way list views take their item count from the caller.

use crate::render;
use crate::theme::Theme;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui_list_picker_core::input::InputEvent;
use ratatui_list_picker_core::keymap::PickerBindings;
use ratatui_list_picker_core::keymap::PickerKeyAction;
use ratatui_list_picker_core::picker::ListPicker;
use ratatui_list_picker_core::picker::PickerView;
use ratatui_list_picker_core::selection::Selection;
use ratatui_list_picker_core::selection::SelectionMode;
use unicode_width::UnicodeWidthStr;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const CARET: &str = " ▾";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListPickerAction {
    None,
    Redraw,
    Opened,
    Closed,
    SelectionChanged(Selection),
}

#[derive(Clone, Debug)]
pub struct ListPickerViewOptions {
    /// Base style for the field and the dropdown rows.
    pub style: Style,
    pub cursor_style: Style,
    pub selected_style: Style,
    /// Upper bound on dropdown rows shown at once.
    pub max_visible: u16,
    pub show_hints: bool,
    pub loading_text: String,
    pub no_options_text: String,
    pub bindings: PickerBindings,
}

impl Default for ListPickerViewOptions {
    fn default() -> Self {
        Self {
            style: Style::default(),
            cursor_style: Style::default().add_modifier(Modifier::REVERSED),
            selected_style: Style::default().add_modifier(Modifier::BOLD),
            max_visible: 8,
            show_hints: false,
            loading_text: "Loading…".to_string(),
            no_options_text: "(no lists)".to_string(),
            bindings: PickerBindings::default(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ListPickerView {
    options: ListPickerViewOptions,
    open: bool,
    cursor: usize,
    scroll: usize,
    page_rows: usize,
    frame: usize,
}

impl ListPickerView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ListPickerViewOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &ListPickerViewOptions {
        &self.options
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Advances the busy spinner. Returns `true` when a redraw is needed.
    pub fn tick(&mut self, picker: &ListPicker) -> bool {
        if !picker.is_loading() {
            return false;
        }
        self.frame = (self.frame + 1) % SPINNER_FRAMES.len();
        true
    }

    /// Rows needed to draw everything, given the current open state.
    pub fn desired_height(&self, picker: &ListPicker) -> u16 {
        let view = picker.view();
        let mut h = 1 + u16::from(view.label.is_some());
        if self.open {
            h += self.list_rows(&view) as u16;
            h += u16::from(self.options.show_hints);
        }
        h
    }

    pub fn handle_event(&mut self, picker: &mut ListPicker, event: InputEvent) -> ListPickerAction {
        let key = match event {
            InputEvent::Paste(_) => return ListPickerAction::None,
            InputEvent::Key(key) => key,
        };

        if picker.is_disabled() {
            return self.close_dropdown();
        }

        let Some(action) = self.options.bindings.action_for(&key) else {
            return ListPickerAction::None;
        };

        if !self.open {
            return match action {
                PickerKeyAction::Choose | PickerKeyAction::Down => self.open_dropdown(picker),
                _ => ListPickerAction::None,
            };
        }

        let count = picker.picker_options().len();
        let last = count.saturating_sub(1);
        let page = self.page_rows.max(1);
        let next = match action {
            PickerKeyAction::Choose => return self.choose(picker),
            PickerKeyAction::Close => return self.close_dropdown(),
            PickerKeyAction::Up => self.cursor.saturating_sub(1),
            PickerKeyAction::Down => (self.cursor + 1).min(last),
            PickerKeyAction::PageUp => self.cursor.saturating_sub(page),
            PickerKeyAction::PageDown => (self.cursor + page).min(last),
            PickerKeyAction::First => 0,
            PickerKeyAction::Last => last,
        };

        if next == self.cursor {
            return ListPickerAction::None;
        }
        self.cursor = next;
        self.ensure_cursor_visible();
        ListPickerAction::Redraw
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme, picker: &ListPicker) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let view = picker.view();
        if view.disabled && self.open {
            self.open = false;
        }

        let base = if self.options.style == Style::default() {
            theme.text_primary
        } else {
            self.options.style
        };
        let bottom = area.y + area.height;
        let mut y = area.y;

        if let Some(label) = view.label {
            buf.set_style(Rect::new(area.x, y, area.width, 1), base);
            render::render_str_clipped(area.x, y, area.width, buf, label, theme.label);
            y += 1;
            if y >= bottom {
                return;
            }
        }

        self.render_field(Rect::new(area.x, y, area.width, 1), buf, theme, base, &view);
        y += 1;

        if !self.open || y >= bottom {
            return;
        }

        let hint_rows = u16::from(self.options.show_hints);
        let avail = bottom.saturating_sub(y).saturating_sub(hint_rows) as usize;
        let rows = self.list_rows(&view).min(avail.max(1));
        self.page_rows = rows;
        self.ensure_cursor_visible();

        let cursor_style = base.patch(self.options.cursor_style).patch(theme.accent);
        let selected_style = base.patch(self.options.selected_style).patch(theme.accent);

        if view.options.is_empty() {
            buf.set_style(Rect::new(area.x, y, area.width, 1), base);
            render::render_str_clipped(
                area.x,
                y,
                area.width,
                buf,
                &self.options.no_options_text,
                theme.text_muted,
            );
            y += 1;
        } else {
            for (idx, opt) in view.options.iter().enumerate().skip(self.scroll).take(rows) {
                let selected = view.is_selected(opt);
                let style = if idx == self.cursor {
                    cursor_style
                } else if selected {
                    selected_style
                } else {
                    base
                };
                let row = Rect::new(area.x, y, area.width, 1);
                buf.set_style(row, style);

                let text = match view.mode {
                    SelectionMode::Multi => {
                        let mark = if selected { "[x] " } else { "[ ] " };
                        format!("{mark}{}", opt.text)
                    }
                    SelectionMode::Single => opt.text.clone(),
                };
                let text = render::truncate_to_width(&text, area.width as usize);
                render::render_str_clipped(area.x, y, area.width, buf, &text, style);
                y += 1;
            }
        }

        if self.options.show_hints && y < bottom {
            let hints = self
                .options
                .bindings
                .hints()
                .iter()
                .map(|b| format!("{} {}", b.help_key, b.help_desc))
                .collect::<Vec<_>>()
                .join(" • ");
            let text = render::truncate_to_width(&hints, area.width as usize);
            render::render_str_clipped(area.x, y, area.width, buf, &text, theme.text_muted);
        }
    }

    fn render_field(
        &self,
        row: Rect,
        buf: &mut Buffer,
        theme: &Theme,
        base: Style,
        view: &PickerView<'_>,
    ) {
        let style = if view.disabled { theme.text_muted } else { base };
        buf.set_style(row, style);

        let mut x = row.x;
        let mut width = row.width;
        if view.busy && width >= 2 {
            let spinner = SPINNER_FRAMES[self.frame % SPINNER_FRAMES.len()];
            render::render_str_clipped(x, row.y, 1, buf, spinner, theme.spinner);
            x += 2;
            width -= 2;
        }

        let caret_w = UnicodeWidthStr::width(CARET) as u16;
        let text_w = width.saturating_sub(caret_w);
        let (text, is_value) = field_text(view, &self.options.loading_text);
        let text_style = if is_value { style } else { theme.text_muted };
        let text = render::truncate_to_width(&text, text_w as usize);
        render::render_str_clipped(x, row.y, text_w, buf, &text, text_style);

        if width >= caret_w {
            let caret_x = x + width - caret_w;
            render::render_str_clipped(caret_x, row.y, caret_w, buf, CARET, style);
        }
    }

    fn open_dropdown(&mut self, picker: &ListPicker) -> ListPickerAction {
        let view = picker.view();
        self.open = true;
        self.cursor = view
            .options
            .iter()
            .position(|o| view.is_selected(o))
            .unwrap_or(0);
        self.page_rows = self.list_rows(&view);
        self.ensure_cursor_visible();
        ListPickerAction::Opened
    }

    fn close_dropdown(&mut self) -> ListPickerAction {
        if !self.open {
            return ListPickerAction::None;
        }
        self.open = false;
        ListPickerAction::Closed
    }

    fn choose(&mut self, picker: &mut ListPicker) -> ListPickerAction {
        let Some(key) = picker
            .picker_options()
            .get(self.cursor)
            .map(|o| o.key.clone())
        else {
            return ListPickerAction::None;
        };
        if picker.select(&key).is_err() {
            return ListPickerAction::None;
        }
        if picker.mode() == SelectionMode::Single {
            self.open = false;
        }
        ListPickerAction::SelectionChanged(picker.selection().clone())
    }

    fn list_rows(&self, view: &PickerView<'_>) -> usize {
        view.options
            .len()
            .clamp(1, self.options.max_visible.max(1) as usize)
    }

    fn ensure_cursor_visible(&mut self) {
        let rows = self.page_rows.max(1);
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        } else if self.cursor >= self.scroll + rows {
            self.scroll = self.cursor + 1 - rows;
        }
    }
}

/// Text for the closed field, and whether it is a real value (vs. a placeholder).
fn field_text(view: &PickerView<'_>, loading_text: &str) -> (String, bool) {
    let chosen: Vec<&str> = view
        .options
        .iter()
        .filter(|o| view.is_selected(o) && !o.text.is_empty())
        .map(|o| o.text.as_str())
        .collect();
    if !chosen.is_empty() {
        return (chosen.join(", "), true);
    }
    let fallback = if view.busy {
        view.placeholder.unwrap_or(loading_text)
    } else {
        view.placeholder.unwrap_or("")
    };
    (fallback.to_string(), false)
}
