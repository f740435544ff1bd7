use crossterm::event::Event;
use crossterm::event::KeyCode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Constraint;
use ratatui::layout::Direction;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui_list_picker::config::ListPickerOptions;
use ratatui_list_picker::crossterm_input::input_event_from_crossterm;
use ratatui_list_picker::error::SourceError;
use ratatui_list_picker::loader::LoadCompletion;
use ratatui_list_picker::picker::ListPicker;
use ratatui_list_picker::source::ListEntry;
use ratatui_list_picker::source::ListOrderBy;
use ratatui_list_picker::source::ListQuery;
use ratatui_list_picker::source::ListSource;
use ratatui_list_picker::source::SiteList;
use ratatui_list_picker::source::StaticListSource;
use ratatui_list_picker::theme::Theme;
use ratatui_list_picker::view::ListPickerView;
use ratatui_list_picker::view::ListPickerViewOptions;
use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Answers like a real site would: after a round trip.
struct SlowSite {
    inner: StaticListSource,
    latency: Duration,
}

#[async_trait::async_trait]
impl ListSource for SlowSite {
    async fn fetch_lists(&self, query: &ListQuery) -> Result<Vec<ListEntry>, SourceError> {
        tokio::time::sleep(self.latency).await;
        self.inner.fetch_lists(query).await
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let multi = std::env::args().any(|a| a == "--multi");

    let site: Arc<dyn ListSource> = Arc::new(SlowSite {
        inner: StaticListSource::new(vec![
            SiteList::new("L1", "Documents", 101),
            SiteList::new("L2", "Site Assets", 101),
            SiteList::new("L3", "Images", 109),
            SiteList::new("L4", "Site Pages", 119),
            SiteList::new("L5", "Tasks", 171),
            SiteList::new("L6", "Form Templates", 101).hidden(),
        ]),
        latency: Duration::from_millis(1500),
    });

    let mut picker = ListPicker::new(ListPickerOptions {
        query: ListQuery {
            order_by: Some(ListOrderBy::Title),
            ..Default::default()
        },
        multi_select: multi,
        label: Some("List".into()),
        placeholder: Some("Select a list".into()),
        ..Default::default()
    });
    let last = Rc::new(RefCell::new(String::from("(nothing yet)")));
    let sink = last.clone();
    picker.set_on_selection_changed(move |sel| *sink.borrow_mut() = format!("{sel:?}"));

    let (tx, rx) = mpsc::channel(1);
    if let Some(task) = picker.start_load(site) {
        tokio::spawn(async move {
            let _ = tx.send(task.run().await).await;
        });
    }

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut view = ListPickerView::with_options(ListPickerViewOptions {
        show_hints: true,
        ..Default::default()
    });
    let res = run(&mut terminal, &mut picker, &mut view, rx, &last);

    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    res
}

fn run<B: ratatui::backend::Backend<Error = io::Error>>(
    terminal: &mut Terminal<B>,
    picker: &mut ListPicker,
    view: &mut ListPickerView,
    mut completions: mpsc::Receiver<LoadCompletion>,
    last: &RefCell<String>,
) -> io::Result<()> {
    let theme = Theme::default();
    loop {
        if let Ok(done) = completions.try_recv() {
            picker.finish_load(done);
        }

        terminal.draw(|f| {
            let [main, status] = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .areas(f.area());

            let block = Block::default()
                .title("ListPicker (enter/space choose, esc close, q quit)")
                .borders(Borders::ALL);
            let inner = block.inner(main);
            f.render_widget(block, main);

            let h = view.desired_height(picker).min(inner.height);
            let area = Rect::new(inner.x, inner.y, inner.width.min(40), h);
            view.render(area, f.buffer_mut(), &theme, picker);

            let span = Span::styled(format!("last change: {}", last.borrow()), theme.text_muted);
            f.buffer_mut()
                .set_span(status.x, status.y, &span, status.width);
        })?;

        if crossterm::event::poll(Duration::from_millis(80))? {
            let ev = crossterm::event::read()?;
            if let Event::Key(key) = &ev {
                if matches!(key.code, KeyCode::Char('q')) {
                    return Ok(());
                }
            }
            if let Some(ev) = input_event_from_crossterm(ev) {
                view.handle_event(picker, ev);
            }
        } else {
            view.tick(picker);
        }
    }
}
