use ratatui_list_picker::config::ListPickerOptions;
use ratatui_list_picker::input::InputEvent;
use ratatui_list_picker::input::KeyCode;
use ratatui_list_picker::input::KeyEvent;
use ratatui_list_picker::loader::LoadCompletion;
use ratatui_list_picker::options::PickerOption;
use ratatui_list_picker::picker::ListPicker;
use ratatui_list_picker::picker::LoadOutcome;
use ratatui_list_picker::selection::Selection;
use ratatui_list_picker::source::ListSource;
use ratatui_list_picker::source::SiteList;
use ratatui_list_picker::source::StaticListSource;
use ratatui_list_picker::view::ListPickerAction;
use ratatui_list_picker::view::ListPickerView;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn site() -> Arc<dyn ListSource> {
    Arc::new(StaticListSource::new(vec![
        SiteList::new("L1", "Docs", 101),
        SiteList::new("L2", "Images", 101),
        SiteList::new("L9", "Workflow History", 140).hidden(),
    ]))
}

/// Spawns the fetch the way a host would and returns the channel its completion lands on.
fn mount(picker: &mut ListPicker, source: Arc<dyn ListSource>) -> mpsc::Receiver<LoadCompletion> {
    let (tx, rx) = mpsc::channel(1);
    if let Some(task) = picker.start_load(source) {
        tokio::spawn(async move {
            let done = task.run().await;
            let _ = tx.send(done).await;
        });
    }
    rx
}

fn key(code: KeyCode) -> InputEvent {
    InputEvent::Key(KeyEvent::new(code))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn single_select_scenario() {
    init_tracing();
    let mut picker = ListPicker::new(ListPickerOptions {
        multi_select: false,
        selected: Selection::single("L2"),
        ..Default::default()
    });
    let mut rx = mount(&mut picker, site());
    assert!(picker.is_loading());

    let done = rx.recv().await.expect("completion");
    assert_eq!(picker.finish_load(done), LoadOutcome::Applied { options: 3 });
    assert_eq!(
        picker.picker_options(),
        &[
            PickerOption::new(ratatui_list_picker::options::EMPTY_OPTION_KEY, ""),
            PickerOption::new("L1", "Docs"),
            PickerOption::new("L2", "Images"),
        ]
    );
    assert_eq!(picker.selection(), &Selection::single("L2"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn multi_select_scenario_through_the_view() {
    init_tracing();
    let mut picker = ListPicker::new(ListPickerOptions {
        multi_select: true,
        selected: Selection::multi(Vec::<String>::new()),
        query: ratatui_list_picker::source::ListQuery {
            base_template: Some(101),
            ..Default::default()
        },
        ..Default::default()
    });
    let calls = Rc::new(RefCell::new(Vec::new()));
    let sink = calls.clone();
    picker.set_on_selection_changed(move |sel| sink.borrow_mut().push(sel.clone()));

    let mut rx = mount(&mut picker, site());
    let done = rx.recv().await.expect("completion");
    picker.finish_load(done);
    assert!(calls.borrow().is_empty());
    assert_eq!(picker.picker_options().len(), 2);

    let mut view = ListPickerView::new();
    assert_eq!(view.handle_event(&mut picker, key(KeyCode::Enter)), ListPickerAction::Opened);
    assert_eq!(
        view.handle_event(&mut picker, key(KeyCode::Enter)),
        ListPickerAction::SelectionChanged(Selection::multi(["L1"]))
    );
    assert_eq!(*calls.borrow(), vec![Selection::multi(["L1"])]);
}

#[tokio::test(start_paused = true)]
async fn hanging_site_keeps_the_picker_busy() {
    init_tracing();
    let mut picker = ListPicker::new(ListPickerOptions {
        fetch_timeout: Duration::from_secs(5),
        ..Default::default()
    });
    let mut rx = mount(&mut picker, Arc::new(StaticListSource::hanging()));

    let done = rx.recv().await.expect("completion");
    assert_eq!(picker.finish_load(done), LoadOutcome::StillLoading);
    assert!(picker.is_loading());

    let mut view = ListPickerView::new();
    assert_eq!(view.handle_event(&mut picker, key(KeyCode::Enter)), ListPickerAction::None);
}

#[tokio::test]
async fn dropping_the_picker_cancels_the_fetch() {
    init_tracing();
    let mut picker = ListPicker::new(ListPickerOptions {
        fetch_timeout: Duration::from_secs(3600),
        ..Default::default()
    });
    let mut rx = mount(&mut picker, Arc::new(StaticListSource::hanging()));
    drop(picker);

    let done = rx.recv().await.expect("completion");
    assert_eq!(
        done.result(),
        &Err(ratatui_list_picker::error::LoadError::Cancelled)
    );
}
