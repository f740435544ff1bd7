//! One-shot asynchronous loading of the picker's options.
//!
//! The loader never touches picker state from inside a future. [`Loader::start`] hands out a
//! [`LoadTask`] that the host drives on its runtime; the resulting [`LoadCompletion`] is handed
//! back on the event loop, where [`Loader::accept`] decides whether it may still be applied.
//! Teardown cancels the task's token, so a fetch in flight resolves early and any completion
//! that arrives afterwards is dropped.

use crate::error::LoadError;
use crate::source::ListEntry;
use crate::source::ListQuery;
use crate::source::ListSource;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

static NEXT_MOUNT: AtomicU64 = AtomicU64::new(1);

/// Identifies one picker instance; completions carry it back to their owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MountId(u64);

impl MountId {
    fn next() -> Self {
        Self(NEXT_MOUNT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadPhase {
    Idle,
    Loading,
    Loaded,
    Unmounted,
}

/// A fetch ready to be driven by the host runtime.
pub struct LoadTask {
    mount: MountId,
    source: Arc<dyn ListSource>,
    query: ListQuery,
    timeout: Duration,
    cancel: CancellationToken,
}

impl LoadTask {
    pub fn mount(&self) -> MountId {
        self.mount
    }

    pub async fn run(self) -> LoadCompletion {
        let LoadTask {
            mount,
            source,
            query,
            timeout,
            cancel,
        } = self;

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(LoadError::Cancelled),
            res = tokio::time::timeout(timeout, source.fetch_lists(&query)) => match res {
                Ok(Ok(entries)) => Ok(entries),
                Ok(Err(err)) => Err(LoadError::Source(err)),
                Err(_) => Err(LoadError::Timeout(timeout)),
            },
        };

        LoadCompletion { mount, result }
    }
}

/// Result of a [`LoadTask`], to be fed back through the picker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadCompletion {
    mount: MountId,
    result: Result<Vec<ListEntry>, LoadError>,
}

impl LoadCompletion {
    pub fn mount(&self) -> MountId {
        self.mount
    }

    pub fn result(&self) -> &Result<Vec<ListEntry>, LoadError> {
        &self.result
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Accepted {
    Entries(Vec<ListEntry>),
    Failed(LoadError),
    Discarded,
}

#[derive(Debug)]
pub struct Loader {
    mount: MountId,
    phase: LoadPhase,
    cancel: CancellationToken,
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

impl Loader {
    pub fn new() -> Self {
        Self {
            mount: MountId::next(),
            phase: LoadPhase::Idle,
            cancel: CancellationToken::new(),
        }
    }

    pub fn mount(&self) -> MountId {
        self.mount
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    /// Moves `Idle -> Loading` and returns the task. Any later call returns `None`.
    pub fn start(
        &mut self,
        source: Arc<dyn ListSource>,
        query: ListQuery,
        timeout: Duration,
    ) -> Option<LoadTask> {
        if self.phase != LoadPhase::Idle {
            tracing::debug!(mount = self.mount.0, phase = ?self.phase, "load already started");
            return None;
        }
        self.phase = LoadPhase::Loading;
        tracing::debug!(mount = self.mount.0, ?query, ?timeout, "loading lists");
        Some(LoadTask {
            mount: self.mount,
            source,
            query,
            timeout,
            cancel: self.cancel.clone(),
        })
    }

    /// Decides whether `completion` may still be applied to this mount.
    ///
    /// Entries are accepted once, while `Loading`. Failures keep the loader in `Loading`.
    pub fn accept(&mut self, completion: LoadCompletion) -> Accepted {
        if completion.mount != self.mount
            || self.phase != LoadPhase::Loading
            || self.cancel.is_cancelled()
        {
            tracing::debug!(
                mount = self.mount.0,
                from = completion.mount.0,
                phase = ?self.phase,
                "discarding load completion"
            );
            return Accepted::Discarded;
        }

        match completion.result {
            Ok(entries) => {
                self.phase = LoadPhase::Loaded;
                Accepted::Entries(entries)
            }
            Err(err) => {
                tracing::warn!(mount = self.mount.0, error = %err, "loading lists failed");
                Accepted::Failed(err)
            }
        }
    }

    pub fn unmount(&mut self) {
        if self.phase != LoadPhase::Unmounted {
            tracing::debug!(mount = self.mount.0, "unmounting");
        }
        self.phase = LoadPhase::Unmounted;
        self.cancel.cancel();
    }
}

impl Drop for Loader {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SourceError;
    use crate::source::SiteList;
    use crate::source::StaticListSource;

    fn source() -> Arc<dyn ListSource> {
        Arc::new(StaticListSource::new(vec![SiteList::new("L1", "Docs", 101)]))
    }

    #[test]
    fn start_is_one_shot() {
        let mut loader = Loader::new();
        assert!(loader.start(source(), ListQuery::default(), Duration::from_secs(1)).is_some());
        assert!(loader.start(source(), ListQuery::default(), Duration::from_secs(1)).is_none());
        assert_eq!(loader.phase(), LoadPhase::Loading);
    }

    #[test]
    fn mounts_are_distinct() {
        assert_ne!(Loader::new().mount(), Loader::new().mount());
    }

    #[tokio::test]
    async fn accepts_entries_once() {
        let mut loader = Loader::new();
        let task = loader
            .start(source(), ListQuery::default(), Duration::from_secs(1))
            .unwrap();
        let done = task.run().await;
        assert_eq!(
            loader.accept(done.clone()),
            Accepted::Entries(vec![ListEntry::new("L1", "Docs")])
        );
        assert_eq!(loader.phase(), LoadPhase::Loaded);
        assert_eq!(loader.accept(done), Accepted::Discarded);
    }

    #[tokio::test]
    async fn completion_for_another_mount_is_discarded() {
        let mut a = Loader::new();
        let mut b = Loader::new();
        let task = a
            .start(source(), ListQuery::default(), Duration::from_secs(1))
            .unwrap();
        b.start(source(), ListQuery::default(), Duration::from_secs(1));
        let done = task.run().await;
        assert_eq!(b.accept(done), Accepted::Discarded);
        assert_eq!(b.phase(), LoadPhase::Loading);
    }

    #[tokio::test]
    async fn source_error_keeps_loading() {
        let mut loader = Loader::new();
        let failing: Arc<dyn ListSource> =
            Arc::new(StaticListSource::failing(SourceError::Request("boom".into())));
        let task = loader
            .start(failing, ListQuery::default(), Duration::from_secs(1))
            .unwrap();
        let done = task.run().await;
        assert!(matches!(
            loader.accept(done),
            Accepted::Failed(LoadError::Source(SourceError::Request(_)))
        ));
        assert_eq!(loader.phase(), LoadPhase::Loading);
    }

    #[tokio::test(start_paused = true)]
    async fn hanging_source_times_out() {
        let mut loader = Loader::new();
        let task = loader
            .start(
                Arc::new(StaticListSource::hanging()),
                ListQuery::default(),
                Duration::from_millis(5000),
            )
            .unwrap();
        let done = task.run().await;
        assert_eq!(
            done.result(),
            &Err(LoadError::Timeout(Duration::from_millis(5000)))
        );
    }

    #[tokio::test]
    async fn unmount_cancels_in_flight_task() {
        let mut loader = Loader::new();
        let task = loader
            .start(
                Arc::new(StaticListSource::hanging()),
                ListQuery::default(),
                Duration::from_secs(3600),
            )
            .unwrap();
        loader.unmount();
        let done = task.run().await;
        assert_eq!(done.result(), &Err(LoadError::Cancelled));
        assert_eq!(loader.accept(done), Accepted::Discarded);
    }

    #[tokio::test]
    async fn dropping_the_loader_cancels() {
        let mut loader = Loader::new();
        let task = loader
            .start(
                Arc::new(StaticListSource::hanging()),
                ListQuery::default(),
                Duration::from_secs(3600),
            )
            .unwrap();
        drop(loader);
        assert_eq!(task.run().await.result(), &Err(LoadError::Cancelled));
    }
}
