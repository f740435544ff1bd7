use std::time::Duration;

/// Failure reported by a [`crate::source::ListSource`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    #[error("list request failed: {0}")]
    Request(String),
    #[error("list response could not be decoded: {0}")]
    Decode(String),
}

/// Why a load finished without producing options.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("list source did not answer within {0:?}")]
    Timeout(Duration),
    #[error("load was cancelled before the source answered")]
    Cancelled,
    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Returned by [`crate::picker::ListPicker::select`] when a selection is refused.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SelectError {
    #[error("options are still loading")]
    Loading,
    #[error("the picker has been unmounted")]
    Unmounted,
    #[error("the picker is disabled")]
    Disabled,
    #[error("no option with key `{0}`")]
    UnknownKey(String),
}
