//! The remote side of the picker: what gets asked for and who answers.
//!
//! [`ListSource`] is the only seam between the picker and the network. Implementations are
//! expected to apply the [`ListQuery`] filters themselves; the picker passes them through
//! untouched and keeps whatever order the source returns.

use crate::error::SourceError;
use async_trait::async_trait;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListOrderBy {
    Id,
    Title,
}

/// Filter attributes forwarded verbatim to the source.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// Only lists created from this template (for example `100` for generic lists,
    /// `101` for document libraries).
    pub base_template: Option<u32>,
    pub include_hidden: bool,
    pub order_by: Option<ListOrderBy>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListEntry {
    pub id: String,
    pub title: String,
}

impl ListEntry {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

#[async_trait]
pub trait ListSource: Send + Sync {
    async fn fetch_lists(&self, query: &ListQuery) -> Result<Vec<ListEntry>, SourceError>;
}

/// A list as stored by [`StaticListSource`], with the attributes queries filter on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteList {
    pub entry: ListEntry,
    pub base_template: u32,
    pub hidden: bool,
}

impl SiteList {
    pub fn new(id: impl Into<String>, title: impl Into<String>, base_template: u32) -> Self {
        Self {
            entry: ListEntry::new(id, title),
            base_template,
            hidden: false,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}

#[derive(Clone, Debug, Default)]
enum Behavior {
    #[default]
    Answer,
    Fail(SourceError),
    Hang,
}

/// In-memory [`ListSource`] for demos, tests, and offline hosts.
#[derive(Clone, Debug, Default)]
pub struct StaticListSource {
    lists: Vec<SiteList>,
    behavior: Behavior,
}

impl StaticListSource {
    pub fn new(lists: Vec<SiteList>) -> Self {
        Self {
            lists,
            behavior: Behavior::Answer,
        }
    }

    /// Every fetch fails with `err`.
    pub fn failing(err: SourceError) -> Self {
        Self {
            lists: Vec::new(),
            behavior: Behavior::Fail(err),
        }
    }

    /// Every fetch stays pending forever.
    pub fn hanging() -> Self {
        Self {
            lists: Vec::new(),
            behavior: Behavior::Hang,
        }
    }

    pub fn query(&self, query: &ListQuery) -> Vec<ListEntry> {
        let mut hits: Vec<&SiteList> = self
            .lists
            .iter()
            .filter(|l| query.include_hidden || !l.hidden)
            .filter(|l| {
                query
                    .base_template
                    .is_none_or(|template| l.base_template == template)
            })
            .collect();

        match query.order_by {
            Some(ListOrderBy::Id) => hits.sort_by(|a, b| a.entry.id.cmp(&b.entry.id)),
            Some(ListOrderBy::Title) => hits.sort_by(|a, b| a.entry.title.cmp(&b.entry.title)),
            None => {}
        }

        hits.into_iter().map(|l| l.entry.clone()).collect()
    }
}

#[async_trait]
impl ListSource for StaticListSource {
    async fn fetch_lists(&self, query: &ListQuery) -> Result<Vec<ListEntry>, SourceError> {
        match &self.behavior {
            Behavior::Answer => Ok(self.query(query)),
            Behavior::Fail(err) => Err(err.clone()),
            Behavior::Hang => std::future::pending().await,
        }
    }
}
