//! Lazily paginated result sets.

use futures::stream::{self, Stream};
use tracing::warn;
use twenty_client::Transport;
use twenty_metadata::EntitySchema;

use crate::entity::Entity;
use crate::error::Error;
use crate::options::FindOptions;
use crate::response::Page;
use crate::service::fetch_page;

/// What is needed to fetch the page after the current one.
#[derive(Debug, Clone)]
pub(crate) struct FetchContext<T> {
    pub(crate) transport: T,
    pub(crate) schema: EntitySchema,
    pub(crate) filter: String,
    pub(crate) options: FindOptions,
}

/// Records loaded so far plus the means to load more.
///
/// Traversal with [`next_entity`](Self::next_entity) fetches the next page
/// when the loaded items run out and the server reported more. A failed
/// fetch ends traversal instead of raising; the error is kept in
/// [`fetch_error`](Self::fetch_error).
#[derive(Debug)]
pub struct EntityCollection<T> {
    items: Vec<Entity>,
    position: usize,
    total_count: Option<u64>,
    has_more: bool,
    start_cursor: Option<String>,
    end_cursor: Option<String>,
    context: Option<FetchContext<T>>,
    fetch_error: Option<Error>,
}

impl<T> EntityCollection<T> {
    /// A fully loaded collection that never fetches.
    pub fn new(items: Vec<Entity>) -> Self {
        Self::from_page(
            Page {
                items,
                ..Page::default()
            },
            None,
        )
    }

    pub(crate) fn from_page(page: Page, context: Option<FetchContext<T>>) -> Self {
        Self {
            items: page.items,
            position: 0,
            total_count: page.total_count,
            has_more: page.has_next_page,
            start_cursor: page.start_cursor,
            end_cursor: page.end_cursor,
            context,
            fetch_error: None,
        }
    }

    /// Number of loaded items, not the remote total.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total the server reported for the query, if it did.
    pub fn total_count(&self) -> Option<u64> {
        self.total_count
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn start_cursor(&self) -> Option<&str> {
        self.start_cursor.as_deref()
    }

    pub fn end_cursor(&self) -> Option<&str> {
        self.end_cursor.as_deref()
    }

    /// The error that cut traversal short, if any.
    pub fn fetch_error(&self) -> Option<&Error> {
        self.fetch_error.as_ref()
    }

    pub fn items(&self) -> &[Entity] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entity> {
        self.items.iter()
    }

    pub fn first(&self) -> Option<&Entity> {
        self.items.first()
    }

    pub fn get(&self, index: usize) -> Option<&Entity> {
        self.items.get(index)
    }

    /// Ids of the loaded items that have one.
    pub fn ids(&self) -> Vec<&str> {
        self.items.iter().filter_map(Entity::id).collect()
    }

    /// Restart [`next_entity`](Self::next_entity) from the first loaded item.
    pub fn rewind(&mut self) {
        self.position = 0;
    }

    pub fn into_items(self) -> Vec<Entity> {
        self.items
    }

    /// Append a fetched page. `sent` is the cursor the page was requested
    /// with; a page that claims more results without moving past it ends
    /// traversal.
    fn absorb(&mut self, page: Page, sent: &str) {
        self.items.extend(page.items);
        self.total_count = page.total_count.or(self.total_count);

        if !page.has_next_page {
            self.has_more = false;
            if page.end_cursor.is_some() {
                self.end_cursor = page.end_cursor;
            }
            return;
        }
        match page.end_cursor {
            Some(cursor) if cursor != sent => {
                self.has_more = true;
                self.end_cursor = Some(cursor);
            }
            stalled => {
                warn!(
                    cursor = sent,
                    next = ?stalled,
                    loaded = self.items.len(),
                    "Page cursor did not advance, ending traversal"
                );
                self.has_more = false;
            }
        }
    }
}

impl<T: Transport> EntityCollection<T> {
    /// Next item, fetching one more page first if the loaded ones are used up.
    ///
    /// Empty pages are skipped while the server still reports more.
    pub async fn next_entity(&mut self) -> Option<&Entity> {
        while self.position >= self.items.len() {
            if !self.fetch_next_page().await {
                return None;
            }
        }
        let item = self.items.get(self.position)?;
        self.position += 1;
        Some(item)
    }

    /// Load every remaining page. Stops at the first failure, as traversal does.
    pub async fn load_all(&mut self) -> &[Entity] {
        while self.fetch_next_page().await {}
        &self.items
    }

    /// Traverse as a stream, fetching pages as needed.
    pub fn into_stream(self) -> impl Stream<Item = Entity> {
        stream::unfold(self, |mut collection| async move {
            let entity = collection.next_entity().await.cloned()?;
            Some((entity, collection))
        })
    }

    /// Returns `true` when a page was fetched.
    async fn fetch_next_page(&mut self) -> bool {
        if !self.has_more {
            return false;
        }
        let (Some(context), Some(cursor)) = (&self.context, self.end_cursor.clone()) else {
            self.has_more = false;
            return false;
        };

        let options = context.options.next_page(cursor.clone());
        let result = fetch_page(&context.transport, &context.schema, &context.filter, &options).await;
        match result {
            Ok(page) => {
                self.absorb(page, &cursor);
                true
            }
            Err(err) => {
                warn!(
                    object = context.schema.object_name(),
                    loaded = self.items.len(),
                    error = %err,
                    "Next page fetch failed, ending traversal"
                );
                self.has_more = false;
                self.fetch_error = Some(err);
                false
            }
        }
    }
}

impl<'a, T> IntoIterator for &'a EntityCollection<T> {
    type Item = &'a Entity;
    type IntoIter = std::slice::Iter<'a, Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
