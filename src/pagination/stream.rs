//! Lazy record stream over a paged collection
//!
//! Yields the records of the current page, then moves the collection to the
//! next page and carries on, until there is no next page or a fetch fails.

use super::collection::PagedCollection;
use super::types::StreamOptions;
use crate::record::Record;
use futures::Stream;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StreamState {
    NotStarted,
    Draining,
    Done,
}

/// Forward-only, single-pass sequence of records.
///
/// The stream borrows its collection mutably, so only one stream can drive
/// a collection at a time. Starting a new stream over the same collection
/// goes back to page one (one extra fetch) unless told otherwise.
pub struct RecordStream<'a> {
    collection: &'a mut PagedCollection,
    options: StreamOptions,
    buffer: VecDeque<Record>,
    state: StreamState,
}

impl<'a> RecordStream<'a> {
    pub(crate) fn new(collection: &'a mut PagedCollection, options: StreamOptions) -> Self {
        Self {
            collection,
            options,
            buffer: VecDeque::new(),
            state: StreamState::NotStarted,
        }
    }

    /// Next record, fetching the next page when the current one is used up
    pub async fn next(&mut self) -> Option<Record> {
        loop {
            if let Some(record) = self.buffer.pop_front() {
                return Some(record);
            }

            match self.state {
                StreamState::NotStarted => {
                    // Iteration proceeds from the current page when this fails
                    if self.options.reset_to_first_page {
                        self.collection.first_page().await;
                    }
                    self.state = StreamState::Draining;
                }
                StreamState::Draining => {
                    if self.options.stop_at_page_boundary || !self.collection.next_page().await {
                        self.state = StreamState::Done;
                        return None;
                    }
                }
                StreamState::Done => return None,
            }

            self.buffer = self.collection.list_elements().into();
        }
    }

    /// Server-reported record total at the time of the call, not the number
    /// of records yielded so far
    pub fn len(&self) -> u64 {
        self.collection.record_count()
    }

    /// Whether the server reports no records at all
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The collection being streamed
    pub fn collection(&self) -> &PagedCollection {
        &*self.collection
    }

    /// Adapt into a [`futures::Stream`]
    pub fn into_stream(self) -> impl Stream<Item = Record> + 'a {
        futures::stream::unfold(self, |mut stream| async move {
            let record = stream.next().await?;
            Some((record, stream))
        })
    }
}

impl std::fmt::Debug for RecordStream<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStream")
            .field("collection", &*self.collection)
            .field("options", &self.options)
            .field("buffered", &self.buffer.len())
            .field("state", &self.state)
            .finish()
    }
}
