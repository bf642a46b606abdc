// Copyright 2026 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The sequential load queue.

use alloc::collections::VecDeque;
use core::fmt;

use crate::PageLocation;

/// A pending request to materialize and position one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest<L> {
    /// The page to load.
    pub index: usize,
    /// Where within the page to land once loaded.
    pub location: PageLocation<L>,
}

/// An ordered, de-duplicating queue of page load requests.
///
/// The queue holds at most one pending request per page index. Enqueueing an
/// index that is already queued removes the old entry first and appends the
/// new one at the tail, so among pending requests the most recently requested
/// index is always the last to load. Net of that replace rule, requests drain
/// strictly FIFO by enqueue time.
///
/// The queue itself is passive; the navigation controller drains it one
/// request at a time, awaiting each page's seek before popping the next.
pub struct LoadQueue<L> {
    requests: VecDeque<LoadRequest<L>>,
}

impl<L> LoadQueue<L> {
    /// Creates an empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            requests: VecDeque::new(),
        }
    }

    /// Queues a load of `index` targeting `location`.
    ///
    /// Any pending request for the same index is replaced and moved to the
    /// tail of the queue.
    pub fn enqueue(&mut self, index: usize, location: PageLocation<L>) {
        if let Some(pos) = self.requests.iter().position(|r| r.index == index) {
            self.requests.remove(pos);
        }
        self.requests.push_back(LoadRequest { index, location });
    }

    /// Removes and returns the request at the head of the queue.
    pub fn pop(&mut self) -> Option<LoadRequest<L>> {
        self.requests.pop_front()
    }

    /// Returns the number of pending requests.
    #[must_use]
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Returns `true` if no requests are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Discards all pending requests.
    pub fn clear(&mut self) {
        self.requests.clear();
    }

    /// Iterates over the pending page indices in drain order.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.requests.iter().map(|r| r.index)
    }
}

impl<L> Default for LoadQueue<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L> fmt::Debug for LoadQueue<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadQueue")
            .field("indices", &self.indices().collect::<alloc::vec::Vec<_>>())
            .finish()
    }
}
