// Copyright 2026 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The materialization window: which pages are kept live around the current one.

use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::{LoadQueue, PageLocation, PageSource, PageView};

/// Preload allowance on each side of the current page, in content positions.
///
/// Budgets are *not* page counts: each candidate neighbor consumes its own
/// host-reported position weight, so a budget of, say, 20 positions preloads
/// many sparse pages but few dense ones. A zero budget preloads nothing in
/// that direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreloadBudget {
    /// Positions to keep materialized before the current page.
    pub previous: usize,
    /// Positions to keep materialized after the current page.
    pub next: usize,
}

impl PreloadBudget {
    /// Creates a budget with the given per-direction allowances.
    #[must_use]
    pub const fn new(previous: usize, next: usize) -> Self {
        Self { previous, next }
    }
}

impl Default for PreloadBudget {
    /// One position on each side: the immediate neighbors of a typical page.
    fn default() -> Self {
        Self::new(1, 1)
    }
}

/// The set of materialized pages, keyed by index.
///
/// The window owns its page views exclusively. Eviction drops the handle,
/// which is the host's signal to detach the page from the viewport.
/// After any stabilized recomputation the key set is exactly the contiguous
/// range returned by [`PageWindow::plan`], possibly narrower while loads are
/// still in flight.
pub struct PageWindow<V> {
    views: HashMap<usize, V>,
}

impl<V> PageWindow<V> {
    /// Creates an empty window.
    #[must_use]
    pub fn new() -> Self {
        Self {
            views: HashMap::new(),
        }
    }

    /// Returns `true` if no page is materialized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Returns the number of materialized pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// Returns `true` if `index` is materialized.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.views.contains_key(&index)
    }

    /// Returns the page view at `index`, if materialized.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&V> {
        self.views.get(&index)
    }

    /// Returns the page view at `index` mutably, if materialized.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut V> {
        self.views.get_mut(&index)
    }

    /// Materializes `view` at `index`, replacing any previous occupant.
    pub fn insert(&mut self, index: usize, view: V) {
        self.views.insert(index, view);
    }

    /// Iterates over materialized pages mutably, in no particular order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, &mut V)> {
        self.views.iter_mut().map(|(&index, view)| (index, view))
    }

    /// Returns the materialized indices in ascending order.
    #[must_use]
    pub fn indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = self.views.keys().copied().collect();
        indices.sort_unstable();
        indices
    }

    /// Drops every materialized page.
    pub fn clear(&mut self) {
        self.views.clear();
    }

    /// Drops every materialized page outside `[first, last]`.
    fn evict_outside(&mut self, first: usize, last: usize) {
        let stale: SmallVec<[usize; 8]> = self
            .views
            .keys()
            .copied()
            .filter(|&index| index < first || index > last)
            .collect();
        for index in &stale {
            self.views.remove(index);
        }
        if !stale.is_empty() {
            log::debug!("evicted pages {stale:?} outside window [{first}, {last}]");
        }
    }
}

impl<V: PageView> PageWindow<V> {
    /// Recomputes the keep-range around `from_index` and queues its loads.
    ///
    /// The current page is enqueued first with the caller's target
    /// `location`, then neighbors are enqueued walking forward with
    /// [`PageLocation::Start`] against the `next` budget, then backward with
    /// [`PageLocation::End`] against the `previous` budget. Each candidate's
    /// host-reported position weight is subtracted from the remaining budget;
    /// a walk stops when its budget is exhausted, the index leaves
    /// `[0, page_count)`, or the host declines a position count, whichever
    /// comes first.
    ///
    /// Pages outside the resulting `[first, last]` range are evicted
    /// immediately. The returned bounds are the last successfully enqueued
    /// index in each direction, or `from_index` itself when no neighbor
    /// qualified.
    pub fn plan<S>(
        &mut self,
        source: &mut S,
        queue: &mut LoadQueue<V::Location>,
        from_index: usize,
        location: PageLocation<V::Location>,
        budget: PreloadBudget,
        page_count: usize,
    ) -> (usize, usize)
    where
        S: PageSource<View = V>,
    {
        queue.enqueue(from_index, location);

        let mut last = from_index;
        let mut remaining = budget.next;
        while remaining > 0 {
            let candidate = last + 1;
            if candidate >= page_count {
                break;
            }
            let Some(weight) = source.position_count(candidate) else {
                break;
            };
            queue.enqueue(candidate, PageLocation::Start);
            last = candidate;
            remaining = remaining.saturating_sub(weight);
        }

        let mut first = from_index;
        let mut remaining = budget.previous;
        while remaining > 0 {
            let Some(candidate) = first.checked_sub(1) else {
                break;
            };
            let Some(weight) = source.position_count(candidate) else {
                break;
            };
            queue.enqueue(candidate, PageLocation::End);
            first = candidate;
            remaining = remaining.saturating_sub(weight);
        }

        self.evict_outside(first, last);
        (first, last)
    }
}

impl<V> Default for PageWindow<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for PageWindow<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageWindow")
            .field("indices", &self.indices())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use futures_util::FutureExt as _;
    use futures_util::future::LocalBoxFuture;
    use kurbo::Rect;

    use super::{PageWindow, PreloadBudget};
    use crate::{LoadQueue, PageLocation, PageSource, PageView};

    struct StubView;

    impl PageView for StubView {
        type Location = ();

        fn set_frame(&mut self, _frame: Rect) {}

        fn seek_to(&mut self, _location: PageLocation<()>) -> LocalBoxFuture<'_, ()> {
            async {}.boxed_local()
        }
    }

    /// A source whose pages all weigh one position, declining past `limit`.
    struct StubSource {
        limit: usize,
        asked: RefCell<Vec<usize>>,
    }

    impl StubSource {
        fn new(limit: usize) -> Self {
            Self {
                limit,
                asked: RefCell::new(Vec::new()),
            }
        }
    }

    impl PageSource for StubSource {
        type View = StubView;

        fn create_page_view(&mut self, _index: usize) -> Option<StubView> {
            Some(StubView)
        }

        fn position_count(&mut self, index: usize) -> Option<usize> {
            self.asked.borrow_mut().push(index);
            (index < self.limit).then_some(1)
        }
    }

    #[test]
    fn plan_enqueues_current_then_forward_then_backward() {
        let mut window: PageWindow<StubView> = PageWindow::new();
        let mut queue = LoadQueue::new();
        let mut source = StubSource::new(10);

        let (first, last) = window.plan(
            &mut source,
            &mut queue,
            5,
            PageLocation::Start,
            PreloadBudget::new(1, 1),
            10,
        );

        assert_eq!((first, last), (4, 6));
        assert_eq!(queue.indices().collect::<Vec<_>>(), [5, 6, 4]);
    }

    #[test]
    fn budgets_are_spent_in_positions_not_pages() {
        let mut window: PageWindow<StubView> = PageWindow::new();
        let mut queue = LoadQueue::new();
        let mut source = StubSource::new(100);

        // Three positions forward: pages 6, 7, 8 at one position each.
        let (first, last) = window.plan(
            &mut source,
            &mut queue,
            5,
            PageLocation::Start,
            PreloadBudget::new(0, 3),
            100,
        );
        assert_eq!((first, last), (5, 8));

        // A dense page eats the whole budget at once.
        struct DenseSource;
        impl PageSource for DenseSource {
            type View = StubView;
            fn create_page_view(&mut self, _index: usize) -> Option<StubView> {
                Some(StubView)
            }
            fn position_count(&mut self, _index: usize) -> Option<usize> {
                Some(3)
            }
        }
        let mut queue = LoadQueue::new();
        let (first, last) = window.plan(
            &mut DenseSource,
            &mut queue,
            5,
            PageLocation::Start,
            PreloadBudget::new(0, 3),
            100,
        );
        assert_eq!((first, last), (5, 6));
    }

    #[test]
    fn walks_stop_at_document_bounds() {
        let mut window: PageWindow<StubView> = PageWindow::new();
        let mut queue = LoadQueue::new();
        let mut source = StubSource::new(3);

        // At the last page, the forward walk has nowhere to go.
        let (first, last) = window.plan(
            &mut source,
            &mut queue,
            2,
            PageLocation::End,
            PreloadBudget::new(1, 1),
            3,
        );
        assert_eq!((first, last), (1, 2));

        // At the first page, the backward walk has nowhere to go.
        let mut queue = LoadQueue::new();
        let (first, last) = window.plan(
            &mut source,
            &mut queue,
            0,
            PageLocation::Start,
            PreloadBudget::new(1, 1),
            3,
        );
        assert_eq!((first, last), (0, 1));
    }

    #[test]
    fn a_declined_position_count_stops_the_walk_despite_budget() {
        let mut window: PageWindow<StubView> = PageWindow::new();
        let mut queue = LoadQueue::new();
        // The source declines from page 7 onward.
        let mut source = StubSource::new(7);

        let (first, last) = window.plan(
            &mut source,
            &mut queue,
            6,
            PageLocation::Start,
            PreloadBudget::new(2, 2),
            100,
        );

        // Forward stopped at the decline; backward ran its full budget.
        assert_eq!((first, last), (4, 6));
        // The walk did not probe past the first decline.
        assert_eq!(*source.asked.borrow(), [7, 5, 4]);
    }

    #[test]
    fn planning_evicts_pages_outside_the_new_range() {
        let mut window: PageWindow<StubView> = PageWindow::new();
        for index in 4..=6 {
            window.insert(index, StubView);
        }

        let mut queue = LoadQueue::new();
        let mut source = StubSource::new(10);
        window.plan(
            &mut source,
            &mut queue,
            7,
            PageLocation::Start,
            PreloadBudget::new(1, 1),
            10,
        );

        // 4 and 5 fall outside [6, 8] and are dropped; 6 survives.
        assert_eq!(window.indices(), [6]);
        assert!(window.contains(6));
        assert!(!window.contains(4));
    }
}
