// Copyright 2026 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The navigation state machine coordinating index changes, scroll settling,
//! and the load queue.

use alloc::rc::Weak;
use alloc::vec::Vec;
use core::fmt;

use quire_geometry::{Axis, PageLayout, ReadingDirection};

use crate::{
    LoadQueue, PageLocation, PageSource, PageView, PageWindow, PagingObserver, PreloadBudget,
    ViewportDriver,
};

/// What the scheduler is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationState {
    /// Settled on the current page.
    Idle,
    /// A user fling is decelerating; scrolling is locked to one page.
    Scrolling,
    /// A programmatic navigation is mid-transition.
    Transitioning {
        /// The index being navigated to.
        target: usize,
    },
}

/// Options for programmatic navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GoToOptions {
    /// Fade the viewport across the jump instead of cutting instantly.
    pub animated: bool,
}

/// Shorthand for the host's sub-location type behind a [`PageSource`].
type SourceLocation<S> = <<S as PageSource>::View as PageView>::Location;

/// Schedules page materialization and navigation for a paginated viewport.
///
/// The controller owns the [`PageSource`], the [`ViewportDriver`], the
/// materialized [`PageWindow`], and the [`LoadQueue`], and coordinates them:
/// an external navigation call or a scroll-settle event moves the current
/// index, the preload window is recomputed around it, stale pages are
/// evicted, and queued loads drain strictly one at a time.
///
/// All async entry points take `&mut self`, which is the concurrency
/// contract: everything runs on one logical execution context, at most one
/// navigation is in flight, and the exclusive borrow makes re-entering the
/// navigation flow from within an awaited callback impossible to compile.
///
/// The viewport's scroll axis is fixed at construction. Page count and
/// reading direction are set per [`PaginationController::reload`].
pub struct PaginationController<S: PageSource, D: ViewportDriver> {
    source: S,
    viewport: D,
    layout: PageLayout,
    budget: PreloadBudget,
    page_count: usize,
    current: Option<usize>,
    window: PageWindow<S::View>,
    queue: LoadQueue<SourceLocation<S>>,
    state: NavigationState,
    observer: Option<Weak<dyn PagingObserver>>,
}

impl<S: PageSource, D: ViewportDriver> PaginationController<S, D> {
    /// Creates an empty controller scrolling along `axis`.
    ///
    /// The controller starts with no pages ([`PaginationController::is_empty`]
    /// is `true`) until the first [`PaginationController::reload`].
    #[must_use]
    pub fn new(source: S, viewport: D, axis: Axis, budget: PreloadBudget) -> Self {
        Self {
            source,
            viewport,
            layout: PageLayout::new(axis, ReadingDirection::default()),
            budget,
            page_count: 0,
            current: None,
            window: PageWindow::new(),
            queue: LoadQueue::new(),
            state: NavigationState::Idle,
            observer: None,
        }
    }

    /// Returns the number of pages, `0` before the first reload.
    #[must_use]
    pub const fn page_count(&self) -> usize {
        self.page_count
    }

    /// Returns the current page index, `None` before the first reload.
    #[must_use]
    pub const fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Returns the reading direction applied at the last reload.
    #[must_use]
    pub const fn reading_direction(&self) -> ReadingDirection {
        self.layout.direction()
    }

    /// Returns `true` if no page is materialized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Returns the current page's view, if materialized.
    #[must_use]
    pub fn current_page_view(&self) -> Option<&S::View> {
        self.window.get(self.current?)
    }

    /// Returns what the scheduler is currently doing.
    #[must_use]
    pub const fn state(&self) -> NavigationState {
        self.state
    }

    /// Returns the preload budgets.
    #[must_use]
    pub const fn budgets(&self) -> PreloadBudget {
        self.budget
    }

    /// Replaces the preload budgets.
    ///
    /// Takes effect at the next window recomputation; the materialized set is
    /// not resized eagerly.
    pub fn set_preload_budgets(&mut self, budget: PreloadBudget) {
        self.budget = budget;
    }

    /// Returns the materialized page set.
    #[must_use]
    pub const fn pages(&self) -> &PageWindow<S::View> {
        &self.window
    }

    /// Returns the materialized indices in visual order.
    ///
    /// Ascending for vertical and horizontal left-to-right layouts;
    /// descending for horizontal right-to-left, where page 0 sits at the far
    /// right.
    #[must_use]
    pub fn visual_indices(&self) -> Vec<usize> {
        let mut indices = self.window.indices();
        if self.layout.axis() == Axis::Horizontal
            && self.layout.direction() == ReadingDirection::Rtl
        {
            indices.reverse();
        }
        indices
    }

    /// Registers the observer notified after each stabilized recomputation.
    ///
    /// The reference is non-owning: once the observer's last `Rc` is dropped,
    /// no further notification is delivered.
    pub fn set_observer(&mut self, observer: Weak<dyn PagingObserver>) {
        self.observer = Some(observer);
    }

    /// Deregisters the observer.
    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    /// Presents a new set of pages, replacing everything.
    ///
    /// Discards all materialized pages and pending loads, applies the new
    /// `page_count` and reading `direction`, resizes the scrollable content,
    /// and loads the window around `index`, seeking the current page to
    /// `location`. The previous current index is forgotten so this is never a
    /// no-op, even when reloading at the same index.
    ///
    /// # Panics
    ///
    /// Panics if `page_count == 0` or `index >= page_count`; both are
    /// programmer errors, not runtime conditions.
    pub async fn reload(
        &mut self,
        index: usize,
        location: PageLocation<SourceLocation<S>>,
        page_count: usize,
        direction: ReadingDirection,
    ) {
        assert!(page_count >= 1, "cannot reload with zero pages");
        assert!(
            index < page_count,
            "reload index {index} out of range for {page_count} pages"
        );
        log::debug!("reload: {page_count} pages, direction {direction:?}, initial index {index}");

        self.layout = self.layout.with_direction(direction);
        self.page_count = page_count;
        self.queue.clear();
        self.window.clear();
        self.current = None;
        self.state = NavigationState::Idle;

        let frame = self.viewport.frame_size();
        self.viewport
            .set_content_size(self.layout.content_size(page_count, frame));

        self.set_current_index(index, Some(location)).await;
    }

    /// Navigates to `index`, optionally fading across the jump.
    ///
    /// Returns `false` without any effect when `index` is out of range.
    /// Navigating to the current index performs no index transition and no
    /// window recomputation; the current page view is seeked to `location`
    /// directly (still awaited, so callers observe completion).
    ///
    /// For a different index the viewport is faded to transparent (the fade
    /// animation is awaited when `options.animated`, applied synchronously
    /// otherwise), the window is moved, the scroll offset jumps instantly to
    /// the new page under cover of the fade, and opacity is restored.
    pub async fn go_to_index(
        &mut self,
        index: usize,
        location: PageLocation<SourceLocation<S>>,
        options: GoToOptions,
    ) -> bool {
        if index >= self.page_count {
            return false;
        }

        if self.current == Some(index) {
            if let Some(view) = self.window.get_mut(index) {
                view.seek_to(location).await;
            }
            return true;
        }

        self.state = NavigationState::Transitioning { target: index };
        self.fade_to(0.0, options.animated).await;
        self.viewport.set_scroll_enabled(true);

        self.set_current_index(index, Some(location)).await;

        let extent = self.layout.axis().major(self.viewport.frame_size());
        let offset = self
            .layout
            .offset_for_index(index, extent, self.page_count);
        self.viewport
            .set_scroll_offset(self.layout.axis().point(offset));

        self.fade_to(1.0, options.animated).await;
        self.state = NavigationState::Idle;
        true
    }

    /// Reports that a user drag ended.
    ///
    /// When the release decelerates into a fling, scrolling is disabled so
    /// further gesture input cannot skip several pages mid-flight; it is
    /// re-enabled by [`PaginationController::deceleration_ended`]. A release
    /// with no deceleration leaves the viewport where it is and keeps
    /// scrolling enabled.
    pub fn drag_ended(&mut self, will_decelerate: bool) {
        if will_decelerate {
            self.viewport.set_scroll_enabled(false);
            self.state = NavigationState::Scrolling;
        } else {
            self.viewport.set_scroll_enabled(true);
            self.state = NavigationState::Idle;
        }
    }

    /// Reports that a fling finished decelerating.
    ///
    /// Re-enables scrolling, resolves the nearest page from the settled
    /// scroll offset through the inverse coordinate mapping, and moves the
    /// window there. The landing location is implicit: entering the
    /// immediately previous page lands at its end, any other move lands at
    /// the start.
    pub async fn deceleration_ended(&mut self) {
        self.viewport.set_scroll_enabled(true);
        self.state = NavigationState::Idle;
        if self.page_count == 0 {
            return;
        }

        let extent = self.layout.axis().major(self.viewport.frame_size());
        let offset = self
            .layout
            .axis()
            .major_of_point(self.viewport.scroll_offset());
        let index = self.layout.index_for_offset(offset, extent, self.page_count);
        log::trace!("scroll settled at offset {offset} -> page {index}");

        self.set_current_index(index, None).await;
    }

    /// Reports that a host-driven scroll animation finished.
    ///
    /// Only re-enables scrolling; the host is expected to follow up with its
    /// own settle handling if the animation changed the page.
    pub fn scroll_animation_ended(&mut self) {
        self.viewport.set_scroll_enabled(true);
        self.state = NavigationState::Idle;
    }

    /// Reapplies layout after the viewport's frame size changed.
    ///
    /// Resizes the scrollable content, re-places every materialized page's
    /// frame, and restores the scroll offset for the current page so a resize
    /// never visually moves the reader.
    pub fn viewport_resized(&mut self) {
        if self.page_count == 0 {
            return;
        }
        let frame = self.viewport.frame_size();
        self.viewport
            .set_content_size(self.layout.content_size(self.page_count, frame));
        for (index, view) in self.window.iter_mut() {
            view.set_frame(self.layout.page_frame(index, frame, self.page_count));
        }
        if let Some(current) = self.current {
            let extent = self.layout.axis().major(frame);
            let offset = self
                .layout
                .offset_for_index(current, extent, self.page_count);
            self.viewport
                .set_scroll_offset(self.layout.axis().point(offset));
        }
    }

    /// The shared index-set flow behind reloads, navigation, and settling.
    async fn set_current_index(
        &mut self,
        index: usize,
        location: Option<PageLocation<SourceLocation<S>>>,
    ) {
        debug_assert!(
            index < self.page_count,
            "index {index} out of range for {} pages",
            self.page_count
        );
        if !self.window.is_empty() && self.current == Some(index) {
            return;
        }

        // Entering the immediately previous page means the reader moved
        // backward; without an explicit target they land at its end.
        let moving_backward = self.current.and_then(|c| c.checked_sub(1)) == Some(index);
        let location = location.unwrap_or(if moving_backward {
            PageLocation::End
        } else {
            PageLocation::Start
        });

        self.current = Some(index);
        let (first, last) = self.window.plan(
            &mut self.source,
            &mut self.queue,
            index,
            location,
            self.budget,
            self.page_count,
        );
        log::debug!("window recomputed: current {index}, keep range [{first}, {last}]");

        self.drain().await;
        self.notify_views_changed();
    }

    /// Drains the load queue strictly sequentially.
    ///
    /// One request at a time: materialize the page if the source supplies it
    /// (a decline leaves the index unmaterialized and moves on), then await
    /// its seek. The exclusive borrow guarantees no second drain can start
    /// while one is suspended.
    async fn drain(&mut self) {
        while let Some(request) = self.queue.pop() {
            let index = request.index;
            if !self.window.contains(index) {
                if let Some(mut view) = self.source.create_page_view(index) {
                    let frame = self.viewport.frame_size();
                    view.set_frame(self.layout.page_frame(index, frame, self.page_count));
                    self.window.insert(index, view);
                } else {
                    log::trace!("source declined page {index}");
                }
            }
            if let Some(view) = self.window.get_mut(index) {
                view.seek_to(request.location).await;
            }
        }
    }

    async fn fade_to(&mut self, opacity: f64, animated: bool) {
        if animated {
            self.viewport.animate_opacity(opacity).await;
        } else {
            self.viewport.set_opacity(opacity);
        }
    }

    fn notify_views_changed(&self) {
        if let Some(observer) = self.observer.as_ref().and_then(Weak::upgrade) {
            observer.page_views_changed();
        }
    }
}

impl<S: PageSource, D: ViewportDriver> fmt::Debug for PaginationController<S, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaginationController")
            .field("page_count", &self.page_count)
            .field("current", &self.current)
            .field("state", &self.state)
            .field("window", &self.window)
            .field("queue", &self.queue)
            .finish_non_exhaustive()
    }
}
