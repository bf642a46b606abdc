// Copyright 2026 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interfaces through which the scheduler talks to its host.
//!
//! The scheduler never renders, measures, or scrolls anything itself. Pages
//! come from a [`PageSource`], land in the viewport through their own
//! [`PageView`] handles, and the scrollable surface is driven through a
//! [`ViewportDriver`]. Hosts that want to react to materialization changes
//! register a [`PagingObserver`].
//!
//! All asynchronous capabilities are expressed as
//! [`LocalBoxFuture`]s so the scheduler stays executor-agnostic: hosts decide
//! how these futures are driven, as long as all of them run on the same
//! logical execution context as the scheduler itself.

use futures_util::future::LocalBoxFuture;
use kurbo::{Point, Rect, Size};

use crate::PageLocation;

/// A live, renderable page handle.
///
/// The scheduler owns a page view from materialization until eviction.
/// Dropping the handle is the eviction signal: hosts detach the underlying
/// surface from the viewport in their `Drop` implementation.
pub trait PageView {
    /// The host's sub-location type, handed through to [`PageView::seek_to`].
    type Location;

    /// Places the page within the scrollable content.
    ///
    /// Called once after materialization and again whenever the viewport is
    /// resized or reloaded.
    fn set_frame(&mut self, frame: Rect);

    /// Moves the page's own content to `location`.
    ///
    /// The returned future must resolve once the page has settled visually at
    /// the requested position. There is no error channel and no timeout: a
    /// seek that never completes stalls the load queue, which is an accepted
    /// limitation pushed onto the page implementation.
    fn seek_to(&mut self, location: PageLocation<Self::Location>) -> LocalBoxFuture<'_, ()>;
}

/// Supplies page views and per-page content weights on demand.
pub trait PageSource {
    /// The page view type this source produces.
    type View: PageView;

    /// Creates a page view for `index`, or declines.
    ///
    /// A decline is not an error: the index simply stays unmaterialized until
    /// some later window recomputation requests it again.
    fn create_page_view(
        &mut self,
        index: usize,
    ) -> Option<Self::View>;

    /// Reports the content-position weight of page `index`.
    ///
    /// Positions are abstract content units (for example, synthetic page
    /// positions within a resource): a dense page may weigh several positions,
    /// a sparse one a single position. `None` means the index has no content
    /// and stops the preload walk in that direction.
    fn position_count(&mut self, index: usize) -> Option<usize>;
}

/// Drives the host's scrollable surface.
///
/// Offsets and sizes are in the viewport's own coordinate space. The scroll
/// offset is a 2D point even though pagination only ever moves it along one
/// axis; the cross-axis component is preserved as given.
pub trait ViewportDriver {
    /// The viewport's current frame size. One page occupies exactly one frame.
    fn frame_size(&self) -> Size;

    /// The current scroll offset.
    fn scroll_offset(&self) -> Point;

    /// Moves the scroll offset instantly, with no inertia or animation.
    fn set_scroll_offset(&mut self, offset: Point);

    /// Resizes the scrollable content.
    fn set_content_size(&mut self, size: Size);

    /// Enables or disables user scrolling.
    ///
    /// The scheduler disables scrolling while a fling decelerates so a single
    /// gesture cannot skip several pages, and re-enables it once the viewport
    /// settles.
    fn set_scroll_enabled(&mut self, enabled: bool);

    /// Sets the viewport's opacity immediately.
    fn set_opacity(&mut self, opacity: f64);

    /// Fades the viewport's opacity, resolving when the animation completes.
    fn animate_opacity(&mut self, opacity: f64) -> LocalBoxFuture<'_, ()>;
}

/// Receives notifications when the materialized page set changes.
///
/// Observers are registered as non-owning [`alloc::rc::Weak`] references: the
/// scheduler never keeps an observer alive, and an observer that has been
/// dropped receives nothing.
pub trait PagingObserver {
    /// The set of materialized page views changed.
    ///
    /// Fired after every stabilized window recomputation, once the load queue
    /// has drained.
    fn page_views_changed(&self);
}
