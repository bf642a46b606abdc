// Copyright 2026 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quire Paging: windowed page materialization for paginated reading viewports.
//!
//! This crate decides which discrete pages of a paginated publication are
//! materialized at any time, preloads a bounded window of neighbors along the
//! reading direction, and keeps the current page synchronized with the
//! viewport's scroll position. It renders nothing itself: pages, position
//! weights, and the scrollable surface all come from the host through the
//! traits in this crate.
//!
//! The moving parts are:
//!
//! - [`PaginationController`]: the navigation state machine. External
//!   navigation ([`PaginationController::reload`],
//!   [`PaginationController::go_to_index`]) and scroll-settle events both
//!   funnel into one shared index-set flow.
//! - [`PageWindow`]: the materialized page set, recomputed around the current
//!   index with [`PreloadBudget`]s measured in content positions, not page
//!   counts — dense pages preload fewer page-units than sparse ones.
//! - [`LoadQueue`]: an ordered, de-duplicating queue of
//!   `(index, PageLocation)` requests, drained strictly one at a time with
//!   each page's seek awaited before the next load starts.
//! - Host traits: [`PageSource`] supplies [`PageView`]s and position counts,
//!   [`ViewportDriver`] moves the scrollable surface, [`PagingObserver`]
//!   hears about materialization changes.
//!
//! Coordinate mapping between page indices and scroll offsets, including
//! right-to-left layouts, lives in [`quire_geometry`].
//!
//! ## Concurrency model
//!
//! Everything runs on one logical execution context. The only suspension
//! points are a page view's seek and an opacity fade, both expressed as
//! executor-agnostic [`futures_util::future::LocalBoxFuture`]s. All async
//! entry points take `&mut self`, so at most one navigation is ever in
//! flight and re-entering the flow from an awaited callback does not
//! compile. There is no cancellation and no timeout: a seek that never
//! resolves stalls the queue, an accepted limitation left to page
//! implementations.
//!
//! ## Example
//!
//! A host with thirty uniform pages and a 375-point-wide viewport:
//!
//! ```rust
//! use kurbo::{Point, Rect, Size};
//! use quire_geometry::{Axis, ReadingDirection};
//! use quire_paging::{
//!     GoToOptions, PageLocation, PageSource, PageView, PaginationController, PreloadBudget,
//!     ViewportDriver,
//! };
//! # use futures_util::FutureExt as _;
//! # use futures_util::future::LocalBoxFuture;
//! #
//! # struct Page;
//! # impl PageView for Page {
//! #     type Location = ();
//! #     fn set_frame(&mut self, _frame: Rect) {}
//! #     fn seek_to(&mut self, _location: PageLocation<()>) -> LocalBoxFuture<'_, ()> {
//! #         async {}.boxed_local()
//! #     }
//! # }
//! #
//! # struct Source;
//! # impl PageSource for Source {
//! #     type View = Page;
//! #     fn create_page_view(&mut self, _index: usize) -> Option<Page> {
//! #         Some(Page)
//! #     }
//! #     fn position_count(&mut self, index: usize) -> Option<usize> {
//! #         (index < 30).then_some(1)
//! #     }
//! # }
//! #
//! # struct Viewport {
//! #     offset: Point,
//! # }
//! # impl ViewportDriver for Viewport {
//! #     fn frame_size(&self) -> Size {
//! #         Size::new(375.0, 812.0)
//! #     }
//! #     fn scroll_offset(&self) -> Point {
//! #         self.offset
//! #     }
//! #     fn set_scroll_offset(&mut self, offset: Point) {
//! #         self.offset = offset;
//! #     }
//! #     fn set_content_size(&mut self, _size: Size) {}
//! #     fn set_scroll_enabled(&mut self, _enabled: bool) {}
//! #     fn set_opacity(&mut self, _opacity: f64) {}
//! #     fn animate_opacity(&mut self, _opacity: f64) -> LocalBoxFuture<'_, ()> {
//! #         async {}.boxed_local()
//! #     }
//! # }
//! #
//! // `Source` hands out page views, `Viewport` wraps the host's scroll
//! // surface (both elided here). Keep two positions behind the reader and
//! // six ahead.
//! let mut pages = PaginationController::new(
//!     Source,
//!     Viewport { offset: Point::ZERO },
//!     Axis::Horizontal,
//!     PreloadBudget::new(2, 6),
//! );
//!
//! pollster::block_on(async {
//!     pages
//!         .reload(0, PageLocation::Start, 30, ReadingDirection::Ltr)
//!         .await;
//!     assert_eq!(pages.current_index(), Some(0));
//!     // Six positions of preload ahead of page 0.
//!     assert_eq!(pages.pages().indices(), vec![0, 1, 2, 3, 4, 5, 6]);
//!
//!     let moved = pages
//!         .go_to_index(12, PageLocation::Start, GoToOptions::default())
//!         .await;
//!     assert!(moved);
//!     assert_eq!(pages.current_index(), Some(12));
//! });
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod controller;
mod host;
mod location;
mod queue;
mod window;

pub use controller::{GoToOptions, NavigationState, PaginationController};
pub use host::{PageSource, PageView, PagingObserver, ViewportDriver};
pub use location::{PageLocation, SubLocation};
pub use queue::{LoadQueue, LoadRequest};
pub use window::{PageWindow, PreloadBudget};
