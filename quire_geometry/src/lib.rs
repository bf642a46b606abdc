// Copyright 2026 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quire Geometry: page coordinate mapping for paginated viewports.
//!
//! This crate maps discrete page indices to scroll offsets and back, aware of
//! the scroll [`Axis`] and the [`ReadingDirection`]. It is the pure-math leaf
//! of the Quire crates: no state beyond the axis/direction pair, no knowledge
//! of page content or view systems.
//!
//! The core type is [`PageLayout`], which fixes an axis and a reading
//! direction and provides:
//!
//! - [`PageLayout::offset_for_index`]: the scroll offset at which a page sits,
//! - [`PageLayout::index_for_offset`]: its exact inverse (round to nearest,
//!   clamped), used when a scroll gesture settles,
//! - [`PageLayout::page_origin`] and [`PageLayout::content_size`]: 2D layout
//!   helpers for placing page frames and sizing the scrollable content.
//!
//! Pages are assumed to tile the viewport exactly: each page occupies one
//! container extent along the scroll axis. Right-to-left reading order only
//! affects the horizontal axis; vertical layouts are direction-independent.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Size;
//! use quire_geometry::{Axis, PageLayout, ReadingDirection};
//!
//! let layout = PageLayout::new(Axis::Horizontal, ReadingDirection::Rtl);
//!
//! // Three 100-unit pages read right to left: page 0 is the rightmost.
//! assert_eq!(layout.offset_for_index(0, 100.0, 3), 200.0);
//! assert_eq!(layout.offset_for_index(2, 100.0, 3), 0.0);
//!
//! // The inverse mapping recovers the index from a settled scroll offset.
//! assert_eq!(layout.index_for_offset(200.0, 100.0, 3), 0);
//!
//! // Content is three pages wide.
//! assert_eq!(layout.content_size(3, Size::new(100.0, 50.0)), Size::new(300.0, 50.0));
//! ```
//!
//! This crate is `no_std` and does not allocate.

#![no_std]

use kurbo::{Point, Rect, Size};

/// The axis along which a paginated viewport scrolls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Pages are laid out side by side and the viewport scrolls horizontally.
    Horizontal,
    /// Pages are stacked and the viewport scrolls vertically.
    Vertical,
}

impl Axis {
    /// Returns the component of `size` along this axis.
    #[must_use]
    pub const fn major(self, size: Size) -> f64 {
        match self {
            Self::Horizontal => size.width,
            Self::Vertical => size.height,
        }
    }

    /// Returns the component of `point` along this axis.
    #[must_use]
    pub const fn major_of_point(self, point: Point) -> f64 {
        match self {
            Self::Horizontal => point.x,
            Self::Vertical => point.y,
        }
    }

    /// Builds a point with `major` along this axis and `0.0` on the cross axis.
    #[must_use]
    pub const fn point(self, major: f64) -> Point {
        match self {
            Self::Horizontal => Point::new(major, 0.0),
            Self::Vertical => Point::new(0.0, major),
        }
    }
}

/// The direction in which page indices advance visually.
///
/// Only horizontal layouts are affected: in [`ReadingDirection::Rtl`] page 0
/// sits at the right edge of the content and offsets decrease as indices grow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadingDirection {
    /// Page indices advance left to right (or top to bottom).
    #[default]
    Ltr,
    /// Page indices advance right to left.
    Rtl,
}

/// Coordinate mapper for a paginated viewport.
///
/// A `PageLayout` is a pure function set: it owns no page state. The container
/// extent and page count are passed per call so the same layout can serve a
/// viewport through resizes and reloads.
///
/// The forward and inverse mappings are exact inverses on page boundaries:
/// for every valid index `i`, `index_for_offset(offset_for_index(i, e, n), e, n) == i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    axis: Axis,
    direction: ReadingDirection,
}

impl PageLayout {
    /// Creates a layout for the given axis and reading direction.
    #[must_use]
    pub const fn new(axis: Axis, direction: ReadingDirection) -> Self {
        Self { axis, direction }
    }

    /// Returns the scroll axis.
    #[must_use]
    pub const fn axis(self) -> Axis {
        self.axis
    }

    /// Returns the reading direction.
    #[must_use]
    pub const fn direction(self) -> ReadingDirection {
        self.direction
    }

    /// Replaces the reading direction, keeping the axis.
    ///
    /// The axis of a viewport is fixed at construction; the reading direction
    /// may change when a new publication is loaded.
    #[must_use]
    pub const fn with_direction(self, direction: ReadingDirection) -> Self {
        Self {
            axis: self.axis,
            direction,
        }
    }

    /// Returns the scroll offset of page `index` along the axis.
    ///
    /// `extent` is the container extent along the scroll axis (one page's
    /// worth of scroll), and `page_count` the total number of pages. For
    /// vertical and horizontal-LTR layouts the offset grows with the index;
    /// for horizontal-RTL it shrinks, with page 0 at
    /// `extent * (page_count - 1)` and the last page at `0.0`.
    #[must_use]
    pub fn offset_for_index(self, index: usize, extent: f64, page_count: usize) -> f64 {
        let index_f = index as f64;
        match (self.axis, self.direction) {
            (Axis::Vertical, _) | (Axis::Horizontal, ReadingDirection::Ltr) => extent * index_f,
            (Axis::Horizontal, ReadingDirection::Rtl) => {
                let total = extent * page_count as f64;
                total - extent * (index_f + 1.0)
            }
        }
    }

    /// Returns the page index nearest to the given scroll offset.
    ///
    /// This is the exact inverse of [`Self::offset_for_index`], rounding to
    /// the nearest page and clamping into `[0, page_count)`. Returns `0` when
    /// `page_count == 0` or `extent <= 0.0`.
    #[must_use]
    pub fn index_for_offset(self, offset: f64, extent: f64, page_count: usize) -> usize {
        if page_count == 0 || extent <= 0.0 {
            return 0;
        }
        let ratio = match (self.axis, self.direction) {
            (Axis::Vertical, _) | (Axis::Horizontal, ReadingDirection::Ltr) => offset / extent,
            (Axis::Horizontal, ReadingDirection::Rtl) => {
                let total = extent * page_count as f64;
                (total - offset) / extent - 1.0
            }
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Index is clamped to bounds immediately after the cast"
        )]
        let i = (ratio + 0.5) as isize;
        i.clamp(0, page_count as isize - 1) as usize
    }

    /// Returns the origin of page `index` within the scrollable content.
    ///
    /// Pages tile the frame along the scroll axis; the cross-axis origin is
    /// always `0.0`.
    #[must_use]
    pub fn page_origin(self, index: usize, frame: Size, page_count: usize) -> Point {
        let extent = self.axis.major(frame);
        self.axis
            .point(self.offset_for_index(index, extent, page_count))
    }

    /// Returns the frame of page `index` within the scrollable content.
    #[must_use]
    pub fn page_frame(self, index: usize, frame: Size, page_count: usize) -> Rect {
        let origin = self.page_origin(index, frame, page_count);
        Rect::from_origin_size(origin, frame)
    }

    /// Returns the total scrollable content size for `page_count` pages.
    #[must_use]
    pub fn content_size(self, page_count: usize, frame: Size) -> Size {
        let count = page_count as f64;
        match self.axis {
            Axis::Horizontal => Size::new(frame.width * count, frame.height),
            Axis::Vertical => Size::new(frame.width, frame.height * count),
        }
    }
}
