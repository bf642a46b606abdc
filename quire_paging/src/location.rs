// Copyright 2026 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Target locations within a page.

/// An opaque, host-defined position within a page.
///
/// Hosts typically back this with a document locator (a CSS selector plus a
/// text offset, a CFI, a time position, …). The scheduler only needs to know
/// whether a sub-location denotes the very beginning of its page, which it
/// derives from the normalized [`SubLocation::progression`].
pub trait SubLocation {
    /// Normalized progression within the page, in `[0.0, 1.0]`.
    ///
    /// `0.0` is the beginning of the page, `1.0` its end.
    fn progression(&self) -> f64;
}

/// Where within a page a load or navigation should land.
///
/// `L` is the host's [`SubLocation`] type. The scheduler never inspects a
/// sub-location beyond its progression; it is handed back verbatim to the
/// page view's seek operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLocation<L> {
    /// The beginning of the page.
    Start,
    /// The end of the page. Used when entering a page backward.
    End,
    /// A specific position within the page.
    At(L),
}

impl<L: SubLocation> PageLocation<L> {
    /// Returns `true` if this location denotes the beginning of its page.
    ///
    /// [`PageLocation::Start`] always does; [`PageLocation::At`] does when its
    /// normalized progression is zero. [`PageLocation::End`] never does.
    #[must_use]
    pub fn is_start(&self) -> bool {
        match self {
            Self::Start => true,
            Self::End => false,
            Self::At(sub) => sub.progression() == 0.0,
        }
    }
}
