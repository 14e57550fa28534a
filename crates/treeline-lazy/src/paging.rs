//! The paging collaborator that supplies row content for a window.

use std::ops::Range;

use crate::window::WindowSizer;

/// One window's worth of rows plus the flanking placeholder counts.
///
/// `items_before + items.len() + items_after` is the logical total the
/// producer currently knows about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loaded<T> {
    pub items: Vec<T>,
    pub items_before: usize,
    pub items_after: usize,
}

/// Supplies actual row content for a materialization window.
///
/// Row content and I/O live entirely behind this seam; the core only asks
/// for windows and reads the resulting counts.
pub trait PagingSource {
    type Item;

    /// Materialize the rows inside `window`.
    ///
    /// A source holding fewer items than the window covers returns what it
    /// has and accounts for the rest in the flanking counts.
    fn load(&mut self, window: Range<usize>) -> Loaded<Self::Item>;

    /// True once the backing data changed out from under this handle.
    ///
    /// An invalid source is discarded wholesale; there is no partial
    /// recovery and no retry of the handle itself.
    fn is_invalid(&self) -> bool {
        false
    }
}

/// Wires a [`WindowSizer`] to a cached [`PagingSource`] handle.
#[derive(Debug)]
pub struct LazyController<P> {
    sizer: WindowSizer,
    source: Option<P>,
}

impl<P: PagingSource> LazyController<P> {
    pub fn new() -> Self {
        Self::with_sizer(WindowSizer::new())
    }

    pub fn with_sizer(sizer: WindowSizer) -> Self {
        Self { sizer, source: None }
    }

    /// Forwarded to the window sizer; call once per displayed row.
    pub fn on_position_displayed(&mut self, position: usize) {
        self.sizer.on_position_displayed(position);
    }

    /// Load the next window. Call at most once per rendering pass.
    ///
    /// An invalidated cached source is dropped and `make_source` supplies a
    /// fresh handle; otherwise the cached one is reused.
    pub fn refresh(&mut self, make_source: impl FnOnce() -> P) -> Loaded<P::Item> {
        if self.source.as_ref().is_some_and(PagingSource::is_invalid) {
            self.source = None;
        }
        let source = self.source.get_or_insert_with(make_source);
        source.load(self.sizer.next_window())
    }
}

impl<P: PagingSource> Default for LazyController<P> {
    fn default() -> Self {
        Self::new()
    }
}
