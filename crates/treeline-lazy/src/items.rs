//! Placeholder reconciliation for a lazy list's items slot.

use treeline_widget::{Children, MutableChildren};

/// A minimal notification for the rendering surface backing a lazy list.
///
/// Indices are in reported-list coordinates: position 0 is the first leading
/// placeholder, and a materialized row at index `i` reports as
/// `host_before + i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemsNotification {
    Inserted { index: usize, count: usize },
    Moved {
        from_index: usize,
        to_index: usize,
        count: usize,
    },
    Removed { index: usize, count: usize },
}

impl ItemsNotification {
    /// Net change to the surface's item count.
    pub fn count_delta(self) -> isize {
        match self {
            Self::Inserted { count, .. } => count as isize,
            Self::Moved { .. } => 0,
            Self::Removed { count, .. } => -(count as isize),
        }
    }
}

/// Reconciles a lazy list's materialized rows against its placeholder counts.
///
/// Tracks two views of the flanking placeholder regions: `guest_*` is the
/// authoritative count last reported by the producer, `host_*` is what the
/// rendering surface currently shows. When a row materializes at a window
/// boundary the slot merely changes identity from placeholder to real, so
/// the host count absorbs the structural change and the surface sees no
/// insertion at all — its item count, and therefore its scroll position,
/// stays put.
///
/// Guest count updates are recorded silently; [`flush`], called once per
/// change batch, reconciles any residual host/guest skew into a single range
/// notification per boundary. The two mechanisms compose: a batch that pairs
/// a boundary transition with its count update nets out to silence, while a
/// batch where either arrives alone nets out to exactly one notification.
///
/// The surface-visible count is always
/// `host_before + materialized rows + host_after` ([`reported_count`]), and
/// every notification carries the exact delta, so a surface fed only by
/// notifications never drifts.
///
/// [`flush`]: LazyItems::flush
/// [`reported_count`]: LazyItems::reported_count
#[derive(Debug, Clone)]
pub struct LazyItems<W> {
    rows: MutableChildren<W>,
    host_before: usize,
    host_after: usize,
    guest_before: usize,
    guest_after: usize,
}

impl<W> Default for LazyItems<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> LazyItems<W> {
    pub fn new() -> Self {
        Self {
            rows: MutableChildren::new(),
            host_before: 0,
            host_after: 0,
            guest_before: 0,
            guest_after: 0,
        }
    }

    /// The item count the rendering surface sees.
    pub fn reported_count(&self) -> usize {
        self.host_before + self.rows.len() + self.host_after
    }

    pub fn host_before(&self) -> usize {
        self.host_before
    }

    pub fn host_after(&self) -> usize {
        self.host_after
    }

    /// The materialized rows.
    pub fn rows(&self) -> &MutableChildren<W> {
        &self.rows
    }

    /// The row backing reported position `index`, if it is materialized.
    pub fn row_at(&self, index: usize) -> Option<&W> {
        index
            .checked_sub(self.host_before)
            .and_then(|i| self.rows.get(i))
    }

    /// Insert a materialized row.
    ///
    /// At the head or tail, while the host still shows at least as many
    /// placeholders as the producer reports, this is a virtual slot becoming
    /// real: the adjacent host count shrinks by one and the surface hears
    /// nothing. Anywhere else it is a genuine insertion.
    pub fn insert(&mut self, index: usize, row: W) -> Option<ItemsNotification> {
        self.rows.insert(index, row);
        if index == 0 && self.host_before > 0 && self.host_before >= self.guest_before {
            self.host_before -= 1;
            #[cfg(feature = "tracing")]
            tracing::trace!(host_before = self.host_before, "absorbed head insert");
            None
        } else if index == self.rows.len() - 1
            && self.host_after > 0
            && self.host_after >= self.guest_after
        {
            self.host_after -= 1;
            #[cfg(feature = "tracing")]
            tracing::trace!(host_after = self.host_after, "absorbed tail insert");
            None
        } else {
            Some(ItemsNotification::Inserted {
                index: self.host_before + index,
                count: 1,
            })
        }
    }

    /// Remove `count` materialized rows starting at `index`.
    ///
    /// Reconciled row by row: each removal at a boundary while the host
    /// shows fewer placeholders than the producer reports is a real row
    /// going back to virtual (silent); every other removal is genuine.
    pub fn remove_range(&mut self, index: usize, count: usize) -> Vec<ItemsNotification> {
        (0..count).filter_map(|_| self.remove_one(index)).collect()
    }

    fn remove_one(&mut self, index: usize) -> Option<ItemsNotification> {
        self.rows.remove_range(index, 1);
        if index == 0 && self.host_before < self.guest_before {
            self.host_before += 1;
            None
        } else if index == self.rows.len() && self.host_after < self.guest_after {
            self.host_after += 1;
            None
        } else {
            Some(ItemsNotification::Removed {
                index: self.host_before + index,
                count: 1,
            })
        }
    }

    /// Relocate `count` rows; always a pass-through notification.
    ///
    /// A move never changes any count, so no placeholder transition is
    /// involved at any position or run length.
    pub fn move_range(
        &mut self,
        from_index: usize,
        to_index: usize,
        count: usize,
    ) -> ItemsNotification {
        self.rows.move_range(from_index, to_index, count);
        ItemsNotification::Moved {
            from_index: self.host_before + from_index,
            to_index: self.host_before + to_index,
            count,
        }
    }

    /// Record the producer's leading placeholder count. Silent; the skew it
    /// opens against the host count settles at the next [`flush`].
    ///
    /// [`flush`]: LazyItems::flush
    pub fn set_guest_before(&mut self, count: usize) {
        self.guest_before = count;
    }

    /// Record the producer's trailing placeholder count. Silent, like
    /// [`set_guest_before`](LazyItems::set_guest_before).
    pub fn set_guest_after(&mut self, count: usize) {
        self.guest_after = count;
    }

    /// Settle any residual host/guest skew. Call once per change batch.
    ///
    /// The guest counts are authoritative: each host count snaps to its
    /// guest counterpart, notifying the difference as one range insertion or
    /// removal at that boundary. Skew already consumed by a boundary
    /// transition within the batch settles to nothing here.
    pub fn flush(&mut self) -> Vec<ItemsNotification> {
        let mut notifications = Vec::new();

        if self.guest_before > self.host_before {
            notifications.push(ItemsNotification::Inserted {
                index: 0,
                count: self.guest_before - self.host_before,
            });
        } else if self.guest_before < self.host_before {
            notifications.push(ItemsNotification::Removed {
                index: 0,
                count: self.host_before - self.guest_before,
            });
        }
        self.host_before = self.guest_before;

        if self.guest_after > self.host_after {
            let index = self.reported_count();
            let count = self.guest_after - self.host_after;
            self.host_after = self.guest_after;
            notifications.push(ItemsNotification::Inserted { index, count });
        } else if self.guest_after < self.host_after {
            let count = self.host_after - self.guest_after;
            self.host_after = self.guest_after;
            notifications.push(ItemsNotification::Removed {
                index: self.reported_count(),
                count,
            });
        }

        notifications
    }
}
