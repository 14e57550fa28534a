//! Hysteretic materialization-window sizing.

use std::ops::Range;

/// Positions materialized beyond the observed extremes, on each side.
///
/// Over-materializing by a margin means small scrolls land inside the
/// current window instead of forcing a recomputation on every tick.
pub const DEFAULT_MARGIN: usize = 50;

const INITIAL_WINDOW: Range<usize> = 0..100;

/// Chooses which contiguous index range of a lazy list to materialize.
///
/// Feed it every displayed position via [`on_position_displayed`] (typically
/// once per visible row per rendering pass), then ask for
/// [`next_window`] at most once per pass. If nothing was observed since the
/// last ask, the previous window comes back unchanged — no scroll, no
/// recompute, no flicker.
///
/// [`on_position_displayed`]: WindowSizer::on_position_displayed
/// [`next_window`]: WindowSizer::next_window
#[derive(Debug, Clone)]
pub struct WindowSizer {
    /// Min/max positions displayed since the last `next_window` call.
    /// `None` is the reset state.
    observed: Option<(usize, usize)>,
    last: Range<usize>,
    margin: usize,
}

impl WindowSizer {
    pub fn new() -> Self {
        Self::with_margin(DEFAULT_MARGIN)
    }

    pub fn with_margin(margin: usize) -> Self {
        Self {
            observed: None,
            last: INITIAL_WINDOW,
            margin,
        }
    }

    /// Record that `position` was displayed. Cheap; call freely.
    pub fn on_position_displayed(&mut self, position: usize) {
        self.observed = Some(match self.observed {
            Some((lo, hi)) => (lo.min(position), hi.max(position)),
            None => (position, position),
        });
    }

    /// The window to materialize next.
    ///
    /// Recomputed only if a position was observed since the previous call;
    /// the observation accumulator resets afterwards. The lower edge
    /// saturates at zero.
    pub fn next_window(&mut self) -> Range<usize> {
        if let Some((lo, hi)) = self.observed.take() {
            self.last = lo.saturating_sub(self.margin)..hi + self.margin;
        }
        self.last.clone()
    }
}

impl Default for WindowSizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_window_before_any_observation() {
        let mut sizer = WindowSizer::new();
        assert_eq!(sizer.next_window(), 0..100);
    }

    #[test]
    fn window_spans_observed_positions_plus_margin() {
        let mut sizer = WindowSizer::new();
        sizer.on_position_displayed(40);
        sizer.on_position_displayed(45);
        // Lower edge saturates: 40 - 50 clamps to 0.
        assert_eq!(sizer.next_window(), 0..95);
    }

    #[test]
    fn unchanged_without_new_observations() {
        let mut sizer = WindowSizer::new();
        sizer.on_position_displayed(40);
        sizer.on_position_displayed(45);
        let first = sizer.next_window();
        assert_eq!(sizer.next_window(), first);
        assert_eq!(sizer.next_window(), first);
    }

    #[test]
    fn accumulator_resets_between_passes() {
        let mut sizer = WindowSizer::new();
        sizer.on_position_displayed(40);
        sizer.next_window();

        sizer.on_position_displayed(400);
        assert_eq!(sizer.next_window(), 350..450);
    }

    #[test]
    fn observation_order_does_not_matter() {
        let mut a = WindowSizer::new();
        let mut b = WindowSizer::new();
        for position in [70, 90, 80] {
            a.on_position_displayed(position);
        }
        for position in [90, 80, 70] {
            b.on_position_displayed(position);
        }
        assert_eq!(a.next_window(), b.next_window());
        assert_eq!(a.next_window(), 20..140);
    }

    #[test]
    fn custom_margin() {
        let mut sizer = WindowSizer::with_margin(5);
        sizer.on_position_displayed(10);
        assert_eq!(sizer.next_window(), 5..15);
    }
}
