//! Debounced price-range slider.
//!
//! A continuous control produces a stream of intermediate values while the
//! shopper drags. Only the value that survives [`PRICE_COMMIT_DELAY`] of
//! inactivity is committed to the query string.
//!
//! ```text
//!            drag                 quiet for 500ms              URL updated
//!   Idle ──────────► Dragging ───────────────────► PendingCommit ──────────► Committed
//!    ▲                │  ▲ drag (deadline reset)                               │
//!    │                └──┘                                                     │ drag
//!    └──────────── clear (from any state, pending deadline dropped) ◄──────────┘
//! ```
//!
//! Time is passed in by the caller, so the machine itself owns no timer.

use std::time::{Duration, Instant};

use rust_decimal::Decimal;

use super::facets::PriceBounds;
use super::filter::{FilterState, PriceFilter};

/// Inactivity window before a dragged price range is committed.
pub const PRICE_COMMIT_DELAY: Duration = Duration::from_millis(500);

/// A closed price interval with `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    pub min: Decimal,
    pub max: Decimal,
}

impl PriceRange {
    #[must_use]
    pub const fn new(min: Decimal, max: Decimal) -> Self {
        Self { min, max }
    }
}

impl From<&PriceBounds> for PriceRange {
    fn from(bounds: &PriceBounds) -> Self {
        Self::new(bounds.min, bounds.max)
    }
}

/// A price filter ready to be written to the query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceCommit {
    pub price: PriceFilter,
}

impl PriceCommit {
    /// Apply to a filter state.
    #[must_use]
    pub fn apply(&self, state: &FilterState) -> FilterState {
        state.with_price(self.price)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceControlState {
    Idle,
    Dragging { range: PriceRange, deadline: Instant },
    PendingCommit { range: PriceRange },
    Committed { range: PriceRange },
}

/// State machine for one price slider over a catalog's bounds.
#[derive(Debug, Clone)]
pub struct PriceControl {
    bounds: PriceRange,
    /// The range the current query string resolves to.
    applied: PriceRange,
    state: PriceControlState,
    delay: Duration,
}

impl PriceControl {
    /// A control over `bounds`, positioned at the range `current` selects.
    #[must_use]
    pub fn new(bounds: PriceRange, current: &PriceFilter) -> Self {
        Self {
            bounds,
            applied: resolve(bounds, current),
            state: PriceControlState::Idle,
            delay: PRICE_COMMIT_DELAY,
        }
    }

    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    #[must_use]
    pub const fn state(&self) -> PriceControlState {
        self.state
    }

    #[must_use]
    pub const fn bounds(&self) -> PriceRange {
        self.bounds
    }

    /// When a pending drag becomes due, if one is armed.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        match self.state {
            PriceControlState::Dragging { deadline, .. } => Some(deadline),
            _ => None,
        }
    }

    /// The range the slider thumbs should show.
    #[must_use]
    pub const fn display_range(&self) -> PriceRange {
        match self.state {
            PriceControlState::Idle => self.applied,
            PriceControlState::Dragging { range, .. }
            | PriceControlState::PendingCommit { range }
            | PriceControlState::Committed { range } => range,
        }
    }

    /// Record a slider movement. The commit deadline restarts at `now`.
    ///
    /// Values are clamped to the catalog bounds; an inverted range is ignored.
    pub fn drag(&mut self, range: PriceRange, now: Instant) {
        let range = PriceRange::new(
            range.min.max(self.bounds.min),
            range.max.min(self.bounds.max),
        );
        if range.min > range.max {
            return;
        }
        self.state = PriceControlState::Dragging {
            range,
            deadline: now + self.delay,
        };
    }

    /// Move the lower thumb; ignored if it would pass the upper one.
    pub fn drag_min(&mut self, min: Decimal, now: Instant) {
        let current = self.display_range();
        if min <= current.max {
            self.drag(PriceRange::new(min, current.max), now);
        }
    }

    /// Move the upper thumb; ignored if it would pass the lower one.
    pub fn drag_max(&mut self, max: Decimal, now: Instant) {
        let current = self.display_range();
        if max >= current.min {
            self.drag(PriceRange::new(current.min, max), now);
        }
    }

    /// Fire the debounce timer if it is due.
    ///
    /// Returns the commit to apply, or `None` when nothing is due or the
    /// dragged range ended where the query already is.
    pub fn poll(&mut self, now: Instant) -> Option<PriceCommit> {
        let PriceControlState::Dragging { range, deadline } = self.state else {
            return None;
        };
        if now < deadline {
            return None;
        }
        if range == self.applied {
            self.state = PriceControlState::Idle;
            return None;
        }
        self.state = PriceControlState::PendingCommit { range };
        Some(PriceCommit {
            price: self.filter_for(range),
        })
    }

    /// The filter a submitted slider value stands for.
    ///
    /// A range covering the whole catalog drops both price keys, the same
    /// as a committed drag to the full range. Anything else is kept as sent.
    #[must_use]
    pub fn settle(&self, submitted: &PriceFilter) -> PriceFilter {
        let range = resolve(self.bounds, submitted);
        if range.min <= self.bounds.min && range.max >= self.bounds.max {
            PriceFilter::default()
        } else {
            *submitted
        }
    }

    fn filter_for(&self, range: PriceRange) -> PriceFilter {
        if range == self.bounds {
            PriceFilter::default()
        } else {
            PriceFilter {
                min: Some(range.min),
                max: Some(range.max),
            }
        }
    }

    /// Sync with the filter state the query string now holds.
    pub fn acknowledge(&mut self, state: &FilterState) {
        let applied = resolve(self.bounds, &state.price);
        self.applied = applied;
        if let PriceControlState::PendingCommit { range } = self.state
            && range == applied
        {
            self.state = PriceControlState::Committed { range };
        }
    }

    /// Reset to the full catalog range, dropping any pending commit.
    pub fn clear(&mut self) {
        self.applied = self.bounds;
        self.state = PriceControlState::Idle;
    }
}

/// The concrete range a price filter selects within `bounds`.
fn resolve(bounds: PriceRange, filter: &PriceFilter) -> PriceRange {
    PriceRange::new(
        filter.min.unwrap_or(bounds.min),
        filter.max.unwrap_or(bounds.max),
    )
}
