//! Time-based element id allocation.
//!
//! Element ids are millisecond timestamps. Several elements can be created
//! within the same millisecond (a paste creates a whole batch at once), so the
//! allocator hands out contiguous ranges and never goes backwards: the next
//! base is the later of "now" and one past the last id it handed out.

use crate::elements::ElementId;
use crate::error::{EditorError, EditorResult};
use time::OffsetDateTime;

/// Largest element id a document may carry (2^53 - 1, the largest integer
/// JSON readers keep exact).
pub const MAX_ELEMENT_ID: ElementId = (1 << 53) - 1;

/// Current wall-clock time in milliseconds since the Unix epoch.
pub fn now_millis() -> u64 {
    let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    u64::try_from(millis).unwrap_or(0)
}

/// Hands out strictly increasing element ids.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    /// Highest id reserved or observed so far.
    last: ElementId,
}

impl IdAllocator {
    /// Create an allocator that has not handed out anything yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Highest id reserved or observed so far.
    pub fn last(&self) -> ElementId {
        self.last
    }

    /// Allocate a single fresh id.
    pub fn next_id(&mut self) -> EditorResult<ElementId> {
        self.reserve(1)
    }

    /// Reserve `span` consecutive ids and return the first one.
    pub fn reserve(&mut self, span: u64) -> EditorResult<ElementId> {
        self.reserve_at(now_millis(), span)
    }

    /// Reserve `span` consecutive ids using `now` as the time source.
    ///
    /// Fails without reserving anything if the range would pass
    /// [`MAX_ELEMENT_ID`].
    pub fn reserve_at(&mut self, now: u64, span: u64) -> EditorResult<ElementId> {
        let next = self.last.checked_add(1).ok_or(EditorError::IdSpaceExhausted)?;
        let base = now.max(next);
        let end = base
            .checked_add(span.max(1) - 1)
            .filter(|&end| end <= MAX_ELEMENT_ID)
            .ok_or(EditorError::IdSpaceExhausted)?;
        self.last = end;
        Ok(base)
    }

    /// Record an id that entered the model from elsewhere (e.g. a loaded file)
    /// so future allocations stay clear of it.
    pub fn observe(&mut self, id: ElementId) {
        self.last = self.last.max(id);
    }
}
