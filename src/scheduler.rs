// src/scheduler.rs

use crate::geometry::Point2;

/// Single in-flight render slot.
///
/// Inputs may arrive faster than the display can paint. Only the newest
/// translation is kept, and at most one paint is requested until the
/// pending render is taken.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    pending: Option<Point2>,
    scheduled: bool,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `translate` as the next render input. Returns `true` when the
    /// caller has to ask for a paint; `false` when one is already on the way.
    pub fn request(&mut self, translate: Point2) -> bool {
        self.pending = Some(translate);
        if self.scheduled {
            return false;
        }
        self.scheduled = true;
        true
    }

    /// Called at paint time. Yields the newest input and frees the slot.
    pub fn take(&mut self) -> Option<Point2> {
        self.scheduled = false;
        self.pending.take()
    }
}
