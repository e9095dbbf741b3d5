//! Build queue seam.
//!
//! Segment rebuilds are scheduled by an external streaming build queue that
//! picks a bounded batch of dirty segments per frame. This module only
//! defines the callback contract segments use to (re-)request scheduling;
//! the queue's ordering and throttling policy live with the streaming
//! manager.

use super::segment::SegmentId;

/// Why a segment wants rebuilding; the queue orders work by it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum BuildPriority {
    /// First build after (re)load; lowest urgency.
    Load,
    /// Rebuild because the viewer moved near the segment.
    Proximity,
    /// Rebuild after a voxel edit; highest urgency.
    Edit,
}

/// The scheduling callbacks a segment renderer issues.
pub trait BuildQueue {
    /// Requests (re)scheduling of a dirty segment at the given priority.
    ///
    /// Called from `invalidate()` and `restore()`. The queue may coalesce
    /// repeat requests for a segment already scheduled.
    fn invalidate_segment(&mut self, id: SegmentId, priority: BuildPriority);

    /// Drops any pending scheduling for a segment that is being discarded.
    fn remove_segment(&mut self, id: SegmentId);
}
