//! # Timers
//! One-shot, cancellable timers for a single-threaded event loop.
//!
//! Nothing here sleeps or spawns. The owner of a [`TimerQueue`] arms timers with [`TimerQueue::schedule`],
//! and the host loop calls [`TimerQueue::expire`] with the current time whenever it wakes up, using
//! [`TimerQueue::next_deadline`] to decide when that should be. Time is a [`Duration`] since whatever epoch
//! the host likes, so long as it is monotonic and consistent between calls.

use std::time::Duration;

/// Handle to an armed timer, unique within the queue that made it.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct TimerHandle(std::num::NonZeroU64);
impl TimerHandle {
    /// Get the raw numeric value of this handle.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.0.get()
    }
}

struct Armed<T> {
    deadline: Duration,
    handle: TimerHandle,
    payload: T,
}

/// A set of one-shot timers carrying a payload of type `T`.
/// Each timer fires at most once, and never after it has been cancelled.
pub struct TimerQueue<T> {
    // Sorted by deadline, ties by arming order. Expected to hold a single timer most of the time,
    // so a sorted vec beats a heap with tombstones.
    armed: Vec<Armed<T>>,
    next_id: std::num::NonZeroU64,
}
impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            armed: Vec::new(),
            next_id: std::num::NonZeroU64::MIN,
        }
    }
}
impl<T> TimerQueue<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    /// Arm a timer to fire `delay` after `now`.
    pub fn schedule(&mut self, now: Duration, delay: Duration, payload: T) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        // 2^64 timers is a lot of pointer wiggling.
        self.next_id = self
            .next_id
            .checked_add(1)
            .unwrap_or(std::num::NonZeroU64::MIN);

        let deadline = now.saturating_add(delay);
        // Insert after every timer with an equal or earlier deadline, keeping arming order for ties.
        let position = self.armed.partition_point(|armed| armed.deadline <= deadline);
        self.armed.insert(
            position,
            Armed {
                deadline,
                handle,
                payload,
            },
        );
        log::trace!("armed timer {} for {deadline:?}", handle.id());
        handle
    }
    /// Disarm a timer. Returns `true` if it was still armed, `false` if it
    /// already fired or was cancelled before.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        if let Some(position) = self.armed.iter().position(|armed| armed.handle == handle) {
            self.armed.remove(position);
            log::trace!("cancelled timer {}", handle.id());
            true
        } else {
            false
        }
    }
    /// Remove and return every timer whose deadline is at or before `now`, earliest first.
    pub fn expire(&mut self, now: Duration) -> smallvec::SmallVec<[(TimerHandle, T); 1]> {
        let count = self.armed.partition_point(|armed| armed.deadline <= now);
        self.armed
            .drain(..count)
            .map(|armed| (armed.handle, armed.payload))
            .collect()
    }
    /// The earliest deadline of any armed timer.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.armed.first().map(|armed| armed.deadline)
    }
    #[must_use]
    pub fn is_armed(&self, handle: TimerHandle) -> bool {
        self.armed.iter().any(|armed| armed.handle == handle)
    }
    #[must_use]
    pub fn len(&self) -> usize {
        self.armed.len()
    }
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.armed.is_empty()
    }
}
