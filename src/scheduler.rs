// Timer scheduler - virtual-time queue for deferred page work
//
// The original behaviors lean on fire-and-forget timeouts (the typewriter
// reschedules itself, skill bars fill after a fixed delay). Routing every
// timeout through this queue instead gives two things the timeout style
// lacks: handles that can be cancelled, and deterministic tests that
// advance time explicitly instead of sleeping.
//
// The driver (the TUI tick loop) advances the clock in small increments and
// feeds due tasks back into the controller, which may schedule follow-ups.

use crate::events::TimerTask;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use std::time::Duration;

/// Handle to a scheduled timer, usable for cancellation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Entry {
    at: Duration,
    seq: u64,
    id: TimerId,
    task: TimerTask,
}

// Heap order: earliest deadline first, insertion order breaking ties.
// BinaryHeap is a max-heap, so comparisons are reversed.
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        (other.at, other.seq).cmp(&(self.at, self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        (self.at, self.seq) == (other.at, other.seq)
    }
}

impl Eq for Entry {}

/// Virtual-time timer queue
#[derive(Debug, Default)]
pub struct Scheduler {
    now: Duration,
    next_seq: u64,
    queue: BinaryHeap<Entry>,
    cancelled: HashSet<TimerId>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule a task to fire after `delay`
    pub fn schedule(&mut self, delay: Duration, task: TimerTask) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        let id = TimerId(seq);
        self.queue.push(Entry {
            at: self.now + delay,
            seq,
            id,
            task,
        });
        id
    }

    /// Cancel a pending timer; firing an already-fired or unknown id is a no-op
    pub fn cancel(&mut self, id: TimerId) {
        self.cancelled.insert(id);
    }

    /// Advance the clock by `by` and drain every task now due, in deadline
    /// order. Tasks a handler schedules in response land in the queue for a
    /// later `advance`, so callers should step in increments no larger than
    /// the smallest delay they care about.
    pub fn advance(&mut self, by: Duration) -> Vec<(TimerId, TimerTask)> {
        self.now += by;
        let mut due = Vec::new();
        while let Some(entry) = self.queue.peek() {
            if entry.at > self.now {
                break;
            }
            let entry = self.queue.pop().unwrap();
            if !self.cancelled.remove(&entry.id) {
                due.push((entry.id, entry.task));
            }
        }
        due
    }

    /// Number of timers still pending (cancelled ones excluded)
    pub fn pending(&self) -> usize {
        self.queue
            .iter()
            .filter(|e| !self.cancelled.contains(&e.id))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Page;

    fn fill_task() -> TimerTask {
        let mut page = Page::new(100.0, 100.0);
        let bar = page.insert(crate::page::Element::new());
        TimerTask::SkillFill { bar, percent: 50.0 }
    }

    #[test]
    fn test_fires_in_deadline_order() {
        let mut sched = Scheduler::new();
        sched.schedule(Duration::from_millis(200), fill_task());
        sched.schedule(Duration::from_millis(100), TimerTask::TypewriterStep);

        let due = sched.advance(Duration::from_millis(250));
        assert_eq!(due.len(), 2);
        assert_eq!(due[0].1, TimerTask::TypewriterStep);
    }

    #[test]
    fn test_deadline_is_inclusive() {
        let mut sched = Scheduler::new();
        sched.schedule(Duration::from_millis(100), TimerTask::TypewriterStep);

        assert!(sched.advance(Duration::from_millis(99)).is_empty());
        assert_eq!(sched.advance(Duration::from_millis(1)).len(), 1);
    }

    #[test]
    fn test_same_deadline_keeps_insertion_order() {
        let mut sched = Scheduler::new();
        let a = sched.schedule(Duration::from_millis(100), TimerTask::TypewriterStep);
        let b = sched.schedule(Duration::from_millis(100), fill_task());

        let due = sched.advance(Duration::from_millis(100));
        assert_eq!(due[0].0, a);
        assert_eq!(due[1].0, b);
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let mut sched = Scheduler::new();
        let id = sched.schedule(Duration::from_millis(100), TimerTask::TypewriterStep);
        sched.cancel(id);

        assert!(sched.advance(Duration::from_millis(500)).is_empty());
        assert_eq!(sched.pending(), 0);
    }

    #[test]
    fn test_clock_accumulates_across_advances() {
        let mut sched = Scheduler::new();
        sched.schedule(Duration::from_millis(100), TimerTask::TypewriterStep);

        assert!(sched.advance(Duration::from_millis(60)).is_empty());
        assert_eq!(sched.advance(Duration::from_millis(60)).len(), 1);
        assert_eq!(sched.now(), Duration::from_millis(120));
    }
}
