use std::cmp::Ordering;

use keyed_priority_queue::KeyedPriorityQueue;

use super::{Pid, Scheduler, SimCtx};
use crate::core::{Process, ProcessState};

/// Run queue key: shortest remaining work first, lowest pid on ties.
#[derive(Debug, Clone, Copy)]
pub struct Srt {
    pub remaining: f64,
    pub pid: Pid,
}

impl Srt {
    fn of(proc: &Process) -> Self {
        Self {
            remaining: proc.remaining,
            pid: proc.pid,
        }
    }
}

// KeyedPriorityQueue is a max-heap, so the smallest (remaining, pid) must compare greatest
impl Ord for Srt {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .remaining
            .total_cmp(&self.remaining)
            .then_with(|| other.pid.cmp(&self.pid))
    }
}

impl PartialOrd for Srt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Srt {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Srt {}

/// Preemptive shortest-remaining-time-first.
///
/// The head of the queue is re-evaluated at every step, so a newly arrived
/// process with less remaining work preempts the current one at the next
/// quantum boundary.
pub struct SrtfScheduler {
    runq: KeyedPriorityQueue<Pid, Srt>,
}

impl Scheduler for SrtfScheduler {
    fn init(_ctx: &mut SimCtx) -> Self {
        Self {
            runq: KeyedPriorityQueue::new(),
        }
    }

    fn name(&self) -> &'static str {
        "SRTF"
    }

    fn enqueue(&mut self, ctx: &SimCtx, pid: Pid) {
        let prev = self.runq.push(pid, Srt::of(ctx.process(pid)));
        debug_assert!(prev.is_none(), "P{pid} enqueued twice");
    }

    fn pick_next(&mut self, _ctx: &SimCtx) -> Option<Pid> {
        self.runq.peek().map(|(pid, _)| *pid)
    }

    fn ran(&mut self, ctx: &SimCtx, pid: Pid) {
        let proc = ctx.process(pid);
        if proc.state == ProcessState::Completed {
            self.runq.remove(&pid);
        } else {
            self.runq
                .set_priority(&pid, Srt::of(proc))
                .expect("Running process missing from run queue");
        }
    }
}
