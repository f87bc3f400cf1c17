use super::dvfs::Frequency;
use crate::scheduler::ReadyLoad;
use serde::Serialize;

// 1-based, assigned in input order; index into the process Vec is pid - 1
pub type Pid = usize;
pub type Time = f64;

/// Length of one scheduling step for a process that does not finish in it.
pub const QUANTUM: Time = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProcessState {
    // Not yet arrived
    Pending,
    Runnable,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Process {
    pub pid: Pid,
    pub arrival: Time,
    pub burst: f64,
    pub remaining: f64,
    pub start_time: Option<Time>,
    pub finish_time: Option<Time>,
    pub state: ProcessState,
}

/// One executed scheduling step: `pid` ran on `[start, end)` at `freq`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Slot {
    pub start: Time,
    pub end: Time,
    pub pid: Pid,
    pub freq: Frequency,
    pub power: f64,
    pub energy: f64,
}

impl Slot {
    pub fn new(start: Time, end: Time, pid: Pid, freq: Frequency) -> Self {
        debug_assert!(end > start, "Slot for P{pid} must have positive length");
        let power = freq.power();
        Self {
            start,
            end,
            pid,
            freq,
            power,
            energy: power * (end - start),
        }
    }

    pub fn duration(&self) -> Time {
        self.end - self.start
    }
}

/// Mutable state of one simulation run: clock, energy accumulator, process
/// table and the slots emitted so far.
#[derive(Debug)]
pub struct SimCtx {
    pub now: Time,
    pub energy: f64,
    pub idle_time: Time,
    pub procs: Vec<Process>,
    pub slots: Vec<Slot>,
    // Idle time between the last two recorded slots
    pub last_gap: Time,

    // Idle time since the last recorded slot
    pending_idle: Time,
    completed: usize,
}

impl SimCtx {
    pub fn new() -> Self {
        Self {
            now: 0.0,
            energy: 0.0,
            idle_time: 0.0,
            procs: Vec::new(),
            slots: Vec::new(),
            last_gap: 0.0,
            pending_idle: 0.0,
            completed: 0,
        }
    }

    pub fn create_process(&mut self, arrival: Time, burst: f64) -> Pid {
        let pid = self.procs.len() + 1;
        self.procs.push(Process {
            pid,
            arrival,
            burst,
            remaining: burst,
            start_time: None,
            finish_time: None,
            state: ProcessState::Pending,
        });
        pid
    }

    pub fn process(&self, pid: Pid) -> &Process {
        &self.procs[pid - 1]
    }

    pub fn process_mut(&mut self, pid: Pid) -> &mut Process {
        &mut self.procs[pid - 1]
    }

    pub fn advance_time(&mut self, delta: Time) {
        debug_assert!(delta > 0.0, "Clock must move forward");
        self.now += delta;
    }

    // Idle jump; no slot is recorded for the gap
    pub fn jump_to(&mut self, t: Time) {
        debug_assert!(t > self.now, "Idle jump must move forward");
        let gap = t - self.now;
        self.idle_time += gap;
        self.pending_idle += gap;
        self.now = t;
    }

    pub fn mark_runnable(&mut self, pid: Pid) {
        let now = self.now;
        let proc = self.process_mut(pid);
        debug_assert!(
            proc.state == ProcessState::Pending,
            "P{pid} admitted twice"
        );
        debug_assert!(proc.arrival <= now, "P{pid} admitted before arrival");
        proc.state = ProcessState::Runnable;
    }

    // Returns true on the first selection of `pid`
    pub fn mark_started(&mut self, pid: Pid) -> bool {
        let now = self.now;
        let proc = self.process_mut(pid);
        if proc.start_time.is_some() {
            return false;
        }
        proc.start_time = Some(now);
        true
    }

    pub fn consume(&mut self, pid: Pid, work: f64) {
        let proc = self.process_mut(pid);
        debug_assert!(
            work < proc.remaining,
            "P{pid} would finish; use mark_completed"
        );
        proc.remaining -= work;
    }

    pub fn mark_completed(&mut self, pid: Pid, finish: Time) {
        let proc = self.process_mut(pid);
        debug_assert!(
            proc.state == ProcessState::Runnable,
            "P{pid} must be runnable before completion"
        );
        proc.state = ProcessState::Completed;
        proc.remaining = 0.0;
        proc.finish_time = Some(finish);
        self.completed += 1;
    }

    pub fn record_slot(&mut self, slot: Slot) {
        self.energy += slot.energy;
        self.last_gap = std::mem::take(&mut self.pending_idle);
        self.slots.push(slot);
    }

    /// Runnable processes in ascending pid order.
    pub fn ready(&self) -> impl Iterator<Item = &Process> {
        self.procs
            .iter()
            .filter(|p| p.state == ProcessState::Runnable)
    }

    pub fn has_runnable(&self) -> bool {
        self.ready().next().is_some()
    }

    pub fn ready_load(&self) -> ReadyLoad {
        self.ready().fold(ReadyLoad::default(), |load, p| ReadyLoad {
            count: load.count + 1,
            total_remaining: load.total_remaining + p.remaining,
        })
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    pub fn all_completed(&self) -> bool {
        self.completed == self.procs.len()
    }
}

impl Default for SimCtx {
    fn default() -> Self {
        Self::new()
    }
}
