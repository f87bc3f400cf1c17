use serde::Serialize;

use crate::core::{Frequency, Pid, Process, Slot, Time};

/// Result of a completed simulation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schedule {
    pub slots: Vec<Slot>,
    // In pid order, all with start and finish set
    pub processes: Vec<Process>,
    pub total_energy: f64,
    // Final clock value
    pub makespan: Time,
    pub idle_time: Time,
}

/// Consecutive slots of one process at one frequency, merged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Run {
    pub start: Time,
    pub end: Time,
    pub pid: Pid,
    pub freq: Frequency,
    pub power: f64,
    pub energy: f64,
    pub slots: usize,
}

impl Schedule {
    pub fn busy_time(&self) -> Time {
        self.slots.iter().map(Slot::duration).sum()
    }

    pub fn slots_of(&self, pid: Pid) -> impl Iterator<Item = &Slot> {
        self.slots.iter().filter(move |s| s.pid == pid)
    }

    /// Merge back-to-back slots that ran the same process at the same
    /// frequency. Idle gaps always split runs.
    pub fn runs(&self) -> Vec<Run> {
        let mut runs: Vec<Run> = Vec::new();
        for slot in &self.slots {
            if let Some(run) = runs.last_mut() {
                if run.pid == slot.pid && run.freq == slot.freq && run.end == slot.start {
                    run.end = slot.end;
                    run.energy += slot.energy;
                    run.slots += 1;
                    continue;
                }
            }
            runs.push(Run {
                start: slot.start,
                end: slot.end,
                pid: slot.pid,
                freq: slot.freq,
                power: slot.power,
                energy: slot.energy,
                slots: 1,
            });
        }
        runs
    }
}
