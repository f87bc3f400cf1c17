//! Per-process timing metrics and run-wide aggregates derived from a
//! finished [`Schedule`].

use average::{Estimate, Mean};
use serde::Serialize;

use crate::core::{Pid, Process, Time};
use crate::error::{Error, Result};
use crate::sim::Schedule;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProcessMetrics {
    pub pid: Pid,
    pub arrival: Time,
    pub burst: f64,
    pub start: Time,
    pub finish: Time,
    /// `finish - arrival`
    pub turnaround: Time,
    /// `turnaround - burst`. Can be negative when a process spent most of
    /// its life below full frequency, since burst is measured at 1.0.
    pub waiting: Time,
    /// `start - arrival`
    pub response: Time,
}

impl ProcessMetrics {
    pub fn of(proc: &Process) -> Result<Self> {
        let (Some(start), Some(finish)) = (proc.start_time, proc.finish_time) else {
            return Err(Error::Unfinished(proc.pid));
        };
        let turnaround = finish - proc.arrival;
        Ok(Self {
            pid: proc.pid,
            arrival: proc.arrival,
            burst: proc.burst,
            start,
            finish,
            turnaround,
            waiting: turnaround - proc.burst,
            response: start - proc.arrival,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub processes: Vec<ProcessMetrics>,
    pub avg_turnaround: Time,
    pub avg_waiting: Time,
    pub avg_response: Time,
    pub total_energy: f64,
    pub busy_time: Time,
}

pub fn summarize(schedule: &Schedule) -> Result<Summary> {
    if schedule.processes.is_empty() {
        return Err(Error::EmptyWorkload);
    }

    let processes = schedule
        .processes
        .iter()
        .map(ProcessMetrics::of)
        .collect::<Result<Vec<_>>>()?;

    Ok(Summary {
        avg_turnaround: avg(processes.iter().map(|m| m.turnaround)),
        avg_waiting: avg(processes.iter().map(|m| m.waiting)),
        avg_response: avg(processes.iter().map(|m| m.response)),
        total_energy: schedule.total_energy,
        busy_time: schedule.busy_time(),
        processes,
    })
}

fn avg(iter: impl Iterator<Item = f64>) -> f64 {
    iter.collect::<Mean>().estimate()
}
