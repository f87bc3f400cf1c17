use super::{
    job::{ProcessSpec, validate},
    schedule::Schedule,
};
use crate::{
    core::{Pid, SchedCore, SimEvent, Time},
    error::Result,
    scheduler::{Governor, Scheduler, SrtfScheduler, StepGovernor},
};

pub struct Sim<S: Scheduler, G: Governor> {
    pub core: SchedCore<S, G>,
    // Pids sorted by (arrival, pid); everything before the cursor has been woken
    arrivals: Vec<Pid>,
    arrival_cursor: usize,
}

impl<S: Scheduler, G: Governor + Default> Sim<S, G> {
    pub fn new(specs: &[ProcessSpec]) -> Result<Self> {
        validate(specs)?;

        let mut core = SchedCore::<S, G>::new();
        let mut arrivals: Vec<Pid> = specs
            .iter()
            .map(|spec| core.ctx.create_process(spec.arrival, spec.burst))
            .collect();
        arrivals.sort_by(|&a, &b| {
            core.ctx
                .process(a)
                .arrival
                .total_cmp(&core.ctx.process(b).arrival)
                .then_with(|| a.cmp(&b))
        });

        log::info!(
            "simulating {} processes with {} / {} governor",
            specs.len(),
            core.scheduler.name(),
            core.governor.name()
        );

        Ok(Self {
            core,
            arrivals,
            arrival_cursor: 0,
        })
    }
}

impl<S: Scheduler, G: Governor> Sim<S, G> {
    /// Advance the simulation by one scheduling decision, or by one idle
    /// jump when nothing is ready.
    pub fn step(&mut self) -> Vec<SimEvent> {
        let mut events = self.handle_arrivals();
        if self.all_completed() {
            return events;
        }

        if !self.core.ctx.has_runnable() {
            // Some unfinished process has not arrived yet, otherwise it would be runnable
            let next = self
                .next_arrival()
                .expect("Unfinished processes must be runnable or pending arrival");
            let from = self.core.now();
            log::trace!("idle {from:.4} -> {next:.4}");
            self.core.ctx.jump_to(next);
            events.push(SimEvent::Idle { from, to: next });
            return events;
        }

        events.extend(self.core.dispatch());
        events
    }

    fn handle_arrivals(&mut self) -> Vec<SimEvent> {
        let now = self.core.now();
        let mut events = Vec::new();

        // Contiguous, since arrivals are sorted
        while let Some(&pid) = self.arrivals.get(self.arrival_cursor) {
            if self.core.ctx.process(pid).arrival > now {
                break;
            }
            log::trace!("P{pid} arrived at t={now:.4}");
            self.core.wake_process(pid);
            events.push(SimEvent::Arrived { pid });
            self.arrival_cursor += 1;
        }

        events
    }

    pub fn next_arrival(&self) -> Option<Time> {
        self.arrivals
            .get(self.arrival_cursor)
            .map(|&pid| self.core.ctx.process(pid).arrival)
    }

    pub fn all_completed(&self) -> bool {
        self.core.ctx.all_completed()
    }

    pub fn run(mut self) -> Schedule {
        while !self.all_completed() {
            self.step();
        }
        self.into_schedule()
    }

    pub fn into_schedule(self) -> Schedule {
        let ctx = self.core.ctx;
        log::info!(
            "{} processes finished at t={:.2} using {:.2} energy units",
            ctx.completed(),
            ctx.now,
            ctx.energy
        );
        Schedule {
            slots: ctx.slots,
            processes: ctx.procs,
            total_energy: ctx.energy,
            makespan: ctx.now,
            idle_time: ctx.idle_time,
        }
    }
}

/// Run the SRTF scheduler with the step governor over `specs`.
pub fn simulate(specs: &[ProcessSpec]) -> Result<Schedule> {
    Ok(Sim::<SrtfScheduler, StepGovernor>::new(specs)?.run())
}
