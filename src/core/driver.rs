use super::{
    dvfs::Frequency,
    event::SimEvent,
    observer::Observer,
    state::{Pid, QUANTUM, SimCtx, Slot},
};
use crate::scheduler::{Governor, Scheduler};

pub struct SchedCore<S: Scheduler, G: Governor> {
    pub ctx: SimCtx,
    pub scheduler: S,
    pub governor: G,
    observer: Observer,
    current_freq: Option<Frequency>,
}

impl<S: Scheduler, G: Governor + Default> SchedCore<S, G> {
    pub fn new() -> Self {
        let mut ctx = SimCtx::new();
        let scheduler = S::init(&mut ctx);
        Self {
            ctx,
            scheduler,
            governor: G::default(),
            observer: Observer::new(),
            current_freq: None,
        }
    }
}

impl<S: Scheduler, G: Governor> SchedCore<S, G> {
    pub fn wake_process(&mut self, pid: Pid) {
        self.ctx.mark_runnable(pid);
        self.scheduler.enqueue(&self.ctx, pid);
    }

    /// Make one scheduling decision: pick a frequency and a process, run it
    /// for a quantum (or until it finishes) and account the energy.
    ///
    /// Returns no events when nothing is runnable.
    pub fn dispatch(&mut self) -> Vec<SimEvent> {
        let mut events = Vec::new();

        // Frequency is chosen from the ready set as it stands before the pick
        let load = self.ctx.ready_load();
        let Some(pid) = self.scheduler.pick_next(&self.ctx) else {
            return events;
        };
        let freq = self.governor.select(&load);

        if self.current_freq != Some(freq) {
            log::trace!("frequency {:?} -> {} at t={:.4}", self.current_freq, freq, self.ctx.now);
            events.push(SimEvent::FrequencyChange {
                from: self.current_freq,
                to: freq,
            });
            self.current_freq = Some(freq);
        }

        if self.ctx.mark_started(pid) {
            events.push(SimEvent::Started { pid });
        }

        // Work rate equals the frequency
        let start = self.ctx.now;
        let remaining = self.ctx.process(pid).remaining;
        let finishes = remaining <= freq.value();
        if finishes {
            self.ctx.advance_time(remaining / freq.value());
            self.ctx.mark_completed(pid, self.ctx.now);
        } else {
            self.ctx.advance_time(QUANTUM);
            self.ctx.consume(pid, freq.value());
        }

        self.scheduler.ran(&self.ctx, pid);

        // A few ulps of leftover work can finish without moving the clock;
        // such a step completes the process but records no slot
        if self.ctx.now > start {
            let slot = Slot::new(start, self.ctx.now, pid, freq);
            self.ctx.record_slot(slot);

            log::debug!(
                "[{:.2} -> {:.2}] P{} freq={} ready={} load={:.2} energy={:.4}",
                slot.start,
                slot.end,
                pid,
                freq,
                load.count,
                load.total_remaining,
                slot.energy
            );
            events.push(SimEvent::Ran { slot });
        } else {
            log::debug!("P{pid} finished {remaining:e} work in zero time at t={start}");
        }

        if finishes {
            events.push(SimEvent::Completed {
                pid,
                finish: self.ctx.now,
            });
        }

        self.observer.observe(&self.ctx);
        events
    }

    pub fn now(&self) -> f64 {
        self.ctx.now
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }
}

impl<S: Scheduler, G: Governor + Default> Default for SchedCore<S, G> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{SrtfScheduler, StepGovernor};

    fn core_with(bursts: &[f64]) -> SchedCore<SrtfScheduler, StepGovernor> {
        let mut core = SchedCore::new();
        for &burst in bursts {
            let pid = core.ctx.create_process(0.0, burst);
            core.wake_process(pid);
        }
        core
    }

    #[test]
    fn dispatch_without_runnable_is_a_noop() {
        let mut core: SchedCore<SrtfScheduler, StepGovernor> = SchedCore::new();
        assert!(core.dispatch().is_empty());
        assert_eq!(core.now(), 0.0);
    }

    #[test]
    fn unfinished_process_runs_one_quantum() {
        let mut core = core_with(&[3.0]);
        let events = core.dispatch();

        assert_eq!(core.now(), 1.0);
        assert_eq!(core.ctx.process(1).remaining, 2.5);
        assert_eq!(
            events[0],
            SimEvent::FrequencyChange {
                from: None,
                to: Frequency::LOW
            }
        );
        assert_eq!(events[1], SimEvent::Started { pid: 1 });
        assert!(matches!(events[2], SimEvent::Ran { slot } if slot.end == 1.0));
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn short_remainder_finishes_in_a_fractional_step() {
        let mut core = core_with(&[0.3]);
        let events = core.dispatch();

        assert!((core.now() - 0.6).abs() < 1e-12);
        assert_eq!(core.ctx.process(1).remaining, 0.0);
        assert_eq!(core.ctx.process(1).finish_time, Some(core.now()));
        assert!(matches!(events.last(), Some(SimEvent::Completed { pid: 1, .. })));
        assert!(core.ctx.all_completed());
    }

    #[test]
    fn negligible_remainder_completes_without_a_slot() {
        let mut core = core_with(&[3.0]);
        core.ctx.now = 4.1;
        core.ctx.process_mut(1).remaining = 1.0e-16;
        core.scheduler.ran(&core.ctx, 1);

        let events = core.dispatch();

        assert!(core.ctx.all_completed());
        assert!(core.ctx.slots.is_empty());
        assert_eq!(core.ctx.process(1).finish_time, Some(4.1));
        assert_eq!(core.ctx.energy, 0.0);
        assert!(!events.iter().any(|e| matches!(e, SimEvent::Ran { .. })));
        assert!(matches!(events.last(), Some(SimEvent::Completed { pid: 1, .. })));
    }

    #[test]
    fn frequency_change_is_reported_only_on_change() {
        let mut core = core_with(&[5.0]);
        core.dispatch();
        let events = core.dispatch();
        assert!(
            !events
                .iter()
                .any(|e| matches!(e, SimEvent::FrequencyChange { .. }))
        );
        assert_eq!(core.observer().steps(), 2);
    }
}
