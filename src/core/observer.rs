use super::state::{ProcessState, SimCtx, Time};

// Relative slack for comparing a slot gap against the idle jump before it
const GAP_EPSILON: Time = 1e-12;

#[derive(Debug)]
pub struct Observer {
    step: u64,
    last_now: Time,
}

impl Observer {
    pub fn new() -> Self {
        Self {
            step: 0,
            last_now: 0.0,
        }
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn observe(&mut self, ctx: &SimCtx) {
        self.step += 1;

        debug_assert!(
            ctx.now >= self.last_now,
            "Clock went backwards: {} -> {}",
            self.last_now,
            ctx.now
        );
        self.last_now = ctx.now;

        if let [.., prev, last] = ctx.slots.as_slice() {
            let gap = last.start - prev.end;
            let idle = ctx.last_gap;
            debug_assert!(gap >= 0.0, "Slot for P{} overlaps its predecessor", last.pid);
            debug_assert!(
                (gap - idle).abs() <= GAP_EPSILON * last.start.max(1.0),
                "Gap of {gap} before P{} slot not explained by idle time {idle}",
                last.pid
            );
        }

        for proc in &ctx.procs {
            debug_assert!(
                proc.remaining >= 0.0,
                "P{} has negative remaining work",
                proc.pid
            );
            match proc.state {
                ProcessState::Completed => {
                    debug_assert_eq!(proc.remaining, 0.0, "Completed P{} has work left", proc.pid);
                    debug_assert!(
                        proc.finish_time.is_some() && proc.start_time.is_some(),
                        "Completed P{} missing start/finish",
                        proc.pid
                    );
                }
                ProcessState::Pending => {
                    debug_assert!(
                        proc.start_time.is_none(),
                        "P{} ran before arriving",
                        proc.pid
                    );
                }
                ProcessState::Runnable => {
                    debug_assert!(
                        proc.finish_time.is_none(),
                        "Runnable P{} already has a finish time",
                        proc.pid
                    );
                }
            }
        }
    }
}

impl Default for Observer {
    fn default() -> Self {
        Self::new()
    }
}
