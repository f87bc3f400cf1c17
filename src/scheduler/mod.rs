pub mod governor;
pub mod srtf;

use crate::core::state::{Pid, SimCtx};
pub use governor::{Governor, ReadyLoad, StepGovernor};
pub use srtf::SrtfScheduler;

/// Process selection policy.
///
/// The core wakes each process through `enqueue` once it has arrived, asks
/// `pick_next` for the process to run at every step, and reports back with
/// `ran` after the process's remaining work (or completion) was updated.
pub trait Scheduler {
    fn init(ctx: &mut SimCtx) -> Self;

    fn name(&self) -> &'static str;

    fn enqueue(&mut self, ctx: &SimCtx, pid: Pid);

    // Must not remove `pid` from the run queue; the step may not finish it
    fn pick_next(&mut self, ctx: &SimCtx) -> Option<Pid>;

    fn ran(&mut self, ctx: &SimCtx, pid: Pid);
}
