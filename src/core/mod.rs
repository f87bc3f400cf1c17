pub mod driver;
pub mod dvfs;
pub mod event;
pub mod observer;
pub mod state;

pub use driver::SchedCore;
pub use dvfs::{FreqBand, Frequency};
pub use event::SimEvent;
pub use state::{Pid, Process, ProcessState, QUANTUM, SimCtx, Slot, Time};
