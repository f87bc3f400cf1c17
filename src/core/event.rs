use crate::core::{Frequency, Pid, Slot, Time};

#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    Arrived {
        pid: Pid,
    },
    // Nothing runnable; clock jumped to the next arrival
    Idle {
        from: Time,
        to: Time,
    },
    FrequencyChange {
        from: Option<Frequency>,
        to: Frequency,
    },
    // First time `pid` was picked
    Started {
        pid: Pid,
    },
    Ran {
        slot: Slot,
    },
    Completed {
        pid: Pid,
        finish: Time,
    },
}
