use thiserror::Error;

use crate::core::Pid;

#[derive(Debug, Error)]
pub enum Error {
    #[error("no processes to schedule")]
    EmptyWorkload,

    #[error("P{pid}: arrival time must be finite and >= 0, got {arrival}")]
    InvalidArrival { pid: Pid, arrival: f64 },

    #[error("P{pid}: burst time must be finite and > 0, got {burst}")]
    InvalidBurst { pid: Pid, burst: f64 },

    #[error("invalid process '{0}': expected ARRIVAL:BURST")]
    BadProcessSpec(String),

    #[error("expected a number, got '{0}'")]
    NotANumber(String),

    #[error("P{0} has not finished")]
    Unfinished(Pid),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
