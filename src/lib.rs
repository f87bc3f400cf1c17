pub mod core;
pub mod error;
pub mod logger;
pub mod metrics;
pub mod report;
pub mod scheduler;
pub mod sim;

pub use crate::core::{Frequency, SimEvent, Slot};
pub use error::{Error, Result};
pub use metrics::{Summary, summarize};
pub use scheduler::{Governor, Scheduler};
pub use sim::{ProcessSpec, Schedule, Sim, simulate};
