pub mod driver;
pub mod job;
pub mod schedule;
pub mod workload;

pub use driver::{Sim, simulate};
pub use job::{ProcessSpec, parse_workload, read_workload, validate};
pub use schedule::{Run, Schedule};
pub use workload::{BernoulliParams, bernoulli_workload};
