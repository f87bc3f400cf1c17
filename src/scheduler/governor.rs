use crate::core::Frequency;

// Ready sets with less total remaining work than this run at a reduced frequency
pub const LIGHT_LOAD: f64 = 3.0;
// Ready sets at least this large run at full speed
pub const CROWDED: usize = 3;

/// Snapshot of the ready set that a governor bases its decision on.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ReadyLoad {
    pub count: usize,
    pub total_remaining: f64,
}

/// DVFS policy: maps the current ready set to an operating frequency.
pub trait Governor {
    fn name(&self) -> &'static str;

    fn select(&mut self, load: &ReadyLoad) -> Frequency;
}

/// Four-level step governor. Re-evaluated every step with no hysteresis:
///
/// | ready set                        | frequency |
/// |----------------------------------|-----------|
/// | one process                      | 0.50      |
/// | total remaining < 3.0            | 0.65      |
/// | three or more processes          | 1.00      |
/// | two processes, remaining >= 3.0  | 0.80      |
#[derive(Debug, Default, Clone, Copy)]
pub struct StepGovernor;

impl Governor for StepGovernor {
    fn name(&self) -> &'static str {
        "step"
    }

    fn select(&mut self, load: &ReadyLoad) -> Frequency {
        if load.count <= 1 {
            Frequency::LOW
        } else if load.total_remaining < LIGHT_LOAD {
            Frequency::REDUCED
        } else if load.count >= CROWDED {
            Frequency::MAX
        } else {
            Frequency::NOMINAL
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn select(count: usize, total_remaining: f64) -> Frequency {
        StepGovernor.select(&ReadyLoad {
            count,
            total_remaining,
        })
    }

    #[test]
    fn single_process_runs_low() {
        assert_eq!(select(1, 100.0), Frequency::LOW);
        assert_eq!(select(1, 0.1), Frequency::LOW);
    }

    #[test]
    fn light_load_beats_crowding() {
        assert_eq!(select(2, 2.99), Frequency::REDUCED);
        assert_eq!(select(5, 2.5), Frequency::REDUCED);
    }

    #[test]
    fn threshold_is_exclusive() {
        assert_eq!(select(2, 3.0), Frequency::NOMINAL);
        assert_eq!(select(3, 3.0), Frequency::MAX);
    }

    #[test]
    fn crowded_runs_max() {
        assert_eq!(select(3, 10.0), Frequency::MAX);
        assert_eq!(select(2, 10.0), Frequency::NOMINAL);
    }
}
