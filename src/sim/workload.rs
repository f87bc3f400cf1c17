use rand::prelude::*;

use super::job::ProcessSpec;

/// Parameters of the synthetic Bernoulli workload.
#[derive(Debug, Clone, Copy)]
pub struct BernoulliParams {
    // Number of integer time points at which a process may arrive
    pub ticks: u64,
    pub p_arrival: f64,
    pub p_short: f64,
    pub short_burst: f64,
    pub long_burst: f64,
}

impl Default for BernoulliParams {
    fn default() -> Self {
        Self {
            ticks: 20,
            p_arrival: 0.3,
            p_short: 0.3,
            short_burst: 2.0,
            long_burst: 6.0,
        }
    }
}

/// At each tick a process arrives with probability `p_arrival`; it is short
/// with probability `p_short`. Deterministic for a given seed.
pub fn bernoulli_workload(params: &BernoulliParams, seed: u64) -> Vec<ProcessSpec> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut specs = Vec::new();

    for t in 0..params.ticks {
        if rng.random::<f64>() < params.p_arrival {
            let burst = if rng.random::<f64>() < params.p_short {
                params.short_burst
            } else {
                params.long_burst
            };

            specs.push(ProcessSpec::new(t as f64, burst));
        }
    }

    specs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_workload() {
        let params = BernoulliParams::default();
        assert_eq!(bernoulli_workload(&params, 7), bernoulli_workload(&params, 7));
    }

    #[test]
    fn arrivals_are_sorted_ticks_with_known_bursts() {
        let params = BernoulliParams {
            ticks: 200,
            ..BernoulliParams::default()
        };
        let specs = bernoulli_workload(&params, 1);

        assert!(!specs.is_empty());
        assert!(specs.windows(2).all(|w| w[0].arrival < w[1].arrival));
        assert!(
            specs
                .iter()
                .all(|s| s.burst == params.short_burst || s.burst == params.long_burst)
        );
    }

    #[test]
    fn certain_arrival_fills_every_tick() {
        let params = BernoulliParams {
            ticks: 5,
            p_arrival: 1.0,
            p_short: 1.0,
            ..BernoulliParams::default()
        };
        let specs = bernoulli_workload(&params, 0);
        assert_eq!(specs.len(), 5);
        assert!(specs.iter().all(|s| s.burst == 2.0));
    }
}
