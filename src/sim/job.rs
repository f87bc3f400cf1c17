use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::Time;
use crate::error::{Error, Result};

/// Input descriptor for one process. Its pid is its 1-based position in the
/// workload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProcessSpec {
    pub arrival: Time,
    pub burst: f64,
}

impl ProcessSpec {
    pub fn new(arrival: Time, burst: f64) -> Self {
        Self { arrival, burst }
    }
}

// "ARRIVAL:BURST", e.g. "0:4" or "1.5:0.3"
impl FromStr for ProcessSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let bad = || Error::BadProcessSpec(s.to_string());
        let (arrival, burst) = s.split_once([':', ',']).ok_or_else(bad)?;
        let arrival = arrival.trim().parse().map_err(|_| bad())?;
        let burst = burst.trim().parse().map_err(|_| bad())?;
        Ok(Self { arrival, burst })
    }
}

/// Reject workloads the simulation is undefined for.
pub fn validate(specs: &[ProcessSpec]) -> Result<()> {
    if specs.is_empty() {
        return Err(Error::EmptyWorkload);
    }

    for (i, spec) in specs.iter().enumerate() {
        let pid = i + 1;
        if !spec.arrival.is_finite() || spec.arrival < 0.0 {
            return Err(Error::InvalidArrival {
                pid,
                arrival: spec.arrival,
            });
        }
        if !spec.burst.is_finite() || spec.burst <= 0.0 {
            return Err(Error::InvalidBurst {
                pid,
                burst: spec.burst,
            });
        }
    }

    Ok(())
}

/// Parse a JSON array of `{"arrival": .., "burst": ..}` objects. Array
/// order assigns the pids.
pub fn parse_workload(json: &str) -> Result<Vec<ProcessSpec>> {
    let specs: Vec<ProcessSpec> = serde_json::from_str(json)?;
    validate(&specs)?;
    Ok(specs)
}

pub fn read_workload(path: &Path) -> Result<Vec<ProcessSpec>> {
    parse_workload(&fs::read_to_string(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_colon_and_comma_forms() {
        assert_eq!("0:4".parse::<ProcessSpec>().unwrap(), ProcessSpec::new(0.0, 4.0));
        assert_eq!(
            " 1.5 , 0.3 ".parse::<ProcessSpec>().unwrap(),
            ProcessSpec::new(1.5, 0.3)
        );
    }

    #[test]
    fn rejects_malformed_spec() {
        assert!(matches!(
            "4".parse::<ProcessSpec>(),
            Err(Error::BadProcessSpec(s)) if s == "4"
        ));
        assert!("a:b".parse::<ProcessSpec>().is_err());
    }

    #[test]
    fn validate_rejects_empty_workload() {
        assert!(matches!(validate(&[]), Err(Error::EmptyWorkload)));
    }

    #[test]
    fn validate_names_offending_process() {
        let specs = [ProcessSpec::new(0.0, 1.0), ProcessSpec::new(-1.0, 1.0)];
        assert!(matches!(
            validate(&specs),
            Err(Error::InvalidArrival { pid: 2, .. })
        ));

        let specs = [ProcessSpec::new(0.0, 0.0)];
        assert!(matches!(
            validate(&specs),
            Err(Error::InvalidBurst { pid: 1, .. })
        ));

        let specs = [ProcessSpec::new(f64::NAN, 1.0)];
        assert!(validate(&specs).is_err());
    }

    #[test]
    fn json_workload_keeps_array_order() {
        let json = r#"[
            {"arrival": 2.0, "burst": 1.0},
            {"arrival": 0.0, "burst": 3.5}
        ]"#;
        let specs = parse_workload(json).unwrap();
        assert_eq!(
            specs,
            vec![ProcessSpec::new(2.0, 1.0), ProcessSpec::new(0.0, 3.5)]
        );

        let schedule = crate::sim::simulate(&specs).unwrap();
        assert_eq!(schedule.processes[0].arrival, 2.0);
        assert_eq!(schedule.processes[1].arrival, 0.0);
        assert_eq!(schedule.slots[0].pid, 2);
    }

    #[test]
    fn malformed_json_workload_is_rejected() {
        assert!(matches!(
            parse_workload(r#"[{"arrival": 0.0}]"#),
            Err(Error::Json(_))
        ));
        assert!(matches!(
            parse_workload(r#"[{"arrival": 0.0, "burst": 1.0},"#),
            Err(Error::Json(_))
        ));
        assert!(matches!(parse_workload("[]"), Err(Error::EmptyWorkload)));
        assert!(matches!(
            parse_workload(r#"[{"arrival": 0.0, "burst": -1.0}]"#),
            Err(Error::InvalidBurst { pid: 1, .. })
        ));
    }

    #[test]
    fn missing_workload_file_is_an_io_error() {
        let path = Path::new("/nonexistent/dvfs-workload.json");
        assert!(matches!(read_workload(path), Err(Error::Io(_))));
    }

    #[test]
    fn validate_accepts_zero_arrival() {
        assert!(validate(&[ProcessSpec::new(0.0, 0.1)]).is_ok());
    }
}
