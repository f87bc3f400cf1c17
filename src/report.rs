//! Text rendering of a finished run: the process summary table, averages and
//! a Gantt-style slot listing. Styling goes through `colored`, so
//! `colored::control::set_override(false)` yields plain text.

use colored::{ColoredString, Colorize};
use serde::Serialize;

use crate::core::{FreqBand, Frequency};
use crate::metrics::Summary;
use crate::sim::Schedule;

pub fn fmt2(x: f64) -> String {
    format!("{x:.2}")
}

pub fn freq_label(freq: Frequency) -> ColoredString {
    let band = freq.band();
    let label = format!(" {band} ");
    match band {
        FreqBand::Low => label.black().on_bright_green(),
        FreqBand::Medium => label.black().on_bright_yellow(),
        FreqBand::High => label.bright_white().on_red(),
    }
}

pub fn banner(title: &str) -> String {
    format!("\n========== {title} ==========\n")
        .magenta()
        .bold()
        .to_string()
}

pub fn render_summary(summary: &Summary) -> String {
    let header = format!(
        "{:<6}{:<10}{:<10}{:<12}{:<12}{:<12}{:<12}",
        "PID", "Arr", "Burst", "Start", "Finish", "TAT", "WT"
    );
    let mut out = format!("{}\n", header.bold());

    for m in &summary.processes {
        out.push_str(&format!(
            "{:<6}{:<10}{:<10}{:<12}{:<12}{}{}\n",
            format!("P{}", m.pid),
            fmt2(m.arrival),
            fmt2(m.burst),
            fmt2(m.start),
            fmt2(m.finish),
            format!("{:<12}", fmt2(m.turnaround)).yellow(),
            format!("{:<12}", fmt2(m.waiting)).cyan(),
        ));
    }

    let averages = [
        format!("Average Turnaround Time : {}", fmt2(summary.avg_turnaround)).green(),
        format!("Average Waiting Time    : {}", fmt2(summary.avg_waiting)).cyan(),
        format!("Average Response Time   : {}", fmt2(summary.avg_response)).blue(),
        format!("Total Energy Consumed   : {} units", fmt2(summary.total_energy)).red(),
    ];
    out.push('\n');
    for line in averages {
        out.push_str(&format!("{line}\n"));
    }
    out
}

/// One line per slot, or per merged run when `merge` is set.
pub fn render_gantt(schedule: &Schedule, merge: bool) -> String {
    let rows: Vec<_> = if merge {
        schedule
            .runs()
            .iter()
            .map(|r| (r.start, r.end, r.pid, r.freq, r.power, r.energy))
            .collect()
    } else {
        schedule
            .slots
            .iter()
            .map(|s| (s.start, s.end, s.pid, s.freq, s.power, s.energy))
            .collect()
    };

    rows.into_iter()
        .map(|(start, end, pid, freq, power, energy)| {
            format!(
                "{} {}  |  freq: {}  |  Power: {}  |  Energy: {}\n\n",
                format!("[{} -> {}]", fmt2(start), fmt2(end)).bold(),
                format!("P{pid}").cyan(),
                freq_label(freq),
                fmt2(power),
                fmt2(energy)
            )
        })
        .collect()
}

#[derive(Serialize)]
pub struct JsonReport<'a> {
    pub schedule: &'a Schedule,
    pub summary: &'a Summary,
}

pub fn to_json(schedule: &Schedule, summary: &Summary) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport { schedule, summary })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::summarize;
    use crate::sim::{ProcessSpec, simulate};

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn fmt2_rounds_to_two_decimals() {
        assert_eq!(fmt2(2.0), "2.00");
        assert_eq!(fmt2(2.615384), "2.62");
    }

    #[test]
    fn summary_table_lists_every_process() {
        plain();
        let schedule = simulate(&[ProcessSpec::new(0.0, 2.0), ProcessSpec::new(1.0, 1.0)]).unwrap();
        let text = render_summary(&summarize(&schedule).unwrap());

        assert!(text.starts_with("PID"));
        assert!(text.contains("P1"));
        assert!(text.contains("P2"));
        assert!(text.contains("units"));
    }

    #[test]
    fn plain_summary_layout() {
        plain();
        let schedule = simulate(&[ProcessSpec::new(0.0, 1.0)]).unwrap();
        let text = render_summary(&summarize(&schedule).unwrap());

        let expected = [
            "PID   Arr       Burst     Start       Finish      TAT         WT          ",
            "P1    0.00      1.00      0.00        2.00        2.00        1.00        ",
            "",
            "Average Turnaround Time : 2.00",
            "Average Waiting Time    : 1.00",
            "Average Response Time   : 0.00",
            "Total Energy Consumed   : 11.25 units",
            "",
        ]
        .join("\n");
        assert_eq!(text, expected);
    }

    #[test]
    fn plain_gantt_line_layout() {
        plain();
        let schedule = simulate(&[ProcessSpec::new(0.0, 1.0)]).unwrap();
        let text = render_gantt(&schedule, false);
        assert!(text.starts_with("[0.00 -> 2.00] P1  |  freq:  LOW   |  Power: 5.6"));
        assert!(text.ends_with("  |  Energy: 11.25\n\n"));
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn gantt_merges_runs_on_request() {
        plain();
        let schedule = simulate(&[ProcessSpec::new(0.0, 4.0)]).unwrap();

        let merged = render_gantt(&schedule, true);
        assert!(merged.contains("[0.00 -> 8.00] P1  |  freq:  LOW "));
        assert_eq!(merged.lines().filter(|l| !l.is_empty()).count(), 1);

        let full = render_gantt(&schedule, false);
        assert_eq!(full.lines().filter(|l| !l.is_empty()).count(), 8);
    }

    #[test]
    fn json_report_contains_schedule_and_summary() {
        let schedule = simulate(&[ProcessSpec::new(0.0, 1.0)]).unwrap();
        let summary = summarize(&schedule).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&to_json(&schedule, &summary).unwrap()).unwrap();

        assert_eq!(value["schedule"]["slots"][0]["freq"], 0.5);
        assert_eq!(value["summary"]["processes"][0]["pid"], 1);
    }
}
