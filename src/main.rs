use std::collections::VecDeque;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use clap::Parser;
use colored::Colorize;
use dvfs_model::{
    Error, ProcessSpec, Result, Sim, logger, report,
    scheduler::{SrtfScheduler, StepGovernor},
    sim::{BernoulliParams, bernoulli_workload, read_workload},
    summarize,
};

#[derive(Parser, Debug)]
#[command(name = "dvfs-sim")]
#[command(about = "Simulate energy-aware SRTF scheduling with DVFS", long_about = None)]
struct Args {
    /// Process as ARRIVAL:BURST; repeat for more, pids follow the given order.
    /// Without -p, --input or --random the workload is read interactively.
    #[arg(short, long = "process", value_name = "ARRIVAL:BURST")]
    processes: Vec<ProcessSpec>,

    /// JSON file with an array of {"arrival": .., "burst": ..}
    #[arg(short, long, conflicts_with = "processes")]
    input: Option<PathBuf>,

    /// Generate a Bernoulli workload over this many ticks
    #[arg(long, value_name = "TICKS", conflicts_with_all = ["processes", "input"])]
    random: Option<u64>,

    /// Seed for --random
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Per-tick arrival probability for --random
    #[arg(long, default_value_t = 0.3)]
    p_arrival: f64,

    /// Probability that a generated process is short
    #[arg(long, default_value_t = 0.3)]
    p_short: f64,

    #[arg(long, default_value_t = 2.0)]
    short_burst: f64,

    #[arg(long, default_value_t = 6.0)]
    long_burst: f64,

    /// Write the schedule and summary as JSON
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print every simulation event
    #[arg(long)]
    events: bool,

    /// Merge back-to-back slots of one process at one frequency in the Gantt chart
    #[arg(long)]
    merge: bool,

    #[arg(long)]
    no_color: bool,

    /// error, warn, info, debug or trace (default: RUST_LOG, else warn)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    logger::init(args.log_level.as_deref());
    if args.no_color {
        colored::control::set_override(false);
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    println!(
        "{}",
        "\n\nEnergy-Efficient CPU Scheduling (DVFS + SRTF)".cyan().bold()
    );

    let specs = load_workload(args)?;
    let mut sim = Sim::<SrtfScheduler, StepGovernor>::new(&specs)?;

    println!("{}", report::banner("Scheduling Started"));
    while !sim.all_completed() {
        let now = sim.core.now();
        let events = sim.step();
        if args.events {
            for event in events {
                println!("t={now:.2} {event:?}");
            }
        }
    }

    let schedule = sim.into_schedule();
    let summary = summarize(&schedule)?;

    println!("{}", report::banner("Process Summary"));
    print!("{}", report::render_summary(&summary));
    println!("{}", report::banner("Gantt Chart"));
    print!("{}", report::render_gantt(&schedule, args.merge));

    if let Some(path) = &args.output {
        fs::write(path, report::to_json(&schedule, &summary)?)?;
        log::info!("wrote report to {}", path.display());
    }

    Ok(())
}

fn load_workload(args: &Args) -> Result<Vec<ProcessSpec>> {
    if let Some(ticks) = args.random {
        let params = BernoulliParams {
            ticks,
            p_arrival: args.p_arrival,
            p_short: args.p_short,
            short_burst: args.short_burst,
            long_burst: args.long_burst,
        };
        let specs = bernoulli_workload(&params, args.seed);
        log::info!("generated {} processes (seed {})", specs.len(), args.seed);
        return Ok(specs);
    }

    if let Some(path) = &args.input {
        return read_workload(path);
    }

    if !args.processes.is_empty() {
        return Ok(args.processes.clone());
    }

    prompt_workload()
}

fn prompt_workload() -> Result<Vec<ProcessSpec>> {
    let stdin = io::stdin();
    let mut tokens = Tokens::new(stdin.lock());

    let n: usize = tokens.prompt("Enter number of processes: ")?;
    let mut specs = Vec::with_capacity(n);
    for pid in 1..=n {
        print!("{}", format!("\nProcess P{pid}:").blue());
        let arrival = tokens.prompt("\n  Arrival Time : ")?;
        let burst = tokens.prompt("  Burst Time   : ")?;
        specs.push(ProcessSpec::new(arrival, burst));
    }
    println!();

    Ok(specs)
}

// Whitespace-separated tokens from a line reader
struct Tokens<R> {
    reader: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> Tokens<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }

    fn prompt<T: FromStr>(&mut self, prompt: &str) -> Result<T> {
        print!("{prompt}");
        io::stdout().flush()?;
        let token = self.next_token()?;
        token.parse().map_err(|_| Error::NotANumber(token))
    }

    fn next_token(&mut self) -> Result<String> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(token);
            }
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input ended early").into());
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
    }
}
